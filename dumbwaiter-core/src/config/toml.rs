//! Minimal TOML reader for `lift.toml`
//!
//! Supports the subset the lift configuration needs: `[section]` headers,
//! `key = value` pairs with decimal or `0x` hex integers (underscores
//! allowed) and `true`/`false`, blank lines and `#` comments. No strings,
//! arrays or inline tables. Works without an allocator.

use super::types::{ConfigError, LiftConfig};

/// What went wrong while reading a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// `[section` without the closing bracket
    UnterminatedSection,
    /// Section name not known
    UnknownSection,
    /// Key not known in its section (or outside any section)
    UnknownKey,
    /// Line is neither a header nor `key = value`
    MissingEquals,
    /// Value is not a valid integer or bool, or does not fit the field
    InvalidValue,
}

/// Parse error with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: u32,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Lift,
    Timing,
    Announcements,
    Bus,
    Audio,
    Motor,
}

impl Section {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "lift" => Some(Section::Lift),
            "timing" => Some(Section::Timing),
            "announcements" => Some(Section::Announcements),
            "bus" => Some(Section::Bus),
            "audio" => Some(Section::Audio),
            "motor" => Some(Section::Motor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value {
    Int(u32),
    Bool(bool),
}

impl Value {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "true" => return Some(Value::Bool(true)),
            "false" => return Some(Value::Bool(false)),
            _ => {}
        }

        let (digits, radix) = match text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
        {
            Some(hex) => (hex, 16),
            None => (text, 10),
        };

        if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
            return None;
        }

        let mut acc: u32 = 0;
        for c in digits.chars() {
            if c == '_' {
                continue;
            }
            let d = c.to_digit(radix)?;
            acc = acc.checked_mul(radix)?.checked_add(d)?;
        }
        Some(Value::Int(acc))
    }

    fn as_u32(self) -> Option<u32> {
        match self {
            Value::Int(v) => Some(v),
            Value::Bool(_) => None,
        }
    }

    fn as_u16(self) -> Option<u16> {
        self.as_u32().and_then(|v| u16::try_from(v).ok())
    }

    fn as_u8(self) -> Option<u8> {
        self.as_u32().and_then(|v| u8::try_from(v).ok())
    }

    fn as_bool(self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(b),
            Value::Int(_) => None,
        }
    }
}

/// Outcome of assigning one value
enum Assign {
    Done,
    UnknownKey,
    BadValue,
}

impl From<Option<()>> for Assign {
    fn from(result: Option<()>) -> Self {
        match result {
            Some(()) => Assign::Done,
            None => Assign::BadValue,
        }
    }
}

fn assign(config: &mut LiftConfig, section: Section, key: &str, value: Value) -> Assign {
    let set_u32 = |field: &mut u32| value.as_u32().map(|v| *field = v);
    let set_u16 = |field: &mut u16| value.as_u16().map(|v| *field = v);
    let set_u8 = |field: &mut u8| value.as_u8().map(|v| *field = v);

    match (section, key) {
        (Section::Lift, "floor_count") => set_u8(&mut config.floor_count).into(),
        (Section::Lift, "home_floor") => set_u8(&mut config.home_floor).into(),

        (Section::Timing, "settle_ms") => set_u32(&mut config.timing.settle_ms).into(),
        (Section::Timing, "blink_ms") => set_u32(&mut config.timing.blink_ms).into(),
        (Section::Timing, "transit_timeout_ms") => {
            set_u32(&mut config.timing.transit_timeout_ms).into()
        }

        (Section::Announcements, key) => {
            let a = &mut config.announcements;
            match key {
                "arrival_clip_offset" => set_u16(&mut a.arrival_clip_offset).into(),
                "arrival_hold_ms" => set_u32(&mut a.arrival_hold_ms).into(),
                "door_open_clip" => set_u16(&mut a.door_open_clip).into(),
                "door_open_hold_ms" => set_u32(&mut a.door_open_hold_ms).into(),
                "accessibility_clip" => set_u16(&mut a.accessibility_clip).into(),
                "accessibility_hold_ms" => set_u32(&mut a.accessibility_hold_ms).into(),
                "closing_soon_clip" => set_u16(&mut a.closing_soon_clip).into(),
                "closing_soon_hold_ms" => set_u32(&mut a.closing_soon_hold_ms).into(),
                "countdown_first_clip" => set_u16(&mut a.countdown_first_clip).into(),
                "countdown_len" => set_u8(&mut a.countdown_len).into(),
                "countdown_step_ms" => set_u32(&mut a.countdown_step_ms).into(),
                "door_closing_clip" => set_u16(&mut a.door_closing_clip).into(),
                _ => Assign::UnknownKey,
            }
        }

        (Section::Bus, "status_id") => set_u16(&mut config.bus.status_id).into(),
        (Section::Bus, "send_timeout_ms") => set_u32(&mut config.bus.send_timeout_ms).into(),

        (Section::Audio, "volume") => set_u8(&mut config.audio.volume).into(),

        (Section::Motor, "active_high") => value
            .as_bool()
            .map(|b| config.motor.active_high = b)
            .into(),

        _ => Assign::UnknownKey,
    }
}

/// Parse `lift.toml` text into a validated [`LiftConfig`]
///
/// Keys that are absent keep their default value.
pub fn parse_config(text: &str) -> Result<LiftConfig, ConfigError> {
    let mut config = LiftConfig::default();
    let mut section = Section::Root;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx as u32 + 1;
        let err = |kind| ParseError { line, kind };

        let content = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();

        if content.is_empty() {
            continue;
        }

        if let Some(rest) = content.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .ok_or(err(ParseErrorKind::UnterminatedSection))?;
            section = Section::from_name(name.trim())
                .ok_or(err(ParseErrorKind::UnknownSection))?;
            continue;
        }

        let (key, value) = content
            .split_once('=')
            .ok_or(err(ParseErrorKind::MissingEquals))?;
        let value = Value::parse(value.trim()).ok_or(err(ParseErrorKind::InvalidValue))?;

        match assign(&mut config, section, key.trim(), value) {
            Assign::Done => {}
            Assign::UnknownKey => return Err(err(ParseErrorKind::UnknownKey).into()),
            Assign::BadValue => return Err(err(ParseErrorKind::InvalidValue).into()),
        }
    }

    config.validate()?;
    Ok(config)
}
