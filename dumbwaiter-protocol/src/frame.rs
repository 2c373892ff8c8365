//! Frame encoding and decoding for the indicator panel link.
//!
//! Frame format:
//! - START (1 byte): 0x7E synchronization byte
//! - TYPE (1 byte): message type identifier
//! - LENGTH (1 byte): payload length (0-16)
//! - PAYLOAD (0-16 bytes): type-specific data
//! - CRC8 (1 byte): polynomial 0x07 over TYPE, LENGTH and PAYLOAD

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0x7E;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 16;

/// Maximum complete frame size (START + TYPE + LENGTH + MAX_PAYLOAD + CRC8)
pub const MAX_FRAME_SIZE: usize = 3 + MAX_PAYLOAD_SIZE + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// CRC mismatch
    InvalidCrc,
    /// Declared length is larger than the protocol allows
    InvalidLength,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// CRC-8 with polynomial 0x07, initial value 0
pub fn crc8(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |crc, &byte| {
        let mut crc = crc ^ byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x07
            } else {
                crc << 1
            };
        }
        crc
    })
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub msg_type: u8,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a frame, rejecting oversized payloads
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Encode into `buffer`, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.payload.len();
        let frame_len = 4 + len;
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        buffer[0] = FRAME_START;
        buffer[1] = self.msg_type;
        buffer[2] = len as u8;
        buffer[3..3 + len].copy_from_slice(&self.payload);
        buffer[3 + len] = crc8(&buffer[1..3 + len]);

        Ok(frame_len)
    }

    /// Encode into a fixed-capacity vector
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    Type,
    Length,
    Payload,
    Crc,
}

/// Byte-at-a-time frame decoder
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    msg_type: u8,
    expected_length: u8,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Start,
            msg_type: 0,
            expected_length: 0,
            buffer: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.state = ParseState::Start;
        self.msg_type = 0;
        self.expected_length = 0;
        self.buffer.clear();
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(frame))` once a complete frame with a valid CRC has
    /// been received. Bytes outside a frame are skipped until the next START.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Start => {
                if byte == FRAME_START {
                    self.state = ParseState::Type;
                }
                Ok(None)
            }
            ParseState::Type => {
                self.msg_type = byte;
                self.state = ParseState::Length;
                Ok(None)
            }
            ParseState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidLength);
                }
                self.expected_length = byte;
                self.buffer.clear();
                self.state = if byte == 0 {
                    ParseState::Crc
                } else {
                    ParseState::Payload
                };
                Ok(None)
            }
            ParseState::Payload => {
                // Capacity is guaranteed by the length check above
                let _ = self.buffer.push(byte);
                if self.buffer.len() == self.expected_length as usize {
                    self.state = ParseState::Crc;
                }
                Ok(None)
            }
            ParseState::Crc => {
                let mut covered: Vec<u8, { MAX_PAYLOAD_SIZE + 2 }> = Vec::new();
                let _ = covered.push(self.msg_type);
                let _ = covered.push(self.expected_length);
                let _ = covered.extend_from_slice(&self.buffer);

                let expected = crc8(&covered);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidCrc);
                }

                let frame = Frame {
                    msg_type: self.msg_type,
                    payload: self.buffer.clone(),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed bytes until the first complete frame
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc8_known_value() {
        // CRC-8/SMBUS check value for "123456789"
        assert_eq!(crc8(b"123456789"), 0xF4);
        assert_eq!(crc8(&[]), 0);
    }

    #[test]
    fn test_encode_layout() {
        let frame = Frame::new(0x11, &[3, 1]).unwrap();
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 6);
        assert_eq!(buffer[0], FRAME_START);
        assert_eq!(buffer[1], 0x11);
        assert_eq!(buffer[2], 2);
        assert_eq!(&buffer[3..5], &[3, 1]);
        assert_eq!(buffer[5], crc8(&[0x11, 2, 3, 1]));
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(0x11, &[3, 1]).unwrap();
        let mut buffer = [0u8; 5];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_parser_skips_noise_before_start() {
        let encoded = Frame::empty(0x10).encode_to_vec().unwrap();

        let mut data: Vec<u8, 16> = Vec::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x42]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = FrameParser::new();
        let frame = parser.feed_bytes(&data).unwrap().unwrap();
        assert_eq!(frame.msg_type, 0x10);
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn test_parser_rejects_corrupted_crc() {
        let mut encoded = Frame::new(0x11, &[2, 1]).unwrap().encode_to_vec().unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0x5A;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&encoded), Err(FrameError::InvalidCrc));
    }

    #[test]
    fn test_parser_rejects_oversized_length() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed(FRAME_START), Ok(None));
        assert_eq!(parser.feed(0x11), Ok(None));
        assert_eq!(
            parser.feed(MAX_PAYLOAD_SIZE as u8 + 1),
            Err(FrameError::InvalidLength)
        );
    }

    #[test]
    fn test_payload_too_large() {
        let payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(0x11, &payload), Err(FrameError::PayloadTooLarge));
    }
}
