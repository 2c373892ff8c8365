//! Floor numbering and travel direction

/// Largest number of stops the controller supports
pub const MAX_FLOORS: u8 = 8;

/// Errors from constructing or moving between floors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FloorError {
    /// Floor number outside 1..=floor_count
    OutOfRange,
}

/// A stop in the shaft, numbered from 1
///
/// Only constructible through [`Floor::new`], so a `Floor` is always inside
/// the shaft it was created for. There is no floor 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Floor(u8);

impl Floor {
    pub fn new(number: u8, floor_count: u8) -> Result<Self, FloorError> {
        if number == 0 || number > floor_count || floor_count > MAX_FLOORS {
            return Err(FloorError::OutOfRange);
        }
        Ok(Self(number))
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// Zero-based index, for button banks and lookup tables
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// The neighbouring floor in `travel` direction
    pub fn step(self, travel: Travel, floor_count: u8) -> Result<Self, FloorError> {
        let next = match travel {
            Travel::Up => self.0.checked_add(1),
            Travel::Down => self.0.checked_sub(1),
        };
        next.ok_or(FloorError::OutOfRange)
            .and_then(|n| Self::new(n, floor_count))
    }

    /// Direction needed to get from `self` to `target`, `None` if already there
    pub fn travel_to(self, target: Floor) -> Option<Travel> {
        if target.0 > self.0 {
            Some(Travel::Up)
        } else if target.0 < self.0 {
            Some(Travel::Down)
        } else {
            None
        }
    }
}

/// Direction of hoist travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Travel {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_check() {
        assert_eq!(Floor::new(0, 3), Err(FloorError::OutOfRange));
        assert_eq!(Floor::new(4, 3), Err(FloorError::OutOfRange));
        assert_eq!(Floor::new(3, 3).map(Floor::number), Ok(3));
        assert_eq!(Floor::new(1, MAX_FLOORS + 1), Err(FloorError::OutOfRange));
    }

    #[test]
    fn test_step_stays_in_shaft() {
        let top = Floor::new(3, 3).unwrap();
        let bottom = Floor::new(1, 3).unwrap();

        assert_eq!(top.step(Travel::Up, 3), Err(FloorError::OutOfRange));
        assert_eq!(bottom.step(Travel::Down, 3), Err(FloorError::OutOfRange));
        assert_eq!(bottom.step(Travel::Up, 3).map(Floor::number), Ok(2));
        assert_eq!(top.step(Travel::Down, 3).map(Floor::number), Ok(2));
    }

    #[test]
    fn test_travel_to() {
        let one = Floor::new(1, 3).unwrap();
        let three = Floor::new(3, 3).unwrap();

        assert_eq!(one.travel_to(three), Some(Travel::Up));
        assert_eq!(three.travel_to(one), Some(Travel::Down));
        assert_eq!(one.travel_to(one), None);
        assert_eq!(three.index(), 2);
    }
}
