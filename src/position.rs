use crate::error::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

/// Number of seats at the table.
pub const NUM_POSITIONS: usize = 6;

/// Table position, in preflop acting order.
///
/// The position index equals the number of players who act before this seat. On the wire a
/// position is its index (`0` for UTG, ..., `5` for BB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
pub enum Position {
    #[default]
    Utg,
    Mp,
    Co,
    Btn,
    Sb,
    Bb,
}

impl Position {
    /// All positions in acting order.
    pub const ALL: [Position; NUM_POSITIONS] = [
        Position::Utg,
        Position::Mp,
        Position::Co,
        Position::Btn,
        Position::Sb,
        Position::Bb,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the number of seats that act before this one.
    #[inline]
    pub fn num_prior_seats(self) -> usize {
        self.index()
    }

    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Position::Utg => "UTG",
            Position::Mp => "MP",
            Position::Co => "CO",
            Position::Btn => "BTN",
            Position::Sb => "SB",
            Position::Bb => "BB",
        }
    }
}

impl TryFrom<u8> for Position {
    type Error = RangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Position::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| {
                RangeError::OutOfRange(format!(
                    "Position must be in [0, {}]: {value}",
                    NUM_POSITIONS - 1
                ))
            })
    }
}

impl TryFrom<usize> for Position {
    type Error = RangeError;

    #[inline]
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        let value = u8::try_from(value)
            .map_err(|_| RangeError::OutOfRange(format!("Position out of range: {value}")))?;
        Position::try_from(value)
    }
}

impl From<Position> for u8 {
    #[inline]
    fn from(position: Position) -> Self {
        position as u8
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Position {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Position::ALL
            .into_iter()
            .find(|p| p.label() == upper)
            .ok_or_else(|| RangeError::Parse(format!("Invalid position: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_index() {
        for (i, position) in Position::ALL.into_iter().enumerate() {
            assert_eq!(position.index(), i);
            assert_eq!(Position::try_from(i as u8), Ok(position));
            assert_eq!(position.label().parse::<Position>(), Ok(position));
        }

        assert!(matches!(Position::try_from(6u8), Err(RangeError::OutOfRange(_))));
        assert!(matches!(Position::try_from(300usize), Err(RangeError::OutOfRange(_))));
        assert_eq!("btn".parse::<Position>(), Ok(Position::Btn));
        assert!("HJ".parse::<Position>().is_err());
    }

    #[test]
    fn test_position_serde() {
        assert_eq!(serde_json::to_string(&Position::Co).unwrap(), "2");
        assert_eq!(serde_json::from_str::<Position>("5").unwrap(), Position::Bb);
        assert!(serde_json::from_str::<Position>("6").is_err());
    }
}
