use crate::error::*;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Number of ranks, i.e., the side length of the hand matrix.
pub const NUM_RANKS: usize = 13;

/// Number of canonical starting hands.
pub const NUM_HANDS: usize = NUM_RANKS * NUM_RANKS;

/// Rank characters in matrix order: index `0` is the ace, index `12` is the deuce.
pub const RANKS: [char; NUM_RANKS] = [
    'A', 'K', 'Q', 'J', 'T', '9', '8', '7', '6', '5', '4', '3', '2',
];

const RANK_PAT: &str = r"[AaKkQqJjTt2-9]";

static HAND_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?P<high>{RANK_PAT})(?P<low>{RANK_PAT})(?P<suit>[sSoO])?$"
    ))
    .unwrap()
});

/// Shape of a starting hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandKind {
    /// Two cards of the same rank (diagonal of the matrix).
    Pair,

    /// Two ranks of the same suit (above the diagonal).
    Suited,

    /// Two ranks of different suits (below the diagonal).
    Offsuit,
}

/// A canonical starting hand, addressed by its cell in the 13×13 hand matrix.
///
/// # Examples
/// ```
/// use preflop_range::{Hand, HandKind};
///
/// let hand = Hand::new(0, 1).unwrap();
/// assert_eq!(hand.to_string(), "AKs");
/// assert_eq!(hand.kind(), HandKind::Suited);
///
/// let hand = "AKo".parse::<Hand>().unwrap();
/// assert_eq!((hand.row(), hand.col()), (1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hand {
    row: u8,
    col: u8,
}

/// Attempts to convert a rank character to its matrix index.
///
/// `'A'` => `0`, `'K'` => `1`, ..., `'2'` => `12`.
#[inline]
pub(crate) fn char_to_rank_index(c: char) -> RangeResult<usize> {
    let upper = c.to_ascii_uppercase();
    RANKS
        .iter()
        .position(|&r| r == upper)
        .ok_or_else(|| RangeError::Parse(format!("Expected rank character: {c}")))
}

#[inline]
pub(crate) fn check_index(index: usize, what: &str) -> RangeResult<()> {
    if index < NUM_RANKS {
        Ok(())
    } else {
        Err(RangeError::OutOfRange(format!(
            "{what} must be in [0, {}]: {index}",
            NUM_RANKS - 1
        )))
    }
}

/// Returns the canonical label of the hand at `(row, col)`.
///
/// Pairs are on the diagonal (`"AA"`), suited hands above it (`"AKs"`), and offsuit hands below it
/// (`"AKo"`). The higher rank is always printed first.
///
/// # Examples
/// ```
/// use preflop_range::hand_label;
///
/// assert_eq!(hand_label(0, 0).unwrap(), "AA");
/// assert_eq!(hand_label(0, 12).unwrap(), "A2s");
/// assert_eq!(hand_label(12, 0).unwrap(), "A2o");
/// assert!(hand_label(13, 0).is_err());
/// ```
#[inline]
pub fn hand_label(row: usize, col: usize) -> RangeResult<String> {
    Ok(Hand::new(row, col)?.to_string())
}

impl Hand {
    /// Creates the hand at `(row, col)`; both indices must be in `[0, 12]`.
    #[inline]
    pub fn new(row: usize, col: usize) -> RangeResult<Self> {
        check_index(row, "Row")?;
        check_index(col, "Column")?;
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Returns an iterator over all 169 hands in row-major matrix order.
    #[inline]
    pub fn all() -> impl Iterator<Item = Hand> {
        (0..NUM_HANDS).map(|i| Hand {
            row: (i / NUM_RANKS) as u8,
            col: (i % NUM_RANKS) as u8,
        })
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row as usize
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.col as usize
    }

    #[inline]
    pub fn kind(&self) -> HandKind {
        use std::cmp::Ordering::*;
        match self.row.cmp(&self.col) {
            Equal => HandKind::Pair,
            Less => HandKind::Suited,
            Greater => HandKind::Offsuit,
        }
    }

    /// Returns the number of card combinations the hand stands for (6, 4, or 12).
    #[inline]
    pub fn num_combos(&self) -> usize {
        match self.kind() {
            HandKind::Pair => 6,
            HandKind::Suited => 4,
            HandKind::Offsuit => 12,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r1 = RANKS[self.row()];
        let r2 = RANKS[self.col()];
        match self.kind() {
            HandKind::Pair => write!(f, "{r1}{r2}"),
            HandKind::Suited => write!(f, "{r1}{r2}s"),
            HandKind::Offsuit => write!(f, "{r2}{r1}o"),
        }
    }
}

impl FromStr for Hand {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = HAND_REGEX
            .captures(s.trim())
            .ok_or_else(|| RangeError::Parse(format!("Failed to parse hand: {s}")))?;

        let high = char_to_rank_index(caps["high"].chars().next().unwrap_or_default())?;
        let low = char_to_rank_index(caps["low"].chars().next().unwrap_or_default())?;
        let suit = caps.name("suit").map(|m| m.as_str().to_ascii_lowercase());
        let suit = suit.as_deref();

        if high > low {
            return Err(RangeError::Parse(format!(
                "The first rank must be higher than or equal to the second rank: {s}"
            )));
        }

        match (high == low, suit) {
            (true, None) => Hand::new(high, low),
            (true, Some(_)) => Err(RangeError::Parse(format!(
                "A pair with suitedness is not allowed: {s}"
            ))),
            (false, Some("s")) => Hand::new(high, low),
            (false, Some(_)) => Hand::new(low, high),
            (false, None) => Err(RangeError::Parse(format!(
                "Suitedness is required for a non-pair: {s}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_label() {
        let tests = [
            ((0, 0), "AA"),
            ((12, 12), "22"),
            ((0, 1), "AKs"),
            ((1, 0), "AKo"),
            ((4, 5), "T9s"),
            ((5, 4), "T9o"),
            ((11, 12), "32s"),
            ((12, 11), "32o"),
        ];

        for ((row, col), expected) in tests {
            assert_eq!(hand_label(row, col), Ok(expected.to_string()));
        }

        assert!(matches!(hand_label(13, 0), Err(RangeError::OutOfRange(_))));
        assert!(matches!(hand_label(0, 13), Err(RangeError::OutOfRange(_))));
    }

    #[test]
    fn test_hand_from_str() {
        let tests = [
            ("AA", (0, 0)),
            ("aa", (0, 0)),
            ("AKs", (0, 1)),
            ("AKo", (1, 0)),
            ("kqS", (1, 2)),
            (" 72o ", (12, 7)),
        ];

        for (s, (row, col)) in tests {
            let hand = s.parse::<Hand>().unwrap();
            assert_eq!((hand.row(), hand.col()), (row, col), "{s}");
        }

        let error_tests = ["", "A", "AK", "KAs", "AAs", "AAo", "AKx", "1Ks", "AKss", "AsKs"];

        for s in error_tests {
            assert!(s.parse::<Hand>().is_err(), "{s}");
        }
    }

    #[test]
    fn test_all_hands() {
        let hands = Hand::all().collect::<Vec<_>>();
        assert_eq!(hands.len(), NUM_HANDS);
        assert_eq!(hands[0].to_string(), "AA");
        assert_eq!(hands[1].to_string(), "AKs");
        assert_eq!(hands[NUM_RANKS].to_string(), "AKo");
        assert_eq!(hands[NUM_HANDS - 1].to_string(), "22");

        let combos = hands.iter().map(Hand::num_combos).sum::<usize>();
        assert_eq!(combos, 52 * 51 / 2);

        for hand in hands {
            assert_eq!(hand.to_string().parse::<Hand>(), Ok(hand));
        }
    }
}
