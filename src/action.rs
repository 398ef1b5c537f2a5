use crate::error::*;
use crate::position::*;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

/// Action value of a fold.
pub const FOLD_VALUE: f64 = 0.0;

/// Size of the big blind; the amount to call when nobody has raised.
pub const BIG_BLIND: f64 = 1.0;

static RAISE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<amount>(?:\d+(?:\.\d*)?)|(?:\.\d+))\s*(?i:bb)?$").unwrap()
});

/// Kind of a preflop action.
///
/// The kind is never stored: it is derived from the action value and the amount to call at that
/// seat (see [`ActionSequence::classify`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Fold,
    Call,
    Raise,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionKind::Fold => "Fold",
            ActionKind::Call => "Call",
            ActionKind::Raise => "Raise",
        })
    }
}

/// Actions taken by the seats acting before the hero, in big blinds.
///
/// Each value is `0` for a fold, the amount to call for a call (`1` when nobody has raised), or
/// the total raise-to amount for a raise. Editing methods never mutate in place; they return the
/// updated sequence so that a rejected edit leaves the original untouched.
///
/// # Examples
/// ```
/// use preflop_range::*;
///
/// let seq = ActionSequence::new(Position::Btn);
/// let seq = seq.set_action(0, ActionKind::Raise, Some(3.0)).unwrap();
/// let seq = seq.set_action(1, ActionKind::Raise, Some(7.0)).unwrap();
///
/// assert_eq!(seq.values(), &[3.0, 7.0, 0.0]);
/// assert_eq!(seq.last_bet_amount(2), 7.0);
/// assert_eq!(seq.min_raise(2), 14.0);
///
/// // changing an earlier seat resets every later seat to fold
/// let seq = seq.set_action(0, ActionKind::Fold, None).unwrap();
/// assert_eq!(seq.values(), &[0.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
pub struct ActionSequence {
    values: Vec<f64>,
}

/// Derived editing context of one seat in an [`ActionSequence`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeatContext {
    /// Seat this context describes.
    pub position: Position,

    /// Stored action value.
    pub value: f64,

    /// Action value of the preceding seat (`None` for the first seat).
    pub previous: Option<f64>,

    /// Derived action kind.
    pub kind: ActionKind,

    /// Amount a call commits at this seat.
    pub call_amount: f64,

    /// Smallest legal raise-to amount at this seat.
    pub min_raise: f64,
}

/// Formats an amount in big blinds without a trailing `.0`.
///
/// # Examples
/// ```
/// use preflop_range::format_bb;
///
/// assert_eq!(format_bb(3.0), "3");
/// assert_eq!(format_bb(2.5), "2.5");
/// ```
#[inline]
pub fn format_bb(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        amount.to_string()
    }
}

/// Attempts to parse a raise-to amount typed by the user.
///
/// Accepts a non-negative decimal number with an optional `bb` suffix (e.g., `"3"`, `"2.5"`,
/// `"7bb"`, `".5"`). Whether the amount is large enough is checked separately.
pub fn parse_raise_amount(s: &str) -> RangeResult<f64> {
    let err = || RangeError::IllegalRaise(format!("Invalid raise amount: {s}"));
    let caps = RAISE_REGEX.captures(s.trim()).ok_or_else(err)?;
    caps["amount"].parse::<f64>().map_err(|_| err())
}

#[inline]
fn check_value(value: f64) -> RangeResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RangeError::Validation(format!(
            "Action value must be a non-negative number: {value}"
        )))
    }
}

impl ActionSequence {
    /// Creates an all-fold sequence for the seats acting before `position`.
    #[inline]
    pub fn new(position: Position) -> Self {
        Self::folds(position.num_prior_seats())
    }

    #[inline]
    fn folds(len: usize) -> Self {
        Self {
            values: vec![FOLD_VALUE; len],
        }
    }

    /// Attempts to create a sequence from raw action values.
    ///
    /// Every value must be non-negative and every non-fold value must be either a call of the
    /// current bet or a legal raise.
    pub fn from_values(values: Vec<f64>) -> RangeResult<Self> {
        let ret = Self { values };
        ret.validate()?;
        Ok(ret)
    }

    /// Obtains the raw action values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an all-fold sequence for `position`.
    ///
    /// Nothing is preserved across a position change, even if the new position has more seats.
    #[inline]
    pub fn resize(&self, position: Position) -> Self {
        Self::new(position)
    }

    /// Returns `self` if its length matches `position`, otherwise an all-fold sequence of the
    /// correct length.
    #[inline]
    pub fn ensure_length(self, position: Position) -> Self {
        if self.len() == position.num_prior_seats() {
            self
        } else {
            log::debug!(
                "sequence length {} does not match {position}; resetting",
                self.len()
            );
            Self::new(position)
        }
    }

    /// Returns the amount to call at seat `index`: the most recent raise before it, or the big
    /// blind if nobody has raised.
    #[inline]
    pub fn last_bet_amount(&self, index: usize) -> f64 {
        self.values
            .iter()
            .take(index)
            .rev()
            .copied()
            .find(|&v| v > BIG_BLIND)
            .unwrap_or(BIG_BLIND)
    }

    /// Returns the smallest legal raise-to amount at seat `index`.
    #[inline]
    pub fn min_raise(&self, index: usize) -> f64 {
        self.last_bet_amount(index) * 2.0
    }

    /// Derives the action kind of seat `index` from its stored value.
    pub fn classify(&self, index: usize) -> RangeResult<ActionKind> {
        let value = self.value(index)?;
        Ok(self.kind_of(index, value))
    }

    /// Sets the action of seat `index` and resets every later seat to fold.
    ///
    /// - `Fold` stores `0`.
    /// - `Call` stores the amount to call.
    /// - `Raise` stores `amount` if given, otherwise the minimum raise. An amount below the minimum
    ///   raise is rejected and `self` is left untouched.
    pub fn set_action(
        &self,
        index: usize,
        kind: ActionKind,
        amount: Option<f64>,
    ) -> RangeResult<Self> {
        self.value(index)?;

        let value = match kind {
            ActionKind::Fold => FOLD_VALUE,
            ActionKind::Call => self.last_bet_amount(index),
            ActionKind::Raise => {
                let min_raise = self.min_raise(index);
                match amount {
                    None => min_raise,
                    Some(amount) if amount.is_finite() && amount >= min_raise => amount,
                    Some(amount) => {
                        log::warn!(
                            "rejected raise to {amount} at seat {index} (min {})",
                            format_bb(min_raise)
                        );
                        return Err(RangeError::IllegalRaise(format!(
                            "Raise must be at least {}BB: {amount}",
                            format_bb(min_raise)
                        )));
                    }
                }
            }
        };

        let mut ret = self.clone();
        ret.values[index] = value;
        if index + 1 < ret.len() {
            log::debug!("seat {index} changed; resetting seats {}..{}", index + 1, ret.len());
            ret.values[index + 1..].fill(FOLD_VALUE);
        }
        Ok(ret)
    }

    /// Parses a typed raise-to amount and applies it to seat `index`.
    #[inline]
    pub fn set_raise_from_str(&self, index: usize, s: &str) -> RangeResult<Self> {
        let amount = parse_raise_amount(s)?;
        self.set_action(index, ActionKind::Raise, Some(amount))
    }

    /// Returns the editing context of every seat in order.
    pub fn seat_contexts(&self) -> Vec<SeatContext> {
        Position::ALL
            .into_iter()
            .zip(self.values.iter().copied())
            .enumerate()
            .map(|(index, (position, value))| SeatContext {
                position,
                value,
                previous: index.checked_sub(1).map(|i| self.values[i]),
                kind: self.kind_of(index, value),
                call_amount: self.last_bet_amount(index),
                min_raise: self.min_raise(index),
            })
            .collect()
    }

    /// Checks that every value is a fold, a call of the current bet, or a legal raise.
    pub fn validate(&self) -> RangeResult<()> {
        if self.len() >= NUM_POSITIONS {
            return Err(RangeError::Validation(format!(
                "Too many previous actions: {}",
                self.len()
            )));
        }

        for (index, &value) in self.values.iter().enumerate() {
            check_value(value)?;
            let call_amount = self.last_bet_amount(index);
            if value != FOLD_VALUE && value != call_amount && value < call_amount * 2.0 {
                return Err(RangeError::Validation(format!(
                    "Seat {index} must fold, call {}BB, or raise to at least {}BB: {value}",
                    format_bb(call_amount),
                    format_bb(call_amount * 2.0)
                )));
            }
        }

        Ok(())
    }

    #[inline]
    fn value(&self, index: usize) -> RangeResult<f64> {
        self.values.get(index).copied().ok_or_else(|| {
            RangeError::OutOfRange(format!(
                "Seat index must be less than {}: {index}",
                self.len()
            ))
        })
    }

    #[inline]
    fn kind_of(&self, index: usize, value: f64) -> ActionKind {
        if value == FOLD_VALUE {
            ActionKind::Fold
        } else if value == self.last_bet_amount(index) {
            ActionKind::Call
        } else {
            ActionKind::Raise
        }
    }
}

impl SeatContext {
    /// Describes what the preceding seat did, as shown above the seat's controls.
    pub fn previous_description(&self) -> Option<String> {
        self.previous.map(|value| {
            if value > BIG_BLIND {
                format!("Previous player raised to {}BB", format_bb(value))
            } else if value == BIG_BLIND {
                "Previous player called the blind".to_string()
            } else {
                "Previous player folded".to_string()
            }
        })
    }

    /// Describes the seat's current action.
    pub fn description(&self) -> String {
        match self.kind {
            ActionKind::Fold => "Fold".to_string(),
            ActionKind::Call => format!("Call {}BB", format_bb(self.call_amount)),
            ActionKind::Raise => format!("Raise to {}BB", format_bb(self.value)),
        }
    }
}
