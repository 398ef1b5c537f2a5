use crate::action::*;
use crate::chart::*;
use crate::error::*;
use crate::position::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

/// A named preflop range: the hero's position and stack, the actions before the hero, and the
/// strategy chart for that spot.
///
/// This is the unit exchanged with the range store. Its JSON form is
/// `{name, position, stack_size, prev_actions, action_chart}`.
///
/// # Examples
/// ```
/// use preflop_range::*;
///
/// let actions = ActionSequence::new(Position::Co)
///     .set_action(0, ActionKind::Raise, Some(2.5))
///     .unwrap();
///
/// let doc = RangeDocument::assemble("CO vs UTG open", Position::Co, 100, actions, RangeChart::new());
/// assert!(doc.is_ok());
///
/// let doc = RangeDocument::assemble("", Position::Utg, 100, ActionSequence::default(), RangeChart::new());
/// assert!(doc.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
pub struct RangeDocument {
    /// Display name. Must not be blank.
    pub name: String,

    /// Hero's position.
    pub position: Position,

    /// Effective stack in big blinds. Must be at least `1`.
    pub stack_size: u32,

    /// Actions of the seats before the hero; one entry per seat.
    pub prev_actions: ActionSequence,

    /// Strategy chart.
    pub action_chart: RangeChart,
}

/// A range document together with the identity assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRange {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(flatten)]
    pub document: RangeDocument,
}

/// Listing entry of a stored range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSummary {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,
}

impl RangeDocument {
    /// Attempts to assemble a document, checking every invariant.
    pub fn assemble(
        name: impl Into<String>,
        position: Position,
        stack_size: u32,
        prev_actions: ActionSequence,
        action_chart: RangeChart,
    ) -> RangeResult<Self> {
        let ret = Self {
            name: name.into(),
            position,
            stack_size,
            prev_actions,
            action_chart,
        };
        ret.validate()?;
        Ok(ret)
    }

    /// Checks that the document can be submitted.
    ///
    /// - `name` must not be blank.
    /// - `stack_size` must be at least `1`.
    /// - `prev_actions` must have exactly one legal action per seat before `position`.
    /// - Every chart cell must sum to 100.
    pub fn validate(&self) -> RangeResult<()> {
        if self.name.trim().is_empty() {
            return Err(RangeError::Validation("Name must not be empty".to_string()));
        }

        if self.stack_size < 1 {
            return Err(RangeError::Validation(format!(
                "Stack size must be at least 1BB: {}",
                self.stack_size
            )));
        }

        let expected = self.position.num_prior_seats();
        if self.prev_actions.len() != expected {
            return Err(RangeError::Validation(format!(
                "Expected {expected} previous actions for {}, got {}",
                self.position,
                self.prev_actions.len()
            )));
        }

        self.prev_actions.validate()?;
        self.action_chart.validate()
    }

    /// Returns a summary of the document under the given identity.
    #[inline]
    pub fn summary(&self, id: impl Into<String>) -> RangeSummary {
        RangeSummary {
            id: id.into(),
            name: self.name.clone(),
        }
    }
}
