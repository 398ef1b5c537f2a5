//! Preflop range charts and action-sequence editing for Texas hold'em.
//!
//! A range describes how the hero plays every starting hand from one spot: their position, their
//! stack, and what the players before them did. Each of the 169 hands holds a fold/call/raise split
//! in percent.
//!
//! # Examples
//! ```
//! use preflop_range::*;
//!
//! // the hero is on the button; UTG opens to 3BB and MP 3-bets to 7BB
//! let actions = ActionSequence::new(Position::Btn)
//!     .set_action(0, ActionKind::Raise, Some(3.0))
//!     .unwrap()
//!     .set_action(1, ActionKind::Raise, Some(7.0))
//!     .unwrap();
//!
//! assert_eq!(actions.last_bet_amount(2), 7.0);
//! assert_eq!(actions.min_raise(2), 14.0);
//!
//! // a raise below the minimum is rejected and the sequence is kept
//! assert!(actions.set_action(2, ActionKind::Raise, Some(10.0)).is_err());
//!
//! // AA: call 30%, raise 50%; fold is recomputed to 20%
//! let aa = RangeCell::default()
//!     .edit(CellField::Call, 30)
//!     .edit(CellField::Raise, 50);
//! let chart = RangeChart::new().with_cell(0, 0, aa).unwrap();
//! assert_eq!(chart.cell_title(0, 0).unwrap(), "AA: Call 30%, Fold 20%, Raise 50%");
//!
//! let doc = RangeDocument::assemble("BTN vs 3bet", Position::Btn, 100, actions, chart).unwrap();
//! assert_eq!(doc.prev_actions.len(), 3);
//! ```
//!
//! # Crate features
//! - `client`: Provides [`HttpRangeStore`], a [`RangeStore`] over the REST API using [reqwest].
//!   Enabled by default.
//! - `bincode`: Uses [bincode] crate (2.0.0-rc.1) to save and load [`RangeDocument`] files.
//!   Disabled by default.
//!
//! [reqwest]: https://github.com/seanmonstar/reqwest
//! [bincode]: https://github.com/bincode-org/bincode

mod action;
mod chart;
mod config;
mod document;
mod error;
mod hand;
mod position;
mod session;
mod store;

#[cfg(feature = "client")]
mod client;

#[cfg(feature = "bincode")]
mod file;

pub use action::*;
pub use chart::*;
pub use config::*;
pub use document::*;
pub use error::*;
pub use hand::*;
pub use position::*;
pub use session::*;
pub use store::*;

#[cfg(feature = "client")]
pub use client::*;

#[cfg(feature = "bincode")]
pub use file::*;
