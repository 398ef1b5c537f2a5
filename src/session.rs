use crate::action::*;
use crate::chart::*;
use crate::document::*;
use crate::error::*;
use crate::hand::*;
use crate::position::*;
use crate::store::*;

/// Default stack size of a new range, in big blinds.
pub const DEFAULT_STACK_SIZE: u32 = 100;

/// State of one range-creation session.
///
/// All edits are applied synchronously. The only suspension point is [`EditSession::submit`], and
/// a failed submission leaves every field as it was.
///
/// # Examples
/// ```
/// use preflop_range::*;
///
/// let mut session = EditSession::new();
/// session.set_name("BTN vs CO open");
/// session.set_position(Position::Btn);
/// session.set_action(2, ActionKind::Raise).unwrap();
/// assert_eq!(session.prev_actions().values(), &[0.0, 0.0, 2.0]);
///
/// session.select_cell(0, 0).unwrap();
/// session.edit_cell(CellField::Call, 30).unwrap();
/// session.edit_cell(CellField::Raise, 50).unwrap();
/// session.apply_cell().unwrap();
/// assert_eq!(session.chart().get(0, 0).unwrap().fold, 20);
///
/// assert!(session.document().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    name: String,
    stack_size: u32,
    position: Position,
    prev_actions: ActionSequence,
    chart: RangeChart,
    editor: Option<CellEditor>,
    is_submitting: bool,
}

/// Pending edit of a single chart cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellEditor {
    hand: Hand,
    values: RangeCell,
}

impl CellEditor {
    #[inline]
    pub fn hand(&self) -> Hand {
        self.hand
    }

    /// Pending values; they may not sum to 100 until the user fixes them.
    #[inline]
    pub fn values(&self) -> RangeCell {
        self.values
    }
}

impl Default for EditSession {
    #[inline]
    fn default() -> Self {
        Self {
            name: String::new(),
            stack_size: DEFAULT_STACK_SIZE,
            position: Position::default(),
            prev_actions: ActionSequence::default(),
            chart: RangeChart::default(),
            editor: None,
            is_submitting: false,
        }
    }
}

impl EditSession {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn stack_size(&self) -> u32 {
        self.stack_size
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn prev_actions(&self) -> &ActionSequence {
        &self.prev_actions
    }

    #[inline]
    pub fn chart(&self) -> &RangeChart {
        &self.chart
    }

    /// Obtains the pending cell edit, if a cell is selected.
    #[inline]
    pub fn editor(&self) -> Option<&CellEditor> {
        self.editor.as_ref()
    }

    /// Returns whether a submission is in flight.
    #[inline]
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn set_stack_size(&mut self, stack_size: u32) {
        self.stack_size = stack_size;
    }

    /// Changes the hero's position; the previous actions are reset to all folds.
    pub fn set_position(&mut self, position: Position) {
        log::debug!("position {} -> {position}", self.position);
        self.position = position;
        self.prev_actions = self.prev_actions.resize(position);
    }

    /// Sets the action kind of seat `index`; a raise defaults to the minimum raise.
    pub fn set_action(&mut self, index: usize, kind: ActionKind) -> RangeResult<()> {
        self.prev_actions = self.prev_actions.set_action(index, kind, None)?;
        Ok(())
    }

    /// Sets a typed raise-to amount at seat `index`.
    ///
    /// Unparsable amounts and amounts below the minimum raise are rejected with
    /// [`RangeError::IllegalRaise`] and the previous action is kept.
    pub fn set_raise_amount(&mut self, index: usize, amount: &str) -> RangeResult<()> {
        self.prev_actions = self.prev_actions.set_raise_from_str(index, amount)?;
        Ok(())
    }

    /// Returns the editing context of every seat before the hero.
    #[inline]
    pub fn seats(&self) -> Vec<SeatContext> {
        self.prev_actions.seat_contexts()
    }

    /// Opens the cell editor on `(row, col)` with a copy of its current values.
    pub fn select_cell(&mut self, row: usize, col: usize) -> RangeResult<()> {
        let hand = Hand::new(row, col)?;
        self.editor = Some(CellEditor {
            hand,
            values: self.chart.cell(hand),
        });
        Ok(())
    }

    /// Changes one field of the pending cell and normalizes the pending values.
    pub fn edit_cell(&mut self, field: CellField, value: u8) -> RangeResult<RangeCell> {
        let editor = self.editor.as_mut().ok_or_else(no_cell_selected)?;
        editor.values = editor.values.edit(field, value);
        Ok(editor.values)
    }

    /// Commits the pending cell to the chart and closes the editor.
    ///
    /// Pending values that do not sum to 100 are rejected and the editor stays open.
    pub fn apply_cell(&mut self) -> RangeResult<()> {
        let editor = self.editor.ok_or_else(no_cell_selected)?;
        let hand = editor.hand;
        self.chart = self.chart.with_cell(hand.row(), hand.col(), editor.values)?;
        self.editor = None;
        Ok(())
    }

    /// Closes the editor without changing the chart.
    #[inline]
    pub fn cancel_cell(&mut self) {
        self.editor = None;
    }

    /// Assembles the document to submit, checking every invariant.
    pub fn document(&self) -> RangeResult<RangeDocument> {
        RangeDocument::assemble(
            self.name.clone(),
            self.position,
            self.stack_size,
            self.prev_actions.clone().ensure_length(self.position),
            self.chart.clone(),
        )
    }

    /// Validates the range and hands it to `store`, returning the identity the store assigned.
    ///
    /// Nothing is sent if validation fails. On any failure the session keeps its state so the
    /// user can retry.
    pub async fn submit<S>(&mut self, store: &S, token: &AuthToken) -> RangeResult<String>
    where
        S: RangeStore + ?Sized,
    {
        let document = self.document().map_err(|e| {
            log::warn!("submission blocked: {e}");
            e
        })?;

        self.is_submitting = true;
        let result = store.create(token, &document).await;
        self.is_submitting = false;

        match &result {
            Ok(id) => log::info!("saved range {:?} as {id}", document.name),
            Err(e) => log::warn!("failed to save range {:?}: {e}", document.name),
        }

        result
    }
}

#[inline]
fn no_cell_selected() -> RangeError {
    RangeError::Validation("No cell selected".to_string())
}

/// Lists the ranges visible to `token`.
pub async fn list_ranges<S>(store: &S, token: &AuthToken) -> RangeResult<Vec<RangeSummary>>
where
    S: RangeStore + ?Sized,
{
    let ranges = store.list(token).await?;
    log::debug!("listed {} ranges", ranges.len());
    Ok(ranges)
}

/// Fetches a range for display.
///
/// A missing document or one whose previous actions do not match its position is reported as
/// [`RangeError::NotFound`]; network failures pass through.
pub async fn load_range<S>(store: &S, token: &AuthToken, id: &str) -> RangeResult<StoredRange>
where
    S: RangeStore + ?Sized,
{
    let stored = store.fetch(token, id).await?;
    let expected = stored.document.position.num_prior_seats();
    if stored.document.prev_actions.len() != expected {
        log::warn!("range {id} has a malformed action sequence");
        return Err(RangeError::NotFound(id.to_string()));
    }
    Ok(stored)
}
