use crate::action::ActionKind;
use crate::error::*;
use crate::hand::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

/// Strategy of a single hand: percentages of folding, calling, and raising.
///
/// A committed cell always satisfies `fold + call + raise == 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
pub struct RangeCell {
    pub call: u8,
    pub fold: u8,
    pub raise: u8,
}

/// Editable field of a [`RangeCell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellField {
    Call,
    Fold,
    Raise,
}

/// One segment of the proportional bar a cell is rendered as.
///
/// `start` and `end` are percentages of the bar width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSegment {
    pub kind: ActionKind,
    pub start: u16,
    pub end: u16,
}

/// A 13×13 preflop strategy chart.
///
/// Rows and columns follow the hand matrix (see [`Hand`]): `(0, 0)` is `AA`, cells above the
/// diagonal are suited hands, and cells below it are offsuit hands. On the wire the chart is an
/// array of 13 rows of 13 cells; any other shape fails to decode.
///
/// # Examples
/// ```
/// use preflop_range::*;
///
/// let chart = RangeChart::new();
/// let aa = RangeCell::default().edit(CellField::Call, 30).edit(CellField::Raise, 50);
/// assert_eq!(aa.fold, 20);
///
/// let chart = chart.with_cell(0, 0, aa).unwrap();
/// assert_eq!(chart.get(0, 0).unwrap(), aa);
/// assert!(chart.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<RangeCell>>", into = "Vec<Vec<RangeCell>>")]
#[cfg_attr(feature = "bincode", derive(Decode, Encode))]
pub struct RangeChart {
    cells: [[RangeCell; NUM_RANKS]; NUM_RANKS],
}

impl Default for RangeCell {
    /// Always fold.
    #[inline]
    fn default() -> Self {
        Self {
            call: 0,
            fold: 100,
            raise: 0,
        }
    }
}

impl RangeCell {
    /// Creates a cell from percentages in field order.
    #[inline]
    pub fn new(call: u8, fold: u8, raise: u8) -> Self {
        Self { call, fold, raise }
    }

    #[inline]
    pub fn get(&self, field: CellField) -> u8 {
        match field {
            CellField::Call => self.call,
            CellField::Fold => self.fold,
            CellField::Raise => self.raise,
        }
    }

    #[inline]
    pub fn total(&self) -> u16 {
        self.call as u16 + self.fold as u16 + self.raise as u16
    }

    /// Returns whether the percentages sum to exactly 100.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.total() == 100
    }

    /// Sets `field` to `value` (clamped to 100) and normalizes the result.
    #[inline]
    pub fn edit(self, field: CellField, value: u8) -> Self {
        let value = value.min(100);
        let mut ret = self;
        match field {
            CellField::Call => ret.call = value,
            CellField::Fold => ret.fold = value,
            CellField::Raise => ret.raise = value,
        }
        ret.normalize(field)
    }

    /// Restores the sum after `changed` was edited.
    ///
    /// If the sum is not 100, `fold` is recomputed as `max(0, 100 - call - raise)`. Only `fold` is
    /// ever adjusted, so a direct fold edit is overwritten unless the cell already sums to 100, and
    /// `call + raise` above 100 leaves the cell at `fold == 0` with a sum above 100. Such a cell is
    /// refused by [`RangeChart::with_cell`].
    pub fn normalize(self, changed: CellField) -> Self {
        if self.is_valid() {
            return self;
        }

        let active = self.call as u16 + self.raise as u16;
        let ret = Self {
            fold: 100u16.saturating_sub(active) as u8,
            ..self
        };

        if changed == CellField::Fold {
            log::debug!("fold edit to {} overwritten with {}", self.fold, ret.fold);
        }
        if !ret.is_valid() {
            log::warn!("call {} + raise {} exceeds 100", ret.call, ret.raise);
        }

        ret
    }

    /// Returns the rendered bar: call, then fold, then raise, always in that order.
    ///
    /// Bounds are clamped to 100, so a cell that does not sum to 100 still yields ordered
    /// segments within the bar.
    #[inline]
    pub fn segments(&self) -> [CellSegment; 3] {
        let call_end = (self.call as u16).min(100);
        let fold_end = (call_end + self.fold as u16).min(100);
        [
            CellSegment {
                kind: ActionKind::Call,
                start: 0,
                end: call_end,
            },
            CellSegment {
                kind: ActionKind::Fold,
                start: call_end,
                end: fold_end,
            },
            CellSegment {
                kind: ActionKind::Raise,
                start: fold_end,
                end: 100,
            },
        ]
    }

    #[inline]
    fn check(&self) -> RangeResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(RangeError::Validation(format!(
                "Cell must sum to 100: call {} + fold {} + raise {} = {}",
                self.call,
                self.fold,
                self.raise,
                self.total()
            )))
        }
    }
}

impl Default for RangeChart {
    #[inline]
    fn default() -> Self {
        Self {
            cells: [[RangeCell::default(); NUM_RANKS]; NUM_RANKS],
        }
    }
}

impl RangeChart {
    /// Creates a chart that folds every hand.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Obtains the cell at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> RangeResult<RangeCell> {
        check_index(row, "Row")?;
        check_index(col, "Column")?;
        Ok(self.cells[row][col])
    }

    /// Obtains the cell of `hand`.
    #[inline]
    pub fn cell(&self, hand: Hand) -> RangeCell {
        self.cells[hand.row()][hand.col()]
    }

    /// Returns a copy of the chart with the cell at `(row, col)` replaced.
    ///
    /// The cell is stored as given, without normalization; a cell that does not sum to 100 is
    /// rejected.
    pub fn with_cell(&self, row: usize, col: usize, cell: RangeCell) -> RangeResult<Self> {
        let hand = Hand::new(row, col)?;
        cell.check()?;

        let mut ret = self.clone();
        ret.cells[row][col] = cell;
        log::debug!(
            "set {hand}: call {}, fold {}, raise {}",
            cell.call,
            cell.fold,
            cell.raise
        );
        Ok(ret)
    }

    /// Obtains the rows of the chart.
    #[inline]
    pub fn rows(&self) -> &[[RangeCell; NUM_RANKS]; NUM_RANKS] {
        &self.cells
    }

    /// Returns an iterator over all hands and their cells in row-major order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Hand, RangeCell)> + '_ {
        Hand::all().map(move |hand| (hand, self.cell(hand)))
    }

    /// Returns whether every cell sums to 100.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.cells.iter().flatten().all(RangeCell::is_valid)
    }

    /// Checks every cell, reporting the first one that does not sum to 100.
    pub fn validate(&self) -> RangeResult<()> {
        for (hand, cell) in self.iter() {
            cell.check()
                .map_err(|e| RangeError::Validation(format!("{hand}: {e}")))?;
        }
        Ok(())
    }

    /// Returns the tooltip text of the cell at `(row, col)`.
    ///
    /// # Examples
    /// ```
    /// use preflop_range::RangeChart;
    ///
    /// let chart = RangeChart::new();
    /// assert_eq!(chart.cell_title(0, 1).unwrap(), "AKs: Call 0%, Fold 100%, Raise 0%");
    /// ```
    pub fn cell_title(&self, row: usize, col: usize) -> RangeResult<String> {
        let hand = Hand::new(row, col)?;
        let cell = self.cell(hand);
        Ok(format!(
            "{hand}: Call {}%, Fold {}%, Raise {}%",
            cell.call, cell.fold, cell.raise
        ))
    }
}

impl TryFrom<Vec<Vec<RangeCell>>> for RangeChart {
    type Error = RangeError;

    fn try_from(rows: Vec<Vec<RangeCell>>) -> Result<Self, Self::Error> {
        let shape_err = || {
            RangeError::Validation(format!(
                "Chart must have {NUM_RANKS} rows of {NUM_RANKS} cells"
            ))
        };

        if rows.len() != NUM_RANKS {
            return Err(shape_err());
        }

        let mut ret = Self::new();
        for (dst, src) in ret.cells.iter_mut().zip(rows) {
            *dst = src.try_into().map_err(|_| shape_err())?;
        }

        Ok(ret)
    }
}

impl From<RangeChart> for Vec<Vec<RangeCell>> {
    #[inline]
    fn from(chart: RangeChart) -> Self {
        chart.cells.iter().map(|row| row.to_vec()).collect()
    }
}
