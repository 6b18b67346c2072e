//! Tables: columns, rows, and cells.
//!
//! Columns must be defined before rows are appended: `add_row` creates one
//! cell per existing column, so a row added to a column-less table has no
//! cells to address.

use crate::document::Block;
use crate::paragraph::Alignment;
use crate::unit::Unit;

/// A table column definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Column width.
    pub width: Unit,
    /// Optional alignment applied to content in this column.
    pub alignment: Option<Alignment>,
}

/// A table cell holding an ordered sequence of blocks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    /// Ordered blocks inside the cell.
    pub blocks: Vec<Block>,
}

/// A table row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    /// Cells, one per column defined at the time the row was added.
    pub cells: Vec<Cell>,
    /// Whether this row repeats as a heading on page breaks.
    pub heading: bool,
}

/// A table block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Ordered column definitions.
    pub columns: Vec<Column>,
    /// Ordered rows.
    pub rows: Vec<Row>,
    /// Uniform border width around cells.
    pub border_width: Unit,
    /// Cell padding, top/right/bottom/left.
    pub padding: [Unit; 4],
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column; returns its index.
    pub fn add_column(&mut self, width: Unit) -> usize {
        let index = self.columns.len();
        self.columns.push(Column {
            width,
            alignment: None,
        });
        index
    }

    /// Append a row with one cell per defined column; returns its index.
    pub fn add_row(&mut self) -> usize {
        let index = self.rows.len();
        self.rows.push(Row {
            cells: vec![Cell::default(); self.columns.len()],
            heading: false,
        });
        index
    }

    /// Index of the most recently added row.
    pub fn last_row_index(&self) -> Option<usize> {
        self.rows.len().checked_sub(1)
    }

    /// Column at `index`.
    pub fn column_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.columns.get_mut(index)
    }
}
