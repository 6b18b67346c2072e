//! Address values for document elements.
//!
//! All refs are small `Copy` values. Containers are append-only while a
//! document is being built, so an address taken once stays valid for the
//! lifetime of the document.

/// Address of a section in a document.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SectionId(pub(crate) usize);

/// Address of a table in the document table arena.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TableId(pub(crate) usize);

/// Address of a cell: table, row index, cell index.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CellRef {
    /// Owning table.
    pub table: TableId,
    /// Row index within the table.
    pub row: usize,
    /// Cell index within the row.
    pub cell: usize,
}

/// Address of a row within a table.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RowRef {
    /// Owning table.
    pub table: TableId,
    /// Row index within the table.
    pub row: usize,
}

/// Address of a column within a table.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ColumnRef {
    /// Owning table.
    pub table: TableId,
    /// Column index within the table.
    pub column: usize,
}

/// A region that holds an ordered sequence of blocks.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ContainerRef {
    /// A document section.
    Section(SectionId),
    /// A table cell.
    Cell(CellRef),
}

/// Address of a paragraph block inside a container.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ParagraphRef {
    /// Container the paragraph lives in.
    pub container: ContainerRef,
    /// Block index within the container.
    pub block: usize,
}

/// Address of a formatted run inline within a paragraph.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RunRef {
    /// Owning paragraph.
    pub paragraph: ParagraphRef,
    /// Inline index within the paragraph.
    pub inline: usize,
}

/// Address of a hyperlink inline within a paragraph.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct HyperlinkRef {
    /// Owning paragraph.
    pub paragraph: ParagraphRef,
    /// Inline index within the paragraph.
    pub inline: usize,
}
