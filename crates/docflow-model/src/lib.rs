//! Document object model for `docflow`.
//!
//! A document is a sequence of sections; a section is an ordered sequence
//! of blocks (paragraphs and tables); tables hold columns, rows, and cells;
//! cells hold blocks again. The conversion engine builds into this model
//! through append operations that return small `Copy` address values, and
//! a downstream renderer paginates it. This crate does no layout.
//!
//! Tables live in a document-level arena and containers reference them by
//! id, which keeps every address type non-recursive and cheap to thread
//! through a tree walk.

#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod document;
mod paragraph;
mod refs;
mod style;
mod table;
mod unit;

pub use document::{Block, Document, PageSetup, Section};
pub use paragraph::{
    Alignment, Hyperlink, HyperlinkKind, Inline, ListInfo, Paragraph, ParagraphFormat, Run,
    RunContent, TextFormat,
};
pub use refs::{
    CellRef, ColumnRef, ContainerRef, HyperlinkRef, ParagraphRef, RowRef, RunRef, SectionId,
    TableId,
};
pub use style::{default_styles, Color, FontSpec, ListType, ParagraphSpec, Style, StyleMap};
pub use table::{Cell, Column, Row, Table};
pub use unit::Unit;
