//! Converts a tree of markup nodes into an ordered sequence of structured
//! document elements — paragraphs, tables, lists, hyperlinks, formatted
//! runs — on a [`docflow_model`] section, ready for downstream pagination
//! and rendering.
//!
//! The engine is a recursive tree walk driven by a per-tag handler
//! registry. Each handler receives the current node and structural context
//! and returns the context for that node's subtree; unrecognized tags pass
//! their context through unchanged, so unmapped wrappers are transparent.
//! Style classes resolve against a parsed stylesheet rule set, with
//! graceful defaults for anything absent and hard errors for matched but
//! malformed numeric values.
//!
//! ```
//! use docflow::{add_markup, parse_stylesheet};
//! use docflow_model::Document;
//!
//! let sheet = parse_stylesheet("").unwrap();
//! let mut doc = Document::with_default_styles();
//! let section = doc.add_section();
//! add_markup(
//!     &mut doc,
//!     section,
//!     &sheet,
//!     "<h1>Title</h1><p>Hello <strong>world</strong></p>",
//! )
//! .unwrap();
//! assert_eq!(doc.section(section).unwrap().blocks.len(), 2);
//! ```

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

mod convert;
mod css;
mod dom;
mod error;
pub mod handlers;
mod style;

pub use convert::{
    add_content, add_markup, Context, Convert, ConvertOptions, Conversion, FooterNumbering,
    Handler, MarkupConverter, Registry,
};
pub use css::{parse_stylesheet, Declaration, Expression, Rule, Selector, Stylesheet, Term};
pub use dom::{NodeId, NodeTree, TEXT_TAG};
pub use error::ConvertError;
pub use style::{parse_length_attr, parse_quad_attr, resolve_length};

pub use docflow_model as model;
