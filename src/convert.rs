//! The conversion driver: handler registry, tree walker, and entry points.
//!
//! The walker owns all recursion. It dispatches each node to the handler
//! registered for its tag and threads the handler's returned context down
//! into that node's children only; siblings always see the caller's
//! context. Unrecognized tags pass the incoming context through unchanged
//! and still recurse, so unmapped wrapper elements are transparent.

use std::collections::BTreeMap;

use docflow_model::{
    Alignment, CellRef, ColumnRef, ContainerRef, Document, HyperlinkRef, ParagraphRef, RowRef,
    RunRef, SectionId, TableId, Unit,
};

use crate::css::Stylesheet;
use crate::dom::{NodeId, NodeTree};
use crate::error::ConvertError;
use crate::handlers;

/// Where the next produced document element attaches.
///
/// Each call frame owns its local value; the document elements behind the
/// addresses are owned by the document's own container hierarchy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Context {
    /// A document section.
    Section(SectionId),
    /// A paragraph block.
    Paragraph(ParagraphRef),
    /// A formatted inline run.
    Run(RunRef),
    /// A hyperlink region.
    Hyperlink(HyperlinkRef),
    /// A table cursor.
    Table(TableId),
    /// A row cursor.
    Row(RowRef),
    /// A table cell.
    Cell(CellRef),
    /// A table column.
    Column(ColumnRef),
}

impl Context {
    /// Kind name used in contract-violation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Context::Section(_) => "section",
            Context::Paragraph(_) => "paragraph",
            Context::Run(_) => "run",
            Context::Hyperlink(_) => "hyperlink",
            Context::Table(_) => "table",
            Context::Row(_) => "row",
            Context::Cell(_) => "cell",
            Context::Column(_) => "column",
        }
    }

    /// The block container behind this context, when it is one.
    pub fn as_container(&self) -> Option<ContainerRef> {
        match self {
            Context::Section(id) => Some(ContainerRef::Section(*id)),
            Context::Cell(cell) => Some(ContainerRef::Cell(*cell)),
            _ => None,
        }
    }
}

/// Per-table assembly counters, reset at every table boundary; the cell
/// counter resets again at every row.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct TableAssembly {
    /// Last header-cell index handed out.
    pub header_index: Option<usize>,
    /// Last body-cell index handed out.
    pub cell_index: Option<usize>,
}

impl TableAssembly {
    pub(crate) fn reset(&mut self) {
        *self = TableAssembly::default();
    }
}

/// Mutable state threaded through one conversion run.
///
/// Created fresh inside [`MarkupConverter::convert`]; nothing in it
/// survives the run, so a converter is freely reusable.
pub struct Conversion<'a> {
    /// Document being built into.
    pub doc: &'a mut Document,
    /// Stylesheet consulted by style-resolving handlers.
    pub sheet: &'a Stylesheet,
    /// Source tree being walked.
    pub tree: &'a NodeTree,
    pub(crate) assembly: TableAssembly,
}

/// A per-tag conversion function: `(node, context) -> new context`, with
/// the stylesheet and document reached through the conversion state.
pub type Handler = fn(&mut Conversion<'_>, NodeId, Context) -> Result<Context, ConvertError>;

/// Tag-keyed handler table.
#[derive(Clone)]
pub struct Registry {
    handlers: BTreeMap<Box<str>, Handler>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// A registry holding the default handler per supported tag.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        handlers::register_defaults(&mut registry);
        registry
    }

    /// Register or replace the handler for `tag`.
    pub fn set(&mut self, tag: &str, handler: Handler) {
        self.handlers.insert(tag.into(), handler);
    }

    /// Handler for `tag`, when one is registered.
    pub fn lookup(&self, tag: &str) -> Option<Handler> {
        self.handlers.get(tag).copied()
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Footer page numbering shape.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FooterNumbering {
    /// Page number only.
    #[default]
    PageOnly,
    /// "N of M" with the section total.
    PageOfTotal,
}

/// Conversion options.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConvertOptions {
    /// Footer page numbering shape.
    pub footer: FooterNumbering,
}

/// Content-to-section converter seam.
///
/// Implementations turn one content format into blocks on a section; the
/// markup converter below is the only implementation in this crate.
pub trait Convert {
    /// Convert `contents` into `section` of `doc`, resolving style classes
    /// against `sheet`.
    fn convert(
        &self,
        sheet: &Stylesheet,
        contents: &str,
        doc: &mut Document,
        section: SectionId,
    ) -> Result<(), ConvertError>;
}

/// Markup-to-document converter.
pub struct MarkupConverter {
    registry: Registry,
    options: ConvertOptions,
}

impl MarkupConverter {
    /// Converter with the default tag handlers.
    pub fn new() -> Self {
        Self {
            registry: Registry::with_defaults(),
            options: ConvertOptions::default(),
        }
    }

    /// Converter with the default tag handlers and explicit options.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self {
            registry: Registry::with_defaults(),
            options,
        }
    }

    /// Also apply report page margins on `tag` elements classed `report`.
    pub fn with_report_margins(mut self, tag: &str) -> Self {
        self.registry.set(tag, handlers::report_section);
        self
    }

    /// Register or replace the handler for `tag`.
    pub fn set_handler(&mut self, tag: &str, handler: Handler) {
        self.registry.set(tag, handler);
    }

    /// The handler table.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Convert markup into `section`, appending blocks in document order
    /// and attaching the standard page-number footer.
    pub fn convert(
        &self,
        sheet: &Stylesheet,
        markup: &str,
        doc: &mut Document,
        section: SectionId,
    ) -> Result<(), ConvertError> {
        if markup.is_empty() {
            return Err(ConvertError::new("EMPTY_INPUT", "markup input is empty"));
        }
        let tree = NodeTree::parse(markup)?;

        let target = doc.section_mut(section).ok_or_else(|| {
            ConvertError::new("MISSING_SECTION", "target section does not exist")
        })?;
        target.page_setup.header_distance = Unit::from_centimeter(0.002);
        target.page_setup.footer_distance = Unit::from_centimeter(0.002);
        let footer = target.footer_paragraph_mut();
        footer.set_style("Footer");
        footer.format.alignment = Some(Alignment::Right);
        footer.add_page_field();
        if self.options.footer == FooterNumbering::PageOfTotal {
            footer.add_text(" of ");
            footer.add_section_pages_field();
        }

        let mut conversion = Conversion {
            doc,
            sheet,
            tree: &tree,
            assembly: TableAssembly::default(),
        };
        let roots = tree.roots();
        self.walk(&mut conversion, roots, Context::Section(section))
    }

    fn walk(
        &self,
        conversion: &mut Conversion<'_>,
        nodes: &[NodeId],
        context: Context,
    ) -> Result<(), ConvertError> {
        for &node in nodes {
            let tree = conversion.tree;
            let name = tree.name(node);
            match self.registry.lookup(name) {
                Some(handler) => {
                    let child_context = handler(conversion, node, context)?;
                    if tree.has_children(node) {
                        self.walk(conversion, tree.children(node), child_context)?;
                    }
                }
                None => {
                    log::trace!("no handler for <{name}>, passing context through");
                    if tree.has_children(node) {
                        self.walk(conversion, tree.children(node), context)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for MarkupConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Convert for MarkupConverter {
    fn convert(
        &self,
        sheet: &Stylesheet,
        contents: &str,
        doc: &mut Document,
        section: SectionId,
    ) -> Result<(), ConvertError> {
        MarkupConverter::convert(self, sheet, contents, doc, section)
    }
}

/// Convert `contents` into `section` with an explicit converter.
pub fn add_content(
    doc: &mut Document,
    section: SectionId,
    sheet: &Stylesheet,
    contents: &str,
    converter: &impl Convert,
) -> Result<(), ConvertError> {
    if contents.is_empty() {
        return Err(ConvertError::new("EMPTY_INPUT", "no content to convert"));
    }
    converter.convert(sheet, contents, doc, section)
}

/// Convert markup into `section` with a default [`MarkupConverter`].
pub fn add_markup(
    doc: &mut Document,
    section: SectionId,
    sheet: &Stylesheet,
    contents: &str,
) -> Result<(), ConvertError> {
    add_content(doc, section, sheet, contents, &MarkupConverter::new())
}
