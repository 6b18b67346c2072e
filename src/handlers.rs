//! Per-tag structural builders.
//!
//! Every handler follows the same contract: it mutates the document model,
//! never recurses, and returns the context its children should attach to.
//! Handlers that need a specific context kind fail with a `CONTEXT_KIND`
//! contract violation; handlers modeled on lenient reference behavior
//! (`tr`, `th`, `td` outside a table) pass the context through instead.

use docflow_model::{
    Alignment, CellRef, ContainerRef, HyperlinkKind, HyperlinkRef, ParagraphRef, RowRef, RunRef,
    TextFormat, Unit,
};
use quick_xml::escape::unescape;

use crate::convert::{Context, Conversion, Registry};
use crate::dom::{NodeId, TEXT_TAG};
use crate::error::ConvertError;
use crate::style::{parse_length_attr, parse_quad_attr, resolve_length};

const TABLE_BORDER_WIDTH_CM: f64 = 0.075;
const TABLE_PADDING_DEFAULT_CM: f64 = 0.1;
const HEADER_COLUMN_WIDTH_CM: f64 = 5.0;
const REPORT_MARGIN_DEFAULT_CM: f64 = 0.1;

pub(crate) fn register_defaults(registry: &mut Registry) {
    for tag in ["h1", "h2", "h3", "h4", "h5", "h6"] {
        registry.set(tag, heading);
    }
    registry.set("p", paragraph);
    registry.set("strong", bold);
    registry.set("i", italic);
    registry.set("em", italic);
    registry.set("u", underline);
    registry.set("a", hyperlink);
    registry.set("hr", horizontal_rule);
    registry.set("br", line_break);
    registry.set("table", table);
    registry.set("thead", table_header_group);
    registry.set("tr", table_row);
    registry.set("tbody", table_body_group);
    registry.set("th", table_header_cell);
    registry.set("td", table_data_cell);
    registry.set("li", list_item);
    registry.set(TEXT_TAG, text);
}

fn context_kind(tag: &str, expected: &str, found: Context) -> ConvertError {
    ConvertError::new(
        "CONTEXT_KIND",
        format!("<{tag}> requires a {expected} context, found {}", found.kind()),
    )
    .with_tag(tag)
}

fn model_ref(tag: &str, what: &str) -> ConvertError {
    ConvertError::new(
        "MODEL_REF",
        format!("document model lost track of the current {what}"),
    )
    .with_tag(tag)
}

fn require_container(tag: &str, context: Context) -> Result<ContainerRef, ConvertError> {
    context
        .as_container()
        .ok_or_else(|| context_kind(tag, "block container", context))
}

/// The idempotent paragraph helper: a paragraph context is returned
/// unchanged; a block container yields a fresh paragraph; anything else is
/// a contract violation.
pub fn get_or_create_paragraph(
    conversion: &mut Conversion<'_>,
    tag: &str,
    context: Context,
) -> Result<ParagraphRef, ConvertError> {
    if let Context::Paragraph(paragraph) = context {
        return Ok(paragraph);
    }
    let container = context
        .as_container()
        .ok_or_else(|| context_kind(tag, "paragraph or block container", context))?;
    conversion
        .doc
        .add_paragraph(container)
        .ok_or_else(|| model_ref(tag, "container"))
}

/// Heading levels 1–6: a new paragraph styled `Heading{level}`.
pub fn heading(
    conversion: &mut Conversion<'_>,
    node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    let tree = conversion.tree;
    let tag = tree.name(node);
    let container = require_container(tag, context)?;
    let paragraph = conversion
        .doc
        .add_paragraph(container)
        .ok_or_else(|| model_ref(tag, "container"))?;
    let style = format!("Heading{}", &tag[1..]);
    conversion
        .doc
        .paragraph_mut(paragraph)
        .ok_or_else(|| model_ref(tag, "paragraph"))?
        .set_style(&style);
    Ok(Context::Paragraph(paragraph))
}

/// `<p>`: a new empty paragraph.
pub fn paragraph(
    conversion: &mut Conversion<'_>,
    _node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    let container = require_container("p", context)?;
    let paragraph = conversion
        .doc
        .add_paragraph(container)
        .ok_or_else(|| model_ref("p", "container"))?;
    Ok(Context::Paragraph(paragraph))
}

/// `<strong>`.
pub fn bold(
    conversion: &mut Conversion<'_>,
    node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    formatted_text(conversion, node, context, TextFormat::Bold)
}

/// `<i>` / `<em>`.
pub fn italic(
    conversion: &mut Conversion<'_>,
    node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    formatted_text(conversion, node, context, TextFormat::Italic)
}

/// `<u>`.
pub fn underline(
    conversion: &mut Conversion<'_>,
    node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    formatted_text(conversion, node, context, TextFormat::Underline)
}

fn formatted_text(
    conversion: &mut Conversion<'_>,
    node: NodeId,
    context: Context,
    format: TextFormat,
) -> Result<Context, ConvertError> {
    let tag = conversion.tree.name(node);
    // Nested inline markers fold into the existing run in place.
    if let Context::Run(run) = context {
        conversion
            .doc
            .run_mut(run)
            .ok_or_else(|| model_ref(tag, "run"))?
            .apply(format);
        return Ok(context);
    }
    let paragraph = get_or_create_paragraph(conversion, tag, context)?;
    let inline = conversion
        .doc
        .paragraph_mut(paragraph)
        .ok_or_else(|| model_ref(tag, "paragraph"))?
        .add_run(format);
    Ok(Context::Run(RunRef { paragraph, inline }))
}

/// `<a>`: a web hyperlink reading `href`, empty when absent.
pub fn hyperlink(
    conversion: &mut Conversion<'_>,
    node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    let tree = conversion.tree;
    let target = tree.attr(node, "href").unwrap_or("");
    let paragraph = get_or_create_paragraph(conversion, "a", context)?;
    let inline = conversion
        .doc
        .paragraph_mut(paragraph)
        .ok_or_else(|| model_ref("a", "paragraph"))?
        .add_hyperlink(target, HyperlinkKind::Web);
    Ok(Context::Hyperlink(HyperlinkRef { paragraph, inline }))
}

/// `<hr>`: a paragraph tagged with the rule style.
pub fn horizontal_rule(
    conversion: &mut Conversion<'_>,
    _node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    let paragraph = get_or_create_paragraph(conversion, "hr", context)?;
    conversion
        .doc
        .paragraph_mut(paragraph)
        .ok_or_else(|| model_ref("hr", "paragraph"))?
        .set_style("HorizontalRule");
    Ok(Context::Paragraph(paragraph))
}

/// `<br>`: a break inside the current run, or inside a paragraph.
pub fn line_break(
    conversion: &mut Conversion<'_>,
    _node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    if let Context::Run(run) = context {
        conversion
            .doc
            .run_mut(run)
            .ok_or_else(|| model_ref("br", "run"))?
            .add_line_break();
        return Ok(context);
    }
    let paragraph = get_or_create_paragraph(conversion, "br", context)?;
    conversion
        .doc
        .paragraph_mut(paragraph)
        .ok_or_else(|| model_ref("br", "paragraph"))?
        .add_line_break();
    Ok(Context::Paragraph(paragraph))
}

/// `<table>`: a bordered table with per-side padding from `data-padding`
/// or the fixed default.
pub fn table(
    conversion: &mut Conversion<'_>,
    node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    let tree = conversion.tree;
    let container = require_container("table", context)?;
    conversion.assembly.reset();
    let padding = match tree.attr(node, "data-padding") {
        Some(raw) => parse_quad_attr("data-padding", raw)?,
        None => [Unit::from_centimeter(TABLE_PADDING_DEFAULT_CM); 4],
    };
    let id = conversion
        .doc
        .add_table(container)
        .ok_or_else(|| model_ref("table", "container"))?;
    let table = conversion
        .doc
        .table_mut(id)
        .ok_or_else(|| model_ref("table", "table"))?;
    table.border_width = Unit::from_centimeter(TABLE_BORDER_WIDTH_CM);
    table.padding = padding;
    Ok(Context::Table(id))
}

/// `<thead>`: emits one centered column per descendant header cell before
/// any row exists, then returns the table unchanged.
pub fn table_header_group(
    conversion: &mut Conversion<'_>,
    node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    let Context::Table(id) = context else {
        return Err(context_kind("thead", "table", context));
    };
    let tree = conversion.tree;
    for &row in tree.children(node) {
        if tree.name(row) != "tr" {
            continue;
        }
        for &cell in tree.children(row) {
            if tree.name(cell) != "th" {
                continue;
            }
            let width = match tree.attr(cell, "data-width") {
                Some(raw) => parse_length_attr("data-width", raw)?,
                None => Unit::from_centimeter(HEADER_COLUMN_WIDTH_CM),
            };
            let table = conversion
                .doc
                .table_mut(id)
                .ok_or_else(|| model_ref("thead", "table"))?;
            let index = table.add_column(width);
            if let Some(column) = table.column_mut(index) {
                column.alignment = Some(Alignment::Center);
            }
        }
    }
    Ok(context)
}

/// `<tr>`: a new row with a fresh body-cell index, except under a header
/// group where the columns already exist.
pub fn table_row(
    conversion: &mut Conversion<'_>,
    node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    let Context::Table(id) = context else {
        return Ok(context);
    };
    let tree = conversion.tree;
    if tree
        .parent(node)
        .is_some_and(|parent| tree.name(parent) == "thead")
    {
        return Ok(context);
    }
    let table = conversion
        .doc
        .table_mut(id)
        .ok_or_else(|| model_ref("tr", "table"))?;
    let row = table.add_row();
    conversion.assembly.cell_index = None;
    Ok(Context::Row(RowRef { table: id, row }))
}

/// `<tbody>`: transparent.
pub fn table_body_group(
    _conversion: &mut Conversion<'_>,
    _node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    Ok(context)
}

/// `<th>`: the next header cell in order, on a heading row created on
/// first use.
pub fn table_header_cell(
    conversion: &mut Conversion<'_>,
    _node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    let Context::Table(id) = context else {
        return Ok(context);
    };
    let index = match conversion.assembly.header_index {
        None => 0,
        Some(previous) => previous + 1,
    };
    conversion.assembly.header_index = Some(index);
    let table = conversion
        .doc
        .table_mut(id)
        .ok_or_else(|| model_ref("th", "table"))?;
    let row = match table.last_row_index() {
        Some(row) => row,
        None => table.add_row(),
    };
    conversion
        .doc
        .row_mut(RowRef { table: id, row })
        .ok_or_else(|| model_ref("th", "row"))?
        .heading = true;
    let cell = CellRef {
        table: id,
        row,
        cell: index,
    };
    if conversion.doc.cell(cell).is_none() {
        return Err(ConvertError::new(
            "MODEL_REF",
            format!("header cell {index} has no matching column"),
        )
        .with_tag("th"));
    }
    Ok(Context::Cell(cell))
}

/// `<td>`: the next body cell of the current row in order.
pub fn table_data_cell(
    conversion: &mut Conversion<'_>,
    _node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    let Context::Row(row) = context else {
        return Ok(context);
    };
    let index = match conversion.assembly.cell_index {
        None => 0,
        Some(previous) => previous + 1,
    };
    conversion.assembly.cell_index = Some(index);
    let cell = CellRef {
        table: row.table,
        row: row.row,
        cell: index,
    };
    if conversion.doc.cell(cell).is_none() {
        return Err(ConvertError::new(
            "MODEL_REF",
            format!("data cell {index} has no matching column"),
        )
        .with_tag("td"));
    }
    Ok(Context::Cell(cell))
}

/// `<li>`: the list continuation protocol — a `ListStart` boundary before
/// the first item, continuation disabled on the first item only, and a
/// `ListEnd` boundary after the last.
pub fn list_item(
    conversion: &mut Conversion<'_>,
    node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    let tree = conversion.tree;
    let container = require_container("li", context)?;
    let unordered = tree
        .parent(node)
        .is_some_and(|parent| tree.name(parent) == "ul");
    let style = if unordered {
        "UnorderedList"
    } else {
        "OrderedList"
    };
    let first = tree.is_first_of(node, "li");
    let last = tree.is_last_of(node, "li");

    if first {
        let boundary = conversion
            .doc
            .add_paragraph(container)
            .ok_or_else(|| model_ref("li", "container"))?;
        conversion
            .doc
            .paragraph_mut(boundary)
            .ok_or_else(|| model_ref("li", "paragraph"))?
            .set_style("ListStart");
    }

    let item = conversion
        .doc
        .add_paragraph(container)
        .ok_or_else(|| model_ref("li", "container"))?;
    let item_paragraph = conversion
        .doc
        .paragraph_mut(item)
        .ok_or_else(|| model_ref("li", "paragraph"))?;
    item_paragraph.set_style(style);
    item_paragraph.format.list.continue_previous = !first;

    if last {
        let boundary = conversion
            .doc
            .add_paragraph(container)
            .ok_or_else(|| model_ref("li", "container"))?;
        conversion
            .doc
            .paragraph_mut(boundary)
            .ok_or_else(|| model_ref("li", "paragraph"))?
            .set_style("ListEnd");
    }

    Ok(Context::Paragraph(item))
}

/// Raw text: strips line endings, skips whitespace-only payloads, decodes
/// text escapes, and appends by context kind.
pub fn text(
    conversion: &mut Conversion<'_>,
    node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    let tree = conversion.tree;
    let raw = tree.inner_text(node);
    let stripped: String = raw.chars().filter(|&c| c != '\r' && c != '\n').collect();
    if stripped.trim().is_empty() {
        return Ok(context);
    }
    let decoded = unescape(&stripped).map_err(|err| {
        ConvertError::new("MARKUP_PARSE", format!("cannot decode text escapes: {err}"))
            .with_tag(TEXT_TAG)
    })?;

    match context {
        Context::Run(run) => {
            conversion
                .doc
                .run_mut(run)
                .ok_or_else(|| model_ref(TEXT_TAG, "run"))?
                .add_text(&decoded);
            Ok(context)
        }
        Context::Hyperlink(link) => {
            conversion
                .doc
                .hyperlink_mut(link)
                .ok_or_else(|| model_ref(TEXT_TAG, "hyperlink"))?
                .add_text(&decoded);
            Ok(context)
        }
        Context::Cell(cell) => {
            let paragraph = conversion
                .doc
                .add_paragraph(ContainerRef::Cell(cell))
                .ok_or_else(|| model_ref(TEXT_TAG, "cell"))?;
            conversion
                .doc
                .paragraph_mut(paragraph)
                .ok_or_else(|| model_ref(TEXT_TAG, "paragraph"))?
                .add_text(&decoded);
            Ok(context)
        }
        Context::Column(column) => {
            // A column has no blocks of its own; the text lands in the
            // last row's cell at this column's index.
            let table = conversion
                .doc
                .table(column.table)
                .ok_or_else(|| model_ref(TEXT_TAG, "table"))?;
            let row = table
                .last_row_index()
                .ok_or_else(|| model_ref(TEXT_TAG, "row"))?;
            let cell = CellRef {
                table: column.table,
                row,
                cell: column.column,
            };
            let paragraph = conversion
                .doc
                .add_paragraph(ContainerRef::Cell(cell))
                .ok_or_else(|| model_ref(TEXT_TAG, "cell"))?;
            conversion
                .doc
                .paragraph_mut(paragraph)
                .ok_or_else(|| model_ref(TEXT_TAG, "paragraph"))?
                .add_text(&decoded);
            Ok(context)
        }
        Context::Row(_) => Ok(context),
        other => {
            let paragraph = get_or_create_paragraph(conversion, TEXT_TAG, other)?;
            conversion
                .doc
                .paragraph_mut(paragraph)
                .ok_or_else(|| model_ref(TEXT_TAG, "paragraph"))?
                .add_text(&decoded);
            Ok(Context::Paragraph(paragraph))
        }
    }
}

/// Report page margins for container-level nodes classed `report`.
///
/// Margins come from `data-margin` (top/right/bottom/left) when present;
/// otherwise each side resolves independently through the stylesheet
/// (`margin-top`, `margin-right`, `margin-bottom`, `margin-left`) with a
/// fixed per-side default. Register through
/// [`MarkupConverter::with_report_margins`](crate::MarkupConverter::with_report_margins)
/// for the wrapper tag the source documents use.
pub fn report_section(
    conversion: &mut Conversion<'_>,
    node: NodeId,
    context: Context,
) -> Result<Context, ConvertError> {
    let Context::Section(id) = context else {
        return Ok(context);
    };
    let tree = conversion.tree;
    if tree.attr(node, "class") != Some("report") {
        return Ok(context);
    }
    let margins = match tree.attr(node, "data-margin") {
        Some(raw) => parse_quad_attr("data-margin", raw)?,
        None => {
            let default = Unit::from_centimeter(REPORT_MARGIN_DEFAULT_CM);
            [
                resolve_length(tree, node, conversion.sheet, "margin-top", default)?,
                resolve_length(tree, node, conversion.sheet, "margin-right", default)?,
                resolve_length(tree, node, conversion.sheet, "margin-bottom", default)?,
                resolve_length(tree, node, conversion.sheet, "margin-left", default)?,
            ]
        }
    };
    let section = conversion
        .doc
        .section_mut(id)
        .ok_or_else(|| model_ref("section", "section"))?;
    section.page_setup.top_margin = margins[0];
    section.page_setup.right_margin = margins[1];
    section.page_setup.bottom_margin = margins[2];
    section.page_setup.left_margin = margins[3];
    Ok(context)
}
