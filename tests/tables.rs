mod common;

use common::{blocks, paragraph, setup, table};
use docflow::add_markup;
use docflow_model::{Alignment, Unit};

const TABLE_MARKUP: &str = r#"
<table>
  <thead>
    <tr><th data-width="2">Item</th><th>Description</th></tr>
  </thead>
  <tbody>
    <tr><td>1</td><td>first</td></tr>
    <tr><td>2</td><td>second</td></tr>
  </tbody>
</table>
"#;

#[test]
fn header_cells_become_columns_in_order() {
    let (mut doc, section, sheet) = setup();
    add_markup(&mut doc, section, &sheet, TABLE_MARKUP).expect("conversion succeeds");

    let t = table(&doc, &blocks(&doc, section)[0]);
    assert_eq!(t.columns.len(), 2);
    assert_eq!(t.columns[0].width, Unit::from_centimeter(2.0));
    assert_eq!(t.columns[1].width, Unit::from_centimeter(5.0));
    assert!(t
        .columns
        .iter()
        .all(|column| column.alignment == Some(Alignment::Center)));
}

#[test]
fn every_row_holds_one_cell_per_column() {
    let (mut doc, section, sheet) = setup();
    add_markup(&mut doc, section, &sheet, TABLE_MARKUP).expect("conversion succeeds");

    let t = table(&doc, &blocks(&doc, section)[0]);
    assert_eq!(t.rows.len(), 3);
    assert!(t.rows.iter().all(|row| row.cells.len() == 2));
}

#[test]
fn header_row_is_marked_heading_and_filled_in_order() {
    let (mut doc, section, sheet) = setup();
    add_markup(&mut doc, section, &sheet, TABLE_MARKUP).expect("conversion succeeds");

    let t = table(&doc, &blocks(&doc, section)[0]);
    let header = &t.rows[0];
    assert!(header.heading);
    assert_eq!(paragraph(&header.cells[0].blocks[0]).plain_text(), "Item");
    assert_eq!(
        paragraph(&header.cells[1].blocks[0]).plain_text(),
        "Description"
    );
}

#[test]
fn body_cells_fill_left_to_right_per_row() {
    let (mut doc, section, sheet) = setup();
    add_markup(&mut doc, section, &sheet, TABLE_MARKUP).expect("conversion succeeds");

    let t = table(&doc, &blocks(&doc, section)[0]);
    for (row, expected) in t.rows[1..].iter().zip([["1", "first"], ["2", "second"]]) {
        assert!(!row.heading);
        for (cell, text) in row.cells.iter().zip(expected) {
            assert_eq!(paragraph(&cell.blocks[0]).plain_text(), text);
        }
    }
}

#[test]
fn border_and_default_padding_apply() {
    let (mut doc, section, sheet) = setup();
    add_markup(&mut doc, section, &sheet, "<table></table>").expect("conversion succeeds");

    let t = table(&doc, &blocks(&doc, section)[0]);
    assert_eq!(t.border_width, Unit::from_centimeter(0.075));
    assert_eq!(t.padding, [Unit::from_centimeter(0.1); 4]);
}

#[test]
fn data_padding_sets_all_four_sides() {
    let (mut doc, section, sheet) = setup();
    add_markup(
        &mut doc,
        section,
        &sheet,
        r#"<table data-padding="0.5 1 1.5 2"></table>"#,
    )
    .expect("conversion succeeds");

    let t = table(&doc, &blocks(&doc, section)[0]);
    assert_eq!(
        t.padding,
        [
            Unit::from_centimeter(0.5),
            Unit::from_centimeter(1.0),
            Unit::from_centimeter(1.5),
            Unit::from_centimeter(2.0),
        ]
    );
}

#[test]
fn malformed_data_padding_is_fatal() {
    let (mut doc, section, sheet) = setup();
    let err = add_markup(
        &mut doc,
        section,
        &sheet,
        r#"<table data-padding="1 2"></table>"#,
    )
    .expect_err("must fail");
    assert_eq!(err.code, "ATTR_NUMERIC");
    assert_eq!(err.attribute.as_deref(), Some("data-padding"));
}

#[test]
fn malformed_data_width_is_fatal() {
    let (mut doc, section, sheet) = setup();
    let err = add_markup(
        &mut doc,
        section,
        &sheet,
        r#"<table><thead><tr><th data-width="wide">A</th></tr></thead></table>"#,
    )
    .expect_err("must fail");
    assert_eq!(err.code, "ATTR_NUMERIC");
    assert_eq!(err.attribute.as_deref(), Some("data-width"));
}

#[test]
fn consecutive_tables_restart_their_indices() {
    let (mut doc, section, sheet) = setup();
    add_markup(
        &mut doc,
        section,
        &sheet,
        "<table><thead><tr><th>A</th></tr></thead></table>\
         <table><thead><tr><th>B</th></tr></thead></table>",
    )
    .expect("conversion succeeds");

    let blocks = blocks(&doc, section);
    assert_eq!(blocks.len(), 2);
    for (block, text) in blocks.iter().zip(["A", "B"]) {
        let t = table(&doc, block);
        assert_eq!(t.columns.len(), 1);
        assert_eq!(
            paragraph(&t.rows[0].cells[0].blocks[0]).plain_text(),
            text
        );
    }
}

#[test]
fn data_cell_without_a_column_is_fatal() {
    let (mut doc, section, sheet) = setup();
    let err = add_markup(
        &mut doc,
        section,
        &sheet,
        "<table><tr><td>orphan</td></tr></table>",
    )
    .expect_err("must fail");
    assert_eq!(err.code, "MODEL_REF");
    assert_eq!(err.tag.as_deref(), Some("td"));
}

#[test]
fn table_under_a_paragraph_is_a_context_violation() {
    let (mut doc, section, sheet) = setup();
    let err = add_markup(&mut doc, section, &sheet, "<p>x<table></table></p>")
        .expect_err("must fail");
    assert_eq!(err.code, "CONTEXT_KIND");
    assert_eq!(err.tag.as_deref(), Some("table"));
}
