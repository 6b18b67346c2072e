use docflow::{parse_stylesheet, Stylesheet};
use docflow_model::{Block, Document, Paragraph, SectionId, Table};

/// Fresh document + section + empty stylesheet for conversion tests.
pub fn setup() -> (Document, SectionId, Stylesheet) {
    let mut doc = Document::with_default_styles();
    let section = doc.add_section();
    let sheet = parse_stylesheet("").expect("empty stylesheet parses");
    (doc, section, sheet)
}

/// Section block list.
pub fn blocks(doc: &Document, section: SectionId) -> &[Block] {
    &doc.section(section).expect("section exists").blocks
}

/// Assert a block is a paragraph and return it.
pub fn paragraph(block: &Block) -> &Paragraph {
    match block {
        Block::Paragraph(p) => p,
        Block::Table(_) => panic!("expected a paragraph block, found a table"),
    }
}

/// Assert a block is a table and return it.
pub fn table<'a>(doc: &'a Document, block: &Block) -> &'a Table {
    match block {
        Block::Table(id) => doc.table(*id).expect("table id resolves"),
        Block::Paragraph(_) => panic!("expected a table block, found a paragraph"),
    }
}
