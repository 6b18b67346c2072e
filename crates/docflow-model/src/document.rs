//! Document, sections, and address resolution.

use crate::paragraph::{hyperlink_at, run_at, Hyperlink, Paragraph, Run};
use crate::refs::{
    CellRef, ColumnRef, ContainerRef, HyperlinkRef, ParagraphRef, RowRef, RunRef, SectionId,
    TableId,
};
use crate::style::{default_styles, StyleMap};
use crate::table::{Cell, Column, Row, Table};
use crate::unit::Unit;

/// Page geometry for a section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSetup {
    /// Top page margin.
    pub top_margin: Unit,
    /// Right page margin.
    pub right_margin: Unit,
    /// Bottom page margin.
    pub bottom_margin: Unit,
    /// Left page margin.
    pub left_margin: Unit,
    /// Distance from the page top edge to the header.
    pub header_distance: Unit,
    /// Distance from the page bottom edge to the footer.
    pub footer_distance: Unit,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            top_margin: Unit::from_centimeter(2.5),
            right_margin: Unit::from_centimeter(2.5),
            bottom_margin: Unit::from_centimeter(2.5),
            left_margin: Unit::from_centimeter(2.5),
            header_distance: Unit::from_centimeter(1.25),
            footer_distance: Unit::from_centimeter(1.25),
        }
    }
}

/// Block-level element of a container.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// A paragraph owned directly by the container.
    Paragraph(Paragraph),
    /// A table referenced in the document table arena.
    Table(TableId),
}

/// A document section: page setup, block sequence, and an optional footer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Section {
    /// Page geometry for this section.
    pub page_setup: PageSetup,
    /// Ordered blocks.
    pub blocks: Vec<Block>,
    /// Primary footer paragraph, if any.
    pub footer: Option<Paragraph>,
}

impl Section {
    /// The footer paragraph, created empty on first access.
    pub fn footer_paragraph_mut(&mut self) -> &mut Paragraph {
        self.footer.get_or_insert_with(Paragraph::new)
    }
}

/// The document root: sections, the table arena, and named styles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// Ordered sections.
    pub sections: Vec<Section>,
    /// All tables in the document, referenced from blocks by id.
    pub tables: Vec<Table>,
    /// Named style definitions.
    pub styles: StyleMap,
}

impl Document {
    /// Create an empty document with no styles registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document carrying the standard report style presets.
    pub fn with_default_styles() -> Self {
        Self {
            styles: default_styles(),
            ..Self::default()
        }
    }

    /// Append a new section; returns its address.
    pub fn add_section(&mut self) -> SectionId {
        let id = SectionId(self.sections.len());
        self.sections.push(Section::default());
        id
    }

    /// Section at `id`.
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.0)
    }

    /// Mutable section at `id`.
    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.get_mut(id.0)
    }

    /// Block sequence of a container.
    pub fn container_blocks(&self, container: ContainerRef) -> Option<&[Block]> {
        match container {
            ContainerRef::Section(id) => self.sections.get(id.0).map(|s| s.blocks.as_slice()),
            ContainerRef::Cell(cell) => self.cell(cell).map(|c| c.blocks.as_slice()),
        }
    }

    fn container_blocks_mut(&mut self, container: ContainerRef) -> Option<&mut Vec<Block>> {
        match container {
            ContainerRef::Section(id) => self.sections.get_mut(id.0).map(|s| &mut s.blocks),
            ContainerRef::Cell(cell) => self.cell_mut(cell).map(|c| &mut c.blocks),
        }
    }

    /// Append an empty paragraph to a container; returns its address.
    pub fn add_paragraph(&mut self, container: ContainerRef) -> Option<ParagraphRef> {
        let blocks = self.container_blocks_mut(container)?;
        let block = blocks.len();
        blocks.push(Block::Paragraph(Paragraph::new()));
        Some(ParagraphRef { container, block })
    }

    /// Paragraph at `at`.
    pub fn paragraph(&self, at: ParagraphRef) -> Option<&Paragraph> {
        match self.container_blocks(at.container)?.get(at.block)? {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        }
    }

    /// Mutable paragraph at `at`.
    pub fn paragraph_mut(&mut self, at: ParagraphRef) -> Option<&mut Paragraph> {
        match self.container_blocks_mut(at.container)?.get_mut(at.block)? {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        }
    }

    /// Append an empty table to a container; returns its arena id.
    pub fn add_table(&mut self, container: ContainerRef) -> Option<TableId> {
        self.container_blocks_mut(container)?;
        let id = TableId(self.tables.len());
        self.tables.push(Table::new());
        let blocks = self.container_blocks_mut(container)?;
        blocks.push(Block::Table(id));
        Some(id)
    }

    /// Table at `id`.
    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.get(id.0)
    }

    /// Mutable table at `id`.
    pub fn table_mut(&mut self, id: TableId) -> Option<&mut Table> {
        self.tables.get_mut(id.0)
    }

    /// Row at `at`.
    pub fn row(&self, at: RowRef) -> Option<&Row> {
        self.tables.get(at.table.0)?.rows.get(at.row)
    }

    /// Mutable row at `at`.
    pub fn row_mut(&mut self, at: RowRef) -> Option<&mut Row> {
        self.tables.get_mut(at.table.0)?.rows.get_mut(at.row)
    }

    /// Cell at `at`.
    pub fn cell(&self, at: CellRef) -> Option<&Cell> {
        self.tables
            .get(at.table.0)?
            .rows
            .get(at.row)?
            .cells
            .get(at.cell)
    }

    /// Mutable cell at `at`.
    pub fn cell_mut(&mut self, at: CellRef) -> Option<&mut Cell> {
        self.tables
            .get_mut(at.table.0)?
            .rows
            .get_mut(at.row)?
            .cells
            .get_mut(at.cell)
    }

    /// Column at `at`.
    pub fn column(&self, at: ColumnRef) -> Option<&Column> {
        self.tables.get(at.table.0)?.columns.get(at.column)
    }

    /// Mutable run at `at`.
    pub fn run_mut(&mut self, at: RunRef) -> Option<&mut Run> {
        run_at(self.paragraph_mut(at.paragraph)?, at.inline)
    }

    /// Mutable hyperlink at `at`.
    pub fn hyperlink_mut(&mut self, at: HyperlinkRef) -> Option<&mut Hyperlink> {
        hyperlink_at(self.paragraph_mut(at.paragraph)?, at.inline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paragraph::TextFormat;

    #[test]
    fn paragraph_addresses_survive_later_appends() {
        let mut doc = Document::new();
        let section = doc.add_section();
        let container = ContainerRef::Section(section);
        let first = doc.add_paragraph(container).unwrap();
        doc.paragraph_mut(first).unwrap().add_text("one");
        let second = doc.add_paragraph(container).unwrap();
        doc.paragraph_mut(second).unwrap().add_text("two");
        assert_eq!(doc.paragraph(first).unwrap().plain_text(), "one");
        assert_eq!(doc.paragraph(second).unwrap().plain_text(), "two");
    }

    #[test]
    fn cell_paragraphs_resolve_through_the_table_arena() {
        let mut doc = Document::new();
        let section = doc.add_section();
        let table = doc.add_table(ContainerRef::Section(section)).unwrap();
        let t = doc.table_mut(table).unwrap();
        t.add_column(Unit::from_centimeter(5.0));
        let row = t.add_row();
        let cell = CellRef {
            table,
            row,
            cell: 0,
        };
        let p = doc.add_paragraph(ContainerRef::Cell(cell)).unwrap();
        doc.paragraph_mut(p).unwrap().add_text("in cell");
        assert_eq!(doc.cell(cell).unwrap().blocks.len(), 1);
    }

    #[test]
    fn run_resolution_rejects_non_run_inlines() {
        let mut doc = Document::new();
        let section = doc.add_section();
        let p = doc
            .add_paragraph(ContainerRef::Section(section))
            .unwrap();
        let para = doc.paragraph_mut(p).unwrap();
        para.add_text("plain");
        let run_index = para.add_run(TextFormat::Bold);
        assert!(doc
            .run_mut(RunRef {
                paragraph: p,
                inline: 0
            })
            .is_none());
        assert!(doc
            .run_mut(RunRef {
                paragraph: p,
                inline: run_index
            })
            .is_some());
    }

    #[test]
    fn stale_section_id_resolves_to_none() {
        let mut doc = Document::new();
        let section = doc.add_section();
        let other = Document::new();
        assert!(other.section(section).is_none());
        assert!(doc.section(section).is_some());
    }
}
