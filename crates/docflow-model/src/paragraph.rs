//! Paragraphs and their inline content.

/// Horizontal paragraph alignment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Alignment {
    /// Flush left.
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
    /// Justified.
    Justify,
}

/// Character format applied to a run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextFormat {
    /// Bold weight.
    Bold,
    /// Italic slant.
    Italic,
    /// Underlined.
    Underline,
}

/// Hyperlink target kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HyperlinkKind {
    /// External web target.
    Web,
    /// Bookmark within the document.
    Bookmark,
    /// Local file target.
    File,
}

/// List behavior carried on a paragraph.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ListInfo {
    /// Continue numbering from the previous list paragraph.
    pub continue_previous: bool,
}

/// Direct formatting on a paragraph.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParagraphFormat {
    /// Optional alignment override.
    pub alignment: Option<Alignment>,
    /// List behavior.
    pub list: ListInfo,
}

/// Content item inside a formatted run.
#[derive(Clone, Debug, PartialEq)]
pub enum RunContent {
    /// Plain text.
    Text(Box<str>),
    /// Explicit line break.
    LineBreak,
}

/// A span of uniformly formatted text within a paragraph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Run {
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Underlined.
    pub underline: bool,
    /// Ordered run content.
    pub content: Vec<RunContent>,
}

impl Run {
    /// Create a run with one format flag set.
    pub fn with_format(format: TextFormat) -> Self {
        let mut run = Self::default();
        run.apply(format);
        run
    }

    /// Set an additional format flag in place.
    pub fn apply(&mut self, format: TextFormat) -> &mut Self {
        match format {
            TextFormat::Bold => self.bold = true,
            TextFormat::Italic => self.italic = true,
            TextFormat::Underline => self.underline = true,
        }
        self
    }

    /// Append text to the run.
    pub fn add_text(&mut self, text: &str) {
        self.content.push(RunContent::Text(text.into()));
    }

    /// Append a line break to the run.
    pub fn add_line_break(&mut self) {
        self.content.push(RunContent::LineBreak);
    }

    /// Concatenated text content, line breaks rendered as `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for item in &self.content {
            match item {
                RunContent::Text(t) => out.push_str(t),
                RunContent::LineBreak => out.push('\n'),
            }
        }
        out
    }
}

/// A link region within a paragraph.
#[derive(Clone, Debug, PartialEq)]
pub struct Hyperlink {
    /// Link target (URL, bookmark name, or file path).
    pub target: Box<str>,
    /// Target kind.
    pub kind: HyperlinkKind,
    /// Ordered text content.
    pub content: Vec<Box<str>>,
}

impl Hyperlink {
    /// Create a hyperlink with no content yet.
    pub fn new(target: &str, kind: HyperlinkKind) -> Self {
        Self {
            target: target.into(),
            kind,
            content: Vec::new(),
        }
    }

    /// Append text to the link region.
    pub fn add_text(&mut self, text: &str) {
        self.content.push(text.into());
    }

    /// Concatenated text content.
    pub fn text(&self) -> String {
        self.content.concat()
    }
}

/// Inline content item of a paragraph.
#[derive(Clone, Debug, PartialEq)]
pub enum Inline {
    /// Plain text.
    Text(Box<str>),
    /// Formatted run.
    Run(Run),
    /// Link region.
    Hyperlink(Hyperlink),
    /// Explicit line break.
    LineBreak,
    /// Current page number field, resolved at render time.
    PageField,
    /// Total page count field for the section, resolved at render time.
    SectionPagesField,
}

/// A paragraph-like block holding inline content, with an optional named style.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paragraph {
    /// Named style, resolved against the document style map at render time.
    pub style: Option<Box<str>>,
    /// Direct formatting.
    pub format: ParagraphFormat,
    /// Ordered inline content.
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag the paragraph with a named style.
    pub fn set_style(&mut self, name: &str) -> &mut Self {
        self.style = Some(name.into());
        self
    }

    /// Append plain text.
    pub fn add_text(&mut self, text: &str) {
        self.inlines.push(Inline::Text(text.into()));
    }

    /// Append a line break.
    pub fn add_line_break(&mut self) {
        self.inlines.push(Inline::LineBreak);
    }

    /// Append a page-number field.
    pub fn add_page_field(&mut self) {
        self.inlines.push(Inline::PageField);
    }

    /// Append a section total-pages field.
    pub fn add_section_pages_field(&mut self) {
        self.inlines.push(Inline::SectionPagesField);
    }

    /// Start a new formatted run; returns its inline index.
    pub fn add_run(&mut self, format: TextFormat) -> usize {
        let index = self.inlines.len();
        self.inlines.push(Inline::Run(Run::with_format(format)));
        index
    }

    /// Start a new hyperlink; returns its inline index.
    pub fn add_hyperlink(&mut self, target: &str, kind: HyperlinkKind) -> usize {
        let index = self.inlines.len();
        self.inlines
            .push(Inline::Hyperlink(Hyperlink::new(target, kind)));
        index
    }

    /// Concatenated plain text of all inline content.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for inline in &self.inlines {
            match inline {
                Inline::Text(t) => out.push_str(t),
                Inline::Run(run) => out.push_str(&run.text()),
                Inline::Hyperlink(link) => out.push_str(&link.text()),
                Inline::LineBreak => out.push('\n'),
                Inline::PageField | Inline::SectionPagesField => {}
            }
        }
        out
    }
}

/// Resolve an inline index to a run, if the inline at that position is one.
pub(crate) fn run_at(paragraph: &mut Paragraph, inline: usize) -> Option<&mut Run> {
    match paragraph.inlines.get_mut(inline)? {
        Inline::Run(run) => Some(run),
        _ => None,
    }
}

/// Resolve an inline index to a hyperlink.
pub(crate) fn hyperlink_at(paragraph: &mut Paragraph, inline: usize) -> Option<&mut Hyperlink> {
    match paragraph.inlines.get_mut(inline)? {
        Inline::Hyperlink(link) => Some(link),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_accumulates_formats_in_place() {
        let mut run = Run::with_format(TextFormat::Bold);
        run.apply(TextFormat::Italic);
        assert!(run.bold && run.italic && !run.underline);
    }

    #[test]
    fn paragraph_plain_text_spans_inline_kinds() {
        let mut p = Paragraph::new();
        p.add_text("Hello ");
        let run = p.add_run(TextFormat::Bold);
        if let Some(Inline::Run(r)) = p.inlines.get_mut(run) {
            r.add_text("world");
        }
        p.add_line_break();
        assert_eq!(p.plain_text(), "Hello world\n");
    }
}
