//! Named style definitions and the standard report presets.
//!
//! Styles are declarative: the model records them and a renderer applies
//! them. A paragraph references a style by name; resolution against the
//! map happens downstream.

use std::collections::BTreeMap;

use crate::unit::Unit;

/// RGB color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// List marker kind for list styles.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListType {
    /// Bulleted list.
    Bullet,
    /// Numbered list.
    Numbered,
}

/// Character-level style properties. `None` inherits from the base style.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontSpec {
    /// Font size.
    pub size: Option<Unit>,
    /// Bold weight.
    pub bold: Option<bool>,
    /// Text color.
    pub color: Option<Color>,
}

/// Paragraph-level style properties. `None` inherits from the base style.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParagraphSpec {
    /// Space after the paragraph.
    pub space_after: Option<Unit>,
    /// Line spacing multiplier.
    pub line_spacing: Option<f64>,
    /// Left indent.
    pub left_indent: Option<Unit>,
    /// First-line indent (negative for hanging markers).
    pub first_line_indent: Option<Unit>,
    /// List marker kind.
    pub list_type: Option<ListType>,
    /// Width of a rule drawn along the paragraph's bottom edge.
    pub bottom_rule_width: Option<Unit>,
}

/// A named style, optionally derived from a base style.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Style name.
    pub name: Box<str>,
    /// Base style this one derives from.
    pub base: Option<Box<str>>,
    /// Character properties.
    pub font: FontSpec,
    /// Paragraph properties.
    pub paragraph: ParagraphSpec,
}

impl Style {
    /// Create a style with all properties inherited.
    pub fn new(name: &str, base: Option<&str>) -> Self {
        Self {
            name: name.into(),
            base: base.map(Into::into),
            font: FontSpec::default(),
            paragraph: ParagraphSpec::default(),
        }
    }
}

/// Named style registry for a document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleMap {
    styles: BTreeMap<Box<str>, Style>,
}

impl StyleMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a style under its own name.
    pub fn insert(&mut self, style: Style) {
        self.styles.insert(style.name.clone(), style);
    }

    /// Style by name.
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// Whether a style with `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Number of registered styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether no styles are registered.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Iterate styles in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.styles.values()
    }
}

/// The standard report presets: body text, footer, headings, hyperlinks,
/// list paragraph styles and their zero-height boundary styles, and the
/// horizontal rule.
pub fn default_styles() -> StyleMap {
    let mut map = StyleMap::new();

    let green = Color::new(108, 179, 63);
    let body_gray = Color::new(51, 51, 51);

    let mut normal = Style::new("Normal", None);
    normal.font.size = Some(Unit::from_inch(0.14));
    normal.font.color = Some(body_gray);
    normal.paragraph.line_spacing = Some(1.25);
    normal.paragraph.space_after = Some(Unit::from_point(10.0));
    map.insert(normal);

    let mut footer = Style::new("Footer", Some("Normal"));
    footer.font.size = Some(Unit::from_inch(0.125));
    footer.font.color = Some(green);
    map.insert(footer);

    let mut h1 = Style::new("Heading1", Some("Normal"));
    h1.font.color = Some(green);
    h1.font.bold = Some(true);
    h1.font.size = Some(Unit::from_point(15.0));
    map.insert(h1);

    let mut h2 = Style::new("Heading2", Some("Normal"));
    h2.font.color = Some(green);
    h2.font.bold = Some(true);
    h2.font.size = Some(Unit::from_point(13.0));
    map.insert(h2);

    let mut h3 = Style::new("Heading3", Some("Normal"));
    h3.font.color = Some(Color::new(0, 0, 0));
    h3.font.bold = Some(true);
    h3.font.size = Some(Unit::from_point(11.0));
    map.insert(h3);

    for level in 4..=6 {
        let name = format!("Heading{level}");
        let mut heading = Style::new(&name, Some("Heading3"));
        heading.font.size = Some(Unit::from_point(11.0));
        map.insert(heading);
    }

    let mut links = Style::new("Hyperlink", Some("Normal"));
    links.font.color = Some(green);
    map.insert(links);

    let mut unordered = Style::new("UnorderedList", Some("Normal"));
    unordered.paragraph.list_type = Some(ListType::Bullet);
    unordered.paragraph.left_indent = Some(Unit::from_centimeter(1.0));
    unordered.paragraph.first_line_indent = Some(Unit::from_centimeter(-0.5));
    unordered.paragraph.space_after = Some(Unit::ZERO);
    map.insert(unordered);

    let mut ordered = Style::new("OrderedList", Some("UnorderedList"));
    ordered.paragraph.list_type = Some(ListType::Numbered);
    map.insert(ordered);

    // List spacing control: the model has no list object to target, so the
    // boundary paragraphs around a list carry the spacing.
    let mut list_start = Style::new("ListStart", Some("Normal"));
    list_start.paragraph.space_after = Some(Unit::ZERO);
    list_start.paragraph.line_spacing = Some(0.5);
    map.insert(list_start);

    let mut list_end = Style::new("ListEnd", Some("ListStart"));
    list_end.paragraph.line_spacing = Some(1.0);
    map.insert(list_end);

    let mut rule = Style::new("HorizontalRule", Some("Normal"));
    rule.paragraph.bottom_rule_width = Some(Unit::from_point(1.0));
    rule.paragraph.line_spacing = Some(0.0);
    map.insert(rule);

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_styles_cover_every_generated_name() {
        let map = default_styles();
        for name in [
            "Normal",
            "Footer",
            "Heading1",
            "Heading2",
            "Heading3",
            "Heading4",
            "Heading5",
            "Heading6",
            "Hyperlink",
            "UnorderedList",
            "OrderedList",
            "ListStart",
            "ListEnd",
            "HorizontalRule",
        ] {
            assert!(map.contains(name), "missing style {name}");
        }
    }

    #[test]
    fn ordered_list_derives_from_unordered() {
        let map = default_styles();
        let ordered = map.get("OrderedList").unwrap();
        assert_eq!(ordered.base.as_deref(), Some("UnorderedList"));
        assert_eq!(ordered.paragraph.list_type, Some(ListType::Numbered));
    }
}
