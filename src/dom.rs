//! Read-only markup tree consumed by the conversion engine.
//!
//! Built once from source text by a `quick-xml` event loop and never
//! mutated afterwards. Nodes live in an arena addressed by [`NodeId`];
//! parent links are non-owning indices used only for sibling queries.
//!
//! Text nodes carry the sentinel name [`TEXT_TAG`] and keep their payload
//! raw: entity references stay as written (`&amp;` is stored as `&amp;`)
//! and are decoded at the structural-builder boundary, not here.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use smallvec::SmallVec;

use crate::error::ConvertError;

/// Sentinel node name for raw text.
pub const TEXT_TAG: &str = "#text";

/// Open-element depth limit for a single parse.
const MAX_TREE_DEPTH: usize = 256;

/// Tags that never take children even when written without `/>`.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void_tag(name: &str) -> bool {
    VOID_TAGS.contains(&name)
}

type AttrList = SmallVec<[(Box<str>, Box<str>); 4]>;

/// ID addressing a node in the tree arena.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Node {
    name: Box<str>,
    attrs: AttrList,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text: Box<str>,
}

/// The parsed markup tree.
#[derive(Clone, Debug, Default)]
pub struct NodeTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl NodeTree {
    /// Parse markup text into a tree.
    ///
    /// Tag names are lowercased. Void tags (`<br>`, `<hr>`, …) never open
    /// an element scope. A close tag with no matching open element is
    /// ignored; a close tag matching a non-top element pops down to it.
    pub fn parse(markup: &str) -> Result<Self, ConvertError> {
        let mut tree = NodeTree::default();
        let mut reader = Reader::from_str(markup);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let mut stack: Vec<NodeId> = Vec::with_capacity(8);
        let mut pending_text = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    tree.flush_text(&stack, &mut pending_text);
                    let name = decode_tag(&reader, e.name().as_ref())?;
                    let id = tree.push_element(&reader, &name, &e, stack.last().copied());
                    if !is_void_tag(&name) {
                        if stack.len() >= MAX_TREE_DEPTH {
                            return Err(ConvertError::new(
                                "MARKUP_DEPTH",
                                format!("element nesting exceeds {MAX_TREE_DEPTH}"),
                            )
                            .with_tag(name));
                        }
                        stack.push(id);
                    }
                }
                Ok(Event::Empty(e)) => {
                    tree.flush_text(&stack, &mut pending_text);
                    let name = decode_tag(&reader, e.name().as_ref())?;
                    tree.push_element(&reader, &name, &e, stack.last().copied());
                }
                Ok(Event::End(e)) => {
                    tree.flush_text(&stack, &mut pending_text);
                    let name = decode_tag(&reader, e.name().as_ref())?;
                    match stack
                        .iter()
                        .rposition(|&id| tree.nodes[id.index()].name.as_ref() == name)
                    {
                        Some(position) => stack.truncate(position),
                        None => log::warn!("ignoring unmatched close tag </{name}>"),
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e.decode().map_err(|err| {
                        ConvertError::new("MARKUP_PARSE", format!("text decode error: {err}"))
                    })?;
                    pending_text.push_str(&text);
                }
                Ok(Event::CData(e)) => {
                    let text = reader.decoder().decode(&e).map_err(|err| {
                        ConvertError::new("MARKUP_PARSE", format!("cdata decode error: {err}"))
                    })?;
                    // Re-escaped so the text handler's single unescape pass
                    // restores the literal content.
                    pending_text.push_str(&quick_xml::escape::escape(text.as_ref()));
                }
                Ok(Event::GeneralRef(e)) => {
                    let entity = e.decode().map_err(|err| {
                        ConvertError::new("MARKUP_PARSE", format!("entity decode error: {err}"))
                    })?;
                    pending_text.push('&');
                    pending_text.push_str(entity.as_ref());
                    pending_text.push(';');
                }
                Ok(Event::Eof) => {
                    tree.flush_text(&stack, &mut pending_text);
                    break;
                }
                Ok(_) => {}
                Err(err) => {
                    return Err(ConvertError::new(
                        "MARKUP_PARSE",
                        format!("markup error at byte {}: {err}", reader.error_position()),
                    ));
                }
            }
        }

        Ok(tree)
    }

    /// Root-level nodes in document order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Node name; `#text` for raw text nodes.
    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].name
    }

    /// Attribute value by (lowercase) name.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.index()]
            .attrs
            .iter()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| value.as_ref())
    }

    /// Non-owning parent link.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Child nodes in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Whether the node has children.
    pub fn has_children(&self, id: NodeId) -> bool {
        !self.nodes[id.index()].children.is_empty()
    }

    /// Raw text content: the payload for a text node, the concatenated
    /// descendant text for an element.
    pub fn inner_text(&self, id: NodeId) -> String {
        let node = &self.nodes[id.index()];
        if node.name.as_ref() == TEXT_TAG {
            return node.text.to_string();
        }
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    /// Whether `id` is the first of its parent's children carrying `tag`.
    pub fn is_first_of(&self, id: NodeId, tag: &str) -> bool {
        self.siblings_of(id)
            .iter()
            .copied()
            .find(|&sibling| self.name(sibling) == tag)
            == Some(id)
    }

    /// Whether `id` is the last of its parent's children carrying `tag`.
    pub fn is_last_of(&self, id: NodeId, tag: &str) -> bool {
        self.siblings_of(id)
            .iter()
            .copied()
            .rev()
            .find(|&sibling| self.name(sibling) == tag)
            == Some(id)
    }

    /// Total node count.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn siblings_of(&self, id: NodeId) -> &[NodeId] {
        match self.parent(id) {
            Some(parent) => self.children(parent),
            None => self.roots(),
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for &child in self.children(id) {
            let node = &self.nodes[child.index()];
            if node.name.as_ref() == TEXT_TAG {
                out.push_str(&node.text);
            } else {
                self.collect_text(child, out);
            }
        }
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let parent = node.parent;
        self.nodes.push(node);
        match parent {
            Some(parent) => self.nodes[parent.index()].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn push_element(
        &mut self,
        reader: &Reader<&[u8]>,
        name: &str,
        start: &BytesStart<'_>,
        parent: Option<NodeId>,
    ) -> NodeId {
        let mut attrs = AttrList::new();
        for attr in start.attributes().flatten() {
            let key = match reader.decoder().decode(attr.key.as_ref()) {
                Ok(key) => key.to_ascii_lowercase(),
                Err(_) => continue,
            };
            let value = match attr.unescape_value() {
                Ok(value) => value.into_owned(),
                Err(_) => reader
                    .decoder()
                    .decode(&attr.value)
                    .map(|raw| raw.into_owned())
                    .unwrap_or_default(),
            };
            attrs.push((key.into_boxed_str(), value.into_boxed_str()));
        }
        self.push_node(Node {
            name: name.into(),
            attrs,
            parent,
            children: Vec::new(),
            text: Box::default(),
        })
    }

    fn flush_text(&mut self, stack: &[NodeId], pending: &mut String) {
        if pending.is_empty() {
            return;
        }
        let text = core::mem::take(pending);
        self.push_node(Node {
            name: TEXT_TAG.into(),
            attrs: AttrList::new(),
            parent: stack.last().copied(),
            children: Vec::new(),
            text: text.into_boxed_str(),
        });
    }
}

fn decode_tag(reader: &Reader<&[u8]>, raw: &[u8]) -> Result<String, ConvertError> {
    let name = reader
        .decoder()
        .decode(raw)
        .map_err(|err| ConvertError::new("MARKUP_PARSE", format!("tag decode error: {err}")))?;
    Ok(name.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_with_parent_links() {
        let tree = NodeTree::parse("<div><p>hi</p></div>").unwrap();
        assert_eq!(tree.roots().len(), 1);
        let div = tree.roots()[0];
        assert_eq!(tree.name(div), "div");
        let p = tree.children(div)[0];
        assert_eq!(tree.name(p), "p");
        assert_eq!(tree.parent(p), Some(div));
        let text = tree.children(p)[0];
        assert_eq!(tree.name(text), TEXT_TAG);
        assert_eq!(tree.inner_text(text), "hi");
        assert_eq!(tree.inner_text(div), "hi");
    }

    #[test]
    fn void_tags_do_not_open_a_scope() {
        let tree = NodeTree::parse("<p>a<br>b</p>").unwrap();
        let p = tree.roots()[0];
        let names: Vec<&str> = tree.children(p).iter().map(|&c| tree.name(c)).collect();
        assert_eq!(names, vec![TEXT_TAG, "br", TEXT_TAG]);
        let br = tree.children(p)[1];
        assert!(!tree.has_children(br));
    }

    #[test]
    fn unmatched_close_tag_is_ignored() {
        let tree = NodeTree::parse("<p>a</span>b</p>").unwrap();
        let p = tree.roots()[0];
        assert_eq!(tree.inner_text(p), "ab");
    }

    #[test]
    fn entities_are_kept_raw_in_text_payloads() {
        let tree = NodeTree::parse("<p>fish &amp; chips</p>").unwrap();
        let p = tree.roots()[0];
        assert_eq!(tree.children(p).len(), 1);
        assert_eq!(tree.inner_text(tree.children(p)[0]), "fish &amp; chips");
    }

    #[test]
    fn attribute_names_lowercase_and_values_decode() {
        let tree = NodeTree::parse(r#"<a HREF="x?a=1&amp;b=2">t</a>"#).unwrap();
        let a = tree.roots()[0];
        assert_eq!(tree.attr(a, "href"), Some("x?a=1&b=2"));
        assert_eq!(tree.attr(a, "missing"), None);
    }

    #[test]
    fn sibling_queries_filter_by_tag() {
        let tree = NodeTree::parse("<ul><li>a</li><p>x</p><li>b</li><li>c</li></ul>").unwrap();
        let ul = tree.roots()[0];
        let items: Vec<NodeId> = tree
            .children(ul)
            .iter()
            .copied()
            .filter(|&c| tree.name(c) == "li")
            .collect();
        assert_eq!(items.len(), 3);
        assert!(tree.is_first_of(items[0], "li"));
        assert!(!tree.is_first_of(items[1], "li"));
        assert!(!tree.is_last_of(items[1], "li"));
        assert!(tree.is_last_of(items[2], "li"));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let mut markup = String::new();
        for _ in 0..300 {
            markup.push_str("<div>");
        }
        let err = NodeTree::parse(&markup).unwrap_err();
        assert_eq!(err.code, "MARKUP_DEPTH");
    }
}
