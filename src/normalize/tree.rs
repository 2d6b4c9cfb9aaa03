//! Generic nested node tree built from a response document.
//!
//! Shape rules:
//! - an element with child elements becomes a `Map` keyed by local name
//! - repeated sibling names collapse into a `List`, a lone child stays as is
//! - an element with only text becomes `Text` (trimmed)
//! - an empty, self-closing or `xsi:nil="true"` element becomes `Empty`
//!
//! Namespace prefixes are dropped, so `soap:Envelope` is keyed `Envelope`.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// One node of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Empty,
    Text(String),
    Map(BTreeMap<String, Node>),
    List(Vec<Node>),
}

impl Node {
    /// Child `key` of a `Map` node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Map(children) => children.get(key),
            _ => None,
        }
    }

    /// Descend through `keys`; `None` as soon as a level is missing.
    pub fn path(&self, keys: &[&str]) -> Option<&Node> {
        keys.iter().try_fold(self, |node, key| node.get(key))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Every text leaf below this node.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Empty => {}
            Node::Text(text) => out.push(text.as_str()),
            Node::Map(children) => children.values().for_each(|c| c.collect_texts(out)),
            Node::List(items) => items.iter().for_each(|i| i.collect_texts(out)),
        }
    }
}

/// Errors raised while building a tree.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document has no root element")]
    NoRoot,

    #[error("element <{0}> is never closed")]
    Unclosed(String),
}

struct Frame {
    name: String,
    children: BTreeMap<String, Node>,
    text: String,
    nil: bool,
}

impl Frame {
    fn open(name: String, nil: bool) -> Self {
        Self {
            name,
            children: BTreeMap::new(),
            text: String::new(),
            nil,
        }
    }

    fn finish(self) -> (String, Node) {
        let node = if !self.children.is_empty() {
            Node::Map(self.children)
        } else {
            let text = self.text.trim();
            if self.nil || text.is_empty() {
                Node::Empty
            } else {
                Node::Text(text.to_string())
            }
        };
        (self.name, node)
    }
}

/// Parse `xml` into a `Map` holding the root element.
pub fn parse_document(xml: &str) -> Result<Node, TreeError> {
    let mut reader = Reader::from_str(xml);
    // The bottom frame collects the root element.
    let mut stack = vec![Frame::open(String::new(), false)];

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(Frame::open(local_name(&e), is_nil(&e))),
            Event::Empty(e) => {
                if let Some(parent) = stack.last_mut() {
                    insert_child(&mut parent.children, local_name(&e), Node::Empty);
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                let bytes = e.into_inner();
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&bytes));
                }
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(TreeError::NoRoot);
                }
                if let Some(frame) = stack.pop() {
                    let (name, node) = frame.finish();
                    if let Some(parent) = stack.last_mut() {
                        insert_child(&mut parent.children, name, node);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() > 1 {
        let open = stack.pop().map(|f| f.name).unwrap_or_default();
        return Err(TreeError::Unclosed(open));
    }
    let root = stack.pop().map(|f| f.children).unwrap_or_default();
    if root.len() != 1 || root.values().any(|n| matches!(n, Node::List(_))) {
        return Err(TreeError::NoRoot);
    }
    Ok(Node::Map(root))
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn is_nil(e: &BytesStart<'_>) -> bool {
    e.attributes()
        .flatten()
        .any(|attr| attr.key.local_name().as_ref() == b"nil" && &*attr.value == b"true")
}

fn insert_child(children: &mut BTreeMap<String, Node>, name: String, node: Node) {
    match children.entry(name) {
        Entry::Vacant(slot) => {
            slot.insert(node);
        }
        Entry::Occupied(mut slot) => match slot.get_mut() {
            Node::List(items) => items.push(node),
            existing => {
                let first = std::mem::replace(existing, Node::Empty);
                *existing = Node::List(vec![first, node]);
            }
        },
    }
}
