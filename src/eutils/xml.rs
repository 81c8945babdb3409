// Minimal element tree over quick-xml events.
//
// E-utilities documents are small (one page of search results, or one batch
// of up to a few hundred articles), so they are read into an owned tree and
// walked with `find`/`find_all`. Lookups are depth-first in document order,
// which gives "first occurrence" semantics for every field lookup.

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

use crate::error::{Result, ScrapeError};

#[derive(Debug, Error)]
pub enum XmlError {
    #[error(transparent)]
    Syntax(#[from] quick_xml::Error),
    #[error("unclosed element <{0}>")]
    Unclosed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// First descendant element with the given name.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        for child in self.elements() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// Every descendant element with the given name, in document order.
    pub fn find_all<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect(name, &mut found);
        found
    }

    fn collect<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        for child in self.elements() {
            if child.name == name {
                found.push(child);
            }
            child.collect(name, found);
        }
    }

    /// All text beneath this element, inline markup flattened away.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(el) => el.push_text(out),
            }
        }
    }
}

/// Parse a whole document. The returned root is a synthetic `#document`
/// element holding the top-level nodes.
pub fn parse_document(xml: &str) -> std::result::Result<XmlElement, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut stack = vec![XmlElement::new("#document")];

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.push(XmlElement::new(&name));
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                push_node(&mut stack, XmlNode::Element(XmlElement::new(&name)));
            }
            Event::End(_) => {
                if stack.len() > 1 {
                    if let Some(done) = stack.pop() {
                        push_node(&mut stack, XmlNode::Element(done));
                    }
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?.into_owned();
                push_node(&mut stack, XmlNode::Text(text));
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_node(&mut stack, XmlNode::Text(text));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() > 1 {
        let open = stack.pop().map(|el| el.name).unwrap_or_default();
        return Err(XmlError::Unclosed(open));
    }
    Ok(stack.pop().unwrap_or_else(|| XmlElement::new("#document")))
}

fn push_node(stack: &mut [XmlElement], node: XmlNode) {
    if let Some(top) = stack.last_mut() {
        top.children.push(node);
    }
}

fn parse_for(query: &str, xml: &str) -> Result<XmlElement> {
    let root = parse_document(xml).map_err(|e| ScrapeError::malformed(query, e.to_string()))?;
    if let Some(err) = root.find("ERROR") {
        return Err(ScrapeError::malformed(
            query,
            format!("endpoint reported error: {}", err.text().trim()),
        ));
    }
    Ok(root)
}

fn parse_integer(query: &str, tag: &str, el: &XmlElement) -> Result<u64> {
    let raw = el.text();
    raw.trim().parse::<u64>().map_err(|_| {
        ScrapeError::malformed(query, format!("<{tag}> is not an integer: {:?}", raw.trim()))
    })
}

/// Every `<Count>` value of an esearch response, in document order.
///
/// For an `"a"AND"b"` query this is the joint count followed by one count
/// per translated term.
pub fn parse_counts(query: &str, xml: &str) -> Result<Vec<u64>> {
    let root = parse_for(query, xml)?;
    root.find_all("Count")
        .into_iter()
        .map(|el| parse_integer(query, "Count", el))
        .collect()
}

/// The `<Id>` values of an esearch response, in result order.
pub fn parse_ids(query: &str, xml: &str) -> Result<Vec<u64>> {
    let root = parse_for(query, xml)?;
    root.find_all("Id")
        .into_iter()
        .map(|el| parse_integer(query, "Id", el))
        .collect()
}

/// The `<PubmedArticle>` records of an efetch response, in batch order.
pub fn parse_articles(query: &str, xml: &str) -> Result<Vec<XmlElement>> {
    let root = parse_for(query, xml)?;
    Ok(root
        .find_all("PubmedArticle")
        .into_iter()
        .cloned()
        .collect())
}
