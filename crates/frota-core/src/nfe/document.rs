//! NF-e document loading.
//!
//! The loader builds a navigable element tree from raw bytes and resolves
//! the working namespace exactly once, from the root element. Every lookup
//! in the same document is threaded through that single namespace; a
//! document whose root is not in any namespace degrades to the empty
//! namespace and lookups still resolve.

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use super::Result;
use crate::error::ExtractionError;

/// A single element in a parsed document tree.
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    namespace: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn open(resolve: &ResolveResult<'_>, local: &[u8]) -> Self {
        let namespace = match resolve {
            ResolveResult::Bound(Namespace(ns)) => String::from_utf8_lossy(ns).into_owned(),
            _ => String::new(),
        };

        Self {
            name: String::from_utf8_lossy(local).into_owned(),
            namespace,
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Local element name, without any namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace URI the element resolved to; empty when unbound.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Trimmed text content; `None` when the element holds no text.
    pub fn text(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Direct child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    fn matches(&self, ns: &str, name: &str) -> bool {
        self.name == name && self.namespace == ns
    }

    /// First descendant (depth-first, document order) matching the
    /// threaded namespace and local name.
    pub fn find(&self, ns: &str, name: &str) -> Option<&Element> {
        for child in &self.children {
            if child.matches(ns, name) {
                return Some(child);
            }
            if let Some(found) = child.find(ns, name) {
                return Some(found);
            }
        }
        None
    }

    fn collect_all<'a>(&'a self, ns: &str, name: &str, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.matches(ns, name) {
                out.push(child);
            }
            child.collect_all(ns, name, out);
        }
    }
}

/// A parsed NF-e document with its namespace resolved once at load time.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
    namespace: String,
}

impl Document {
    /// Parse raw bytes into a document tree.
    ///
    /// Fails with [`ExtractionError::MalformedDocument`] when the content
    /// is not well-formed XML; never panics on bad input.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let mut reader = NsReader::from_reader(raw);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_resolved_event() {
                Ok((resolve, Event::Start(start))) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(ExtractionError::MalformedDocument(
                            "junk after document element".to_string(),
                        ));
                    }
                    stack.push(Element::open(&resolve, start.local_name().as_ref()));
                }
                Ok((resolve, Event::Empty(start))) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(ExtractionError::MalformedDocument(
                            "junk after document element".to_string(),
                        ));
                    }
                    let element = Element::open(&resolve, start.local_name().as_ref());
                    Self::close(&mut stack, &mut root, element);
                }
                Ok((_, Event::Text(text))) => {
                    let value = text
                        .unescape()
                        .map_err(|e| ExtractionError::MalformedDocument(e.to_string()))?;
                    match stack.last_mut() {
                        Some(current) => current.text.push_str(&value),
                        None if value.trim().is_empty() => {}
                        None => {
                            return Err(ExtractionError::MalformedDocument(
                                "text outside the root element".to_string(),
                            ));
                        }
                    }
                }
                Ok((_, Event::CData(data))) => {
                    match stack.last_mut() {
                        Some(current) => current
                            .text
                            .push_str(&String::from_utf8_lossy(&data.into_inner())),
                        None => {
                            return Err(ExtractionError::MalformedDocument(
                                "character data outside the root element".to_string(),
                            ));
                        }
                    }
                }
                Ok((_, Event::End(_))) => {
                    let element = stack.pop().ok_or_else(|| {
                        ExtractionError::MalformedDocument("unexpected closing tag".to_string())
                    })?;
                    Self::close(&mut stack, &mut root, element);
                }
                Ok((_, Event::Eof)) => break,
                Ok(_) => {}
                Err(e) => return Err(ExtractionError::MalformedDocument(e.to_string())),
            }
        }

        if !stack.is_empty() {
            return Err(ExtractionError::MalformedDocument(
                "unclosed element at end of input".to_string(),
            ));
        }

        let root = root.ok_or_else(|| {
            ExtractionError::MalformedDocument("document has no root element".to_string())
        })?;
        let namespace = root.namespace.clone();

        Ok(Self { root, namespace })
    }

    // A closing element with an empty stack can only be the root; second
    // top-level elements are rejected before they are opened.
    fn close(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => *root = Some(element),
        }
    }

    /// Namespace derived from the root element.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Root element of the document.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// First element matching `name` anywhere in the tree.
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.root.matches(&self.namespace, name) {
            return Some(&self.root);
        }
        self.root.find(&self.namespace, name)
    }

    /// Every element matching `name` anywhere in the tree, in document
    /// order.
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        if self.root.matches(&self.namespace, name) {
            out.push(&self.root);
        }
        self.root.collect_all(&self.namespace, name, &mut out);
        out
    }

    /// Subtree lookup threaded with the document namespace.
    pub fn find_in<'a>(&self, scope: &'a Element, name: &str) -> Option<&'a Element> {
        scope.find(&self.namespace, name)
    }
}
