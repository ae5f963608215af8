//! XML diff protocol parsing
//!
//! A directive looks like:
//!
//! ```xml
//! <file path="/abs/path/to/file.rs" action="modify_file">
//!   <change>
//!     <description>optional free text</description>
//!     <search>exact text to find</search>
//!     <content>replacement text</content>
//!   </change>
//! </file>
//! ```
//!
//! The document is first read into a small element tree, then the tree is
//! checked against the grammar above. Structure errors are reported as
//! [`EditError::InvalidDirective`]; anything the XML reader rejects is
//! [`EditError::MalformedXml`].

use crate::error::{EditError, EditResult};
use crate::mutator::concatenate_contents;
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

const FILE_TAG: &str = "file";
const CHANGE_TAG: &str = "change";
const DESCRIPTION_TAG: &str = "description";
const SEARCH_TAG: &str = "search";
const CONTENT_TAG: &str = "content";

/// The mutating operations a directive can describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreateFile,
    ModifyFile,
    RewriteFile,
}

impl Action {
    /// Wire name used in the `action` attribute and as the tool name
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CreateFile => "create_file",
            Action::ModifyFile => "modify_file",
            Action::RewriteFile => "rewrite_file",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create_file" => Ok(Action::CreateFile),
            "modify_file" => Ok(Action::ModifyFile),
            "rewrite_file" => Ok(Action::RewriteFile),
            other => Err(EditError::invalid_directive(format!(
                "unknown action '{other}', expected one of create_file, modify_file, rewrite_file"
            ))),
        }
    }
}

/// One `<change>` block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Change {
    /// Informational only
    pub description: Option<String>,
    pub search: Option<String>,
    pub content: Option<String>,
}

/// A parsed directive
///
/// `path` is the path as written in the XML; it is resolved and compared to
/// the requested path by [`crate::validator::validate_directive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub action: Action,
    pub path: PathBuf,
    pub changes: Vec<Change>,
}

impl Directive {
    /// Parse directive XML
    pub fn parse(xml: &str) -> EditResult<Self> {
        let root = parse_tree(xml)?;

        if root.name != FILE_TAG {
            return Err(EditError::invalid_directive(format!(
                "root element must be <{FILE_TAG}>, found <{}>",
                root.name
            )));
        }

        let path = root
            .attribute("path")
            .filter(|path| !path.trim().is_empty())
            .ok_or_else(|| EditError::invalid_directive("missing required attribute 'path'"))?;
        let action: Action = root
            .attribute("action")
            .ok_or_else(|| EditError::invalid_directive("missing required attribute 'action'"))?
            .parse()?;

        let mut changes = Vec::new();
        for child in root.child_elements()? {
            if child.name != CHANGE_TAG {
                return Err(EditError::invalid_directive(format!(
                    "unexpected element <{}> inside <{FILE_TAG}>",
                    child.name
                )));
            }
            changes.push(parse_change(child)?);
        }

        Ok(Self {
            action,
            path: PathBuf::from(path.trim()),
            changes,
        })
    }

    /// Build whole-file content from the changes, in document order
    ///
    /// Fails with [`EditError::EmptyContent`] when nothing is left after trimming.
    pub fn content(&self) -> EditResult<String> {
        let content =
            concatenate_contents(self.changes.iter().filter_map(|c| c.content.as_deref()));
        if content.is_empty() {
            return Err(EditError::EmptyContent);
        }
        Ok(content)
    }

    /// Search to replacement mapping for `modify_file`
    ///
    /// Both sides are trimmed. A repeated search key keeps its first position
    /// and takes the last replacement.
    pub fn replacements(&self) -> EditResult<IndexMap<String, String>> {
        if self.changes.is_empty() {
            return Err(EditError::EmptyContent);
        }

        let mut replacements = IndexMap::new();
        for (index, change) in self.changes.iter().enumerate() {
            let search = non_empty_trimmed(change.search.as_deref()).ok_or_else(|| {
                EditError::invalid_directive(format!(
                    "change {} requires a non-empty <{SEARCH_TAG}>",
                    index + 1
                ))
            })?;
            let content = non_empty_trimmed(change.content.as_deref()).ok_or_else(|| {
                EditError::invalid_directive(format!(
                    "change {} requires a non-empty <{CONTENT_TAG}>",
                    index + 1
                ))
            })?;
            replacements.insert(search.to_string(), content.to_string());
        }
        Ok(replacements)
    }
}

fn non_empty_trimmed(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

fn parse_change(element: &Element) -> EditResult<Change> {
    let mut change = Change::default();
    for child in element.child_elements()? {
        let slot = match child.name.as_str() {
            DESCRIPTION_TAG => &mut change.description,
            SEARCH_TAG => &mut change.search,
            CONTENT_TAG => &mut change.content,
            other => {
                return Err(EditError::invalid_directive(format!(
                    "unexpected element <{other}> inside <{CHANGE_TAG}>"
                )))
            }
        };
        if slot.is_some() {
            return Err(EditError::invalid_directive(format!(
                "duplicate <{}> inside <{CHANGE_TAG}>",
                child.name
            )));
        }
        *slot = Some(child.text()?);
    }
    Ok(change)
}

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> EditResult<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| EditError::malformed(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| EditError::malformed(e.to_string()))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements of a container; only whitespace may sit between them
    fn child_elements(&self) -> EditResult<Vec<&Element>> {
        let mut elements = Vec::new();
        for node in &self.children {
            match node {
                Node::Element(element) => elements.push(element),
                Node::Text(text) if text.trim().is_empty() => {}
                Node::Text(text) => {
                    return Err(EditError::invalid_directive(format!(
                        "unexpected text '{}' inside <{}>",
                        text.trim(),
                        self.name
                    )))
                }
            }
        }
        Ok(elements)
    }

    /// Text of a leaf element; nested markup is not allowed
    fn text(&self) -> EditResult<String> {
        let mut text = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) => text.push_str(t),
                Node::Element(nested) => {
                    return Err(EditError::invalid_directive(format!(
                        "<{}> must contain text only, found <{}>",
                        self.name, nested.name
                    )))
                }
            }
        }
        Ok(text)
    }
}

/// Read the document into a tree, enforcing a single root element
fn parse_tree(xml: &str) -> EditResult<Element> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            EditError::malformed(format!("{e} at position {}", reader.buffer_position()))
        })?;

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(EditError::malformed("document has more than one root element"));
                }
                stack.push(Element::from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| EditError::malformed("unexpected closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| EditError::malformed(e.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(cdata) => {
                let bytes = cdata.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&bytes))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(EditError::malformed(format!(
            "element <{}> is never closed",
            open.name
        )));
    }
    root.ok_or_else(|| EditError::malformed("document has no root element"))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> EditResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
    } else if root.is_some() {
        return Err(EditError::malformed("document has more than one root element"));
    } else {
        *root = Some(element);
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> EditResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Text(text.to_string()));
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(EditError::malformed("text found outside the root element")),
    }
}
