//! Loading of the document body XML.

use crate::container::{decode_xml_bytes, fetch_entry};
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// Name of the main document part inside a WordprocessingML package.
pub const DOCUMENT_XML: &str = "word/document.xml";

/// Decoded XML text that has been checked for well-formedness.
///
/// The only way to build one is [`XmlContent::parse`], so holders can walk
/// the event stream without handling reader errors again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlContent {
    text: String,
    root: String,
}

impl XmlContent {
    /// Validate `text` as XML and wrap it.
    ///
    /// Requires a single root element with only whitespace around it,
    /// balanced and matching tags, well-formed attributes, and valid
    /// character and entity references in text and attribute values.
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let root = validate(&text)?;
        Ok(Self { text, root })
    }

    /// Decode raw part bytes and validate them.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::parse(decode_xml_bytes(bytes)?)
    }

    /// The XML text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Qualified name of the root element (e.g. `w:document`).
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Consume and return the XML text.
    pub fn into_string(self) -> String {
        self.text
    }
}

/// Walk the whole document once, returning the root element name.
fn validate(text: &str) -> Result<String> {
    let mut reader = quick_xml::Reader::from_str(text);
    let mut depth = 0usize;
    let mut root: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                check_attributes(&e)?;
                if depth == 0 {
                    check_single_root(&root)?;
                    root = Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => {
                check_attributes(&e)?;
                if depth == 0 {
                    check_single_root(&root)?;
                    root = Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Text(e)) => {
                let content = e.unescape()?;
                if depth == 0 && !content.trim().is_empty() {
                    return Err(Error::MalformedXml(format!(
                        "text outside the root element (at byte {})",
                        reader.buffer_position()
                    )));
                }
            }
            Ok(Event::CData(_)) if depth == 0 => {
                return Err(Error::MalformedXml(
                    "CDATA outside the root element".to_string(),
                ))
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::MalformedXml(format!(
                    "{} (at byte {})",
                    e,
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    if depth > 0 {
        return Err(Error::MalformedXml(format!(
            "unexpected end of document, {} element(s) left open",
            depth
        )));
    }

    root.ok_or_else(|| Error::MalformedXml("no root element".to_string()))
}

/// Reject unquoted, valueless or duplicate attributes and bad references in values.
fn check_attributes(e: &BytesStart) -> Result<()> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| {
            Error::MalformedXml(format!(
                "bad attribute on <{}>: {}",
                String::from_utf8_lossy(e.name().as_ref()),
                err
            ))
        })?;
        attr.unescape_value()?;
    }
    Ok(())
}

fn check_single_root(root: &Option<String>) -> Result<()> {
    match root {
        Some(name) => Err(Error::MalformedXml(format!(
            "content after root element <{}>",
            name
        ))),
        None => Ok(()),
    }
}

/// Fetch `entry` from the package at `path` and validate it as XML.
pub fn load_entry(path: impl AsRef<Path>, entry: &str) -> Result<XmlContent> {
    let bytes = fetch_entry(path, entry)?;
    let xml = XmlContent::from_bytes(&bytes)?;
    tracing::debug!("Loaded {} with root <{}>", entry, xml.root());
    Ok(xml)
}

/// Load the main document body (`word/document.xml`).
///
/// # Example
///
/// ```no_run
/// use boldx::loader::load_body;
///
/// let xml = load_body("report.docx")?;
/// assert_eq!(xml.root(), "w:document");
/// # Ok::<(), boldx::Error>(())
/// ```
pub fn load_body(path: impl AsRef<Path>) -> Result<XmlContent> {
    load_entry(path, DOCUMENT_XML)
}
