//! Bold run extraction.
//!
//! Walks the WordprocessingML event stream and keeps, for every run whose own
//! run properties switch bold on, the text of the first `w:t` in that run.
//!
//! Matching rules:
//!
//! - A run is the innermost open `w:r`. Runs nested through drawings or text
//!   boxes are tracked independently of the run that contains them.
//! - Only a `w:b` that is a direct child of a `w:rPr` that is itself a direct
//!   child of the run counts. Paragraph mark properties (`w:pPr/w:rPr`),
//!   revision history (`w:rPrChange`) and `w:bCs` are ignored.
//! - `w:val` of `0`, `false` or `off` turns bold off; any other value, or no
//!   value, turns it on. The last marker in the run properties wins.
//! - Only the first `w:t` of a bold run that is not self-closing is captured,
//!   trimmed. Whitespace-only text yields an empty string.

use crate::loader::XmlContent;
use quick_xml::events::{BytesStart, Event};

const RUN: &[u8] = b"w:r";
const RUN_PROPERTIES: &[u8] = b"w:rPr";
const BOLD: &[u8] = b"w:b";
const TEXT: &[u8] = b"w:t";
const VAL: &[u8] = b"w:val";

#[derive(Debug, Default)]
struct RunState {
    bold: bool,
    captured: bool,
}

/// Open element kinds the traversal cares about.
#[derive(Debug)]
enum Scope {
    Run(RunState),
    RunProperties,
    Text,
    Other,
}

/// Extract the text of every bold run, in document order.
///
/// Never fails: the content has already been validated, and a document with
/// no bold runs yields an empty vector.
///
/// # Example
///
/// ```
/// use boldx::extract::extract_bold;
/// use boldx::loader::XmlContent;
///
/// let xml = XmlContent::parse(
///     "<w:p><w:r><w:rPr><w:b/></w:rPr><w:t> Hello </w:t></w:r></w:p>",
/// )?;
/// assert_eq!(extract_bold(&xml), vec!["Hello"]);
/// # Ok::<(), boldx::Error>(())
/// ```
pub fn extract_bold(xml: &XmlContent) -> Vec<String> {
    let mut reader = quick_xml::Reader::from_str(xml.as_str());
    let mut scopes: Vec<Scope> = Vec::new();
    let mut capture: Option<String> = None;
    let mut fragments = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let scope = match e.name().as_ref() {
                    RUN => Scope::Run(RunState::default()),
                    RUN_PROPERTIES if matches!(scopes.last(), Some(Scope::Run(_))) => {
                        Scope::RunProperties
                    }
                    TEXT => match scopes.last() {
                        Some(Scope::Run(run)) => {
                            if run.bold && !run.captured {
                                capture = Some(String::new());
                            }
                            Scope::Text
                        }
                        _ => Scope::Other,
                    },
                    BOLD if matches!(scopes.last(), Some(Scope::RunProperties)) => {
                        apply_bold(&mut scopes, e);
                        Scope::Other
                    }
                    _ => Scope::Other,
                };
                scopes.push(scope);
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == BOLD && matches!(scopes.last(), Some(Scope::RunProperties))
                {
                    apply_bold(&mut scopes, e);
                }
            }
            Ok(Event::Text(ref e)) => {
                if let (Some(buf), Some(Scope::Text)) = (capture.as_mut(), scopes.last()) {
                    buf.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::CData(ref e)) => {
                if let (Some(buf), Some(Scope::Text)) = (capture.as_mut(), scopes.last()) {
                    buf.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::End(_)) => {
                if let Some(Scope::Text) = scopes.pop() {
                    if let Some(text) = capture.take() {
                        if let Some(Scope::Run(run)) = scopes.last_mut() {
                            run.captured = true;
                        }
                        let fragment = text.trim().to_string();
                        tracing::trace!("Bold fragment: {:?}", fragment);
                        fragments.push(fragment);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                // Unreachable for validated content; keep what was collected.
                tracing::warn!("Stopping bold scan early: {}", e);
                break;
            }
            _ => {}
        }
    }

    tracing::debug!("Extracted {} bold fragment(s)", fragments.len());
    fragments
}

/// Set the bold flag of the run that owns the open run properties.
fn apply_bold(scopes: &mut [Scope], marker: &BytesStart) {
    let len = scopes.len();
    if len >= 2 {
        if let Scope::Run(run) = &mut scopes[len - 2] {
            run.bold = is_on(marker);
        }
    }
}

/// Interpret a WML on/off toggle element. Absent `w:val` means on.
fn is_on(e: &BytesStart) -> bool {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == VAL {
            let val = attr.unescape_value().unwrap_or_default();
            return !matches!(val.as_ref(), "0" | "false" | "off");
        }
    }
    true
}
