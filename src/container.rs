//! ZIP container access for document packages.
//!
//! A `.docx` file is a ZIP archive whose parts are XML documents. This module
//! opens such an archive and hands back the decompressed bytes of a single
//! named entry.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::ops::Range;
use std::path::{Path, PathBuf};
use zip::result::ZipError;

/// Source label used in errors for archives that were not read from disk.
const MEMORY_SOURCE: &str = "<memory>";

/// Fetch the decompressed content of `entry` from the archive at `path`.
///
/// The archive is opened, read and released within this call, on the error
/// path as well as on success. Nothing is cached between calls.
///
/// # Example
///
/// ```no_run
/// use boldx::container::fetch_entry;
///
/// let xml = fetch_entry("report.docx", "word/document.xml")?;
/// println!("{} bytes", xml.len());
/// # Ok::<(), boldx::Error>(())
/// ```
pub fn fetch_entry(path: impl AsRef<Path>, entry: &str) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let container = Container::open(path)?;
    let data = container.read_binary(entry)?;
    tracing::debug!(
        "Fetched {} ({} bytes) from {}",
        entry,
        data.len(),
        path.display()
    );
    Ok(data)
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Byte order of a UTF-16 encoded part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Little,
    Big,
}

/// Decode an XML part to text.
///
/// Word writes UTF-8, but parts produced by other tools are occasionally
/// UTF-16, with or without a byte order mark. Decoded UTF-16 has its
/// declaration rewritten to `encoding="UTF-8"` to match the returned string.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return std::str::from_utf8(rest)
            .map(str::to_owned)
            .map_err(|e| Error::MalformedXml(format!("invalid UTF-8: {}", e)));
    }

    if let Some((order, payload)) = sniff_utf16(bytes) {
        return decode_utf16(payload, order).map(|text| declare_utf8(&text));
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_owned()),
        Err(e) => {
            tracing::warn!("XML part is not valid UTF-8 ({}), decoding lossily", e);
            Ok(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

/// Detect UTF-16 by its BOM, or by the NUL byte next to a leading `<`.
fn sniff_utf16(bytes: &[u8]) -> Option<(ByteOrder, &[u8])> {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => Some((ByteOrder::Little, rest)),
        [0xFE, 0xFF, rest @ ..] => Some((ByteOrder::Big, rest)),
        [b'<', 0, ..] => Some((ByteOrder::Little, bytes)),
        [0, b'<', ..] => Some((ByteOrder::Big, bytes)),
        _ => None,
    }
}

/// Decode UTF-16 code units. A trailing odd byte is dropped.
fn decode_utf16(bytes: &[u8], order: ByteOrder) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| {
        let pair = [pair[0], pair[1]];
        match order {
            ByteOrder::Little => u16::from_le_bytes(pair),
            ByteOrder::Big => u16::from_be_bytes(pair),
        }
    });

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::MalformedXml(format!("invalid UTF-16: {}", e)))
}

/// Replace a UTF-16 encoding label in the XML declaration with `UTF-8`.
fn declare_utf8(text: &str) -> String {
    let Some(value) = declared_encoding(text) else {
        return text.to_owned();
    };
    if !text[value.clone()].to_ascii_lowercase().starts_with("utf-16") {
        return text.to_owned();
    }

    let mut fixed = String::with_capacity(text.len());
    fixed.push_str(&text[..value.start]);
    fixed.push_str("UTF-8");
    fixed.push_str(&text[value.end..]);
    fixed
}

/// Byte range of the `encoding` value inside a leading XML declaration.
fn declared_encoding(text: &str) -> Option<Range<usize>> {
    if !text.starts_with("<?xml") {
        return None;
    }
    let decl = &text[..text.find("?>")?];
    let key = decl.find("encoding")? + "encoding".len();
    let eq = key + decl[key..].find('=')? + 1;
    let open = eq + decl[eq..].find(['"', '\''])?;
    let quote = decl[open..].chars().next()?;
    let start = open + 1;
    let end = start + decl[start..].find(quote)?;
    Some(start..end)
}

/// A ZIP document package opened for reading.
///
/// The archive is read fully into memory when opened, so the underlying file
/// handle is closed before any entry is accessed.
pub struct Container {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
    source: PathBuf,
}

impl Container {
    /// Open a container from a file path.
    ///
    /// Any failure to read the file or to recognize it as a ZIP archive is
    /// reported as [`Error::ContainerOpen`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::container_open(path, e))?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| Error::container_open(path, e))?;
        Self::with_source(data, path.to_path_buf())
    }

    /// Create a container from a byte vector. Errors name the source `<memory>`.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::with_source(data, PathBuf::from(MEMORY_SOURCE))
    }

    fn with_source(data: Vec<u8>, source: PathBuf) -> Result<Self> {
        let archive =
            zip::ZipArchive::new(Cursor::new(data)).map_err(|e| Error::container_open(&source, e))?;
        Ok(Self {
            archive: RefCell::new(archive),
            source,
        })
    }

    /// Read the decompressed bytes of an entry.
    pub fn read_binary(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = match archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Err(Error::EntryNotFound(name.to_string())),
            Err(e) => return Err(Error::container_open(&self.source, e)),
        };

        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| Error::container_open(&self.source, format!("{}: {}", name, e)))?;
        Ok(data)
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("source", &self.source)
            .field("entries", &self.archive.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    fn utf16_le(text: &str, bom: bool) -> Vec<u8> {
        let mut bytes = if bom { vec![0xFF, 0xFE] } else { Vec::new() };
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_read_binary() {
        let data = build_zip(&[
            ("[Content_Types].xml", b"<Types/>"),
            ("word/document.xml", b"<w:document/>"),
        ]);
        let container = Container::from_bytes(data).unwrap();

        assert_eq!(
            container.read_binary("word/document.xml").unwrap(),
            b"<w:document/>"
        );
        assert_eq!(container.read_binary("[Content_Types].xml").unwrap(), b"<Types/>");
        let debug = format!("{:?}", container);
        assert!(debug.contains("<memory>"));
        assert!(debug.contains("entries: 2"));
    }

    #[test]
    fn test_first_entry_is_found() {
        let data = build_zip(&[("word/document.xml", b"<a/>")]);
        let container = Container::from_bytes(data).unwrap();
        assert_eq!(container.read_binary("word/document.xml").unwrap(), b"<a/>");
    }

    #[test]
    fn test_missing_entry() {
        let data = build_zip(&[("[Content_Types].xml", b"<Types/>")]);
        let container = Container::from_bytes(data).unwrap();
        let err = container.read_binary("word/document.xml").unwrap_err();
        assert!(matches!(err, Error::EntryNotFound(ref name) if name == "word/document.xml"));
    }

    #[test]
    fn test_not_a_zip() {
        let err = Container::from_bytes(b"plain text, not an archive".to_vec()).unwrap_err();
        assert!(matches!(err, Error::ContainerOpen { ref path, .. } if path == Path::new("<memory>")));
    }

    #[test]
    fn test_fetch_entry_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.docx");
        std::fs::write(&path, build_zip(&[("word/document.xml", b"<doc/>")])).unwrap();

        assert_eq!(fetch_entry(&path, "word/document.xml").unwrap(), b"<doc/>");
        assert!(matches!(
            fetch_entry(&path, "word/missing.xml"),
            Err(Error::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_fetch_entry_missing_container() {
        let dir = tempfile::tempdir().unwrap();
        let err = fetch_entry(dir.path().join("absent.docx"), "word/document.xml").unwrap_err();
        assert!(matches!(err, Error::ContainerOpen { .. }));
    }

    #[test]
    fn test_decode_xml_bytes() {
        let utf16_le = b"\xFF\xFE<\0?\0x\0m\0l\0>\0";
        assert_eq!(decode_xml_bytes(utf16_le).unwrap(), "<?xml>");

        let utf16_be = b"\xFE\xFF\0<\0?\0x\0m\0l\0>";
        assert_eq!(decode_xml_bytes(utf16_be).unwrap(), "<?xml>");

        let utf8_bom = b"\xEF\xBB\xBF<?xml>";
        assert_eq!(decode_xml_bytes(utf8_bom).unwrap(), "<?xml>");

        assert_eq!(decode_xml_bytes(b"<?xml>").unwrap(), "<?xml>");
    }

    #[test]
    fn test_utf16_without_bom() {
        assert_eq!(decode_xml_bytes(&utf16_le("<a/>", false)).unwrap(), "<a/>");
        assert_eq!(decode_xml_bytes(b"\0<\0a\0/\0>").unwrap(), "<a/>");
    }

    #[test]
    fn test_utf16_declaration_rewritten() {
        for label in ["\"UTF-16\"", "'utf-16'", "\"UTF-16LE\"", "\"Utf-16\""] {
            let xml = format!("<?xml version=\"1.0\" encoding = {}?><a/>", label);
            let quote = &label[..1];
            let decoded = decode_xml_bytes(&utf16_le(&xml, true)).unwrap();
            assert_eq!(
                decoded,
                format!("<?xml version=\"1.0\" encoding = {q}UTF-8{q}?><a/>", q = quote)
            );
        }
    }

    #[test]
    fn test_declaration_outside_prolog_untouched() {
        let xml = "<a>encoding=\"UTF-16\"</a>";
        assert_eq!(decode_xml_bytes(&utf16_le(xml, true)).unwrap(), xml);

        let xml = "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><a/>";
        assert_eq!(decode_xml_bytes(&utf16_le(xml, true)).unwrap(), xml);
    }

    #[test]
    fn test_invalid_utf16() {
        // Lone high surrogate
        let bytes = b"\xFF\xFE\x00\xD8";
        assert!(matches!(
            decode_xml_bytes(bytes),
            Err(Error::MalformedXml(_))
        ));
    }

    #[test]
    fn test_invalid_utf8_decoded_lossily() {
        assert_eq!(decode_xml_bytes(b"<a>\xFF</a>").unwrap(), "<a>\u{FFFD}</a>");
    }
}
