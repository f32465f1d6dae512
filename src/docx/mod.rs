//! Word (.docx) parser variant.
//!
//! Extracts the text of bold runs from `word/document.xml`.

use crate::extract::extract_bold;
use crate::loader::{XmlContent, DOCUMENT_XML};
use crate::parser::ParserVariant;

/// Bold text extraction for Word documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocxBold;

impl ParserVariant for DocxBold {
    fn expected_extension(&self) -> &str {
        "docx"
    }

    fn body_entry(&self) -> &str {
        DOCUMENT_XML
    }

    fn extract_fragments(&self, xml: &XmlContent) -> Vec<String> {
        extract_bold(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_variant() {
        assert_eq!(DocxBold.expected_extension(), "docx");
        assert_eq!(DocxBold.body_entry(), "word/document.xml");

        let xml = XmlContent::parse(
            "<w:document><w:body><w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Bold</w:t></w:r></w:p></w:body></w:document>",
        )
        .unwrap();
        assert_eq!(DocxBold.extract_fragments(&xml), vec!["Bold"]);
    }
}
