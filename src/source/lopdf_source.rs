//! [`DocumentSource`] backed by `lopdf`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object};

use super::{DocumentSource, SourceOpener};
use crate::error::{Error, Result};
use crate::text::repair_extracted;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Check whether a file starts with the PDF header.
pub fn has_pdf_header<P: AsRef<Path>>(path: P) -> Result<bool> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(PDF_MAGIC.len());
    BufReader::new(file)
        .take(PDF_MAGIC.len() as u64)
        .read_to_end(&mut header)?;
    Ok(header == PDF_MAGIC)
}

/// Decode a PDF text string: UTF-16BE with BOM, else UTF-8, else Latin-1.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// A PDF loaded with `lopdf`.
pub struct LopdfSource {
    doc: LopdfDocument,
    /// 1-based lopdf page numbers in document order
    page_numbers: Vec<u32>,
}

impl LopdfSource {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !has_pdf_header(path)? {
            return Err(Error::UnknownFormat);
        }
        let doc = LopdfDocument::load(path)?;
        Ok(Self::from_document(doc))
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        if !data.starts_with(PDF_MAGIC) {
            return Err(Error::UnknownFormat);
        }
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: LopdfDocument) -> Self {
        let page_numbers = doc.get_pages().keys().copied().collect();
        Self { doc, page_numbers }
    }

    /// PDF version string (e.g. "1.7").
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }
}

impl DocumentSource for LopdfSource {
    fn metadata_title(&self) -> Result<Option<String>> {
        let info = match self.doc.trailer.get(b"Info") {
            Ok(info) => info,
            Err(_) => return Ok(None),
        };
        let dict = match info {
            Object::Reference(r) => self.doc.get_dictionary(*r)?,
            Object::Dictionary(d) => d,
            _ => return Ok(None),
        };

        Ok(match dict.get(b"Title") {
            Ok(Object::String(bytes, _)) => Some(decode_text_string(bytes)),
            Ok(Object::Name(bytes)) => Some(decode_text_string(bytes)),
            _ => None,
        })
    }

    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<Option<String>> {
        let page_num = *self
            .page_numbers
            .get(index)
            .ok_or(Error::PageOutOfRange(index, self.page_numbers.len()))?;

        let text = self
            .doc
            .extract_text(&[page_num])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", index, e)))?;

        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(repair_extracted(&text)))
    }
}

/// Opens files with [`LopdfSource::load_file`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfOpener;

impl SourceOpener for LopdfOpener {
    type Source = LopdfSource;

    fn open(&self, path: &Path) -> Result<LopdfSource> {
        LopdfSource::load_file(path)
    }
}
