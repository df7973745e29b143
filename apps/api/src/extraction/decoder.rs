//! Page decoders: the black box that turns PDF bytes into per-page text.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("PDF decode failed: {0}")]
    Decode(String),

    #[error("PDF decoder panicked (malformed document)")]
    Panicked,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Decodes a PDF into one string per page, in page order.
///
/// Implementations may support only one of the two entry points; the
/// extractor falls back from bytes to path.
pub trait PageDecoder: Send + Sync {
    fn decode_bytes(&self, bytes: &[u8]) -> Result<Vec<String>, DecodeError>;

    fn decode_path(&self, path: &Path) -> Result<Vec<String>, DecodeError>;
}

/// `pdf-extract` backed decoder.
///
/// `pdf-extract` can panic on malformed input instead of returning an
/// error, so every call runs inside `catch_unwind`.
#[cfg(feature = "pdf")]
pub struct PdfExtractDecoder;

#[cfg(feature = "pdf")]
impl PageDecoder for PdfExtractDecoder {
    fn decode_bytes(&self, bytes: &[u8]) -> Result<Vec<String>, DecodeError> {
        guarded(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
    }

    fn decode_path(&self, path: &Path) -> Result<Vec<String>, DecodeError> {
        guarded(|| pdf_extract::extract_text_by_pages(path))
    }
}

#[cfg(feature = "pdf")]
fn guarded<F>(decode: F) -> Result<Vec<String>, DecodeError>
where
    F: FnOnce() -> Result<Vec<String>, pdf_extract::OutputError>,
{
    use std::panic::{self, AssertUnwindSafe};

    match panic::catch_unwind(AssertUnwindSafe(decode)) {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(DecodeError::Decode(e.to_string())),
        Err(_) => Err(DecodeError::Panicked),
    }
}
