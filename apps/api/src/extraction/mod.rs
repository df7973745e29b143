//! Turns an uploaded PDF into plain text.
//!
//! Decoding is tried on the in-memory buffer first. Some decoders only cope
//! with real files, so on any fault the bytes are written to a uniquely named
//! temporary file and decoded again by path. The temp file is removed when it
//! goes out of scope, before `extract` returns.
//!
//! Decoder faults (errors and panics alike) never leave this module: a failed
//! extraction is an [`ExtractedText`] with `error` set.

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::capability::{Capability, CapabilityStatus};
use crate::models::document::{ExtractedText, RawDocument};

pub mod decoder;

use decoder::{DecodeError, PageDecoder};

/// Looks up the PDF decoder compiled into this binary.
pub fn probe_decoder() -> Capability<Arc<dyn PageDecoder>> {
    #[cfg(feature = "pdf")]
    {
        let decoder: Arc<dyn PageDecoder> = Arc::new(decoder::PdfExtractDecoder);
        Capability::Available(decoder)
    }
    #[cfg(not(feature = "pdf"))]
    {
        Capability::Unavailable("built without the `pdf` feature".to_string())
    }
}

pub struct TextExtractor {
    decoder: Capability<Arc<dyn PageDecoder>>,
}

impl TextExtractor {
    pub fn new(decoder: Capability<Arc<dyn PageDecoder>>) -> Self {
        Self { decoder }
    }

    pub fn status(&self) -> CapabilityStatus {
        self.decoder.status()
    }

    /// Blocking. Call from `spawn_blocking` inside async handlers.
    pub fn extract(&self, document: &RawDocument) -> ExtractedText {
        let decoder = match &self.decoder {
            Capability::Available(decoder) => decoder.as_ref(),
            Capability::Unavailable(reason) => {
                return ExtractedText::failed(format!("PDF extraction is unavailable: {reason}"));
            }
        };

        match decoder.decode_bytes(&document.content) {
            Ok(pages) => {
                debug!("Decoded '{}' in memory: {} pages", document.filename, pages.len());
                return ExtractedText::from_pages(pages);
            }
            Err(e) => warn!(
                "In-memory decode of '{}' failed ({e}); retrying from a temporary file",
                document.filename
            ),
        }

        match decode_via_temp_file(decoder, document) {
            Ok(pages) => {
                debug!("Decoded '{}' from temp file: {} pages", document.filename, pages.len());
                ExtractedText::from_pages(pages)
            }
            Err(e) => {
                warn!("Text extraction of '{}' failed: {e}", document.filename);
                ExtractedText::failed(format!("Could not read text from '{}': {e}", document.filename))
            }
        }
    }
}

fn decode_via_temp_file(
    decoder: &dyn PageDecoder,
    document: &RawDocument,
) -> Result<Vec<String>, DecodeError> {
    let suffix = document.suffix();
    let mut file = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(&suffix)
        .tempfile()?;
    file.write_all(&document.content)?;
    file.flush()?;

    decoder.decode_path(file.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDecoder;

    fn extractor(decoder: Arc<FakeDecoder>) -> TextExtractor {
        let decoder: Arc<dyn PageDecoder> = decoder;
        TextExtractor::new(Capability::Available(decoder))
    }

    #[test]
    fn test_primary_path_joins_pages_in_order() {
        let fake = Arc::new(FakeDecoder::default());
        let doc = RawDocument::new("cv.pdf", "Jane Doe\x0c\x0cRust engineer\x0cReferences");

        let extracted = extractor(fake.clone()).extract(&doc);

        assert_eq!(extracted.text, "Jane Doe\nRust engineer\nReferences");
        assert!(extracted.error.is_none());
        assert!(fake.used_paths().is_empty());
    }

    #[test]
    fn test_fallback_matches_direct_path_decode() {
        let fake = Arc::new(FakeDecoder::path_only());
        let doc = RawDocument::new("cv.pdf", "Page one\x0cPage two");

        let extracted = extractor(fake.clone()).extract(&doc);

        let dir = tempfile::tempdir().unwrap();
        let direct_path = dir.path().join("direct.pdf");
        std::fs::write(&direct_path, &doc.content).unwrap();
        let direct = ExtractedText::from_pages(fake.decode_path(&direct_path).unwrap());

        assert_eq!(extracted, direct);
        assert_eq!(extracted.text, "Page one\nPage two");
    }

    #[test]
    fn test_fallback_temp_file_is_removed_and_keeps_suffix() {
        let fake = Arc::new(FakeDecoder::path_only());
        let doc = RawDocument::new("resume.pdf", "only page");

        extractor(fake.clone()).extract(&doc);

        let paths = fake.used_paths();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].to_string_lossy().ends_with(".pdf"));
        assert!(!paths[0].exists());
    }

    #[test]
    fn test_both_paths_failing_sets_error() {
        let fake = Arc::new(FakeDecoder::broken());
        let doc = RawDocument::new("corrupt.pdf", "garbage");

        let extracted = extractor(fake).extract(&doc);

        assert!(extracted.error.is_some());
        assert!(extracted.text.is_empty());
        assert!(extracted.error.unwrap().contains("corrupt.pdf"));
    }

    #[test]
    fn test_unavailable_decoder_fails_visibly() {
        let extractor = TextExtractor::new(Capability::Unavailable("no backend".to_string()));
        let extracted = extractor.extract(&RawDocument::new("cv.pdf", "x"));
        assert!(extracted.error.is_some());
        assert!(extracted.error.unwrap().contains("no backend"));
    }

    #[cfg(feature = "pdf")]
    mod real_decoder {
        use std::path::Path;
        use std::sync::Arc;

        use crate::capability::Capability;
        use crate::extraction::decoder::{DecodeError, PageDecoder, PdfExtractDecoder};
        use crate::extraction::{probe_decoder, TextExtractor};
        use crate::models::document::RawDocument;
        use crate::testing::sample_pdf;

        /// Real decoder that refuses in-memory input, forcing the temp-file
        /// route.
        struct PathOnlyPdf;

        impl PageDecoder for PathOnlyPdf {
            fn decode_bytes(&self, _bytes: &[u8]) -> Result<Vec<String>, DecodeError> {
                Err(DecodeError::Decode("buffer input not supported".to_string()))
            }

            fn decode_path(&self, path: &Path) -> Result<Vec<String>, DecodeError> {
                PdfExtractDecoder.decode_path(path)
            }
        }

        fn doc() -> RawDocument {
            RawDocument::new("cv.pdf", sample_pdf(&["FirstPage", "SecondPage", "ThirdPage"]))
        }

        #[test]
        fn test_in_memory_extraction_of_multi_page_pdf() {
            let extracted = TextExtractor::new(probe_decoder()).extract(&doc());

            assert!(extracted.error.is_none());
            assert_eq!(extracted.text, "FirstPage\nSecondPage\nThirdPage");
        }

        #[test]
        fn test_temp_file_extraction_matches_in_memory() {
            let decoder: Arc<dyn PageDecoder> = Arc::new(PathOnlyPdf);
            let via_file = TextExtractor::new(Capability::Available(decoder)).extract(&doc());
            let in_memory = TextExtractor::new(probe_decoder()).extract(&doc());

            assert!(via_file.error.is_none());
            assert_eq!(via_file, in_memory);
        }
    }
}
