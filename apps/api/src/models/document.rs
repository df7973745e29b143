use std::path::Path;

use bytes::Bytes;

/// An uploaded file as received from the multipart form.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub filename: String,
    pub content: Bytes,
}

impl RawDocument {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Extension of the original filename including the dot, `.pdf` if none.
    pub fn suffix(&self) -> String {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_else(|| ".pdf".to_string())
    }
}

/// Text pulled out of a [`RawDocument`].
///
/// An empty `text` with `error == None` means the PDF decoded but carried no
/// text (e.g. a scanned image). `error` is set only when extraction itself
/// failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub error: Option<String>,
}

impl ExtractedText {
    /// Joins page texts in order. Blank pages contribute nothing.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for page in pages {
            let page = page.as_ref().trim();
            if page.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(page);
        }
        Self { text, error: None }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            error: Some(reason.into()),
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
