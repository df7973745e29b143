//! Test doubles for the two external dependencies.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::extraction::decoder::{DecodeError, PageDecoder};
use crate::llm_client::{ChatBackend, ChatRequest, LlmError};

/// Replies from a fixed script and records every request it receives.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedBackend {
    pub fn sequence(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::sequence(vec![Ok(text.to_string())])
    }

    pub fn failing(error: LlmError) -> Self {
        Self::sequence(vec![Err(error)])
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Malformed("no scripted reply left".to_string())))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum DecoderMode {
    #[default]
    Working,
    PathOnly,
    Broken,
}

/// Treats the input as UTF-8 with pages separated by form feeds (`\x0c`).
#[derive(Default)]
pub struct FakeDecoder {
    mode: DecoderMode,
    paths: Mutex<Vec<PathBuf>>,
}

impl FakeDecoder {
    /// In-memory decoding always fails; path decoding works.
    pub fn path_only() -> Self {
        Self {
            mode: DecoderMode::PathOnly,
            ..Self::default()
        }
    }

    pub fn broken() -> Self {
        Self {
            mode: DecoderMode::Broken,
            ..Self::default()
        }
    }

    pub fn used_paths(&self) -> Vec<PathBuf> {
        self.paths.lock().unwrap().clone()
    }

    fn split(bytes: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(bytes)
            .split('\x0c')
            .map(str::to_string)
            .collect()
    }
}

impl PageDecoder for FakeDecoder {
    fn decode_bytes(&self, bytes: &[u8]) -> Result<Vec<String>, DecodeError> {
        match self.mode {
            DecoderMode::Working => Ok(Self::split(bytes)),
            DecoderMode::PathOnly | DecoderMode::Broken => {
                Err(DecodeError::Decode("buffer input not supported".to_string()))
            }
        }
    }

    fn decode_path(&self, path: &Path) -> Result<Vec<String>, DecodeError> {
        self.paths.lock().unwrap().push(path.to_path_buf());
        match self.mode {
            DecoderMode::Broken => Err(DecodeError::Panicked),
            DecoderMode::Working | DecoderMode::PathOnly => Ok(Self::split(&std::fs::read(path)?)),
        }
    }
}

/// Builds a minimal PDF with one line of Helvetica text per page.
#[cfg(feature = "pdf")]
pub fn sample_pdf(pages: &[&str]) -> Vec<u8> {
    let font_id = 3 + 2 * pages.len();
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            (0..pages.len())
                .map(|i| format!("{} 0 R", 3 + 2 * i))
                .collect::<Vec<_>>()
                .join(" "),
            pages.len()
        ),
    ];
    for (i, text) in pages.iter().enumerate() {
        let content = format!("BT /F1 24 Tf 72 720 Td ({text}) Tj ET");
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {} 0 R >>",
            4 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }
    let xref_at = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.extend_from_slice(xref.as_bytes());
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    pdf
}
