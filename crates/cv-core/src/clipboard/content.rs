use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Shape of a captured clipboard payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    Text,
    Image,
    FilePaths,
    Html,
    Rtf,
    Unknown,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "Text",
            ContentKind::Image => "Image",
            ContentKind::FilePaths => "FilePaths",
            ContentKind::Html => "Html",
            ContentKind::Rtf => "Rtf",
            ContentKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Text" => Ok(ContentKind::Text),
            "Image" => Ok(ContentKind::Image),
            "FilePaths" => Ok(ContentKind::FilePaths),
            "Html" => Ok(ContentKind::Html),
            "Rtf" => Ok(ContentKind::Rtf),
            "Unknown" => Ok(ContentKind::Unknown),
            other => Err(anyhow::anyhow!("unknown content kind: {other}")),
        }
    }
}

/// One clipboard payload as delivered by the monitor.
///
/// Only the fields matching `kind` are populated by the constructors; the
/// hasher and the capture pipeline ignore everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardContentRecord {
    pub kind: ContentKind,
    pub text: Option<String>,
    pub image_bytes: Option<Vec<u8>>,
    pub file_paths: Option<Vec<String>>,
    pub source_application: Option<String>,
    pub captured_at_ms: i64,
}

impl ClipboardContentRecord {
    fn empty(kind: ContentKind, captured_at_ms: i64) -> Self {
        Self {
            kind,
            text: None,
            image_bytes: None,
            file_paths: None,
            source_application: None,
            captured_at_ms,
        }
    }

    pub fn text(text: impl Into<String>, captured_at_ms: i64) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::empty(ContentKind::Text, captured_at_ms)
        }
    }

    pub fn html(html: impl Into<String>, captured_at_ms: i64) -> Self {
        Self {
            text: Some(html.into()),
            ..Self::empty(ContentKind::Html, captured_at_ms)
        }
    }

    pub fn rtf(rtf: impl Into<String>, captured_at_ms: i64) -> Self {
        Self {
            text: Some(rtf.into()),
            ..Self::empty(ContentKind::Rtf, captured_at_ms)
        }
    }

    pub fn image(bytes: Vec<u8>, captured_at_ms: i64) -> Self {
        Self {
            image_bytes: Some(bytes),
            ..Self::empty(ContentKind::Image, captured_at_ms)
        }
    }

    pub fn file_paths(paths: Vec<String>, captured_at_ms: i64) -> Self {
        Self {
            file_paths: Some(paths),
            ..Self::empty(ContentKind::FilePaths, captured_at_ms)
        }
    }

    pub fn unknown(captured_at_ms: i64) -> Self {
        Self::empty(ContentKind::Unknown, captured_at_ms)
    }

    pub fn with_source_application(mut self, source_application: Option<String>) -> Self {
        self.source_application = source_application;
        self
    }

    /// Text payload, `None` when absent or empty.
    pub fn non_empty_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// File paths in capture order, `None` when absent or empty.
    pub fn non_empty_file_paths(&self) -> Option<&[String]> {
        self.file_paths.as_deref().filter(|p| !p.is_empty())
    }

    pub fn size_bytes(&self) -> usize {
        if let Some(bytes) = &self.image_bytes {
            return bytes.len();
        }
        if let Some(paths) = self.non_empty_file_paths() {
            return paths.iter().map(|p| p.len()).sum();
        }
        self.text.as_ref().map(|t| t.len()).unwrap_or(0)
    }
}

/// A clipboard change notification emitted by the monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardChangeEvent {
    pub content: ClipboardContentRecord,
    pub source_application: Option<String>,
    pub captured_at_ms: i64,
}

impl ClipboardChangeEvent {
    pub fn new(content: ClipboardContentRecord) -> Self {
        Self {
            source_application: content.source_application.clone(),
            captured_at_ms: content.captured_at_ms,
            content,
        }
    }
}
