use anyhow::{anyhow, Result};
use clipboard_rs::{common::RustImage, Clipboard, ClipboardContext, ContentFormat, RustImageData};
use cv_core::{ClipboardContentRecord, ContentKind};
use url::Url;

pub struct CommonClipboardImpl;

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

/// Everything one clipboard read produced, before a kind is chosen.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClipboardReading {
    pub files: Option<Vec<String>>,
    pub image_png: Option<Vec<u8>>,
    pub text: Option<String>,
    pub html: Option<String>,
    pub rtf: Option<String>,
}

impl ClipboardReading {
    /// Pick the richest representation: files, image, plain text, HTML,
    /// RTF. Empty representations are skipped.
    pub fn into_record(self, captured_at_ms: i64) -> ClipboardContentRecord {
        if let Some(files) = self.files.filter(|files| !files.is_empty()) {
            return ClipboardContentRecord::file_paths(files, captured_at_ms);
        }
        if let Some(png) = self.image_png.filter(|png| !png.is_empty()) {
            return ClipboardContentRecord::image(png, captured_at_ms);
        }
        if let Some(text) = self.text.filter(|text| !text.is_empty()) {
            return ClipboardContentRecord::text(text, captured_at_ms);
        }
        if let Some(html) = self.html.filter(|html| !html.is_empty()) {
            return ClipboardContentRecord::html(html, captured_at_ms);
        }
        if let Some(rtf) = self.rtf.filter(|rtf| !rtf.is_empty()) {
            return ClipboardContentRecord::rtf(rtf, captured_at_ms);
        }
        ClipboardContentRecord::unknown(captured_at_ms)
    }
}

impl CommonClipboardImpl {
    pub fn read_record(ctx: &mut ClipboardContext) -> Result<ClipboardContentRecord> {
        let mut reading = ClipboardReading::default();

        if ctx.has(ContentFormat::Files) {
            if let Ok(files) = ctx.get_files() {
                reading.files = Some(files.iter().map(|f| file_uri_to_path(f)).collect());
            }
        }

        if reading.files.is_none() && ctx.has(ContentFormat::Image) {
            match ctx.get_image().and_then(|img| img.to_png()) {
                Ok(png) => reading.image_png = Some(png.get_bytes().to_vec()),
                Err(e) => tracing::debug!(error = %e, "Failed to encode clipboard image as PNG"),
            }
        }

        if ctx.has(ContentFormat::Text) {
            reading.text = ctx.get_text().ok();
        }

        if ctx.has(ContentFormat::Html) {
            reading.html = ctx.get_html().ok();
        }

        if ctx.has(ContentFormat::Rtf) {
            reading.rtf = ctx.get_rich_text().ok();
        }

        Ok(reading.into_record(chrono::Utc::now().timestamp_millis()))
    }

    pub fn write_record(ctx: &mut ClipboardContext, record: ClipboardContentRecord) -> Result<()> {
        match record.kind {
            ContentKind::Text => {
                map_clipboard_err(ctx.set_text(required(record.text, "text")?))?;
            }
            ContentKind::Html => {
                map_clipboard_err(ctx.set_html(required(record.text, "html")?))?;
            }
            ContentKind::Rtf => {
                map_clipboard_err(ctx.set_rich_text(required(record.text, "rtf")?))?;
            }
            ContentKind::FilePaths => {
                let files = required(record.file_paths, "file paths")?
                    .iter()
                    .map(|path| platform_file_entry(path))
                    .collect();
                map_clipboard_err(ctx.set_files(files))?;
            }
            ContentKind::Image => {
                let bytes = required(record.image_bytes, "image")?;
                let img = RustImageData::from_bytes(&bytes).map_err(|e| anyhow!(e))?;
                map_clipboard_err(ctx.set_image(img))?;
            }
            ContentKind::Unknown => {
                return Err(anyhow!("Cannot write unknown content to the clipboard"));
            }
        }

        Ok(())
    }
}

fn required<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| anyhow!("Clipboard record is missing its {what} payload"))
}

#[cfg(target_os = "linux")]
fn platform_file_entry(path: &str) -> String {
    path_to_file_uri(path)
}

#[cfg(not(target_os = "linux"))]
fn platform_file_entry(path: &str) -> String {
    path.to_string()
}

/// Turn a `file://` URI from the clipboard into a plain path. Anything that
/// is not a local file URI is returned unchanged.
pub fn file_uri_to_path(entry: &str) -> String {
    if !entry.starts_with("file://") {
        return entry.to_string();
    }
    match Url::parse(entry).map(|url| url.to_file_path()) {
        Ok(Ok(path)) => path.to_string_lossy().into_owned(),
        _ => {
            tracing::debug!(entry, "Clipboard file entry is not a local file URI");
            entry.to_string()
        }
    }
}

/// Encode an absolute path as a `file://` URI. Relative paths and entries
/// that already are URIs pass through.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn path_to_file_uri(path: &str) -> String {
    if path.starts_with("file://") {
        return path.to_string();
    }
    match Url::from_file_path(path) {
        Ok(url) => url.to_string(),
        Err(()) => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_win_over_everything_else() {
        let reading = ClipboardReading {
            files: Some(vec!["/tmp/a.txt".into()]),
            image_png: Some(vec![1]),
            text: Some("/tmp/a.txt".into()),
            ..Default::default()
        };

        let record = reading.into_record(5);

        assert_eq!(record.kind, ContentKind::FilePaths);
        assert_eq!(record.file_paths, Some(vec!["/tmp/a.txt".to_string()]));
        assert_eq!(record.captured_at_ms, 5);
    }

    #[test]
    fn test_image_wins_over_text() {
        let reading = ClipboardReading {
            image_png: Some(vec![1, 2]),
            text: Some("caption".into()),
            ..Default::default()
        };

        assert_eq!(reading.into_record(0).kind, ContentKind::Image);
    }

    #[test]
    fn test_plain_text_wins_over_html_and_rtf() {
        let reading = ClipboardReading {
            text: Some("hi".into()),
            html: Some("<b>hi</b>".into()),
            rtf: Some("{\\rtf1 hi}".into()),
            ..Default::default()
        };

        let record = reading.into_record(0);
        assert_eq!(record.kind, ContentKind::Text);
        assert_eq!(record.text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_empty_representations_are_skipped() {
        let reading = ClipboardReading {
            files: Some(vec![]),
            text: Some(String::new()),
            html: Some("<p>x</p>".into()),
            ..Default::default()
        };

        assert_eq!(reading.into_record(0).kind, ContentKind::Html);
    }

    #[test]
    fn test_nothing_readable_is_unknown() {
        let record = ClipboardReading::default().into_record(1);
        assert_eq!(record.kind, ContentKind::Unknown);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_uri_to_path() {
        assert_eq!(file_uri_to_path("file:///tmp/a.txt"), "/tmp/a.txt");
        assert_eq!(file_uri_to_path("file://localhost/tmp/a.txt"), "/tmp/a.txt");
        assert_eq!(file_uri_to_path("file:///tmp/my%20doc.txt"), "/tmp/my doc.txt");
        assert_eq!(file_uri_to_path("file:///tmp/%C3%A9t%C3%A9.txt"), "/tmp/été.txt");
        assert_eq!(file_uri_to_path("/already/plain"), "/already/plain");
        assert_eq!(file_uri_to_path("file://remote-host/share/a.txt"), "file://remote-host/share/a.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_path_to_file_uri_escapes_reserved_and_non_ascii() {
        assert_eq!(path_to_file_uri("/tmp/my doc.txt"), "file:///tmp/my%20doc.txt");
        assert_eq!(path_to_file_uri("/tmp/é.txt"), "file:///tmp/%C3%A9.txt");
        assert_eq!(path_to_file_uri("/tmp/a#1.txt"), "file:///tmp/a%231.txt");
        assert_eq!(path_to_file_uri("file:///x"), "file:///x");
        assert_eq!(path_to_file_uri("relative/a.txt"), "relative/a.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_uri_round_trip_keeps_unusual_names() {
        for path in [
            "/tmp/é.txt",
            "/tmp/a#1.txt",
            "/tmp/what?.txt",
            "/tmp/100%.txt",
            "/home/用户/文档 1.md",
        ] {
            let uri = path_to_file_uri(path);
            assert!(!uri.contains('#') && !uri.contains('?'), "{uri}");
            assert!(uri.is_ascii(), "{uri}");
            assert_eq!(file_uri_to_path(&uri), path);
        }
    }
}
