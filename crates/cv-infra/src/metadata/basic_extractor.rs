use std::collections::BTreeSet;
use std::io::Cursor;

use anyhow::Result;
use async_trait::async_trait;
use cv_core::clipboard::meta_keys;
use cv_core::clipboard::preview::file_name;
use cv_core::ports::MetadataExtractorPort;
use cv_core::{ClipboardContentRecord, ContentKind, ItemId, ItemMetadata};
use tracing::debug;

/// Cheap, synchronous-in-spirit metadata: sizes, counts, image header facts.
///
/// Images are not decoded; only the header is read for the dimensions.
pub struct BasicMetadataExtractor;

impl BasicMetadataExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BasicMetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn looks_like_url(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.contains(char::is_whitespace)
        && ["http://", "https://", "ftp://", "file://"]
            .iter()
            .any(|scheme| trimmed.starts_with(scheme))
}

fn add_text_facts(metadata: &mut ItemMetadata, text: &str) {
    metadata.insert(meta_keys::text::CHAR_COUNT, text.chars().count());
    metadata.insert(meta_keys::text::LINE_COUNT, text.lines().count());
    metadata.insert(meta_keys::text::WORD_COUNT, text.split_whitespace().count());
    metadata.insert(meta_keys::text::LOOKS_LIKE_URL, looks_like_url(text));
}

fn add_image_facts(metadata: &mut ItemMetadata, bytes: &[u8]) {
    if let Ok(format) = image::guess_format(bytes) {
        if let Some(ext) = format.extensions_str().first() {
            metadata.insert(meta_keys::image::FORMAT, *ext);
        }
    }

    let dimensions = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(anyhow::Error::from)
        .and_then(|reader| reader.into_dimensions().map_err(anyhow::Error::from));
    match dimensions {
        Ok((width, height)) => {
            metadata.insert(meta_keys::image::WIDTH, width);
            metadata.insert(meta_keys::image::HEIGHT, height);
        }
        Err(err) => debug!(error = %err, "image dimensions unavailable"),
    }
}

fn add_file_facts(metadata: &mut ItemMetadata, paths: &[String]) {
    let extensions: BTreeSet<String> = paths
        .iter()
        .filter_map(|path| {
            let name = file_name(path);
            name.rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
                .filter(|ext| !ext.is_empty())
        })
        .collect();

    metadata.insert(meta_keys::files::COUNT, paths.len());
    metadata.insert(
        meta_keys::files::EXTENSIONS,
        extensions.into_iter().collect::<Vec<_>>(),
    );
}

#[async_trait]
impl MetadataExtractorPort for BasicMetadataExtractor {
    async fn extract(
        &self,
        record: &ClipboardContentRecord,
        item_id: &ItemId,
    ) -> Result<ItemMetadata> {
        let mut metadata = ItemMetadata::new(item_id.clone())
            .with(meta_keys::sys::CONTENT_KIND, record.kind.as_str())
            .with(meta_keys::sys::SIZE_BYTES, record.size_bytes());
        if let Some(app) = &record.source_application {
            metadata.insert(meta_keys::sys::SOURCE_APP, app.as_str());
        }

        match record.kind {
            ContentKind::Image => {
                if let Some(bytes) = &record.image_bytes {
                    add_image_facts(&mut metadata, bytes);
                }
            }
            ContentKind::FilePaths => {
                if let Some(paths) = record.non_empty_file_paths() {
                    add_file_facts(&mut metadata, paths);
                }
            }
            ContentKind::Text | ContentKind::Html | ContentKind::Rtf => {
                if let Some(text) = record.non_empty_text() {
                    add_text_facts(&mut metadata, text);
                }
            }
            ContentKind::Unknown => {}
        }

        Ok(metadata)
    }
}
