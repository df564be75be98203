mod basic_extractor;

pub use basic_extractor::BasicMetadataExtractor;
