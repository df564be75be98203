pub mod sys {
    pub const CONTENT_KIND: &str = "sys.content_kind";
    pub const SIZE_BYTES: &str = "sys.size_bytes";
    pub const SOURCE_APP: &str = "sys.source_app";
}

pub mod text {
    pub const CHAR_COUNT: &str = "text.char_count";
    pub const LINE_COUNT: &str = "text.line_count";
    pub const WORD_COUNT: &str = "text.word_count";
    pub const LOOKS_LIKE_URL: &str = "text.looks_like_url";
}

pub mod image {
    pub const FORMAT: &str = "image.format";
    pub const WIDTH: &str = "image.width";
    pub const HEIGHT: &str = "image.height";
}

pub mod files {
    pub const COUNT: &str = "files.count";
    pub const EXTENSIONS: &str = "files.extensions";
}
