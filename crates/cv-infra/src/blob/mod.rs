pub mod fs_blob_sink;

pub use fs_blob_sink::{BlobSinkError, FsBlobSink};
