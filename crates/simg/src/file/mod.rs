//! File APIs
//!
//! `Blob`, `File` and an async `FileReader` that produces data URLs.

mod blob;
mod reader;

pub use blob::{Blob, BlobOptions, BlobPart, File, FileOptions};
pub use reader::{FileReader, FileReaderError, FileReaderResult, FileReaderState};
