//! Blob and File
//!
//! Binary data handed to the image loader.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use simg_codec::ImageFormat;

/// Blob - immutable raw binary data
#[derive(Debug, Clone)]
pub struct Blob {
    data: Arc<Vec<u8>>,
    mime_type: String,
}

impl Blob {
    /// Create a new blob
    pub fn new(parts: Vec<BlobPart>, options: BlobOptions) -> Self {
        let mut data = Vec::new();
        for part in parts {
            match part {
                BlobPart::String(s) => data.extend(s.as_bytes()),
                BlobPart::Bytes(b) => data.extend(b),
                BlobPart::Blob(blob) => data.extend(blob.as_bytes()),
            }
        }
        Self {
            data: Arc::new(data),
            mime_type: options.mime_type.unwrap_or_default(),
        }
    }

    /// Get size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Get MIME type
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Blob part for construction
pub enum BlobPart {
    String(String),
    Bytes(Vec<u8>),
    Blob(Blob),
}

/// Blob options
#[derive(Debug, Clone, Default)]
pub struct BlobOptions {
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone)]
enum Contents {
    Memory(Blob),
    Disk(PathBuf),
}

/// File - named binary data, held in memory or read lazily from disk
#[derive(Debug, Clone)]
pub struct File {
    name: String,
    mime_type: String,
    last_modified: u64, // Unix timestamp ms
    size: u64,
    contents: Contents,
}

impl File {
    /// Create an in-memory file
    pub fn new(parts: Vec<BlobPart>, name: &str, options: FileOptions) -> Self {
        let blob = Blob::new(parts, BlobOptions {
            mime_type: options.mime_type,
        });
        Self {
            name: name.to_string(),
            mime_type: blob.mime_type().to_string(),
            last_modified: options.last_modified.unwrap_or(0),
            size: blob.size() as u64,
            contents: Contents::Memory(blob),
        }
    }

    /// Reference a file on disk; its bytes are read when the file is read.
    ///
    /// The MIME type is derived from the extension and left empty when unknown.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let metadata = smol::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let last_modified = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mime_type = match path
            .extension()
            .map(|ext| ImageFormat::from_extension(&ext.to_string_lossy()))
        {
            Some(ImageFormat::Unknown) | None => String::new(),
            Some(format) => format.mime_type().to_string(),
        };

        Ok(Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            mime_type,
            last_modified,
            size: metadata.len(),
            contents: Contents::Disk(path.to_path_buf()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn last_modified(&self) -> u64 {
        self.last_modified
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Backing path for files opened from disk
    pub fn path(&self) -> Option<&Path> {
        match &self.contents {
            Contents::Disk(path) => Some(path),
            Contents::Memory(_) => None,
        }
    }

    pub(crate) async fn read_bytes(&self) -> io::Result<Vec<u8>> {
        match &self.contents {
            Contents::Memory(blob) => Ok(blob.as_bytes().to_vec()),
            Contents::Disk(path) => smol::fs::read(path).await,
        }
    }
}

/// File options
#[derive(Debug, Clone, Default)]
pub struct FileOptions {
    pub mime_type: Option<String>,
    pub last_modified: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob() {
        let blob = Blob::new(
            vec![
                BlobPart::String("Hel".into()),
                BlobPart::Bytes(b"lo".to_vec()),
            ],
            BlobOptions::default(),
        );

        assert_eq!(blob.size(), 5);
        assert_eq!(blob.as_bytes(), b"Hello");
        assert_eq!(blob.mime_type(), "");
    }

    #[test]
    fn test_file() {
        let file = File::new(
            vec![BlobPart::String("content".into())],
            "test.txt",
            FileOptions {
                mime_type: Some("text/plain".into()),
                last_modified: Some(42),
            },
        );

        assert_eq!(file.name(), "test.txt");
        assert_eq!(file.size(), 7);
        assert_eq!(file.mime_type(), "text/plain");
        assert_eq!(file.last_modified(), 42);
        assert!(file.path().is_none());
        assert_eq!(smol::block_on(file.read_bytes()).unwrap(), b"content");
    }

    #[test]
    fn test_open_from_disk() {
        let path = std::env::temp_dir().join(format!("simg-blob-{}.png", std::process::id()));
        std::fs::write(&path, b"not really a png").unwrap();

        let file = smol::block_on(File::open(&path)).unwrap();
        assert_eq!(file.mime_type(), "image/png");
        assert_eq!(file.size(), 16);
        assert_eq!(file.path(), Some(path.as_path()));
        assert_eq!(smol::block_on(file.read_bytes()).unwrap(), b"not really a png");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_open_missing_file() {
        let path = std::env::temp_dir().join("simg-blob-does-not-exist.png");
        let err = smol::block_on(File::open(&path)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_open_directory() {
        let err = smol::block_on(File::open(std::env::temp_dir())).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
