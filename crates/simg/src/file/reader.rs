//! FileReader
//!
//! Reads File contents asynchronously.

use simg_codec::DataUrl;

use super::File;

/// FileReader ready state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileReaderState {
    #[default]
    Empty = 0,
    Loading = 1,
    Done = 2,
}

/// FileReader result type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileReaderResult {
    ArrayBuffer(Vec<u8>),
    DataUrl(String),
}

/// FileReader error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileReaderError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File not readable: {name}: {message}")]
    NotReadable { name: String, message: String },

    #[error("A read is already in progress")]
    InvalidState,
}

/// FileReader object
#[derive(Debug, Default)]
pub struct FileReader {
    ready_state: FileReaderState,
    result: Option<FileReaderResult>,
    error: Option<FileReaderError>,
}

impl FileReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready_state(&self) -> FileReaderState {
        self.ready_state
    }

    /// Result of the last successful read
    pub fn result(&self) -> Option<&FileReaderResult> {
        self.result.as_ref()
    }

    /// Error of the last failed read
    pub fn error(&self) -> Option<&FileReaderError> {
        self.error.as_ref()
    }

    /// Read file as raw bytes
    pub async fn read_as_array_buffer(&mut self, file: &File) -> Result<Vec<u8>, FileReaderError> {
        let bytes = self.read(file).await?;
        self.finish(FileReaderResult::ArrayBuffer(bytes.clone()));
        Ok(bytes)
    }

    /// Read file as a base64 data URL carrying the file's MIME type
    pub async fn read_as_data_url(&mut self, file: &File) -> Result<String, FileReaderError> {
        let bytes = self.read(file).await?;
        let mime_type = match file.mime_type() {
            "" => "application/octet-stream",
            mime => mime,
        };
        let url = DataUrl::new(mime_type, bytes).to_string();
        self.finish(FileReaderResult::DataUrl(url.clone()));
        Ok(url)
    }

    async fn read(&mut self, file: &File) -> Result<Vec<u8>, FileReaderError> {
        if self.ready_state == FileReaderState::Loading {
            return Err(FileReaderError::InvalidState);
        }

        self.ready_state = FileReaderState::Loading;
        self.result = None;
        self.error = None;

        match file.read_bytes().await {
            Ok(bytes) => Ok(bytes),
            Err(err) => {
                let err = match err.kind() {
                    std::io::ErrorKind::NotFound => FileReaderError::NotFound(file.name().to_string()),
                    _ => FileReaderError::NotReadable {
                        name: file.name().to_string(),
                        message: err.to_string(),
                    },
                };
                tracing::warn!(file = file.name(), error = %err, "file read failed");
                self.error = Some(err.clone());
                self.ready_state = FileReaderState::Done;
                Err(err)
            }
        }
    }

    fn finish(&mut self, result: FileReaderResult) {
        self.result = Some(result);
        self.ready_state = FileReaderState::Done;
    }
}
