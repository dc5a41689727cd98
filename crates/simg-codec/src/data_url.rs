//! Data URLs
//!
//! `data:[<mediatype>][;base64],<data>` parsing and formatting.

use std::fmt;

use crate::{CodecError, base64};

const DEFAULT_MIME_TYPE: &str = "text/plain";

/// A parsed data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    mime_type: String,
    data: Vec<u8>,
}

/// Check whether a string is a data URL (scheme is case-insensitive)
pub fn is_data_url(input: &str) -> bool {
    input
        .trim_start()
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

impl DataUrl {
    /// Create from a MIME type and raw payload
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Parse a data URL
    pub fn parse(input: &str) -> Result<Self, CodecError> {
        let input = input.trim();
        if !is_data_url(input) {
            return Err(CodecError::InvalidDataUrl("missing data: scheme".into()));
        }

        let rest = &input[5..];
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CodecError::InvalidDataUrl("missing ',' separator".into()))?;

        let mut params = header.split(';').map(str::trim);
        let mime_type = match params.next() {
            Some(mime) if mime.contains('/') => mime.to_ascii_lowercase(),
            _ => DEFAULT_MIME_TYPE.to_string(),
        };
        let is_base64 = header
            .rsplit(';')
            .next()
            .is_some_and(|last| last.trim().eq_ignore_ascii_case("base64"));

        let bytes = percent_decode(payload);
        let data = if is_base64 {
            let text = String::from_utf8(bytes)
                .map_err(|_| CodecError::InvalidDataUrl("base64 payload is not ASCII".into()))?;
            base64::decode(&text)?
        } else {
            bytes
        };

        Ok(Self { mime_type, data })
    }

    /// MIME type of the payload
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Decoded payload
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Take the decoded payload
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, base64::encode(&self.data))
    }
}

fn percent_decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let high = (bytes[i + 1] as char).to_digit(16);
            let low = (bytes[i + 2] as char).to_digit(16);
            if let (Some(high), Some(low)) = (high, low) {
                out.push((high * 16 + low) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_data_url() {
        assert!(is_data_url("data:image/png;base64,AAAA"));
        assert!(is_data_url("DATA:,hello"));
        assert!(!is_data_url("file:///tmp/a.png"));
        assert!(!is_data_url("dat"));
    }

    #[test]
    fn test_parse_base64() {
        let url = DataUrl::parse("data:image/png;base64,SGVsbG8=").unwrap();
        assert_eq!(url.mime_type(), "image/png");
        assert_eq!(url.data(), b"Hello");
    }

    #[test]
    fn test_parse_percent_encoded() {
        let url = DataUrl::parse("data:,Hello%2C%20World").unwrap();
        assert_eq!(url.mime_type(), "text/plain");
        assert_eq!(url.data(), b"Hello, World");
    }

    #[test]
    fn test_parse_with_parameters() {
        let url = DataUrl::parse("data:Image/PNG;name=a.png;BASE64,SGVsbG8=").unwrap();
        assert_eq!(url.mime_type(), "image/png");
        assert_eq!(url.data(), b"Hello");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            DataUrl::parse("image/png;base64,AAAA"),
            Err(CodecError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            DataUrl::parse("data:image/png;base64"),
            Err(CodecError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            DataUrl::parse("data:image/png;base64,@@@@"),
            Err(CodecError::InvalidBase64 { .. })
        ));
    }

    #[test]
    fn test_display() {
        let url = DataUrl::new("text/plain", b"Hello".to_vec());
        assert_eq!(url.to_string(), "data:text/plain;base64,SGVsbG8=");
        assert_eq!(DataUrl::parse(&url.to_string()).unwrap(), url);
    }
}
