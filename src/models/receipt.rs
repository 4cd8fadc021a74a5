//! Receipt image attachments
//!
//! A receipt is stored inline with its transaction as a base64 payload plus
//! its MIME type. Resizing and recompression happen before the bytes reach
//! this type; here we only check that what arrives can be stored.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Why a receipt could not be attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptError {
    Empty,
    UnsupportedType(String),
    TooLarge { size: usize, max: usize },
    InvalidEncoding(String),
}

impl fmt::Display for ReceiptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Receipt image is empty"),
            Self::UnsupportedType(t) => write!(f, "Unsupported receipt type: {}", t),
            Self::TooLarge { size, max } => {
                write!(f, "Receipt image is {} bytes, limit is {} bytes", size, max)
            }
            Self::InvalidEncoding(e) => write!(f, "Receipt payload is not valid base64: {}", e),
        }
    }
}

impl std::error::Error for ReceiptError {}

/// An image attached to a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptImage {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type such as `image/jpeg`
    pub mime_type: String,
}

impl ReceiptImage {
    /// Encode raw image bytes for storage
    ///
    /// `max_bytes` caps the raw (pre-base64) size.
    pub fn from_bytes(bytes: &[u8], mime_type: &str, max_bytes: usize) -> Result<Self, ReceiptError> {
        if bytes.is_empty() {
            return Err(ReceiptError::Empty);
        }

        let mime_type = mime_type.trim().to_lowercase();
        if !mime_type.starts_with("image/") || mime_type.len() <= "image/".len() {
            return Err(ReceiptError::UnsupportedType(mime_type));
        }

        if bytes.len() > max_bytes {
            return Err(ReceiptError::TooLarge {
                size: bytes.len(),
                max: max_bytes,
            });
        }

        Ok(Self {
            data: STANDARD.encode(bytes),
            mime_type,
        })
    }

    /// Decode the stored payload back into raw bytes
    pub fn decode(&self) -> Result<Vec<u8>, ReceiptError> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| ReceiptError::InvalidEncoding(e.to_string()))
    }

    /// Approximate raw size of the stored image in bytes
    pub fn size_hint(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        ((self.data.len() / 4) * 3).saturating_sub(padding.min(2))
    }

    /// `data:` URL for embedding the receipt in HTML or markdown
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Guess an image MIME type, preferring magic bytes over the file extension
pub fn sniff_mime_type(path: &Path, bytes: &[u8]) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\xFF\xD8\xFF", "image/jpeg"),
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
    ];

    for (magic, mime) in SIGNATURES {
        if bytes.starts_with(magic) {
            return Some(*mime);
        }
    }
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    let extension = path.extension()?.to_str()?.to_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_from_bytes_and_decode() {
        let receipt = ReceiptImage::from_bytes(PNG_HEADER, "image/png", 1024).unwrap();
        assert_eq!(receipt.mime_type, "image/png");
        assert_eq!(receipt.decode().unwrap(), PNG_HEADER);
        assert_eq!(receipt.size_hint(), PNG_HEADER.len());
        assert!(receipt.data_url().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            ReceiptImage::from_bytes(&[], "image/png", 10),
            Err(ReceiptError::Empty)
        );
        assert!(matches!(
            ReceiptImage::from_bytes(b"%PDF-1.7", "application/pdf", 100),
            Err(ReceiptError::UnsupportedType(_))
        ));
        assert_eq!(
            ReceiptImage::from_bytes(&[0u8; 11], "image/jpeg", 10),
            Err(ReceiptError::TooLarge { size: 11, max: 10 })
        );
    }

    #[test]
    fn test_invalid_stored_payload() {
        let receipt = ReceiptImage {
            data: "not base64!".into(),
            mime_type: "image/png".into(),
        };
        assert!(matches!(receipt.decode(), Err(ReceiptError::InvalidEncoding(_))));
    }

    #[test]
    fn test_sniff_mime_type() {
        assert_eq!(sniff_mime_type(Path::new("r.bin"), PNG_HEADER), Some("image/png"));
        assert_eq!(
            sniff_mime_type(Path::new("r.bin"), b"\xFF\xD8\xFF\xE0rest"),
            Some("image/jpeg")
        );
        assert_eq!(sniff_mime_type(Path::new("scan.JPG"), b"??"), Some("image/jpeg"));
        assert_eq!(sniff_mime_type(Path::new("notes.txt"), b"hello"), None);
    }
}
