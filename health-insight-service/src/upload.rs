use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;

use crate::error::ClientError;

/// A medical test image or PDF ready to be sent as a data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub file_name: String,
    pub mime: &'static str,
    pub data_url: String,
}

impl UploadedImage {
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Self {
        let mime = detect_image_mime(bytes);
        Self {
            file_name: file_name.into(),
            mime,
            data_url: to_data_url(mime, bytes),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::from_bytes(file_name, &bytes))
    }
}

pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        [0x47, 0x49, 0x46, 0x38, ..] => "image/gif",
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => "image/webp",
        [0x25, 0x50, 0x44, 0x46, ..] => "application/pdf",
        _ => {
            tracing::warn!(
                "Unrecognized upload format (first 4 bytes: {:02X?}), sending as application/octet-stream",
                &bytes[..bytes.len().min(4)]
            );
            "application/octet-stream"
        }
    }
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        assert_eq!(
            detect_image_mime(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            "image/png"
        );
    }

    #[test]
    fn test_detect_pdf_report() {
        let image = UploadedImage::from_bytes("labs.pdf", b"%PDF-1.7\n");
        assert_eq!(image.mime, "application/pdf");
        assert!(image.data_url.starts_with("data:application/pdf;base64,JVBERi0"));
    }

    #[test]
    fn test_detect_jpeg() {
        assert_eq!(detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
    }

    #[test]
    fn test_unknown_is_octet_stream() {
        assert_eq!(detect_image_mime(&[]), "application/octet-stream");
        assert_eq!(
            detect_image_mime(&[0x00, 0x01, 0x02]),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_data_url() {
        let image = UploadedImage::from_bytes("scan.png", &[0x89, 0x50, 0x4E, 0x47]);
        assert_eq!(image.mime, "image/png");
        assert_eq!(image.data_url, "data:image/png;base64,iVBORw==");
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0x00]).unwrap();

        let image = UploadedImage::from_path(&path).await.unwrap();
        assert_eq!(image.file_name, "result.jpg");
        assert!(image.data_url.starts_with("data:image/jpeg;base64,"));
    }
}
