//! Receipt photos: capture from a source, data-URL encoding, and decoding for display.

use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, GenericImageView, ImageFormat};
use thiserror::Error;

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("failed to read receipt `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported receipt format; use a JPEG or PNG image")]
    UnsupportedFormat,
    #[error("receipt is not a base64 image data URL")]
    InvalidDataUrl,
    #[error("receipt image could not be decoded: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, ReceiptError>;

/// An encoded still image, as captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ReceiptImage {
    /// Wraps raw JPEG or PNG bytes, sniffing the format from the content.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mime = match image::guess_format(&bytes) {
            Ok(ImageFormat::Png) => "image/png",
            Ok(ImageFormat::Jpeg) => "image/jpeg",
            _ => return Err(ReceiptError::UnsupportedFormat),
        };
        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    pub fn to_data_url(&self) -> String {
        format!(
            "{}{}{}{}",
            DATA_URL_PREFIX,
            self.mime,
            BASE64_MARKER,
            STANDARD.encode(&self.bytes)
        )
    }

    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .trim()
            .strip_prefix(DATA_URL_PREFIX)
            .ok_or(ReceiptError::InvalidDataUrl)?;
        let (mime, payload) = rest
            .split_once(BASE64_MARKER)
            .ok_or(ReceiptError::InvalidDataUrl)?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|_| ReceiptError::InvalidDataUrl)?;
        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    pub fn decode(&self) -> Result<DynamicImage> {
        image::load_from_memory(&self.bytes).map_err(|err| ReceiptError::Decode(err.to_string()))
    }

    /// Intrinsic pixel size `(width, height)`.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        Ok(self.decode()?.dimensions())
    }

    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/png" => "png",
            _ => "jpg",
        }
    }
}

/// Something that can hand over a photographed receipt.
pub trait ReceiptSource {
    fn capture(&mut self) -> Result<ReceiptImage>;
}

/// Reads an existing image file from disk.
pub struct FileReceiptSource {
    path: PathBuf,
}

impl FileReceiptSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReceiptSource for FileReceiptSource {
    fn capture(&mut self) -> Result<ReceiptImage> {
        let bytes = fs::read(&self.path).map_err(|source| ReceiptError::Io {
            path: self.path.clone(),
            source,
        })?;
        let image = ReceiptImage::from_bytes(bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            mime = %image.mime,
            size = image.bytes.len(),
            "captured receipt"
        );
        Ok(image)
    }
}

/// Writes a stored receipt out as an image file, returning its pixel size.
pub fn export_receipt(data_url: &str, destination: &Path) -> Result<(u32, u32)> {
    let image = ReceiptImage::from_data_url(data_url)?;
    let dimensions = image.dimensions()?;
    fs::write(destination, &image.bytes).map_err(|source| ReceiptError::Io {
        path: destination.to_path_buf(),
        source,
    })?;
    Ok(dimensions)
}
