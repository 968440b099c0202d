//! Decoded image handle shared by thumbnails and the image loader.

use std::fmt;
use std::io::Cursor;
use std::sync::{Arc, OnceLock};

use image::{ImageFormat, Rgba, RgbaImage};

/// An image that decoded successfully.
///
/// Holds the original encoded bytes (what gets cached) plus the decoded
/// dimensions. Cloning is cheap.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    bytes: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl Image {
    /// Decode `bytes`, returning `None` if they are not a usable image.
    pub fn decode(bytes: Vec<u8>) -> Option<Self> {
        match image::load_from_memory(&bytes) {
            Ok(decoded) => Some(Self {
                width: decoded.width(),
                height: decoded.height(),
                bytes: bytes.into(),
            }),
            Err(err) => {
                tracing::debug!(error = %err, len = bytes.len(), "image bytes did not decode");
                None
            }
        }
    }

    /// Grey 1x1 image shown when loading fails.
    pub fn placeholder() -> Self {
        static PLACEHOLDER: OnceLock<Image> = OnceLock::new();
        PLACEHOLDER
            .get_or_init(|| {
                let pixel = RgbaImage::from_pixel(1, 1, Rgba([200, 200, 200, 255]));
                let mut encoded = Cursor::new(Vec::new());
                if let Err(err) = pixel.write_to(&mut encoded, ImageFormat::Png) {
                    tracing::warn!(error = %err, "failed to encode placeholder");
                }
                Image {
                    bytes: encoded.into_inner().into(),
                    width: 1,
                    height: 1,
                }
            })
            .clone()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}
