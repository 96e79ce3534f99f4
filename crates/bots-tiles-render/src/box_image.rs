//! Box background images.
//!
//! Images are decoded once with the `image` crate and kept as RGBA pixels.
//! [`ImagePlacement`] decides where and how large the image is drawn inside a
//! box.

use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::error::ImageError;
use crate::types::{Point, Rect, Size};

/// A decoded image, stored as 8-bit RGBA pixels.
#[derive(Clone)]
pub struct BoxImage {
    inner: RgbaImage,
}

impl BoxImage {
    /// Load and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| ImageError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_dynamic_image(img))
    }

    /// Create an image from raw RGBA pixel data.
    ///
    /// The data must be exactly `width * height * 4` bytes in row-major order.
    pub fn from_rgba(data: &[u8], width: u32, height: u32) -> Result<Self, ImageError> {
        let invalid = || ImageError::InvalidPixels {
            width,
            height,
            len: data.len(),
        };
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(invalid)?;
        if data.len() != expected {
            return Err(invalid());
        }
        let inner = RgbaImage::from_raw(width, height, data.to_vec()).ok_or_else(invalid)?;
        Ok(Self { inner })
    }

    /// Create from an existing `DynamicImage`.
    #[inline]
    pub fn from_dynamic_image(img: DynamicImage) -> Self {
        Self {
            inner: img.into_rgba8(),
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Natural size of the image.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }

    /// Raw RGBA pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        self.inner.as_raw()
    }
}

impl std::fmt::Debug for BoxImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// How an image is fitted into a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePlacement {
    /// Scale the image to the box size.
    pub resize: bool,
    /// Center the image in the box, otherwise align its top-left corner.
    pub center: bool,
    /// When resizing, keep the aspect ratio and fit inside the box.
    pub keep_proportion: bool,
}

impl Default for ImagePlacement {
    fn default() -> Self {
        Self {
            resize: true,
            center: true,
            keep_proportion: true,
        }
    }
}

impl ImagePlacement {
    /// Compute the destination rectangle for an image of `natural` size
    /// drawn into `bounds`.
    pub fn destination(&self, natural: Size, bounds: Rect) -> Rect {
        let size = if !self.resize || natural.is_empty() {
            natural
        } else if self.keep_proportion {
            let scale = (bounds.width() / natural.width).min(bounds.height() / natural.height);
            Size::new(natural.width * scale, natural.height * scale)
        } else {
            bounds.size
        };

        let origin = if self.center {
            let center = bounds.center();
            Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0)
        } else {
            bounds.origin
        };

        Rect { origin, size }
    }
}
