//! Platform abstraction layer
//!
//! The simulation never touches assets directly. Hosts hand it pixel data
//! through `MaskSampler`; this module ships the native, `image`-backed one.

use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::sim::AlphaMask;

/// Produces RGBA pixel data for the mask bitmap at a requested size
pub trait MaskSampler {
    /// Sample at `width` x `height`. Returns an empty mask if unavailable.
    fn sample(&self, width: u32, height: u32) -> AlphaMask;

    /// Natural size of the underlying bitmap, if known
    fn natural_size(&self) -> Option<(u32, u32)>;
}

/// Mask sampler backed by a decoded image
#[derive(Debug, Clone, Default)]
pub struct ImageMask {
    image: Option<DynamicImage>,
}

impl ImageMask {
    pub fn new(image: DynamicImage) -> Self {
        Self { image: Some(image) }
    }

    /// Decode an image file. Failure leaves a sampler that yields empty masks.
    pub fn open(path: &Path) -> Self {
        match image::open(path) {
            Ok(image) => {
                log::info!(
                    "Loaded mask {} ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
                Self::new(image)
            }
            Err(e) => {
                log::warn!("Failed to load mask {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

impl MaskSampler for ImageMask {
    fn sample(&self, width: u32, height: u32) -> AlphaMask {
        let Some(image) = &self.image else {
            log::debug!("No mask image loaded, sampling an empty mask");
            return AlphaMask::empty();
        };
        if width == 0 || height == 0 {
            return AlphaMask::empty();
        }

        let rgba = if (image.width(), image.height()) == (width, height) {
            image.to_rgba8()
        } else {
            image.resize_exact(width, height, FilterType::Triangle).to_rgba8()
        };
        AlphaMask::from_rgba(width, height, rgba.into_raw()).unwrap_or_else(|| {
            log::warn!("Mask sample size mismatch, block field will be empty");
            AlphaMask::empty()
        })
    }

    fn natural_size(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|i| (i.width(), i.height()))
    }
}
