use image::GrayImage;
use crate::{error::Result, grid::Mask, traits::MaskPreprocessor};

/// Binarizes a grayscale image into a mask
#[derive(Debug, Clone)]
pub struct ThresholdPreprocessor {
    /// Pixels strictly brighter than this become foreground
    pub threshold: u8,
}

impl Default for ThresholdPreprocessor {
    fn default() -> Self {
        Self { threshold: 128 }
    }
}

impl ThresholdPreprocessor {
    pub fn to_mask(&self, image: &GrayImage) -> Result<Mask> {
        let binary = imageproc::contrast::threshold(image, self.threshold);
        Mask::from_gray_image(&binary)
    }
}

/// Swaps foreground and background so that empty regions get traced
#[derive(Debug, Clone, Default)]
pub struct InvertPreprocessor;

impl MaskPreprocessor for InvertPreprocessor {
    fn preprocess(&self, mask: &Mask) -> Result<Mask> {
        Ok(mask.inverted())
    }
}
