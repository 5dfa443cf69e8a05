pub mod builder;

use image::GrayImage;
use tracing::info;

use crate::{
    algorithms::ThresholdPreprocessor,
    error::Result,
    grid::Mask,
    traits::{MaskPreprocessor, PolygonExtractor},
    types::TracedOutline,
};

/// Mask preprocessing followed by polygon extraction
pub struct Pipeline {
    threshold: ThresholdPreprocessor,
    preprocessors: Vec<Box<dyn MaskPreprocessor>>,
    extractor: Box<dyn PolygonExtractor>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        threshold: ThresholdPreprocessor,
        preprocessors: Vec<Box<dyn MaskPreprocessor>>,
        extractor: Box<dyn PolygonExtractor>,
    ) -> Self {
        Self {
            threshold,
            preprocessors,
            extractor,
        }
    }

    /// Run preprocessors in order, then trace the result
    pub fn process(&self, mask: &Mask) -> Result<TracedOutline> {
        let mut processed = mask.clone();
        for preprocessor in &self.preprocessors {
            processed = preprocessor.preprocess(&processed)?;
        }

        let outline = self.extractor.extract_polygons(&processed)?;
        info!(
            polygons = outline.len(),
            vertices = outline.vertex_count(),
            width = outline.width,
            height = outline.height,
            "extracted polygons"
        );
        Ok(outline)
    }

    /// Threshold a grayscale image into a mask and process it
    pub fn process_image(&self, image: &GrayImage) -> Result<TracedOutline> {
        let mask = self.threshold.to_mask(image)?;
        self.process(&mask)
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: image threshold {}, {} preprocessors, 1 extractor",
            self.threshold.threshold,
            self.preprocessors.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vertex;
    use image::Luma;

    fn create_test_image() -> GrayImage {
        let mut img = GrayImage::new(20, 10);
        for y in 2..6 {
            for x in 3..9 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
        img.put_pixel(15, 8, Luma([255u8]));
        img
    }

    #[test]
    fn test_pipeline_basic() {
        let pipeline = Pipeline::builder().build();
        let result = pipeline
            .process_image(&create_test_image())
            .expect("Should process successfully");

        assert_eq!(result.len(), 2);
        assert_eq!(result.width, 20);
        assert_eq!(result.height, 10);
        assert_eq!(result.polygons[0].len(), 4);
        assert_eq!(
            result.polygons[0].bounding_box(),
            Some((Vertex::new(2, 3), Vertex::new(6, 9)))
        );
    }

    #[test]
    fn test_pipeline_invert_traces_background() {
        let pipeline = Pipeline::builder().invert().build();
        let result = pipeline
            .process_image(&create_test_image())
            .expect("Should process successfully");

        // the background is one connected region around both blobs
        assert_eq!(result.len(), 1);
        assert_eq!(result.polygons[0].region_id, 1);
    }

    #[test]
    fn test_pipeline_threshold_excludes_dim_pixels() {
        let mut image = create_test_image();
        image.put_pixel(0, 0, Luma([100u8]));

        let strict = Pipeline::builder().with_threshold(150).build();
        let loose = Pipeline::builder().with_threshold(50).build();
        assert_eq!(strict.process_image(&image).expect("Should process").len(), 2);
        assert_eq!(loose.process_image(&image).expect("Should process").len(), 3);
    }

    #[test]
    fn test_pipeline_info() {
        let pipeline = Pipeline::builder().invert().build();
        assert_eq!(
            pipeline.info(),
            "Pipeline: image threshold 128, 1 preprocessors, 1 extractor"
        );
    }
}
