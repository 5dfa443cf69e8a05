use crate::{
    pipeline::Pipeline,
    traits::{MaskPreprocessor, PolygonExtractor},
    algorithms::{InvertPreprocessor, PolygonTracer, ThresholdPreprocessor},
};

/// Builder for creating processing pipelines with a fluent API
pub struct PipelineBuilder {
    threshold: ThresholdPreprocessor,
    preprocessors: Vec<Box<dyn MaskPreprocessor>>,
    extractor: Option<Box<dyn PolygonExtractor>>,
    merge_collinear: bool,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            threshold: ThresholdPreprocessor::default(),
            preprocessors: Vec::new(),
            extractor: None,
            merge_collinear: true,
        }
    }

    /// Add a preprocessor to the pipeline
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: MaskPreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Set the polygon extractor (replaces the default tracer)
    pub fn set_extractor<E>(mut self, extractor: E) -> Self
    where
        E: PolygonExtractor + 'static,
    {
        self.extractor = Some(Box::new(extractor));
        self
    }

    /// Trace background regions instead of foreground ones
    pub fn invert(self) -> Self {
        self.add_preprocessor(InvertPreprocessor)
    }

    /// Grayscale threshold used by `Pipeline::process_image`
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = ThresholdPreprocessor { threshold };
        self
    }

    /// Keep one vertex per unit edge on the default tracer
    pub fn without_collinear_merge(mut self) -> Self {
        self.merge_collinear = false;
        self
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        let merge_collinear = self.merge_collinear;
        let extractor = self
            .extractor
            .unwrap_or_else(|| Box::new(PolygonTracer::new(merge_collinear)));

        Pipeline::new(self.threshold, self.preprocessors, extractor)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Mask;

    #[test]
    fn test_without_collinear_merge() {
        let mask = Mask::from_rows(&[[1u8, 1]]).expect("Should build mask");
        let merged = PipelineBuilder::new().build().process(&mask).expect("Should process");
        let unmerged = PipelineBuilder::new()
            .without_collinear_merge()
            .build()
            .process(&mask)
            .expect("Should process");

        assert_eq!(merged.polygons[0].len(), 4);
        assert_eq!(unmerged.polygons[0].len(), 6);
    }

    #[test]
    fn test_custom_extractor_is_used() {
        struct Nothing;
        impl PolygonExtractor for Nothing {
            fn extract_polygons(&self, mask: &Mask) -> crate::Result<crate::TracedOutline> {
                Ok(crate::TracedOutline {
                    polygons: Vec::new(),
                    width: mask.width(),
                    height: mask.height(),
                })
            }
        }

        let mask = Mask::from_rows(&[[1u8]]).expect("Should build mask");
        let result = PipelineBuilder::new()
            .set_extractor(Nothing)
            .build()
            .process(&mask)
            .expect("Should process");
        assert!(result.is_empty());
    }
}
