//! # Mask Polygon Tracing Library
//!
//! Converts a binary raster mask into closed rectilinear polygons, one per
//! 4-connected foreground region. Each polygon follows the pixel-cell
//! boundary of its region exactly, so its signed area equals the region's
//! cell count.
//!
//! ## Core Features
//!
//! - **Boundary growth**: a closed loop of unit edges is grown from a seed
//!   cell by detouring around every absorbable 4-neighbor
//! - **Canonical loops**: back-to-back reversals are cancelled so each
//!   vertex list is minimal
//! - **Pipeline System**: compose preprocessors with a pluggable extractor
//! - **GeoJSON Support**: export/import traced polygons as FeatureCollections
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mask_polygons::{trace_polygons, Mask};
//!
//! let mask = Mask::from_rows(&[[0u8, 1, 1], [1, 1, 0]])?;
//! for polygon in trace_polygons(&mask)? {
//!     println!("region {}: {:?}", polygon.region_id, polygon.vertices);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Images
//!
//! ```rust,no_run
//! use mask_polygons::Pipeline;
//!
//! let pipeline = Pipeline::builder()
//!     .with_threshold(100)
//!     .invert()
//!     .build();
//!
//! let image = image::open("mask.png")?.to_luma8();
//! let result = pipeline.process_image(&image)?;
//! result.save_geojson("output.geojson")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod grid;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod io;

// Re-exports for convenience
pub use error::{MaskError, Result};
pub use grid::{Mask, RegionGrid};
pub use types::{Polygon, TracedOutline, Vertex};
pub use traits::{Foreground, MaskPreprocessor, MaskSource, PolygonExtractor, PolygonSink};
pub use algorithms::{
    canonicalize, extract_vertices, grow, Direction, EdgeLoop, InvertPreprocessor, PolygonTracer,
    Segment, ThresholdPreprocessor,
};
pub use pipeline::{Pipeline, builder::PipelineBuilder};
pub use io::{GeoJsonSink, ImageMaskSource, JsonMaskSource, JsonSink, PolygonProperties, TextMaskSource};

/// Trace every 4-connected foreground region of `mask` into a polygon.
///
/// Polygons come back in row-major order of each region's first cell, with
/// collinear vertices merged.
pub fn trace_polygons(mask: &Mask) -> Result<Vec<Polygon>> {
    Ok(PolygonTracer::default().trace(mask)?.polygons)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_mask() -> Mask {
        Mask::from_rows(&[
            [0u8, 1, 1, 0, 0, 1],
            [1, 1, 1, 1, 0, 1],
            [0, 1, 0, 1, 0, 0],
            [0, 1, 1, 1, 0, 0],
            [0, 0, 0, 0, 1, 0],
        ])
        .expect("Should build mask")
    }

    #[test]
    fn test_trace_polygons_basic() {
        let polygons = trace_polygons(&reference_mask()).expect("Should trace successfully");

        assert_eq!(polygons.len(), 3);
        assert_eq!(
            polygons.iter().map(|p| p.region_id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            polygons[1].vertices,
            vec![Vertex::new(2, 5), Vertex::new(2, 6), Vertex::new(0, 6), Vertex::new(0, 5)]
        );
    }

    #[test]
    fn test_trace_polygons_from_bool_rows() {
        let mask = Mask::from_rows(&[[true, false], [false, true]]).expect("Should build mask");
        let polygons = trace_polygons(&mask).expect("Should trace successfully");
        assert_eq!(polygons.len(), 2, "Diagonal cells are separate regions");
        assert!(polygons.iter().all(|p| p.len() == 4));
    }

    #[test]
    fn test_pipeline_matches_trace_polygons() {
        let mask = reference_mask();
        let result = Pipeline::builder().build().process(&mask).expect("Should process successfully");
        assert_eq!(result.polygons, trace_polygons(&mask).expect("Should trace successfully"));
        assert_eq!((result.width, result.height), (6, 5));
    }

    #[test]
    fn test_text_source_to_geojson() {
        let mask = TextMaskSource::new("1 1\n0 1\n").load_mask().expect("Should parse");
        let result = Pipeline::builder().build().process(&mask).expect("Should process successfully");

        let geojson = result.to_geojson().expect("Should create GeoJSON");
        assert_eq!(geojson.features.len(), 1);
    }

    #[test]
    fn test_empty_mask_is_rejected() {
        let rows: Vec<Vec<u8>> = Vec::new();
        assert!(matches!(Mask::from_rows(&rows), Err(MaskError::EmptyMask { .. })));
    }
}
