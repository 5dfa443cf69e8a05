use mask_polygons::{
    ImageMaskSource, JsonMaskSource, Mask, MaskError, MaskSource, Pipeline, PolygonSink,
    TextMaskSource, TracedOutline, GeoJsonSink, JsonSink,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum TraceJobError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    MaskError(#[from] MaskError),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// How traced polygons are written out
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutputFormat {
    /// FeatureCollection with one Polygon feature per region
    #[default]
    Geojson,
    /// The traced outline as plain JSON
    Json,
}

fn default_threshold() -> u8 {
    128
}

fn default_merge_collinear() -> bool {
    true
}

/// A single mask-to-polygons job
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TraceJob {
    /// Mask file: an image, a `.json` array of rows, or a `.txt`/`.csv` grid of numbers
    pub input: PathBuf,
    pub output: PathBuf,
    /// Grayscale values strictly above this are foreground (images only)
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    /// Trace background regions instead of foreground
    #[serde(default)]
    pub invert: bool,
    #[serde(default = "default_merge_collinear")]
    pub merge_collinear: bool,
    #[serde(default)]
    pub format: OutputFormat,
}

impl TraceJob {
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input: I, output: O) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            threshold: default_threshold(),
            invert: false,
            merge_collinear: default_merge_collinear(),
            format: OutputFormat::default(),
        }
    }

    /// Load TraceJob configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, TraceJobError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load TraceJob configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, TraceJobError> {
        Ok(toml::from_str(content)?)
    }

    /// Load TraceJob configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, TraceJobError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load TraceJob configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self, TraceJobError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TraceJobError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(TraceJobError::UnsupportedFileFormat),
        }
    }

    /// Convert TraceJob to TOML string
    pub fn to_toml(&self) -> Result<String, TraceJobError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    /// Convert TraceJob to JSON string
    pub fn to_json(&self) -> Result<String, TraceJobError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    pub fn pipeline(&self) -> Pipeline {
        let mut builder = Pipeline::builder().with_threshold(self.threshold);
        if self.invert {
            builder = builder.invert();
        }
        if !self.merge_collinear {
            builder = builder.without_collinear_merge();
        }
        builder.build()
    }

    /// Read the input mask, picking the source from the file extension
    pub fn load_mask(&self) -> Result<Mask, TraceJobError> {
        let extension = self
            .input
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let mask = match extension.as_deref() {
            Some("json") => JsonMaskSource::from_file(&self.input)?.load_mask()?,
            Some("txt" | "csv") => TextMaskSource::from_file(&self.input)?.load_mask()?,
            _ => ImageMaskSource::new(&self.input, self.threshold).load_mask()?,
        };
        Ok(mask)
    }

    /// Trace the input mask and write the polygons to `output`
    pub fn run(&self) -> Result<TracedOutline, TraceJobError> {
        let mask = self.load_mask()?;
        info!(
            input = %self.input.display(),
            width = mask.width(),
            height = mask.height(),
            "loaded mask"
        );

        let outline = self.pipeline().process(&mask)?;

        match self.format {
            OutputFormat::Geojson => GeoJsonSink::new(&self.output).write_outline(&outline)?,
            OutputFormat::Json => JsonSink::new(&self.output).write_outline(&outline)?,
        }
        info!(output = %self.output.display(), format = %self.format, "wrote polygons");

        Ok(outline)
    }
}
