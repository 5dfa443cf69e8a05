use std::path::{Path, PathBuf};

use crate::{
    algorithms::ThresholdPreprocessor,
    error::{MaskError, Result},
    grid::Mask,
    traits::MaskSource,
};

/// Loads a mask from any image file the `image` crate can decode
#[derive(Debug, Clone)]
pub struct ImageMaskSource {
    pub path: PathBuf,
    /// Grayscale values strictly above this are foreground
    pub threshold: u8,
}

impl ImageMaskSource {
    pub fn new<P: Into<PathBuf>>(path: P, threshold: u8) -> Self {
        Self {
            path: path.into(),
            threshold,
        }
    }
}

impl MaskSource for ImageMaskSource {
    fn load_mask(&self) -> Result<Mask> {
        let image = image::open(&self.path)?.to_luma8();
        ThresholdPreprocessor { threshold: self.threshold }.to_mask(&image)
    }
}

/// Parses a mask from rows of numbers.
///
/// Each non-blank line is a row; values are separated by whitespace or
/// commas. Lines starting with `#` are comments.
#[derive(Debug, Clone)]
pub struct TextMaskSource {
    pub text: String,
}

impl TextMaskSource {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }
}

impl MaskSource for TextMaskSource {
    fn load_mask(&self) -> Result<Mask> {
        let rows = self
            .text
            .lines()
            .enumerate()
            .map(|(index, line)| (index, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .map(|(index, line)| {
                line.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(|token| {
                        token.parse::<f64>().map_err(|_| {
                            MaskError::MaskParse(format!("line {}: invalid cell value {token:?}", index + 1))
                        })
                    })
                    .collect::<Result<Vec<f64>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Mask::from_rows(&rows)
    }
}

/// Parses a mask from a JSON array of rows holding numbers or booleans
#[derive(Debug, Clone)]
pub struct JsonMaskSource {
    pub text: String,
}

impl JsonMaskSource {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }
}

impl MaskSource for JsonMaskSource {
    fn load_mask(&self) -> Result<Mask> {
        let rows: Vec<Vec<serde_json::Value>> = serde_json::from_str(&self.text)?;
        let rows = rows
            .iter()
            .enumerate()
            .map(|(row, values)| {
                values
                    .iter()
                    .enumerate()
                    .map(|(col, value)| match value {
                        serde_json::Value::Bool(flag) => Ok(*flag),
                        serde_json::Value::Number(number) => {
                            Ok(number.as_f64().is_some_and(|n| n > 0.0))
                        }
                        other => Err(MaskError::MaskParse(format!(
                            "cell ({row}, {col}) must be a number or boolean, got {other}"
                        ))),
                    })
                    .collect::<Result<Vec<bool>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Mask::from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_source() {
        let source = TextMaskSource::new("# sample\n0 1 1\n\n1,0, 0\n");
        let mask = source.load_mask().expect("Should parse");

        assert_eq!((mask.height(), mask.width()), (2, 3));
        assert!(mask.get(0, 1) && mask.get(0, 2) && mask.get(1, 0));
        assert_eq!(mask.foreground_count(), 3);
    }

    #[test]
    fn test_text_source_errors() {
        assert!(matches!(
            TextMaskSource::new("0 1\n1 x\n").load_mask(),
            Err(MaskError::MaskParse(_))
        ));
        assert!(matches!(
            TextMaskSource::new("0 1\n1\n").load_mask(),
            Err(MaskError::NonRectangular { row: 1, .. })
        ));
        assert!(matches!(
            TextMaskSource::new("# nothing\n").load_mask(),
            Err(MaskError::EmptyMask { .. })
        ));
    }

    #[test]
    fn test_json_source() {
        let mask = JsonMaskSource::new("[[0, 2, -1], [true, false, 0.5]]")
            .load_mask()
            .expect("Should parse");

        assert_eq!(mask.foreground_count(), 3);
        assert!(!mask.get(0, 2), "Negative values are background");
        assert!(mask.get(1, 2));
    }

    #[test]
    fn test_json_source_rejects_strings() {
        assert!(matches!(
            JsonMaskSource::new(r#"[["1"]]"#).load_mask(),
            Err(MaskError::MaskParse(_))
        ));
        assert!(matches!(
            JsonMaskSource::new("not json").load_mask(),
            Err(MaskError::Serialization(_))
        ));
    }

    #[test]
    fn test_image_source() {
        let path = std::env::temp_dir().join(format!("mask_polygons_source_{}.png", std::process::id()));
        let mut image = image::GrayImage::new(4, 2);
        image.put_pixel(1, 0, image::Luma([255u8]));
        image.put_pixel(3, 1, image::Luma([90u8]));
        image.save(&path).expect("Should save PNG");

        let mask = ImageMaskSource::new(&path, 128).load_mask().expect("Should load");
        std::fs::remove_file(&path).ok();

        assert_eq!((mask.height(), mask.width()), (2, 4));
        assert!(mask.get(0, 1));
        assert!(!mask.get(1, 3));
    }
}
