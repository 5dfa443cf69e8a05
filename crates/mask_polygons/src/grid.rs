//! Mask input and the per-cell region bookkeeping used while tracing.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::{
    error::{MaskError, Result},
    traits::Foreground,
};

/// Region grid value of a background cell
pub const BACKGROUND: i32 = 0;
/// Region grid value of a foreground cell not yet absorbed into a polygon
pub const UNPROCESSED: i32 = -1;

/// Immutable H×W foreground/background grid, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMask")]
pub struct Mask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

/// Unvalidated serialized form of [`Mask`]
#[derive(Deserialize)]
struct RawMask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl TryFrom<RawMask> for Mask {
    type Error = MaskError;

    fn try_from(raw: RawMask) -> Result<Self> {
        Self::check_dimensions(raw.width, raw.height)?;
        if raw.cells.len() != raw.width * raw.height {
            return Err(MaskError::MaskParse(format!(
                "{}x{} mask needs {} cells, found {}",
                raw.height,
                raw.width,
                raw.width * raw.height,
                raw.cells.len()
            )));
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

impl Mask {
    /// Create an all-background mask of `height` rows and `width` columns
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
        })
    }

    /// Build a mask from a closure evaluated at every `(row, col)`
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut mask = Self::new(width, height)?;
        for row in 0..height {
            for col in 0..width {
                mask.cells[row * width + col] = f(row, col);
            }
        }
        Ok(mask)
    }

    /// Build a mask from rows of cell values.
    ///
    /// Every row must have the same length; values greater than zero (or
    /// `true`) are foreground.
    pub fn from_rows<T, R>(rows: &[R]) -> Result<Self>
    where
        T: Foreground,
        R: AsRef<[T]>,
    {
        let height = rows.len();
        let width = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        Self::check_dimensions(width, height)?;

        let mut cells = Vec::with_capacity(width * height);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MaskError::NonRectangular {
                    row: index,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row.iter().map(T::is_foreground));
        }

        Ok(Self { width, height, cells })
    }

    /// Build a mask from a grayscale image; any non-zero pixel is foreground.
    ///
    /// Image `y` maps to the mask row and `x` to the column.
    pub fn from_gray_image(image: &GrayImage) -> Result<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        Self::from_fn(width, height, |row, col| {
            image.get_pixel(col as u32, row as u32).0[0] > 0
        })
    }

    fn check_dimensions(width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(MaskError::EmptyMask { rows: height, cols: width });
        }
        // corner lattice is one larger than the cell grid in each axis
        let fits = |n: usize| i32::try_from(n).map(|v| v < i32::MAX).unwrap_or(false);
        if !fits(width) || !fits(height) || width.checked_mul(height).is_none() {
            return Err(MaskError::MaskTooLarge { rows: height, cols: width });
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at `(row, col)` is foreground. Out of range is background.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, foreground: bool) -> Result<()> {
        if row >= self.height || col >= self.width {
            return Err(MaskError::CellOutOfRange {
                row,
                col,
                rows: self.height,
                cols: self.width,
            });
        }
        self.cells[row * self.width + col] = foreground;
        Ok(())
    }

    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Swap foreground and background
    pub fn inverted(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|cell| !cell).collect(),
        }
    }
}

/// Mutable per-cell processing state for one tracing run.
///
/// A cell is [`BACKGROUND`], [`UNPROCESSED`], or the positive id of the
/// region that absorbed it. Values only ever move from `UNPROCESSED` to a
/// region id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionGrid {
    width: usize,
    height: usize,
    cells: Vec<i32>,
    #[serde(skip)]
    scan_from: usize,
}

impl RegionGrid {
    pub fn initialize(mask: &Mask) -> Self {
        let cells = mask
            .cells
            .iter()
            .map(|&foreground| if foreground { UNPROCESSED } else { BACKGROUND })
            .collect();

        Self {
            width: mask.width,
            height: mask.height,
            cells,
            scan_from: 0,
        }
    }

    /// Next unprocessed cell in row-major order, or `None` once every
    /// foreground cell has been labeled.
    pub fn find_next_unprocessed(&mut self) -> Option<(usize, usize)> {
        // cells before the previous seed can never become unprocessed again
        let offset = self.cells[self.scan_from..]
            .iter()
            .position(|&cell| cell == UNPROCESSED)?;
        let index = self.scan_from + offset;
        self.scan_from = index;
        Some((index / self.width, index % self.width))
    }

    /// Label an unprocessed cell with `region_id`.
    pub fn mark(&mut self, row: usize, col: usize, region_id: i32) -> Result<()> {
        if region_id <= 0 {
            return Err(MaskError::InvariantViolation(format!(
                "region id must be positive, got {region_id}"
            )));
        }
        if row >= self.height || col >= self.width {
            return Err(MaskError::InvariantViolation(format!(
                "cell ({row}, {col}) outside {}x{} grid",
                self.height, self.width
            )));
        }

        let cell = &mut self.cells[row * self.width + col];
        if *cell != UNPROCESSED {
            return Err(MaskError::InvariantViolation(format!(
                "cell ({row}, {col}) already holds {}, cannot mark as region {region_id}",
                *cell
            )));
        }
        *cell = region_id;
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        (row < self.height && col < self.width).then(|| self.cells[row * self.width + col])
    }

    /// Lattice-coordinate lookup; anything outside the grid is not unprocessed.
    pub fn is_unprocessed(&self, row: i32, col: i32) -> bool {
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(row), Ok(col)) => self.get(row, col) == Some(UNPROCESSED),
            _ => false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn unprocessed_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == UNPROCESSED).count()
    }

    pub fn region_cell_count(&self, region_id: i32) -> usize {
        self.cells.iter().filter(|&&cell| cell == region_id).count()
    }

    /// Row slices of the grid
    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        self.cells.chunks(self.width)
    }
}
