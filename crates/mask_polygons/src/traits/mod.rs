use crate::{
    error::Result,
    grid::Mask,
    types::TracedOutline,
};

/// Interpretation of a raw cell value as foreground or background.
///
/// Values strictly greater than zero are foreground; zero and negative
/// values are background.
pub trait Foreground {
    fn is_foreground(&self) -> bool;
}

impl Foreground for bool {
    fn is_foreground(&self) -> bool {
        *self
    }
}

macro_rules! impl_foreground_for_numbers {
    ($zero:literal => $($t:ty),*) => {
        $(
            impl Foreground for $t {
                fn is_foreground(&self) -> bool {
                    *self > $zero
                }
            }
        )*
    };
}

impl_foreground_for_numbers!(0 => u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
impl_foreground_for_numbers!(0.0 => f32, f64);

impl<T: Foreground> Foreground for &T {
    fn is_foreground(&self) -> bool {
        (**self).is_foreground()
    }
}

/// Trait for mask preprocessing steps run before tracing
pub trait MaskPreprocessor: Send + Sync {
    /// Produce a new mask from the input (e.g. invert)
    fn preprocess(&self, mask: &Mask) -> Result<Mask>;
}

/// Trait for algorithms turning a mask into traced polygons
pub trait PolygonExtractor: Send + Sync {
    /// Extract one polygon per connected foreground component
    fn extract_polygons(&self, mask: &Mask) -> Result<TracedOutline>;
}

/// Anything that can materialize a mask into memory
pub trait MaskSource {
    fn load_mask(&self) -> Result<Mask>;
}

/// Anything that accepts the traced polygons and persists them
pub trait PolygonSink {
    fn write_outline(&mut self, outline: &TracedOutline) -> Result<()>;
}
