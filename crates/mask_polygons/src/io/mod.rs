pub mod geojson;
pub mod mask;

pub use self::geojson::{GeoJsonSink, JsonSink, PolygonProperties};
pub use self::mask::{ImageMaskSource, JsonMaskSource, TextMaskSource};
