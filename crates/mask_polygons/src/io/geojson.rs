use std::path::{Path, PathBuf};

use geojson::{Feature, FeatureCollection, Geometry, Value};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{MaskError, Result},
    traits::PolygonSink,
    types::{Polygon, TracedOutline, Vertex},
};

/// Properties attached to every polygon feature
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[schemars(description = "Properties for traced polygon features")]
pub struct PolygonProperties {
    #[schemars(description = "Region id of the traced component")]
    pub region_id: i32,
    #[schemars(description = "Number of distinct polygon vertices")]
    pub vertex_count: usize,
    #[schemars(description = "Boundary length in pixel edges")]
    pub perimeter: u64,
    #[schemars(description = "Enclosed area in square pixels")]
    pub area: f64,
}

impl PolygonProperties {
    pub fn from_polygon(polygon: &Polygon) -> Self {
        use geo::Area;
        Self {
            region_id: polygon.region_id,
            vertex_count: polygon.len(),
            perimeter: polygon.perimeter(),
            area: polygon.to_geo_polygon().unsigned_area(),
        }
    }
}

impl TracedOutline {
    /// Export as a FeatureCollection with one Polygon feature per region.
    ///
    /// Rings are closed explicitly; `x` is the column and `y` the row.
    pub fn to_geojson(&self) -> Result<FeatureCollection> {
        let mut features = Vec::with_capacity(self.polygons.len());

        for polygon in &self.polygons {
            let ring: Vec<Vec<f64>> = polygon
                .closed_vertices()
                .iter()
                .map(|v| vec![f64::from(v.col), f64::from(v.row)])
                .collect();
            let geometry = Geometry::new(Value::Polygon(vec![ring]));

            let properties = serde_json::to_value(PolygonProperties::from_polygon(polygon))?
                .as_object()
                .cloned();

            features.push(Feature {
                bbox: None,
                geometry: Some(geometry),
                id: Some(geojson::feature::Id::Number(serde_json::Number::from(polygon.region_id))),
                properties,
                foreign_members: None,
            });
        }

        // Add metadata to foreign members of the FeatureCollection
        let mut foreign_members = serde_json::Map::new();
        foreign_members.insert("image_width".to_string(), serde_json::Value::from(self.width));
        foreign_members.insert("image_height".to_string(), serde_json::Value::from(self.height));
        foreign_members.insert("shape_count".to_string(), serde_json::Value::from(self.polygons.len()));

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        })
    }

    /// Export to GeoJSON and serialize to JSON string
    pub fn to_geojson_string(&self) -> Result<String> {
        let geojson = self.to_geojson()?;
        Ok(serde_json::to_string_pretty(&geojson)?)
    }

    /// Save GeoJSON to file
    pub fn save_geojson<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let geojson_string = self.to_geojson_string()?;
        std::fs::write(path, geojson_string)?;
        Ok(())
    }

    /// Load a TracedOutline from a GeoJSON file
    pub fn from_geojson_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let geojson_str = std::fs::read_to_string(path)?;
        Self::from_geojson_string(&geojson_str)
    }

    /// Load a TracedOutline from a GeoJSON string written by `to_geojson`
    pub fn from_geojson_string(geojson_str: &str) -> Result<Self> {
        let geojson: FeatureCollection = geojson_str.parse()?;

        let foreign_members = geojson.foreign_members.as_ref()
            .ok_or_else(|| MaskError::GeometricComputation("Missing metadata in GeoJSON".to_string()))?;

        let dimension = |key: &str| {
            foreign_members.get(key)
                .and_then(|v| v.as_u64())
                .map(|v| v as usize)
                .ok_or_else(|| MaskError::GeometricComputation(format!("Missing or invalid {key}")))
        };
        let width = dimension("image_width")?;
        let height = dimension("image_height")?;

        let mut polygons = Vec::new();
        for (index, feature) in geojson.features.into_iter().enumerate() {
            let Some(Value::Polygon(rings)) = feature.geometry.map(|geometry| geometry.value) else {
                continue;
            };
            let Some(exterior) = rings.first() else {
                continue;
            };

            let mut vertices = exterior
                .iter()
                .map(|position| position_to_vertex(position))
                .collect::<Result<Vec<_>>>()?;
            if vertices.len() > 1 && vertices.first() == vertices.last() {
                vertices.pop();
            }

            let stored_id = feature
                .properties
                .as_ref()
                .and_then(|properties| properties.get("region_id"))
                .and_then(|value| value.as_i64())
                .and_then(|value| i32::try_from(value).ok());
            let region_id = match stored_id {
                Some(id) => id,
                None => region_id_for_index(index)?,
            };

            polygons.push(Polygon { region_id, vertices });
        }

        Ok(TracedOutline { polygons, width, height })
    }
}

/// Region id for a feature without one: its 1-based position
fn region_id_for_index(index: usize) -> Result<i32> {
    index
        .checked_add(1)
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| MaskError::GeometricComputation(format!("feature index {index} exceeds the region id range")))
}

fn position_to_vertex(position: &[f64]) -> Result<Vertex> {
    let &[x, y] = position else {
        return Err(MaskError::GeometricComputation(format!(
            "expected a 2D position, got {} coordinates",
            position.len()
        )));
    };
    let to_lattice = |value: f64| {
        (value.fract() == 0.0 && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX))
            .then_some(value as i32)
            .ok_or_else(|| MaskError::GeometricComputation(format!("{value} is not a lattice coordinate")))
    };
    Ok(Vertex::new(to_lattice(y)?, to_lattice(x)?))
}

/// Writes outlines as GeoJSON FeatureCollections
#[derive(Debug, Clone)]
pub struct GeoJsonSink {
    pub path: PathBuf,
}

impl GeoJsonSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl PolygonSink for GeoJsonSink {
    fn write_outline(&mut self, outline: &TracedOutline) -> Result<()> {
        outline.save_geojson(&self.path)
    }
}

/// Writes outlines as plain serde JSON
#[derive(Debug, Clone)]
pub struct JsonSink {
    pub path: PathBuf,
}

impl JsonSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl PolygonSink for JsonSink {
    fn write_outline(&mut self, outline: &TracedOutline) -> Result<()> {
        std::fs::write(&self.path, serde_json::to_string_pretty(outline)?)?;
        Ok(())
    }
}
