//! Geography input: GeoJSON `FeatureCollection` → [`GeoFeature`]s.
//!
//! Only what the registry needs is extracted: a stable id, the
//! administrative name hierarchy (`name_0` … `name_3`) and a bounding box.
//! The box comes from the feature's `bbox` member when present, otherwise
//! it is computed from the geometry's coordinates.

use serde::Deserialize;
use serde_json::{Map, Value};

use epi_core::{BoundingBox, GeoPoint};

use crate::{RegionError, RegionResult};

/// Property consulted for the region id when the caller has no preference.
pub const DEFAULT_ID_PROPERTY: &str = "id_3";

/// Name hierarchy properties, country first.
const NAME_PROPERTIES: [&str; 4] = ["name_0", "name_1", "name_2", "name_3"];

/// One geographic feature as consumed by the registry builder.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoFeature {
    pub key:   String,
    pub names: Vec<String>,
    pub bbox:  BoundingBox,
}

impl GeoFeature {
    pub fn new(key: impl Into<String>, names: Vec<String>, bbox: BoundingBox) -> Self {
        Self { key: key.into(), names, bbox }
    }

    #[inline]
    pub fn centroid(&self) -> GeoPoint {
        self.bbox.centroid()
    }
}

// ── Raw GeoJSON shapes ────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    bbox: Option<Vec<f64>>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(default)]
    coordinates: Value,
    /// `GeometryCollection` members.
    #[serde(default)]
    geometries: Vec<RawGeometry>,
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse a GeoJSON `FeatureCollection`.
///
/// The id is read from `id_property`, then `id_3`, then `id_2`, then the
/// feature's top-level `id`.  String and numeric ids are both accepted.
pub fn parse_feature_collection(json: &str, id_property: &str) -> RegionResult<Vec<GeoFeature>> {
    let raw: RawCollection = serde_json::from_str(json)?;
    raw.features
        .into_iter()
        .enumerate()
        .map(|(index, f)| convert(index, f, id_property))
        .collect()
}

fn convert(index: usize, raw: RawFeature, id_property: &str) -> RegionResult<GeoFeature> {
    let props = raw.properties.unwrap_or_default();

    let key = [id_property, "id_3", "id_2"]
        .into_iter()
        .find_map(|p| props.get(p).and_then(id_string))
        .or_else(|| raw.id.as_ref().and_then(id_string))
        .ok_or(RegionError::MissingId { index })?;

    let names = NAME_PROPERTIES
        .iter()
        .filter_map(|p| props.get(*p).and_then(Value::as_str))
        .map(str::to_owned)
        .collect();

    let bbox = raw
        .bbox
        .as_deref()
        .and_then(BoundingBox::from_slice)
        .or_else(|| {
            let mut positions = Vec::new();
            if let Some(g) = &raw.geometry {
                collect_geometry(g, &mut positions);
            }
            BoundingBox::enclosing(positions)
        })
        .ok_or_else(|| RegionError::MissingBoundingBox { key: key.clone() })?;

    Ok(GeoFeature { key, names, bbox })
}

fn id_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn collect_geometry(g: &RawGeometry, out: &mut Vec<(f64, f64)>) {
    collect_positions(&g.coordinates, out);
    for member in &g.geometries {
        collect_geometry(member, out);
    }
}

/// Walk arbitrarily nested coordinate arrays; a position is an array whose
/// first two members are numbers (`[lon, lat, ...]`).
fn collect_positions(v: &Value, out: &mut Vec<(f64, f64)>) {
    let Value::Array(items) = v else { return };
    match (items.first().and_then(Value::as_f64), items.get(1).and_then(Value::as_f64)) {
        (Some(lon), Some(lat)) => out.push((lon, lat)),
        _ => {
            for item in items {
                collect_positions(item, out);
            }
        }
    }
}
