//! Province boundaries and the region/geometry join behind the map

use std::fs;
use std::path::Path;
use std::time::Instant;

use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DemographyError, Result};
use crate::filter::error::{int64_column, string_column};
use crate::schema::{REGION, VALUE};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Value,
}

/// Boundary of one region
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub name: String,
    /// GeoJSON geometry object, passed through untouched
    pub geometry: Value,
}

/// Region boundaries keyed by name, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Boundaries {
    features: Vec<BoundaryFeature>,
}

impl Boundaries {
    /// Read a GeoJSON `FeatureCollection`
    ///
    /// The region name is read from the feature property `name_property`.
    /// Features without it are skipped with a warning.
    pub fn from_path(path: impl AsRef<Path>, name_property: &str) -> Result<Self> {
        let path = path.as_ref();
        let start = Instant::now();
        log_operation_start("Reading region boundaries from", path);

        let text = fs::read_to_string(path)?;
        let boundaries = Self::from_geojson_str(&text, name_property)?;

        log_operation_complete("read", path, boundaries.len(), Some(start.elapsed()));
        Ok(boundaries)
    }

    /// Parse a GeoJSON `FeatureCollection` held in memory
    pub fn from_geojson_str(text: &str, name_property: &str) -> Result<Self> {
        let collection: FeatureCollection = serde_json::from_str(text)?;
        if collection.kind != "FeatureCollection" {
            return Err(DemographyError::schema(
                "boundaries",
                format!("expected a FeatureCollection, found {}", collection.kind),
            ));
        }

        let mut features = Vec::with_capacity(collection.features.len());
        for (idx, feature) in collection.features.into_iter().enumerate() {
            let name = feature
                .properties
                .as_ref()
                .and_then(|p| p.get(name_property))
                .and_then(Value::as_str);
            match name {
                Some(name) => features.push(BoundaryFeature {
                    name: name.to_string(),
                    geometry: feature.geometry,
                }),
                None => log_warning(
                    &format!("Boundary feature {idx} has no '{name_property}' property, skipping"),
                    None,
                ),
            }
        }

        Ok(Self { features })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name.as_str())
    }

    pub fn features(&self) -> &[BoundaryFeature] {
        &self.features
    }
}

/// A region's value attached to its boundary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionShape {
    pub region: String,
    pub value: Option<i64>,
    pub geometry: Value,
}

/// Attach per-region values to the boundaries with the same name
///
/// `values` needs `Region` and `Value` columns, one row per region. Names
/// must match exactly; shapes come out in boundary file order.
///
/// # Errors
/// Returns `GeometryJoinMismatch` listing every region of `values` that has
/// no boundary, instead of silently leaving it off the map. Regions are
/// matched by name, so each region yields at most one shape even when the
/// boundary file repeats a name.
pub fn join_regions(values: &RecordBatch, boundaries: &Boundaries) -> Result<Vec<RegionShape>> {
    let regions = string_column(values, REGION)?;
    let counts = int64_column(values, VALUE)?;

    let mut by_region: FxHashMap<&str, Option<i64>> = FxHashMap::default();
    for i in 0..values.num_rows() {
        if regions.is_null(i) {
            continue;
        }
        let value = (!counts.is_null(i)).then(|| counts.value(i));
        by_region.entry(regions.value(i)).or_insert(value);
    }

    let mut joined: FxHashSet<&str> = FxHashSet::default();
    let mut shapes = Vec::with_capacity(by_region.len());
    for feature in boundaries.features() {
        let name = feature.name.as_str();
        let Some(value) = by_region.get(name) else {
            continue;
        };
        if !joined.insert(name) {
            log_warning(&format!("Duplicate boundary for '{name}', keeping the first"), None);
            continue;
        }
        shapes.push(RegionShape {
            region: feature.name.clone(),
            value: *value,
            geometry: feature.geometry.clone(),
        });
    }

    let missing: Vec<String> = (0..values.num_rows())
        .filter(|&i| !regions.is_null(i))
        .map(|i| regions.value(i))
        .filter(|region| !joined.contains(region))
        .unique()
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(DemographyError::GeometryJoinMismatch {
            expected: by_region.len(),
            missing,
        });
    }

    Ok(shapes)
}
