//! Behavioural coverage for hull caching and schema negotiation on export.

use std::cell::RefCell;

use boundary_core::test_support::{
    MemoryReader, MemorySource, RecordingSink, ScriptedHullEngine, square_source,
};
use boundary_core::{
    AttributeSchema, BoundaryAdapter, ExportError, ExportReport, ExportRequest, FieldDefinition,
    FieldType, FieldValue, GeometryKind, HullDecision,
};
use camino::{Utf8Path, Utf8PathBuf};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type MemoryAdapter = BoundaryAdapter<MemoryReader, ScriptedHullEngine, RecordingSink>;

/// Scenario state: the adapter under test, its sink and every export outcome.
pub struct ExportWorld {
    sink: RecordingSink,
    adapter: RefCell<Option<MemoryAdapter>>,
    exports: RefCell<Vec<Result<ExportReport, ExportError>>>,
}

/// Fresh state for each scenario.
#[fixture]
pub fn world() -> ExportWorld {
    ExportWorld {
        sink: RecordingSink::default(),
        adapter: RefCell::new(None),
        exports: RefCell::new(Vec::new()),
    }
}

impl ExportWorld {
    fn ingest(&self, path: &str, source: MemorySource) {
        let reader = MemoryReader::default().with_source(path, source);
        let mut adapter =
            BoundaryAdapter::new(reader, ScriptedHullEngine::new(1.0), self.sink.clone());
        adapter
            .ingest(Utf8Path::new(path), None)
            .unwrap_or_else(|err| panic!("ingest {path}: {err}"));
        self.adapter.replace(Some(adapter));
    }

    fn export(&self, request: &ExportRequest) {
        let outcome = self
            .adapter
            .borrow_mut()
            .as_mut()
            .unwrap_or_else(|| panic!("a source should be ingested first"))
            .export(request);
        self.exports.borrow_mut().push(outcome);
    }

    fn report(&self, index: usize) -> ExportReport {
        match self.exports.borrow().get(index) {
            Some(Ok(report)) => report.clone(),
            other => panic!("expected export {index} to succeed, found {other:?}"),
        }
    }
}

#[given("a GeoPackage source of a square has been ingested")]
fn geopackage_square(world: &ExportWorld) {
    world.ingest("/data/wells.gpkg", square_source("GPKG"));
}

#[given("a CSV source with name and depth columns has been ingested")]
fn csv_source(world: &ExportWorld) {
    let schema = AttributeSchema::new(
        GeometryKind::Point,
        vec![
            FieldDefinition::new("name", FieldType::Str),
            FieldDefinition::new("depth", FieldType::Float),
        ],
    );
    world.ingest("/data/wells.csv", square_source("CSV").with_schema(schema));
}

#[given("a Shapefile source of a square has been ingested")]
fn shapefile_square(world: &ExportWorld) {
    world.ingest("/data/towns.shp", square_source("ESRI Shapefile"));
}

#[when("I export without hull parameters")]
fn export_plain(world: &ExportWorld) {
    world.export(&ExportRequest::default());
}

#[when("I export twice without hull parameters")]
fn export_twice(world: &ExportWorld) {
    world.export(&ExportRequest::default());
    world.export(&ExportRequest::default());
}

#[when("I export with tolerance 2 and then with tolerance 3")]
fn export_two_tolerances(world: &ExportWorld) {
    world.export(&ExportRequest::default().with_tolerance(2.0));
    world.export(&ExportRequest::default().with_tolerance(3.0));
}

#[when("I export with the GeoJSON driver")]
fn export_geojson(world: &ExportWorld) {
    world.export(&ExportRequest::default().with_driver("GeoJSON"));
}

#[then("both exports write identical features")]
fn identical_features(world: &ExportWorld) {
    let writes = world.sink.writes();
    assert_eq!(writes.len(), 2);
    let features: Vec<_> = writes.iter().map(|(_, features)| features.clone()).collect();
    assert_eq!(features.first(), features.get(1));
}

#[then("the second export reused the cached hull")]
fn reused(world: &ExportWorld) {
    assert!(matches!(world.report(0).hull, HullDecision::Computed(_)));
    assert!(matches!(world.report(1).hull, HullDecision::Reused(_)));
}

#[then("the two exported hulls differ")]
fn hulls_differ(world: &ExportWorld) {
    let writes = world.sink.writes();
    let geometries: Vec<_> = writes
        .iter()
        .flat_map(|(_, features)| features.iter().map(|feature| feature.geometry.clone()))
        .collect();
    assert_eq!(geometries.len(), 2);
    assert_ne!(geometries.first(), geometries.get(1));
}

#[then("the properties are id, Area, Perimeter and Vertices")]
fn summary_properties(world: &ExportWorld) {
    let properties = world.report(0).properties;
    let names: Vec<&str> = properties.names().collect();
    assert_eq!(names, ["id", "Area", "Perimeter", "Vertices"]);
    assert_eq!(properties.get("id"), Some(&FieldValue::Int(1)));
    match properties.get("Vertices") {
        Some(FieldValue::Int(vertices)) => assert!((1..=5).contains(vertices)),
        other => panic!("expected an integer vertex count, found {other:?}"),
    }
}

#[then("every source column is written as null")]
fn null_filled(world: &ExportWorld) {
    let properties = world.report(0).properties;
    let entries: Vec<(&str, &FieldValue)> = properties.iter().collect();
    assert_eq!(
        entries,
        [("name", &FieldValue::Null), ("depth", &FieldValue::Null)]
    );
}

#[then("a missing output path error is returned")]
fn missing_output_path(world: &ExportWorld) {
    match world.exports.borrow().first() {
        Some(Err(ExportError::MissingOutputPath { driver, .. })) => {
            assert_eq!(driver.as_str(), "GeoJSON");
        }
        other => panic!("expected a missing output path error, found {other:?}"),
    }
    assert!(world.sink.writes().is_empty());
}

#[then("the output is written next to the source as concave_hull.shp")]
fn default_output_path(world: &ExportWorld) {
    let report = world.report(0);
    assert_eq!(report.path, Utf8PathBuf::from("/data/concave_hull.shp"));
    assert_eq!(report.layer, "concave_hull");
    assert_eq!(report.driver.as_str(), "ESRI Shapefile");
}

#[scenario(path = "tests/features/hull_export.feature", index = 0)]
fn reusing_cached_hull(world: ExportWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/hull_export.feature", index = 1)]
fn recomputing_for_new_tolerance(world: ExportWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/hull_export.feature", index = 2)]
fn summarising_for_gis_driver(world: ExportWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/hull_export.feature", index = 3)]
fn null_filling_for_other_drivers(world: ExportWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/hull_export.feature", index = 4)]
fn switching_driver_without_output(world: ExportWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/hull_export.feature", index = 5)]
fn deriving_default_output_path(world: ExportWorld) {
    let _ = world;
}
