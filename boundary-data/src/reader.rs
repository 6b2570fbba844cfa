//! `SourceReader` over GeoJSON and GeoJSONSeq files.

use std::io;

use boundary_core::{Crs, SourceAccessError, SourceDataset, SourceDescriptor, SourceReader};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};

use crate::GeoJsonFormat;
use crate::document::{Document, Feature};
use crate::inference::infer_schema;

/// CRS assumed for GeoJSON without a legacy `crs` member.
pub const DEFAULT_CRS: &str = "OGC:CRS84";

/// RFC 8142 record separator that may prefix each sequence entry.
const RECORD_SEPARATOR: char = '\u{1e}';

/// Reads point records from GeoJSON files.
///
/// # Examples
///
/// ```no_run
/// use boundary_core::SourceReader;
/// use boundary_data::GeoJsonReader;
/// use camino::Utf8Path;
///
/// # fn main() -> Result<(), boundary_core::SourceAccessError> {
/// let reader = GeoJsonReader;
/// let dataset = reader.open(Utf8Path::new("wells.geojson"), None)?;
/// println!("driver: {}", dataset.descriptor.driver);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoJsonReader;

/// Decoded contents of one file.
struct Layer {
    name: String,
    crs: Crs,
    features: Vec<Feature>,
}

impl GeoJsonReader {
    fn read_to_string(path: &Utf8Path) -> Result<String, SourceAccessError> {
        boundary_fs::open_utf8_file(path)
            .and_then(io::read_to_string)
            .map_err(|source| SourceAccessError::Open {
                path: path.to_path_buf(),
                source,
            })
    }

    fn decode(
        path: &Utf8Path,
        format: GeoJsonFormat,
        text: &str,
    ) -> Result<Layer, SourceAccessError> {
        let decode_error = |message: String| SourceAccessError::Decode {
            path: path.to_path_buf(),
            message,
        };
        let stem = path.file_stem().unwrap_or_default().to_owned();
        match format {
            GeoJsonFormat::Document => {
                let document: Document =
                    serde_json::from_str(text).map_err(|err| decode_error(err.to_string()))?;
                let (name, crs, features) = document.into_parts();
                Ok(Layer {
                    name: name.unwrap_or(stem),
                    crs: crs.unwrap_or_else(|| Crs::new(DEFAULT_CRS)),
                    features,
                })
            }
            GeoJsonFormat::Sequence => {
                let features = text
                    .lines()
                    .enumerate()
                    .map(|(index, line)| (index, line.trim_start_matches(RECORD_SEPARATOR).trim()))
                    .filter(|(_, line)| !line.is_empty())
                    .map(|(index, line)| {
                        serde_json::from_str::<Feature>(line)
                            .map_err(|err| decode_error(format!("line {}: {err}", index + 1)))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Layer {
                    name: stem,
                    crs: Crs::new(DEFAULT_CRS),
                    features,
                })
            }
        }
    }
}

impl SourceReader for GeoJsonReader {
    fn open(
        &self,
        path: &Utf8Path,
        layer: Option<&str>,
    ) -> Result<SourceDataset<'_>, SourceAccessError> {
        let format =
            GeoJsonFormat::from_path(path).ok_or_else(|| SourceAccessError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;
        let text = Self::read_to_string(path)?;
        let decoded = Self::decode(path, format, &text)?;

        if let Some(requested) = layer.filter(|requested| *requested != decoded.name) {
            return Err(SourceAccessError::MissingLayer {
                path: path.to_path_buf(),
                layer: requested.to_owned(),
            });
        }

        let schema = infer_schema(&decoded.features);
        info!(
            "opened {} layer {:?} with {} features from {path}",
            format.driver_name(),
            decoded.name,
            decoded.features.len()
        );
        debug!(
            "layer {:?} uses {} with {} columns",
            decoded.name,
            decoded.crs,
            schema.fields.len()
        );

        let owned_path: Utf8PathBuf = path.to_path_buf();
        let records = decoded.features.into_iter().map(move |feature| {
            feature
                .into_record()
                .map_err(|message| SourceAccessError::Decode {
                    path: owned_path.clone(),
                    message,
                })
        });

        Ok(SourceDataset {
            descriptor: SourceDescriptor {
                crs: Some(decoded.crs),
                driver: format.driver(),
                schema,
            },
            records: Box::new(records),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boundary_core::{FieldType, GeometryKind, InputPoint, SourceGeometry, SourceRecord};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    fn collect(dataset: SourceDataset<'_>) -> Result<Vec<SourceRecord>, SourceAccessError> {
        dataset.records.collect()
    }

    #[fixture]
    fn workdir() -> TempDir {
        TempDir::new().unwrap_or_else(|err| panic!("create tempdir: {err}"))
    }

    fn write(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(name))
            .unwrap_or_else(|path| panic!("non-UTF-8 temp path {path:?}"));
        std::fs::write(&path, contents).unwrap_or_else(|err| panic!("write {path}: {err}"));
        path
    }

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "name": "wells",
        "crs": {"type": "name", "properties": {"name": "EPSG:27700"}},
        "features": [
            {"type": "Feature", "properties": {"depth": 12},
             "geometry": {"type": "Point", "coordinates": [1.0, 2.0, 30.0]}},
            {"type": "Feature", "properties": {"depth": null},
             "geometry": {"type": "MultiPoint", "coordinates": [[3, 4], [5, 6]]}},
            {"type": "Feature", "properties": {}, "geometry": null}
        ]
    }"#;

    #[rstest]
    fn reads_collection_members(workdir: TempDir) {
        let path = write(&workdir, "survey.geojson", COLLECTION);
        let reader = GeoJsonReader;
        let dataset = reader
            .open(&path, Some("wells"))
            .unwrap_or_else(|err| panic!("open: {err}"));

        assert_eq!(dataset.descriptor.driver.as_str(), "GeoJSON");
        assert_eq!(dataset.descriptor.crs, Some(Crs::new("EPSG:27700")));
        assert_eq!(dataset.descriptor.schema.geometry, GeometryKind::Point);
        assert_eq!(
            dataset.descriptor.schema.field("depth").map(|field| field.field_type),
            Some(FieldType::Int)
        );

        let records = collect(dataset).unwrap_or_else(|err| panic!("records: {err}"));
        assert_eq!(
            records,
            vec![
                SourceRecord::new(SourceGeometry::Point(InputPoint::new(1.0, 2.0, Some(30.0)))),
                SourceRecord::new(SourceGeometry::MultiPoint(vec![
                    InputPoint::new(3.0, 4.0, None),
                    InputPoint::new(5.0, 6.0, None),
                ])),
                SourceRecord::empty(),
            ]
        );
    }

    #[rstest]
    fn columns_keep_source_order(workdir: TempDir) {
        let path = write(
            &workdir,
            "plots.geojson",
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"zeta": 1, "alpha": "a", "mid": 2.5},
                 "geometry": {"type": "Point", "coordinates": [0, 0]}},
                {"type": "Feature", "properties": {"beta": true, "zeta": 3},
                 "geometry": {"type": "Point", "coordinates": [1, 1]}}
            ]}"#,
        );
        let reader = GeoJsonReader;
        let dataset = reader
            .open(&path, None)
            .unwrap_or_else(|err| panic!("open: {err}"));
        let names: Vec<&str> = dataset
            .descriptor
            .schema
            .fields
            .iter()
            .map(|field| field.name.as_str())
            .collect();
        assert_eq!(names, ["zeta", "alpha", "mid", "beta"]);
    }

    #[rstest]
    fn unnamed_collections_use_file_stem_and_default_crs(workdir: TempDir) {
        let path = write(
            &workdir,
            "plots.json",
            r#"{"type": "FeatureCollection", "features": []}"#,
        );
        let reader = GeoJsonReader;
        let dataset = reader
            .open(&path, Some("plots"))
            .unwrap_or_else(|err| panic!("open: {err}"));
        assert_eq!(dataset.descriptor.crs, Some(Crs::new(DEFAULT_CRS)));
    }

    #[rstest]
    fn reads_sequences_line_by_line(workdir: TempDir) {
        let path = write(
            &workdir,
            "track.geojsonl",
            "\u{1e}{\"type\":\"Feature\",\"properties\":{\"t\":1.5},\"geometry\":{\"type\":\"Point\",\"coordinates\":[0,0]}}\n\n\
             {\"type\":\"Feature\",\"properties\":{\"t\":2},\"geometry\":{\"type\":\"Point\",\"coordinates\":[1,1]}}\n",
        );
        let reader = GeoJsonReader;
        let dataset = reader
            .open(&path, None)
            .unwrap_or_else(|err| panic!("open: {err}"));
        assert_eq!(dataset.descriptor.driver.as_str(), "GeoJSONSeq");
        assert_eq!(
            dataset.descriptor.schema.field("t").map(|field| field.field_type),
            Some(FieldType::Float)
        );
        let records = collect(dataset).unwrap_or_else(|err| panic!("records: {err}"));
        assert_eq!(records.len(), 2);
    }

    #[rstest]
    fn reports_sequence_line_of_decode_failures(workdir: TempDir) {
        let path = write(&workdir, "broken.geojsons", "{\"type\":\"Feature\"}\nnot json\n");
        let err = GeoJsonReader.open(&path, None).expect_err("decode failure");
        match err {
            SourceAccessError::Decode { message, .. } => {
                assert!(message.starts_with("line 2:"), "unexpected message {message}");
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[rstest]
    fn rejects_unknown_extensions(workdir: TempDir) {
        let path = write(&workdir, "points.csv", "x,y\n");
        let err = GeoJsonReader.open(&path, None).expect_err("unsupported");
        assert!(matches!(err, SourceAccessError::UnsupportedFormat { .. }));
    }

    #[rstest]
    fn missing_files_fail_to_open(workdir: TempDir) {
        let path = Utf8PathBuf::from_path_buf(workdir.path().join("absent.geojson"))
            .unwrap_or_else(|path| panic!("non-UTF-8 temp path {path:?}"));
        let err = GeoJsonReader.open(&path, None).expect_err("missing file");
        match err {
            SourceAccessError::Open { path: reported, source } => {
                assert_eq!(reported, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected open error, got {other:?}"),
        }
    }

    #[rstest]
    fn unknown_layers_are_missing(workdir: TempDir) {
        let path = write(&workdir, "survey.geojson", COLLECTION);
        let err = GeoJsonReader.open(&path, Some("roads")).expect_err("missing layer");
        match err {
            SourceAccessError::MissingLayer { layer, .. } => assert_eq!(layer, "roads"),
            other => panic!("expected missing layer, got {other:?}"),
        }
    }

    #[rstest]
    fn malformed_positions_surface_while_iterating(workdir: TempDir) {
        let path = write(
            &workdir,
            "bad.geojson",
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [0, 0]}},
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": ["x"]}}
            ]}"#,
        );
        let reader = GeoJsonReader;
        let mut dataset = reader
            .open(&path, None)
            .unwrap_or_else(|err| panic!("open: {err}"));
        assert!(matches!(dataset.records.next(), Some(Ok(_))));
        assert!(matches!(
            dataset.records.next(),
            Some(Err(SourceAccessError::Decode { .. }))
        ));
    }
}
