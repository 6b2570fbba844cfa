//! Test helpers for writing point layers to a scratch directory.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Scratch directory holding GeoJSON inputs and outputs.
#[derive(Debug)]
pub(super) struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub(super) fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().join(name)).expect("utf-8 workspace")
    }

    /// Write a named point collection and return its path.
    pub(super) fn point_layer(
        &self,
        file: &str,
        layer: &str,
        coords: &[(f64, f64)],
    ) -> Utf8PathBuf {
        let path = self.path(file);
        let features: Vec<Value> = coords
            .iter()
            .enumerate()
            .map(|(index, (x, y))| {
                json!({
                    "type": "Feature",
                    "properties": {"ref": format!("P{index}"), "depth": index},
                    "geometry": {"type": "Point", "coordinates": [x, y]}
                })
            })
            .collect();
        let document = json!({
            "type": "FeatureCollection",
            "name": layer,
            "crs": {"type": "name", "properties": {"name": "EPSG:27700"}},
            "features": features,
        });
        write_utf8(&path, document.to_string().as_bytes());
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture file");
}

/// Corners and centre of a square with side `size` anchored at `origin`.
pub(super) fn square(origin: (f64, f64), size: f64) -> Vec<(f64, f64)> {
    let (x, y) = origin;
    vec![
        (x, y),
        (x + size, y),
        (x + size, y + size),
        (x, y + size),
        (x + size / 2.0, y + size / 2.0),
    ]
}

/// Parse a GeoJSON file written by the sink.
pub(super) fn read_json(path: &Utf8Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read output");
    serde_json::from_str(&text).expect("output is JSON")
}
