//! `Sink` writing hull features as GeoJSON or GeoJSONSeq.

use std::io::{BufWriter, Write};

use boundary_core::{Crs, OutputFeature, Sink, SinkHandle, SinkTarget, SinkWriteError};
use camino::Utf8PathBuf;
use cap_std::fs_utf8::File;
use log::debug;
use serde::Serialize;

use crate::GeoJsonFormat;
use crate::document::{CollectionHeader, FeatureOut};

/// Writes output features to GeoJSON files, replacing existing files.
///
/// # Examples
///
/// ```no_run
/// use boundary_core::{AttributeSchema, Driver, GeometryKind, Sink, SinkHandle, SinkTarget};
/// use boundary_data::GeoJsonSink;
///
/// # fn main() -> Result<(), boundary_core::SinkWriteError> {
/// let target = SinkTarget {
///     path: "hull.geojson".into(),
///     layer: "hull".to_owned(),
///     schema: AttributeSchema::new(GeometryKind::Polygon, Vec::new()),
///     driver: Driver::new("GeoJSON"),
///     crs: None,
/// };
/// let handle = GeoJsonSink.create(&target)?;
/// handle.finish()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoJsonSink;

/// Open output file; call [`SinkHandle::finish`] to complete it.
pub struct GeoJsonHandle {
    path: Utf8PathBuf,
    format: GeoJsonFormat,
    writer: BufWriter<File>,
    written: usize,
}

impl std::fmt::Debug for GeoJsonHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoJsonHandle")
            .field("path", &self.path)
            .field("format", &self.format)
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}

impl Sink for GeoJsonSink {
    type Handle = GeoJsonHandle;

    fn create(&self, target: &SinkTarget) -> Result<Self::Handle, SinkWriteError> {
        let format = GeoJsonFormat::from_driver(&target.driver).ok_or_else(|| {
            SinkWriteError::UnsupportedDriver {
                driver: target.driver.clone(),
                path: target.path.clone(),
            }
        })?;
        if let Some(crs) = target.crs.as_ref().filter(|crs| crs.as_str().trim().is_empty()) {
            return Err(SinkWriteError::InvalidCrs {
                crs: crs.as_str().to_owned(),
            });
        }

        let file =
            boundary_fs::create_utf8_file(&target.path).map_err(|source| SinkWriteError::Create {
                path: target.path.clone(),
                source,
            })?;
        let mut handle = GeoJsonHandle {
            path: target.path.clone(),
            format,
            writer: BufWriter::new(file),
            written: 0,
        };
        if format == GeoJsonFormat::Document {
            handle.write_header(&target.layer, target.crs.as_ref())?;
        }
        debug!(
            "created {} layer {:?} at {}",
            format.driver_name(),
            target.layer,
            target.path
        );
        Ok(handle)
    }
}

impl GeoJsonHandle {
    /// Number of features written so far.
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, SinkWriteError> {
        serde_json::to_vec(value).map_err(|err| SinkWriteError::Encode {
            path: self.path.clone(),
            message: err.to_string(),
        })
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SinkWriteError> {
        self.writer
            .write_all(bytes)
            .map_err(|source| SinkWriteError::Write {
                path: self.path.clone(),
                source,
            })
    }

    /// Write the collection members and open the feature array.
    fn write_header(&mut self, layer: &str, crs: Option<&Crs>) -> Result<(), SinkWriteError> {
        let mut header = self.encode(&CollectionHeader::new(layer, crs))?;
        // Reopen the serialised object so the feature array can be streamed.
        header.pop();
        header.extend_from_slice(b",\"features\":[");
        self.write_bytes(&header)
    }
}

impl SinkHandle for GeoJsonHandle {
    fn write(&mut self, feature: &OutputFeature) -> Result<(), SinkWriteError> {
        // serde_json writes non-finite floats as null, which is not a position.
        if let Some(coord) = feature
            .geometry
            .exterior()
            .coords()
            .chain(feature.geometry.interiors().iter().flat_map(|ring| ring.coords()))
            .find(|coord| !(coord.x.is_finite() && coord.y.is_finite()))
        {
            return Err(SinkWriteError::Encode {
                path: self.path.clone(),
                message: format!("non-finite coordinate ({}, {})", coord.x, coord.y),
            });
        }
        let encoded = self.encode(&FeatureOut::new(&feature.geometry, &feature.properties))?;
        match self.format {
            GeoJsonFormat::Document => {
                if self.written > 0 {
                    self.write_bytes(b",\n")?;
                } else {
                    self.write_bytes(b"\n")?;
                }
                self.write_bytes(&encoded)?;
            }
            GeoJsonFormat::Sequence => {
                self.write_bytes(&encoded)?;
                self.write_bytes(b"\n")?;
            }
        }
        self.written += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<(), SinkWriteError> {
        if self.format == GeoJsonFormat::Document {
            self.write_bytes(b"\n]}\n")?;
        }
        self.writer.flush().map_err(|source| SinkWriteError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("finished {} with {} features", self.path, self.written);
        Ok(())
    }
}
