//! The stateful adapter tying ingestion, the hull cache and export together.

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};

use crate::{
    DEFAULT_OUTPUT_NAME, Driver, DriverCapabilities, ExportError, ExportReport, ExportRequest,
    HullCache, HullEngine, HullPolygon, HullRequest, IngestSummary, OutputFeature, PointSet, Sink,
    SinkHandle, SinkTarget, SourceAccessError, SourceDescriptor, SourceReader, compute_or_reuse,
    derive_output_path, ingest_records,
};

/// Accumulates points from sources and exports their hull.
///
/// The adapter owns the point set, the descriptor of the last source and the
/// hull cache. It is generic over its collaborators: a [`SourceReader`], a
/// [`HullEngine`] and a [`Sink`].
///
/// Methods take `&mut self`; one adapter serves one caller at a time.
#[derive(Debug)]
pub struct BoundaryAdapter<R, H, S> {
    reader: R,
    engine: H,
    sink: S,
    capabilities: DriverCapabilities,
    points: PointSet,
    descriptor: Option<SourceDescriptor>,
    last_source: Option<Utf8PathBuf>,
    cache: HullCache,
}

impl<R, H, S> BoundaryAdapter<R, H, S>
where
    R: SourceReader,
    H: HullEngine,
    S: Sink,
{
    /// Build an adapter with the default driver capability table.
    pub fn new(reader: R, engine: H, sink: S) -> Self {
        Self::with_capabilities(reader, engine, sink, DriverCapabilities::default())
    }

    /// Build an adapter with an explicit driver capability table.
    pub const fn with_capabilities(
        reader: R,
        engine: H,
        sink: S,
        capabilities: DriverCapabilities,
    ) -> Self {
        Self {
            reader,
            engine,
            sink,
            capabilities,
            points: PointSet::new(),
            descriptor: None,
            last_source: None,
            cache: HullCache::empty(),
        }
    }

    /// Points accumulated so far.
    pub const fn points(&self) -> &PointSet {
        &self.points
    }

    /// Metadata of the most recently ingested source.
    pub const fn descriptor(&self) -> Option<&SourceDescriptor> {
        self.descriptor.as_ref()
    }

    /// Path of the most recently ingested source.
    pub fn last_source(&self) -> Option<&Utf8Path> {
        self.last_source.as_deref()
    }

    /// The cached hull, if one has been computed.
    pub fn cached_hull(&self) -> Option<&HullPolygon> {
        self.cache.hull()
    }

    /// The hull cache.
    pub const fn cache(&self) -> &HullCache {
        &self.cache
    }

    /// Read Point and MultiPoint geometries from `path` into the point set.
    ///
    /// The source descriptor is replaced; points accumulate across calls.
    /// Other geometry types are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SourceAccessError`] when the dataset or layer cannot be
    /// opened, or a record fails to decode. Points read before a decoding
    /// failure are kept.
    pub fn ingest(
        &mut self,
        path: &Utf8Path,
        layer: Option<&str>,
    ) -> Result<IngestSummary, SourceAccessError> {
        let dataset = self.reader.open(path, layer)?;
        debug!(
            "opened {path} with driver {} ({} fields)",
            dataset.descriptor.driver,
            dataset.descriptor.schema.fields.len()
        );
        self.descriptor = Some(dataset.descriptor);
        self.last_source = Some(path.to_path_buf());

        let summary = ingest_records(&mut self.points, dataset.records)?;
        info!(
            "ingested {} points from {} records in {path} ({} skipped)",
            summary.points, summary.records, summary.skipped
        );
        Ok(summary)
    }

    /// Write the hull of the accumulated points as a single feature.
    ///
    /// The hull is rebuilt when `request` carries a percentile or tolerance,
    /// built with the engine default when nothing is cached, and reused
    /// otherwise. Driver and CRS overrides apply to this call only.
    ///
    /// # Errors
    ///
    /// - [`ExportError::Hull`] when the hull cannot be built.
    /// - [`ExportError::MissingDriver`] when no driver is known.
    /// - [`ExportError::MissingOutputPath`] when the driver changed, or no
    ///   source was ingested, and no output path was given.
    /// - [`ExportError::Sink`] when the sink fails.
    pub fn export(&mut self, request: &ExportRequest) -> Result<ExportReport, ExportError> {
        let hull_request = HullRequest::from_parameters(request.percentile, request.tolerance);
        let resolution = compute_or_reuse(&self.cache, hull_request, &self.engine, &self.points)?;
        self.cache = resolution.cache;

        let recorded_driver = self.descriptor.as_ref().map(|descriptor| &descriptor.driver);
        let (driver, driver_changed) = match (&request.driver, recorded_driver) {
            (Some(requested), Some(recorded)) => (requested.clone(), requested != recorded),
            (Some(requested), None) => (requested.clone(), true),
            (None, Some(recorded)) => (recorded.clone(), false),
            (None, None) => return Err(ExportError::MissingDriver),
        };
        let crs = request.crs.clone().or_else(|| {
            self.descriptor
                .as_ref()
                .and_then(|descriptor| descriptor.crs.clone())
        });

        let negotiated = self.capabilities.negotiate(
            &driver,
            self.descriptor.as_ref().map(|descriptor| &descriptor.schema),
        );
        let feature = OutputFeature {
            geometry: resolution.hull.polygon().clone(),
            properties: negotiated.properties.build(&resolution.hull),
        };

        let path =
            self.resolve_output_path(request.output_path.as_deref(), &driver, driver_changed)?;
        let layer = request
            .output_layer
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_owned());

        let target = SinkTarget {
            path,
            layer,
            schema: negotiated.schema,
            driver,
            crs,
        };
        let mut handle = self.sink.create(&target)?;
        handle.write(&feature)?;
        handle.finish()?;

        let report = ExportReport {
            path: target.path,
            layer: target.layer,
            driver: target.driver,
            crs: target.crs,
            hull: resolution.decision,
            properties: feature.properties,
        };
        info!(
            "wrote hull to {} (layer {}, driver {})",
            report.path, report.layer, report.driver
        );
        Ok(report)
    }

    fn resolve_output_path(
        &self,
        requested: Option<&Utf8Path>,
        driver: &Driver,
        driver_changed: bool,
    ) -> Result<Utf8PathBuf, ExportError> {
        if let Some(path) = requested {
            return Ok(path.to_path_buf());
        }
        let Some(source) = self.last_source.as_deref() else {
            return Err(ExportError::MissingOutputPath {
                driver: driver.clone(),
                reason: "no source has been ingested",
            });
        };
        if driver_changed {
            return Err(ExportError::MissingOutputPath {
                driver: driver.clone(),
                reason: "the driver differs from the source driver",
            });
        }
        derive_output_path(source)
    }
}
