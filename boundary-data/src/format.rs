//! Mapping between file extensions, driver names and GeoJSON flavours.

use boundary_core::Driver;
use camino::Utf8Path;

/// Driver name of a GeoJSON FeatureCollection document.
pub const GEOJSON_DRIVER: &str = "GeoJSON";
/// Driver name of newline-delimited GeoJSON features.
pub const GEOJSONSEQ_DRIVER: &str = "GeoJSONSeq";

/// The two on-disk GeoJSON layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoJsonFormat {
    /// One FeatureCollection document.
    Document,
    /// One feature per line.
    Sequence,
}

impl GeoJsonFormat {
    /// Pick a format from the extension of `path`, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundary_data::GeoJsonFormat;
    /// use camino::Utf8Path;
    ///
    /// assert_eq!(
    ///     GeoJsonFormat::from_path(Utf8Path::new("survey.GeoJSON")),
    ///     Some(GeoJsonFormat::Document)
    /// );
    /// assert_eq!(GeoJsonFormat::from_path(Utf8Path::new("survey.shp")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        let extension = path.extension()?.to_ascii_lowercase();
        match extension.as_str() {
            "geojson" | "json" => Some(Self::Document),
            "geojsonl" | "geojsons" | "geojsonseq" => Some(Self::Sequence),
            _ => None,
        }
    }

    /// Format written by `driver`, if it is a GeoJSON driver.
    #[must_use]
    pub fn from_driver(driver: &Driver) -> Option<Self> {
        match driver.as_str() {
            GEOJSON_DRIVER => Some(Self::Document),
            GEOJSONSEQ_DRIVER => Some(Self::Sequence),
            _ => None,
        }
    }

    /// Driver name reported for datasets in this format.
    #[must_use]
    pub const fn driver_name(self) -> &'static str {
        match self {
            Self::Document => GEOJSON_DRIVER,
            Self::Sequence => GEOJSONSEQ_DRIVER,
        }
    }

    /// Driver reported for datasets in this format.
    #[must_use]
    pub fn driver(self) -> Driver {
        Driver::new(self.driver_name())
    }
}
