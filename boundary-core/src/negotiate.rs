//! Output schema negotiation.
//!
//! The output schema depends on the target driver through a lookup table
//! mapping driver identifiers to a [`SchemaStrategy`]. Supporting another
//! driver is a table entry, not a new branch.

use std::collections::HashMap;

use crate::{
    AttributeSchema, Driver, FieldDefinition, FieldType, FieldValue, GeometryKind, HullPolygon,
    PropertiesRecord,
};

/// Drivers that receive the synthesised hull summary schema by default.
pub const GIS_DRIVERS: [&str; 4] = ["ESRI Shapefile", "GPKG", "GeoJSON", "OpenFileGDB"];

/// Column names of the hull summary schema.
pub mod summary_fields {
    /// Feature identifier, always `1`.
    pub const ID: &str = "id";
    /// Hull area.
    pub const AREA: &str = "Area";
    /// Hull boundary length.
    pub const PERIMETER: &str = "Perimeter";
    /// Distinct boundary vertices.
    pub const VERTICES: &str = "Vertices";
}

/// How the output schema is derived for a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaStrategy {
    /// Four synthesised columns describing the hull.
    HullSummary,
    /// The source schema with a polygon geometry and every value null.
    SourcePassthrough,
}

/// Lookup table from driver identifier to schema strategy.
///
/// Drivers missing from the table fall back to
/// [`SchemaStrategy::SourcePassthrough`]. Lookups are case-sensitive.
///
/// # Examples
///
/// ```
/// use boundary_core::{Driver, DriverCapabilities, SchemaStrategy};
///
/// let mut table = DriverCapabilities::default();
/// assert_eq!(table.strategy_for(&Driver::from("GPKG")), SchemaStrategy::HullSummary);
/// assert_eq!(table.strategy_for(&Driver::from("CSV")), SchemaStrategy::SourcePassthrough);
///
/// table.register("FlatGeobuf", SchemaStrategy::HullSummary);
/// assert_eq!(table.strategy_for(&Driver::from("FlatGeobuf")), SchemaStrategy::HullSummary);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverCapabilities {
    strategies: HashMap<String, SchemaStrategy>,
}

impl Default for DriverCapabilities {
    fn default() -> Self {
        Self {
            strategies: GIS_DRIVERS
                .iter()
                .map(|name| ((*name).to_owned(), SchemaStrategy::HullSummary))
                .collect(),
        }
    }
}

impl DriverCapabilities {
    /// A table with no entries; every driver falls back to passthrough.
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Add or replace the strategy for `driver`.
    pub fn register(&mut self, driver: impl Into<String>, strategy: SchemaStrategy) {
        self.strategies.insert(driver.into(), strategy);
    }

    /// Strategy for `driver`.
    pub fn strategy_for(&self, driver: &Driver) -> SchemaStrategy {
        self.strategies
            .get(driver.as_str())
            .copied()
            .unwrap_or(SchemaStrategy::SourcePassthrough)
    }

    /// Negotiate the output schema for `driver` given the source schema.
    ///
    /// Without a source schema, passthrough yields a polygon schema with no
    /// columns.
    pub fn negotiate(
        &self,
        driver: &Driver,
        source_schema: Option<&AttributeSchema>,
    ) -> NegotiatedSchema {
        match self.strategy_for(driver) {
            SchemaStrategy::HullSummary => NegotiatedSchema::hull_summary(),
            SchemaStrategy::SourcePassthrough => NegotiatedSchema::passthrough(source_schema),
        }
    }
}

/// Fills a [`PropertiesRecord`] for a negotiated schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertiesBuilder {
    /// `id`, rounded `Area` and `Perimeter`, and `Vertices`.
    HullSummary,
    /// Every named column set to null.
    NullFilled(Vec<String>),
}

impl PropertiesBuilder {
    /// Build the properties of the single output feature.
    pub fn build(&self, hull: &HullPolygon) -> PropertiesRecord {
        let mut record = PropertiesRecord::new();
        match self {
            Self::HullSummary => {
                record.insert(summary_fields::ID, FieldValue::Int(1));
                record.insert(summary_fields::AREA, FieldValue::Float(round3(hull.area())));
                record.insert(
                    summary_fields::PERIMETER,
                    FieldValue::Float(round3(hull.perimeter())),
                );
                record.insert(
                    summary_fields::VERTICES,
                    FieldValue::Int(
                        i64::try_from(hull.boundary_vertex_count()).unwrap_or(i64::MAX),
                    ),
                );
            }
            Self::NullFilled(names) => {
                for name in names {
                    record.insert(name.as_str(), FieldValue::Null);
                }
            }
        }
        record
    }
}

/// Output schema plus the builder for its properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiatedSchema {
    /// Schema handed to the sink.
    pub schema: AttributeSchema,
    /// Builder for the feature properties.
    pub properties: PropertiesBuilder,
}

impl NegotiatedSchema {
    fn hull_summary() -> Self {
        Self {
            schema: AttributeSchema::new(
                GeometryKind::Polygon,
                vec![
                    FieldDefinition::new(summary_fields::ID, FieldType::Int),
                    FieldDefinition::new(summary_fields::AREA, FieldType::Float),
                    FieldDefinition::new(summary_fields::PERIMETER, FieldType::Float),
                    FieldDefinition::new(summary_fields::VERTICES, FieldType::Int),
                ],
            ),
            properties: PropertiesBuilder::HullSummary,
        }
    }

    fn passthrough(source_schema: Option<&AttributeSchema>) -> Self {
        let fields = source_schema
            .map(|schema| schema.fields.clone())
            .unwrap_or_default();
        let names = fields.iter().map(|field| field.name.clone()).collect();
        Self {
            schema: AttributeSchema::new(GeometryKind::Polygon, fields),
            properties: PropertiesBuilder::NullFilled(names),
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
