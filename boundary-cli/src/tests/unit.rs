//! Focused unit tests covering hull CLI configuration and reporting.

use super::*;
use crate::hull::{HullArgs, HullConfig, config_from_layers_for_test};
use boundary_core::{
    Crs, Driver, FieldValue, HullDecision, HullProvenance, PropertiesRecord, TolerancePolicy,
};
use camino::Utf8PathBuf;
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn converting_without_inputs_errors() {
    let err = HullConfig::try_from(HullArgs::default()).expect_err("missing input should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_INPUT);
            assert_eq!(env, ENV_INPUT);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn converting_maps_every_option_into_the_request() {
    let args = HullArgs {
        input: vec![Utf8PathBuf::from("a.geojson"), Utf8PathBuf::from("b.geojson")],
        layer: Some("wells".to_owned()),
        output: Some(Utf8PathBuf::from("out.geojsonl")),
        output_layer: Some("outline".to_owned()),
        driver: Some("GeoJSONSeq".to_owned()),
        crs: Some("EPSG:4326".to_owned()),
        percentile: Some(80.0),
        tolerance: Some(3.0),
    };
    let config = HullConfig::try_from(args).expect("config should build");

    assert_eq!(config.inputs.len(), 2);
    assert_eq!(config.layer.as_deref(), Some("wells"));
    let request = &config.request;
    assert_eq!(request.output_path, Some(Utf8PathBuf::from("out.geojsonl")));
    assert_eq!(request.output_layer.as_deref(), Some("outline"));
    assert_eq!(request.driver, Some(Driver::new("GeoJSONSeq")));
    assert_eq!(request.crs, Some(Crs::new("EPSG:4326")));
    assert_eq!(request.percentile, Some(80.0));
    assert_eq!(request.tolerance, Some(3.0));
}

#[rstest]
fn hull_flags_parse_repeated_inputs() {
    let cli = Cli::try_parse_from([
        "boundary",
        "hull",
        "--input",
        "first.geojson",
        "--input",
        "second.geojson",
        "--output-layer",
        "outline",
        "--percentile",
        "75",
    ])
    .expect("arguments should parse");
    let Command::Hull(args) = cli.command;
    assert_eq!(
        args.input,
        vec![
            Utf8PathBuf::from("first.geojson"),
            Utf8PathBuf::from("second.geojson")
        ]
    );
    assert_eq!(args.output_layer.as_deref(), Some("outline"));
    assert_eq!(args.percentile, Some(75.0));
}

#[rstest]
fn non_numeric_percentile_fails_parsing() {
    let err = Cli::try_parse_from(["boundary", "hull", "--percentile", "most"])
        .expect_err("percentile must be numeric");
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "percentile": "most" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "input": ["from-file.geojson"],
            "driver": "GeoJSONSeq",
            "crs": "EPSG:3857",
        }),
        None,
    );
    composer.push_environment(json!({
        "crs": "EPSG:27700",
        "tolerance": 2.5,
    }));
    composer.push_cli(json!({
        "output": "from-cli.geojsonl",
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.inputs, vec![Utf8PathBuf::from("from-file.geojson")]);
    assert_eq!(config.request.driver, Some(Driver::new("GeoJSONSeq")));
    assert_eq!(config.request.crs, Some(Crs::new("EPSG:27700")));
    assert_eq!(config.request.tolerance, Some(2.5));
    assert_eq!(
        config.request.output_path,
        Some(Utf8PathBuf::from("from-cli.geojsonl"))
    );
}

#[rstest]
fn report_is_written_as_one_json_line() {
    let mut properties = PropertiesRecord::new();
    properties.insert("id", FieldValue::Int(1));
    let report = boundary_core::ExportReport {
        path: Utf8PathBuf::from("/data/concave_hull.geojson"),
        layer: "concave_hull".to_owned(),
        driver: Driver::new("GeoJSON"),
        crs: Some(Crs::new("EPSG:4326")),
        hull: HullDecision::Computed(HullProvenance {
            tolerance: 2.0,
            policy: TolerancePolicy::Explicit,
        }),
        properties,
    };
    let mut buffer = Vec::new();
    crate::hull::write_report(&mut buffer, &report).expect("report should be written");

    let text = String::from_utf8(buffer).expect("utf-8 report");
    assert_eq!(text.lines().count(), 1);
    assert!(text.ends_with('\n'));
    let value: serde_json::Value = serde_json::from_str(&text).expect("report is JSON");
    assert_eq!(value["path"], "/data/concave_hull.geojson");
    assert_eq!(value["driver"], "GeoJSON");
    assert_eq!(value["hull"]["decision"], "computed");
    assert_eq!(value["properties"]["id"], 1);
}
