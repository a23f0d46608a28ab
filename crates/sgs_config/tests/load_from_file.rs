// crates/sgs_config/tests/load_from_file.rs
//!
//! 从文件加载 LES 属性字典

use sgs_config::{ConfigError, DeltaConfig, LesProperties, ModelKind};
use std::io::Write;

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_qr_properties() {
    let file = write_temp(
        r#"{
            "model": "qr",
            "delta": { "type": "cubeRootVol", "deltaCoeff": 2.0 },
            "qrCoeffs": { "ck": 0.094 }
        }"#,
    );
    let props = LesProperties::from_file(file.path()).unwrap();
    assert_eq!(props.model, ModelKind::Qr);
    assert_eq!(props.delta, DeltaConfig::CubeRootVol { delta_coeff: 2.0 });
    assert_eq!(props.qr_coeffs.ck, Some(0.094));
}

#[test]
fn test_missing_file() {
    let err = LesProperties::from_file("/nonexistent/lesProperties.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_truncated_file() {
    let file = write_temp(r#"{ "model": "qr", "#);
    let err = LesProperties::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_write_then_load() {
    let mut props = LesProperties::for_model(ModelKind::DynamicCubicRoot);
    props.dynamic_coeffs.initial_cd = 0.03;
    props.transport.nu = 1e-4;

    let file = write_temp(&props.to_json_string().unwrap());
    let back = LesProperties::from_file(file.path()).unwrap();
    assert_eq!(back, props);
}
