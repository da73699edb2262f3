use crate::config::SimulationConfig;
use crate::error::{Error, Result};

#[test]
fn test_error_display_is_informative() {
    let e = Error::InvalidParam("radius must be > 0".to_string());
    let msg = format!("{e}");
    assert!(msg.contains("invalid parameter"));
    assert!(msg.contains("radius"));
}

#[test]
fn test_config_error_converts_from_serde() {
    let err = SimulationConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(format!("{err}").starts_with("config parse error"));
}

#[test]
fn test_result_alias() -> Result<()> {
    let config = SimulationConfig::from_json("{}")?;
    assert_eq!(config.time_step.speed, 1.0);
    Ok(())
}
