use backdrop_core::config::{ClearMode, ConnectionStrategy, PointerConfig, ResizePolicy, DEFAULT_PALETTE};
use backdrop_core::{ConfigError, FieldConfig, FieldPreset, Rgb};

#[test]
fn test_config_default_values() {
    let config = FieldConfig::default();

    assert_eq!(config.particle_count, 100);
    assert_eq!(config.palette, DEFAULT_PALETTE.to_vec());
    assert_eq!(config.connection_distance, 120.0);
    assert_eq!(config.clear_mode, ClearMode::Full);
    assert_eq!(config.connection_strategy, ConnectionStrategy::AllPairs);
    assert_eq!(config.resize_policy, ResizePolicy::DriftBack);
    assert!(config.pulse.is_none());
    assert!(config.pointer.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_presets_cover_source_variants() {
    let pulse = FieldPreset::pulse();
    assert_eq!(pulse.particle_count, 120);
    assert_eq!(pulse.connection_distance, 150.0);
    assert!(pulse.pulse.is_some());

    let interactive = FieldPreset::interactive();
    assert_eq!(interactive.pointer.map(|p| p.slack), Some(20));

    assert!(matches!(FieldPreset::trail().clear_mode, ClearMode::Trail { .. }));
}

#[test]
fn test_preset_lookup_by_name() {
    assert_eq!(FieldPreset::by_name("PULSE").unwrap(), FieldPreset::pulse());
    assert_eq!(FieldPreset::by_name("").unwrap(), FieldPreset::ambient());
    assert_eq!(
        FieldPreset::by_name("sparkle"),
        Err(ConfigError::UnknownPreset("sparkle".into()))
    );
}

#[test]
fn test_validate_rejects_bad_values() {
    let cases: Vec<(&str, FieldConfig)> = vec![
        ("empty palette", FieldConfig { palette: vec![], ..FieldConfig::default() }),
        ("nan speed", FieldConfig { speed: f32::NAN, ..FieldConfig::default() }),
        ("negative speed", FieldConfig { speed: -1.0, ..FieldConfig::default() }),
        ("inverted radius", FieldConfig { min_radius: 4.0, max_radius: 1.0, ..FieldConfig::default() }),
        ("zero opacity", FieldConfig { min_opacity: 0.0, ..FieldConfig::default() }),
        ("opacity above one", FieldConfig { max_opacity: 1.5, ..FieldConfig::default() }),
        ("zero distance", FieldConfig { connection_distance: 0.0, ..FieldConfig::default() }),
        ("dampening above one", FieldConfig { connection_dampening: 1.2, ..FieldConfig::default() }),
        (
            "trail alpha zero",
            FieldConfig {
                clear_mode: ClearMode::Trail { color: Rgb::BLACK, alpha: 0.0 },
                ..FieldConfig::default()
            },
        ),
        (
            "pointer opacity zero",
            FieldConfig {
                pointer: Some(PointerConfig { opacity: 0.0, ..PointerConfig::default() }),
                ..FieldConfig::default()
            },
        ),
    ];

    for (label, config) in cases {
        assert!(config.validate().is_err(), "{label} should be rejected");
    }
}

#[test]
fn test_validate_error_messages_name_the_field() {
    let err = FieldConfig { connection_dampening: 2.0, ..FieldConfig::default() }
        .validate()
        .unwrap_err();
    assert!(err.to_string().contains("connection_dampening"), "{err}");

    let err = FieldConfig { palette: vec![], ..FieldConfig::default() }.validate().unwrap_err();
    assert_eq!(err, ConfigError::EmptyPalette);
}

#[test]
fn test_palette_override_from_hex_list() {
    let palette = Rgb::parse_palette("#ef4444, #f97316,#eab308").unwrap();
    let config = FieldConfig { palette, ..FieldConfig::default() };
    assert_eq!(config.palette.len(), 3);
    assert!(config.validate().is_ok());

    let err: ConfigError = Rgb::parse_palette("#ef4444,#zz").unwrap_err().into();
    assert!(matches!(err, ConfigError::Color(_)));
}
