use hexmap::{
    CloudConfig, DecorationConfig, HeightConfig, HexMap, LayoutConfig,
    MapConfig, MapResources, NoiseFnConfig, NumRange, SceneryConfig, Seed,
    TierThresholds,
};
use validator::{ValidationErrors, ValidationErrorsKind};

/// Generate a map from the config and collect the names of the top-level
/// fields that failed validation
fn error_fields(config: MapConfig) -> Vec<&'static str> {
    let resources = MapResources::load(&config).unwrap();
    let err = HexMap::generate(config, &resources).unwrap_err();
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    let mut error_fields = validation_errors
        .errors()
        .keys()
        .copied()
        .collect::<Vec<&str>>();
    error_fields.sort_unstable();
    error_fields
}

#[test]
fn test_config_validation() {
    let config = MapConfig {
        seed: Seed::Int(0),
        radius: 5,
        layout: LayoutConfig {
            horizontal_spacing: 0.0, // invalid
            ..Default::default()
        },
        height: HeightConfig {
            thresholds: TierThresholds {
                stone: 0.1, // invalid (below dirt)
                ..Default::default()
            },
            ..Default::default()
        },
        decoration: DecorationConfig {
            rock_probability: 1.5, // invalid
            ..Default::default()
        },
        ..Default::default()
    };

    assert_eq!(error_fields(config), vec!["decoration", "height", "layout"]);
}

/// Collect dotted paths to every failing leaf field, e.g. `height.max_height`
fn error_paths(
    errors: &ValidationErrors,
    prefix: &str,
    paths: &mut Vec<String>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Struct(inner) => {
                error_paths(inner, &path, paths)
            }
            ValidationErrorsKind::List(list) => {
                for inner in list.values() {
                    error_paths(inner, &path, paths);
                }
            }
            ValidationErrorsKind::Field(_) => paths.push(path),
        }
    }
}

/// Generate from an invalid config, and get the path of the one field that
/// was rejected
fn rejected_field(config: MapConfig) -> String {
    let resources = MapResources::load(&config).unwrap();
    let err = HexMap::generate(config, &resources).unwrap_err();
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    let mut paths = Vec::new();
    error_paths(&validation_errors, "", &mut paths);
    assert_eq!(paths.len(), 1, "expected one error in {:?}", paths);
    paths.remove(0)
}

fn small_config() -> MapConfig {
    MapConfig {
        seed: Seed::Int(0),
        radius: 3,
        ..Default::default()
    }
}

#[test]
fn test_nan_probabilities() {
    // Range checks alone would let these through, then sampling would panic
    let config = MapConfig {
        decoration: DecorationConfig {
            rock_probability: f64::NAN,
            ..Default::default()
        },
        ..small_config()
    };
    assert_eq!(rejected_field(config), "decoration.rock_probability");

    let config = MapConfig {
        decoration: DecorationConfig {
            second_rock_probability: f64::NAN,
            ..Default::default()
        },
        ..small_config()
    };
    assert_eq!(
        rejected_field(config),
        "decoration.second_rock_probability"
    );

    let config = MapConfig {
        decoration: DecorationConfig {
            tree_probability: f64::NAN,
            ..Default::default()
        },
        ..small_config()
    };
    assert_eq!(rejected_field(config), "decoration.tree_probability");

    let config = MapConfig {
        decoration: DecorationConfig {
            tree_probability: -0.1,
            ..Default::default()
        },
        ..small_config()
    };
    assert_eq!(rejected_field(config), "decoration.tree_probability");
}

#[test]
fn test_non_finite_values() {
    let config = MapConfig {
        height: HeightConfig {
            max_height: f64::NAN,
            ..Default::default()
        },
        ..small_config()
    };
    assert_eq!(rejected_field(config), "height.max_height");

    let config = MapConfig {
        height: HeightConfig {
            max_height: f64::INFINITY,
            ..Default::default()
        },
        ..small_config()
    };
    assert_eq!(rejected_field(config), "height.max_height");

    let config = MapConfig {
        height: HeightConfig {
            noise: NoiseFnConfig {
                frequency: f64::NAN,
                ..Default::default()
            },
            ..Default::default()
        },
        ..small_config()
    };
    assert_eq!(rejected_field(config), "height.noise.frequency");

    let config = MapConfig {
        height: HeightConfig {
            noise: NoiseFnConfig {
                exponent: f64::NAN,
                ..Default::default()
            },
            ..Default::default()
        },
        ..small_config()
    };
    assert_eq!(rejected_field(config), "height.noise.exponent");

    let config = MapConfig {
        decoration: DecorationConfig {
            tree_base_offset: f64::NAN,
            ..Default::default()
        },
        ..small_config()
    };
    assert_eq!(rejected_field(config), "decoration.tree_base_offset");

    let config = MapConfig {
        scenery: SceneryConfig {
            clouds: CloudConfig {
                count_exponent: f64::NAN,
                ..Default::default()
            },
            ..Default::default()
        },
        ..small_config()
    };
    assert_eq!(rejected_field(config), "scenery.clouds.count_exponent");

    let config = MapConfig {
        layout: LayoutConfig {
            vertical_spacing: f64::NAN,
            ..Default::default()
        },
        ..small_config()
    };
    assert_eq!(rejected_field(config), "layout.vertical_spacing");
}

#[test]
fn test_inverted_range() {
    let config = MapConfig {
        seed: Seed::Int(0),
        radius: 2,
        decoration: DecorationConfig {
            rock_radius: NumRange::new(0.4, 0.1),
            ..Default::default()
        },
        ..Default::default()
    };

    assert_eq!(error_fields(config), vec!["decoration"]);
}

#[test]
fn test_config_from_json() {
    let config: MapConfig = serde_json::from_str(
        r#"{
            "seed": "hello",
            "radius": 3,
            "layout": {"boundary": {"type": "padded", "padding": 0.5}},
            "height": {"table": {"inline": [[1.0, 2.0], [3.0, 4.0]]}}
        }"#,
    )
    .unwrap();

    assert_eq!(config.seed, Seed::Text("hello".into()));
    assert_eq!(config.radius, 3);
    assert_eq!(config.layout.boundary.resolve(config.radius), 3.5);
    // Missing fields fall back to defaults
    assert_eq!(config.layout.horizontal_spacing, 1.77);
    assert_eq!(config.height.max_height, 10.0);
    assert_eq!(config.decoration.tree_layers.len(), 3);
}

#[test]
fn test_config_bad_seed() {
    assert!(serde_json::from_str::<MapConfig>(r#"{"seed": -1}"#).is_err());
    assert!(serde_json::from_str::<MapConfig>(r#"{"seed": 1.5}"#).is_err());
}
