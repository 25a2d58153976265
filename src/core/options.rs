//! Option handling
//!
//! Resolves option values (CLI over recipe default), validates them against
//! their definitions, rejects configurations the recipe declares
//! unsupported, and translates the result into generator definitions.

use regex::Regex;
use std::collections::{BTreeMap, HashMap};

use crate::core::recipe::{OptionDefinition, RecipeDefinition};
use crate::error::OptionError;

/// Option value source for resolution priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSource {
    /// Value from a CLI `-o name=value` argument (highest priority)
    Cli,
    /// Default value from the option definition
    Default,
}

/// Resolved option value with its source
#[derive(Debug, Clone)]
pub struct ResolvedOption {
    /// The resolved value
    pub value: toml::Value,
    /// Where the value came from
    pub source: OptionSource,
}

/// Parse `-o name=value` CLI arguments into option values.
///
/// Values parse as bool, then integer, then float, then fall back to a
/// plain string.
pub fn parse_option_args(args: &[String]) -> Result<HashMap<String, toml::Value>, OptionError> {
    let mut values = HashMap::new();
    for arg in args {
        let (name, raw) = arg
            .split_once('=')
            .ok_or_else(|| OptionError::MalformedArgument { arg: arg.clone() })?;
        if name.is_empty() {
            return Err(OptionError::MalformedArgument { arg: arg.clone() });
        }
        values.insert(name.to_string(), parse_value(raw));
    }
    Ok(values)
}

fn parse_value(raw: &str) -> toml::Value {
    match raw {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        _ => {
            if let Ok(i) = raw.parse::<i64>() {
                toml::Value::Integer(i)
            } else if let Ok(f) = raw.parse::<f64>() {
                toml::Value::Float(f)
            } else {
                toml::Value::String(raw.to_string())
            }
        }
    }
}

/// Resolve and validate every option a recipe declares.
///
/// CLI values win over recipe defaults. CLI values for options the recipe
/// does not declare are rejected.
pub fn resolve_options(
    recipe: &RecipeDefinition,
    cli_values: &HashMap<String, toml::Value>,
) -> Result<BTreeMap<String, ResolvedOption>, OptionError> {
    for name in cli_values.keys() {
        if !recipe.options.contains_key(name) {
            return Err(OptionError::UnknownOption {
                name: name.clone(),
                recipe: recipe.recipe.name.clone(),
            });
        }
    }

    let mut resolved = BTreeMap::new();
    for (name, definition) in &recipe.options {
        let option = match cli_values.get(name) {
            Some(value) => ResolvedOption {
                value: value.clone(),
                source: OptionSource::Cli,
            },
            None => ResolvedOption {
                value: definition.default.clone(),
                source: OptionSource::Default,
            },
        };
        validate_option(name, &option.value, definition)?;
        resolved.insert(name.clone(), option);
    }
    Ok(resolved)
}

/// Reject configurations the recipe declares unsupported: any rule whose
/// option resolves to `true` makes the whole configuration invalid.
pub fn check_configuration(
    recipe: &RecipeDefinition,
    resolved: &BTreeMap<String, ResolvedOption>,
) -> Result<(), OptionError> {
    let Some(build) = &recipe.build else {
        return Ok(());
    };
    for rule in &build.unsupported {
        if let Some(option) = resolved.get(&rule.option) {
            if option.value.as_bool() == Some(true) {
                return Err(OptionError::UnsupportedOption {
                    name: rule.option.clone(),
                    reason: rule.reason.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Translate resolved options into generator definition flags.
///
/// Bool options become `-DNAME:BOOL=ON|OFF`; everything else becomes
/// `-DNAME=<value>`. Only options named in `[build].definitions` are
/// forwarded; an empty list forwards every declared option.
pub fn to_definitions(
    recipe: &RecipeDefinition,
    resolved: &BTreeMap<String, ResolvedOption>,
) -> Vec<String> {
    let forwarded: Vec<&String> = match &recipe.build {
        Some(build) if !build.definitions.is_empty() => build.definitions.iter().collect(),
        _ => resolved.keys().collect(),
    };

    forwarded
        .iter()
        .filter_map(|name| resolved.get(*name).map(|option| (name, option)))
        .map(|(name, option)| {
            let upper = name.to_uppercase();
            match &option.value {
                toml::Value::Boolean(true) => format!("-D{upper}:BOOL=ON"),
                toml::Value::Boolean(false) => format!("-D{upper}:BOOL=OFF"),
                toml::Value::String(s) => format!("-D{upper}={s}"),
                other => format!("-D{upper}={other}"),
            }
        })
        .collect()
}

/// Validate an option value against its definition
pub fn validate_option(
    name: &str,
    value: &toml::Value,
    definition: &OptionDefinition,
) -> Result<(), OptionError> {
    match definition.option_type.as_str() {
        "bool" => validate_bool(name, value),
        "string" => validate_string(
            name,
            value,
            definition.pattern.as_deref(),
            definition.allow_empty,
        ),
        "choice" => validate_choice(name, value, &definition.choices),
        "number" => validate_number(name, value, definition.min, definition.max),
        other => Err(OptionError::InvalidType {
            name: name.to_string(),
            expected: "bool, string, choice, or number".to_string(),
            got: other.to_string(),
        }),
    }
}

fn validate_bool(name: &str, value: &toml::Value) -> Result<(), OptionError> {
    if value.is_bool() {
        Ok(())
    } else {
        Err(OptionError::InvalidType {
            name: name.to_string(),
            expected: "boolean".to_string(),
            got: format!("{value:?}"),
        })
    }
}

fn validate_string(
    name: &str,
    value: &toml::Value,
    pattern: Option<&str>,
    allow_empty: bool,
) -> Result<(), OptionError> {
    let s = value.as_str().ok_or_else(|| OptionError::InvalidType {
        name: name.to_string(),
        expected: "string".to_string(),
        got: format!("{value:?}"),
    })?;

    if !allow_empty && s.is_empty() {
        return Err(OptionError::EmptyNotAllowed {
            name: name.to_string(),
        });
    }

    if let Some(pat) = pattern {
        let re = Regex::new(pat).map_err(|e| OptionError::InvalidPattern {
            name: name.to_string(),
            pattern: pat.to_string(),
            error: e.to_string(),
        })?;

        if !re.is_match(s) {
            return Err(OptionError::PatternMismatch {
                name: name.to_string(),
                value: s.to_string(),
                pattern: pat.to_string(),
            });
        }
    }

    Ok(())
}

fn validate_choice(name: &str, value: &toml::Value, choices: &[String]) -> Result<(), OptionError> {
    let s = value.as_str().ok_or_else(|| OptionError::InvalidType {
        name: name.to_string(),
        expected: "string".to_string(),
        got: format!("{value:?}"),
    })?;

    if choices.iter().any(|c| c == s) {
        Ok(())
    } else {
        Err(OptionError::InvalidChoice {
            name: name.to_string(),
            value: s.to_string(),
            choices: choices.to_vec(),
        })
    }
}

fn validate_number(
    name: &str,
    value: &toml::Value,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<(), OptionError> {
    let n = if let Some(i) = value.as_integer() {
        #[allow(clippy::cast_precision_loss)]
        {
            i as f64
        }
    } else if let Some(f) = value.as_float() {
        f
    } else {
        return Err(OptionError::InvalidType {
            name: name.to_string(),
            expected: "number".to_string(),
            got: format!("{value:?}"),
        });
    };

    if let Some(min_val) = min {
        if n < min_val {
            return Err(OptionError::OutOfRange {
                name: name.to_string(),
                value: n,
                min,
                max,
            });
        }
    }

    if let Some(max_val) = max {
        if n > max_val {
            return Err(OptionError::OutOfRange {
                name: name.to_string(),
                value: n,
                min,
                max,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recipe::{BuildConfig, UnsupportedRule};

    fn bool_option(default: bool) -> OptionDefinition {
        OptionDefinition {
            option_type: "bool".to_string(),
            default: toml::Value::Boolean(default),
            description: "A flag".to_string(),
            choices: vec![],
            pattern: None,
            allow_empty: true,
            min: None,
            max: None,
        }
    }

    fn recipe_with_options(options: &[(&str, OptionDefinition)]) -> RecipeDefinition {
        let toml_content = r#"
[recipe]
name = "pkg"
description = "Test"
kind = "prebuilt"

[sources."1.0.0"]
url = "https://example.com/pkg-1.0.0.tar.gz"
sha256 = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
"#;
        let mut recipe = RecipeDefinition::from_toml(toml_content).unwrap();
        for (name, definition) in options {
            recipe
                .options
                .insert((*name).to_string(), definition.clone());
        }
        recipe
    }

    // ============================================
    // CLI argument parsing
    // ============================================

    #[test]
    fn test_parse_option_args_types() {
        let args = vec![
            "shared=true".to_string(),
            "jobs=4".to_string(),
            "name=release".to_string(),
        ];
        let values = parse_option_args(&args).unwrap();
        assert_eq!(values["shared"], toml::Value::Boolean(true));
        assert_eq!(values["jobs"], toml::Value::Integer(4));
        assert_eq!(values["name"], toml::Value::String("release".to_string()));
    }

    #[test]
    fn test_parse_option_args_rejects_missing_equals() {
        let args = vec!["shared".to_string()];
        assert!(matches!(
            parse_option_args(&args),
            Err(OptionError::MalformedArgument { .. })
        ));
    }

    #[test]
    fn test_parse_option_args_rejects_empty_name() {
        let args = vec!["=true".to_string()];
        assert!(parse_option_args(&args).is_err());
    }

    // ============================================
    // Resolution
    // ============================================

    #[test]
    fn test_cli_value_wins_over_default() {
        let recipe = recipe_with_options(&[("shared", bool_option(false))]);
        let mut cli = HashMap::new();
        cli.insert("shared".to_string(), toml::Value::Boolean(true));

        let resolved = resolve_options(&recipe, &cli).unwrap();

        assert_eq!(resolved["shared"].value, toml::Value::Boolean(true));
        assert_eq!(resolved["shared"].source, OptionSource::Cli);
    }

    #[test]
    fn test_default_used_without_cli_value() {
        let recipe = recipe_with_options(&[("shared", bool_option(false))]);
        let resolved = resolve_options(&recipe, &HashMap::new()).unwrap();

        assert_eq!(resolved["shared"].value, toml::Value::Boolean(false));
        assert_eq!(resolved["shared"].source, OptionSource::Default);
    }

    #[test]
    fn test_undeclared_cli_option_is_rejected() {
        let recipe = recipe_with_options(&[("shared", bool_option(false))]);
        let mut cli = HashMap::new();
        cli.insert("nonsense".to_string(), toml::Value::Boolean(true));

        assert!(matches!(
            resolve_options(&recipe, &cli),
            Err(OptionError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_invalid_cli_value_type_is_rejected() {
        let recipe = recipe_with_options(&[("shared", bool_option(false))]);
        let mut cli = HashMap::new();
        cli.insert("shared".to_string(), toml::Value::Integer(7));

        assert!(matches!(
            resolve_options(&recipe, &cli),
            Err(OptionError::InvalidType { .. })
        ));
    }

    // ============================================
    // Invalid configuration rules
    // ============================================

    #[test]
    fn test_enabled_unsupported_option_rejects_configuration() {
        let mut recipe = recipe_with_options(&[("java_api", bool_option(false))]);
        recipe.build = Some(BuildConfig {
            definitions: vec![],
            unsupported: vec![UnsupportedRule {
                option: "java_api".to_string(),
                reason: "requires SWIG".to_string(),
            }],
            configure_args: vec![],
        });

        let mut cli = HashMap::new();
        cli.insert("java_api".to_string(), toml::Value::Boolean(true));
        let resolved = resolve_options(&recipe, &cli).unwrap();

        let err = check_configuration(&recipe, &resolved).unwrap_err();
        assert!(
            matches!(err, OptionError::UnsupportedOption { ref name, .. } if name == "java_api")
        );
    }

    #[test]
    fn test_disabled_unsupported_option_is_fine() {
        let mut recipe = recipe_with_options(&[("java_api", bool_option(false))]);
        recipe.build = Some(BuildConfig {
            definitions: vec![],
            unsupported: vec![UnsupportedRule {
                option: "java_api".to_string(),
                reason: "requires SWIG".to_string(),
            }],
            configure_args: vec![],
        });

        let resolved = resolve_options(&recipe, &HashMap::new()).unwrap();
        assert!(check_configuration(&recipe, &resolved).is_ok());
    }

    // ============================================
    // Definition translation
    // ============================================

    #[test]
    fn test_bool_options_translate_to_on_off() {
        let mut recipe = recipe_with_options(&[
            ("traces", bool_option(false)),
            ("warnings", bool_option(true)),
        ]);
        recipe.build = Some(BuildConfig::default());

        let resolved = resolve_options(&recipe, &HashMap::new()).unwrap();
        let definitions = to_definitions(&recipe, &resolved);

        assert!(definitions.contains(&"-DTRACES:BOOL=OFF".to_string()));
        assert!(definitions.contains(&"-DWARNINGS:BOOL=ON".to_string()));
    }

    #[test]
    fn test_only_listed_definitions_are_forwarded() {
        let mut recipe = recipe_with_options(&[
            ("traces", bool_option(false)),
            ("shared", bool_option(true)),
        ]);
        recipe.build = Some(BuildConfig {
            definitions: vec!["traces".to_string()],
            unsupported: vec![],
            configure_args: vec![],
        });

        let resolved = resolve_options(&recipe, &HashMap::new()).unwrap();
        let definitions = to_definitions(&recipe, &resolved);

        assert_eq!(definitions, vec!["-DTRACES:BOOL=OFF".to_string()]);
    }

    #[test]
    fn test_string_option_translates_to_plain_definition() {
        let definition = OptionDefinition {
            option_type: "string".to_string(),
            default: toml::Value::String("c++17".to_string()),
            description: "Language standard".to_string(),
            choices: vec![],
            pattern: None,
            allow_empty: false,
            min: None,
            max: None,
        };
        let mut recipe = recipe_with_options(&[("std", definition)]);
        recipe.build = Some(BuildConfig::default());

        let resolved = resolve_options(&recipe, &HashMap::new()).unwrap();
        let definitions = to_definitions(&recipe, &resolved);

        assert_eq!(definitions, vec!["-DSTD=c++17".to_string()]);
    }

    // ============================================
    // Validation by type
    // ============================================

    #[test]
    fn test_choice_option_rejects_unlisted_value() {
        let definition = OptionDefinition {
            option_type: "choice".to_string(),
            default: toml::Value::String("static".to_string()),
            description: "Linkage".to_string(),
            choices: vec!["static".to_string(), "shared".to_string()],
            pattern: None,
            allow_empty: true,
            min: None,
            max: None,
        };

        let ok = validate_option("linkage", &toml::Value::String("shared".into()), &definition);
        assert!(ok.is_ok());

        let err = validate_option(
            "linkage",
            &toml::Value::String("dynamic".into()),
            &definition,
        );
        assert!(matches!(err, Err(OptionError::InvalidChoice { .. })));
    }

    #[test]
    fn test_string_pattern_mismatch() {
        let definition = OptionDefinition {
            option_type: "string".to_string(),
            default: toml::Value::String("21".to_string()),
            description: "API level".to_string(),
            choices: vec![],
            pattern: Some("^[0-9]+$".to_string()),
            allow_empty: false,
            min: None,
            max: None,
        };

        assert!(validate_option("api", &toml::Value::String("21".into()), &definition).is_ok());
        assert!(matches!(
            validate_option("api", &toml::Value::String("twenty".into()), &definition),
            Err(OptionError::PatternMismatch { .. })
        ));
    }

    #[test]
    fn test_number_out_of_range() {
        let definition = OptionDefinition {
            option_type: "number".to_string(),
            default: toml::Value::Integer(4),
            description: "Jobs".to_string(),
            choices: vec![],
            pattern: None,
            allow_empty: true,
            min: Some(1.0),
            max: Some(64.0),
        };

        assert!(validate_option("jobs", &toml::Value::Integer(8), &definition).is_ok());
        assert!(matches!(
            validate_option("jobs", &toml::Value::Integer(0), &definition),
            Err(OptionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_unknown_option_type_is_invalid() {
        let definition = OptionDefinition {
            option_type: "tristate".to_string(),
            default: toml::Value::Boolean(false),
            description: "Bad type".to_string(),
            choices: vec![],
            pattern: None,
            allow_empty: true,
            min: None,
            max: None,
        };

        assert!(matches!(
            validate_option("x", &toml::Value::Boolean(false), &definition),
            Err(OptionError::InvalidType { .. })
        ));
    }
}
