//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat, MAX_PARALLEL_LIMIT};
use super::validator::ConfigValidator;
use crate::case::CaseSensitivityMode;
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = CaseSensitivityMode> {
    prop_oneof![
        Just(CaseSensitivityMode::Auto),
        Just(CaseSensitivityMode::Sensitive),
        Just(CaseSensitivityMode::Insensitive),
    ]
}

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Human),
        Just(OutputFormat::Json),
        Just(OutputFormat::Yaml),
    ]
}

// Strategy for generating configs
fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(mode_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(1usize..=MAX_PARALLEL_LIMIT),
        prop::option::of(format_strategy()),
    )
        .prop_map(
            |(case_sensitivity, require_directory, max_parallel, output_format)| Config {
                case_sensitivity,
                require_directory,
                max_parallel,
                output_format,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Set fields of the higher-precedence source always win
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.case_sensitivity, high.case_sensitivity.or(low.case_sensitivity));
        prop_assert_eq!(result.require_directory, high.require_directory.or(low.require_directory));
        prop_assert_eq!(result.max_parallel, high.max_parallel.or(low.max_parallel));
        prop_assert_eq!(result.output_format, high.output_format.or(low.output_format));
    }

    // Merging a config into itself changes nothing
    #[test]
    fn config_merge_idempotent(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &config);
        prop_assert_eq!(result, config);
    }

    // Generated configs survive a YAML round trip and validate
    #[test]
    fn config_yaml_round_trip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert!(ConfigValidator::validate(&parsed).is_ok());
        prop_assert_eq!(parsed, config);
    }
}
