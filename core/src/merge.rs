//! Priority layering of resolved option values.
//!
//! Sources are applied lowest priority first: the accumulator starts as
//! [`default_values_map`], then config file values are merged in, then
//! command-line values. Each merge replaces whole value lists per option,
//! so a single `--join` on the command line discards every `join` line in
//! the config file.
//!
//! # Example
//!
//! ```
//! use option_layers_core::*;
//!
//! let specs = vec![
//!     OptionSpec::with_default(OptionNames::with_alias("--cores", "-c"), Appearance::Optional, "4").unwrap(),
//!     OptionSpec::with_default(OptionNames::new("--bind"), Appearance::OptionalRepeat, "127.0.0.1").unwrap(),
//! ];
//!
//! let mut values = default_values_map(&specs);
//! let config = parse_config_file("bind = 10.0.0.1\nbind = 10.0.0.2\n", "app.conf", &specs).unwrap();
//! merge_new_values(&config, &mut values);
//! let cli = parse_command_line(["-c", "16"], &specs).unwrap();
//! merge_new_values(&cli, &mut values);
//!
//! assert_eq!(values["--cores"], ["16"]);
//! assert_eq!(values["--bind"], ["10.0.0.1", "10.0.0.2"]);
//! ```

use tracing::debug;

use crate::OptionValues;
use crate::types::OptionSpec;

/// Builds the lowest-priority layer: each option's default values, or an
/// empty list when it has none.
pub fn default_values_map(specs: &[OptionSpec]) -> OptionValues {
    specs
        .iter()
        .map(|spec| {
            (
                spec.official_name().to_string(),
                spec.default_values().to_vec(),
            )
        })
        .collect()
}

/// Merges higher-priority `new_values` into `accumulator`.
///
/// Every option present in `new_values` has its whole value list replaced;
/// options absent from `new_values` keep whatever the accumulator held.
pub fn merge_new_values(new_values: &OptionValues, accumulator: &mut OptionValues) {
    for (name, values) in new_values {
        debug!(option = %name, count = values.len(), "Overriding option values");
        accumulator.insert(name.clone(), values.clone());
    }
}
