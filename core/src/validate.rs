//! Appearance count validation.
//!
//! Counts can only be checked once every source has been merged: a
//! mandatory option legitimately has zero values in the defaults layer and
//! may be supplied by either the config file or the command line.
//!
//! # Examples
//!
//! ```
//! use option_layers_core::*;
//!
//! let specs = vec![
//!     OptionSpec::new(OptionNames::with_alias("--join", "-j"), Appearance::MandatoryRepeat),
//! ];
//!
//! let values = parse_command_line(["-j", "a", "-j", "b"], &specs).unwrap();
//! assert!(verify_option_counts(&specs, &values).is_ok());
//!
//! let empty: [&str; 0] = [];
//! let values = parse_command_line(empty, &specs).unwrap();
//! let err = verify_option_counts(&specs, &values).unwrap_err();
//! assert_eq!(err.option(), "--join");
//! ```

use tracing::debug;

use crate::OptionValues;
use crate::error::ValidationError;
use crate::types::OptionSpec;

/// Checks that every option appears between its min and max number of times.
///
/// An option missing from `values` counts as zero appearances. Options are
/// checked independently in spec order and the first violation is returned.
///
/// # Errors
///
/// Returns [`ValidationError::TooFew`] or [`ValidationError::TooMany`]
/// naming the option's official name.
pub fn verify_option_counts(
    specs: &[OptionSpec],
    values: &OptionValues,
) -> Result<(), ValidationError> {
    for spec in specs {
        let option = spec.official_name();
        let found = values.get(option).map_or(0, Vec::len);

        if found < spec.min_appearances() {
            debug!(option, found, min = spec.min_appearances(), "Option appears too few times");
            return Err(ValidationError::TooFew {
                option: option.to_string(),
                min: spec.min_appearances(),
                found,
            });
        }
        if found > spec.max_appearances() {
            debug!(option, found, max = spec.max_appearances(), "Option appears too many times");
            return Err(ValidationError::TooMany {
                option: option.to_string(),
                max: spec.max_appearances(),
                found,
            });
        }
    }

    Ok(())
}
