//! Layered option resolution for command lines and config files.
//!
//! This crate turns a list of option specifications into one resolved
//! `official name → values` map, drawing on three sources in increasing
//! priority:
//!
//! 1. [`default_values_map`]: defaults declared on each [`OptionSpec`].
//! 2. [`parse_config_file`]: `name = value` lines from a config file the
//!    host has already read.
//! 3. [`parse_command_line`] (or the tolerant
//!    [`parse_command_line_and_collect_unrecognized`]): argv tokens.
//!
//! Layers are combined with [`merge_new_values`], which replaces an option's
//! values wholesale, and the result is checked with [`verify_option_counts`].
//! [`resolve_options`] runs the whole chain in one call.
//!
//! Help output is independent of parsing: build [`HelpSection`]s (by hand or
//! with [`HelpSection::from_specs`]) and render them with [`format_help`].
//!
//! # Example
//!
//! ```
//! use option_layers_core::*;
//!
//! let specs = vec![
//!     OptionSpec::new(OptionNames::with_alias("--help", "-h"), Appearance::OptionalNoParameter),
//!     OptionSpec::with_default(OptionNames::with_alias("--cores", "-c"), Appearance::Optional, "4").unwrap(),
//!     OptionSpec::new(OptionNames::with_alias("--join", "-j"), Appearance::MandatoryRepeat),
//! ];
//!
//! let mut values = default_values_map(&specs);
//! let file = parse_config_file("join = db1:29015\n", "rethink.conf", &specs).unwrap();
//! merge_new_values(&file, &mut values);
//! let cli = parse_command_line(["-j", "db2:29015", "-j", "db3:29015"], &specs).unwrap();
//! merge_new_values(&cli, &mut values);
//! verify_option_counts(&specs, &values).unwrap();
//!
//! assert_eq!(values["--cores"], ["4"]);
//! assert_eq!(values["--join"], ["db2:29015", "db3:29015"]);
//! ```

mod command_line;
mod config_file;
mod error;
mod help;
mod index;
mod merge;
mod resolve;
mod types;
mod validate;

pub use command_line::{parse_command_line, parse_command_line_and_collect_unrecognized};
pub use config_file::parse_config_file;
pub use error::{
    FileParseError, FileParseErrorKind, ParseError, ResolveError, SpecError, ValidationError,
};
pub use help::{HelpLine, HelpSection, HelpStyle, format_help, format_help_with};
pub use merge::{default_values_map, merge_new_values};
pub use resolve::{ConfigSource, Resolved, resolve_options, resolve_options_tolerant};
pub use types::*;
pub use validate::verify_option_counts;
