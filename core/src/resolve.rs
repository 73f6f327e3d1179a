//! One-call layered resolution: defaults, then config file, then command
//! line, then count validation.

use tracing::debug;

use crate::OptionValues;
use crate::command_line::{parse_command_line, parse_command_line_and_collect_unrecognized};
use crate::config_file::parse_config_file;
use crate::error::ResolveError;
use crate::merge::{default_values_map, merge_new_values};
use crate::types::OptionSpec;
use crate::validate::verify_option_counts;

/// Config file text plus the path it was read from (for diagnostics).
#[derive(Debug, Clone, Copy)]
pub struct ConfigSource<'a> {
    pub contents: &'a str,
    pub path: &'a str,
}

impl<'a> ConfigSource<'a> {
    pub fn new(contents: &'a str, path: &'a str) -> Self {
        Self { contents, path }
    }
}

/// Output of [`resolve_options_tolerant`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    /// Final merged and validated values.
    pub values: OptionValues,
    /// Command-line tokens that matched no option, in order.
    pub unrecognized: Vec<String>,
}

/// Resolves `specs` from defaults, an optional config file, and strictly
/// parsed command-line `tokens`, then validates appearance counts.
///
/// # Errors
///
/// Returns the first [`ResolveError`] from any stage. The config file is
/// parsed before the command line, so its errors are reported first.
///
/// # Examples
///
/// ```
/// use option_layers_core::*;
///
/// let specs = vec![
///     OptionSpec::with_default(OptionNames::with_alias("--cores", "-c"), Appearance::Optional, "4").unwrap(),
///     OptionSpec::new(OptionNames::with_alias("--join", "-j"), Appearance::MandatoryRepeat),
/// ];
/// let config = ConfigSource::new("join = db1:29015\n", "/etc/app.conf");
///
/// let values = resolve_options(&specs, Some(config), ["-c", "2"]).unwrap();
/// assert_eq!(values["--cores"], ["2"]);
/// assert_eq!(values["--join"], ["db1:29015"]);
///
/// let err = resolve_options(&specs, None, ["-c", "2"]).unwrap_err();
/// assert!(matches!(err, ResolveError::Validation(_)));
/// ```
pub fn resolve_options<I, S>(
    specs: &[OptionSpec],
    config: Option<ConfigSource<'_>>,
    tokens: I,
) -> Result<OptionValues, ResolveError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut values = layered_defaults(specs, config)?;
    let command_line = parse_command_line(tokens, specs)?;
    merge_new_values(&command_line, &mut values);
    verify_option_counts(specs, &values)?;
    Ok(values)
}

/// Like [`resolve_options`], but unrecognized command-line tokens are
/// collected instead of rejected.
pub fn resolve_options_tolerant<I, S>(
    specs: &[OptionSpec],
    config: Option<ConfigSource<'_>>,
    tokens: I,
) -> Result<Resolved, ResolveError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut values = layered_defaults(specs, config)?;
    let (command_line, unrecognized) = parse_command_line_and_collect_unrecognized(tokens, specs)?;
    merge_new_values(&command_line, &mut values);
    verify_option_counts(specs, &values)?;
    Ok(Resolved {
        values,
        unrecognized,
    })
}

fn layered_defaults(
    specs: &[OptionSpec],
    config: Option<ConfigSource<'_>>,
) -> Result<OptionValues, ResolveError> {
    let mut values = default_values_map(specs);
    if let Some(config) = config {
        let from_file = parse_config_file(config.contents, config.path, specs)?;
        debug!(path = config.path, options = from_file.len(), "Merging config file values");
        merge_new_values(&from_file, &mut values);
    }
    Ok(values)
}
