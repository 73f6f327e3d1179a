//! Command-line token parsing.
//!
//! Tokens are matched against option aliases exactly; there is no
//! `--name=value` splitting and no bundling of short flags. An option that
//! takes a parameter always consumes the following token.
//!
//! # Example
//!
//! ```
//! use option_layers_core::*;
//!
//! let specs = vec![
//!     OptionSpec::new(OptionNames::with_alias("--join", "-j"), Appearance::MandatoryRepeat),
//!     OptionSpec::new(OptionNames::with_alias("--help", "-h"), Appearance::OptionalNoParameter),
//! ];
//!
//! let values = parse_command_line(["-j", "a", "--help", "--join", "b"], &specs).unwrap();
//! assert_eq!(values["--join"], ["a", "b"]);
//! assert_eq!(values["--help"], [""]);
//! ```

use tracing::debug;

use crate::OptionValues;
use crate::error::ParseError;
use crate::index::AliasIndex;
use crate::types::OptionSpec;

/// Parses `tokens`, failing on any token that is not a known option.
///
/// Values are keyed by official name. Options that take no parameter record
/// an empty string per appearance.
///
/// # Errors
///
/// - [`ParseError::UnrecognizedOption`] for an unknown token, including stray
///   positional arguments.
/// - [`ParseError::MissingArgument`] when an option that takes a parameter is
///   the last token or is directly followed by another known option.
pub fn parse_command_line<I, S>(tokens: I, specs: &[OptionSpec]) -> Result<OptionValues, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens: Vec<S> = tokens.into_iter().collect();
    scan(&tokens, specs, None)
}

/// Like [`parse_command_line`], but collects unrecognized tokens instead of
/// failing on them.
///
/// Unknown options and out-of-place positional arguments are returned in
/// the order they appeared. A token consumed as another option's parameter
/// is never treated as unrecognized. This can look odd:
/// `--recognized-foo 3 --unrecognized --recognized-bar 4 5` leaves
/// `["--unrecognized", "5"]`.
///
/// # Errors
///
/// Returns [`ParseError::MissingArgument`] exactly as the strict variant
/// does.
///
/// # Examples
///
/// ```
/// use option_layers_core::*;
///
/// let specs = vec![
///     OptionSpec::new(OptionNames::new("--recognized-foo"), Appearance::Mandatory),
///     OptionSpec::new(OptionNames::new("--recognized-bar"), Appearance::Mandatory),
/// ];
/// let tokens = ["--recognized-foo", "3", "--unrecognized", "--recognized-bar", "4", "5"];
///
/// let (values, unrecognized) = parse_command_line_and_collect_unrecognized(tokens, &specs).unwrap();
/// assert_eq!(values["--recognized-foo"], ["3"]);
/// assert_eq!(values["--recognized-bar"], ["4"]);
/// assert_eq!(unrecognized, ["--unrecognized", "5"]);
/// ```
pub fn parse_command_line_and_collect_unrecognized<I, S>(
    tokens: I,
    specs: &[OptionSpec],
) -> Result<(OptionValues, Vec<String>), ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens: Vec<S> = tokens.into_iter().collect();
    let mut unrecognized = Vec::new();
    let values = scan(&tokens, specs, Some(&mut unrecognized))?;
    Ok((values, unrecognized))
}

/// Shared scanner. `unrecognized` is `None` in strict mode.
fn scan<S: AsRef<str>>(
    tokens: &[S],
    specs: &[OptionSpec],
    mut unrecognized: Option<&mut Vec<String>>,
) -> Result<OptionValues, ParseError> {
    debug!(
        tokens = tokens.len(),
        options = specs.len(),
        tolerant = unrecognized.is_some(),
        "Parsing command line"
    );

    let index = AliasIndex::new(specs);
    let mut values = OptionValues::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i].as_ref();

        let Some(spec) = index.lookup(token) else {
            match unrecognized.as_deref_mut() {
                Some(out) => {
                    debug!(token, "Skipping unrecognized token");
                    out.push(token.to_string());
                    i += 1;
                    continue;
                }
                None => return Err(ParseError::UnrecognizedOption(token.to_string())),
            }
        };

        let value = if spec.takes_parameter() {
            let param = match tokens.get(i + 1).map(AsRef::as_ref) {
                Some(param) if index.lookup(param).is_none() => param,
                _ => return Err(ParseError::MissingArgument(token.to_string())),
            };
            i += 2;
            param.to_string()
        } else {
            i += 1;
            String::new()
        };

        values
            .entry(spec.official_name().to_string())
            .or_default()
            .push(value);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Appearance, OptionNames};

    fn specs() -> Vec<OptionSpec> {
        vec![
            OptionSpec::new(
                OptionNames::with_alias("--help", "-h"),
                Appearance::OptionalNoParameter,
            ),
            OptionSpec::with_default(
                OptionNames::with_alias("--cores", "-c"),
                Appearance::Optional,
                "4",
            )
            .unwrap(),
            OptionSpec::new(
                OptionNames::with_alias("--join", "-j"),
                Appearance::MandatoryRepeat,
            ),
            OptionSpec::new(
                OptionNames::with_alias("--verbose", "-v"),
                Appearance::OptionalRepeatNoParameter,
            ),
        ]
    }

    #[test]
    fn test_switch_records_empty_sentinel() {
        let values = parse_command_line(["--help"], &specs()).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values["--help"], [""]);
    }

    #[test]
    fn test_alias_keys_by_official_name() {
        let values = parse_command_line(["-c", "8"], &specs()).unwrap();
        assert_eq!(values["--cores"], ["8"]);
        assert!(!values.contains_key("-c"));
    }

    #[test]
    fn test_repeated_values_keep_order() {
        let values = parse_command_line(["-j", "a", "--join", "b", "-j", "c"], &specs()).unwrap();
        assert_eq!(values["--join"], ["a", "b", "c"]);
    }

    #[test]
    fn test_repeated_switch_counts_appearances() {
        let values = parse_command_line(["-v", "-v", "--verbose"], &specs()).unwrap();
        assert_eq!(values["--verbose"], ["", "", ""]);
    }

    #[test]
    fn test_empty_tokens_yield_empty_map() {
        let empty: [&str; 0] = [];
        assert!(parse_command_line(empty, &specs()).unwrap().is_empty());
    }

    #[test]
    fn test_strict_rejects_unknown_token() {
        let err = parse_command_line(["--help", "--frobnicate"], &specs()).unwrap_err();
        assert_eq!(err, ParseError::UnrecognizedOption("--frobnicate".to_string()));
    }

    #[test]
    fn test_strict_rejects_stray_positional() {
        let err = parse_command_line(["file.txt"], &specs()).unwrap_err();
        assert_eq!(err, ParseError::UnrecognizedOption("file.txt".to_string()));
    }

    #[test]
    fn test_missing_argument_at_end() {
        let err = parse_command_line(["-j"], &specs()).unwrap_err();
        assert_eq!(err, ParseError::MissingArgument("-j".to_string()));
    }

    #[test]
    fn test_missing_argument_before_option() {
        let err = parse_command_line(["--cores", "--help"], &specs()).unwrap_err();
        assert_eq!(err, ParseError::MissingArgument("--cores".to_string()));
    }

    #[test]
    fn test_parameter_may_look_like_unknown_flag() {
        let values = parse_command_line(["--cores", "-1"], &specs()).unwrap();
        assert_eq!(values["--cores"], ["-1"]);
    }

    #[test]
    fn test_tolerant_collects_in_order() {
        let (values, unrecognized) = parse_command_line_and_collect_unrecognized(
            ["serve", "-j", "host:1", "--unknown", "-h", "extra"],
            &specs(),
        )
        .unwrap();
        assert_eq!(values["--join"], ["host:1"]);
        assert_eq!(values["--help"], [""]);
        assert_eq!(unrecognized, ["serve", "--unknown", "extra"]);
    }

    #[test]
    fn test_tolerant_never_collects_consumed_parameter() {
        let (values, unrecognized) =
            parse_command_line_and_collect_unrecognized(["-c", "stray-looking"], &specs()).unwrap();
        assert_eq!(values["--cores"], ["stray-looking"]);
        assert!(unrecognized.is_empty());
    }

    #[test]
    fn test_tolerant_still_reports_missing_argument() {
        let err = parse_command_line_and_collect_unrecognized(["--bogus", "-c"], &specs()).unwrap_err();
        assert_eq!(err, ParseError::MissingArgument("-c".to_string()));
    }

    #[test]
    fn test_accepts_owned_strings() {
        let tokens: Vec<String> = vec!["-j".into(), "x".into()];
        let values = parse_command_line(&tokens, &specs()).unwrap();
        assert_eq!(values["--join"], ["x"]);
    }
}
