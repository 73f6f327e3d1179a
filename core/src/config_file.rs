//! Config file parsing.
//!
//! The format is line based:
//!
//! ```text
//! # Comments run from '#' to the end of the line.
//! cores = 8
//! join = db1.example.com:29015
//! join = db2.example.com:29015   # repeated names append
//! no-update-check                # switches are written bare
//! ```
//!
//! Names are written without their leading dashes and resolve to the alias
//! `--name`. Writing the dashes out (`--cores = 8`) is accepted too. Only the
//! first `=` separates name from value, so values may contain `=`. A `#`
//! starts a comment only at the start of a line or after whitespace, so
//! `server-name = web#1` keeps its value intact.

use tracing::debug;

use crate::OptionValues;
use crate::error::{FileParseError, FileParseErrorKind};
use crate::index::AliasIndex;
use crate::types::OptionSpec;

const COMMENT_MARKER: char = '#';

/// Parses config file `contents` against `specs`.
///
/// `file_path` is only used to build error messages; the file is never
/// opened here.
///
/// # Errors
///
/// Returns a [`FileParseError`] carrying the path, the 1-based line number
/// and the raw line for an unknown option name, a missing or unexpected
/// value, or a line without a name.
///
/// # Examples
///
/// ```
/// use option_layers_core::*;
///
/// let specs = vec![
///     OptionSpec::with_default(OptionNames::with_alias("--cores", "-c"), Appearance::Optional, "4").unwrap(),
///     OptionSpec::new(OptionNames::new("--no-update-check"), Appearance::OptionalNoParameter),
/// ];
///
/// let values = parse_config_file("cores = 8\nno-update-check\n", "app.conf", &specs).unwrap();
/// assert_eq!(values["--cores"], ["8"]);
/// assert_eq!(values["--no-update-check"], [""]);
///
/// let err = parse_config_file("\nport = 80\n", "app.conf", &specs).unwrap_err();
/// assert_eq!(err.path, "app.conf");
/// assert_eq!(err.line, 2);
/// ```
pub fn parse_config_file(
    contents: &str,
    file_path: &str,
    specs: &[OptionSpec],
) -> Result<OptionValues, FileParseError> {
    debug!(path = file_path, options = specs.len(), "Parsing config file");

    let index = AliasIndex::new(specs);
    let mut values = OptionValues::new();

    for (idx, raw_line) in contents.split('\n').enumerate() {
        let raw_line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let fail = |kind| FileParseError {
            path: file_path.to_string(),
            line: idx + 1,
            content: raw_line.to_string(),
            kind,
        };

        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let (name, value) = match line.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (line, None),
        };
        if name.is_empty() {
            return Err(fail(FileParseErrorKind::Malformed));
        }

        let alias = option_alias(name);
        let Some(spec) = index.lookup(&alias) else {
            // `join db1:29015` names a real option but forgot the `=`.
            if value.is_none() && leading_word_is_option(name, &index) {
                return Err(fail(FileParseErrorKind::Malformed));
            }
            return Err(fail(FileParseErrorKind::UnknownOption(name.to_string())));
        };

        let value = match (spec.takes_parameter(), value) {
            (true, Some(value)) if !value.is_empty() => value.to_string(),
            (true, _) => return Err(fail(FileParseErrorKind::MissingValue(name.to_string()))),
            (false, None) => String::new(),
            (false, Some(_)) => {
                return Err(fail(FileParseErrorKind::UnexpectedValue(name.to_string())));
            }
        };

        debug!(option = spec.official_name(), line = idx + 1, "Config assignment");
        values
            .entry(spec.official_name().to_string())
            .or_default()
            .push(value);
    }

    Ok(values)
}

fn strip_comment(line: &str) -> &str {
    let mut prev_is_space = true;
    for (pos, ch) in line.char_indices() {
        if ch == COMMENT_MARKER && prev_is_space {
            return &line[..pos];
        }
        prev_is_space = ch.is_whitespace();
    }
    line
}

fn leading_word_is_option(name: &str, index: &AliasIndex<'_>) -> bool {
    match name.split_once(char::is_whitespace) {
        Some((word, _)) => index.lookup(&option_alias(word)).is_some(),
        None => false,
    }
}

/// Maps a config-file name to the command-line alias it stands for.
fn option_alias(name: &str) -> String {
    if name.starts_with('-') {
        name.to_string()
    } else {
        format!("--{name}")
    }
}
