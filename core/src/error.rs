//! Error types for option resolution.
//!
//! Each pipeline stage has its own error family so that hosts can tell a
//! malformed command line ([`ParseError`]) from a malformed config file
//! ([`FileParseError`]) and from a count violation discovered after merging
//! ([`ValidationError`]). [`ResolveError`] wraps all three for callers that
//! run the whole pipeline at once.

use thiserror::Error;

use crate::Appearance;

/// Command-line parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token matched no known alias (strict mode only).
    #[error("unrecognized option '{0}'")]
    UnrecognizedOption(String),
    /// An option that takes a parameter was last, or was directly followed
    /// by another option.
    #[error("missing argument for {0}")]
    MissingArgument(String),
}

/// Appearance count violations found by
/// [`verify_option_counts`](crate::verify_option_counts).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The option appeared fewer than `min` times.
    #[error("option '{option}' must be specified at least {min} time(s), found {found}")]
    TooFew {
        option: String,
        min: usize,
        found: usize,
    },
    /// The option appeared more than `max` times.
    #[error("option '{option}' may be specified at most {max} time(s), found {found}")]
    TooMany {
        option: String,
        max: usize,
        found: usize,
    },
}

impl ValidationError {
    /// Official name of the offending option.
    pub fn option(&self) -> &str {
        match self {
            Self::TooFew { option, .. } | Self::TooMany { option, .. } => option,
        }
    }
}

/// What went wrong on a config file line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileParseErrorKind {
    /// The name does not resolve to any known option.
    #[error("unrecognized option name '{0}'")]
    UnknownOption(String),
    /// The option takes a parameter but none was given.
    #[error("option '{0}' requires a value")]
    MissingValue(String),
    /// The option takes no parameter but a value was given.
    #[error("option '{0}' does not take a value")]
    UnexpectedValue(String),
    /// The line is not of the form `name = value` or a bare switch name.
    #[error("expected 'name = value'")]
    Malformed,
}

/// Config file parse failure, located by path and 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("config file {path}:{line}: {kind} (in line '{content}')")]
pub struct FileParseError {
    /// Path as given by the caller; only used for diagnostics.
    pub path: String,
    /// 1-based line number.
    pub line: usize,
    /// The offending line, without its line terminator.
    pub content: String,
    pub kind: FileParseErrorKind,
}

/// Contract violations when building an [`OptionSpec`](crate::OptionSpec).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// A name set needs at least one alias.
    #[error("an option needs at least one name")]
    EmptyNames,
    /// Aliases must be non-empty strings.
    #[error("option names cannot be empty")]
    EmptyAlias,
    /// Defaults are only meaningful for optional options with a parameter.
    #[error("option '{option}' cannot have a default value with appearance {appearance:?}")]
    DefaultNotAllowed {
        option: String,
        appearance: Appearance,
    },
}

/// Any failure from the layered resolution pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    FileParse(#[from] FileParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
