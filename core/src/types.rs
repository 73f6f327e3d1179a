//! Option specification types.
//!
//! This module defines the data model shared by every stage of the
//! resolution pipeline: the aliases of an option ([`OptionNames`]), how
//! often it may appear ([`Appearance`]), the full specification
//! ([`OptionSpec`]), and the resolved name → values mapping
//! ([`OptionValues`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Resolved option values keyed by official name.
///
/// Each value list keeps the order in which the option appeared in its
/// source. Options that take no parameter record one empty string per
/// appearance.
pub type OptionValues = BTreeMap<String, Vec<String>>;

/// The aliases of a single logical option.
///
/// Include the dashes. The first alias is the *official name* and is used as
/// the key in every [`OptionValues`] map.
///
/// # Examples
///
/// ```
/// use option_layers_core::OptionNames;
///
/// let names = OptionNames::with_alias("--cores", "-c");
/// assert_eq!(names.official(), "--cores");
/// assert_eq!(names.aliases(), ["--cores", "-c"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct OptionNames {
    aliases: Vec<String>,
}

impl OptionNames {
    /// Creates a name set with a single (official) name, e.g. `"--max-foobars"`.
    ///
    /// The name must be non-empty; use [`OptionNames::from_aliases`] for
    /// names that are not known at compile time.
    pub fn new(official: impl Into<String>) -> Self {
        let official = official.into();
        debug_assert!(!official.is_empty(), "option alias must not be empty");
        Self {
            aliases: vec![official],
        }
    }

    /// Creates a name set with an official name and one abbreviation, e.g.
    /// `("--help", "-h")`.
    ///
    /// Both names must be non-empty, as with [`OptionNames::new`].
    pub fn with_alias(official: impl Into<String>, alias: impl Into<String>) -> Self {
        let (official, alias) = (official.into(), alias.into());
        debug_assert!(
            !official.is_empty() && !alias.is_empty(),
            "option alias must not be empty"
        );
        Self {
            aliases: vec![official, alias],
        }
    }

    /// Creates a name set from any number of aliases.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::EmptyNames`] if no alias is given, or
    /// [`SpecError::EmptyAlias`] if any alias is an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use option_layers_core::{OptionNames, SpecError};
    ///
    /// let names = OptionNames::from_aliases(["--join", "-j", "--peer"]).unwrap();
    /// assert_eq!(names.official(), "--join");
    ///
    /// let empty: [&str; 0] = [];
    /// assert_eq!(OptionNames::from_aliases(empty), Err(SpecError::EmptyNames));
    /// ```
    pub fn from_aliases<I, S>(aliases: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let aliases: Vec<String> = aliases.into_iter().map(Into::into).collect();
        if aliases.is_empty() {
            return Err(SpecError::EmptyNames);
        }
        if aliases.iter().any(String::is_empty) {
            return Err(SpecError::EmptyAlias);
        }
        Ok(Self { aliases })
    }

    /// The official name (first alias).
    pub fn official(&self) -> &str {
        &self.aliases[0]
    }

    /// All aliases, official name first.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Checks if `name` is one of the aliases.
    pub fn matches(&self, name: &str) -> bool {
        self.aliases.iter().any(|alias| alias == name)
    }
}

impl TryFrom<Vec<String>> for OptionNames {
    type Error = SpecError;

    fn try_from(aliases: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_aliases(aliases)
    }
}

impl From<OptionNames> for Vec<String> {
    fn from(names: OptionNames) -> Self {
        names.aliases
    }
}

/// How many times an option may appear, and whether it takes a parameter.
///
/// | shape                        | min | max       | parameter |
/// |------------------------------|-----|-----------|-----------|
/// | `Mandatory`                  | 1   | 1         | yes       |
/// | `MandatoryRepeat`            | 1   | unbounded | yes       |
/// | `Optional`                   | 0   | 1         | yes       |
/// | `OptionalRepeat`             | 0   | unbounded | yes       |
/// | `OptionalNoParameter`        | 0   | 1         | no        |
/// | `OptionalRepeatNoParameter`  | 0   | unbounded | no        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appearance {
    /// Must be passed exactly once.
    Mandatory,
    /// Must be passed at least once.
    MandatoryRepeat,
    /// May be passed zero or one times.
    Optional,
    /// May be passed any number of times.
    OptionalRepeat,
    /// A switch without a parameter, at most once. Useful for `--help`.
    OptionalNoParameter,
    /// A switch without a parameter that may be repeated, e.g. `-v -v`.
    OptionalRepeatNoParameter,
}

impl Appearance {
    /// Minimum number of appearances.
    pub fn min(self) -> usize {
        match self {
            Self::Mandatory | Self::MandatoryRepeat => 1,
            Self::Optional
            | Self::OptionalRepeat
            | Self::OptionalNoParameter
            | Self::OptionalRepeatNoParameter => 0,
        }
    }

    /// Maximum number of appearances (`usize::MAX` when unbounded).
    pub fn max(self) -> usize {
        match self {
            Self::Mandatory | Self::Optional | Self::OptionalNoParameter => 1,
            Self::MandatoryRepeat | Self::OptionalRepeat | Self::OptionalRepeatNoParameter => {
                usize::MAX
            }
        }
    }

    /// Whether each appearance consumes a parameter.
    pub fn takes_parameter(self) -> bool {
        !matches!(
            self,
            Self::OptionalNoParameter | Self::OptionalRepeatNoParameter
        )
    }

    /// Whether a default value may be attached to this shape.
    pub fn accepts_default(self) -> bool {
        matches!(self, Self::Optional | Self::OptionalRepeat)
    }
}

/// A command-line / config-file option.
///
/// # Examples
///
/// ```
/// use option_layers_core::{Appearance, OptionNames, OptionSpec};
///
/// // May be used at most once, with no parameter.
/// let help = OptionSpec::new(OptionNames::with_alias("--help", "-h"), Appearance::OptionalNoParameter);
/// assert!(!help.takes_parameter());
///
/// // May be used at most once, with a default. `--cores 3` or `-c 3`, but not a naked `-c`.
/// let cores = OptionSpec::with_default(OptionNames::with_alias("--cores", "-c"), Appearance::Optional, "4")
///     .unwrap();
/// assert_eq!(cores.default_values(), ["4"]);
///
/// // Must appear one or more times.
/// let join = OptionSpec::new(OptionNames::with_alias("--join", "-j"), Appearance::MandatoryRepeat);
/// assert_eq!(join.min_appearances(), 1);
/// assert_eq!(join.max_appearances(), usize::MAX);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOptionSpec", into = "RawOptionSpec")]
pub struct OptionSpec {
    names: OptionNames,
    appearance: Appearance,
    default_values: Vec<String>,
}

impl OptionSpec {
    /// Creates an option with no default value.
    pub fn new(names: OptionNames, appearance: Appearance) -> Self {
        Self {
            names,
            appearance,
            default_values: Vec::new(),
        }
    }

    /// Creates an option whose default value list is `[default]`.
    ///
    /// # Errors
    ///
    /// Only [`Appearance::Optional`] and [`Appearance::OptionalRepeat`] accept
    /// a default. Any other shape returns [`SpecError::DefaultNotAllowed`].
    pub fn with_default(
        names: OptionNames,
        appearance: Appearance,
        default: impl Into<String>,
    ) -> Result<Self, SpecError> {
        if !appearance.accepts_default() {
            return Err(SpecError::DefaultNotAllowed {
                option: names.official().to_string(),
                appearance,
            });
        }
        Ok(Self {
            names,
            appearance,
            default_values: vec![default.into()],
        })
    }

    /// The option's aliases.
    pub fn names(&self) -> &OptionNames {
        &self.names
    }

    /// The official name, used as the key in resolved maps.
    pub fn official_name(&self) -> &str {
        self.names.official()
    }

    /// The appearance shape this option was built with.
    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn min_appearances(&self) -> usize {
        self.appearance.min()
    }

    pub fn max_appearances(&self) -> usize {
        self.appearance.max()
    }

    pub fn takes_parameter(&self) -> bool {
        self.appearance.takes_parameter()
    }

    /// Values used when no source mentions the option.
    pub fn default_values(&self) -> &[String] {
        &self.default_values
    }
}

/// Serialized form of [`OptionSpec`], so manifests only need to spell out
/// the shape and an optional default.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawOptionSpec {
    names: OptionNames,
    appearance: Appearance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<String>,
}

impl TryFrom<RawOptionSpec> for OptionSpec {
    type Error = SpecError;

    fn try_from(raw: RawOptionSpec) -> Result<Self, Self::Error> {
        match raw.default {
            Some(default) => Self::with_default(raw.names, raw.appearance, default),
            None => Ok(Self::new(raw.names, raw.appearance)),
        }
    }
}

impl From<OptionSpec> for RawOptionSpec {
    fn from(spec: OptionSpec) -> Self {
        Self {
            names: spec.names,
            appearance: spec.appearance,
            default: spec.default_values.into_iter().next(),
        }
    }
}

/// Returns the last value recorded for `name`, if any.
///
/// For options that may appear once this is simply "the" value.
///
/// # Examples
///
/// ```
/// use option_layers_core::{OptionValues, get_single};
///
/// let mut values = OptionValues::new();
/// values.insert("--cores".into(), vec!["2".into(), "8".into()]);
/// assert_eq!(get_single(&values, "--cores"), Some("8"));
/// assert_eq!(get_single(&values, "--port"), None);
/// ```
pub fn get_single<'a>(values: &'a OptionValues, name: &str) -> Option<&'a str> {
    values
        .get(name)
        .and_then(|v| v.last().map(String::as_str))
}

/// Returns every value recorded for `name` (empty when absent).
pub fn get_all<'a>(values: &'a OptionValues, name: &str) -> &'a [String] {
    values.get(name).map(Vec::as_slice).unwrap_or(&[])
}

/// Whether `name` appeared at least once (or has a default value).
pub fn is_present(values: &OptionValues, name: &str) -> bool {
    values.get(name).is_some_and(|v| !v.is_empty())
}
