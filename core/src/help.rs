//! Help text rendering.
//!
//! A help model is a list of [`HelpSection`]s, each a title plus
//! `(syntax, blurb)` lines. Rendering aligns every blurb on one column
//! across all sections and word-wraps blurbs to the configured width.
//!
//! # Example
//!
//! ```
//! use option_layers_core::{HelpSection, format_help};
//!
//! let mut general = HelpSection::new("General options");
//! general.add("-h [ --help ]", "print this help");
//! general.add("-c [ --cores ] n", "number of cores to use");
//!
//! let text = format_help(&[general]);
//! assert_eq!(
//!     text,
//!     "General options:\n  -h [ --help ]     print this help\n  -c [ --cores ] n  number of cores to use\n"
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{Appearance, OptionSpec};

/// One `(syntax, blurb)` row of a help section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpLine {
    /// How the option is written, e.g. `"-c [ --cores ] n"`.
    pub syntax: String,
    /// What it does.
    #[serde(default)]
    pub blurb: String,
}

impl HelpLine {
    pub fn new(syntax: impl Into<String>, blurb: impl Into<String>) -> Self {
        Self {
            syntax: syntax.into(),
            blurb: blurb.into(),
        }
    }
}

/// A titled group of help lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpSection {
    pub title: String,
    #[serde(default)]
    pub lines: Vec<HelpLine>,
}

impl HelpSection {
    /// Creates an empty section.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    /// Appends a line.
    pub fn add(&mut self, syntax: impl Into<String>, blurb: impl Into<String>) {
        self.lines.push(HelpLine::new(syntax, blurb));
    }

    /// Appends a line, builder style.
    pub fn with_line(mut self, syntax: impl Into<String>, blurb: impl Into<String>) -> Self {
        self.add(syntax, blurb);
        self
    }

    /// Builds a section describing `specs`: aliases and parameter placeholder
    /// as syntax, appearance policy and default as blurb.
    ///
    /// # Examples
    ///
    /// ```
    /// use option_layers_core::*;
    ///
    /// let specs = vec![
    ///     OptionSpec::with_default(OptionNames::with_alias("--cores", "-c"), Appearance::Optional, "4").unwrap(),
    ///     OptionSpec::new(OptionNames::with_alias("--help", "-h"), Appearance::OptionalNoParameter),
    /// ];
    /// let section = HelpSection::from_specs("Options", &specs);
    ///
    /// assert_eq!(section.lines[0].syntax, "--cores, -c <value>");
    /// assert_eq!(section.lines[0].blurb, "optional (default: 4)");
    /// assert_eq!(section.lines[1].syntax, "--help, -h");
    /// ```
    pub fn from_specs(title: impl Into<String>, specs: &[OptionSpec]) -> Self {
        let mut section = Self::new(title);
        for spec in specs {
            let mut syntax = spec.names().aliases().join(", ");
            if spec.takes_parameter() {
                syntax.push_str(" <value>");
            }

            let mut blurb = appearance_summary(spec.appearance()).to_string();
            if !spec.default_values().is_empty() {
                blurb.push_str(&format!(" (default: {})", spec.default_values().join(", ")));
            }
            section.add(syntax, blurb);
        }
        section
    }
}

fn appearance_summary(appearance: Appearance) -> &'static str {
    match appearance {
        Appearance::Mandatory => "required",
        Appearance::MandatoryRepeat => "required, repeatable",
        Appearance::Optional => "optional",
        Appearance::OptionalRepeat => "optional, repeatable",
        Appearance::OptionalNoParameter => "switch",
        Appearance::OptionalRepeatNoParameter => "switch, repeatable",
    }
}

/// Layout knobs for [`format_help_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpStyle {
    /// Target maximum line width. Words longer than the blurb column are
    /// never split, so a line may still exceed it.
    pub width: usize,
    /// Spaces before each syntax description.
    pub indent: usize,
    /// Spaces between the syntax column and the blurb column.
    pub gap: usize,
    /// Widest the syntax column may grow; longer syntax moves its blurb to
    /// the next line.
    pub max_syntax_width: usize,
}

impl Default for HelpStyle {
    fn default() -> Self {
        Self {
            width: 79,
            indent: 2,
            gap: 2,
            max_syntax_width: 32,
        }
    }
}

/// Narrowest blurb column before wrapping gives up on the width target.
const MIN_BLURB_WIDTH: usize = 20;

/// Renders `sections` with [`HelpStyle::default`].
pub fn format_help(sections: &[HelpSection]) -> String {
    format_help_with(sections, &HelpStyle::default())
}

/// Renders `sections` with an explicit layout.
///
/// Sections are separated by a blank line and a section with an empty
/// title has no header line. The output is a pure function of the input.
pub fn format_help_with(sections: &[HelpSection], style: &HelpStyle) -> String {
    let syntax_width = sections
        .iter()
        .flat_map(|section| &section.lines)
        .map(|line| line.syntax.chars().count())
        .max()
        .unwrap_or(0)
        .min(style.max_syntax_width);
    let blurb_column = style.indent + syntax_width + style.gap;
    let blurb_width = style.width.saturating_sub(blurb_column).max(MIN_BLURB_WIDTH);

    let mut out = String::new();
    for (idx, section) in sections.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        if !section.title.is_empty() {
            out.push_str(&format!("{}:\n", section.title));
        }

        for line in &section.lines {
            out.push_str(&" ".repeat(style.indent));
            out.push_str(&line.syntax);

            let syntax_len = line.syntax.chars().count();
            let wrapped = wrap(&line.blurb, blurb_width);
            let mut rest = wrapped.iter();
            if syntax_len <= syntax_width {
                if let Some(first) = rest.next().filter(|first| !first.is_empty()) {
                    let pad = syntax_width - syntax_len + style.gap;
                    out.push_str(&format!("{:pad$}{first}", ""));
                }
            }
            out.push('\n');
            for continuation in rest {
                if !continuation.is_empty() {
                    out.push_str(&format!("{:blurb_column$}{continuation}", ""));
                }
                out.push('\n');
            }
        }
    }
    out
}

/// Greedy word wrap. Explicit newlines in `text` start a new line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    // A trailing empty paragraph only comes from a trailing newline.
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}
