//! Option manifests: the option specs and help text a host declares, loaded
//! from YAML or JSON.
//!
//! ```yaml
//! options:
//!   - names: ["--cores", "-c"]
//!     appearance: optional
//!     default: "4"
//!   - names: ["--join", "-j"]
//!     appearance: mandatory_repeat
//! help:
//!   - title: Clustering options
//!     lines:
//!       - syntax: "-j [ --join ] host:port"
//!         blurb: host and port of a node to connect to
//! ```

use std::fs;
use std::path::Path;

use option_layers_core::{HelpSection, OptionSpec};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionManifest {
    pub options: Vec<OptionSpec>,
    /// Hand-written help; when empty, help is generated from `options`.
    #[serde(default)]
    pub help: Vec<HelpSection>,
}

impl OptionManifest {
    /// Loads a manifest, choosing YAML for `.yaml`/`.yml` and JSON otherwise.
    pub fn load(path: &Path) -> Result<Self, String> {
        let raw = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read manifest '{}': {err}", path.display()))?;

        let manifest: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => serde_yaml::from_str(&raw)
                .map_err(|err| format!("Invalid manifest '{}': {err}", path.display()))?,
            _ => serde_json::from_str(&raw)
                .map_err(|err| format!("Invalid manifest '{}': {err}", path.display()))?,
        };

        debug!(
            path = %path.display(),
            options = manifest.options.len(),
            sections = manifest.help.len(),
            "Loaded option manifest"
        );
        Ok(manifest)
    }

    /// Help sections to render: the declared ones, or one generated section.
    pub fn help_sections(&self) -> Vec<HelpSection> {
        if self.help.is_empty() {
            vec![HelpSection::from_specs("Options", &self.options)]
        } else {
            self.help.clone()
        }
    }
}
