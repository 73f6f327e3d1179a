use std::collections::HashMap;

use crate::OptionSpec;

/// Alias → owning spec lookup, built once per parse call.
///
/// When two specs share an alias the first one in the list wins, which is
/// what a front-to-back scan of the list would find.
#[derive(Debug)]
pub(crate) struct AliasIndex<'a> {
    by_alias: HashMap<&'a str, &'a OptionSpec>,
}

impl<'a> AliasIndex<'a> {
    pub(crate) fn new(specs: &'a [OptionSpec]) -> Self {
        let mut by_alias = HashMap::new();
        for spec in specs {
            for alias in spec.names().aliases() {
                by_alias.entry(alias.as_str()).or_insert(spec);
            }
        }
        Self { by_alias }
    }

    pub(crate) fn lookup(&self, alias: &str) -> Option<&'a OptionSpec> {
        self.by_alias.get(alias).copied()
    }
}
