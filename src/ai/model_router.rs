// Model alias resolution
//
// Maps the short model names accepted by the API to provider-qualified
// identifiers. Anything not in the table is assumed to already be a
// provider identifier and is passed through.

use std::collections::HashMap;

/// Default alias table
const MODEL_ALIASES: &[(&str, &str)] = &[
    ("gpt-4", "gpt-4"),
    ("claude", "anthropic/claude-3-5-sonnet-latest"),
];

#[derive(Debug, Clone)]
pub struct ModelRouter {
    aliases: HashMap<String, String>,
}

impl Default for ModelRouter {
    fn default() -> Self {
        Self::with_aliases(MODEL_ALIASES.iter().copied())
    }
}

impl ModelRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a router from an explicit alias table
    pub fn with_aliases<'a>(aliases: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let aliases = aliases
            .into_iter()
            .map(|(alias, model)| (alias.to_string(), model.to_string()))
            .collect();
        Self { aliases }
    }

    /// Resolve an alias to a model identifier, unknown aliases pass through
    pub fn resolve<'a>(&'a self, alias: &'a str) -> &'a str {
        self.aliases
            .get(alias)
            .map(String::as_str)
            .unwrap_or(alias)
    }
}
