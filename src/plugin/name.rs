//! Plugin naming convention.
//!
//! External plugins are executables named `outrig-<tok1>-<tok2>-...`. The
//! `-` separator is reserved for token boundaries, so any `-` inside a
//! user-typed token is rewritten to `_` before joining. The same rule is
//! applied when the registry materializes a binary, which keeps lookups and
//! installs in agreement.

/// Namespace prefix shared by every plugin executable.
pub const PLUGIN_NAMESPACE: &str = "outrig";

/// Separator placed between the namespace and each token.
pub const NAME_SEPARATOR: char = '-';

/// Replacement for separator characters found inside a single token.
pub const SEPARATOR_SUBSTITUTE: char = '_';

/// Marker that starts a flag; folding stops at the first such token.
pub const FLAG_MARKER: char = '-';

/// Normalize a raw token so it cannot introduce a token boundary.
pub fn normalize_token(token: &str) -> String {
    token.replace(NAME_SEPARATOR, &SEPARATOR_SUBSTITUTE.to_string())
}

/// Whether a token is a flag (and therefore ends the foldable prefix).
pub fn is_flag(token: &str) -> bool {
    token.starts_with(FLAG_MARKER)
}

/// Build the executable name for a sequence of already-normalized tokens.
pub fn plugin_name<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut name = String::from(PLUGIN_NAMESPACE);
    for token in tokens {
        name.push(NAME_SEPARATOR);
        name.push_str(token.as_ref());
    }
    name
}

/// Build the executable name for raw user tokens, normalizing each one.
pub fn plugin_name_for_command<S: AsRef<str>>(tokens: &[S]) -> String {
    let normalized: Vec<String> = tokens.iter().map(|t| normalize_token(t.as_ref())).collect();
    plugin_name(&normalized)
}

/// Split a plugin executable name back into its command tokens.
///
/// Returns `None` when the name is outside the namespace. A platform
/// executable suffix, if any, is stripped first.
pub fn command_tokens(file_name: &str) -> Option<Vec<String>> {
    let suffix = std::env::consts::EXE_SUFFIX;
    let stem = if !suffix.is_empty() {
        file_name.strip_suffix(suffix).unwrap_or(file_name)
    } else {
        file_name
    };

    let rest = stem
        .strip_prefix(PLUGIN_NAMESPACE)?
        .strip_prefix(NAME_SEPARATOR)?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.split(NAME_SEPARATOR).map(String::from).collect())
}
