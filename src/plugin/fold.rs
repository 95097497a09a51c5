//! Argument folding.
//!
//! Derives a plugin name from the command path by trying the longest
//! non-flag prefix first and dropping trailing tokens until a resolver
//! recognizes the name.

use std::ffi::OsStr;
use std::path::PathBuf;

use crate::error::Result;
use crate::plugin::name::{is_flag, normalize_token, plugin_name};
use crate::plugin::resolver::PluginResolver;

/// A plugin selected by [`fold`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldMatch {
    /// Path to the resolved executable.
    pub path: PathBuf,
    /// Number of leading command-path tokens folded into the plugin name.
    pub consumed: usize,
}

impl FoldMatch {
    /// Arguments left over for the plugin itself.
    pub fn remaining_args<'a, S>(&self, args: &'a [S]) -> &'a [S] {
        &args[self.consumed.min(args.len())..]
    }
}

/// Leading non-flag tokens of `args`, normalized for name building.
///
/// A token that is not valid UTF-8 ends the window like a flag does; it can
/// still be passed through to the plugin untouched.
pub fn fold_window<S: AsRef<OsStr>>(args: &[S]) -> Vec<String> {
    args.iter()
        .map_while(|arg| arg.as_ref().to_str().filter(|token| !is_flag(token)))
        .map(normalize_token)
        .collect()
}

/// Find the longest prefix of `args` that resolves to a plugin.
///
/// Returns `Ok(None)` when no prefix resolves. Not-found lookups shrink the
/// window and are discarded; any other lookup error (for example a failed
/// install of a registry-managed plugin) is returned as-is.
pub fn fold<S: AsRef<OsStr>>(
    args: &[S],
    resolver: &dyn PluginResolver,
) -> Result<Option<FoldMatch>> {
    let mut window = fold_window(args);

    while !window.is_empty() {
        let name = plugin_name(&window);
        match resolver.lookup(&name) {
            Ok(path) if !path.as_os_str().is_empty() => {
                tracing::debug!("Resolved {} to {}", name, path.display());
                return Ok(Some(FoldMatch {
                    path,
                    consumed: window.len(),
                }));
            }
            Ok(_) => tracing::debug!("Lookup for {} returned an empty path", name),
            Err(e) if e.is_not_found() => tracing::debug!("No plugin named {}", name),
            Err(e) => return Err(e),
        }
        window.pop();
    }

    Ok(None)
}
