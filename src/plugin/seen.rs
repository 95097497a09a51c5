//! Tracking of plugins already reported during a single run.

use std::collections::HashMap;

/// Plugin command names seen so far, mapped to the plugin selected for them.
///
/// Passed explicitly into registry lookups and plugin listing so that an
/// ambiguity or shadowing warning is emitted once per command name.
#[derive(Debug, Default, Clone)]
pub struct SeenPlugins {
    selected: HashMap<String, String>,
}

impl SeenPlugins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `selection` for `command`.
    ///
    /// Returns `true` the first time a command is recorded.
    pub fn record(&mut self, command: &str, selection: &str) -> bool {
        if self.selected.contains_key(command) {
            return false;
        }
        self.selected
            .insert(command.to_string(), selection.to_string());
        true
    }

    /// The selection recorded for `command`, if any.
    pub fn selected(&self, command: &str) -> Option<&str> {
        self.selected.get(command).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_record_wins() {
        let mut seen = SeenPlugins::new();
        assert!(seen.record("outrig-foo", "alpha"));
        assert!(!seen.record("outrig-foo", "beta"));
        assert_eq!(seen.selected("outrig-foo"), Some("alpha"));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn unknown_command_has_no_selection() {
        let seen = SeenPlugins::new();
        assert!(seen.is_empty());
        assert_eq!(seen.selected("outrig-bar"), None);
    }
}
