//! Named values produced during a run.

use std::collections::HashMap;

/// Values a step hands back to the sequencer, in capture order.
pub type Captures = Vec<(String, String)>;

/// The arena of facts keyed by name.
///
/// Steps read a snapshot of it and return [`Captures`]; only the sequencer
/// writes to it, between steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facts {
    values: HashMap<String, String>,
}

impl Facts {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a fact.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether a fact exists.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Record a fact, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Record every captured value.
    pub fn absorb(&mut self, captures: Captures) {
        for (name, value) in captures {
            self.insert(name, value);
        }
    }

    /// Number of facts.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no fact was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Facts as interpolation variables.
    pub fn as_variables(&self) -> HashMap<String, String> {
        self.values.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut facts = Facts::new();
        assert!(facts.is_empty());
        facts.insert("fw_ip", "10.0.1.4");
        assert_eq!(facts.get("fw_ip"), Some("10.0.1.4"));
        assert!(facts.contains("fw_ip"));
        assert_eq!(facts.get("missing"), None);
    }

    #[test]
    fn absorb_overwrites_in_order() {
        let mut facts = Facts::new();
        facts.absorb(vec![
            ("ip".to_string(), "1".to_string()),
            ("ip".to_string(), "2".to_string()),
            ("name".to_string(), "vm".to_string()),
        ]);
        assert_eq!(facts.len(), 2);
        assert_eq!(facts.get("ip"), Some("2"));
    }
}
