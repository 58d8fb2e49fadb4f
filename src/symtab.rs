//! # symtab
//!
//! Variable storage that outlives individual lines.
//!
//! Reading a name that was never assigned creates it with value `0.0`.
//! Entries keep their first-insertion order, so listings are stable.
//!
//! ```rust
//! # use pdacalc::SymbolTable;
//! let mut st = SymbolTable::new();
//! assert_eq!(st.fetch("x"), 0.0); // created on first read
//! st.assign("x", 2.5);
//! assert_eq!(st.get("x"), Some(2.5));
//! ```
use indexmap::IndexMap;

/// Name receiving a line's value when no assignment names a target.
pub const DEFAULT_TARGET: &str = "it";

#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    vars: IndexMap<String, f64>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `name`, creating it as `0.0` if absent.
    pub fn fetch(&mut self, name: &str) -> f64 {
        if let Some(value) = self.vars.get(name) {
            return *value;
        }
        log::debug!("auto-vivifying {:?}", name);
        self.vars.insert(name.to_string(), 0.0);
        0.0
    }

    pub fn assign(&mut self, name: &str, value: f64) {
        match self.vars.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.vars.insert(name.to_string(), value);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.vars.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_is_empty() {
        let st = SymbolTable::new();
        assert!(st.is_empty());
        assert_eq!(st.get(DEFAULT_TARGET), None);
    }

    #[test]
    fn fetch_vivifies_unknown_names_to_zero() {
        let mut st = SymbolTable::new();
        assert!(!st.contains("ghost"));
        assert_eq!(st.fetch("ghost"), 0.0);
        assert!(st.contains("ghost"));
        assert_eq!(st.len(), 1);
    }

    #[test]
    fn fetch_does_not_overwrite_existing_values() {
        let mut st = SymbolTable::new();
        st.assign("x", 42.0);
        assert_eq!(st.fetch("x"), 42.0);
        assert_eq!(st.len(), 1);
    }

    #[test]
    fn assign_replaces_in_place() {
        let mut st = SymbolTable::new();
        st.assign("a", 1.0);
        st.assign("b", 2.0);
        st.assign("a", 3.0);
        let names: Vec<_> = st.iter().collect();
        assert_eq!(names, vec![("a", 3.0), ("b", 2.0)]);
    }
}
