use super::Action;
use crate::api::OptionKind;
use std::collections::HashMap;

/// Option lists backing the search inputs
#[derive(Debug, Clone, Default)]
pub struct AutocompleteState {
    options: HashMap<OptionKind, Vec<String>>,
}

impl AutocompleteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self, kind: OptionKind) -> &[String] {
        self.options.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Up to `limit` options containing `input`, those starting with it first
    pub fn suggest(&self, kind: OptionKind, input: &str, limit: usize) -> Vec<&str> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut prefixed = Vec::new();
        let mut contained = Vec::new();
        for option in self.options(kind) {
            let lower = option.to_lowercase();
            if lower.starts_with(&needle) {
                prefixed.push(option.as_str());
            } else if lower.contains(&needle) {
                contained.push(option.as_str());
            }
        }

        prefixed.into_iter().chain(contained).take(limit).collect()
    }

    pub(super) fn reduce(&mut self, action: &Action) -> bool {
        match action {
            Action::OptionsLoaded { kind, options } => {
                self.options.insert(*kind, options.clone());
                true
            }
            _ => false,
        }
    }
}
