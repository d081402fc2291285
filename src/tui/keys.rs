use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub label: &'static str,
    pub description: &'static str,
}

impl KeyBinding {
    pub fn new(key: KeyCode, modifiers: KeyModifiers, label: &'static str, description: &'static str) -> Self {
        Self {
            key,
            modifiers,
            label,
            description,
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key == event.code && self.modifiers == event.modifiers
    }
}

/// Application-wide key mappings; page keys are handled by the pages themselves
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Quit application
    pub quit: KeyBinding,

    /// Show help
    pub help: KeyBinding,

    /// Move focus between the side menu and the page
    pub switch_focus: KeyBinding,

    /// Return to the previous location
    pub back: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL, "Ctrl+C", "Quit application"),
            help: KeyBinding::new(KeyCode::Char('g'), KeyModifiers::CONTROL, "Ctrl+G", "Show/hide help"),
            switch_focus: KeyBinding::new(KeyCode::Tab, KeyModifiers::NONE, "Tab", "Switch menu/page focus"),
            back: KeyBinding::new(KeyCode::Esc, KeyModifiers::NONE, "Esc", "Go back"),
        }
    }
}

impl KeyMap {
    /// Check if the event should quit the application
    pub fn should_quit(&self, event: &KeyEvent) -> bool {
        self.quit.matches(event)
    }

    /// Check if the event should show help
    pub fn should_show_help(&self, event: &KeyEvent) -> bool {
        self.help.matches(event)
    }

    pub fn should_switch_focus(&self, event: &KeyEvent) -> bool {
        self.switch_focus.matches(event)
    }

    pub fn should_go_back(&self, event: &KeyEvent) -> bool {
        self.back.matches(event)
    }

    /// Global bindings as `(key, description)` pairs
    pub fn bindings(&self) -> Vec<(&'static str, &'static str)> {
        [&self.quit, &self.help, &self.switch_focus, &self.back]
            .iter()
            .map(|b| (b.label, b.description))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_requires_control() {
        let keys = KeyMap::default();
        assert!(keys.should_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!keys.should_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_bindings_listed_for_help() {
        let bindings = KeyMap::default().bindings();
        assert_eq!(bindings.len(), 4);
        assert_eq!(bindings[0], ("Ctrl+C", "Quit application"));
    }
}
