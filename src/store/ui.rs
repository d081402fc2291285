use super::Action;
use crate::navigation::NavigationMemory;

/// Navigation and status-bar slice
#[derive(Debug, Clone)]
pub struct UiState {
    /// Location last reported by the router
    pub current_path: String,

    /// Last visited path per tracked section
    pub memory: NavigationMemory,

    /// Message shown in the status bar
    pub status: Option<String>,
}

impl UiState {
    pub fn new(tracked_sections: &[String]) -> Self {
        Self {
            current_path: String::new(),
            memory: NavigationMemory::new(tracked_sections.iter().cloned()),
            status: None,
        }
    }

    pub(super) fn reduce(&mut self, action: &Action) -> bool {
        match action {
            Action::Navigated(path) => {
                if &self.current_path == path {
                    return false;
                }
                self.current_path = path.clone();
                true
            }
            Action::PathRemembered { section, path } => self.memory.upsert(section, path),
            Action::StatusSet(message) => {
                self.status = Some(message.clone());
                true
            }
            Action::StatusCleared => self.status.take().is_some(),
            _ => false,
        }
    }
}
