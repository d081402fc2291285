use super::Action;
use crate::api::{Permission, Role};
use std::collections::BTreeSet;

/// Permissions of the active role
#[derive(Debug, Clone, Default)]
pub struct PermissionsState {
    pub role: Option<Role>,
    pub permissions: Vec<Permission>,
    granted: BTreeSet<String>,
}

impl PermissionsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the active role holds `code`
    pub fn can(&self, code: &str) -> bool {
        self.granted.contains(code)
    }

    pub(super) fn reduce(&mut self, action: &Action) -> bool {
        match action {
            Action::PermissionsLoaded { role, permissions } => {
                self.role = Some(*role);
                self.granted = permissions
                    .iter()
                    .filter(|p| p.granted_to(*role))
                    .map(|p| p.code.clone())
                    .collect();
                self.permissions = permissions.clone();
                true
            }
            _ => false,
        }
    }
}
