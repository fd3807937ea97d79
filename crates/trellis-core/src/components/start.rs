//! Start-menu marker.

use crate::domain::{Component, ComponentKind, StartMenu};

/// Marks a project as having a start menu. Only honoured on the root.
#[derive(Debug, Clone, Default)]
pub struct Start {
    menu: StartMenu,
}

impl Start {
    pub fn new(menu: StartMenu) -> Self {
        Self { menu }
    }

    pub fn add_entry(&mut self, name: impl Into<String>, description: impl Into<String>) {
        self.menu = std::mem::take(&mut self.menu).with_entry(name, description);
    }

    pub fn menu(&self) -> &StartMenu {
        &self.menu
    }
}

impl Component for Start {
    fn name(&self) -> &str {
        "Start"
    }

    fn kind(&self) -> ComponentKind<'_> {
        ComponentKind::Start(&self.menu)
    }
}
