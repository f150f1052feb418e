//! Mobile navigation toggle.

/// Visibility of the navigation links, as read from their inline `display`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavVisibility {
    Shown,
    Hidden,
}

impl NavVisibility {
    /// Only `display: flex` counts as shown, anything else (including no
    /// inline style at all) is hidden.
    pub fn from_display(display: &str) -> Self {
        if display.trim() == "flex" {
            NavVisibility::Shown
        } else {
            NavVisibility::Hidden
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            NavVisibility::Shown => "flex",
            NavVisibility::Hidden => "none",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            NavVisibility::Shown => NavVisibility::Hidden,
            NavVisibility::Hidden => NavVisibility::Shown,
        }
    }
}

/// Menu button state. Each click flips the links' visibility.
#[derive(Clone, Debug)]
pub struct MenuToggle {
    visibility: NavVisibility,
}

impl MenuToggle {
    pub fn new(initial_display: &str) -> Self {
        Self {
            visibility: NavVisibility::from_display(initial_display),
        }
    }

    pub fn visibility(&self) -> NavVisibility {
        self.visibility
    }

    /// Flips the visibility and returns the `display` value to apply.
    pub fn toggle(&mut self) -> &'static str {
        self.visibility = self.visibility.toggled();
        self.visibility.display()
    }
}
