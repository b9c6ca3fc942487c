//! Text overlay

/// Screen-space text block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOverlay {
    text: String,
    visible: bool,
}

impl TextOverlay {
    /// Visible overlay showing `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: true,
        }
    }

    /// Displayed text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the overlay is drawn
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Flip visibility and return the new state
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_visibility() {
        let mut overlay = TextOverlay::new("F12 hides this");
        assert!(overlay.is_visible());
        assert!(!overlay.toggle());
        assert!(overlay.toggle());
        assert_eq!(overlay.text(), "F12 hides this");
    }
}
