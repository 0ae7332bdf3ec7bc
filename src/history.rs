//! Previous/current color pair.

use crate::color::HsvColor;

/// Two-slot history: a commit moves `current` into `previous`, a revision
/// only replaces `current`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorHistory {
    previous: HsvColor,
    current: HsvColor,
}

impl ColorHistory {
    pub fn new(previous: HsvColor, current: HsvColor) -> Self {
        Self { previous, current }
    }

    pub fn previous(&self) -> &HsvColor {
        &self.previous
    }

    pub fn current(&self) -> &HsvColor {
        &self.current
    }

    /// Make `next` the current color. Returns `false`, leaving both slots
    /// untouched, when `next` equals the current color.
    pub fn commit(&mut self, next: HsvColor) -> bool {
        if next == self.current {
            return false;
        }
        self.previous = self.current;
        self.current = next;
        true
    }

    /// Replace the current color while keeping `previous`. Returns `false`
    /// when `next` equals the current color.
    pub fn revise(&mut self, next: HsvColor) -> bool {
        if next == self.current {
            return false;
        }
        self.current = next;
        true
    }
}

impl Default for ColorHistory {
    fn default() -> Self {
        Self::new(
            HsvColor::from_argb(crate::constants::DEFAULT_PREVIOUS_COLOR),
            HsvColor::from_argb(crate::constants::DEFAULT_CURRENT_COLOR),
        )
    }
}
