use serde::{Deserialize, Serialize};

use crate::core::ScreenPoint;

/// Keyboard modifier state carried by input events, and the masks handlers
/// match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Self = Self { bits: 0 };
    pub const SHIFT: Self = Self { bits: 1 << 0 };
    pub const CONTROL: Self = Self { bits: 1 << 1 };
    pub const ALT: Self = Self { bits: 1 << 2 };
    pub const META: Self = Self { bits: 1 << 3 };

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self { bits: bits & 0b1111 }
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.bits
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// `true` when every bit of `mask` is set in `self`.
    #[must_use]
    pub const fn contains(self, mask: Self) -> bool {
        (self.bits & mask.bits) == mask.bits
    }

    /// Modifier that starts a drag-pan.
    ///
    /// Control everywhere except macOS, where Control-click is reserved by
    /// the window system and Alt (Option) is used instead.
    #[must_use]
    pub const fn platform_pan_mask() -> Self {
        if cfg!(target_os = "macos") {
            Self::ALT
        } else {
            Self::CONTROL
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MouseButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// Pointer event in panel screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseEvent {
    pub position: ScreenPoint,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    pub click_count: u32,
}

impl MouseEvent {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            position: ScreenPoint::new(x, y),
            button: MouseButton::Primary,
            modifiers: Modifiers::NONE,
            click_count: 1,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    #[must_use]
    pub const fn with_click_count(mut self, click_count: u32) -> Self {
        self.click_count = click_count;
        self
    }
}

/// Wheel rotation in notches: negative rotates away from the user (zoom in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub position: ScreenPoint,
    pub modifiers: Modifiers,
    pub rotation: i32,
}

impl WheelEvent {
    #[must_use]
    pub const fn new(x: i32, y: i32, rotation: i32) -> Self {
        Self {
            position: ScreenPoint::new(x, y),
            modifiers: Modifiers::NONE,
            rotation,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::Modifiers;

    #[test]
    fn contains_requires_every_mask_bit() {
        let state = Modifiers::CONTROL | Modifiers::SHIFT;
        assert!(state.contains(Modifiers::CONTROL));
        assert!(state.contains(Modifiers::CONTROL | Modifiers::SHIFT));
        assert!(!state.contains(Modifiers::CONTROL | Modifiers::ALT));
        assert!(state.contains(Modifiers::NONE));
    }

    #[test]
    fn pan_mask_follows_platform() {
        let mask = Modifiers::platform_pan_mask();
        if cfg!(target_os = "macos") {
            assert_eq!(mask, Modifiers::ALT);
        } else {
            assert_eq!(mask, Modifiers::CONTROL);
        }
    }
}
