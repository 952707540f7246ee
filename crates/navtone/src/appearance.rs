//! What the navigation bar is told, and how it maps to a style regime.

/// Output of one evaluation pass, consumed by the navigation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Appearance {
    /// The region behind the bar reads as dark.
    pub is_dark_background: bool,
    /// Whether the page has scrolled past the threshold. Only the root route
    /// tracks this; elsewhere it is `None`.
    pub scrolled: Option<bool>,
}

impl Appearance {
    /// The appearance before any pass has run on `route`.
    pub fn initial(is_root: bool) -> Self {
        Self {
            is_dark_background: false,
            scrolled: is_root.then_some(false),
        }
    }

    /// The style regime this appearance selects.
    pub fn style(&self) -> NavStyle {
        NavStyle {
            text: if self.is_dark_background {
                TextTone::Light
            } else {
                TextTone::Dark
            },
            bar: match self.scrolled {
                Some(false) => BarFill::Transparent,
                Some(true) | None => BarFill::Solid,
            },
        }
    }
}

/// Text and icon color of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    /// Light text, for dark backgrounds.
    Light,
    /// Dark text, for light backgrounds.
    Dark,
}

/// Background treatment of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarFill {
    /// See-through bar over the root route's hero, before scrolling.
    Transparent,
    /// Opaque bar.
    Solid,
}

/// The style regime selected for the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavStyle {
    pub text: TextTone,
    pub bar: BarFill,
}
