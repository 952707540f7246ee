//! Dark/light classification of a single element.
//!
//! An element is dark when the first applicable signal says so, in this order:
//!
//! 1. **Background image.** A gradient is dark if it names a dark gradient
//!    token; any other image is dark if its reference carries a thematic
//!    keyword. An image always decides the element on its own: the color
//!    underneath is not consulted.
//! 2. **Background color.** A usable (parseable, non-transparent) color is dark
//!    when its brightness is strictly below the threshold.
//! 3. **Class list.** With no usable color, a dark utility class decides.
//! 4. **Ancestors.** If the element itself is not dark, up to
//!    `ancestor_depth` parents (never the body) are tested for a dark class,
//!    a dark solid color or a dark image, in that order.
//!
//! Anything else is light. Unparseable colors are "no signal", never errors.

use tracing::trace;

use crate::color::Rgba;
use crate::config::DetectorConfig;
use crate::surface::{Background, Surface};
use crate::vocabulary::Vocabulary;

/// Classifies elements of a [`Surface`] as dark or light.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    vocabulary: &'a Vocabulary,
    brightness_threshold: f64,
    ancestor_depth: usize,
}

impl<'a> Classifier<'a> {
    pub fn new(vocabulary: &'a Vocabulary, config: &DetectorConfig) -> Self {
        Self {
            vocabulary,
            brightness_threshold: config.brightness_threshold,
            ancestor_depth: config.ancestor_depth,
        }
    }

    /// Full classification: the element's own signals, then its ancestors.
    pub fn classify<S: Surface>(&self, surface: &S, node: &S::Node) -> bool {
        if self.classify_element(surface, node) {
            return true;
        }
        if *node == surface.body() {
            return false;
        }
        self.ancestor_is_dark(surface, node)
    }

    /// The element's own signals only (image, then color, then class).
    pub fn classify_element<S: Surface>(&self, surface: &S, node: &S::Node) -> bool {
        let background = surface.background(node);

        if let Some(image) = background.image() {
            return self.image_is_dark(image);
        }

        if let Some(dark) = self.color_is_dark(&background) {
            return dark;
        }

        self.vocabulary.matches_class(&surface.class_name(node))
    }

    /// True if `brightness` counts as dark under this classifier's threshold.
    pub fn is_dark_brightness(&self, brightness: f64) -> bool {
        brightness < self.brightness_threshold
    }

    fn ancestor_is_dark<S: Surface>(&self, surface: &S, node: &S::Node) -> bool {
        let body = surface.body();
        let mut current = surface.parent(node);
        let mut depth = 0;

        while let Some(ancestor) = current {
            if depth >= self.ancestor_depth || ancestor == body {
                break;
            }
            depth += 1;

            if self.ancestor_matches(surface, &ancestor) {
                trace!(depth, "dark background inherited from ancestor");
                return true;
            }
            current = surface.parent(&ancestor);
        }
        false
    }

    fn ancestor_matches<S: Surface>(&self, surface: &S, node: &S::Node) -> bool {
        if self.vocabulary.matches_class(&surface.class_name(node)) {
            return true;
        }
        let background = surface.background(node);
        if self.color_is_dark(&background) == Some(true) {
            return true;
        }
        background
            .image()
            .is_some_and(|image| self.image_is_dark(image))
    }

    fn image_is_dark(&self, image: &str) -> bool {
        if image.to_ascii_lowercase().contains("gradient(") {
            self.vocabulary.matches_gradient(image)
        } else {
            self.vocabulary.matches_image(image)
        }
    }

    /// `None` when there is no usable color: absent, unparseable or transparent.
    fn color_is_dark(&self, background: &Background) -> Option<bool> {
        let color = Rgba::parse(background.color()?).ok()?;
        if color.is_transparent() {
            return None;
        }
        Some(self.is_dark_brightness(color.brightness()))
    }
}
