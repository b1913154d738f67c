//! Projection of the OS color-scheme preference onto a presentation class.

use crate::traits::ClassTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Dark,
    Light,
}

impl ColorScheme {
    /// From the `matches` flag of a `(prefers-color-scheme: dark)` query.
    pub fn from_dark_query(matches: bool) -> Self {
        if matches {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }
}

/// Keeps a fixed set of elements in step with the color-scheme preference.
///
/// The element set is resolved once by the caller and never changes afterwards.
/// `apply` is stateless: it only looks at the preference it is given.
pub struct ThemeSynchronizer<E> {
    elements: Vec<E>,
    class_name: String,
}

impl<E: ClassTarget> ThemeSynchronizer<E> {
    pub fn new(elements: Vec<E>, class_name: impl Into<String>) -> Self {
        Self {
            elements,
            class_name: class_name.into(),
        }
    }

    pub fn apply(&self, scheme: ColorScheme) {
        for element in &self.elements {
            match scheme {
                ColorScheme::Dark => element.add_class(&self.class_name),
                ColorScheme::Light => element.remove_class(&self.class_name),
            }
        }
    }

    /// True when every element's class membership matches `scheme`.
    pub fn is_synced(&self, scheme: ColorScheme) -> bool {
        let want = scheme == ColorScheme::Dark;
        self.elements
            .iter()
            .all(|element| element.has_class(&self.class_name) == want)
    }

    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}
