//! Style input: declaration trees, values, normalization.
//!
//! A [`Style`] is an ordered list of entries. Entries are either declarations
//! (`backgroundColor: "red"`) or nested blocks keyed by a selector
//! (`"&:hover"`) or an at-rule (`"@media print"`).

pub mod json;
pub mod properties;

use crate::error::StyleError;

/// A single declaration value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Emitted verbatim.
    Str(String),
    /// Emitted with a `px` suffix unless zero or the property is unitless.
    Number(f64),
    /// Fallback list: one declaration per element, in order.
    List(Vec<StyleValue>),
    /// A nested block under a selector or at-rule key.
    Nested(Style),
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Str(value.to_owned())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Str(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<f32> for StyleValue {
    fn from(value: f32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<u32> for StyleValue {
    fn from(value: u32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<Style> for StyleValue {
    fn from(value: Style) -> Self {
        StyleValue::Nested(value)
    }
}

impl<T: Into<StyleValue>> From<Vec<T>> for StyleValue {
    fn from(values: Vec<T>) -> Self {
        StyleValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// A style object: declarations plus nested blocks, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    entries: Vec<(String, StyleValue)>,
    display_name: Option<String>,
}

impl Style {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an entry (builder). Replaces an existing entry with the same key
    /// in place, keeping its position.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a nested block under a selector or at-rule (builder).
    pub fn nest(self, key: impl Into<String>, style: Style) -> Self {
        self.set(key, StyleValue::Nested(style))
    }

    /// Set the display name used for debug identifiers (builder).
    ///
    /// Never affects the content hash.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set an entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// The display name, if any.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Nested blocks in insertion order, keys trimmed.
    pub fn nested(&self) -> impl Iterator<Item = (&str, &Style)> {
        self.entries.iter().filter_map(|(k, v)| match v {
            StyleValue::Nested(style) => Some((k.trim(), style)),
            _ => None,
        })
    }

    /// Whether the style has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first top-level declaration's property name, if any.
    pub(crate) fn first_declaration(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, v)| !matches!(v, StyleValue::Nested(_)))
            .map(|(k, _)| k.as_str())
    }

    /// Render the top-level declarations as normalized CSS text.
    ///
    /// Properties are hyphenated and sorted by name, so insertion order never
    /// changes the output: `{fontSize: 10, color: "red"}` renders as
    /// `color:red;font-size:10px`.
    pub fn declarations(&self) -> Result<String, StyleError> {
        let mut properties = Vec::new();
        for (key, value) in &self.entries {
            if matches!(value, StyleValue::Nested(_)) {
                continue;
            }
            let name = properties::hyphenate(key.trim());
            if name.is_empty() {
                return Err(StyleError::EmptyProperty);
            }
            properties.push((name, value));
        }
        // Stable: duplicate names (e.g. `fontSize` and `font-size`) keep insertion order.
        properties.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = Vec::with_capacity(properties.len());
        for (name, value) in properties {
            properties::push_declaration(&mut out, &name, value)?;
        }
        Ok(out.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let style = Style::new()
            .set("color", "red")
            .set("padding", 10)
            .set("color", "blue");
        let entries: Vec<_> = style.entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ("color", &StyleValue::Str("blue".into())));
    }

    #[test]
    fn declarations_sorted_and_hyphenated() {
        let style = Style::new().set("fontSize", 10).set("color", "red");
        assert_eq!(style.declarations().unwrap(), "color:red;font-size:10px");
    }

    #[test]
    fn declaration_order_does_not_matter() {
        let a = Style::new().set("color", "red").set("fontSize", 10);
        let b = Style::new().set("fontSize", 10).set("color", "red");
        assert_eq!(a.declarations().unwrap(), b.declarations().unwrap());
    }

    #[test]
    fn declarations_skip_nested() {
        let style = Style::new()
            .set("color", "red")
            .nest("&:hover", Style::new().set("color", "blue"));
        assert_eq!(style.declarations().unwrap(), "color:red");
        assert_eq!(style.nested().count(), 1);
    }

    #[test]
    fn list_values_expand() {
        let style = Style::new().set("display", vec!["-webkit-flex", "flex"]);
        assert_eq!(
            style.declarations().unwrap(),
            "display:-webkit-flex;display:flex"
        );
    }

    #[test]
    fn empty_property_name_errors() {
        let style = Style::new().set("  ", "red");
        assert_eq!(style.declarations(), Err(StyleError::EmptyProperty));
    }

    #[test]
    fn empty_style() {
        let style = Style::new();
        assert!(style.is_empty());
        assert_eq!(style.declarations().unwrap(), "");
    }

    #[test]
    fn display_name_is_separate_from_entries() {
        let style = Style::new().with_display_name("button");
        assert!(style.is_empty());
        assert_eq!(style.display_name(), Some("button"));
    }

    #[test]
    fn first_declaration_ignores_nested() {
        let style = Style::new()
            .nest("body", Style::new())
            .set("margin", 0);
        assert_eq!(style.first_declaration(), Some("margin"));
    }
}
