use std::collections::HashMap;

/// A key to text lookup table for one language. It is a wrapper
/// around a HashMap, and derefs to it, so it can be handed straight to a
/// [Loader](crate::Loader).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StringTable(HashMap<String, String>);

impl StringTable {
    /// Creates a new, empty StringTable
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the text for a given key
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Finds the text for a given key, or gives the key back if it's missing,
    /// which keeps untranslated strings visible on screen.
    pub fn text_or_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.text(key).unwrap_or(key)
    }

    /// Finds the text for a given key and then applies `{0}`, `{1}`... substitutions.
    pub fn format(&self, key: &str, substitutions: &[String]) -> Option<String> {
        let text = self.text(key)?;

        Some(crate::apply_substitutions(text, substitutions))
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl From<HashMap<String, String>> for StringTable {
    fn from(value: HashMap<String, String>) -> Self {
        Self(value)
    }
}

impl std::ops::Deref for StringTable {
    type Target = HashMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for StringTable {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
