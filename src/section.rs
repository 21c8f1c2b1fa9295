use indexmap::IndexMap;

/// A named group of key/value entries. Keys keep the order they were first added in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: IndexMap<String, String>,
}

impl Section {
    #[must_use]
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            entries: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw text stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Stores `value` under `key`, overwriting in place if the key already exists.
    pub(crate) fn insert(&mut self, key: String, value: String) {
        _ = self.entries.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_keeps_position() {
        let mut section = Section::new("Books".to_owned());
        section.insert("title".to_owned(), "Dune".to_owned());
        section.insert("year".to_owned(), "1965".to_owned());
        section.insert("title".to_owned(), "Emma".to_owned());

        assert_eq!(section.len(), 2);
        assert_eq!(
            section.entries().collect::<Vec<_>>(),
            vec![("title", "Emma"), ("year", "1965")]
        );
    }
}
