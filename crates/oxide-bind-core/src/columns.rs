//! Insertion-ordered column bindings.

/// A map from column name to binding that keeps insertion order.
///
/// Order decides placeholder order in rendered SQL. Re-binding a column
/// replaces its value in place and keeps its original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> ColumnMap<V> {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Binds `column`, returning the previous binding if there was one.
    pub fn insert(&mut self, column: impl Into<String>, value: V) -> Option<V> {
        let column = column.into();
        if let Some(slot) = self.entries.iter_mut().find(|(name, _)| *name == column) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.entries.push((column, value));
        None
    }

    /// Removes `column`, returning its binding.
    pub fn remove(&mut self, column: &str) -> Option<V> {
        let index = self.entries.iter().position(|(name, _)| name == column)?;
        Some(self.entries.remove(index).1)
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Column names in binding order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Bindings in binding order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<V> Default for ColumnMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for ColumnMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (column, value) in iter {
            map.insert(column, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_insertion_order() {
        let map: ColumnMap<i32> = [("b", 1), ("a", 2), ("c", 3)].into_iter().collect();
        assert_eq!(map.columns().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_rebinding_overwrites_in_place() {
        let mut map = ColumnMap::new();
        map.insert("name", 1);
        map.insert("email", 2);
        assert_eq!(map.insert("name", 3), Some(1));

        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("name", &3), ("email", &2)]);
    }

    #[test]
    fn test_remove() {
        let mut map: ColumnMap<i32> = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(map.remove("a"), Some(1));
        assert_eq!(map.remove("a"), None);
        assert_eq!(map.get("b"), Some(&2));
        assert!(!map.is_empty());
    }

    #[test]
    fn test_equality_follows_binding_order() {
        fn total_eq<T: Eq>(_: &T) {}

        let ab: ColumnMap<String> = [("a", String::from("1")), ("b", String::from("2"))]
            .into_iter()
            .collect();
        let ba: ColumnMap<String> = [("b", String::from("2")), ("a", String::from("1"))]
            .into_iter()
            .collect();

        total_eq(&ab);
        assert_eq!(ab, ab.clone());
        assert_ne!(ab, ba);
    }
}
