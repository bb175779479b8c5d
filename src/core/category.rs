use indexmap::IndexSet;

/// Stable label → index lookup for a category axis.
///
/// Built once per update pass from the axis labels; the first occurrence of a
/// duplicated label owns the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryLookup {
    labels: IndexSet<String>,
}

impl CategoryLookup {
    #[must_use]
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.get_index_of(label)
    }

    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get_index(index).map(String::as_str)
    }

    /// Label for a fractional axis value, when it rounds onto a category.
    #[must_use]
    pub fn label_at(&self, value: f64) -> Option<&str> {
        if !value.is_finite() || value < -0.5 {
            return None;
        }
        self.label(value.round() as usize)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

/// Value attached to a named category rather than a numeric X.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CategoryValue {
    pub category: String,
    pub value: f64,
}

impl CategoryValue {
    #[must_use]
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CategoryLookup;

    #[test]
    fn duplicate_labels_keep_first_index() {
        let lookup = CategoryLookup::new(["a", "b", "a", "c"]);
        assert_eq!(lookup.len(), 3);
        assert_eq!(lookup.index_of("c"), Some(2));
        assert_eq!(lookup.label_at(1.2), Some("b"));
        assert_eq!(lookup.label_at(7.0), None);
    }
}
