//! Extraction options.

/// How header cells are recognized as wood types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WoodTypeMatch {
    /// Any cell containing one or more characters followed by `wood`.
    ///
    /// This accepts labels outside the known wood types (`driftwood`,
    /// `redwood S/F`), which existing workbooks rely on.
    #[default]
    Loose,
    /// The trimmed cell must equal one of `ExtractOptions::wood_types`,
    /// ignoring case.
    Enumerated,
}

/// Options controlling record extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// How section headers are matched
    pub wood_type_match: WoodTypeMatch,

    /// Known wood types, used by [`WoodTypeMatch::Enumerated`]
    pub wood_types: Vec<String>,

    /// Id prefix per wood type; types without an entry contribute nothing
    pub id_prefixes: Vec<(String, String)>,

    /// Fail on headers without a `PACK` column and on workbooks without any
    /// header, instead of skipping them silently
    pub strict_sections: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            wood_type_match: WoodTypeMatch::Loose,
            wood_types: vec!["redwood".to_string(), "whitewood".to_string()],
            id_prefixes: vec![
                ("redwood".to_string(), "R1".to_string()),
                ("whitewood".to_string(), "W1".to_string()),
            ],
            strict_sections: false,
        }
    }
}

impl ExtractOptions {
    /// Create default extraction options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how section headers are matched.
    pub fn with_wood_type_match(mut self, mode: WoodTypeMatch) -> Self {
        self.wood_type_match = mode;
        self
    }

    /// Replace the known wood types.
    pub fn with_wood_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wood_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set (or replace) the id prefix for a wood type.
    pub fn with_id_prefix(mut self, wood_type: impl Into<String>, prefix: impl Into<String>) -> Self {
        let wood_type = wood_type.into();
        let prefix = prefix.into();
        match self
            .id_prefixes
            .iter_mut()
            .find(|(t, _)| t.eq_ignore_ascii_case(&wood_type))
        {
            Some(entry) => entry.1 = prefix,
            None => self.id_prefixes.push((wood_type, prefix)),
        }
        self
    }

    /// Enable or disable strict section checking.
    pub fn with_strict_sections(mut self, strict: bool) -> Self {
        self.strict_sections = strict;
        self
    }

    /// Id prefix for a wood type label, `""` when the type has none.
    pub fn id_prefix(&self, wood_type: &str) -> &str {
        let key = wood_type.trim();
        self.id_prefixes
            .iter()
            .find(|(t, _)| t.eq_ignore_ascii_case(key))
            .map(|(_, p)| p.as_str())
            .unwrap_or("")
    }

    /// Whether a label is one of the known wood types.
    pub fn is_known_wood_type(&self, label: &str) -> bool {
        let key = label.trim();
        self.wood_types.iter().any(|t| t.eq_ignore_ascii_case(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefixes() {
        let options = ExtractOptions::default();
        assert_eq!(options.id_prefix("redwood"), "R1");
        assert_eq!(options.id_prefix(" Whitewood "), "W1");
        assert_eq!(options.id_prefix("driftwood"), "");
        assert_eq!(options.wood_type_match, WoodTypeMatch::Loose);
        assert!(!options.strict_sections);
    }

    #[test]
    fn test_with_id_prefix_replaces_existing() {
        let options = ExtractOptions::new()
            .with_id_prefix("REDWOOD", "RW")
            .with_id_prefix("larchwood", "L1");
        assert_eq!(options.id_prefix("redwood"), "RW");
        assert_eq!(options.id_prefix("larchwood"), "L1");
        assert_eq!(options.id_prefixes.len(), 3);
    }

    #[test]
    fn test_known_wood_types() {
        let options = ExtractOptions::new().with_wood_types(["oakwood"]);
        assert!(options.is_known_wood_type("Oakwood"));
        assert!(!options.is_known_wood_type("redwood"));
    }
}
