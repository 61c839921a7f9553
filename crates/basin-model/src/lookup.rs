use std::collections::HashMap;

/// Case-insensitive membership over a set of names, remembering the original
/// spelling of the first occurrence.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveSet {
    map: HashMap<String, String>,
}

impl CaseInsensitiveSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            let key = name.to_ascii_lowercase();
            map.entry(key).or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    /// Original spelling of `name`, if present under any casing.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.to_ascii_lowercase())
            .map(|value| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_any_casing() {
        let set = CaseInsensitiveSet::new(["Basin", "network"]);
        assert!(set.contains("basin"));
        assert!(set.contains("BASIN"));
        assert!(set.contains("Network"));
        assert!(!set.contains("topology"));
        assert_eq!(set.get("bAsIn"), Some("Basin"));
    }
}
