use ahash::AHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// String-keyed counters that remember insertion order.
///
/// Used for section hits and host byte totals. Merging is additive.
#[derive(Debug, Clone, Default)]
pub struct HeatMap {
    index: AHashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl HeatMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `key`, inserting it at the end if unseen.
    pub fn add(&mut self, key: &str, amount: u64) {
        match self.index.get(key) {
            Some(&i) => {
                let count = &mut self.entries[i].1;
                *count = count.saturating_add(amount);
            }
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), amount));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.index.get(key).map(|&i| self.entries[i].1)
    }

    /// Additive merge; keys new to `self` are appended in `other`'s order.
    pub fn merge(&mut self, other: &HeatMap) {
        for (key, count) in &other.entries {
            self.add(key, *count);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).sum()
    }

    /// The `n` largest entries, descending; ties keep insertion order.
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

impl PartialEq for HeatMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for HeatMap {}

impl<'a> FromIterator<(&'a str, u64)> for HeatMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let mut map = HeatMap::new();
        for (key, count) in iter {
            map.add(key, count);
        }
        map
    }
}

impl Serialize for HeatMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}
