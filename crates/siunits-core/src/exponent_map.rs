use std::collections::BTreeMap;
use std::ops;

/// Sparse map from keys to real exponents.
///
/// Missing keys read as `0.0` and reading never inserts. Entries whose value
/// reaches zero are removed, so two maps are equal exactly when they hold the
/// same non-zero exponents. Iteration follows `K`'s ordering.
#[derive(Clone, Debug, PartialEq)]
pub struct ExponentMap<K: Ord> {
    entries: BTreeMap<K, f64>,
}

impl<K: Ord> Default for ExponentMap<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> ExponentMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding a single entry (empty when `exponent` is zero).
    pub fn single(key: K, exponent: f64) -> Self {
        let mut map = Self::new();
        map.add(key, exponent);
        map
    }

    pub fn get(&self, key: &K) -> f64 {
        self.entries.get(key).copied().unwrap_or(0.0)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Adds `delta` to the exponent of `key`.
    pub fn add(&mut self, key: K, delta: f64) {
        let value = self.get(&key) + delta;
        self.insert(key, value);
    }

    /// Sets the exponent of `key`; zero removes the entry.
    pub fn insert(&mut self, key: K, value: f64) {
        if value == 0.0 {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, value);
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<f64> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.keys()
    }

    /// Every exponent multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        self.iter().map(|(k, v)| (k.clone(), v * factor)).collect()
    }

    /// Adds every entry of `other`, multiplied by `factor`, into `self`.
    pub fn merge(&mut self, other: &Self, factor: f64) {
        for (k, v) in other.iter() {
            self.add(k.clone(), v * factor);
        }
    }
}

impl<K: Ord + Clone> FromIterator<(K, f64)> for ExponentMap<K> {
    /// Duplicate keys are summed.
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.add(k, v);
        }
        map
    }
}

impl<K: Ord + Clone> ops::Add for &ExponentMap<K> {
    type Output = ExponentMap<K>;
    fn add(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out.merge(rhs, 1.0);
        out
    }
}

impl<K: Ord + Clone> ops::Sub for &ExponentMap<K> {
    type Output = ExponentMap<K>;
    fn sub(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out.merge(rhs, -1.0);
        out
    }
}

impl<K: Ord + Clone> ops::Neg for &ExponentMap<K> {
    type Output = ExponentMap<K>;
    fn neg(self) -> Self::Output {
        self.scaled(-1.0)
    }
}
