//! Named coefficient sets.

use std::collections::BTreeMap;

/// A mapping from coefficient name to value.
///
/// Iteration is in name order, which fixes the coordinate order used by the
/// optimizer. Values are plain data; a calibration run produces a new set and
/// never mutates its input.
///
/// ```
/// use drought_calibrate::CalibrationParams;
///
/// let p = CalibrationParams::new().with("a", 0.5).with("b", -1.0);
/// assert_eq!(p.get("a"), Some(0.5));
/// assert_eq!(p.names().collect::<Vec<_>>(), ["a", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalibrationParams {
    values: BTreeMap<String, f64>,
}

impl CalibrationParams {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set with `name` set to `value`.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Sets `name` to `value`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    /// Returns the value of `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Coefficient names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Whether both sets have exactly the same names.
    pub fn same_names(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self.values.keys().eq(other.values.keys())
    }

    /// Values as an optimizer coordinate vector.
    pub(crate) fn to_vec(&self) -> Vec<f64> {
        self.values.values().copied().collect()
    }

    /// The same names with values taken from `coords`, in name order.
    pub(crate) fn with_coords(&self, coords: &[f64]) -> Self {
        Self {
            values: self
                .values
                .keys()
                .cloned()
                .zip(coords.iter().copied())
                .collect(),
        }
    }
}

impl From<BTreeMap<String, f64>> for CalibrationParams {
    fn from(values: BTreeMap<String, f64>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for CalibrationParams {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_by_name() {
        let p: CalibrationParams = [("c", 3.0), ("a", 1.0), ("b", 2.0)].into_iter().collect();
        assert_eq!(p.to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(p.names().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn coords_round_trip() {
        let p = CalibrationParams::new().with("x", 0.0).with("y", 0.0);
        let q = p.with_coords(&[4.0, 5.0]);
        assert_eq!(q.get("x"), Some(4.0));
        assert_eq!(q.get("y"), Some(5.0));
        assert_eq!(q.to_vec(), vec![4.0, 5.0]);
    }

    #[test]
    fn same_names() {
        let a = CalibrationParams::new().with("a", 1.0).with("b", 2.0);
        let b = CalibrationParams::new().with("b", 0.0).with("a", 9.0);
        let c = CalibrationParams::new().with("a", 1.0);
        let d = CalibrationParams::new().with("a", 1.0).with("z", 2.0);
        assert!(a.same_names(&b));
        assert!(!a.same_names(&c));
        assert!(!a.same_names(&d));
    }

    #[test]
    fn insert_returns_previous() {
        let mut p = CalibrationParams::new();
        assert_eq!(p.insert("a", 1.0), None);
        assert_eq!(p.insert("a", 2.0), Some(1.0));
        assert_eq!(p.len(), 1);
        assert!(!p.is_empty());
    }

    #[test]
    fn params_is_send_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalibrationParams>();
    }
}
