//! Twelve-slot monthly plan/actual calendar.

use crate::shared::coerce::{ensure_array, truthy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub const MONTHS: usize = 12;

pub const Q1: [usize; 3] = [0, 1, 2];
pub const Q2: [usize; 3] = [3, 4, 5];
pub const Q3: [usize; 3] = [6, 7, 8];
pub const Q4: [usize; 3] = [9, 10, 11];
pub const QUARTERS: [[usize; 3]; 4] = [Q1, Q2, Q3, Q4];
pub const ALL_MONTHS: [usize; MONTHS] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Short month labels used by the plan grid
pub const MONTH_LABELS: [&str; MONTHS] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Monthly flags, index 0 = January.
///
/// Always exactly twelve entries. Every mutator returns a new vector so a
/// signal holding it observes the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MonthVector([bool; MONTHS]);

impl MonthVector {
    pub const fn empty() -> Self {
        Self([false; MONTHS])
    }

    pub const fn from_array(flags: [bool; MONTHS]) -> Self {
        Self(flags)
    }

    pub fn as_array(&self) -> &[bool; MONTHS] {
        &self.0
    }

    pub fn is_set(&self, month_index: usize) -> bool {
        self.0.get(month_index).copied().unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|f| **f).count()
    }

    pub fn all_false(&self) -> bool {
        self.count() == 0
    }

    pub fn to_value(&self) -> Value {
        Value::Array(self.0.iter().map(|f| Value::Bool(*f)).collect())
    }

    /// Flip a single month. Indices past December leave the vector as is.
    pub fn toggle(self, month_index: usize) -> Self {
        let mut next = self;
        if let Some(slot) = next.0.get_mut(month_index) {
            *slot = !*slot;
        }
        next
    }

    /// Set every listed month to `value`.
    pub fn set_range(self, month_indices: &[usize], value: bool) -> Self {
        let mut next = self;
        for &i in month_indices {
            if let Some(slot) = next.0.get_mut(i) {
                *slot = value;
            }
        }
        next
    }

    /// Block toggle: a fully set block is cleared, anything else is filled.
    pub fn set_quarter_toggle(self, month_indices: &[usize]) -> Self {
        let all_set = month_indices
            .iter()
            .filter(|&&i| i < MONTHS)
            .all(|&i| self.0[i]);
        self.set_range(month_indices, !all_set)
    }

    pub fn quarter_is_full(&self, month_indices: &[usize]) -> bool {
        month_indices.iter().all(|&i| self.is_set(i))
    }
}

/// Normalize any stored flag value into a twelve-month vector.
///
/// Accepts arrays, JSON-encoded strings, `null` or anything else; missing
/// positions become `false` and extra ones are dropped.
pub fn ensure12(input: &Value) -> MonthVector {
    let mut flags = [false; MONTHS];
    for (slot, raw) in flags.iter_mut().zip(ensure_array(input).iter()) {
        *slot = truthy(raw);
    }
    MonthVector(flags)
}

impl From<[bool; MONTHS]> for MonthVector {
    fn from(flags: [bool; MONTHS]) -> Self {
        Self(flags)
    }
}

impl Serialize for MonthVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MonthVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(ensure12(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const T: bool = true;
    const F: bool = false;

    #[test]
    fn test_ensure12_length_for_any_input() {
        let inputs = [
            json!([]),
            json!([1]),
            json!([1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1]),
            json!(null),
            json!(17),
            json!({"jan": true}),
            json!("[1,0,1]"),
            json!("garbage"),
        ];
        for input in inputs.iter() {
            assert_eq!(ensure12(input).as_array().len(), MONTHS);
        }
    }

    #[test]
    fn test_ensure12_copies_and_truncates() {
        let v = ensure12(&json!([1, 0, "1", true, null, "0"]));
        assert_eq!(
            v.as_array(),
            &[T, F, T, T, F, F, F, F, F, F, F, F]
        );

        let long = ensure12(&json!([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1]));
        assert_eq!(long.count(), 1);
        assert!(long.is_set(11));
    }

    #[test]
    fn test_ensure12_non_finite_strings_are_unset() {
        let v = ensure12(&json!(["NaN", "inf", "nan", "y", "on"]));
        assert_eq!(v.as_array(), &[F, F, F, F, T, F, F, F, F, F, F, F]);
    }

    #[test]
    fn test_ensure12_json_string() {
        let v = ensure12(&json!("[1,0,1]"));
        assert_eq!(v.as_array(), &[T, F, T, F, F, F, F, F, F, F, F, F]);
    }

    #[test]
    fn test_ensure12_idempotent() {
        for input in [json!("[1,0,1]"), json!([true, 1, 0]), json!(null)] {
            let once = ensure12(&input);
            let twice = ensure12(&once.to_value());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_toggle_flips_only_target() {
        let base = MonthVector::from_array([T, F, T, F, T, F, T, F, T, F, T, F]);
        for i in 0..MONTHS {
            let toggled = base.toggle(i);
            for j in 0..MONTHS {
                if i == j {
                    assert_ne!(toggled.is_set(j), base.is_set(j));
                } else {
                    assert_eq!(toggled.is_set(j), base.is_set(j));
                }
            }
        }
        assert_eq!(base.toggle(12), base);
    }

    #[test]
    fn test_set_range() {
        let v = MonthVector::empty().set_range(&ALL_MONTHS, true);
        assert_eq!(v.count(), 12);
        let v = v.set_range(&Q2, false);
        assert_eq!(v.count(), 9);
        assert!(!v.is_set(4));
        assert_eq!(v.set_range(&[40], true), v);
    }

    #[test]
    fn test_quarter_toggle_full_quarter_clears() {
        let v = MonthVector::from_array([T, T, T, F, F, F, F, F, F, F, F, F]);
        assert_eq!(v.set_quarter_toggle(&Q1), MonthVector::empty());
    }

    #[test]
    fn test_quarter_toggle_partial_quarter_fills() {
        let v = MonthVector::from_array([F, T, F, F, F, F, F, F, F, F, T, F]);
        let result = v.set_quarter_toggle(&Q1);
        assert_eq!(
            result.as_array(),
            &[T, T, T, F, F, F, F, F, F, F, T, F]
        );
    }

    #[test]
    fn test_serde_boundary() {
        let v = MonthVector::empty().toggle(0);
        let encoded = serde_json::to_value(v).unwrap();
        assert_eq!(encoded.as_array().map(|a| a.len()), Some(12));

        let decoded: MonthVector = serde_json::from_value(json!("[0,1]")).unwrap();
        assert!(decoded.is_set(1));
        assert_eq!(decoded.count(), 1);
    }
}
