use super::schema::{FieldKind, OptionValue, RangeBounds};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Текущее значение диапазона
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeValue {
    pub min: f64,
    pub max: f64,
}

impl RangeValue {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl From<RangeBounds> for RangeValue {
    fn from(bounds: RangeBounds) -> Self {
        Self::new(bounds.min, bounds.max)
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", format_bound(self.min), format_bound(self.max))
    }
}

/// Значение фильтра, форма зависит от типа поля.
///
/// An unset single-select is represented by the label being absent from the values map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    Multi(BTreeSet<OptionValue>),
    Single(OptionValue),
    Range(RangeValue),
}

impl FilterValue {
    /// An empty multi-select set counts as "no filter".
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterValue::Multi(set) if set.is_empty())
    }

    pub fn matches_kind(&self, kind: &FieldKind) -> bool {
        matches!(
            (self, kind),
            (FilterValue::Multi(_), FieldKind::MultiSelect { .. })
                | (FilterValue::Single(_), FieldKind::SingleSelect { .. })
                | (FilterValue::Range(_), FieldKind::Range { .. })
        )
    }

    pub fn as_multi(&self) -> Option<&BTreeSet<OptionValue>> {
        match self {
            FilterValue::Multi(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_single(&self) -> Option<&OptionValue> {
        match self {
            FilterValue::Single(option) => Some(option),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<RangeValue> {
        match self {
            FilterValue::Range(range) => Some(*range),
            _ => None,
        }
    }

    /// Untagged JSON for the debug dump: `["Студия", 2]`, `"Есть"`, `{"min": 3, "max": 10}`.
    pub fn to_plain_json(&self) -> Value {
        match self {
            FilterValue::Multi(set) => Value::Array(set.iter().map(option_json).collect()),
            FilterValue::Single(option) => option_json(option),
            FilterValue::Range(range) => serde_json::json!({
                "min": number_json(range.min),
                "max": number_json(range.max),
            }),
        }
    }
}

fn option_json(option: &OptionValue) -> Value {
    match option {
        OptionValue::Number(n) => Value::from(*n),
        OptionValue::Text(s) => Value::from(s.as_str()),
    }
}

/// Whole numbers are dumped as integers, the way slider values look to the user.
fn number_json(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

/// Форматирует границу диапазона без лишнего ".0"
pub fn format_bound(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// Which slider of a range control moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEdge {
    Min,
    Max,
}

/// Поведение при перетаскивании одного ползунка за другой.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// The dragged edge is stopped at the other edge, so `min <= max` always holds.
    #[default]
    Clamp,
    /// The dragged edge takes the new value as is; the pair may end up inverted.
    Free,
}

/// Multi-select toggle: adds the option if absent, removes it otherwise.
pub fn toggle_option(
    current: Option<&BTreeSet<OptionValue>>,
    option: &OptionValue,
) -> BTreeSet<OptionValue> {
    let mut selected = current.cloned().unwrap_or_default();
    if !selected.remove(option) {
        selected.insert(option.clone());
    }
    selected
}

/// Single-select pick: always replaces the previous selection.
pub fn pick_option(option: &OptionValue) -> OptionValue {
    option.clone()
}

/// Moves one edge of a range pair. An unset pair starts from the declared bounds; the
/// new value is kept inside the bounds and the other edge is never modified.
pub fn drag_range_edge(
    current: Option<RangeValue>,
    bounds: RangeBounds,
    edge: RangeEdge,
    value: f64,
    policy: RangePolicy,
) -> RangeValue {
    let mut pair = current.unwrap_or_else(|| bounds.into());
    let value = bounds.clamp(value);
    match (edge, policy) {
        (RangeEdge::Min, RangePolicy::Free) => pair.min = value,
        (RangeEdge::Min, RangePolicy::Clamp) => pair.min = value.min(pair.max),
        (RangeEdge::Max, RangePolicy::Free) => pair.max = value,
        (RangeEdge::Max, RangePolicy::Clamp) => pair.max = value.max(pair.min),
    }
    pair
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_bounds() -> RangeBounds {
        RangeBounds::new(1.0, 20.0)
    }

    #[test]
    fn test_toggle_twice_restores_set() {
        let start: BTreeSet<OptionValue> = [OptionValue::from(1), OptionValue::from("4а")]
            .into_iter()
            .collect();
        let option = OptionValue::from("Студия");

        let once = toggle_option(Some(&start), &option);
        assert!(once.contains(&option));
        assert_eq!(once.len(), 3);

        let twice = toggle_option(Some(&once), &option);
        assert_eq!(twice, start);

        let removed = toggle_option(Some(&start), &OptionValue::from(1));
        assert_eq!(removed.len(), 1);
    }

    #[test]
    fn test_toggle_unset_starts_empty() {
        let set = toggle_option(None, &OptionValue::from(2));
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![OptionValue::from(2)]);
    }

    #[test]
    fn test_pick_overwrites() {
        let a = pick_option(&OptionValue::from("Есть"));
        let b = pick_option(&OptionValue::from("Нет"));
        assert_eq!(a, OptionValue::from("Есть"));
        assert_eq!(b, OptionValue::from("Нет"));
    }

    #[test]
    fn test_drag_changes_only_dragged_edge() {
        let before = RangeValue::new(3.0, 15.0);
        for policy in [RangePolicy::Free, RangePolicy::Clamp] {
            let after = drag_range_edge(Some(before), floor_bounds(), RangeEdge::Min, 7.0, policy);
            assert_eq!(after, RangeValue::new(7.0, 15.0));

            let after = drag_range_edge(Some(before), floor_bounds(), RangeEdge::Max, 9.0, policy);
            assert_eq!(after, RangeValue::new(3.0, 9.0));
        }
    }

    #[test]
    fn test_drag_unset_defaults_to_bounds() {
        let after = drag_range_edge(None, floor_bounds(), RangeEdge::Max, 12.0, RangePolicy::Clamp);
        assert_eq!(after, RangeValue::new(1.0, 12.0));
    }

    #[test]
    fn test_drag_past_other_edge() {
        let before = RangeValue::new(3.0, 10.0);

        let free = drag_range_edge(Some(before), floor_bounds(), RangeEdge::Min, 14.0, RangePolicy::Free);
        assert_eq!(free, RangeValue::new(14.0, 10.0));

        let clamped =
            drag_range_edge(Some(before), floor_bounds(), RangeEdge::Min, 14.0, RangePolicy::Clamp);
        assert_eq!(clamped, RangeValue::new(10.0, 10.0));

        let clamped =
            drag_range_edge(Some(before), floor_bounds(), RangeEdge::Max, 2.0, RangePolicy::Clamp);
        assert_eq!(clamped, RangeValue::new(3.0, 3.0));
    }

    #[test]
    fn test_drag_outside_bounds() {
        let after = drag_range_edge(None, floor_bounds(), RangeEdge::Max, 99.0, RangePolicy::Free);
        assert_eq!(after, RangeValue::new(1.0, 20.0));
    }

    #[test]
    fn test_plain_json() {
        let multi = FilterValue::Multi(
            [OptionValue::from("Студия"), OptionValue::from(2)].into_iter().collect(),
        );
        assert_eq!(multi.to_plain_json(), serde_json::json!([2, "Студия"]));

        let range = FilterValue::Range(RangeValue::new(3.0, 10.5));
        assert_eq!(range.to_plain_json(), serde_json::json!({"min": 3, "max": 10.5}));
        assert_eq!(RangeValue::new(3.0, 10.5).to_string(), "3 - 10.5");
    }

    #[test]
    fn test_tagged_serde() {
        let value = FilterValue::Single(OptionValue::from("Есть"));
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "single", "value": "Есть"}));
        let back: FilterValue = serde_json::from_value(json).unwrap();
        assert_eq!(back, value);
    }
}
