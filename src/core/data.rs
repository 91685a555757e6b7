use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::core::path::FieldPath;
use crate::core::value::Value;

/// The single mutable key/value store of an in-progress wizard session.
/// Created at mount from caller-supplied initial data, handed wholesale to
/// the submit/draft callbacks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormData {
    root: IndexMap<String, Value>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = self.root.get(first)?;
        for segment in rest {
            let Value::Object(map) = current else {
                return None;
            };
            current = map.get(segment)?;
        }
        Some(current)
    }

    pub fn get_str(&self, path: &FieldPath) -> Option<&str> {
        self.get(path).and_then(Value::as_text)
    }

    /// Snapshot write: returns a new `FormData` with the path set, leaving
    /// `self` untouched so reference-based change detection in the consuming
    /// layer keeps working.
    #[must_use]
    pub fn set(&self, path: &FieldPath, value: Value) -> Self {
        let mut next = self.clone();
        next.set_in_place(path, value);
        next
    }

    /// In-place write. Intermediate objects are created on demand; a
    /// non-object intermediate is replaced by an object.
    pub fn set_in_place(&mut self, path: &FieldPath, value: Value) {
        let segments = path.segments();
        let Some((leaf, parents)) = segments.split_last() else {
            return;
        };

        let Some((first, mid)) = parents.split_first() else {
            self.root.insert(leaf.clone(), value);
            return;
        };

        let mut current = self
            .root
            .entry(first.clone())
            .or_insert_with(Value::empty_object);
        for segment in mid {
            if !matches!(current, Value::Object(_)) {
                *current = Value::empty_object();
            }
            let Value::Object(map) = current else {
                return;
            };
            current = map
                .entry(segment.clone())
                .or_insert_with(Value::empty_object);
        }

        if !matches!(current, Value::Object(_)) {
            *current = Value::empty_object();
        }
        if let Value::Object(map) = current {
            map.insert(leaf.clone(), value);
        }
    }

    pub fn from_json(json: JsonValue) -> Self {
        match Value::from_json(json) {
            Value::Object(root) => Self { root },
            _ => Self::default(),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        Value::Object(self.root.clone()).to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::FormData;
    use crate::core::path::FieldPath;
    use crate::core::value::Value;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).expect("path should parse")
    }

    #[test]
    fn set_then_get_round_trips() {
        let data = FormData::new();
        let next = data.set(&path("a.b"), Value::Number(5.0));
        assert_eq!(next.get(&path("a.b")), Some(&Value::Number(5.0)));
    }

    #[test]
    fn set_does_not_mutate_the_original_snapshot() {
        let data = FormData::new().set(&path("a.b"), Value::from("old"));
        let next = data.set(&path("a.b"), Value::from("new"));

        assert_eq!(data.get_str(&path("a.b")), Some("old"));
        assert_eq!(next.get_str(&path("a.b")), Some("new"));
    }

    #[test]
    fn get_on_missing_path_returns_none() {
        let data = FormData::new().set(&path("a.b"), Value::from("x"));
        assert_eq!(data.get(&path("a.c")), None);
        assert_eq!(data.get(&path("z")), None);
        assert_eq!(data.get(&path("a.b.c")), None);
    }

    #[test]
    fn sibling_branches_survive_nested_writes() {
        let data = FormData::new()
            .set(&path("personal.fullName"), Value::from("Ada"))
            .set(&path("personal.email"), Value::from("ada@example.com"))
            .set(&path("funds.amount"), Value::Number(10_000.0));

        assert_eq!(data.get_str(&path("personal.fullName")), Some("Ada"));
        assert_eq!(
            data.get_str(&path("personal.email")),
            Some("ada@example.com")
        );
        assert_eq!(data.get(&path("funds.amount")), Some(&Value::Number(10_000.0)));
    }

    #[test]
    fn non_object_intermediate_is_replaced() {
        let data = FormData::new()
            .set(&path("a"), Value::from("leaf"))
            .set(&path("a.b"), Value::from("nested"));
        assert_eq!(data.get_str(&path("a.b")), Some("nested"));
    }

    #[test]
    fn json_round_trip() {
        let json = serde_json::json!({"personal": {"fullName": "Ada"}, "accepted": true});
        let data = FormData::from_json(json.clone());
        assert_eq!(data.get_str(&path("personal.fullName")), Some("Ada"));
        assert_eq!(data.to_json(), json);
    }
}
