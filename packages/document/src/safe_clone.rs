//! Cycle-safe cloning and JSON rendering for shared object graphs.
//!
//! Component trees are strictly owned and cannot form cycles, but the data
//! a host hands to the editor (clipboard payloads, plugin state) can alias
//! and even contain itself. [`SharedValue`] models such a graph with
//! reference-counted cells. Its deep clone preserves aliasing and
//! self-references. Its JSON rendering replaces a back-edge with
//! [`CIRCULAR_SENTINEL`] instead of recursing forever.
//!
//! Reference cycles are never freed by `Rc`; callers that build one should
//! break it (e.g. by clearing the map) when done.

use serde_json::{Map, Number, Value};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

/// Placeholder written where a value refers back to one of its ancestors.
pub const CIRCULAR_SENTINEL: &str = "[Circular]";

type ListCell = Rc<RefCell<Vec<SharedValue>>>;
type MapCell = Rc<RefCell<BTreeMap<String, SharedValue>>>;

/// A JSON-like value whose lists and maps are shared, mutable handles.
///
/// `Clone` copies the handle, not the contents; use
/// [`SharedValue::deep_clone`] for an independent copy.
#[derive(Clone)]
pub enum SharedValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(ListCell),
    Map(MapCell),
}

impl SharedValue {
    pub fn list() -> Self {
        SharedValue::List(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn map() -> Self {
        SharedValue::Map(Rc::new(RefCell::new(BTreeMap::new())))
    }

    /// Identity comparison for lists and maps, value comparison for scalars.
    pub fn ptr_eq(&self, other: &SharedValue) -> bool {
        match (self, other) {
            (SharedValue::List(a), SharedValue::List(b)) => Rc::ptr_eq(a, b),
            (SharedValue::Map(a), SharedValue::Map(b)) => Rc::ptr_eq(a, b),
            (SharedValue::Null, SharedValue::Null) => true,
            (SharedValue::Bool(a), SharedValue::Bool(b)) => a == b,
            (SharedValue::Number(a), SharedValue::Number(b)) => a == b,
            (SharedValue::String(a), SharedValue::String(b)) => a == b,
            _ => false,
        }
    }

    /// Handle to a map entry.
    pub fn get(&self, key: &str) -> Option<SharedValue> {
        match self {
            SharedValue::Map(map) => map.borrow().get(key).cloned(),
            _ => None,
        }
    }

    /// Handle to a list element.
    pub fn at(&self, index: usize) -> Option<SharedValue> {
        match self {
            SharedValue::List(items) => items.borrow().get(index).cloned(),
            _ => None,
        }
    }

    /// Set a map entry. Returns `false` if this is not a map.
    pub fn insert(&self, key: impl Into<String>, value: SharedValue) -> bool {
        match self {
            SharedValue::Map(map) => {
                map.borrow_mut().insert(key.into(), value);
                true
            }
            _ => false,
        }
    }

    /// Append to a list. Returns `false` if this is not a list.
    pub fn push(&self, value: SharedValue) -> bool {
        match self {
            SharedValue::List(items) => {
                items.borrow_mut().push(value);
                true
            }
            _ => false,
        }
    }

    /// Independent copy of the whole graph reachable from `self`.
    ///
    /// Every list and map is copied exactly once, so aliasing inside the
    /// original (including self-references) is mirrored by the copy and
    /// points into the copy, never back into the original.
    pub fn deep_clone(&self) -> SharedValue {
        let mut copies = HashMap::new();
        self.deep_clone_with(&mut copies)
    }

    fn deep_clone_with(&self, copies: &mut HashMap<usize, SharedValue>) -> SharedValue {
        match self {
            SharedValue::List(items) => {
                let key = Rc::as_ptr(items) as usize;
                if let Some(copy) = copies.get(&key) {
                    return copy.clone();
                }
                let cell: ListCell = Rc::new(RefCell::new(Vec::new()));
                copies.insert(key, SharedValue::List(cell.clone()));
                let cloned: Vec<SharedValue> =
                    items.borrow().iter().map(|v| v.deep_clone_with(copies)).collect();
                *cell.borrow_mut() = cloned;
                SharedValue::List(cell)
            }
            SharedValue::Map(map) => {
                let key = Rc::as_ptr(map) as usize;
                if let Some(copy) = copies.get(&key) {
                    return copy.clone();
                }
                let cell: MapCell = Rc::new(RefCell::new(BTreeMap::new()));
                copies.insert(key, SharedValue::Map(cell.clone()));
                let cloned: BTreeMap<String, SharedValue> = map
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.deep_clone_with(copies)))
                    .collect();
                *cell.borrow_mut() = cloned;
                SharedValue::Map(cell)
            }
            scalar => scalar.clone(),
        }
    }

    /// Plain JSON rendering. A value that is one of its own ancestors is
    /// written as [`CIRCULAR_SENTINEL`]; a value merely shared between
    /// siblings is written in full each time.
    pub fn to_json(&self) -> Value {
        let mut ancestors = Vec::new();
        self.render(&mut ancestors)
    }

    fn render(&self, ancestors: &mut Vec<usize>) -> Value {
        match self {
            SharedValue::Null => Value::Null,
            SharedValue::Bool(b) => Value::Bool(*b),
            SharedValue::Number(n) => Number::from_f64(*n).map(Value::Number).unwrap_or(Value::Null),
            SharedValue::String(s) => Value::String(s.clone()),
            SharedValue::List(items) => {
                let key = Rc::as_ptr(items) as usize;
                if ancestors.contains(&key) {
                    return Value::String(CIRCULAR_SENTINEL.to_string());
                }
                ancestors.push(key);
                let rendered = items.borrow().iter().map(|v| v.render(ancestors)).collect();
                ancestors.pop();
                Value::Array(rendered)
            }
            SharedValue::Map(map) => {
                let key = Rc::as_ptr(map) as usize;
                if ancestors.contains(&key) {
                    return Value::String(CIRCULAR_SENTINEL.to_string());
                }
                ancestors.push(key);
                let rendered: Map<String, Value> = map
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.render(ancestors)))
                    .collect();
                ancestors.pop();
                Value::Object(rendered)
            }
        }
    }

    pub fn from_json(value: &Value) -> SharedValue {
        match value {
            Value::Null => SharedValue::Null,
            Value::Bool(b) => SharedValue::Bool(*b),
            Value::Number(n) => n.as_f64().map(SharedValue::Number).unwrap_or(SharedValue::Null),
            Value::String(s) => SharedValue::String(s.clone()),
            Value::Array(items) => SharedValue::List(Rc::new(RefCell::new(
                items.iter().map(SharedValue::from_json).collect(),
            ))),
            Value::Object(map) => SharedValue::Map(Rc::new(RefCell::new(
                map.iter()
                    .map(|(k, v)| (k.clone(), SharedValue::from_json(v)))
                    .collect(),
            ))),
        }
    }
}

// Derived Debug would recurse through self-references.
impl fmt::Debug for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharedValue::Null => f.write_str("Null"),
            SharedValue::Bool(b) => write!(f, "Bool({})", b),
            SharedValue::Number(n) => write!(f, "Number({})", n),
            SharedValue::String(s) => write!(f, "String({:?})", s),
            SharedValue::List(items) => write!(f, "List({:p}, len {})", Rc::as_ptr(items), items.borrow().len()),
            SharedValue::Map(map) => write!(f, "Map({:p}, keys {:?})", Rc::as_ptr(map), map.borrow().keys().collect::<Vec<_>>()),
        }
    }
}

impl From<&str> for SharedValue {
    fn from(s: &str) -> Self {
        SharedValue::String(s.to_string())
    }
}

impl From<f64> for SharedValue {
    fn from(n: f64) -> Self {
        SharedValue::Number(n)
    }
}

impl From<bool> for SharedValue {
    fn from(b: bool) -> Self {
        SharedValue::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_roundtrip_through_json() {
        let value = json!({ "a": [1.5, true, null, "x"], "b": { "c": "d" } });
        assert_eq!(SharedValue::from_json(&value).to_json(), value);
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let original = SharedValue::from_json(&json!({ "items": ["a"] }));
        let copy = original.deep_clone();

        copy.get("items").unwrap().push("b".into());

        assert_eq!(original.to_json(), json!({ "items": ["a"] }));
        assert_eq!(copy.to_json(), json!({ "items": ["a", "b"] }));
        assert!(!copy.ptr_eq(&original));
    }

    #[test]
    fn test_shared_siblings_stay_shared_and_render_in_full() {
        let shared = SharedValue::from_json(&json!({ "v": 1.0 }));
        let root = SharedValue::map();
        root.insert("left", shared.clone());
        root.insert("right", shared.clone());

        let copy = root.deep_clone();
        assert!(copy.get("left").unwrap().ptr_eq(&copy.get("right").unwrap()));
        assert!(!copy.get("left").unwrap().ptr_eq(&shared));

        assert_eq!(
            root.to_json(),
            json!({ "left": { "v": 1.0 }, "right": { "v": 1.0 } })
        );
    }

    #[test]
    fn test_self_referencing_list() {
        let list = SharedValue::list();
        list.push("head".into());
        list.push(list.clone());

        let copy = list.deep_clone();
        assert!(copy.at(1).unwrap().ptr_eq(&copy));
        assert_eq!(copy.to_json(), json!(["head", CIRCULAR_SENTINEL]));

        let _ = format!("{:?}", copy);
    }
}
