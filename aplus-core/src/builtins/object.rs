use std::sync::Arc;

use fxhash::FxHashMap;
use parking_lot::RwLock;

use crate::types::Value;

pub type PropMap = FxHashMap<String, Value>;

/// a shared property bag. clones refer to the same object.
#[derive(Clone, Default)]
pub struct JObject {
    pub(crate) inner: Arc<RwLock<PropMap>>,
}

impl JObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_property(&self, key: &str) -> Option<Value> {
        self.inner.read().get(key).cloned()
    }

    pub fn insert_property<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.inner.write().insert(key.into(), value.into());
    }

    pub fn remove_property(&self, key: &str) -> Option<Value> {
        self.inner.write().remove(key)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.inner.read().contains_key(key)
    }

    /// keys in sorted order
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &JObject) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_properties() {
        let a = JObject::new();
        let b = a.clone();
        a.insert_property("x", 1);
        assert_eq!(b.get_property("x"), Some(Value::from(1)));
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn remove_and_keys() {
        let o = JObject::new();
        o.insert_property("b", 2);
        o.insert_property("a", 1);
        assert_eq!(o.keys(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(o.remove_property("a"), Some(Value::from(1)));
        assert!(!o.has_property("a"));
        assert_eq!(o.len(), 1);
    }
}
