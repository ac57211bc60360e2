/// Read-only view of a parsed document tree.
///
/// The loader only needs key lookup, presence checks and scalar/array coercion, so any tree
/// (JSON, YAML, an in-memory builder) can feed the compiler by implementing this trait.
pub trait DocumentNode: Sized {
    /// Child under `key`, if this node is an object that has it.
    fn get(&self, key: &str) -> Option<&Self>;

    /// Elements, if this node is an array.
    fn as_array(&self) -> Option<&[Self]>;

    /// Numeric value, if this node is a number.
    fn as_number(&self) -> Option<f64>;

    /// String value, if this node is a string.
    fn as_string(&self) -> Option<&str>;

    /// `true` for an explicit null.
    fn is_null(&self) -> bool {
        false
    }

    /// `true` if `key` is present on this object.
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl DocumentNode for serde_json::Value {
    fn get(&self, key: &str) -> Option<&Self> {
        self.as_object()?.get(key)
    }

    fn as_array(&self) -> Option<&[Self]> {
        serde_json::Value::as_array(self).map(Vec::as_slice)
    }

    fn as_number(&self) -> Option<f64> {
        self.as_f64()
    }

    fn as_string(&self) -> Option<&str> {
        self.as_str()
    }

    fn is_null(&self) -> bool {
        serde_json::Value::is_null(self)
    }
}
