//! Values and registries for tests.

use std::sync::Arc;

use cjs_builtins::BuiltinRegistry;

use super::JsValue;

/// Wrap a JSON value as a [`JsValue`].
pub fn js(value: serde_json::Value) -> JsValue {
    Arc::new(value)
}

/// A registry holding exactly `entries`, in order.
pub fn registry<'n>(entries: impl IntoIterator<Item = (&'n str, JsValue)>) -> BuiltinRegistry<JsValue> {
    BuiltinRegistry::from_entries(entries)
}
