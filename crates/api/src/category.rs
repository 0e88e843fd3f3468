use crate::error::{Error, Result};
use db::{Category, Store};
use serde_json::{json, Map, Value};

/// Renders categories as an `{id: type}` object, preserving their order.
pub fn to_map(categories: Vec<Category>) -> Map<String, Value> {
    categories.into_iter().map(|Category { id, kind }| (id.to_string(), Value::String(kind))).collect()
}

pub async fn list<S: Store>(store: &S) -> Result<Value> {
    let categories = store.categories().await?;
    if categories.is_empty() {
        return Err(Error::NotFound);
    }
    Ok(json!({ "success": true, "categories": to_map(categories) }))
}
