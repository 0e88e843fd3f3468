use alloc::string::String;
use serde::{Deserialize, Serialize};

/// A read-only grouping of questions, seeded outside of the service.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    /// Human-readable label (e.g. `Science`).
    #[serde(rename = "type")]
    pub kind: String,
}
