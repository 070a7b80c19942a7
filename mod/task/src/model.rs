use serde::{Deserialize, Serialize};

/// A single task record.
///
/// Wire shape: `{"id": string|null, "title": string, "description": string,
/// "completed": boolean}`. The id is assigned by the storage layer on first
/// save and is `null` for not-yet-persisted drafts. All other fields
/// deserialize with defaults so a sparse request body never fails binding;
/// the title requirement is enforced by the service, not the deserializer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Forced to false on creation; settable via update.
    #[serde(default)]
    pub completed: bool,
}
