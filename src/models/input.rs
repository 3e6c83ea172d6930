use serde::{Deserialize, Serialize};

/// A single timestamped player action.
///
/// Field names (`t`, `type`, `data`) are the wire format shared with the
/// game clients; the checksum is computed over exactly this serialization,
/// with `data` omitted entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Milliseconds since session start; non-decreasing within a record.
    pub t: u64,
    #[serde(rename = "type")]
    pub kind: InputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl InputEvent {
    pub fn new(t: u64, kind: InputKind, data: Option<serde_json::Value>) -> Self {
        Self { t, kind, data }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Direction,
    Action,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Direction => write!(f, "direction"),
            InputKind::Action => write!(f, "action"),
        }
    }
}
