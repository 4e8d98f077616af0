use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Change notification pushed to every display subscriber.
///
/// Serialized as `{"type":"update","filename":"..."}` or `{"type":"clear"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DisplayEvent {
    /// A new image became current
    Update { filename: String },
    /// Nothing is displayed any more
    Clear,
}

impl DisplayEvent {
    /// SSE event name.
    pub fn kind(&self) -> &'static str {
        match self {
            DisplayEvent::Update { .. } => "update",
            DisplayEvent::Clear => "clear",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_wire_shape() {
        let event = DisplayEvent::Update {
            filename: "0a1b.bmp".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "update", "filename": "0a1b.bmp"})
        );
        assert_eq!(event.kind(), "update");
    }

    #[test]
    fn test_clear_wire_shape() {
        assert_eq!(
            serde_json::to_value(DisplayEvent::Clear).unwrap(),
            json!({"type": "clear"})
        );
    }

    #[test]
    fn test_parse_clear() {
        let event: DisplayEvent = serde_json::from_str(r#"{"type":"clear"}"#).unwrap();
        assert_eq!(event, DisplayEvent::Clear);
    }
}
