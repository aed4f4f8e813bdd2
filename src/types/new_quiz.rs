use serde::Deserialize;
use serde_json::{Map, Value};

/// A create/update request body before validation. Fields stay as raw JSON
/// so that the validator, not serde, decides which rule a sloppy payload
/// breaks, in rule order.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct NewQuiz {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub questions: Option<Value>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct NewQuestion {
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
    #[serde(default)]
    pub options: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct NewOption {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub points: Option<Value>,
    #[serde(default)]
    pub is_correct: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewQuiz {
    /// Decodes a raw request body. Anything that is not JSON at all, and
    /// JSON `null`, count as an empty object.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Null) | Err(_) => Ok(NewQuiz::default()),
            Ok(value) => serde_json::from_value(value),
        }
    }
}
