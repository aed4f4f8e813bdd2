use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Storage key of a quiz. Never part of the persisted record itself.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuizId(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidQuizId(pub String);

impl fmt::Display for InvalidQuizId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} is not a plain file name", self.0)
    }
}

impl std::error::Error for InvalidQuizId {}

impl FromStr for QuizId {
    type Err = InvalidQuizId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let plain = !s.is_empty()
            && s != "."
            && s != ".."
            && !s.contains(|c: char| c == '/' || c == '\\' || c == '\0');
        if plain {
            Ok(QuizId(s.to_string()))
        } else {
            Err(InvalidQuizId(s.to_string()))
        }
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The persisted part of a quiz: `{ title, questions }`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Quiz {
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Single,
    Multi,
}

/// The `type` of a stored question. Hand-edited files may carry anything
/// there; such values are served back untouched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum QuestionType {
    Known(QuestionKind),
    Unknown(Value),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Question {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<QuestionType>,
    #[serde(default)]
    pub options: Vec<QuizOption>,
    /// Authoring fields such as `prompt`, kept as they came in.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuizOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OptionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Number>,
    #[serde(default, deserialize_with = "truthy")]
    pub is_correct: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Question {
    pub fn kind(&self) -> Option<QuestionKind> {
        match self.kind {
            Some(QuestionType::Known(kind)) => Some(kind),
            _ => None,
        }
    }
}

impl QuizOption {
    pub fn points(&self) -> f64 {
        self.points.as_ref().and_then(Number::as_f64).unwrap_or(0.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum OptionId {
    Text(String),
    Number(Number),
    Other(Value),
}

impl From<Value> for OptionId {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => OptionId::Text(text),
            Value::Number(number) => OptionId::Number(number),
            other => OptionId::Other(other),
        }
    }
}

/// JSON truthiness: `false`, `null`, `0`, `""`, `[]` and `{}` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(is_truthy(&Value::deserialize(deserializer)?))
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OptionId::Text(text) => f.write_str(text),
            OptionId::Number(number) => write!(f, "{}", number),
            OptionId::Other(value) => write!(f, "{}", value),
        }
    }
}

/// One row of the quiz listing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub id: QuizId,
    pub title: String,
    pub num_questions: usize,
}

/// A quiz as served to players, with its golden number attached.
#[derive(Debug, Serialize, Clone)]
pub struct ScoredQuiz {
    pub id: QuizId,
    pub title: String,
    pub questions: Vec<Question>,
    pub golden: i64,
}
