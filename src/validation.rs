use serde_json::Value;
use thiserror::Error;

use crate::types::{
    new_quiz::{NewOption, NewQuestion, NewQuiz},
    quiz::{is_truthy, OptionId, Question, QuestionKind, QuestionType, Quiz, QuizId, QuizOption},
};

/// Why a create/update request was refused. Question numbers start at 1.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid quiz payload: {0}")]
    InvalidPayload(String),
    #[error("Missing 'id' (filename without .json)")]
    MissingId,
    #[error("Invalid 'id' {0:?}: must be a plain file name")]
    InvalidId(String),
    #[error("Missing 'title'")]
    MissingTitle,
    #[error("Questions must be a non-empty list")]
    NoQuestions,
    #[error("Question {question}: 'type' must be 'single' or 'multi'")]
    InvalidType { question: usize },
    #[error("Question {question}: needs at least 2 options")]
    TooFewOptions { question: usize },
    #[error("Question {question} option {option}: 'points' must be non-zero number")]
    InvalidPoints { question: usize, option: String },
    #[error("Question {question}: at least one option must be marked is_correct")]
    NoCorrectOption { question: usize },
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::InvalidPayload(err.to_string())
    }
}

/// A required text field, trimmed. Falsy values count as missing.
fn required_text(value: Option<&Value>, field: &str, missing: ValidationError) -> Result<String, ValidationError> {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        Some(value) if is_truthy(value) && !value.is_string() => Err(ValidationError::InvalidPayload(
            format!("'{}' must be a string", field),
        )),
        _ => Err(missing),
    }
}

/// Checks a candidate quiz rule by rule and stops at the first broken one.
/// On success returns the storage key and the record to persist: trimmed
/// title, questions as submitted.
pub fn validate(candidate: NewQuiz) -> Result<(QuizId, Quiz), ValidationError> {
    let id = required_text(candidate.id.as_ref(), "id", ValidationError::MissingId)?;
    let id: QuizId = id.parse().map_err(|_| ValidationError::InvalidId(id.clone()))?;

    let title = required_text(candidate.title.as_ref(), "title", ValidationError::MissingTitle)?;

    let questions = match candidate.questions {
        Some(Value::Array(questions)) if !questions.is_empty() => questions,
        _ => return Err(ValidationError::NoQuestions),
    };

    let questions = questions
        .into_iter()
        .enumerate()
        .map(|(index, question)| validate_question(index + 1, serde_json::from_value(question)?))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((id, Quiz { title, questions }))
}

fn validate_question(number: usize, question: NewQuestion) -> Result<Question, ValidationError> {
    let kind = match question.kind {
        Some(Value::String(ref kind)) if kind == "single" => QuestionKind::Single,
        Some(Value::String(ref kind)) if kind == "multi" => QuestionKind::Multi,
        _ => return Err(ValidationError::InvalidType { question: number }),
    };

    let options = match question.options {
        Some(Value::Array(options)) if options.len() >= 2 => options,
        _ => return Err(ValidationError::TooFewOptions { question: number }),
    };

    let options = options
        .into_iter()
        .map(|option| validate_option(number, serde_json::from_value(option)?))
        .collect::<Result<Vec<_>, _>>()?;

    if !options.iter().any(|option| option.is_correct) {
        return Err(ValidationError::NoCorrectOption { question: number });
    }

    Ok(Question {
        kind: Some(QuestionType::Known(kind)),
        options,
        extra: question.extra,
    })
}

fn validate_option(question: usize, option: NewOption) -> Result<QuizOption, ValidationError> {
    let id = option.id.map(OptionId::from);
    let points = match option.points {
        Some(Value::Number(points)) if points.as_f64().is_some_and(|p| p != 0.0) => points,
        _ => {
            return Err(ValidationError::InvalidPoints {
                question,
                option: id.as_ref().map_or_else(|| "None".to_string(), OptionId::to_string),
            })
        }
    };

    Ok(QuizOption {
        id,
        points: Some(points),
        is_correct: option.is_correct.as_ref().is_some_and(is_truthy),
        extra: option.extra,
    })
}
