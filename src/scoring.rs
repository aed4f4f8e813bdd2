use serde_json::Number;

use crate::types::quiz::Quiz;

/// Running total that stays exact while every value is an integer and
/// turns real once a fractional value shows up.
#[derive(Debug, Clone, Copy)]
enum Total {
    Exact(i128),
    Real(f64),
}

impl Total {
    fn add(self, points: &Number) -> Total {
        let exact = points
            .as_i64()
            .map(i128::from)
            .or_else(|| points.as_u64().map(i128::from));
        match (self, exact) {
            (Total::Exact(total), Some(points)) => Total::Exact(total + points),
            (Total::Exact(total), None) => Total::Real(total as f64 + points.as_f64().unwrap_or(0.0)),
            (Total::Real(total), _) => Total::Real(total + points.as_f64().unwrap_or(0.0)),
        }
    }

    fn truncate(self) -> i64 {
        match self {
            Total::Exact(total) => i64::try_from(total).unwrap_or(if total < 0 { i64::MIN } else { i64::MAX }),
            Total::Real(total) => total.trunc() as i64,
        }
    }
}

/// Highest score a player can reach: the points of every option marked
/// correct, over all questions. Integer points add up exactly; with any
/// fractional value the sum is truncated toward zero once, at the end.
pub fn golden_number(quiz: &Quiz) -> i64 {
    quiz.questions
        .iter()
        .flat_map(|question| question.options.iter())
        .filter(|option| option.is_correct)
        .filter_map(|option| option.points.as_ref())
        .fold(Total::Exact(0), Total::add)
        .truncate()
}
