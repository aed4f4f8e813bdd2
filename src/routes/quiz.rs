use percent_encoding::percent_decode_str;
use serde_json::json;
use warp::{http::StatusCode, hyper::body::Bytes, Rejection, Reply};

use crate::{
    error::Error,
    scoring::golden_number,
    store::Store,
    types::{
        new_quiz::NewQuiz,
        quiz::{QuizId, ScoredQuiz},
    },
    validation::{validate, ValidationError},
};

pub async fn list_quizzes(store: Store) -> Result<impl Reply, Rejection> {
    let summaries = store.summaries().await.map_err(Error::from)?;
    Ok(warp::reply::json(&summaries))
}

pub async fn get_quiz(id: String, store: Store) -> Result<impl Reply, Rejection> {
    // warp hands over the segment still percent-encoded
    let decoded = percent_decode_str(&id).decode_utf8().map(|decoded| decoded.into_owned());
    let id = match decoded {
        Ok(decoded) => decoded,
        Err(_) => return Err(warp::reject::custom(Error::QuizNotFound(QuizId(id)))),
    };
    // Anything that could escape the storage root simply does not exist.
    let quiz_id: QuizId = match id.parse() {
        Ok(quiz_id) => quiz_id,
        Err(_) => return Err(warp::reject::custom(Error::QuizNotFound(QuizId(id)))),
    };

    let quiz = store.read(&quiz_id).await.map_err(Error::from)?;
    let golden = golden_number(&quiz);
    Ok(warp::reply::json(&ScoredQuiz {
        id: quiz_id,
        title: quiz.title,
        questions: quiz.questions,
        golden,
    }))
}

pub async fn save_quiz(store: Store, body: Bytes) -> Result<impl Reply, Rejection> {
    let candidate = NewQuiz::from_body(&body).map_err(ValidationError::from).map_err(Error::from)?;
    let (id, quiz) = validate(candidate).map_err(Error::from)?;

    let path = store.write(&id, &quiz).await.map_err(Error::SaveFailed)?;
    log::info!("saved quiz {} ({} questions)", id, quiz.questions.len());

    Ok(warp::reply::with_status(
        warp::reply::json(&json!({ "ok": true, "saved": path.display().to_string() })),
        StatusCode::OK,
    ))
}
