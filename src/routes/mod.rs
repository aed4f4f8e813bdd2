use std::convert::Infallible;

use warp::{http::Method, Filter, Reply};

use crate::{error::return_error, store::Store};

pub mod quiz;

const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// The whole HTTP surface, errors already turned into responses.
pub fn routes(store: Store) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let store_filter = warp::any().map(move || store.clone());

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(&[Method::GET, Method::POST, Method::OPTIONS]);

    let list_quizzes = warp::get()
        .and(warp::path!("api" / "tests"))
        .and(store_filter.clone())
        .and_then(quiz::list_quizzes);

    let get_quiz = warp::get()
        .and(warp::path!("api" / "quiz" / String))
        .and(store_filter.clone())
        .and_then(quiz::get_quiz);

    let save_quiz = warp::post()
        .and(warp::path!("api" / "tests"))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(store_filter)
        .and(warp::body::bytes())
        .and_then(quiz::save_quiz);

    list_quizzes
        .or(get_quiz)
        .or(save_quiz)
        .with(cors)
        .recover(return_error)
        .with(warp::log("quiz_server"))
}
