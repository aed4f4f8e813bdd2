pub mod new_quiz;
pub mod quiz;
