//! Application use cases

pub mod run_question_round;
pub mod run_quiz_session;
pub mod run_voting_phase;

mod window;

#[cfg(test)]
pub(crate) mod test_support;
