//! Session lifecycle entities and standings

pub mod entities;

pub use entities::{ParticipantTally, QuizSession, SessionPhase, Standing};
