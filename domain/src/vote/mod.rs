//! Voting-phase primitives: ballots, cancellation, and phase state

pub mod ballot;
pub mod cancel;
pub mod state;

pub use ballot::{Ballot, BallotOption};
pub use cancel::CancelGate;
pub use state::{BallotEvent, RANDOM_TOPIC, ResolvedVote, VoteOutcome, VotingState};
