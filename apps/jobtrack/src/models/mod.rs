pub mod application;
pub mod matching;

pub use application::{ApplicationStatus, JobApplication, NewApplication};
pub use matching::{MatchRequest, MatchResult};
