use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid team size for {team}: expected {expected}, found {found}")]
    InvalidTeamSize {
        team: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid match duration: {seconds}s")]
    InvalidDuration { seconds: u32 },

    #[error("roster for {team} has no goalkeeper")]
    MissingGoalkeeper { team: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
