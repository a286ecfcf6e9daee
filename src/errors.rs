use crate::protocol::parser::problem_letter;
use thiserror::Error;

/// Rejections reported back to whoever issued a command. None of these are fatal: the contest
/// state is left untouched when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("competition has started")]
    CompetitionStarted,

    #[error("competition has not started")]
    CompetitionNotStarted,

    #[error("duplicated team name")]
    DuplicatedTeamName,

    #[error("scoreboard has been frozen")]
    AlreadyFrozen,

    #[error("scoreboard has not been frozen")]
    NotFrozen,

    #[error("cannot find the team")]
    TeamNotFound,

    #[error("problem {} is out of range", letter(.0))]
    ProblemOutOfRange(usize),

    #[error("submission time {time} is past the contest duration {duration}")]
    TimeOutOfRange { time: u64, duration: u64 },
}

fn letter(index: &usize) -> char {
    problem_letter(*index)
}

pub type Result<T> = std::result::Result<T, Error>;
