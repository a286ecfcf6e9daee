use crate::scoreboard::scroll::ScrollOutcome;
use crate::verdict::Verdict;

/// The outcome of a successfully handled command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    TeamAdded,
    Started,
    Submitted,
    Flushed,
    Frozen,
    Scrolled(ScrollOutcome),
    Ranking(Ranking),
    Submission(SubmissionLookup),
    Ended,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ranking {
    pub team: String,
    pub rank: usize,
    pub stale: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionLookup {
    pub found: Option<FoundSubmission>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoundSubmission {
    pub team: String,
    pub problem: usize,
    pub verdict: Verdict,
    pub time: u64,
}
