use crate::verdict::Verdict;

/// Bookkeeping for one (team, problem) pair.
///
/// The visible half (`wrong_before`, `solved_at`) is what the scoreboard shows.
/// The pending half collects submissions that arrived while the scoreboard was frozen and is only
/// folded into the visible half by [`ProblemStatus::reveal`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProblemStatus {
    wrong_before: u64,
    solved_at: Option<u64>,

    frozen: bool,
    attempts_since_freeze: u64,
    pending_wrong: u64,
    pending_accept_time: Option<u64>,
}

/// A solved flag going from false to true. Carries what the team aggregate needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolveTransition {
    pub wrong_before: u64,
    pub accept_time: u64,
}

/// How a problem looks on the printed scoreboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProblemCell {
    Solved { wrong: u64 },
    Frozen { wrong: u64, attempts: u64 },
    Unsolved { wrong: u64 },
}

impl ProblemStatus {
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Applies a judged submission. `scoreboard_frozen` is the contest-wide freeze flag at the
    /// moment the submission arrived.
    pub fn apply_submission(
        &mut self,
        verdict: Verdict,
        time: u64,
        scoreboard_frozen: bool,
    ) -> Option<SolveTransition> {
        if self.solved_at.is_some() {
            return None;
        }

        if !scoreboard_frozen {
            if verdict.is_accepted() {
                return Some(self.mark_solved(time));
            }
            self.wrong_before += 1;
            return None;
        }

        self.frozen = true;
        self.attempts_since_freeze += 1;
        if self.pending_accept_time.is_none() {
            if verdict.is_accepted() {
                self.pending_accept_time = Some(time);
            } else {
                self.pending_wrong += 1;
            }
        }
        None
    }

    /// Unfreezes the problem, making the frozen-period submissions visible.
    pub fn reveal(&mut self) -> Option<SolveTransition> {
        if !self.frozen {
            return None;
        }

        self.wrong_before += self.pending_wrong;
        let transition = self
            .pending_accept_time
            .map(|accept_time| self.mark_solved(accept_time));

        self.frozen = false;
        self.attempts_since_freeze = 0;
        self.pending_wrong = 0;
        self.pending_accept_time = None;

        transition
    }

    pub fn cell(&self) -> ProblemCell {
        if self.frozen {
            ProblemCell::Frozen {
                wrong: self.wrong_before,
                attempts: self.attempts_since_freeze,
            }
        } else if self.solved_at.is_some() {
            ProblemCell::Solved {
                wrong: self.wrong_before,
            }
        } else {
            ProblemCell::Unsolved {
                wrong: self.wrong_before,
            }
        }
    }

    fn mark_solved(&mut self, accept_time: u64) -> SolveTransition {
        self.solved_at = Some(accept_time);
        SolveTransition {
            wrong_before: self.wrong_before,
            accept_time,
        }
    }
}
