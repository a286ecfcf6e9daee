use crate::scoreboard::ledger::{ProblemStatus, SolveTransition};
use std::cmp::Ordering;

pub struct TeamRecord {
    name: String,
    solved_count: u64,
    penalty: u64,
    // kept sorted in descending order
    solve_times: Vec<u64>,
    last_assigned_rank: usize,
    pub(crate) problems: Vec<ProblemStatus>,
}

impl TeamRecord {
    pub fn new(name: String) -> Self {
        Self {
            name,
            solved_count: 0,
            penalty: 0,
            solve_times: Vec::new(),
            last_assigned_rank: 0,
            problems: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn solved_count(&self) -> u64 {
        self.solved_count
    }

    pub fn penalty(&self) -> u64 {
        self.penalty
    }

    pub fn last_assigned_rank(&self) -> usize {
        self.last_assigned_rank
    }

    pub fn set_last_assigned_rank(&mut self, rank: usize) {
        self.last_assigned_rank = rank;
    }

    pub fn problems(&self) -> &[ProblemStatus] {
        &self.problems
    }

    pub fn first_frozen_problem(&self) -> Option<usize> {
        self.problems.iter().position(ProblemStatus::is_frozen)
    }

    /// Folds a solve into the visible aggregate. Must be called exactly once per solve
    /// transition reported by the ledger.
    pub fn record_solve(&mut self, transition: SolveTransition, wrong_attempt_penalty: u64) {
        self.solved_count += 1;
        let cost = wrong_attempt_penalty
            .saturating_mul(transition.wrong_before)
            .saturating_add(transition.accept_time);
        self.penalty = self.penalty.saturating_add(cost);
        let at = self
            .solve_times
            .partition_point(|&time| time > transition.accept_time);
        self.solve_times.insert(at, transition.accept_time);
    }
}

/// Scoreboard order: `Less` means `a` is ranked above `b`.
pub fn compare_teams(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.solved_count
        .cmp(&a.solved_count)
        .then_with(|| a.penalty.cmp(&b.penalty))
        .then_with(|| compare_solve_times(&a.solve_times, &b.solve_times))
        .then_with(|| a.name.cmp(&b.name))
}

fn compare_solve_times(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Team indices sorted from first place to last.
pub fn rank_order(teams: &[TeamRecord]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..teams.len()).collect();
    order.sort_by(|&a, &b| compare_teams(&teams[a], &teams[b]));
    order
}
