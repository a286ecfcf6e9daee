use crate::errors::{Error, Result};
use crate::scoreboard::ledger::{ProblemCell, ProblemStatus, SolveTransition};
use crate::scoreboard::ranking::{self, TeamRecord};
use crate::verdict::Verdict;
use log::{debug, info};
use std::collections::HashMap;

pub const DEFAULT_WRONG_ATTEMPT_PENALTY: u64 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub team: usize,
    pub problem: usize,
    pub verdict: Verdict,
    pub time: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandingRow {
    pub name: String,
    pub rank: usize,
    pub solved_count: u64,
    pub penalty: u64,
    pub cells: Vec<ProblemCell>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankingQuery {
    pub rank: usize,
    /// Set while the scoreboard is frozen: frozen results are not reflected yet.
    pub stale: bool,
}

pub struct ContestState {
    teams: Vec<TeamRecord>,
    team_ids: HashMap<String, usize>,
    submissions: Vec<SubmissionRecord>,
    started: bool,
    frozen: bool,
    duration: u64,
    problem_count: usize,
    wrong_attempt_penalty: u64,
}

impl Default for ContestState {
    fn default() -> Self {
        Self::new(DEFAULT_WRONG_ATTEMPT_PENALTY)
    }
}

impl ContestState {
    pub fn new(wrong_attempt_penalty: u64) -> Self {
        Self {
            teams: Vec::new(),
            team_ids: HashMap::new(),
            submissions: Vec::new(),
            started: false,
            frozen: false,
            duration: 0,
            problem_count: 0,
            wrong_attempt_penalty,
        }
    }

    pub fn teams(&self) -> &[TeamRecord] {
        &self.teams
    }

    pub fn team(&self, id: usize) -> &TeamRecord {
        &self.teams[id]
    }

    pub fn team_id(&self, name: &str) -> Result<usize> {
        self.team_ids.get(name).copied().ok_or(Error::TeamNotFound)
    }

    pub fn submissions(&self) -> &[SubmissionRecord] {
        &self.submissions
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn register_team(&mut self, name: &str) -> Result<()> {
        if self.started {
            return Err(Error::CompetitionStarted);
        }
        if self.team_ids.contains_key(name) {
            return Err(Error::DuplicatedTeamName);
        }
        self.team_ids.insert(name.to_string(), self.teams.len());
        self.teams.push(TeamRecord::new(name.to_string()));
        Ok(())
    }

    /// Fixes the problem set and duration. Until the first flush teams are ranked by name.
    pub fn start(&mut self, duration: u64, problem_count: usize) -> Result<()> {
        if self.started {
            return Err(Error::CompetitionStarted);
        }
        self.started = true;
        self.duration = duration;
        self.problem_count = problem_count;
        for team in &mut self.teams {
            team.problems = vec![ProblemStatus::default(); problem_count];
        }

        let mut by_name: Vec<usize> = (0..self.teams.len()).collect();
        by_name.sort_by(|&a, &b| self.teams[a].name().cmp(self.teams[b].name()));
        self.assign_ranks(&by_name);

        info!(
            "Contest started with {} teams, {problem_count} problems, duration {duration}",
            self.teams.len()
        );
        Ok(())
    }

    pub fn submit(&mut self, team: &str, problem: usize, verdict: Verdict, time: u64) -> Result<()> {
        if !self.started {
            return Err(Error::CompetitionNotStarted);
        }
        if problem >= self.problem_count {
            return Err(Error::ProblemOutOfRange(problem));
        }
        if time > self.duration {
            return Err(Error::TimeOutOfRange {
                time,
                duration: self.duration,
            });
        }
        let team_id = self.team_id(team)?;

        self.submissions.push(SubmissionRecord {
            team: team_id,
            problem,
            verdict,
            time,
        });

        let frozen = self.frozen;
        let record = &mut self.teams[team_id];
        let transition = record.problems[problem].apply_submission(verdict, time, frozen);
        if let Some(transition) = transition {
            record.record_solve(transition, self.wrong_attempt_penalty);
        }

        debug!(
            "Submission by {team} on problem {problem}: {verdict} at {time}{}",
            if frozen { " (frozen)" } else { "" }
        );
        Ok(())
    }

    /// Recomputes the ranking and publishes it as every team's displayed rank.
    pub fn flush(&mut self) -> Vec<usize> {
        let order = ranking::rank_order(&self.teams);
        self.assign_ranks(&order);
        order
    }

    pub fn freeze(&mut self) -> Result<()> {
        if self.frozen {
            return Err(Error::AlreadyFrozen);
        }
        self.frozen = true;
        info!("Scoreboard frozen");
        Ok(())
    }

    pub(crate) fn unfreeze(&mut self) {
        self.frozen = false;
    }

    /// Makes the frozen results of one problem visible and updates the team aggregate.
    pub(crate) fn reveal(&mut self, team: usize, problem: usize) -> Option<SolveTransition> {
        let record = &mut self.teams[team];
        let transition = record.problems[problem].reveal();
        if let Some(transition) = transition {
            record.record_solve(transition, self.wrong_attempt_penalty);
        }
        transition
    }

    pub(crate) fn assign_ranks(&mut self, order: &[usize]) {
        for (position, &team) in order.iter().enumerate() {
            self.teams[team].set_last_assigned_rank(position + 1);
        }
    }

    pub fn standings(&self, order: &[usize]) -> Vec<StandingRow> {
        order
            .iter()
            .map(|&id| {
                let team = &self.teams[id];
                StandingRow {
                    name: team.name().to_string(),
                    rank: team.last_assigned_rank(),
                    solved_count: team.solved_count(),
                    penalty: team.penalty(),
                    cells: team.problems().iter().map(ProblemStatus::cell).collect(),
                }
            })
            .collect()
    }

    pub fn query_ranking(&self, team: &str) -> Result<RankingQuery> {
        let id = self.team_id(team)?;
        Ok(RankingQuery {
            rank: self.teams[id].last_assigned_rank(),
            stale: self.frozen,
        })
    }

    /// Most recent submission of `team` matching both filters. `None` filters match anything.
    /// Submissions made during the freeze are included as they are.
    pub fn query_submission(
        &self,
        team: &str,
        problem: Option<usize>,
        verdict: Option<Verdict>,
    ) -> Result<Option<SubmissionRecord>> {
        let id = self.team_id(team)?;
        Ok(self
            .submissions
            .iter()
            .rev()
            .find(|submission| {
                submission.team == id
                    && problem.map_or(true, |problem| submission.problem == problem)
                    && verdict.map_or(true, |verdict| submission.verdict == verdict)
            })
            .copied())
    }
}

/// A started contest of length 300 with the given teams registered.
#[cfg(test)]
pub(crate) fn started_contest(teams: &[&str], problems: usize) -> ContestState {
    let mut contest = ContestState::default();
    for team in teams {
        contest.register_team(team).unwrap();
    }
    contest.start(300, problems).unwrap();
    contest
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::started_contest as contest;

    #[test]
    fn registration_rules() {
        let mut contest = ContestState::default();
        contest.register_team("alpha").unwrap();
        assert_eq!(contest.register_team("alpha"), Err(Error::DuplicatedTeamName));
        contest.start(100, 3).unwrap();
        assert_eq!(contest.register_team("beta"), Err(Error::CompetitionStarted));
        assert_eq!(contest.start(100, 3), Err(Error::CompetitionStarted));
        assert_eq!(contest.teams().len(), 1);
        assert_eq!(contest.problem_count, 3);
        assert_eq!(contest.duration(), 100);
    }

    #[test]
    fn ranks_by_name_before_first_flush() {
        let contest = contest(&["zeta", "alpha", "mu"], 2);
        assert_eq!(contest.query_ranking("alpha").unwrap().rank, 1);
        assert_eq!(contest.query_ranking("mu").unwrap().rank, 2);
        assert_eq!(contest.query_ranking("zeta").unwrap().rank, 3);
    }

    #[test]
    fn displayed_rank_changes_only_on_flush() {
        let mut contest = contest(&["A", "B"], 3);
        contest.submit("A", 0, Verdict::WrongAnswer, 3).unwrap();
        contest.submit("A", 0, Verdict::Accepted, 10).unwrap();
        contest.submit("B", 0, Verdict::Accepted, 5).unwrap();
        assert_eq!(contest.team(0).penalty(), 30);
        assert_eq!(contest.team(1).penalty(), 5);
        assert_eq!(contest.query_ranking("B").unwrap().rank, 2);

        let order = contest.flush();
        assert_eq!(order, vec![1, 0]);
        assert_eq!(contest.query_ranking("B").unwrap().rank, 1);
        assert_eq!(contest.query_ranking("A").unwrap().rank, 2);
    }

    #[test]
    fn submit_rejections_leave_state_alone() {
        let mut early = ContestState::default();
        early.register_team("A").unwrap();
        assert_eq!(
            early.submit("A", 0, Verdict::Accepted, 1),
            Err(Error::CompetitionNotStarted)
        );

        let mut contest = contest(&["A"], 2);
        assert_eq!(
            contest.submit("A", 2, Verdict::Accepted, 1),
            Err(Error::ProblemOutOfRange(2))
        );
        assert_eq!(
            contest.submit("nobody", 0, Verdict::Accepted, 1),
            Err(Error::TeamNotFound)
        );
        assert!(contest.submissions().is_empty());
    }

    #[test]
    fn submissions_past_duration_are_rejected() {
        let mut contest = contest(&["a"], 2);
        assert_eq!(
            contest.submit("a", 0, Verdict::Accepted, u64::MAX),
            Err(Error::TimeOutOfRange {
                time: u64::MAX,
                duration: 300
            })
        );
        assert!(contest.submissions().is_empty());
        assert_eq!(contest.team(0).solved_count(), 0);

        contest.submit("a", 0, Verdict::Accepted, 300).unwrap();
        contest.submit("a", 1, Verdict::Accepted, 1).unwrap();
        assert_eq!(contest.team(0).solved_count(), 2);
        assert_eq!(contest.team(0).penalty(), 301);
    }

    #[test]
    fn freeze_hides_new_results() {
        let mut contest = contest(&["A"], 2);
        contest.submit("A", 0, Verdict::Accepted, 10).unwrap();
        contest.freeze().unwrap();
        assert_eq!(contest.freeze(), Err(Error::AlreadyFrozen));
        contest.submit("A", 1, Verdict::Accepted, 20).unwrap();
        contest.submit("A", 0, Verdict::WrongAnswer, 25).unwrap();

        let team = contest.team(0);
        assert_eq!(team.solved_count(), 1);
        assert_eq!(team.penalty(), 10);
        assert!(team.problems()[1].is_frozen());
        // solved before the freeze, stays visible
        assert!(!team.problems()[0].is_frozen());
        assert!(contest.query_ranking("A").unwrap().stale);
    }

    #[test]
    fn aggregates_change_only_on_solve_transitions() {
        let mut contest = contest(&["A"], 2);
        let steps = [
            (0, Verdict::WrongAnswer, 1, (0, 0)),
            (0, Verdict::TimeLimitExceeded, 2, (0, 0)),
            (0, Verdict::Accepted, 3, (1, 43)),
            (0, Verdict::Accepted, 4, (1, 43)),
            (1, Verdict::RuntimeError, 5, (1, 43)),
            (1, Verdict::Accepted, 9, (2, 72)),
        ];
        for (problem, verdict, time, (solved, penalty)) in steps {
            contest.submit("A", problem, verdict, time).unwrap();
            assert_eq!(contest.team(0).solved_count(), solved);
            assert_eq!(contest.team(0).penalty(), penalty);
        }
    }

    #[test]
    fn submission_query_searches_newest_first() {
        let mut contest = contest(&["A", "B"], 3);
        contest.submit("A", 0, Verdict::WrongAnswer, 1).unwrap();
        contest.submit("A", 1, Verdict::Accepted, 2).unwrap();
        contest.submit("B", 1, Verdict::WrongAnswer, 3).unwrap();
        contest.submit("A", 0, Verdict::Accepted, 4).unwrap();

        let latest = contest.query_submission("A", None, None).unwrap();
        assert_eq!(latest.map(|s| s.time), Some(4));

        let wrong = contest
            .query_submission("A", None, Some(Verdict::WrongAnswer))
            .unwrap();
        assert_eq!(wrong.map(|s| (s.problem, s.time)), Some((0, 1)));

        let on_b = contest.query_submission("A", Some(1), None).unwrap();
        assert_eq!(on_b.map(|s| s.time), Some(2));

        let none = contest
            .query_submission("B", Some(2), Some(Verdict::Accepted))
            .unwrap();
        assert_eq!(none, None);

        assert_eq!(
            contest.query_submission("C", None, None),
            Err(Error::TeamNotFound)
        );
    }
}
