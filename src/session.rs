use crate::errors::Result;
use crate::message::{command, reply};
use crate::scoreboard::{contest::ContestState, scroll};
use log::info;

/// Owns the contest for the lifetime of one command stream and answers commands one at a time.
pub struct Session {
    contest: ContestState,
    ended: bool,
}

impl Session {
    pub fn new(wrong_attempt_penalty: u64) -> Session {
        Session {
            contest: ContestState::new(wrong_attempt_penalty),
            ended: false,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn handle_command(&mut self, command: command::Command) -> Result<reply::Reply> {
        use command::Command::*;
        match command {
            AddTeam(command) => self.add_team(command),
            Start(command) => self.start(command),
            Submit(command) => self.submit(command),
            Flush => self.flush(),
            Freeze => self.freeze(),
            Scroll => self.scroll(),
            QueryRanking(command) => self.query_ranking(command),
            QuerySubmission(command) => self.query_submission(command),
            End => self.end(),
        }
    }

    fn add_team(&mut self, command: command::AddTeam) -> Result<reply::Reply> {
        self.contest.register_team(&command.team)?;
        Ok(reply::Reply::TeamAdded)
    }

    fn start(&mut self, command: command::Start) -> Result<reply::Reply> {
        self.contest
            .start(command.duration, command.problem_count)?;
        Ok(reply::Reply::Started)
    }

    fn submit(&mut self, command: command::Submit) -> Result<reply::Reply> {
        self.contest
            .submit(&command.team, command.problem, command.verdict, command.time)?;
        Ok(reply::Reply::Submitted)
    }

    fn flush(&mut self) -> Result<reply::Reply> {
        self.contest.flush();
        Ok(reply::Reply::Flushed)
    }

    fn freeze(&mut self) -> Result<reply::Reply> {
        self.contest.freeze()?;
        Ok(reply::Reply::Frozen)
    }

    fn scroll(&mut self) -> Result<reply::Reply> {
        let outcome = scroll::scroll(&mut self.contest)?;
        Ok(reply::Reply::Scrolled(outcome))
    }

    fn query_ranking(&self, command: command::QueryRanking) -> Result<reply::Reply> {
        let query = self.contest.query_ranking(&command.team)?;
        Ok(reply::Reply::Ranking(reply::Ranking {
            team: command.team,
            rank: query.rank,
            stale: query.stale,
        }))
    }

    fn query_submission(&self, command: command::QuerySubmission) -> Result<reply::Reply> {
        let found = self
            .contest
            .query_submission(&command.team, command.problem, command.verdict)?
            .map(|submission| reply::FoundSubmission {
                team: self.contest.team(submission.team).name().to_string(),
                problem: submission.problem,
                verdict: submission.verdict,
                time: submission.time,
            });
        Ok(reply::Reply::Submission(reply::SubmissionLookup { found }))
    }

    fn end(&mut self) -> Result<reply::Reply> {
        self.ended = true;
        info!(
            "Contest ended after {} submissions (scheduled duration {})",
            self.contest.submissions().len(),
            self.contest.duration()
        );
        Ok(reply::Reply::Ended)
    }
}
