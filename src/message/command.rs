use crate::verdict::Verdict;

/// A decoded line of the command stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    AddTeam(AddTeam),
    Start(Start),
    Submit(Submit),
    Flush,
    Freeze,
    Scroll,
    QueryRanking(QueryRanking),
    QuerySubmission(QuerySubmission),
    End,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddTeam {
    pub team: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Start {
    pub duration: u64,
    pub problem_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submit {
    pub team: String,
    pub problem: usize,
    pub verdict: Verdict,
    pub time: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryRanking {
    pub team: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuerySubmission {
    pub team: String,
    pub problem: Option<usize>,
    pub verdict: Option<Verdict>,
}

impl Command {
    /// Name of the action as it appears in failure reports.
    pub fn action(&self) -> &'static str {
        match self {
            Command::AddTeam(_) => "Add",
            Command::Start(_) => "Start",
            Command::Submit(_) => "Submit",
            Command::Flush => "Flush",
            Command::Freeze => "Freeze",
            Command::Scroll => "Scroll",
            Command::QueryRanking(_) => "Query ranking",
            Command::QuerySubmission(_) => "Query submission",
            Command::End => "End",
        }
    }
}
