use crate::message::command;
use crate::verdict::Verdict;
use anyhow::{bail, Context, Result};
use regex::{Captures, Regex};

/// Decodes command lines such as `SUBMIT A BY team WITH Accepted AT 10`.
pub struct CommandParser {
    add_team: Regex,
    start: Regex,
    submit: Regex,
    query_ranking: Regex,
    query_submission: Regex,
}

impl CommandParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            add_team: Regex::new(r"^ADDTEAM\s+(?P<team>\S+)$")?,
            start: Regex::new(r"^START\s+DURATION\s+(?P<duration>\d+)\s+PROBLEM\s+(?P<count>\d+)$")?,
            submit: Regex::new(
                r"(?x)
                    ^SUBMIT\s+(?P<problem>[A-Z])
                    \s+BY\s+(?P<team>\S+)
                    \s+WITH\s+(?P<verdict>\S+)
                    \s+AT\s+(?P<time>\d+)$
                ",
            )?,
            query_ranking: Regex::new(r"^QUERY_RANKING\s+(?P<team>\S+)$")?,
            query_submission: Regex::new(
                r"(?x)
                    ^QUERY_SUBMISSION\s+(?P<team>\S+)
                    \s+WHERE\s+PROBLEM=(?P<problem>ALL|[A-Z])
                    \s+AND\s+STATUS=(?P<verdict>\S+)$
                ",
            )?,
        })
    }

    /// Returns `None` for blank lines.
    pub fn parse_line(&self, line: &str) -> Result<Option<command::Command>> {
        let line = line.trim();
        let Some(keyword) = line.split_whitespace().next() else {
            return Ok(None);
        };

        let command = match keyword {
            "ADDTEAM" => {
                let caps = matching(&self.add_team, line, "ADDTEAM <team>")?;
                command::Command::AddTeam(command::AddTeam {
                    team: caps["team"].to_string(),
                })
            }
            "START" => {
                let caps = matching(
                    &self.start,
                    line,
                    "START DURATION <duration> PROBLEM <count>",
                )?;
                command::Command::Start(command::Start {
                    duration: number(&caps["duration"])?,
                    problem_count: number(&caps["count"])?,
                })
            }
            "SUBMIT" => {
                let caps = matching(
                    &self.submit,
                    line,
                    "SUBMIT <problem> BY <team> WITH <status> AT <time>",
                )?;
                command::Command::Submit(command::Submit {
                    team: caps["team"].to_string(),
                    problem: problem_index(&caps["problem"]),
                    verdict: caps["verdict"].parse()?,
                    time: number(&caps["time"])?,
                })
            }
            "FLUSH" => bare(command::Command::Flush, line)?,
            "FREEZE" => bare(command::Command::Freeze, line)?,
            "SCROLL" => bare(command::Command::Scroll, line)?,
            "END" => bare(command::Command::End, line)?,
            "QUERY_RANKING" => {
                let caps = matching(&self.query_ranking, line, "QUERY_RANKING <team>")?;
                command::Command::QueryRanking(command::QueryRanking {
                    team: caps["team"].to_string(),
                })
            }
            "QUERY_SUBMISSION" => {
                let caps = matching(
                    &self.query_submission,
                    line,
                    "QUERY_SUBMISSION <team> WHERE PROBLEM=<problem> AND STATUS=<status>",
                )?;
                command::Command::QuerySubmission(command::QuerySubmission {
                    team: caps["team"].to_string(),
                    problem: match &caps["problem"] {
                        "ALL" => None,
                        letter => Some(problem_index(letter)),
                    },
                    verdict: match &caps["verdict"] {
                        "ALL" => None,
                        verdict => Some(verdict.parse::<Verdict>()?),
                    },
                })
            }
            _ => bail!(
                "Unknown command {keyword:?}. The supported commands are ADDTEAM, START, SUBMIT, \
                 FLUSH, FREEZE, SCROLL, QUERY_RANKING, QUERY_SUBMISSION, and END."
            ),
        };

        Ok(Some(command))
    }
}

fn matching<'t>(re: &Regex, line: &'t str, usage: &str) -> Result<Captures<'t>> {
    re.captures(line)
        .with_context(|| format!("Malformed command {line:?}, expected '{usage}'"))
}

fn bare(command: command::Command, line: &str) -> Result<command::Command> {
    if line.split_whitespace().nth(1).is_some() {
        bail!("Command {line:?} takes no arguments");
    }
    Ok(command)
}

fn number<T: std::str::FromStr>(text: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.parse()
        .with_context(|| format!("{text:?} is not a valid number"))
}

// The regexes only admit a single uppercase letter here.
fn problem_index(letter: &str) -> usize {
    letter.bytes().next().map_or(0, |b| usize::from(b - b'A'))
}

pub fn problem_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|index| b'A'.checked_add(index))
        .map_or('?', char::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::command::*;

    fn parse(line: &str) -> Command {
        CommandParser::new()
            .unwrap()
            .parse_line(line)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn parses_every_command() {
        assert_eq!(
            parse("ADDTEAM team_1"),
            Command::AddTeam(AddTeam {
                team: "team_1".to_string()
            })
        );
        assert_eq!(
            parse("START DURATION 300 PROBLEM 5"),
            Command::Start(Start {
                duration: 300,
                problem_count: 5
            })
        );
        assert_eq!(
            parse("SUBMIT C BY team_1 WITH Wrong_Answer AT 42"),
            Command::Submit(Submit {
                team: "team_1".to_string(),
                problem: 2,
                verdict: Verdict::WrongAnswer,
                time: 42
            })
        );
        assert_eq!(parse("FLUSH"), Command::Flush);
        assert_eq!(parse("  FREEZE  "), Command::Freeze);
        assert_eq!(parse("SCROLL"), Command::Scroll);
        assert_eq!(parse("END"), Command::End);
        assert_eq!(
            parse("QUERY_RANKING team_1"),
            Command::QueryRanking(QueryRanking {
                team: "team_1".to_string()
            })
        );
    }

    #[test]
    fn parses_submission_filters() {
        assert_eq!(
            parse("QUERY_SUBMISSION t WHERE PROBLEM=ALL AND STATUS=ALL"),
            Command::QuerySubmission(QuerySubmission {
                team: "t".to_string(),
                problem: None,
                verdict: None
            })
        );
        assert_eq!(
            parse("QUERY_SUBMISSION t WHERE PROBLEM=B AND STATUS=Time_Limit_Exceed"),
            Command::QuerySubmission(QuerySubmission {
                team: "t".to_string(),
                problem: Some(1),
                verdict: Some(Verdict::TimeLimitExceeded)
            })
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        let parser = CommandParser::new().unwrap();
        assert!(parser.parse_line("").unwrap().is_none());
        assert!(parser.parse_line("LAUNCH").is_err());
        assert!(parser.parse_line("ADDTEAM").is_err());
        assert!(parser.parse_line("FLUSH now").is_err());
        assert!(parser.parse_line("SUBMIT A BY t WITH Accepted AT soon").is_err());
        assert!(parser.parse_line("SUBMIT A BY t WITH Compile_Error AT 1").is_err());
    }

    #[test]
    fn letters_round_trip() {
        assert_eq!(problem_letter(0), 'A');
        assert_eq!(problem_letter(25), 'Z');
        assert_eq!(problem_index("Z"), 25);
    }
}
