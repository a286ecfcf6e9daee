use crate::errors::Error;
use crate::message::reply::Reply;
use crate::protocol::parser::problem_letter;
use crate::scoreboard::contest::StandingRow;
use crate::scoreboard::ledger::ProblemCell;
use std::fmt::{self, Write};

/// Renders the result of a command as report lines, each terminated by a newline. `action` names
/// the command in failure reports.
pub fn render(action: &str, result: &Result<Reply, Error>) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = render_result(&mut out, action, result);
    out
}

fn render_result(out: &mut String, action: &str, result: &Result<Reply, Error>) -> fmt::Result {
    match result {
        Ok(reply) => render_reply(out, reply),
        Err(error) => writeln!(out, "[Error]{action} failed: {error}."),
    }
}

fn render_reply(out: &mut String, reply: &Reply) -> fmt::Result {
    match reply {
        Reply::TeamAdded => writeln!(out, "[Info]Add successfully."),
        Reply::Started => writeln!(out, "[Info]Competition starts."),
        Reply::Submitted => Ok(()),
        Reply::Flushed => writeln!(out, "[Info]Flush scoreboard."),
        Reply::Frozen => writeln!(out, "[Info]Freeze scoreboard."),
        Reply::Scrolled(outcome) => {
            writeln!(out, "[Info]Scroll scoreboard.")?;
            render_standings(out, &outcome.before)?;
            for reveal in &outcome.reveals {
                writeln!(
                    out,
                    "{} {} {} {}",
                    reveal.team, reveal.displaced, reveal.solved_count, reveal.penalty
                )?;
            }
            render_standings(out, &outcome.after)
        }
        Reply::Ranking(ranking) => {
            writeln!(out, "[Info]Complete query ranking.")?;
            if ranking.stale {
                writeln!(
                    out,
                    "[Warning]Scoreboard is frozen. The ranking may be inaccurate until it were \
                     scrolled."
                )?;
            }
            writeln!(out, "{} NOW AT RANKING {}", ranking.team, ranking.rank)
        }
        Reply::Submission(lookup) => {
            writeln!(out, "[Info]Complete query submission.")?;
            match &lookup.found {
                None => writeln!(out, "Cannot find any submission."),
                Some(found) => writeln!(
                    out,
                    "{} {} {} {}",
                    found.team,
                    problem_letter(found.problem),
                    found.verdict,
                    found.time
                ),
            }
        }
        Reply::Ended => writeln!(out, "[Info]Competition ends."),
    }
}

fn render_standings(out: &mut String, rows: &[StandingRow]) -> fmt::Result {
    for row in rows {
        write!(
            out,
            "{} {} {} {}",
            row.name, row.rank, row.solved_count, row.penalty
        )?;
        for cell in &row.cells {
            out.push(' ');
            render_cell(out, *cell)?;
        }
        out.push('\n');
    }
    Ok(())
}

fn render_cell(out: &mut String, cell: ProblemCell) -> fmt::Result {
    match cell {
        ProblemCell::Solved { wrong: 0 } => write!(out, "+"),
        ProblemCell::Solved { wrong } => write!(out, "+{wrong}"),
        ProblemCell::Frozen { wrong: 0, attempts } => write!(out, "0/{attempts}"),
        ProblemCell::Frozen { wrong, attempts } => write!(out, "-{wrong}/{attempts}"),
        ProblemCell::Unsolved { wrong: 0 } => write!(out, "."),
        ProblemCell::Unsolved { wrong } => write!(out, "-{wrong}"),
    }
}
