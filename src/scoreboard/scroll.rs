use crate::errors::{Error, Result};
use crate::scoreboard::contest::{ContestState, StandingRow};
use crate::scoreboard::ranking::compare_teams;
use log::{debug, info};

/// One unfreeze step that moved a team up the scoreboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealEvent {
    pub team: String,
    /// The team that held the revealing team's new position just before the move.
    pub displaced: String,
    pub solved_count: u64,
    pub penalty: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollOutcome {
    pub before: Vec<StandingRow>,
    pub reveals: Vec<RevealEvent>,
    pub after: Vec<StandingRow>,
}

/// Reveals every frozen result and lifts the freeze.
pub fn scroll(contest: &mut ContestState) -> Result<ScrollOutcome> {
    if !contest.is_frozen() {
        return Err(Error::NotFrozen);
    }

    let mut order = contest.flush();
    let before = contest.standings(&order);

    let reveals = resolve(contest, &mut order);

    contest.assign_ranks(&order);
    let after = contest.standings(&order);
    contest.unfreeze();

    info!("Scroll finished with {} ranking changes", reveals.len());

    Ok(ScrollOutcome {
        before,
        reveals,
        after,
    })
}

/// Unfreezes problems one at a time, always taking the lowest ranked team that still has a
/// frozen problem and its smallest-index frozen problem.
///
/// `order` must be the current ranking from first place to last; it is kept sorted as teams move.
pub(crate) fn resolve(contest: &mut ContestState, order: &mut Vec<usize>) -> Vec<RevealEvent> {
    let mut reveals = Vec::new();

    // Teams at or below `cursor` have nothing frozen left. A reveal only moves the revealing
    // team up and pushes the teams it passes one step down, so the bound never grows.
    let mut cursor = order.len();

    while let Some((old_position, problem)) = lowest_frozen(contest, &order[..cursor]) {
        cursor = old_position + 1;
        let team = order[old_position];

        let transition = contest.reveal(team, problem);

        let teams = contest.teams();
        let new_position = order[..old_position]
            .partition_point(|&other| compare_teams(&teams[other], &teams[team]).is_lt());

        debug!(
            "Revealed problem {problem} of {}: solved={}, position {old_position} -> {new_position}",
            teams[team].name(),
            transition.is_some(),
        );

        if new_position < old_position {
            let revealed = &teams[team];
            reveals.push(RevealEvent {
                team: revealed.name().to_string(),
                displaced: teams[order[new_position]].name().to_string(),
                solved_count: revealed.solved_count(),
                penalty: revealed.penalty(),
            });
            order.remove(old_position);
            order.insert(new_position, team);
        }
    }

    reveals
}

fn lowest_frozen(contest: &ContestState, order: &[usize]) -> Option<(usize, usize)> {
    order
        .iter()
        .enumerate()
        .rev()
        .find_map(|(position, &team)| {
            contest
                .team(team)
                .first_frozen_problem()
                .map(|problem| (position, problem))
        })
}
