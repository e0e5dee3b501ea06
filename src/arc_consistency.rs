//! AC-3 over the crossings of a puzzle. The grid is arc-consistent when every option left for a
//! slot has, for each crossing slot, at least one option that puts the same letter in the shared
//! cell.

use log::{debug, trace};
use std::collections::VecDeque;

use crate::domains::Domains;
use crate::puzzle::Puzzle;
use crate::word_list::WordList;
use crate::VariableId;

/// An ordered pair of crossing slots: revising it makes `x` consistent with `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arc {
    pub x: VariableId,
    pub y: VariableId,
}

/// Result from a successful call to `establish_arc_consistency`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcConsistencySuccess {
    /// How many revisions removed at least one option.
    pub revisions: usize,
}

/// Result from a failed call to `establish_arc_consistency`: `variable` ran out of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcConsistencyFailure {
    pub variable: VariableId,
    pub revisions: usize,
}

pub type ArcConsistencyResult = Result<ArcConsistencySuccess, ArcConsistencyFailure>;

/// Every ordered pair of crossing slots, in `VariableId` order.
pub fn all_arcs(puzzle: &Puzzle) -> Vec<Arc> {
    (0..puzzle.variable_count())
        .flat_map(|x| puzzle.neighbors(x).iter().map(move |&y| Arc { x, y }))
        .collect()
}

/// Run AC-3 starting from `arcs`, or from every arc in the puzzle if none are given.
///
/// Arcs are processed first-in first-out. Whenever a revision shrinks the domain of `x`, every
/// arc `(z, x)` with `z` crossing `x` (other than `y`) goes back on the queue, since `z` may have
/// lost its support in `x`. If any domain is emptied we stop right away; the domains are left as
/// they were at that point and the caller must treat the puzzle as unsatisfiable.
pub fn establish_arc_consistency(
    puzzle: &Puzzle,
    words: &WordList,
    domains: &mut Domains,
    arcs: Option<&[Arc]>,
) -> ArcConsistencyResult {
    let mut queue: VecDeque<Arc> = match arcs {
        Some(arcs) => arcs.iter().copied().collect(),
        None => all_arcs(puzzle).into(),
    };
    let mut revisions = 0;

    while let Some(Arc { x, y }) = queue.pop_front() {
        if !domains.revise(puzzle, words, x, y) {
            continue;
        }

        revisions += 1;
        trace!(
            "revised {} against {}, {} options left",
            puzzle.variable(x),
            puzzle.variable(y),
            domains.len(x)
        );

        if domains.is_empty(x) {
            debug!(
                "arc consistency emptied the domain of {} after {} revisions",
                puzzle.variable(x),
                revisions
            );
            return Err(ArcConsistencyFailure {
                variable: x,
                revisions,
            });
        }

        for &z in puzzle.neighbors(x) {
            if z != y {
                queue.push_back(Arc { x: z, y: x });
            }
        }
    }

    debug!(
        "arc consistency finished after {} revisions, {} options left",
        revisions,
        domains.total_options()
    );

    Ok(ArcConsistencySuccess { revisions })
}
