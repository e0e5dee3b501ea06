//! Depth-first search over assignments. Slots are chosen by fewest remaining options (ties go to
//! the slot crossing the most others, then to the lowest id) and each slot's options are tried
//! least-constraining first. The first complete, consistent assignment found is returned.

use instant::{Duration, Instant};
use log::{debug, info, trace};
use std::cmp::Reverse;
use std::error::Error;
use std::fmt;

use crate::arc_consistency::establish_arc_consistency;
use crate::assignment::{consistent, Assignment};
use crate::config::FillConfig;
use crate::domains::Domains;
use crate::puzzle::{Puzzle, Variable};
use crate::word_list::WordList;
use crate::{VariableId, WordId};

/// A struct tracking statistics about the filling process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    /// (slot, word) choices tried.
    pub states: u64,
    /// Slots whose options were exhausted, sending the search back up a level.
    pub backtracks: u64,
    /// Successful revisions made by the initial arc-consistency pass.
    pub revisions: usize,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
pub struct FillSuccess {
    pub statistics: Statistics,
    pub assignment: Assignment,
}

/// Why a fill couldn't be found. None of these leave a partial assignment behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillFailure {
    /// A slot had no options left before the search started.
    UnsatisfiableDomain { variable: Variable },
    /// Every option for the first slot was tried without success.
    SearchExhausted,
    /// The configured state limit was hit first.
    StateLimitReached { states: u64 },
    /// The domains given don't line up with the puzzle's slots.
    MismatchedDomains { variables: usize, domains: usize },
}

impl fmt::Display for FillFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillFailure::UnsatisfiableDomain { variable } => {
                write!(f, "no words fit slot {}", variable)
            }
            FillFailure::SearchExhausted => write!(f, "no fill exists for this word list"),
            FillFailure::StateLimitReached { states } => {
                write!(f, "gave up after {} states", states)
            }
            FillFailure::MismatchedDomains { variables, domains } => write!(
                f,
                "got domains for {} slots but the puzzle has {}",
                domains, variables
            ),
        }
    }
}

impl Error for FillFailure {}

/// A failed fill, with the statistics gathered up to the point it stopped.
#[derive(Debug, Clone)]
pub struct FillError {
    pub failure: FillFailure,
    pub statistics: Statistics,
}

impl fmt::Display for FillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.failure)
    }
}

impl Error for FillError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.failure)
    }
}

fn check_domains(puzzle: &Puzzle, domains: &Domains) -> Result<(), FillFailure> {
    if domains.variable_count() != puzzle.variable_count() {
        return Err(FillFailure::MismatchedDomains {
            variables: puzzle.variable_count(),
            domains: domains.variable_count(),
        });
    }
    Ok(())
}

/// Pick the next slot to fill: fewest remaining options, then most crossings, then lowest id.
/// Returns `None` once every slot is assigned.
pub fn select_unassigned_variable(
    puzzle: &Puzzle,
    domains: &Domains,
    assignment: &Assignment,
) -> Option<VariableId> {
    (0..puzzle.variable_count())
        .filter(|&variable_id| !assignment.is_assigned(variable_id))
        .min_by_key(|&variable_id| {
            (
                domains.len(variable_id),
                Reverse(puzzle.degree(variable_id)),
                variable_id,
            )
        })
}

/// How many options in the domains of unassigned crossing slots would be ruled out by putting
/// `word_id` in `variable_id`.
pub fn count_ruled_out(
    puzzle: &Puzzle,
    words: &WordList,
    domains: &Domains,
    variable_id: VariableId,
    word_id: WordId,
    assignment: &Assignment,
) -> usize {
    let word = words.get(word_id);

    puzzle
        .neighbors(variable_id)
        .iter()
        .filter(|&&neighbor_id| !assignment.is_assigned(neighbor_id))
        .map(|&neighbor_id| match puzzle.overlap(variable_id, neighbor_id) {
            Some(overlap) => {
                let shared = word.char_at(overlap.own_cell);
                domains
                    .iter(neighbor_id)
                    .filter(|&neighbor_word_id| {
                        words.get(neighbor_word_id).char_at(overlap.other_cell) != shared
                    })
                    .count()
            }
            None => 0,
        })
        .sum()
}

/// The options for `variable_id`, least constraining first. Ties keep `WordId` order.
pub fn order_domain_values(
    puzzle: &Puzzle,
    words: &WordList,
    domains: &Domains,
    variable_id: VariableId,
    assignment: &Assignment,
) -> Vec<WordId> {
    let mut ranked: Vec<(usize, WordId)> = domains
        .iter(variable_id)
        .map(|word_id| {
            (
                count_ruled_out(puzzle, words, domains, variable_id, word_id, assignment),
                word_id,
            )
        })
        .collect();

    ranked.sort_unstable();
    ranked.into_iter().map(|(_, word_id)| word_id).collect()
}

/// One level of the search: the slot being filled, its ordered options, and the next one to try.
struct Frame {
    variable_id: VariableId,
    options: Vec<WordId>,
    next_option: usize,
}

fn open_frame(
    puzzle: &Puzzle,
    words: &WordList,
    domains: &Domains,
    assignment: &Assignment,
) -> Option<Frame> {
    select_unassigned_variable(puzzle, domains, assignment).map(|variable_id| Frame {
        variable_id,
        options: order_domain_values(puzzle, words, domains, variable_id, assignment),
        next_option: 0,
    })
}

/// Extend `assignment` to a complete, consistent assignment if possible.
///
/// This visits nodes in the same order as the textbook recursive formulation, but keeps its own
/// stack so that deep grids can't overflow the call stack. Each frame's slot is retracted before
/// its next option is tried, so the assignment only ever holds the current path. The domains are
/// never modified.
pub fn backtrack(
    puzzle: &Puzzle,
    words: &WordList,
    domains: &Domains,
    mut assignment: Assignment,
    config: &FillConfig,
    statistics: &mut Statistics,
) -> Result<Assignment, FillFailure> {
    check_domains(puzzle, domains)?;

    let mut stack: Vec<Frame> = match open_frame(puzzle, words, domains, &assignment) {
        Some(frame) => vec![frame],
        None => return Ok(assignment),
    };

    while let Some(frame) = stack.last_mut() {
        let variable_id = frame.variable_id;
        let option = frame.options.get(frame.next_option).copied();
        frame.next_option += 1;

        // Whatever this slot held came from its previous option, which didn't work out.
        assignment.remove(variable_id);

        let word_id = match option {
            Some(word_id) => word_id,
            None => {
                stack.pop();
                statistics.backtracks += 1;
                trace!("exhausted {}, backtracking", puzzle.variable(variable_id));
                continue;
            }
        };

        if let Some(limit) = config.state_limit {
            if statistics.states >= limit {
                return Err(FillFailure::StateLimitReached {
                    states: statistics.states,
                });
            }
        }
        statistics.states += 1;

        assignment.insert(variable_id, word_id);
        if !consistent(puzzle, words, &assignment) {
            continue;
        }

        match open_frame(puzzle, words, domains, &assignment) {
            Some(next_frame) => stack.push(next_frame),
            None => return Ok(assignment),
        }
    }

    Err(FillFailure::SearchExhausted)
}

/// Filter the domains down before searching: node consistency, then (if enabled) AC-3 over the
/// whole grid. Fails if any slot is left with no options.
pub fn prepare_domains(
    puzzle: &Puzzle,
    words: &WordList,
    domains: &mut Domains,
    config: &FillConfig,
    statistics: &mut Statistics,
) -> Result<(), FillFailure> {
    check_domains(puzzle, domains)?;
    domains.enforce_node_consistency(puzzle, words);

    if config.initial_arc_consistency {
        match establish_arc_consistency(puzzle, words, domains, None) {
            Ok(success) => statistics.revisions = success.revisions,
            Err(failure) => {
                statistics.revisions = failure.revisions;
                return Err(FillFailure::UnsatisfiableDomain {
                    variable: puzzle.variable(failure.variable).clone(),
                });
            }
        }
    }

    // A slot with no crossings is never revised, so it can reach this point empty.
    if let Some(variable_id) = domains.first_empty() {
        return Err(FillFailure::UnsatisfiableDomain {
            variable: puzzle.variable(variable_id).clone(),
        });
    }

    Ok(())
}

/// Search for a fill starting from the given per-slot candidates, which must cover every slot.
pub fn fill_with_domains(
    puzzle: &Puzzle,
    words: &WordList,
    mut domains: Domains,
    config: &FillConfig,
) -> Result<FillSuccess, FillError> {
    let start = Instant::now();
    let mut statistics = Statistics::default();

    let result = prepare_domains(puzzle, words, &mut domains, config, &mut statistics).and_then(
        |()| {
            debug!(
                "searching {} slots with {} options",
                puzzle.variable_count(),
                domains.total_options()
            );
            backtrack(
                puzzle,
                words,
                &domains,
                Assignment::new(puzzle),
                config,
                &mut statistics,
            )
        },
    );

    statistics.duration = start.elapsed();

    match result {
        Ok(assignment) => {
            info!("found a fill: {:?}", statistics);
            Ok(FillSuccess {
                statistics,
                assignment,
            })
        }
        Err(failure) => {
            info!("no fill ({}): {:?}", failure, statistics);
            Err(FillError {
                failure,
                statistics,
            })
        }
    }
}

/// Search for a fill where every slot starts out with the whole word list.
pub fn find_fill(
    puzzle: &Puzzle,
    words: &WordList,
    config: &FillConfig,
) -> Result<FillSuccess, FillError> {
    fill_with_domains(puzzle, words, Domains::new(puzzle, words), config)
}
