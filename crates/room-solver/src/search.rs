//! Uniform-cost search over the implicit graph of board configurations.
//!
//! Vertices are boards identified by their canonical serialization, edges
//! are the legal moves weighted by energy cost. Dijkstra with lazy deletion:
//! stale frontier entries are detected by rechecking the best-known cost on
//! pop, and the search stops once the goal configuration is popped.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use log::debug;

use crate::board::Board;
use crate::moves::possible_moves;

/// What the search concluded about a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Minimum total energy to reach the sorted configuration
    Solved(u64),
    /// Frontier exhausted without ever reaching the goal
    Unreachable,
    /// No goal configuration is known for the input's row count
    UnsupportedHeight,
}

impl Outcome {
    /// Collapse to the wire integer: the energy when solved, `-1` when the
    /// goal is unreachable, `0` when the topology has no known goal.
    pub fn as_energy_code(self) -> i64 {
        match self {
            Outcome::Solved(energy) => energy as i64,
            Outcome::Unreachable => -1,
            Outcome::UnsupportedHeight => 0,
        }
    }
}

/// Search outcome plus run statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    pub outcome: Outcome,
    /// Vertices expanded (popped fresh from the frontier)
    pub states_expanded: usize,
    /// Distinct board configurations ever assigned a cost
    pub states_seen: usize,
}

/// Minimum total energy to sort `start`, by uniform-cost search.
pub fn solve(start: &Board) -> SolveResult {
    let Some(goal) = Board::goal_for_height(start.height()) else {
        debug!("no goal configuration for {} rows", start.height());
        return SolveResult {
            outcome: Outcome::UnsupportedHeight,
            states_expanded: 0,
            states_seen: 0,
        };
    };
    let goal_key = goal.to_string();
    let start_key = start.to_string();

    let mut best: HashMap<String, u64> = HashMap::new();
    let mut boards: HashMap<String, Board> = HashMap::new();
    let mut frontier: BinaryHeap<Reverse<(u64, String)>> = BinaryHeap::new();

    best.insert(start_key.clone(), 0);
    boards.insert(start_key.clone(), start.clone());
    frontier.push(Reverse((0, start_key)));

    let mut states_expanded = 0usize;

    while let Some(Reverse((cost, key))) = frontier.pop() {
        // Lazy deletion: a cheaper path to this vertex was already expanded
        if best.get(&key).is_some_and(|&known| cost > known) {
            continue;
        }
        if key == goal_key {
            debug!(
                "goal reached at energy {} after {} expansions",
                cost, states_expanded
            );
            return SolveResult {
                outcome: Outcome::Solved(cost),
                states_expanded,
                states_seen: best.len(),
            };
        }

        let Some(board) = boards.get(&key).cloned() else { continue };
        states_expanded += 1;
        if states_expanded % 10_000 == 0 {
            debug!(
                "expanded {} states, {} seen, frontier {}",
                states_expanded,
                best.len(),
                frontier.len()
            );
        }

        for (next, move_cost) in possible_moves(&board) {
            let candidate = cost + move_cost;
            let next_key = next.to_string();
            let known = best.get(&next_key).copied().unwrap_or(u64::MAX);
            if candidate < known {
                best.insert(next_key.clone(), candidate);
                boards.insert(next_key.clone(), next);
                frontier.push(Reverse((candidate, next_key)));
            }
        }
    }

    debug!(
        "frontier exhausted after {} expansions, goal never reached",
        states_expanded
    );
    SolveResult {
        outcome: Outcome::Unreachable,
        states_expanded,
        states_seen: best.len(),
    }
}
