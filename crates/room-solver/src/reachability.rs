//! Flood-fill reachability over the 4-neighbor grid graph.
//!
//! A cell is reachable from a source when a path of occupiable, unoccupied
//! cells connects them. Distances are exact shortest hop counts because
//! every edge has unit weight and each cell is visited at most once.

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::board::{Board, Position};

const STEPS: [Position; 4] = [
    Position { row: 0, col: 1 },
    Position { row: 1, col: 0 },
    Position { row: -1, col: 0 },
    Position { row: 0, col: -1 },
];

/// Every empty, occupiable cell reachable from `from` without passing
/// through an occupied cell, paired with its step distance.
///
/// The source itself is excluded; the first stepped-to cell is at distance 1.
/// Results come out in breadth-first order, which is deterministic for a
/// given board.
pub fn reachable_tiles(board: &Board, from: Position) -> Vec<(Position, u32)> {
    let width = board.width();
    let mut visited = vec![false; width * board.height()];
    let offset = |pos: Position| pos.row as usize * width + pos.col as usize;

    let mut reached = Vec::new();
    let mut queue: VecDeque<(Position, u32)> = VecDeque::new();

    visited[offset(from)] = true;
    queue.push_back((from, 0));

    while let Some((pos, distance)) = queue.pop_front() {
        let neighbors: SmallVec<[Position; 4]> = STEPS.iter().map(|&step| pos + step).collect();
        for next in neighbors {
            let Some(tile) = board.get(next) else { continue };
            if !tile.is_occupiable() || tile.is_occupied() || visited[offset(next)] {
                continue;
            }
            visited[offset(next)] = true;
            reached.push((next, distance + 1));
            queue.push_back((next, distance + 1));
        }
    }

    reached
}
