//! Legal move enumeration for a board.
//!
//! For every occupied cell, pairs the piece with each reachable destination
//! that survives the rule set: settled pieces stay put unless they block a
//! misplaced piece below them, entrances and hall-to-hall moves are never
//! allowed, and a room admits only its own piece type, bottom-up, while it
//! holds no misplaced occupant.

use crate::board::{Board, Position, TileKind};
use crate::reachability::reachable_tiles;

/// All legal `(resulting board, energy cost)` pairs for `board`.
///
/// Generation order is stable: sources in row-major scan order, then
/// destinations in breadth-first reachability order.
pub fn possible_moves(board: &Board) -> Vec<(Board, u64)> {
    let mut moves = Vec::new();

    for (source, tile) in board.cells() {
        if !tile.is_occupiable() || !tile.is_occupied() {
            continue;
        }
        let Some(piece) = tile.occupant else { continue };

        // A correctly settled piece moves again only when some room cell
        // strictly below it holds a misplaced piece.
        if tile.occupant_is_correct() {
            let blocking_below = (source.row + 1..board.height() as i32).any(|row| {
                board
                    .get(Position::new(row, source.col))
                    .is_some_and(|below| {
                        matches!(below.kind, TileKind::Room { .. })
                            && below.is_occupied()
                            && !below.occupant_is_correct()
                    })
            });
            if !blocking_below {
                continue;
            }
        }

        for (destination, distance) in reachable_tiles(board, source) {
            let Some(target) = board.get(destination) else { continue };

            if target.is_entrance() {
                continue;
            }

            // Hall cells are waypoints: once parked in the hall, a piece
            // may only leave for a room.
            if matches!(tile.kind, TileKind::Hall { .. })
                && matches!(target.kind, TileKind::Hall { .. })
            {
                continue;
            }

            if let TileKind::Room { expected } = target.kind {
                if expected != piece {
                    continue;
                }
                // No null moves within the piece's own column
                if matches!(tile.kind, TileKind::Room { expected: own } if own == expected) {
                    continue;
                }
                // Rooms fill bottom-up: never stop above an empty room cell
                let below = board.get(destination + Position::new(1, 0));
                if below.is_some_and(|t| {
                    matches!(t.kind, TileKind::Room { .. }) && !t.is_occupied()
                }) {
                    continue;
                }
                // The room must not hold a misplaced piece that would be
                // blocked in by this move
                let column_dirty = board.cells().any(|(pos, t)| {
                    pos.col == destination.col
                        && matches!(t.kind, TileKind::Room { .. })
                        && t.is_occupied()
                        && !t.occupant_is_correct()
                });
                if column_dirty {
                    continue;
                }
            }

            let cost = u64::from(distance) * piece.energy_per_step();
            moves.push((board.move_occupant(source, destination), cost));
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    fn parse(lines: &[&str]) -> Board {
        Board::parse(lines).unwrap()
    }

    /// Occupant counts per piece type, A through D
    fn piece_counts(board: &Board) -> [usize; 4] {
        let mut counts = [0; 4];
        for (_, tile) in board.cells() {
            match tile.occupant {
                Some(Piece::A) => counts[0] += 1,
                Some(Piece::B) => counts[1] += 1,
                Some(Piece::C) => counts[2] += 1,
                Some(Piece::D) => counts[3] += 1,
                None => {}
            }
        }
        counts
    }

    fn swapped_ab_board() -> Board {
        parse(&[
            "#############",
            "#...........#",
            "###B#A#C#D###",
            "  #A#B#C#D#",
            "  #########",
        ])
    }

    #[test]
    fn test_sorted_board_has_no_moves() {
        let board = Board::goal_for_height(5).unwrap();
        assert!(possible_moves(&board).is_empty());
    }

    #[test]
    fn test_misplaced_top_pieces_move_to_plain_hall_cells() {
        let board = swapped_ab_board();
        let moves = possible_moves(&board);

        // Only the two misplaced top pieces can move, each to the seven
        // non-entrance hall cells; the buried pieces reach nothing and the
        // settled C/D pieces are pruned.
        assert_eq!(moves.len(), 14);

        for (next, _) in &moves {
            for col in [3, 5, 7, 9] {
                assert!(
                    !next.get(Position::new(1, col)).unwrap().is_occupied(),
                    "entrance at column {} must never be a destination",
                    col
                );
            }
        }
    }

    #[test]
    fn test_settled_piece_moves_when_blocking_a_misplaced_one() {
        let board = parse(&[
            "#############",
            "#...........#",
            "###A#B#C#D###",
            "  #B#A#C#D#",
            "  #########",
        ]);
        let moves = possible_moves(&board);

        // The correct A on top of column 3 blocks the misplaced B beneath
        // it, so it must be willing to step out; same for the B above the
        // misplaced A in column 5.
        assert_eq!(moves.len(), 14);
        assert!(moves
            .iter()
            .any(|(next, _)| !next.get(Position::new(2, 3)).unwrap().is_occupied()));
    }

    #[test]
    fn test_hall_piece_enters_own_room_once_vacated() {
        // Move the misplaced B out of column 3; the misplaced A in column 5
        // can then walk straight into the vacated top cell of column 3.
        let board = swapped_ab_board().move_occupant(Position::new(2, 3), Position::new(1, 1));
        let moves = possible_moves(&board);

        let entering = moves.iter().find(|(next, _)| {
            next.get(Position::new(2, 3)).unwrap().occupant == Some(Piece::A)
        });
        let (_, cost) = entering.expect("A should be able to enter its room");
        // 4 steps at 1 energy per step
        assert_eq!(*cost, 4);
    }

    #[test]
    fn test_hall_piece_never_moves_to_another_hall_cell() {
        // B parked at column 1, A parked at column 6, both rooms open on
        // top. B has a legal room move, so the check is not vacuous.
        let board = swapped_ab_board()
            .move_occupant(Position::new(2, 3), Position::new(1, 1))
            .move_occupant(Position::new(2, 5), Position::new(1, 6));
        let moves = possible_moves(&board);

        assert!(moves.iter().any(|(next, _)| {
            next.get(Position::new(2, 5)).unwrap().occupant == Some(Piece::B)
        }));
        for (next, _) in moves {
            // Whenever the parked B moved, it must have landed in its room
            if !next.get(Position::new(1, 1)).unwrap().is_occupied() {
                assert_eq!(
                    next.get(Position::new(2, 5)).unwrap().occupant,
                    Some(Piece::B)
                );
            }
        }
    }

    #[test]
    fn test_rooms_fill_bottom_up() {
        // Empty out column 3 entirely and park one A at each end of the
        // hall. The only legal room destination is the bottom cell.
        let board = Board::goal_for_height(5)
            .unwrap()
            .move_occupant(Position::new(2, 3), Position::new(1, 1))
            .move_occupant(Position::new(3, 3), Position::new(1, 11));
        let moves = possible_moves(&board);

        assert!(moves.iter().all(|(next, _)| {
            !next.get(Position::new(2, 3)).unwrap().is_occupied()
        }));
        let to_bottom = moves.iter().find(|(next, _)| {
            next.get(Position::new(3, 3)).unwrap().occupant == Some(Piece::A)
        });
        let (_, cost) = to_bottom.expect("bottom cell of the vacated room is legal");
        assert_eq!(*cost, 4);
    }

    #[test]
    fn test_no_entry_into_room_holding_misplaced_piece() {
        // Column 5 ends up with an empty top cell above a misplaced A;
        // the B parked in the hall must not be blocked in behind it.
        let board = Board::goal_for_height(5)
            .unwrap()
            .move_occupant(Position::new(3, 5), Position::new(1, 1))
            .move_occupant(Position::new(2, 5), Position::new(1, 2))
            .move_occupant(Position::new(3, 3), Position::new(3, 5));
        for (next, _) in possible_moves(&board) {
            assert_ne!(
                next.get(Position::new(2, 5)).unwrap().occupant,
                Some(Piece::B),
                "no B may enter column 5 while it holds a misplaced A"
            );
        }
    }

    #[test]
    fn test_moves_conserve_piece_counts() {
        let board = swapped_ab_board();
        let start_counts = piece_counts(&board);
        for (next, _) in possible_moves(&board) {
            assert_eq!(piece_counts(&next), start_counts);
        }
    }
}
