//! Pure state transitions for one game.
//!
//! These functions are the only code that mutates a [`Game`]. They do no
//! I/O and take no locks; callers load the game from the store, apply a
//! transition under the room's mutual-exclusion guard, and persist the
//! result. That split keeps the rules testable without any transport or
//! storage in the loop.
//!
//! Each successful transition returns the human-readable message that the
//! room broadcast carries alongside the new snapshot.

use parlor_types::{Board, Game, GameSnapshot, GameStatus, Mark, UserId};

use crate::error::{JoinError, MoveError};

/// The eight winning lines: three rows, three columns, two diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Seat `actor` as the challenger and activate the game.
///
/// # Errors
///
/// Returns [`JoinError::NotEligible`] if `actor` owns the room or the
/// challenger seat is already taken.
pub fn apply_join(game: &mut Game, actor: UserId) -> Result<String, JoinError> {
    if actor == game.owner || game.challenger.is_some() {
        return Err(JoinError::NotEligible);
    }
    game.challenger = Some(actor);
    game.status = GameStatus::Active;
    Ok("A challenger joined the game".to_string())
}

/// Claim the cell at `position` for `actor` and recompute the outcome.
///
/// On success exactly one cell is written; the status is then derived
/// from the board (win, draw, or still active) and the turn flips only
/// when the game continues. On any error the game is untouched.
///
/// # Errors
///
/// The first failing check wins: [`MoveError::OutOfRange`],
/// [`MoveError::NotAPlayer`], [`MoveError::GameNotActive`],
/// [`MoveError::CellOccupied`], [`MoveError::NotYourTurn`].
pub fn apply_move(game: &mut Game, actor: UserId, position: usize) -> Result<String, MoveError> {
    let Some(cell) = game.board.cell(position) else {
        return Err(MoveError::OutOfRange);
    };
    let Some(mark) = game.mark_of(actor) else {
        return Err(MoveError::NotAPlayer);
    };
    if !game.status.is_active() {
        return Err(MoveError::GameNotActive);
    }
    if !cell.is_empty() {
        return Err(MoveError::CellOccupied);
    }
    if mark != game.current_mark {
        return Err(MoveError::NotYourTurn);
    }

    game.board.set(position, mark.cell());

    if let Some(winning) = winner(&game.board) {
        game.status = GameStatus::won_by(winning);
        return Ok(format!("{winning} wins the game"));
    }
    if game.board.is_full() {
        game.status = GameStatus::Draw;
        return Ok("The game ends in a draw".to_string());
    }
    game.current_mark = mark.other();
    Ok(format!("{mark} claimed cell {position}"))
}

/// Project the authoritative snapshot of `game`.
///
/// With a `viewer`, the snapshot carries the viewer-relative fields
/// (`is_player`, `player_mark`); without one it carries only the shared
/// state, the shape every broadcast uses. Pure: safe to call while reads
/// of the same game are in flight.
pub fn snapshot(game: &Game, viewer: Option<UserId>) -> GameSnapshot {
    let is_player = viewer.map(|user| game.is_player(user));
    let player_mark = viewer.and_then(|user| game.mark_of(user));
    GameSnapshot {
        id: game.id,
        room_name: game.room_name.clone(),
        board: game.board,
        current_player: game.current_mark,
        status: game.status,
        owner_id: game.owner,
        challenger_id: game.challenger,
        is_player,
        player_mark,
    }
}

/// The mark holding a completed line, if any.
pub fn winner(board: &Board) -> Option<Mark> {
    WIN_LINES.iter().find_map(|line| {
        let [a, b, c] = *line;
        let first = board.cell(a)?.mark()?;
        if board.cell(b)?.mark() == Some(first) && board.cell(c)?.mark() == Some(first) {
            Some(first)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::indexing_slicing)]

    use parlor_types::Cell;

    use super::*;

    /// A fresh game with both seats filled and X to move.
    fn make_active_game() -> (Game, UserId, UserId) {
        let owner = UserId::new();
        let challenger = UserId::new();
        let mut game = Game::new("lounge", owner);
        apply_join(&mut game, challenger).unwrap();
        (game, owner, challenger)
    }

    /// Play a sequence of (actor, position) moves, asserting each succeeds.
    fn play(game: &mut Game, moves: &[(UserId, usize)]) {
        for (actor, position) in moves {
            apply_move(game, *actor, *position).unwrap();
        }
    }

    // -- joining ------------------------------------------------------------

    #[test]
    fn join_seats_challenger_and_activates() {
        let owner = UserId::new();
        let challenger = UserId::new();
        let mut game = Game::new("lounge", owner);

        apply_join(&mut game, challenger).unwrap();

        assert_eq!(game.challenger, Some(challenger));
        assert_eq!(game.status, GameStatus::Active);
        assert_eq!(game.current_mark, Mark::X);
    }

    #[test]
    fn owner_cannot_join_own_game() {
        let owner = UserId::new();
        let mut game = Game::new("lounge", owner);
        assert_eq!(apply_join(&mut game, owner), Err(JoinError::NotEligible));
        assert_eq!(game.status, GameStatus::WaitingForChallenger);
    }

    #[test]
    fn second_challenger_is_rejected() {
        let (mut game, _, _) = make_active_game();
        let latecomer = UserId::new();
        assert_eq!(apply_join(&mut game, latecomer), Err(JoinError::NotEligible));
    }

    // -- move validation ----------------------------------------------------

    #[test]
    fn move_out_of_range_is_rejected() {
        let (mut game, x, _) = make_active_game();
        assert_eq!(apply_move(&mut game, x, 9), Err(MoveError::OutOfRange));
        assert_eq!(game.board.filled_count(), 0);
    }

    #[test]
    fn spectator_cannot_move() {
        let (mut game, _, _) = make_active_game();
        let spectator = UserId::new();
        assert_eq!(
            apply_move(&mut game, spectator, 0),
            Err(MoveError::NotAPlayer)
        );
    }

    #[test]
    fn no_moves_while_waiting_for_challenger() {
        let owner = UserId::new();
        let mut game = Game::new("lounge", owner);
        assert_eq!(
            apply_move(&mut game, owner, 0),
            Err(MoveError::GameNotActive)
        );
    }

    #[test]
    fn out_of_turn_move_leaves_game_untouched() {
        let (mut game, _, o) = make_active_game();
        let before = game.clone();

        assert_eq!(apply_move(&mut game, o, 4), Err(MoveError::NotYourTurn));
        assert_eq!(game, before);
    }

    #[test]
    fn occupied_cell_is_rejected_before_turn_check() {
        // The same player racing themselves (a double-click) must see
        // CellOccupied on the second attempt, not NotYourTurn.
        let (mut game, x, _) = make_active_game();
        apply_move(&mut game, x, 4).unwrap();
        assert_eq!(apply_move(&mut game, x, 4), Err(MoveError::CellOccupied));
    }

    // -- accepted moves -----------------------------------------------------

    #[test]
    fn each_accepted_move_fills_exactly_one_cell_and_flips_turn() {
        let (mut game, x, o) = make_active_game();
        // A full draw sequence: no line ever completes.
        let moves = [
            (x, 0),
            (o, 1),
            (x, 2),
            (o, 4),
            (x, 3),
            (o, 5),
            (x, 7),
            (o, 6),
            (x, 8),
        ];
        for (n, (actor, position)) in moves.iter().enumerate() {
            let expected_mark = if n % 2 == 0 { Mark::X } else { Mark::O };
            assert_eq!(game.current_mark, expected_mark);
            apply_move(&mut game, *actor, *position).unwrap();
            assert_eq!(game.board.filled_count(), n + 1);
        }
        assert_eq!(game.status, GameStatus::Draw);
    }

    #[test]
    fn draw_is_declared_only_when_board_is_full() {
        let (mut game, x, o) = make_active_game();
        play(
            &mut game,
            &[(x, 0), (o, 1), (x, 2), (o, 4), (x, 3), (o, 5), (x, 7), (o, 6)],
        );
        assert_eq!(game.status, GameStatus::Active);

        apply_move(&mut game, x, 8).unwrap();
        assert_eq!(game.status, GameStatus::Draw);
    }

    // -- win detection ------------------------------------------------------

    #[test]
    fn every_line_wins_for_either_mark() {
        for line in &WIN_LINES {
            for mark in [Mark::X, Mark::O] {
                let mut board = Board::default();
                for position in line {
                    board.set(*position, mark.cell());
                }
                assert_eq!(winner(&board), Some(mark), "line {line:?} mark {mark}");
            }
        }
    }

    #[test]
    fn no_winner_on_mixed_lines() {
        let mut board = Board::default();
        board.set(0, Cell::X);
        board.set(1, Cell::O);
        board.set(2, Cell::X);
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn winning_move_ends_the_game() {
        let (mut game, x, o) = make_active_game();
        play(&mut game, &[(x, 0), (o, 3), (x, 1), (o, 4)]);

        let message = apply_move(&mut game, x, 2).unwrap();
        assert_eq!(game.status, GameStatus::XWon);
        assert_eq!(message, "X wins the game");

        // A subsequent move to any empty cell is rejected.
        assert_eq!(apply_move(&mut game, o, 5), Err(MoveError::GameNotActive));
    }

    #[test]
    fn challenger_can_win() {
        let (mut game, x, o) = make_active_game();
        play(&mut game, &[(x, 0), (o, 3), (x, 1), (o, 4), (x, 8)]);

        apply_move(&mut game, o, 5).unwrap();
        assert_eq!(game.status, GameStatus::OWon);
    }

    // -- the worked room example --------------------------------------------

    #[test]
    fn room_abc_walkthrough() {
        let u1 = UserId::new();
        let u2 = UserId::new();
        let mut game = Game::new("abc", u1);

        apply_join(&mut game, u2).unwrap();
        assert_eq!(game.status, GameStatus::Active);
        assert_eq!(game.current_mark, Mark::X);

        apply_move(&mut game, u1, 0).unwrap();
        assert_eq!(game.board.cell(0), Some(Cell::X));
        assert_eq!(game.current_mark, Mark::O);
        assert_eq!(game.status, GameStatus::Active);

        assert_eq!(apply_move(&mut game, u2, 0), Err(MoveError::CellOccupied));
        assert_eq!(game.board.filled_count(), 1);

        apply_move(&mut game, u2, 4).unwrap();
        assert_eq!(game.board.cell(4), Some(Cell::O));
        assert_eq!(game.current_mark, Mark::X);
        assert_eq!(game.status, GameStatus::Active);
    }

    // -- snapshots ----------------------------------------------------------

    #[test]
    fn snapshot_without_viewer_omits_viewer_fields() {
        let (game, _, _) = make_active_game();
        let snap = snapshot(&game, None);
        assert_eq!(snap.is_player, None);
        assert_eq!(snap.player_mark, None);
        assert_eq!(snap.owner_id, game.owner);
        assert_eq!(snap.challenger_id, game.challenger);
    }

    #[test]
    fn snapshot_for_player_carries_their_mark() {
        let (game, x, o) = make_active_game();
        let for_x = snapshot(&game, Some(x));
        assert_eq!(for_x.is_player, Some(true));
        assert_eq!(for_x.player_mark, Some(Mark::X));

        let for_o = snapshot(&game, Some(o));
        assert_eq!(for_o.player_mark, Some(Mark::O));
    }

    #[test]
    fn snapshot_for_spectator_is_not_a_player() {
        let (game, _, _) = make_active_game();
        let snap = snapshot(&game, Some(UserId::new()));
        assert_eq!(snap.is_player, Some(false));
        assert_eq!(snap.player_mark, None);
    }
}
