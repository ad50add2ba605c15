use super::board::Board;
use super::types::{GameStatus, Mark};

pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns true when some line is filled with `mark`.
pub fn has_line(board: &Board, mark: Mark) -> bool {
    if mark == Mark::Empty {
        return false;
    }

    let cells = board.cells();
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&index| cells[index] == mark))
}

pub fn evaluate_status(board: &Board) -> GameStatus {
    if has_line(board, Mark::X) {
        return GameStatus::XWins;
    }
    if has_line(board, Mark::O) {
        return GameStatus::OWins;
    }
    if board.is_full() {
        return GameStatus::Draw;
    }
    GameStatus::InProgress
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Mark = Mark::Empty;
    const X: Mark = Mark::X;
    const O: Mark = Mark::O;

    fn relabel_status(status: GameStatus) -> GameStatus {
        match status {
            GameStatus::XWins => GameStatus::OWins,
            GameStatus::OWins => GameStatus::XWins,
            other => other,
        }
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate_status(&Board::new()), GameStatus::InProgress);
    }

    #[test]
    fn test_every_line_wins() {
        for line in WINNING_LINES {
            let mut cells = [E; 9];
            for index in line {
                cells[index] = O;
            }
            assert_eq!(
                evaluate_status(&Board::from_cells(cells)),
                GameStatus::OWins,
                "line {:?}",
                line
            );
        }
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        #[rustfmt::skip]
        let board = Board::from_cells([
            X, O, X,
            X, O, O,
            O, X, X,
        ]);
        assert_eq!(evaluate_status(&board), GameStatus::Draw);
    }

    #[test]
    fn test_win_on_full_board_beats_draw() {
        #[rustfmt::skip]
        let board = Board::from_cells([
            X, X, X,
            O, O, X,
            X, O, O,
        ]);
        assert_eq!(evaluate_status(&board), GameStatus::XWins);
    }

    #[test]
    fn test_broken_line_is_not_a_win() {
        #[rustfmt::skip]
        let board = Board::from_cells([
            X, X, O,
            E, E, E,
            E, E, E,
        ]);
        assert_eq!(evaluate_status(&board), GameStatus::InProgress);
    }

    #[test]
    fn test_relabeling_is_symmetric() {
        let boards = [
            Board::from_cells([X, X, X, O, O, E, E, E, E]),
            Board::from_cells([O, X, E, O, X, E, O, E, X]),
            Board::from_cells([X, O, X, X, O, O, O, X, X]),
            Board::from_cells([X, E, E, E, O, E, E, E, E]),
            Board::from_cells([E, E, O, X, O, X, O, E, X]),
        ];
        for board in boards {
            assert_eq!(
                evaluate_status(&board.relabeled()),
                relabel_status(evaluate_status(&board))
            );
        }
    }
}
