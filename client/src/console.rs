use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use common::games::tictactoe::{
    Board, GameState, GameStatus, InvalidMove, Mark, delete_saved_game, load_game, save_game,
};
use common::log;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Finished(GameStatus),
    Saved,
    Abandoned,
}

enum Command {
    Save,
    Move(usize),
}

/// Draws the board with empty cells showing their 1-9 input numbers.
pub fn render_board(board: &Board) -> String {
    let rows: Vec<String> = board
        .rows()
        .enumerate()
        .map(|(row, marks)| {
            let cells: Vec<String> = marks
                .iter()
                .enumerate()
                .map(|(column, mark)| match mark {
                    Mark::Empty => (row * marks.len() + column + 1).to_string(),
                    Mark::X => "X".to_string(),
                    Mark::O => "O".to_string(),
                })
                .collect();
            format!(" {} ", cells.join(" | "))
        })
        .collect();
    format!("Current Board:\n{}\n", rows.join("\n---+---+---\n"))
}

pub struct ConsoleSession<R: BufRead, W: Write> {
    input: R,
    output: W,
    save_path: PathBuf,
    offer_resume: bool,
}

impl<R: BufRead, W: Write> ConsoleSession<R, W> {
    pub fn new(input: R, output: W, save_path: PathBuf, offer_resume: bool) -> Self {
        Self {
            input,
            output,
            save_path,
            offer_resume,
        }
    }

    pub fn run(&mut self) -> io::Result<SessionOutcome> {
        writeln!(self.output, "Welcome to Tic Tac Toe!")?;
        writeln!(self.output, "Player 1: X")?;
        writeln!(self.output, "Player 2: O\n")?;

        let mut state = match self.resume_saved_game()? {
            Some(state) => state,
            None => GameState::new(),
        };

        // A resumed game may already be decided.
        if state.is_over() {
            return self.finish(&state);
        }

        loop {
            write!(self.output, "{}", render_board(state.board()))?;
            let player = state.current_player();
            write!(
                self.output,
                "\nPlayer {}, enter your move (1-9) or 's' to save and exit: ",
                player.number()
            )?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output, "\nExiting. Goodbye!")?;
                return Ok(SessionOutcome::Abandoned);
            };

            let index = match parse_command(&line) {
                Some(Command::Save) => {
                    if self.save(&state)? {
                        return Ok(SessionOutcome::Saved);
                    }
                    continue;
                }
                Some(Command::Move(index)) => index,
                None => {
                    writeln!(self.output, "Please enter a number between 1 and 9, or 's' to save.")?;
                    continue;
                }
            };

            match state.apply_move(index) {
                Ok(GameStatus::InProgress) => {}
                Ok(_) => return self.finish(&state),
                Err(InvalidMove::OutOfRange(_)) => {
                    writeln!(self.output, "Invalid position. Choose a number between 1 and 9.")?;
                }
                Err(InvalidMove::Occupied(_)) => {
                    writeln!(self.output, "That cell is already taken. Choose another one.")?;
                }
                Err(InvalidMove::GameOver) => return self.finish(&state),
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    fn resume_saved_game(&mut self) -> io::Result<Option<GameState>> {
        if !self.offer_resume {
            return Ok(None);
        }

        let saved = match load_game(&self.save_path) {
            Ok(Some(state)) => state,
            Ok(None) => return Ok(None),
            Err(e) => {
                log!("Failed to load {}: {}", self.save_path.display(), e);
                writeln!(
                    self.output,
                    "The saved game could not be loaded ({}). Starting a new game.\n",
                    e
                )?;
                return Ok(None);
            }
        };

        loop {
            write!(self.output, "A saved game was found. Resume it? (y/n): ")?;
            self.output.flush()?;

            match self.read_line()?.as_deref() {
                Some("y") | Some("yes") => return Ok(Some(saved)),
                Some("n") | Some("no") | None => return Ok(None),
                Some(_) => writeln!(self.output, "Please enter 'y' or 'n'.")?,
            }
        }
    }

    /// Returns false when the file could not be written and play should go on.
    fn save(&mut self, state: &GameState) -> io::Result<bool> {
        match save_game(&self.save_path, state) {
            Ok(()) => {
                log!("Game saved to {}", self.save_path.display());
                writeln!(
                    self.output,
                    "Game state saved!\n(Current board and player turn recorded in {})",
                    self.save_path.display()
                )?;
                Ok(true)
            }
            Err(e) => {
                log!("Failed to save {}: {}", self.save_path.display(), e);
                writeln!(self.output, "Could not save the game: {}. Keep playing.", e)?;
                Ok(false)
            }
        }
    }

    fn finish(&mut self, state: &GameState) -> io::Result<SessionOutcome> {
        write!(self.output, "{}", render_board(state.board()))?;

        let status = state.status();
        match status.winner() {
            Some(winner) => writeln!(
                self.output,
                "\nPlayer {} ({}) wins! Congratulations!",
                winner.number(),
                winner
            )?,
            None => writeln!(self.output, "\nIt's a draw!")?,
        }

        if let Err(e) = delete_saved_game(&self.save_path) {
            log!("Failed to remove {}: {}", self.save_path.display(), e);
        }

        Ok(SessionOutcome::Finished(status))
    }
}

fn parse_command(line: &str) -> Option<Command> {
    if line == "s" || line == "save" {
        return Some(Command::Save);
    }
    if line.is_empty() || !line.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // Numbers too large for usize are still out of range, not malformed.
    let cell: usize = line.parse().unwrap_or(usize::MAX);
    Some(Command::Move(cell.wrapping_sub(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;

    fn get_temp_file_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_console_save_{}.txt", random_number));
        path
    }

    fn run_session(input: &str, save_path: &Path, offer_resume: bool) -> (SessionOutcome, String) {
        let mut output = Vec::new();
        let outcome = {
            let mut session = ConsoleSession::new(
                Cursor::new(input.as_bytes().to_vec()),
                &mut output,
                save_path.to_path_buf(),
                offer_resume,
            );
            session.run().unwrap()
        };
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_render_empty_board_shows_numbers() {
        let rendered = render_board(&Board::new());
        assert_eq!(
            rendered,
            "Current Board:\n 1 | 2 | 3 \n---+---+---\n 4 | 5 | 6 \n---+---+---\n 7 | 8 | 9 \n"
        );
    }

    #[test]
    fn test_render_marks() {
        let mut state = GameState::new();
        state.apply_move(0).unwrap();
        state.apply_move(4).unwrap();
        let rendered = render_board(state.board());
        assert!(rendered.contains(" X | 2 | 3 "));
        assert!(rendered.contains(" 4 | O | 6 "));
    }

    #[test]
    fn test_parse_command() {
        assert!(matches!(parse_command("s"), Some(Command::Save)));
        assert!(matches!(parse_command("save"), Some(Command::Save)));
        assert!(matches!(parse_command("5"), Some(Command::Move(4))));
        assert!(matches!(parse_command("0"), Some(Command::Move(usize::MAX))));
        assert!(matches!(parse_command("99999999999999999999999"), Some(Command::Move(_))));
        assert!(parse_command("abc").is_none());
        assert!(parse_command("-1").is_none());
        assert!(parse_command("").is_none());
    }

    #[test]
    fn test_x_wins_top_row() {
        let save_path = get_temp_file_path();
        let (outcome, output) = run_session("1\n4\n2\n5\n3\n", &save_path, true);
        assert_eq!(outcome, SessionOutcome::Finished(GameStatus::XWins));
        assert!(output.contains("Player 1 (X) wins! Congratulations!"));
    }

    #[test]
    fn test_draw() {
        let save_path = get_temp_file_path();
        let (outcome, output) = run_session("1\n2\n3\n5\n4\n6\n8\n7\n9\n", &save_path, true);
        assert_eq!(outcome, SessionOutcome::Finished(GameStatus::Draw));
        assert!(output.contains("It's a draw!"));
    }

    #[test]
    fn test_bad_input_reprompts() {
        let save_path = get_temp_file_path();
        let (outcome, output) = run_session("hello\n10\n1\n1\n", &save_path, true);
        assert_eq!(outcome, SessionOutcome::Abandoned);
        assert!(output.contains("Please enter a number between 1 and 9"));
        assert!(output.contains("Invalid position. Choose a number between 1 and 9."));
        assert!(output.contains("That cell is already taken. Choose another one."));
        assert!(output.contains("Player 2, enter your move"));
    }

    #[test]
    fn test_save_then_resume() {
        let save_path = get_temp_file_path();
        let (outcome, output) = run_session("5\n1\ns\n", &save_path, true);
        assert_eq!(outcome, SessionOutcome::Saved);
        assert!(output.contains("Game state saved!"));
        assert_eq!(
            std::fs::read_to_string(&save_path).unwrap(),
            "O,-,-\n-,X,-\n-,-,-\nPlayer Turn: 1\n"
        );

        // X completes the 3-5-7 diagonal after resuming.
        let (outcome, output) = run_session("y\n3\n2\n7\n", &save_path, true);
        assert!(output.contains("A saved game was found. Resume it? (y/n): "));
        assert_eq!(outcome, SessionOutcome::Finished(GameStatus::XWins));
        assert!(!save_path.exists());
    }

    #[test]
    fn test_failed_save_keeps_playing() {
        // A directory cannot be written as a file.
        let save_path = std::env::temp_dir();
        let (outcome, output) = run_session("5\ns\n1\n", &save_path, false);
        assert_eq!(outcome, SessionOutcome::Abandoned);
        assert!(output.contains("Could not save the game"));
        assert!(!output.contains("Game state saved!"));
        assert!(output.contains(" O | 2 | 3 "));
        assert!(output.contains(" 4 | X | 6 "));
        assert!(output.contains("Player 1, enter your move"));
    }

    #[test]
    fn test_decline_resume_starts_fresh() {
        let save_path = get_temp_file_path();
        std::fs::write(&save_path, "X,-,-\n-,-,-\n-,-,-\nPlayer Turn: 2\n").unwrap();

        let (_, output) = run_session("maybe\nn\n", &save_path, true);
        assert!(output.contains("Please enter 'y' or 'n'."));
        assert!(output.contains("Player 1, enter your move"));
        assert!(save_path.exists());

        delete_saved_game(&save_path).unwrap();
    }

    #[test]
    fn test_corrupt_save_offers_new_game() {
        let save_path = get_temp_file_path();
        std::fs::write(&save_path, "X,X,X\nX,X,O\nO,-,-\nPlayer Turn: 2\n").unwrap();

        let (outcome, output) = run_session("", &save_path, true);
        assert_eq!(outcome, SessionOutcome::Abandoned);
        assert!(output.contains("could not be loaded"));
        assert!(output.contains("Player 1, enter your move"));

        delete_saved_game(&save_path).unwrap();
    }

    #[test]
    fn test_resume_disabled_ignores_save_file() {
        let save_path = get_temp_file_path();
        std::fs::write(&save_path, "X,-,-\n-,-,-\n-,-,-\nPlayer Turn: 2\n").unwrap();

        let (_, output) = run_session("", &save_path, false);
        assert!(!output.contains("Resume it?"));

        delete_saved_game(&save_path).unwrap();
    }
}
