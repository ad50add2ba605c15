use super::types::Mark;

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Row-major 3x3 grid. Index `i` is shown as cell `i + 1` on the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; CELL_COUNT],
        }
    }

    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Mark]> {
        self.cells.chunks(BOARD_SIZE)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Mark::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn relabeled(&self) -> Board {
        let mut cells = self.cells;
        for cell in cells.iter_mut() {
            *cell = cell.relabeled();
        }
        Board { cells }
    }

    pub(super) fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }
}
