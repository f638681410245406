use crossterm::style::Color;

/// A single cell of a frame, either alive or dead.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Cell {
    alive: bool,
}

impl Cell {
    pub fn new(alive: bool) -> Cell {
        Cell { alive }
    }

    pub fn alive() -> Cell {
        Cell::new(true)
    }

    pub fn dead() -> Cell {
        Cell::new(false)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn set(&mut self, alive: bool) {
        self.alive = alive;
    }

    pub fn toggle(&mut self) {
        self.alive = !self.alive;
    }

    /// Parses the character used for a cell in `.golh` files.
    pub fn from_char(value: char) -> Option<Cell> {
        match value {
            'O' => Some(Cell::alive()),
            '.' => Some(Cell::dead()),
            _ => None,
        }
    }

    pub fn char(&self) -> char {
        match self.alive {
            true => 'O',
            false => '.',
        }
    }

    pub fn color(&self) -> Color {
        match self.alive {
            true => Color::Green,
            false => Color::DarkGrey,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        Cell::new(alive)
    }
}

impl From<Cell> for bool {
    fn from(cell: Cell) -> Self {
        cell.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_creating_a_default_cell_it_is_dead() {
        assert!(!Cell::default().is_alive());
    }

    #[test]
    fn when_setting_a_cell_the_new_value_is_kept() {
        let mut cell = Cell::dead();
        cell.set(true);

        assert!(cell.is_alive());

        cell.set(false);

        assert!(!cell.is_alive());
    }

    #[test]
    fn when_toggling_a_cell_its_state_is_flipped() {
        let mut cell = Cell::alive();
        cell.toggle();

        assert_eq!(cell, Cell::dead());
    }

    #[test]
    fn when_parsing_cell_characters_only_o_and_dot_are_accepted() {
        assert_eq!(Cell::from_char('O'), Some(Cell::alive()));
        assert_eq!(Cell::from_char('.'), Some(Cell::dead()));
        assert_eq!(Cell::from_char('o'), None);
        assert_eq!(Cell::from_char('*'), None);
    }

    #[test]
    fn when_converting_a_cell_to_a_char_it_matches_the_file_format() {
        assert_eq!(Cell::alive().char(), 'O');
        assert_eq!(Cell::dead().char(), '.');
    }

    #[test]
    fn when_converting_between_cells_and_booleans_the_state_is_preserved() {
        assert!(bool::from(Cell::from(true)));
        assert!(!bool::from(Cell::from(false)));
    }
}
