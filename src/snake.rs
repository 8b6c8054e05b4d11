//! The snake entity: an ordered run of cells, head first.

use std::collections::VecDeque;

use crate::{Cell, Playfield};

/// Body length every snake spawns with.
pub const SPAWN_LENGTH: usize = 3;

/// Ordered body cells, head at the front. While the snake is alive the
/// cells are pairwise distinct and all within playfield bounds.
#[derive(Clone, Debug)]
pub struct Snake {
    cells: VecDeque<Cell>,
}

impl Snake {
    /// Spawn a [`SPAWN_LENGTH`]-cell snake centered on the playfield, with
    /// the body trailing off to the left of the head.
    pub fn spawn_centered(field: &Playfield) -> Self {
        let head = field.center();
        let cells = (0..SPAWN_LENGTH as i32)
            .map(|i| Cell::new(head.x - i, head.y))
            .collect();
        Self { cells }
    }

    #[inline]
    pub fn head(&self) -> Cell {
        // Non-empty by construction; spawn_centered is the only way in.
        self.cells[0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `true` iff any body cell (head included) occupies `cell`.
    pub fn occupies(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Head-to-tail iteration for rendering and food placement.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Advance by prepending `new_head`. The tail cell is kept when
    /// `grow` is set, so the body gains exactly one cell; otherwise it is
    /// dropped and the length is unchanged.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.cells.push_front(new_head);
        if !grow {
            self.cells.pop_back();
        }
    }
}

// ---------- tests ----------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, Playfield};

    #[test]
    fn spawns_centered_heading_right() {
        let field = Playfield::walled(40, 28);
        let snake = Snake::spawn_centered(&field);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(20, 14));
        let cells: Vec<_> = snake.cells().collect();
        assert_eq!(cells, vec![Cell::new(20, 14), Cell::new(19, 14), Cell::new(18, 14)]);
    }

    #[test]
    fn advance_shifts_every_cell() {
        let field = Playfield::walled(40, 28);
        let mut snake = Snake::spawn_centered(&field);
        let head = snake.head();

        snake.advance(head.offset(Direction::Right), false);

        let cells: Vec<_> = snake.cells().collect();
        assert_eq!(cells, vec![Cell::new(21, 14), Cell::new(20, 14), Cell::new(19, 14)]);
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn advance_with_growth_keeps_tail() {
        let field = Playfield::walled(40, 28);
        let mut snake = Snake::spawn_centered(&field);
        let tail = snake.cells().last().unwrap();

        snake.advance(snake.head().offset(Direction::Right), true);

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.cells().last().unwrap(), tail);
    }

    #[test]
    fn occupies_covers_head_and_body() {
        let field = Playfield::walled(40, 28);
        let snake = Snake::spawn_centered(&field);
        assert!(snake.occupies(Cell::new(20, 14)));
        assert!(snake.occupies(Cell::new(18, 14)));
        assert!(!snake.occupies(Cell::new(21, 14)));
    }
}
