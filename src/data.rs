use std::fmt;

/// A grid site in the 1-based coordinates callers use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Site {
    pub row: usize,
    pub col: usize,
}

impl Site {
    pub fn new(row: usize, col: usize) -> Site {
        Site { row, col }
    }

    pub fn in_bounds(&self, n: usize) -> bool {
        self.row >= 1 && self.row <= n && self.col >= 1 && self.col <= n
    }

    /// Flat 0-based index `(row-1)*n + (col-1)`. The site must be in bounds.
    pub fn flat_index(&self, n: usize) -> usize {
        (self.row - 1) * n + (self.col - 1)
    }

    /// The neighbouring site one step in `d`, or `None` if it would fall off
    /// an `n`x`n` grid. The grid does not wrap.
    pub fn step_toward(&self, d: Direction, n: usize) -> Option<Site> {
        let (dr, dc) = d.offset();
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        if row < 1 || col < 1 || row > n as isize || col > n as isize {
            return None;
        }
        Some(Site::new(row as usize, col as usize))
    }

    pub fn neighbors(&self, n: usize) -> impl Iterator<Item = Site> + '_ {
        Direction::adjacent_directions()
            .iter()
            .filter_map(move |&d| self.step_toward(d, n))
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    North, East, South, West,
}

impl Direction {
    /// (row, col) delta; north is towards row 1.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub fn adjacent_directions() -> &'static [Direction; 4] {
        &[Direction::North, Direction::East,
        Direction::South, Direction::West]
    }
}
