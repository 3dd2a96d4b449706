//=========================================================================
// Grid
//=========================================================================
//
// Flat row-major array of cells with a permanent wall border.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::direction::Direction;

//=== Constants ===========================================================

/// Smallest arena that still has one playable interior cell.
pub const MIN_EXTENT: u32 = 3;

//=== Point ===============================================================

/// Integer cell coordinate. `(0, 0)` is the top-left wall corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

//=== Cell ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Snake,
    Fruit,
}

//=== Grid ================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty arena enclosed by walls.
    ///
    /// Extents below [`MIN_EXTENT`] are raised to it.
    pub fn walled(width: u32, height: u32) -> Self {
        let width = width.max(MIN_EXTENT);
        let height = height.max(MIN_EXTENT);

        let mut grid = Self {
            width,
            height,
            cells: vec![Cell::Empty; (width * height) as usize],
        };

        for y in 0..height as i32 {
            grid.set(Point::new(0, y), Cell::Wall);
            grid.set(Point::new(width as i32 - 1, y), Cell::Wall);
        }
        for x in 0..width as i32 {
            grid.set(Point::new(x, 0), Cell::Wall);
            grid.set(Point::new(x, height as i32 - 1), Cell::Wall);
        }

        grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, at: Point) -> Option<usize> {
        if at.x < 0 || at.y < 0 || at.x >= self.width as i32 || at.y >= self.height as i32 {
            return None;
        }
        Some(at.y as usize * self.width as usize + at.x as usize)
    }

    /// Reads a cell. Coordinates outside the arena read as `Wall`.
    pub fn get(&self, at: Point) -> Cell {
        self.index(at).map_or(Cell::Wall, |i| self.cells[i])
    }

    /// Writes a cell. Writes outside the arena are ignored.
    pub fn set(&mut self, at: Point, cell: Cell) {
        if let Some(i) = self.index(at) {
            self.cells[i] = cell;
        }
    }

    pub fn contains(&self, at: Point) -> bool {
        self.index(at).is_some()
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Coordinates of every cell holding `cell`, in row-major order.
    pub fn positions_of(&self, cell: Cell) -> Vec<Point> {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == cell)
            .map(|(i, _)| Point::new((i % width) as i32, (i / width) as i32))
            .collect()
    }

    /// Iterates `(point, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (Point::new((i % width) as i32, (i / width) as i32), c))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
