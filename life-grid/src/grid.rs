use crate::Random;
use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

/// Offsets of the eight cells surrounding a cell, row by row.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn num_cells(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, loc: Loc) -> bool {
        loc.x < self.width && loc.y < self.height
    }

    /// Converts signed coordinates, such as a raw mouse-to-grid mapping, into an in-bounds
    /// location. Anything off the grid is `None`; nothing wraps.
    pub fn loc(&self, x: i64, y: i64) -> Option<Loc> {
        let loc = Loc::new(u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        self.contains(loc).then_some(loc)
    }

    fn loc_of_index(&self, index: usize) -> Loc {
        let width = self.width as usize;
        Loc::new((index % width) as u32, (index / width) as u32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loc {
    pub x: u32,
    pub y: u32,
}

impl Loc {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn grid_index(&self, size: GridSize) -> Option<usize> {
        if size.contains(*self) {
            Some(self.y as usize * size.width as usize + self.x as usize)
        } else {
            None
        }
    }

    /// The location `(dx, dy)` away from this one, if it is still on the grid.
    pub fn offset(&self, dx: i64, dy: i64, size: GridSize) -> Option<Loc> {
        size.loc(self.x as i64 + dx, self.y as i64 + dy)
    }
}

/// Applies the B3/S23 rules to one cell, given its own state and its live neighbor count.
pub fn next_state(alive: bool, live_neighbors: u32) -> bool {
    if alive {
        (2..=3).contains(&live_neighbors)
    } else {
        live_neighbors == 3
    }
}

/// A bounded Life board.
///
/// The current generation lives in `cells`. `next_cells` is scratch space for [`Grid::step`],
/// which computes the whole next generation from the untouched current one before swapping the
/// two buffers, so no cell ever sees a neighbor from the generation being built.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: GridCells,
    next_cells: GridCells,
}

impl Grid {
    pub fn new(size: GridSize) -> Self {
        assert!(size.width > 0 && size.height > 0);
        Self {
            cells: GridCells::new(size),
            next_cells: GridCells::new(size),
        }
    }

    pub fn size(&self) -> GridSize {
        self.cells.size
    }

    pub fn num_cells(&self) -> usize {
        self.cells.num_cells()
    }

    /// Off-grid coordinates read as dead.
    pub fn get(&self, x: i64, y: i64) -> bool {
        self.size()
            .loc(x, y)
            .is_some_and(|loc| self.is_alive(loc))
    }

    /// Off-grid coordinates are ignored.
    pub fn set(&mut self, x: i64, y: i64, alive: bool) {
        if let Some(cell) = self.size().loc(x, y).and_then(|loc| self.cells.cell_mut(loc)) {
            *cell = alive;
        }
    }

    pub fn is_alive(&self, loc: Loc) -> bool {
        self.cells.cell(loc).copied().unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn step(&mut self) {
        self.update_next_cells();
        mem::swap(&mut self.next_cells, &mut self.cells);
    }

    fn update_next_cells(&mut self) {
        let size = self.size();
        for y in 0..size.height {
            for x in 0..size.width {
                let loc = Loc::new(x, y);
                let neighbors = Neighborhood::new(&self.cells, loc).num_live_neighbors();
                self.next_cells[loc] = next_state(self.cells[loc], neighbors);
            }
        }
    }

    pub fn live_neighbors(&self, loc: Loc) -> u32 {
        Neighborhood::new(&self.cells, loc).num_live_neighbors()
    }

    pub fn population(&self) -> usize {
        self.cells.cells_iter().filter(|&&alive| alive).count()
    }

    pub fn alive_cells(&self) -> impl Iterator<Item = Loc> + '_ {
        let size = self.size();
        self.cells
            .cells_iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(index, _)| size.loc_of_index(index))
    }

    pub fn for_each_alive<F>(&self, f: F)
    where
        F: FnMut(Loc),
    {
        self.alive_cells().for_each(f);
    }

    /// Replaces the board with random life, each cell alive with probability `density`.
    pub fn randomize(&mut self, rand: &mut Random, density: f64) {
        let density = density.clamp(0.0, 1.0);
        for cell in self.cells.cells_iter_mut() {
            *cell = rand.next_bool(density);
        }
    }
}

// The scratch buffer carries no state between steps.
impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Grid {}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        for y in 0..size.height {
            for x in 0..size.width {
                let symbol = if self.is_alive(Loc::new(x, y)) { '#' } else { '.' };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct GridCells {
    cells: Vec<bool>,
    size: GridSize,
}

impl GridCells {
    fn new(size: GridSize) -> Self {
        assert!(size.width != 0 && size.height != 0);
        Self {
            cells: vec![false; size.num_cells()],
            size,
        }
    }

    fn num_cells(&self) -> usize {
        self.cells.len()
    }

    fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &bool> + Clone {
        self.cells.iter()
    }

    fn cells_iter_mut(&mut self) -> impl Iterator<Item = &mut bool> {
        self.cells.iter_mut()
    }

    fn cell(&self, loc: Loc) -> Option<&bool> {
        loc.grid_index(self.size).map(|index| &self.cells[index])
    }

    fn cell_mut(&mut self, loc: Loc) -> Option<&mut bool> {
        loc.grid_index(self.size).map(|index| &mut self.cells[index])
    }

    fn fill(&mut self, alive: bool) {
        self.cells.fill(alive);
    }
}

impl Index<Loc> for GridCells {
    type Output = bool;

    fn index(&self, loc: Loc) -> &Self::Output {
        self.cell(loc)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.x, loc.y))
    }
}

impl IndexMut<Loc> for GridCells {
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        self.cell_mut(loc)
            .unwrap_or_else(|| panic!("Index_mut indices {}, {} out of bounds", loc.x, loc.y))
    }
}

/// The up-to-eight on-grid cells around `center`. Positions past an edge are skipped rather
/// than wrapped to the opposite edge.
struct Neighborhood<'a> {
    cells: &'a GridCells,
    center: Loc,
}

impl<'a> Neighborhood<'a> {
    fn new(cells: &'a GridCells, center: Loc) -> Self {
        Self { cells, center }
    }

    fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(bool),
    {
        for (dx, dy) in NEIGHBOR_OFFSETS {
            if let Some(loc) = self.center.offset(dx, dy, self.cells.size) {
                f(self.cells[loc]);
            }
        }
    }

    fn num_live_neighbors(&self) -> u32 {
        let mut result = 0;
        self.for_neighbor_cells(|alive| {
            if alive {
                result += 1;
            }
        });
        result
    }
}
