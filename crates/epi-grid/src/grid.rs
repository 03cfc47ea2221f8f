//! `MultiGrid` — a width × height torus where each cell holds any number of
//! agents.
//!
//! # Layout
//!
//! Cells are stored row-major in a flat `Vec`: cell `(x, y)` lives at
//! `y * width + x`.  Each cell keeps its occupants in arrival order, so
//! iterating a cell is deterministic for a given history of moves.  A
//! reverse index (`AgentId → Position`) makes `move_agent` O(cell size)
//! without the caller having to supply the old position.

use rustc_hash::FxHashMap;

use epi_core::{AgentId, SimRng};

use crate::{GridError, GridResult, Position};

/// Moore offsets in the order neighbors are reported: dx outer, dy inner.
const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Toroidal multi-occupancy grid.
#[derive(Debug, Clone)]
pub struct MultiGrid {
    width:   u32,
    height:  u32,
    cells:   Vec<Vec<AgentId>>,
    located: FxHashMap<AgentId, Position>,
}

impl MultiGrid {
    /// Create an empty `width × height` grid.
    pub fn new(width: u32, height: u32) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        let cell_count = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            cells: vec![Vec::new(); cell_count],
            located: FxHashMap::default(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of agents currently placed.
    #[inline]
    pub fn len(&self) -> usize {
        self.located.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.located.is_empty()
    }

    /// `true` if `pos` lies inside the grid extents.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Wrap arbitrary signed coordinates onto the torus.
    pub fn wrap(&self, x: i64, y: i64) -> Position {
        Position::new(
            x.rem_euclid(self.width as i64) as u32,
            y.rem_euclid(self.height as i64) as u32,
        )
    }

    /// A uniformly random cell.
    pub fn random_position(&self, rng: &mut SimRng) -> Position {
        Position::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Put `agent` into the cell at `pos`.
    pub fn place(&mut self, agent: AgentId, pos: Position) -> GridResult<()> {
        let idx = self.cell_index(pos)?;
        if self.located.contains_key(&agent) {
            return Err(GridError::AlreadyPlaced(agent));
        }
        self.cells[idx].push(agent);
        self.located.insert(agent, pos);
        Ok(())
    }

    /// Move `agent` from wherever it is to `to`, returning `to`.
    ///
    /// The target must already be inside the grid; callers obtain wrapped
    /// targets from [`neighbors`](Self::neighbors).  On error nothing changes.
    pub fn move_agent(&mut self, agent: AgentId, to: Position) -> GridResult<Position> {
        let to_idx = self.cell_index(to)?;
        let from = self.position_of(agent).ok_or(GridError::NotPlaced(agent))?;
        if from == to {
            return Ok(to);
        }
        let from_idx = self.cell_index(from)?;

        let cell = &mut self.cells[from_idx];
        if let Some(i) = cell.iter().position(|&a| a == agent) {
            cell.remove(i);
        }
        self.cells[to_idx].push(agent);
        self.located.insert(agent, to);
        Ok(to)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Where `agent` currently is, if placed.
    #[inline]
    pub fn position_of(&self, agent: AgentId) -> Option<Position> {
        self.located.get(&agent).copied()
    }

    /// Every agent in the cell at `pos`, in arrival order (includes the
    /// caller if it stands there).
    pub fn occupants(&self, pos: Position) -> GridResult<&[AgentId]> {
        let idx = self.cell_index(pos)?;
        Ok(&self.cells[idx])
    }

    /// The Moore neighborhood of `pos`: up to eight distinct cells around
    /// it, wrapping at the edges, never including `pos` itself.
    ///
    /// Grids narrower or shorter than three cells produce fewer neighbors
    /// because wrapped offsets coincide; a 1 × 1 grid has none.
    pub fn neighbors(&self, pos: Position) -> GridResult<Vec<Position>> {
        self.cell_index(pos)?;
        let mut out: Vec<Position> = Vec::with_capacity(MOORE_OFFSETS.len());
        for (dx, dy) in MOORE_OFFSETS {
            let n = self.wrap(pos.x as i64 + dx, pos.y as i64 + dy);
            if n != pos && !out.contains(&n) {
                out.push(n);
            }
        }
        Ok(out)
    }

    /// `true` if `b` is in the Moore neighborhood of `a`.
    pub fn are_neighbors(&self, a: Position, b: Position) -> bool {
        self.neighbors(a).map(|ns| ns.contains(&b)).unwrap_or(false)
    }

    fn cell_index(&self, pos: Position) -> GridResult<usize> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds {
                position: pos,
                width:    self.width,
                height:   self.height,
            });
        }
        Ok(pos.y as usize * self.width as usize + pos.x as usize)
    }
}
