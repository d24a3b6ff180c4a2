//! Render bridge: per-button coordinate cells
//!
//! The gallery writes every button's position into its own cell once per
//! frame. A write is O(1) and only bumps that cell's version when the value
//! actually changed. Each DOM element holds a [`CellReader`] for its own cell
//! and repositions itself only when its reader reports a change, so the
//! container view is never rebuilt.
//!
//! Cells are `Rc`/`Cell` based: the browser runs the frame loop on one thread.
//! A multi-threaded host would need a single-writer/snapshot-read scheme here.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

use crate::sim::ParticleStore;

/// Observable position of one button
#[derive(Debug)]
pub struct CoordinateCell {
    pos: Cell<Vec2>,
    version: Cell<u64>,
}

impl CoordinateCell {
    fn new(pos: Vec2) -> Self {
        Self {
            pos: Cell::new(pos),
            version: Cell::new(0),
        }
    }

    #[inline]
    pub fn get(&self) -> Vec2 {
        self.pos.get()
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    /// Store a new position; returns whether it differed from the old one
    #[inline]
    fn set(&self, pos: Vec2) -> bool {
        if self.pos.get() == pos {
            return false;
        }
        self.pos.set(pos);
        self.version.set(self.version.get().wrapping_add(1));
        true
    }
}

/// Read-only handle to one cell, remembering the last version it saw
#[derive(Debug, Clone)]
pub struct CellReader {
    cell: Rc<CoordinateCell>,
    seen: Option<u64>,
}

impl CellReader {
    /// Current position, regardless of whether it changed
    pub fn get(&self) -> Vec2 {
        self.cell.get()
    }

    /// New position if the cell changed since the last poll
    ///
    /// The first poll on a fresh reader always yields, so a newly bound
    /// element gets placed.
    pub fn poll(&mut self) -> Option<Vec2> {
        let version = self.cell.version();
        if self.seen == Some(version) {
            return None;
        }
        self.seen = Some(version);
        Some(self.cell.get())
    }
}

/// One coordinate cell per particle, in particle index order
#[derive(Debug, Default)]
pub struct RenderBridge {
    cells: Vec<Rc<CoordinateCell>>,
    frames: u64,
}

impl RenderBridge {
    pub fn new(count: usize) -> Self {
        Self {
            cells: (0..count)
                .map(|_| Rc::new(CoordinateCell::new(Vec2::ZERO)))
                .collect(),
            frames: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of publishes so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Handle for binding a presentation element to button `index`
    pub fn reader(&self, index: usize) -> Option<CellReader> {
        self.cells.get(index).map(|cell| CellReader {
            cell: Rc::clone(cell),
            seen: None,
        })
    }

    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.cells.get(index).map(|cell| cell.get())
    }

    /// Copy the store's final positions into the cells
    ///
    /// Returns how many cells changed.
    pub fn publish(&mut self, store: &ParticleStore) -> usize {
        let mut changed = 0;
        for (cell, pos) in self.cells.iter().zip(store.positions()) {
            if cell.set(pos) {
                changed += 1;
            }
        }
        self.frames += 1;
        changed
    }

    /// Read-only copy of every published position
    pub fn snapshot(&self) -> Vec<Vec2> {
        self.cells.iter().map(|cell| cell.get()).collect()
    }
}
