//! Vertex data registries.
//!
//! Positions, index triples and colors are uploaded once and referred to by
//! [`BufferId`] afterwards. The three registries draw their ids from **one
//! shared counter**, so ids interleave across kinds: on a fresh instance,
//! loading positions, indices and colors yields ids 0, 1 and 2. Stored data is
//! never modified or removed; uploading again creates a new id.

use std::collections::HashMap;
use std::fmt;

use crate::colors::Color;
use crate::error::{Error, Result};
use crate::math::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub usize);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferKind {
    Positions,
    Indices,
    Colors,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferKind::Positions => write!(f, "positions"),
            BufferKind::Indices => write!(f, "indices"),
            BufferKind::Colors => write!(f, "colors"),
        }
    }
}

#[derive(Debug, Default)]
pub struct BufferRegistry {
    positions: HashMap<BufferId, Vec<Vec3>>,
    indices: HashMap<BufferId, Vec<[usize; 3]>>,
    colors: HashMap<BufferId, Vec<Color>>,
    next_id: usize,
}

impl BufferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next upload of any kind will receive.
    pub fn next_id(&self) -> BufferId {
        BufferId(self.next_id)
    }

    fn allocate(&mut self) -> BufferId {
        let id = BufferId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn load_positions(&mut self, positions: Vec<Vec3>) -> BufferId {
        let id = self.allocate();
        self.positions.insert(id, positions);
        id
    }

    pub fn load_indices(&mut self, indices: Vec<[usize; 3]>) -> BufferId {
        let id = self.allocate();
        self.indices.insert(id, indices);
        id
    }

    pub fn load_colors(&mut self, colors: Vec<Color>) -> BufferId {
        let id = self.allocate();
        self.colors.insert(id, colors);
        id
    }

    pub fn positions(&self, id: BufferId) -> Result<&[Vec3]> {
        self.positions
            .get(&id)
            .map(Vec::as_slice)
            .ok_or(Error::BufferNotFound {
                kind: BufferKind::Positions,
                id,
            })
    }

    pub fn indices(&self, id: BufferId) -> Result<&[[usize; 3]]> {
        self.indices
            .get(&id)
            .map(Vec::as_slice)
            .ok_or(Error::BufferNotFound {
                kind: BufferKind::Indices,
                id,
            })
    }

    pub fn colors(&self, id: BufferId) -> Result<&[Color]> {
        self.colors
            .get(&id)
            .map(Vec::as_slice)
            .ok_or(Error::BufferNotFound {
                kind: BufferKind::Colors,
                id,
            })
    }
}
