// Copyright 2025 Lars Brubaker
//
// Boundary iteration over a half-edge cycle.
//
// A Ring is an explicit cursor (current, head, direction). It yields `head`
// first, then follows `next` (or `prev`) and stops as soon as the cursor comes
// back to `head`, so every member of a closed cycle is produced exactly once.
// It does not detect cycles that never return to `head`; use the validity
// checks for that.

use crate::mesh::{EdgeIdx, Mesh, INVALID};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Follow `next`.
    Forward,
    /// Follow `prev`.
    Backward,
}

#[derive(Clone, Debug)]
pub struct Ring<'a> {
    mesh: &'a Mesh,
    head: EdgeIdx,
    current: EdgeIdx,
    direction: Direction,
}

impl<'a> Ring<'a> {
    pub fn new(mesh: &'a Mesh, head: EdgeIdx, direction: Direction) -> Self {
        let current = if mesh.contains(head) { head } else { INVALID };
        Ring {
            mesh,
            head,
            current,
            direction,
        }
    }
}

impl Iterator for Ring<'_> {
    type Item = EdgeIdx;

    fn next(&mut self) -> Option<EdgeIdx> {
        let he = self.mesh.get(self.current)?;
        let out = self.current;
        let step = match self.direction {
            Direction::Forward => he.next,
            Direction::Backward => he.prev,
        };
        // A null link ends the walk early; so does arriving back at head.
        self.current = if step == self.head || !self.mesh.contains(step) {
            INVALID
        } else {
            step
        };
        Some(out)
    }
}
