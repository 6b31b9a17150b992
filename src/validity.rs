// Copyright 2025 Lars Brubaker
//
// Validity checks for a half-edge ring.
//
// The checks run in a fixed order and stop at the first failure: later checks
// iterate the ring and rely on the earlier ones having proven it closes.

use std::collections::HashSet;

use log::debug;

use crate::error::ValidityError;
use crate::geom::Point;
use crate::mesh::{EdgeIdx, Mesh};
use crate::ring::Direction;

/// Check that `h` anchors a well-formed, simple polygon.
pub fn check_validity(mesh: &Mesh, h: EdgeIdx) -> Result<(), ValidityError> {
    let result = check_all(mesh, h);
    if let Err(ref err) = result {
        debug!("half-edge {} rejected: {}", h, err);
    }
    result
}

/// Boolean form of [`check_validity`].
pub fn is_valid(mesh: &Mesh, h: EdgeIdx) -> bool {
    check_validity(mesh, h).is_ok()
}

fn check_all(mesh: &Mesh, h: EdgeIdx) -> Result<(), ValidityError> {
    if !mesh.contains(h) {
        return Err(ValidityError::NotAHalfEdge(h));
    }
    if !forms_next_closed_loop(mesh, h) {
        return Err(ValidityError::OpenNextLoop(h));
    }
    if !forms_prev_closed_loop(mesh, h) {
        return Err(ValidityError::OpenPrevLoop(h));
    }
    if let Some(bad) = first_broken_pair(mesh, h) {
        return Err(ValidityError::BrokenPair(bad));
    }
    if let Some((first, second, point)) = find_self_intersection(mesh, h) {
        return Err(ValidityError::SelfIntersecting {
            first,
            second,
            point,
        });
    }
    Ok(())
}

/// Following `next` from `h` returns to `h` with no half-edge visited twice
/// and no null link on the way.
pub fn forms_next_closed_loop(mesh: &Mesh, h: EdgeIdx) -> bool {
    closes(mesh, h, Direction::Forward)
}

/// Following `prev` from `h` returns to `h` with no half-edge visited twice
/// and no null link on the way.
pub fn forms_prev_closed_loop(mesh: &Mesh, h: EdgeIdx) -> bool {
    closes(mesh, h, Direction::Backward)
}

fn closes(mesh: &Mesh, h: EdgeIdx, direction: Direction) -> bool {
    let mut visited: HashSet<EdgeIdx> = HashSet::new();
    let mut e = h;
    loop {
        let Some(he) = mesh.get(e) else {
            return false;
        };
        if !visited.insert(e) {
            return false;
        }
        e = match direction {
            Direction::Forward => he.next,
            Direction::Backward => he.prev,
        };
        if !mesh.contains(e) {
            return false;
        }
        if e == h {
            return true;
        }
    }
}

/// Every half-edge of the ring has a live pair whose pair is itself.
/// Assumes the `next` ring closes.
pub fn half_edge_pairs_defined(mesh: &Mesh, h: EdgeIdx) -> bool {
    first_broken_pair(mesh, h).is_none()
}

fn first_broken_pair(mesh: &Mesh, h: EdgeIdx) -> Option<EdgeIdx> {
    mesh.ring(h).find(|&e| {
        let pair = mesh.pair(e);
        !mesh.contains(pair) || !mesh.contains(mesh.pair(pair)) || mesh.pair(pair) != e
    })
}

/// True if any two non-adjacent edges of the ring properly cross.
/// Assumes the `next` ring closes. O(n²) in the edge count.
pub fn self_intersection(mesh: &Mesh, h: EdgeIdx) -> bool {
    find_self_intersection(mesh, h).is_some()
}

fn find_self_intersection(mesh: &Mesh, h: EdgeIdx) -> Option<(EdgeIdx, EdgeIdx, Point)> {
    let edges: Vec<EdgeIdx> = mesh.ring(h).collect();
    let n = edges.len();
    for i in 0..n {
        for j in (i + 2)..n {
            // the last edge is adjacent to the first
            if i == 0 && j == n - 1 {
                continue;
            }
            let hit = mesh.half_edge_intersection(edges[i], edges[j]);
            if let Some(point) = hit.point {
                return Some((edges[i], edges[j], point));
            }
        }
    }
    None
}
