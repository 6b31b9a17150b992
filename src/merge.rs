// Copyright 2025 Lars Brubaker
//
// Union of two simple polygons given as half-edge rings.
//
// Pipeline:
//   1. validate both rings
//   2. clone both into a fresh arena (the rest of the pipeline is destructive)
//   3. find every proper crossing between an edge of A and an edge of B
//   4. split edges at their crossings, nearest crossing first
//   5. rewire the four half-edges arriving at each crossing point
//
// Faces lie to the left of their half-edges. After rewiring, the union's
// outer envelope is the one clockwise cycle of the result. Every region cut
// out by the crossings is a counter-clockwise cycle. Regions that touch the
// envelope belong to only one polygon; the rest are interior boundaries.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::error::{BuildError, MergeError, Operand, ValidityError};
use crate::geom::{orient, polygon_signed_area, Point};
use crate::mesh::{EdgeIdx, Mesh};
use crate::validity::{check_validity, forms_next_closed_loop, forms_prev_closed_loop};

/// Merge configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeCfg {
    /// Reject inputs that are not valid simple polygons.
    pub validate_inputs: bool,
    /// Check every cycle of the result for closure and pairing before
    /// returning it.
    pub validate_result: bool,
}

impl Default for MergeCfg {
    fn default() -> Self {
        Self {
            validate_inputs: true,
            validate_result: false,
        }
    }
}

/// A proper intersection between an edge of polygon A and an edge of
/// polygon B. After splitting, `edge_a` and `edge_b` start at `point`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Crossing {
    pub edge_a: EdgeIdx,
    pub edge_b: EdgeIdx,
    pub point: Point,
}

/// The unioned topology.
#[derive(Clone, Debug)]
pub struct Merged {
    /// Arena holding both split-and-rewired rings.
    pub mesh: Mesh,
    /// Clone of polygon A's starting half-edge. It sits on the envelope
    /// unless A's first vertex lies inside B.
    pub head: EdgeIdx,
    /// Crossings resolved while merging.
    pub crossings: Vec<Crossing>,
}

impl Merged {
    /// A half-edge on the clockwise outer envelope: `head` when the anchor
    /// lies on it, otherwise the cycle enclosing the largest clockwise area.
    pub fn envelope(&self) -> EdgeIdx {
        let areas: Vec<(EdgeIdx, f64)> = self
            .mesh
            .cycles()
            .into_iter()
            .map(|e| (e, polygon_signed_area(&self.mesh.positions(e))))
            .collect();
        let Some(&(outer, _)) = areas.iter().min_by(|l, r| l.1.total_cmp(&r.1)) else {
            return self.head;
        };
        if self.mesh.ring(outer).any(|e| e == self.head) {
            self.head
        } else {
            outer
        }
    }

    /// Vertex sequence of the outer envelope, starting at A's start point
    /// when that point lies on it.
    pub fn outer(&self) -> Vec<Point> {
        self.mesh.positions(self.envelope())
    }

    /// One half-edge per distinct cycle of the result, envelope included.
    pub fn cycles(&self) -> Vec<EdgeIdx> {
        self.mesh.cycles()
    }

    /// Interior boundaries: counter-clockwise cycles that share no edge with
    /// the envelope. Cycles bordering the envelope enclose area covered by
    /// only one of the two polygons.
    pub fn interior_cycles(&self) -> Vec<EdgeIdx> {
        let envelope: HashSet<EdgeIdx> = self.mesh.ring(self.envelope()).collect();
        self.mesh
            .cycles()
            .into_iter()
            .filter(|&c| polygon_signed_area(&self.mesh.positions(c)) > 0.0)
            .filter(|&c| {
                self.mesh
                    .ring(c)
                    .all(|e| !envelope.contains(&self.mesh.pair(e)))
            })
            .collect()
    }
}

/// Merge two polygons stored in `mesh` with the default configuration.
///
/// Returns `Ok(None)` when the boundaries do not cross (the polygons are
/// disjoint or one contains the other).
pub fn merge_polygons(
    mesh: &Mesh,
    a: EdgeIdx,
    b: EdgeIdx,
) -> Result<Option<Merged>, MergeError> {
    merge_polygons_with(mesh, a, b, &MergeCfg::default())
}

pub fn merge_polygons_with(
    mesh: &Mesh,
    a: EdgeIdx,
    b: EdgeIdx,
    cfg: &MergeCfg,
) -> Result<Option<Merged>, MergeError> {
    if cfg.validate_inputs {
        check_validity(mesh, a).map_err(|source| MergeError::InvalidPolygon {
            operand: Operand::A,
            source,
        })?;
        check_validity(mesh, b).map_err(|source| MergeError::InvalidPolygon {
            operand: Operand::B,
            source,
        })?;
    } else {
        for (operand, h) in [(Operand::A, a), (Operand::B, b)] {
            if !forms_next_closed_loop(mesh, h) {
                return Err(MergeError::InvalidPolygon {
                    operand,
                    source: ValidityError::OpenNextLoop(h),
                });
            }
        }
    }

    let mut merger = match Merger::new(mesh, a, b) {
        Ok(merger) => merger,
        Err(err) => {
            // a ring of a single half-edge has no segment to cross
            debug!("merge: nothing to cross ({})", err);
            return Ok(None);
        }
    };
    merger.discover_crossings();
    if merger.crossings.is_empty() {
        debug!("merge: no crossings between {} and {}", a, b);
        return Ok(None);
    }
    debug!("merge: {} crossings", merger.crossings.len());

    merger.sort_pending();
    merger.split_ring(merger.head_a, Operand::A);
    merger.split_ring(merger.head_b, Operand::B);
    merger.resolve_crossings();

    let merged = Merged {
        head: merger.head_a,
        crossings: merger.crossings,
        mesh: merger.mesh,
    };

    if cfg.validate_result {
        check_result(&merged)?;
    }
    debug!(
        "merge: {} half-edges in {} cycles",
        merged.mesh.len(),
        merged.mesh.cycles().len()
    );
    Ok(Some(merged))
}

/// Every cycle closes under next and prev and pairing is an involution.
fn check_result(merged: &Merged) -> Result<(), MergeError> {
    let mesh = &merged.mesh;
    for e in 0..mesh.len() as EdgeIdx {
        if !forms_next_closed_loop(mesh, e) {
            return Err(MergeError::CorruptResult(ValidityError::OpenNextLoop(e)));
        }
        if !forms_prev_closed_loop(mesh, e) {
            return Err(MergeError::CorruptResult(ValidityError::OpenPrevLoop(e)));
        }
        let pair = mesh.pair(e);
        if !mesh.contains(pair) || mesh.pair(pair) != e {
            return Err(MergeError::CorruptResult(ValidityError::BrokenPair(e)));
        }
    }
    Ok(())
}

/// Working state of one merge call.
struct Merger {
    mesh: Mesh,
    head_a: EdgeIdx,
    head_b: EdgeIdx,
    crossings: Vec<Crossing>,
    /// Crossings still waiting to split each edge, farthest first.
    pending: HashMap<EdgeIdx, Vec<usize>>,
}

impl Merger {
    fn new(src: &Mesh, a: EdgeIdx, b: EdgeIdx) -> Result<Self, BuildError> {
        let mut mesh = Mesh::with_capacity(src.len() * 2);
        let head_a = src.clone_polygon(a, &mut mesh)?;
        let head_b = src.clone_polygon(b, &mut mesh)?;
        Ok(Merger {
            mesh,
            head_a,
            head_b,
            crossings: Vec::new(),
            pending: HashMap::new(),
        })
    }

    fn discover_crossings(&mut self) {
        let ring_a: Vec<EdgeIdx> = self.mesh.ring(self.head_a).collect();
        let ring_b: Vec<EdgeIdx> = self.mesh.ring(self.head_b).collect();
        for &ea in &ring_a {
            for &eb in &ring_b {
                let Some(point) = self.mesh.half_edge_intersection(ea, eb).point else {
                    continue;
                };
                let idx = self.crossings.len();
                self.crossings.push(Crossing {
                    edge_a: ea,
                    edge_b: eb,
                    point,
                });
                self.pending.entry(ea).or_default().push(idx);
                self.pending.entry(eb).or_default().push(idx);
            }
        }
    }

    /// Order each edge's crossings by descending distance from the edge's
    /// start, so popping from the back yields the nearest one.
    fn sort_pending(&mut self) {
        for (&e, list) in self.pending.iter_mut() {
            let start = self.mesh.position(e);
            let crossings = &self.crossings;
            list.sort_by(|&l, &r| {
                let dl = crossings[l].point.dist2(start);
                let dr = crossings[r].point.dist2(start);
                dr.total_cmp(&dl)
            });
        }
    }

    /// Walk one ring and split every edge at its pending crossings. Each new
    /// sub-edge becomes next(e), so the walk reaches it on the following step
    /// and handles the crossings handed over to it.
    fn split_ring(&mut self, head: EdgeIdx, side: Operand) {
        let mut e = head;
        loop {
            if let Some(idx) = self.pending.get_mut(&e).and_then(|list| list.pop()) {
                let point = self.crossings[idx].point;
                let n = self.mesh.split_edge(e, point);
                trace!("split {} at ({}, {}) -> {}", e, point.x, point.y, n);

                if let Some(rest) = self.pending.remove(&e) {
                    if !rest.is_empty() {
                        self.pending.insert(n, rest);
                    }
                }
                match side {
                    Operand::A => self.crossings[idx].edge_a = n,
                    Operand::B => self.crossings[idx].edge_b = n,
                }
            }
            e = self.mesh.next(e);
            if e == head {
                break;
            }
        }
    }

    fn resolve_crossings(&mut self) {
        for i in 0..self.crossings.len() {
            let Crossing {
                edge_a: a_out,
                edge_b: b_out,
                point,
            } = self.crossings[i];
            self.rewire(a_out, b_out, point);
        }
    }

    /// Reconnect the four half-edges entering a crossing point.
    ///
    /// `a_out`/`b_out` leave the point along A and B; `a_in`/`b_in` arrive
    /// along A and B. The pairs of the outgoing edges also arrive here and the
    /// pairs of the incoming edges leave from here.
    fn rewire(&mut self, a_out: EdgeIdx, b_out: EdgeIdx, point: Point) {
        let m = &mut self.mesh;
        let a_in = m.prev(a_out);
        let b_in = m.prev(b_out);
        let a_in_pair = m.pair(a_in);
        let b_in_pair = m.pair(b_in);
        let a_out_pair = m.pair(a_out);
        let b_out_pair = m.pair(b_out);

        if orient(m.position(a_in), point, m.position(b_in)) < 0.0 {
            trace!("crossing ({}, {}) turns clockwise", point.x, point.y);
            m.link(a_in, b_out);
            m.link(b_in, a_in_pair);
            m.link(a_out_pair, b_in_pair);
            m.link(b_out_pair, a_out);
        } else {
            trace!(
                "crossing ({}, {}) turns counter-clockwise",
                point.x,
                point.y
            );
            m.link(a_in, b_in_pair);
            m.link(b_in, a_out);
            m.link(a_out_pair, b_out);
            m.link(b_out_pair, a_in_pair);
        }
    }
}
