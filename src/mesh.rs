// Copyright 2025 Lars Brubaker
//
// Half-edge arena.
//
// Design:
//   - Half-edges live in a Vec and are addressed by u32 indices.
//   - INVALID: u32::MAX is the null link.
//   - A half-edge is the directed segment from its own position to the
//     position of its `next`. Its `pair` runs the same segment backwards and
//     bounds the adjacent face.
//   - Edges are allocated in pairs, but after a split the pair of an edge is
//     no longer its allocation neighbour, so `pair` is stored explicitly.
//   - Any index into a ring is a handle to the whole ring.

use crate::error::BuildError;
use crate::geom::{segment_intersection, Point, SegmentIntersection};
use crate::ring::{Direction, Ring};

pub const INVALID: u32 = u32::MAX;

/// Index into Mesh::edges
pub type EdgeIdx = u32;

#[derive(Clone, Debug, PartialEq)]
pub struct HalfEdge {
    /// Origin of this half-edge.
    pub position: Point,
    /// Successor along the same face boundary.
    pub next: EdgeIdx,
    /// Predecessor along the same face boundary (inverse of `next`).
    pub prev: EdgeIdx,
    /// Reverse-direction twin bounding the adjacent face.
    pub pair: EdgeIdx,
}

impl Default for HalfEdge {
    fn default() -> Self {
        Self {
            position: Point::default(),
            next: INVALID,
            prev: INVALID,
            pair: INVALID,
        }
    }
}

/// The half-edge arena.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub edges: Vec<HalfEdge>,
}

impl Mesh {
    pub fn new() -> Self {
        Mesh { edges: Vec::new() }
    }

    pub fn with_capacity(edges: usize) -> Self {
        Mesh {
            edges: Vec::with_capacity(edges),
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    // ─────────────────────────────── Navigation ───────────────────────────────

    /// True if `e` names a half-edge stored in this arena.
    #[inline]
    pub fn contains(&self, e: EdgeIdx) -> bool {
        e != INVALID && (e as usize) < self.edges.len()
    }

    #[inline]
    pub fn get(&self, e: EdgeIdx) -> Option<&HalfEdge> {
        if e == INVALID {
            return None;
        }
        self.edges.get(e as usize)
    }

    #[inline]
    pub fn next(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[e as usize].next
    }

    #[inline]
    pub fn prev(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[e as usize].prev
    }

    #[inline]
    pub fn pair(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[e as usize].pair
    }

    #[inline]
    pub fn position(&self, e: EdgeIdx) -> Point {
        self.edges[e as usize].position
    }

    /// Destination of e (= position of e->next).
    #[inline]
    pub fn dst(&self, e: EdgeIdx) -> Point {
        self.position(self.next(e))
    }

    /// Walk `n` links from `e`: forward along `next` for positive `n`,
    /// backward along `prev` for negative `n`. Returns INVALID if the walk
    /// runs into a null link.
    pub fn step(&self, e: EdgeIdx, n: isize) -> EdgeIdx {
        let mut cur = e;
        for _ in 0..n.unsigned_abs() {
            let Some(he) = self.get(cur) else {
                return INVALID;
            };
            cur = if n >= 0 { he.next } else { he.prev };
        }
        if self.contains(cur) {
            cur
        } else {
            INVALID
        }
    }

    /// Iterate the ring through `head` along `next`.
    pub fn ring(&self, head: EdgeIdx) -> Ring<'_> {
        Ring::new(self, head, Direction::Forward)
    }

    /// Iterate the ring through `head` along `prev`.
    pub fn ring_rev(&self, head: EdgeIdx) -> Ring<'_> {
        Ring::new(self, head, Direction::Backward)
    }

    /// Vertex sequence of the ring through `head`, starting at `head`.
    pub fn positions(&self, head: EdgeIdx) -> Vec<Point> {
        self.ring(head).map(|e| self.position(e)).collect()
    }

    /// Crossing test between the segments of two half-edges.
    pub fn half_edge_intersection(&self, e1: EdgeIdx, e2: EdgeIdx) -> SegmentIntersection {
        segment_intersection(
            self.position(e1),
            self.dst(e1),
            self.position(e2),
            self.dst(e2),
        )
    }

    /// One representative half-edge per distinct `next` cycle in the arena,
    /// in order of lowest index. Half-edges whose `next` walk never returns to
    /// them are skipped.
    pub fn cycles(&self) -> Vec<EdgeIdx> {
        let mut seen = vec![false; self.edges.len()];
        let mut heads = Vec::new();
        for start in 0..self.edges.len() as EdgeIdx {
            if seen[start as usize] {
                continue;
            }
            let mut members = Vec::new();
            let mut e = start;
            let closed = loop {
                if !self.contains(e) || members.len() > self.edges.len() {
                    break false;
                }
                members.push(e);
                e = self.next(e);
                if e == start {
                    break true;
                }
            };
            if closed {
                for m in members {
                    seen[m as usize] = true;
                }
                heads.push(start);
            }
        }
        heads
    }

    // ─────────────────────────────── Allocation ───────────────────────────────

    /// Allocate a lone half-edge with all links INVALID.
    pub fn add_half_edge(&mut self, position: Point) -> EdgeIdx {
        let e = self.edges.len() as EdgeIdx;
        self.edges.push(HalfEdge {
            position,
            ..HalfEdge::default()
        });
        e
    }

    /// Allocate two half-edges paired with each other. Returns the first; its
    /// pair is the returned index + 1. `next`/`prev` are left INVALID.
    pub fn make_edge_pair(&mut self, org: Point, pair_org: Point) -> EdgeIdx {
        let e = self.add_half_edge(org);
        let e_pair = self.add_half_edge(pair_org);
        self.edges[e as usize].pair = e_pair;
        self.edges[e_pair as usize].pair = e;
        e
    }

    /// Set `next(a) = b` and `prev(b) = a`.
    #[inline]
    pub fn link(&mut self, a: EdgeIdx, b: EdgeIdx) {
        self.edges[a as usize].next = b;
        self.edges[b as usize].prev = a;
    }

    // ───────────────────────────── Construction ───────────────────────────────

    /// Build a ring from vertices in clockwise order and return the half-edge
    /// at `points[0]`.
    ///
    /// Edge i starts at points[i]; its pair starts at points[i + 1]. The pair
    /// ring runs the same vertices in reverse.
    pub fn build_polygon(&mut self, points: &[Point]) -> Result<EdgeIdx, BuildError> {
        let n = points.len();
        if n < 2 {
            return Err(BuildError::TooFewPoints { count: n });
        }

        let edges: Vec<EdgeIdx> = (0..n)
            .map(|i| self.make_edge_pair(points[i], points[(i + 1) % n]))
            .collect();

        for i in 0..n {
            let e = edges[i];
            let e_next = edges[(i + 1) % n];
            self.link(e, e_next);
            // next(pair(i + 1)) = pair(i)
            let (p, p_next) = (self.pair(e_next), self.pair(e));
            self.link(p, p_next);
        }

        Ok(edges[0])
    }

    /// Copy the ring through `head` into `dst` as a fresh, independent ring.
    /// Only positions are carried over.
    pub fn clone_polygon(&self, head: EdgeIdx, dst: &mut Mesh) -> Result<EdgeIdx, BuildError> {
        let points = self.positions(head);
        dst.build_polygon(&points)
    }

    // ─────────────────────────────── Mutation ────────────────────────────────

    /// Split `e` at `at`, which must lie on its segment.
    ///
    /// Before: e = P→Q with pair e' = Q→P.
    /// After:  e = P→X paired with the new twin t = X→P,
    ///         the new edge n = X→Q paired with e' = Q→X.
    /// n is inserted as next(e); t is inserted as next(e').
    /// Returns n.
    pub fn split_edge(&mut self, e: EdgeIdx, at: Point) -> EdgeIdx {
        let e_pair = self.pair(e);
        let e_next = self.next(e);
        let e_pair_next = self.next(e_pair);

        let n = self.add_half_edge(at);
        let t = self.add_half_edge(at);

        // n inherits the tail of e
        self.link(n, e_next);
        self.link(e, n);

        // t inherits the tail of e'
        self.link(t, e_pair_next);
        self.link(e_pair, t);

        self.edges[e as usize].pair = t;
        self.edges[t as usize].pair = e;
        self.edges[n as usize].pair = e_pair;
        self.edges[e_pair as usize].pair = n;

        n
    }
}

/// Build a ring in a fresh arena.
pub fn build_polygon(points: &[Point]) -> Result<(Mesh, EdgeIdx), BuildError> {
    let mut mesh = Mesh::with_capacity(points.len() * 2);
    let head = mesh.build_polygon(points)?;
    Ok((mesh, head))
}
