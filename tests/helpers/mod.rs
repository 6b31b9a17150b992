// Copyright 2025 Lars Brubaker
// Shared fixtures and assertions for polymerge tests.

#![allow(dead_code)]

use polymerge::{EdgeIdx, Mesh, Point};

pub const EPS: f64 = 1e-6;

pub const TRIANGLE: &[(f64, f64)] = &[(-0.5, -0.5), (0.0, 0.5), (0.5, -0.5)];

pub const SQUARE: &[(f64, f64)] = &[
    (-0.45, -0.45),
    (-0.45, 0.45),
    (0.45, 0.45),
    (0.45, -0.45),
];

pub const NON_OVERLAPPING_SQUARE: &[(f64, f64)] =
    &[(9.55, 9.55), (9.55, 10.45), (10.45, 10.45), (10.45, 9.55)];

/// Square shifted up and right so each overlaps the other's corner by 0.2.
pub const OVERLAPPING_SQUARE: &[(f64, f64)] = &[
    (-0.25, -0.25),
    (-0.25, 0.65),
    (0.65, 0.65),
    (0.65, -0.25),
];

pub const HORIZONTAL_RECTANGLE: &[(f64, f64)] =
    &[(-0.6, -0.2), (-0.6, 0.2), (0.6, 0.2), (0.6, -0.2)];

/// Triangle with a notch cut into its base.
pub const CHEVRON: &[(f64, f64)] = &[(-0.5, -0.5), (0.0, 0.5), (0.5, -0.5), (0.0, 0.25)];

/// Bow-tie whose two long edges cross at the origin.
pub const HOURGLASS: &[(f64, f64)] = &[(-0.5, -0.5), (-0.5, 0.5), (0.5, -0.5), (0.5, 0.5)];

/// Small square well inside SQUARE.
pub const INNER_SQUARE: &[(f64, f64)] = &[(-0.1, -0.1), (-0.1, 0.1), (0.1, 0.1), (0.1, -0.1)];

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn points(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
}

/// Build both polygons into one arena.
pub fn mesh_with(a: &[(f64, f64)], b: &[(f64, f64)]) -> (Mesh, EdgeIdx, EdgeIdx) {
    init_logging();
    let mut mesh = Mesh::new();
    let ha = mesh.build_polygon(&points(a)).expect("polygon A");
    let hb = mesh.build_polygon(&points(b)).expect("polygon B");
    (mesh, ha, hb)
}

/// Assert the ring through `head` visits `expected` in order along `next`,
/// and the same vertices in reverse along `prev`.
pub fn check_ring(mesh: &Mesh, head: EdgeIdx, expected: &[(f64, f64)]) {
    let n = expected.len();
    for i in 0..n {
        let fwd = mesh.position(mesh.step(head, i as isize));
        let (x, y) = expected[i];
        assert!(
            fwd.approx_eq(Point::new(x, y), EPS),
            "forward vertex {} = ({}, {}), expected ({}, {})",
            i,
            fwd.x,
            fwd.y,
            x,
            y
        );

        let bwd = mesh.position(mesh.step(head, -(i as isize) - 1));
        let (x, y) = expected[n - i - 1];
        assert!(
            bwd.approx_eq(Point::new(x, y), EPS),
            "backward vertex {} = ({}, {}), expected ({}, {})",
            i,
            bwd.x,
            bwd.y,
            x,
            y
        );
    }
    assert_eq!(
        mesh.ring(head).count(),
        n,
        "ring length differs from expected vertex count"
    );
}

/// next/prev reciprocity and pairing involution for every half-edge.
pub fn assert_reciprocal(mesh: &Mesh) {
    for e in 0..mesh.len() as EdgeIdx {
        assert_eq!(mesh.prev(mesh.next(e)), e, "prev(next({}))", e);
        assert_eq!(mesh.next(mesh.prev(e)), e, "next(prev({}))", e);
        assert_eq!(mesh.pair(mesh.pair(e)), e, "pair(pair({}))", e);
    }
}
