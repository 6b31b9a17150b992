// Copyright 2025 Lars Brubaker
//
// Error types for ring construction, validation and merging.

use thiserror::Error;

use crate::geom::Point;
use crate::mesh::EdgeIdx;

/// Errors raised while building a ring from coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("a polygon ring needs at least 2 points, got {count}")]
    TooFewPoints { count: usize },
}

/// Reasons a half-edge does not anchor a valid simple polygon.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidityError {
    /// The index does not name a half-edge in the arena.
    #[error("{0} is not a half-edge of this mesh")]
    NotAHalfEdge(EdgeIdx),

    #[error("following next from half-edge {0} does not close into a single loop")]
    OpenNextLoop(EdgeIdx),

    #[error("following prev from half-edge {0} does not close into a single loop")]
    OpenPrevLoop(EdgeIdx),

    #[error("half-edge {0} has a missing or non-reciprocal pair")]
    BrokenPair(EdgeIdx),

    #[error("edges {first} and {second} cross at ({}, {})", .point.x, .point.y)]
    SelfIntersecting {
        first: EdgeIdx,
        second: EdgeIdx,
        point: Point,
    },
}

/// Which argument of a merge an error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    A,
    B,
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::A => f.write_str("A"),
            Operand::B => f.write_str("B"),
        }
    }
}

/// A merge that could not be attempted or produced broken topology.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MergeError {
    #[error("polygon {operand} is not a valid simple polygon: {source}")]
    InvalidPolygon {
        operand: Operand,
        #[source]
        source: ValidityError,
    },

    #[error("merged topology failed its closure check: {0}")]
    CorruptResult(#[source] ValidityError),
}
