// Copyright 2025 Lars Brubaker

pub mod error;
pub mod geom;
pub mod merge;
pub mod mesh;
pub mod ring;
pub mod validity;

pub use error::{BuildError, MergeError, Operand, ValidityError};
pub use geom::{
    orient, polygon_signed_area, segment_intersection, Point, Real, SegmentIntersection,
};
pub use merge::{merge_polygons, merge_polygons_with, Crossing, MergeCfg, Merged};
pub use mesh::{build_polygon, EdgeIdx, HalfEdge, Mesh, INVALID};
pub use ring::{Direction, Ring};
pub use validity::{check_validity, is_valid};
