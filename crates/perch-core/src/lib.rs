#![forbid(unsafe_code)]

//! Core types for Perch: viewport geometry and input codes.
//!
//! Everything here is plain data plus pure functions. Higher layers
//! (`perch-layout`, `perch-runtime`) build placement and lifecycle on top.

pub mod event;
pub mod geometry;

pub use event::{KeyCode, PointerButton};
pub use geometry::{
    BoundingBox, Point, Size, Spaces, ViewportSize, clamp_axis, clamp_into, space_around,
};
