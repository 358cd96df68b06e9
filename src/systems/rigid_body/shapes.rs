//! Polygon constructors for the stock body outlines.
//!
//! Every shape is built around the origin; place it with
//! [`Body::set_centroid`](super::Body::set_centroid) or [`Polygon::translate`].

use std::f64::consts::PI;

use crate::error::GeometryError;

use super::polygon::Polygon;
use super::vec2::Vec2;

/// Axis-aligned rectangle centered on the origin.
pub fn rectangle(width: f64, height: f64) -> Result<Polygon, GeometryError> {
    let (hw, hh) = (width / 2.0, height / 2.0);
    Polygon::new(vec![
        Vec2::new(hw, hh),
        Vec2::new(-hw, hh),
        Vec2::new(-hw, -hh),
        Vec2::new(hw, -hh),
    ])
}

/// `num_vertices` points spread over `proportion` of a full turn, starting
/// straight up. With `proportion == 1.0` this is a regular polygon.
pub fn partial_circle(radius: f64, num_vertices: usize, proportion: f64) -> Result<Polygon, GeometryError> {
    if num_vertices < 3 {
        return Err(GeometryError::TooFewVertices(num_vertices));
    }
    let step = 2.0 * PI / num_vertices as f64 * proportion;
    let start = Vec2::new(0.0, radius);
    Polygon::new((0..num_vertices).map(|i| start.rotate(step * i as f64)).collect())
}

pub fn circle(radius: f64, num_vertices: usize) -> Result<Polygon, GeometryError> {
    partial_circle(radius, num_vertices, 1.0)
}

/// Equilateral triangle with one vertex at `(0, radius)`.
pub fn triangle(radius: f64) -> Result<Polygon, GeometryError> {
    partial_circle(radius, 3, 1.0)
}

/// Star with `num_spokes` long spokes of length `scale * long` alternating
/// with short ones of length `scale * short`.
///
/// Stars are not convex; collision against them uses the outline's edge
/// normals and is approximate.
pub fn star(num_spokes: usize, scale: f64, long: f64, short: f64) -> Result<Polygon, GeometryError> {
    let step = PI / num_spokes.max(1) as f64;
    let unit = Vec2::new(0.0, scale);
    let vertices = (0..num_spokes * 2)
        .map(|i| {
            let len = if i % 2 == 0 { long } else { short };
            unit.rotate(step * i as f64) * len
        })
        .collect();
    Polygon::new(vertices)
}

/// Star with proportions that read well at small sizes.
pub fn regular_star(num_spokes: usize, scale: f64) -> Result<Polygon, GeometryError> {
    star(num_spokes, scale, 0.144 * scale, 0.089 * scale)
}

/// Four-pointed star; used for bullets.
pub fn four_point_star(radius: f64) -> Result<Polygon, GeometryError> {
    star(4, 1.0, radius, radius / 2.0)
}
