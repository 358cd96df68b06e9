use crate::error::GeometryError;

use super::vec2::Vec2;

/// Ordered vertex loop of a convex shape, in world coordinates.
///
/// Construction rejects anything whose area or centroid would be undefined,
/// so every `Polygon` in circulation has a usable centroid.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(GeometryError::NonFiniteVertex { index });
        }

        let polygon = Self { vertices };
        let area = polygon.signed_area();
        if area == 0.0 || !area.is_finite() {
            return Err(GeometryError::Degenerate(area));
        }
        Ok(polygon)
    }

    /// Build from flat `x, y` pairs as they arrive from JS.
    pub fn from_flat(xy: &[f64]) -> Result<Self, GeometryError> {
        if xy.len() % 2 != 0 {
            return Err(GeometryError::OddCoordinateCount(xy.len()));
        }
        Self::new(xy.chunks_exact(2).map(|p| Vec2::new(p[0], p[1])).collect())
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn into_vertices(self) -> Vec<Vec2> {
        self.vertices
    }

    /// Consecutive vertex pairs, wrapping from the last vertex to the first.
    fn cyclic_pairs(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Edge vectors `v[i+1] - v[i]`.
    pub fn edges(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.cyclic_pairs().map(|(from, to)| to - from)
    }

    /// Shoelace area; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        0.5 * self.cyclic_pairs().map(|(a, b)| a.cross(b)).sum::<f64>()
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn centroid(&self) -> Vec2 {
        let mut sum = Vec2::zero();
        for (a, b) in self.cyclic_pairs() {
            sum += (a + b) * a.cross(b);
        }
        sum / (6.0 * self.signed_area())
    }

    /// Largest distance from `center` to any vertex.
    pub fn bounding_radius(&self, center: Vec2) -> f64 {
        self.vertices
            .iter()
            .map(|v| v.distance_squared(center))
            .fold(0.0, f64::max)
            .sqrt()
    }

    /// `(min, max)` of the vertices' dot products with `axis`.
    pub fn project(&self, axis: Vec2) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in &self.vertices {
            let p = v.dot(axis);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    pub fn translate(&mut self, translation: Vec2) {
        for v in self.vertices.iter_mut() {
            *v += translation;
        }
    }

    /// Rotate every vertex by `angle` radians about `pivot`.
    pub fn rotate(&mut self, angle: f64, pivot: Vec2) {
        for v in self.vertices.iter_mut() {
            *v = (*v - pivot).rotate(angle) + pivot;
        }
    }
}
