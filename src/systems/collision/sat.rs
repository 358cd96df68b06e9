use crate::rigid_body::{Polygon, Vec2};

/// Result of a narrow-phase test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionInfo {
    pub collided: bool,
    /// Unit contact normal pointing from the first shape toward the second.
    /// When the shapes are apart this is the separating axis that was found.
    pub axis: Vec2,
    /// Penetration along `axis`; zero when not collided.
    pub depth: f64,
}

/// Separating-axis test between two convex polygons.
///
/// Candidate axes are the edge normals of both shapes, each flipped to point
/// from `a`'s centroid toward `b`'s. The first axis whose projections do not
/// overlap proves separation; otherwise the axis with the smallest overlap
/// is reported. Shapes that only share a boundary do not collide.
pub fn find_collision(a: &Polygon, b: &Polygon) -> CollisionInfo {
    let delta = b.centroid() - a.centroid();
    let mut best: Option<(f64, Vec2)> = None;

    for edge in a.edges().chain(b.edges()) {
        let mut axis = edge.perp().normalize();
        if axis == Vec2::ZERO {
            // Repeated vertex.
            continue;
        }
        if axis.dot(delta) < 0.0 {
            axis = -axis;
        }

        let (min_a, max_a) = a.project(axis);
        let (min_b, max_b) = b.project(axis);
        let overlap = max_a.min(max_b) - min_a.max(min_b);
        if overlap <= 0.0 {
            return CollisionInfo { collided: false, axis, depth: 0.0 };
        }
        if best.map_or(true, |(depth, _)| overlap < depth) {
            best = Some((overlap, axis));
        }
    }

    match best {
        Some((depth, axis)) => CollisionInfo { collided: true, axis, depth },
        None => CollisionInfo { collided: false, axis: delta.normalize(), depth: 0.0 },
    }
}
