//! AABB collision helpers
//!
//! Pure rectangle math shared by the physics step, attack hit detection and
//! pickup checks. Dynamic bodies (player, enemies) expose their bounds via
//! the `Collidable` trait; platforms and the goal marker are plain rects.

use sdl2::rect::Rect;

/// Trait for entities that participate in collision detection.
///
/// The returned `Rect` must match the entity's on-screen footprint, not the
/// full sprite frame (sprites usually carry transparent padding).
pub trait Collidable {
    fn bounds(&self) -> Rect;
}

/// Checks whether two axis-aligned rectangles intersect.
///
/// Touching edges do not count as an intersection, so a body resting exactly
/// on top of a platform is not reported as colliding with it.
pub fn aabb_intersect(a: &Rect, b: &Rect) -> bool {
    let x_overlap = a.x() < b.x() + b.width() as i32 && a.x() + a.width() as i32 > b.x();
    let y_overlap = a.y() < b.y() + b.height() as i32 && a.y() + a.height() as i32 > b.y();

    x_overlap && y_overlap
}

/// Calculates how far two intersecting rectangles overlap on each axis.
///
/// The sign encodes which side `a` entered from: positive means `a` sits
/// left of / above `b` and should be pushed in the negative direction to
/// separate. Callers resolve along the axis with the smaller magnitude.
///
/// Only meaningful when the rectangles actually intersect.
pub fn calculate_overlap(a: &Rect, b: &Rect) -> (i32, i32) {
    let a_right = a.x() + a.width() as i32;
    let b_right = b.x() + b.width() as i32;

    let overlap_x = if a.x() <= b.x() {
        a_right - b.x()
    } else {
        a.x() - b_right
    };

    let a_bottom = a.y() + a.height() as i32;
    let b_bottom = b.y() + b.height() as i32;

    let overlap_y = if a.y() <= b.y() {
        a_bottom - b.y()
    } else {
        a.y() - b_bottom
    };

    (overlap_x, overlap_y)
}

/// Returns the indices of all `entities` that `entity` currently overlaps.
pub fn overlapping_indices<T: Collidable>(entity: &impl Collidable, entities: &[T]) -> Vec<usize> {
    let entity_bounds = entity.bounds();

    entities
        .iter()
        .enumerate()
        .filter(|(_, other)| aabb_intersect(&entity_bounds, &other.bounds()))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_intersect_overlapping() {
        let rect_a = Rect::new(0, 0, 32, 32);
        let rect_b = Rect::new(16, 16, 32, 32);

        assert!(aabb_intersect(&rect_a, &rect_b));
        assert!(aabb_intersect(&rect_b, &rect_a)); // Symmetric
    }

    #[test]
    fn test_aabb_intersect_touching_edges() {
        // A body standing exactly on a platform top must not register a hit
        let body = Rect::new(0, 0, 32, 32);
        let platform = Rect::new(0, 32, 80, 20);

        assert!(!aabb_intersect(&body, &platform));
    }

    #[test]
    fn test_aabb_intersect_separated() {
        let rect_a = Rect::new(0, 0, 32, 32);
        let rect_b = Rect::new(100, 100, 32, 32);

        assert!(!aabb_intersect(&rect_a, &rect_b));
    }

    #[test]
    fn test_aabb_intersect_contained() {
        let large = Rect::new(0, 0, 100, 100);
        let small = Rect::new(25, 25, 50, 50);

        assert!(aabb_intersect(&large, &small));
        assert!(aabb_intersect(&small, &large));
    }

    #[test]
    fn test_calculate_overlap_from_above() {
        // Falling body clipping into a platform top by 12 px
        let body = Rect::new(10, 0, 32, 32);
        let platform = Rect::new(0, 20, 80, 20);

        let (overlap_x, overlap_y) = calculate_overlap(&body, &platform);

        assert_eq!(overlap_y, 12);
        // X overlap is the full body width; resolution picks the smaller axis
        assert!(overlap_x.abs() >= overlap_y.abs());
    }

    #[test]
    fn test_calculate_overlap_from_the_left() {
        let body = Rect::new(0, 0, 32, 32);
        let wall = Rect::new(20, 0, 32, 64);

        let (overlap_x, _) = calculate_overlap(&body, &wall);

        assert_eq!(overlap_x, 12);
    }

    #[test]
    fn test_calculate_overlap_sign_flips_with_side() {
        let left = Rect::new(0, 0, 32, 32);
        let right = Rect::new(20, 0, 32, 32);

        let (from_left, _) = calculate_overlap(&left, &right);
        let (from_right, _) = calculate_overlap(&right, &left);

        assert_eq!(from_left, 12);
        assert_eq!(from_right, -12);
    }

    struct Probe(Rect);

    impl Collidable for Probe {
        fn bounds(&self) -> Rect {
            self.0
        }
    }

    #[test]
    fn test_overlapping_indices() {
        let probe = Probe(Rect::new(0, 0, 32, 32));
        let others = vec![
            Probe(Rect::new(16, 0, 32, 32)),  // overlaps
            Probe(Rect::new(100, 0, 32, 32)), // separated
            Probe(Rect::new(0, 16, 32, 32)),  // overlaps
        ];

        assert_eq!(overlapping_indices(&probe, &others), vec![0, 2]);
    }
}
