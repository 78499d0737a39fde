//! Outline generation for ball forms
//!
//! Every outline is a closed polygon in arena coordinates, wound in the
//! order a path would be traced.

use game_core::BallForm;
use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Segments used to approximate a circle
pub const CIRCLE_SEGMENTS: usize = 32;

/// Inner radius of a star point, as a fraction of the outer radius
const STAR_INNER_RATIO: f32 = 1.0 / 2.5;

/// Outline for `form` centred on `center`. Unknown forms draw as circles.
pub fn outline(form: &BallForm, center: Vec2, radius: f32) -> Vec<Vec2> {
    match form {
        BallForm::Square => create_square(center, radius),
        BallForm::Star => create_star(center, radius),
        BallForm::Triangle => create_triangle(center, radius),
        BallForm::Circle | BallForm::Other(_) => create_circle(center, radius, CIRCLE_SEGMENTS),
    }
}

pub fn create_circle(center: Vec2, radius: f32, segments: usize) -> Vec<Vec2> {
    (0..segments)
        .map(|i| {
            let angle = TAU * i as f32 / segments as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Axis-aligned square whose inscribed circle has `radius`
pub fn create_square(center: Vec2, radius: f32) -> Vec<Vec2> {
    vec![
        center + Vec2::new(-radius, -radius),
        center + Vec2::new(radius, -radius),
        center + Vec2::new(radius, radius),
        center + Vec2::new(-radius, radius),
    ]
}

/// Five-pointed star, first point straight up
pub fn create_star(center: Vec2, radius: f32) -> Vec<Vec2> {
    let step = PI / 5.0;
    let mut rot = PI / 2.0 * 3.0;
    let mut points = Vec::with_capacity(10);
    for _ in 0..5 {
        points.push(center + Vec2::new(rot.cos(), rot.sin()) * radius);
        rot += step;
        points.push(center + Vec2::new(rot.cos(), rot.sin()) * radius * STAR_INNER_RATIO);
        rot += step;
    }
    points
}

/// Equilateral triangle, first vertex pointing right
pub fn create_triangle(center: Vec2, radius: f32) -> Vec<Vec2> {
    let a = TAU / 3.0;
    (0..3)
        .map(|i| {
            let angle = a * i as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_alternates_radii() {
        let points = create_star(Vec2::ZERO, 10.0);
        assert_eq!(points.len(), 10);
        // First point is straight up (negative y on screen)
        assert!((points[0] - Vec2::new(0.0, -10.0)).length() < 1e-4);
        for (i, p) in points.iter().enumerate() {
            let expected = if i % 2 == 0 { 10.0 } else { 4.0 };
            assert!((p.length() - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_triangle_points_right() {
        let points = create_triangle(Vec2::new(5.0, 5.0), 10.0);
        assert_eq!(points.len(), 3);
        assert!((points[0] - Vec2::new(15.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_unknown_form_is_circle() {
        let form = BallForm::Other("hexagon".to_string());
        let points = outline(&form, Vec2::ZERO, 10.0);
        assert_eq!(points.len(), CIRCLE_SEGMENTS);
        assert!(points.iter().all(|p| (p.length() - 10.0).abs() < 1e-4));
    }

    #[test]
    fn test_square_bounds() {
        let points = outline(&BallForm::Square, Vec2::new(100.0, 50.0), 10.0);
        assert_eq!(points[0], Vec2::new(90.0, 40.0));
        assert_eq!(points[2], Vec2::new(110.0, 60.0));
    }
}
