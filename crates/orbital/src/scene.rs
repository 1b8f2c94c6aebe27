use crate::animation::{PathTransition, RotateTransition};
use crate::config::{OrbitConfig, RingConfig};
use crate::geometry::{self, CircleLayout, Line, Point, Radians};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Stage {
    pub width: f64,
    pub height: f64,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Stage {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center of the stage, nudged by half a pixel so 1px strokes land on pixel centers.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0 + 0.5, self.height / 2.0 + 0.5)
    }
}

/// Static geometry of the diagram. Computed once per stage size and configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub stage: Stage,
    pub center: Point,
    pub outer_radius: f64,
    pub rim_radius: f64,
    pub inner_radius: f64,
    pub rotate_radius: f64,
    pub spokes: Vec<Line>,
    /// Balls around the rotate circle in its start position.
    pub balls: CircleLayout,
    pub ball_radius: f64,
    pub ball_center_radius: f64,
}

impl Scene {
    pub fn new(stage: Stage, ring: &RingConfig, orbit: &OrbitConfig) -> Self {
        let center = stage.center();
        let outer_radius = (stage.width.min(stage.height) / 2.0 - ring.margin).max(0.0);
        let inner_radius = outer_radius * ring.inner_ratio;
        let rotate_radius = outer_radius - inner_radius;

        Self {
            stage,
            center,
            outer_radius,
            rim_radius: outer_radius + ring.rim_padding,
            inner_radius,
            rotate_radius,
            spokes: geometry::spokes(center, outer_radius, ring.spokes),
            balls: CircleLayout::new(
                center.translate(inner_radius, 0.0),
                rotate_radius,
                orbit.balls,
            ),
            ball_radius: orbit.ball_radius,
            ball_center_radius: orbit.ball_center_radius,
        }
    }

    /// The inner circle, which is the path the rotate circle's center follows.
    pub fn orbit_path(&self) -> PathTransition {
        PathTransition::new(self.center, self.inner_radius, Radians::new(0.0))
    }

    pub fn rotation(&self) -> RotateTransition {
        RotateTransition::reverse_turn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn scene(width: f64, height: f64) -> Scene {
        Scene::new(
            Stage::new(width, height),
            &RingConfig::default(),
            &OrbitConfig::default(),
        )
    }

    #[test]
    fn test_scene_reference_stage() {
        let scene = scene(800.0, 600.0);
        assert_eq!(scene.center, Point::new(400.5, 300.5));
        assert_eq!(scene.outer_radius, 270.0);
        assert_eq!(scene.rim_radius, 291.0);
        assert_eq!(scene.inner_radius, 135.0);
        assert_eq!(scene.rotate_radius, 135.0);
        assert_eq!(scene.spokes.len(), 24);
        assert_eq!(scene.balls.count, 12);
        assert_eq!(scene.balls.center, Point::new(535.5, 300.5));
    }

    #[test]
    fn test_scene_uses_shorter_side() {
        let wide = scene(1024.0, 600.0);
        assert_eq!(wide.outer_radius, 270.0);
        assert_eq!(wide.center, Point::new(512.5, 300.5));

        let tall = scene(500.0, 900.0);
        assert_eq!(tall.outer_radius, 220.0);
    }

    #[test]
    fn test_scene_tiny_stage_clamps_radius() {
        let scene = scene(40.0, 40.0);
        assert_eq!(scene.outer_radius, 0.0);
        assert_eq!(scene.rotate_radius, 0.0);
    }

    #[test]
    fn test_balls_start_on_outer_ring() {
        // the rotate circle touches the rim on the right and passes through the center
        let scene = scene(800.0, 600.0);
        let first = scene.balls.point(0);
        let opposite = scene.balls.point(6);
        assert!(first.distance_to(Point::new(670.5, 300.5)) < EPS);
        assert!(opposite.distance_to(scene.center) < EPS);
    }
}
