use crate::animation::{ParallelTransition, PathTransition, RotateTransition, Sample, Status};
use crate::config::Config;
use crate::control::{ControlCommand, Layer};
use crate::geometry::{Degrees, Point, Radians};
use crate::scene::Scene;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub type OrbitTransition = ParallelTransition<PathTransition, RotateTransition>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Visibility {
    pub lines: bool,
    pub inner_circle: bool,
    pub rotate_circle: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            lines: true,
            inner_circle: false,
            rotate_circle: false,
        }
    }
}

impl Visibility {
    pub fn get(&self, layer: Layer) -> bool {
        match layer {
            Layer::Lines => self.lines,
            Layer::InnerCircle => self.inner_circle,
            Layer::RotateCircle => self.rotate_circle,
        }
    }

    /// Returns true if the flag changed.
    pub fn set(&mut self, layer: Layer, visible: bool) -> bool {
        let slot = match layer {
            Layer::Lines => &mut self.lines,
            Layer::InnerCircle => &mut self.inner_circle,
            Layer::RotateCircle => &mut self.rotate_circle,
        };
        let changed = *slot != visible;
        *slot = visible;
        changed
    }
}

/// Everything the host needs to draw one frame of the moving assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub t: f64,
    pub orbit_center: Point,
    pub rotation: Degrees,
    pub balls: Vec<Point>,
}

type VisibilityListener = Box<dyn FnMut(Layer, bool)>;

pub struct OrbitEngine {
    scene: Scene,
    transition: OrbitTransition,
    visibility: Visibility,
    listeners: Vec<VisibilityListener>,
}

impl OrbitEngine {
    pub fn new(config: &Config) -> Self {
        let scene = Scene::new(config.stage, &config.ring, &config.orbit);
        let transition =
            OrbitTransition::new(config.orbit.duration, scene.orbit_path(), scene.rotation())
                .with_cycle_count(config.orbit.cycles);

        let mut engine = Self {
            scene,
            transition,
            visibility: config.visible,
            listeners: Vec::new(),
        };
        if config.orbit.autoplay {
            engine.play();
        }
        engine
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn status(&self) -> Status {
        self.transition.status()
    }

    pub fn is_running(&self) -> bool {
        self.status() == Status::Running
    }

    pub fn elapsed(&self) -> Duration {
        self.transition.clock().elapsed()
    }

    pub fn play(&mut self) {
        self.transition.play();
        log::debug!("animation playing from {:?}", self.elapsed());
    }

    pub fn pause(&mut self) {
        self.transition.pause();
        log::debug!("animation paused at {:?}", self.elapsed());
    }

    pub fn stop(&mut self) {
        self.transition.stop();
        log::debug!("animation stopped");
    }

    /// Play/Stop button behavior. Returns the new status.
    pub fn toggle(&mut self) -> Status {
        if self.is_running() {
            self.stop();
        } else {
            self.play();
        }
        self.status()
    }

    pub fn tick(&mut self, delta: Duration) -> Frame {
        let sample = self.transition.tick(delta);
        self.frame_from(sample)
    }

    pub fn frame(&self) -> Frame {
        self.frame_from(self.transition.sample())
    }

    fn frame_from(&self, sample: Sample<Point, Degrees>) -> Frame {
        let spin = sample.angle.to_radians().value();
        let balls = &self.scene.balls;
        let positions = (0..balls.count)
            .map(|i| {
                let angle = Radians::new(balls.angle(i).value() + spin);
                sample.position.polar(balls.radius, angle)
            })
            .collect();

        Frame {
            t: sample.t,
            orbit_center: sample.position,
            rotation: sample.angle,
            balls: positions,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self, layer: Layer) -> bool {
        self.visibility.get(layer)
    }

    pub fn set_visible(&mut self, layer: Layer, visible: bool) {
        if self.visibility.set(layer, visible) {
            log::debug!("{} visible: {}", layer, visible);
            for listener in &mut self.listeners {
                listener(layer, visible);
            }
        }
    }

    pub fn on_visibility_change<F>(&mut self, listener: F)
    where
        F: FnMut(Layer, bool) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn apply(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::Play => self.play(),
            ControlCommand::Stop => self.stop(),
            ControlCommand::Pause => self.pause(),
            ControlCommand::Toggle => {
                self.toggle();
            }
            ControlCommand::Show(layer) => self.set_visible(layer, true),
            ControlCommand::Hide(layer) => self.set_visible(layer, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Line;
    use std::cell::RefCell;
    use std::rc::Rc;

    const EPS: f64 = 1e-6;

    fn engine() -> OrbitEngine {
        OrbitEngine::new(&Config::default())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_autoplay_follows_config() {
        assert!(engine().is_running());

        let mut config = Config::default();
        config.orbit.autoplay = false;
        assert_eq!(OrbitEngine::new(&config).status(), Status::Stopped);
    }

    #[test]
    fn test_first_frame_matches_scene() {
        let engine = engine();
        let frame = engine.frame();
        let scene = engine.scene();
        assert_eq!(frame.t, 0.0);
        assert!((frame.rotation.value() - 360.0).abs() < EPS);
        assert!(frame.orbit_center.distance_to(scene.balls.center) < EPS);
        for (i, ball) in frame.balls.iter().enumerate() {
            assert!(ball.distance_to(scene.balls.point(i)) < EPS);
        }
    }

    #[test]
    fn test_balls_slide_along_spokes() {
        let mut engine = engine();
        let spokes: Vec<Line> = engine.scene().spokes.clone();
        let outer = engine.scene().outer_radius;
        let center = engine.scene().center;

        for _ in 0..700 {
            let frame = engine.tick(ms(17));
            for (i, ball) in frame.balls.iter().enumerate() {
                // ball i rides spoke i: never leaves its line nor the ring
                assert!(spokes[i].distance_to(*ball) < EPS);
                assert!(center.distance_to(*ball) <= outer + EPS);
            }
        }
    }

    #[test]
    fn test_orbit_and_rotation_in_lockstep() {
        let mut engine = engine();
        let center = engine.scene().center;
        for _ in 0..50 {
            let frame = engine.tick(ms(133));
            let orbit = center.angle_to(frame.orbit_center).value().rem_euclid(std::f64::consts::TAU);
            let expected = (1.0 - frame.t) * 360.0;
            assert!((frame.rotation.value() - expected).abs() < EPS);
            assert!((orbit - frame.t * std::f64::consts::TAU).abs() < EPS);
        }
    }

    #[test]
    fn test_stop_resets_to_first_frame() {
        let mut engine = engine();
        let initial = engine.frame();
        for at in [1, 3500, 9999, 13999, 21000] {
            engine.play();
            engine.tick(ms(at));
            engine.stop();
            assert_eq!(engine.elapsed(), Duration::ZERO);
            assert_eq!(engine.frame(), initial);
        }
    }

    #[test]
    fn test_toggle_mirrors_play_button() {
        let mut engine = engine();
        engine.tick(ms(5000));
        assert_eq!(engine.toggle(), Status::Stopped);
        assert_eq!(engine.elapsed(), Duration::ZERO);
        assert_eq!(engine.toggle(), Status::Running);
        engine.tick(ms(10));
        assert_eq!(engine.elapsed(), ms(10));
    }

    #[test]
    fn test_pause_then_play_resumes() {
        let mut engine = engine();
        engine.tick(ms(4000));
        engine.apply(ControlCommand::Pause);
        engine.tick(ms(4000));
        assert_eq!(engine.elapsed(), ms(4000));
        engine.apply(ControlCommand::Play);
        engine.tick(ms(1000));
        assert_eq!(engine.elapsed(), ms(5000));
    }

    #[test]
    fn test_visibility_listener_fires_on_change_only() {
        let mut engine = engine();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        engine.on_visibility_change(move |layer, visible| sink.borrow_mut().push((layer, visible)));

        engine.set_visible(Layer::Lines, true);
        engine.apply(ControlCommand::Show(Layer::RotateCircle));
        engine.apply(ControlCommand::Show(Layer::RotateCircle));
        engine.apply(ControlCommand::Hide(Layer::Lines));

        assert_eq!(
            *seen.borrow(),
            vec![(Layer::RotateCircle, true), (Layer::Lines, false)]
        );
        assert!(engine.is_visible(Layer::RotateCircle));
        assert!(!engine.visibility().lines);
    }
}
