use crate::geometry::{Degrees, Point, Radians};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use strum::Display as StrumDisplay;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    Stopped,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, SerializeDisplay, DeserializeFromStr)]
pub enum CycleCount {
    #[default]
    Indefinite,
    Finite(u32),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCycleCountError {
    #[error("cycle count must be at least 1")]
    Zero,
    #[error("invalid cycle count '{0}', expected a positive integer or 'indefinite'")]
    Invalid(String),
}

impl FromStr for CycleCount {
    type Err = ParseCycleCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("indefinite") || s.eq_ignore_ascii_case("infinite") {
            return Ok(Self::Indefinite);
        }
        match s.parse::<u32>() {
            Ok(0) => Err(ParseCycleCountError::Zero),
            Ok(n) => Ok(Self::Finite(n)),
            Err(_) => Err(ParseCycleCountError::Invalid(s.to_string())),
        }
    }
}

impl fmt::Display for CycleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indefinite => f.write_str("indefinite"),
            Self::Finite(n) => write!(f, "{}", n),
        }
    }
}

/// Shared time base for a set of animations.
///
/// Elapsed time only moves inside [`Clock::tick`], and only while running. When it
/// reaches the duration the cycle wraps back to zero, unless the cycle count is
/// exhausted, in which case the clock parks at the end and stops.
#[derive(Debug, Clone)]
pub struct Clock {
    duration: Duration,
    elapsed: Duration,
    status: Status,
    cycle_count: CycleCount,
    completed_cycles: u32,
}

impl Clock {
    pub fn new(duration: Duration, cycle_count: CycleCount) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            status: Status::Stopped,
            cycle_count,
            completed_cycles: 0,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn cycle_count(&self) -> CycleCount {
        self.cycle_count
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    fn is_finished(&self) -> bool {
        matches!(self.cycle_count, CycleCount::Finite(n) if self.completed_cycles >= n)
    }

    /// Normalized time in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn play(&mut self) {
        match self.status {
            Status::Running => {}
            Status::Paused => self.status = Status::Running,
            Status::Stopped => {
                self.reset();
                self.status = Status::Running;
            }
        }
    }

    pub fn pause(&mut self) {
        if self.status == Status::Running {
            self.status = Status::Paused;
        }
    }

    pub fn stop(&mut self) {
        self.reset();
        self.status = Status::Stopped;
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.completed_cycles = 0;
    }

    /// Advances by `delta`. Returns whether the clock moved.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.status != Status::Running || self.duration.is_zero() {
            return false;
        }

        let period = self.duration.as_nanos();
        let total = (self.elapsed + delta).as_nanos();
        let wrapped = u32::try_from(total / period).unwrap_or(u32::MAX);
        self.completed_cycles = self.completed_cycles.saturating_add(wrapped);

        if self.is_finished() {
            if let CycleCount::Finite(n) = self.cycle_count {
                self.completed_cycles = n;
            }
            self.elapsed = self.duration;
            self.status = Status::Stopped;
            log::debug!("clock finished after {} cycles", self.completed_cycles);
        } else {
            self.elapsed = Duration::from_nanos(u64::try_from(total % period).unwrap_or(u64::MAX));
        }
        true
    }
}

/// Something that can be evaluated at a normalized time `t` in `[0, 1]`.
pub trait Transition {
    type Output;

    fn sample(&self, t: f64) -> Self::Output;
}

impl<F, T> Transition for F
where
    F: Fn(f64) -> T,
{
    type Output = T;

    fn sample(&self, t: f64) -> T {
        self(t)
    }
}

/// One linear lap around a circle, starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathTransition {
    pub center: Point,
    pub radius: f64,
    pub start: Radians,
}

impl PathTransition {
    pub fn new(center: Point, radius: f64, start: Radians) -> Self {
        Self {
            center,
            radius,
            start,
        }
    }
}

impl Transition for PathTransition {
    type Output = Point;

    fn sample(&self, t: f64) -> Point {
        self.center
            .polar(self.radius, Radians::new(self.start.value() + TAU * t))
    }
}

/// Linear rotation from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateTransition {
    pub from: Degrees,
    pub to: Degrees,
}

impl RotateTransition {
    pub fn new(from: Degrees, to: Degrees) -> Self {
        Self { from, to }
    }

    /// A single full turn against the path direction.
    pub fn reverse_turn() -> Self {
        Self::new(Degrees::new(360.0), Degrees::new(0.0))
    }
}

impl Transition for RotateTransition {
    type Output = Degrees;

    fn sample(&self, t: f64) -> Degrees {
        let (from, to) = (self.from.value(), self.to.value());
        Degrees::new(from + (to - from) * t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<P, R> {
    pub t: f64,
    pub position: P,
    pub angle: R,
}

/// A path animation and a rotation animation driven by one clock.
///
/// Both children are always evaluated at the same `t`, so they can never drift.
#[derive(Debug, Clone)]
pub struct ParallelTransition<P, R> {
    clock: Clock,
    path: P,
    rotate: R,
}

impl<P, R> ParallelTransition<P, R>
where
    P: Transition,
    R: Transition,
{
    pub fn new(duration: Duration, path: P, rotate: R) -> Self {
        Self {
            clock: Clock::new(duration, CycleCount::Indefinite),
            path,
            rotate,
        }
    }

    pub fn with_cycle_count(mut self, cycle_count: CycleCount) -> Self {
        self.clock = Clock::new(self.clock.duration(), cycle_count);
        self
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn status(&self) -> Status {
        self.clock.status()
    }

    pub fn play(&mut self) {
        self.clock.play();
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn tick(&mut self, delta: Duration) -> Sample<P::Output, R::Output> {
        self.clock.tick(delta);
        self.sample()
    }

    pub fn sample(&self) -> Sample<P::Output, R::Output> {
        self.sample_at(self.clock.progress())
    }

    pub fn sample_at(&self, t: f64) -> Sample<P::Output, R::Output> {
        Sample {
            t,
            position: self.path.sample(t),
            angle: self.rotate.sample(t),
        }
    }
}
