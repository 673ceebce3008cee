//! Timing functions: elapsed milliseconds to animation position.
//!
//! A timing function decides how fast an animation progresses and when it
//! is over. Targets only ever see the resulting position.

use super::easing::EasingFunction;
use panelkit_core::Point;
use std::collections::BTreeMap;

/// Maps elapsed time to a position, usually in `0.0..=1.0`.
pub trait TimingFunction {
    /// Position after `elapsed_ms` milliseconds.
    fn position(&self, elapsed_ms: u32) -> f32;

    /// Whether the animation is over after `elapsed_ms` milliseconds.
    ///
    /// Called once per tick after [`position`](Self::position); stateful
    /// functions may advance internal counters here.
    fn is_done(&mut self, elapsed_ms: u32) -> bool {
        elapsed_ms >= self.length()
    }

    /// Duration of one run in milliseconds.
    fn length(&self) -> u32;
}

impl<T: TimingFunction + ?Sized> TimingFunction for Box<T> {
    fn position(&self, elapsed_ms: u32) -> f32 {
        (**self).position(elapsed_ms)
    }

    fn is_done(&mut self, elapsed_ms: u32) -> bool {
        (**self).is_done(elapsed_ms)
    }

    fn length(&self) -> u32 {
        (**self).length()
    }
}

fn normalized(elapsed_ms: u32, length: u32) -> f32 {
    if length == 0 {
        return 1.0;
    }
    elapsed_ms as f32 / length as f32
}

/// Constant speed from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTimingFunction {
    length: u32,
}

impl LinearTimingFunction {
    pub fn new(length_ms: u32) -> Self {
        Self { length: length_ms }
    }
}

impl TimingFunction for LinearTimingFunction {
    fn position(&self, elapsed_ms: u32) -> f32 {
        normalized(elapsed_ms, self.length).clamp(0.0, 1.0)
    }

    fn length(&self) -> u32 {
        self.length
    }
}

/// `t^factor`: factors above 1 start slow, below 1 start fast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerTimingFunction {
    length: u32,
    factor: f32,
}

impl PowerTimingFunction {
    pub fn new(length_ms: u32, factor: f32) -> Self {
        Self {
            length: length_ms,
            factor,
        }
    }
}

impl TimingFunction for PowerTimingFunction {
    fn position(&self, elapsed_ms: u32) -> f32 {
        normalized(elapsed_ms, self.length)
            .powf(self.factor)
            .clamp(0.0, 1.0)
    }

    fn length(&self) -> u32 {
        self.length
    }
}

/// Piecewise-linear curve through user supplied points.
///
/// Points are keyed by time; positions between two points are linearly
/// interpolated. Past the last point the position is 1.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationTimingFunction {
    length: u32,
    points: BTreeMap<u32, f32>,
}

impl InterpolationTimingFunction {
    /// Creates a curve from `start` at time 0 to `end` at the full length.
    pub fn new(length_ms: u32, start: f32, end: f32) -> Self {
        let mut function = Self {
            length: length_ms,
            points: BTreeMap::new(),
        };
        function.add_point(0.0, start);
        function.add_point(1.0, end);
        function
    }

    /// Adds a point at the normalized `time` (`0.0..=1.0` of the length).
    pub fn add_point(&mut self, time: f32, position: f32) -> &mut Self {
        let time = (self.length as f32 * time.clamp(0.0, 1.0)) as u32;
        self.points.insert(time, position);
        self
    }
}

impl TimingFunction for InterpolationTimingFunction {
    fn position(&self, elapsed_ms: u32) -> f32 {
        if let Some(exact) = self.points.get(&elapsed_ms) {
            return *exact;
        }
        let before = self.points.range(..elapsed_ms).next_back();
        let after = self.points.range(elapsed_ms..).next();
        match (before, after) {
            (Some((&t0, &p0)), Some((&t1, &p1))) => {
                let fraction = (elapsed_ms - t0) as f64 / (t1 - t0) as f64;
                (p0 as f64 + (p1 as f64 - p0 as f64) * fraction) as f32
            }
            (None, Some((_, &first))) => first,
            _ => 1.0,
        }
    }

    fn length(&self) -> u32 {
        self.length
    }
}

/// CSS-style cubic bezier curve anchored at (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierTimingFunction {
    length: u32,
    p1: Point,
    p2: Point,
}

impl CubicBezierTimingFunction {
    pub fn new(length_ms: u32, p1: Point, p2: Point) -> Self {
        Self {
            length: length_ms,
            p1,
            p2,
        }
    }

    pub fn easy(length_ms: u32) -> Self {
        Self::new(length_ms, Point::new(0.25, 0.1), Point::new(0.25, 1.0))
    }

    pub fn easy_in(length_ms: u32) -> Self {
        Self::new(length_ms, Point::new(0.42, 0.0), Point::new(1.0, 1.0))
    }

    pub fn easy_out(length_ms: u32) -> Self {
        Self::new(length_ms, Point::new(0.0, 0.0), Point::new(0.58, 1.0))
    }

    pub fn easy_in_out(length_ms: u32) -> Self {
        Self::new(length_ms, Point::new(0.42, 0.0), Point::new(0.58, 1.0))
    }
}

impl TimingFunction for CubicBezierTimingFunction {
    fn position(&self, elapsed_ms: u32) -> f32 {
        let t = normalized(elapsed_ms, self.length).clamp(0.0, 1.0) as f64;
        // De Casteljau over the curve parameter.
        let (p0, p3) = (Point::ZERO, Point::ONE);
        let a = p0.lerp(self.p1, t);
        let b = self.p1.lerp(self.p2, t);
        let c = self.p2.lerp(p3, t);
        let d = a.lerp(b, t);
        let e = b.lerp(c, t);
        d.lerp(e, t).y as f32
    }

    fn length(&self) -> u32 {
        self.length
    }
}

/// One of the named [`EasingFunction`] curves stretched over a duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EasingTimingFunction {
    length: u32,
    easing: EasingFunction,
}

impl EasingTimingFunction {
    pub fn new(length_ms: u32, easing: EasingFunction) -> Self {
        Self {
            length: length_ms,
            easing,
        }
    }
}

impl TimingFunction for EasingTimingFunction {
    fn position(&self, elapsed_ms: u32) -> f32 {
        self.easing.apply(normalized(elapsed_ms, self.length))
    }

    fn length(&self) -> u32 {
        self.length
    }
}

/// Runs another timing function several times, optionally reversing
/// direction after every run.
pub struct RepeatTimingFunction {
    inner: Box<dyn TimingFunction>,
    repeat_count: u32,
    run_counter: u32,
    auto_reverse: bool,
    reverse: bool,
}

impl RepeatTimingFunction {
    pub fn new(inner: impl TimingFunction + 'static, repeat_count: u32, auto_reverse: bool) -> Self {
        Self {
            inner: Box::new(inner),
            repeat_count,
            run_counter: 0,
            auto_reverse,
            reverse: false,
        }
    }

    fn run_elapsed(&self, elapsed_ms: u32) -> u32 {
        elapsed_ms.saturating_sub(self.inner.length().saturating_mul(self.run_counter))
    }
}

impl TimingFunction for RepeatTimingFunction {
    fn position(&self, elapsed_ms: u32) -> f32 {
        let position = self.inner.position(self.run_elapsed(elapsed_ms));
        if self.reverse { 1.0 - position } else { position }
    }

    fn is_done(&mut self, elapsed_ms: u32) -> bool {
        let run_elapsed = self.run_elapsed(elapsed_ms);
        if self.inner.is_done(run_elapsed) {
            self.run_counter += 1;
            if self.auto_reverse {
                self.reverse = !self.reverse;
            }
            return self.run_counter >= self.repeat_count;
        }
        false
    }

    fn length(&self) -> u32 {
        self.inner.length().saturating_mul(self.repeat_count)
    }
}

impl std::fmt::Debug for RepeatTimingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepeatTimingFunction")
            .field("repeat_count", &self.repeat_count)
            .field("run_counter", &self.run_counter)
            .field("auto_reverse", &self.auto_reverse)
            .finish()
    }
}
