//! Named easing curves.

/// Easing curves mapping normalized time to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EasingFunction {
    #[default]
    Linear,
    /// Quadratic, slow start.
    QuadIn,
    /// Quadratic, slow end.
    QuadOut,
    /// Quadratic, slow start and end.
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    /// Overshoots the end and settles back.
    Elastic,
    /// Bounces against the end value.
    Bounce,
}

impl EasingFunction {
    /// Applies the curve to `t`, which is clamped to `0.0..=1.0` first.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadIn => t * t,
            EasingFunction::QuadOut => t * (2.0 - t),
            EasingFunction::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            EasingFunction::CubicIn => t * t * t,
            EasingFunction::CubicOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingFunction::CubicInOut => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t * t * t
                } else {
                    let t = t - 2.0;
                    0.5 * (t * t * t + 2.0)
                }
            }
            EasingFunction::Elastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let period = 0.3;
                let shift = period / 4.0;
                2.0f32.powf(-10.0 * t) * ((t - shift) * std::f32::consts::TAU / period).sin() + 1.0
            }
            EasingFunction::Bounce => bounce_out(t),
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}
