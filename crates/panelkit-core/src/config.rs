/// Runtime configuration consumed by `Frame::with_config` in `panelkit-ui`.
#[derive(Debug, Clone)]
pub struct Config {
    pub profiling: ProfilingMode,
    /// Rate at which the host is expected to call `Frame::tick`.
    pub frame_rate_hz: u32,
    /// Duration of animated child resizes in row/column containers.
    pub row_column_resize_animation_ms: u32,
    /// Separator thickness used when none is given explicitly.
    pub default_separator_width: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            profiling: ProfilingMode::Off,
            frame_rate_hz: 60,
            row_column_resize_animation_ms: 200,
            default_separator_width: 10.0,
        }
    }
}

impl Config {
    /// Milliseconds between two ticks at the configured frame rate.
    pub fn frame_interval_ms(&self) -> u32 {
        1000 / self.frame_rate_hz.max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingMode {
    /// Profiling is disabled
    Off,
    /// Scopes are collected but not served
    On,
    /// Scopes are collected and served to `puffin_viewer` over HTTP
    WithServer,
}
