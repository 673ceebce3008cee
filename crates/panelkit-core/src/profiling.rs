//! Profiling utilities based on the `puffin` crate.

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

#[cfg(feature = "profiling")]
use std::sync::OnceLock;

/// Address the puffin HTTP server listens on.
#[cfg(feature = "profiling")]
pub const PROFILING_SERVER_ADDR: &str = "0.0.0.0:8585";

#[cfg(feature = "profiling")]
static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Turns on puffin scope collection without starting a server.
pub fn enable_scopes() {
    puffin::set_scopes_on(true);
}

/// Returns true if scope collection is on.
pub fn scopes_enabled() -> bool {
    puffin::are_scopes_on()
}

/// Enables scope collection and starts the puffin HTTP server so
/// `puffin_viewer` can connect.
///
/// # Example
/// ```no_run
/// use panelkit_core::profiling::init_profiling;
///
/// init_profiling();
/// ```
#[cfg(feature = "profiling")]
pub fn init_profiling() {
    puffin::set_scopes_on(true);

    match puffin_http::Server::new(PROFILING_SERVER_ADDR) {
        Ok(server) => {
            tracing::info!("Puffin profiler server started on http://{}", PROFILING_SERVER_ADDR);
            let _ = PROFILING_SERVER.set(server);
        }
        Err(e) => {
            tracing::error!("Failed to start puffin server: {}", e);
        }
    }
}

/// Marks the start of a new profiler frame.
///
/// Call once per animation tick so scopes are grouped by frame.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
