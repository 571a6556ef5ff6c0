// Haptic Bridge Core - Rust haptic engine plugin
// Pattern model, engine session, and FFI surface for haptic actuator control

// Module declarations
pub mod api;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod pattern;

// Re-exports for convenience
pub use api::*;

use cfg_if::cfg_if;

/// Initialize platform logging
///
/// Idempotent; called once when the FFI context is first touched.
pub(crate) fn init_logging() {
    cfg_if! {
        if #[cfg(target_os = "android")] {
            android_logger::init_once(
                android_logger::Config::default()
                    .with_max_level(log::LevelFilter::Debug)
                    .with_tag("HapticBridge"),
            );
        } else {
            let _ = env_logger::Builder::from_default_env().try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_module_structure() {
        // Verify all modules are accessible
        // This ensures the crate compiles with proper module hierarchy
    }
}
