//! Tracing/logging (shared setup).

pub mod panic;
pub mod tracing;

pub use crate::panic::install_panic_hook;
pub use crate::tracing::LogFormat;

/// Initialize process-wide tracing/logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}
