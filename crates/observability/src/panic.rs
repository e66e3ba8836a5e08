//! Panic reporting through the log stream.

use std::backtrace::Backtrace;
use std::panic::PanicHookInfo;

/// Route every panic (location, message, backtrace) to `tracing` at `error`.
///
/// Panics caught further up (for example by a request handler's catch layer)
/// are still reported here first, while the stack is intact.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let backtrace = Backtrace::force_capture();
        ::tracing::error!(
            location = %location(info),
            panic = %payload(info),
            backtrace = %backtrace,
            "panic"
        );
    }));
}

fn location(info: &PanicHookInfo<'_>) -> String {
    info.location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
        .unwrap_or_else(|| "unknown".to_string())
}

fn payload<'a>(info: &'a PanicHookInfo<'_>) -> &'a str {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}
