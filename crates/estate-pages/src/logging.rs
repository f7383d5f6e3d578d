//! Console logging for the admin page scripts
//!
//! | Macro | Enabled when | WASM | Non-WASM |
//! |-------|--------------|------|----------|
//! | `debug_log!` | `debug_assertions` + `debug-hooks` | `console.debug` | `eprintln!` |
//! | `info_log!` | `debug_assertions` | `console.info` | `eprintln!` |
//! | `warn_log!` | `debug_assertions` | `console.warn` | `eprintln!` |
//! | `error_log!` | `debug_assertions` | `console.error` | `eprintln!` |
//!
//! The message is only formatted when its level is enabled, so disabled
//! calls cost a branch on a constant.
//!
//! ```ignore
//! use estate_pages::{error_log, info_log};
//!
//! info_log!("photo formset ready ({} rows)", rows);
//! error_log!("address verification failed: {}", error);
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
	Debug,
	Info,
	Warn,
	Error,
}

impl Level {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Debug => "DEBUG",
			Self::Info => "INFO",
			Self::Warn => "WARN",
			Self::Error => "ERROR",
		}
	}
}

/// Whether messages at `level` reach the console in this build.
pub const fn enabled(level: Level) -> bool {
	match level {
		Level::Debug => cfg!(all(debug_assertions, feature = "debug-hooks")),
		_ => cfg!(debug_assertions),
	}
}

#[doc(hidden)]
pub fn emit(level: Level, message: &str) {
	#[cfg(target_arch = "wasm32")]
	{
		let message = wasm_bindgen::JsValue::from_str(message);
		match level {
			Level::Debug => web_sys::console::debug_1(&message),
			Level::Info => web_sys::console::info_1(&message),
			Level::Warn => web_sys::console::warn_1(&message),
			Level::Error => web_sys::console::error_1(&message),
		}
	}

	#[cfg(not(target_arch = "wasm32"))]
	eprintln!("[{}] {}", level.as_str(), message);
}

/// Logs a debug message (requires `debug-hooks` feature + `debug_assertions`)
#[macro_export]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		if $crate::logging::enabled($crate::logging::Level::Debug) {
			$crate::logging::emit($crate::logging::Level::Debug, &format!($($arg)*));
		}
	}};
}

/// Logs an info message (requires `debug_assertions`)
#[macro_export]
macro_rules! info_log {
	($($arg:tt)*) => {{
		if $crate::logging::enabled($crate::logging::Level::Info) {
			$crate::logging::emit($crate::logging::Level::Info, &format!($($arg)*));
		}
	}};
}

/// Logs a warning message (requires `debug_assertions`)
#[macro_export]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		if $crate::logging::enabled($crate::logging::Level::Warn) {
			$crate::logging::emit($crate::logging::Level::Warn, &format!($($arg)*));
		}
	}};
}

/// Logs an error message (requires `debug_assertions`)
#[macro_export]
macro_rules! error_log {
	($($arg:tt)*) => {{
		if $crate::logging::enabled($crate::logging::Level::Error) {
			$crate::logging::emit($crate::logging::Level::Error, &format!($($arg)*));
		}
	}};
}
