//! Console logging and the panic hook.

use dp_core::PadError;
use log::{Level, LevelFilter};
use std::str::FromStr;

/// Default console level until the page calls `PadApp::set_log_level`.
pub const DEFAULT_LEVEL: Level = Level::Info;

/// Install the console logger (once) and the panic hook.
pub fn init() {
    console_error_panic_hook_setup();
    // A second mount keeps the logger and level already installed
    let _ = console_log::init_with_level(DEFAULT_LEVEL);
}

/// Parse a level name such as `"debug"` or `"off"`.
pub fn parse_level(name: &str) -> Result<LevelFilter, PadError> {
    LevelFilter::from_str(name.trim())
        .map_err(|_| PadError::InvalidConfig(format!("unknown log level '{name}'")))
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Digit Pad WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
