//! Diagnostic logging for the `brick` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary. `RUST_LOG` takes precedence over the verbosity flags.
//!
//! | Flags | Filter |
//! |-------|--------|
//! | `-q` | `brickmosaic=error` |
//! | (none) | `brickmosaic=warn` |
//! | `-v` | `brickmosaic=debug` |
//! | `-vv` | `brickmosaic=trace` |

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a verbosity level.
///
/// `verbosity` is the number of `-v` flags, or `-1` for `-q`.
pub fn default_directive(verbosity: i8) -> &'static str {
    match verbosity {
        i8::MIN..=-1 => "brickmosaic=error",
        0 => "brickmosaic=warn",
        1 => "brickmosaic=debug",
        _ => "brickmosaic=trace",
    }
}

/// Install the stderr subscriber. Calling it again is a no-op.
pub fn init(verbosity: i8) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(verbosity).into()))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(-1), "brickmosaic=error");
        assert_eq!(default_directive(0), "brickmosaic=warn");
        assert_eq!(default_directive(1), "brickmosaic=debug");
        assert_eq!(default_directive(2), "brickmosaic=trace");
        assert_eq!(default_directive(5), "brickmosaic=trace");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(0);
        init(2);
    }
}
