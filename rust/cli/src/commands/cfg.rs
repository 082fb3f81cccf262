//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of every value
//! (default, file or env).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "seed": {
//!     "value": null,
//!     "source": "default"
//!   },
//!   "hand_size": {
//!     "value": 7,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "hand_size": {
            "value": config.hand_size,
            "source": sources.hand_size,
        },
        "exhaustion": {
            "value": config.exhaustion,
            "source": sources.exhaustion,
        },
        "ai": {
            "value": config.ai,
            "source": sources.ai,
        },
        "cpu_delay_ms": {
            "value": config.cpu_delay_ms,
            "source": sources.cpu_delay_ms,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_cfg_displays_json_output() {
        let mut out = Vec::new();
        let result = handle_cfg_command(&mut out);
        assert!(result.is_ok(), "cfg command should succeed");

        let output = String::from_utf8(out).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&output).expect("cfg output should be valid JSON");

        for key in ["seed", "hand_size", "exhaustion", "ai", "cpu_delay_ms"] {
            assert!(json[key].get("value").is_some(), "missing value for {key}");
            assert!(json[key].get("source").is_some(), "missing source for {key}");
        }
        assert!(output.contains('\n'), "output should be pretty-printed");
    }
}
