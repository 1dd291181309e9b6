//! CLI failures and their exit codes.
//!
//! | code | kind            | raised by                                         |
//! |------|-----------------|---------------------------------------------------|
//! | 2    | (clap)          | unknown flag, bad `--mode` or `--spread` value    |
//! | 10   | `gradient`      | stops that give no gradient: domain, stop count   |
//! | 11   | `io`            | writing the PNG                                   |
//! | 12   | `input`         | unparsable `--colors`, `--css` or `--config`      |
//! | 13   | `serialization` | encoding `--json` output                          |

use colorramp_core::GradientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Every input parsed, but the stops describe no gradient.
    #[error(transparent)]
    Gradient(GradientError),

    #[error("{0}")]
    Io(String),

    /// A color token, CSS stop list or config object did not parse.
    #[error("{0}")]
    Input(String),

    #[error("cannot encode output: {0}")]
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Gradient(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }

    /// Short machine-readable name for `--json` error output.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Gradient(_) => "gradient",
            CliError::Io(_) => "io",
            CliError::Input(_) => "input",
            CliError::Serialization(_) => "serialization",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "exit_code": self.exit_code(),
        })
    }
}

/// Parse failures of user-supplied colors and CSS stops are input errors;
/// only stops that parse but cannot form a gradient exit with 10.
impl From<GradientError> for CliError {
    fn from(e: GradientError) -> Self {
        match e {
            GradientError::InvalidColor(_) | GradientError::InvalidFormat(_) => {
                CliError::Input(e.to_string())
            }
            GradientError::Io(msg) => CliError::Io(msg),
            other => CliError::Gradient(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_colors_are_input_errors() {
        let err = CliError::from(GradientError::InvalidColor(vec!["mauvish".into()]));
        assert_eq!(err.exit_code(), 12);
        assert_eq!(err.kind(), "input");
        assert!(err.to_string().contains("mauvish"));
    }

    #[test]
    fn malformed_css_stops_are_input_errors() {
        let err = CliError::from(GradientError::InvalidFormat("no stops in ``".into()));
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn bad_domains_exit_with_10() {
        let err = CliError::from(GradientError::InvalidDomain(
            "3 positions for 2 colors".into(),
        ));
        assert_eq!(err.exit_code(), 10);
        let err = CliError::from(GradientError::DegenerateDomain { min: 1.0, max: 1.0 });
        assert_eq!(err.exit_code(), 10);
        assert_eq!(err.kind(), "gradient");
    }

    #[test]
    fn collapsed_stops_exit_with_10() {
        let err = CliError::from(GradientError::InsufficientStops(1));
        assert_eq!(err.exit_code(), 10);
        assert_eq!(
            err.to_string(),
            GradientError::InsufficientStops(1).to_string()
        );
    }

    #[test]
    fn png_write_failures_exit_with_11() {
        let err = CliError::from(GradientError::Io("gradient.png: permission denied".into()));
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn json_encoding_failures_exit_with_13() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let err = CliError::from(bad_json.unwrap_err());
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn json_report_names_kind_and_code() {
        let err = CliError::from(GradientError::InvalidColor(vec!["#12".into()]));
        let json = err.to_json();
        assert_eq!(json["kind"], "input");
        assert_eq!(json["exit_code"], 12);
        assert!(json["error"].as_str().unwrap().contains("#12"));
    }
}
