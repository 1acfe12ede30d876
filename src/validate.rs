//! Payload and key validation.
//!
//! A payload is the JSON record `{"env": .., "mode": .., "name": ..}` given
//! on the command line. Checks run in a fixed order: parse, environment,
//! name, mode. The first failure wins.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::{Environment, Mode, Record, TmpsError};

/// Record names: ASCII word characters, at least one.
pub static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?-u:\w)+$").expect("Invalid NAME_REGEX pattern"));

/// Payload modes: leading zero, owner digit 2, 6 or 7, then two digits 1-7.
pub static MODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[267][1-7]{2}$").expect("Invalid MODE_REGEX pattern"));

#[derive(Debug, Deserialize)]
struct Payload {
    env: String,
    mode: String,
    name: String,
}

/// Returns `true` if `name` is an acceptable record name.
pub fn is_valid_name(name: &str) -> bool {
    NAME_REGEX.is_match(name)
}

/// Returns `true` if `mode` is an acceptable payload mode.
pub fn is_valid_mode(mode: &str) -> bool {
    MODE_REGEX.is_match(mode)
}

/// Parse and validate a payload for the `target` environment.
///
/// # Errors
///
/// - [`TmpsError::MalformedJson`] if the text is not JSON or a key is missing
/// - [`TmpsError::EnvMismatch`] if the payload names another environment
/// - [`TmpsError::InvalidName`] if the name is not `\w+`
/// - [`TmpsError::InvalidMode`] if the mode is not `0[267][1-7]{2}`
///
/// # Example
///
/// ```rust
/// use tmps::{validate, Config};
///
/// let dev = Config::default().environment("dev").unwrap();
/// let record = validate::parse_payload(r#"{"env":"dev","mode":"0644","name":"Maurice"}"#, &dev).unwrap();
/// assert_eq!(record.name, "Maurice");
/// assert_eq!(record.mode.to_string(), "0644");
/// ```
pub fn parse_payload(json: &str, target: &Environment) -> Result<Record, TmpsError> {
    let payload: Payload =
        serde_json::from_str(json).map_err(|e| TmpsError::MalformedJson(e.to_string()))?;

    if target.as_str() != payload.env {
        return Err(TmpsError::EnvMismatch {
            expected: target.to_string(),
            found: payload.env,
        });
    }
    if !is_valid_name(&payload.name) {
        return Err(TmpsError::InvalidName(payload.name));
    }
    if !is_valid_mode(&payload.mode) {
        return Err(TmpsError::InvalidMode(payload.mode));
    }
    let mode: Mode = payload.mode.parse()?;

    tracing::debug!(env = %target, name = %payload.name, %mode, "payload accepted");
    Ok(Record::new(payload.env, payload.name, mode))
}

/// Check that a primary key addresses a single entry of the environment
/// directory.
///
/// Keys are not matched against [`NAME_REGEX`], so files created by other
/// means remain readable and removable.
///
/// # Errors
///
/// [`TmpsError::InvalidKey`] for empty keys, `.`/`..`, or keys containing a
/// path separator or NUL.
pub fn check_key(key: &str) -> Result<(), TmpsError> {
    let reason = if key.is_empty() {
        "empty"
    } else if key == "." || key == ".." {
        "refers to a directory"
    } else if key.contains('/') || key.contains('\0') {
        "contains a path separator"
    } else {
        return Ok(());
    };
    Err(TmpsError::InvalidKey {
        key: key.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    fn env(tag: &str) -> Environment {
        Config::new("/unused")
            .with_environments(["dev", "val", "test_env"])
            .environment(tag)
            .unwrap()
    }

    #[test]
    fn valid_payload_is_accepted() {
        let record = parse_payload(
            r#"{"env": "test_env", "mode": "0644", "name": "test_file"}"#,
            &env("test_env"),
        )
        .unwrap();
        assert_eq!(record.env, "test_env");
        assert_eq!(record.name, "test_file");
        assert_eq!(record.mode, Mode::from_bits(0o644));
    }

    #[test]
    fn env_mismatch_is_rejected() {
        let err = parse_payload(r#"{"env":"val","mode":"0644","name":"a"}"#, &env("dev"))
            .unwrap_err();
        assert!(matches!(err, TmpsError::EnvMismatch { ref expected, ref found }
            if expected == "dev" && found == "val"));
    }

    #[test]
    fn invalid_name_is_rejected() {
        let err = parse_payload(
            r#"{"env":"dev","mode":"0644","name":"invalid@name"}"#,
            &env("dev"),
        )
        .unwrap_err();
        assert!(matches!(err, TmpsError::InvalidName(ref n) if n == "invalid@name"));
    }

    #[test]
    fn invalid_mode_is_rejected() {
        let err = parse_payload(r#"{"env":"dev","mode":"0888","name":"a"}"#, &env("dev"))
            .unwrap_err();
        assert!(matches!(err, TmpsError::InvalidMode(ref m) if m == "0888"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = parse_payload("{not json", &env("dev")).unwrap_err();
        assert!(matches!(err, TmpsError::MalformedJson(_)));
    }

    #[test]
    fn missing_key_is_rejected() {
        let err = parse_payload(r#"{"env":"dev","name":"a"}"#, &env("dev")).unwrap_err();
        assert!(matches!(err, TmpsError::MalformedJson(_)));
    }

    #[test]
    fn env_is_checked_before_name_and_mode() {
        let err = parse_payload(r#"{"env":"val","mode":"9","name":"@"}"#, &env("dev"))
            .unwrap_err();
        assert!(matches!(err, TmpsError::EnvMismatch { .. }));
    }

    #[test]
    fn name_pattern() {
        assert!(is_valid_name("Maurice"));
        assert!(is_valid_name("test_file_2"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("a.txt"));
        assert!(!is_valid_name("a b"));
        assert!(!is_valid_name("abc\n"));
        assert!(!is_valid_name("café"));
    }

    #[test]
    fn mode_pattern_is_literal() {
        for ok in ["0644", "0755", "0632", "0271", "0711"] {
            assert!(is_valid_mode(ok), "{ok} should be accepted");
        }
        for bad in ["644", "0888", "0544", "0640", "0,11", "00644", "0644\n"] {
            assert!(!is_valid_mode(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn keys_must_be_single_components() {
        assert!(check_key("Maurice").is_ok());
        assert!(check_key("legacy.txt").is_ok());
        assert!(check_key("").is_err());
        assert!(check_key("..").is_err());
        assert!(check_key("../etc/passwd").is_err());
    }
}
