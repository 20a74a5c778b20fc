use crate::error::ConfigError;

/// Read an environment variable, treating unset and blank values as absent.
pub(crate) fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
    }
}

pub(crate) fn parse_string_env(key: &str, default: String) -> Result<String, ConfigError> {
    Ok(optional_env(key)?.unwrap_or(default))
}

pub(crate) fn parse_bool_env(key: &str, default: bool) -> Result<bool, ConfigError> {
    match optional_env(key)? {
        Some(raw) => parse_bool(key, &raw),
        None => Ok(default),
    }
}

pub(crate) fn parse_u64_env(key: &str, default: u64) -> Result<u64, ConfigError> {
    match optional_env(key)? {
        Some(raw) => parse_u64(key, &raw),
        None => Ok(default),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}

fn parse_u64(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a non-negative integer: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::{parse_bool, parse_u64};
    use crate::error::ConfigError;

    #[test]
    fn bool_parsing_accepts_common_spellings() {
        assert!(parse_bool("K", "TRUE").expect("bool"));
        assert!(parse_bool("K", " on ").expect("bool"));
        assert!(!parse_bool("K", "0").expect("bool"));
        assert!(!parse_bool("K", "no").expect("bool"));
    }

    #[test]
    fn bool_parsing_names_the_offending_key() {
        let err = parse_bool("PRACTICE_STRICT_TRADING_ADDRESS", "maybe").expect_err("reject");
        let ConfigError::InvalidValue { key, message } = err else {
            panic!("expected InvalidValue");
        };
        assert_eq!(key, "PRACTICE_STRICT_TRADING_ADDRESS");
        assert!(message.contains("maybe"), "unexpected message: {message}");
    }

    #[test]
    fn u64_parsing_rejects_negative_values() {
        assert_eq!(parse_u64("K", " 250 ").expect("number"), 250);
        assert!(parse_u64("K", "-5").is_err());
    }
}
