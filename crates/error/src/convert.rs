use crate::{ErrorCode, ErrorContext, SqlFedError};

impl From<std::io::Error> for SqlFedError {
    fn from(err: std::io::Error) -> Self {
        SqlFedError::new(ErrorCode::InternalPanic, err.to_string())
    }
}

impl From<serde_json::Error> for SqlFedError {
    fn from(err: serde_json::Error) -> Self {
        SqlFedError::new(ErrorCode::SerializationFailed, err.to_string())
    }
}

impl From<serde_yaml::Error> for SqlFedError {
    fn from(err: serde_yaml::Error) -> Self {
        SqlFedError::new(ErrorCode::InvalidYaml, err.to_string())
    }
}

impl From<config::ConfigError> for SqlFedError {
    fn from(err: config::ConfigError) -> Self {
        let field = match &err {
            config::ConfigError::NotFound(key) => Some(key.clone()),
            config::ConfigError::Type { key, .. } => key.clone(),
            _ => None,
        };
        SqlFedError::new(ErrorCode::InvalidConfig, err.to_string())
            .with_context(ErrorContext::Config {
                file_path: None,
                field,
            })
            .with_hint("Check the configuration file and SQLFED__* environment overrides")
    }
}

/// Levenshtein-based suggestion used for operator and kind hints.
pub fn find_closest_match(target: &str, options: &[String]) -> Option<String> {
    let mut best_match: Option<&str> = None;
    let mut min_distance = usize::MAX;

    for option in options {
        let distance = levenshtein(target, option);
        if distance < min_distance && distance <= 3 {
            min_distance = distance;
            best_match = Some(option.as_str());
        }
    }

    best_match.map(|s| s.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut dp = vec![vec![0; b.len() + 1]; a.len() + 1];

    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, val) in dp[0].iter_mut().enumerate() {
        *val = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = std::cmp::min(
                std::cmp::min(dp[i - 1][j] + 1, dp[i][j - 1] + 1),
                dp[i - 1][j - 1] + cost,
            );
        }
    }

    dp[a.len()][b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("<=", "=<"), 2);
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("LIKE", "LIKE"), 0);
    }

    #[test]
    fn test_find_closest_match() {
        let options = vec!["LIKE".to_string(), "NOT LIKE".to_string(), "<=>".to_string()];

        assert_eq!(find_closest_match("LIKE", &options), Some("LIKE".to_string()));
        assert_eq!(find_closest_match("LIKEE", &options), Some("LIKE".to_string()));
        assert_eq!(find_closest_match("<>=", &options), Some("<=>".to_string()));
        assert_eq!(find_closest_match("completely_different", &options), None);
    }

    #[test]
    fn test_io_error_mapping() {
        let io_err = std::io::Error::other("File error");
        let err: SqlFedError = io_err.into();
        assert_eq!(err.code, ErrorCode::InternalPanic);
        assert!(err.message.contains("File error"));
    }

    #[test]
    fn test_json_error_mapping() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SqlFedError = json_err.into();
        assert_eq!(err.code, ErrorCode::SerializationFailed);
    }
}
