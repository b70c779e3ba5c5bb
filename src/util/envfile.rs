use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Parse `KEY=VALUE` lines; blank lines and `#` comments are skipped and
/// one level of matching quotes is removed from values.
pub fn parse_env_str(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for (idx, line) in content.lines().enumerate() {
        let s = line.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }
        let Some((key, val)) = s.split_once('=') else {
            log::warn!("ignoring .env line {} without '=': {}", idx + 1, line);
            continue;
        };
        let mut val = val.trim();
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = &val[1..val.len() - 1];
        }
        map.insert(key.trim().to_string(), val.to_string());
    }
    map
}

/// Parse a .env file without touching the process environment.
/// A missing file yields an empty map.
pub fn parse_env_file(path: impl AsRef<Path>) -> Result<HashMap<String, String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(HashMap::new());
    }
    Ok(parse_env_str(&fs::read_to_string(path)?))
}

/// Load `.env` from the working directory into the process environment.
/// Variables already set are not overridden.
pub fn load_dotenv_if_present() -> Result<HashMap<String, String>> {
    let map = parse_env_file(".env")?;
    for (k, v) in &map {
        if std::env::var_os(k).is_none() {
            // Called from main before any threads are spawned.
            unsafe {
                std::env::set_var(k, v);
            }
        }
    }
    Ok(map)
}

pub fn write_env_template(path: impl AsRef<Path>) -> Result<()> {
    let template = r#"# surname_matcher environment configuration template
# Copy this file to .env; every value can also come from the system environment.

# Reference dataset (CSV with a `family_name` header)
NAME_MATCHER_DATASET=sample_data.csv

# Matching
#NAME_MATCHER_THRESHOLD=0.3
#NAME_MATCHER_MAX_RESULTS=10
#NAME_MATCHER_BATCH_SIZE=1000
#NAME_MATCHER_PARALLEL=false

# Presentation: hide results below this score unless --show-all is given
#NAME_MATCHER_MIN_DISPLAY=0.85

# Logging
#RUST_LOG=info
#NAME_MATCHER_TRACING=1
"#;
    fs::write(path, template)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quotes_and_comments() {
        let map = parse_env_str(
            "# comment\n\nNAME_MATCHER_DATASET=\"names.csv\"\nNAME_MATCHER_THRESHOLD = 0.5\nBAD LINE\nQ='x'\nEQ=a=b\n",
        );
        assert_eq!(map.get("NAME_MATCHER_DATASET").map(String::as_str), Some("names.csv"));
        assert_eq!(map.get("NAME_MATCHER_THRESHOLD").map(String::as_str), Some("0.5"));
        assert_eq!(map.get("Q").map(String::as_str), Some("x"));
        assert_eq!(map.get("EQ").map(String::as_str), Some("a=b"));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn lone_quote_is_kept() {
        let map = parse_env_str("K=\"\n");
        assert_eq!(map.get("K").map(String::as_str), Some("\""));
    }

    #[test]
    fn template_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env.template");
        write_env_template(&path).unwrap();
        let map = parse_env_file(&path).unwrap();
        assert_eq!(
            map.get("NAME_MATCHER_DATASET").map(String::as_str),
            Some("sample_data.csv")
        );
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(parse_env_file(dir.path().join("nope")).unwrap().is_empty());
    }
}
