use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// `.env` in the working directory as a key/value map. The process environment is untouched.
pub fn parse_env_file() -> Result<HashMap<String, String>> {
    parse_env_file_at(Path::new(".env"))
}

/// Parse `KEY=value` lines from `path`. A missing file yields an empty map.
pub fn parse_env_file_at(path: &Path) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    if !path.exists() {
        return Ok(map);
    }
    let content = fs::read_to_string(path)?;
    for (idx, line) in content.lines().enumerate() {
        let s = line.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }
        if let Some(eq) = s.find('=') {
            let key = s[..eq].trim();
            let mut val = s[eq + 1..].trim().to_string();
            // strip one layer of matching quotes
            if val.len() >= 2
                && ((val.starts_with('"') && val.ends_with('"'))
                    || (val.starts_with('\'') && val.ends_with('\'')))
            {
                val = val[1..val.len() - 1].to_string();
            }
            map.insert(key.to_string(), val);
        } else {
            log::warn!("ignoring .env line {} without '=': {}", idx + 1, line);
        }
    }
    Ok(map)
}

/// Export `.env` entries into the process environment. Variables that are already set win.
pub fn load_dotenv_if_present() -> Result<()> {
    load_dotenv_at(Path::new(".env"))
}

pub fn load_dotenv_at(path: &Path) -> Result<()> {
    let map = parse_env_file_at(path)?;
    for (k, v) in map {
        if std::env::var_os(&k).is_none() {
            unsafe {
                std::env::set_var(&k, &v);
            }
        }
    }
    Ok(())
}

/// Write a commented template listing every `NAME_SEARCH_*` variable.
pub fn write_env_template(path: &str) -> Result<()> {
    let mut f = fs::File::create(path)?;
    let template = r#"# name_search environment configuration template
# Copy this file to .env and adjust. Command-line flags override these values.

# Directory holding the record files (one `id,name` row per line)
NAME_SEARCH_DATA_DIR=./data
# Comma separated file names; the file stem becomes the record type
NAME_SEARCH_FILES=imprint.csv,people.csv,place.csv

# Search defaults (optional)
#NAME_SEARCH_MAX_SCORE=2.0
#NAME_SEARCH_STRATEGIES=exact,soundex,fuzzy
#NAME_SEARCH_PARALLEL_FUZZY=false

# Output format: json | csv
#NAME_SEARCH_FORMAT=json

# Logging (RUST_LOG filter; set NAME_SEARCH_TRACING=1 for the tracing subscriber)
#RUST_LOG=info
#NAME_SEARCH_TRACING=0
"#;
    f.write_all(template.as_bytes())?;
    Ok(())
}
