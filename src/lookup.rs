use std::{
    collections::HashMap,
    env::current_dir,
    fs::read_to_string,
    io::{Result as IoResult, Write},
    net::TcpStream,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::Value;

use crate::{
    config::CONFIG,
    error::ErrorJson,
    http::{Byteable, Response},
};

use self::error::LookupError;

mod error;

pub const METADATA_PATH_HEADER: &str = "x-metadata-path";

const NOT_FOUND_MESSAGE: &str = "JSON file not found";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

pub fn handle_lookup_request(mut stream: TcpStream, name: &str, headers: &HashMap<String, String>) -> IoResult<()> {
    println!("LOOKUP {name}");
    let outcome = lookup(name, &base_dir(headers))
        .and_then(|found| found
            .map(|f| serde_json::to_string(&f).map_err(LookupError::from))
            .transpose());

    let response = match outcome {
        Ok(Some(body)) => Response::new(200).body(body),
        Ok(None) => Response::new(404).body(ErrorJson::new(NOT_FOUND_MESSAGE)),
        Err(e) => {
            eprintln!("Lookup for [{name}] failed unexpectedly: {e}");
            Response::new(500).body(ErrorJson::new(INTERNAL_ERROR_MESSAGE))
        }
    };
    stream.write_all(&response.into_bytes())
}

/// Directory to search, from the x-metadata-path header when present,
/// otherwise the configured default.
fn base_dir(headers: &HashMap<String, String>) -> PathBuf {
    headers.get(METADATA_PATH_HEADER)
        .map(PathBuf::from)
        .unwrap_or_else(|| CONFIG.metadata.path.clone())
}

#[derive(Serialize, Debug, PartialEq)]
pub struct FoundJson {
    success: bool,
    data: Value,
    #[serde(rename = "fileName")]
    file_name: String,
}

/// Tries every filename variant in order and returns the first one that both
/// reads and parses. `Ok(None)` means all variants missed.
fn lookup(name: &str, base_dir: &Path) -> Result<Option<FoundJson>, LookupError> {
    let search_dir = current_dir()?.join(base_dir);
    for candidate in candidates(name) {
        let Some(data) = try_candidate(&search_dir, &candidate) else {
            continue;
        };
        return Ok(Some(FoundJson { success: true, data, file_name: candidate }));
    }
    Ok(None)
}

/// Ordered filename variants derived from the requested name:
/// verbatim, stripped with underscores, stripped with hyphens,
/// and everything outside `[A-Za-z0-9_-]` replaced by underscores.
fn candidates(name: &str) -> [String; 4] {
    let stripped = name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>();
    [
        name.to_string(),
        stripped.replace(' ', "_"),
        stripped.replace(' ', "-"),
        name.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect(),
    ]
}

// A miss is any failure at all: absent file, unreadable file, invalid JSON.
fn try_candidate(search_dir: &Path, candidate: &str) -> Option<Value> {
    let file_path = search_dir.join(format!("{candidate}.json"));
    let content = read_to_string(file_path).ok()?;
    serde_json::from_str(&content).ok()
}
