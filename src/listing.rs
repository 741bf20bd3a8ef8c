use std::{
    io::{Result as IoResult, Write},
    net::TcpStream,
    path::Path,
};

use serde::Serialize;
use walkdir::WalkDir;

use crate::{
    config::CONFIG,
    error::ErrorJson,
    http::{Byteable, Response},
};

const DIRECTORY_MISSING_MESSAGE: &str = "Metadata directory not found";

pub fn handle_listing_request(mut stream: TcpStream) -> IoResult<()> {
    println!("LIST metadata");
    let names = match collect_names(&CONFIG.metadata.path) {
        Ok(names) => names,
        // A directory that is missing or cannot be read lists as not found
        Err(e) => {
            eprintln!("Listing metadata failed: {e}");
            return stream.write_all(
                &Response::new(404).body(ErrorJson::new(DIRECTORY_MISSING_MESSAGE)).into_bytes())
        }
    };
    let results_json = Results {
        success: true,
        meta: Meta { total: names.len() },
        names,
    };
    let response = Response::new(200).body(serde_json::to_string(&results_json)?);
    stream.write_all(&response.into_bytes())
}

/// Stem names of the `*.json` files directly inside the metadata directory.
/// Errs when the directory itself cannot be walked.
fn collect_names(dir: &Path) -> Result<Vec<String>, walkdir::Error> {
    let mut names = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let path = entry.into_path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                return None;
            }
            path.file_stem()?.to_str().map(ToString::to_string)
        })
        .collect::<Vec<_>>();
    names.sort();
    Ok(names)
}

#[derive(Serialize)]
struct Results {
    success: bool,
    names: Vec<String>,
    meta: Meta,
}

#[derive(Serialize)]
struct Meta {
    total: usize,
}

#[cfg(test)]
mod tests {
    use super::collect_names;
    use std::fs;

    #[test]
    fn names_are_json_stems_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("zeta.json"), "{}").unwrap();
        fs::write(dir.path().join("My Report.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.json"), "{}").unwrap();

        assert_eq!(collect_names(dir.path()).unwrap(), vec!["My Report", "zeta"]);
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_names(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_names(&dir.path().join("absent")).is_err());
    }

    #[test]
    #[cfg(unix)]
    fn unreadable_directory_is_an_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let sealed = dir.path().join("sealed");
        fs::create_dir(&sealed).unwrap();
        fs::write(sealed.join("hidden.json"), "{}").unwrap();
        fs::set_permissions(&sealed, fs::Permissions::from_mode(0o000)).unwrap();

        // Root bypasses permission bits, so only assert when they apply
        let denied = fs::read_dir(&sealed).is_err();
        if denied {
            assert!(collect_names(&sealed).is_err());
        }

        fs::set_permissions(&sealed, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
