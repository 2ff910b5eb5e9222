//! Execution search path registration.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::{ProvisionError, ProvisionResult};

/// Environment variable naming the file later workflow steps read `PATH`
/// additions from.
pub const GITHUB_PATH_ENV: &str = "GITHUB_PATH";

/// Make `dir` discoverable on the execution search path.
///
/// Prepends `dir` to this process's `PATH` and, when `GITHUB_PATH` is set,
/// records it there for subsequent steps of the job.
pub fn add_path(dir: &Path) -> ProvisionResult<()> {
    prepend_process_path(dir)?;

    if let Some(file) = std::env::var_os(GITHUB_PATH_ENV).filter(|v| !v.is_empty()) {
        append_path_file(Path::new(&file), dir)?;
    }

    tracing::debug!(dir = %dir.display(), "Added to search path");
    Ok(())
}

fn prepend_process_path(dir: &Path) -> ProvisionResult<()> {
    let current = std::env::var_os("PATH").unwrap_or_default();
    let mut entries: Vec<PathBuf> = vec![dir.to_path_buf()];
    entries.extend(std::env::split_paths(&current).filter(|p| p != dir));

    let joined = std::env::join_paths(entries).map_err(|e| {
        ProvisionError::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()),
        )
    })?;
    std::env::set_var("PATH", joined);
    Ok(())
}

/// Append `dir` on its own line to a path file.
pub fn append_path_file(file: &Path, dir: &Path) -> ProvisionResult<()> {
    let mut handle = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .map_err(|e| ProvisionError::io(file, e))?;
    writeln!(handle, "{}", dir.display()).map_err(|e| ProvisionError::io(file, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_path_file_adds_lines() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("github_path");
        std::fs::write(&file, "/existing\n").unwrap();

        append_path_file(&file, Path::new("/tools/anvil-zksync/0.6.1/x64")).unwrap();
        append_path_file(&file, Path::new("/tools/other")).unwrap();

        let contents = std::fs::read_to_string(&file).unwrap();
        assert_eq!(
            contents,
            "/existing\n/tools/anvil-zksync/0.6.1/x64\n/tools/other\n"
        );
    }

    #[test]
    fn test_append_path_file_creates_file() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("new_path_file");

        append_path_file(&file, Path::new("/tools/bin")).unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "/tools/bin\n");
    }

    #[test]
    fn test_prepend_process_path() {
        let temp = tempfile::tempdir().unwrap();
        prepend_process_path(temp.path()).unwrap();

        let path = std::env::var_os("PATH").unwrap();
        let first = std::env::split_paths(&path).next().unwrap();
        assert_eq!(first, temp.path());
    }
}
