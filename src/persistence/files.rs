use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the per-user and per-directory board folder
pub const BOARD_DIR_NAME: &str = ".choreboard";

/// Get the board directory - checks for a local .choreboard first, then falls back to ~/.choreboard
pub fn get_board_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;

    if let Some(local_dir) = find_local_board(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(BOARD_DIR_NAME))
}

/// Find a local .choreboard directory by walking up the directory tree
fn find_local_board(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let board_dir = current.join(BOARD_DIR_NAME);
        if board_dir.is_dir() {
            return Some(board_dir);
        }

        current = current.parent()?;
    }
}

/// Ensure the board directory exists
pub fn ensure_board_dir() -> Result<PathBuf> {
    let dir = get_board_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .choreboard directory in the current directory
pub fn init_local_board() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let board_dir = current_dir.join(BOARD_DIR_NAME);

    if board_dir.exists() {
        anyhow::bail!("Board directory already exists: {}", board_dir.display());
    }

    fs::create_dir_all(&board_dir)
        .with_context(|| format!("Failed to create directory: {}", board_dir.display()))?;

    Ok(board_dir)
}

/// Path to settings.json (token, roster, timezone)
pub fn settings_file() -> Result<PathBuf> {
    Ok(ensure_board_dir()?.join("settings.json"))
}

/// Directory the log files roll in
pub fn logs_dir() -> Result<PathBuf> {
    Ok(ensure_board_dir()?.join("logs"))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_replaces_content() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        atomic_write(&path, "first").unwrap();
        atomic_write(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_find_local_board_walks_up() {
        let temp_dir = tempdir().unwrap();
        let board = temp_dir.path().join(BOARD_DIR_NAME);
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&board).unwrap();
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_board(&nested), Some(board));
    }

    #[test]
    fn test_find_local_board_ignores_plain_file() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("x");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join(BOARD_DIR_NAME), "not a dir").unwrap();

        // Whatever an ancestor of the temp dir holds, the file itself is skipped
        assert_ne!(find_local_board(&nested), Some(nested.join(BOARD_DIR_NAME)));
    }
}
