use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Kind filter for tree counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    All,
}

impl EntryKind {
    /// Whether an entry of the given type counts for this kind.
    pub fn matches(self, file_type: fs::FileType) -> bool {
        match self {
            EntryKind::File => file_type.is_file(),
            EntryKind::Directory => file_type.is_dir(),
            EntryKind::All => file_type.is_file() || file_type.is_dir(),
        }
    }
}

/// Count entries of the given kind anywhere below `path`; the root itself
/// is excluded. Missing or unreadable paths contribute nothing.
pub fn count_entries(path: impl AsRef<Path>, kind: EntryKind) -> usize {
    WalkDir::new(path)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| kind.matches(entry.file_type()))
        .count()
}

pub fn count_files(path: impl AsRef<Path>) -> usize {
    count_entries(path, EntryKind::File)
}

pub fn count_dirs(path: impl AsRef<Path>) -> usize {
    count_entries(path, EntryKind::Directory)
}

/// Copy a file or directory tree into `to`.
///
/// A directory lands as `to/<name>` with its hierarchy below it. A file is
/// copied into `to` when `to` is an existing directory, otherwise `to` is
/// taken as the destination path itself (copy-rename). A nonexistent
/// source is a no-op.
pub fn copy_tree(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    let (from, to) = (from.as_ref(), to.as_ref());
    if from.is_dir() {
        let dest = create_destination_dir(from, to)?;
        for entry in
            fs::read_dir(from).with_context(|| format!("failed to list {}", from.display()))?
        {
            let entry = entry.with_context(|| format!("failed to list {}", from.display()))?;
            copy_tree(entry.path(), &dest)?;
        }
    } else if from.is_file() {
        copy_file(from, to)?;
    } else {
        warn!("Copy source does not exist, nothing to do: {}", from.display());
    }
    Ok(())
}

/// Move a file or directory tree into `to`.
///
/// Files are renamed into the destination; directories are copied and then
/// removed from the source side. Moving a directory onto an existing file
/// is a no-op.
pub fn move_tree(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    let (from, to) = (from.as_ref(), to.as_ref());
    if to.is_file() && from.is_dir() {
        warn!(
            "Refusing to move directory {} onto file {}",
            from.display(),
            to.display()
        );
        return Ok(());
    }
    if from.is_dir() {
        copy_tree(from, to)?;
        remove_tree(from)?;
    } else if from.is_file() {
        let dest = file_destination(from, to)?;
        fs::rename(from, &dest)
            .with_context(|| format!("failed to move {} to {}", from.display(), dest.display()))?;
        debug!("Moved {} -> {}", from.display(), dest.display());
    } else {
        warn!("Move source does not exist, nothing to do: {}", from.display());
    }
    Ok(())
}

/// Delete a file or directory tree, children first. Missing paths are a
/// no-op.
pub fn remove_tree(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        for entry in
            fs::read_dir(path).with_context(|| format!("failed to list {}", path.display()))?
        {
            let entry = entry.with_context(|| format!("failed to list {}", path.display()))?;
            remove_tree(entry.path())?;
        }
        fs::remove_dir(path)
            .with_context(|| format!("failed to remove directory {}", path.display()))?;
    } else if path.is_file() {
        fs::remove_file(path)
            .with_context(|| format!("failed to remove file {}", path.display()))?;
    }
    Ok(())
}

/// Read a whole file as UTF-8 text.
pub fn read_all_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Async variant of [`read_all_text`] for use under the tokio runtime.
pub async fn read_all_text_async(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

fn create_destination_dir(source_dir: &Path, to: &Path) -> Result<PathBuf> {
    let name = source_dir
        .file_name()
        .with_context(|| format!("copy source has no file name: {}", source_dir.display()))?;
    let dest = to.join(name);
    if !dest.exists() {
        fs::create_dir_all(&dest)
            .with_context(|| format!("failed to create {}", dest.display()))?;
    }
    Ok(dest)
}

fn file_destination(source: &Path, to: &Path) -> Result<PathBuf> {
    if to.is_dir() {
        let name = source
            .file_name()
            .with_context(|| format!("source has no file name: {}", source.display()))?;
        Ok(to.join(name))
    } else {
        Ok(to.to_path_buf())
    }
}

fn copy_file(source: &Path, to: &Path) -> Result<()> {
    let dest = file_destination(source, to)?;
    fs::copy(source, &dest)
        .with_context(|| format!("failed to copy {} to {}", source.display(), dest.display()))?;
    debug!("Copied {} -> {}", source.display(), dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_entry_kind_predicates() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();

        let file_type = fs::metadata(&file).unwrap().file_type();
        let dir_type = fs::metadata(temp_dir.path()).unwrap().file_type();

        assert!(EntryKind::File.matches(file_type));
        assert!(!EntryKind::File.matches(dir_type));
        assert!(EntryKind::Directory.matches(dir_type));
        assert!(!EntryKind::Directory.matches(file_type));
        assert!(EntryKind::All.matches(file_type));
        assert!(EntryKind::All.matches(dir_type));
    }

    #[test]
    fn test_count_excludes_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        fs::write(temp_dir.path().join("a.txt"), "x").unwrap();

        assert_eq!(count_dirs(temp_dir.path()), 1);
        assert_eq!(count_files(temp_dir.path()), 1);
        assert_eq!(count_entries(temp_dir.path(), EntryKind::All), 2);
    }

    #[test]
    fn test_count_on_missing_path_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nowhere");
        assert_eq!(count_dirs(&missing), 0);
        assert_eq!(count_files(&missing), 0);
    }

    #[test]
    fn test_copy_file_with_rename() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("a.txt");
        fs::write(&source, "payload").unwrap();

        let renamed = temp_dir.path().join("b.txt");
        copy_tree(&source, &renamed).unwrap();
        assert_eq!(fs::read_to_string(&renamed).unwrap(), "payload");
        assert!(source.exists());
    }

    #[test]
    fn test_read_all_text_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_all_text(temp_dir.path().join("missing.txt")).is_err());
    }
}
