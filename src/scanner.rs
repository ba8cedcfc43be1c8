use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::config::DirectoryTable;
use crate::error::{GenError, GenErrorKind};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum EntryKind {
    File,
    Dir,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

#[derive(Debug, PartialEq)]
pub struct ModuleDir {
    pub name: String,
    pub files: Vec<Entry>,
}

#[derive(Debug, PartialEq, Default)]
pub struct Scan {
    pub loose_files: Vec<Entry>,
    pub modules: Vec<ModuleDir>,
    pub skipped: Vec<String>,
}

/// Lists the immediate entries of `dir`, ordered by file name.
pub fn read_entries(dir: &Path) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.with_context(|| format!("reading directory {}", dir.display()))?;
        let name = entry.file_name().to_str().map(str::to_string).ok_or_else(|| {
            GenError::new(
                GenErrorKind::InvalidFileName,
                &format!("{:?} in {} is not valid UTF-8", entry.file_name(), dir.display()),
            )
        })?;
        let kind = if entry.file_type().is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };
        entries.push(Entry {
            name,
            path: entry.into_path(),
            kind,
        });
    }
    Ok(entries)
}

pub fn scan(root: &Path, table: &DirectoryTable) -> Result<Scan> {
    let mut scan = Scan::default();

    for entry in read_entries(root)? {
        match entry.kind {
            EntryKind::File => scan.loose_files.push(entry),
            EntryKind::Dir if table.is_included(&entry.name) => {
                let files = read_entries(&entry.path)?
                    .into_iter()
                    .filter(|e| {
                        if e.kind == EntryKind::Dir {
                            log::debug!("ignoring nested directory {}", e.path.display());
                        }
                        e.kind == EntryKind::File
                    })
                    .collect();
                scan.modules.push(ModuleDir {
                    name: entry.name,
                    files,
                });
            }
            EntryKind::Dir => {
                log::info!("skipping directory {}", entry.name);
                scan.skipped.push(entry.name);
            }
        }
    }

    Ok(scan)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(path: &Path) {
        fs::write(path, "").unwrap();
    }

    #[test]
    fn entries_are_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.lox"));
        touch(&dir.path().join("a.lox"));
        fs::create_dir(dir.path().join("c")).unwrap();

        let entries = read_entries(dir.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.lox", "b.lox", "c"]);
        assert_eq!(entries[2].kind, EntryKind::Dir);
    }

    #[test]
    fn scan_filters_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("empty_file.lox"));
        fs::create_dir(root.join("print")).unwrap();
        touch(&root.join("print").join("missing_argument.lox"));
        fs::create_dir(root.join("benchmark")).unwrap();
        touch(&root.join("benchmark").join("fib.lox"));

        let scan = scan(root, &DirectoryTable::default()).unwrap();

        assert_eq!(scan.loose_files.len(), 1);
        assert_eq!(scan.loose_files[0].name, "empty_file.lox");
        assert_eq!(scan.modules.len(), 1);
        assert_eq!(scan.modules[0].name, "print");
        assert_eq!(scan.modules[0].files[0].name, "missing_argument.lox");
        assert_eq!(scan.skipped, vec!["benchmark".to_string()]);
    }

    #[test]
    fn nested_directories_are_not_listed() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("block").join("nested")).unwrap();
        touch(&root.join("block").join("scope.lox"));

        let scan = scan(root, &DirectoryTable::default()).unwrap();
        assert_eq!(scan.modules[0].files.len(), 1);
        assert_eq!(scan.modules[0].files[0].name, "scope.lox");
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan(&dir.path().join("nope"), &DirectoryTable::default()).unwrap_err();
        assert!(err.to_string().contains("reading directory"));
    }
}
