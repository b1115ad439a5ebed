//! Output directory handling: wholesale replace, or compare for `--check`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CodegenError;
use crate::rust_model::RenderedFile;

/// What a write produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub out_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftKind {
    /// On disk, but with different contents.
    Stale,
    /// Rendered, but absent on disk.
    Missing,
    /// On disk, but no longer rendered.
    Extra,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drift {
    pub path: PathBuf,
    pub kind: DriftKind,
}

impl std::fmt::Display for Drift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.kind {
            DriftKind::Stale => "stale",
            DriftKind::Missing => "missing",
            DriftKind::Extra => "extra",
        };
        write!(f, "{label}: {}", self.path.display())
    }
}

/// Delete `out_dir`, recreate it, and write `files` into it.
pub fn replace_output(
    out_dir: &Path,
    spec_path: &Path,
    files: &[RenderedFile],
) -> Result<WriteReport, CodegenError> {
    guard_output_dir(out_dir, spec_path)?;

    if out_dir.exists() {
        fs::remove_dir_all(out_dir).map_err(|source| CodegenError::Write {
            path: out_dir.to_path_buf(),
            source,
        })?;
    }
    fs::create_dir_all(out_dir).map_err(|source| CodegenError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = out_dir.join(&file.path);
        fs::write(&path, &file.contents).map_err(|source| CodegenError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = file.contents.len(), "wrote generated file");
        written.push(file.path.clone());
    }

    Ok(WriteReport {
        out_dir: out_dir.to_path_buf(),
        files: written,
    })
}

/// Compare `files` against what is on disk without writing anything.
pub fn diff_output(out_dir: &Path, files: &[RenderedFile]) -> Result<Vec<Drift>, CodegenError> {
    let mut drift = Vec::new();

    for file in files {
        let path = out_dir.join(&file.path);
        match fs::read_to_string(&path) {
            Ok(current) if current == file.contents => {}
            Ok(_) => drift.push(Drift {
                path: file.path.clone(),
                kind: DriftKind::Stale,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => drift.push(Drift {
                path: file.path.clone(),
                kind: DriftKind::Missing,
            }),
            Err(source) => return Err(CodegenError::Read { path, source }),
        }
    }

    let rendered: BTreeSet<&Path> = files.iter().map(|f| f.path.as_path()).collect();
    let mut on_disk = match fs::read_dir(out_dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|e| PathBuf::from(e.file_name()))
            .collect::<Vec<_>>(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(source) => {
            return Err(CodegenError::Read {
                path: out_dir.to_path_buf(),
                source,
            });
        }
    };
    on_disk.sort();
    for name in on_disk {
        if !rendered.contains(name.as_path()) {
            drift.push(Drift {
                path: name,
                kind: DriftKind::Extra,
            });
        }
    }

    Ok(drift)
}

/// Refuse output locations whose removal would reach outside generated code.
fn guard_output_dir(out_dir: &Path, spec_path: &Path) -> Result<(), CodegenError> {
    let refuse = |reason: &str| CodegenError::UnsafeOutput {
        path: out_dir.to_path_buf(),
        reason: reason.to_string(),
    };

    let out_abs = resolve(out_dir).map_err(|source| CodegenError::Read {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let spec_abs = resolve(spec_path).map_err(|source| CodegenError::Read {
        path: spec_path.to_path_buf(),
        source,
    })?;

    if out_abs.parent().is_none() {
        return Err(refuse("it is a filesystem root"));
    }
    if let Ok(cwd) = std::env::current_dir() {
        let cwd = cwd.canonicalize().unwrap_or(cwd);
        if cwd.starts_with(&out_abs) {
            return Err(refuse("it contains the current working directory"));
        }
    }
    if spec_abs.starts_with(&out_abs) {
        return Err(refuse("it contains the spec file"));
    }
    if out_abs.exists() && !out_abs.is_dir() {
        return Err(refuse("it is not a directory"));
    }
    Ok(())
}

fn resolve(path: &Path) -> std::io::Result<PathBuf> {
    if path.exists() {
        path.canonicalize()
    } else {
        std::path::absolute(path)
    }
}
