//! `contractkit-codegen` — Rust data models from an OpenAPI 3.x document.
//!
//! Pipeline: parse (`document`) → validate (`validate`) → lower (`ir`) →
//! render (`rust_model`) → write (`writer`). Everything up to the write
//! happens in memory, so a bad spec never touches the output directory.

pub mod document;
pub mod error;
pub mod ir;
pub mod naming;
pub mod rust_model;
pub mod validate;
pub mod writer;

use std::fs;
use std::path::Path;

use tracing::info;

pub use document::OpenApiDocument;
pub use error::{CodegenError, Diagnostic};
pub use rust_model::RenderedFile;
pub use writer::{Drift, DriftKind, WriteReport};

/// Read and parse a spec file (no validation).
pub fn load(spec_path: &Path) -> Result<OpenApiDocument, CodegenError> {
    let text = fs::read_to_string(spec_path).map_err(|source| CodegenError::Read {
        path: spec_path.to_path_buf(),
        source,
    })?;
    serde_yml::from_str(&text).map_err(|source| CodegenError::Parse {
        path: spec_path.to_path_buf(),
        source,
    })
}

/// Parse and validate a spec file.
pub fn check_spec(spec_path: &Path) -> Result<OpenApiDocument, CodegenError> {
    let doc = load(spec_path)?;
    validate::validate(&doc)?;
    info!(
        spec = %spec_path.display(),
        title = %doc.info.title,
        paths = doc.paths.len(),
        schemas = doc.components.schemas.len(),
        "spec is valid"
    );
    Ok(doc)
}

/// Render the model files for a spec without touching the filesystem.
pub fn render(spec_path: &Path) -> Result<Vec<RenderedFile>, CodegenError> {
    let doc = check_spec(spec_path)?;
    let models = ir::lower(&doc)?;
    let source_name = spec_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| spec_path.display().to_string());
    Ok(rust_model::render(&models, &source_name))
}

/// Regenerate `out_dir` from the spec, replacing whatever was there.
pub fn generate(spec_path: &Path, out_dir: &Path) -> Result<WriteReport, CodegenError> {
    let files = render(spec_path)?;
    let report = writer::replace_output(out_dir, spec_path, &files)?;
    info!(
        out_dir = %out_dir.display(),
        files = report.files.len(),
        "generated models"
    );
    Ok(report)
}

/// Compare what `generate` would write with what is on disk.
pub fn check_generated(spec_path: &Path, out_dir: &Path) -> Result<Vec<Drift>, CodegenError> {
    let files = render(spec_path)?;
    writer::diff_output(out_dir, &files)
}
