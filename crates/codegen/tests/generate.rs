use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use contractkit_codegen::{CodegenError, DriftKind};

fn repo_spec() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../api/openapi.yaml")
}

const BROKEN_SPEC: &str = r##"
openapi: 3.0.3
info: { title: Broken, version: "1" }
paths:
  /widgets:
    post:
      operationId: createWidget
      requestBody:
        content:
          application/json:
            schema: { $ref: "#/components/schemas/WidgetCreate" }
      responses:
        "201":
          description: created
          content:
            application/json:
              schema: { $ref: "#/components/schemas/Widget" }
components:
  schemas:
    Widget:
      type: object
      required: [id]
      properties:
        id: { type: string }
"##;

#[test]
fn generates_a_model_for_every_schema_in_the_spec() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("generated");

    let doc = contractkit_codegen::load(&repo_spec()).unwrap();
    let report = contractkit_codegen::generate(&repo_spec(), &out).unwrap();

    let module = fs::read_to_string(out.join("mod.rs")).unwrap();
    assert!(module.starts_with("// @generated by contractkit-codegen from openapi.yaml."));

    for (name, _) in &doc.components.schemas {
        let file = out.join(format!("{}.rs", contractkit_codegen::naming::to_snake_case(name)));
        let contents = fs::read_to_string(&file)
            .unwrap_or_else(|e| panic!("missing {}: {e}", file.display()));
        assert!(
            contents.contains(&format!("pub struct {name} "))
                || contents.contains(&format!("pub enum {name} "))
                || contents.contains(&format!("pub type {name} ")),
            "{} does not define {name}",
            file.display()
        );
        assert!(module.contains(&format!("::{name};")), "mod.rs does not export {name}");
    }
    assert_eq!(report.files.len(), doc.components.schemas.len() + 1);
}

#[test]
fn person_create_carries_required_fields_and_checks() {
    let files = contractkit_codegen::render(&repo_spec()).unwrap();
    let person_create = files
        .iter()
        .find(|f| f.path == Path::new("person_create.rs"))
        .unwrap();

    assert!(person_create.contents.contains("    pub first_name: String,\n"));
    assert!(person_create.contents.contains("    pub date_of_birth: Option<chrono::NaiveDate>,\n"));
    assert!(person_create.contents.contains(
        "validation::min_length(\"first_name\", &self.first_name, 1, &mut violations);"
    ));
    assert!(person_create.contents.contains("validation::email(\"email\", &self.email, &mut violations);"));
}

#[test]
fn undefined_reference_fails_and_keeps_previous_output() {
    let tmp = tempfile::tempdir().unwrap();
    let spec = tmp.path().join("broken.yaml");
    fs::write(&spec, BROKEN_SPEC).unwrap();
    let out = tmp.path().join("generated");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("mod.rs"), "// previous run\n").unwrap();

    let err = contractkit_codegen::generate(&spec, &out).unwrap_err();

    match &err {
        CodegenError::Invalid(_) => {
            let diags = err.diagnostics();
            assert_eq!(diags.len(), 1);
            assert!(diags[0].message.contains("\"WidgetCreate\""));
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(out.join("mod.rs")).unwrap(), "// previous run\n");
}

#[test]
fn check_mode_detects_hand_edits() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("generated");
    contractkit_codegen::generate(&repo_spec(), &out).unwrap();

    assert!(contractkit_codegen::check_generated(&repo_spec(), &out).unwrap().is_empty());

    fs::write(out.join("health_status.rs"), "// edited\n").unwrap();
    let drift = contractkit_codegen::check_generated(&repo_spec(), &out).unwrap();
    assert_eq!(drift.len(), 1);
    assert_eq!(drift[0].kind, DriftKind::Stale);
}

#[test]
fn cli_exits_non_zero_on_invalid_spec() {
    let tmp = tempfile::tempdir().unwrap();
    let spec = tmp.path().join("broken.yaml");
    fs::write(&spec, BROKEN_SPEC).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_contractkit-codegen"))
        .args(["generate", "--spec"])
        .arg(&spec)
        .arg("--out")
        .arg(tmp.path().join("generated"))
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!tmp.path().join("generated").exists());
}

#[test]
fn cli_validates_the_repository_spec() {
    let status = Command::new(env!("CARGO_BIN_EXE_contractkit-codegen"))
        .args(["validate", "--spec"])
        .arg(repo_spec())
        .status()
        .unwrap();

    assert!(status.success());
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let tmp = tempfile::tempdir().unwrap();
    let spec = tmp.path().join("bad.yaml");
    fs::write(&spec, "openapi: [unterminated\n").unwrap();

    let err = contractkit_codegen::check_spec(&spec).unwrap_err();
    assert!(matches!(err, CodegenError::Parse { .. }));
}

#[test]
fn committed_models_match_the_spec() {
    let committed = Path::new(env!("CARGO_MANIFEST_DIR")).join("../models/src/generated");
    let drift = contractkit_codegen::check_generated(&repo_spec(), &committed).unwrap();
    assert!(drift.is_empty(), "run `make generate`: {drift:?}");
}
