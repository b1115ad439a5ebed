//! Structural checks a spec must pass before anything is generated.
//!
//! All problems are collected so one run reports everything.

use std::collections::HashSet;

use crate::document::{OpenApiDocument, Parameter, Schema, SCHEMA_REF_PREFIX};
use crate::error::{CodegenError, Diagnostic, Diagnostics};

/// Validate `doc`, returning every problem found.
pub fn diagnose(doc: &OpenApiDocument) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    if !doc.openapi.starts_with("3.") {
        diags.push(Diagnostic::new(
            "openapi",
            format!("unsupported version {:?} (expected 3.x)", doc.openapi),
        ));
    }
    if doc.info.title.trim().is_empty() {
        diags.push(Diagnostic::new("info.title", "must not be empty"));
    }

    let known: HashSet<&str> = doc
        .components
        .schemas
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();

    let mut seen_names = HashSet::new();
    for (name, schema) in &doc.components.schemas {
        if !seen_names.insert(name.as_str()) {
            diags.push(Diagnostic::new(
                format!("components.schemas.{name}"),
                "defined more than once",
            ));
        }
        check_schema(schema, &format!("components.schemas.{name}"), &known, &mut diags);
    }

    let mut operation_ids = HashSet::new();
    for (path, item) in &doc.paths {
        if !path.starts_with('/') {
            diags.push(Diagnostic::new(path.clone(), "path must start with '/'"));
        }

        for (i, param) in item.parameters.iter().enumerate() {
            check_parameter(param, &format!("{path} parameters[{i}]"), &known, &mut diags);
        }

        let mut operations = item.operations().peekable();
        if operations.peek().is_none() {
            diags.push(Diagnostic::new(path.clone(), "declares no operations"));
        }

        for (method, op) in operations {
            let loc = format!("{method} {path}");

            match op.operation_id.as_deref() {
                Some(id) if !operation_ids.insert(id) => {
                    diags.push(Diagnostic::new(
                        &loc,
                        format!("duplicate operationId {id:?}"),
                    ));
                }
                _ => {}
            }

            for (i, param) in op.parameters.iter().enumerate() {
                check_parameter(param, &format!("{loc} parameters[{i}]"), &known, &mut diags);
            }

            for name in template_params(path) {
                let declared = item
                    .parameters
                    .iter()
                    .chain(op.parameters.iter())
                    .any(|p| p.location == "path" && p.name == name);
                if !declared {
                    diags.push(Diagnostic::new(
                        &loc,
                        format!("path parameter {{{name}}} is not declared"),
                    ));
                }
            }

            if let Some(body) = &op.request_body {
                if body.reference.is_some() {
                    diags.push(Diagnostic::new(
                        format!("{loc} requestBody"),
                        "referenced request bodies are not supported; inline the body",
                    ));
                }
                for (media, content) in &body.content {
                    if let Some(schema) = &content.schema {
                        check_schema(
                            schema,
                            &format!("{loc} requestBody {media}"),
                            &known,
                            &mut diags,
                        );
                    }
                }
            }

            if op.responses.is_empty() {
                diags.push(Diagnostic::new(&loc, "declares no responses"));
            }
            for (status, response) in &op.responses {
                let rloc = format!("{loc} responses.{status}");
                if response.reference.is_some() {
                    diags.push(Diagnostic::new(
                        &rloc,
                        "referenced responses are not supported; inline the response",
                    ));
                    continue;
                }
                let described = response
                    .description
                    .as_deref()
                    .is_some_and(|d| !d.trim().is_empty());
                if !described {
                    diags.push(Diagnostic::new(&rloc, "missing description"));
                }
                for (media, content) in &response.content {
                    if let Some(schema) = &content.schema {
                        check_schema(schema, &format!("{rloc} {media}"), &known, &mut diags);
                    }
                }
            }
        }
    }

    diags
}

/// Validate `doc`, failing with every problem found.
pub fn validate(doc: &OpenApiDocument) -> Result<(), CodegenError> {
    let diags = diagnose(doc);
    if diags.is_empty() {
        Ok(())
    } else {
        Err(CodegenError::Invalid(Diagnostics(diags)))
    }
}

fn check_parameter(
    param: &Parameter,
    loc: &str,
    known: &HashSet<&str>,
    diags: &mut Vec<Diagnostic>,
) {
    if param.reference.is_some() {
        diags.push(Diagnostic::new(
            loc,
            "referenced parameters are not supported; inline the parameter",
        ));
        return;
    }
    if param.name.is_empty() {
        diags.push(Diagnostic::new(loc, "parameter has no name"));
    }
    if !matches!(param.location.as_str(), "query" | "header" | "path" | "cookie") {
        diags.push(Diagnostic::new(
            loc,
            format!("parameter `in` must be query, header, path or cookie (got {:?})", param.location),
        ));
    }
    if param.location == "path" && !param.required {
        diags.push(Diagnostic::new(
            loc,
            format!("path parameter {:?} must be required", param.name),
        ));
    }
    if let Some(schema) = &param.schema {
        check_schema(schema, loc, known, diags);
    }
}

fn check_schema(schema: &Schema, loc: &str, known: &HashSet<&str>, diags: &mut Vec<Diagnostic>) {
    if let Some(reference) = &schema.reference {
        match reference.strip_prefix(SCHEMA_REF_PREFIX) {
            Some(name) if known.contains(name) => {}
            Some(name) => diags.push(Diagnostic::new(
                loc,
                format!("references undefined schema {name:?}"),
            )),
            None => diags.push(Diagnostic::new(
                loc,
                format!("unsupported reference {reference:?} (expected {SCHEMA_REF_PREFIX}<Name>)"),
            )),
        }
        return;
    }

    for name in &schema.required {
        if !schema.properties.iter().any(|(p, _)| p == name) {
            diags.push(Diagnostic::new(
                loc,
                format!("required property {name:?} is not defined"),
            ));
        }
    }

    if let (Some(min), Some(max)) = (schema.min_length, schema.max_length) {
        if min > max {
            diags.push(Diagnostic::new(loc, "minLength is greater than maxLength"));
        }
    }
    if let (Some(min), Some(max)) = (schema.minimum, schema.maximum) {
        if min > max {
            diags.push(Diagnostic::new(loc, "minimum is greater than maximum"));
        }
    }

    for (name, prop) in &schema.properties {
        check_schema(prop, &format!("{loc}.{name}"), known, diags);
    }
    if let Some(items) = &schema.items {
        check_schema(items, &format!("{loc}[]"), known, diags);
    }
    if schema.primary_type() == Some("array") && schema.items.is_none() {
        diags.push(Diagnostic::new(loc, "array schema has no items"));
    }
    for (i, s) in schema
        .all_of
        .iter()
        .chain(&schema.one_of)
        .chain(&schema.any_of)
        .enumerate()
    {
        check_schema(s, &format!("{loc}<{i}>"), known, diags);
    }
}

/// Names of `{param}` segments in a path template.
fn template_params(path: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                out.push(&after[..end]);
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> OpenApiDocument {
        serde_yml::from_str(yaml).unwrap()
    }

    const VALID: &str = r##"
openapi: 3.0.3
info: { title: Demo, version: "1" }
paths:
  /things/{thing_id}:
    parameters:
      - { name: thing_id, in: path, required: true, schema: { type: string } }
    get:
      operationId: getThing
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema: { $ref: "#/components/schemas/Thing" }
components:
  schemas:
    Thing:
      type: object
      required: [id]
      properties:
        id: { type: string }
"##;

    #[test]
    fn accepts_well_formed_spec() {
        assert_eq!(diagnose(&parse(VALID)), vec![]);
    }

    #[test]
    fn reports_undefined_reference() {
        let yaml = VALID.replace("#/components/schemas/Thing\" }", "#/components/schemas/Missing\" }");
        let diags = diagnose(&parse(&yaml));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].location, "GET /things/{thing_id} responses.200 application/json");
        assert!(diags[0].message.contains("\"Missing\""));
    }

    #[test]
    fn reports_response_without_description() {
        let yaml = VALID.replace("description: ok", "summary: ok");
        let diags = diagnose(&parse(&yaml));
        assert!(diags.iter().any(|d| d.message == "missing description"));
    }

    #[test]
    fn reports_operation_without_responses() {
        let yaml = r##"
openapi: 3.0.3
info: { title: Demo, version: "1" }
paths:
  /ping:
    get:
      operationId: ping
      responses: {}
"##;
        let diags = diagnose(&parse(yaml));
        assert_eq!(diags, vec![Diagnostic::new("GET /ping", "declares no responses")]);
    }

    #[test]
    fn reports_undeclared_path_parameter() {
        let yaml = VALID.replace("name: thing_id", "name: other");
        let diags = diagnose(&parse(&yaml));
        assert!(diags
            .iter()
            .any(|d| d.message == "path parameter {thing_id} is not declared"));
    }

    #[test]
    fn reports_duplicate_operation_ids_and_bad_version() {
        let yaml = r##"
openapi: "2.0"
info: { title: Demo, version: "1" }
paths:
  /a:
    get:
      operationId: same
      responses: { "200": { description: ok } }
  /b:
    get:
      operationId: same
      responses: { "200": { description: ok } }
"##;
        let diags = diagnose(&parse(yaml));
        assert!(diags.iter().any(|d| d.location == "openapi"));
        assert!(diags
            .iter()
            .any(|d| d.location == "GET /b" && d.message.contains("duplicate operationId")));
    }

    #[test]
    fn reports_required_property_missing_from_properties() {
        let yaml = VALID.replace("required: [id]", "required: [id, name]");
        let diags = diagnose(&parse(&yaml));
        assert_eq!(
            diags,
            vec![Diagnostic::new(
                "components.schemas.Thing",
                "required property \"name\" is not defined"
            )]
        );
    }

    #[test]
    fn validate_wraps_diagnostics() {
        let yaml = VALID.replace("#/components/schemas/Thing\" }", "#/components/schemas/Missing\" }");
        let err = validate(&parse(&yaml)).unwrap_err();
        assert_eq!(err.diagnostics().len(), 1);
        assert!(err.to_string().starts_with("spec failed validation (1 problem(s)):"));
    }

    #[test]
    fn template_params_extracts_names() {
        assert_eq!(template_params("/a/{x}/b/{y_id}"), vec!["x", "y_id"]);
        assert!(template_params("/plain").is_empty());
    }
}
