//! Rust source rendering for lowered models.
//!
//! Output is deterministic: same spec, same bytes. Generated structs call
//! into `crate::validation` of the consuming crate for their checks.

use std::collections::{BTreeSet, HashSet};
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::ir::{AliasModel, EnumModel, Field, Model, RustType, StructModel};

/// One rendered file, path relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Render every model to its own file plus a `mod.rs` that re-exports them.
pub fn render(models: &[Model], source_name: &str) -> Vec<RenderedFile> {
    let banner = banner(source_name);
    let validated = structs_needing_validation(models);

    let mut files = Vec::with_capacity(models.len() + 1);
    files.push(RenderedFile {
        path: PathBuf::from("mod.rs"),
        contents: render_mod(models, &banner),
    });

    for model in models {
        let contents = match model {
            Model::Struct(m) => render_struct(m, &banner, &validated),
            Model::Enum(m) => render_enum(m, &banner),
            Model::Alias(m) => render_alias(m, &banner),
        };
        files.push(RenderedFile {
            path: PathBuf::from(format!("{}.rs", crate::naming::unraw(&model.module_name()))),
            contents,
        });
    }

    files
}

fn banner(source_name: &str) -> String {
    format!("// @generated by contractkit-codegen from {source_name}. Do not edit by hand.\n")
}

fn render_mod(models: &[Model], banner: &str) -> String {
    let mut out = String::from(banner);
    out.push('\n');
    for model in models {
        let _ = writeln!(out, "mod {};", model.module_name());
    }
    out.push('\n');
    for model in models {
        let _ = writeln!(out, "pub use {}::{};", model.module_name(), model.name());
    }
    out
}

fn render_struct(model: &StructModel, banner: &str, validated: &HashSet<String>) -> String {
    let checks = validation_lines(model, validated);

    let mut out = String::from(banner);
    out.push('\n');
    out.push_str("use serde::{Deserialize, Serialize};\n\n");
    let siblings: Vec<&str> = referenced_types(model).into_iter().collect();
    match siblings.as_slice() {
        [] => {}
        [one] => {
            let _ = writeln!(out, "use super::{one};\n");
        }
        many => {
            let _ = writeln!(out, "use super::{{{}}};\n", many.join(", "));
        }
    }
    if checks.is_empty() {
        out.push_str("use crate::validation::{FieldViolation, Validate};\n\n");
    } else {
        out.push_str("use crate::validation::{self, FieldViolation, Validate};\n\n");
    }

    push_doc(&mut out, model.doc.as_deref(), "");
    out.push_str("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]\n");
    let _ = writeln!(out, "pub struct {} {{", model.name);
    for field in &model.fields {
        push_doc(&mut out, field.doc.as_deref(), "    ");
        match (field.needs_rename(), field.optional) {
            (true, true) => {
                let _ = writeln!(out, "    #[serde(rename = {:?}, default)]", field.json_name);
            }
            (true, false) => {
                let _ = writeln!(out, "    #[serde(rename = {:?})]", field.json_name);
            }
            (false, true) => out.push_str("    #[serde(default)]\n"),
            (false, false) => {}
        }
        let ty = if field.optional {
            format!("Option<{}>", field.ty.render())
        } else {
            field.ty.render()
        };
        let _ = writeln!(out, "    pub {}: {},", field.rust_name, ty);
    }
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl Validate for {} {{", model.name);
    out.push_str("    fn validate(&self) -> Vec<FieldViolation> {\n");
    if checks.is_empty() {
        out.push_str("        Vec::new()\n");
    } else {
        out.push_str("        let mut violations = Vec::new();\n");
        for line in &checks {
            let _ = writeln!(out, "        {line}");
        }
        out.push_str("        violations\n");
    }
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

/// Other generated types a struct's fields name, for `use super::...`.
fn referenced_types(model: &StructModel) -> BTreeSet<&str> {
    fn named(ty: &RustType) -> Option<&str> {
        match ty {
            RustType::Named(name) => Some(name.as_str()),
            RustType::Vec(inner) => named(inner),
            _ => None,
        }
    }
    model
        .fields
        .iter()
        .filter_map(|f| named(&f.ty))
        .filter(|name| *name != model.name)
        .collect()
}

fn render_enum(model: &EnumModel, banner: &str) -> String {
    let mut out = String::from(banner);
    out.push('\n');
    out.push_str("use serde::{Deserialize, Serialize};\n\n");

    push_doc(&mut out, model.doc.as_deref(), "");
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]\n");
    let _ = writeln!(out, "pub enum {} {{", model.name);
    for v in &model.variants {
        let _ = writeln!(out, "    #[serde(rename = {:?})]", v.wire);
        let _ = writeln!(out, "    {},", v.ident);
    }
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl {} {{", model.name);
    out.push_str("    /// Value on the wire.\n");
    out.push_str("    pub fn as_str(&self) -> &'static str {\n");
    out.push_str("        match self {\n");
    for v in &model.variants {
        let _ = writeln!(out, "            Self::{} => {:?},", v.ident, v.wire);
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl std::fmt::Display for {} {{", model.name);
    out.push_str("    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {\n");
    out.push_str("        f.write_str(self.as_str())\n");
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

fn render_alias(model: &AliasModel, banner: &str) -> String {
    let mut out = String::from(banner);
    out.push('\n');
    push_doc(&mut out, model.doc.as_deref(), "");
    let _ = writeln!(out, "pub type {} = {};", model.name, model.ty.render());
    out
}

fn push_doc(out: &mut String, doc: Option<&str>, indent: &str) {
    let Some(doc) = doc else { return };
    for line in doc.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            let _ = writeln!(out, "{indent}///");
        } else {
            let _ = writeln!(out, "{indent}/// {line}");
        }
    }
}

/// Statements for the body of `validate`, already indented relative to it.
fn validation_lines(model: &StructModel, validated: &HashSet<String>) -> Vec<String> {
    let mut lines = Vec::new();
    for field in &model.fields {
        let checks = if field.optional {
            field_checks(field, "value", "*value", validated)
        } else {
            let access = format!("self.{}", field.rust_name);
            field_checks(field, &format!("&{access}"), &access, validated)
        };
        if checks.is_empty() {
            continue;
        }
        if field.optional {
            lines.push(format!("if let Some(value) = &self.{} {{", field.rust_name));
            lines.extend(checks.into_iter().map(|c| format!("    {c}")));
            lines.push("}".to_string());
        } else {
            lines.extend(checks);
        }
    }
    lines
}

/// `by_ref` borrows the value; `by_val` reads a `Copy` value.
fn field_checks(field: &Field, by_ref: &str, by_val: &str, validated: &HashSet<String>) -> Vec<String> {
    let name = format!("{:?}", field.json_name);
    let c = &field.constraints;
    let mut out = Vec::new();

    if field.ty.is_string() {
        if let Some(min) = c.min_length {
            out.push(format!("validation::min_length({name}, {by_ref}, {min}, &mut violations);"));
        }
        if let Some(max) = c.max_length {
            out.push(format!("validation::max_length({name}, {by_ref}, {max}, &mut violations);"));
        }
        if c.email {
            out.push(format!("validation::email({name}, {by_ref}, &mut violations);"));
        }
        if !c.one_of.is_empty() {
            let allowed = c
                .one_of
                .iter()
                .map(|v| format!("{v:?}"))
                .collect::<Vec<_>>()
                .join(", ");
            out.push(format!(
                "validation::one_of({name}, {by_ref}, &[{allowed}], &mut violations);"
            ));
        }
    }

    if field.ty.is_numeric() && (c.minimum.is_some() || c.maximum.is_some()) {
        out.push(format!(
            "validation::range({name}, {by_val} as f64, {}, {}, &mut violations);",
            render_bound(c.minimum),
            render_bound(c.maximum),
        ));
    }

    let receiver = by_ref.trim_start_matches('&');
    match &field.ty {
        RustType::Named(target) if validated.contains(target) => {
            out.push(format!(
                "validation::nested({name}, {receiver}.validate(), &mut violations);"
            ));
        }
        RustType::Vec(inner) => {
            if let RustType::Named(target) = inner.as_ref() {
                if validated.contains(target) {
                    let json = &field.json_name;
                    out.push(format!("for (index, item) in {receiver}.iter().enumerate() {{"));
                    out.push(format!(
                        "    validation::nested(&format!(\"{json}[{{index}}]\"), item.validate(), &mut violations);"
                    ));
                    out.push("}".to_string());
                }
            }
        }
        _ => {}
    }

    out
}

fn render_bound(bound: Option<f64>) -> String {
    match bound {
        Some(v) => format!("Some({v:?})"),
        None => "None".to_string(),
    }
}

/// Structs whose `validate` does real work, directly or through fields.
fn structs_needing_validation(models: &[Model]) -> HashSet<String> {
    let structs: Vec<&StructModel> = models
        .iter()
        .filter_map(|m| match m {
            Model::Struct(s) => Some(s),
            _ => None,
        })
        .collect();

    let mut needed: HashSet<String> = structs
        .iter()
        .filter(|s| s.fields.iter().any(has_own_checks))
        .map(|s| s.name.clone())
        .collect();

    loop {
        let before = needed.len();
        for s in &structs {
            if needed.contains(&s.name) {
                continue;
            }
            let refers = s.fields.iter().any(|f| match &f.ty {
                RustType::Named(t) => needed.contains(t),
                RustType::Vec(inner) => matches!(inner.as_ref(), RustType::Named(t) if needed.contains(t)),
                _ => false,
            });
            if refers {
                needed.insert(s.name.clone());
            }
        }
        if needed.len() == before {
            return needed;
        }
    }
}

fn has_own_checks(field: &Field) -> bool {
    let c = &field.constraints;
    (field.ty.is_string()
        && (c.min_length.is_some() || c.max_length.is_some() || c.email || !c.one_of.is_empty()))
        || (field.ty.is_numeric() && (c.minimum.is_some() || c.maximum.is_some()))
}
