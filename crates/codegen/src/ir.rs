//! Intermediate model: component schemas lowered to Rust-shaped definitions.

use std::collections::{HashMap, HashSet};

use crate::document::{OpenApiDocument, Schema};
use crate::error::CodegenError;
use crate::naming::{escape_ident, to_pascal_case, to_snake_case, unraw};

#[derive(Debug, Clone, PartialEq)]
pub enum RustType {
    String,
    I32,
    I64,
    F64,
    Bool,
    Date,
    DateTime,
    Uuid,
    Json,
    Vec(Box<RustType>),
    Named(String),
}

impl RustType {
    pub fn render(&self) -> String {
        match self {
            Self::String => "String".to_string(),
            Self::I32 => "i32".to_string(),
            Self::I64 => "i64".to_string(),
            Self::F64 => "f64".to_string(),
            Self::Bool => "bool".to_string(),
            Self::Date => "chrono::NaiveDate".to_string(),
            Self::DateTime => "chrono::DateTime<chrono::Utc>".to_string(),
            Self::Uuid => "uuid::Uuid".to_string(),
            Self::Json => "serde_json::Value".to_string(),
            Self::Vec(inner) => format!("Vec<{}>", inner.render()),
            Self::Named(name) => name.clone(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::I32 | Self::I64 | Self::F64)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }
}

/// Field-level checks carried into the generated `Validate` impl.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub email: bool,
    pub one_of: Vec<String>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Key on the wire.
    pub json_name: String,
    /// Escaped Rust identifier.
    pub rust_name: String,
    pub ty: RustType,
    pub optional: bool,
    pub doc: Option<String>,
    pub constraints: Constraints,
}

impl Field {
    pub fn needs_rename(&self) -> bool {
        unraw(&self.rust_name) != self.json_name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructModel {
    pub name: String,
    pub doc: Option<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub wire: String,
    pub ident: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumModel {
    pub name: String,
    pub doc: Option<String>,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AliasModel {
    pub name: String,
    pub doc: Option<String>,
    pub ty: RustType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Model {
    Struct(StructModel),
    Enum(EnumModel),
    Alias(AliasModel),
}

impl Model {
    pub fn name(&self) -> &str {
        match self {
            Self::Struct(m) => &m.name,
            Self::Enum(m) => &m.name,
            Self::Alias(m) => &m.name,
        }
    }

    /// Module (file stem) the model is rendered into.
    pub fn module_name(&self) -> String {
        escape_ident(&to_snake_case(self.name()))
    }
}

/// Lower every component schema, in spec order.
///
/// Expects a document that already passed validation.
pub fn lower(doc: &OpenApiDocument) -> Result<Vec<Model>, CodegenError> {
    let mut models = Vec::with_capacity(doc.components.schemas.len());
    let mut names = HashSet::new();
    let mut modules = HashSet::new();

    for (name, schema) in &doc.components.schemas {
        let model = lower_schema(name, schema)?;
        if !names.insert(model.name().to_string()) {
            return Err(CodegenError::unsupported(
                name,
                format!("type name {} collides with another schema", model.name()),
            ));
        }
        if !modules.insert(model.module_name()) {
            return Err(CodegenError::unsupported(
                name,
                format!("module name {} collides with another schema", model.module_name()),
            ));
        }
        models.push(model);
    }

    reject_recursive_values(&models)?;
    Ok(models)
}

/// A schema that holds itself by value, directly or through other schemas,
/// has no finite Rust layout. Arrays break the cycle.
fn reject_recursive_values(models: &[Model]) -> Result<(), CodegenError> {
    let edges: HashMap<&str, Vec<&str>> = models
        .iter()
        .map(|m| (m.name(), by_value_refs(m)))
        .collect();
    for model in models {
        let mut seen = HashSet::new();
        if reaches(model.name(), model.name(), &edges, &mut seen) {
            return Err(CodegenError::unsupported(
                model.name(),
                "schema contains itself by value; reference it through an array instead",
            ));
        }
    }
    Ok(())
}

fn by_value_refs(model: &Model) -> Vec<&str> {
    fn named(ty: &RustType) -> Option<&str> {
        match ty {
            RustType::Named(name) => Some(name.as_str()),
            _ => None,
        }
    }
    match model {
        Model::Struct(m) => m.fields.iter().filter_map(|f| named(&f.ty)).collect(),
        Model::Alias(m) => named(&m.ty).into_iter().collect(),
        Model::Enum(_) => Vec::new(),
    }
}

fn reaches<'a>(
    from: &'a str,
    target: &str,
    edges: &HashMap<&'a str, Vec<&'a str>>,
    seen: &mut HashSet<&'a str>,
) -> bool {
    let Some(next) = edges.get(from) else {
        return false;
    };
    for &n in next {
        if n == target {
            return true;
        }
        if seen.insert(n) && reaches(n, target, edges, seen) {
            return true;
        }
    }
    false
}

fn lower_schema(name: &str, schema: &Schema) -> Result<Model, CodegenError> {
    let type_name = to_pascal_case(name);
    let doc = clean_doc(schema.description.as_deref());

    if schema.is_composite() {
        return Err(CodegenError::unsupported(
            name,
            "allOf/oneOf/anyOf composition is not supported",
        ));
    }

    if let Some(values) = &schema.enum_values {
        if schema.primary_type().is_some_and(|t| t != "string") {
            return Err(CodegenError::unsupported(name, "only string enums are supported"));
        }
        let wires = string_enum_values(name, values)?;
        if wires.is_empty() {
            return Err(CodegenError::unsupported(name, "enum declares no values"));
        }
        let mut idents = HashSet::new();
        let mut variants = Vec::with_capacity(wires.len());
        for wire in wires {
            let ident = to_pascal_case(&wire);
            if !idents.insert(ident.clone()) {
                return Err(CodegenError::unsupported(
                    name,
                    format!("enum values collide on variant {ident}"),
                ));
            }
            variants.push(Variant { wire, ident });
        }
        return Ok(Model::Enum(EnumModel {
            name: type_name,
            doc,
            variants,
        }));
    }

    let is_object = schema.primary_type() == Some("object")
        || (schema.primary_type().is_none() && !schema.properties.is_empty());

    if is_object && !schema.properties.is_empty() {
        let mut fields = Vec::with_capacity(schema.properties.len());
        let mut idents = HashSet::new();
        for (prop_name, prop) in &schema.properties {
            let location = format!("{name}.{prop_name}");
            let rust_name = escape_ident(&to_snake_case(prop_name));
            if !idents.insert(rust_name.clone()) {
                return Err(CodegenError::unsupported(
                    name,
                    format!("property {prop_name:?} collides with another field as {rust_name}"),
                ));
            }
            let required = schema.required.iter().any(|r| r == prop_name);
            fields.push(Field {
                json_name: prop_name.clone(),
                rust_name,
                ty: lower_type(&location, prop)?,
                optional: !required || prop.allows_null(),
                doc: clean_doc(prop.description.as_deref()),
                constraints: constraints_for(&location, prop)?,
            });
        }
        return Ok(Model::Struct(StructModel {
            name: type_name,
            doc,
            fields,
        }));
    }

    Ok(Model::Alias(AliasModel {
        name: type_name,
        doc,
        ty: lower_type(name, schema)?,
    }))
}

fn lower_type(location: &str, schema: &Schema) -> Result<RustType, CodegenError> {
    if let Some(target) = schema.ref_name() {
        return Ok(RustType::Named(to_pascal_case(target)));
    }
    if schema.is_composite() {
        return Err(CodegenError::unsupported(
            location,
            "inline allOf/oneOf/anyOf is not supported",
        ));
    }

    let ty = match (schema.primary_type(), schema.format.as_deref()) {
        (Some("string"), Some("date")) => RustType::Date,
        (Some("string"), Some("date-time")) => RustType::DateTime,
        (Some("string"), Some("uuid")) => RustType::Uuid,
        (Some("string"), _) => RustType::String,
        (Some("integer"), Some("int32")) => RustType::I32,
        (Some("integer"), _) => RustType::I64,
        (Some("number"), _) => RustType::F64,
        (Some("boolean"), _) => RustType::Bool,
        (Some("array"), _) => {
            let item = match &schema.items {
                Some(items) => lower_type(&format!("{location}[]"), items)?,
                None => RustType::Json,
            };
            RustType::Vec(Box::new(item))
        }
        (Some("object"), _) | (None, _) if schema.properties.is_empty() => RustType::Json,
        (Some("object"), _) | (None, _) => {
            return Err(CodegenError::unsupported(
                location,
                "inline object with properties; move it to components.schemas and $ref it",
            ));
        }
        (Some(other), _) => {
            return Err(CodegenError::unsupported(
                location,
                format!("unknown type {other:?}"),
            ));
        }
    };
    Ok(ty)
}

fn constraints_for(location: &str, schema: &Schema) -> Result<Constraints, CodegenError> {
    if schema.reference.is_some() {
        return Ok(Constraints::default());
    }
    let one_of = match &schema.enum_values {
        Some(values) => string_enum_values(location, values)?,
        None => Vec::new(),
    };
    Ok(Constraints {
        min_length: schema.min_length,
        max_length: schema.max_length,
        minimum: schema.minimum,
        maximum: schema.maximum,
        email: schema.format.as_deref() == Some("email"),
        one_of,
    })
}

fn string_enum_values(location: &str, values: &[serde_yml::Value]) -> Result<Vec<String>, CodegenError> {
    values
        .iter()
        .map(|v| match v {
            serde_yml::Value::String(s) => Ok(s.clone()),
            other => Err(CodegenError::unsupported(
                location,
                format!("enum value {other:?} is not a string"),
            )),
        })
        .collect()
}

/// Collapse a description into doc-comment lines (trimmed, blank lines kept).
fn clean_doc(description: Option<&str>) -> Option<String> {
    let text = description?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower_yaml(yaml: &str) -> Result<Vec<Model>, CodegenError> {
        let doc: OpenApiDocument = serde_yml::from_str(yaml).unwrap();
        lower(&doc)
    }

    const HEADER: &str = "openapi: 3.0.3\ninfo: { title: T, version: \"1\" }\n";

    #[test]
    fn lowers_object_fields_with_optionality_and_formats() {
        let yaml = format!(
            "{HEADER}{}",
            r##"
components:
  schemas:
    PersonCreate:
      type: object
      required: [firstName, email]
      properties:
        firstName: { type: string, minLength: 1 }
        email: { type: string, format: email }
        born: { type: string, format: date }
        tags: { type: array, items: { type: string } }
        manager: { $ref: "#/components/schemas/PersonRef" }
    PersonRef:
      type: string
"##
        );
        let models = lower_yaml(&yaml).unwrap();
        let Model::Struct(person) = &models[0] else {
            panic!("expected struct");
        };
        assert_eq!(person.name, "PersonCreate");

        let first = &person.fields[0];
        assert_eq!(first.rust_name, "first_name");
        assert!(first.needs_rename());
        assert!(!first.optional);
        assert_eq!(first.constraints.min_length, Some(1));

        let email = &person.fields[1];
        assert!(email.constraints.email);
        assert!(!email.needs_rename());

        assert_eq!(person.fields[2].ty, RustType::Date);
        assert!(person.fields[2].optional);
        assert_eq!(person.fields[3].ty.render(), "Vec<String>");
        assert_eq!(person.fields[4].ty, RustType::Named("PersonRef".to_string()));

        assert_eq!(
            models[1],
            Model::Alias(AliasModel {
                name: "PersonRef".to_string(),
                doc: None,
                ty: RustType::String,
            })
        );
    }

    #[test]
    fn lowers_string_enum_to_variants() {
        let yaml = format!(
            "{HEADER}{}",
            r##"
components:
  schemas:
    party_status:
      type: string
      enum: [active, in-review]
"##
        );
        let models = lower_yaml(&yaml).unwrap();
        let Model::Enum(status) = &models[0] else {
            panic!("expected enum");
        };
        assert_eq!(status.name, "PartyStatus");
        assert_eq!(models[0].module_name(), "party_status");
        let idents: Vec<_> = status.variants.iter().map(|v| v.ident.as_str()).collect();
        assert_eq!(idents, ["Active", "InReview"]);
    }

    #[test]
    fn nullable_required_field_is_optional() {
        let yaml = format!(
            "{HEADER}{}",
            r##"
components:
  schemas:
    Out:
      type: object
      required: [phone]
      properties:
        phone: { type: string, nullable: true }
"##
        );
        let models = lower_yaml(&yaml).unwrap();
        let Model::Struct(out) = &models[0] else {
            panic!("expected struct");
        };
        assert!(out.fields[0].optional);
    }

    #[test]
    fn rejects_inline_nested_object() {
        let yaml = format!(
            "{HEADER}{}",
            r##"
components:
  schemas:
    Outer:
      type: object
      properties:
        inner:
          type: object
          properties:
            x: { type: string }
"##
        );
        let err = lower_yaml(&yaml).unwrap_err();
        match err {
            CodegenError::Unsupported { schema, .. } => assert_eq!(schema, "Outer.inner"),
            other => panic!("expected Unsupported, got {other:?}"),
        }
    }

    #[test]
    fn rejects_composition() {
        let yaml = format!(
            "{HEADER}{}",
            r##"
components:
  schemas:
    Mixed:
      allOf:
        - { type: object, properties: { a: { type: string } } }
"##
        );
        assert!(matches!(
            lower_yaml(&yaml),
            Err(CodegenError::Unsupported { .. })
        ));
    }

    #[test]
    fn keyword_properties_are_raw_identifiers() {
        let yaml = format!(
            "{HEADER}{}",
            r##"
components:
  schemas:
    Token:
      type: object
      required: [type]
      properties:
        type: { type: string }
"##
        );
        let models = lower_yaml(&yaml).unwrap();
        let Model::Struct(token) = &models[0] else {
            panic!("expected struct");
        };
        assert_eq!(token.fields[0].rust_name, "r#type");
        assert!(!token.fields[0].needs_rename());
    }

    #[test]
    fn rejects_schema_that_contains_itself() {
        let yaml = format!(
            "{HEADER}{}",
            r##"
components:
  schemas:
    Node:
      type: object
      properties:
        next: { $ref: "#/components/schemas/Node" }
"##
        );
        match lower_yaml(&yaml).unwrap_err() {
            CodegenError::Unsupported { schema, reason } => {
                assert_eq!(schema, "Node");
                assert!(reason.contains("itself"));
            }
            other => panic!("expected Unsupported, got {other:?}"),
        }
    }

    #[test]
    fn rejects_mutual_containment() {
        let yaml = format!(
            "{HEADER}{}",
            r##"
components:
  schemas:
    Person:
      type: object
      required: [party]
      properties:
        party: { $ref: "#/components/schemas/Party" }
    Party:
      type: object
      properties:
        owner: { $ref: "#/components/schemas/Person" }
"##
        );
        assert!(matches!(
            lower_yaml(&yaml),
            Err(CodegenError::Unsupported { .. })
        ));
    }

    #[test]
    fn array_of_self_is_allowed() {
        let yaml = format!(
            "{HEADER}{}",
            r##"
components:
  schemas:
    Tree:
      type: object
      properties:
        children:
          type: array
          items: { $ref: "#/components/schemas/Tree" }
"##
        );
        let models = lower_yaml(&yaml).unwrap();
        let Model::Struct(tree) = &models[0] else {
            panic!("expected struct");
        };
        assert_eq!(tree.fields[0].ty.render(), "Vec<Tree>");
    }
}
