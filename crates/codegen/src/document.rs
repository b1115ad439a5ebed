//! Typed view of the OpenAPI 3.x subset the generator understands.
//!
//! Unknown keys (examples, defaults, servers, security, ...) are ignored.
//! Mapping order is preserved so generated fields follow the spec's order.

use serde::Deserialize;

pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

#[derive(Debug, Clone, Deserialize)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    #[serde(default, deserialize_with = "ordered::deserialize")]
    pub paths: Vec<(String, PathItem)>,
    #[serde(default)]
    pub components: Components,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    #[serde(default, deserialize_with = "ordered::deserialize")]
    pub schemas: Vec<(String, Schema)>,
}

impl Components {
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Declared operations with their upper-case HTTP method.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        [
            ("GET", &self.get),
            ("PUT", &self.put),
            ("POST", &self.post),
            ("DELETE", &self.delete),
            ("OPTIONS", &self.options),
            ("HEAD", &self.head),
            ("PATCH", &self.patch),
            ("TRACE", &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    #[serde(default, deserialize_with = "ordered::deserialize")]
    pub responses: Vec<(String, Response)>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameter {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "in", default)]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    pub schema: Option<Schema>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, deserialize_with = "ordered::deserialize")]
    pub content: Vec<(String, MediaType)>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "ordered::deserialize")]
    pub content: Vec<(String, MediaType)>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    pub schema: Option<Schema>,
}

/// `type` is a single name in 3.0 and may be a list in 3.1 (`[string, "null"]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    pub format: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default, deserialize_with = "ordered::deserialize")]
    pub properties: Vec<(String, Schema)>,
    pub items: Option<Box<Schema>>,
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<serde_yml::Value>>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(rename = "minLength")]
    pub min_length: Option<u64>,
    #[serde(rename = "maxLength")]
    pub max_length: Option<u64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    #[serde(rename = "allOf", default)]
    pub all_of: Vec<Schema>,
    #[serde(rename = "oneOf", default)]
    pub one_of: Vec<Schema>,
    #[serde(rename = "anyOf", default)]
    pub any_of: Vec<Schema>,
    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<serde_yml::Value>,
}

impl Schema {
    /// The non-null type name, if any.
    pub fn primary_type(&self) -> Option<&str> {
        match &self.schema_type {
            Some(SchemaType::Single(t)) => Some(t.as_str()),
            Some(SchemaType::Many(ts)) => ts.iter().map(String::as_str).find(|t| *t != "null"),
            None => None,
        }
    }

    /// `nullable: true` (3.0) or `"null"` in a type list (3.1).
    pub fn allows_null(&self) -> bool {
        self.nullable
            || matches!(&self.schema_type, Some(SchemaType::Many(ts)) if ts.iter().any(|t| t == "null"))
    }

    /// Target name of a `#/components/schemas/...` reference.
    pub fn ref_name(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .and_then(|r| r.strip_prefix(SCHEMA_REF_PREFIX))
    }

    pub fn is_composite(&self) -> bool {
        !self.all_of.is_empty() || !self.one_of.is_empty() || !self.any_of.is_empty()
    }
}

/// Order-preserving mapping deserializer (`Vec<(key, value)>`).
///
/// Keys may be YAML strings or integers (unquoted status codes).
mod ordered {
    use core::fmt;
    use core::marker::PhantomData;

    use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

    struct Key(String);

    impl<'de> Deserialize<'de> for Key {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct KeyVisitor;

            impl Visitor<'_> for KeyVisitor {
                type Value = Key;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a string or integer key")
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<Key, E> {
                    Ok(Key(v.to_string()))
                }

                fn visit_i64<E: de::Error>(self, v: i64) -> Result<Key, E> {
                    Ok(Key(v.to_string()))
                }

                fn visit_u64<E: de::Error>(self, v: u64) -> Result<Key, E> {
                    Ok(Key(v.to_string()))
                }

                fn visit_bool<E: de::Error>(self, v: bool) -> Result<Key, E> {
                    Ok(Key(v.to_string()))
                }
            }

            deserializer.deserialize_any(KeyVisitor)
        }
    }

    struct OrderedVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((Key(k), v)) = map.next_entry::<Key, V>()? {
                entries.push((k, v));
            }
            Ok(entries)
        }
    }

    pub(super) fn deserialize<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: &str = r##"
openapi: 3.0.3
info:
  title: Demo
  version: "1"
paths:
  /things:
    post:
      operationId: createThing
      requestBody:
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/Thing"
      responses:
        201:
          description: created
components:
  schemas:
    Thing:
      type: object
      required: [zeta]
      properties:
        zeta:
          type: string
        alpha:
          type: [integer, "null"]
"##;

    #[test]
    fn preserves_property_order() {
        let doc: OpenApiDocument = serde_yml::from_str(SPEC).unwrap();
        let thing = doc.components.schema("Thing").unwrap();
        let names: Vec<_> = thing.properties.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn accepts_integer_response_keys() {
        let doc: OpenApiDocument = serde_yml::from_str(SPEC).unwrap();
        let (_, item) = &doc.paths[0];
        let (method, op) = item.operations().next().unwrap();
        assert_eq!(method, "POST");
        assert_eq!(op.responses[0].0, "201");
    }

    #[test]
    fn type_lists_expose_nullability() {
        let doc: OpenApiDocument = serde_yml::from_str(SPEC).unwrap();
        let thing = doc.components.schema("Thing").unwrap();
        let alpha = &thing.properties[1].1;
        assert_eq!(alpha.primary_type(), Some("integer"));
        assert!(alpha.allows_null());
    }

    #[test]
    fn ref_name_strips_component_prefix() {
        let schema = Schema {
            reference: Some("#/components/schemas/Thing".to_string()),
            ..Schema::default()
        };
        assert_eq!(schema.ref_name(), Some("Thing"));

        let foreign = Schema {
            reference: Some("other.yaml#/Thing".to_string()),
            ..Schema::default()
        };
        assert_eq!(foreign.ref_name(), None);
    }
}
