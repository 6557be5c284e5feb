use crate::error::{ConversionError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Parsed Prisma datamodel, consumed read-only by the converter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub enums: Vec<Enum>,
    pub models: Vec<Model>,
    /// Composite types. Converted exactly like `models`.
    pub types: Vec<Model>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub db_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub db_name: Option<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub db_name: Option<String>,
    pub kind: FieldKind,
    pub is_list: bool,
    pub is_required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A primitive such as `String` or `DateTime`.
    Scalar { scalar: String },
    /// A link to another model. Never rendered.
    Relation { relation_name: String, target: String },
    /// Any other named type: enums, composite types, unsupported types.
    Reference { target: String },
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enum(mut self, e: Enum) -> Self {
        self.enums.push(e);
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.models.push(model);
        self
    }

    pub fn with_type(mut self, ty: Model) -> Self {
        self.types.push(ty);
        self
    }
}

impl Enum {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values
                .into_iter()
                .map(|v| EnumValue {
                    name: v.into(),
                    db_name: None,
                })
                .collect(),
        }
    }
}

impl Model {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            db_name: None,
            fields,
        }
    }
}

impl Field {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            db_name: None,
            kind,
            is_list: false,
            is_required: true,
        }
    }

    /// A required, non-list scalar field.
    pub fn scalar(name: impl Into<String>, scalar: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Scalar {
                scalar: scalar.into(),
            },
        )
    }

    pub fn relation(
        name: impl Into<String>,
        target: impl Into<String>,
        relation_name: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            FieldKind::Relation {
                relation_name: relation_name.into(),
                target: target.into(),
            },
        )
    }

    /// A field typed by another declaration, e.g. an enum.
    pub fn reference(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Reference {
                target: target.into(),
            },
        )
    }

    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }

    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = Some(db_name.into());
        self
    }

    /// Name of the attribute in generated output. An empty `db_name` counts
    /// as unset.
    pub fn output_name(&self) -> &str {
        self.db_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.name)
    }

    pub fn is_relation(&self) -> bool {
        matches!(self.kind, FieldKind::Relation { .. })
    }
}

/// Turns raw schema input into a [`Schema`].
pub trait SchemaParser {
    fn parse(&self, input: &str) -> Result<Schema>;
}

/// Reads the JSON form of Prisma's DMMF document.
///
/// Both the full document (`{"datamodel": {...}}`) and a bare datamodel
/// object are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DmmfJsonParser;

impl SchemaParser for DmmfJsonParser {
    fn parse(&self, input: &str) -> Result<Schema> {
        let value: Value = serde_json::from_str(input).map_err(parse_error)?;

        let Value::Object(mut document) = value else {
            return Err(ConversionError::Parse(
                "expected a JSON object at the top level".to_string(),
            ));
        };

        let datamodel = match document.remove("datamodel") {
            Some(datamodel @ Value::Object(_)) => datamodel,
            Some(_) => {
                return Err(ConversionError::Parse(
                    "`datamodel` must be an object".to_string(),
                ));
            }
            None if DATAMODEL_KEYS.iter().any(|k| document.contains_key(*k)) => {
                Value::Object(document)
            }
            None => {
                return Err(ConversionError::Parse(
                    "missing `datamodel`, `enums`, `models` or `types`".to_string(),
                ));
            }
        };

        let datamodel: RawDatamodel = serde_json::from_value(datamodel).map_err(parse_error)?;
        Ok(datamodel.into())
    }
}

const DATAMODEL_KEYS: [&str; 3] = ["enums", "models", "types"];

fn parse_error(e: serde_json::Error) -> ConversionError {
    ConversionError::Parse(e.to_string())
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawDatamodel {
    enums: Vec<RawEnum>,
    models: Vec<RawModel>,
    types: Vec<RawModel>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnum {
    name: String,
    #[serde(default)]
    values: Vec<RawEnumValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnumValue {
    name: String,
    #[serde(default)]
    db_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawModel {
    name: String,
    #[serde(default)]
    db_name: Option<String>,
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    #[serde(default)]
    db_name: Option<String>,
    kind: RawFieldKind,
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    is_list: bool,
    #[serde(default)]
    is_required: bool,
    #[serde(default)]
    relation_name: Option<String>,
}

#[derive(Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
enum RawFieldKind {
    Scalar,
    Object,
    Enum,
    Unsupported,
    #[serde(other)]
    Other,
}

impl From<RawDatamodel> for Schema {
    fn from(raw: RawDatamodel) -> Self {
        Self {
            enums: raw.enums.into_iter().map(Into::into).collect(),
            models: raw.models.into_iter().map(Into::into).collect(),
            types: raw.types.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<RawEnum> for Enum {
    fn from(raw: RawEnum) -> Self {
        Self {
            name: raw.name,
            values: raw
                .values
                .into_iter()
                .map(|v| EnumValue {
                    name: v.name,
                    db_name: v.db_name,
                })
                .collect(),
        }
    }
}

impl From<RawModel> for Model {
    fn from(raw: RawModel) -> Self {
        Self {
            name: raw.name,
            db_name: raw.db_name,
            fields: raw.fields.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<RawField> for Field {
    fn from(raw: RawField) -> Self {
        // The relation marker wins over the declared kind.
        let kind = match (raw.relation_name, raw.kind) {
            (Some(relation_name), _) => FieldKind::Relation {
                relation_name,
                target: raw.type_,
            },
            (None, RawFieldKind::Scalar) => FieldKind::Scalar { scalar: raw.type_ },
            (None, _) => FieldKind::Reference { target: raw.type_ },
        };

        Self {
            name: raw.name,
            db_name: raw.db_name,
            kind,
            is_list: raw.is_list,
            is_required: raw.is_required,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let input = r#"{
            "datamodel": {
                "enums": [
                    { "name": "Role", "values": [{ "name": "USER", "dbName": null }, { "name": "ADMIN", "dbName": null }] }
                ],
                "models": [
                    {
                        "name": "User",
                        "dbName": null,
                        "fields": [
                            { "name": "id", "kind": "scalar", "type": "Int", "isList": false, "isRequired": true },
                            { "name": "createdAt", "dbName": "created_at", "kind": "scalar", "type": "DateTime", "isList": false, "isRequired": false },
                            { "name": "role", "kind": "enum", "type": "Role", "isList": false, "isRequired": true },
                            { "name": "posts", "kind": "object", "type": "Post", "isList": true, "isRequired": true, "relationName": "PostToUser" }
                        ]
                    }
                ],
                "types": []
            },
            "schema": {},
            "mappings": {}
        }"#;

        let schema = DmmfJsonParser.parse(input).unwrap();

        assert_eq!(schema.enums.len(), 1);
        assert_eq!(schema.enums[0].values.len(), 2);
        assert_eq!(schema.enums[0].values[1].name, "ADMIN");

        let user = &schema.models[0];
        assert_eq!(user.fields.len(), 4);
        assert_eq!(
            user.fields[0].kind,
            FieldKind::Scalar {
                scalar: "Int".to_string()
            }
        );
        assert_eq!(user.fields[1].output_name(), "created_at");
        assert!(!user.fields[1].is_required);
        assert_eq!(
            user.fields[2].kind,
            FieldKind::Reference {
                target: "Role".to_string()
            }
        );
        assert!(user.fields[3].is_relation());
        assert!(schema.types.is_empty());
    }

    #[test]
    fn test_parse_bare_datamodel() {
        let input = r#"{
            "models": [
                { "name": "Point", "fields": [{ "name": "x", "kind": "scalar", "type": "Int", "isRequired": true }] }
            ]
        }"#;

        let schema = DmmfJsonParser.parse(input).unwrap();

        assert!(schema.enums.is_empty());
        assert_eq!(schema.models[0].name, "Point");
        assert!(!schema.models[0].fields[0].is_list);
    }

    #[test]
    fn test_relation_marker_overrides_kind() {
        let input = r#"{
            "models": [
                { "name": "A", "fields": [{ "name": "b", "kind": "scalar", "type": "B", "relationName": "AToB" }] }
            ]
        }"#;

        let schema = DmmfJsonParser.parse(input).unwrap();

        assert_eq!(
            schema.models[0].fields[0].kind,
            FieldKind::Relation {
                relation_name: "AToB".to_string(),
                target: "B".to_string()
            }
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = DmmfJsonParser.parse("{ not json");
        assert!(matches!(result, Err(ConversionError::Parse(_))));
    }

    #[test]
    fn test_field_without_kind_fails() {
        let input = r#"{
            "datamodel": {
                "models": [
                    { "name": "User", "fields": [{ "name": "id", "type": "Int", "isList": false, "isRequired": true }] }
                ]
            }
        }"#;

        let err = DmmfJsonParser.parse(input).unwrap_err();
        assert!(matches!(err, ConversionError::Parse(ref msg) if msg.contains("kind")));
    }

    #[test]
    fn test_non_dmmf_input_fails() {
        let inputs = [
            r#"{"name": "not-a-dmmf", "version": "1.0.0"}"#,
            "[]",
            "42",
            r#"{"datamodel": []}"#,
        ];

        for input in inputs {
            let result = DmmfJsonParser.parse(input);
            assert!(matches!(result, Err(ConversionError::Parse(_))), "accepted {input}");
        }
    }

    #[test]
    fn test_empty_datamodel_is_accepted() {
        let schema = DmmfJsonParser.parse(r#"{ "datamodel": {} }"#).unwrap();
        assert_eq!(schema, Schema::new());
    }

    #[test]
    fn test_empty_db_name_falls_back_to_name() {
        let field = Field::scalar("id", "Int").with_db_name("");
        assert_eq!(field.output_name(), "id");
    }

    #[test]
    fn test_field_builders() {
        let field = Field::scalar("tags", "String")
            .list()
            .optional()
            .with_db_name("tag_list");

        assert!(field.is_list);
        assert!(!field.is_required);
        assert_eq!(field.output_name(), "tag_list");
        assert_eq!(Field::reference("color", "Color").output_name(), "color");
    }
}
