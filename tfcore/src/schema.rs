//! Schema types and builders for tfcore
//!
//! Providers declare the shape of their configuration and state as attribute
//! schemas. Plan-time machinery (validators, plan modifiers, defaults) is the
//! host's concern and is not represented here.

use std::collections::HashMap;

/// Terraform's attribute type system.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    /// Always f64
    Number,
    Bool,
    /// Ordered, allows duplicates
    List(Box<AttributeType>),
    /// Unordered, no duplicates
    Set(Box<AttributeType>),
    /// String keys only
    Map(Box<AttributeType>),
    /// Fixed structure
    Object(HashMap<String, AttributeType>),
}

/// Schema returned by providers and data sources.
/// Version increments when state migration is required.
#[derive(Debug, Clone)]
pub struct Schema {
    pub version: i64,
    pub block: Block,
}

/// Root configuration block of a schema.
#[derive(Debug, Clone)]
pub struct Block {
    pub version: i64,
    pub attributes: Vec<Attribute>,
    pub description: String,
    pub description_kind: StringKind,
    pub deprecated: bool,
}

/// A single declared attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub r#type: AttributeType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub deprecated: bool,
}

/// Format of description strings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StringKind {
    Plain,
    Markdown,
}

/// Fluent builder for [`Attribute`]. Use this instead of constructing the
/// struct directly.
pub struct AttributeBuilder {
    attribute: Attribute,
}

impl AttributeBuilder {
    pub fn new(name: &str, r#type: AttributeType) -> Self {
        Self {
            attribute: Attribute {
                name: name.to_string(),
                r#type,
                description: String::new(),
                required: false,
                optional: false,
                computed: false,
                sensitive: false,
                deprecated: false,
            },
        }
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.attribute.description = desc.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.attribute.required = true;
        self.attribute.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.attribute.optional = true;
        self.attribute.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.attribute.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.attribute.sensitive = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.attribute.deprecated = true;
        self
    }

    pub fn build(self) -> Attribute {
        self.attribute
    }
}

/// Fluent builder for [`Schema`].
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            schema: Schema {
                version: 0,
                block: Block {
                    version: 0,
                    attributes: Vec::new(),
                    description: String::new(),
                    description_kind: StringKind::Plain,
                    deprecated: false,
                },
            },
        }
    }

    pub fn version(mut self, version: i64) -> Self {
        self.schema.version = version;
        self.schema.block.version = version;
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.schema.block.attributes.push(attr);
        self
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.schema.block.description = desc.to_string();
        self
    }

    pub fn description_kind(mut self, kind: StringKind) -> Self {
        self.schema.block.description_kind = kind;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.schema.block.deprecated = true;
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_builder_creates_computed_string() {
        let attr = AttributeBuilder::new("self_link", AttributeType::String)
            .description("Canonical resource path")
            .computed()
            .build();

        assert_eq!(attr.name, "self_link");
        assert!(matches!(attr.r#type, AttributeType::String));
        assert!(attr.computed);
        assert!(!attr.required);
    }

    #[test]
    fn required_and_optional_are_mutually_exclusive() {
        let attr = AttributeBuilder::new("project", AttributeType::String)
            .required()
            .optional()
            .build();

        assert!(attr.optional);
        assert!(!attr.required);
    }

    #[test]
    fn schema_builder_collects_attributes() {
        let schema = SchemaBuilder::new()
            .version(1)
            .description("Test data source schema")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("filter", AttributeType::String)
                    .optional()
                    .build(),
            )
            .build();

        assert_eq!(schema.version, 1);
        assert_eq!(schema.block.attributes.len(), 2);
        assert_eq!(schema.block.description, "Test data source schema");
    }

    #[test]
    fn list_of_objects_type() {
        let element = AttributeType::Object(HashMap::from([
            ("range_name".to_string(), AttributeType::String),
            ("ip_cidr_range".to_string(), AttributeType::String),
        ]));
        let attr = AttributeBuilder::new(
            "secondary_ip_range",
            AttributeType::List(Box::new(element)),
        )
        .computed()
        .build();

        let AttributeType::List(inner) = &attr.r#type else {
            panic!("expected list type");
        };
        let AttributeType::Object(fields) = inner.as_ref() else {
            panic!("expected object element");
        };
        assert_eq!(fields.len(), 2);
    }
}
