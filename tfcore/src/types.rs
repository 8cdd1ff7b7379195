//! Core value model for tfcore
//!
//! Terraform configuration and state travel as dynamically typed values.
//! `Dynamic` is the in-memory representation, `DynamicValue` adds the wire
//! encodings (msgpack by default, json for legacy paths) and path-based
//! type-safe access.

use crate::error::{Result, TfcoreError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel string used on the wire for values not yet known during planning.
const UNKNOWN_SENTINEL: &str = "__unknown__";

/// A Terraform value of any type.
///
/// Prefer the typed accessors on [`DynamicValue`] over matching on this
/// enum directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Dynamic {
    /// Explicit null
    Null,
    Bool(bool),
    /// Terraform numbers are always f64
    Number(f64),
    String(String),
    /// Ordered, duplicates allowed
    List(Vec<Dynamic>),
    /// Objects and maps share this representation; keys are strings
    Map(HashMap<String, Dynamic>),
    /// Not yet known (during planning)
    Unknown,
}

impl Dynamic {
    /// Human-readable type label, used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Dynamic::Null => "null",
            Dynamic::Bool(_) => "bool",
            Dynamic::Number(_) => "number",
            Dynamic::String(_) => "string",
            Dynamic::List(_) => "list",
            Dynamic::Map(_) => "map",
            Dynamic::Unknown => "unknown",
        }
    }
}

impl Serialize for Dynamic {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Dynamic::Null => serializer.serialize_unit(),
            Dynamic::Bool(b) => serializer.serialize_bool(*b),
            Dynamic::Number(n) => serializer.serialize_f64(*n),
            Dynamic::String(s) => serializer.serialize_str(s),
            Dynamic::List(items) => items.serialize(serializer),
            Dynamic::Map(entries) => entries.serialize(serializer),
            Dynamic::Unknown => serializer.serialize_str(UNKNOWN_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for Dynamic {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct DynamicVisitor;

        impl<'de> Visitor<'de> for DynamicVisitor {
            type Value = Dynamic;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a Terraform dynamic value")
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Null)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Dynamic, E> {
                self.visit_string(v.to_string())
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Dynamic, E> {
                if v == UNKNOWN_SENTINEL {
                    Ok(Dynamic::Unknown)
                } else {
                    Ok(Dynamic::String(v))
                }
            }

            fn visit_seq<V>(self, mut seq: V) -> std::result::Result<Dynamic, V::Error>
            where
                V: de::SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    items.push(elem);
                }
                Ok(Dynamic::List(items))
            }

            fn visit_map<V>(self, mut map: V) -> std::result::Result<Dynamic, V::Error>
            where
                V: de::MapAccess<'de>,
            {
                let mut entries = HashMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    entries.insert(key, value);
                }
                Ok(Dynamic::Map(entries))
            }
        }

        deserializer.deserialize_any(DynamicVisitor)
    }
}

/// Wrapper around [`Dynamic`] carrying wire encoding and path access.
///
/// This is what crosses the boundary between the host and the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicValue {
    pub value: Dynamic,
}

impl DynamicValue {
    pub fn new(value: Dynamic) -> Self {
        Self { value }
    }

    pub fn null() -> Self {
        Self::new(Dynamic::Null)
    }

    pub fn unknown() -> Self {
        Self::new(Dynamic::Unknown)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, Dynamic::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.value, Dynamic::Unknown)
    }

    /// Terraform sends msgpack by default; a null value encodes as empty.
    pub fn encode_msgpack(&self) -> Result<Vec<u8>> {
        match &self.value {
            Dynamic::Null => Ok(vec![]),
            Dynamic::Map(entries) => rmp_serde::encode::to_vec(entries)
                .map_err(|e| TfcoreError::EncodingError(format!("msgpack encoding failed: {}", e))),
            other => rmp_serde::encode::to_vec(other)
                .map_err(|e| TfcoreError::EncodingError(format!("msgpack encoding failed: {}", e))),
        }
    }

    pub fn decode_msgpack(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::null());
        }

        // Objects are the common case from Terraform; fall back to a bare
        // value, then to an optional map for explicit nulls.
        if let Ok(entries) = rmp_serde::decode::from_slice::<HashMap<String, Dynamic>>(data) {
            return Ok(Self::new(Dynamic::Map(entries)));
        }
        if let Ok(value) = rmp_serde::decode::from_slice::<Dynamic>(data) {
            return Ok(Self::new(value));
        }
        match rmp_serde::decode::from_slice::<Option<HashMap<String, Dynamic>>>(data) {
            Ok(None) => Ok(Self::null()),
            Ok(Some(entries)) => Ok(Self::new(Dynamic::Map(entries))),
            Err(e) => Err(TfcoreError::DecodingError(format!(
                "msgpack decoding failed: {}",
                e
            ))),
        }
    }

    pub fn encode_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.value)
            .map_err(|e| TfcoreError::EncodingError(format!("json encoding failed: {}", e)))
    }

    pub fn decode_json(data: &[u8]) -> Result<Self> {
        let value = serde_json::from_slice(data)
            .map_err(|e| TfcoreError::DecodingError(format!("json decoding failed: {}", e)))?;
        Ok(Self { value })
    }

    pub fn get_string(&self, path: &AttributePath) -> Result<String> {
        match self.navigate(path)? {
            Dynamic::String(s) => Ok(s.clone()),
            other => Err(mismatch("string", other)),
        }
    }

    pub fn get_number(&self, path: &AttributePath) -> Result<f64> {
        match self.navigate(path)? {
            Dynamic::Number(n) => Ok(*n),
            other => Err(mismatch("number", other)),
        }
    }

    pub fn get_bool(&self, path: &AttributePath) -> Result<bool> {
        match self.navigate(path)? {
            Dynamic::Bool(b) => Ok(*b),
            other => Err(mismatch("bool", other)),
        }
    }

    pub fn get_list(&self, path: &AttributePath) -> Result<Vec<Dynamic>> {
        match self.navigate(path)? {
            Dynamic::List(items) => Ok(items.clone()),
            other => Err(mismatch("list", other)),
        }
    }

    pub fn get_map(&self, path: &AttributePath) -> Result<HashMap<String, Dynamic>> {
        match self.navigate(path)? {
            Dynamic::Map(entries) => Ok(entries.clone()),
            other => Err(mismatch("map", other)),
        }
    }

    pub fn set_string(&mut self, path: &AttributePath, value: String) -> Result<()> {
        self.set(path, Dynamic::String(value))
    }

    pub fn set_number(&mut self, path: &AttributePath, value: f64) -> Result<()> {
        self.set(path, Dynamic::Number(value))
    }

    pub fn set_bool(&mut self, path: &AttributePath, value: bool) -> Result<()> {
        self.set(path, Dynamic::Bool(value))
    }

    pub fn set_list(&mut self, path: &AttributePath, value: Vec<Dynamic>) -> Result<()> {
        self.set(path, Dynamic::List(value))
    }

    pub fn set_map(&mut self, path: &AttributePath, value: HashMap<String, Dynamic>) -> Result<()> {
        self.set(path, Dynamic::Map(value))
    }

    fn navigate<'a>(&'a self, path: &AttributePath) -> Result<&'a Dynamic> {
        let mut current = &self.value;
        for step in &path.steps {
            current = match (current, step) {
                (Dynamic::Map(entries), AttributePathStep::AttributeName(name)) => {
                    entries.get(name).ok_or_else(|| {
                        TfcoreError::Custom(format!("attribute '{}' not found", name))
                    })?
                }
                (Dynamic::Map(entries), AttributePathStep::ElementKeyString(key)) => entries
                    .get(key)
                    .ok_or_else(|| TfcoreError::Custom(format!("map key '{}' not found", key)))?,
                (Dynamic::List(items), AttributePathStep::ElementKeyInt(idx)) => items
                    .get(*idx as usize)
                    .ok_or_else(|| TfcoreError::Custom(format!("list index {} out of bounds", idx)))?,
                _ => return Err(TfcoreError::Custom("invalid path navigation".to_string())),
            };
        }
        Ok(current)
    }

    fn set(&mut self, path: &AttributePath, new_value: Dynamic) -> Result<()> {
        let Some((last, parents)) = path.steps.split_last() else {
            self.value = new_value;
            return Ok(());
        };

        // Setting through a path implies an object at the root.
        if !matches!(self.value, Dynamic::Map(_)) {
            self.value = Dynamic::Map(HashMap::new());
        }

        let mut current = &mut self.value;
        for (idx, step) in parents.iter().enumerate() {
            let next_step = path.steps.get(idx + 1);
            current = match (current, step) {
                (
                    Dynamic::Map(entries),
                    AttributePathStep::AttributeName(name)
                    | AttributePathStep::ElementKeyString(name),
                ) => entries
                    .entry(name.clone())
                    .or_insert_with(|| container_for(next_step)),
                (Dynamic::List(items), AttributePathStep::ElementKeyInt(idx)) => {
                    let idx = *idx as usize;
                    if idx >= items.len() {
                        return Err(TfcoreError::Custom(format!(
                            "list index {} out of bounds",
                            idx
                        )));
                    }
                    &mut items[idx]
                }
                _ => return Err(TfcoreError::Custom("invalid path navigation".to_string())),
            };
        }

        match (current, last) {
            (
                Dynamic::Map(entries),
                AttributePathStep::AttributeName(name) | AttributePathStep::ElementKeyString(name),
            ) => {
                entries.insert(name.clone(), new_value);
                Ok(())
            }
            (Dynamic::List(items), AttributePathStep::ElementKeyInt(idx)) => {
                let idx = *idx as usize;
                if idx >= items.len() {
                    return Err(TfcoreError::Custom(format!(
                        "list index {} out of bounds",
                        idx
                    )));
                }
                items[idx] = new_value;
                Ok(())
            }
            _ => Err(TfcoreError::Custom("invalid path navigation".to_string())),
        }
    }
}

fn mismatch(expected: &str, actual: &Dynamic) -> TfcoreError {
    TfcoreError::TypeMismatch {
        expected: expected.to_string(),
        actual: actual.kind().to_string(),
    }
}

fn container_for(step: Option<&AttributePathStep>) -> Dynamic {
    match step {
        Some(AttributePathStep::ElementKeyInt(_)) => Dynamic::List(Vec::new()),
        Some(_) => Dynamic::Map(HashMap::new()),
        None => Dynamic::Null,
    }
}

/// Path to an attribute within a [`DynamicValue`].
#[derive(Debug, Clone, PartialEq)]
pub struct AttributePath {
    pub steps: Vec<AttributePathStep>,
}

impl AttributePath {
    pub fn new(name: &str) -> Self {
        Self {
            steps: vec![AttributePathStep::AttributeName(name.to_string())],
        }
    }

    pub fn root() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn attribute(mut self, name: &str) -> Self {
        self.steps
            .push(AttributePathStep::AttributeName(name.to_string()));
        self
    }

    pub fn index(mut self, idx: i64) -> Self {
        self.steps.push(AttributePathStep::ElementKeyInt(idx));
        self
    }

    pub fn key(mut self, key: &str) -> Self {
        self.steps
            .push(AttributePathStep::ElementKeyString(key.to_string()));
        self
    }
}

/// Individual step in an [`AttributePath`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttributePathStep {
    /// Attribute by name in an object
    AttributeName(String),
    /// Element by string key (maps)
    ElementKeyString(String),
    /// Element by integer index (lists)
    ElementKeyInt(i64),
}

/// A warning or error reported back to the host.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub summary: String,
    pub detail: String,
    pub attribute: Option<AttributePath>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn with_attribute(mut self, path: AttributePath) -> Self {
        self.attribute = Some(path);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiagnosticSeverity {
    Invalid,
    Error,
    Warning,
}

/// Capabilities the provider reports to the host.
#[derive(Debug, Clone)]
pub struct ServerCapabilities {
    pub plan_destroy: bool,
    pub get_provider_schema_optional: bool,
    pub move_resource_state: bool,
}

/// Capabilities the Terraform client reports to the provider.
#[derive(Debug, Clone)]
pub struct ClientCapabilities {
    pub deferral_allowed: bool,
    pub write_only_attributes_allowed: bool,
}

/// A change the provider asks the host to defer.
#[derive(Debug, Clone)]
pub struct Deferred {
    pub reason: DeferredReason,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeferredReason {
    Unknown,
    ResourceConfigUnknown,
    ProviderConfigUnknown,
    AbsentPrereq,
}

/// Configuration values as sent by the host
pub type Config = DynamicValue;

/// State values as returned to the host
pub type State = DynamicValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_round_trips_through_path() {
        let mut dv = DynamicValue::new(Dynamic::Map(HashMap::new()));
        dv.set_string(&AttributePath::new("name"), "test".to_string())
            .unwrap();

        assert_eq!(dv.get_string(&AttributePath::new("name")).unwrap(), "test");
    }

    #[test]
    fn nested_path_creates_intermediate_objects() {
        let mut dv = DynamicValue::null();
        let path = AttributePath::new("config").attribute("endpoint");
        dv.set_string(&path, "https://example.com".to_string())
            .unwrap();

        assert_eq!(dv.get_string(&path).unwrap(), "https://example.com");
    }

    #[test]
    fn list_elements_are_addressable() {
        let mut dv = DynamicValue::null();
        dv.set_list(
            &AttributePath::new("items"),
            vec![Dynamic::String("a".to_string()), Dynamic::Bool(true)],
        )
        .unwrap();

        let path = AttributePath::new("items").index(1);
        assert!(dv.get_bool(&path).unwrap());
        assert!(dv.get_string(&path).is_err());
    }

    #[test]
    fn map_entries_are_addressable_by_key() {
        let mut dv = DynamicValue::null();
        dv.set_string(
            &AttributePath::new("labels").key("env"),
            "prod".to_string(),
        )
        .unwrap();

        let labels = dv.get_map(&AttributePath::new("labels")).unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(
            dv.get_string(&AttributePath::new("labels").key("env"))
                .unwrap(),
            "prod"
        );
        let err = dv
            .get_string(&AttributePath::new("labels").key("region"))
            .unwrap_err();
        assert!(err.to_string().contains("map key 'region' not found"));
    }

    #[test]
    fn type_mismatch_names_both_sides() {
        let mut dv = DynamicValue::null();
        dv.set_number(&AttributePath::new("count"), 3.0).unwrap();

        let err = dv.get_string(&AttributePath::new("count")).unwrap_err();
        assert!(matches!(err, TfcoreError::TypeMismatch { .. }));
        assert!(err.to_string().contains("expected string"));
    }

    #[test]
    fn msgpack_null_encodes_empty() {
        let dv = DynamicValue::null();
        assert!(dv.encode_msgpack().unwrap().is_empty());
        assert!(DynamicValue::decode_msgpack(&[]).unwrap().is_null());
    }

    #[test]
    fn msgpack_object_round_trip() {
        let mut dv = DynamicValue::null();
        dv.set_string(&AttributePath::new("project"), "p1".to_string())
            .unwrap();
        dv.set_list(
            &AttributePath::new("subnetworks"),
            vec![Dynamic::Map(HashMap::from([(
                "name".to_string(),
                Dynamic::String("s1".to_string()),
            )]))],
        )
        .unwrap();

        let bytes = dv.encode_msgpack().unwrap();
        let decoded = DynamicValue::decode_msgpack(&bytes).unwrap();
        assert_eq!(decoded, dv);
    }

    #[test]
    fn unknown_survives_json_encoding() {
        let dv = DynamicValue::unknown();
        let bytes = dv.encode_json().unwrap();
        assert!(DynamicValue::decode_json(&bytes).unwrap().is_unknown());
    }
}
