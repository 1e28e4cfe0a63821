//! TOML serializer for client configuration files.

use std::path::Path;

use serde_json::{Map, Value};

use super::{ConfigFormat, ConfigSerializer};
use crate::config::document::RawDocument;
use crate::error::{McpConfError, Result};

/// TOML configuration file serializer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlSerializer;

impl ConfigSerializer for TomlSerializer {
    fn parse(&self, path: &Path, content: &str) -> Result<RawDocument> {
        if content.trim().is_empty() {
            return Ok(RawDocument::new());
        }
        let table: toml::Table = toml::from_str(content)
            .map_err(|err| McpConfError::malformed(path, ConfigFormat::Toml, err.message()))?;
        Ok(RawDocument::from_map(toml_table_to_json(table)))
    }

    fn render(&self, path: &Path, doc: &RawDocument) -> Result<String> {
        let table = json_map_to_toml(doc.as_map())
            .map_err(|reason| McpConfError::malformed(path, ConfigFormat::Toml, reason))?;
        toml::to_string_pretty(&table)
            .map_err(|err| McpConfError::malformed(path, ConfigFormat::Toml, err))
    }

    fn format(&self) -> ConfigFormat {
        ConfigFormat::Toml
    }
}

fn toml_table_to_json(table: toml::Table) -> Map<String, Value> {
    table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json_value(value)))
        .collect()
}

/// Convert a single TOML value to a JSON value.
///
/// Datetimes and non-finite floats have no JSON form; they are carried as
/// single-key marker objects and restored by [`json_to_toml_value`].
fn toml_to_json_value(toml_value: toml::Value) -> Value {
    match toml_value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| marker(FLOAT_MARKER, non_finite_literal(f))),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => marker(DATETIME_MARKER, dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json_value).collect()),
        toml::Value::Table(table) => Value::Object(toml_table_to_json(table)),
    }
}

const DATETIME_MARKER: &str = "$__toml_private_datetime";
const FLOAT_MARKER: &str = "$__toml_private_float";

fn marker(key: &str, literal: impl Into<String>) -> Value {
    let mut obj = Map::new();
    obj.insert(key.to_string(), Value::String(literal.into()));
    Value::Object(obj)
}

fn non_finite_literal(f: f64) -> &'static str {
    if f.is_nan() {
        "nan"
    } else if f.is_sign_negative() {
        "-inf"
    } else {
        "inf"
    }
}

/// The TOML value a marker object stands for, if `obj` is one.
fn from_marker(obj: &Map<String, Value>) -> Option<std::result::Result<toml::Value, String>> {
    if obj.len() != 1 {
        return None;
    }
    let (key, literal) = obj.iter().next()?;
    let literal = literal.as_str()?;
    match key.as_str() {
        DATETIME_MARKER => Some(
            literal
                .parse::<toml::value::Datetime>()
                .map(toml::Value::Datetime)
                .map_err(|err| format!("invalid datetime {literal}: {err}")),
        ),
        FLOAT_MARKER => Some(match literal {
            "nan" => Ok(toml::Value::Float(f64::NAN)),
            "inf" => Ok(toml::Value::Float(f64::INFINITY)),
            "-inf" => Ok(toml::Value::Float(f64::NEG_INFINITY)),
            other => Err(format!("invalid float {other}")),
        }),
        _ => None,
    }
}

/// Convert a JSON-compatible map to a TOML table. Null values have no TOML
/// form and are dropped.
fn json_map_to_toml(map: &Map<String, Value>) -> std::result::Result<toml::Table, String> {
    let mut table = toml::Table::new();
    for (key, value) in map {
        if let Some(converted) = json_to_toml_value(value)? {
            table.insert(key.clone(), converted);
        }
    }
    Ok(table)
}

fn json_to_toml_value(json_value: &Value) -> std::result::Result<Option<toml::Value>, String> {
    let converted = match json_value {
        Value::Null => return Ok(None),
        Value::Bool(b) => toml::Value::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                toml::Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                toml::Value::Float(f)
            } else {
                return Err(format!("number {n} does not fit in TOML"));
            }
        }
        Value::String(s) => toml::Value::String(s.clone()),
        Value::Array(arr) => {
            let mut items = Vec::with_capacity(arr.len());
            for item in arr {
                if let Some(converted) = json_to_toml_value(item)? {
                    items.push(converted);
                }
            }
            toml::Value::Array(items)
        }
        Value::Object(obj) => match from_marker(obj) {
            Some(restored) => restored?,
            None => toml::Value::Table(json_map_to_toml(obj)?),
        },
    };
    Ok(Some(converted))
}
