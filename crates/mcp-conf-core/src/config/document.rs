//! In-memory document tree shared by every client format.

use serde_json::{Map, Value};

use crate::error::{McpConfError, Result};

/// The parsed content of one client configuration file.
///
/// All formats (JSON, TOML, YAML) are normalized to a key-ordered JSON map.
/// Adapters only reach into the store containers they own; every other key is
/// carried through untouched and in its original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDocument {
    root: Map<String, Value>,
}

impl RawDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(root: Map<String, Value>) -> Self {
        Self { root }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Borrow the map at `path`. Missing or `null` segments yield `None`.
    pub fn map_at(&self, path: &[&str]) -> Result<Option<&Map<String, Value>>> {
        let mut current = &self.root;
        for segment in path {
            match current.get(*segment) {
                None | Some(Value::Null) => return Ok(None),
                Some(Value::Object(map)) => current = map,
                Some(_) => return Err(unexpected_shape(segment, "a mapping")),
            }
        }
        Ok(Some(current))
    }

    /// Mutably borrow the map at `path` without creating anything.
    pub fn map_at_mut(&mut self, path: &[&str]) -> Result<Option<&mut Map<String, Value>>> {
        let mut current = &mut self.root;
        for segment in path {
            match current.get_mut(*segment) {
                None | Some(Value::Null) => return Ok(None),
                Some(Value::Object(map)) => current = map,
                Some(_) => return Err(unexpected_shape(segment, "a mapping")),
            }
        }
        Ok(Some(current))
    }

    /// Return the map at `path`, creating empty maps for missing or `null`
    /// segments.
    pub fn ensure_map(&mut self, path: &[&str]) -> Result<&mut Map<String, Value>> {
        let mut current = &mut self.root;
        for segment in path {
            let slot = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if slot.is_null() {
                *slot = Value::Object(Map::new());
            }
            current = match slot {
                Value::Object(map) => map,
                _ => return Err(unexpected_shape(segment, "a mapping")),
            };
        }
        Ok(current)
    }

    /// Return the top-level array at `key`, creating it when missing.
    pub fn ensure_array(&mut self, key: &str) -> Result<&mut Vec<Value>> {
        let slot = self
            .root
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if slot.is_null() {
            *slot = Value::Array(Vec::new());
        }
        match slot {
            Value::Array(items) => Ok(items),
            _ => Err(unexpected_shape(key, "a list")),
        }
    }
}

impl From<Map<String, Value>> for RawDocument {
    fn from(root: Map<String, Value>) -> Self {
        Self::from_map(root)
    }
}

fn unexpected_shape(field: &str, expected: &'static str) -> McpConfError {
    McpConfError::UnexpectedShape {
        field: field.to_string(),
        expected,
    }
}
