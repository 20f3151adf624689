//! Conversion between [`Tree`] and parsed TOML / JSON documents.
//!
//! Import produces text keys only. Export requires text keys, so symbolic
//! trees go through [`to_serializable`](crate::to_serializable) first.

use crate::error::{NestError, NestResult};
use crate::key::Key;
use crate::tree::{Node, Scalar, Tree};

impl From<toml::Value> for Tree {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(text) => Self::Leaf(Scalar::Text(text)),
            toml::Value::Integer(value) => Self::Leaf(Scalar::Integer(value)),
            toml::Value::Float(value) => Self::Leaf(Scalar::Float(value)),
            toml::Value::Boolean(value) => Self::Leaf(Scalar::Bool(value)),
            toml::Value::Datetime(datetime) => Self::Leaf(Scalar::Text(datetime.to_string())),
            toml::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            toml::Value::Table(table) => Self::Node(
                table
                    .into_iter()
                    .map(|(key, value)| (Key::Text(key), Self::from(value)))
                    .collect(),
            ),
        }
    }
}

/// JSON `null` has no tree counterpart; null members and elements are
/// skipped. A bare `null` document becomes an empty node.
impl From<serde_json::Value> for Tree {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::empty(),
            serde_json::Value::Bool(value) => Self::Leaf(Scalar::Bool(value)),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(value) => Self::Leaf(Scalar::Integer(value)),
                // u64 beyond i64::MAX lands here too and loses precision.
                None => Self::Leaf(Scalar::Float(number.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(text) => Self::Leaf(Scalar::Text(text)),
            serde_json::Value::Array(items) => Self::List(
                items
                    .into_iter()
                    .filter(|item| !item.is_null())
                    .map(Self::from)
                    .collect(),
            ),
            serde_json::Value::Object(members) => Self::Node(
                members
                    .into_iter()
                    .filter(|(_, value)| !value.is_null())
                    .map(|(key, value)| (Key::Text(key), Self::from(value)))
                    .collect::<Node>(),
            ),
        }
    }
}

impl Tree {
    /// Export as a TOML value.
    ///
    /// # Errors
    ///
    /// Returns [`NestError::UnsupportedKey`] for non-text keys and
    /// [`NestError::UnsupportedValue`] for byte scalars.
    pub fn to_toml(&self) -> NestResult<toml::Value> {
        Ok(match self {
            Self::Node(node) => {
                let mut table = toml::Table::new();
                for (key, value) in node {
                    table.insert(text_key(key)?, value.to_toml()?);
                }
                toml::Value::Table(table)
            },
            Self::List(items) => toml::Value::Array(
                items
                    .iter()
                    .map(Self::to_toml)
                    .collect::<NestResult<Vec<_>>>()?,
            ),
            Self::Leaf(scalar) => match scalar {
                Scalar::Bool(value) => toml::Value::Boolean(*value),
                Scalar::Integer(value) => toml::Value::Integer(*value),
                Scalar::Float(value) => toml::Value::Float(*value),
                Scalar::Text(text) => toml::Value::String(text.clone()),
                Scalar::Bytes(_) => {
                    return Err(NestError::UnsupportedValue {
                        message: "byte strings have no TOML representation".to_owned(),
                    });
                },
            },
        })
    }

    /// Export as a JSON value. Byte scalars become arrays of integers.
    ///
    /// # Errors
    ///
    /// Returns [`NestError::UnsupportedKey`] for non-text keys and
    /// [`NestError::UnsupportedValue`] for non-finite floats.
    pub fn to_json(&self) -> NestResult<serde_json::Value> {
        Ok(match self {
            Self::Node(node) => {
                let mut members = serde_json::Map::new();
                for (key, value) in node {
                    members.insert(text_key(key)?, value.to_json()?);
                }
                serde_json::Value::Object(members)
            },
            Self::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(Self::to_json)
                    .collect::<NestResult<Vec<_>>>()?,
            ),
            Self::Leaf(scalar) => match scalar {
                Scalar::Bool(value) => serde_json::Value::Bool(*value),
                Scalar::Integer(value) => serde_json::Value::from(*value),
                Scalar::Float(value) => serde_json::Number::from_f64(*value)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| NestError::UnsupportedValue {
                        message: format!("non-finite float {value} has no JSON representation"),
                    })?,
                Scalar::Text(text) => serde_json::Value::String(text.clone()),
                Scalar::Bytes(bytes) => serde_json::Value::from(bytes.clone()),
            },
        })
    }
}

fn text_key(key: &Key) -> NestResult<String> {
    match key {
        Key::Text(text) => Ok(text.clone()),
        other => Err(NestError::UnsupportedKey {
            key: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use crate::symbols::Interner;
    use crate::{get, normalize_keys_permissive, to_serializable};

    const CONFIG: &str = r#"
        name = "astrid"
        ratio = 0.5
        [model]
        provider = "claude"
        max_tokens = 4096
        [[servers]]
        name = "fs"
        args = ["--root", "/tmp"]
    "#;

    #[test]
    fn test_from_toml() {
        let t = Tree::from(toml::from_str::<toml::Value>(CONFIG).unwrap());
        assert_eq!(get(&path!["name"], &t).unwrap().as_str(), Some("astrid"));
        assert_eq!(get(&path!["ratio"], &t).unwrap().as_float(), Some(0.5));
        assert_eq!(
            get(&path!["model", "max_tokens"], &t).unwrap().as_integer(),
            Some(4096)
        );
        let servers = get(&path!["servers"], &t).unwrap().as_list().unwrap();
        assert_eq!(servers.len(), 1);
    }

    #[test]
    fn test_toml_datetime_becomes_text() {
        let t = Tree::from(toml::from_str::<toml::Value>("at = 1979-05-27T07:32:00Z").unwrap());
        assert_eq!(
            get(&path!["at"], &t).unwrap().as_str(),
            Some("1979-05-27T07:32:00Z")
        );
    }

    #[test]
    fn test_toml_export_matches_source() {
        let value = toml::from_str::<toml::Value>(CONFIG).unwrap();
        let t = Tree::from(value.clone());
        assert_eq!(t.to_toml().unwrap(), value);
    }

    #[test]
    fn test_export_rejects_symbol_keys_until_serializable() {
        let symbols = Interner::new();
        let t = Tree::from(toml::from_str::<toml::Value>(CONFIG).unwrap());
        let symbolic = normalize_keys_permissive(&t, &symbols);

        assert!(matches!(
            symbolic.to_toml(),
            Err(NestError::UnsupportedKey { .. })
        ));
        assert!(matches!(
            symbolic.to_json(),
            Err(NestError::UnsupportedKey { .. })
        ));
        assert_eq!(to_serializable(&symbolic).to_toml().unwrap(), t.to_toml().unwrap());
    }

    #[test]
    fn test_toml_export_rejects_bytes() {
        let t: Tree = [("blob", Tree::Leaf(Scalar::Bytes(vec![1])))].into_iter().collect();
        assert!(matches!(
            t.to_toml(),
            Err(NestError::UnsupportedValue { .. })
        ));
        assert_eq!(t.to_json().unwrap(), serde_json::json!({ "blob": [1] }));
    }

    #[test]
    fn test_from_json_skips_nulls() {
        let value = serde_json::json!({
            "name": "astrid",
            "missing": null,
            "big": 18_446_744_073_709_551_615_u64,
            "list": [1, null, "two"],
        });
        let t = Tree::from(value);
        let node = t.as_node().unwrap();
        assert_eq!(node.len(), 3);
        assert!(!node.contains_key(&Key::text("missing")));
        assert_eq!(
            get(&path!["list"], &t).unwrap(),
            &Tree::List(vec![Tree::from(1), Tree::from("two")])
        );
        assert!(get(&path!["big"], &t).unwrap().as_float().is_some());
    }

    #[test]
    fn test_json_round_trip() {
        let value = serde_json::json!({
            "model": { "provider": "claude", "max_tokens": 4096, "temperature": 0.7 },
            "enabled": true,
            "tags": ["a", "b"],
        });
        assert_eq!(Tree::from(value.clone()).to_json().unwrap(), value);
    }

    #[test]
    fn test_json_rejects_non_finite_floats() {
        assert!(matches!(
            Tree::from(f64::INFINITY).to_json(),
            Err(NestError::UnsupportedValue { .. })
        ));
    }
}
