//! Runtime value model.
//!
//! Every piece of data flowing through the engine — query cells, parameter
//! values, binding results, component payloads — is a [`Value`]. Target types
//! for conversion are described by [`TargetType`], which carries enough
//! structure (enum descriptors, nullability) to resolve conversions at
//! runtime without compile-time knowledge of the data source.

mod convert;

pub use convert::{convert, ConversionError, ConversionResult};

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use inflector::Inflector;
use serde::{Deserialize, Serialize};

/// A dynamically-typed runtime value.
///
/// `Object` values are what dot-path bindings traverse: a property segment
/// is a key lookup into the object map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    /// A member of a runtime-described enumeration.
    Enum { ty: String, member: String },
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Human-readable name of the value's runtime type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Time(_) => "time",
            Value::Enum { .. } => "enum",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert a JSON payload (the native wire format of query results)
    /// into a runtime value.
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s.clone()),
            serde_json::Value::Array(items) => {
                Value::Array(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, ""),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d),
            Value::DateTime(dt) => write!(f, "{}", dt),
            Value::Time(t) => write!(f, "{}", t),
            Value::Enum { member, .. } => write!(f, "{}", member),
            Value::Array(_) | Value::Object(_) => {
                write!(f, "{}", self.type_name())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// One member of a runtime-described enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    /// Explicit human-readable description, if the author provided one.
    pub description: Option<String>,
}

impl EnumMember {
    pub fn new(name: impl Into<String>) -> Self {
        EnumMember {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(name: impl Into<String>, description: impl Into<String>) -> Self {
        EnumMember {
            name: name.into(),
            description: Some(description.into()),
        }
    }

    /// Display text: the explicit description, or a humanized member name.
    pub fn display_text(&self) -> String {
        match &self.description {
            Some(d) => d.clone(),
            None => self.name.to_sentence_case(),
        }
    }
}

/// Runtime descriptor of an enumeration: an ordered set of named members.
///
/// Drives both enum parsing in the converter (case-sensitive exact member
/// match) and enumeration-sourced parameter lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    pub name: String,
    pub members: Vec<EnumMember>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, members: Vec<EnumMember>) -> Self {
        EnumType {
            name: name.into(),
            members,
        }
    }

    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// The target of a value conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TargetType {
    Bool,
    Int,
    Byte,
    Char,
    Float,
    /// Fixed-point decimals are carried as `f64`; kept as a distinct target
    /// so definitions can declare intent.
    Decimal,
    Text,
    Date,
    DateTime,
    Time,
    Enum(EnumType),
    Nullable(Box<TargetType>),
}

impl TargetType {
    pub fn nullable(inner: TargetType) -> Self {
        TargetType::Nullable(Box::new(inner))
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, TargetType::Nullable(_))
    }

    /// Strip the `Nullable` wrapper, if any.
    pub fn underlying(&self) -> &TargetType {
        match self {
            TargetType::Nullable(inner) => inner.underlying(),
            other => other,
        }
    }

    /// The value a null input converts to when the target is non-nullable.
    pub fn default_value(&self) -> Value {
        match self {
            TargetType::Bool => Value::Bool(false),
            TargetType::Int | TargetType::Byte => Value::Int(0),
            TargetType::Char => Value::Text('\0'.to_string()),
            TargetType::Float | TargetType::Decimal => Value::Float(0.0),
            TargetType::Text => Value::Text(String::new()),
            TargetType::Date => Value::Date(NaiveDate::default()),
            TargetType::DateTime => Value::DateTime(NaiveDateTime::default()),
            TargetType::Time => Value::Time(NaiveTime::default()),
            TargetType::Enum(ty) => match ty.members.first() {
                Some(m) => Value::Enum {
                    ty: ty.name.clone(),
                    member: m.name.clone(),
                },
                None => Value::Null,
            },
            TargetType::Nullable(_) => Value::Null,
        }
    }

    /// Whether a value already belongs to this target's type family.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self.underlying(), value) {
            (TargetType::Bool, Value::Bool(_)) => true,
            (TargetType::Int, Value::Int(_)) => true,
            (TargetType::Byte, Value::Int(i)) => (0..=255).contains(i),
            (TargetType::Char, Value::Text(s)) => s.chars().count() == 1,
            (TargetType::Float | TargetType::Decimal, Value::Float(_)) => true,
            (TargetType::Text, Value::Text(_)) => true,
            (TargetType::Date, Value::Date(_)) => true,
            (TargetType::DateTime, Value::DateTime(_)) => true,
            (TargetType::Time, Value::Time(_)) => true,
            (TargetType::Enum(ty), Value::Enum { ty: name, member }) => {
                ty.name == *name && ty.member(member).is_some()
            }
            _ => false,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetType::Bool => write!(f, "bool"),
            TargetType::Int => write!(f, "int"),
            TargetType::Byte => write!(f, "byte"),
            TargetType::Char => write!(f, "char"),
            TargetType::Float => write!(f, "float"),
            TargetType::Decimal => write!(f, "decimal"),
            TargetType::Text => write!(f, "text"),
            TargetType::Date => write!(f, "date"),
            TargetType::DateTime => write!(f, "datetime"),
            TargetType::Time => write!(f, "time"),
            TargetType::Enum(ty) => write!(f, "enum {}", ty.name),
            TargetType::Nullable(inner) => write!(f, "nullable {}", inner),
        }
    }
}
