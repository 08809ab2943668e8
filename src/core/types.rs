//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`VariableName`] - Validated name of a dataset variable
//! - [`Label`] - Validated attribute label (e.g. `units`)
//! - [`Value`] - Scalar attribute value, including the missing sentinel
//!
//! # Validation
//!
//! Names and labels are validated at construction time. A value of either
//! type is always non-empty and free of control characters.
//!
//! # Examples
//!
//! ```
//! use varmeta::core::types::{Label, Value, VariableName};
//!
//! let name = VariableName::new("dens").unwrap();
//! let label = Label::new("units").unwrap();
//! assert_eq!(name.as_str(), "dens");
//! assert_eq!(label.as_str(), "units");
//!
//! assert!(VariableName::new("").is_err());
//! assert!(Value::from(f64::NAN).is_missing());
//! ```

use std::borrow::Borrow;
use std::fmt;

use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid variable name: {0}")]
    InvalidVariableName(String),

    #[error("invalid label: {0}")]
    InvalidLabel(String),
}

/// Shared validation for names and labels.
///
/// Returns the reason the key is rejected, if any.
fn key_problem(key: &str) -> Option<&'static str> {
    if key.is_empty() {
        return Some("cannot be empty");
    }
    if key.chars().any(|c| c.is_control()) {
        return Some("cannot contain control characters");
    }
    None
}

/// A validated variable name.
///
/// Variable names are unique within one store. They may contain any
/// printable characters, including spaces and punctuation.
///
/// # Example
///
/// ```
/// use varmeta::core::types::VariableName;
///
/// let name = VariableName::new("ion temperature").unwrap();
/// assert_eq!(name.to_string(), "ion temperature");
///
/// assert!(VariableName::new("").is_err());
/// assert!(VariableName::new("bad\nname").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableName(String);

impl VariableName {
    /// Create a new validated variable name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidVariableName` if the name is empty or
    /// contains control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if let Some(problem) = key_problem(&name) {
            return Err(TypeError::InvalidVariableName(format!(
                "variable name {problem}"
            )));
        }
        Ok(Self(name))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VariableName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for VariableName {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VariableName> for String {
    fn from(name: VariableName) -> Self {
        name.0
    }
}

impl Borrow<str> for VariableName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for VariableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated attribute label.
///
/// Labels name the columns of the rectangular record view: `units`,
/// `long_name`, `description`, or any additional field a caller introduces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(String);

impl Label {
    /// Create a new validated label.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidLabel` if the label is empty or contains
    /// control characters.
    pub fn new(label: impl Into<String>) -> Result<Self, TypeError> {
        let label = label.into();
        if let Some(problem) = key_problem(&label) {
            return Err(TypeError::InvalidLabel(format!("label {problem}")));
        }
        Ok(Self(label))
    }

    /// Build a label from a compile-time constant known to be valid.
    pub(crate) fn from_static(label: &'static str) -> Self {
        debug_assert!(key_problem(label).is_none());
        Self(label.to_string())
    }

    /// Get the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Label {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Label {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scalar attribute value.
///
/// [`Value::Missing`] is the sentinel for "never explicitly set". It is
/// distinct from every valid scalar, including `""` and `0`. A NaN float is
/// treated as missing, so the float NaN test and the sentinel test agree:
/// `Value::from(f64::NAN)` builds `Missing`, and a `Float` holding NaN
/// reports [`is_missing`](Value::is_missing) and compares equal to `Missing`.
///
/// # Example
///
/// ```
/// use varmeta::core::types::Value;
///
/// assert_eq!(Value::from("km/s"), "km/s");
/// assert_eq!(Value::from(f64::NAN), Value::Missing);
/// assert_ne!(Value::from(""), Value::Missing);
/// assert_ne!(Value::from(0), Value::Missing);
/// assert_eq!(Value::from(None::<&str>), Value::Missing);
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Never explicitly set.
    #[default]
    Missing,
    Text(String),
    Int(i64),
    Float(f64),
}

impl Value {
    /// Check whether this is the missing sentinel.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Float(f) => f.is_nan(),
            Value::Text(_) | Value::Int(_) => false,
        }
    }

    /// Get the text content, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer content, if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Get the numeric content as a float.
    ///
    /// Integers are widened. Missing and text values return `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(i) => Some(i as f64),
            Value::Float(f) if !f.is_nan() => Some(f),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (a, b) if a.is_missing() || b.is_missing() => a.is_missing() && b.is_missing(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Float(f) if f == other)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Value::Missing
        } else {
            Value::Float(value)
        }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::from(f64::from(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Missing, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) if !x.is_nan() => write!(f, "{x}"),
            Value::Float(_) | Value::Missing => f.write_str("NaN"),
        }
    }
}
