//! Declarative input schema for driver options
//!
//! A [`ConfigSchema`] lists every option a driver accepts together with its
//! type, default value and (optionally) the enumerated set of legal values.
//! Validation never mutates the candidate; it returns a [`ResolvedConfig`]
//! holding the candidate merged over the declared defaults.

use crate::error::{DriverError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Candidate configuration: option name mapped to a scalar value.
pub type OptionMap = BTreeMap<String, OptionValue>;

/// Declared type of a configuration option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    String,
    Integer,
    /// Floating point; integer values are accepted and widened.
    Number,
    Boolean,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionType::String => "string",
            OptionType::Integer => "integer",
            OptionType::Number => "number",
            OptionType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A scalar option value as supplied by a caller or a YAML option file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    Number(f64),
    String(String),
}

impl OptionValue {
    pub fn option_type(&self) -> OptionType {
        match self {
            OptionValue::Boolean(_) => OptionType::Boolean,
            OptionValue::Integer(_) => OptionType::Integer,
            OptionValue::Number(_) => OptionType::Number,
            OptionValue::String(_) => OptionType::String,
        }
    }

    fn conforms_to(&self, kind: OptionType) -> bool {
        matches!(
            (self, kind),
            (OptionValue::Boolean(_), OptionType::Boolean)
                | (OptionValue::Integer(_), OptionType::Integer)
                | (OptionValue::Integer(_), OptionType::Number)
                | (OptionValue::Number(_), OptionType::Number)
                | (OptionValue::String(_), OptionType::String)
        )
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Integer(v) => Some(*v as f64),
            OptionValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Boolean(v) => write!(f, "{}", v),
            OptionValue::Integer(v) => write!(f, "{}", v),
            OptionValue::Number(v) => write!(f, "{}", v),
            OptionValue::String(v) => write!(f, "\"{}\"", v),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Integer(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Number(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Boolean(value)
    }
}

/// Lower bound on a numeric option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    Minimum(f64),
    ExclusiveMinimum(f64),
}

/// Declaration of a single option
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionSchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: OptionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<OptionValue>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<&'static str>>,
    #[serde(flatten)]
    pub bound: Option<Bound>,
}

impl OptionSchema {
    pub fn new(name: &'static str, kind: OptionType) -> Self {
        Self {
            name,
            kind,
            default: None,
            choices: None,
            bound: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<OptionValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn one_of(mut self, choices: &[&'static str]) -> Self {
        self.choices = Some(choices.to_vec());
        self
    }

    pub fn at_least(mut self, minimum: f64) -> Self {
        self.bound = Some(Bound::Minimum(minimum));
        self
    }

    pub fn greater_than(mut self, minimum: f64) -> Self {
        self.bound = Some(Bound::ExclusiveMinimum(minimum));
        self
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Check a supplied value against type, enumeration and bound.
    fn check(&self, value: &OptionValue) -> Result<OptionValue> {
        if !value.conforms_to(self.kind) {
            return Err(DriverError::validation(
                self.name,
                format!(
                    "expected {} but got {} {}",
                    self.kind,
                    value.option_type(),
                    value
                ),
            ));
        }

        if let (Some(choices), OptionValue::String(s)) = (&self.choices, value) {
            if !choices.iter().any(|choice| *choice == s.as_str()) {
                return Err(DriverError::validation(
                    self.name,
                    format!("{} is not one of {:?}", value, choices),
                ));
            }
        }

        if let Some(number) = value.as_f64() {
            if !number.is_finite() {
                return Err(DriverError::validation(
                    self.name,
                    format!("{} is not a finite number", value),
                ));
            }
        }

        if let (Some(bound), Some(number)) = (self.bound, value.as_f64()) {
            match bound {
                Bound::Minimum(min) if number < min => {
                    return Err(DriverError::validation(
                        self.name,
                        format!("{} is less than the minimum of {}", value, min),
                    ));
                }
                Bound::ExclusiveMinimum(min) if number <= min => {
                    return Err(DriverError::validation(
                        self.name,
                        format!("{} must be greater than {}", value, min),
                    ));
                }
                _ => {}
            }
        }

        // Widen integers supplied for number options.
        match (self.kind, value) {
            (OptionType::Number, OptionValue::Integer(v)) => Ok(OptionValue::Number(*v as f64)),
            _ => Ok(value.clone()),
        }
    }
}

/// The full input schema of a driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSchema {
    pub id: &'static str,
    pub properties: Vec<OptionSchema>,
    pub additional_properties: bool,
}

impl ConfigSchema {
    pub fn new(id: &'static str, properties: Vec<OptionSchema>) -> Self {
        Self {
            id,
            properties,
            additional_properties: false,
        }
    }

    pub fn option(&self, name: &str) -> Option<&OptionSchema> {
        self.properties.iter().find(|option| option.name == name)
    }

    /// Validate a candidate configuration and merge it over the defaults.
    ///
    /// Fails with [`DriverError::Validation`] on the first unknown key,
    /// missing required key, type mismatch, value outside an enumerated
    /// set, non-finite number, or value below a declared bound.
    pub fn validate(&self, candidate: &OptionMap) -> Result<ResolvedConfig> {
        if !self.additional_properties {
            if let Some(unknown) = candidate.keys().find(|key| self.option(key).is_none()) {
                return Err(DriverError::validation(
                    unknown.as_str(),
                    format!("unknown option for schema '{}'", self.id),
                ));
            }
        }

        let mut values = BTreeMap::new();
        for option in &self.properties {
            let value = match (candidate.get(option.name), &option.default) {
                (Some(value), _) => option.check(value)?,
                (None, Some(default)) => default.clone(),
                (None, None) => {
                    return Err(DriverError::validation(
                        option.name,
                        "required option is missing",
                    ));
                }
            };
            values.insert(option.name.to_string(), value);
        }

        Ok(ResolvedConfig { values })
    }
}

/// A validated configuration with every declared option present.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    values: BTreeMap<String, OptionValue>,
}

impl ResolvedConfig {
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Result<&str> {
        match self.values.get(name) {
            Some(OptionValue::String(s)) => Ok(s),
            other => Err(mismatch(name, OptionType::String, other)),
        }
    }

    pub fn get_i64(&self, name: &str) -> Result<i64> {
        match self.values.get(name) {
            Some(OptionValue::Integer(v)) => Ok(*v),
            other => Err(mismatch(name, OptionType::Integer, other)),
        }
    }

    pub fn get_f64(&self, name: &str) -> Result<f64> {
        match self.values.get(name) {
            Some(value @ (OptionValue::Integer(_) | OptionValue::Number(_))) => {
                Ok(value.as_f64().unwrap_or_default())
            }
            other => Err(mismatch(name, OptionType::Number, other)),
        }
    }
}

fn mismatch(name: &str, kind: OptionType, found: Option<&OptionValue>) -> DriverError {
    match found {
        Some(value) => DriverError::validation(name, format!("expected {} but got {}", kind, value)),
        None => DriverError::validation(name, "option is not declared"),
    }
}
