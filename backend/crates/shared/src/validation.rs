//! Inbound payload validation
//!
//! Every input shape declares an explicit [`Schema`]: a list of [`Field`]s
//! with a kind, a presence rule and any number of checks. A single pass
//! validates a JSON value against the schema and either returns the
//! cleaned object (unknown members dropped) or every failure at once.
//!
//! JSON bodies are taken as typed. Query strings and multipart text parts
//! arrive as text and go through [`Schema::coerce_text`] first, which turns
//! `"true"`/`"false"` into booleans and decimal text into integers for the
//! fields declared with those kinds. Nothing else is coerced.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::error::app_error::AppError;
use crate::time;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

// ============================================================================
// Errors
// ============================================================================

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: Cow<'static, str>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All failures of a validation pass, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<Cow<'static, str>>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::validation(err.0)
    }
}

// ============================================================================
// Field declarations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
}

#[derive(Debug, Clone)]
enum Presence {
    Required(Cow<'static, str>),
    Optional,
}

#[derive(Debug, Clone)]
enum Check {
    NotEmpty,
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
    Email,
    Uuid,
    IsoDate,
    OneOf(&'static [&'static str]),
    Min(i64),
}

impl Check {
    fn passes(&self, value: &Value) -> bool {
        match (self, value) {
            (Check::NotEmpty, Value::String(s)) => !s.trim().is_empty(),
            (Check::MinLength(n), Value::String(s)) => s.chars().count() >= *n,
            (Check::MaxLength(n), Value::String(s)) => s.chars().count() <= *n,
            (Check::Pattern(re), Value::String(s)) => re.is_match(s),
            (Check::Email, Value::String(s)) => s.len() <= 254 && EMAIL_RE.is_match(s),
            (Check::Uuid, Value::String(s)) => Uuid::parse_str(s).is_ok(),
            (Check::IsoDate, Value::String(s)) => time::is_iso_date(s),
            (Check::OneOf(allowed), Value::String(s)) => allowed.contains(&s.as_str()),
            (Check::Min(min), Value::Number(n)) => n.as_i64().is_some_and(|v| v >= *min),
            _ => false,
        }
    }
}

/// One declared member of an input shape.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    kind: FieldKind,
    presence: Presence,
    type_message: Cow<'static, str>,
    checks: Vec<(Check, Cow<'static, str>)>,
}

impl Field {
    fn of(name: &'static str, kind: FieldKind, type_message: String) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Optional,
            type_message: Cow::Owned(type_message),
            checks: Vec::new(),
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::of(name, FieldKind::String, format!("{name} debe ser un texto"))
    }

    pub fn integer(name: &'static str) -> Self {
        Self::of(name, FieldKind::Integer, format!("{name} debe ser un número entero"))
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::of(name, FieldKind::Boolean, format!("El campo {name} debe ser booleano"))
    }

    /// Absent, `null` and `""` all fail with `message`.
    pub fn required(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.presence = Presence::Required(message.into());
        self
    }

    pub fn type_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.type_message = message.into();
        self
    }

    /// For optional strings that must not be blank when sent.
    pub fn not_empty(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Check::NotEmpty, message)
    }

    pub fn min_length(self, n: usize, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Check::MinLength(n), message)
    }

    pub fn max_length(self, n: usize, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Check::MaxLength(n), message)
    }

    pub fn pattern(self, re: &Regex, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Check::Pattern(re.clone()), message)
    }

    pub fn email(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Check::Email, message)
    }

    pub fn uuid(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Check::Uuid, message)
    }

    pub fn iso_date(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Check::IsoDate, message)
    }

    pub fn one_of(
        self,
        allowed: &'static [&'static str],
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.check(Check::OneOf(allowed), message)
    }

    pub fn min(self, min: i64, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Check::Min(min), message)
    }

    fn check(mut self, check: Check, message: impl Into<Cow<'static, str>>) -> Self {
        self.checks.push((check, message.into()));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn has_kind(&self, value: &Value) -> bool {
        match self.kind {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.as_i64().is_some(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }

    /// Validates one member, pushing failures under `path`. Returns the
    /// value to keep, if any.
    fn apply(&self, value: Option<&Value>, path: &str, errors: &mut Vec<FieldError>) -> Option<Value> {
        let value = match value {
            None | Some(Value::Null) => {
                if let Presence::Required(message) = &self.presence {
                    errors.push(FieldError::new(path, message.clone()));
                }
                return None;
            }
            Some(Value::String(s)) if s.is_empty() => {
                if let Presence::Required(message) = &self.presence {
                    errors.push(FieldError::new(path, message.clone()));
                    return None;
                }
                Value::String(String::new())
            }
            Some(v) => v.clone(),
        };

        if !self.has_kind(&value) {
            errors.push(FieldError::new(path, self.type_message.clone()));
            return None;
        }

        let before = errors.len();
        for (check, message) in &self.checks {
            if !check.passes(&value) {
                errors.push(FieldError::new(path, message.clone()));
            }
        }
        (errors.len() == before).then_some(value)
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Explicit declaration of an input shape.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Validate `input` and return only the declared members.
    pub fn check(&self, input: &Value) -> Result<Map<String, Value>, ValidationErrors> {
        let mut errors = Vec::new();
        let cleaned = self.check_object(input, None, &mut errors);
        match cleaned {
            Some(map) if errors.is_empty() => Ok(map),
            _ => Err(ValidationErrors(errors)),
        }
    }

    /// Validate and deserialize into `T`.
    pub fn parse<T: DeserializeOwned>(&self, input: Value) -> Result<T, ValidationErrors> {
        let cleaned = self.check(&input)?;
        from_cleaned(Value::Object(cleaned))
    }

    /// Validate a JSON array whose elements all follow this schema. Failures
    /// are reported as `"{index}.{field}"`.
    pub fn parse_list<T: DeserializeOwned>(&self, input: Value) -> Result<Vec<T>, ValidationErrors> {
        let Value::Array(items) = input else {
            return Err(ValidationErrors::single("body", "Se esperaba una lista"));
        };

        let mut errors = Vec::new();
        let mut cleaned = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if let Some(map) = self.check_object(item, Some(index), &mut errors) {
                cleaned.push(Value::Object(map));
            }
        }
        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }
        from_cleaned(Value::Array(cleaned))
    }

    /// Turn text pairs (query string, multipart parts) into a JSON object,
    /// converting only the members declared as boolean or integer. Later
    /// duplicates win.
    pub fn coerce_text<I>(&self, raw: I) -> Value
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = Map::new();
        for (key, text) in raw {
            let kind = self.fields.iter().find(|f| f.name == key).map(|f| f.kind);
            let value = match kind {
                Some(FieldKind::Boolean) => match text.as_str() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    _ => Value::String(text),
                },
                Some(FieldKind::Integer) => text
                    .parse::<i64>()
                    .map(Value::from)
                    .unwrap_or(Value::String(text)),
                _ => Value::String(text),
            };
            map.insert(key, value);
        }
        Value::Object(map)
    }

    fn check_object(
        &self,
        input: &Value,
        index: Option<usize>,
        errors: &mut Vec<FieldError>,
    ) -> Option<Map<String, Value>> {
        let Value::Object(object) = input else {
            let path = index.map_or_else(|| "body".to_string(), |i| i.to_string());
            errors.push(FieldError::new(path, "Se esperaba un objeto"));
            return None;
        };

        let mut cleaned = Map::new();
        for field in &self.fields {
            let path = match index {
                Some(i) => format!("{i}.{}", field.name),
                None => field.name.to_string(),
            };
            if let Some(value) = field.apply(object.get(field.name), &path, errors) {
                cleaned.insert(field.name.to_string(), value);
            }
        }
        Some(cleaned)
    }
}

fn from_cleaned<T: DeserializeOwned>(value: Value) -> Result<T, ValidationErrors> {
    serde_json::from_value(value).map_err(|e| ValidationErrors::single("body", e.to_string()))
}

/// Input shapes that carry their own schema.
pub trait Validate: Sized {
    fn schema() -> &'static Schema;

    fn validate(input: Value) -> Result<Self, ValidationErrors>
    where
        Self: DeserializeOwned,
    {
        Self::schema().parse(input)
    }
}
