//! Form validation pipeline.
//!
//! Every form entity is a plain struct deriving `Deserialize`, `Serialize`
//! and [`validator::Validate`]. The struct is both the schema and the input
//! type handed to a mutation, so there is no second definition to drift.
//! [`validate_form`] turns an arbitrary JSON object into that type or into a
//! [`FormErrors`] map keyed by field.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Key used for errors that do not belong to a single field.
pub const FORM_KEY: &str = "_form";

/// Message for a required field that is missing, null or blank.
pub const REQUIRED: &str = "Required";

/// Binds a validated struct to the entity it describes.
///
/// `Default` supplies the placeholder for a field that fails to decode.
pub trait FormSchema: DeserializeOwned + Serialize + Validate + Default {
    /// Singular label used in notifications ("court").
    const LABEL: &'static str;
    /// Plural label used in batch summaries ("courts").
    const PLURAL: &'static str;
    /// Backend table rows of this entity live in.
    const TABLE: &'static str;

    /// Message shown when a required typed field (ids, enums, flags) is
    /// missing or blank.
    fn required_message(_field: &str) -> &'static str {
        REQUIRED
    }
}

/// Field-level validation failures, ordered by field path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields carrying at least one error.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Moves every error under `prefix`, e.g. `start_time` becomes
    /// `items[2].start_time`. Form-level errors land on the prefix itself.
    pub fn prefixed(self, prefix: &str) -> Self {
        let mut out = FormErrors::new();
        for (field, messages) in self.0 {
            let key = if field == FORM_KEY {
                prefix.to_string()
            } else {
                format!("{prefix}.{field}")
            };
            for message in messages {
                out.add(key.clone(), message);
            }
        }
        out
    }

    pub fn extend(&mut self, other: FormErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FormErrors::new();
        collect(None, &errors, &mut out);
        out
    }
}

fn collect(prefix: Option<&str>, errors: &ValidationErrors, out: &mut FormErrors) {
    for (field, kind) in errors.errors() {
        let field: &str = field.as_ref();
        let key = match (prefix, field) {
            (None, "__all__") => FORM_KEY.to_string(),
            (Some(p), "__all__") => p.to_string(),
            (None, f) => f.to_string(),
            (Some(p), f) => format!("{p}.{f}"),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.add(key.clone(), message);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(Some(&key), nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(Some(&format!("{key}[{index}]")), nested, out);
                }
            }
        }
    }
}

/// Validates an arbitrary JSON value against `T`.
///
/// Every field is checked: decoding failures (wrong type, value outside an
/// enumeration, malformed id) are keyed to the offending field, and the
/// schema's rules still run on the fields that did decode. Unknown keys are
/// dropped.
pub fn validate_form<T: FormSchema>(input: &Value) -> Result<T, FormErrors> {
    let Some(object) = input.as_object() else {
        let mut errors = FormErrors::new();
        errors.add(FORM_KEY, "Expected an object");
        return Err(errors);
    };

    let (value, mut errors) = decode::<T>(object)?;
    if let Err(invalid) = value.validate() {
        // Fields already reported hold placeholders.
        for (field, messages) in FormErrors::from(invalid).0 {
            if !errors.contains(&field) {
                for message in messages {
                    errors.add(field.clone(), message);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(value)
    } else {
        Err(errors)
    }
}

/// Decodes `object`, substituting the schema default for every field that
/// cannot be read and recording an error for it.
fn decode<T: FormSchema>(object: &Map<String, Value>) -> Result<(T, FormErrors), FormErrors> {
    let template = match serde_json::to_value(T::default()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    let mut errors = FormErrors::new();
    let mut readable = Map::new();

    // Each key is tried on its own against the template, so two fields
    // failing the same way are still told apart.
    for (key, value) in object {
        let mut probe = template.clone();
        probe.insert(key.clone(), value.clone());
        match serde_json::from_value::<T>(Value::Object(probe)) {
            Ok(_) => {
                readable.insert(key.clone(), value.clone());
            }
            Err(_) if is_blank(value) => errors.add(key.clone(), T::required_message(key)),
            Err(err) => errors.add(key.clone(), err.to_string()),
        }
    }

    // Fill in whatever is still missing from the template until it decodes.
    let mut candidate = readable;
    for (key, placeholder) in &template {
        if !candidate.contains_key(key) && errors.contains(key) {
            candidate.insert(key.clone(), placeholder.clone());
        }
    }
    loop {
        let err = match serde_json::from_value::<T>(Value::Object(candidate.clone())) {
            Ok(value) => return Ok((value, errors)),
            Err(err) => err,
        };
        let placeholder = missing_field(&err)
            .and_then(|field| template.get(&field).map(|value| (field, value.clone())));
        match placeholder {
            Some((field, value)) if !candidate.contains_key(&field) => {
                let message = T::required_message(&field);
                errors.add(field.clone(), message);
                candidate.insert(field, value);
            }
            _ => {
                errors.add(FORM_KEY, err.to_string());
                return Err(errors);
            }
        }
    }
}

fn missing_field(err: &serde_json::Error) -> Option<String> {
    let text = err.to_string();
    text.strip_prefix("missing field `")?
        .split('`')
        .next()
        .map(str::to_string)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Deserializes a field that falls back to its default, reading `null` the
/// same as an omitted key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes an optional field, reading blank strings as absent.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(D::Error::custom),
    }
}

pub(crate) fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub(crate) fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Text content of a form field, whether declared bare or optional.
pub trait FieldText {
    fn field_text(&self) -> Option<&str>;
}

impl FieldText for str {
    fn field_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl FieldText for String {
    fn field_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: FieldText + ?Sized> FieldText for &T {
    fn field_text(&self) -> Option<&str> {
        (**self).field_text()
    }
}

impl<T: FieldText> FieldText for Option<T> {
    fn field_text(&self) -> Option<&str> {
        self.as_ref().and_then(FieldText::field_text)
    }
}

fn check_text<T: FieldText + ?Sized>(
    value: &T,
    accept: impl Fn(&str) -> bool,
    error: impl FnOnce() -> ValidationError,
) -> Result<(), ValidationError> {
    match value.field_text() {
        Some(text) if !text.is_empty() && !accept(text) => Err(error()),
        _ => Ok(()),
    }
}

/// `YYYY-MM-DD`. Blank values are left to the field's length rule.
pub fn validate_date<T: FieldText + ?Sized>(value: &T) -> Result<(), ValidationError> {
    check_text(
        value,
        |text| parse_date(text).is_some(),
        || invalid("date", "Use the YYYY-MM-DD format"),
    )
}

/// `HH:MM`, with optional seconds as the backend returns them.
pub fn validate_time<T: FieldText + ?Sized>(value: &T) -> Result<(), ValidationError> {
    check_text(
        value,
        |text| parse_time(text).is_some(),
        || invalid("time", "Use the HH:MM format"),
    )
}

/// A calendar date or an RFC 3339 timestamp.
pub fn validate_timestamp<T: FieldText + ?Sized>(value: &T) -> Result<(), ValidationError> {
    check_text(
        value,
        |text| parse_date(text).is_some() || DateTime::parse_from_rfc3339(text).is_ok(),
        || invalid("timestamp", "Use a YYYY-MM-DD date or an ISO 8601 timestamp"),
    )
}

/// True when both times parse and `end` is strictly later than `start`.
pub(crate) fn ends_after(start: &str, end: &str) -> bool {
    match (parse_time(start), parse_time(end)) {
        (Some(s), Some(e)) => e > s,
        _ => true,
    }
}
