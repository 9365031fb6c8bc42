//! Koder record and its schema rules.
//!
//! The schema is evaluated in the domain before any store call:
//! [`KoderDraft::into_new_koder`] checks a full document for creation and
//! [`KoderDraft::into_changes`] checks only the supplied fields of a partial
//! update. Violations are collected rather than short-circuited so a single
//! response lists every broken constraint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Collection name used in validation and cast messages.
pub const COLLECTION_NAME: &str = "Koders";
/// Minimum allowed `name` length in characters.
pub const NAME_MIN_LENGTH: usize = 3;
/// Maximum allowed `name` length in characters.
pub const NAME_MAX_LENGTH: usize = 10;
/// Minimum allowed `age`.
pub const AGE_MIN: i64 = 18;
/// Maximum allowed `age`.
pub const AGE_MAX: i64 = 100;

/// Failure to interpret a raw value as the type of a record path.
///
/// # Examples
/// ```
/// use koders::domain::KoderId;
///
/// let err = KoderId::parse("abc").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     r#"Cast to UUID failed for value "abc" (type string) at path "id" for model "Koders""#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Cast to {target} failed for value \"{value}\" (type {value_type}) at path \"{path}\" for model \"Koders\""
)]
pub struct KoderCastError {
    target: &'static str,
    value: String,
    value_type: &'static str,
    path: &'static str,
}

impl KoderCastError {
    /// Cast failure for a raw string value.
    pub(crate) fn new(target: &'static str, path: &'static str, value: impl Into<String>) -> Self {
        Self {
            target,
            value: value.into(),
            value_type: "string",
            path,
        }
    }

    /// Report the JSON type of the rejected value, e.g. `boolean`.
    #[must_use]
    pub(crate) fn with_value_type(mut self, value_type: &'static str) -> Self {
        self.value_type = value_type;
        self
    }

    /// Record path whose value failed to cast.
    pub fn path(&self) -> &str {
        self.path
    }
}

/// Stable Koder identifier, assigned when a record is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KoderId(Uuid);

impl KoderId {
    /// Generate a fresh identifier for a new record.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read back from the store.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an identifier received from a client.
    pub fn parse(raw: &str) -> Result<Self, KoderCastError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| KoderCastError::new("UUID", "id", raw))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for KoderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Allowed values for the `sex` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "f")]
    Female,
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "o")]
    Other,
}

impl Sex {
    /// Stored and serialised representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Female => "f",
            Self::Male => "m",
            Self::Other => "o",
        }
    }
}

impl FromStr for Sex {
    type Err = SchemaViolation;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "f" => Ok(Self::Female),
            "m" => Ok(Self::Male),
            "o" => Ok(Self::Other),
            other => Err(SchemaViolation::NotInEnum {
                field: "sex",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored Koder record.
///
/// ## Invariants
/// - `name` holds between [`NAME_MIN_LENGTH`] and [`NAME_MAX_LENGTH`] characters.
/// - `age` lies within [`AGE_MIN`]..=[`AGE_MAX`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Koder {
    pub id: KoderId,
    pub name: String,
    pub age: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
}

impl Koder {
    /// Materialise a validated document under the given identifier.
    pub fn from_new(id: KoderId, new: NewKoder) -> Self {
        let NewKoder {
            name,
            age,
            generation,
            module,
            sex,
        } = new;
        Self {
            id,
            name,
            age,
            generation,
            module,
            sex,
        }
    }

    /// Replace the fields carried by `changes`, leaving the rest untouched.
    pub fn apply(&mut self, changes: &KoderChanges) {
        if let Some(name) = &changes.name {
            self.name.clone_from(name);
        }
        if let Some(age) = changes.age {
            self.age = age;
        }
        if let Some(generation) = &changes.generation {
            self.generation = Some(generation.clone());
        }
        if let Some(module) = &changes.module {
            self.module = Some(module.clone());
        }
        if let Some(sex) = changes.sex {
            self.sex = Some(sex);
        }
    }
}

/// A single broken schema constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    Required { field: &'static str },
    TooShort { field: &'static str, value: String, min: usize },
    TooLong { field: &'static str, value: String, max: usize },
    BelowMinimum { field: &'static str, value: i64, min: i64 },
    AboveMaximum { field: &'static str, value: i64, max: i64 },
    NotInEnum { field: &'static str, value: String },
}

impl SchemaViolation {
    /// Record path the violation refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::BelowMinimum { field, .. }
            | Self::AboveMaximum { field, .. }
            | Self::NotInEnum { field, .. } => *field,
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { field } => write!(f, "{field}: Path `{field}` is required."),
            Self::TooShort { field, value, min } => write!(
                f,
                "{field}: Path `{field}` (`{value}`) is shorter than the minimum allowed length ({min})."
            ),
            Self::TooLong { field, value, max } => write!(
                f,
                "{field}: Path `{field}` (`{value}`) is longer than the maximum allowed length ({max})."
            ),
            Self::BelowMinimum { field, value, min } => write!(
                f,
                "{field}: Path `{field}` ({value}) is less than minimum allowed value ({min})."
            ),
            Self::AboveMaximum { field, value, max } => write!(
                f,
                "{field}: Path `{field}` ({value}) is more than maximum allowed value ({max})."
            ),
            Self::NotInEnum { field, value } => {
                write!(f, "{field}: `{value}` is not a valid enum value for path `{field}`.")
            }
        }
    }
}

/// Every constraint a draft broke, in schema field order.
///
/// # Examples
/// ```
/// use koders::domain::KoderDraft;
///
/// let draft = KoderDraft {
///     name: Some("Al".to_owned()),
///     ..KoderDraft::default()
/// };
/// let err = draft.into_new_koder().unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Koders validation failed: name: Path `name` (`Al`) is shorter than the \
///      minimum allowed length (3)., age: Path `age` is required."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KoderValidationError {
    violations: Vec<SchemaViolation>,
}

impl KoderValidationError {
    /// Violations in schema field order.
    pub fn violations(&self) -> &[SchemaViolation] {
        &self.violations
    }
}

impl fmt::Display for KoderValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{COLLECTION_NAME} validation failed: ")?;
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for KoderValidationError {}

/// Validated document ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewKoder {
    name: String,
    age: i32,
    generation: Option<String>,
    module: Option<String>,
    sex: Option<Sex>,
}

impl NewKoder {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn generation(&self) -> Option<&str> {
        self.generation.as_deref()
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn sex(&self) -> Option<Sex> {
        self.sex
    }
}

/// Validated partial update; `None` fields are left as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KoderChanges {
    name: Option<String>,
    age: Option<i32>,
    generation: Option<String>,
    module: Option<String>,
    sex: Option<Sex>,
}

impl KoderChanges {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn age(&self) -> Option<i32> {
        self.age
    }

    pub fn generation(&self) -> Option<&str> {
        self.generation.as_deref()
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn sex(&self) -> Option<Sex> {
        self.sex
    }

    /// True when the update supplies no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.generation.is_none()
            && self.module.is_none()
            && self.sex.is_none()
    }
}

/// Unvalidated field values received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KoderDraft {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub generation: Option<String>,
    pub module: Option<String>,
    pub sex: Option<String>,
}

impl KoderDraft {
    /// Validate a complete document for creation.
    ///
    /// `name` and `age` are required; every supplied field must satisfy its
    /// constraint.
    pub fn into_new_koder(self) -> Result<NewKoder, KoderValidationError> {
        let mut violations = Vec::new();
        let name = required(check_name(self.name, &mut violations), "name", &mut violations);
        let age = required(check_age(self.age, &mut violations), "age", &mut violations);
        let sex = check_sex(self.sex, &mut violations);

        match (name, age) {
            (Some(name), Some(age)) if violations.is_empty() => Ok(NewKoder {
                name,
                age,
                generation: self.generation,
                module: self.module,
                sex,
            }),
            _ => Err(KoderValidationError { violations }),
        }
    }

    /// Validate the supplied fields of a partial update.
    pub fn into_changes(self) -> Result<KoderChanges, KoderValidationError> {
        let mut violations = Vec::new();
        let name = check_name(self.name, &mut violations).ok();
        let age = check_age(self.age, &mut violations).ok();
        let sex = check_sex(self.sex, &mut violations);

        if !violations.is_empty() {
            return Err(KoderValidationError { violations });
        }
        Ok(KoderChanges {
            name,
            age,
            generation: self.generation,
            module: self.module,
            sex,
        })
    }
}

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

enum Checked<T> {
    Missing,
    Valid(T),
    Invalid,
}

fn required<T>(
    checked: Checked<T>,
    field: &'static str,
    violations: &mut Vec<SchemaViolation>,
) -> Option<T> {
    match checked {
        Checked::Valid(value) => Some(value),
        Checked::Missing => {
            violations.push(SchemaViolation::Required { field });
            None
        }
        Checked::Invalid => None,
    }
}

impl<T> Checked<T> {
    fn ok(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Missing | Self::Invalid => None,
        }
    }
}

fn check_name(name: Option<String>, violations: &mut Vec<SchemaViolation>) -> Checked<String> {
    let Some(name) = name else {
        return Checked::Missing;
    };
    let length = name.chars().count();
    if length < NAME_MIN_LENGTH {
        violations.push(SchemaViolation::TooShort {
            field: "name",
            value: name,
            min: NAME_MIN_LENGTH,
        });
        return Checked::Invalid;
    }
    if length > NAME_MAX_LENGTH {
        violations.push(SchemaViolation::TooLong {
            field: "name",
            value: name,
            max: NAME_MAX_LENGTH,
        });
        return Checked::Invalid;
    }
    Checked::Valid(name)
}

fn check_age(age: Option<i64>, violations: &mut Vec<SchemaViolation>) -> Checked<i32> {
    let Some(age) = age else {
        return Checked::Missing;
    };
    if age < AGE_MIN {
        violations.push(SchemaViolation::BelowMinimum {
            field: "age",
            value: age,
            min: AGE_MIN,
        });
        return Checked::Invalid;
    }
    if age > AGE_MAX {
        violations.push(SchemaViolation::AboveMaximum {
            field: "age",
            value: age,
            max: AGE_MAX,
        });
        return Checked::Invalid;
    }
    // The bounds above keep the value well inside `i32`.
    i32::try_from(age).map_or(Checked::Invalid, Checked::Valid)
}

fn check_sex(sex: Option<String>, violations: &mut Vec<SchemaViolation>) -> Option<Sex> {
    let raw = sex?;
    match raw.parse::<Sex>() {
        Ok(sex) => Some(sex),
        Err(violation) => {
            violations.push(violation);
            None
        }
    }
}

#[cfg(test)]
mod tests;
