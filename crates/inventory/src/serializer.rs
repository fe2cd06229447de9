//! Mapping between stored pantry items and their JSON representation.
//!
//! Reads render every field verbatim. Writes accept a JSON object, validate
//! each writable field and either produce a [`PantryItemDraft`] or report
//! every offending field at once. Read-only fields (`id`, `created_at`,
//! `updated_at`) and unknown keys in the input are ignored.

use chrono::NaiveDate;
use serde_json::{Map, Value, json};

use pantry_core::error::NON_FIELD_ERRORS;
use pantry_core::{DomainError, DomainResult, FieldErrors};

use crate::item::{
    CATEGORY_MAX_LEN, NAME_MAX_LEN, NOTES_MAX_LEN, PantryItem, PantryItemDraft, UNIT_MAX_LEN,
};

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NULL: &str = "This field may not be null.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_NOT_STRING: &str = "Not a valid string.";
pub const MSG_NULL_CHARACTER: &str = "Null characters are not allowed.";
pub const MSG_NOT_NUMBER: &str = "A valid number is required.";
pub const MSG_NEGATIVE: &str = "Ensure this value is greater than or equal to 0.";
pub const MSG_DATE_FORMAT: &str =
    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

/// Field-for-field serializer for [`PantryItem`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PantryItemSerializer;

/// What to use when a writable key is absent from the payload.
enum Fallback<T> {
    Required,
    Default(T),
    Existing(T),
}

impl PantryItemSerializer {
    /// Render a record; every field, no renaming.
    pub fn to_representation(item: &PantryItem) -> Value {
        json!({
            "id": item.id,
            "name": item.name,
            "category": item.category,
            "quantity": item.quantity,
            "unit": item.unit,
            "par_level": item.par_level,
            "expiry_date": item.expiry_date,
            "notes": item.notes,
            "created_at": item.created_at,
            "updated_at": item.updated_at,
        })
    }

    /// Validate a full representation (create / replace).
    pub fn validate(data: &Value) -> DomainResult<PantryItemDraft> {
        Self::validate_with(data, None)
    }

    /// Validate a partial representation against an existing record.
    ///
    /// Absent keys keep the values of `existing`.
    pub fn validate_partial(data: &Value, existing: &PantryItem) -> DomainResult<PantryItemDraft> {
        Self::validate_with(data, Some(existing))
    }

    fn validate_with(data: &Value, existing: Option<&PantryItem>) -> DomainResult<PantryItemDraft> {
        let obj = match data {
            Value::Object(map) => map,
            other => {
                return Err(DomainError::Validation(FieldErrors::single(
                    NON_FIELD_ERRORS,
                    format!(
                        "Invalid data. Expected a dictionary, but got {}.",
                        json_kind(other)
                    ),
                )));
            }
        };

        let mut errors = FieldErrors::new();

        // Pick the fallback for one field: existing value on PATCH, otherwise
        // required or the model default.
        macro_rules! fallback {
            ($field:ident, required) => {
                match existing {
                    Some(item) => Fallback::Existing(item.$field.clone()),
                    None => Fallback::Required,
                }
            };
            ($field:ident, default = $default:expr) => {
                match existing {
                    Some(item) => Fallback::Existing(item.$field.clone()),
                    None => Fallback::Default($default),
                }
            };
        }

        let name = resolve(obj, "name", &mut errors, fallback!(name, required), |v| {
            parse_char(v, NAME_MAX_LEN, false)
        });
        let category = resolve(obj, "category", &mut errors, fallback!(category, required), |v| {
            parse_char(v, CATEGORY_MAX_LEN, false)
        });
        let quantity = resolve(
            obj,
            "quantity",
            &mut errors,
            fallback!(quantity, required),
            parse_non_negative,
        );
        let unit = resolve(obj, "unit", &mut errors, fallback!(unit, required), |v| {
            parse_char(v, UNIT_MAX_LEN, false)
        });
        let par_level = resolve(
            obj,
            "par_level",
            &mut errors,
            fallback!(par_level, default = 0.0),
            parse_non_negative,
        );
        let expiry_date = resolve(
            obj,
            "expiry_date",
            &mut errors,
            fallback!(expiry_date, default = None),
            parse_optional_date,
        );
        let notes = resolve(
            obj,
            "notes",
            &mut errors,
            fallback!(notes, default = String::new()),
            |v| parse_char(v, NOTES_MAX_LEN, true),
        );

        match (name, category, quantity, unit, par_level, expiry_date, notes) {
            (
                Some(name),
                Some(category),
                Some(quantity),
                Some(unit),
                Some(par_level),
                Some(expiry_date),
                Some(notes),
            ) if errors.is_empty() => Ok(PantryItemDraft {
                name,
                category,
                quantity,
                unit,
                par_level,
                expiry_date,
                notes,
            }),
            _ => Err(DomainError::Validation(errors)),
        }
    }
}

fn resolve<T>(
    obj: &Map<String, Value>,
    key: &'static str,
    errors: &mut FieldErrors,
    fallback: Fallback<T>,
    parse: impl FnOnce(&Value) -> Result<T, String>,
) -> Option<T> {
    match obj.get(key) {
        Some(value) => match parse(value) {
            Ok(v) => Some(v),
            Err(msg) => {
                errors.add(key, msg);
                None
            }
        },
        None => match fallback {
            Fallback::Required => {
                errors.add(key, MSG_REQUIRED);
                None
            }
            Fallback::Default(v) | Fallback::Existing(v) => Some(v),
        },
    }
}

/// Strings are trimmed; numbers are accepted in their textual form.
fn parse_char(value: &Value, max_len: usize, allow_blank: bool) -> Result<String, String> {
    let raw = match value {
        Value::Null => return Err(MSG_NULL.to_string()),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            return Err(MSG_NOT_STRING.to_string());
        }
    };
    // Postgres text columns cannot hold NUL.
    if raw.contains('\0') {
        return Err(MSG_NULL_CHARACTER.to_string());
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() && !allow_blank {
        return Err(MSG_BLANK.to_string());
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("Ensure this field has no more than {max_len} characters."));
    }
    Ok(trimmed.to_string())
}

fn parse_non_negative(value: &Value) -> Result<f64, String> {
    let number = match value {
        Value::Null => return Err(MSG_NULL.to_string()),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    };

    match number {
        Some(n) if n.is_finite() => {
            if n < 0.0 {
                Err(MSG_NEGATIVE.to_string())
            } else {
                // Normalize -0.0 so it renders as 0.
                Ok(n + 0.0)
            }
        }
        _ => Err(MSG_NOT_NUMBER.to_string()),
    }
}

/// `null` and `""` both clear the date. Surrounding whitespace is ignored.
fn parse_optional_date(value: &Value) -> Result<Option<NaiveDate>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| MSG_DATE_FORMAT.to_string()),
        _ => Err(MSG_DATE_FORMAT.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
