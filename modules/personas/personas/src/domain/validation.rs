//! Field rules a persona must satisfy before it reaches the store.
//!
//! Validation is pure: it never touches the repository and reports every
//! offending field at once.

use personas_sdk::{City, Gender, NewPersona, PersonaDraft};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use super::error::{DomainError, FieldViolation};
use super::fields::PersonaFields;
use super::service::ServiceConfig;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Validate a raw draft and turn it into a typed [`NewPersona`].
///
/// Text fields are trimmed; blank counts as missing.
///
/// # Errors
/// Returns [`DomainError::Validation`] listing every rejected field.
pub fn validate_draft(
    draft: &PersonaDraft,
    config: &ServiceConfig,
) -> Result<NewPersona, DomainError> {
    let mut errors = Vec::new();

    let dni = required_text(
        &mut errors,
        PersonaFields::DNI,
        draft.dni.as_deref(),
        config,
    )
    .filter(|dni| {
        let ok = dni.chars().count() >= config.min_dni_length;
        if !ok {
            errors.push(FieldViolation::new(
                PersonaFields::DNI,
                format!("must be at least {} characters", config.min_dni_length),
            ));
        }
        ok
    });
    let nombres = required_text(
        &mut errors,
        PersonaFields::NOMBRES,
        draft.nombres.as_deref(),
        config,
    );
    let apellidos = required_text(
        &mut errors,
        PersonaFields::APELLIDOS,
        draft.apellidos.as_deref(),
        config,
    );
    let fecha_nacimiento = parse_date(&mut errors, draft.fecha_nacimiento.as_deref());
    let genero = parse_enum::<Gender>(&mut errors, PersonaFields::GENERO, draft.genero.as_deref());
    let ciudad = parse_enum::<City>(&mut errors, PersonaFields::CIUDAD, draft.ciudad.as_deref());

    match (dni, nombres, apellidos, fecha_nacimiento, genero, ciudad) {
        (
            Some(dni),
            Some(nombres),
            Some(apellidos),
            Some(fecha_nacimiento),
            Some(genero),
            Some(ciudad),
        ) if errors.is_empty() => Ok(NewPersona {
            dni,
            nombres,
            apellidos,
            fecha_nacimiento,
            genero,
            ciudad,
        }),
        _ => Err(DomainError::validation(errors)),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required_text(
    errors: &mut Vec<FieldViolation>,
    field: &'static str,
    value: Option<&str>,
    config: &ServiceConfig,
) -> Option<String> {
    let Some(value) = non_blank(value) else {
        errors.push(FieldViolation::new(field, "is required"));
        return None;
    };

    if value.chars().count() > config.max_field_length {
        errors.push(FieldViolation::new(
            field,
            format!("exceeds maximum length of {}", config.max_field_length),
        ));
        return None;
    }

    Some(value.to_owned())
}

fn parse_date(errors: &mut Vec<FieldViolation>, value: Option<&str>) -> Option<Date> {
    let Some(raw) = non_blank(value) else {
        errors.push(FieldViolation::new(
            PersonaFields::FECHA_NACIMIENTO,
            "is required",
        ));
        return None;
    };

    let parsed = Date::parse(raw, DATE_FORMAT).ok();
    if parsed.is_none() {
        errors.push(FieldViolation::new(
            PersonaFields::FECHA_NACIMIENTO,
            format!("'{raw}' is not a valid date (expected YYYY-MM-DD)"),
        ));
    }
    parsed
}

fn parse_enum<T>(
    errors: &mut Vec<FieldViolation>,
    field: &'static str,
    value: Option<&str>,
) -> Option<T>
where
    T: std::str::FromStr<Err = personas_sdk::UnknownVariant>,
{
    let Some(raw) = non_blank(value) else {
        errors.push(FieldViolation::new(field, "is required"));
        return None;
    };

    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(FieldViolation::new(field, e.to_string()));
            None
        }
    }
}
