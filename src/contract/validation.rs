use std::collections::BTreeMap;

use super::domain::{Agreement, Person, WizardStep};
use crate::config::RoomVariant;
use chrono::NaiveDate;

/// Field name to user-facing message. An empty map never escapes this module;
/// clean results are `None`.
pub type FieldErrors = BTreeMap<String, String>;

/// Dedicated key for the date-ordering error, kept separate from the two
/// individual date fields so both can carry their own required-errors.
pub const DATE_RANGE_KEY: &str = "date_range";

/// Person fields the validator knows how to check individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonField {
    FirstName,
    LastName,
    DocumentNumber,
    Address,
    Phone,
    Email,
}

impl PersonField {
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::DocumentNumber => "document_number",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }

    const fn required_message(self) -> &'static str {
        match self {
            Self::FirstName => "Jméno je povinné",
            Self::LastName => "Příjmení je povinné",
            Self::DocumentNumber => "Číslo dokladu je povinné",
            Self::Address => "Adresa je povinná",
            Self::Phone => "Telefon je povinný",
            Self::Email => "Email je povinný",
        }
    }

    fn value<'a>(self, person: &'a Person) -> &'a str {
        match self {
            Self::FirstName => &person.first_name,
            Self::LastName => &person.last_name,
            Self::DocumentNumber => &person.document_number,
            Self::Address => &person.address,
            Self::Phone => &person.phone,
            Self::Email => &person.email,
        }
    }
}

/// Checks one person field. Mandatory fields fail on blank input; the e-mail
/// shape is checked only when a value is present; phone content is accepted
/// unconditionally (extension point, no constraint today).
pub fn validate_person_field(
    person: &Person,
    field: PersonField,
    required: bool,
) -> Option<(&'static str, String)> {
    let value = field.value(person);

    match field {
        PersonField::Phone => None,
        PersonField::Email => {
            if value.trim().is_empty() {
                None
            } else if !is_valid_email(value) {
                Some((field.key(), "Neplatný formát emailu".to_string()))
            } else {
                None
            }
        }
        _ => {
            if required && value.trim().is_empty() {
                Some((field.key(), field.required_message().to_string()))
            } else {
                None
            }
        }
    }
}

/// Validates all fields of one person, keyed by field name.
pub fn validate_person(person: &Person, required: bool) -> FieldErrors {
    let fields = [
        PersonField::FirstName,
        PersonField::LastName,
        PersonField::DocumentNumber,
        PersonField::Address,
        PersonField::Phone,
        PersonField::Email,
    ];

    fields
        .into_iter()
        .filter_map(|field| validate_person_field(person, field, required))
        .map(|(key, message)| (key.to_string(), message))
        .collect()
}

/// `local@domain.tld` shape: exactly one `@`, no whitespace, dotted domain
/// with a non-empty last segment.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = match parts.next() {
        Some(domain) => domain,
        None => return false,
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Strict ordering check; absent dates are left to the per-field required
/// checks and produce no range error here.
pub fn validate_date_range(
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
) -> Option<&'static str> {
    match (date_from, date_to) {
        (Some(from), Some(to)) if from >= to => {
            Some("Datum začátku musí být před datem konce nájmu")
        }
        _ => None,
    }
}

/// Validates the fields belonging to one wizard step. Returns `None` when the
/// step carries no blocking errors. Pure: no side effects on any input.
pub fn validate_step(
    step: WizardStep,
    agreement: &Agreement,
    room_variants: &[RoomVariant],
) -> Option<FieldErrors> {
    let mut errors = FieldErrors::new();

    match step {
        WizardStep::UnitSelection => {
            if agreement.room_variant_id.is_none() {
                errors.insert(
                    "room_variant".to_string(),
                    "Musíte vybrat variantu pokoje".to_string(),
                );
            }
        }
        WizardStep::Tenant => {
            errors.extend(validate_person(&agreement.tenant, true));
        }
        WizardStep::Subtenant => {
            let two_occupant_unit = agreement
                .room_variant_id
                .as_deref()
                .and_then(|id| room_variants.iter().find(|variant| variant.id == id))
                .map(|variant| variant.max_occupants == 2)
                .unwrap_or(false);

            if agreement.has_subtenant && two_occupant_unit {
                errors.extend(validate_person(&agreement.subtenant, true));
            }
        }
        WizardStep::Period => {
            if agreement.date_from.is_none() {
                errors.insert(
                    "date_from".to_string(),
                    "Datum začátku je povinné".to_string(),
                );
            }
            if agreement.date_to.is_none() {
                errors.insert("date_to".to_string(), "Datum konce je povinné".to_string());
            }
            if let Some(message) = validate_date_range(agreement.date_from, agreement.date_to) {
                errors.insert(DATE_RANGE_KEY.to_string(), message.to_string());
            }
            // Signing date stays optional; the assembler falls back to today.
        }
        WizardStep::Preview => {}
    }

    if errors.is_empty() {
        None
    } else {
        Some(errors)
    }
}
