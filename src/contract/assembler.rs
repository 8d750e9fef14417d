use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use super::domain::{Agreement, Person};
use super::format::{format_date, format_money, person_word, romanize};
use super::template::{fill_template, TemplateData};
use crate::config::{Configuration, NormalizedMeter, RoomVariant, ServicesBreakdown};
use crate::error::GenerationError;
use crate::payment::{build_payment_code, czech_account_to_iban};

/// Monthly service fee for the whole unit. A configured services breakdown
/// wins; a zero breakdown falls back to the variant's flat per-person fee
/// (legacy configurations carry no breakdown at all).
pub fn total_fee(variant: &RoomVariant, services: &ServicesBreakdown, occupants: u32) -> u32 {
    if services.is_empty() {
        variant.fee_per_person * occupants
    } else {
        services.per_person_total() * occupants
    }
}

/// Rent plus the service fee for the given occupancy.
pub fn total_monthly(variant: &RoomVariant, services: &ServicesBreakdown, occupants: u32) -> u32 {
    variant.monthly_rent + total_fee(variant, services, occupants)
}

/// Deposit for the variant: a positive per-variant override beats the
/// property-wide default.
pub fn security_deposit(variant: &RoomVariant, config: &Configuration) -> u32 {
    match variant.deposit_override {
        Some(amount) if amount > 0 => amount,
        _ => config.security_deposit,
    }
}

fn resolve_variant<'a>(
    agreement: &Agreement,
    config: &'a Configuration,
) -> Result<&'a RoomVariant, GenerationError> {
    let id = agreement
        .room_variant_id
        .as_deref()
        .ok_or(GenerationError::NoRoomVariantSelected)?;
    config
        .room_variant(id)
        .ok_or_else(|| GenerationError::UnknownRoomVariant(id.to_string()))
}

fn insert(data: &mut TemplateData, key: &str, value: impl Into<String>) {
    data.insert(key.to_string(), value.into());
}

fn formatted_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

fn subtenant_contact_line(subtenant: &Person) -> String {
    let mut pieces = Vec::new();
    if !subtenant.phone.is_empty() {
        pieces.push(format!("Tel.: {}", subtenant.phone));
    }
    if !subtenant.email.is_empty() {
        pieces.push(format!("e-mail: {}", subtenant.email));
    }
    pieces.join(", ")
}

const SUBTENANT_KEYS: [&str; 7] = [
    "SUBTENANT_NAME",
    "SUBTENANT_DOCUMENT_NUMBER",
    "SUBTENANT_BIRTH_DATE",
    "SUBTENANT_ADDRESS",
    "SUBTENANT_PHONE",
    "SUBTENANT_EMAIL",
    "SUBTENANT_CONTACT",
];

const SUBTENANT_SECTION_KEYS: [&str; 3] = [
    "SUBTENANT_SECTION",
    "SUBTENANT_SIGNATURE",
    "SUBTENANT_PROTOCOL_SECTION",
];

/// Builds the full key→value map for the contract template.
///
/// `qr_image` is the rendered payment-code markup from the external renderer,
/// if it produced one in time; the contract text never waits for it.
pub fn contract_fields(
    agreement: &Agreement,
    config: &Configuration,
    qr_image: Option<&str>,
) -> Result<TemplateData, GenerationError> {
    let variant = resolve_variant(agreement, config)?;
    let occupants = agreement.occupants();

    let services = &config.services_breakdown;
    let fee = total_fee(variant, services, occupants);
    let monthly = total_monthly(variant, services, occupants);
    let deposit = security_deposit(variant, config);
    let copies = if agreement.has_subtenant { 3 } else { 2 };

    debug!(
        variant = %variant.id,
        occupants,
        fee,
        monthly,
        "assembling contract fields"
    );

    let mut data = TemplateData::new();

    insert(&mut data, "LANDLORD_NAME", &config.landlord.name);
    insert(
        &mut data,
        "LANDLORD_DOCUMENT_NUMBER",
        &config.landlord.document_number,
    );
    insert(
        &mut data,
        "LANDLORD_ADDRESS",
        config.landlord.address.single_line(),
    );
    insert(&mut data, "LANDLORD_PHONE", &config.landlord.contact.phone);
    insert(&mut data, "LANDLORD_EMAIL", &config.landlord.contact.email);

    insert(&mut data, "TENANT_NAME", agreement.tenant.full_name());
    insert(
        &mut data,
        "TENANT_DOCUMENT_NUMBER",
        &agreement.tenant.document_number,
    );
    insert(
        &mut data,
        "TENANT_BIRTH_DATE",
        formatted_date(agreement.tenant.date_of_birth),
    );
    insert(&mut data, "TENANT_ADDRESS", &agreement.tenant.address);
    insert(&mut data, "TENANT_PHONE", &agreement.tenant.phone);
    insert(&mut data, "TENANT_EMAIL", &agreement.tenant.email);

    insert(&mut data, "ROOM_NAME", &variant.name);
    insert(&mut data, "ROOM_AREA", variant.area_m2.to_string());
    insert(
        &mut data,
        "PROPERTY_ADDRESS",
        config.property_address.single_line(),
    );

    insert(&mut data, "DATE_FROM", formatted_date(agreement.date_from));
    insert(&mut data, "DATE_TO", formatted_date(agreement.date_to));

    insert(&mut data, "MONTHLY_RENT", format_money(variant.monthly_rent));
    insert(&mut data, "MONTHLY_FEES", format_money(fee));
    insert(&mut data, "TOTAL_MONTHLY", format_money(monthly));
    insert(&mut data, "OCCUPANTS_COUNT", occupants.to_string());
    insert(&mut data, "PERSON_WORD", person_word(occupants));
    insert(
        &mut data,
        "BANK_ACCOUNT",
        config.landlord.bank_account.display(),
    );
    insert(&mut data, "SECURITY_DEPOSIT", format_money(deposit));
    insert(&mut data, "RENT_DUE_DAY", config.rent_due_day.to_string());

    insert(
        &mut data,
        "SERVICE_GAS",
        format_money(services.gas * occupants),
    );
    insert(
        &mut data,
        "SERVICE_ELECTRICITY",
        format_money(services.electricity * occupants),
    );
    insert(
        &mut data,
        "SERVICE_WATER",
        format_money(services.cold_water * occupants),
    );
    insert(
        &mut data,
        "SERVICE_BUILDING",
        format_money(services.building_services * occupants),
    );

    insert(
        &mut data,
        "NOTICE_PERIOD",
        config.notice_period_months.to_string(),
    );

    insert(&mut data, "SIGNING_PLACE", &config.property_address.city);
    let signing = agreement
        .signing_date
        .unwrap_or_else(|| Local::now().date_naive());
    insert(&mut data, "SIGNING_DATE", format_date(signing));

    insert(&mut data, "COPIES_COUNT", copies.to_string());
    insert(&mut data, "COPIES_PER_PARTY", "1");

    let qr_markup = match qr_image {
        Some(image) => format!(
            "<img src=\"{image}\" alt=\"QR Platba\" style=\"width: 150px; height: 150px; border: 1px solid #ddd; padding: 5px;\">"
        ),
        None => String::new(),
    };
    insert(&mut data, "QR_PAYMENT", qr_markup);

    if agreement.has_subtenant {
        let subtenant = &agreement.subtenant;
        let mut subtenant_data = TemplateData::new();
        insert(&mut subtenant_data, "SUBTENANT_NAME", subtenant.full_name());
        insert(
            &mut subtenant_data,
            "SUBTENANT_DOCUMENT_NUMBER",
            &subtenant.document_number,
        );
        insert(
            &mut subtenant_data,
            "SUBTENANT_BIRTH_DATE",
            formatted_date(subtenant.date_of_birth),
        );
        insert(&mut subtenant_data, "SUBTENANT_ADDRESS", &subtenant.address);
        insert(&mut subtenant_data, "SUBTENANT_PHONE", &subtenant.phone);
        insert(&mut subtenant_data, "SUBTENANT_EMAIL", &subtenant.email);
        insert(
            &mut subtenant_data,
            "SUBTENANT_CONTACT",
            subtenant_contact_line(subtenant),
        );

        insert(
            &mut data,
            "SUBTENANT_SECTION",
            fill_template(&config.subtenant_section, &subtenant_data),
        );
        insert(
            &mut data,
            "SUBTENANT_SIGNATURE",
            fill_template(&config.subtenant_signature, &subtenant_data),
        );
        insert(
            &mut data,
            "SUBTENANT_PROTOCOL_SECTION",
            fill_template(&config.subtenant_protocol_section, &subtenant_data),
        );
        data.extend(subtenant_data);
    } else {
        // Whole sections vanish, not just their inner values.
        for key in SUBTENANT_KEYS.into_iter().chain(SUBTENANT_SECTION_KEYS) {
            insert(&mut data, key, "");
        }
    }

    Ok(data)
}

fn section_block(number: u32, title: &str, body: &str) -> String {
    format!(
        "<div style=\"page-break-inside: avoid;\">\n\
         <p style=\"font-weight: bold; margin: 10px 0 5px 0; font-size: 10pt;\">{}. {}</p>\n\
         {}\n\
         </div>",
        romanize(number),
        title,
        body
    )
}

fn meter_rows(meters: &[NormalizedMeter]) -> String {
    meters
        .iter()
        .map(|meter| {
            format!(
                "<tr>\
                 <td style=\"padding: 3px 5px; border-bottom: 1px solid #ccc;\">{} (č. měřiče: {}):</td>\
                 <td style=\"padding: 3px 5px; border-bottom: 1px solid #ccc; width: 30%;\">__________ {}</td>\
                 </tr>",
                meter.label, meter.meter_number, meter.unit
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Meter list for the protocol: a non-empty per-variant override beats the
/// property-wide configuration.
fn active_meters(variant: &RoomVariant, config: &Configuration) -> Vec<NormalizedMeter> {
    if let Some(source) = &variant.meter_readings {
        let meters = source.normalize();
        if !meters.is_empty() {
            return meters;
        }
    }
    config
        .meter_readings
        .as_ref()
        .map(|source| source.normalize())
        .unwrap_or_default()
}

/// Builds the key→value map for the handover protocol, extending the contract
/// fields with dynamically numbered equipment and meter sections.
///
/// Section numbering starts at II ("room condition" is the fixed section I)
/// and advances only past sections that actually render, so the fixed keys
/// and conclusion sections receive whatever numbers come next.
pub fn protocol_fields(
    agreement: &Agreement,
    config: &Configuration,
) -> Result<TemplateData, GenerationError> {
    let variant = resolve_variant(agreement, config)?;
    let mut data = contract_fields(agreement, config, None)?;

    let mut section = 2;

    let flat_equipment = if config.flat_equipment.is_empty() {
        String::new()
    } else {
        let items = config
            .flat_equipment
            .iter()
            .map(|item| format!("<li>{item}</li>"))
            .collect::<String>();
        let body = format!(
            "<ul style=\"margin: 0 0 10px 20px; font-size: 9pt; padding-left: 1rem;\">{items}</ul>"
        );
        let block = section_block(section, "VYBAVENÍ BYTU", &body);
        section += 1;
        block
    };
    insert(&mut data, "FLAT_EQUIPMENT_SECTION", flat_equipment);

    let room_equipment = if variant.features.is_empty() {
        String::new()
    } else {
        let lines = variant
            .features
            .iter()
            .enumerate()
            .map(|(index, feature)| format!("{}. {}", index + 1, feature))
            .collect::<Vec<_>>()
            .join("<br>");
        let body = format!("<div style=\"margin: 0 0 10px 20px; font-size: 9pt;\">{lines}</div>");
        let block = section_block(section, "VYBAVENÍ POKOJE", &body);
        section += 1;
        block
    };
    insert(&mut data, "ROOM_EQUIPMENT_SECTION", room_equipment);

    let meters = active_meters(variant, config);
    let meter_section = if meters.is_empty() {
        String::new()
    } else {
        let body = format!(
            "<table style=\"width: 100%; border-collapse: collapse; margin: 10px 0; font-size: 9pt;\">\n{}\n</table>",
            meter_rows(&meters)
        );
        let block = section_block(section, "STAVY MĚŘIČŮ", &body);
        section += 1;
        block
    };
    insert(&mut data, "METER_READINGS_SECTION", meter_section);

    insert(&mut data, "KEYS_SECTION_NUMBER", romanize(section));
    insert(&mut data, "CONCLUSION_SECTION_NUMBER", romanize(section + 1));

    Ok(data)
}

/// SPD payment payload for one month's total payment, or `None` when the
/// landlord's bank details cannot be expressed as an IBAN. Degraded, never
/// fatal: the contract text renders either way.
pub fn payment_payload(
    agreement: &Agreement,
    config: &Configuration,
    message: Option<&str>,
    variable_symbol: Option<&str>,
) -> Result<Option<String>, GenerationError> {
    let variant = resolve_variant(agreement, config)?;
    let amount = total_monthly(variant, &config.services_breakdown, agreement.occupants());

    let account = &config.landlord.bank_account;
    let iban = match czech_account_to_iban(&account.account_number, &account.bank_code) {
        Some(iban) => iban,
        None => {
            warn!(
                account = %account.display(),
                "bank account not expressible as IBAN, omitting payment code"
            );
            return Ok(None);
        }
    };

    let default_message;
    let message = match message {
        Some(message) => message,
        None => {
            default_message = format!("Najem {}", agreement.tenant.full_name());
            &default_message
        }
    };

    Ok(Some(build_payment_code(
        &iban,
        amount,
        message,
        variable_symbol,
    )))
}

/// Both finished document texts from one agreement snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocuments {
    pub contract: String,
    pub protocol: String,
}

/// Generation entry point: substitutes both templates, surfacing any
/// configuration problem as a single error with no partial output.
pub fn generate_documents(
    agreement: &Agreement,
    config: &Configuration,
    qr_image: Option<&str>,
) -> Result<GeneratedDocuments, GenerationError> {
    let contract = generate_contract_text(agreement, config, qr_image)?;
    let protocol = generate_protocol_text(agreement, config)?;
    Ok(GeneratedDocuments { contract, protocol })
}

pub fn generate_contract_text(
    agreement: &Agreement,
    config: &Configuration,
    qr_image: Option<&str>,
) -> Result<String, GenerationError> {
    let data = contract_fields(agreement, config, qr_image)?;
    Ok(fill_template(&config.contract_template, &data))
}

pub fn generate_protocol_text(
    agreement: &Agreement,
    config: &Configuration,
) -> Result<String, GenerationError> {
    let data = protocol_fields(agreement, config)?;
    Ok(fill_template(&config.handover_protocol_template, &data))
}

/// Kinds of documents handed to the export collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Contract,
    HandoverProtocol,
}

impl DocumentKind {
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Contract => "smlouva",
            Self::HandoverProtocol => "protokol",
        }
    }
}

/// Filename convention for exported files:
/// `<kind>-<tenantLastName>-<isoDate>.<ext>`.
pub fn document_filename(
    kind: DocumentKind,
    tenant_last_name: &str,
    date: NaiveDate,
    extension: &str,
) -> String {
    format!(
        "{}-{}-{}.{}",
        kind.file_stem(),
        tenant_last_name,
        date.format("%Y-%m-%d"),
        extension
    )
}
