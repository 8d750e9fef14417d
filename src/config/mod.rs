use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::contract::domain::Person;

/// Postal address split into its display components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: String,
}

impl Address {
    /// Renders the address on one line, `"street, postal_code city"`.
    pub fn single_line(&self) -> String {
        format!("{}, {} {}", self.street, self.postal_code, self.city)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
}

/// Czech domestic bank account, kept in its local `number/bank_code` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub account_number: String,
    pub bank_code: String,
}

impl BankAccount {
    pub fn display(&self) -> String {
        format!("{}/{}", self.account_number, self.bank_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landlord {
    pub name: String,
    pub document_number: String,
    pub address: Address,
    pub contact: ContactInfo,
    pub bank_account: BankAccount,
}

/// A rentable sub-unit of the property with its own pricing and capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomVariant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub max_occupants: u32,
    pub monthly_rent: u32,
    pub fee_per_person: u32,
    #[serde(default)]
    pub deposit_override: Option<u32>,
    pub area_m2: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub meter_readings: Option<MeterSource>,
}

/// Monthly advance payments per person, by service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesBreakdown {
    pub gas: u32,
    pub electricity: u32,
    pub cold_water: u32,
    pub building_services: u32,
}

impl ServicesBreakdown {
    pub fn per_person_total(&self) -> u32 {
        self.gas + self.electricity + self.cold_water + self.building_services
    }

    /// A breakdown that sums to zero counts as "not configured" and triggers
    /// the legacy `fee_per_person` path.
    pub fn is_empty(&self) -> bool {
        self.per_person_total() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeterKind {
    Electricity,
    Gas,
    WaterCold,
    WaterHot,
    Water,
    Heat,
}

impl MeterKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Electricity => "Elektřina",
            Self::Gas => "Plyn",
            Self::WaterCold => "Studená voda",
            Self::WaterHot => "Teplá voda",
            Self::Water => "Voda",
            Self::Heat => "Teplo",
        }
    }
}

/// One meter entry in the modern list shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterReading {
    pub kind: MeterKind,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub meter_number: String,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyMeter {
    pub meter_number: String,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyWaterMeters {
    pub cold: Option<LegacyMeter>,
    pub hot: Option<LegacyMeter>,
    /// Oldest configurations carried a single undivided water meter.
    #[serde(flatten)]
    pub combined: Option<LegacyMeter>,
}

/// Legacy nested-object meter shape as stored by early configurations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyMeters {
    pub electricity: Option<LegacyMeter>,
    pub water: Option<LegacyWaterMeters>,
    pub gas: Option<LegacyMeter>,
}

/// Meter readings arrive in one of two historical shapes; both normalize into
/// a flat list before any document logic sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeterSource {
    List(Vec<MeterReading>),
    Legacy(LegacyMeters),
}

/// Canonical meter shape the protocol assembler works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMeter {
    pub label: String,
    pub meter_number: String,
    pub unit: String,
}

impl MeterSource {
    pub fn normalize(&self) -> Vec<NormalizedMeter> {
        match self {
            MeterSource::List(entries) => entries
                .iter()
                .map(|meter| {
                    let label = meter.label.clone().unwrap_or_else(|| {
                        match &meter.description {
                            Some(description) => {
                                format!("{} ({})", meter.kind.label(), description)
                            }
                            None => meter.kind.label().to_string(),
                        }
                    });
                    NormalizedMeter {
                        label,
                        meter_number: meter.meter_number.clone(),
                        unit: meter.unit.clone(),
                    }
                })
                .collect(),
            MeterSource::Legacy(legacy) => {
                let mut meters = Vec::new();
                if let Some(meter) = &legacy.electricity {
                    meters.push(legacy_entry(MeterKind::Electricity, meter));
                }
                if let Some(meter) = &legacy.gas {
                    meters.push(legacy_entry(MeterKind::Gas, meter));
                }
                if let Some(water) = &legacy.water {
                    if let Some(meter) = &water.cold {
                        meters.push(legacy_entry(MeterKind::WaterCold, meter));
                    }
                    if let Some(meter) = &water.hot {
                        meters.push(legacy_entry(MeterKind::WaterHot, meter));
                    }
                    if let Some(meter) = &water.combined {
                        meters.push(legacy_entry(MeterKind::Water, meter));
                    }
                }
                meters
            }
        }
    }
}

fn legacy_entry(kind: MeterKind, meter: &LegacyMeter) -> NormalizedMeter {
    NormalizedMeter {
        label: kind.label().to_string(),
        meter_number: meter.meter_number.clone(),
        unit: meter.unit.clone(),
    }
}

/// Fully resolved, read-only configuration for one property, as supplied by
/// the external configuration provider. Every core function takes this as an
/// explicit parameter; there is no module-level configuration state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub landlord: Landlord,
    pub property_address: Address,
    pub room_variants: Vec<RoomVariant>,
    #[serde(default)]
    pub flat_equipment: Vec<String>,
    #[serde(default)]
    pub meter_readings: Option<MeterSource>,
    pub security_deposit: u32,
    pub rent_due_day: u32,
    pub notice_period_months: u32,
    #[serde(default)]
    pub services_breakdown: ServicesBreakdown,
    #[serde(default = "default_contract_duration")]
    pub default_contract_duration_years: u32,
    pub contract_template: String,
    pub handover_protocol_template: String,
    #[serde(default)]
    pub subtenant_section: String,
    #[serde(default)]
    pub subtenant_signature: String,
    #[serde(default)]
    pub subtenant_protocol_section: String,
}

fn default_contract_duration() -> u32 {
    2
}

impl Configuration {
    /// Parses and validates a provider-supplied configuration blob.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Configuration = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=28).contains(&self.rent_due_day) {
            return Err(ConfigError::RentDueDay(self.rent_due_day));
        }
        for variant in &self.room_variants {
            if !(1..=2).contains(&variant.max_occupants) {
                return Err(ConfigError::MaxOccupants {
                    id: variant.id.clone(),
                    found: variant.max_occupants,
                });
            }
        }
        Ok(())
    }

    pub fn room_variant(&self, id: &str) -> Option<&RoomVariant> {
        self.room_variants.iter().find(|variant| variant.id == id)
    }

    /// Suggested tenancy end date for a start date, per the configured
    /// default duration. A February 29 start lands on February 28.
    pub fn default_date_to(&self, date_from: NaiveDate) -> NaiveDate {
        let years = self.default_contract_duration_years as i32;
        date_from
            .with_year(date_from.year() + years)
            .unwrap_or_else(|| {
                (date_from - Duration::days(1))
                    .with_year(date_from.year() + years)
                    .unwrap_or(date_from)
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("rent due day must fall between 1 and 28, found {0}")]
    RentDueDay(u32),
    #[error("room variant '{id}' must hold 1 or 2 occupants, found {found}")]
    MaxOccupants { id: String, found: u32 },
    #[error("configuration unavailable: {0}")]
    Unavailable(String),
}

/// External collaborator that resolves the configuration for a session.
pub trait ConfigurationProvider {
    fn load(&self) -> Result<Configuration, ConfigError>;
}

/// External collaborator offering previously saved people the wizard may copy
/// into the tenant or subtenant form.
pub trait AddressBook {
    fn saved_people(&self) -> Vec<Person>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter(number: &str, unit: &str) -> LegacyMeter {
        LegacyMeter {
            meter_number: number.to_string(),
            unit: unit.to_string(),
        }
    }

    #[test]
    fn legacy_meter_shape_flattens_in_stable_order() {
        let source = MeterSource::Legacy(LegacyMeters {
            electricity: Some(meter("EL123456", "kWh")),
            water: Some(LegacyWaterMeters {
                cold: Some(meter("V-STU123", "m³")),
                hot: Some(meter("V-TEP456", "m³")),
                combined: None,
            }),
            gas: Some(meter("PL789012", "m³")),
        });

        let normalized = source.normalize();
        let labels: Vec<&str> = normalized.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["Elektřina", "Plyn", "Studená voda", "Teplá voda"]);
        assert_eq!(normalized[0].meter_number, "EL123456");
        assert_eq!(normalized[2].unit, "m³");
    }

    #[test]
    fn modern_meter_list_keeps_explicit_labels_and_descriptions() {
        let source = MeterSource::List(vec![
            MeterReading {
                kind: MeterKind::Electricity,
                label: None,
                description: Some("sklep".to_string()),
                meter_number: "EL-9".to_string(),
                unit: "kWh".to_string(),
            },
            MeterReading {
                kind: MeterKind::Heat,
                label: Some("Dálkové teplo".to_string()),
                description: None,
                meter_number: "T-1".to_string(),
                unit: "GJ".to_string(),
            },
        ]);

        let normalized = source.normalize();
        assert_eq!(normalized[0].label, "Elektřina (sklep)");
        assert_eq!(normalized[1].label, "Dálkové teplo");
    }

    #[test]
    fn default_date_to_adds_whole_years() {
        let raw = minimal_config_json(10);
        let config = Configuration::from_json_str(&raw).expect("config parses");

        let start = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        let expected = NaiveDate::from_ymd_opt(2027, 6, 1).expect("valid date");
        assert_eq!(config.default_date_to(start), expected);

        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date");
        let clamped = NaiveDate::from_ymd_opt(2026, 2, 28).expect("valid date");
        assert_eq!(config.default_date_to(leap), clamped);
    }

    fn minimal_config_json(rent_due_day: u32) -> String {
        serde_json::json!({
            "landlord": {
                "name": "Jan Novák",
                "document_number": "123456/7890",
                "address": { "street": "Ulice 1", "city": "Praha", "postal_code": "110 00" },
                "contact": { "phone": "+420 111 222 333", "email": "jan@example.cz" },
                "bank_account": { "account_number": "1234567890", "bank_code": "0100" }
            },
            "property_address": { "street": "Dlouhá 5", "city": "Praha", "postal_code": "120 00" },
            "room_variants": [],
            "security_deposit": 20000,
            "rent_due_day": rent_due_day,
            "notice_period_months": 2,
            "contract_template": "",
            "handover_protocol_template": ""
        })
        .to_string()
    }

    #[test]
    fn from_json_rejects_out_of_range_rent_due_day() {
        let err = Configuration::from_json_str(&minimal_config_json(31))
            .expect_err("day 31 must be rejected");
        assert!(matches!(err, ConfigError::RentDueDay(31)));
    }
}
