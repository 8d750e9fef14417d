use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Personal details for one contract party (tenant or subtenant).
///
/// First name, last name, document number, and address are mandatory whenever
/// the person is active in the agreement; phone and e-mail stay optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub document_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Working state for one contract being drafted. Created empty when the
/// wizard starts, filled field by field, and read once on the final step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agreement {
    pub room_variant_id: Option<String>,
    pub tenant: Person,
    pub has_subtenant: bool,
    pub subtenant: Person,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub signing_date: Option<NaiveDate>,
}

impl Agreement {
    pub fn occupants(&self) -> u32 {
        if self.has_subtenant {
            2
        } else {
            1
        }
    }
}

/// Steps of the data-collection wizard, in canonical order. The subtenant
/// step is dropped from the visible sequence when the selected room variant
/// holds a single occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    UnitSelection,
    Tenant,
    Subtenant,
    Period,
    Preview,
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::UnitSelection
    }
}

impl WizardStep {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::UnitSelection,
            Self::Tenant,
            Self::Subtenant,
            Self::Period,
            Self::Preview,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UnitSelection => "Výběr pokoje",
            Self::Tenant => "Nájemce",
            Self::Subtenant => "Podnájemce",
            Self::Period => "Období",
            Self::Preview => "Náhled",
        }
    }
}
