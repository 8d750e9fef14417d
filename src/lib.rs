pub mod config;
pub mod contract;
pub mod error;
pub mod payment;

pub use config::Configuration;
pub use contract::assembler::{generate_documents, GeneratedDocuments};
pub use contract::domain::{Agreement, Person, WizardStep};
pub use contract::wizard::{StepOutcome, Wizard};
pub use error::GenerationError;
