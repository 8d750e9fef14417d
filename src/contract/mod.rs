pub mod assembler;
pub mod domain;
pub mod format;
pub mod template;
pub mod validation;
pub mod wizard;

pub use assembler::{
    contract_fields, document_filename, generate_contract_text, generate_documents,
    generate_protocol_text, payment_payload, protocol_fields, DocumentKind, GeneratedDocuments,
};
pub use domain::{Agreement, Person, WizardStep};
pub use template::{fill_template, TemplateData};
pub use validation::{validate_step, FieldErrors};
pub use wizard::{visible_steps, StepOutcome, Wizard};
