mod iban;
mod spd;

pub use iban::{czech_account_to_iban, validate_iban};
pub use spd::build_payment_code;
