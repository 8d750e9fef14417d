//! Czech domestic account numbers to IBAN, ISO 7064 MOD 97-10.
//!
//! The IBAN layout is `CZkk bbbb pppp ppnn nnnn nnnn`: two check digits,
//! four-digit bank code, six-digit padded prefix, ten-digit padded number.

/// Numeric transliteration of `"CZ"` plus the `"00"` check-digit stand-in
/// (`C` = 12, `Z` = 35), appended to the BBAN before the modulo step.
const CZ_CHECK_SUFFIX: &str = "123500";

/// Converts a local account (`"prefix-number"` or bare `"number"`) and a
/// four-digit bank code into a 24-character IBAN.
///
/// Malformed input (over-long prefix or number, wrong bank-code length, any
/// non-digit) yields `None`; the caller treats that as "no payment code",
/// never as a generation failure.
pub fn czech_account_to_iban(account_number: &str, bank_code: &str) -> Option<String> {
    let (prefix, number) = match account_number.split_once('-') {
        Some((prefix, number)) => (prefix, number),
        None => ("", account_number),
    };

    if prefix.len() > 6 || number.is_empty() || number.len() > 10 || bank_code.len() != 4 {
        return None;
    }
    if !all_digits(prefix) || !all_digits(number) || !all_digits(bank_code) {
        return None;
    }

    // BBAN: bank(4) + prefix(6) + number(10), zero-left-padded.
    let bban = format!("{bank_code}{prefix:0>6}{number:0>10}");

    let remainder = mod97(&format!("{bban}{CZ_CHECK_SUFFIX}"))?;
    let check_digits = 98 - remainder;

    Some(format!("CZ{check_digits:02}{bban}"))
}

/// Checks the IBAN validity law: rotating the first four characters to the
/// end and transliterating letters must leave a number with remainder 1
/// modulo 97.
pub fn validate_iban(iban: &str) -> bool {
    if iban.len() < 5 || !iban.is_ascii() {
        return false;
    }

    let (head, tail) = iban.split_at(4);
    let mut transliterated = String::with_capacity(iban.len() * 2);
    for ch in tail.chars().chain(head.chars()) {
        match ch {
            '0'..='9' => transliterated.push(ch),
            'A'..='Z' => {
                let value = 10 + (ch as u32 - 'A' as u32);
                transliterated.push_str(&value.to_string());
            }
            _ => return false,
        }
    }

    mod97(&transliterated) == Some(1)
}

fn all_digits(value: &str) -> bool {
    value.chars().all(|ch| ch.is_ascii_digit())
}

/// Streaming decimal remainder modulo 97. Exact for any length; the checksum
/// scheme tolerates no floating-point approximation.
fn mod97(digits: &str) -> Option<u32> {
    let mut remainder: u32 = 0;
    for ch in digits.chars() {
        let digit = ch.to_digit(10)?;
        remainder = (remainder * 10 + digit) % 97;
    }
    Some(remainder)
}
