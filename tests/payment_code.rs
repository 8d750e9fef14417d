use lease_docgen::payment::{build_payment_code, czech_account_to_iban, validate_iban};

#[test]
fn every_well_formed_account_yields_a_law_abiding_iban() {
    let accounts = [
        ("123456-789", "0100"),
        ("1234567890", "0100"),
        ("19-2000145399", "0800"),
        ("1", "0300"),
        ("0-0000000001", "2010"),
        ("999999-9999999999", "5500"),
    ];

    for (account, bank_code) in accounts {
        let iban = czech_account_to_iban(account, bank_code)
            .unwrap_or_else(|| panic!("{account}/{bank_code} should convert"));
        assert_eq!(iban.len(), 24, "{iban}");
        assert!(iban.starts_with("CZ"), "{iban}");
        assert!(validate_iban(&iban), "{iban} fails the MOD-97 law");
    }
}

#[test]
fn golden_iban_for_the_prefixed_account() {
    assert_eq!(
        czech_account_to_iban("123456-789", "0100").expect("valid input"),
        "CZ3901001234560000000789"
    );
}

#[test]
fn payload_composes_around_the_iban() {
    let iban = czech_account_to_iban("1234567890", "0100").expect("valid input");
    let code = build_payment_code(&iban, 12500, "Najem Velký pokoj", Some("202506"));

    assert_eq!(
        code,
        "SPD*1.0*ACC:CZ4701000000001234567890*AM:12500.00*CC:CZK*MSG:Najem Velký pokoj*X-VS:202506"
    );
}

#[test]
fn malformed_inputs_produce_no_code_rather_than_panicking() {
    assert_eq!(czech_account_to_iban("1234567-0", "0100"), None);
    assert_eq!(czech_account_to_iban("123456789012", "0100"), None);
    assert_eq!(czech_account_to_iban("123", "10"), None);
    assert_eq!(czech_account_to_iban("12-34-56", "0100"), None);
}
