/// Builds the SPD 1.0 payment payload scanned by Czech banking apps.
///
/// Segments are `*`-delimited `KEY:value` pairs. The amount is a whole-crown
/// value rendered with two decimal places; the message is truncated to 60
/// characters; `MSG` and `X-VS` are omitted entirely when their source is
/// empty. The string itself is the deliverable — encoding it into a QR image
/// belongs to the external renderer.
pub fn build_payment_code(
    iban: &str,
    amount: u32,
    message: &str,
    variable_symbol: Option<&str>,
) -> String {
    let mut parts = vec![
        "SPD*1.0".to_string(),
        format!("ACC:{iban}"),
        format!("AM:{amount}.00"),
        "CC:CZK".to_string(),
    ];

    if !message.is_empty() {
        let truncated: String = message.chars().take(60).collect();
        parts.push(format!("MSG:{truncated}"));
    }

    if let Some(symbol) = variable_symbol.filter(|symbol| !symbol.is_empty()) {
        parts.push(format!("X-VS:{symbol}"));
    }

    parts.join("*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_payload_sequence() {
        let code = build_payment_code(
            "CZ3901001234560000000789",
            10000,
            "Najem Petr Svoboda",
            Some("2025"),
        );
        assert_eq!(
            code,
            "SPD*1.0*ACC:CZ3901001234560000000789*AM:10000.00*CC:CZK*MSG:Najem Petr Svoboda*X-VS:2025"
        );
    }

    #[test]
    fn empty_message_and_symbol_drop_their_segments() {
        let code = build_payment_code("CZ3901001234560000000789", 8000, "", None);
        assert_eq!(code, "SPD*1.0*ACC:CZ3901001234560000000789*AM:8000.00*CC:CZK");

        let code = build_payment_code("CZ3901001234560000000789", 8000, "", Some(""));
        assert!(!code.contains("X-VS"));
    }

    #[test]
    fn message_truncates_at_sixty_characters() {
        let long = "ž".repeat(80);
        let code = build_payment_code("CZ3901001234560000000789", 1, &long, None);
        let msg = code
            .split('*')
            .find(|part| part.starts_with("MSG:"))
            .expect("message segment present");
        assert_eq!(msg.chars().count(), 4 + 60);
    }
}
