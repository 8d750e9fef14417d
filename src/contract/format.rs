use chrono::{Datelike, NaiveDate};

/// Czech genitive month names, as used after a day number.
const MONTHS_GENITIVE: [&str; 12] = [
    "ledna",
    "února",
    "března",
    "dubna",
    "května",
    "června",
    "července",
    "srpna",
    "září",
    "října",
    "listopadu",
    "prosince",
];

/// Renders a date in the Czech long form, e.g. `1. června 2025`.
pub fn format_date(date: NaiveDate) -> String {
    let month = MONTHS_GENITIVE[date.month0() as usize];
    format!("{}. {} {}", date.day(), month, date.year())
}

/// Groups whole-crown amounts by thousands with a no-break space, matching
/// the `cs-CZ` locale. Formatting only; arithmetic always runs on the raw
/// integer values.
pub fn format_money(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    let leading = digits.len() % 3;
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && index % 3 == leading % 3 {
            grouped.push('\u{a0}');
        }
        grouped.push(ch);
    }

    grouped
}

/// Czech plural categories for cardinal numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PluralCategory {
    One,
    Few,
    Many,
}

fn plural_category(count: u32) -> PluralCategory {
    match count {
        1 => PluralCategory::One,
        2..=4 => PluralCategory::Few,
        _ => PluralCategory::Many,
    }
}

/// Declension of "osoba" in the accusative, per plural category.
pub fn person_word(count: u32) -> &'static str {
    match plural_category(count) {
        PluralCategory::One => "osobu",
        PluralCategory::Few => "osoby",
        PluralCategory::Many => "osob",
    }
}

const ROMAN_PAIRS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Roman numeral for a section number; zero renders as an empty string.
pub fn romanize(mut value: u32) -> String {
    let mut roman = String::new();
    for (weight, symbol) in ROMAN_PAIRS {
        while value >= weight {
            roman.push_str(symbol);
            value -= weight;
        }
    }
    roman
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_dates_with_genitive_months() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        assert_eq!(format_date(date), "1. června 2025");

        let september = NaiveDate::from_ymd_opt(2024, 9, 30).expect("valid date");
        assert_eq!(format_date(september), "30. září 2024");
    }

    #[test]
    fn groups_money_by_thousands() {
        assert_eq!(format_money(0), "0");
        assert_eq!(format_money(123), "123");
        assert_eq!(format_money(8000), "8\u{a0}000");
        assert_eq!(format_money(20000), "20\u{a0}000");
        assert_eq!(format_money(1234567), "1\u{a0}234\u{a0}567");
    }

    #[test]
    fn three_form_person_word() {
        assert_eq!(person_word(1), "osobu");
        assert_eq!(person_word(2), "osoby");
        assert_eq!(person_word(4), "osoby");
        assert_eq!(person_word(5), "osob");
        assert_eq!(person_word(12), "osob");
    }

    #[test]
    fn romanize_covers_document_section_range() {
        assert_eq!(romanize(0), "");
        assert_eq!(romanize(2), "II");
        assert_eq!(romanize(4), "IV");
        assert_eq!(romanize(9), "IX");
        assert_eq!(romanize(14), "XIV");
        assert_eq!(romanize(40), "XL");
        assert_eq!(romanize(90), "XC");
        assert_eq!(romanize(200), "CC");
        assert_eq!(romanize(300), "CCC");
        assert_eq!(romanize(1987), "MCMLXXXVII");
    }
}
