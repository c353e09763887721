//! Mask rules for the pattern catalog.
//!
//! Each rule is a pure function from the matched text to its masked form. Offsets
//! are counted in characters, so a match containing non-ASCII digits is never cut
//! inside a code point.
//!
//! License: MIT OR APACHE 2.0

/// The character substituted for hidden digits and local parts.
pub const MASK_CHAR: char = 'X';

fn mask_run(len: usize) -> String {
    std::iter::repeat(MASK_CHAR).take(len).collect()
}

fn head(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn tail(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if count <= n {
        return s;
    }
    match s.char_indices().nth(count - n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

/// Keeps the first and last two digits: `9876543210` becomes `98XXXXXX10`.
pub fn mask_phone(matched: &str) -> String {
    format!("{}{}{}", head(matched, 2), mask_run(6), tail(matched, 2))
}

/// Drops internal whitespace, then keeps the first and last four digits around
/// eight mask characters: `1234 5678 9012` becomes `1234XXXXXXXX9012`.
pub fn mask_national_id(matched: &str) -> String {
    let digits: String = matched.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{}{}{}", head(&digits, 4), mask_run(8), tail(&digits, 4))
}

/// Keeps the leading letter: `P1234567` becomes `PXXXXXX`.
pub fn mask_passport(matched: &str) -> String {
    format!("{}{}", head(matched, 1), mask_run(6))
}

/// Replaces the local part, keeping `@` and the provider: `john.doe@ybl` becomes `XXX@ybl`.
pub fn mask_payment_handle(matched: &str) -> String {
    match matched.find('@') {
        Some(at) => format!("{}{}", mask_run(3), &matched[at..]),
        None => mask_run(3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_keeps_two_digits_each_side() {
        assert_eq!(mask_phone("9876543210"), "98XXXXXX10");
    }

    #[test]
    fn national_id_strips_spaces() {
        assert_eq!(mask_national_id("1234 5678 9012"), "1234XXXXXXXX9012");
        assert_eq!(mask_national_id("123456789012"), "1234XXXXXXXX9012");
    }

    #[test]
    fn passport_masks_all_digits_with_six_chars() {
        assert_eq!(mask_passport("P1234567"), "PXXXXXX");
        assert_eq!(mask_passport("K123456"), "KXXXXXX");
    }

    #[test]
    fn payment_handle_keeps_provider() {
        assert_eq!(mask_payment_handle("john.doe@ybl"), "XXX@ybl");
        assert_eq!(mask_payment_handle("a-b_c@okicici"), "XXX@okicici");
    }

    #[test]
    fn non_ascii_digits_are_not_split() {
        // Devanagari digits are matched by `\d`.
        let matched = "९८७६५४३२१०";
        assert_eq!(mask_phone(matched), "९८XXXXXX१०");
    }
}
