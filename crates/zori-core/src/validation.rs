//! Format validators for user-entered contact data and documents
//!
//! Pure functions, boolean results, no exceptions for control flow. The CPF
//! (Brazilian individual taxpayer ID) check implements the standard two-pass
//! weighted-sum-mod-11 check-digit algorithm.

/// Strip everything but ASCII digits from a string.
#[must_use]
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Strip the separator characters tolerated in phone input: spaces, hyphens,
/// and parentheses. The leading `+` is kept.
#[must_use]
pub fn normalize_phone(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

/// Validate a phone number against the international dialing shape:
/// `+`, a 1–3 digit country code that does not start with zero, then 6–14
/// subscriber digits. Separators are stripped before checking.
#[must_use]
pub fn validate_phone(phone: &str) -> bool {
    let normalized = normalize_phone(phone);
    let Some(rest) = normalized.strip_prefix('+') else {
        return false;
    };
    if !rest.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let mut chars = rest.chars();
    match chars.next() {
        Some('0') | None => return false,
        Some(_) => {}
    }
    // 1-digit country code + 6 subscriber digits up to 3 + 14.
    (7..=17).contains(&rest.len())
}

/// Validate an email address against the `local@domain.tld` shape: a single
/// `@`, non-empty local part, and a dot in the domain that is neither its
/// first nor last character. No whitespace anywhere.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    // The dot must have at least one character on each side.
    domain.len() >= 3 && domain[1..domain.len() - 1].contains('.')
}

/// Validate a CPF: exactly 11 digits after stripping formatting, not all the
/// same digit, and both check digits correct.
///
/// First check digit: digits 1–9 weighted 10 down to 2; second: digits 1–10
/// weighted 11 down to 2. In both passes a remainder below 2 maps the check
/// digit to 0, otherwise to `11 - remainder`.
#[must_use]
pub fn validate_cpf(cpf: &str) -> bool {
    let digits = digits_only(cpf);
    if digits.len() != 11 {
        return false;
    }
    let values: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    if values.iter().all(|&d| d == values[0]) {
        return false;
    }
    check_digit(&values[..9], 10) == values[9] && check_digit(&values[..10], 11) == values[10]
}

fn check_digit(digits: &[u32], start_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (start_weight - i as u32))
        .sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

/// Format a CPF progressively as `XXX.XXX.XXX-XX`, inserting separators as
/// more digits are typed and capping the input at 11 digits.
#[must_use]
pub fn format_cpf(value: &str) -> String {
    let digits = digits_only(value);
    let limited = &digits[..digits.len().min(11)];
    match limited.len() {
        0..=3 => limited.to_string(),
        4..=6 => format!("{}.{}", &limited[..3], &limited[3..]),
        7..=9 => format!("{}.{}.{}", &limited[..3], &limited[3..6], &limited[6..]),
        _ => format!(
            "{}.{}.{}-{}",
            &limited[..3],
            &limited[3..6],
            &limited[6..9],
            &limited[9..]
        ),
    }
}
