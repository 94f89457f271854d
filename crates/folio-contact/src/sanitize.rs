//! Input sanitization and address checks

/// Longest accepted field, in UTF-16 code units (what browsers count)
pub const MAX_FIELD_UNITS: usize = 5000;

/// Strip angle brackets, trim, then cap at [`MAX_FIELD_UNITS`]. A character
/// that would straddle the cap is dropped whole.
pub fn sanitize(input: &str) -> String {
    let stripped: String = input.chars().filter(|c| !matches!(c, '<' | '>')).collect();
    let mut units = 0;
    stripped
        .trim()
        .chars()
        .take_while(|c| {
            units += c.len_utf16();
            units <= MAX_FIELD_UNITS
        })
        .collect()
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot in the
/// domain with something on both sides of it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Any dot that is neither the first nor the last character will do
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
