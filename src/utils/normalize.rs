//! Normalization utilities for people and free text.
//!
//! Speakers and registrants are matched on normalized keys:
//! - Convert to lowercase
//! - Remove accents/diacritics (é → e, ü → u, etc.)
//! - Normalize whitespace
//! - Handle letters that do not decompose (ł, ø, æ, ...)

use unicode_normalization::UnicodeNormalization;

/// Collapse runs of whitespace (including newlines from XML or TSV cells)
/// into single spaces and trim the ends.
///
/// # Examples
///
/// ```
/// use appagenda::utils::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  Neural\n  Machine   Translation "), "Neural Machine Translation");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Normalize a person name into its identity key.
///
/// Transformations applied:
/// 1. Replace special characters that don't decompose (ł, ø, æ, etc.)
/// 2. Unicode NFD normalization, dropping combining marks
/// 3. Convert to lowercase
/// 4. Collapse whitespace
///
/// # Examples
///
/// ```
/// use appagenda::utils::normalize_name;
///
/// assert_eq!(normalize_name("José García"), "jose garcia");
/// assert_eq!(normalize_name("  Bing   LIU "), "bing liu");
/// ```
pub fn normalize_name(name: &str) -> String {
    let replaced = replace_special_chars(name);

    let folded = replaced
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    normalize_whitespace(&folded)
}

/// Normalize an email address for comparison. Empty input stays empty.
///
/// ```
/// use appagenda::utils::normalize_email;
///
/// assert_eq!(normalize_email(" Rob.Smith@Example.ORG "), "rob.smith@example.org");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn replace_special_chars(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'Ł' => 'L',
            'ł' => 'l',
            'Ø' => 'O',
            'ø' => 'o',
            'Æ' => 'A',
            'æ' => 'a',
            'ß' => 's',
            'Ð' | 'Đ' => 'D',
            'ð' | 'đ' => 'd',
            'Þ' => 'T',
            'þ' => 't',
            'İ' => 'I',
            'ı' => 'i',
            _ => c,
        })
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    // See: https://unicode.org/charts/PDF/U0300.pdf
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

/// Split a `;`-separated cell into trimmed, non-empty parts while keeping
/// empty positions, so parallel columns (authors / affiliations) line up.
pub fn split_list(cell: &str) -> Vec<String> {
    if cell.trim().is_empty() {
        return Vec::new();
    }
    cell.split(';').map(normalize_whitespace).collect()
}
