//! Script normalization for mixed Hebrew/Latin queries.

use crate::models::Language;

/// Hebrew letters aleph..tav (sofit forms included), inverted nun and the
/// Yiddish ligatures double-vav, vav-yod and double-yod.
pub fn is_hebrew_letter(c: char) -> bool {
    matches!(c, '\u{05D0}'..='\u{05EA}' | '\u{05C6}' | '\u{05F0}'..='\u{05F2}')
}

pub fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_letter_of(c: char, lang: Language) -> bool {
    match lang {
        Language::Heb => is_hebrew_letter(c),
        Language::Eng => is_latin_letter(c),
    }
}

/// True when `text` contains at least one letter of the script opposite to `lang`.
pub fn has_opposite_script(text: &str, lang: Language) -> bool {
    let other = lang.opposite();
    text.chars().any(|c| is_letter_of(c, other))
}

/// Strip characters of the wrong script from a query.
///
/// Text that contains no letter of the opposite script is returned untouched.
/// Otherwise only letters of `lang` and whitespace survive, and the result is trimmed.
pub fn normalize_script(text: &str, lang: Language) -> String {
    if !has_opposite_script(text, lang) {
        return text.to_string();
    }
    text.chars()
        .filter(|c| is_letter_of(*c, lang) || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}
