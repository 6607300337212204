//! Shared helper functions for token cleanup ahead of scoring and encoding.

use unicode_normalization::char::is_combining_mark;

/// Punctuation removed from names and queries before whitespace tokenization.
pub(crate) const TOKEN_DENYLIST: &[char] = &[
    '\\', '(', ')', '[', ']', '.', '?', '"', '\'', 'ʻ', 'ʼ', '-', '–', '_', ',', ';', '!', ':',
    '°', '…', '¦', '|', '¬', '=', '<', '>',
];

/// Characters that would corrupt a phonetic code: punctuation, digits, directional
/// marks, combining accents and a handful of accented/Cyrillic letters seen in
/// catalogue data.
pub(crate) const PHONETIC_DENYLIST: &str = "\u{0022}'.\u{0323}:-\u{202C}ʼ,ʻ[]ṭ;ùèüñó412\u{202B}/ḥ`״Ã¦&¶Ìæ’\u{005C}\u{0301}=Ḥ()ḳàʾ\u{200F}ṿʹ!öá׳Ḳ\u{0308}\u{0300}3…6°ò¬ʿśí|50Ṭ\u{00A0}ä7ŚéẔŠū9‘8Ṿ?Æ\u{0306}_øėß\u{0303}\u{0304}\u{030B}ł–\u{200E}ẒÖŁçŽžńćÜšýē<>ûőôîāПольшаąŭëșÉțеœİěБртисвМукчНдныГмяЛюбРřÚęìČżčĺОã";

/// Lowercase, turn ellipses into spaces, drop denylisted punctuation and split on whitespace.
pub fn tokenize(s: &str) -> Vec<String> {
    let lowered = s.trim().to_lowercase().replace("...", " ");
    let cleaned: String = lowered
        .chars()
        .filter(|c| !TOKEN_DENYLIST.contains(c))
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

pub(crate) fn strip_phonetic_denylist(s: &str) -> String {
    s.chars().filter(|c| !PHONETIC_DENYLIST.contains(*c)).collect()
}

/// A letter for encoding purposes: alphabetic and not a combining mark (niqqud, accents).
#[inline]
pub(crate) fn is_encodable_letter(c: char) -> bool {
    c.is_alphabetic() && !is_combining_mark(c)
}
