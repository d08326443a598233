use unicode_normalization::UnicodeNormalization;

/// Lowercase and strip combining marks so `Télétravail` and `teletravail`
/// compare equal. NFKD first, then drop the mark codepoints.
pub fn fold_text(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    // Combining Diacritical Marks block covers every mark produced by NFKD
    // on Latin-script French text.
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Accent- and case-insensitive substring test.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    fold_text(haystack).contains(&fold_text(needle))
}
