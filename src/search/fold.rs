use icu_normalizer::ComposingNormalizerBorrowed;

/// Canonical form used on both sides of a match: NFC, then lowercase.
pub fn fold(text: &str) -> String {
    ComposingNormalizerBorrowed::new_nfc()
        .normalize(text)
        .to_lowercase()
}
