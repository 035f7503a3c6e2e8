//! Fixed correction pass for common OCR confusions in the scanned
//! statements. Applied to each page's raw text before page markers are
//! inserted and before any pattern matching runs; the extractor never sees
//! the uncorrected text.

/// Look-alike characters the engine habitually misreads in account numbers
/// and amounts.
const SUBSTITUTIONS: &[(char, char)] = &[
    ('@', '0'),
    ('e', '0'),
    ('Q', '0'),
    ('O', '0'),
    ('I', '1'),
    ('l', '1'),
    ('B', '8'),
    ('S', '5'),
];

/// Stray punctuation dropped outright (includes the form feed Tesseract
/// emits at page ends).
const STRIPPED: &[char] = &['*', '$', '\u{0c}', ':', '%'];

pub fn apply_corrections(text: &str) -> String {
    text.chars()
        .filter(|c| !STRIPPED.contains(c))
        .map(|c| {
            SUBSTITUTIONS
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |(_, to)| *to)
        })
        .collect()
}
