/// Levenshtein edit distance over raw bytes, two rows of scratch space.
/// Account identifiers are short ASCII strings, so byte positions and
/// character positions coincide.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let (short, long) = if s1.len() <= s2.len() {
        (s1.as_bytes(), s2.as_bytes())
    } else {
        (s2.as_bytes(), s1.as_bytes())
    };

    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=long.len()).collect();
    let mut curr = vec![0usize; long.len() + 1];

    for (i, &sc) in short.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &lc) in long.iter().enumerate() {
            let substitution = prev[j] + usize::from(sc != lc);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[long.len()]
}

/// Similarity in [0.0, 1.0] between two account identifiers: normalized
/// Levenshtein over the raw strings. No case folding or stripping;
/// identifiers are compared exactly as extracted.
pub fn identifier_similarity(s1: &str, s2: &str) -> f32 {
    if s1 == s2 {
        return 1.0;
    }
    let max_len = s1.len().max(s2.len());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (levenshtein_distance(s1, s2) as f32 / max_len as f32)
}
