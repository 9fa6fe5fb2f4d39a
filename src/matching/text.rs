use regex::RegexBuilder;

use super::transliterate::normalize;

/// Decide whether `query` matches `candidate`.
///
/// Tiers, first hit wins:
/// 1. an empty query matches everything
/// 2. the lowercased candidate contains the query
/// 3. the transliterated candidate contains the query
/// 4. the whitespace-free query appears as a subsequence of the
///    transliterated candidate (`zj` matches `zhangjie`)
///
/// The query is lowercased first and every query character is escaped before
/// it is placed in the tier-4 pattern.
pub fn match_text(query: &str, candidate: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    if candidate.to_lowercase().contains(&query) {
        return true;
    }
    let reading = normalize(candidate);
    if reading.contains(&query) {
        return true;
    }
    subsequence_match(&query, &reading)
}

fn subsequence_match(query: &str, reading: &str) -> bool {
    let parts: Vec<String> = query
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();
    if parts.is_empty() {
        // whitespace-only query: `.*.*` accepts anything
        return true;
    }
    let pattern = format!(".*{}.*", parts.join(".*"));
    match RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
    {
        Ok(re) => re.is_match(reading),
        Err(err) => {
            tracing::warn!(%pattern, "fuzzy pattern rejected: {err}");
            false
        }
    }
}
