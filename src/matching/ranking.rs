use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use once_cell::sync::Lazy;

/// Default cap on ranked results.
pub const MAX_RESULTS: usize = 20;

static MATCHER: Lazy<SkimMatcherV2> = Lazy::new(|| SkimMatcherV2::default().ignore_case());

/// Rank `candidates` against `query`, best first, keeping at most
/// [`MAX_RESULTS`] entries.
pub fn rank<T, F>(candidates: impl IntoIterator<Item = T>, query: &str, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    rank_with_limit(candidates, query, key, MAX_RESULTS)
}

/// Same as [`rank`] with an explicit cap.
///
/// Scoring is skim-style subsequence matching which rewards hits right after
/// path separators (`/`, `-`, `_`, spaces) and word boundaries. Candidates the
/// scorer rejects are left out; equal scores keep their input order. An empty
/// query matches nothing.
pub fn rank_with_limit<T, F>(
    candidates: impl IntoIterator<Item = T>,
    query: &str,
    key: F,
    limit: usize,
) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let mut scored: Vec<(i64, T)> = candidates
        .into_iter()
        .filter_map(|c| {
            let score = MATCHER.fuzzy_match(key(&c), query)?;
            Some((score, c))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(limit);
    scored.into_iter().map(|(_, c)| c).collect()
}
