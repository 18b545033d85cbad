use kn_core::Course;

/// Per-character factor for a match adjacent to the previous one.
const SCORE_ADJACENT: f64 = 1.0;
/// Per-character factor for a match landing on a word boundary.
const SCORE_BOUNDARY: f64 = 0.9;
/// Per-character factor for an arbitrary mid-word jump.
const SCORE_JUMP: f64 = 0.2;
/// Multiplicative decay per candidate character skipped between matches.
const GAP_DECAY: f64 = 0.999;
/// Factor applied when the query is exhausted but the candidate is not.
/// Keeps a complete prefix run strictly below exact equality.
const PENALTY_INCOMPLETE: f64 = 0.99;

/// A ranked search hit.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    /// The matched course.
    pub course: &'a Course,
    /// Its score, in (0, 1].
    pub score: f64,
}

/// Score how well `query` matches `candidate`. Returns a value in [0, 1];
/// 0 means no match.
///
/// Matching is case-insensitive and requires the query to appear in the
/// candidate as an ordered subsequence. Whitespace in the query is
/// insignificant (`"cs 61a"` and `"cs61a"` score identically), and `-`,
/// `_`, `/` in the candidate read as word separators. Priorities, highest
/// first: exact equality, complete prefix run, boundary-aligned matches,
/// contiguous clusters, scattered matches (gap-decayed).
pub fn score(candidate: &str, query: &str) -> f64 {
    let candidate = normalize_candidate(candidate);
    let query = normalize_query(query);
    if query.is_empty() {
        return 0.0;
    }

    let mut memo = vec![None; (candidate.len() + 1) * (query.len() + 1)];
    best_alignment(&candidate, &query, 0, 0, &mut memo)
}

/// Rank `candidates` against `query` by their search labels. Keeps only
/// scores > 0, sorts by descending score (stable, so ties keep input
/// order), and returns at most `limit` matches. An empty query is "no
/// search", not "match everything": it ranks nothing.
pub fn rank<'a>(
    candidates: impl IntoIterator<Item = &'a Course>,
    query: &str,
    limit: usize,
) -> Vec<Match<'a>> {
    if normalize_query(query).is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<Match<'a>> = candidates
        .into_iter()
        .map(|course| Match {
            course,
            score: score(&course.search_label(), query),
        })
        .filter(|m| m.score > 0.0)
        .collect();

    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    matches.truncate(limit);
    matches
}

/// Lowercase and read `-`/`_`/`/` as word separators.
fn normalize_candidate(s: &str) -> Vec<char> {
    s.chars()
        .flat_map(|c| c.to_lowercase())
        .map(|c| if matches!(c, '-' | '_' | '/') { ' ' } else { c })
        .collect()
}

/// Lowercase and drop whitespace and separators entirely.
fn normalize_query(s: &str) -> Vec<char> {
    s.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_' | '/'))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// A match position starts a word when it opens the string, follows a
/// non-alphanumeric character, or sits on an alpha/digit transition
/// (`CS|61|A`).
fn is_boundary(candidate: &[char], j: usize) -> bool {
    if j == 0 {
        return true;
    }
    let prev = candidate[j - 1];
    let cur = candidate[j];
    if !prev.is_alphanumeric() {
        return true;
    }
    prev.is_ascii_digit() != cur.is_ascii_digit()
}

/// Best product-of-factors over all alignments of `query[qi..]` into
/// `candidate[ci..]`, memoized on the (ci, qi) grid so the work stays
/// bounded by `len(candidate) * len(query)` states.
fn best_alignment(
    candidate: &[char],
    query: &[char],
    ci: usize,
    qi: usize,
    memo: &mut [Option<f64>],
) -> f64 {
    if qi == query.len() {
        return if ci == candidate.len() {
            1.0
        } else {
            PENALTY_INCOMPLETE
        };
    }

    let key = ci * (query.len() + 1) + qi;
    if let Some(cached) = memo[key] {
        return cached;
    }

    let mut best = 0.0_f64;
    for (j, &c) in candidate.iter().enumerate().skip(ci) {
        if c != query[qi] {
            continue;
        }

        let mut factor = if j == ci {
            SCORE_ADJACENT
        } else if is_boundary(candidate, j) {
            SCORE_BOUNDARY
        } else {
            SCORE_JUMP
        };
        // The leading skip (before anything has matched) is free; every
        // later gap decays the score per skipped character.
        if j > ci && ci > 0 {
            factor *= GAP_DECAY.powi((j - ci) as i32);
        }

        let tail = best_alignment(candidate, query, j + 1, qi + 1, memo);
        best = best.max(factor * tail);
    }

    memo[key] = Some(best);
    best
}
