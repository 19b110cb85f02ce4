//! Keyword lookup over the cleaned offense set.
//!
//! Queries and record fields are normalised the same way (lowercase,
//! punctuation runs collapsed to one space), then matched by substring against
//! the offense name, its Penal Law citation (`"PL 120.05"`), and its class.

use crate::offense::CleanedOffense;

pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Law prefix used when rendering a record's citation.
pub const CITATION_PREFIX: &str = "PL";

/// Lowercase, replace every run of non-alphanumerics with one space, trim.
pub fn normalize_query(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for ch in s.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    out
}

/// Citation for display and matching, e.g. `"PL 120.05"`.
pub fn citation(offense: &CleanedOffense) -> String {
    format!("{CITATION_PREFIX} {}", offense.statute_location_id)
}

/// Return up to `max_results` records matching `query`, in input order.
pub fn search<'a>(
    records: &'a [CleanedOffense],
    query: &str,
    max_results: usize,
) -> Vec<&'a CleanedOffense> {
    let q = normalize_query(query);
    if q.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|r| is_match(r, &q))
        .take(max_results)
        .collect()
}

fn is_match(record: &CleanedOffense, q: &str) -> bool {
    normalize_query(record.name()).contains(q)
        || normalize_query(&citation(record)).contains(q)
        || normalize_query(&record.class).contains(q)
}
