//! Pure helpers for the advert browse endpoint: lenient query-string
//! parsing, pagination arithmetic, and search-term preparation.
//!
//! The public filter endpoint never rejects a request because of a malformed
//! filter value. Every parser in this module degrades instead: unparseable
//! numbers fall back to defaults or drop the constraint entirely, so a bad
//! `preco_max` widens the result set rather than producing an error page.

use crate::text::normalize;

/// Page size applied when the client sends no `limit`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Hard cap on the page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Ceiling substituted for a zero or negative upper bound.
///
/// A client that sends `preco_max=0` means "no upper price", not "free cars
/// only"; the range predicate stays in place with this value so the clause
/// shape is identical either way.
pub const UNBOUNDED_MAX: i64 = 9_999_999;

/// Parse a page number, defaulting to 1 when absent, non-numeric, or < 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(parse_lenient_int).map_or(1, |p| p.max(1))
}

/// Parse a page size, defaulting to [`DEFAULT_PAGE_SIZE`] and clamping to
/// `1..=`[`MAX_PAGE_SIZE`].
pub fn parse_page_size(raw: Option<&str>) -> i64 {
    raw.and_then(parse_lenient_int)
        .map_or(DEFAULT_PAGE_SIZE, |l| l.clamp(1, MAX_PAGE_SIZE))
}

/// Extract an integer from free-form client input by keeping only its
/// digits, so `"R$ 50.000"` parses as `50000`. Returns `None` when the
/// input carries no digits at all (or overflows `i64`).
///
/// # Examples
///
/// ```
/// use garagem_core::browse::parse_lenient_int;
/// assert_eq!(parse_lenient_int("50000"), Some(50000));
/// assert_eq!(parse_lenient_int("R$ 1.250,00"), Some(125000));
/// assert_eq!(parse_lenient_int("barato"), None);
/// ```
pub fn parse_lenient_int(raw: &str) -> Option<i64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Parse an optional numeric bound; `None` when the parameter is absent or
/// carries no digits, which drops the constraint.
pub fn parse_bound(raw: Option<&str>) -> Option<i64> {
    raw.and_then(parse_lenient_int)
}

/// Replace a zero or negative upper bound with [`UNBOUNDED_MAX`].
pub fn upper_bound_or_ceiling(value: i64) -> i64 {
    if value <= 0 {
        UNBOUNDED_MAX
    } else {
        value
    }
}

/// Split a free-text search query into normalized terms.
///
/// Terms are whitespace-separated, lowercased, and diacritic-folded so they
/// can be matched against the pre-normalized listing columns. Empty input
/// yields an empty vector, which disables the search clause.
///
/// # Examples
///
/// ```
/// use garagem_core::browse::search_terms;
/// assert_eq!(search_terms("Branco  Automático"), vec!["branco", "automatico"]);
/// assert!(search_terms("   ").is_empty());
/// ```
pub fn search_terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Flatten repeated `opcionais` values into one list of trimmed names.
///
/// Clients send the parameter either repeated (`opcionais=a&opcionais=b`) or
/// as a single comma-separated value; both arrive here as raw occurrences
/// and both shapes are accepted. Blank entries are dropped.
pub fn parse_optionals<'a, I>(occurrences: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    occurrences
        .into_iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Row offset for a 1-based page number.
///
/// The arithmetic saturates: an absurdly large page number produces a huge
/// offset and an empty window, never an overflow or a negative offset.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(page_size)
}

/// Number of the following page, or `None` when the current page already
/// reaches the end of the result set.
pub fn next_page(page: i64, page_size: i64, total: i64) -> Option<i64> {
    if page_offset(page, page_size).saturating_add(page_size) < total {
        Some(page.saturating_add(1))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
