//! Text normalization for case- and diacritic-insensitive matching.
//!
//! Listing rows keep pre-normalized copies of their free-text location
//! fields (`formatted_city`, `formatted_state`); search needles are folded
//! with the same function before being compared, so `ILIKE` alone is enough
//! to make matching insensitive to both case and accents.

/// Fold a single character to its unaccented lowercase ASCII base.
///
/// Covers the Latin-1 and Latin Extended-A letters that occur in Brazilian
/// Portuguese place names and vehicle vocabulary; anything else is passed
/// through `to_lowercase` unchanged.
fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Normalize text for insensitive comparison: trim, lowercase, fold accents.
///
/// # Examples
///
/// ```
/// use garagem_core::text::normalize;
/// assert_eq!(normalize("São Paulo"), "sao paulo");
/// assert_eq!(normalize("  BRANCO  "), "branco");
/// assert_eq!(normalize("Conceição"), "conceicao");
/// ```
pub fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_char)
        .collect()
}

/// Build a URL-safe slug: normalized text with every non-alphanumeric run
/// collapsed to a single `-`, no leading or trailing separator.
///
/// # Examples
///
/// ```
/// use garagem_core::text::slugify;
/// assert_eq!(slugify("Fiat Strada 1.4"), "fiat-strada-1-4");
/// assert_eq!(slugify("  Caminhões  "), "caminhoes");
/// ```
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_sep = false;

    for c in normalize(input).chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }

    slug
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
