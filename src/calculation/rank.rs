//! Rank code normalisation.
//!
//! Rank codes are typed by hand and arrive in several spellings. The
//! tables only key on canonical codes, and only rank III has variants in
//! practice, so "IIIA", "3A", "3a" and "III a" all collapse onto "III/a".
//! Anything else passes through trimmed.

/// Maps an alternate rank code spelling onto its canonical form.
///
/// Normalising an already canonical code returns it unchanged.
///
/// # Examples
///
/// ```
/// use angka_kredit::calculation::normalize_rank_code;
///
/// assert_eq!(normalize_rank_code("3A"), "III/a");
/// assert_eq!(normalize_rank_code("IIIc"), "III/c");
/// assert_eq!(normalize_rank_code("III/b"), "III/b");
/// assert_eq!(normalize_rank_code("IV/a"), "IV/a");
/// ```
pub fn normalize_rank_code(raw: &str) -> String {
    let trimmed = raw.trim();
    let compact: String = trimmed
        .chars()
        .filter(|c| *c != '/' && !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    let grade = compact
        .strip_prefix("III")
        .or_else(|| compact.strip_prefix('3'));

    match grade {
        Some("A") => "III/a".to_string(),
        Some("B") => "III/b".to_string(),
        Some("C") => "III/c".to_string(),
        Some("D") => "III/d".to_string(),
        _ => trimmed.to_string(),
    }
}
