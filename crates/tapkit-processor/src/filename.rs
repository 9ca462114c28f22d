//! Output file naming

use chrono::NaiveDate;
use unicode_normalization::UnicodeNormalization;

/// Extension used when the input name has none
pub const DEFAULT_EXTENSION: &str = "tap";

/// Split `name` at its last extension
///
/// The extension is whatever follows the last `.`, provided it is non-empty
/// and contains no path separator.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(pos) => {
            let ext = &name[pos + 1..];
            if ext.is_empty() || ext.contains('/') {
                (name, None)
            } else {
                (&name[..pos], Some(ext))
            }
        }
        None => (name, None),
    }
}

/// Base name with parentheses and accents removed, whitespace runs turned
/// into single underscores, and anything outside `[A-Za-z0-9_-]` dropped
pub fn sanitize_base_name(base: &str) -> String {
    let unaccented: String = base
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();

    unaccented
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// `{sanitized base}_{DD}_{MM}_{YY}.{extension}`
pub fn sanitize_filename(original: &str, date: NaiveDate) -> String {
    let (base, ext) = split_extension(original);
    format!(
        "{}_{}.{}",
        sanitize_base_name(base),
        date.format("%d_%m_%y"),
        ext.unwrap_or(DEFAULT_EXTENSION)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(
            sanitize_filename("Peça (final) teste.tap", may_first()),
            "Peca_final_teste_01_05_24.tap"
        );
    }

    #[test]
    fn test_keeps_original_extension() {
        assert_eq!(
            sanitize_filename("corte-1.nc", may_first()),
            "corte-1_01_05_24.nc"
        );
        assert_eq!(sanitize_filename("corte", may_first()), "corte_01_05_24.tap");
    }

    #[test]
    fn test_special_characters_dropped() {
        assert_eq!(sanitize_base_name("  Ação   #2 & [3]  "), "Acao_2__3");
        assert_eq!(sanitize_base_name("São José"), "Sao_Jose");
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("a.b.tap"), ("a.b", Some("tap")));
        assert_eq!(split_extension("dir.v2/file"), ("dir.v2/file", None));
        assert_eq!(split_extension("trailing."), ("trailing.", None));
    }
}
