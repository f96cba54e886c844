use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for caption language tags
///
/// Caption sources tag tracks with BCP 47 style codes such as `en`,
/// `pt-BR` or `zh-Hant`. This module compares those tags and validates
/// their primary subtag against ISO 639-1 (2-letter) and ISO 639-2
/// (3-letter) codes.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Separators that introduce a region or script subtag
const SUBTAG_SEPARATORS: &[char] = &['-', '_'];

/// Trim surrounding whitespace from a language tag
pub fn normalize_code(code: &str) -> String {
    code.trim().to_string()
}

/// Part of a tag before any region/script subtag (`"pt-BR"` -> `"pt"`)
pub fn primary_subtag(code: &str) -> &str {
    let code = code.trim();
    match code.find(SUBTAG_SEPARATORS) {
        Some(idx) => &code[..idx],
        None => code,
    }
}

/// Case-insensitive comparison of two full tags
pub fn codes_equal(code1: &str, code2: &str) -> bool {
    code1.trim().eq_ignore_ascii_case(code2.trim())
}

/// Case-insensitive comparison of the primary subtags of two tags
pub fn primary_subtags_match(code1: &str, code2: &str) -> bool {
    let primary1 = primary_subtag(code1);
    !primary1.is_empty() && primary1.eq_ignore_ascii_case(primary_subtag(code2))
}

/// Validate that the primary subtag of a tag is a known ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let primary = primary_subtag(code).to_lowercase();

    if primary.len() == 2 {
        if Language::from_639_1(&primary).is_some() {
            return Ok(LanguageCodeType::Part1);
        }
    } else if primary.len() == 3 {
        if Language::from_639_3(&primary).is_some() {
            return Ok(LanguageCodeType::Part2T);
        }
        if BIBLIOGRAPHIC_CODES.iter().any(|(b, _)| *b == primary) {
            return Ok(LanguageCodeType::Part2B);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Map the primary subtag of a tag to an `isolang` language
fn lookup_language(code: &str) -> Option<Language> {
    let primary = primary_subtag(code).to_lowercase();
    match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => {
            let part2t = BIBLIOGRAPHIC_CODES
                .iter()
                .find(|(b, _)| *b == primary)
                .map(|(_, t)| *t)
                .unwrap_or(primary.as_str());
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Get the English language name for a tag's primary subtag
pub fn get_language_name(code: &str) -> Result<String> {
    let lang = lookup_language(code)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}
