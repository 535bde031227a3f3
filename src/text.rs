//! Text normalization and case predicates.
//!
//! Every function here is total: empty input gives empty output and nothing
//! panics or returns an error.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Trailing page numbers, periods and spaces, in any interleaving.
///
/// Running footers often leak a page number onto the end of a line.
static TRAILING_ARTIFACTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\s+\d+|\.|\s)+$").unwrap());

const LIGATURES: [(char, &str); 7] = [
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// Normalize an extracted line of text.
///
/// Collapses whitespace runs to a single space, trims, then strips trailing
/// page numbers and periods. The whole trailing run goes in one pass, so
/// `clean(clean(s)) == clean(s)`.
pub fn clean(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    TRAILING_ARTIFACTS.replace(&collapsed, "").into_owned()
}

/// Normalize a title taken from document metadata.
///
/// Same as [`clean`] minus the page-number rule: metadata is not page text,
/// so a trailing number such as a year belongs to the title.
pub fn clean_title(text: &str) -> String {
    collapse_whitespace(text)
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}

/// Collapse whitespace runs (including newlines) to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Length in characters, not bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// True when the text has at least one cased character and none are lowercase.
pub fn is_uppercase(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Conventional title-case test.
///
/// Uppercase letters may only start a cased run and lowercase letters may
/// only continue one. Digits, punctuation and spaces end a run. At least one
/// cased character is required.
pub fn is_title_case(text: &str) -> bool {
    let mut prev_cased = false;
    let mut any_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            any_cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            any_cased = true;
        } else {
            prev_cased = false;
        }
    }
    any_cased
}

/// Capitalize the first letter of each cased run and lowercase the rest.
pub fn to_title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;
    for c in text.chars() {
        if c.is_uppercase() || c.is_lowercase() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(c);
            prev_cased = false;
        }
    }
    out
}

/// Repair text coming out of a PDF text layer: NFC composition and
/// expansion of typographic ligatures.
pub fn repair_extracted(text: &str) -> String {
    let composed: String = text.nfc().collect();
    if !composed.chars().any(|c| ('\u{FB00}'..='\u{FB06}').contains(&c)) {
        return composed;
    }

    let mut out = String::with_capacity(composed.len());
    for c in composed.chars() {
        match LIGATURES.iter().find(|(lig, _)| *lig == c) {
            Some((_, expansion)) => out.push_str(expansion),
            None => out.push(c),
        }
    }
    out
}
