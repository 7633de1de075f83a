use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ParsedTitle;

// "<Name> (<Year>)" with the year group anchored to the end of the string
static TITLE_WITH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s*\((\d{4})\)$").expect("title pattern compiles"));

/// Split a MovieLens title such as `"Toy Story (1995)"` into its name and year.
///
/// Titles without a trailing four-digit year in parentheses come back
/// unchanged with no year. This never fails.
pub fn parse_title(raw: &str) -> ParsedTitle {
    let unparsed = || ParsedTitle {
        title_clean: raw.to_string(),
        release_year: None,
    };

    let Some(caps) = TITLE_WITH_YEAR.captures(raw) else {
        return unparsed();
    };

    let name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
    if name.is_empty() {
        return unparsed();
    }

    match caps.get(2).and_then(|m| m.as_str().parse::<i32>().ok()) {
        Some(year) => ParsedTitle {
            title_clean: name.to_string(),
            release_year: Some(year),
        },
        None => unparsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_name_and_year() {
        let parsed = parse_title("Toy Story (1995)");
        assert_eq!(parsed.title_clean, "Toy Story");
        assert_eq!(parsed.release_year, Some(1995));
    }

    #[test]
    fn keeps_inner_parentheses() {
        let parsed = parse_title("City of Lost Children, The (Cité des enfants perdus, La) (1995)");
        assert_eq!(parsed.title_clean, "City of Lost Children, The (Cité des enfants perdus, La)");
        assert_eq!(parsed.release_year, Some(1995));
    }

    #[test]
    fn trims_whitespace_before_year() {
        let parsed = parse_title("  Heat    (1995)");
        assert_eq!(parsed.title_clean, "Heat");
        assert_eq!(parsed.release_year, Some(1995));
    }

    #[test]
    fn title_without_year_is_unchanged() {
        let parsed = parse_title("Unknown Film");
        assert_eq!(parsed.title_clean, "Unknown Film");
        assert_eq!(parsed.release_year, None);
    }

    #[test]
    fn year_must_be_last() {
        let raw = "Babylon 5 (1994) ";
        let parsed = parse_title(raw);
        assert_eq!(parsed.title_clean, raw);
        assert_eq!(parsed.release_year, None);
    }

    #[test]
    fn non_four_digit_years_do_not_match() {
        for raw in ["Short (95)", "Future (20155)", "Range (1995-1996)"] {
            let parsed = parse_title(raw);
            assert_eq!(parsed.title_clean, raw);
            assert_eq!(parsed.release_year, None);
        }
    }

    #[test]
    fn bare_year_is_not_a_title() {
        let parsed = parse_title("(1995)");
        assert_eq!(parsed.title_clean, "(1995)");
        assert_eq!(parsed.release_year, None);
    }

    #[test]
    fn empty_input() {
        let parsed = parse_title("");
        assert_eq!(parsed.title_clean, "");
        assert_eq!(parsed.release_year, None);
    }
}
