//! Utility module
//!
//! Locale-aware rendering of frequencies for the result line.

use crate::core::FilterEdges;

/// Returns the digit grouping separator used by `locale`, if any
pub fn grouping_separator(locale: &str) -> Option<char> {
    let lang = locale
        .split(|c: char| c == '_' || c == '.' || c == '@' || c == '-')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    match lang.as_str() {
        "" | "c" | "posix" => None,
        "de" | "es" | "it" | "nl" | "pt" | "da" | "id" | "tr" => Some('.'),
        "fr" | "ru" | "sv" | "fi" | "nb" | "pl" | "cs" => Some(' '),
        _ => Some(','),
    }
}

/// Formats a frequency rounded to whole Hz, grouping digits per `locale`
pub fn format_hz(value: f32, locale: &str) -> String {
    let plain = format!("{:.0}", value);
    let Some(sep) = grouping_separator(locale) else {
        return plain;
    };
    if !value.is_finite() {
        return plain;
    }

    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };

    let mut grouped = String::with_capacity(plain.len() + digits.len() / 3);
    grouped.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(sep);
        }
        grouped.push(c);
    }
    grouped
}

/// Formats the result line, `<low> <-> <high> Hz`
pub fn format_edges(edges: &FilterEdges, locale: &str) -> String {
    format!(
        "{} <-> {} Hz",
        format_hz(edges.low, locale),
        format_hz(edges.high, locale)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_separator() {
        assert_eq!(grouping_separator("en_US.UTF-8"), Some(','));
        assert_eq!(grouping_separator("de_DE.UTF-8"), Some('.'));
        assert_eq!(grouping_separator("fr_FR"), Some(' '));
        assert_eq!(grouping_separator("C"), None);
        assert_eq!(grouping_separator("POSIX"), None);
    }

    #[test]
    fn test_format_hz() {
        assert_eq!(format_hz(-200.0, "en_US.UTF-8"), "-200");
        assert_eq!(format_hz(12000.0, "en_US.UTF-8"), "12,000");
        assert_eq!(format_hz(-1234567.0, "de_DE"), "-1.234.567");
        assert_eq!(format_hz(12000.4, "C"), "12000");
        assert_eq!(format_hz(999.0, "en_US"), "999");
    }

    #[test]
    fn test_format_edges() {
        let edges = FilterEdges::new(-200.0, 300.0);
        assert_eq!(format_edges(&edges, "en_US.UTF-8"), "-200 <-> 300 Hz");
        let edges = FilterEdges::new(-5000.0, 5000.0);
        assert_eq!(format_edges(&edges, "en_US.UTF-8"), "-5,000 <-> 5,000 Hz");
    }
}
