use tracing::debug;

use crate::core::FilterEdges;

/// Parses a frequency token in Hz.
///
/// A leading `m` or `M` stands for a minus sign, so that negative values
/// can be given where a leading `-` would be taken as an option. Only the
/// very first character is escaped, before leading whitespace is skipped.
/// Parsing takes the longest numeric prefix; a token without one, or one
/// that reads as NaN, yields 0.
pub fn parse_frequency(token: &str) -> f32 {
    let rewritten;
    let token = match token.strip_prefix(&['m', 'M'][..]) {
        Some(rest) => {
            rewritten = format!("-{}", rest);
            rewritten.as_str()
        }
        None => token,
    };
    let token = token.trim_start();

    if let Some(value) = token.parse::<f32>().ok().filter(|v| !v.is_nan()) {
        return value;
    }

    let value = token
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| token[..end].parse::<f32>().ok())
        .filter(|v| !v.is_nan());

    value.unwrap_or_else(|| {
        debug!(token, "not a frequency, using 0");
        0.0
    })
}

/// Turns two frequency tokens into ordered edges
pub fn normalize_edges(a: &str, b: &str) -> FilterEdges {
    FilterEdges::new(parse_frequency(a), parse_frequency(b))
}
