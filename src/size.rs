use serde::Serialize;

/// Units recognized in listing size cells, with their factor to KiB.
const PARSE_UNITS: [(&str, f64); 3] = [("KiB", 1.0), ("MiB", 1024.0), ("GiB", 1024.0 * 1024.0)];

/// Display units, ascending. Anything that does not fit below 1024 GiB stays in TiB.
const DISPLAY_UNITS: [&str; 3] = ["KiB", "MiB", "GiB"];
const LARGEST_UNIT: &str = "TiB";

const UNKNOWN_DISPLAY: &str = "???";
const UNKNOWN_MARKER: char = '?';

/// Size of a listing entry in KiB. `Unknown` is distinct from zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "kib", rename_all = "lowercase")]
pub enum Size {
    Known(f64),
    Unknown,
}

impl Size {
    /// Parse the first `<number> <unit>` occurrence in `text`.
    ///
    /// The number is a run of ASCII digits with an optional fractional part,
    /// followed by exactly one space and one of `KiB`, `MiB`, `GiB`. Anything
    /// else yields `Size::Unknown`.
    pub fn parse(text: &str) -> Self {
        let bytes = text.as_bytes();
        for start in 0..bytes.len() {
            if !bytes[start].is_ascii_digit() {
                continue;
            }
            if let Some(size) = match_at(text, start) {
                return size;
            }
        }
        Size::Unknown
    }

    pub fn from_unit(value: f64, unit: &str) -> Self {
        PARSE_UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, factor)| Size::Known(value * factor))
            .unwrap_or(Size::Unknown)
    }

    pub fn kib(&self) -> Option<f64> {
        match self {
            Size::Known(kib) => Some(*kib),
            Size::Unknown => None,
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_size(*self, false))
    }
}

fn match_at(text: &str, start: usize) -> Option<Size> {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    // A run of `digits[.digits]` segments, e.g. `1.10.5`.
    let mut end = digits_from(start);
    let mut number_end = None;
    while end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        let next = digits_from(end + 1);
        number_end.get_or_insert(next);
        end = next;
    }
    let number_end = number_end.unwrap_or(end);

    if bytes.get(end) != Some(&b' ') {
        return None;
    }

    let rest = &text[end + 1..];
    let unit = PARSE_UNITS
        .iter()
        .map(|(unit, _)| *unit)
        .find(|unit| rest.starts_with(unit))?;

    // Only the leading float of the run counts: `1.10.5` reads as 1.1.
    let number: f64 = text[start..number_end].parse().ok()?;
    Some(Size::from_unit(number, unit))
}

/// Round half away from zero to `precision` decimals. Non-positive precision
/// rounds to an integer.
pub fn round(value: f64, precision: i32) -> f64 {
    if precision <= 0 {
        return value.round();
    }
    let multiplier = 10f64.powi(precision);
    (value * multiplier).round() / multiplier
}

/// Human readable size. `has_unknown` appends a `?` after the number to mark
/// the value as a lower bound.
pub fn format_size(size: Size, has_unknown: bool) -> String {
    let Size::Known(kib) = size else {
        return UNKNOWN_DISPLAY.to_string();
    };

    let marker = if has_unknown {
        UNKNOWN_MARKER.to_string()
    } else {
        String::new()
    };

    let mut scaled = kib;
    for unit in DISPLAY_UNITS {
        if round(scaled, 1) < 1024.0 {
            return format!("{}{} {}", round(scaled, 1), marker, unit);
        }
        scaled /= 1024.0;
    }

    format!("{}{} {}", round(scaled, 1), marker, LARGEST_UNIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Size, expected: f64) {
        match actual {
            Size::Known(kib) => assert!(
                (kib - expected).abs() < 1e-9,
                "expected {expected}, got {kib}"
            ),
            Size::Unknown => panic!("expected {expected}, got Unknown"),
        }
    }

    #[test]
    fn parses_recognized_units() {
        assert_close(Size::parse("5 KiB"), 5.0);
        assert_close(Size::parse("12.3 MiB"), 12.3 * 1024.0);
        assert_close(Size::parse("1.5 GiB"), 1.5 * 1024.0 * 1024.0);
    }

    #[test]
    fn unrecognized_text_is_unknown() {
        assert_eq!(Size::parse("bogus text"), Size::Unknown);
        assert_eq!(Size::parse("-"), Size::Unknown);
        assert_eq!(Size::parse(""), Size::Unknown);
        assert_eq!(Size::parse("12 TiB"), Size::Unknown);
        assert_eq!(Size::parse("12 kb"), Size::Unknown);
        assert_eq!(Size::parse("12MiB"), Size::Unknown);
    }

    #[test]
    fn first_match_wins() {
        assert_close(Size::parse("about 3 KiB, or 4 MiB"), 3.0);
    }

    #[test]
    fn skips_numbers_not_followed_by_a_unit() {
        assert_close(Size::parse("2024-01-01 10 KiB"), 10.0);
    }

    #[test]
    fn dotted_run_reads_leading_number() {
        assert_close(Size::parse("1.10.5 MiB"), 1.1 * 1024.0);
        assert_close(Size::parse("1.23.4 MiB"), 1.23 * 1024.0);
        assert_close(Size::parse("1.5.3 MiB"), 1.5 * 1024.0);
        assert_close(Size::parse("v1.2. 3 KiB"), 3.0);
    }

    #[test]
    fn zero_is_known() {
        assert_eq!(Size::parse("0 KiB"), Size::Known(0.0));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round(2.25, 1), 2.3);
        assert_eq!(round(-2.5, 0), -3.0);
        assert_eq!(round(2.5, -1), 3.0);
        assert_eq!(round(1.04, 1), 1.0);
    }

    #[test]
    fn formats_unit_boundaries() {
        assert_eq!(format_size(Size::Known(0.0), false), "0 KiB");
        assert_eq!(format_size(Size::Known(1024.0), false), "1 MiB");
        assert_eq!(format_size(Size::Known(1024f64.powi(2)), false), "1 GiB");
        assert_eq!(format_size(Size::Known(1024f64.powi(3)), false), "1 TiB");
        assert_eq!(format_size(Size::Known(1024f64.powi(4)), false), "1024 TiB");
    }

    #[test]
    fn rounding_pushes_into_next_unit() {
        assert_eq!(format_size(Size::Known(1023.96), false), "1 MiB");
        assert_eq!(format_size(Size::Known(1023.9), false), "1023.9 KiB");
    }

    #[test]
    fn unknown_marker_and_placeholder() {
        assert_eq!(format_size(Size::Known(12.3 * 1024.0), true), "12.3? MiB");
        assert_eq!(format_size(Size::Known(10.0), true), "10? KiB");
        assert_eq!(format_size(Size::Unknown, false), "???");
        assert_eq!(format_size(Size::Unknown, true), "???");
    }

    #[test]
    fn format_then_parse_recovers_value() {
        for (number, unit) in [(5.0, "KiB"), (12.3, "MiB"), (700.5, "MiB"), (3.7, "GiB")] {
            let normalized = Size::from_unit(number, unit);
            let kib = normalized.kib().unwrap();
            let reparsed = Size::parse(&format_size(normalized, false)).kib().unwrap();
            // One decimal at the display unit.
            let tolerance = 0.05 * 1024f64.powi((kib.log(1024.0)).floor().max(0.0) as i32);
            assert!(
                (reparsed - kib).abs() <= tolerance,
                "{number} {unit}: {kib} vs {reparsed}"
            );
        }
    }
}
