//! Time formatting helpers.

const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

/// Format a duration in seconds as its two most significant units, e.g. `"1d 0h"`.
///
/// Durations under a minute print seconds only.
pub fn format_duration(secs: u64) -> String {
    let Some(lead) = UNITS.iter().position(|(size, _)| secs >= *size) else {
        return "0s".to_string();
    };
    let (size, label) = UNITS[lead];
    match UNITS.get(lead + 1) {
        Some((next, next_label)) => {
            format!("{}{} {}{}", secs / size, label, (secs % size) / next, next_label)
        }
        None => format!("{}{}", secs, label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_scale() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(90), "1m 30s");
        assert_eq!(format_duration(3_600), "1h 0m");
        assert_eq!(format_duration(86_400), "1d 0h");
        assert_eq!(format_duration(2 * 86_400 + 7_200), "2d 2h");
    }
}
