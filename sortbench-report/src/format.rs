//! Duration Formatting
//!
//! Human-readable rendering for the "Formatted Time" report columns.

/// Render a duration in seconds with an auto-selected unit.
pub fn format_seconds(secs: f64) -> String {
    if secs < 1e-3 {
        format!("{:.3} us", secs * 1e6)
    } else if secs < 1.0 {
        format!("{:.3} ms", secs * 1e3)
    } else if secs < 60.0 {
        format!("{secs:.3} s")
    } else {
        let minutes = (secs / 60.0).floor();
        format!("{} min {:.3} s", minutes as u64, secs - minutes * 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn microsecond_range() {
        assert_eq!(format_seconds(0.0005), "500.000 us");
    }

    #[test]
    fn millisecond_range() {
        assert_eq!(format_seconds(0.5), "500.000 ms");
        assert_eq!(format_seconds(0.0234), "23.400 ms");
    }

    #[test]
    fn second_range() {
        assert_eq!(format_seconds(2.5), "2.500 s");
        assert_eq!(format_seconds(1.0), "1.000 s");
    }

    #[test]
    fn minute_range() {
        assert_eq!(format_seconds(90.0), "1 min 30.000 s");
        assert_eq!(format_seconds(125.25), "2 min 5.250 s");
    }
}
