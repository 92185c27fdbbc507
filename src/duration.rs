/// Format a stream length for `<itunes:duration>`.
///
/// The length is rounded up to whole seconds and printed as `H:M:S` from one
/// hour up, `M:S` below that. Fields are not zero-padded.
pub fn format_duration(length_secs: f64) -> String {
    let s = length_secs.max(0.0).ceil() as u64;
    if s >= 3600 {
        format!("{}:{}:{}", s / 3600, s % 3600 / 60, s % 60)
    } else {
        format!("{}:{}", s / 60, s % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_an_hour() {
        assert_eq!(format_duration(45.0), "0:45");
        assert_eq!(format_duration(125.0), "2:5");
        assert_eq!(format_duration(3599.0), "59:59");
    }

    #[test]
    fn an_hour_or_more() {
        assert_eq!(format_duration(3600.0), "1:0:0");
        assert_eq!(format_duration(3661.0), "1:1:1");
        assert_eq!(format_duration(7322.0), "2:2:2");
    }

    #[test]
    fn rounds_up_partial_seconds() {
        assert_eq!(format_duration(44.01), "0:45");
        assert_eq!(format_duration(3599.2), "1:0:0");
        assert_eq!(format_duration(0.0), "0:0");
    }
}
