use chrono::Utc;

/// Milliseconds since the Unix epoch, as a string.
pub fn timestamp_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Returns `candidate`, or the first `candidate-N` for which `taken` is false.
pub(crate) fn dedupe(candidate: String, taken: impl Fn(&str) -> bool) -> String {
    if !taken(&candidate) {
        return candidate;
    }
    let mut n = 1u64;
    loop {
        let suffixed = format!("{candidate}-{n}");
        if !taken(&suffixed) {
            return suffixed;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_id_is_numeric() {
        assert!(timestamp_id().parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn test_dedupe() {
        let taken = ["7", "7-1"];
        assert_eq!(dedupe("8".into(), |id| taken.contains(&id)), "8");
        assert_eq!(dedupe("7".into(), |id| taken.contains(&id)), "7-2");
    }
}
