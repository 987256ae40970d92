//! Decoding of `<key>--<value>` motion tokens (e.g. `start--0.2`, `endy---0.5`).

use super::models::MotionSpec;

/// Token marking an element as tracked
pub const ACTIVATION_MARKER: &str = "pax";

impl MotionSpec {
    /// Decode motion tokens. The first parseable token for each key wins;
    /// values that do not start with a number are treated as absent.
    pub fn from_tokens<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut spec = MotionSpec::default();

        for token in tokens {
            let Some((key, value)) = token.split_once("--") else {
                continue;
            };

            let slot = match key {
                "start" => &mut spec.start_progress,
                "end" => &mut spec.end_progress,
                "startx" => &mut spec.start_x,
                "starty" => &mut spec.start_y,
                "endx" => &mut spec.end_x,
                "endy" => &mut spec.end_y,
                "bg" => &mut spec.background_factor,
                "basesize" => {
                    if spec.base_size.is_none() {
                        spec.base_size = Some(value.to_string());
                    }
                    continue;
                }
                _ => continue,
            };

            if slot.is_none() {
                *slot = leading_float(value);
            }
        }

        spec
    }

    /// Attach a container selector override; blank selectors are ignored
    pub fn with_container(mut self, selector: Option<&str>) -> Self {
        self.container = selector
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self
    }
}

/// Parse the numeric prefix of `s` (`"0.5abc"` -> 0.5, `"abc"` -> None)
pub fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Optional exponent, only consumed when complete
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_float() {
        assert_eq!(leading_float("0.5"), Some(0.5));
        assert_eq!(leading_float("-0.5"), Some(-0.5));
        assert_eq!(leading_float(".25"), Some(0.25));
        assert_eq!(leading_float("1."), Some(1.0));
        assert_eq!(leading_float("2px"), Some(2.0));
        assert_eq!(leading_float("1e2x"), Some(100.0));
        assert_eq!(leading_float("3e"), Some(3.0));
        assert_eq!(leading_float("abc"), None);
        assert_eq!(leading_float("-"), None);
        assert_eq!(leading_float("."), None);
        assert_eq!(leading_float(""), None);
    }

    #[test]
    fn test_from_tokens() {
        let spec = MotionSpec::from_tokens([
            "pax",
            "hero",
            "start--0.2",
            "end--0.8",
            "startx---1",
            "endy---0.5",
            "basesize--containerSize",
            "bg--0.3",
        ]);
        assert_eq!(spec.start_progress, Some(0.2));
        assert_eq!(spec.end_progress, Some(0.8));
        assert_eq!(spec.start_x, Some(-1.0));
        assert_eq!(spec.start_y, None);
        assert_eq!(spec.end_x, None);
        assert_eq!(spec.end_y, Some(-0.5));
        assert_eq!(spec.base_size.as_deref(), Some("containerSize"));
        assert_eq!(spec.background_factor, Some(0.3));
        assert_eq!(spec.container, None);
    }

    #[test]
    fn test_first_token_wins() {
        let spec = MotionSpec::from_tokens(["end--0.4", "end--0.9", "endx--oops", "endx--1"]);
        assert_eq!(spec.end_progress, Some(0.4));
        assert_eq!(spec.end_x, Some(1.0));
    }

    #[test]
    fn test_with_container() {
        let spec = MotionSpec::default().with_container(Some("  "));
        assert_eq!(spec.container, None);
        let spec = MotionSpec::default().with_container(Some("#section"));
        assert_eq!(spec.container.as_deref(), Some("#section"));
    }
}
