/// Which numbers a required measurement accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Admissible {
    Any,
    NonNegative,
    Positive,
}

impl Admissible {
    pub(crate) fn admits(self, value: f64) -> bool {
        match self {
            Admissible::Any => !value.is_nan(),
            Admissible::NonNegative => value >= 0.0,
            Admissible::Positive => value > 0.0,
        }
    }
}

/// Reads the longest leading decimal literal of `raw`, ignoring any trailing
/// text. `"7mm"` reads as 7, `"abc"` and `""` read as nothing.
pub(crate) fn parse_float(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        return Some(if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let integer_digits = count_digits(&bytes[end..]);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(&bytes[end + 1..]);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut probe = end + 1;
        if matches!(bytes.get(probe), Some(b'+' | b'-')) {
            probe += 1;
        }
        let exponent_digits = count_digits(&bytes[probe..]);
        if exponent_digits > 0 {
            end = probe + exponent_digits;
        }
    }

    text[..end].parse::<f64>().ok()
}

/// Reads the leading integer of `raw`; `"3.7"` reads as 3.
pub(crate) fn parse_int(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits = count_digits(rest.as_bytes());
    if digits == 0 {
        return None;
    }
    let magnitude = rest[..digits].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}
