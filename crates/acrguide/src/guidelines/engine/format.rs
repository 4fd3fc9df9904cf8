/// Shortest decimal rendering of a parsed measurement (`7.50` prints `7.5`).
///
/// Magnitudes below 1e-6 or from 1e21 upward switch to exponent form
/// (`1e-7`, `1.5e+21`), the way numbers interpolate into report text.
pub(crate) fn number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exponential = format!("{value:e}");
        return match exponential.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => exponential,
        };
    }
    format!("{value}")
}

/// Fixed-point rendering with `digits` decimals. Exact ties round away from
/// zero (`0.25` at one digit prints `0.3`).
pub(crate) fn fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return number(value);
    }

    // Any f64 that is not an exact tie differs from one well within 40 extra digits.
    let expanded = format!("{:.*}", digits + 40, value.abs());
    let (whole, fraction) = expanded.split_once('.').unwrap_or((expanded.as_str(), ""));
    let mut kept: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes().take(digits))
        .collect();

    if fraction.as_bytes().get(digits).is_some_and(|next| *next >= b'5') {
        round_up(&mut kept);
    }

    let split = kept.len() - digits;
    let mut rendered = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        rendered.push('-');
    }
    rendered.extend(kept[..split].iter().map(|byte| char::from(*byte)));
    if digits > 0 {
        rendered.push('.');
        rendered.extend(kept[split..].iter().map(|byte| char::from(*byte)));
    }
    rendered
}

fn round_up(decimal: &mut Vec<u8>) {
    for byte in decimal.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return;
        }
    }
    decimal.insert(0, b'1');
}
