/// Round to `places` decimal digits, halves away from zero, working on the
/// shortest decimal representation of `value` so that binary noise in the
/// last digits (`0.1 + 0.2`) disappears. Non-finite values pass through.
pub fn round_half_up(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let places = places as usize;
    if frac_part.len() <= places {
        return value;
    }

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(places))
        .map(|b| b - b'0')
        .collect();
    let mut int_len = int_part.len();

    if frac_part.as_bytes()[places] >= b'5' {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
            int_len += 1;
        }
    }

    let mut rounded = String::with_capacity(digits.len() + 1);
    for (i, d) in digits.iter().enumerate() {
        if i == int_len {
            rounded.push('.');
        }
        rounded.push((b'0' + d) as char);
    }

    match rounded.parse::<f64>() {
        Ok(magnitude) if magnitude == 0.0 => 0.0,
        Ok(magnitude) => magnitude.copysign(value),
        Err(_) => value,
    }
}
