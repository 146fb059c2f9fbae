//! Display formatting for snapshot values.
//!
//! Every function here is pure: same input, same string, no locale.

/// How many addresses the top-IP lists show.
pub const TOP_N: usize = 10;

/// Decode a 32-bit integer into dotted-quad form, most significant octet
/// first.
pub fn format_ipv4(n: u32) -> String {
    [24_u32, 16, 8, 0]
        .iter()
        .map(|shift| ((n >> shift) & 0xFF).to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// The first `n` addresses in the order given, formatted as dotted quads.
///
/// No sorting happens here: the backend already ranks the list.
pub fn top_entries(ips: &[u32], n: usize) -> Vec<String> {
    ips.iter().take(n).map(|&ip| format_ipv4(ip)).collect()
}

/// Format a value with exactly two decimals, rounding half away from zero
/// on the shortest decimal representation of `value`.
///
/// Rounding the decimal string instead of the binary value keeps inputs
/// like `12.345` (stored as `12.34499…`) rounding the way they read.
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(2))
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part.as_bytes().get(2).is_some_and(|&d| d >= b'5');
    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - 2;
    let render = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    let sign = if value.is_sign_negative() && value != 0.0 {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{}.{}",
        render(&digits[..split]),
        render(&digits[split..])
    )
}
