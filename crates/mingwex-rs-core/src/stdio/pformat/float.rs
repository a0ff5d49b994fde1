//! Floating-point conversions: `%f %e %g` families and `%a` hex-float.
//!
//! Finite values go through correctly-rounded decimal conversion (std's
//! float formatter) reshaped to the C grammar: signed two-digit exponents,
//! `#`-forced decimal points, `%g` style selection per C11 7.21.6.1p8.
//! Special values never reach numeric conversion; they are routed by the
//! bit-pattern classification in [`crate::math::fp_consts`].

use crate::math::fp_consts::{self, FpClass};

use super::field::Rendered;
use super::spec::ResolvedSpec;

/// Render one floating-point argument.
pub fn float(value: f64, conv: u8, spec: &ResolvedSpec) -> Rendered {
    let upper = conv.is_ascii_uppercase();
    let sign = if value.is_sign_negative() {
        Some(b'-')
    } else if spec.flags.force_sign {
        Some(b'+')
    } else if spec.flags.space_sign {
        Some(b' ')
    } else {
        None
    };

    match fp_consts::classify(value) {
        FpClass::Nan => special(if upper { b"NAN" } else { b"nan" }, sign),
        FpClass::Infinite => special(if upper { b"INF" } else { b"inf" }, sign),
        _ => {
            let abs = value.abs();
            let alt = spec.flags.alt_form;
            match conv | 0x20 {
                b'e' => numeric(
                    sign,
                    b"",
                    exponential(abs, spec.precision.unwrap_or(6), upper, alt),
                ),
                b'g' => numeric(sign, b"", general(abs, spec.precision, upper, alt)),
                b'a' => {
                    let prefix: &'static [u8] = if upper { b"0X" } else { b"0x" };
                    numeric(sign, prefix, hex_float(abs, spec.precision, upper, alt))
                }
                // 'f' and anything routed here by default.
                _ => numeric(sign, b"", fixed(abs, spec.precision.unwrap_or(6), alt)),
            }
        }
    }
}

fn numeric(sign: Option<u8>, prefix: &'static [u8], body: Vec<u8>) -> Rendered {
    Rendered {
        sign,
        prefix,
        body,
        zero_pad_ok: true,
    }
}

/// nan/inf with sign; these pad with spaces even under the `0` flag.
fn special(text: &'static [u8], sign: Option<u8>) -> Rendered {
    Rendered {
        sign,
        prefix: b"",
        body: text.to_vec(),
        zero_pad_ok: false,
    }
}

/// `%f`: fixed-point decimal at the given precision.
fn fixed(abs: f64, precision: usize, alt: bool) -> Vec<u8> {
    let mut s = format!("{abs:.precision$}");
    if precision == 0 && alt {
        s.push('.');
    }
    s.into_bytes()
}

/// `%e`: one leading digit, fraction at the given precision, and a signed
/// exponent of at least two digits.
fn exponential(abs: f64, precision: usize, upper: bool, alt: bool) -> Vec<u8> {
    let raw = format!("{abs:.precision$e}");
    // std renders "d.ddde[-]x"; reshape the exponent field.
    let Some(epos) = raw.rfind('e') else {
        return raw.into_bytes();
    };
    let mantissa = &raw[..epos];
    let exp: i32 = raw[epos + 1..].parse().unwrap_or(0);

    let mut out = String::with_capacity(raw.len() + 3);
    out.push_str(mantissa);
    if alt && !mantissa.contains('.') {
        out.push('.');
    }
    out.push(if upper { 'E' } else { 'e' });
    out.push(if exp < 0 { '-' } else { '+' });
    let mag = exp.unsigned_abs();
    if mag < 10 {
        out.push('0');
    }
    out.push_str(&mag.to_string());
    out.into_bytes()
}

/// `%g`: fixed or exponential form chosen from the rounded decimal
/// exponent X — fixed when `P > X >= -4`, exponential otherwise — with
/// trailing zeros stripped unless `#` is given.
fn general(abs: f64, precision: Option<usize>, upper: bool, alt: bool) -> Vec<u8> {
    let p = precision.unwrap_or(6).max(1);

    // X is the exponent style-e *would* use at this precision, so rounding
    // that bumps 9.99... to 10.0 also moves the style decision.
    let probe = format!("{:.*e}", p - 1, abs);
    let x: i32 = probe
        .rfind('e')
        .and_then(|i| probe[i + 1..].parse().ok())
        .unwrap_or(0);

    if x >= -4 && x < p as i32 {
        let frac = (p as i32 - 1 - x).max(0) as usize;
        let mut s = format!("{abs:.frac$}");
        if alt && !s.contains('.') {
            s.push('.');
        }
        if !alt {
            strip_trailing_zeros(&mut s);
        }
        s.into_bytes()
    } else {
        let mut bytes = exponential(abs, p - 1, upper, alt);
        if !alt {
            // Strip inside the mantissa, ahead of the exponent marker.
            let s = String::from_utf8(bytes).unwrap_or_default();
            if let Some(epos) = s.find(['e', 'E']) {
                let mut mantissa = s[..epos].to_string();
                strip_trailing_zeros(&mut mantissa);
                mantissa.push_str(&s[epos..]);
                bytes = mantissa.into_bytes();
            } else {
                bytes = s.into_bytes();
            }
        }
        bytes
    }
}

fn strip_trailing_zeros(s: &mut String) {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
}

/// `%a`: hex mantissa straight from the IEEE encoding with a binary
/// exponent in signed decimal. Without a precision the fraction is the
/// shortest exact form; with one, the nibble stream is rounded half-even.
///
/// The returned body excludes the `0x` prefix, which the caller places so
/// zero padding can land between prefix and digits.
fn hex_float(abs: f64, precision: Option<usize>, upper: bool, alt: bool) -> Vec<u8> {
    const FRAC_BITS: u32 = 52;
    const FRAC_NIBBLES: usize = 13;

    let bits = abs.to_bits();
    let exp_field = ((bits >> FRAC_BITS) & 0x7ff) as i32;
    let frac = bits & ((1u64 << FRAC_BITS) - 1);

    let (mut lead, bexp) = if exp_field == 0 {
        if frac == 0 { (0u8, 0i32) } else { (0u8, -1022) }
    } else {
        (1u8, exp_field - 1023)
    };

    let mut nibbles: Vec<u8> = (0..FRAC_NIBBLES)
        .map(|i| ((frac >> (FRAC_BITS - 4 - 4 * i as u32)) & 0xf) as u8)
        .collect();

    match precision {
        None => {
            while nibbles.last() == Some(&0) {
                nibbles.pop();
            }
        }
        Some(p) if p >= FRAC_NIBBLES => nibbles.resize(p, 0),
        Some(p) => {
            let dropped_bits = FRAC_BITS - 4 * p as u32;
            let rem = frac & ((1u64 << dropped_bits) - 1);
            let half = 1u64 << (dropped_bits - 1);
            nibbles.truncate(p);
            let lsb = if p == 0 { lead & 1 } else { nibbles[p - 1] & 1 };
            if rem > half || (rem == half && lsb == 1) {
                let mut carry = true;
                for d in nibbles.iter_mut().rev() {
                    *d += 1;
                    if *d == 16 {
                        *d = 0;
                    } else {
                        carry = false;
                        break;
                    }
                }
                if carry {
                    // Carry out of the fraction; the leading digit absorbs
                    // it (1 becomes 2, or 0 becomes 1 for subnormals).
                    lead += 1;
                }
            }
        }
    }

    let mut body = Vec::with_capacity(nibbles.len() + 8);
    body.push(b'0' + lead);
    if !nibbles.is_empty() || alt {
        body.push(b'.');
    }
    for &n in &nibbles {
        body.push(hex_digit(n, upper));
    }
    body.push(if upper { b'P' } else { b'p' });
    body.push(if bexp < 0 { b'-' } else { b'+' });
    body.extend_from_slice(bexp.unsigned_abs().to_string().as_bytes());
    body
}

fn hex_digit(n: u8, upper: bool) -> u8 {
    match n {
        0..=9 => b'0' + n,
        _ if upper => b'A' + (n - 10),
        _ => b'a' + (n - 10),
    }
}
