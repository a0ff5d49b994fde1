//! Integer, character, string, and pointer conversions.
//!
//! Each function renders one argument into a [`Rendered`] run; field
//! padding is applied afterwards by [`super::field`]. Digit generation is
//! repeated division into a fixed stack buffer, sign handled separately
//! from the digits (C11 7.21.6.1p8).

use super::field::Rendered;
use super::spec::ResolvedSpec;
use crate::string::strnlen;

use super::args::{CharArg, StrArg};

/// Render a signed decimal (`%d` / `%i`).
pub fn signed(value: i64, spec: &ResolvedSpec) -> Rendered {
    let digits = render_digits(value.unsigned_abs(), 10, false);
    let sign = if value < 0 {
        Some(b'-')
    } else if spec.flags.force_sign {
        Some(b'+')
    } else if spec.flags.space_sign {
        Some(b' ')
    } else {
        None
    };
    Rendered {
        sign,
        prefix: b"",
        body: integer_body(digits, value == 0, spec),
        zero_pad_ok: spec.precision.is_none(),
    }
}

/// Render an unsigned integer (`%o` / `%u` / `%x` / `%X`).
pub fn unsigned(value: u64, conv: u8, spec: &ResolvedSpec) -> Rendered {
    let (base, uppercase) = match conv {
        b'o' => (8, false),
        b'x' => (16, false),
        b'X' => (16, true),
        _ => (10, false),
    };
    let digits = render_digits(value, base, uppercase);
    let mut body = integer_body(digits, value == 0, spec);

    // '#' on octal forces a leading zero digit; on hex it adds a prefix,
    // suppressed for the value zero (C11 7.21.6.1p6).
    let mut prefix: &'static [u8] = b"";
    if spec.flags.alt_form {
        match conv {
            b'o' => {
                if body.first() != Some(&b'0') {
                    body.insert(0, b'0');
                }
            }
            b'x' if value != 0 => prefix = b"0x",
            b'X' if value != 0 => prefix = b"0X",
            _ => {}
        }
    }

    Rendered {
        sign: None,
        prefix,
        body,
        zero_pad_ok: spec.precision.is_none(),
    }
}

/// Render `%p`: pointer as unsigned hex with `#` semantics forced on,
/// independent of the flags given.
pub fn pointer(addr: usize) -> Rendered {
    Rendered {
        sign: None,
        prefix: b"0x",
        body: render_digits(addr as u64, 16, false),
        zero_pad_ok: true,
    }
}

/// Render `%c` / `%lc`.
pub fn character(c: CharArg) -> Rendered {
    let body = match c {
        CharArg::Narrow(b) => vec![b],
        CharArg::Wide(ch) => {
            let mut buf = [0u8; 4];
            ch.encode_utf8(&mut buf).as_bytes().to_vec()
        }
    };
    Rendered::body(body)
}

/// Render `%s` / `%ls`.
///
/// The source is NUL-terminated in the CRT model; precision caps the bytes
/// copied (`.0` yields empty output). Wide strings are UTF-8 encoded and a
/// multibyte sequence is never split across the precision limit.
pub fn string(s: StrArg<'_>, spec: &ResolvedSpec) -> Rendered {
    let body = match s {
        StrArg::Narrow(bytes) => {
            let cap = spec.precision.unwrap_or(bytes.len()).min(bytes.len());
            bytes[..strnlen(bytes, cap)].to_vec()
        }
        StrArg::Wide(chars) => {
            let mut out = Vec::new();
            for &ch in chars {
                if ch == '\0' {
                    break;
                }
                if let Some(limit) = spec.precision {
                    if out.len() + ch.len_utf8() > limit {
                        break;
                    }
                }
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            out
        }
    };
    Rendered::body(body)
}

/// Digits plus precision-driven zero fill, with the `%.0d`-of-zero rule:
/// explicit precision 0 and value 0 render no digits at all.
fn integer_body(digits: Vec<u8>, is_zero: bool, spec: &ResolvedSpec) -> Vec<u8> {
    if is_zero && spec.precision == Some(0) {
        return Vec::new();
    }
    let min_digits = spec.precision.unwrap_or(1);
    let zeros = min_digits.saturating_sub(digits.len());
    let mut body = Vec::with_capacity(zeros + digits.len());
    body.resize(zeros, b'0');
    body.extend_from_slice(&digits);
    body
}

/// Convert `value` to digits in `base` by repeated division.
fn render_digits(mut value: u64, base: u64, uppercase: bool) -> Vec<u8> {
    let mut buf = [0u8; 64];
    let mut pos = buf.len();
    let alpha = if uppercase { b'A' } else { b'a' };
    if value == 0 {
        pos -= 1;
        buf[pos] = b'0';
    }
    while value > 0 {
        pos -= 1;
        let digit = (value % base) as u8;
        buf[pos] = if digit < 10 {
            b'0' + digit
        } else {
            alpha + (digit - 10)
        };
        value /= base;
    }
    buf[pos..].to_vec()
}
