//! Conversion specification parsing.
//!
//! Grammar (consumed starting just after `%`):
//! `[pos$][flags][width][.precision][length]conversion` with flags in
//! `- + space # 0`, width/precision as decimal literals or `*` / `*m$`,
//! and the length modifiers of C99 plus the Microsoft `I`/`I32`/`I64`
//! markers.
//!
//! Reference: ISO C11 7.21.6.1, POSIX.1-2024 fprintf (for `n$` forms).

use super::PFormatError;

/// Flags parsed from a conversion specification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags {
    pub left_justify: bool, // '-'
    pub force_sign: bool,   // '+'
    pub space_sign: bool,   // ' '
    pub alt_form: bool,     // '#'
    pub zero_pad: bool,     // '0'
}

/// Minimum field width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    None,
    Fixed(usize),
    /// `*`: next argument supplies the width.
    FromArg,
    /// `*m$`: argument `m` (1-based) supplies the width.
    FromArgAt(usize),
}

/// Precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    None,
    Fixed(usize),
    /// `.*`: next argument supplies the precision.
    FromArg,
    /// `.*m$`: argument `m` (1-based) supplies the precision.
    FromArgAt(usize),
}

/// Length modifier selecting the argument's storage size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMod {
    None,
    Hh,   // 'hh'
    H,    // 'h'
    L,    // 'l'
    Ll,   // 'll'
    Z,    // 'z'
    T,    // 't'
    J,    // 'j'
    BigL, // 'L'
    /// Microsoft `I32`: force 32-bit integer.
    I32,
    /// Microsoft `I64`: force 64-bit integer.
    I64,
    /// Microsoft bare `I`: pointer-width integer.
    IPtr,
}

/// A fully parsed conversion specification.
///
/// Invariant: exactly one conversion byte; width and precision are
/// independently optional. The conversion byte is taken lexically here and
/// validated by the driver, so unseen vendor extensions can be routed to a
/// registered handler instead of being rejected in the grammar.
#[derive(Debug, Clone)]
pub struct ConvSpec {
    /// Explicit argument position from a leading `n$`, 1-based.
    pub position: Option<usize>,
    pub flags: FormatFlags,
    pub width: Width,
    pub precision: Precision,
    pub length: LengthMod,
    pub conversion: u8,
}

/// Width and precision with all `*` indirection resolved to values.
///
/// A negative `*` width reads as left-justification with the absolute
/// value; a negative `*` precision reads as "unspecified".
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSpec {
    pub flags: FormatFlags,
    pub width: usize,
    pub precision: Option<usize>,
}

/// Parse one conversion specification.
///
/// `fmt` points at the first byte after `%`. Returns the specification and
/// the number of bytes consumed. The parser never reads past `fmt`; running
/// out of bytes before the conversion character is a format error.
pub fn parse_conv_spec(fmt: &[u8]) -> Result<(ConvSpec, usize), PFormatError> {
    let mut pos = 0;
    let len = fmt.len();

    // --- argument position: digits followed by '$' ---
    let position = {
        let digits_end = scan_digits(fmt, pos);
        if digits_end > pos && digits_end < len && fmt[digits_end] == b'$' {
            let n = parse_decimal(&fmt[pos..digits_end]);
            pos = digits_end + 1;
            if n == 0 {
                return Err(PFormatError::BadArgumentIndex(0));
            }
            Some(n)
        } else {
            None
        }
    };

    // --- flags ---
    let mut flags = FormatFlags::default();
    while pos < len {
        match fmt[pos] {
            b'-' => flags.left_justify = true,
            b'+' => flags.force_sign = true,
            b' ' => flags.space_sign = true,
            b'#' => flags.alt_form = true,
            b'0' => flags.zero_pad = true,
            _ => break,
        }
        pos += 1;
    }
    // '+' overrides ' '; '-' overrides '0'.
    if flags.force_sign {
        flags.space_sign = false;
    }
    if flags.left_justify {
        flags.zero_pad = false;
    }

    // --- width ---
    let width = if pos < len && fmt[pos] == b'*' {
        pos += 1;
        match star_position(fmt, &mut pos)? {
            Some(m) => Width::FromArgAt(m),
            None => Width::FromArg,
        }
    } else {
        let end = scan_digits(fmt, pos);
        if end > pos {
            let w = parse_decimal(&fmt[pos..end]);
            pos = end;
            Width::Fixed(w)
        } else {
            Width::None
        }
    };

    // --- precision ---
    let precision = if pos < len && fmt[pos] == b'.' {
        pos += 1;
        if pos < len && fmt[pos] == b'*' {
            pos += 1;
            match star_position(fmt, &mut pos)? {
                Some(m) => Precision::FromArgAt(m),
                None => Precision::FromArg,
            }
        } else {
            // A bare '.' is precision zero, distinct from no precision.
            let end = scan_digits(fmt, pos);
            let p = if end > pos {
                parse_decimal(&fmt[pos..end])
            } else {
                0
            };
            pos = end.max(pos);
            Precision::Fixed(p)
        }
    } else {
        Precision::None
    };

    // --- length modifier ---
    let length = parse_length(fmt, &mut pos);

    // --- conversion byte ---
    if pos >= len {
        return Err(PFormatError::IncompleteSpec);
    }
    let conversion = fmt[pos];
    pos += 1;

    Ok((
        ConvSpec {
            position,
            flags,
            width,
            precision,
            length,
            conversion,
        },
        pos,
    ))
}

/// After a `*`, look for a `m$` positional reference.
fn star_position(fmt: &[u8], pos: &mut usize) -> Result<Option<usize>, PFormatError> {
    let end = scan_digits(fmt, *pos);
    if end > *pos && end < fmt.len() && fmt[end] == b'$' {
        let m = parse_decimal(&fmt[*pos..end]);
        *pos = end + 1;
        if m == 0 {
            return Err(PFormatError::BadArgumentIndex(0));
        }
        return Ok(Some(m));
    }
    Ok(None)
}

fn parse_length(fmt: &[u8], pos: &mut usize) -> LengthMod {
    let len = fmt.len();
    if *pos >= len {
        return LengthMod::None;
    }
    match fmt[*pos] {
        b'h' => {
            *pos += 1;
            if *pos < len && fmt[*pos] == b'h' {
                *pos += 1;
                LengthMod::Hh
            } else {
                LengthMod::H
            }
        }
        b'l' => {
            *pos += 1;
            if *pos < len && fmt[*pos] == b'l' {
                *pos += 1;
                LengthMod::Ll
            } else {
                LengthMod::L
            }
        }
        b'z' => {
            *pos += 1;
            LengthMod::Z
        }
        b't' => {
            *pos += 1;
            LengthMod::T
        }
        b'j' => {
            *pos += 1;
            LengthMod::J
        }
        b'L' => {
            *pos += 1;
            LengthMod::BigL
        }
        b'I' => {
            // Microsoft markers: I64, I32, or bare I (pointer width).
            // `get` returns None when the two-byte lookahead runs off the
            // end, which reads as the bare-I form.
            let lookahead = fmt.get(*pos + 1..*pos + 3);
            if lookahead == Some(b"64".as_slice()) {
                *pos += 3;
                LengthMod::I64
            } else if lookahead == Some(b"32".as_slice()) {
                *pos += 3;
                LengthMod::I32
            } else {
                *pos += 1;
                LengthMod::IPtr
            }
        }
        _ => LengthMod::None,
    }
}

fn scan_digits(fmt: &[u8], mut pos: usize) -> usize {
    while pos < fmt.len() && fmt[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

fn parse_decimal(digits: &[u8]) -> usize {
    let mut value = 0_usize;
    for &d in digits {
        value = value.saturating_mul(10).saturating_add((d - b'0') as usize);
    }
    value
}
