//! Typed argument extraction.
//!
//! The C variadic list is modeled as a slice of [`PFormatArg`] values; the
//! cursor walks it sequentially and applies the length-modifier discipline
//! (C's default argument promotions) when handing values to the conversion
//! engine. Positional conversions (`%n$`) index the slice directly and do
//! not advance the sequential cursor.

use std::cell::Cell;

use super::PFormatError;
use super::spec::LengthMod;

/// One formatting argument.
///
/// Integer and unsigned values are stored at full 64-bit width; the cursor
/// narrows them per the length modifier, reproducing C's truncating pulls
/// for `h`/`hh` and the 32-bit default. A `Str`/`WideStr` of `None` stands
/// for a C null pointer and is reported as a formatting error by `%s`.
#[derive(Debug, Clone, Copy)]
pub enum PFormatArg<'a> {
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(u8),
    WideChar(char),
    Str(Option<&'a [u8]>),
    WideStr(Option<&'a [char]>),
    Ptr(usize),
    /// Target for `%n`: receives the running tally.
    Count(&'a Cell<i64>),
}

/// Character argument as selected by the length modifier.
#[derive(Debug, Clone, Copy)]
pub enum CharArg {
    Narrow(u8),
    Wide(char),
}

/// String argument as selected by the length modifier.
#[derive(Debug, Clone, Copy)]
pub enum StrArg<'a> {
    Narrow(&'a [u8]),
    Wide(&'a [char]),
}

/// Cursor over the argument slice.
#[derive(Debug)]
pub struct ArgCursor<'a, 'b> {
    args: &'b [PFormatArg<'a>],
    pos: usize,
}

impl<'a, 'b> ArgCursor<'a, 'b> {
    pub fn new(args: &'b [PFormatArg<'a>]) -> Self {
        Self { args, pos: 0 }
    }

    /// Fetch the argument slot for a conversion: either the explicit
    /// 1-based `position` or the next sequential slot.
    fn slot(&mut self, position: Option<usize>) -> Result<PFormatArg<'a>, PFormatError> {
        match position {
            Some(n) => self
                .args
                .get(n - 1)
                .copied()
                .ok_or(PFormatError::BadArgumentIndex(n)),
            None => {
                let arg = self
                    .args
                    .get(self.pos)
                    .copied()
                    .ok_or(PFormatError::MissingArgument)?;
                self.pos += 1;
                Ok(arg)
            }
        }
    }

    /// Pull a signed integer, narrowed per the length modifier.
    ///
    /// A `Uint` slot is accepted with its bit pattern reinterpreted at the
    /// pull width, matching what the C calling convention would produce.
    pub fn signed(
        &mut self,
        position: Option<usize>,
        length: LengthMod,
    ) -> Result<i64, PFormatError> {
        let raw = match self.slot(position)? {
            PFormatArg::Int(v) => v,
            PFormatArg::Uint(v) => v as i64,
            other => return Err(type_error("integer", other)),
        };
        Ok(narrow_signed(raw, length))
    }

    /// Pull an unsigned integer, narrowed per the length modifier.
    pub fn unsigned(
        &mut self,
        position: Option<usize>,
        length: LengthMod,
    ) -> Result<u64, PFormatError> {
        let raw = match self.slot(position)? {
            PFormatArg::Uint(v) => v,
            PFormatArg::Int(v) => v as u64,
            other => return Err(type_error("unsigned integer", other)),
        };
        Ok(narrow_unsigned(raw, length))
    }

    /// Pull a floating-point value. `L` collapses to f64 in this model;
    /// `f`/`e`/`g`/`a` without `L` are already doubles by C promotion.
    pub fn float(&mut self, position: Option<usize>) -> Result<f64, PFormatError> {
        match self.slot(position)? {
            PFormatArg::Float(v) => Ok(v),
            other => Err(type_error("double", other)),
        }
    }

    /// Pull a character; `l` selects the wide form.
    pub fn character(
        &mut self,
        position: Option<usize>,
        length: LengthMod,
    ) -> Result<CharArg, PFormatError> {
        let wide = matches!(length, LengthMod::L);
        match self.slot(position)? {
            PFormatArg::WideChar(c) => Ok(CharArg::Wide(c)),
            PFormatArg::Char(c) if !wide => Ok(CharArg::Narrow(c)),
            // C pulls an int for %c and converts to unsigned char.
            PFormatArg::Int(v) if !wide => Ok(CharArg::Narrow(v as u8)),
            other => Err(type_error("character", other)),
        }
    }

    /// Pull a string; `l` selects the wide form. A null source pointer is
    /// a formatting error, never a silent empty string.
    pub fn string(
        &mut self,
        position: Option<usize>,
        length: LengthMod,
    ) -> Result<StrArg<'a>, PFormatError> {
        let wide = matches!(length, LengthMod::L);
        match self.slot(position)? {
            PFormatArg::Str(Some(s)) if !wide => Ok(StrArg::Narrow(s)),
            PFormatArg::WideStr(Some(s)) => Ok(StrArg::Wide(s)),
            PFormatArg::Str(None) | PFormatArg::WideStr(None) => Err(PFormatError::NullString),
            other => Err(type_error("string", other)),
        }
    }

    /// Pull a pointer-sized value for `%p`.
    pub fn pointer(&mut self, position: Option<usize>) -> Result<usize, PFormatError> {
        match self.slot(position)? {
            PFormatArg::Ptr(p) => Ok(p),
            other => Err(type_error("pointer", other)),
        }
    }

    /// Pull the `%n` target cell.
    pub fn count(&mut self, position: Option<usize>) -> Result<&'a Cell<i64>, PFormatError> {
        match self.slot(position)? {
            PFormatArg::Count(cell) => Ok(cell),
            other => Err(type_error("count target", other)),
        }
    }

    /// Pull one extra `int` slot for a `*` width or precision.
    pub fn star_int(&mut self, position: Option<usize>) -> Result<i32, PFormatError> {
        match self.slot(position)? {
            PFormatArg::Int(v) => Ok(v as i32),
            other => Err(type_error("int (for `*`)", other)),
        }
    }
}

/// Narrow a signed pull to the width the length modifier selects,
/// sign-extending back to i64.
pub fn narrow_signed(raw: i64, length: LengthMod) -> i64 {
    match length {
        LengthMod::Hh => raw as i8 as i64,
        LengthMod::H => raw as i16 as i64,
        LengthMod::None | LengthMod::I32 => raw as i32 as i64,
        LengthMod::Z | LengthMod::T | LengthMod::IPtr => raw as isize as i64,
        LengthMod::L | LengthMod::Ll | LengthMod::J | LengthMod::I64 | LengthMod::BigL => raw,
    }
}

/// Narrow an unsigned pull to the width the length modifier selects.
pub fn narrow_unsigned(raw: u64, length: LengthMod) -> u64 {
    match length {
        LengthMod::Hh => raw as u8 as u64,
        LengthMod::H => raw as u16 as u64,
        LengthMod::None | LengthMod::I32 => raw as u32 as u64,
        LengthMod::Z | LengthMod::T | LengthMod::IPtr => raw as usize as u64,
        LengthMod::L | LengthMod::Ll | LengthMod::J | LengthMod::I64 | LengthMod::BigL => raw,
    }
}

fn type_error(expected: &'static str, got: PFormatArg<'_>) -> PFormatError {
    PFormatError::ArgumentType {
        expected,
        got: arg_kind(got),
    }
}

fn arg_kind(arg: PFormatArg<'_>) -> &'static str {
    match arg {
        PFormatArg::Int(_) => "int",
        PFormatArg::Uint(_) => "unsigned",
        PFormatArg::Float(_) => "double",
        PFormatArg::Char(_) => "char",
        PFormatArg::WideChar(_) => "wide char",
        PFormatArg::Str(_) => "string",
        PFormatArg::WideStr(_) => "wide string",
        PFormatArg::Ptr(_) => "pointer",
        PFormatArg::Count(_) => "count target",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_pulls_advance() {
        let args = [PFormatArg::Int(1), PFormatArg::Int(2)];
        let mut cur = ArgCursor::new(&args);
        assert_eq!(cur.signed(None, LengthMod::None).unwrap(), 1);
        assert_eq!(cur.signed(None, LengthMod::None).unwrap(), 2);
        assert!(matches!(
            cur.signed(None, LengthMod::None),
            Err(PFormatError::MissingArgument)
        ));
    }

    #[test]
    fn positional_pull_does_not_advance() {
        let args = [PFormatArg::Int(10), PFormatArg::Int(20)];
        let mut cur = ArgCursor::new(&args);
        assert_eq!(cur.signed(Some(2), LengthMod::None).unwrap(), 20);
        assert_eq!(cur.signed(None, LengthMod::None).unwrap(), 10);
    }

    #[test]
    fn hh_truncates_and_sign_extends() {
        let args = [PFormatArg::Int(0x1_80)];
        let mut cur = ArgCursor::new(&args);
        assert_eq!(cur.signed(None, LengthMod::Hh).unwrap(), -128);
    }

    #[test]
    fn default_pull_is_32_bit() {
        let args = [PFormatArg::Int(0x1_0000_0001)];
        let mut cur = ArgCursor::new(&args);
        assert_eq!(cur.signed(None, LengthMod::None).unwrap(), 1);
        let args = [PFormatArg::Uint(0x1_0000_0001)];
        let mut cur = ArgCursor::new(&args);
        assert_eq!(cur.unsigned(None, LengthMod::None).unwrap(), 1);
    }

    #[test]
    fn i64_marker_keeps_full_width() {
        let args = [PFormatArg::Int(i64::MIN)];
        let mut cur = ArgCursor::new(&args);
        assert_eq!(cur.signed(None, LengthMod::I64).unwrap(), i64::MIN);
    }

    #[test]
    fn negative_int_as_unsigned_matches_c() {
        let args = [PFormatArg::Int(-1)];
        let mut cur = ArgCursor::new(&args);
        assert_eq!(cur.unsigned(None, LengthMod::None).unwrap(), u64::from(u32::MAX));
    }

    #[test]
    fn null_string_is_reported() {
        let args = [PFormatArg::Str(None)];
        let mut cur = ArgCursor::new(&args);
        assert!(matches!(
            cur.string(None, LengthMod::None),
            Err(PFormatError::NullString)
        ));
    }

    #[test]
    fn type_mismatch_is_reported() {
        let args = [PFormatArg::Float(1.0)];
        let mut cur = ArgCursor::new(&args);
        assert!(matches!(
            cur.signed(None, LengthMod::None),
            Err(PFormatError::ArgumentType { .. })
        ));
    }

    #[test]
    fn out_of_range_position_is_reported() {
        let args = [PFormatArg::Int(1)];
        let mut cur = ArgCursor::new(&args);
        assert!(matches!(
            cur.signed(Some(5), LengthMod::None),
            Err(PFormatError::BadArgumentIndex(5))
        ));
    }
}
