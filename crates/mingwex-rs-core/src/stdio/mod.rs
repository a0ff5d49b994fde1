//! Standard I/O operations: the printf family.
//!
//! Each entry point is a thin call-and-forward wrapper around the shared
//! [`pformat`] engine; the wrapper only chooses the sink and size-limit
//! policy. Because the argument list is already a slice (the safe stand-in
//! for `va_list`), these functions double as their `v*` variants.

pub mod pformat;

use std::io::{self, Write};

pub use pformat::{
    ConvRegistry, PFormatArg, PFormatError, PFormatSink, pformat, pformat_with,
};

/// `printf`: format to standard output.
///
/// Locks stdout for the duration of the call; concurrent callers writing
/// to the same stream otherwise need their own synchronization.
pub fn printf(fmt: &[u8], args: &[PFormatArg<'_>]) -> Result<usize, PFormatError> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    pformat(PFormatSink::Stream(&mut lock), fmt, args)
}

/// `fprintf`: format to a caller-supplied stream.
pub fn fprintf(
    stream: &mut dyn Write,
    fmt: &[u8],
    args: &[PFormatArg<'_>],
) -> Result<usize, PFormatError> {
    pformat(PFormatSink::Stream(stream), fmt, args)
}

/// `sprintf`: format to a growable buffer.
///
/// This is the unlimited (`NOLIMIT`) contract inherited from ISO C, where
/// the caller guarantees space; here the buffer grows instead of
/// overflowing. Prefer [`snprintf`] when a capacity is known.
pub fn sprintf(
    buf: &mut Vec<u8>,
    fmt: &[u8],
    args: &[PFormatArg<'_>],
) -> Result<usize, PFormatError> {
    pformat(PFormatSink::Buffer(buf), fmt, args)
}

/// `snprintf`: format into a fixed-capacity buffer.
///
/// At most `buf.len()` bytes are stored; the return value is the length
/// the full output would have (C11 7.21.6.5).
pub fn snprintf(
    buf: &mut [u8],
    fmt: &[u8],
    args: &[PFormatArg<'_>],
) -> Result<usize, PFormatError> {
    pformat(PFormatSink::Bounded(buf), fmt, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprintf_appends_to_buffer() {
        let mut buf = Vec::new();
        let n = sprintf(&mut buf, b"%s=%d", &[PFormatArg::Str(Some(b"x")), PFormatArg::Int(7)])
            .unwrap();
        assert_eq!(buf, b"x=7");
        assert_eq!(n, 3);
    }

    #[test]
    fn snprintf_truncates_but_reports_full_length() {
        let mut buf = [0u8; 3];
        let n = snprintf(&mut buf, b"%d", &[PFormatArg::Int(123456)]).unwrap();
        assert_eq!(&buf, b"123");
        assert_eq!(n, 6);
    }

    #[test]
    fn fprintf_writes_through() {
        let mut out = Vec::new();
        let n = fprintf(&mut out, b"[%5s]", &[PFormatArg::Str(Some(b"ab"))]).unwrap();
        assert_eq!(out, b"[   ab]");
        assert_eq!(n, 7);
    }
}
