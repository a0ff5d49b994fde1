//! The `pformat` engine: one format-string interpreter behind the whole
//! printf family.
//!
//! Clean-room implementation of C99/SUSv3 formatted output with the
//! Microsoft extensions (`I`/`I32`/`I64` length markers, extensible
//! conversion set). Every public entry point funnels into [`pformat`] with
//! a sink choice standing in for the classic TO_FILE/NOLIMIT flag pair.
//!
//! Reference: ISO C11 7.21.6.1, POSIX.1-2024 fprintf
//!
//! Control flow per call: the scanner loop feeds literal runs straight to
//! the sink; each `%` conversion goes parse → argument pull → conversion →
//! field padding → sink. Nothing survives the call; concurrent calls are
//! independent unless they share a destination.

pub mod args;
pub mod convert;
pub mod field;
pub mod float;
pub mod sink;
pub mod spec;

use std::cell::Cell;

use thiserror::Error;

pub use args::{ArgCursor, PFormatArg};
pub use sink::{PFormatSink, SinkWriter};
pub use spec::{ConvSpec, FormatFlags, LengthMod, Precision, ResolvedSpec, Width};

/// Ways a formatting call can fail.
///
/// Bounded-sink truncation is deliberately absent: it is expected behavior,
/// visible only in the gap between the returned tally and the bytes stored.
#[derive(Debug, Error)]
pub enum PFormatError {
    /// `%` at end of format text, or the text ran out mid-specification.
    #[error("format string ends inside a conversion specification")]
    IncompleteSpec,
    /// Conversion byte not in the standard set and not registered.
    #[error("unknown conversion character `{0}`")]
    UnknownConversion(char),
    /// The argument slot held a different type than the conversion needs.
    #[error("conversion expected a {expected} argument, got {got}")]
    ArgumentType {
        expected: &'static str,
        got: &'static str,
    },
    /// More conversions than arguments.
    #[error("argument list exhausted")]
    MissingArgument,
    /// A `n$` or `*m$` reference outside the argument list (or zero).
    #[error("argument index {0}$ is out of range")]
    BadArgumentIndex(usize),
    /// Null pointer passed for `%s`.
    #[error("null string argument for %s conversion")]
    NullString,
    /// The stream sink's write primitive failed; fatal for the call.
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Handler for a vendor-extension conversion character.
///
/// Called after width/precision resolution with the cursor positioned at
/// the conversion's argument slot; the handler renders to the writer.
pub type ConvHandler = fn(
    &ConvSpec,
    &ResolvedSpec,
    &mut ArgCursor<'_, '_>,
    &mut SinkWriter<'_>,
) -> Result<(), PFormatError>;

/// Registration point for conversion characters beyond the standard set.
///
/// The vendor-extension surface is open-ended, so rather than a closed
/// enum, callers register handlers explicitly and pass the registry to
/// [`pformat_with`].
#[derive(Default)]
pub struct ConvRegistry {
    entries: Vec<(u8, ConvHandler)>,
}

impl ConvRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for conversion byte `conv`. Later registrations
    /// shadow earlier ones; standard conversions cannot be overridden.
    pub fn register(&mut self, conv: u8, handler: ConvHandler) {
        self.entries.retain(|(c, _)| *c != conv);
        self.entries.push((conv, handler));
    }

    fn lookup(&self, conv: u8) -> Option<ConvHandler> {
        self.entries
            .iter()
            .find(|(c, _)| *c == conv)
            .map(|(_, h)| *h)
    }
}

/// Format `fmt` with `args` into `sink`, returning the running tally.
///
/// The tally is the ISO-C return contract: the number of bytes the call
/// would produce with unlimited capacity, even when a bounded sink
/// truncates. Errors stop the call; bytes already flushed stay flushed.
pub fn pformat(
    sink: PFormatSink<'_>,
    fmt: &[u8],
    args: &[PFormatArg<'_>],
) -> Result<usize, PFormatError> {
    pformat_with(&ConvRegistry::default(), sink, fmt, args)
}

/// [`pformat`] with a vendor-extension registry.
pub fn pformat_with(
    registry: &ConvRegistry,
    sink: PFormatSink<'_>,
    fmt: &[u8],
    args: &[PFormatArg<'_>],
) -> Result<usize, PFormatError> {
    let mut writer = SinkWriter::new(sink);
    let mut cursor = ArgCursor::new(args);
    let mut pos = 0;

    while pos < fmt.len() {
        // Literal run: maximal stretch without '%', written immediately.
        let start = pos;
        while pos < fmt.len() && fmt[pos] != b'%' {
            pos += 1;
        }
        if pos > start {
            writer.put(&fmt[start..pos])?;
        }
        if pos >= fmt.len() {
            break;
        }

        pos += 1; // consume '%'
        if pos >= fmt.len() {
            return Err(PFormatError::IncompleteSpec);
        }
        if fmt[pos] == b'%' {
            // "%%" is a literal percent and never reaches the parser.
            writer.put(b"%")?;
            pos += 1;
            continue;
        }

        let (cspec, used) = spec::parse_conv_spec(&fmt[pos..])?;
        pos += used;
        let resolved = resolve(&cspec, &mut cursor)?;
        dispatch(registry, &cspec, &resolved, &mut cursor, &mut writer)?;
    }

    Ok(writer.tally())
}

/// Resolve `*`-sourced width and precision against the argument stream.
///
/// C pulls the width argument first, then the precision, then the value.
/// A negative width reads as left-justify with the absolute value; a
/// negative precision reads as unspecified.
fn resolve(cspec: &ConvSpec, cursor: &mut ArgCursor<'_, '_>) -> Result<ResolvedSpec, PFormatError> {
    let mut flags = cspec.flags;

    let width = match cspec.width {
        Width::None => 0,
        Width::Fixed(w) => w,
        Width::FromArg | Width::FromArgAt(_) => {
            let pos = match cspec.width {
                Width::FromArgAt(m) => Some(m),
                _ => None,
            };
            let w = cursor.star_int(pos)?;
            if w < 0 {
                flags.left_justify = true;
                flags.zero_pad = false;
                w.unsigned_abs() as usize
            } else {
                w as usize
            }
        }
    };

    let precision = match cspec.precision {
        Precision::None => None,
        Precision::Fixed(p) => Some(p),
        Precision::FromArg | Precision::FromArgAt(_) => {
            let pos = match cspec.precision {
                Precision::FromArgAt(m) => Some(m),
                _ => None,
            };
            let p = cursor.star_int(pos)?;
            if p < 0 { None } else { Some(p as usize) }
        }
    };

    Ok(ResolvedSpec {
        flags,
        width,
        precision,
    })
}

fn dispatch(
    registry: &ConvRegistry,
    cspec: &ConvSpec,
    resolved: &ResolvedSpec,
    cursor: &mut ArgCursor<'_, '_>,
    writer: &mut SinkWriter<'_>,
) -> Result<(), PFormatError> {
    match cspec.conversion {
        b'd' | b'i' => {
            let v = cursor.signed(cspec.position, cspec.length)?;
            field::emit(writer, resolved, &convert::signed(v, resolved))
        }
        b'o' | b'u' | b'x' | b'X' => {
            let v = cursor.unsigned(cspec.position, cspec.length)?;
            field::emit(writer, resolved, &convert::unsigned(v, cspec.conversion, resolved))
        }
        b'f' | b'F' | b'e' | b'E' | b'g' | b'G' | b'a' | b'A' => {
            let v = cursor.float(cspec.position)?;
            field::emit(writer, resolved, &float::float(v, cspec.conversion, resolved))
        }
        b'c' => {
            let c = cursor.character(cspec.position, cspec.length)?;
            field::emit(writer, resolved, &convert::character(c))
        }
        b's' => {
            let s = cursor.string(cspec.position, cspec.length)?;
            field::emit(writer, resolved, &convert::string(s, resolved))
        }
        b'p' => {
            let p = cursor.pointer(cspec.position)?;
            field::emit(writer, resolved, &convert::pointer(p))
        }
        b'n' => {
            // Side-effecting, non-rendering: store the tally so far,
            // narrowed like an integer store through the modifier.
            let cell: &Cell<i64> = cursor.count(cspec.position)?;
            cell.set(args::narrow_signed(writer.tally() as i64, cspec.length));
            Ok(())
        }
        other => match registry.lookup(other) {
            Some(handler) => handler(cspec, resolved, cursor, writer),
            None => Err(PFormatError::UnknownConversion(other as char)),
        },
    }
}
