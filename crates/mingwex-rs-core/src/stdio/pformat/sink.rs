//! Output sinks and the running-tally discipline.
//!
//! Every destination the printf family can target is one of three sinks.
//! The writer wraps a sink and keeps the ISO-C running tally: the count of
//! bytes that *would* be produced, independent of bounded-sink truncation.
//! That is the `snprintf` return-value contract (C11 7.21.6.5).

use std::io::{self, Write};

use super::PFormatError;

/// Destination for rendered output.
pub enum PFormatSink<'a> {
    /// Growable buffer; never truncates. This is the classic `sprintf`
    /// NOLIMIT contract — in C the caller guarantees sufficient space, here
    /// the Vec grows instead. Prefer [`PFormatSink::Bounded`] when a limit
    /// is known.
    Buffer(&'a mut Vec<u8>),
    /// Fixed-capacity buffer; excess output is silently discarded and
    /// shows up only in the tally.
    Bounded(&'a mut [u8]),
    /// Write-through stream; a write failure aborts the formatting call.
    Stream(&'a mut dyn Write),
}

impl std::fmt::Debug for PFormatSink<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PFormatSink::Buffer(b) => f.debug_tuple("Buffer").field(&b.len()).finish(),
            PFormatSink::Bounded(b) => f.debug_tuple("Bounded").field(&b.len()).finish(),
            PFormatSink::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// Sink plus accounting state for one formatting call.
#[derive(Debug)]
pub struct SinkWriter<'a> {
    sink: PFormatSink<'a>,
    /// Bytes actually stored (bounded sink only).
    written: usize,
    /// Bytes that would have been produced with unlimited capacity.
    tally: usize,
}

impl<'a> SinkWriter<'a> {
    pub fn new(sink: PFormatSink<'a>) -> Self {
        Self {
            sink,
            written: 0,
            tally: 0,
        }
    }

    /// Append a run of bytes.
    ///
    /// The tally advances by the full run length regardless of how much the
    /// sink accepts; only a stream write failure is an error.
    pub fn put(&mut self, bytes: &[u8]) -> Result<(), PFormatError> {
        self.tally += bytes.len();
        match &mut self.sink {
            PFormatSink::Buffer(buf) => {
                buf.extend_from_slice(bytes);
                self.written += bytes.len();
            }
            PFormatSink::Bounded(buf) => {
                let room = buf.len() - self.written;
                let take = bytes.len().min(room);
                buf[self.written..self.written + take].copy_from_slice(&bytes[..take]);
                self.written += take;
            }
            PFormatSink::Stream(w) => {
                w.write_all(bytes).map_err(PFormatError::Io)?;
                self.written += bytes.len();
            }
        }
        Ok(())
    }

    /// Append `count` copies of `byte` (padding).
    pub fn pad(&mut self, byte: u8, count: usize) -> Result<(), PFormatError> {
        let chunk = [byte; 64];
        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(chunk.len());
            self.put(&chunk[..n])?;
            remaining -= n;
        }
        Ok(())
    }

    /// The running tally so far (this is what `%n` stores and what the
    /// engine returns).
    pub fn tally(&self) -> usize {
        self.tally
    }

    /// Bytes actually delivered to the destination.
    pub fn written(&self) -> usize {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_sink_grows() {
        let mut out = Vec::new();
        let mut w = SinkWriter::new(PFormatSink::Buffer(&mut out));
        w.put(b"hello").unwrap();
        w.put(b" world").unwrap();
        assert_eq!(w.tally(), 11);
        assert_eq!(out, b"hello world");
    }

    #[test]
    fn bounded_sink_truncates_but_tallies() {
        let mut out = [0u8; 4];
        let mut w = SinkWriter::new(PFormatSink::Bounded(&mut out));
        w.put(b"hello").unwrap();
        assert_eq!(w.tally(), 5);
        assert_eq!(w.written(), 4);
        assert_eq!(&out, b"hell");
    }

    #[test]
    fn bounded_sink_capacity_zero() {
        let mut out: [u8; 0] = [];
        let mut w = SinkWriter::new(PFormatSink::Bounded(&mut out));
        w.put(b"hello").unwrap();
        w.pad(b' ', 3).unwrap();
        assert_eq!(w.tally(), 8);
        assert_eq!(w.written(), 0);
    }

    #[test]
    fn stream_sink_propagates_errors() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("pipe closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let mut broken = Broken;
        let mut w = SinkWriter::new(PFormatSink::Stream(&mut broken));
        assert!(matches!(w.put(b"x"), Err(PFormatError::Io(_))));
    }

    #[test]
    fn pad_emits_exact_count() {
        let mut out = Vec::new();
        let mut w = SinkWriter::new(PFormatSink::Buffer(&mut out));
        w.pad(b'0', 130).unwrap();
        assert_eq!(out.len(), 130);
        assert!(out.iter().all(|&b| b == b'0'));
    }
}
