//! Field-width padding and justification.
//!
//! Every conversion reduces to a sign byte, a prefix run (`0x` and kin),
//! and a body; this module applies the width/flag rules uniformly on top.
//! Width is a minimum, never a truncation (C11 7.21.6.1p5).

use super::PFormatError;
use super::sink::SinkWriter;
use super::spec::ResolvedSpec;

/// The output of one conversion, before field padding.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Sign or sign-surrogate (`-`, `+`, space), if any.
    pub sign: Option<u8>,
    /// Base prefix placed between the sign and any zero padding.
    pub prefix: &'static [u8],
    /// Digits or characters, including precision-driven leading zeros.
    pub body: Vec<u8>,
    /// Whether the `0` flag may pad this conversion. False for strings,
    /// characters, and for integers with an explicit precision.
    pub zero_pad_ok: bool,
}

impl Rendered {
    pub fn body(body: Vec<u8>) -> Self {
        Rendered {
            sign: None,
            prefix: b"",
            body,
            zero_pad_ok: false,
        }
    }

    fn content_len(&self) -> usize {
        usize::from(self.sign.is_some()) + self.prefix.len() + self.body.len()
    }
}

/// Emit `rendered` padded to the resolved minimum width.
///
/// Zero padding goes after the sign and prefix; left justification always
/// pads with spaces on the right and overrides the `0` flag.
pub fn emit(
    writer: &mut SinkWriter<'_>,
    spec: &ResolvedSpec,
    rendered: &Rendered,
) -> Result<(), PFormatError> {
    let pad_total = spec.width.saturating_sub(rendered.content_len());
    let zero_fill = rendered.zero_pad_ok && spec.flags.zero_pad && !spec.flags.left_justify;

    if !spec.flags.left_justify && !zero_fill {
        writer.pad(b' ', pad_total)?;
    }
    if let Some(sign) = rendered.sign {
        writer.put(&[sign])?;
    }
    writer.put(rendered.prefix)?;
    if zero_fill {
        writer.pad(b'0', pad_total)?;
    }
    writer.put(&rendered.body)?;
    if spec.flags.left_justify {
        writer.pad(b' ', pad_total)?;
    }
    Ok(())
}
