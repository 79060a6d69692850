//! Character encoding handling for byte input.
//!
//! Stored content is not always UTF-8. Bytes are decoded with the declared
//! charset (or a `<meta charset>` sniff, or UTF-8), processed as text, and
//! rewritten content is encoded back into the encoding it came in.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

use crate::patterns::CHARSET_META;
use crate::{Error, Result};

/// How far into the input the `<meta charset>` sniff looks.
const SNIFF_LIMIT: usize = 1024;

/// Text decoded from bytes, with the encoding it was decoded from.
#[derive(Debug, Clone)]
pub struct Decoded {
    /// The content as UTF-8.
    pub text: String,
    /// The encoding the bytes were in.
    pub encoding: &'static Encoding,
    /// Whether malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
    /// Whether the bytes started with a byte order mark.
    pub had_bom: bool,
}

impl Decoded {
    /// Encode `text` the way the decoded bytes were: same encoding, with the
    /// byte order mark restored if there was one.
    #[must_use]
    pub fn reencode(&self, text: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len() + 3);
        if self.had_bom {
            out.extend_from_slice(bom_for(self.encoding));
        }
        out.extend(encode(text, self.encoding));
        out
    }
}

/// Look up an encoding by its WHATWG label (`utf-8`, `latin1`, `sjis` ...).
///
/// # Errors
///
/// Returns [`Error::EncodingError`] for labels the encoding tables do not
/// know.
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::EncodingError(label.to_string()))
}

/// Find the encoding declared by a `<meta charset>` or
/// `<meta http-equiv="Content-Type">` near the start of the input.
#[must_use]
pub fn sniff_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(SNIFF_LIMIT)]);
    CHARSET_META
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Decode content bytes.
///
/// The encoding comes from, in order: `declared` (e.g. a stored charset
/// column), a BOM, a `<meta>` declaration, UTF-8.
///
/// # Errors
///
/// Returns [`Error::EncodingError`] if `declared` is not a known label.
pub fn decode(bytes: &[u8], declared: Option<&str>) -> Result<Decoded> {
    let fallback = match declared {
        Some(label) => encoding_for_label(label)?,
        None => sniff_encoding(bytes).unwrap_or(UTF_8),
    };

    // A BOM overrides both the declared label and the sniffed one.
    let (text, encoding, had_errors) = fallback.decode(bytes);
    Ok(Decoded {
        text: text.into_owned(),
        encoding,
        had_errors,
        had_bom: Encoding::for_bom(bytes).is_some(),
    })
}

/// Encode text back into `encoding`.
///
/// Characters the encoding cannot represent become numeric character
/// references, which is valid HTML in any charset. UTF-16 is written as
/// UTF-16 code units without a byte order mark; `encoding_rs` itself only
/// encodes to its UTF-8 output encoding for those.
#[must_use]
pub fn encode(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    if encoding == UTF_16LE {
        text.encode_utf16().flat_map(u16::to_le_bytes).collect()
    } else if encoding == UTF_16BE {
        text.encode_utf16().flat_map(u16::to_be_bytes).collect()
    } else {
        let (bytes, _, _) = encoding.encode(text);
        bytes.into_owned()
    }
}

fn bom_for(encoding: &'static Encoding) -> &'static [u8] {
    if encoding == UTF_16LE {
        &[0xFF, 0xFE]
    } else if encoding == UTF_16BE {
        &[0xFE, 0xFF]
    } else if encoding == UTF_8 {
        &[0xEF, 0xBB, 0xBF]
    } else {
        &[]
    }
}
