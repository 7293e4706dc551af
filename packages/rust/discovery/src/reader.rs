//! Reading source files as text with an ordered encoding fallback.

use std::path::Path;

use doccombiner_shared::{DocCombinerError, Result, TextEncoding};
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read a file and decode it with the first encoding in `encodings` that
/// accepts its bytes.
pub fn read_text(path: &Path, encodings: &[TextEncoding]) -> Result<(String, TextEncoding)> {
    let bytes = std::fs::read(path).map_err(|e| DocCombinerError::io(path, e))?;

    match decode_text(&bytes, encodings) {
        Some((text, encoding)) => {
            if encoding != TextEncoding::Utf8 {
                debug!(path = %path.display(), %encoding, "decoded with fallback encoding");
            }
            Ok((text, encoding))
        }
        None => {
            let tried = encodings
                .iter()
                .map(|e| e.label())
                .collect::<Vec<_>>()
                .join(", ");
            warn!(path = %path.display(), %tried, "no encoding could decode file");
            Err(DocCombinerError::Decode {
                path: path.to_path_buf(),
                tried,
            })
        }
    }
}

/// Decode bytes with the first encoding that succeeds, in order.
///
/// Decoding is strict: an encoding that would need replacement characters
/// counts as a failure and the next one is tried. Latin-1 maps every byte,
/// so once it is in the list decoding cannot fail.
pub fn decode_text(bytes: &[u8], encodings: &[TextEncoding]) -> Option<(String, TextEncoding)> {
    encodings
        .iter()
        .find_map(|&encoding| decode_strict(bytes, encoding).map(|text| (text, encoding)))
}

fn decode_strict(bytes: &[u8], encoding: TextEncoding) -> Option<String> {
    match encoding {
        TextEncoding::Utf8 => {
            let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            encoding_rs::UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned())
        }
        TextEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        TextEncoding::Windows1252 => encoding_rs::WINDOWS_1252
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned()),
        TextEncoding::Ascii => {
            if bytes.is_ascii() {
                // ASCII is a subset of UTF-8, so this cannot fail.
                String::from_utf8(bytes.to_vec()).ok()
            } else {
                None
            }
        }
    }
}
