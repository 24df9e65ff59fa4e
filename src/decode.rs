use std::borrow::Cow;

use encoding_rs::{UTF_8, WINDOWS_1256};
use log::warn;

/// Valid UTF-8 passes straight through, minus a leading byte-order mark;
/// anything else is taken to be Windows-1256.
pub fn decode(raw: &[u8]) -> Cow<str> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(raw);
    if !had_errors {
        return text;
    }

    warn!("input is not valid UTF-8, decoding it as windows-1256");
    let (text, _) = WINDOWS_1256.decode_without_bom_handling(raw);
    text
}
