//! Source File Reading
//!
//! Reads source files trying a prioritized list of text encodings: UTF-8
//! first, then two Latin-family fallbacks. The first clean decode wins, so a
//! file that decodes under more than one encoding always yields the same
//! text regardless of which one matched first.

use std::path::Path;

use encoding_rs::{Encoding, ISO_8859_15, WINDOWS_1252};
use tracing::debug;

use testforge_core::{CoreError, CoreResult};

/// Read a source file, decoding with the first encoding that succeeds.
///
/// Returns the decoded text, possibly empty; empty files are the caller's
/// concern, not a read failure. Fails with a decode error naming the file
/// when every supported encoding reports errors.
pub fn read_source(path: &Path) -> CoreResult<String> {
    let bytes = std::fs::read(path)?;

    if let Ok(content) = std::str::from_utf8(&bytes) {
        debug!(file = %path.display(), encoding = "utf-8", "read source file");
        return Ok(content.to_string());
    }

    // Fallback encodings tried after UTF-8, in priority order
    let fallbacks: [&'static Encoding; 2] = [WINDOWS_1252, ISO_8859_15];
    for encoding in fallbacks {
        let (content, _, had_errors) = encoding.decode(&bytes);
        if !had_errors {
            debug!(file = %path.display(), encoding = encoding.name(), "read source file");
            return Ok(content.into_owned());
        }
    }

    Err(CoreError::decode(path))
}
