//! Code Block Extraction
//!
//! Model responses wrap generated test code in Markdown fences. This module
//! pulls out the body of the first fenced block with an explicit
//! found/not-found result: malformed input yields `None`, never a panic or
//! a nonsensical slice.

/// Fence marker for a Python-tagged code block.
const PYTHON_FENCE: &str = "```python";

/// Bare fence marker.
const FENCE: &str = "```";

/// Extract the body of the first fenced code block in `text`, trimmed of
/// surrounding whitespace.
///
/// A `python`-tagged fence is preferred; otherwise the first bare fence is
/// used, with the remainder of the fence line treated as a language tag.
/// Returns `None` when there is no opening fence or the opening fence is
/// never closed.
pub fn extract_code_block(text: &str) -> Option<String> {
    let body_start = match text.find(PYTHON_FENCE) {
        Some(start) => start + PYTHON_FENCE.len(),
        None => {
            let start = text.find(FENCE)? + FENCE.len();
            // Skip the rest of the fence line (language tag, if any)
            match text[start..].find('\n') {
                Some(newline) => start + newline + 1,
                None => return None,
            }
        }
    };

    let rest = &text[body_start..];
    let body_end = rest.find(FENCE)?;
    Some(rest[..body_end].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_python_tagged_block() {
        let text = "Here are the tests:\n```python\nimport pytest\n\ndef test_x():\n    assert True\n```\nDone.";
        let body = extract_code_block(text).unwrap();
        assert_eq!(body, "import pytest\n\ndef test_x():\n    assert True");
    }

    #[test]
    fn test_extracts_bare_fence_with_tag() {
        let text = "```py\nx = 1\n```";
        assert_eq!(extract_code_block(text).unwrap(), "x = 1");
    }

    #[test]
    fn test_no_fence_returns_none() {
        assert_eq!(extract_code_block("just prose, no code"), None);
    }

    #[test]
    fn test_unterminated_fence_returns_none() {
        assert_eq!(extract_code_block("```python\ndef f(): pass"), None);
    }

    #[test]
    fn test_empty_input_returns_none() {
        assert_eq!(extract_code_block(""), None);
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let text = "```python\n\n  x = 1  \n\n```";
        assert_eq!(extract_code_block(text).unwrap(), "x = 1");
    }

    #[test]
    fn test_prefers_python_fence_over_earlier_bare_fence() {
        let text = "```\nprose sample\n```\n```python\nreal = 1\n```";
        assert_eq!(extract_code_block(text).unwrap(), "real = 1");
    }

    #[test]
    fn test_only_first_block_is_returned() {
        let text = "```python\nfirst = 1\n```\n```python\nsecond = 2\n```";
        assert_eq!(extract_code_block(text).unwrap(), "first = 1");
    }
}
