//! Extractive summarization
//!
//! Reduces a block of text to its first N sentences. The boundary rule
//! is purely lexical: a sentence ends at `.`, `!` or `?` followed by
//! one or more spaces, with the terminator kept on the preceding
//! segment. Abbreviations and decimal numbers will mis-split; that is
//! accepted for snippet text, which is short and already fragmentary.

/// Split text into sentence-like segments.
///
/// The terminator character stays with its segment. Trailing text
/// without a terminator forms the final segment.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?') {
            // Consume the run of terminators, then require at least one space
            let mut end = i + 1;
            while end < bytes.len() && matches!(bytes[end], b'.' | b'!' | b'?') {
                end += 1;
            }
            if end < bytes.len() && bytes[end] == b' ' {
                segments.push(&text[start..end]);
                // Skip the delimiting spaces; they are not part of any segment
                while end < bytes.len() && bytes[end] == b' ' {
                    end += 1;
                }
                start = end;
            }
            i = end;
        } else {
            i += 1;
        }
    }

    if start < text.len() {
        segments.push(&text[start..]);
    }

    segments
}

/// Summarize text to at most `max_sentences` sentences.
///
/// Takes the first `max_sentences` segments as defined by
/// [`split_sentences`], rejoins them with single spaces, and trims
/// surrounding whitespace. Pure function: no I/O, no failure modes.
/// Returns the empty string when `max_sentences` is 0 or `text` is
/// empty.
#[must_use]
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let sentences = split_sentences(text);
    let taken = &sentences[..max_sentences.min(sentences.len())];
    taken.join(" ").trim().to_string()
}
