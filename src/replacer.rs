/// One span replacement: bytes `start..end` of the original buffer are
/// dropped and `text` is emitted in their place.
#[derive(Debug, Clone)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Splices a set of edits into a source buffer in a single forward pass.
/// Every byte outside an edited span is reproduced verbatim. Edits must be
/// sorted by ascending start offset and must not overlap; the selector and
/// normalizer both produce spans that satisfy this.
pub fn splice(source: &[u8], edits: &[Edit]) -> Vec<u8> {
    let mut out = Vec::with_capacity(source.len());
    let mut cursor = 0usize;
    for edit in edits {
        debug_assert!(edit.start >= cursor, "edits out of order");
        debug_assert!(edit.end <= source.len(), "edit past end of buffer");
        out.extend_from_slice(&source[cursor..edit.start]);
        out.extend_from_slice(edit.text.as_bytes());
        cursor = edit.end;
    }
    out.extend_from_slice(&source[cursor..]);
    out
}
