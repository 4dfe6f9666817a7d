use alloc::vec::Vec;

/// Split `payload` into chunks of at most `size` bytes without breaking
/// UTF-8 code points.
///
/// # Panics
///
/// Panics if `size` is zero.
#[must_use]
pub fn chunks_of(payload: &str, size: usize) -> Vec<&str> {
    assert!(size > 0);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < payload.len() {
        let mut end = core::cmp::min(start + size, payload.len());
        while end < payload.len() && !payload.is_char_boundary(end) {
            end += 1;
        }
        chunks.push(&payload[start..end]);
        start = end;
    }
    chunks
}

/// Return the prefixes of `payload` converging at chunk granularity.
///
/// # Panics
///
/// Panics if `size` is zero.
#[must_use]
pub fn prefixes_of(payload: &str, size: usize) -> Vec<&str> {
    let chunks = chunks_of(payload, size);
    let mut prefixes = Vec::with_capacity(chunks.len());
    let mut end = 0;
    for chunk in chunks {
        end += chunk.len();
        prefixes.push(&payload[..end]);
    }
    prefixes
}
