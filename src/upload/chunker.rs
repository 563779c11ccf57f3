//! Splits a payload into contiguous, bounded slices.

/// Maximum slice size: 50 KiB of characters.
pub const MAX_SLICE_SIZE: usize = 50 * 1024;

/// Lazy iterator over `max_chars`-sized slices of a string.
///
/// Slices never split a character. An empty payload yields no slices.
/// A clone is an independent cursor at the same position; calling [`slices`]
/// again restarts from the first slice.
#[derive(Debug, Clone)]
pub struct Slices<'a> {
    rest: &'a str,
    max_chars: usize,
}

pub fn slices(payload: &str, max_chars: usize) -> Slices<'_> {
    assert!(max_chars > 0, "slice size must be non-zero");
    Slices {
        rest: payload,
        max_chars,
    }
}

/// Number of slices [`slices`] yields for a payload of `len_chars` characters.
pub fn slice_count(len_chars: usize, max_chars: usize) -> usize {
    len_chars.div_ceil(max_chars)
}

impl<'a> Iterator for Slices<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let end = self
            .rest
            .char_indices()
            .nth(self.max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(self.rest.len());

        let (slice, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_large_payload_into_three_blocks() {
        let payload = "A".repeat(120_000);
        let sizes: Vec<usize> = slices(&payload, MAX_SLICE_SIZE).map(str::len).collect();

        assert_eq!(sizes, vec![51_200, 51_200, 17_600]);
        assert_eq!(slice_count(payload.len(), MAX_SLICE_SIZE), 3);
    }

    #[test]
    fn concatenation_reproduces_payload() {
        for len in [1usize, 2, 6, 7, 12, 13, 100] {
            let payload: String = (0..len).map(|i| (b'a' + (i % 26) as u8) as char).collect();
            let parts: Vec<&str> = slices(&payload, 6).collect();

            assert_eq!(parts.concat(), payload);
            assert_eq!(parts.len(), slice_count(len, 6));
            assert!(parts.iter().all(|p| !p.is_empty() && p.len() <= 6));
        }
    }

    #[test]
    fn empty_payload_yields_no_slices() {
        assert_eq!(slices("", MAX_SLICE_SIZE).count(), 0);
        assert_eq!(slice_count(0, MAX_SLICE_SIZE), 0);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_slice() {
        let payload = "x".repeat(12);
        let parts: Vec<&str> = slices(&payload, 4).collect();
        assert_eq!(parts, vec!["xxxx", "xxxx", "xxxx"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let payload = "ééé";
        let parts: Vec<&str> = slices(payload, 2).collect();
        assert_eq!(parts, vec!["éé", "é"]);
    }

    #[test]
    fn sequence_is_restartable() {
        let payload = "abcdefg";
        let first = slices(payload, 3);
        let again = first.clone();
        assert_eq!(first.collect::<Vec<_>>(), again.collect::<Vec<_>>());
    }
}
