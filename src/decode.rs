//! Frame decoding for the chunked analysis feed.
//!
//! The transport delivers raw bytes in arbitrarily-sized chunks; a logical
//! frame is one newline-terminated line. This module reassembles frames
//! across chunk boundaries.
//!
//! Wire format:
//! ```text
//! data: {"text": "partial output"}
//!
//! data: {"text": "more output"}
//!
//! data: [DONE]
//! ```

use bytes::BytesMut;

/// Reserved payload value signaling normal stream termination.
pub const DONE_MARKER: &str = "[DONE]";

/// Prefix carried by every frame that is an event.
const DATA_PREFIX: &str = "data: ";

/// Incremental line decoder.
///
/// Feed it chunks in arrival order; it returns every complete frame the
/// chunk closes, in order, and holds any unterminated remainder until the
/// next chunk. The buffer is bytes, not text, so a multi-byte UTF-8
/// sequence split across chunks reassembles before conversion.
///
/// An unterminated tail left over when the transport ends is never emitted:
/// a frame only exists once its delimiter arrives.
///
/// # Example
/// ```
/// use mailsift::decode::FrameDecoder;
///
/// let mut decoder = FrameDecoder::new();
/// assert!(decoder.feed(b"data: {\"text\": \"he").is_empty());
/// assert_eq!(
///     decoder.feed(b"llo\"}\n"),
///     vec!["data: {\"text\": \"hello\"}".to_string()],
/// );
/// ```
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: BytesMut,
}

impl FrameDecoder {
    /// Create a decoder with an empty partial buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every frame it completes, in order.
    ///
    /// An empty chunk completes nothing and leaves the buffer untouched.
    /// A chunk that is only a delimiter completes one empty frame, which
    /// the dispatcher later discards as a non-event.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line = self.buffer.split_to(pos + 1);
            // Everything before the delimiter is one frame.
            let frame = String::from_utf8_lossy(&line[..pos]).trim().to_string();
            frames.push(frame);
        }
        frames
    }

    /// Whether an unterminated tail is pending.
    pub fn has_partial(&self) -> bool {
        !self.buffer.is_empty()
    }
}

/// Extract the payload of a frame.
///
/// Frames are in the form `data: <payload>`; anything else (blank padding
/// lines included) is not an event.
///
/// # Example
/// ```
/// use mailsift::decode::data_payload;
///
/// assert_eq!(data_payload("data: {\"text\": \"ok\"}"), Some("{\"text\": \"ok\"}"));
/// assert_eq!(data_payload(""), None);
/// assert_eq!(data_payload("retry: 3000"), None);
/// ```
pub fn data_payload(frame: &str) -> Option<&str> {
    frame.strip_prefix(DATA_PREFIX).map(|s| s.trim())
}

/// Check whether a payload is the stream-termination sentinel.
///
/// # Example
/// ```
/// use mailsift::decode::is_done_marker;
///
/// assert!(is_done_marker("[DONE]"));
/// assert!(!is_done_marker("{\"text\": \"[DONE]\"}"));
/// ```
pub fn is_done_marker(payload: &str) -> bool {
    payload == DONE_MARKER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chunk_single_frame() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.feed(b"data: hello\n"), vec!["data: hello"]);
        assert!(!decoder.has_partial());
    }

    #[test]
    fn test_frame_split_across_chunks() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(b"data: {\"text\": \"Tr").is_empty());
        assert!(decoder.has_partial());
        assert_eq!(
            decoder.feed(b"ying model: gpt-4\"}\n"),
            vec!["data: {\"text\": \"Trying model: gpt-4\"}"]
        );
        assert!(!decoder.has_partial());
    }

    #[test]
    fn test_many_frames_in_one_chunk() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(
            decoder.feed(b"data: a\ndata: b\ndata: c\n"),
            vec!["data: a", "data: b", "data: c"]
        );
    }

    #[test]
    fn test_empty_chunk_is_a_noop() {
        let mut decoder = FrameDecoder::new();
        decoder.feed(b"data: part");
        assert!(decoder.feed(b"").is_empty());
        assert_eq!(decoder.feed(b"ial\n"), vec!["data: partial"]);
    }

    #[test]
    fn test_delimiter_only_chunk_yields_empty_frame() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.feed(b"\n"), vec![""]);
        assert!(!decoder.has_partial());
    }

    #[test]
    fn test_unterminated_tail_is_retained_not_emitted() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.feed(b"data: done\ndata: dangling"), vec!["data: done"]);
        assert!(decoder.has_partial());
    }

    #[test]
    fn test_split_invariance() {
        let input = b"data: {\"text\": \"one\"}\n\ndata: {\"text\": \"two\"}\ndata: [DONE]\n";

        let mut whole = FrameDecoder::new();
        let expected = whole.feed(input);

        // Byte at a time.
        let mut bytewise = FrameDecoder::new();
        let mut got = Vec::new();
        for b in input {
            got.extend(bytewise.feed(std::slice::from_ref(b)));
        }
        assert_eq!(got, expected);

        // A few uneven splits.
        for split in [1, 7, input.len() - 1] {
            let mut decoder = FrameDecoder::new();
            let mut got = decoder.feed(&input[..split]);
            got.extend(decoder.feed(&input[split..]));
            assert_eq!(got, expected, "split at {split}");
        }
    }

    #[test]
    fn test_multibyte_utf8_split_across_chunks() {
        let mut decoder = FrameDecoder::new();
        let bytes = "data: héllo\n".as_bytes();
        // Split inside the two-byte 'é'.
        let mid = 7;
        assert!(decoder.feed(&bytes[..mid]).is_empty());
        assert_eq!(decoder.feed(&bytes[mid..]), vec!["data: héllo"]);
    }

    #[test]
    fn test_data_payload() {
        assert_eq!(data_payload("data: hello"), Some("hello"));
        assert_eq!(
            data_payload("data: {\"key\": \"value\"}"),
            Some("{\"key\": \"value\"}")
        );
        assert_eq!(data_payload("data:   spaces  "), Some("spaces"));
        assert_eq!(data_payload(""), None);
        assert_eq!(data_payload("event: ping"), None);
    }

    #[test]
    fn test_is_done_marker() {
        assert!(is_done_marker("[DONE]"));
        assert!(!is_done_marker(""));
        assert!(!is_done_marker("{\"text\": \"value\"}"));
    }
}
