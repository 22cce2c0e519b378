//! Incremental decoder for server-sent completion events

use super::types::StreamChunk;

#[derive(Debug, Clone, PartialEq)]
pub enum SseEvent {
    /// A non-empty piece of generated text
    Delta(String),
    /// The `[DONE]` terminator
    Done,
}

/// Splits an SSE byte stream into events.
///
/// Network chunks may end mid-line (or mid-codepoint), so bytes are buffered
/// until a newline arrives.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes, returning every event completed by them
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(event) = parse_line(&String::from_utf8_lossy(&line)) {
                events.push(event);
            }
        }
        events
    }

    /// Flush a trailing line that was not newline-terminated
    pub fn finish(&mut self) -> Option<SseEvent> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.buffer);
        parse_line(&String::from_utf8_lossy(&line))
    }
}

/// Parse one SSE line. Comments, other fields and invalid JSON are skipped.
fn parse_line(line: &str) -> Option<SseEvent> {
    let data = line.trim().strip_prefix("data:")?.trim_start();
    if data == "[DONE]" {
        return Some(SseEvent::Done);
    }

    let chunk: StreamChunk = serde_json::from_str(data).ok()?;
    let content = chunk.choices.into_iter().next()?.delta?.content?;
    if content.is_empty() {
        None
    } else {
        Some(SseEvent::Delta(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta_line(text: &str) -> String {
        format!(
            "data: {}\n",
            serde_json::json!({"choices": [{"delta": {"content": text}}]})
        )
    }

    #[test]
    fn test_decodes_complete_lines() {
        let mut decoder = SseDecoder::new();
        let input = format!("{}{}data: [DONE]\n", delta_line("Hel"), delta_line("lo"));

        let events = decoder.push(input.as_bytes());
        assert_eq!(
            events,
            vec![
                SseEvent::Delta("Hel".to_string()),
                SseEvent::Delta("lo".to_string()),
                SseEvent::Done
            ]
        );
    }

    #[test]
    fn test_buffers_partial_lines() {
        let mut decoder = SseDecoder::new();
        let line = delta_line("split");
        let (head, tail) = line.split_at(10);

        assert!(decoder.push(head.as_bytes()).is_empty());
        assert_eq!(
            decoder.push(tail.as_bytes()),
            vec![SseEvent::Delta("split".to_string())]
        );
    }

    #[test]
    fn test_skips_noise() {
        let mut decoder = SseDecoder::new();
        let input = ": keep-alive\n\nevent: ping\ndata: {not json}\ndata: {\"choices\":[{\"delta\":{}}]}\n";
        assert!(decoder.push(input.as_bytes()).is_empty());
    }

    #[test]
    fn test_finish_flushes_unterminated_line() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: [DONE]").is_empty());
        assert_eq!(decoder.finish(), Some(SseEvent::Done));
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        let line = delta_line("é");
        let bytes = line.as_bytes();
        let cut = bytes.iter().position(|b| *b >= 0x80).unwrap() + 1;

        assert!(decoder.push(&bytes[..cut]).is_empty());
        assert_eq!(
            decoder.push(&bytes[cut..]),
            vec![SseEvent::Delta("é".to_string())]
        );
    }
}
