/// Turns arbitrary byte chunks into complete, newline-terminated lines.
///
/// Bytes are buffered until a `\n` arrives and only then decoded, so a
/// multi-byte UTF-8 character split across chunks is always reassembled
/// before decoding. Invalid UTF-8 is replaced with U+FFFD. A trailing `\r`
/// is stripped from every line.
#[derive(Debug, Default)]
pub struct LineFramer {
    pending: Vec<u8>,
}

impl LineFramer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every line it completed, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let scan_from = self.pending.len();
        self.pending.extend_from_slice(chunk);

        let Some(offset) = self.pending[scan_from..]
            .iter()
            .rposition(|byte| *byte == b'\n')
        else {
            return Vec::new();
        };

        let carry = self.pending.split_off(scan_from + offset + 1);
        let complete = std::mem::replace(&mut self.pending, carry);

        complete[..complete.len() - 1]
            .split(|byte| *byte == b'\n')
            .map(decode_line)
            .collect()
    }

    /// Bytes received since the last line break.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Consume the framer at end of input. Returns the unterminated trailing
    /// fragment, if any, so the caller can report what it is dropping.
    #[must_use]
    pub fn finish(self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(decode_line(&self.pending))
        }
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
