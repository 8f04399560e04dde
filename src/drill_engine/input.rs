/// Longest keypad entry that always parses as a `u32`.
pub const MAX_INPUT_DIGITS: usize = 9;

/// Keypad entry for the current problem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerBuffer {
    digits: String,
    max_len: usize,
}

impl AnswerBuffer {
    pub fn new(max_len: usize) -> Self {
        AnswerBuffer { digits: String::new(), max_len }
    }

    /// Append a digit. Non-digits and overflow are dropped; returns whether
    /// the buffer changed.
    pub fn push(&mut self, key: char) -> bool {
        if !key.is_ascii_digit() || self.digits.len() >= self.max_len {
            return false;
        }
        self.digits.push(key);
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.digits.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// `None` for an empty buffer.
    pub fn parse(&self) -> Option<u32> {
        self.digits.parse().ok()
    }
}
