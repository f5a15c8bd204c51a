//! Word tokenizer over raw bytes.
//!
//! A word starts at an ASCII letter and continues through letters and
//! apostrophes. Words are lowercased and lose any trailing apostrophes, so
//! `"Don't"` yields `don't` and `"dogs'"` yields `dogs`. Everything else,
//! including non-ASCII bytes, separates words.

/// Iterator over the normalized words of a byte slice.
#[derive(Clone, Debug)]
pub struct Words<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Words<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl<'a> Iterator for Words<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let rest = &self.bytes[self.pos..];
        let start = self.pos + rest.iter().position(u8::is_ascii_alphabetic)?;
        let len = self.bytes[start..]
            .iter()
            .position(|&b| !(b.is_ascii_alphabetic() || b == b'\''))
            .unwrap_or(self.bytes.len() - start);
        self.pos = start + len;

        let mut word = &self.bytes[start..start + len];
        while let [head @ .., b'\''] = word {
            word = head;
        }
        // only ASCII letters and apostrophes remain
        Some(word.iter().map(|b| b.to_ascii_lowercase() as char).collect())
    }
}

/// Tokenize `bytes`.
pub fn words(bytes: &[u8]) -> Words<'_> {
    Words::new(bytes)
}
