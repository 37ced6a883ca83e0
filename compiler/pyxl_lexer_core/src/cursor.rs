//! Character cursor over a borrowed `&str`.
//!
//! Positions are byte offsets so they can be used directly for slicing.
//! Every advance moves by a whole `char`, so a cursor position is always on a
//! UTF-8 boundary.

#[cfg(test)]
mod tests;

#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    /// Creates a cursor starting at byte offset `pos`.
    ///
    /// `pos` is clamped to the end of the source.
    pub fn at(src: &'a str, pos: usize) -> Self {
        Cursor {
            src,
            pos: pos.min(src.len()),
        }
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// The unconsumed remainder of the source.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    #[inline]
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character after the current one.
    pub fn peek(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    /// The character immediately before the cursor.
    pub fn prev(&self) -> Option<char> {
        self.src[..self.pos].chars().next_back()
    }

    pub fn starts_with(&self, needle: &str) -> bool {
        self.rest().starts_with(needle)
    }

    /// Consumes and returns the current character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes `needle` if the remainder starts with it.
    pub fn eat(&mut self, needle: &str) -> bool {
        if self.starts_with(needle) {
            self.pos += needle.len();
            true
        } else {
            false
        }
    }

    /// Consumes characters while `pred` holds and returns the consumed slice.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &self.src[start..self.pos]
    }

    /// Advances to the next occurrence of either byte, returning it.
    ///
    /// Leaves the cursor on the found byte, or at EOF when neither occurs.
    pub fn seek_either(&mut self, a: u8, b: u8) -> Option<u8> {
        let rest = self.rest().as_bytes();
        match memchr::memchr2(a, b, rest) {
            Some(offset) => {
                self.pos += offset;
                Some(rest[offset])
            }
            None => {
                self.pos = self.src.len();
                None
            }
        }
    }

    /// Slice between two byte offsets of the underlying source.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.src[start..end]
    }

    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.src[start..self.pos]
    }
}
