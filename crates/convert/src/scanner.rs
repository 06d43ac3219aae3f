//! Pixel scanner
//!
//! Splits a value into segments in a single left-to-right pass. At each
//! position the scanner tries, in order, a double-quoted span, a
//! single-quoted span, a `url(...)` span and a pixel length; the first one
//! found wins and scanning resumes after it. Quoted and url spans are never
//! looked into, so `"10px"` and `url(10px.png)` survive untouched.
//!
//! The grammar mirrors `"[^"]+"|'[^']+'|url\([^)]+\)|(\d*\.?\d+)px`,
//! case-insensitive, with leftmost-first matching.

/// What a segment of scanned text is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentKind {
    /// Plain text between matches
    Literal,
    /// A double- or single-quoted span, quotes included
    Quoted,
    /// A `url(...)` span
    Url,
    /// A pixel length, carrying the parsed magnitude
    Pixel(f64),
}

/// A slice of the scanned text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    /// Byte offset of the segment in the scanned text
    pub start: usize,
    pub text: &'a str,
}

impl<'a> Segment<'a> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Bytes that close a span: `"`, `'` and `)`
const CLOSERS: [u8; 3] = [b'"', b'\'', b')'];

/// Iterator over the segments of a value
///
/// Concatenating the `text` of every segment yields the input exactly.
/// Runs in time linear in the length of the text.
pub struct Scanner<'a> {
    text: &'a str,
    position: usize,
    pending: Option<Segment<'a>>,
    /// Per entry of `CLOSERS`: already known not to occur again
    exhausted: [bool; 3],
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, position: 0, pending: None, exhausted: [false; 3] }
    }

    /// Find the next quoted, url or pixel match at or after `from`
    fn find_match(&mut self, from: usize) -> Option<Segment<'a>> {
        let text = self.text;
        let bytes = text.as_bytes();
        let mut start = from;

        while start < bytes.len() {
            if let Some((kind, end)) = self.match_at(start) {
                return Some(Segment { kind, start, text: &text[start..end] });
            }
            // No later start inside the same digit run can match either
            start = skip_digits(bytes, start).max(start + 1);
        }

        None
    }

    /// Try each alternative at `start`, returning the kind and end offset
    fn match_at(&mut self, start: usize) -> Option<(SegmentKind, usize)> {
        let text = self.text;
        let bytes = text.as_bytes();
        match bytes[start] {
            quote @ (b'"' | b'\'') => {
                let close = self.find_closer(start + 1, quote)?;
                (close > start + 1).then_some((SegmentKind::Quoted, close + 1))
            }
            b'u' | b'U' => {
                const OPEN: &[u8] = b"url(";
                let head = bytes.get(start..start + OPEN.len())?;
                if !head.eq_ignore_ascii_case(OPEN) {
                    return None;
                }
                let body = start + OPEN.len();
                let close = self.find_closer(body, b')')?;
                (close > body).then_some((SegmentKind::Url, close + 1))
            }
            b'0'..=b'9' | b'.' => pixel_match(bytes, start),
            _ => None,
        }
    }

    /// Offset of the first `closer` at or after `from`. A failed search is
    /// remembered, so the rest of the text is searched at most once per
    /// closer.
    fn find_closer(&mut self, from: usize, closer: u8) -> Option<usize> {
        let slot = CLOSERS.iter().position(|&b| b == closer)?;
        if self.exhausted[slot] {
            return None;
        }

        let found = self.text.as_bytes().get(from..)?.iter().position(|&b| b == closer);
        if found.is_none() {
            self.exhausted[slot] = true;
        }
        found.map(|offset| from + offset)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(segment) = self.pending.take() {
            self.position = segment.end();
            return Some(segment);
        }

        let start = self.position;
        if start >= self.text.len() {
            return None;
        }

        match self.find_match(start) {
            Some(segment) if segment.start == start => {
                self.position = segment.end();
                Some(segment)
            }
            Some(segment) => {
                self.position = segment.start;
                self.pending = Some(segment);
                Some(Segment { kind: SegmentKind::Literal, start, text: &self.text[start..segment.start] })
            }
            None => {
                self.position = self.text.len();
                Some(Segment { kind: SegmentKind::Literal, start, text: &self.text[start..] })
            }
        }
    }
}

/// `\d*\.?\d+px`
fn pixel_match(bytes: &[u8], start: usize) -> Option<(SegmentKind, usize)> {
    let int_end = skip_digits(bytes, start);

    let number_end = if bytes.get(int_end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, int_end + 1);
        if frac_end == int_end + 1 {
            return None;
        }
        frac_end
    } else if int_end > start {
        int_end
    } else {
        return None;
    };

    let suffix = bytes.get(number_end..number_end + 2)?;
    if !suffix.eq_ignore_ascii_case(b"px") {
        return None;
    }

    // ASCII digits and '.' only, always valid UTF-8 and a valid float
    let number = std::str::from_utf8(&bytes[start..number_end]).ok()?;
    let pixels = number.parse::<f64>().ok()?;
    Some((SegmentKind::Pixel(pixels), number_end + 2))
}

fn skip_digits(bytes: &[u8], from: usize) -> usize {
    from + bytes.get(from..).unwrap_or_default().iter().take_while(|b| b.is_ascii_digit()).count()
}
