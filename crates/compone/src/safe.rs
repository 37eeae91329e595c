//! Safe (already escaped) text and the escaping primitive.

use std::fmt;
use std::ops::{Add, AddAssign, Mul};

/// Text that is known to be safe to emit verbatim.
///
/// Concatenation and repetition keep the marker: the result of joining two
/// safe strings is still safe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SafeString(String);

impl SafeString {
    /// An empty safe string.
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Mark `text` as safe without escaping it.
    ///
    /// The caller vouches that `text` contains finished markup.
    pub fn trusted(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Append another safe string in place.
    pub fn push_safe(&mut self, other: &SafeString) {
        self.0.push_str(&other.0);
    }

    /// Repeat the text `times` times.
    pub fn repeat(&self, times: usize) -> SafeString {
        Self(self.0.repeat(times))
    }

    pub fn contains(&self, pat: char) -> bool {
        self.0.contains(pat)
    }
}

impl fmt::Display for SafeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SafeString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SafeString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Add for SafeString {
    type Output = SafeString;

    fn add(mut self, rhs: SafeString) -> SafeString {
        self.0.push_str(&rhs.0);
        self
    }
}

impl Add<&SafeString> for SafeString {
    type Output = SafeString;

    fn add(mut self, rhs: &SafeString) -> SafeString {
        self.0.push_str(&rhs.0);
        self
    }
}

impl AddAssign<&SafeString> for SafeString {
    fn add_assign(&mut self, rhs: &SafeString) {
        self.0.push_str(&rhs.0);
    }
}

impl Mul<usize> for &SafeString {
    type Output = SafeString;

    fn mul(self, rhs: usize) -> SafeString {
        self.repeat(rhs)
    }
}

impl FromIterator<SafeString> for SafeString {
    fn from_iter<I: IntoIterator<Item = SafeString>>(iter: I) -> Self {
        let mut out = SafeString::new();
        for part in iter {
            out.0.push_str(&part.0);
        }
        out
    }
}

/// Anything that can be turned into safe text.
///
/// Plain text is escaped; already safe text passes through unchanged.
pub trait Escape {
    fn escape(&self) -> SafeString;
}

impl Escape for str {
    fn escape(&self) -> SafeString {
        SafeString(escape_text(self))
    }
}

impl Escape for String {
    fn escape(&self) -> SafeString {
        self.as_str().escape()
    }
}

impl Escape for SafeString {
    fn escape(&self) -> SafeString {
        self.clone()
    }
}

/// Escape `value` for inclusion in HTML text or attribute values.
pub fn escape<T: Escape + ?Sized>(value: &T) -> SafeString {
    value.escape()
}

/// Escape HTML special characters, including both quote characters.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
