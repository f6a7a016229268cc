use std::fmt;

/// One keyword occurrence in a scanned text.
///
/// `begin` and `end` are `char` offsets: the keyword occupies
/// `text.chars().skip(begin).take(end - begin)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit<'a, V> {
    pub(crate) begin: usize,
    pub(crate) end: usize,
    pub(crate) pattern: u32,
    pub(crate) value: &'a V,
}

impl<'a, V> Hit<'a, V> {
    /// Offset of the first `char` of the keyword.
    #[inline]
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Offset one past the last `char` of the keyword.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Pattern id (dictionary position) of the keyword.
    #[inline]
    pub fn pattern(&self) -> u32 {
        self.pattern
    }

    /// Payload registered for the keyword.
    #[inline]
    pub fn value(&self) -> &'a V {
        self.value
    }
}

impl<V: fmt::Display> fmt::Display for Hit<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]={}", self.begin, self.end, self.value)
    }
}
