use rand::Rng;

use crate::error::CoreError;

/// Box-drawing and block glyphs appended by [`Charset::extended`].
pub const GLYPHS_LINE_DRAWING: &str = "─│┌┐└┘├┤┬┴┼═║╔╗╚╝╠╣╦╩╬░▒▓█▀▄▌▐";

/// Immutable set of scramble glyphs, built once at startup.
///
/// Every glyph is printable and not whitespace, and the set is never empty,
/// so [`Charset::sample`] always has something to return.
///
/// # Example
/// ```
/// use nms_core::charset::Charset;
/// use rand::SeedableRng;
///
/// let charset = Charset::ascii();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let ch = charset.sample(&mut rng);
/// assert!(ch.is_ascii_graphic());
/// ```
#[derive(Clone, Debug)]
pub struct Charset {
    glyphs: Vec<char>,
}

impl Charset {
    /// Visible ASCII, `!` through `~` (94 glyphs).
    #[must_use]
    pub fn ascii() -> Self {
        Self {
            glyphs: ('!'..='~').collect(),
        }
    }

    /// Visible ASCII plus line-drawing and block glyphs.
    ///
    /// # Example
    /// ```
    /// use nms_core::charset::Charset;
    /// assert!(Charset::extended().len() > Charset::ascii().len());
    /// ```
    #[must_use]
    pub fn extended() -> Self {
        let mut glyphs: Vec<char> = ('!'..='~').collect();
        glyphs.extend(GLYPHS_LINE_DRAWING.chars());
        Self { glyphs }
    }

    /// Build a charset from user-supplied glyphs.
    ///
    /// Whitespace and control characters are dropped, duplicates keep their
    /// first occurrence.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyCharset`] if no usable glyph remains.
    ///
    /// # Example
    /// ```
    /// use nms_core::charset::Charset;
    /// let charset = Charset::custom("a b\tca").unwrap();
    /// assert_eq!(charset.glyphs(), &['a', 'b', 'c']);
    /// assert!(Charset::custom("  \n").is_err());
    /// ```
    pub fn custom(glyphs: &str) -> Result<Self, CoreError> {
        let mut out: Vec<char> = Vec::new();
        for ch in glyphs.chars() {
            if ch.is_whitespace() || ch.is_control() || out.contains(&ch) {
                continue;
            }
            out.push(ch);
        }
        if out.is_empty() {
            return Err(CoreError::EmptyCharset);
        }
        Ok(Self { glyphs: out })
    }

    /// Uniformly random glyph from the set.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.glyphs[rng.gen_range(0..self.glyphs.len())]
    }

    /// Number of glyphs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always `false`: construction rejects empty sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The glyphs, in construction order.
    #[must_use]
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }
}
