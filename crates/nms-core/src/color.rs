use crate::error::CoreError;

/// RGB triple, `(r, g, b)`.
pub type Rgb = (u8, u8, u8);

/// Style attached to a glyph when it is handed to the renderer.
///
/// The engine never interprets it; it only picks the scrambled or the
/// revealed style and passes it through.
///
/// # Example
/// ```
/// use nms_core::color::CellStyle;
/// let style = CellStyle::default();
/// assert!(style.fg.is_none());
/// assert!(!style.bold);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellStyle {
    /// Foreground colour. `None` = terminal default.
    pub fg: Option<Rgb>,
    /// Bold weight.
    pub bold: bool,
}

impl CellStyle {
    /// Style with the given foreground colour.
    #[must_use]
    pub fn fg(color: Rgb) -> Self {
        Self {
            fg: Some(color),
            bold: false,
        }
    }
}

/// Named colours accepted on the command line and in config files.
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("black", (0, 0, 0)),
    ("red", (205, 49, 49)),
    ("green", (13, 188, 121)),
    ("yellow", (229, 229, 16)),
    ("blue", (36, 114, 200)),
    ("magenta", (188, 63, 188)),
    ("cyan", (17, 168, 205)),
    ("white", (229, 229, 229)),
];

/// Parse a colour name (`"cyan"`) or a hex triple (`"#00ff88"`).
///
/// # Errors
/// Returns [`CoreError::Config`] if the value is neither.
///
/// # Example
/// ```
/// use nms_core::color::parse_color;
/// assert_eq!(parse_color("#ff8000").unwrap(), (255, 128, 0));
/// assert_eq!(parse_color("Black").unwrap(), (0, 0, 0));
/// assert!(parse_color("mauve-ish").is_err());
/// ```
pub fn parse_color(value: &str) -> Result<Rgb, CoreError> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
            if let (Ok(r), Ok(g), Ok(b)) = (channel(0), channel(2), channel(4)) {
                return Ok((r, g, b));
            }
        }
        return Err(CoreError::Config(format!("bad hex colour '{value}'")));
    }

    let lower = value.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|&(_, rgb)| rgb)
        .ok_or_else(|| CoreError::Config(format!("unknown colour '{value}'")))
}
