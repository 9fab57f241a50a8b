use nms_core::color::CellStyle;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

/// Convert an engine style into a ratatui style.
///
/// # Example
/// ```
/// use nms_core::color::CellStyle;
/// use nms_render::canvas::to_style;
/// use ratatui::style::{Color, Modifier};
///
/// let style = to_style(CellStyle { fg: Some((1, 2, 3)), bold: true });
/// assert_eq!(style.fg, Some(Color::Rgb(1, 2, 3)));
/// assert!(style.add_modifier.contains(Modifier::BOLD));
/// ```
#[must_use]
pub fn to_style(style: CellStyle) -> Style {
    let fg = match style.fg {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::Reset,
    };
    let out = Style::default().fg(fg);
    if style.bold {
        out.add_modifier(Modifier::BOLD)
    } else {
        out
    }
}

/// Write one glyph into `buf`. Out-of-bounds positions are ignored.
#[inline]
pub fn put_glyph(buf: &mut Buffer, x: u16, y: u16, ch: char, style: CellStyle) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.reset();
        cell.set_char(ch).set_style(to_style(style));
    }
}

/// Copy the staged cells of `src` into `dst`, restricted to `area`.
///
/// Écriture directe cellule par cellule, pas de widget.
pub fn render_staged(dst: &mut Buffer, area: Rect, src: &Buffer) {
    let area = area.intersection(src.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let (Some(from), Some(to)) = (src.cell((x, y)), dst.cell_mut((x, y))) {
                to.clone_from(from);
            }
        }
    }
}
