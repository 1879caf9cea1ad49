use std::io::Write;

use keyanim_core::{Colour, LightDriver, PhysicalDisplay, Point};

/// Each key is drawn as two terminal columns.
const KEY_CELL: &[u8] = b"  ";
/// Keys that exist but are dark this frame.
const UNLIT: Colour = Colour::new(0x20, 0x20, 0x28);

/// Draws frames as a coloured grid in the terminal instead of driving a keyboard.
/// Group directives have no grid cell and are not drawn.
pub struct PreviewDriver<W: Write> {
    out: W,
    buf: Vec<u8>,
    origin_row: u16,
}

impl<W: Write> PreviewDriver<W> {
    /// `origin_row` is the 1-based terminal row of the top of the grid.
    pub fn new(out: W, origin_row: u16) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(4096),
            origin_row,
        }
    }
}

impl<W: Write> LightDriver for PreviewDriver<W> {
    fn emit(&mut self, frame: &PhysicalDisplay<'_>) -> keyanim_core::Result<()> {
        render_frame(frame, self.origin_row, &mut self.buf);
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Terminal columns and rows needed to show a `width` x `height` grid,
/// clamped to what a terminal can report.
pub fn required_size(width: i32, height: i32) -> (u16, u16) {
    let cols = u16::try_from(i64::from(width) * 2).unwrap_or(u16::MAX);
    let rows = u16::try_from(height).unwrap_or(u16::MAX);
    (cols, rows)
}

/// Render a frame to an ANSI byte buffer, one grid row per terminal row.
pub fn render_frame(frame: &PhysicalDisplay<'_>, origin_row: u16, buf: &mut Vec<u8>) {
    buf.clear();
    let mapper = frame.mapper();

    for y in 0..frame.height() {
        let row = u16::try_from(y).map_or(u16::MAX, |y| origin_row.saturating_add(y));
        write_cursor_pos(buf, row, 1);
        let mut prev: Option<Colour> = None;
        for x in 0..frame.width() {
            let colour = mapper
                .resolve(Point::from((x, y)))
                .map(|key| frame.get(key).unwrap_or(UNLIT));
            // Only switch colour when it changes along the row
            match colour {
                Some(c) => {
                    if prev != Some(c) {
                        write_bg(buf, c);
                        prev = Some(c);
                    }
                }
                None => {
                    if prev.is_some() {
                        buf.extend_from_slice(b"\x1b[0m");
                        prev = None;
                    }
                }
            }
            buf.extend_from_slice(KEY_CELL);
        }
        buf.extend_from_slice(b"\x1b[0m");
    }
}

fn write_bg(buf: &mut Vec<u8>, c: Colour) {
    buf.extend_from_slice(b"\x1b[48;2;");
    write_u8(buf, c.red);
    buf.push(b';');
    write_u8(buf, c.green);
    buf.push(b';');
    write_u8(buf, c.blue);
    buf.push(b'm');
}

fn write_cursor_pos(buf: &mut Vec<u8>, row: u16, col: u16) {
    buf.extend_from_slice(format!("\x1b[{row};{col}H").as_bytes());
}

/// Integer-to-ASCII for a channel value, no allocation.
fn write_u8(buf: &mut Vec<u8>, v: u8) {
    if v >= 100 {
        buf.push(b'0' + v / 100);
    }
    if v >= 10 {
        buf.push(b'0' + (v / 10) % 10);
    }
    buf.push(b'0' + v % 10);
}
