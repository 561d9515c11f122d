//! Dirty-rectangle flush adapter
//!
//! The UI toolkit composites into a working buffer whose rows are padded
//! to a 4-byte boundary for fast memory access. The panel bus has no such
//! padding: it expects exactly `width * height` pixels after a window-set
//! command. This module strips the row padding while keeping the common
//! unpadded case down to a single window-set plus one bulk write.

use crate::traits::{DisplayPanel, PanelError};
use crate::ui::Area;

/// Row stride alignment of the toolkit's working buffer, in bytes
pub const STRIDE_ALIGN_BYTES: usize = 4;

/// Pixels per source row after the toolkit's stride padding
///
/// Row bytes (`width * 2` for RGB565) round up to the next
/// [`STRIDE_ALIGN_BYTES`] boundary, then convert back to pixels.
pub const fn padded_stride_pixels(width: u16) -> usize {
    let stride_bytes = (width as usize * 2 + (STRIDE_ALIGN_BYTES - 1)) & !(STRIDE_ALIGN_BYTES - 1);
    stride_bytes / 2
}

/// Copy one rendered rectangle to the panel
///
/// `px_map` holds the source rows at the padded stride. The whole
/// rectangle is bracketed in one `start_write`/`end_write` transaction:
/// one bulk write when the stride carries no padding (or the rectangle is
/// a single row, where stride is irrelevant), otherwise one window-set and
/// pixel-write per row so padding pixels never reach the bus.
pub fn flush_area<P: DisplayPanel + ?Sized>(
    panel: &mut P,
    area: &Area,
    px_map: &[u16],
) -> Result<(), PanelError> {
    let w = area.width as usize;
    let h = area.height as usize;
    if w == 0 || h == 0 {
        return Ok(());
    }

    let stride = padded_stride_pixels(area.width);

    // Both paths read the same span: with an unpadded stride the last row
    // ends at (h-1)*stride + w == w*h.
    let needed = (h - 1) * stride + w;
    if px_map.len() < needed {
        return Err(PanelError::OutOfBounds);
    }

    panel.start_write();
    let result = write_rows(panel, area, px_map, stride);
    panel.end_write();
    result
}

fn write_rows<P: DisplayPanel + ?Sized>(
    panel: &mut P,
    area: &Area,
    px_map: &[u16],
    stride: usize,
) -> Result<(), PanelError> {
    let w = area.width as usize;
    let h = area.height as usize;

    if stride == w || h == 1 {
        // Contiguous source: one window covering the full rectangle.
        panel.set_addr_window(area.x, area.y, area.width, area.height)?;
        panel.write_pixels(&px_map[..w * h])?;
    } else {
        // Padded rows: send each visible row on its own 1-row window.
        for row in 0..h {
            let start = row * stride;
            panel.set_addr_window(area.x, area.y + row as u16, area.width, 1)?;
            panel.write_pixels(&px_map[start..start + w])?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Start,
        Window(u16, u16, u16, u16),
        Write(Vec<u16>),
        End,
    }

    /// Mock panel recording every bus operation
    struct MockPanel {
        ops: Vec<Op>,
    }

    impl MockPanel {
        fn new() -> Self {
            Self { ops: Vec::new() }
        }

        fn window_count(&self) -> usize {
            self.ops
                .iter()
                .filter(|op| matches!(op, Op::Window(..)))
                .count()
        }

        fn written_pixels(&self) -> usize {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Write(px) => Some(px.len()),
                    _ => None,
                })
                .sum()
        }
    }

    impl DisplayPanel for MockPanel {
        fn begin(&mut self) -> Result<(), PanelError> {
            Ok(())
        }

        fn width(&self) -> u16 {
            466
        }

        fn height(&self) -> u16 {
            466
        }

        fn fill_screen(&mut self, _color: u16) -> Result<(), PanelError> {
            Ok(())
        }

        fn start_write(&mut self) {
            self.ops.push(Op::Start);
        }

        fn end_write(&mut self) {
            self.ops.push(Op::End);
        }

        fn set_addr_window(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), PanelError> {
            self.ops.push(Op::Window(x, y, w, h));
            Ok(())
        }

        fn write_pixels(&mut self, pixels: &[u16]) -> Result<(), PanelError> {
            self.ops.push(Op::Write(pixels.to_vec()));
            Ok(())
        }

        fn set_brightness(&mut self, _value: u8) -> Result<(), PanelError> {
            Ok(())
        }
    }

    /// Source buffer with each pixel holding its own index, so tests can
    /// verify which offsets reached the panel.
    fn indexed_pixels(len: usize) -> Vec<u16> {
        (0..len as u16).collect()
    }

    #[test]
    fn test_stride_rounds_to_alignment() {
        // Even widths are already 4-byte aligned, odd widths gain a pixel.
        assert_eq!(padded_stride_pixels(40), 40);
        assert_eq!(padded_stride_pixels(37), 38);
        assert_eq!(padded_stride_pixels(2), 2);
        assert_eq!(padded_stride_pixels(1), 2);
    }

    #[test]
    fn test_contiguous_rect_is_one_transaction() {
        let mut panel = MockPanel::new();
        let area = Area::new(5, 7, 40, 8);
        let px = indexed_pixels(40 * 8);

        flush_area(&mut panel, &area, &px).unwrap();

        assert_eq!(panel.ops[0], Op::Start);
        assert_eq!(panel.ops[1], Op::Window(5, 7, 40, 8));
        assert_eq!(panel.ops[2], Op::Write(px));
        assert_eq!(panel.ops[3], Op::End);
        assert_eq!(panel.ops.len(), 4);
    }

    #[test]
    fn test_single_row_takes_fast_path() {
        // Width 37 pads to stride 38, but a one-row rectangle never needs
        // the per-row fallback.
        let mut panel = MockPanel::new();
        let area = Area::new(0, 10, 37, 1);
        let px = indexed_pixels(37);

        flush_area(&mut panel, &area, &px).unwrap();

        assert_eq!(panel.window_count(), 1);
        assert_eq!(panel.ops[1], Op::Window(0, 10, 37, 1));
        assert_eq!(panel.written_pixels(), 37);
    }

    #[test]
    fn test_padded_rows_skip_padding_pixels() {
        // 37 px rows pad to 38; rows start at source offsets 0, 38, 76.
        let mut panel = MockPanel::new();
        let area = Area::new(12, 20, 37, 3);
        let px = indexed_pixels(38 * 3);

        flush_area(&mut panel, &area, &px).unwrap();

        assert_eq!(panel.window_count(), 3);
        assert_eq!(panel.ops[1], Op::Window(12, 20, 37, 1));
        assert_eq!(panel.ops[3], Op::Window(12, 21, 37, 1));
        assert_eq!(panel.ops[5], Op::Window(12, 22, 37, 1));

        for (row, offset) in [(0usize, 0u16), (1, 38), (2, 76)] {
            match &panel.ops[2 + row * 2] {
                Op::Write(pixels) => {
                    assert_eq!(pixels.len(), 37);
                    assert_eq!(pixels[0], offset);
                    assert_eq!(pixels[36], offset + 36);
                }
                other => panic!("expected pixel write, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_short_buffer_rejected_before_any_write() {
        let mut panel = MockPanel::new();
        let area = Area::new(0, 0, 37, 3);
        let px = indexed_pixels(37 * 3); // one padding pixel per row missing

        let result = flush_area(&mut panel, &area, &px);

        assert_eq!(result, Err(PanelError::OutOfBounds));
        assert!(panel.ops.is_empty());
    }

    #[test]
    fn test_empty_area_is_noop() {
        let mut panel = MockPanel::new();
        let area = Area::new(0, 0, 0, 5);

        flush_area(&mut panel, &area, &[]).unwrap();

        assert!(panel.ops.is_empty());
    }

    proptest! {
        /// Every geometry transfers exactly width*height pixels, with the
        /// transaction count dictated by the stride.
        #[test]
        fn flush_covers_exact_pixels(x in 0u16..100, y in 0u16..100, w in 1u16..80, h in 1u16..40) {
            let stride = padded_stride_pixels(w);
            let px = indexed_pixels((h as usize - 1) * stride + w as usize);
            let mut panel = MockPanel::new();
            let area = Area::new(x, y, w, h);

            flush_area(&mut panel, &area, &px).unwrap();

            let expected_windows = if stride == w as usize || h == 1 { 1 } else { h as usize };
            prop_assert_eq!(panel.window_count(), expected_windows);
            prop_assert_eq!(panel.written_pixels(), area.pixel_count());
            prop_assert_eq!(&panel.ops[0], &Op::Start);
            prop_assert_eq!(panel.ops.last().unwrap(), &Op::End);
        }
    }
}
