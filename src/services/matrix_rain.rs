//! Falling-glyph background. Purely cosmetic.

use std::time::Duration;

use rand::Rng;

pub const GLYPHS: &str = "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const CELL_SIZE: u32 = 14;
pub const FRAME_INTERVAL: Duration = Duration::from_millis(35);
/// Opacity of the black wash painted before every frame.
pub const FADE_ALPHA: f32 = 0.05;
/// Chance per frame that a column past the bottom restarts at the top.
pub const RESET_PROBABILITY: f64 = 0.025;

pub trait RainCanvas {
    /// Width and height in canvas units.
    fn size(&self) -> (u32, u32);
    fn fade(&mut self, alpha: f32);
    fn draw_glyph(&mut self, glyph: char, x: u32, y: u32);
}

#[derive(Debug, Clone)]
pub struct RainField {
    drops: Vec<u32>,
    cell: u32,
    glyphs: Vec<char>,
}

impl RainField {
    pub fn new(width: u32, cell: u32) -> Self {
        let cell = cell.max(1);
        Self {
            drops: vec![1; (width / cell) as usize],
            cell,
            glyphs: GLYPHS.chars().collect(),
        }
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn drops(&self) -> &[u32] {
        &self.drops
    }

    /// Fits the column count to a new width. Existing columns keep falling.
    pub fn resize(&mut self, width: u32) {
        self.drops.resize((width / self.cell) as usize, 1);
    }

    pub fn frame<R: Rng, C: RainCanvas + ?Sized>(&mut self, rng: &mut R, canvas: &mut C) {
        let (_, height) = canvas.size();
        canvas.fade(FADE_ALPHA);

        for (column, drop) in self.drops.iter_mut().enumerate() {
            let glyph = self.glyphs[rng.gen_range(0..self.glyphs.len())];
            canvas.draw_glyph(glyph, column as u32 * self.cell, *drop * self.cell);

            if *drop * self.cell > height && rng.gen_bool(RESET_PROBABILITY) {
                *drop = 0;
            }
            *drop += 1;
        }
    }
}

/// Text-cell canvas: one glyph per cell, brightness decays with each fade.
#[derive(Debug, Clone)]
pub struct GlyphGrid {
    width: u32,
    height: u32,
    cells: Vec<(char, f32)>,
}

/// Cells dimmer than this render as blank.
const VISIBLE_BRIGHTNESS: f32 = 0.35;

impl GlyphGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![(' ', 0.0); (width * height) as usize],
        }
    }

    pub fn glyph_at(&self, x: u32, y: u32) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let (glyph, brightness) = self.cells[(y * self.width + x) as usize];
        (brightness >= VISIBLE_BRIGHTNESS).then_some(glyph)
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.glyph_at(x, y).unwrap_or(' '));
            }
            out.push('\n');
        }
        out
    }
}

impl RainCanvas for GlyphGrid {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fade(&mut self, alpha: f32) {
        // Stronger than a pixel wash so trails stay a few rows long.
        let keep = (1.0 - alpha * 4.0).clamp(0.0, 1.0);
        for cell in &mut self.cells {
            cell.1 *= keep;
        }
    }

    fn draw_glyph(&mut self, glyph: char, x: u32, y: u32) {
        if x < self.width && y < self.height {
            self.cells[(y * self.width + x) as usize] = (glyph, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[derive(Default)]
    struct RecordingCanvas {
        width: u32,
        height: u32,
        fades: Vec<f32>,
        glyphs: Vec<(char, u32, u32)>,
    }

    impl RainCanvas for RecordingCanvas {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }
        fn fade(&mut self, alpha: f32) {
            self.fades.push(alpha);
        }
        fn draw_glyph(&mut self, glyph: char, x: u32, y: u32) {
            self.glyphs.push((glyph, x, y));
        }
    }

    #[test]
    fn one_glyph_per_column_after_a_fade() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = RainField::new(100, CELL_SIZE);
        assert_eq!(field.columns(), 7);

        let mut canvas = RecordingCanvas { width: 100, height: 200, ..Default::default() };
        field.frame(&mut rng, &mut canvas);

        assert_eq!(canvas.fades, vec![FADE_ALPHA]);
        assert_eq!(canvas.glyphs.len(), 7);
        for (column, (glyph, x, y)) in canvas.glyphs.iter().enumerate() {
            assert!(GLYPHS.contains(*glyph));
            assert_eq!(*x, column as u32 * CELL_SIZE);
            assert_eq!(*y, CELL_SIZE);
        }
        assert!(field.drops().iter().all(|d| *d == 2));
    }

    #[test]
    fn columns_wrap_after_passing_the_bottom() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut field = RainField::new(10, 1);
        let mut canvas = RecordingCanvas { width: 10, height: 5, ..Default::default() };

        let mut wrapped = false;
        for _ in 0..2000 {
            field.frame(&mut rng, &mut canvas);
            if field.drops().iter().any(|d| *d == 1) {
                wrapped = true;
            }
        }
        assert!(wrapped);
        // Nothing resets before it has left the canvas.
        let mut fresh = RainField::new(10, 1);
        for _ in 0..5 {
            fresh.frame(&mut rng, &mut canvas);
        }
        assert!(fresh.drops().iter().all(|d| *d == 6));
    }

    #[test]
    fn resize_keeps_existing_columns() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = RainField::new(28, CELL_SIZE);
        let mut canvas = RecordingCanvas { width: 28, height: 500, ..Default::default() };
        field.frame(&mut rng, &mut canvas);

        field.resize(56);
        assert_eq!(field.drops(), &[2, 2, 1, 1]);
        field.resize(14);
        assert_eq!(field.drops(), &[2]);
    }

    #[test]
    fn grid_fades_old_glyphs() {
        let mut grid = GlyphGrid::new(3, 2);
        grid.draw_glyph('A', 1, 1);
        grid.draw_glyph('Z', 9, 9);
        assert_eq!(grid.glyph_at(1, 1), Some('A'));
        assert_eq!(grid.render(), "   \n A \n");

        for _ in 0..10 {
            grid.fade(FADE_ALPHA);
        }
        assert_eq!(grid.glyph_at(1, 1), None);
    }
}
