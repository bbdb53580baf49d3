//! Pixel canvas drawn with half-block cells: every terminal cell shows two
//! vertically stacked pixels.

use image::RgbImage;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

const UPPER_HALF: char = '▀';

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u16,
    height: u16,
    pixels: Vec<Color>,
}

impl Canvas {
    /// `height` is in pixels, i.e. twice the number of rows.
    pub fn new(width: u16, height: u16, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn from_image(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let pixels = image
            .pixels()
            .map(|p| Color::Rgb(p[0], p[1], p[2]))
            .collect();
        Self {
            width: width as u16,
            height: height as u16,
            pixels,
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = color;
    }

    /// Axis-aligned rectangle in pixel units. Anything with a non-zero size
    /// covers at least one pixel so thin paddles stay visible.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let x0 = x.round() as i32;
        let y0 = y.round() as i32;
        let x1 = ((x + w).round() as i32).max(x0 + 1);
        let y1 = ((y + h).round() as i32).max(y0 + 1);
        for py in y0..y1 {
            for px in x0..x1 {
                self.set(px, py, color);
            }
        }
    }

    /// Filled ellipse centred on `(cx, cy)`. Pixels whose centre falls
    /// inside are painted; a sub-pixel ellipse still paints its centre.
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: Color) {
        let rx = rx.max(0.5);
        let ry = ry.max(0.5);
        let mut painted = false;
        for py in (cy - ry).floor() as i32..=(cy + ry).ceil() as i32 {
            for px in (cx - rx).floor() as i32..=(cx + rx).ceil() as i32 {
                let nx = (px as f32 + 0.5 - cx) / rx;
                let ny = (py as f32 + 0.5 - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.set(px, py, color);
                    painted = true;
                }
            }
        }
        if !painted {
            self.set(cx.floor() as i32, cy.floor() as i32, color);
        }
    }

    /// Scales every RGB pixel towards black.
    pub fn dim(&mut self, factor: f32) {
        for pixel in &mut self.pixels {
            if let Color::Rgb(r, g, b) = *pixel {
                let scale = |c: u8| (c as f32 * factor) as u8;
                *pixel = Color::Rgb(scale(r), scale(g), scale(b));
            }
        }
    }
}

impl Widget for &Canvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = area.height.min(self.height.div_ceil(2));
        let cols = area.width.min(self.width);
        for row in 0..rows {
            for col in 0..cols {
                let upper = self.get(col, row * 2).unwrap_or(Color::Reset);
                let lower = self.get(col, row * 2 + 1).unwrap_or(Color::Reset);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(UPPER_HALF).set_fg(upper).set_bg(lower);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const BLACK: Color = Color::Rgb(0, 0, 0);
    const RED: Color = Color::Rgb(255, 0, 0);

    fn painted(canvas: &Canvas, color: Color) -> usize {
        canvas.pixels.iter().filter(|&&c| c == color).count()
    }

    #[test]
    fn rect_is_clipped_to_the_canvas() {
        let mut canvas = Canvas::new(10, 10, BLACK);
        canvas.fill_rect(8.0, -2.0, 5.0, 4.0, RED);
        assert_eq!(painted(&canvas, RED), 4);
        assert_eq!(canvas.get(9, 1), Some(RED));
        assert_eq!(canvas.get(7, 1), Some(BLACK));
    }

    #[test]
    fn thin_rect_still_shows() {
        let mut canvas = Canvas::new(10, 10, BLACK);
        canvas.fill_rect(3.2, 2.0, 0.2, 6.0, RED);
        assert_eq!(painted(&canvas, RED), 6);
    }

    #[test]
    fn ellipse_is_round_ish() {
        let mut canvas = Canvas::new(20, 20, BLACK);
        canvas.fill_ellipse(10.0, 10.0, 4.0, 4.0, RED);
        assert_eq!(canvas.get(10, 10), Some(RED));
        assert_eq!(canvas.get(6, 6), Some(BLACK));
        let area = painted(&canvas, RED) as f32;
        assert!((area - std::f32::consts::PI * 16.0).abs() < 8.0, "area {area}");
    }

    #[test]
    fn tiny_ellipse_paints_one_pixel() {
        let mut canvas = Canvas::new(4, 4, BLACK);
        canvas.fill_ellipse(1.7, 2.2, 0.1, 0.1, RED);
        assert_eq!(painted(&canvas, RED), 1);
    }

    #[test]
    fn image_pixels_become_colors() {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(1, 0, Rgb([1, 2, 3]));
        let canvas = Canvas::from_image(&image);
        assert_eq!((canvas.width, canvas.height), (2, 2));
        assert_eq!(canvas.get(1, 0), Some(Color::Rgb(1, 2, 3)));
        assert_eq!(canvas.get(0, 1), Some(BLACK));
    }

    #[test]
    fn dim_darkens() {
        let mut canvas = Canvas::new(1, 1, Color::Rgb(200, 100, 50));
        canvas.dim(0.5);
        assert_eq!(canvas.get(0, 0), Some(Color::Rgb(100, 50, 25)));
    }

    #[test]
    fn renders_two_pixels_per_cell() {
        let mut canvas = Canvas::new(2, 4, BLACK);
        canvas.set(0, 1, RED);
        canvas.set(1, 2, RED);
        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);

        let top_left = &buf[(0, 0)];
        assert_eq!(top_left.symbol(), "▀");
        assert_eq!((top_left.fg, top_left.bg), (BLACK, RED));
        let bottom_right = &buf[(1, 1)];
        assert_eq!((bottom_right.fg, bottom_right.bg), (RED, BLACK));
    }
}
