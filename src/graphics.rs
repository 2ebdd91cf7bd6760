//! Software renderer for the planner grid.
//!
//! The frame buffer persists between presents, so a render pass only
//! repaints cells whose dirty flag is set. Window resizes and grid reshapes
//! change the layout; those clear the whole frame and invalidate every cell.
//! The drawing primitives work on a raw RGBA frame so they can run headless.

use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

use image::RgbaImage;

use crate::cell::PlannerCell;
use crate::config::{self, GRID_PADDING};
use crate::grid::PlannerGrid;

pub struct GraphicsRenderer {
    pixels: Pixels,
    width: u32,
    height: u32,
    layout_dirty: bool,
}

impl GraphicsRenderer {
    pub fn new(window: &Window, width: u32, height: u32) -> Result<Self, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, window);
        let pixels = Pixels::new(width, height, surface_texture)?;

        Ok(Self {
            pixels,
            width,
            height,
            layout_dirty: true,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        if let Err(err) = self.pixels.resize_surface(width, height) {
            log::error!("Failed to resize surface: {}", err);
        }
        if let Err(err) = self.pixels.resize_buffer(width, height) {
            log::error!("Failed to resize buffer: {}", err);
        }

        self.layout_dirty = true;
    }

    /// Tells the renderer the grid shape changed, so the next render pass
    /// starts from a cleared frame.
    pub fn mark_layout_dirty(&mut self) {
        self.layout_dirty = true;
    }

    /// Repaints dirty cells into the frame. Call `present` afterwards.
    pub fn render(&mut self, grid: &mut PlannerGrid) {
        let (frame_width, frame_height) = (self.width, self.height);
        let grid_width = grid.width();
        let grid_height = grid.height();
        let pitch = cell_pitch(frame_width, frame_height, grid_width, grid_height);
        let (origin_x, origin_y) = grid_origin(frame_width, frame_height, grid_width, grid_height, pitch);

        if self.layout_dirty {
            grid.invalidate_all();
        }

        let frame = self.pixels.frame_mut();
        if self.layout_dirty {
            clear_frame(frame, config::BACKGROUND_COLOR);
            self.layout_dirty = false;
        }

        for (y, row) in grid.rows_mut().iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                // The layout hands every cell a square slot; the cell keeps
                // itself square under that pressure.
                cell.handle_resize(pitch, pitch);
                render_cell(
                    frame,
                    frame_width,
                    frame_height,
                    cell,
                    origin_x + x as u32 * pitch,
                    origin_y + y as u32 * pitch,
                );
            }
        }
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }

    /// Maps a window-space cursor position to grid coordinates, if it lands
    /// on a cell.
    pub fn cell_at_position(&self, grid: &PlannerGrid, x: f64, y: f64) -> Option<(u16, u16)> {
        let grid_width = grid.width();
        let grid_height = grid.height();
        let pitch = cell_pitch(self.width, self.height, grid_width, grid_height);
        if pitch == 0 {
            return None;
        }
        let (origin_x, origin_y) = grid_origin(self.width, self.height, grid_width, grid_height, pitch);

        if x < origin_x as f64 || y < origin_y as f64 {
            return None;
        }
        let cell_x = ((x - origin_x as f64) / pitch as f64) as u16;
        let cell_y = ((y - origin_y as f64) / pitch as f64) as u16;
        if cell_x < grid_width && cell_y < grid_height {
            Some((cell_x, cell_y))
        } else {
            None
        }
    }
}

/// The largest square slot that fits the grid into the frame, padding
/// excluded.
pub fn cell_pitch(frame_width: u32, frame_height: u32, grid_width: u16, grid_height: u16) -> u32 {
    if grid_width == 0 || grid_height == 0 {
        return 0;
    }
    let available_width = frame_width.saturating_sub(GRID_PADDING * 2);
    let available_height = frame_height.saturating_sub(GRID_PADDING * 2);
    let max_tile_width = available_width / grid_width as u32;
    let max_tile_height = available_height / grid_height as u32;
    max_tile_width.min(max_tile_height).max(1)
}

/// Top-left corner of the grid, centered in the available space.
pub fn grid_origin(
    frame_width: u32,
    frame_height: u32,
    grid_width: u16,
    grid_height: u16,
    pitch: u32,
) -> (u32, u32) {
    let available_width = frame_width.saturating_sub(GRID_PADDING * 2);
    let available_height = frame_height.saturating_sub(GRID_PADDING * 2);
    let grid_pixel_width = grid_width as u32 * pitch;
    let grid_pixel_height = grid_height as u32 * pitch;

    let origin_x = GRID_PADDING + available_width.saturating_sub(grid_pixel_width) / 2;
    let origin_y = GRID_PADDING + available_height.saturating_sub(grid_pixel_height) / 2;
    (origin_x, origin_y)
}

/// Paints one cell at the given frame origin, if its dirty flag is set, and
/// clears the flag. Clean cells are left untouched.
pub fn render_cell(
    frame: &mut [u8],
    frame_width: u32,
    frame_height: u32,
    cell: &mut PlannerCell,
    origin_x: u32,
    origin_y: u32,
) {
    if !cell.needs_redraw() {
        return;
    }

    let size = cell.cell_size();
    fill_rect(
        frame,
        frame_width,
        frame_height,
        origin_x,
        origin_y,
        size,
        size,
        config::BACKGROUND_COLOR,
    );

    if cell.draws() {
        let color = cell.border_color_for_state();
        let dash = (size / 5).max(1);

        // Top and right edges stroke start-to-end, bottom and left
        // end-to-start; each dash pattern anchors at its stroke's start.
        if cell.draws_top() {
            draw_dashed_hline(
                frame,
                frame_width,
                frame_height,
                origin_x,
                origin_x + size,
                origin_y,
                dash,
                color,
            );
        }
        if cell.draws_right() {
            draw_dashed_vline(
                frame,
                frame_width,
                frame_height,
                origin_x + size - 1,
                origin_y,
                origin_y + size,
                dash,
                color,
            );
        }
        if cell.draws_bottom() {
            draw_dashed_hline(
                frame,
                frame_width,
                frame_height,
                origin_x + size,
                origin_x,
                origin_y + size - 1,
                dash,
                color,
            );
        }
        if cell.draws_left() {
            draw_dashed_vline(
                frame,
                frame_width,
                frame_height,
                origin_x,
                origin_y + size,
                origin_y,
                dash,
                color,
            );
        }

        if cell.draws_image() {
            let force_scaling = cell.force_scaling();
            if let Some(image) = cell.materialized_image() {
                if force_scaling {
                    blit_image_scaled(
                        frame,
                        frame_width,
                        frame_height,
                        image,
                        origin_x,
                        origin_y,
                        size,
                        size,
                    );
                } else {
                    blit_image(frame, frame_width, frame_height, image, origin_x, origin_y);
                }
            }
        }
    }

    cell.set_needs_redraw(false);
}

pub fn clear_frame(frame: &mut [u8], color: [u8; 4]) {
    for pixel in frame.chunks_exact_mut(4) {
        pixel.copy_from_slice(&color);
    }
}

fn put_pixel(frame: &mut [u8], frame_width: u32, frame_height: u32, x: u32, y: u32, color: [u8; 4]) {
    if x < frame_width && y < frame_height {
        let index = ((y * frame_width + x) * 4) as usize;
        if index + 3 < frame.len() {
            frame[index..index + 4].copy_from_slice(&color);
        }
    }
}

pub fn fill_rect(
    frame: &mut [u8],
    frame_width: u32,
    frame_height: u32,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    color: [u8; 4],
) {
    for dy in 0..height {
        for dx in 0..width {
            put_pixel(frame, frame_width, frame_height, x + dx, y + dy, color);
        }
    }
}

/// Horizontal dashed line from `x0` to `x1` (either direction, endpoints
/// included). Runs of `dash` pixels on, `dash` pixels off, anchored at `x0`.
pub fn draw_dashed_hline(
    frame: &mut [u8],
    frame_width: u32,
    frame_height: u32,
    x0: u32,
    x1: u32,
    y: u32,
    dash: u32,
    color: [u8; 4],
) {
    let dash = dash.max(1);
    let len = x0.abs_diff(x1);
    for i in 0..=len {
        if (i / dash) % 2 == 1 {
            continue;
        }
        let x = if x1 >= x0 { x0 + i } else { x0 - i };
        put_pixel(frame, frame_width, frame_height, x, y, color);
    }
}

/// Vertical counterpart of `draw_dashed_hline`, anchored at `y0`.
pub fn draw_dashed_vline(
    frame: &mut [u8],
    frame_width: u32,
    frame_height: u32,
    x: u32,
    y0: u32,
    y1: u32,
    dash: u32,
    color: [u8; 4],
) {
    let dash = dash.max(1);
    let len = y0.abs_diff(y1);
    for i in 0..=len {
        if (i / dash) % 2 == 1 {
            continue;
        }
        let y = if y1 >= y0 { y0 + i } else { y0 - i };
        put_pixel(frame, frame_width, frame_height, x, y, color);
    }
}

/// Copies the image at native resolution. Fully transparent pixels are
/// skipped; everything else overwrites the frame.
pub fn blit_image(
    frame: &mut [u8],
    frame_width: u32,
    frame_height: u32,
    image: &RgbaImage,
    x: u32,
    y: u32,
) {
    for (sx, sy, pixel) in image.enumerate_pixels() {
        if pixel.0[3] == 0 {
            continue;
        }
        put_pixel(frame, frame_width, frame_height, x + sx, y + sy, pixel.0);
    }
}

/// Stretches the image over a `dest_width` x `dest_height` rectangle with
/// nearest-neighbour sampling.
pub fn blit_image_scaled(
    frame: &mut [u8],
    frame_width: u32,
    frame_height: u32,
    image: &RgbaImage,
    x: u32,
    y: u32,
    dest_width: u32,
    dest_height: u32,
) {
    if dest_width == 0 || dest_height == 0 || image.width() == 0 || image.height() == 0 {
        return;
    }
    for dy in 0..dest_height {
        let sy = (dy as u64 * image.height() as u64 / dest_height as u64) as u32;
        for dx in 0..dest_width {
            let sx = (dx as u64 * image.width() as u64 / dest_width as u64) as u32;
            let pixel = image.get_pixel(sx, sy).0;
            if pixel[3] == 0 {
                continue;
            }
            put_pixel(frame, frame_width, frame_height, x + dx, y + dy, pixel);
        }
    }
}
