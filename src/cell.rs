//! A single planner cell: a square visual element that draws a dashed border
//! on any subset of its four edges and, optionally, a rotated sprite.

use image::RgbaImage;
use thiserror::Error;

use crate::config;
use crate::sprite::{self, RotateFlip};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellError {
    #[error("cell size cannot be 0")]
    ZeroSize,
}

/// Highlight state of a cell. A cell is hovered, selected, or neither;
/// never both at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Hovered,
    Selected,
}

/// One of the four border edges a cell can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Debug, Clone)]
pub struct PlannerCell {
    cell_size: u32,
    original_image: Option<RgbaImage>,
    // Cached result of applying `rotation` to the original image. Cleared
    // whenever the source or the transform changes, rebuilt on next paint.
    rotated_image: Option<RgbaImage>,
    sprite_id: Option<String>,
    rotation: RotateFlip,

    draws: bool,
    draws_image: bool,
    needs_redraw: bool,
    force_scaling: bool,
    highlight: Highlight,

    default_border_color: [u8; 4],
    hovered_border_color: [u8; 4],
    selected_border_color: [u8; 4],

    // Edge draw toggles, indexed by `Edge as usize`: top, right, bottom, left.
    edges: [bool; 4],
}

impl Default for PlannerCell {
    fn default() -> Self {
        Self {
            cell_size: config::DEFAULT_CELL_SIZE,
            original_image: None,
            rotated_image: None,
            sprite_id: None,
            rotation: RotateFlip::None,
            draws: true,
            draws_image: true,
            needs_redraw: true,
            force_scaling: true,
            highlight: Highlight::None,
            default_border_color: config::DEFAULT_BORDER_COLOR,
            hovered_border_color: config::HOVERED_BORDER_COLOR,
            selected_border_color: config::SELECTED_BORDER_COLOR,
            edges: [true; 4],
        }
    }
}

impl PlannerCell {
    /// Creates a cell with the given footprint and default everything else.
    pub fn new(cell_size: u32) -> Result<Self, CellError> {
        if cell_size == 0 {
            return Err(CellError::ZeroSize);
        }
        Ok(Self {
            cell_size,
            ..Self::default()
        })
    }

    /// Creates a cell holding an image with a rotation already set. The
    /// rotated image is produced lazily on first paint.
    pub fn with_image(
        cell_size: u32,
        image: RgbaImage,
        rotation: RotateFlip,
    ) -> Result<Self, CellError> {
        let mut cell = Self::new(cell_size)?;
        cell.original_image = Some(image);
        cell.rotation = rotation;
        Ok(cell)
    }

    pub fn builder(cell_size: u32) -> CellBuilder {
        CellBuilder::new(cell_size)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Resizes the square footprint. Does not mark the cell dirty; the host
    /// decides when a repaint is due.
    pub fn set_cell_size(&mut self, cell_size: u32) -> Result<(), CellError> {
        if cell_size == 0 {
            return Err(CellError::ZeroSize);
        }
        self.cell_size = cell_size;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.cell_size
    }

    pub fn height(&self) -> u32 {
        self.cell_size
    }

    /// Footprint change from the host layout: the cell stays square by
    /// taking the smaller dimension. Degenerate sizes are ignored.
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        let size = width.min(height);
        if size > 0 {
            self.cell_size = size;
        }
    }

    pub fn original_image(&self) -> Option<&RgbaImage> {
        self.original_image.as_ref()
    }

    /// Replaces the source image and drops the cached rotated copy.
    pub fn set_original_image(&mut self, image: Option<RgbaImage>) {
        self.original_image = image;
        self.rotated_image = None;
    }

    /// The cached rotated image, if the last paint produced one.
    pub fn rotated_image(&self) -> Option<&RgbaImage> {
        self.rotated_image.as_ref()
    }

    pub fn rotation(&self) -> RotateFlip {
        self.rotation
    }

    /// Changes the transform. The rotated image is invalidated and rebuilt
    /// from the original on next paint.
    pub fn set_rotation(&mut self, rotation: RotateFlip) {
        self.rotation = rotation;
        self.rotated_image = None;
    }

    /// Places a built-in sprite by id, or clears the image with `None`.
    /// Unknown ids clear the image as well.
    pub fn set_sprite(&mut self, id: Option<&str>) {
        match id.and_then(sprite::sprite_by_id) {
            Some(image) => {
                self.set_original_image(Some(image));
                self.sprite_id = id.map(str::to_owned);
            }
            None => {
                self.set_original_image(None);
                self.sprite_id = None;
            }
        }
    }

    pub fn sprite_id(&self) -> Option<&str> {
        self.sprite_id.as_deref()
    }

    /// Rebuilds the rotated image from the original if the cache is empty.
    /// Returns `None` when there is no original image.
    pub fn materialized_image(&mut self) -> Option<&RgbaImage> {
        if self.rotated_image.is_none() {
            if let Some(original) = &self.original_image {
                self.rotated_image = Some(self.rotation.apply(original));
            }
        }
        self.rotated_image.as_ref()
    }

    pub fn draws(&self) -> bool {
        self.draws
    }

    pub fn set_draws(&mut self, draws: bool) {
        self.draws = draws;
    }

    pub fn draws_image(&self) -> bool {
        self.draws_image
    }

    pub fn set_draws_image(&mut self, draws_image: bool) {
        self.draws_image = draws_image;
    }

    pub fn force_scaling(&self) -> bool {
        self.force_scaling
    }

    pub fn set_force_scaling(&mut self, force_scaling: bool) {
        self.force_scaling = force_scaling;
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn set_needs_redraw(&mut self, needs_redraw: bool) {
        self.needs_redraw = needs_redraw;
    }

    /// Marks the cell dirty so the next render pass repaints it.
    pub fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = highlight;
    }

    pub fn is_hovered_over(&self) -> bool {
        self.highlight == Highlight::Hovered
    }

    /// Hovering a cell displaces any selection; un-hovering leaves a
    /// selection untouched.
    pub fn set_hovered_over(&mut self, hovered: bool) {
        if hovered {
            self.highlight = Highlight::Hovered;
        } else if self.highlight == Highlight::Hovered {
            self.highlight = Highlight::None;
        }
    }

    pub fn is_selected(&self) -> bool {
        self.highlight == Highlight::Selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        if selected {
            self.highlight = Highlight::Selected;
        } else if self.highlight == Highlight::Selected {
            self.highlight = Highlight::None;
        }
    }

    /// The border color the current highlight state calls for:
    /// selected beats hovered beats default.
    pub fn border_color_for_state(&self) -> [u8; 4] {
        match self.highlight {
            Highlight::Selected => self.selected_border_color,
            Highlight::Hovered => self.hovered_border_color,
            Highlight::None => self.default_border_color,
        }
    }

    pub fn default_border_color(&self) -> [u8; 4] {
        self.default_border_color
    }

    pub fn set_default_border_color(&mut self, color: [u8; 4]) {
        self.default_border_color = color;
    }

    pub fn hovered_border_color(&self) -> [u8; 4] {
        self.hovered_border_color
    }

    pub fn set_hovered_border_color(&mut self, color: [u8; 4]) {
        self.hovered_border_color = color;
    }

    pub fn selected_border_color(&self) -> [u8; 4] {
        self.selected_border_color
    }

    pub fn set_selected_border_color(&mut self, color: [u8; 4]) {
        self.selected_border_color = color;
    }

    pub fn draws_edge(&self, edge: Edge) -> bool {
        self.edges[edge as usize]
    }

    pub fn set_draws_edge(&mut self, edge: Edge, draws: bool) {
        self.edges[edge as usize] = draws;
    }

    pub fn toggle_edge(&mut self, edge: Edge) {
        self.edges[edge as usize] = !self.edges[edge as usize];
    }

    pub fn draws_top(&self) -> bool {
        self.edges[Edge::Top as usize]
    }

    pub fn draws_right(&self) -> bool {
        self.edges[Edge::Right as usize]
    }

    pub fn draws_bottom(&self) -> bool {
        self.edges[Edge::Bottom as usize]
    }

    pub fn draws_left(&self) -> bool {
        self.edges[Edge::Left as usize]
    }
}

/// Staged construction for cells that need more than a size and an image.
/// Mirrors the widening ladder of optional cell properties: draw toggles,
/// then highlight, then colors, then edge toggles.
#[derive(Debug, Clone)]
pub struct CellBuilder {
    cell: PlannerCell,
    cell_size: u32,
}

impl CellBuilder {
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell: PlannerCell::default(),
            cell_size,
        }
    }

    pub fn image(mut self, image: RgbaImage, rotation: RotateFlip) -> Self {
        self.cell.original_image = Some(image);
        self.cell.rotation = rotation;
        self
    }

    pub fn draw_toggles(
        mut self,
        draws: bool,
        draws_image: bool,
        needs_redraw: bool,
        force_scaling: bool,
    ) -> Self {
        self.cell.draws = draws;
        self.cell.draws_image = draws_image;
        self.cell.needs_redraw = needs_redraw;
        self.cell.force_scaling = force_scaling;
        self
    }

    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.cell.highlight = highlight;
        self
    }

    pub fn border_colors(mut self, default: [u8; 4], hovered: [u8; 4], selected: [u8; 4]) -> Self {
        self.cell.default_border_color = default;
        self.cell.hovered_border_color = hovered;
        self.cell.selected_border_color = selected;
        self
    }

    pub fn edges(mut self, top: bool, right: bool, bottom: bool, left: bool) -> Self {
        self.cell.edges = [top, right, bottom, left];
        self
    }

    pub fn build(mut self) -> Result<PlannerCell, CellError> {
        if self.cell_size == 0 {
            return Err(CellError::ZeroSize);
        }
        self.cell.cell_size = self.cell_size;
        Ok(self.cell)
    }
}
