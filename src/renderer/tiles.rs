//! Page tiling: split a large chart into overlapping fixed-size pages with
//! cut marks, for printing and gluing back together.
//!
//! All values are page pixels. A page keeps `margin` free on every side; the
//! area inside is its drawable window onto the chart.

use crate::error::LayoutError;

use super::constants::*;
use super::glyphs::define_symbols;
use super::svg_builder::{Drawing, Element, Group, Transform};

const CUT_MARK: &str = "cut-mark";

/// Placement of a grid of pages over a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGrid {
    /// Page size, possibly turned to landscape.
    pub page: (f64, f64),
    pub margin: f64,
    pub columns: usize,
    pub rows: usize,
    /// Distance between the window origins of neighbouring pages.
    pub stride: (f64, f64),
    /// How far the grid reaches past the chart on the left and top.
    pub offset: (f64, f64),
}

impl TileGrid {
    pub fn tile_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Size of the drawable window of every page.
    pub fn fill(&self) -> (f64, f64) {
        (self.page.0 - 2.0 * self.margin, self.page.1 - 2.0 * self.margin)
    }

    /// Top-left corner of a page's window in chart coordinates.
    pub fn window_origin(&self, column: usize, row: usize) -> (f64, f64) {
        (
            column as f64 * self.stride.0 - self.offset.0,
            row as f64 * self.stride.1 - self.offset.1,
        )
    }
}

fn tiles_along(content: f64, fill: f64, overlap: f64) -> Result<usize, LayoutError> {
    if fill <= overlap {
        return Err(LayoutError::InvalidTiling { fill, overlap });
    }
    let n = ((content - overlap) / (fill - overlap)).ceil();
    Ok(n.max(1.0) as usize)
}

/// Pick the page orientation needing fewer pages (portrait on a tie) and
/// center the resulting grid over the chart.
pub fn calc_tiles(
    content: (f64, f64),
    page: (f64, f64),
    margin: f64,
    overlap: f64,
) -> Result<TileGrid, LayoutError> {
    let grid_for = |page: (f64, f64)| -> Result<TileGrid, LayoutError> {
        let fill = (page.0 - 2.0 * margin, page.1 - 2.0 * margin);
        let columns = tiles_along(content.0, fill.0, overlap)?;
        let rows = tiles_along(content.1, fill.1, overlap)?;
        let offset_along = |fill: f64, n: usize, size: f64| (fill * n as f64 - overlap * (n as f64 - 1.0) - size) / 2.0;
        Ok(TileGrid {
            page,
            margin,
            columns,
            rows,
            stride: (fill.0 - overlap, fill.1 - overlap),
            offset: (offset_along(fill.0, columns, content.0), offset_along(fill.1, rows, content.1)),
        })
    };

    let upright = grid_for(page)?;
    let turned = grid_for((page.1, page.0))?;
    let grid = if upright.tile_count() <= turned.tile_count() {
        upright
    } else {
        turned
    };
    log::debug!(
        "{}x{} pages of {:.0}x{:.0} px for a {:.0}x{:.0} px chart",
        grid.columns,
        grid.rows,
        grid.page.0,
        grid.page.1,
        content.0,
        content.1
    );
    Ok(grid)
}

/// One printable page of a tiled chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub column: usize,
    pub row: usize,
    pub drawing: Drawing,
}

/// Two short strokes meeting outside the top-left margin corner.
fn cut_mark(margin: f64) -> Group {
    let mut g = Group::new();
    let half = MARK_STROKE_WIDTH / 2.0;
    g.line(-half, -margin, -half, -CUT_OFFSET, NOTE_COLOR, MARK_STROKE_WIDTH);
    g.line(-margin, -half, -CUT_OFFSET, -half, NOTE_COLOR, MARK_STROKE_WIDTH);
    g
}

/// Render `content` (of size `content_size`) onto as few pages as possible.
/// Pages are returned column by column.
pub fn split_into_tiles(
    content: &Group,
    content_size: (f64, f64),
    page: (f64, f64),
    margin: f64,
    min_overlap: f64,
) -> Result<Vec<Tile>, LayoutError> {
    let grid = calc_tiles(content_size, page, margin, min_overlap)?;
    let (width, height) = grid.page;
    let corners = [
        (margin, margin, 0.0),
        (width - margin, margin, 90.0),
        (width - margin, height - margin, 180.0),
        (margin, height - margin, -90.0),
    ];

    let mut tiles = Vec::with_capacity(grid.tile_count());
    for column in 0..grid.columns {
        for row in 0..grid.rows {
            let mut drawing = Drawing::new(width, height);
            define_symbols(&mut drawing);
            drawing.define_symbol(CUT_MARK, cut_mark(margin));

            let (x_min, y_min) = grid.window_origin(column, row);
            let mut view = Group::translated(margin - x_min, margin - y_min);
            view.group(content.clone());
            drawing.push(Element::Group(view));

            for (x, y, angle) in corners {
                let mut mark = Group::translated(x, y).with_transform(Transform::Rotate(angle));
                mark.use_symbol(CUT_MARK, 0.0, 0.0);
                drawing.push(Element::Group(mark));
            }

            let mut guides = Group::new();
            if column + 1 < grid.columns {
                let x = margin + grid.stride.0 + OVERLAP_LINE_WIDTH / 2.0;
                guides.line(x, 0.0, x, height, NOTE_COLOR, OVERLAP_LINE_WIDTH);
            }
            if row + 1 < grid.rows {
                let y = margin + grid.stride.1 + OVERLAP_LINE_WIDTH / 2.0;
                guides.line(0.0, y, width, y, NOTE_COLOR, OVERLAP_LINE_WIDTH);
            }
            drawing.push(Element::Group(guides));

            tiles.push(Tile { column, row, drawing });
        }
    }
    Ok(tiles)
}
