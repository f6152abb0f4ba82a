//! Grid layout

use pane_render::{Canvas, Color};

use crate::content::render_content;
use crate::value::Value;
use crate::{Content, Context, Key, LayoutError, Rendered, Result};

/// Placement order of a flat grid list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RankDir {
    /// Fill rows first
    #[default]
    LeftToRight,
    /// Fill columns first
    TopToBottom,
}

/// Shape of an auto-laid grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlan {
    pub columns: usize,
    pub rows: usize,
}

impl GridPlan {
    /// `columns = max(1, round(sqrt(n * aspect)))`, `rows = ceil(n / columns)`
    pub fn auto(n: usize, aspect_ratio: f32) -> Self {
        let columns = ((n as f32 * aspect_ratio).max(0.0).sqrt().round() as usize).max(1);
        let rows = n.div_ceil(columns);
        Self { columns, rows }
    }

    /// (column, row) of item `idx`
    pub fn cell(&self, idx: usize, rank_dir: RankDir) -> (usize, usize) {
        match rank_dir {
            RankDir::LeftToRight => (idx % self.columns, idx / self.columns),
            RankDir::TopToBottom => (idx / self.rows.max(1), idx % self.rows.max(1)),
        }
    }
}

/// Two-dimensional layout.
///
/// A flat content list is placed automatically by [`GridPlan`]. A list of
/// lists is taken as columns: the outer index is the column and the inner
/// index the row.
#[derive(Debug, Clone)]
pub struct Grid {
    pub contents: Vec<Content>,
    pub border_width: Option<Value<u32>>,
    pub outer_border: Option<Value<bool>>,
    pub rank_dir: Option<Value<RankDir>>,
    pub bg: Option<Value<Color>>,
    pub align_x: Option<Value<f32>>,
    pub align_y: Option<Value<f32>>,
    pub auto_aspect_ratio: f32,
}

impl Grid {
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            border_width: None,
            outer_border: None,
            rank_dir: None,
            bg: None,
            align_x: None,
            align_y: None,
            auto_aspect_ratio: 1.0,
        }
    }

    /// Grid from explicit columns
    pub fn from_columns(columns: Vec<Vec<Content>>) -> Self {
        Self::new(columns.into_iter().map(Content::List).collect())
    }

    pub fn border_width(mut self, width: u32) -> Self {
        self.border_width = Some(width.into());
        self
    }

    pub fn outer_border(mut self, outer: bool) -> Self {
        self.outer_border = Some(outer.into());
        self
    }

    pub fn rank_dir(mut self, rank_dir: RankDir) -> Self {
        self.rank_dir = Some(rank_dir.into());
        self
    }

    pub fn bg(mut self, bg: Color) -> Self {
        self.bg = Some(bg.into());
        self
    }

    pub fn align_x(mut self, align: f32) -> Self {
        self.align_x = Some(align.into());
        self
    }

    pub fn align_y(mut self, align: f32) -> Self {
        self.align_y = Some(align.into());
        self
    }

    pub fn auto_aspect_ratio(mut self, ratio: f32) -> Self {
        self.auto_aspect_ratio = ratio;
        self
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let outer = ctx.lookup(&self.outer_border, &Key::OuterBorder)?.unwrap_or(false);
        let rank_dir = ctx.lookup(&self.rank_dir, &Key::RankDir)?.unwrap_or_default();
        let bg = ctx.lookup(&self.bg, &Key::Bg)?.unwrap_or(Color::TRANSPARENT);
        let align_x = ctx.lookup(&self.align_x, &Key::AlignX)?.unwrap_or(0.5);
        let align_y = ctx.lookup(&self.align_y, &Key::AlignY)?.unwrap_or(0.5);
        let border_width = ctx.lookup(&self.border_width, &Key::BorderWidth)?;

        let rendered = self
            .contents
            .iter()
            .map(|c| render_content(c, ctx))
            .collect::<Result<Vec<_>>>()?;

        let nested = matches!(rendered.first(), Some(Rendered::List(_)));
        let (cells, border_width) = if nested {
            (columns_from_nested(rendered)?, border_width.unwrap_or(0))
        } else {
            let items = rendered.into_iter().map(cell_image).collect::<Result<Vec<_>>>()?;
            let border_width = border_width.unwrap_or_else(|| default_border_width(&items));
            let plan = GridPlan::auto(items.len(), self.auto_aspect_ratio);
            (place(items, plan, rank_dir), border_width)
        };

        Ok(compose(&cells, border_width, outer, bg, (align_x, align_y)))
    }
}

fn cell_image(rendered: Rendered) -> Result<Option<Canvas>> {
    match rendered {
        Rendered::Image(canvas) => Ok(Some(canvas)),
        Rendered::Empty => Ok(None),
        Rendered::List(_) => Err(LayoutError::UnsupportedContent { found: "nested list".into() }),
    }
}

fn columns_from_nested(rendered: Vec<Rendered>) -> Result<Vec<Vec<Option<Canvas>>>> {
    rendered
        .into_iter()
        .map(|column| match column {
            Rendered::List(items) => items.into_iter().map(cell_image).collect(),
            Rendered::Empty => Ok(Vec::new()),
            Rendered::Image(_) => Err(LayoutError::UnsupportedContent {
                found: "image among grid columns".into(),
            }),
        })
        .collect()
}

/// `floor(sqrt(A) / 5)` where `A` is the geometric mean area of the present,
/// non-empty cells
fn default_border_width(items: &[Option<Canvas>]) -> u32 {
    let log_areas: Vec<f64> = items
        .iter()
        .flatten()
        .filter(|c| !c.is_empty())
        .map(|c| (c.width() as f64 * c.height() as f64).ln())
        .collect();
    if log_areas.is_empty() {
        return 0;
    }
    let area = (log_areas.iter().sum::<f64>() / log_areas.len() as f64).exp();
    // Absorbs rounding in exp/ln so exact squares land on their integer side
    (area.sqrt() / 5.0 + 1e-9).floor() as u32
}

fn place(items: Vec<Option<Canvas>>, plan: GridPlan, rank_dir: RankDir) -> Vec<Vec<Option<Canvas>>> {
    let mut columns: Vec<Vec<Option<Canvas>>> = vec![vec![None; plan.rows]; plan.columns];
    for (idx, item) in items.into_iter().enumerate() {
        let (x, y) = plan.cell(idx, rank_dir);
        columns[x][y] = item;
    }
    columns
}

fn prefix_offsets(extents: &[u32], border_width: u32, outer: bool) -> (Vec<u32>, u32) {
    let mut position = if outer { border_width } else { 0 };
    let mut offsets = Vec::with_capacity(extents.len());
    for extent in extents {
        offsets.push(position);
        position += extent + border_width;
    }
    let total = if outer || extents.is_empty() {
        position
    } else {
        position - border_width
    };
    (offsets, total)
}

fn compose(
    columns: &[Vec<Option<Canvas>>],
    border_width: u32,
    outer: bool,
    bg: Color,
    (align_x, align_y): (f32, f32),
) -> Canvas {
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    let mut column_widths = vec![0u32; columns.len()];
    let mut row_heights = vec![0u32; rows];
    for (x, column) in columns.iter().enumerate() {
        for (y, cell) in column.iter().enumerate() {
            if let Some(cell) = cell {
                column_widths[x] = column_widths[x].max(cell.width());
                row_heights[y] = row_heights[y].max(cell.height());
            }
        }
    }

    let (lefts, width) = prefix_offsets(&column_widths, border_width, outer);
    let (tops, height) = prefix_offsets(&row_heights, border_width, outer);

    let mut out = Canvas::new(width, height, bg);
    for (x, column) in columns.iter().enumerate() {
        for (y, cell) in column.iter().enumerate() {
            let Some(cell) = cell else { continue };
            let left = lefts[x] as f32 + (column_widths[x] - cell.width()) as f32 * align_x;
            let top = tops[y] as f32 + (row_heights[y] - cell.height()) as f32 * align_y;
            out.paste(cell, left as i32, top as i32);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn squares(n: usize, side: u32) -> Vec<Content> {
        (0..n).map(|_| Canvas::new(side, side, Color::RED).into()).collect()
    }

    #[test]
    fn test_plan_shapes() {
        assert_eq!(GridPlan::auto(1, 1.0), GridPlan { columns: 1, rows: 1 });
        assert_eq!(GridPlan::auto(4, 1.0), GridPlan { columns: 2, rows: 2 });
        assert_eq!(GridPlan::auto(7, 1.0), GridPlan { columns: 3, rows: 3 });
        assert_eq!(GridPlan::auto(2, 1.0), GridPlan { columns: 1, rows: 2 });
        assert_eq!(GridPlan::auto(0, 1.0), GridPlan { columns: 1, rows: 0 });
        assert_eq!(GridPlan::auto(8, 2.0), GridPlan { columns: 4, rows: 2 });
    }

    #[test]
    fn test_plan_cells_never_collide() {
        for n in 1..60 {
            let plan = GridPlan::auto(n, 1.0);
            for dir in [RankDir::LeftToRight, RankDir::TopToBottom] {
                let cells: HashSet<_> = (0..n).map(|i| plan.cell(i, dir)).collect();
                assert_eq!(cells.len(), n);
                assert!(cells.iter().all(|&(x, y)| x < plan.columns && y < plan.rows));
            }
        }
    }

    #[test]
    fn test_flat_grid_default_border() {
        // Four 10x10 cells: border = floor(10 / 5) = 2
        let grid = Grid::new(squares(4, 10));
        assert_eq!(grid.render(&Context::new()).unwrap().size(), (22, 22));
    }

    #[test]
    fn test_default_border_uses_geometric_mean_area() {
        // Areas 25 and 2500: geometric mean 250, sqrt(250) / 5 = 3.16
        let grid = Grid::new(vec![
            Canvas::new(5, 5, Color::RED).into(),
            Canvas::new(50, 50, Color::RED).into(),
        ]);
        assert_eq!(grid.render(&Context::new()).unwrap().size(), (50, 5 + 3 + 50));
    }

    #[test]
    fn test_outer_border() {
        let grid = Grid::new(squares(4, 10)).border_width(1).outer_border(true);
        assert_eq!(grid.render(&Context::new()).unwrap().size(), (23, 23));
    }

    #[test]
    fn test_top_to_bottom_fills_columns() {
        let mut contents = squares(3, 10);
        contents[1] = Canvas::new(10, 10, Color::BLUE).into();
        let grid = Grid::new(contents).border_width(0).rank_dir(RankDir::TopToBottom);
        let out = grid.render(&Context::new()).unwrap();
        // 3 items -> 2 columns x 2 rows; item 1 lands at column 0, row 1
        assert_eq!(out.size(), (20, 20));
        assert_eq!(out.get_pixel(5, 15), Some(Color::BLUE));
        assert_eq!(out.get_pixel(15, 15), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_nested_columns() {
        let grid = Grid::from_columns(vec![
            vec![Canvas::new(10, 5, Color::RED).into(), Canvas::new(10, 5, Color::RED).into()],
            vec![Canvas::new(20, 5, Color::BLUE).into()],
        ]);
        // Nested form defaults to no border
        let out = grid.render(&Context::new()).unwrap();
        assert_eq!(out.size(), (30, 10));
        assert_eq!(out.get_pixel(15, 2), Some(Color::BLUE));
    }

    #[test]
    fn test_absent_cells_contribute_nothing() {
        let grid = Grid::new(vec![Canvas::new(10, 10, Color::RED).into(), Content::Empty]).border_width(0);
        // 2 items -> 1 column x 2 rows, second row empty
        assert_eq!(grid.render(&Context::new()).unwrap().size(), (10, 10));
    }

    #[test]
    fn test_empty_grid() {
        assert_eq!(Grid::new(vec![]).render(&Context::new()).unwrap().size(), (0, 0));
    }
}
