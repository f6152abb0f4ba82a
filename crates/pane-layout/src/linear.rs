//! Row and Column layout
//!
//! Children are laid out along the main axis separated by a gap and aligned
//! on the cross axis. With an explicit main-axis size the gap is derived from
//! the free space; without one the gap is the border width and the size
//! follows from it.

use pane_render::{Canvas, Color};

use crate::content::render_single;
use crate::node::Node;
use crate::resize;
use crate::value::{resolve_opt, Value};
use crate::{Content, Context, Key, Result};

/// Size handed from a Row to its Column children (height) and from a Column
/// to its Row children (width)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Constraint {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Main-axis placement computed by [`distribute`]
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    /// Gap between children (fractional when derived from a requested size)
    pub gap: f32,
    /// Main-axis extent of the container
    pub total: u32,
    /// Main-axis start of each child, truncated to pixels
    pub offsets: Vec<i32>,
}

/// Distribute children of main-axis `sizes` along one axis.
///
/// `requested` fixes the total extent, so the gap is
/// `(requested - sum) / gap_count`, where `gap_count` is `n + 1` with an
/// outer border and `n - 1` without. A single child without outer border has
/// no gaps at all. Without a request the gap is `border`.
pub fn distribute(sizes: &[u32], requested: Option<u32>, border: u32, outer: bool) -> Distribution {
    let n = sizes.len();
    let sum: i64 = sizes.iter().map(|&s| s as i64).sum();
    let gap_count = if outer { n + 1 } else { n.saturating_sub(1) };

    let (gap, total) = match requested {
        Some(requested) => {
            let gap = if gap_count == 0 {
                0.0
            } else {
                (requested as i64 - sum) as f32 / gap_count as f32
            };
            (gap, requested)
        }
        None => {
            let total = sum + border as i64 * gap_count as i64;
            (border as f32, total.max(0) as u32)
        }
    };

    let mut offsets = Vec::with_capacity(n);
    let mut position = if outer { gap } else { 0.0 };
    for &size in sizes {
        offsets.push(position as i32);
        position += size as f32 + gap;
    }

    Distribution { gap, total, offsets }
}

/// Cross-axis offset of a child within `extent`
fn align_offset(extent: u32, size: u32, align: f32) -> i32 {
    ((extent as f32 - size as f32) * align) as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn main(self, (w, h): (u32, u32)) -> u32 {
        match self {
            Axis::Horizontal => w,
            Axis::Vertical => h,
        }
    }

    fn cross(self, (w, h): (u32, u32)) -> u32 {
        match self {
            Axis::Horizontal => h,
            Axis::Vertical => w,
        }
    }

    fn size(self, main: u32, cross: u32) -> (u32, u32) {
        match self {
            Axis::Horizontal => (main, cross),
            Axis::Vertical => (cross, main),
        }
    }
}

/// Resolved container settings shared by Row and Column
struct Linear {
    axis: Axis,
    bg: Color,
    border_width: u32,
    align: f32,
    outer: bool,
    requested: Option<u32>,
}

impl Linear {
    fn compose(&self, children: &[Canvas]) -> Canvas {
        let sizes: Vec<u32> = children.iter().map(|c| self.axis.main(c.size())).collect();
        let dist = distribute(&sizes, self.requested, self.border_width, self.outer);

        let pad = if self.outer { self.border_width } else { 0 };
        let max_cross = children.iter().map(|c| self.axis.cross(c.size())).max().unwrap_or(0);
        let (w, h) = self.axis.size(dist.total, max_cross + 2 * pad);

        let mut out = Canvas::new(w, h, self.bg);
        for (child, &main) in children.iter().zip(&dist.offsets) {
            let cross = pad as i32 + align_offset(max_cross, self.axis.cross(child.size()), self.align);
            let (x, y) = match self.axis {
                Axis::Horizontal => (main, cross),
                Axis::Vertical => (cross, main),
            };
            out.paste(child, x, y);
        }
        out
    }
}

/// Horizontal layout
#[derive(Debug, Clone, Default)]
pub struct Row {
    pub contents: Vec<Content>,
    pub bg: Option<Value<Color>>,
    pub border_width: Option<Value<u32>>,
    pub border_color: Option<Value<Color>>,
    pub stretch_height: Option<Value<u32>>,
    pub expand_height: Option<Value<u32>>,
    pub align_y: Option<Value<f32>>,
    /// Forced onto Column children that have no height of their own
    pub height: Option<Value<u32>>,
    /// Total width; gaps absorb the free space
    pub width: Option<Value<u32>>,
    pub stretch_wh: Option<Value<(u32, u32)>>,
    pub outer_border: Option<Value<bool>>,
}

impl Row {
    pub fn new(contents: Vec<Content>) -> Self {
        Self { contents, ..Default::default() }
    }

    pub fn bg(mut self, bg: Color) -> Self {
        self.bg = Some(bg.into());
        self
    }

    pub fn border_width(mut self, width: u32) -> Self {
        self.border_width = Some(width.into());
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color.into());
        self
    }

    pub fn stretch_height(mut self, height: u32) -> Self {
        self.stretch_height = Some(height.into());
        self
    }

    pub fn expand_height(mut self, height: u32) -> Self {
        self.expand_height = Some(height.into());
        self
    }

    pub fn align_y(mut self, align: f32) -> Self {
        self.align_y = Some(align.into());
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn stretch_wh(mut self, width: u32, height: u32) -> Self {
        self.stretch_wh = Some((width, height).into());
        self
    }

    pub fn outer_border(mut self, outer: bool) -> Self {
        self.outer_border = Some(outer.into());
        self
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        self.render_constrained(ctx, Constraint::default())
    }

    pub(crate) fn render_constrained(&self, ctx: &Context, constraint: Constraint) -> Result<Canvas> {
        let bg = ctx.lookup(&self.bg, &Key::Bg)?.unwrap_or(Color::TRANSPARENT);
        let border_width = ctx.lookup(&self.border_width, &Key::BorderWidth)?.unwrap_or(0);
        let border_color = ctx.lookup(&self.border_color, &Key::BorderColor)?.unwrap_or(bg);
        let align = ctx.lookup(&self.align_y, &Key::AlignY)?.unwrap_or(0.5);
        let outer = ctx.lookup(&self.outer_border, &Key::OuterBorder)?.unwrap_or(false);
        let width = resolve_opt(&self.width, ctx)?.or(constraint.width);
        let height = resolve_opt(&self.height, ctx)?;

        let child_ctx = ctx
            .with(Key::Bg, bg)
            .with(Key::BorderWidth, border_width)
            .with(Key::BorderColor, border_color);

        let child_constraint = Constraint { width: None, height };
        let mut children = render_children(&self.contents, &child_ctx, child_constraint, Axis::Horizontal)?;

        if let Some((w, h)) = resolve_opt(&self.stretch_wh, ctx)? {
            children = children.iter().map(|c| c.resize(w, h)).collect();
        }
        if let Some(h) = resolve_opt(&self.stretch_height, ctx)? {
            children = children.iter().map(|c| resize::stretch_height(c, h)).collect();
        } else if let Some(h) = resolve_opt(&self.expand_height, ctx)? {
            children = children.iter().map(|c| resize::expand_height(c, h, bg)).collect();
        }

        let linear = Linear {
            axis: Axis::Horizontal,
            bg,
            border_width,
            align,
            outer,
            requested: width,
        };
        Ok(linear.compose(&children))
    }
}

/// Vertical layout
#[derive(Debug, Clone, Default)]
pub struct Column {
    pub contents: Vec<Content>,
    pub bg: Option<Value<Color>>,
    pub border_width: Option<Value<u32>>,
    pub border_color: Option<Value<Color>>,
    pub stretch_width: Option<Value<u32>>,
    pub expand_width: Option<Value<u32>>,
    pub align_x: Option<Value<f32>>,
    /// Total height; gaps absorb the free space
    pub height: Option<Value<u32>>,
    /// Forced onto Row children that have no width of their own
    pub width: Option<Value<u32>>,
    pub stretch_wh: Option<Value<(u32, u32)>>,
    pub outer_border: Option<Value<bool>>,
}

impl Column {
    pub fn new(contents: Vec<Content>) -> Self {
        Self { contents, ..Default::default() }
    }

    pub fn bg(mut self, bg: Color) -> Self {
        self.bg = Some(bg.into());
        self
    }

    pub fn border_width(mut self, width: u32) -> Self {
        self.border_width = Some(width.into());
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color.into());
        self
    }

    pub fn stretch_width(mut self, width: u32) -> Self {
        self.stretch_width = Some(width.into());
        self
    }

    pub fn expand_width(mut self, width: u32) -> Self {
        self.expand_width = Some(width.into());
        self
    }

    pub fn align_x(mut self, align: f32) -> Self {
        self.align_x = Some(align.into());
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn stretch_wh(mut self, width: u32, height: u32) -> Self {
        self.stretch_wh = Some((width, height).into());
        self
    }

    pub fn outer_border(mut self, outer: bool) -> Self {
        self.outer_border = Some(outer.into());
        self
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        self.render_constrained(ctx, Constraint::default())
    }

    pub(crate) fn render_constrained(&self, ctx: &Context, constraint: Constraint) -> Result<Canvas> {
        let bg = ctx.lookup(&self.bg, &Key::Bg)?.unwrap_or(Color::TRANSPARENT);
        let border_width = ctx.lookup(&self.border_width, &Key::BorderWidth)?.unwrap_or(0);
        let border_color = ctx.lookup(&self.border_color, &Key::BorderColor)?.unwrap_or(bg);
        let align = ctx.lookup(&self.align_x, &Key::AlignX)?.unwrap_or(0.5);
        let outer = ctx.lookup(&self.outer_border, &Key::OuterBorder)?.unwrap_or(false);
        let height = resolve_opt(&self.height, ctx)?.or(constraint.height);
        let width = resolve_opt(&self.width, ctx)?;

        let child_ctx = ctx
            .with(Key::Bg, bg)
            .with(Key::BorderWidth, border_width)
            .with(Key::BorderColor, border_color)
            .with(Key::AlignX, align);

        let child_constraint = Constraint { width, height: None };
        let mut children = render_children(&self.contents, &child_ctx, child_constraint, Axis::Vertical)?;

        if let Some((w, h)) = resolve_opt(&self.stretch_wh, ctx)? {
            children = children.iter().map(|c| c.resize(w, h)).collect();
        }
        if let Some(w) = resolve_opt(&self.stretch_width, ctx)? {
            children = children.iter().map(|c| resize::stretch_width(c, w)).collect();
        } else if let Some(w) = resolve_opt(&self.expand_width, ctx)? {
            children = children.iter().map(|c| resize::expand_width(c, w, bg)).collect();
        }

        let linear = Linear {
            axis: Axis::Vertical,
            bg,
            border_width,
            align,
            outer,
            requested: height,
        };
        Ok(linear.compose(&children))
    }
}

/// Render children, passing `constraint` to direct children of the opposite
/// orientation. Empty children are skipped.
fn render_children(contents: &[Content], ctx: &Context, constraint: Constraint, axis: Axis) -> Result<Vec<Canvas>> {
    let mut out = Vec::with_capacity(contents.len());
    for content in contents {
        let rendered = match (axis, content) {
            (Axis::Horizontal, Content::Node(node)) if constraint.height.is_some() => match node.as_ref() {
                Node::Column(col) if col.height.is_none() => Some(node.render_constrained(ctx, constraint)?),
                _ => render_single(content, ctx)?,
            },
            (Axis::Vertical, Content::Node(node)) if constraint.width.is_some() => match node.as_ref() {
                Node::Row(row) if row.width.is_none() => Some(node.render_constrained(ctx, constraint)?),
                _ => render_single(content, ctx)?,
            },
            _ => render_single(content, ctx)?,
        };
        if let Some(canvas) = rendered {
            out.push(canvas);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes(sizes: &[(u32, u32)]) -> Vec<Content> {
        sizes.iter().map(|&(w, h)| Canvas::new(w, h, Color::RED).into()).collect()
    }

    #[test]
    fn test_distribute_requested_without_outer() {
        let d = distribute(&[40, 60], Some(512), 0, false);
        assert_eq!(d.gap, 412.0);
        assert_eq!(d.total, 512);
        assert_eq!(d.offsets, vec![0, 452]);
    }

    #[test]
    fn test_distribute_requested_with_outer() {
        let d = distribute(&[10, 10], Some(40), 0, true);
        assert_eq!(d.gap, 20.0 / 3.0);
        assert_eq!(d.offsets, vec![6, 23]);
    }

    #[test]
    fn test_distribute_single_child_has_no_gap() {
        let d = distribute(&[30], Some(100), 5, false);
        assert_eq!(d.gap, 0.0);
        assert_eq!(d.offsets, vec![0]);
        assert_eq!(d.total, 100);
    }

    #[test]
    fn test_distribute_from_border() {
        let d = distribute(&[10, 20, 30], None, 4, false);
        assert_eq!(d.total, 68);
        assert_eq!(d.offsets, vec![0, 14, 38]);

        let d = distribute(&[10, 20], None, 4, true);
        assert_eq!(d.total, 42);
        assert_eq!(d.offsets, vec![4, 18]);
    }

    #[test]
    fn test_distribute_nothing() {
        let d = distribute(&[], None, 4, false);
        assert_eq!(d.total, 0);
        assert!(d.offsets.is_empty());
    }

    #[test]
    fn test_row_single_child_keeps_size() {
        let row = Row::new(boxes(&[(17, 9)])).border_width(6);
        assert_eq!(row.render(&Context::new()).unwrap().size(), (17, 9));
    }

    #[test]
    fn test_row_aligns_on_cross_axis() {
        let row = Row::new(boxes(&[(10, 10), (10, 30)])).bg(Color::WHITE).align_y(1.0);
        let out = row.render(&Context::new()).unwrap();
        assert_eq!(out.size(), (20, 30));
        assert_eq!(out.get_pixel(0, 19), Some(Color::WHITE));
        assert_eq!(out.get_pixel(0, 20), Some(Color::RED));
    }

    #[test]
    fn test_row_outer_border_pads_cross_axis() {
        let row = Row::new(boxes(&[(10, 10)])).border_width(3).outer_border(true);
        assert_eq!(row.render(&Context::new()).unwrap().size(), (16, 16));
    }

    #[test]
    fn test_row_inherits_border_width() {
        let ctx = Context::new().with(Key::BorderWidth, 5u32);
        let row = Row::new(boxes(&[(10, 10), (10, 10)]));
        assert_eq!(row.render(&ctx).unwrap().size(), (25, 10));
    }

    #[test]
    fn test_column_passes_align_to_children() {
        let inner = Content::deferred(|ctx| {
            let align = ctx.get_as::<f32>(&Key::AlignX).unwrap_or(-1.0);
            Canvas::new((align * 10.0) as u32, 1, Color::RED).into()
        });
        let col = Column::new(vec![inner]).align_x(0.3);
        assert_eq!(col.render(&Context::new()).unwrap().size(), (3, 1));
    }

    #[test]
    fn test_row_forces_height_on_columns() {
        let col_a = Column::new(boxes(&[(10, 10), (10, 10)]));
        let col_b = Column::new(boxes(&[(10, 5)])).height(7);
        let row = Row::new(vec![col_a.into(), col_b.into()]).height(50);
        let out = row.render(&Context::new()).unwrap();
        // First column stretched to 50 by the propagated height, second keeps its own
        assert_eq!(out.size(), (20, 50));
    }

    #[test]
    fn test_column_forces_width_on_rows() {
        let row = Row::new(boxes(&[(10, 10), (10, 10)]));
        let col = Column::new(vec![row.clone().into()]).width(100);
        let out = col.render(&Context::new()).unwrap();
        assert_eq!(out.size(), (100, 10));

        // The row node itself is untouched
        assert_eq!(row.render(&Context::new()).unwrap().size(), (20, 10));
    }

    #[test]
    fn test_stretch_and_expand_cross_axis() {
        let row = Row::new(boxes(&[(10, 10), (20, 5)])).stretch_height(20);
        assert_eq!(row.render(&Context::new()).unwrap().size(), (100, 20));

        let col = Column::new(boxes(&[(10, 10), (20, 5)])).expand_width(15).bg(Color::WHITE);
        let out = col.render(&Context::new()).unwrap();
        assert_eq!(out.size(), (20, 15));
        assert_eq!(out.get_pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_empty_children_are_skipped() {
        let row = Row::new(vec![Content::Empty, Canvas::new(4, 4, Color::RED).into(), Content::Empty]).border_width(10);
        assert_eq!(row.render(&Context::new()).unwrap().size(), (4, 4));
    }
}
