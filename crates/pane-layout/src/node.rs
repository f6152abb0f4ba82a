//! Layout node set
//!
//! The closed set of widgets a tree is built from. Rendering dispatches with
//! an exhaustive match, so a new kind is added here and nowhere else.

use std::sync::Arc;

use pane_render::Canvas;

use crate::linear::Constraint;
use crate::{
    AddBorder, AnimatedFrames, AvatarCircle, Bubble, ColorBox, Column, CompositeBg, Content, Context, GradientBox,
    Grid, Pill, ProgressBar, Result, RichText, Row, SetFont, SetKwargs, SizeBox, Text,
};

/// A layout node
#[derive(Debug, Clone)]
pub enum Node {
    Row(Row),
    Column(Column),
    Grid(Grid),
    SizeBox(SizeBox),
    SetFont(SetFont),
    SetKwargs(SetKwargs),
    Text(Text),
    RichText(RichText),
    Pill(Pill),
    AvatarCircle(AvatarCircle),
    CompositeBg(CompositeBg),
    ColorBox(ColorBox),
    GradientBox(GradientBox),
    AddBorder(AddBorder),
    Bubble(Bubble),
    AnimatedFrames(AnimatedFrames),
    ProgressBar(ProgressBar),
}

impl Node {
    /// Widget name used in logs and errors
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Row(_) => "Row",
            Node::Column(_) => "Column",
            Node::Grid(_) => "Grid",
            Node::SizeBox(_) => "SizeBox",
            Node::SetFont(_) => "SetFont",
            Node::SetKwargs(_) => "SetKwargs",
            Node::Text(_) => "Text",
            Node::RichText(_) => "RichText",
            Node::Pill(_) => "Pill",
            Node::AvatarCircle(_) => "AvatarCircle",
            Node::CompositeBg(_) => "CompositeBG",
            Node::ColorBox(_) => "ColorBox",
            Node::GradientBox(_) => "GradientBox",
            Node::AddBorder(_) => "AddBorder",
            Node::Bubble(_) => "Bubble",
            Node::AnimatedFrames(_) => "AnimatedFrames",
            Node::ProgressBar(_) => "ProgressBar",
        }
    }

    /// Render this node with `ctx`
    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        self.render_constrained(ctx, Constraint::default())
    }

    /// Render with a size handed down by a parent.
    ///
    /// Only `Row` and `Column` read the constraint, and only for the axis
    /// they did not set themselves.
    pub fn render_constrained(&self, ctx: &Context, constraint: Constraint) -> Result<Canvas> {
        tracing::trace!("render {}", self.kind());
        match self {
            Node::Row(n) => n.render_constrained(ctx, constraint),
            Node::Column(n) => n.render_constrained(ctx, constraint),
            Node::Grid(n) => n.render(ctx),
            Node::SizeBox(n) => n.render(ctx),
            Node::SetFont(n) => n.render(ctx),
            Node::SetKwargs(n) => n.render(ctx),
            Node::Text(n) => n.render(ctx),
            Node::RichText(n) => n.render(ctx),
            Node::Pill(n) => n.render(ctx),
            Node::AvatarCircle(n) => n.render(ctx),
            Node::CompositeBg(n) => n.render(ctx),
            Node::ColorBox(n) => n.render(ctx),
            Node::GradientBox(n) => n.render(ctx),
            Node::AddBorder(n) => n.render(ctx),
            Node::Bubble(n) => n.render(ctx),
            Node::AnimatedFrames(n) => n.render(ctx),
            Node::ProgressBar(n) => n.render(ctx),
        }
    }
}

macro_rules! impl_node_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Node {
                fn from(node: $variant) -> Self {
                    Node::$variant(node)
                }
            }

            impl From<$variant> for Content {
                fn from(node: $variant) -> Self {
                    Content::Node(Arc::new(Node::$variant(node)))
                }
            }
        )*
    };
}

impl_node_from!(
    Row,
    Column,
    Grid,
    SizeBox,
    SetFont,
    SetKwargs,
    Text,
    RichText,
    Pill,
    AvatarCircle,
    CompositeBg,
    ColorBox,
    GradientBox,
    AddBorder,
    Bubble,
    AnimatedFrames,
    ProgressBar,
);

#[cfg(test)]
mod tests {
    use super::*;
    use pane_render::Color;

    #[test]
    fn test_widget_into_content() {
        let content: Content = ColorBox::new(Color::RED, 4).into();
        assert_eq!(content.kind(), "ColorBox");
    }

    #[test]
    fn test_render_dispatch() {
        let node: Node = ColorBox::new(Color::RED, 4).height(2).into();
        let canvas = node.render(&Context::new()).unwrap();
        assert_eq!(canvas.size(), (4, 2));
    }
}
