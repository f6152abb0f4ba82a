//! Renderable content and dispatch
//!
//! Wherever a node expects "content" it accepts a [`Content`]: a finished
//! image, another node, a list, a deferred producer or nothing. Rendering
//! always yields an image, a list of rendered items or nothing.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use pane_render::Canvas;

use crate::node::Node;
use crate::{Context, LayoutError, Result, MAX_DEFERRED_DEPTH};

/// Producer of content from the render context
pub type ContentProducer = Arc<dyn Fn(&Context) -> Content + Send + Sync>;

/// Anything a node can take as a child
#[derive(Clone, Default)]
pub enum Content {
    Image(Canvas),
    Node(Arc<Node>),
    List(Vec<Content>),
    /// Plain text; only rich text accepts it, everywhere else it is an error
    Text(String),
    Deferred(ContentProducer),
    #[default]
    Empty,
}

/// Output of rendering one piece of content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Image(Canvas),
    List(Vec<Rendered>),
    Empty,
}

impl Content {
    pub fn deferred(f: impl Fn(&Context) -> Content + Send + Sync + 'static) -> Self {
        Content::Deferred(Arc::new(f))
    }

    pub fn node(node: impl Into<Node>) -> Self {
        Content::Node(Arc::new(node.into()))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Content::Empty)
    }

    /// Short name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Content::Image(_) => "image",
            Content::Node(node) => node.kind(),
            Content::List(_) => "list",
            Content::Text(_) => "text",
            Content::Deferred(_) => "deferred",
            Content::Empty => "empty",
        }
    }

    /// Call producers until a non-deferred value comes back
    pub fn resolve(&self, ctx: &Context) -> Result<Cow<'_, Content>> {
        let Content::Deferred(producer) = self else {
            return Ok(Cow::Borrowed(self));
        };
        let mut current = producer(ctx);
        for _ in 1..MAX_DEFERRED_DEPTH {
            match current {
                Content::Deferred(producer) => current = producer(ctx),
                other => return Ok(Cow::Owned(other)),
            }
        }
        match current {
            Content::Deferred(_) => Err(LayoutError::DeferredLoop { limit: MAX_DEFERRED_DEPTH }),
            other => Ok(Cow::Owned(other)),
        }
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Image(canvas) => write!(f, "Image({}x{})", canvas.width(), canvas.height()),
            Content::Node(node) => write!(f, "Node({})", node.kind()),
            Content::List(items) => f.debug_list().entries(items).finish(),
            Content::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Content::Deferred(_) => f.write_str("Deferred(..)"),
            Content::Empty => f.write_str("Empty"),
        }
    }
}

impl From<Canvas> for Content {
    fn from(canvas: Canvas) -> Self {
        Content::Image(canvas)
    }
}

impl From<Node> for Content {
    fn from(node: Node) -> Self {
        Content::Node(Arc::new(node))
    }
}

impl From<Arc<Node>> for Content {
    fn from(node: Arc<Node>) -> Self {
        Content::Node(node)
    }
}

impl From<Vec<Content>> for Content {
    fn from(items: Vec<Content>) -> Self {
        Content::List(items)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl<T: Into<Content>> From<Option<T>> for Content {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Content::Empty)
    }
}

impl Rendered {
    pub fn into_image(self) -> Option<Canvas> {
        match self {
            Rendered::Image(canvas) => Some(canvas),
            _ => None,
        }
    }
}

/// Render any content: resolve deferred values, then dispatch
pub fn render_content(content: &Content, ctx: &Context) -> Result<Rendered> {
    let content = content.resolve(ctx)?;
    match content.as_ref() {
        Content::Image(canvas) => Ok(Rendered::Image(canvas.clone())),
        Content::Node(node) => Ok(Rendered::Image(node.render(ctx)?)),
        Content::List(items) => items
            .iter()
            .map(|item| render_content(item, ctx))
            .collect::<Result<Vec<_>>>()
            .map(Rendered::List),
        Content::Empty => Ok(Rendered::Empty),
        other => Err(LayoutError::UnsupportedContent {
            found: other.kind().to_string(),
        }),
    }
}

/// Render content that must produce at most one image
pub fn render_single(content: &Content, ctx: &Context) -> Result<Option<Canvas>> {
    match render_content(content, ctx)? {
        Rendered::Image(canvas) => Ok(Some(canvas)),
        Rendered::Empty => Ok(None),
        Rendered::List(_) => Err(LayoutError::UnsupportedContent { found: "list".into() }),
    }
}

/// Render a single child, treating nothing as a 0x0 image
pub(crate) fn render_or_blank(content: &Content, ctx: &Context) -> Result<Canvas> {
    Ok(render_single(content, ctx)?.unwrap_or_else(Canvas::empty))
}

/// Render a tree to one image
pub fn render(root: &Content, ctx: &Context) -> Result<Canvas> {
    tracing::debug!("Rendering {:?}", root);
    render_or_blank(root, ctx)
}
