//! Frame selection by wall-clock time

use pane_render::Canvas;

use crate::content::render_or_blank;
use crate::value::Value;
use crate::{Content, Context, LayoutError, Result};

/// Renders the frame current at the context clock's time
#[derive(Debug, Clone)]
pub struct AnimatedFrames {
    pub frames: Value<Vec<Content>>,
    pub fps: f32,
}

impl AnimatedFrames {
    pub fn new(frames: Vec<Content>, fps: f32) -> Self {
        Self {
            frames: Value::Literal(frames),
            fps,
        }
    }

    /// Frames produced from the context at render time
    pub fn deferred(frames: impl Fn(&Context) -> Vec<Content> + Send + Sync + 'static, fps: f32) -> Self {
        Self {
            frames: Value::computed(frames),
            fps,
        }
    }

    /// `floor(now * fps) mod len`
    pub fn frame_index(&self, ctx: &Context, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let ticks = (ctx.now().as_secs_f64() * self.fps as f64).floor();
        (ticks.max(0.0) as u64 % len as u64) as usize
    }

    pub fn render(&self, ctx: &Context) -> Result<Canvas> {
        let frames = self.frames.resolve(ctx)?;
        if frames.is_empty() {
            return Err(LayoutError::EmptyFrames);
        }
        let idx = self.frame_index(ctx, frames.len());
        tracing::trace!("AnimatedFrames: frame {}/{}", idx, frames.len());
        render_or_blank(&frames[idx], ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClock;
    use pane_render::Color;
    use std::sync::Arc;

    fn frames() -> Vec<Content> {
        [Color::RED, Color::GREEN, Color::BLUE]
            .into_iter()
            .map(|c| Canvas::new(1, 1, c).into())
            .collect()
    }

    fn at(secs: f64) -> Context {
        Context::new().with_clock(Arc::new(FixedClock::from_secs_f64(secs)))
    }

    #[test]
    fn test_frame_follows_clock() {
        let anim = AnimatedFrames::new(frames(), 2.0);
        assert_eq!(anim.render(&at(0.0)).unwrap().get_pixel(0, 0), Some(Color::RED));
        assert_eq!(anim.render(&at(0.5)).unwrap().get_pixel(0, 0), Some(Color::GREEN));
        assert_eq!(anim.render(&at(1.2)).unwrap().get_pixel(0, 0), Some(Color::BLUE));
        // 3.1 s * 2 fps = 6 ticks, wraps to the first frame
        assert_eq!(anim.render(&at(3.1)).unwrap().get_pixel(0, 0), Some(Color::RED));
    }

    #[test]
    fn test_empty_frames() {
        let anim = AnimatedFrames::new(vec![], 10.0);
        assert!(matches!(anim.render(&at(1.0)), Err(LayoutError::EmptyFrames)));
    }

    #[test]
    fn test_deferred_frames() {
        let anim = AnimatedFrames::deferred(|_| frames().into_iter().rev().collect(), 1.0);
        assert_eq!(anim.render(&at(0.0)).unwrap().get_pixel(0, 0), Some(Color::BLUE));
    }
}
