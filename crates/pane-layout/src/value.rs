//! Deferred values
//!
//! Any node field may hold either a literal or a producer that computes the
//! value from the render context. Producers may return further producers;
//! resolution keeps calling until a literal comes back, bounded by
//! [`MAX_DEFERRED_DEPTH`].

use std::fmt;
use std::sync::Arc;

use crate::{Context, LayoutError, Result};

/// Maximum number of producer calls while resolving one value
pub const MAX_DEFERRED_DEPTH: usize = 64;

/// Producer of a value from the render context
pub type Producer<T> = Arc<dyn Fn(&Context) -> Value<T> + Send + Sync>;

/// A literal or a context-dependent producer
pub enum Value<T> {
    Literal(T),
    Deferred(Producer<T>),
}

impl<T: Clone> Value<T> {
    /// Producer that may itself return another deferred value
    pub fn deferred(f: impl Fn(&Context) -> Value<T> + Send + Sync + 'static) -> Self {
        Value::Deferred(Arc::new(f))
    }

    /// Producer returning a literal directly
    pub fn computed(f: impl Fn(&Context) -> T + Send + Sync + 'static) -> Self {
        Value::Deferred(Arc::new(move |ctx| Value::Literal(f(ctx))))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Value::Deferred(_))
    }

    /// Call producers until a literal comes back
    pub fn resolve(&self, ctx: &Context) -> Result<T> {
        let mut current = match self {
            Value::Literal(value) => return Ok(value.clone()),
            Value::Deferred(producer) => producer(ctx),
        };
        for _ in 1..MAX_DEFERRED_DEPTH {
            match current {
                Value::Literal(value) => return Ok(value),
                Value::Deferred(producer) => current = producer(ctx),
            }
        }
        match current {
            Value::Literal(value) => Ok(value),
            Value::Deferred(_) => Err(LayoutError::DeferredLoop { limit: MAX_DEFERRED_DEPTH }),
        }
    }
}

/// Resolve an optional node field
pub(crate) fn resolve_opt<T: Clone>(value: &Option<Value<T>>, ctx: &Context) -> Result<Option<T>> {
    value.as_ref().map(|v| v.resolve(ctx)).transpose()
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Value::Literal(value)
    }
}

impl<T> Clone for Value<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Value::Literal(value) => Value::Literal(value.clone()),
            Value::Deferred(producer) => Value::Deferred(Arc::clone(producer)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Value::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attr, Key};

    #[test]
    fn test_literal_resolves_to_itself() {
        let v: Value<u32> = 7.into();
        assert_eq!(v.resolve(&Context::new()).unwrap(), 7);
        assert!(!v.is_deferred());
    }

    #[test]
    fn test_computed_reads_context() {
        let v = Value::computed(|ctx: &Context| ctx.get_as::<f32>(&Key::FontSize).unwrap_or(0.0) * 2.0);
        let ctx = Context::new().with(Key::FontSize, Attr::Number(10.0));
        assert_eq!(v.resolve(&ctx).unwrap(), 20.0);
    }

    #[test]
    fn test_nested_producers() {
        let v: Value<u32> = Value::deferred(|_| Value::deferred(|_| Value::Literal(3)));
        assert_eq!(v.resolve(&Context::new()).unwrap(), 3);
    }

    #[test]
    fn test_producer_chain_at_limit_resolves() {
        fn chain(depth: usize) -> Value<usize> {
            if depth == 0 {
                Value::Literal(42)
            } else {
                Value::deferred(move |_| chain(depth - 1))
            }
        }
        assert_eq!(chain(MAX_DEFERRED_DEPTH).resolve(&Context::new()).unwrap(), 42);
        assert!(matches!(
            chain(MAX_DEFERRED_DEPTH + 1).resolve(&Context::new()),
            Err(LayoutError::DeferredLoop { limit: MAX_DEFERRED_DEPTH })
        ));
    }

    #[test]
    fn test_self_referencing_producer_is_bounded() {
        fn forever() -> Value<u8> {
            Value::deferred(|_| forever())
        }
        assert!(matches!(forever().resolve(&Context::new()), Err(LayoutError::DeferredLoop { .. })));
    }
}
