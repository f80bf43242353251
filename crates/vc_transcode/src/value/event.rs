use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::Transcode;
use crate::info::{Capabilities, GenericTypeInfoCell, OpaqueInfo, TypeInfo, Typed};
use crate::transcode::impl_transcode_cast_fn;

type Handler<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// A list of callbacks invoked with an event argument `A`.
///
/// Used by [`DynamicObject`](crate::DynamicObject) for change notification.
/// Its type reports [`Capabilities::EVENT`], so members of this type are
/// left out of member enumeration unless force-included.
pub struct EventHandler<A: 'static> {
    handlers: Vec<Handler<A>>,
}

impl<A: 'static> EventHandler<A> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Add a callback.
    pub fn subscribe(&mut self, handler: impl Fn(&A) + Send + Sync + 'static) {
        self.handlers.push(Arc::new(handler));
    }

    /// Call every callback, in subscription order.
    pub fn invoke(&self, arg: &A) {
        for handler in &self.handlers {
            handler(arg);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl<A: 'static> Default for EventHandler<A> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static> Clone for EventHandler<A> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<A: 'static> fmt::Debug for EventHandler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl<A: 'static> Typed for EventHandler<A> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Opaque(OpaqueInfo::new::<Self>().with_capabilities(Capabilities::EVENT))
        })
    }
}

impl<A: 'static> Transcode for EventHandler<A> {
    impl_transcode_cast_fn!(Opaque);
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::EventHandler;
    use crate::info::{Capabilities, Typed};
    use core::sync::atomic::{AtomicUsize, Ordering};
    use alloc::sync::Arc;

    #[test]
    fn invokes_in_order_and_reports_event_shape() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut handler = EventHandler::<usize>::new();
        let first = calls.clone();
        handler.subscribe(move |n| {
            first.fetch_add(*n, Ordering::SeqCst);
        });
        let second = calls.clone();
        handler.subscribe(move |n| {
            second.fetch_add(*n * 10, Ordering::SeqCst);
        });

        handler.invoke(&2);
        assert_eq!(calls.load(Ordering::SeqCst), 22);
        assert_eq!(handler.len(), 2);

        let caps = <EventHandler<usize>>::type_info().capabilities();
        assert!(caps.contains(Capabilities::EVENT));
    }
}
