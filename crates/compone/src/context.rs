//! Implicit parent tracking for nested scoped blocks.
//!
//! Each thread holds a stack of open blocks. The innermost one is the scope
//! code is currently running in, and its component is the implicit parent.
//! Closing a block as the innermost one attaches its component to the block
//! beneath it. Closing a block while blocks opened inside it are still open
//! closes those too, without attaching anything, so the stack never keeps a
//! block whose guard is gone.

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::component::Component;

/// Identity of one open block's body. `0` is the root of a thread.
pub type ScopeId = u64;

const ROOT_SCOPE: ScopeId = 0;

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

fn next_scope_id() -> ScopeId {
    NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
struct Frame {
    scope: ScopeId,
    parent: Component,
}

thread_local! {
    /// Open blocks of this thread, innermost last.
    static OPEN: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

/// Scope code on this thread is currently running in.
pub fn current_scope() -> ScopeId {
    OPEN.with(|open| open.borrow().last().map_or(ROOT_SCOPE, |frame| frame.scope))
}

/// Component whose block is currently open on this thread, if any.
pub fn current_parent() -> Option<Component> {
    OPEN.with(|open| open.borrow().last().map(|frame| frame.parent.clone()))
}

/// An open scoped block.
///
/// Dropping the guard closes the block, also during unwinding, so the
/// thread's open blocks are consistent on every exit path.
#[must_use = "the block closes as soon as the guard is dropped"]
pub struct ScopeGuard {
    component: Component,
    body: ScopeId,
    open: bool,
}

enum Closing {
    Innermost(Option<Component>),
    Outer { closing_in: ScopeId },
    AlreadyClosed,
}

impl ScopeGuard {
    pub(crate) fn enter(component: &Component) -> Self {
        let body = next_scope_id();
        let opened_in = OPEN.with(|open| {
            let mut open = open.borrow_mut();
            let opened_in = open.last().map_or(ROOT_SCOPE, |frame| frame.scope);
            open.push(Frame {
                scope: body,
                parent: component.clone(),
            });
            opened_in
        });
        tracing::trace!(
            component = component.name(),
            opened_in,
            body,
            "entered scoped block"
        );
        Self {
            component: component.clone(),
            body,
            open: true,
        }
    }

    /// Scope of this block's body.
    pub fn scope(&self) -> ScopeId {
        self.body
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    /// Close the block now. Returns whether the component was attached to
    /// its enclosing parent.
    pub fn exit(mut self) -> bool {
        self.close()
    }

    fn close(&mut self) -> bool {
        if !std::mem::replace(&mut self.open, false) {
            return false;
        }

        let closing = OPEN.with(|open| {
            let mut open = open.borrow_mut();
            let Some(pos) = open.iter().rposition(|frame| frame.scope == self.body) else {
                return Closing::AlreadyClosed;
            };
            let innermost = pos + 1 == open.len();
            let closing_in = open.last().map_or(ROOT_SCOPE, |frame| frame.scope);
            open.truncate(pos);
            if innermost {
                Closing::Innermost(open.last().map(|frame| frame.parent.clone()))
            } else {
                Closing::Outer { closing_in }
            }
        });

        match closing {
            Closing::Innermost(Some(parent)) => {
                parent.push(self.component.clone());
                tracing::trace!(
                    component = self.component.name(),
                    parent = parent.name(),
                    "attached child to enclosing block"
                );
                true
            }
            Closing::Innermost(None) => false,
            Closing::Outer { closing_in } => {
                tracing::debug!(
                    component = self.component.name(),
                    body = self.body,
                    closing_in,
                    "block closed outside the scope that opened it, not attaching"
                );
                false
            }
            Closing::AlreadyClosed => {
                tracing::debug!(
                    component = self.component.name(),
                    body = self.body,
                    "block was closed with an enclosing block, not attaching"
                );
                false
            }
        }
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.close();
    }
}
