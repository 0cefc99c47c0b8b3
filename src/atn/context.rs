//! A persistent, shareable rule-invocation chain.

use std::sync::Arc;

use super::interface::RuleContext;

/// Immutable frame in a chain of rule invocations.
///
/// Frames are linked child-to-parent through `Arc`s, so pushing a frame never
/// copies the chain and any frame can be kept as long as needed.
///
/// ```rust
/// use atn_runtime::atn::{InvocationContext, RuleContext};
///
/// let root = InvocationContext::root(0);
/// let inner = root.push(4, 1).push(9, 2);
/// assert_eq!(3, inner.depth());
/// assert_eq!(Some(9), inner.invoking_state());
/// assert!(root.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationContext {
    parent: Option<Arc<InvocationContext>>,
    invoking_state: Option<usize>,
    rule_index: Option<usize>
}

impl InvocationContext {
    /// The frame representing "no enclosing context".
    pub fn empty() -> Arc<Self> {
        Arc::new(InvocationContext{parent: None, invoking_state: None, rule_index: None})
    }

    /// Outermost frame for a parse started at rule `rule_index`.
    pub fn root(rule_index: usize) -> Arc<Self> {
        Arc::new(InvocationContext{parent: None, invoking_state: None, rule_index: Some(rule_index)})
    }

    /// Create the frame for invoking `rule_index` from `invoking_state`, which
    /// belongs to this frame's rule.
    pub fn push(self: &Arc<Self>, invoking_state: usize, rule_index: usize) -> Arc<Self> {
        Arc::new(InvocationContext{parent: Some(Arc::clone(self)), invoking_state: Some(invoking_state),
                                   rule_index: Some(rule_index)})
    }

    /// Rule this frame is recognizing, if known.
    #[inline]
    pub fn rule_index(&self) -> Option<usize> {
        self.rule_index
    }

    /// The calling frame, as a shareable handle.
    #[inline]
    pub fn parent_frame(&self) -> Option<&Arc<InvocationContext>> {
        self.parent.as_ref()
    }
}

impl RuleContext for InvocationContext {
    #[inline]
    fn invoking_state(&self) -> Option<usize> {
        self.invoking_state
    }

    fn parent(&self) -> Option<&dyn RuleContext> {
        self.parent.as_deref().map(|p| p as &dyn RuleContext)
    }
}
