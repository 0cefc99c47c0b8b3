//! Interface traits at the boundary between the automaton and the rest of a
//! parser runtime.

use std::fmt::Debug;

use crate::util::interval::IntervalSet;
use super::Atn;
use super::state::AtnState;

/// One frame of a parser's rule-invocation stack, viewed read-only.
///
/// The innermost frame describes the rule currently being recognized; its
/// `invoking_state` is the state, in the *calling* rule, whose rule
/// transition started it.  The outermost frame has no invoking state.
pub trait RuleContext: Debug {
    /// State number at which this frame's rule was invoked, or `None` for
    /// the outermost frame.
    fn invoking_state(&self) -> Option<usize>;

    /// The calling rule's frame, or `None` at the outermost level.
    fn parent(&self) -> Option<&dyn RuleContext>;

    /// Check whether this frame stands for "no enclosing context".
    #[inline]
    fn is_empty(&self) -> bool {
        self.invoking_state().is_none()
    }

    /// Number of frames from this one to the outermost, inclusive.
    fn depth(&self) -> usize {
        let mut n = 1;
        let mut p = self.parent();
        while let Some(ctx) = p {
            n += 1;
            p = ctx.parent();
        }
        n
    }
}

/// Epsilon-closure search used to compute rule-local and context-sensitive
/// lookahead.
///
/// Given a state and an optional calling context, an analyzer returns the
/// symbols that can be matched next.  With no context, reaching the end of
/// the state's rule contributes [`EPSILON`](../../token/constant.EPSILON.html).
/// Implementations must be deterministic: the lookahead engine caches their
/// context-free answers per state.
pub trait ClosureAnalyzer {
    /// Compute the lookahead set of `state` within `atn`.
    fn look(&self, atn: &Atn, state: &AtnState, ctx: Option<&dyn RuleContext>) -> IntervalSet;
}
