//! Lookahead queries: which symbols may be matched next.
//!
//! Two flavours of question are answered here.  *Rule-local* lookahead
//! ([`next_tokens_no_context`](struct.LookaheadEngine.html#method.next_tokens_no_context))
//! ignores who called the current rule and is cached on the state the first
//! time it is asked for.  *Expected tokens*
//! ([`expected_tokens`](struct.LookaheadEngine.html#method.expected_tokens))
//! climbs a parser's calling context until the answer no longer depends on
//! what follows, which is what error reporting needs.
//!
//! Every query is also available directly on [`Atn`](../atn/struct.Atn.html)
//! using the default [`Ll1Analyzer`](ll1/struct.Ll1Analyzer.html).

use std::borrow::Cow;

use log::{debug, trace, warn};
use once_cell::sync::Lazy;

use crate::atn::{Atn, AtnState, ClosureAnalyzer, RuleContext, Transition};
use crate::error::{AtnError, Result};
use crate::token::{EOF, EPSILON};
use crate::util::interval::IntervalSet;

pub mod ll1;

pub use self::ll1::{Ll1Analyzer, HIT_PRED};

/// Alternative number meaning "no alternative".  A decision's real
/// alternatives are numbered from `INVALID_ALT_NUMBER + 1`, in transition
/// order.
pub const INVALID_ALT_NUMBER: usize = 0;

/// Answer for states the queried automaton does not own.
static NO_LOOKAHEAD: Lazy<IntervalSet> = Lazy::new(|| {
    let mut set = IntervalSet::new();
    set.freeze();
    set
});

/// Answers lookahead queries against one automaton.
///
/// Engines are cheap to create and hold no state of their own; cached results
/// live on the automaton's states.  Those caches are shared by every engine,
/// so all analyzers used with one automaton should agree on context-free
/// lookahead.
pub struct LookaheadEngine<'a, A: ClosureAnalyzer = Ll1Analyzer> {
    atn: &'a Atn,
    analyzer: A
}

impl<'a> LookaheadEngine<'a> {
    /// Create an engine using the default analyzer.
    pub fn new(atn: &'a Atn) -> Self {
        LookaheadEngine{atn: atn, analyzer: Ll1Analyzer::new()}
    }
}

impl<'a, A: ClosureAnalyzer> LookaheadEngine<'a, A> {
    /// Create an engine using a custom analyzer.
    pub fn with_analyzer(atn: &'a Atn, analyzer: A) -> Self {
        LookaheadEngine{atn: atn, analyzer: analyzer}
    }

    /// The automaton queries run against.
    #[inline]
    pub fn atn(&self) -> &'a Atn {
        self.atn
    }

    /// The analyzer computing uncached sets.
    #[inline]
    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Symbols that can follow `state` without leaving its rule.
    ///
    /// If control can reach the end of the rule the set contains `EPSILON`.
    /// The set is computed once per state and frozen; later calls (from any
    /// thread) return the same reference.  A state owned by some other
    /// automaton gets an empty set, and its cache is left untouched.
    pub fn next_tokens_no_context(&self, state: &'a AtnState) -> &'a IntervalSet {
        if state.atn() != Some(self.atn.id()) {
            warn!("ATN state {} is not part of the queried automaton", state);
            return &NO_LOOKAHEAD;
        }
        state.next_token_within_rule().get_or_compute(|| {
            let set = self.analyzer.look(self.atn, state, None);
            debug!("rule-local lookahead of ATN state {}: {}", state, set);
            set
        })
    }

    /// Symbols that can follow `state` given the calling context `ctx`.
    ///
    /// Never cached.  An empty context is treated as no context at all.
    pub fn next_tokens_in_context(&self, state: &'a AtnState, ctx: &dyn RuleContext) -> IntervalSet {
        if ctx.is_empty() { self.analyzer.look(self.atn, state, None) }
        else { self.analyzer.look(self.atn, state, Some(ctx)) }
    }

    /// Symbols that can follow `state`, using `ctx` when it has any frames
    /// and the cached rule-local set otherwise.
    pub fn next_tokens(&self, state: &'a AtnState, ctx: Option<&dyn RuleContext>) -> Cow<'a, IntervalSet> {
        match ctx {
            Some(c) if !c.is_empty() => Cow::Owned(self.next_tokens_in_context(state, c)),
            _ => Cow::Borrowed(self.next_tokens_no_context(state))
        }
    }

    /// Compute the set of symbols a parser in state `state_number`, called
    /// through `ctx`, would accept next.
    ///
    /// Starting from the state's rule-local lookahead, each time the rule can
    /// end without consuming anything the query moves out one frame and adds
    /// the lookahead after the calling rule transition.  `EPSILON` never
    /// appears in the result; if the outermost rule can end, `EOF` is
    /// included instead.
    ///
    /// Fails with `InvalidState` for a number that names no state, and with
    /// `Malformed` when a frame's invoking state is not a rule invocation.
    pub fn expected_tokens(&self, state_number: isize, ctx: Option<&dyn RuleContext>) -> Result<IntervalSet> {
        let count = self.atn.state_count();
        let state = usize::try_from(state_number).ok()
            .and_then(|n| self.atn.state(n))
            .ok_or(AtnError::InvalidState{number: state_number, count: count})?;

        let mut following = self.next_tokens_no_context(state);
        let mut expected = IntervalSet::new();
        expected.add_set(following);
        if !following.contains(EPSILON) {
            return Ok(expected);
        }
        expected.remove_one(EPSILON);

        let mut cur = ctx;
        while let Some(c) = cur {
            let invoking = match c.invoking_state() {
                Some(n) if following.contains(EPSILON) => n,
                _ => break
            };
            let invoker = self.atn.state(invoking).ok_or_else(|| AtnError::invalid_state(invoking, count))?;
            let follow = invoker.transition(0).and_then(Transition::follow_state)
                .ok_or(AtnError::malformed(invoking, "invoking state has no rule transition"))?;
            let follow_state = self.atn.state(follow)
                .ok_or(AtnError::malformed(invoking, "rule transition's follow state is missing"))?;

            following = self.next_tokens_no_context(follow_state);
            trace!("expected tokens of state {}: ascended through state {} to {}: {}",
                   state_number, invoking, follow, following);
            expected.add_set(following);
            expected.remove_one(EPSILON);
            cur = c.parent();
        }

        if following.contains(EPSILON) {
            expected.add_one(EOF);
        }
        Ok(expected)
    }
}

// ----------------------------------------------------------------

impl Atn {
    /// Rule-local lookahead of `state`, cached.  See
    /// [`LookaheadEngine::next_tokens_no_context`](../lookahead/struct.LookaheadEngine.html#method.next_tokens_no_context).
    pub fn next_tokens_no_context<'a>(&'a self, state: &'a AtnState) -> &'a IntervalSet {
        LookaheadEngine::new(self).next_tokens_no_context(state)
    }

    /// Lookahead of `state` within the calling context `ctx`.  See
    /// [`LookaheadEngine::next_tokens_in_context`](../lookahead/struct.LookaheadEngine.html#method.next_tokens_in_context).
    pub fn next_tokens_in_context<'a>(&'a self, state: &'a AtnState, ctx: &dyn RuleContext) -> IntervalSet {
        LookaheadEngine::new(self).next_tokens_in_context(state, ctx)
    }

    /// Lookahead of `state`, in context if one is given.  See
    /// [`LookaheadEngine::next_tokens`](../lookahead/struct.LookaheadEngine.html#method.next_tokens).
    pub fn next_tokens<'a>(&'a self, state: &'a AtnState, ctx: Option<&dyn RuleContext>) -> Cow<'a, IntervalSet> {
        LookaheadEngine::new(self).next_tokens(state, ctx)
    }

    /// Symbols acceptable next in state `state_number` under `ctx`.  See
    /// [`LookaheadEngine::expected_tokens`](../lookahead/struct.LookaheadEngine.html#method.expected_tokens).
    pub fn expected_tokens(&self, state_number: isize, ctx: Option<&dyn RuleContext>) -> Result<IntervalSet> {
        LookaheadEngine::new(self).expected_tokens(state_number, ctx)
    }
}
