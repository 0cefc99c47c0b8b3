//! LL(1) closure analysis: the symbols that can follow a state.
//!
//! The analyzer walks epsilon edges depth-first from a starting state and
//! collects the labels of every symbol-consuming transition it reaches.  When
//! the walk runs off the end of a rule it either records
//! [`EPSILON`](../../token/constant.EPSILON.html) (no calling context), records
//! [`EOF`](../../token/constant.EOF.html) (the calling context is exhausted), or
//! resumes at the caller's follow state.

use std::collections::HashSet;

use bit_set::BitSet;
use log::warn;
use smallvec::SmallVec;

use crate::atn::{Atn, AtnState, ClosureAnalyzer, RuleContext, Transition, TransitionKind};
use crate::token::{EOF, EPSILON, INVALID_TYPE, MIN_USER_TOKEN_TYPE, TokenType};
use crate::util::interval::IntervalSet;

/// Marker added to a lookahead set when the walk stops at a semantic
/// predicate instead of seeing through it.
pub const HIT_PRED: TokenType = INVALID_TYPE;

// ----------------------------------------------------------------
// Return stacks

/// The calling context of a walk, as the follow states still to return to.
///
/// `frames` is ordered outermost first.  When it is used up, `rooted` tells
/// whether the walk started with a real (now exhausted) calling context or
/// with none at all.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReturnStack {
    frames: SmallVec<[usize; 8]>,
    rooted: bool
}

impl ReturnStack {
    /// No calling context.
    fn free() -> Self {
        ReturnStack{frames: SmallVec::new(), rooted: false}
    }

    /// A calling context with no frames left.
    fn exhausted() -> Self {
        ReturnStack{frames: SmallVec::new(), rooted: true}
    }

    /// Resolve a parser's rule-invocation chain into follow states.
    fn from_rule_context(atn: &Atn, ctx: &dyn RuleContext) -> Self {
        let mut frames = SmallVec::<[usize; 8]>::new();
        let mut cur = Some(ctx);

        while let Some(c) = cur {
            let invoking = match c.invoking_state() {
                Some(n) => n,
                None => break
            };
            match atn.state(invoking).and_then(|s| s.transition(0)).and_then(Transition::follow_state) {
                Some(follow) => frames.push(follow),
                None => {
                    warn!("calling context invoked from state {} has no rule transition; \
                           treating it as the outermost frame", invoking);
                    break;
                }
            }
            cur = c.parent();
        }
        frames.reverse();
        ReturnStack{frames: frames, rooted: true}
    }

    fn push(&self, follow: usize) -> Self {
        let mut out = self.clone();
        out.frames.push(follow);
        out
    }

    /// Split off the innermost follow state.
    fn pop(&self) -> Option<(usize, Self)> {
        let mut rest = self.clone();
        rest.frames.pop().map(|follow| (follow, rest))
    }

    #[inline]
    fn is_free(&self) -> bool {
        !self.rooted && self.frames.is_empty()
    }

    #[inline]
    fn is_exhausted(&self) -> bool {
        self.rooted && self.frames.is_empty()
    }
}

// ----------------------------------------------------------------
// Walk

struct Walk<'a> {
    atn: &'a Atn,
    stop_state: Option<usize>,
    see_through_predicates: bool,
    add_eof: bool,

    look: IntervalSet,
    /// Configurations already expanded.
    busy: HashSet<(usize, ReturnStack)>,
    /// Rules invoked on the current path.
    called: BitSet
}

impl<'a> Walk<'a> {
    fn new(atn: &'a Atn, stop_state: Option<usize>, see_through_predicates: bool, add_eof: bool) -> Self {
        Walk{atn: atn, stop_state: stop_state, see_through_predicates: see_through_predicates,
             add_eof: add_eof, look: IntervalSet::new(), busy: HashSet::new(), called: BitSet::new()}
    }

    fn walk(&mut self, number: usize, ctx: &ReturnStack) {
        if !self.busy.insert((number, ctx.clone())) {
            return;
        }
        let atn = self.atn;
        let state = match atn.state(number) {
            Some(s) => s,
            None => return
        };

        if self.stop_state == Some(number) || state.is_rule_stop() {
            if ctx.is_free() {
                self.look.add_one(EPSILON);
                return;
            }
            if ctx.is_exhausted() && self.add_eof {
                self.look.add_one(EOF);
                return;
            }
        }

        if state.is_rule_stop() {
            if let Some((follow, parent)) = ctx.pop() {
                // Returning leaves the rule, so it may legitimately be entered
                // again from the caller.
                let rule = state.rule_index();
                let was_called = self.called.remove(rule);
                self.walk(follow, &parent);
                if was_called {
                    self.called.insert(rule);
                }
                return;
            }
        }

        for t in state.transitions() {
            match t.kind() {
                &TransitionKind::Rule{rule_index, follow_state, ..} => {
                    if self.called.contains(rule_index) {
                        continue;
                    }
                    let inner = ctx.push(follow_state);
                    self.called.insert(rule_index);
                    self.walk(t.target(), &inner);
                    self.called.remove(rule_index);
                },
                &TransitionKind::Predicate{..} | &TransitionKind::Precedence(_) => {
                    if self.see_through_predicates {
                        self.walk(t.target(), ctx);
                    } else {
                        self.look.add_one(HIT_PRED);
                    }
                },
                &TransitionKind::Epsilon{..} | &TransitionKind::Action{..} =>
                    self.walk(t.target(), ctx),
                &TransitionKind::Wildcard =>
                    self.look.add_range(MIN_USER_TOKEN_TYPE, atn.max_token_type()),
                &TransitionKind::NotSet(ref set) =>
                    self.look.add_set(&set.complement(MIN_USER_TOKEN_TYPE, atn.max_token_type())),
                _ => if let Some(label) = t.label() {
                    self.look.add_set(&label);
                }
            }
        }
    }
}

// ----------------------------------------------------------------
// Analyzer

/// The default [`ClosureAnalyzer`](../../atn/interface/trait.ClosureAnalyzer.html).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ll1Analyzer {
    see_through_predicates: bool
}

impl Ll1Analyzer {
    /// Create an analyzer that sees through semantic predicates.
    pub fn new() -> Self {
        Ll1Analyzer{see_through_predicates: true}
    }

    /// Set whether predicates are treated as epsilon edges (`true`) or as
    /// dead ends that contribute [`HIT_PRED`](constant.HIT_PRED.html).
    pub fn see_through_predicates(mut self, on: bool) -> Self {
        self.see_through_predicates = on;
        self
    }

    /// Compute the symbols that can follow `state`, treating `stop_state` (if
    /// given) like the end of a rule.
    ///
    /// With no `ctx`, running off a rule's end contributes `EPSILON`.  With a
    /// calling context, the walk resumes at each caller's follow state in
    /// turn, and contributes `EOF` once the context is used up.  A state that
    /// is not part of `atn` has no lookahead.
    pub fn look_until(&self, atn: &Atn, state: &AtnState, stop_state: Option<usize>,
                      ctx: Option<&dyn RuleContext>) -> IntervalSet {
        let number = match state.number() {
            Some(n) if state.atn() == Some(atn.id()) => n,
            _ => return IntervalSet::new()
        };
        let ctx = match ctx {
            Some(c) => ReturnStack::from_rule_context(atn, c),
            None => ReturnStack::free()
        };

        let mut walk = Walk::new(atn, stop_state, self.see_through_predicates, true);
        walk.walk(number, &ctx);
        walk.look
    }

    /// Compute the lookahead of each alternative of decision state `state`.
    ///
    /// Predicates are never seen through here.  An alternative whose set is
    /// empty, or that runs into a predicate, yields `None`.
    pub fn decision_lookahead(&self, atn: &Atn, state: &AtnState) -> Vec<Option<IntervalSet>> {
        state.transitions().iter().map(|t| {
            let mut walk = Walk::new(atn, None, false, false);
            walk.walk(t.target(), &ReturnStack::exhausted());
            if walk.look.is_empty() || walk.look.contains(HIT_PRED) { None }
            else { Some(walk.look) }
        }).collect()
    }
}

impl Default for Ll1Analyzer {
    #[inline]
    fn default() -> Self {
        Ll1Analyzer::new()
    }
}

impl ClosureAnalyzer for Ll1Analyzer {
    #[inline]
    fn look(&self, atn: &Atn, state: &AtnState, ctx: Option<&dyn RuleContext>) -> IntervalSet {
        self.look_until(atn, state, None, ctx)
    }
}


#[cfg(test)]
mod tests {
    use super::ReturnStack;
    use crate::atn::{AtnBuilder, GrammarType, InvocationContext};

    #[test]
    fn test_return_stack_from_context() {
        // s : a ;  a : 'X' ;
        let mut b = AtnBuilder::new(GrammarType::Parser, 1);
        let s = b.rule();
        let a = b.rule();
        let (p, q) = (b.basic(s.index), b.basic(s.index));
        let x = b.basic(a.index);
        b.epsilon(s.start, p).call(p, &a, q).epsilon(q, s.stop)
            .atom(a.start, x, 1).epsilon(x, a.stop);
        let atn = b.finish().unwrap();

        let ctx = InvocationContext::root(s.index).push(p, a.index);
        let stack = ReturnStack::from_rule_context(&atn, &*ctx);
        assert_eq!(&[q][..], &stack.frames[..]);
        assert!(stack.rooted);

        let (follow, rest) = stack.pop().unwrap();
        assert_eq!(q, follow);
        assert!(rest.is_exhausted());
        assert!(!rest.is_free());
    }

    #[test]
    fn test_unresolvable_frame_ends_stack() {
        let mut b = AtnBuilder::new(GrammarType::Parser, 1);
        let s = b.rule();
        let p = b.basic(s.index);
        b.epsilon(s.start, p).atom(p, s.stop, 1);
        let atn = b.finish().unwrap();

        // `p` has no rule transition.
        let ctx = InvocationContext::root(s.index).push(p, s.index);
        assert!(ReturnStack::from_rule_context(&atn, &*ctx).is_exhausted());
    }
}
