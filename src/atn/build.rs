//! Convenience layer for assembling automatons by hand.
//!
//! Deserializers talk to [`Atn`](../struct.Atn.html) directly; this builder
//! is for tools and tests that lay out rules state by state.  Every helper
//! returns the state numbers it creates, and the transition helpers chain:
//!
//! ```rust
//! use atn_runtime::atn::{AtnBuilder, GrammarType};
//!
//! // r : 'A' 'B' ;
//! let mut b = AtnBuilder::new(GrammarType::Parser, 2);
//! let r = b.rule();
//! let (p, q, s) = (b.basic(r.index), b.basic(r.index), b.basic(r.index));
//! b.epsilon(r.start, p).atom(p, q, 1).atom(q, s, 2).epsilon(s, r.stop);
//! let atn = b.finish().unwrap();
//! assert_eq!(5, atn.state_count());
//! ```
//!
//! Errors (say, a transition out of a state number that doesn't exist) are
//! held back until [`finish`](struct.AtnBuilder.html#method.finish), which
//! also verifies the finished automaton.

use crate::error::{AtnError, Result};
use crate::util::interval::IntervalSet;
use super::{Atn, GrammarType};
use super::state::{AtnState, DecisionKind, StateKind};
use super::transition::{Transition, TransitionKind};
use super::verify;

/// State numbers of a rule created by [`AtnBuilder::rule`](struct.AtnBuilder.html#method.rule).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RuleHandle {
    /// Rule index.
    pub index: usize,
    /// The rule's start state.
    pub start: usize,
    /// The rule's stop state.
    pub stop: usize
}

/// State numbers of a `( ... )*` loop created by
/// [`AtnBuilder::star_loop`](struct.AtnBuilder.html#method.star_loop).
///
/// Alternatives go from `block_start` to `block_end`; the loop is entered at
/// `entry` and left through `loop_end`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LoopHandle {
    /// Decision between running the loop body again and leaving.
    pub entry: usize,
    /// Decision among the loop body's alternatives.
    pub block_start: usize,
    /// Join point of the loop body's alternatives.
    pub block_end: usize,
    /// Back edge to `entry`.
    pub loop_back: usize,
    /// State following the loop.
    pub loop_end: usize
}

/// Incremental automaton builder.
pub struct AtnBuilder {
    atn: Atn,
    error: Option<AtnError>
}

impl AtnBuilder {
    /// Start building an empty automaton.
    pub fn new(grammar_type: GrammarType, max_token_type: i32) -> Self {
        AtnBuilder{atn: Atn::new(grammar_type, max_token_type), error: None}
    }

    /// Keep the first error seen; later ones are usually fallout from it.
    fn record<T>(&mut self, r: Result<T>) -> Option<T> {
        match r {
            Ok(v) => Some(v),
            Err(e) => {
                if self.error.is_none() {
                    self.error = Some(e);
                }
                None
            }
        }
    }

    /// Direct access to the automaton under construction.
    #[inline]
    pub fn atn_mut(&mut self) -> &mut Atn {
        &mut self.atn
    }

    // ----------------------------------------------------------------
    // States

    /// Create the next rule: a registered start/stop pair.
    pub fn rule(&mut self) -> RuleHandle {
        let index = self.atn.rule_count();
        let start = self.atn.add_state(AtnState::new(StateKind::RuleStart{stop_state: None}, index));
        let stop = self.atn.add_state(AtnState::new(StateKind::RuleStop, index));

        let r = self.atn.add_rule_start_state(start);
        self.record(r);
        let r = self.atn.set_rule_stop_state(stop);
        self.record(r);
        RuleHandle{index: index, start: start, stop: stop}
    }

    /// Add a state of arbitrary kind to rule `rule`.
    pub fn state(&mut self, rule: usize, kind: StateKind) -> usize {
        self.atn.add_state(AtnState::new(kind, rule))
    }

    /// Add a basic state to rule `rule`.
    #[inline]
    pub fn basic(&mut self, rule: usize) -> usize {
        self.state(rule, StateKind::Basic)
    }

    /// Add a decision state to rule `rule` and define its decision.
    pub fn decision(&mut self, rule: usize, kind: DecisionKind) -> usize {
        let n = self.state(rule, StateKind::Decision(kind));
        let r = self.atn.define_decision_state(n);
        self.record(r);
        n
    }

    /// Add a `( ... | ... )` block to rule `rule`, returning its start and end
    /// states.  Alternatives run from the start to the end; the end's
    /// outgoing transition is left to the caller.
    pub fn block(&mut self, rule: usize) -> (usize, usize) {
        let start = self.decision(rule, DecisionKind::BasicBlockStart{end_state: None});
        let end = self.state(rule, StateKind::BlockEnd{start_state: Some(start)});
        self.link_block_end(start, end);
        (start, end)
    }

    /// Add a greedy `( ... )*` loop to rule `rule`.
    pub fn star_loop(&mut self, rule: usize) -> LoopHandle {
        let entry = self.decision(rule, DecisionKind::StarLoopEntry{loop_back_state: None});
        let block_start = self.decision(rule, DecisionKind::StarBlockStart{end_state: None});
        let block_end = self.state(rule, StateKind::BlockEnd{start_state: Some(block_start)});
        let loop_back = self.state(rule, StateKind::StarLoopBack);
        let loop_end = self.state(rule, StateKind::LoopEnd{loop_back_state: Some(loop_back)});
        self.link_block_end(block_start, block_end);

        if let Some(s) = self.atn.state_mut(entry) {
            if let &mut StateKind::Decision(DecisionKind::StarLoopEntry{ref mut loop_back_state}) = s.kind_mut() {
                *loop_back_state = Some(loop_back);
            }
        }

        self.epsilon(entry, block_start)
            .epsilon(entry, loop_end)
            .epsilon(block_end, loop_back)
            .epsilon(loop_back, entry);
        LoopHandle{entry: entry, block_start: block_start, block_end: block_end,
                   loop_back: loop_back, loop_end: loop_end}
    }

    fn link_block_end(&mut self, start: usize, end: usize) {
        if let Some(s) = self.atn.state_mut(start) {
            if let &mut StateKind::Decision(DecisionKind::BasicBlockStart{ref mut end_state})
                | &mut StateKind::Decision(DecisionKind::PlusBlockStart{ref mut end_state, ..})
                | &mut StateKind::Decision(DecisionKind::StarBlockStart{ref mut end_state}) = s.kind_mut()
            {
                *end_state = Some(end);
            }
        }
    }

    /// Add the entry state of the next lexer mode.  Returns the state number.
    pub fn mode(&mut self, name: Option<&str>) -> usize {
        let n = self.decision(0, DecisionKind::TokensStart);
        let r = self.atn.define_mode(name, n);
        self.record(r);
        n
    }

    // ----------------------------------------------------------------
    // Transitions

    /// Add an arbitrary transition.
    pub fn transition(&mut self, from: usize, t: Transition) -> &mut Self {
        let r = self.atn.add_transition(from, t);
        self.record(r);
        self
    }

    /// Add an epsilon transition.
    #[inline]
    pub fn epsilon(&mut self, from: usize, to: usize) -> &mut Self {
        self.transition(from, Transition::epsilon(to))
    }

    /// Add a transition matching `symbol`.
    #[inline]
    pub fn atom(&mut self, from: usize, to: usize, symbol: i32) -> &mut Self {
        self.transition(from, Transition::atom(to, symbol))
    }

    /// Add a transition matching `start..=stop`.
    #[inline]
    pub fn range(&mut self, from: usize, to: usize, start: i32, stop: i32) -> &mut Self {
        self.transition(from, Transition::range(to, start, stop))
    }

    /// Add a transition matching any symbol in `set`.
    #[inline]
    pub fn set(&mut self, from: usize, to: usize, set: IntervalSet) -> &mut Self {
        self.transition(from, Transition::new(to, TransitionKind::Set(set)))
    }

    /// Add a transition matching any vocabulary symbol not in `set`.
    #[inline]
    pub fn not_set(&mut self, from: usize, to: usize, set: IntervalSet) -> &mut Self {
        self.transition(from, Transition::new(to, TransitionKind::NotSet(set)))
    }

    /// Add a transition matching any vocabulary symbol.
    #[inline]
    pub fn wildcard(&mut self, from: usize, to: usize) -> &mut Self {
        self.transition(from, Transition::new(to, TransitionKind::Wildcard))
    }

    /// Add a semantic-predicate transition.
    pub fn predicate(&mut self, from: usize, to: usize, rule_index: usize, pred_index: usize) -> &mut Self {
        self.transition(from, Transition::new(to, TransitionKind::Predicate{rule_index: rule_index,
                                                                            pred_index: pred_index,
                                                                            is_ctx_dependent: false}))
    }

    /// Add a precedence-predicate transition.
    #[inline]
    pub fn precedence(&mut self, from: usize, to: usize, precedence: i32) -> &mut Self {
        self.transition(from, Transition::new(to, TransitionKind::Precedence(precedence)))
    }

    /// Add an action transition.
    pub fn action(&mut self, from: usize, to: usize, rule_index: usize, action_index: Option<usize>) -> &mut Self {
        self.transition(from, Transition::new(to, TransitionKind::Action{rule_index: rule_index,
                                                                         action_index: action_index,
                                                                         is_ctx_dependent: false}))
    }

    /// Add an invocation of `rule` from `from`, resuming at `follow`.
    #[inline]
    pub fn call(&mut self, from: usize, rule: &RuleHandle, follow: usize) -> &mut Self {
        self.transition(from, Transition::rule(rule.start, rule.index, 0, follow))
    }

    // ----------------------------------------------------------------

    /// Report the first construction error, or verify and return the
    /// automaton.
    pub fn finish(self) -> Result<Atn> {
        if let Some(e) = self.error {
            return Err(e);
        }
        verify::verify(&self.atn)?;
        Ok(self.atn)
    }
}
