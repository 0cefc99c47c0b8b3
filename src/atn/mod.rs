//! Augmented transition networks: the state graph behind a generated parser.
//!
//! [`Atn`](struct.Atn.html) owns every [`AtnState`](state/struct.AtnState.html)
//! of a grammar.  States are addressed by a dense *state number* handed out in
//! creation order; decision states additionally get a *decision number* from a
//! separate sequence.  Links between states (transition targets, follow
//! states, block ends, ...) are plain state numbers, so the automaton is a
//! flat table rather than a web of owning pointers.
//!
//! An automaton is built through `&mut` access (usually by a deserializer or
//! an [`AtnBuilder`](build/struct.AtnBuilder.html)) and then
//! [sealed](struct.Atn.html#method.seal) into an `Arc<Atn>` for sharing.
//! After sealing, the only mutation is the write-once lookahead cache each
//! state carries, which is safe to fill from any number of threads.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;

use crate::error::{AtnError, Result};

pub mod interface;
pub mod state;
pub mod transition;
pub mod cache;
pub mod context;
pub mod lexer_action;
pub mod build;
pub mod verify;
#[cfg(feature="dot")]
pub mod dot;

pub use self::interface::{ClosureAnalyzer, RuleContext};
pub use self::state::{AtnState, DecisionKind, StateFlags, StateKind};
pub use self::transition::{Transition, TransitionKind};
pub use self::cache::{CacheState, LookaheadCache};
pub use self::context::InvocationContext;
pub use self::lexer_action::LexerAction;
pub use self::build::{AtnBuilder, LoopHandle, RuleHandle};

static NEXT_ATN_ID: AtomicUsize = AtomicUsize::new(0);

/// Process-unique identity of an automaton.  States record the id of the
/// automaton that owns them instead of pointing back at it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtnId(usize);

impl AtnId {
    fn next() -> Self {
        AtnId(NEXT_ATN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Kind of recognizer an automaton was generated for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GrammarType {
    /// Character-level automaton with modes and lexer actions.
    Lexer,
    /// Token-level automaton.
    Parser
}

// ================================================================
// Atn

/// A grammar's state graph and the tables indexing it.
#[derive(Debug)]
pub struct Atn {
    id: AtnId,
    grammar_type: GrammarType,
    max_token_type: i32,

    /// State slots indexed by state number; removed states leave `None`.
    states: Vec<Option<AtnState>>,

    /// State number of each decision state, indexed by decision number.
    decision_to_state: Vec<usize>,

    rule_to_start_state: Vec<usize>,

    /// Absent until the first stop state is registered.
    rule_to_stop_state: Option<Vec<Option<usize>>>,

    mode_name_to_start_state: HashMap<String, usize>,
    mode_to_start_state: Vec<usize>,

    /// Lexer only: token type produced by each rule.
    rule_to_token_type: Option<Vec<i32>>,

    /// Lexer only: action descriptors referenced by action transitions.
    lexer_actions: Option<Vec<LexerAction>>
}

impl Atn {
    /// Create an empty automaton.  `max_token_type` bounds every symbol the
    /// automaton's transitions can match.
    pub fn new(grammar_type: GrammarType, max_token_type: i32) -> Self {
        Atn{id: AtnId::next(),
            grammar_type: grammar_type,
            max_token_type: max_token_type,
            states: Vec::new(),
            decision_to_state: Vec::new(),
            rule_to_start_state: Vec::new(),
            rule_to_stop_state: None,
            mode_name_to_start_state: HashMap::new(),
            mode_to_start_state: Vec::new(),
            rule_to_token_type: None,
            lexer_actions: None}
    }

    /// This automaton's identity.
    #[inline]
    pub fn id(&self) -> AtnId {
        self.id
    }

    /// Kind of recognizer this automaton drives.
    #[inline]
    pub fn grammar_type(&self) -> GrammarType {
        self.grammar_type
    }

    /// Largest symbol any transition can match.
    #[inline]
    pub fn max_token_type(&self) -> i32 {
        self.max_token_type
    }

    // ----------------------------------------------------------------
    // States

    /// Add a state, assigning it the next state number and recording this
    /// automaton as its owner.  Returns the assigned number.
    pub fn add_state(&mut self, mut state: AtnState) -> usize {
        let n = self.states.len();
        state.attach(self.id, n);
        self.states.push(Some(state));
        n
    }

    /// Reserve the next state number without putting a state in it.
    ///
    /// Deserializers use this for slots whose state type is invalid, so that
    /// the numbers of later states still line up.
    pub fn add_empty_slot(&mut self) -> usize {
        self.states.push(None);
        self.states.len() - 1
    }

    /// Remove the state numbered `number`, leaving an empty slot behind.
    ///
    /// No other state is renumbered and the slot is never reused.  The removed
    /// state is handed back with its owner link cleared; its transitions
    /// still refer to this automaton's state numbers.
    pub fn remove_state(&mut self, number: usize) -> Option<AtnState> {
        let mut removed = self.states.get_mut(number).and_then(Option::take)?;
        removed.detach();
        Some(removed)
    }

    /// Fetch the state numbered `number`, if that slot holds one.
    #[inline]
    pub fn state(&self, number: usize) -> Option<&AtnState> {
        self.states.get(number).and_then(Option::as_ref)
    }

    /// Fetch the state numbered `number` for modification.
    #[inline]
    pub fn state_mut(&mut self, number: usize) -> Option<&mut AtnState> {
        self.states.get_mut(number).and_then(Option::as_mut)
    }

    /// Number of state slots, including emptied ones.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Iterate over the states that have not been removed.
    pub fn states<'a>(&'a self) -> impl Iterator<Item=&'a AtnState> + 'a {
        self.states.iter().filter_map(Option::as_ref)
    }

    /// Append a transition to the state numbered `from`.
    pub fn add_transition(&mut self, from: usize, t: Transition) -> Result<()> {
        let count = self.states.len();
        let state = self.state_mut(from).ok_or_else(|| AtnError::invalid_state(from, count))?;
        state.add_transition(t);
        Ok(())
    }

    // ----------------------------------------------------------------
    // Decisions

    /// Register the decision state numbered `number`, assigning it the next
    /// decision number.  Returns that decision number.
    pub fn define_decision_state(&mut self, number: usize) -> Result<usize> {
        let count = self.states.len();
        let state = self.states.get_mut(number).and_then(Option::as_mut)
            .ok_or_else(|| AtnError::invalid_state(number, count))?;

        if !state.is_decision() {
            return Err(AtnError::malformed(number, "not a decision state"));
        }
        if state.decision().is_some() {
            return Err(AtnError::malformed(number, "decision already defined"));
        }

        let decision = self.decision_to_state.len();
        self.decision_to_state.push(number);
        state.set_decision(decision);
        Ok(decision)
    }

    /// Fetch the state registered under decision number `decision`.
    ///
    /// Returns `None` if no decisions have been defined yet, or if the
    /// decision's state was later removed.
    ///
    /// # Panics
    ///
    /// If decisions exist but `decision` is not one of them.  Decision
    /// numbers come from the automaton itself, so an unknown one is a bug in
    /// the caller.
    pub fn decision_state(&self, decision: usize) -> Option<&AtnState> {
        if self.decision_to_state.is_empty() {
            return None;
        }
        self.state(self.decision_to_state[decision])
    }

    /// Number of defined decisions.
    #[inline]
    pub fn decision_count(&self) -> usize {
        self.decision_to_state.len()
    }

    // ----------------------------------------------------------------
    // Rules

    /// Register the rule-start state numbered `start` as the entry of the next
    /// rule.  Returns the rule index, which must match the state's own.
    pub fn add_rule_start_state(&mut self, start: usize) -> Result<usize> {
        let count = self.states.len();
        let rule = self.rule_to_start_state.len();
        let state = self.state(start).ok_or_else(|| AtnError::invalid_state(start, count))?;

        match state.kind() {
            &StateKind::RuleStart{..} => (),
            _ => return Err(AtnError::malformed(start, "not a rule start state"))
        }
        if state.rule_index() != rule {
            return Err(AtnError::malformed(start, "rule start state registered out of order"));
        }

        self.rule_to_start_state.push(start);
        if let Some(ref mut stops) = self.rule_to_stop_state {
            stops.resize(self.rule_to_start_state.len(), None);
        }
        Ok(rule)
    }

    /// Register the rule-stop state numbered `stop` as the exit of its rule,
    /// and link the rule's start state to it.
    pub fn set_rule_stop_state(&mut self, stop: usize) -> Result<()> {
        let count = self.states.len();
        let state = self.state(stop).ok_or_else(|| AtnError::invalid_state(stop, count))?;
        if !state.is_rule_stop() {
            return Err(AtnError::malformed(stop, "not a rule stop state"));
        }

        let rule = state.rule_index();
        let start = match self.rule_to_start_state.get(rule) {
            Some(&s) => s,
            None => return Err(AtnError::malformed(stop, "stop state for a rule with no start state"))
        };

        let n_rules = self.rule_to_start_state.len();
        let stops = self.rule_to_stop_state.get_or_insert_with(Vec::new);
        stops.resize(n_rules, None);
        if let Some(existing) = stops[rule] {
            if existing != stop {
                return Err(AtnError::malformed(stop, "rule already has a stop state"));
            }
        }
        stops[rule] = Some(stop);

        if let Some(s) = self.state_mut(start) {
            if let &mut StateKind::RuleStart{ref mut stop_state} = s.kind_mut() {
                *stop_state = Some(stop);
            }
        }
        Ok(())
    }

    /// Entry state of rule `rule`.
    pub fn rule_start_state(&self, rule: usize) -> Option<&AtnState> {
        self.rule_to_start_state.get(rule).and_then(|&n| self.state(n))
    }

    /// Exit state of rule `rule`, if stop states are tracked.
    pub fn rule_stop_state(&self, rule: usize) -> Option<&AtnState> {
        self.rule_to_stop_state.as_ref()
            .and_then(|stops| stops.get(rule).cloned().flatten())
            .and_then(|n| self.state(n))
    }

    /// Check whether this automaton tracks rule stop states at all.
    #[inline]
    pub fn tracks_rule_stops(&self) -> bool {
        self.rule_to_stop_state.is_some()
    }

    /// Number of rules with a registered start state.
    #[inline]
    pub fn rule_count(&self) -> usize {
        self.rule_to_start_state.len()
    }

    // ----------------------------------------------------------------
    // Lexer tables

    /// Register the tokens-start state numbered `start` as the entry of the
    /// next lexer mode, optionally under a name.  Returns the mode index.
    pub fn define_mode(&mut self, name: Option<&str>, start: usize) -> Result<usize> {
        let count = self.states.len();
        let state = self.state(start).ok_or_else(|| AtnError::invalid_state(start, count))?;
        if state.kind() != &StateKind::Decision(DecisionKind::TokensStart) {
            return Err(AtnError::malformed(start, "not a tokens-start state"));
        }

        let mode = self.mode_to_start_state.len();
        self.mode_to_start_state.push(start);
        if let Some(name) = name {
            self.mode_name_to_start_state.insert(name.to_owned(), start);
        }
        Ok(mode)
    }

    /// Entry state of lexer mode `mode`.
    pub fn mode_start_state(&self, mode: usize) -> Option<&AtnState> {
        self.mode_to_start_state.get(mode).and_then(|&n| self.state(n))
    }

    /// Entry state of the lexer mode called `name`.
    pub fn mode_start_state_by_name(&self, name: &str) -> Option<&AtnState> {
        self.mode_name_to_start_state.get(name).and_then(|&n| self.state(n))
    }

    /// Number of lexer modes.
    #[inline]
    pub fn mode_count(&self) -> usize {
        self.mode_to_start_state.len()
    }

    /// Set the token type produced by each rule (lexer automatons).
    pub fn set_rule_token_types(&mut self, types: Vec<i32>) {
        self.rule_to_token_type = Some(types);
    }

    /// Token type produced by rule `rule`, when known.
    pub fn rule_token_type(&self, rule: usize) -> Option<i32> {
        self.rule_to_token_type.as_ref().and_then(|t| t.get(rule).cloned())
    }

    /// Set the lexer action descriptors referenced by action transitions.
    pub fn set_lexer_actions(&mut self, actions: Vec<LexerAction>) {
        self.lexer_actions = Some(actions);
    }

    /// All lexer action descriptors; empty for parser automatons.
    pub fn lexer_actions(&self) -> &[LexerAction] {
        self.lexer_actions.as_deref().unwrap_or(&[])
    }

    /// Lexer action descriptor number `index`.
    pub fn lexer_action(&self, index: usize) -> Option<&LexerAction> {
        self.lexer_actions.as_ref().and_then(|a| a.get(index))
    }

    // ----------------------------------------------------------------

    /// Check the automaton's structure and freeze it for shared use.
    ///
    /// The returned `Arc` only hands out `&Atn`, so no construction method can
    /// run once queries may be in flight.
    pub fn seal(self) -> Result<Arc<Atn>> {
        verify::verify(&self)?;
        debug!("sealed ATN {:?}: {} states, {} decisions, {} rules",
               self.id, self.states.len(), self.decision_to_state.len(), self.rule_to_start_state.len());
        Ok(Arc::new(self))
    }
}
