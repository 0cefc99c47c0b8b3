//! Automaton states and their variants.

use std::fmt::{self, Display};

use log::warn;

use super::AtnId;
use super::cache::LookaheadCache;
use super::transition::Transition;

/// Decision-point variants of [`StateKind`](enum.StateKind.html).
///
/// Links to related states are state numbers; they are `None` until the
/// automaton's builder (or deserializer) fills them in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecisionKind {
    /// Entry state of a lexer mode; chooses among the mode's token rules.
    TokensStart,

    /// Start of a `( ... | ... )` block.
    BasicBlockStart {
        /// Matching block-end state.
        end_state: Option<usize>
    },

    /// Start of the block inside a `( ... )+` loop.
    PlusBlockStart {
        /// Matching block-end state.
        end_state: Option<usize>,
        /// The loop's plus-loop-back decision.
        loop_back_state: Option<usize>
    },

    /// Start of the block inside a `( ... )*` loop.
    StarBlockStart {
        /// Matching block-end state.
        end_state: Option<usize>
    },

    /// Decision between entering and skipping a `( ... )*` loop.
    StarLoopEntry {
        /// The loop's star-loop-back state.
        loop_back_state: Option<usize>
    },

    /// Decision between repeating and leaving a `( ... )+` loop.
    PlusLoopBack
}

impl DecisionKind {
    /// Block-end state for the block-start variants.
    pub fn end_state(&self) -> Option<usize> {
        match self {
            &DecisionKind::BasicBlockStart{end_state}
            | &DecisionKind::PlusBlockStart{end_state, ..}
            | &DecisionKind::StarBlockStart{end_state} => end_state,
            _ => None
        }
    }

    /// Check whether this is one of the block-start variants.
    pub fn is_block_start(&self) -> bool {
        match self {
            &DecisionKind::BasicBlockStart{..} | &DecisionKind::PlusBlockStart{..}
                | &DecisionKind::StarBlockStart{..} => true,
            _ => false
        }
    }
}

/// The closed set of state variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateKind {
    /// Plain state with no structural role.
    Basic,

    /// Entry state of a rule.
    RuleStart {
        /// The rule's stop state.
        stop_state: Option<usize>
    },

    /// Exit state of a rule.
    RuleStop,

    /// End of a block.
    BlockEnd {
        /// Matching block-start state.
        start_state: Option<usize>
    },

    /// State following a loop.
    LoopEnd {
        /// The loop's loop-back state.
        loop_back_state: Option<usize>
    },

    /// Back edge of a `( ... )*` loop.
    StarLoopBack,

    /// A state where the recognizer chooses among alternatives.
    Decision(DecisionKind)
}

impl StateKind {
    /// Numeric code used for this kind in serialized automatons.  Code `0` is
    /// reserved for invalid slots.
    pub fn serialization_type(&self) -> u8 {
        match self {
            &StateKind::Basic => 1,
            &StateKind::RuleStart{..} => 2,
            &StateKind::Decision(DecisionKind::BasicBlockStart{..}) => 3,
            &StateKind::Decision(DecisionKind::PlusBlockStart{..}) => 4,
            &StateKind::Decision(DecisionKind::StarBlockStart{..}) => 5,
            &StateKind::Decision(DecisionKind::TokensStart) => 6,
            &StateKind::RuleStop => 7,
            &StateKind::BlockEnd{..} => 8,
            &StateKind::StarLoopBack => 9,
            &StateKind::Decision(DecisionKind::StarLoopEntry{..}) => 10,
            &StateKind::Decision(DecisionKind::PlusLoopBack) => 11,
            &StateKind::LoopEnd{..} => 12,
        }
    }

    /// Short human-readable name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            &StateKind::Basic => "BASIC",
            &StateKind::RuleStart{..} => "RULE_START",
            &StateKind::Decision(DecisionKind::BasicBlockStart{..}) => "BLOCK_START",
            &StateKind::Decision(DecisionKind::PlusBlockStart{..}) => "PLUS_BLOCK_START",
            &StateKind::Decision(DecisionKind::StarBlockStart{..}) => "STAR_BLOCK_START",
            &StateKind::Decision(DecisionKind::TokensStart) => "TOKEN_START",
            &StateKind::RuleStop => "RULE_STOP",
            &StateKind::BlockEnd{..} => "BLOCK_END",
            &StateKind::StarLoopBack => "STAR_LOOP_BACK",
            &StateKind::Decision(DecisionKind::StarLoopEntry{..}) => "STAR_LOOP_ENTRY",
            &StateKind::Decision(DecisionKind::PlusLoopBack) => "PLUS_LOOP_BACK",
            &StateKind::LoopEnd{..} => "LOOP_END",
        }
    }
}


bitflags::bitflags! {
    /// Per-state attributes that don't warrant their own variant.
    pub struct StateFlags: u8 {
        /// Every outgoing transition is an epsilon transition.
        const EPSILON_ONLY = 1 << 0;
        /// Decision prefers exiting over continuing.
        const NON_GREEDY = 1 << 1;
        /// Rule start of a left-recursive rule.
        const LEFT_RECURSIVE = 1 << 2;
        /// Star-loop entry that implements precedence climbing.
        const PRECEDENCE_DECISION = 1 << 3;
    }
}

// ================================================================
// States

/** A node within a grammar's automaton.

    The envelope carries everything common to all variants: the state's number
    and owning automaton (both assigned by `Atn::add_state`), the rule it
    belongs to, its outgoing transitions, and the write-once cache of the
    symbols reachable from it without leaving that rule.
 */
#[derive(Debug)]
pub struct AtnState {
    number: Option<usize>,
    atn: Option<AtnId>,
    rule_index: usize,
    kind: StateKind,
    decision: Option<usize>,
    flags: StateFlags,
    transitions: Vec<Transition>,
    next_token_within_rule: LookaheadCache
}

impl AtnState {
    /** Create a detached state of the given kind within rule `rule_index`.
     */
    pub fn new(kind: StateKind, rule_index: usize) -> Self {
        AtnState{number: None, atn: None, rule_index: rule_index, kind: kind, decision: None,
                 flags: StateFlags::empty(), transitions: Vec::new(),
                 next_token_within_rule: LookaheadCache::new()}
    }

    /// Create a detached basic state.
    #[inline]
    pub fn basic(rule_index: usize) -> Self {
        AtnState::new(StateKind::Basic, rule_index)
    }

    /// State number, once the state has been added to an automaton.
    #[inline]
    pub fn number(&self) -> Option<usize> {
        self.number
    }

    /// Identity of the owning automaton, once added to one.
    #[inline]
    pub fn atn(&self) -> Option<AtnId> {
        self.atn
    }

    pub(crate) fn attach(&mut self, atn: AtnId, number: usize) {
        self.atn = Some(atn);
        self.number = Some(number);
    }

    pub(crate) fn detach(&mut self) {
        self.atn = None;
    }

    /// Index of the rule this state belongs to.
    #[inline]
    pub fn rule_index(&self) -> usize {
        self.rule_index
    }

    /// The state's variant.
    #[inline]
    pub fn kind(&self) -> &StateKind {
        &self.kind
    }

    /// Mutable access to the state's variant, for filling in links between
    /// states during construction.
    #[inline]
    pub fn kind_mut(&mut self) -> &mut StateKind {
        &mut self.kind
    }

    /// Check whether this is a decision state.
    #[inline]
    pub fn is_decision(&self) -> bool {
        match self.kind { StateKind::Decision(_) => true, _ => false }
    }

    /// Check whether this is a rule stop state.
    #[inline]
    pub fn is_rule_stop(&self) -> bool {
        self.kind == StateKind::RuleStop
    }

    /// Decision number, for decision states that have been defined in their
    /// automaton.
    #[inline]
    pub fn decision(&self) -> Option<usize> {
        self.decision
    }

    pub(crate) fn set_decision(&mut self, decision: usize) {
        self.decision = Some(decision);
    }

    /// The state's attribute flags.
    #[inline]
    pub fn flags(&self) -> StateFlags {
        self.flags
    }

    /// Set or clear attribute flags.  `EPSILON_ONLY` is maintained by
    /// `add_transition` and is not affected.
    pub fn set_flags(&mut self, flags: StateFlags, on: bool) {
        let flags = flags - StateFlags::EPSILON_ONLY;
        if on { self.flags.insert(flags); }
        else { self.flags.remove(flags); }
    }

    /// Check whether a decision prefers exiting.
    #[inline]
    pub fn is_non_greedy(&self) -> bool {
        self.flags.contains(StateFlags::NON_GREEDY)
    }

    /// Check whether every outgoing transition is an epsilon transition.
    #[inline]
    pub fn only_has_epsilon_transitions(&self) -> bool {
        self.flags.contains(StateFlags::EPSILON_ONLY)
    }

    /// Fetch the outgoing transitions in order.
    #[inline(always)]
    pub fn transitions(&self) -> &[Transition] {
        self.transitions.as_slice()
    }

    /// Fetch one outgoing transition.
    #[inline]
    pub fn transition(&self, i: usize) -> Option<&Transition> {
        self.transitions.get(i)
    }

    /// Append an outgoing transition.
    pub fn add_transition(&mut self, t: Transition) {
        let at = self.transitions.len();
        self.add_transition_at(at, t);
    }

    /// Insert an outgoing transition at position `index`.
    pub fn add_transition_at(&mut self, index: usize, t: Transition) {
        if self.transitions.is_empty() {
            self.flags.set(StateFlags::EPSILON_ONLY, t.is_epsilon());
        } else if self.only_has_epsilon_transitions() != t.is_epsilon() {
            warn!("ATN state {} has both epsilon and non-epsilon transitions", self);
            self.flags.remove(StateFlags::EPSILON_ONLY);
        }
        self.transitions.insert(index, t);
    }

    /// Remove and return the transition at position `index`.
    pub fn remove_transition(&mut self, index: usize) -> Option<Transition> {
        if index < self.transitions.len() { Some(self.transitions.remove(index)) }
        else { None }
    }

    /// The write-once cache of symbols reachable from this state without
    /// leaving its rule.
    #[inline]
    pub fn next_token_within_rule(&self) -> &LookaheadCache {
        &self.next_token_within_rule
    }
}

impl PartialEq for AtnState {
    /// States are identified by their automaton and number.
    fn eq(&self, other: &Self) -> bool {
        self.number.is_some() && self.number == other.number && self.atn == other.atn
    }
}

impl Display for AtnState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.number {
            Some(n) => write!(f, "{}", n),
            None => f.write_str("<detached>")
        }
    }
}
