//! Edges between automaton states.

use std::fmt::{self, Display};

use crate::util::interval::IntervalSet;

/// The different kinds of transition an automaton may contain.
///
/// `Epsilon`, `Rule`, `Predicate`, `Action`, and `Precedence` consume no
/// input; the remaining kinds match one symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Unconditional move.  For precedence-climbing rules the deserializer
    /// records the rule whose outermost precedence return this edge models.
    Epsilon {
        /// Rule index for an outermost precedence-return edge, if any.
        outermost_precedence_return: Option<usize>
    },

    /// Match any symbol in `start..=stop`.
    Range {
        /// First symbol matched.
        start: i32,
        /// Last symbol matched (inclusive).
        stop: i32
    },

    /// Invoke a rule.  The transition's target is the invoked rule's start
    /// state; `follow_state` is where the caller resumes afterwards.
    Rule {
        /// Index of the invoked rule.
        rule_index: usize,
        /// Precedence level passed to the invoked rule.
        precedence: i32,
        /// State to resume at once the invoked rule returns.
        follow_state: usize
    },

    /// Gate on a semantic predicate.
    Predicate {
        /// Rule containing the predicate.
        rule_index: usize,
        /// Index of the predicate within its rule.
        pred_index: usize,
        /// Whether the predicate reads the local rule context.
        is_ctx_dependent: bool
    },

    /// Match exactly one symbol.
    Atom(i32),

    /// Run an embedded action.
    Action {
        /// Rule containing the action.
        rule_index: usize,
        /// Index of the action, or `None` for actions the runtime ignores.
        action_index: Option<usize>,
        /// Whether the action reads the local rule context.
        is_ctx_dependent: bool
    },

    /// Match any symbol in the set.
    Set(IntervalSet),

    /// Match any symbol *not* in the set (within the vocabulary).
    NotSet(IntervalSet),

    /// Match any symbol of the vocabulary.
    Wildcard,

    /// Gate on the current precedence level.
    Precedence(i32)
}

impl TransitionKind {
    /// Numeric code used for this kind in serialized automatons.
    pub fn serialization_type(&self) -> u8 {
        match self {
            &TransitionKind::Epsilon{..} => 1,
            &TransitionKind::Range{..} => 2,
            &TransitionKind::Rule{..} => 3,
            &TransitionKind::Predicate{..} => 4,
            &TransitionKind::Atom(_) => 5,
            &TransitionKind::Action{..} => 6,
            &TransitionKind::Set(_) => 7,
            &TransitionKind::NotSet(_) => 8,
            &TransitionKind::Wildcard => 9,
            &TransitionKind::Precedence(_) => 10,
        }
    }
}

/// A directed edge from its owning state to `target`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    target: usize,
    kind: TransitionKind
}

impl Transition {
    /// Create a transition of arbitrary kind.
    pub fn new(target: usize, kind: TransitionKind) -> Self {
        Transition{target: target, kind: kind}
    }

    /// Unconditional, non-consuming transition.
    pub fn epsilon(target: usize) -> Self {
        Transition::new(target, TransitionKind::Epsilon{outermost_precedence_return: None})
    }

    /// Transition matching the single symbol `symbol`.
    pub fn atom(target: usize, symbol: i32) -> Self {
        Transition::new(target, TransitionKind::Atom(symbol))
    }

    /// Transition matching any symbol in `start..=stop`.
    pub fn range(target: usize, start: i32, stop: i32) -> Self {
        Transition::new(target, TransitionKind::Range{start: start, stop: stop})
    }

    /// Invocation of `rule_index`, whose start state is `rule_start`; the
    /// caller resumes at `follow_state`.
    pub fn rule(rule_start: usize, rule_index: usize, precedence: i32, follow_state: usize) -> Self {
        Transition::new(rule_start, TransitionKind::Rule{rule_index: rule_index, precedence: precedence,
                                                         follow_state: follow_state})
    }

    /// State this transition leads to.
    #[inline]
    pub fn target(&self) -> usize {
        self.target
    }

    /// The transition's kind and payload.
    #[inline]
    pub fn kind(&self) -> &TransitionKind {
        &self.kind
    }

    /// Check whether following this transition consumes no input.
    pub fn is_epsilon(&self) -> bool {
        match self.kind {
            TransitionKind::Epsilon{..} | TransitionKind::Rule{..} | TransitionKind::Predicate{..}
                | TransitionKind::Action{..} | TransitionKind::Precedence(_) => true,
            _ => false
        }
    }

    /// For a rule invocation, the state the caller resumes at.
    pub fn follow_state(&self) -> Option<usize> {
        match self.kind {
            TransitionKind::Rule{follow_state, ..} => Some(follow_state),
            _ => None
        }
    }

    /// Symbols this transition is labelled with.
    ///
    /// For `NotSet` this is the *excluded* set; callers complement it against
    /// the vocabulary.  Epsilon kinds and `Wildcard` have no label.
    pub fn label(&self) -> Option<IntervalSet> {
        match &self.kind {
            &TransitionKind::Atom(a) => Some(IntervalSet::of_one(a)),
            &TransitionKind::Range{start, stop} => Some(IntervalSet::of(start, stop)),
            &TransitionKind::Set(ref s) | &TransitionKind::NotSet(ref s) => Some(s.clone()),
            _ => None
        }
    }

    /// Check whether this transition matches `symbol`, given the vocabulary
    /// bounds `min..=max`.
    pub fn matches(&self, symbol: i32, min: i32, max: i32) -> bool {
        match &self.kind {
            &TransitionKind::Atom(a) => a == symbol,
            &TransitionKind::Range{start, stop} => start <= symbol && symbol <= stop,
            &TransitionKind::Set(ref s) => s.contains(symbol),
            &TransitionKind::NotSet(ref s) => symbol >= min && symbol <= max && !s.contains(symbol),
            &TransitionKind::Wildcard => symbol >= min && symbol <= max,
            _ => false
        }
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            &TransitionKind::Epsilon{..} => f.write_str("ε"),
            &TransitionKind::Range{start, stop} => write!(f, "{}..{}", start, stop),
            &TransitionKind::Rule{rule_index, ..} => write!(f, "rule {}", rule_index),
            &TransitionKind::Predicate{rule_index, pred_index, ..} => write!(f, "pred_{}:{}", rule_index, pred_index),
            &TransitionKind::Atom(a) => write!(f, "{}", a),
            &TransitionKind::Action{rule_index, action_index: Some(i), ..} => write!(f, "action_{}:{}", rule_index, i),
            &TransitionKind::Action{rule_index, action_index: None, ..} => write!(f, "action_{}", rule_index),
            &TransitionKind::Set(ref s) => write!(f, "{}", s),
            &TransitionKind::NotSet(ref s) => write!(f, "~{}", s),
            &TransitionKind::Wildcard => f.write_str("."),
            &TransitionKind::Precedence(p) => write!(f, "{} >= _p", p),
        }
    }
}
