//! Descriptors for the actions a lexer automaton may reference.
//!
//! Action transitions in a lexer automaton refer to these by index into
//! `Atn::lexer_actions`.  Executing them is the lexer's business.

use std::fmt::{self, Display};

/// A lexer action descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LexerAction {
    /// Send the token to the given channel.
    Channel(i32),

    /// Run a grammar-embedded action.
    Custom {
        /// Rule containing the action.
        rule_index: usize,
        /// Index of the action within its rule.
        action_index: usize
    },

    /// Switch to the given mode.
    Mode(i32),

    /// Keep scanning and glue the next token's text onto this one.
    More,

    /// Return to the mode on top of the mode stack.
    PopMode,

    /// Push the current mode and switch to the given one.
    PushMode(i32),

    /// Drop the token.
    Skip,

    /// Emit the token with the given type.
    Type(i32)
}

impl LexerAction {
    /// Numeric code used for this action in serialized automatons.
    pub fn action_type(&self) -> u8 {
        match self {
            &LexerAction::Channel(_) => 0,
            &LexerAction::Custom{..} => 1,
            &LexerAction::Mode(_) => 2,
            &LexerAction::More => 3,
            &LexerAction::PopMode => 4,
            &LexerAction::PushMode(_) => 5,
            &LexerAction::Skip => 6,
            &LexerAction::Type(_) => 7,
        }
    }

    /// Check whether the action depends on the input position at which it
    /// runs.  Only custom actions do: they may inspect the text seen so far.
    pub fn is_position_dependent(&self) -> bool {
        match self {
            &LexerAction::Custom{..} => true,
            _ => false
        }
    }
}

impl Display for LexerAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &LexerAction::Channel(c) => write!(f, "channel({})", c),
            &LexerAction::Custom{rule_index, action_index} => write!(f, "custom({}, {})", rule_index, action_index),
            &LexerAction::Mode(m) => write!(f, "mode({})", m),
            &LexerAction::More => f.write_str("more"),
            &LexerAction::PopMode => f.write_str("popMode"),
            &LexerAction::PushMode(m) => write!(f, "pushMode({})", m),
            &LexerAction::Skip => f.write_str("skip"),
            &LexerAction::Type(t) => write!(f, "type({})", t),
        }
    }
}
