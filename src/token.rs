//! Reserved token types.
//!
//! Grammar-defined token types start at
//! [`MIN_USER_TOKEN_TYPE`](constant.MIN_USER_TOKEN_TYPE.html); the values
//! below it are sentinels shared by every automaton.

/// Token type used for symbols in an [`IntervalSet`](../util/interval/struct.IntervalSet.html).
pub type TokenType = i32;

/// No valid token has this type.  The LL(1) analyzer also uses it as a marker
/// for "a semantic predicate was reached".
pub const INVALID_TYPE: TokenType = 0;

/// End of input.
pub const EOF: TokenType = -1;

/// Internal marker meaning "control can fall off the end of the current rule
/// without consuming a symbol".  Never part of a fully resolved lookahead set.
pub const EPSILON: TokenType = -2;

/// Smallest token type a grammar may assign to one of its own tokens.
pub const MIN_USER_TOKEN_TYPE: TokenType = 1;
