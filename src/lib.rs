#![crate_type = "rlib"]
#![crate_name = "atn_runtime"]
#![warn(missing_docs)]

//! Runtime model of augmented transition networks (ATNs) and the lookahead
//! machinery that answers "which symbols may come next" for a generated
//! parser.
//!
//! An [`Atn`](atn/struct.Atn.html) owns every state of a grammar's automaton
//! and indexes them by dense state number, decision number, rule, and lexer
//! mode.  The [`lookahead`](lookahead/index.html) module computes rule-local
//! follow sets (cached once per state) and resolves them against a parser's
//! calling context to produce the full set of expected tokens.
//!
//! ```rust
//! use atn_runtime::atn::{AtnBuilder, GrammarType};
//! use atn_runtime::token::EOF;
//!
//! // r : 'A' ;
//! let mut b = AtnBuilder::new(GrammarType::Parser, 1);
//! let r = b.rule();
//! let p = b.basic(r.index);
//! let q = b.basic(r.index);
//! b.epsilon(r.start, p).atom(p, q, 1).epsilon(q, r.stop);
//! let atn = b.finish().unwrap();
//!
//! assert_eq!(vec![1], atn.expected_tokens(p as isize, None).unwrap().to_vec());
//! assert_eq!(vec![EOF], atn.expected_tokens(q as isize, None).unwrap().to_vec());
//! ```

// `util` comes first so that its exported macros are visible to every
// module below.
#[macro_use]
pub mod util;

pub mod token;
pub mod error;
pub mod atn;
pub mod lookahead;

pub use error::{AtnError, Result};
pub use util::interval::{Interval, IntervalSet};
