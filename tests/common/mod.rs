#![allow(dead_code)]

use atn_runtime::atn::{Atn, AtnBuilder, GrammarType, LexerAction, RuleHandle};

pub const A: i32 = 1;
pub const B: i32 = 2;
pub const C: i32 = 3;
pub const D: i32 = 4;

/// ```text
/// s : a 'C' ;
/// a : 'A' | b ;
/// b : 'B' | ;
/// t : a ;
/// ```
pub struct Calls {
    pub atn: Atn,
    pub s: RuleHandle,
    pub a: RuleHandle,
    pub b: RuleHandle,
    pub t: RuleHandle,
    /// `s` before invoking `a`, and where it resumes.
    pub s1: usize,
    pub s2: usize,
    /// `a`'s alternatives block, and the invocation of `b` in it.
    pub a_block: usize,
    pub a3: usize,
    pub a4: usize,
    pub b_block: usize,
    /// `t` before invoking `a`, and where it resumes.
    pub t1: usize,
    pub t2: usize
}

pub fn calls() -> Calls {
    let mut b = AtnBuilder::new(GrammarType::Parser, D);
    let rs = b.rule();
    let ra = b.rule();
    let rb = b.rule();
    let rt = b.rule();

    let (s1, s2, s3) = (b.basic(rs.index), b.basic(rs.index), b.basic(rs.index));
    b.epsilon(rs.start, s1).call(s1, &ra, s2).atom(s2, s3, C).epsilon(s3, rs.stop);

    let (a_block, a_end) = b.block(ra.index);
    let (a1, a2, a3, a4) = (b.basic(ra.index), b.basic(ra.index), b.basic(ra.index), b.basic(ra.index));
    b.epsilon(ra.start, a_block)
        .epsilon(a_block, a1).epsilon(a_block, a3)
        .atom(a1, a2, A).epsilon(a2, a_end)
        .call(a3, &rb, a4).epsilon(a4, a_end)
        .epsilon(a_end, ra.stop);

    let (b_block, b_end) = b.block(rb.index);
    let (b1, b2, b3) = (b.basic(rb.index), b.basic(rb.index), b.basic(rb.index));
    b.epsilon(rb.start, b_block)
        .epsilon(b_block, b1).epsilon(b_block, b3)
        .atom(b1, b2, B).epsilon(b2, b_end)
        .epsilon(b3, b_end)
        .epsilon(b_end, rb.stop);

    let (t1, t2) = (b.basic(rt.index), b.basic(rt.index));
    b.epsilon(rt.start, t1).call(t1, &ra, t2).epsilon(t2, rt.stop);

    let atn = b.finish().unwrap();
    Calls{atn: atn, s: rs, a: ra, b: rb, t: rt, s1: s1, s2: s2, a_block: a_block, a3: a3, a4: a4,
          b_block: b_block, t1: t1, t2: t2}
}

/// Two-mode lexer:
///
/// ```text
/// ID : [a-z] ;            // rule 0, token A
/// QUOTE : '"' -> pushMode(STRING) ;   // rule 1, token B
/// mode STRING;
/// TEXT : ~'"' ;           // rule 2, token C
/// END : '"' -> popMode ;  // rule 3, token D
/// ```
pub struct Lexer {
    pub atn: Atn,
    pub default_mode: usize,
    pub string_mode: usize,
    pub rules: Vec<RuleHandle>
}

pub fn lexer() -> Lexer {
    let quote = '"' as i32;
    let mut b = AtnBuilder::new(GrammarType::Lexer, 0x7f);
    let default_mode = b.mode(Some("DEFAULT_MODE"));
    let string_mode = b.mode(Some("STRING"));
    let rules: Vec<RuleHandle> = (0..4).map(|_| b.rule()).collect();

    b.epsilon(default_mode, rules[0].start).epsilon(default_mode, rules[1].start)
        .epsilon(string_mode, rules[2].start).epsilon(string_mode, rules[3].start);

    let (p, q) = (b.basic(0), b.basic(0));
    b.epsilon(rules[0].start, p).range(p, q, 'a' as i32, 'z' as i32).epsilon(q, rules[0].stop);

    let (p, q) = (b.basic(1), b.basic(1));
    b.epsilon(rules[1].start, p).atom(p, q, quote).action(q, rules[1].stop, 1, Some(0));

    let (p, q) = (b.basic(2), b.basic(2));
    let mut not_quote = atn_runtime::IntervalSet::new();
    not_quote.add_one(quote);
    b.epsilon(rules[2].start, p).not_set(p, q, not_quote).epsilon(q, rules[2].stop);

    let (p, q) = (b.basic(3), b.basic(3));
    b.epsilon(rules[3].start, p).atom(p, q, quote).action(q, rules[3].stop, 3, Some(1));

    b.atn_mut().set_rule_token_types(vec![A, B, C, D]);
    b.atn_mut().set_lexer_actions(vec![LexerAction::PushMode(1), LexerAction::PopMode]);

    let atn = b.finish().unwrap();
    Lexer{atn: atn, default_mode: default_mode, string_mode: string_mode, rules: rules}
}
