#[macro_use]
extern crate atn_runtime;

mod common;

use std::sync::Arc;

use atn_runtime::AtnError;
use atn_runtime::atn::{Atn, AtnState, DecisionKind, GrammarType, LexerAction, StateKind, Transition};

fn block_start() -> AtnState {
    AtnState::new(StateKind::Decision(DecisionKind::BasicBlockStart{end_state: None}), 0)
}

#[test]
fn states_are_numbered_in_insertion_order() {
    let mut atn = Atn::new(GrammarType::Parser, 3);
    for i in 0..5 {
        assert_eq!(i, atn.add_state(AtnState::basic(0)));
    }
    assert_eq!(5, atn.state_count());
    for (i, s) in atn.states().enumerate() {
        assert_eq!(Some(i), s.number());
        assert_eq!(Some(atn.id()), s.atn());
    }
}

#[test]
fn empty_slots_keep_numbering() {
    let mut atn = Atn::new(GrammarType::Parser, 3);
    atn.add_state(AtnState::basic(0));
    assert_eq!(1, atn.add_empty_slot());
    assert_eq!(2, atn.add_state(AtnState::basic(0)));
    assert!(atn.state(1).is_none());
    assert_eq!(2, atn.states().count());
}

#[test]
fn removal_leaves_a_hole() {
    let mut atn = Atn::new(GrammarType::Parser, 3);
    for _ in 0..3 {
        atn.add_state(AtnState::basic(0));
    }

    let removed = atn.remove_state(1).unwrap();
    assert_eq!(None, removed.atn());
    assert_eq!(3, atn.state_count());
    assert!(atn.state(1).is_none());
    assert_eq!(Some(2), atn.state(2).and_then(AtnState::number));
    assert!(atn.remove_state(1).is_none());

    // Numbers are never reused.
    assert_eq!(3, atn.add_state(AtnState::basic(0)));
}

#[test]
fn decisions_are_numbered_separately() {
    let mut atn = Atn::new(GrammarType::Parser, 3);
    atn.add_state(AtnState::basic(0));
    let d0 = atn.add_state(block_start());
    atn.add_state(AtnState::basic(0));
    let d1 = atn.add_state(block_start());

    assert!(atn.decision_state(0).is_none());
    assert_eq!(Ok(0), atn.define_decision_state(d0));
    assert_eq!(Ok(1), atn.define_decision_state(d1));
    assert_eq!(2, atn.decision_count());

    for d in 0..atn.decision_count() {
        assert_eq!(Some(d), atn.decision_state(d).and_then(AtnState::decision));
    }
    assert_eq!(Some(d1), atn.decision_state(1).and_then(AtnState::number));
}

#[test]
fn bad_decision_definitions_fail() {
    let mut atn = Atn::new(GrammarType::Parser, 3);
    let plain = atn.add_state(AtnState::basic(0));
    let d = atn.add_state(block_start());

    assert_eq!(Err(AtnError::InvalidState{number: 7, count: 2}), atn.define_decision_state(7));
    match atn.define_decision_state(plain) {
        Err(AtnError::Malformed{state, ..}) => assert_eq!(plain, state),
        other => panic!("unexpected result {:?}", other)
    }
    assert_eq!(Ok(0), atn.define_decision_state(d));
    assert!(atn.define_decision_state(d).is_err());
    assert_eq!(1, atn.decision_count());
}

#[test]
#[should_panic]
fn unknown_decision_panics() {
    let mut atn = Atn::new(GrammarType::Parser, 3);
    let d = atn.add_state(block_start());
    atn.define_decision_state(d).unwrap();
    atn.decision_state(5);
}

#[test]
fn rule_tables() {
    let f = common::calls();
    let atn = &f.atn;

    assert_eq!(4, atn.rule_count());
    assert!(atn.tracks_rule_stops());
    for r in [&f.s, &f.a, &f.b, &f.t].iter() {
        let start = atn.rule_start_state(r.index).unwrap();
        assert_eq!(Some(r.start), start.number());
        assert_eq!(&StateKind::RuleStart{stop_state: Some(r.stop)}, start.kind());
        assert_eq!(Some(r.stop), atn.rule_stop_state(r.index).and_then(AtnState::number));
    }
    assert!(atn.rule_start_state(4).is_none());
}

#[test]
fn rule_registration_is_checked() {
    let mut atn = Atn::new(GrammarType::Parser, 3);
    let basic = atn.add_state(AtnState::basic(0));
    let wrong_rule = atn.add_state(AtnState::new(StateKind::RuleStart{stop_state: None}, 1));
    let start = atn.add_state(AtnState::new(StateKind::RuleStart{stop_state: None}, 0));
    let stop = atn.add_state(AtnState::new(StateKind::RuleStop, 0));

    assert!(atn.add_rule_start_state(basic).is_err());
    assert!(atn.add_rule_start_state(wrong_rule).is_err());
    assert!(!atn.tracks_rule_stops());
    assert!(atn.set_rule_stop_state(stop).is_err());

    assert_eq!(Ok(0), atn.add_rule_start_state(start));
    assert!(atn.set_rule_stop_state(start).is_err());
    assert_eq!(Ok(()), atn.set_rule_stop_state(stop));
    assert_eq!(Some(stop), atn.rule_stop_state(0).and_then(AtnState::number));
}

#[test]
fn lexer_tables() {
    let f = common::lexer();
    let atn = &f.atn;

    assert_eq!(GrammarType::Lexer, atn.grammar_type());
    assert_eq!(2, atn.mode_count());
    assert_eq!(Some(f.default_mode), atn.mode_start_state(0).and_then(AtnState::number));
    assert_eq!(Some(f.string_mode), atn.mode_start_state_by_name("STRING").and_then(AtnState::number));
    assert!(atn.mode_start_state_by_name("COMMENT").is_none());

    assert_eq!(Some(common::C), atn.rule_token_type(2));
    assert_eq!(None, atn.rule_token_type(9));
    assert_eq!(2, atn.lexer_actions().len());
    assert_eq!(Some(&LexerAction::PopMode), atn.lexer_action(1));
    assert_eq!("pushMode(1)", format!("{}", atn.lexer_actions()[0]));
}

#[test]
fn parser_has_no_lexer_tables() {
    let f = common::calls();
    assert!(f.atn.lexer_actions().is_empty());
    assert_eq!(None, f.atn.rule_token_type(0));
    assert_eq!(0, f.atn.mode_count());
}

#[test]
fn define_mode_requires_tokens_start() {
    let mut atn = Atn::new(GrammarType::Lexer, 0x7f);
    let n = atn.add_state(AtnState::basic(0));
    assert!(atn.define_mode(Some("DEFAULT_MODE"), n).is_err());
    assert!(atn.define_mode(None, 99).is_err());
}

#[test]
fn epsilon_flag_tracks_transitions() {
    let mut atn = Atn::new(GrammarType::Parser, 3);
    let p = atn.add_state(AtnState::basic(0));
    let q = atn.add_state(AtnState::basic(0));

    atn.add_transition(p, Transition::epsilon(q)).unwrap();
    panic_unless!(atn.state(p).unwrap().only_has_epsilon_transitions(), "epsilon flag not set");
    atn.add_transition(p, Transition::atom(q, 1)).unwrap();
    panic_unless!(!atn.state(p).unwrap().only_has_epsilon_transitions(), "epsilon flag not cleared");

    atn.add_transition(q, Transition::atom(p, 2)).unwrap();
    assert!(!atn.state(q).unwrap().only_has_epsilon_transitions());
    assert_eq!(Err(AtnError::InvalidState{number: 5, count: 2}), atn.add_transition(5, Transition::epsilon(p)));
}

#[test]
fn seal_shares_the_automaton() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let f = common::calls();
    let id = f.atn.id();
    let sealed: Arc<Atn> = f.atn.seal().unwrap();
    assert_send_sync(&sealed);
    assert_eq!(id, sealed.id());
    panic_unless_eq!(24, sealed.state_count(), "state count after sealing");
}

#[test]
fn automaton_ids_are_distinct() {
    let a = Atn::new(GrammarType::Parser, 1);
    let b = Atn::new(GrammarType::Parser, 1);
    assert!(a.id() != b.id());
}
