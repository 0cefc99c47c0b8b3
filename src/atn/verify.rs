//! Structural checks run before an automaton is shared.
//!
//! The lookahead engine follows state numbers without checking them and
//! assumes loops and blocks are wired the way a grammar compiler wires them.
//! [`verify`](fn.verify.html) confirms those assumptions once, up front.

use log::debug;

use crate::error::{AtnError, Result};
use super::Atn;
use super::state::{AtnState, DecisionKind, StateKind};

#[inline]
fn check(condition: bool, state: usize, reason: &'static str) -> Result<()> {
    if condition { Ok(()) }
    else { Err(AtnError::malformed(state, reason)) }
}

fn kind_of(atn: &Atn, number: Option<usize>) -> Option<&StateKind> {
    number.and_then(|n| atn.state(n)).map(AtnState::kind)
}

fn is_star_block_start(k: Option<&StateKind>) -> bool {
    match k { Some(&StateKind::Decision(DecisionKind::StarBlockStart{..})) => true, _ => false }
}

fn is_loop_end(k: Option<&StateKind>) -> bool {
    match k { Some(&StateKind::LoopEnd{..}) => true, _ => false }
}

/// Check a star-loop entry's two alternatives: greedy loops list the body
/// first, non-greedy loops the exit.
fn verify_star_loop_entry(atn: &Atn, state: &AtnState, n: usize, loop_back: Option<usize>) -> Result<()> {
    check(loop_back.is_some(), n, "star-loop entry without a loop-back state")?;
    check(kind_of(atn, loop_back) == Some(&StateKind::StarLoopBack), n,
          "star-loop entry's loop-back state is not a star-loop-back")?;

    let ts = state.transitions();
    check(ts.len() == 2, n, "star-loop entry must have exactly two alternatives")?;
    let first = kind_of(atn, Some(ts[0].target()));
    let second = kind_of(atn, Some(ts[1].target()));

    if is_star_block_start(first) {
        check(is_loop_end(second), n, "star-loop entry's exit alternative does not reach a loop end")?;
        check(!state.is_non_greedy(), n, "non-greedy star loop lists its body first")
    } else if is_loop_end(first) {
        check(is_star_block_start(second), n, "star-loop entry's body alternative does not reach the loop body")?;
        check(state.is_non_greedy(), n, "greedy star loop lists its exit first")
    } else {
        Err(AtnError::malformed(n, "star-loop entry alternatives reach neither body nor exit"))
    }
}

fn verify_state(atn: &Atn, state: &AtnState, n: usize) -> Result<()> {
    let ts = state.transitions();
    check(state.only_has_epsilon_transitions() || ts.len() <= 1, n,
          "state mixes epsilon and non-epsilon transitions")?;

    for t in ts {
        check(atn.state(t.target()).is_some(), n, "transition leads to a missing state")?;
        if let Some(follow) = t.follow_state() {
            check(atn.state(follow).is_some(), n, "rule transition's follow state is missing")?;
        }
    }

    if !state.is_decision() && !state.is_rule_stop() {
        check(ts.len() <= 1, n, "non-decision state has more than one transition")?;
    }

    match state.kind() {
        &StateKind::Decision(ref d) => {
            check(ts.len() <= 1 || state.decision().is_some(), n, "decision state has no decision number")?;
            if d.is_block_start() {
                check(d.end_state().is_some(), n, "block start without an end state")?;
            }
            match d {
                &DecisionKind::PlusBlockStart{loop_back_state, ..} =>
                    check(loop_back_state.is_some(), n, "plus block start without a loop-back state"),
                &DecisionKind::StarLoopEntry{loop_back_state} =>
                    verify_star_loop_entry(atn, state, n, loop_back_state),
                _ => Ok(())
            }
        },
        &StateKind::RuleStart{stop_state} =>
            check(stop_state.is_some() || !atn.tracks_rule_stops(), n, "rule start without a stop state"),
        &StateKind::BlockEnd{start_state} =>
            check(start_state.is_some(), n, "block end without a start state"),
        &StateKind::LoopEnd{loop_back_state} =>
            check(loop_back_state.is_some(), n, "loop end without a loop-back state"),
        &StateKind::StarLoopBack => {
            check(ts.len() == 1, n, "star-loop-back must have exactly one transition")?;
            match kind_of(atn, Some(ts[0].target())) {
                Some(&StateKind::Decision(DecisionKind::StarLoopEntry{..})) => Ok(()),
                _ => Err(AtnError::malformed(n, "star-loop-back does not lead to a star-loop entry"))
            }
        },
        &StateKind::RuleStop | &StateKind::Basic => Ok(())
    }
}

/// Check every structural invariant the lookahead engine depends on.
///
/// Returns the first violation found, scanning states in number order and
/// then the rule table.
pub fn verify(atn: &Atn) -> Result<()> {
    for (n, slot) in atn.states.iter().enumerate() {
        if let Some(ref state) = *slot {
            verify_state(atn, state, n)?;
        }
    }

    for &start in atn.rule_to_start_state.iter() {
        match kind_of(atn, Some(start)) {
            Some(&StateKind::RuleStart{..}) => (),
            _ => return Err(AtnError::malformed(start, "registered rule start is not a rule start state"))
        }
    }
    for &start in atn.mode_to_start_state.iter() {
        check(atn.state(start).is_some(), start, "mode entry state is missing")?;
    }

    debug!("verified ATN {:?}: {} state slots", atn.id(), atn.state_count());
    Ok(())
}
