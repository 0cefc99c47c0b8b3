#![cfg(feature = "dot")]

use std::error::Error;
use std::io::{self, Write};
use std::process;

use atn_runtime::atn::{dot, Atn, AtnBuilder, GrammarType, InvocationContext, RuleContext};
use atn_runtime::token::EOF;

const TOKEN_NAMES: &[&str] = &["<INVALID>", "ID", "'+'"];

/// The sample grammar, plus the state in `s` that invokes `e`.
///
/// ```text
/// s : e EOF ;
/// e : ID ( '+' ID )* ;
/// ```
fn sample() -> atn_runtime::Result<(Atn, usize)> {
    let mut b = AtnBuilder::new(GrammarType::Parser, 2);
    let s = b.rule();
    let e = b.rule();

    let (s1, s2, s3) = (b.basic(s.index), b.basic(s.index), b.basic(s.index));
    b.epsilon(s.start, s1).call(s1, &e, s2).atom(s2, s3, EOF).epsilon(s3, s.stop);

    let (e1, e2) = (b.basic(e.index), b.basic(e.index));
    let l = b.star_loop(e.index);
    let (e3, e4) = (b.basic(e.index), b.basic(e.index));
    b.epsilon(e.start, e1).atom(e1, e2, 1).epsilon(e2, l.entry)
        .atom(l.block_start, e3, 2).atom(e3, e4, 1).epsilon(e4, l.block_end)
        .epsilon(l.loop_end, e.stop);

    Ok((b.finish()?, s1))
}

fn dump_expected(atn: &Atn, invoking: usize) -> Result<(), Box<dyn Error>> {
    let from_s = InvocationContext::root(0).push(invoking, 1);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for state in atn.states() {
        let n = state.number().unwrap_or_default();
        let alone = atn.expected_tokens(n as isize, None)?;
        write!(out, "{:3} {:<16} {}", n, state.kind().name(), alone.to_string_with_names(TOKEN_NAMES))?;
        if state.rule_index() == 1 {
            let called = atn.expected_tokens(n as isize, Some(&*from_s as &dyn RuleContext))?;
            write!(out, "   (from s: {})", called.to_string_with_names(TOKEN_NAMES))?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn run(expected_only: bool) -> Result<(), Box<dyn Error>> {
    let (atn, invoking) = sample()?;
    if expected_only {
        dump_expected(&atn, invoking)
    } else {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        dot::render(&atn, &mut out)?;
        out.flush()?;
        Ok(())
    }
}

fn main() {
    let mut args = std::env::args();
    let progname = args.next().unwrap_or_else(|| "atn-graph".to_owned());

    let mut expected_only = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-e" => expected_only = true,
            "-g" => expected_only = false,
            _ => {
                let _ = writeln!(io::stderr(), "Usage: {} [-e | -g]", progname);
                process::exit(2);
            }
        }
    }

    if let Err(err) = run(expected_only) {
        let _ = writeln!(io::stderr(), "{}: {}", progname, err);
        process::exit(1);
    }
}
