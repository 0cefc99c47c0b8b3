//! GraphViz rendering of automatons.

use std::borrow::Cow;
use std::io;

use super::Atn;
use super::state::StateKind;

/// Edges are identified by their source state and transition index.
type Edge = (usize, usize);

struct G<'a>(&'a Atn);

fn id(s: String) -> dot::Id<'static> {
    dot::Id::new(s).expect("generated DOT identifiers are alphanumeric")
}

impl<'a> dot::GraphWalk<'a, usize, Edge> for G<'a> {
    fn nodes(&self) -> dot::Nodes<'a, usize> {
        Cow::Owned(self.0.states().filter_map(|s| s.number()).collect())
    }
    fn edges(&self) -> dot::Edges<'a, Edge> {
        Cow::Owned(self.0.states()
                   .filter_map(|s| s.number().map(|n| (n, s.transitions().len())))
                   .flat_map(|(n, len)| (0..len).map(move |i| (n, i)))
                   .collect())
    }
    fn source(&self, e: &Edge) -> usize {
        e.0
    }
    fn target(&self, e: &Edge) -> usize {
        self.0.state(e.0).and_then(|s| s.transition(e.1)).map_or(e.0, |t| t.target())
    }
}

impl<'a> dot::Labeller<'a, usize, Edge> for G<'a> {
    fn graph_id(&'a self) -> dot::Id<'a> { id("atn".to_owned()) }
    fn node_id(&'a self, n: &usize) -> dot::Id<'a> { id(format!("N{}", n)) }

    fn node_label(&'a self, n: &usize) -> dot::LabelText<'a> {
        let text = match self.0.state(*n) {
            Some(s) => match s.decision() {
                Some(d) => format!("{} {} d{}", n, s.kind().name(), d),
                None => format!("{} {}", n, s.kind().name())
            },
            None => format!("{}", n)
        };
        dot::LabelText::LabelStr(text.into())
    }

    fn edge_label(&'a self, e: &Edge) -> dot::LabelText<'a> {
        let text = self.0.state(e.0).and_then(|s| s.transition(e.1))
            .map_or_else(String::new, |t| format!("{}", t));
        dot::LabelText::LabelStr(text.into())
    }

    fn node_shape(&'a self, n: &usize) -> Option<dot::LabelText<'a>> {
        let shape: &'static str = match self.0.state(*n).map(|s| s.kind()) {
            Some(&StateKind::RuleStop) => "doublecircle",
            Some(&StateKind::Decision(_)) => "diamond",
            _ => "circle"
        };
        Some(dot::LabelText::LabelStr(shape.into()))
    }
}

/// Write `atn` to `w` as a GraphViz digraph.
///
/// Every live state becomes a node labelled with its number and kind; every
/// transition becomes an edge labelled with what it matches.
pub fn render<W: io::Write>(atn: &Atn, w: &mut W) -> io::Result<()> {
    dot::render(&G(atn), w)
}
