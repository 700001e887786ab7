use bumpalo::{collections::Vec, Bump};
use hashbrown::{hash_map::DefaultHashBuilder, HashMap};

use crate::ast::*;
use crate::error::{Error, ErrorType, Result};
use crate::visit::{VisitFlow, VisitNode, VisitResult, Visitor};

/// Checks that no fragment is spread within itself and that every spread has an enclosing
/// fragment definition.
///
/// The enclosing fragment is tracked as top-of-stack while the document is traversed: a spread
/// naming the fragment it appears in fails immediately, and a spread outside of any fragment
/// definition is reported as a top-level spread. On top of the direct rule, the spreads seen per
/// fragment are kept as edges so that cycles spanning several fragments are caught once the
/// whole document was traversed.
pub struct FragmentSpreadRule<'a> {
    enclosing: Option<&'a str>,
    spreads: Vec<'a, &'a str>,
    edges: HashMap<&'a str, Vec<'a, &'a str>, DefaultHashBuilder, &'a Bump>,
}

impl<'a> FragmentSpreadRule<'a> {
    pub fn new_in(arena: &'a Bump) -> Self {
        FragmentSpreadRule {
            enclosing: None,
            spreads: Vec::new_in(arena),
            edges: HashMap::new_in(arena),
        }
    }
}

/// Validate a document against the fragment spread rules.
pub fn validate<'a>(ctx: &'a ASTContext, document: &'a Document<'a>) -> Result<()> {
    let mut rule = FragmentSpreadRule::new_in(&ctx.arena);
    document.visit(&mut (), &mut rule)
}

impl<'a> Visitor<'a, ()> for FragmentSpreadRule<'a> {
    fn enter_fragment(&mut self, _: &mut (), fragment: &'a FragmentDefinition<'a>) -> VisitResult {
        self.enclosing = Some(fragment.name);
        self.spreads.clear();
        Ok(VisitFlow::Next)
    }

    fn leave_fragment(&mut self, _: &mut (), fragment: &'a FragmentDefinition<'a>) -> Result<()> {
        self.edges.insert(fragment.name, self.spreads.clone());
        self.spreads.clear();
        self.enclosing = None;
        Ok(())
    }

    fn enter_fragment_spread(&mut self, _: &mut (), spread: &'a FragmentSpread<'a>) -> VisitResult {
        match self.enclosing {
            None => Err(Error::new(
                format!("fragment spread at top level: ...{}", spread.name),
                ErrorType::Semantic,
            )),
            Some(enclosing) if enclosing == spread.name => Err(Error::new(
                format!("fragment {} cannot be spread within itself", spread.name),
                ErrorType::Semantic,
            )),
            Some(_) => {
                self.spreads.push(spread.name);
                Ok(VisitFlow::Prune)
            }
        }
    }

    fn leave_document(&mut self, _: &mut (), _document: &'a Document<'a>) -> Result<()> {
        for name in self.edges.keys().copied() {
            if spreads_transitively(name, name, &self.edges, &mut std::vec::Vec::new()) {
                return Err(Error::new(
                    format!("fragment {name} cannot be spread within itself"),
                    ErrorType::Semantic,
                ));
            }
        }
        Ok(())
    }
}

/// Walks the spread edges from `current` looking for `target`, guarding against unrelated
/// loops with the visited list.
fn spreads_transitively<'a>(
    target: &'a str,
    current: &'a str,
    edges: &HashMap<&'a str, Vec<'a, &'a str>, DefaultHashBuilder, &'a Bump>,
    visited: &mut std::vec::Vec<&'a str>,
) -> bool {
    let Some(nested) = edges.get(current) else {
        return false;
    };
    if visited.contains(&current) {
        return false;
    }
    visited.push(current);
    nested
        .iter()
        .any(|&next| next == target || spreads_transitively(target, next, edges, visited))
}
