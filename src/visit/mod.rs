//! # Visiting GraphQL ASTs
//!
//! The `graphql_lang::visit` module contains the generic tree walker for GraphQL documents and
//! schemas. It exposes two traits:
//!
//! - The [Visitor] trait is implemented by clients and carries optional enter/leave callbacks
//!   per node kind, plus enter/leave callbacks around the traversed lists.
//! - The [`VisitNode`] trait is implemented by the traversal roots, [Document](crate::ast::Document)
//!   and [Schema](crate::ast::Schema), and starts a walk.
//!
//! Every node reachable from the root is entered before its children and left after them. An
//! enter callback may return [`VisitFlow::Prune`] to suppress the node's children; the matching
//! leave callback still fires. Returning an error from any callback aborts the traversal and
//! propagates the error to the caller, prefixed with the visited node's label.
//!
//! In this example we count all fields in a document:
//!
//! ```
//! use graphql_lang::{ast::*, visit::*};
//!
//! #[derive(Default)]
//! struct CountFields {
//!     fields: usize,
//! }
//!
//! impl<'a> Visitor<'a> for CountFields {
//!     fn enter_selection_field(
//!         &mut self,
//!         _ctx: &mut (),
//!         _field: &'a SelectionField<'a>,
//!     ) -> VisitResult {
//!         self.fields += 1;
//!         Ok(VisitFlow::Next)
//!     }
//! }
//!
//! let ctx = ASTContext::new();
//! let document = Document::parse(&ctx, "{ me { name } }").unwrap();
//! let mut counter = CountFields::default();
//! document.visit(&mut (), &mut counter).unwrap();
//! assert_eq!(counter.fields, 2);
//! ```

#[allow(clippy::module_inception)]
mod visitor;

pub use visitor::*;
