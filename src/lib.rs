//! `graphql_lang`
//! =========
//!
//! _A GraphQL front end: lexer, parser, AST, visitor, and canonical printer._
//!
//! The **`graphql_lang`** library reads GraphQL source text, covering both executable documents
//! (queries, mutations, subscriptions, fragments) and schema definitions (types, interfaces,
//! enums, unions, inputs, and the `schema` block). It validates the syntax, builds an
//! arena-backed AST, and emits an equivalent canonical text form.
//!
//! The library does not execute queries, check documents against a schema, or speak any
//! transport; it is the front-end layer that such systems build on. Around the core pipeline it
//! provides a generic traversal framework with pluggable enter/leave callbacks, which drives
//! both the printer and the included fragment-spread validator and is the extension point for
//! custom analyses.
//!
//! The pipeline is: bytes → [Lexer](ast::Lexer) → parser → [Document](ast::Document) →
//! [visitor](visit) → printer or [validator](validate).
//!
//! ```
//! use graphql_lang::ast::*;
//!
//! let ctx = ASTContext::new();
//! let ast = Document::parse(&ctx, "{ me { name } }").unwrap();
//! assert_eq!(ast.print(), "query {\n  me {\n    name\n  }\n}");
//! ```
//!
//! [A good place to start learning more about this crate is the `ast` module...](ast)

pub mod ast;
pub mod error;
pub mod validate;
pub mod visit;

pub use bumpalo;
