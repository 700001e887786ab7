//! # GraphQL AST, Lexer, Parser, and Printer
//!
//! The `graphql_lang::ast` module contains the AST for both GraphQL dialects together with the
//! traits to parse and print it. Executable documents (operations and fragments) and schema
//! definitions (`type`, `interface`, `enum`, `union`, `input`, and the `schema` block) share one
//! token stream and one document structure.
//!
//! Its main parts are:
//! - [`ASTContext`], a context containing an arena that defines the lifetime of an AST
//! - [`ParseNode`], a trait using which AST nodes are parsed from source text
//! - [`PrintNode`] and [format], using which roots are printed back to canonical source text
//! - [Lexer] and [Token], the pull-based scanner underneath the parser
//!
//! The following describes the minimum that's done using this module while an AST context is
//! active in the given scope:
//!
//! ```
//! use graphql_lang::ast::*;
//!
//! // Create an AST context for a document
//! let ctx = ASTContext::new();
//!
//! // Parse a source text into a Document AST root node
//! let ast = Document::parse(&ctx, "{ field }").unwrap();
//!
//! // Print the Document node to an output String
//! assert_eq!(ast.print(), "query {\n  field\n}");
//! ```

#[allow(clippy::module_inception)]
mod ast;

mod ast_conversion;
mod ast_kind;
mod lexer;
mod parser;
mod printer;

pub use ast::*;
pub use ast_kind::ASTKind;
pub use lexer::{Lexer, Position, Token, TokenKind};
pub use parser::{CancelToken, ParseNode};
pub use printer::{format, PrintNode};
