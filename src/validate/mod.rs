//! # Validation over parsed documents
//!
//! This module contains the narrow validation that runs as a visitor client over a parsed
//! [Document](crate::ast::Document): the fragment spread rules. A spread must appear inside a
//! fragment definition, must not name the fragment it appears in, and must not reach its own
//! fragment through a chain of other fragments.
//!
//! ```
//! use graphql_lang::{ast::*, validate};
//!
//! let ctx = ASTContext::new();
//! let document = Document::parse(
//!     &ctx,
//!     "fragment A on Character { ...B } fragment B on Character { name }",
//! )
//! .unwrap();
//! validate::validate(&ctx, document).unwrap();
//! ```

mod fragment_spreads;

pub use fragment_spreads::{validate, FragmentSpreadRule};
