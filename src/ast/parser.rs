use super::ast::*;
use super::ast_kind::ASTKind;
use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{print_span, Error, ErrorType, Location, Result};
use bumpalo::collections::Vec;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable cancellation handle for aborting a parse from another place.
///
/// The parser checks the flag between top-level definitions; the definition currently being
/// parsed is never interrupted. All clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; the next definition boundary aborts with a Cancelled error.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

pub(crate) mod private {
    use super::*;
    use hashbrown::{hash_map::DefaultHashBuilder, HashMap};

    /// Private parser state: the lexer, a three-token lookahead ring, the named-type intern map,
    /// and the type definitions seen so far (for resolving a schema block).
    pub struct ParserContext<'a> {
        pub(crate) arena: &'a bumpalo::Bump,
        pub(crate) source: &'a str,
        pub(crate) lexer: Lexer<'a>,
        pub(crate) ring: [Token<'a>; 3],
        /// Index of the next buffered token in `ring`, or -1 when no lookahead is buffered.
        pub(crate) peek_count: i8,
        pub(crate) types: HashMap<&'a str, &'a NamedType<'a>, DefaultHashBuilder, &'a bumpalo::Bump>,
        pub(crate) type_definitions:
            HashMap<&'a str, Definition<'a>, DefaultHashBuilder, &'a bumpalo::Bump>,
        pub(crate) cancel: Option<CancelToken>,
        pub(crate) seen_schema: bool,
    }

    impl<'a> ParserContext<'a> {
        pub(crate) fn new(ctx: &'a ASTContext, source: &'a str, cancel: Option<CancelToken>) -> Self {
            ParserContext {
                arena: &ctx.arena,
                source,
                lexer: Lexer::new(source),
                ring: [Token::default(), Token::default(), Token::default()],
                peek_count: -1,
                types: HashMap::new_in(&ctx.arena),
                type_definitions: HashMap::new_in(&ctx.arena),
                cancel,
                seen_schema: false,
            }
        }

        /// Returns the next token, lazily pulling from the lexer. EOF peeked repeatedly yields
        /// EOF; a failed lexer yields its ILLEGAL position.
        pub(crate) fn peek(&mut self) -> &Token<'a> {
            if self.peek_count < 0 {
                self.ring[2] = self.ring[1].clone();
                self.ring[1] = self.ring[0].clone();
                let mut slot = Token::default();
                if self.lexer.next(&mut slot) {
                    self.ring[0] = slot;
                } else {
                    self.ring[0] = Token {
                        kind: TokenKind::Illegal,
                        value: "",
                        pos: self.lexer.position(),
                    };
                }
                self.peek_count = 0;
            }
            &self.ring[self.peek_count as usize]
        }

        pub(crate) fn advance(&mut self) {
            if self.peek_count >= 0 {
                self.peek_count -= 1;
            }
        }

        pub(crate) fn next(&mut self) -> Token<'a> {
            let token = self.peek().clone();
            self.advance();
            token
        }

        /// Returns the last consumed token to the ring. Bounded by the ring size; a rewound
        /// token is handed back to the next `peek` or `next`.
        pub(crate) fn rewind(&mut self) {
            if self.peek_count < 2 {
                self.peek_count += 1;
            }
        }

        pub(crate) fn peek_token(&mut self, kind: TokenKind) -> bool {
            self.peek().kind == kind
        }

        pub(crate) fn peek_name(&mut self, name: &str) -> bool {
            let token = self.peek();
            token.kind == TokenKind::Name && token.value == name
        }

        /// Requires the next token to have the given kind and returns it.
        pub(crate) fn consume_token(&mut self, kind: ASTKind, tt: TokenKind) -> Result<Token<'a>> {
            let token = self.next();
            if token.kind == tt {
                Ok(token)
            } else {
                Err(self.unexpected_token(kind, &token, &format!("token {tt}")))
            }
        }

        /// Requires the next token to be a NAME and, when `allowed` is non-empty, its value to
        /// be one of the allowed keywords.
        pub(crate) fn consume_name(&mut self, kind: ASTKind, allowed: &[&str]) -> Result<Token<'a>> {
            let token = self.next();
            if token.kind != TokenKind::Name {
                let expected = if allowed.is_empty() {
                    "token NAME".to_string()
                } else {
                    keyword_list(allowed)
                };
                return Err(self.unexpected_token(kind, &token, &expected));
            }
            if !allowed.is_empty() && !allowed.contains(&token.value) {
                return Err(self.unexpected_token(kind, &token, &keyword_list(allowed)));
            }
            Ok(token)
        }

        /// Builds the fatal error for an unexpected token, naming the production, the expected
        /// construct, and the actual token with its position. ILLEGAL tokens surface the lexer's
        /// failure description as a Lex error instead.
        pub(crate) fn unexpected_token(
            &self,
            kind: ASTKind,
            token: &Token<'a>,
            expected: &str,
        ) -> Error {
            if token.kind == TokenKind::Illegal {
                let desc = self.lexer.error_description().unwrap_or("malformed token");
                return self.error_at(
                    format!(
                        "{kind}: {desc} at line {}, column {}",
                        token.pos.line, token.pos.column
                    ),
                    token,
                    ErrorType::Lex,
                );
            }
            let got = if token.value.is_empty() {
                token.kind.to_string()
            } else {
                format!("{}({})", token.kind, token.value)
            };
            self.error_at(
                format!(
                    "{kind}: expected {expected}, got {got} at line {}, column {}",
                    token.pos.line, token.pos.column
                ),
                token,
                ErrorType::Syntax,
            )
        }

        /// A semantic failure anchored at a token, e.g. a forbidden name or an unresolved
        /// schema reference.
        pub(crate) fn semantic_error(
            &self,
            kind: ASTKind,
            token: &Token<'a>,
            message: &str,
        ) -> Error {
            self.error_at(
                format!(
                    "{kind}: {message} at line {}, column {}",
                    token.pos.line, token.pos.column
                ),
                token,
                ErrorType::Semantic,
            )
        }

        fn error_at(&self, message: String, token: &Token<'a>, error_type: ErrorType) -> Error {
            let width = token.value.len().max(1);
            Error::new_with_context(
                message,
                Some(Location {
                    line: token.pos.line,
                    column: token.pos.column,
                }),
                print_span(self.source, token.pos.offset..token.pos.offset + width),
                error_type,
            )
        }

        /// Returns the interned nullable named type for `name`, registering a new one on first
        /// sight. All plain references to one name within a document share this node.
        pub(crate) fn intern_type(&mut self, name: &'a str) -> &'a NamedType<'a> {
            let arena = self.arena;
            *self.types.entry(name).or_insert_with(|| {
                &*arena.alloc(NamedType {
                    name,
                    nullable: true,
                })
            })
        }

        /// Registers a schema-dialect type definition under its name. `token` anchors a
        /// duplicate-name error to the definition's keyword.
        pub(crate) fn register_definition(
            &mut self,
            kind: ASTKind,
            token: &Token<'a>,
            definition: Definition<'a>,
        ) -> Result<()> {
            let name = match definition.name() {
                Some(name) => name,
                None => return Ok(()),
            };
            if self.type_definitions.insert(name, definition).is_some() {
                return Err(self.semantic_error(
                    kind,
                    token,
                    &format!("duplicate definition of type {name}"),
                ));
            }
            Ok(())
        }

        /// Resolves a schema block entry to an object definition parsed earlier in the document.
        pub(crate) fn lookup_object(
            &self,
            name_token: &Token<'a>,
        ) -> Result<&'a ObjectDefinition<'a>> {
            match self.type_definitions.get(name_token.value) {
                Some(Definition::Object(object)) => Ok(object),
                Some(_) => Err(self.semantic_error(
                    ASTKind::Schema,
                    name_token,
                    &format!("type {} is not an object definition", name_token.value),
                )),
                None => Err(self.semantic_error(
                    ASTKind::Schema,
                    name_token,
                    &format!("type {} is not defined", name_token.value),
                )),
            }
        }

        /// Resolves a `types: […]` schema entry to any type definition in the document.
        pub(crate) fn lookup_type_definition(
            &self,
            name_token: &Token<'a>,
        ) -> Result<Definition<'a>> {
            self.type_definitions
                .get(name_token.value)
                .copied()
                .ok_or_else(|| {
                    self.semantic_error(
                        ASTKind::Schema,
                        name_token,
                        &format!("type {} is not defined", name_token.value),
                    )
                })
        }

        /// A fragment name, which must not be the keyword `on`.
        pub(crate) fn parse_fragment_name(&mut self) -> Result<&'a str> {
            let token = self.consume_name(ASTKind::FragmentName, &[])?;
            if token.value == "on" {
                return Err(self.semantic_error(
                    ASTKind::FragmentName,
                    &token,
                    "\"on\" is not a legal fragment name",
                ));
            }
            Ok(token.value)
        }

        /// `on NamedType`
        pub(crate) fn parse_type_condition(&mut self) -> Result<&'a NamedType<'a>> {
            self.consume_name(ASTKind::TypeCondition, &["on"])?;
            let name = self.consume_name(ASTKind::TypeCondition, &[])?;
            Ok(self.intern_type(name.value))
        }
    }

    fn keyword_list(allowed: &[&str]) -> String {
        let mut out = String::new();
        for (index, name) in allowed.iter().enumerate() {
            if index > 0 {
                out.push_str(if index == allowed.len() - 1 { " or " } else { ", " });
            }
            out.push('"');
            out.push_str(name);
            out.push('"');
        }
        format!("name {out}")
    }

    /// (Private) Trait for parsing AST nodes from a parser context.
    /// The [`super::ParseNode`] trait implements the public `parse` method instead.
    pub trait ParseNode<'a>: Sized {
        fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<Self>;
    }
}

use private::ParserContext;

/// Trait for parsing AST nodes from source texts using recursive descent over the lexer.
///
/// This trait is implemented by all AST nodes and can hence be used to granularly parse GraphQL
/// language. However, mostly this will be used via `Document::parse`.
pub trait ParseNode<'a>: private::ParseNode<'a> {
    /// Parse an input source text into the implementor's AST node structure and allocate the
    /// resulting AST in the current AST context's arena.
    fn parse<T: ToString>(ctx: &'a ASTContext, source: T) -> Result<&'a Self> {
        let source = ctx.alloc_string(source.to_string());
        let mut parser_ctx = ParserContext::new(ctx, source, None);
        Self::new_with_ctx(&mut parser_ctx).map(|value| &*ctx.alloc(value))
    }

    /// Like [`ParseNode::parse`], with a cancellation handle that is checked between top-level
    /// definitions.
    fn parse_with_cancel<T: ToString>(
        ctx: &'a ASTContext,
        source: T,
        cancel: &CancelToken,
    ) -> Result<&'a Self> {
        let source = ctx.alloc_string(source.to_string());
        let mut parser_ctx = ParserContext::new(ctx, source, Some(cancel.clone()));
        Self::new_with_ctx(&mut parser_ctx).map(|value| &*ctx.alloc(value))
    }
}

impl<'a, T: private::ParseNode<'a>> ParseNode<'a> for T {}

impl<'a> private::ParseNode<'a> for Value<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<Value<'a>> {
        let token = ctx.peek().clone();
        match token.kind {
            TokenKind::Dollar => {
                ctx.advance();
                let name = ctx.consume_name(ASTKind::Variable, &[])?;
                Ok(Value::Variable(Variable { name: name.value }))
            }
            TokenKind::Int => {
                ctx.advance();
                match token.value.parse::<i64>() {
                    Ok(value) => Ok(Value::Int(IntValue { value })),
                    Err(_) => Err(ctx.semantic_error(
                        ASTKind::Value,
                        &token,
                        &format!("integer literal {} is out of range", token.value),
                    )),
                }
            }
            TokenKind::Float => {
                ctx.advance();
                match token.value.parse::<f64>() {
                    // an overflowing literal parses to infinity, which has no source form
                    Ok(value) if value.is_finite() => Ok(Value::Float(FloatValue { value })),
                    _ => Err(ctx.semantic_error(
                        ASTKind::Value,
                        &token,
                        &format!("float literal {} is out of range", token.value),
                    )),
                }
            }
            TokenKind::String => {
                ctx.advance();
                // strip the surrounding quotes; escapes stay undecoded
                let value = &token.value[1..token.value.len() - 1];
                Ok(Value::String(StringValue { value }))
            }
            TokenKind::BraceL => ObjectValue::new_with_ctx(ctx).map(Value::Object),
            TokenKind::Name => {
                ctx.advance();
                match token.value {
                    "true" => Ok(Value::Boolean(BooleanValue { value: true })),
                    "false" => Ok(Value::Boolean(BooleanValue { value: false })),
                    "null" => Ok(Value::Null),
                    value => Ok(Value::Enum(EnumValue { value })),
                }
            }
            _ => Err(ctx.unexpected_token(ASTKind::Value, &token, "a value")),
        }
    }
}

impl<'a> private::ParseNode<'a> for ObjectValue<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<ObjectValue<'a>> {
        ctx.consume_token(ASTKind::ObjectValue, TokenKind::BraceL)?;
        let mut children = Vec::new_in(ctx.arena);
        while !ctx.peek_token(TokenKind::BraceR) {
            let name = ctx.consume_name(ASTKind::ObjectField, &[])?;
            ctx.consume_token(ASTKind::ObjectField, TokenKind::Colon)?;
            let value = Value::new_with_ctx(ctx)?;
            children.push(ObjectField {
                name: name.value,
                value,
            });
        }
        ctx.consume_token(ASTKind::ObjectValue, TokenKind::BraceR)?;
        Ok(ObjectValue { children })
    }
}

impl<'a> private::ParseNode<'a> for Arguments<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<Arguments<'a>> {
        if !ctx.peek_token(TokenKind::ParenL) {
            return Ok(Arguments::default_in(ctx.arena));
        }
        ctx.advance();
        let mut children = Vec::new_in(ctx.arena);
        while !ctx.peek_token(TokenKind::ParenR) {
            let name = ctx.consume_name(ASTKind::Arguments, &[])?;
            ctx.consume_token(ASTKind::Arguments, TokenKind::Colon)?;
            let value = Value::new_with_ctx(ctx)?;
            children.push(Argument {
                name: name.value,
                value,
            });
        }
        ctx.consume_token(ASTKind::Arguments, TokenKind::ParenR)?;
        Ok(Arguments { children })
    }
}

impl<'a> private::ParseNode<'a> for Directive<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<Directive<'a>> {
        ctx.consume_token(ASTKind::Directive, TokenKind::At)?;
        let name = ctx.consume_name(ASTKind::Directive, &[])?;
        let arguments = Arguments::new_with_ctx(ctx)?;
        Ok(Directive {
            name: name.value,
            arguments,
        })
    }
}

impl<'a> private::ParseNode<'a> for Directives<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<Directives<'a>> {
        let mut children = Vec::new_in(ctx.arena);
        while ctx.peek_token(TokenKind::At) {
            children.push(Directive::new_with_ctx(ctx)?);
        }
        Ok(Directives { children })
    }
}

impl<'a> private::ParseNode<'a> for Type<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<Type<'a>> {
        let token = ctx.peek().clone();
        match token.kind {
            TokenKind::Name => {
                ctx.advance();
                if ctx.peek_token(TokenKind::Bang) {
                    ctx.advance();
                    // a non-null occurrence gets its own node; interning covers nullable uses
                    Ok(Type::Named(ctx.arena.alloc(NamedType {
                        name: token.value,
                        nullable: false,
                    })))
                } else {
                    Ok(Type::Named(ctx.intern_type(token.value)))
                }
            }
            TokenKind::BracketL => {
                ctx.advance();
                let of_type = Type::new_with_ctx(ctx)?;
                ctx.consume_token(ASTKind::ListType, TokenKind::BracketR)?;
                let nullable = if ctx.peek_token(TokenKind::Bang) {
                    ctx.advance();
                    false
                } else {
                    true
                };
                Ok(Type::List(ctx.arena.alloc(ListType { of_type, nullable })))
            }
            _ => Err(ctx.unexpected_token(ASTKind::Type, &token, "a named type or list type")),
        }
    }
}

impl<'a> private::ParseNode<'a> for VariableDefinition<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<VariableDefinition<'a>> {
        ctx.consume_token(ASTKind::VariableDefinition, TokenKind::Dollar)?;
        let name = ctx.consume_name(ASTKind::VariableDefinition, &[])?;
        ctx.consume_token(ASTKind::VariableDefinition, TokenKind::Colon)?;
        let of_type = Type::new_with_ctx(ctx)?;
        let default_value = if ctx.peek_token(TokenKind::Equals) {
            ctx.advance();
            Some(Value::new_with_ctx(ctx)?)
        } else {
            None
        };
        Ok(VariableDefinition {
            variable: Variable { name: name.value },
            of_type,
            default_value,
        })
    }
}

impl<'a> private::ParseNode<'a> for VariableDefinitions<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<VariableDefinitions<'a>> {
        if !ctx.peek_token(TokenKind::ParenL) {
            return Ok(VariableDefinitions::default_in(ctx.arena));
        }
        ctx.advance();
        let mut children = Vec::new_in(ctx.arena);
        while !ctx.peek_token(TokenKind::ParenR) {
            children.push(VariableDefinition::new_with_ctx(ctx)?);
        }
        ctx.consume_token(ASTKind::VariableDefinitions, TokenKind::ParenR)?;
        Ok(VariableDefinitions { children })
    }
}

impl<'a> private::ParseNode<'a> for SelectionSet<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<SelectionSet<'a>> {
        // a missing brace pair parses as the empty set, mirroring the printer eliding the
        // braces of an empty one
        if !ctx.peek_token(TokenKind::BraceL) {
            return Ok(SelectionSet::default_in(ctx.arena));
        }
        ctx.advance();
        let mut selections = Vec::new_in(ctx.arena);
        while !ctx.peek_token(TokenKind::BraceR) {
            selections.push(Selection::new_with_ctx(ctx)?);
        }
        ctx.consume_token(ASTKind::SelectionSet, TokenKind::BraceR)?;
        Ok(SelectionSet { selections })
    }
}

impl<'a> private::ParseNode<'a> for Selection<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<Selection<'a>> {
        let token = ctx.peek().clone();
        match token.kind {
            TokenKind::Name => SelectionField::new_with_ctx(ctx).map(Selection::Field),
            TokenKind::Spread => {
                // classify by the token after the spread, then hand the spread back to the
                // sub-production that consumes it
                ctx.advance();
                let next = ctx.peek().clone();
                ctx.rewind();
                match next.kind {
                    TokenKind::BraceL | TokenKind::At => {
                        InlineFragment::new_with_ctx(ctx).map(Selection::InlineFragment)
                    }
                    TokenKind::Name if next.value == "on" => {
                        InlineFragment::new_with_ctx(ctx).map(Selection::InlineFragment)
                    }
                    TokenKind::Name => {
                        FragmentSpread::new_with_ctx(ctx).map(Selection::FragmentSpread)
                    }
                    _ => Err(ctx.unexpected_token(
                        ASTKind::Selection,
                        &next,
                        "a fragment spread or inline fragment",
                    )),
                }
            }
            _ => Err(ctx.unexpected_token(ASTKind::Selection, &token, "token NAME or SPREAD")),
        }
    }
}

impl<'a> private::ParseNode<'a> for SelectionField<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<SelectionField<'a>> {
        let name_or_alias = ctx.consume_name(ASTKind::SelectionField, &[])?;
        let (alias, name) = if ctx.peek_token(TokenKind::Colon) {
            ctx.advance();
            let name = ctx.consume_name(ASTKind::SelectionField, &[])?;
            (Some(name_or_alias.value), name.value)
        } else {
            (None, name_or_alias.value)
        };
        let arguments = Arguments::new_with_ctx(ctx)?;
        let directives = Directives::new_with_ctx(ctx)?;
        let selection_set = SelectionSet::new_with_ctx(ctx)?;
        Ok(SelectionField {
            alias,
            name,
            arguments,
            directives,
            selection_set,
        })
    }
}

impl<'a> private::ParseNode<'a> for FragmentSpread<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<FragmentSpread<'a>> {
        if ctx.peek_token(TokenKind::Spread) {
            ctx.advance();
        }
        let name = ctx.parse_fragment_name()?;
        let directives = Directives::new_with_ctx(ctx)?;
        Ok(FragmentSpread { name, directives })
    }
}

impl<'a> private::ParseNode<'a> for InlineFragment<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<InlineFragment<'a>> {
        if ctx.peek_token(TokenKind::Spread) {
            ctx.advance();
        }
        let type_condition = if ctx.peek_name("on") {
            Some(ctx.parse_type_condition()?)
        } else {
            None
        };
        let directives = Directives::new_with_ctx(ctx)?;
        let selection_set = SelectionSet::new_with_ctx(ctx)?;
        Ok(InlineFragment {
            type_condition,
            directives,
            selection_set,
        })
    }
}

impl<'a> private::ParseNode<'a> for FragmentDefinition<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<FragmentDefinition<'a>> {
        ctx.consume_name(ASTKind::FragmentDefinition, &["fragment"])?;
        let name = ctx.parse_fragment_name()?;
        let type_condition = ctx.parse_type_condition()?;
        let directives = Directives::new_with_ctx(ctx)?;
        let selection_set = SelectionSet::new_with_ctx(ctx)?;
        Ok(FragmentDefinition {
            name,
            type_condition,
            directives,
            selection_set,
        })
    }
}

impl<'a> private::ParseNode<'a> for OperationDefinition<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<OperationDefinition<'a>> {
        if ctx.peek_token(TokenKind::BraceL) {
            // anonymous operation: no name, no variables, no directives
            let selection_set = SelectionSet::new_with_ctx(ctx)?;
            return Ok(OperationDefinition {
                operation: OperationKind::Query,
                name: None,
                variable_definitions: VariableDefinitions::default_in(ctx.arena),
                directives: Directives::default_in(ctx.arena),
                selection_set,
            });
        }
        let keyword = ctx.consume_name(
            ASTKind::OperationDefinition,
            &["query", "mutation", "subscription"],
        )?;
        let operation = match keyword.value {
            "query" => OperationKind::Query,
            "mutation" => OperationKind::Mutation,
            _ => OperationKind::Subscription,
        };
        let name = if ctx.peek_token(TokenKind::Name) {
            Some(ctx.next().value)
        } else {
            None
        };
        let variable_definitions = VariableDefinitions::new_with_ctx(ctx)?;
        let directives = Directives::new_with_ctx(ctx)?;
        let selection_set = SelectionSet::new_with_ctx(ctx)?;
        Ok(OperationDefinition {
            operation,
            name,
            variable_definitions,
            directives,
            selection_set,
        })
    }
}

impl<'a> private::ParseNode<'a> for ObjectDefinition<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<ObjectDefinition<'a>> {
        ctx.consume_name(ASTKind::ObjectDefinition, &["type"])?;
        let name = ctx.consume_name(ASTKind::ObjectDefinition, &[])?;
        let implements = if ctx.peek_name("implements") {
            ctx.advance();
            let interface = ctx.consume_name(ASTKind::ObjectDefinition, &[])?;
            Some(ctx.intern_type(interface.value))
        } else {
            None
        };
        ctx.consume_token(ASTKind::ObjectDefinition, TokenKind::BraceL)?;
        let mut fields = Vec::new_in(ctx.arena);
        while !ctx.peek_token(TokenKind::BraceR) {
            fields.push(ObjectFieldDefinition::new_with_ctx(ctx)?);
        }
        ctx.consume_token(ASTKind::ObjectDefinition, TokenKind::BraceR)?;
        Ok(ObjectDefinition {
            name: name.value,
            implements,
            fields,
        })
    }
}

impl<'a> private::ParseNode<'a> for ObjectFieldDefinition<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<ObjectFieldDefinition<'a>> {
        let name = ctx.consume_name(ASTKind::ObjectFieldDefinition, &[])?;
        let mut arguments = Vec::new_in(ctx.arena);
        if ctx.peek_token(TokenKind::ParenL) {
            ctx.advance();
            while !ctx.peek_token(TokenKind::ParenR) {
                let argument = ctx.consume_name(ASTKind::ObjectFieldArguments, &[])?;
                ctx.consume_token(ASTKind::ObjectFieldArguments, TokenKind::Colon)?;
                let of_type = Type::new_with_ctx(ctx)?;
                let default_value = if ctx.peek_token(TokenKind::Equals) {
                    ctx.advance();
                    Some(Value::new_with_ctx(ctx)?)
                } else {
                    None
                };
                arguments.push(ObjectFieldArgumentDefinition {
                    name: argument.value,
                    of_type,
                    default_value,
                });
            }
            ctx.consume_token(ASTKind::ObjectFieldArguments, TokenKind::ParenR)?;
        }
        ctx.consume_token(ASTKind::ObjectFieldDefinition, TokenKind::Colon)?;
        let of_type = Type::new_with_ctx(ctx)?;
        Ok(ObjectFieldDefinition {
            name: name.value,
            arguments,
            of_type,
        })
    }
}

impl<'a> private::ParseNode<'a> for InterfaceDefinition<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<InterfaceDefinition<'a>> {
        ctx.consume_name(ASTKind::InterfaceDefinition, &["interface"])?;
        let name = ctx.consume_name(ASTKind::InterfaceDefinition, &[])?;
        ctx.consume_token(ASTKind::InterfaceDefinition, TokenKind::BraceL)?;
        let mut fields = Vec::new_in(ctx.arena);
        while !ctx.peek_token(TokenKind::BraceR) {
            let field = ctx.consume_name(ASTKind::InterfaceDefinition, &[])?;
            ctx.consume_token(ASTKind::InterfaceDefinition, TokenKind::Colon)?;
            let of_type = Type::new_with_ctx(ctx)?;
            fields.push(InterfaceFieldDefinition {
                name: field.value,
                of_type,
            });
        }
        ctx.consume_token(ASTKind::InterfaceDefinition, TokenKind::BraceR)?;
        Ok(InterfaceDefinition {
            name: name.value,
            fields,
        })
    }
}

impl<'a> private::ParseNode<'a> for EnumDefinition<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<EnumDefinition<'a>> {
        ctx.consume_name(ASTKind::EnumDefinition, &["enum"])?;
        let name = ctx.consume_name(ASTKind::EnumDefinition, &[])?;
        ctx.consume_token(ASTKind::EnumDefinition, TokenKind::BraceL)?;
        let mut elements = Vec::new_in(ctx.arena);
        while !ctx.peek_token(TokenKind::BraceR) {
            let element = ctx.consume_name(ASTKind::EnumDefinition, &[])?;
            elements.push(EnumElementDefinition {
                name: element.value,
                value: None,
            });
        }
        ctx.consume_token(ASTKind::EnumDefinition, TokenKind::BraceR)?;
        Ok(EnumDefinition {
            name: name.value,
            elements,
        })
    }
}

impl<'a> private::ParseNode<'a> for UnionDefinition<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<UnionDefinition<'a>> {
        ctx.consume_name(ASTKind::UnionDefinition, &["union"])?;
        let name = ctx.consume_name(ASTKind::UnionDefinition, &[])?;
        ctx.consume_token(ASTKind::UnionDefinition, TokenKind::Equals)?;
        let mut types = Vec::new_in(ctx.arena);
        types.push(Type::new_with_ctx(ctx)?);
        while ctx.peek_token(TokenKind::Pipe) {
            ctx.advance();
            types.push(Type::new_with_ctx(ctx)?);
        }
        Ok(UnionDefinition {
            name: name.value,
            types,
        })
    }
}

impl<'a> private::ParseNode<'a> for InputDefinition<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<InputDefinition<'a>> {
        ctx.consume_name(ASTKind::InputDefinition, &["input"])?;
        let name = ctx.consume_name(ASTKind::InputDefinition, &[])?;
        ctx.consume_token(ASTKind::InputDefinition, TokenKind::BraceL)?;
        let mut fields = Vec::new_in(ctx.arena);
        while !ctx.peek_token(TokenKind::BraceR) {
            let field = ctx.consume_name(ASTKind::InputDefinition, &[])?;
            ctx.consume_token(ASTKind::InputDefinition, TokenKind::Colon)?;
            let of_type = Type::new_with_ctx(ctx)?;
            fields.push(InputFieldDefinition {
                name: field.value,
                of_type,
            });
        }
        ctx.consume_token(ASTKind::InputDefinition, TokenKind::BraceR)?;
        Ok(InputDefinition {
            name: name.value,
            fields,
        })
    }
}

impl<'a> private::ParseNode<'a> for Schema<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<Schema<'a>> {
        ctx.consume_name(ASTKind::Schema, &["schema"])?;
        ctx.consume_token(ASTKind::Schema, TokenKind::BraceL)?;
        let mut query = None;
        let mut mutation = None;
        let mut subscription = None;
        let mut types = Vec::new_in(ctx.arena);
        let mut seen_types = false;
        while !ctx.peek_token(TokenKind::BraceR) {
            let key =
                ctx.consume_name(ASTKind::Schema, &["query", "mutation", "subscription", "types"])?;
            ctx.consume_token(ASTKind::Schema, TokenKind::Colon)?;
            match key.value {
                "types" => {
                    if seen_types {
                        return Err(ctx.semantic_error(
                            ASTKind::Schema,
                            &key,
                            "duplicate types entry",
                        ));
                    }
                    seen_types = true;
                    ctx.consume_token(ASTKind::Schema, TokenKind::BracketL)?;
                    while !ctx.peek_token(TokenKind::BracketR) {
                        let member = ctx.consume_name(ASTKind::Schema, &[])?;
                        types.push(ctx.lookup_type_definition(&member)?);
                    }
                    ctx.consume_token(ASTKind::Schema, TokenKind::BracketR)?;
                }
                operation => {
                    let member = ctx.consume_name(ASTKind::Schema, &[])?;
                    let object = ctx.lookup_object(&member)?;
                    let slot = match operation {
                        "query" => &mut query,
                        "mutation" => &mut mutation,
                        _ => &mut subscription,
                    };
                    if slot.is_some() {
                        return Err(ctx.semantic_error(
                            ASTKind::Schema,
                            &key,
                            &format!("duplicate {operation} entry"),
                        ));
                    }
                    *slot = Some(object);
                }
            }
        }
        let close = ctx.consume_token(ASTKind::Schema, TokenKind::BraceR)?;
        let query = match query {
            Some(query) => query,
            None => {
                return Err(ctx.semantic_error(ASTKind::Schema, &close, "a query entry is required"))
            }
        };
        Ok(Schema {
            query,
            mutation,
            subscription,
            types,
        })
    }
}

impl<'a> private::ParseNode<'a> for Document<'a> {
    fn new_with_ctx(ctx: &mut ParserContext<'a>) -> Result<Document<'a>> {
        let mut definitions = Vec::new_in(ctx.arena);
        loop {
            if let Some(cancel) = &ctx.cancel {
                if cancel.is_cancelled() {
                    return Err(Error::new(
                        "parse aborted by the caller",
                        ErrorType::Cancelled,
                    ));
                }
            }
            let token = ctx.peek().clone();
            let definition = match token.kind {
                TokenKind::Eof => break,
                TokenKind::BraceL => {
                    let operation = OperationDefinition::new_with_ctx(ctx)?;
                    Definition::Operation(ctx.arena.alloc(operation))
                }
                TokenKind::Name => match token.value {
                    "query" | "mutation" | "subscription" => {
                        let operation = OperationDefinition::new_with_ctx(ctx)?;
                        Definition::Operation(ctx.arena.alloc(operation))
                    }
                    "fragment" => {
                        let fragment = FragmentDefinition::new_with_ctx(ctx)?;
                        Definition::Fragment(ctx.arena.alloc(fragment))
                    }
                    "type" => {
                        let object = ObjectDefinition::new_with_ctx(ctx)?;
                        let definition = Definition::Object(ctx.arena.alloc(object));
                        ctx.register_definition(ASTKind::ObjectDefinition, &token, definition)?;
                        definition
                    }
                    "interface" => {
                        let interface = InterfaceDefinition::new_with_ctx(ctx)?;
                        let definition = Definition::Interface(ctx.arena.alloc(interface));
                        ctx.register_definition(ASTKind::InterfaceDefinition, &token, definition)?;
                        definition
                    }
                    "enum" => {
                        let enum_def = EnumDefinition::new_with_ctx(ctx)?;
                        let definition = Definition::Enum(ctx.arena.alloc(enum_def));
                        ctx.register_definition(ASTKind::EnumDefinition, &token, definition)?;
                        definition
                    }
                    "union" => {
                        let union = UnionDefinition::new_with_ctx(ctx)?;
                        let definition = Definition::Union(ctx.arena.alloc(union));
                        ctx.register_definition(ASTKind::UnionDefinition, &token, definition)?;
                        definition
                    }
                    "input" => {
                        let input = InputDefinition::new_with_ctx(ctx)?;
                        let definition = Definition::Input(ctx.arena.alloc(input));
                        ctx.register_definition(ASTKind::InputDefinition, &token, definition)?;
                        definition
                    }
                    "schema" => {
                        if ctx.seen_schema {
                            return Err(ctx.semantic_error(
                                ASTKind::Schema,
                                &token,
                                "a document must not declare more than one schema block",
                            ));
                        }
                        ctx.seen_schema = true;
                        let schema = Schema::new_with_ctx(ctx)?;
                        Definition::Schema(ctx.arena.alloc(schema))
                    }
                    _ => {
                        return Err(ctx.unexpected_token(
                            ASTKind::Document,
                            &token,
                            "name \"query\", \"mutation\", \"subscription\", \"fragment\", \
                             \"type\", \"enum\", \"interface\", \"union\", \"input\" or \"schema\"",
                        ))
                    }
                },
                _ => {
                    return Err(ctx.unexpected_token(ASTKind::Document, &token, "a definition"));
                }
            };
            definitions.push(definition);
        }
        Ok(Document {
            definitions,
            size_hint: ctx.source.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::private::ParserContext;
    use super::*;
    use crate::error::ErrorType;

    #[test]
    fn values() {
        let ctx = ASTContext::new();
        assert_eq!(
            *Value::parse(&ctx, "true").unwrap(),
            Value::Boolean(BooleanValue { value: true })
        );
        assert_eq!(
            *Value::parse(&ctx, "false").unwrap(),
            Value::Boolean(BooleanValue { value: false })
        );
        assert_eq!(*Value::parse(&ctx, "null").unwrap(), Value::Null);
        assert_eq!(
            *Value::parse(&ctx, "$var").unwrap(),
            Value::Variable(Variable { name: "var" })
        );
        assert_eq!(
            *Value::parse(&ctx, "JEDI").unwrap(),
            Value::Enum(EnumValue { value: "JEDI" })
        );
        assert_eq!(
            *Value::parse(&ctx, "123").unwrap(),
            Value::Int(IntValue { value: 123 })
        );
        assert_eq!(
            *Value::parse(&ctx, "-53.211").unwrap(),
            Value::Float(FloatValue { value: -53.211 })
        );
        assert_eq!(
            *Value::parse(&ctx, "\"1000\"").unwrap(),
            Value::String(StringValue { value: "1000" })
        );
    }

    #[test]
    fn string_values_keep_escapes_raw() {
        let ctx = ASTContext::new();
        assert_eq!(
            *Value::parse(&ctx, r#""Hello World\n""#).unwrap(),
            Value::String(StringValue {
                value: r"Hello World\n"
            })
        );
    }

    #[test]
    fn int_overflow_is_rejected() {
        let ctx = ASTContext::new();
        let error =
            Value::parse(&ctx, "1002275100009989500000000000000000000000000000000000").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Semantic);
        assert!(error.message().contains("out of range"));
    }

    #[test]
    fn float_overflow_is_rejected() {
        let ctx = ASTContext::new();
        let error = Value::parse(&ctx, "1e+400").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Semantic);
        assert!(error.message().contains("float literal 1e+400 is out of range"));
    }

    #[test]
    fn object_values() {
        let ctx = ASTContext::new();
        let value = Value::parse(&ctx, "{ lon: 12.43, lat: -53.211 }").unwrap();
        match value {
            Value::Object(object) => {
                assert_eq!(object.children.len(), 2);
                assert_eq!(object.children[0].name, "lon");
                assert_eq!(object.children[1].name, "lat");
            }
            other => panic!("expected object value, got {other:?}"),
        }
    }

    #[test]
    fn types_and_nullability() {
        let ctx = ASTContext::new();
        let ty = Type::parse(&ctx, "Episode").unwrap();
        assert!(ty.is_nullable());
        let ty = Type::parse(&ctx, "Episode!").unwrap();
        assert!(!ty.is_nullable());
        let ty = Type::parse(&ctx, "[Episode]!").unwrap();
        assert!(!ty.is_nullable());
        assert_eq!(ty.innermost().name, "Episode");
        assert!(ty.innermost().nullable);
        let ty = Type::parse(&ctx, "[Episode!]").unwrap();
        assert!(ty.is_nullable());
        assert!(!ty.innermost().nullable);
    }

    #[test]
    fn named_type_interning() {
        let ctx = ASTContext::new();
        let ast = Document::parse(
            &ctx,
            "query A($a: Episode, $b: Episode, $c: Episode!) { hero }",
        )
        .unwrap();
        let operation = ast.operation(Some("A")).unwrap();
        let defs = &operation.variable_definitions.children;
        let first = match defs[0].of_type {
            Type::Named(named) => named,
            _ => panic!("expected named type"),
        };
        let second = match defs[1].of_type {
            Type::Named(named) => named,
            _ => panic!("expected named type"),
        };
        let third = match defs[2].of_type {
            Type::Named(named) => named,
            _ => panic!("expected named type"),
        };
        // plain references are the same interned entity
        assert!(std::ptr::eq(first, second));
        // `!` clones; the shared nullable node is unaffected
        assert!(!std::ptr::eq(first, third));
        assert!(first.nullable);
        assert!(!third.nullable);
    }

    #[test]
    fn anonymous_operation() {
        let ctx = ASTContext::new();
        let ast = Document::parse(&ctx, "{ me { name } }").unwrap();
        assert_eq!(ast.definitions.len(), 1);
        let operation = ast.operation(None).unwrap();
        assert_eq!(operation.operation, OperationKind::Query);
        assert_eq!(operation.name, None);
        assert!(operation.variable_definitions.is_empty());
        assert!(operation.directives.is_empty());
        let me = operation.selection_set.selections[0].field().unwrap();
        assert_eq!(me.name, "me");
        assert_eq!(me.selection_set.selections[0].field().unwrap().name, "name");
    }

    #[test]
    fn named_operation_with_variables() {
        let ctx = ASTContext::new();
        let ast = Document::parse(
            &ctx,
            "query HeroNameAndFriends($episode: Episode) {
              hero(episode: $episode) {
                name
                friends {
                  name
                }
              }
            }",
        )
        .unwrap();
        let operation = ast.operation(None).unwrap();
        assert_eq!(operation.name, Some("HeroNameAndFriends"));
        let vardef = &operation.variable_definitions.children[0];
        assert_eq!(vardef.variable.name, "episode");
        assert_eq!(vardef.of_type.innermost().name, "Episode");
        assert_eq!(vardef.default_value, None);
        let hero = operation.selection_set.selections[0].field().unwrap();
        assert_eq!(hero.arguments.children[0].name, "episode");
        assert_eq!(
            hero.arguments.children[0].value,
            Value::Variable(Variable { name: "episode" })
        );
        assert_eq!(hero.selection_set.selections.len(), 2);
    }

    #[test]
    fn arguments_preserve_source_order() {
        let ctx = ASTContext::new();
        let ast = Document::parse(&ctx, r#"{ human(id: "1000") { name height(unit: FOOT) } }"#)
            .unwrap();
        let human = ast.operation(None).unwrap().selection_set.selections[0]
            .field()
            .unwrap();
        assert_eq!(
            human.arguments.children[0].value,
            Value::String(StringValue { value: "1000" })
        );
        let height = human.selection_set.selections[1].field().unwrap();
        assert_eq!(
            height.arguments.children[0].value,
            Value::Enum(EnumValue { value: "FOOT" })
        );
    }

    #[test]
    fn fragment_definition() {
        let ctx = ASTContext::new();
        let ast = Document::parse(
            &ctx,
            "fragment comparisonFields on Character { name appearsIn friends { name } }",
        )
        .unwrap();
        let fragment = ast.definitions[0].fragment().unwrap();
        assert_eq!(fragment.name, "comparisonFields");
        assert_eq!(fragment.type_condition.name, "Character");
        assert_eq!(fragment.selection_set.selections.len(), 3);
    }

    #[test]
    fn fragment_named_on_is_rejected() {
        let ctx = ASTContext::new();
        let error = Document::parse(&ctx, "fragment on on Character { name }").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Semantic);
        assert!(error
            .message()
            .contains("\"on\" is not a legal fragment name"));
    }

    #[test]
    fn spreads_and_inline_fragments() {
        let ctx = ASTContext::new();
        let ast = Document::parse(
            &ctx,
            "{ search { ...Result ... on Human { name } ... @skip(if: true) { id } } }",
        )
        .unwrap();
        let search = ast.operation(None).unwrap().selection_set.selections[0]
            .field()
            .unwrap();
        let selections = &search.selection_set.selections;
        assert_eq!(selections[0].fragment_spread().unwrap().name, "Result");
        let on_human = selections[1].inline_fragment().unwrap();
        assert_eq!(on_human.type_condition.unwrap().name, "Human");
        let bare = selections[2].inline_fragment().unwrap();
        assert_eq!(bare.type_condition, None);
        assert_eq!(bare.directives.children[0].name, "skip");
    }

    #[test]
    fn empty_selection_set_is_accepted() {
        let ctx = ASTContext::new();
        let ast = Document::parse(&ctx, "query Empty { }").unwrap();
        assert!(ast.operation(None).unwrap().selection_set.is_empty());
    }

    #[test]
    fn object_definitions() {
        let ctx = ASTContext::new();
        let ast = Document::parse(
            &ctx,
            "type Starship {
              id: ID!
              name: String!
              length(unit: LengthUnit = METER): Float
            }",
        )
        .unwrap();
        let object = match ast.definitions[0] {
            Definition::Object(object) => object,
            other => panic!("expected object definition, got {other:?}"),
        };
        assert_eq!(object.name, "Starship");
        assert_eq!(object.implements, None);
        assert_eq!(object.fields.len(), 3);
        assert!(!object.fields[0].of_type.is_nullable());
        let length = &object.fields[2];
        assert_eq!(length.arguments[0].name, "unit");
        assert_eq!(
            length.arguments[0].default_value,
            Some(Value::Enum(EnumValue { value: "METER" }))
        );
    }

    #[test]
    fn implements_clause() {
        let ctx = ASTContext::new();
        let ast = Document::parse(&ctx, "type Human implements Character { id: ID! }").unwrap();
        let object = match ast.definitions[0] {
            Definition::Object(object) => object,
            other => panic!("expected object definition, got {other:?}"),
        };
        assert_eq!(object.implements.unwrap().name, "Character");
    }

    #[test]
    fn interface_enum_union_input() {
        let ctx = ASTContext::new();
        let ast = Document::parse(
            &ctx,
            "interface Character { id: ID! name: String }
             enum Episode { NEWHOPE EMPIRE JEDI }
             union SearchResult = Human | Droid | Starship
             input ReviewInput { stars: Int! commentary: String }",
        )
        .unwrap();
        match ast.definitions[0] {
            Definition::Interface(interface) => {
                assert_eq!(interface.name, "Character");
                assert_eq!(interface.fields.len(), 2);
            }
            other => panic!("expected interface, got {other:?}"),
        }
        match ast.definitions[1] {
            Definition::Enum(enum_def) => {
                let names: std::vec::Vec<&str> =
                    enum_def.elements.iter().map(|e| e.name).collect();
                assert_eq!(names, vec!["NEWHOPE", "EMPIRE", "JEDI"]);
            }
            other => panic!("expected enum, got {other:?}"),
        }
        match ast.definitions[2] {
            Definition::Union(union) => {
                assert_eq!(union.types.len(), 3);
                assert_eq!(union.types[0].innermost().name, "Human");
            }
            other => panic!("expected union, got {other:?}"),
        }
        match ast.definitions[3] {
            Definition::Input(input) => {
                assert_eq!(input.fields.len(), 2);
                assert!(!input.fields[0].of_type.is_nullable());
            }
            other => panic!("expected input, got {other:?}"),
        }
    }

    #[test]
    fn schema_block_resolves_definitions() {
        let ctx = ASTContext::new();
        let ast = Document::parse(
            &ctx,
            "type Query { hero: Character }
             type Mutation { review: Int }
             schema { query: Query mutation: Mutation }",
        )
        .unwrap();
        let schema = match ast.definitions[2] {
            Definition::Schema(schema) => schema,
            other => panic!("expected schema, got {other:?}"),
        };
        assert_eq!(schema.query.name, "Query");
        assert_eq!(schema.mutation.unwrap().name, "Mutation");
        assert_eq!(schema.subscription, None);
        assert!(schema.types.is_empty());
        // the schema shares the document's object definition node
        match ast.definitions[0] {
            Definition::Object(object) => assert!(std::ptr::eq(object, schema.query)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn schema_block_types_entry() {
        let ctx = ASTContext::new();
        let ast = Document::parse(
            &ctx,
            "enum Episode { JEDI }
             type Query { a: Int }
             schema { query: Query types: [Episode, Query] }",
        )
        .unwrap();
        let schema = match ast.definitions[2] {
            Definition::Schema(schema) => schema,
            other => panic!("expected schema, got {other:?}"),
        };
        assert_eq!(schema.types.len(), 2);
        assert_eq!(schema.types[0].name(), Some("Episode"));
    }

    #[test]
    fn schema_block_errors() {
        let ctx = ASTContext::new();
        let error = Document::parse(&ctx, "schema { query: Query }").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Semantic);
        assert!(error.message().contains("type Query is not defined"));

        let error = Document::parse(
            &ctx,
            "enum Episode { JEDI } schema { query: Episode }",
        )
        .unwrap_err();
        assert!(error.message().contains("not an object definition"));

        let error = Document::parse(&ctx, "type Query { a: Int } schema { }").unwrap_err();
        assert!(error.message().contains("a query entry is required"));

        let error = Document::parse(
            &ctx,
            "type Query { a: Int } schema { query: Query } schema { query: Query }",
        )
        .unwrap_err();
        assert!(error.message().contains("more than one schema block"));

        let error = Document::parse(
            &ctx,
            "type Query { a: Int } schema { query: Query query: Query }",
        )
        .unwrap_err();
        assert!(error.message().contains("duplicate query entry"));
    }

    #[test]
    fn duplicate_type_definitions_are_rejected() {
        let ctx = ASTContext::new();
        let error =
            Document::parse(&ctx, "type Person { a: Int } type Person { b: Int }").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Semantic);
        assert!(error.message().contains("duplicate definition of type"));
    }

    #[test]
    fn syntax_error_reports_position_and_context() {
        let ctx = ASTContext::new();
        let error = Document::parse(&ctx, "query {\n  document {\n    $\n  }\n}").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Syntax);
        assert_eq!(
            error.location(),
            Some(&Location { line: 3, column: 5 })
        );
        assert!(error.message().contains("at line 3, column 5"));
        assert!(error.print(true).contains(" 3 |     $"));
    }

    #[test]
    fn lex_error_surfaces_description() {
        let ctx = ASTContext::new();
        let error = Document::parse(&ctx, "{ field(arg: \"unterminated) }").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Lex);
        assert!(error.message().contains("unterminated string"));
    }

    #[test]
    fn unknown_keyword_is_a_syntax_error() {
        let ctx = ASTContext::new();
        let error = Document::parse(&ctx, "scalar DateTime").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Syntax);
        assert!(error.message().contains("document: expected"));
        assert!(error.message().contains("NAME(scalar)"));
    }

    #[test]
    fn cancellation_between_definitions() {
        let ctx = ASTContext::new();
        let cancel = CancelToken::new();
        cancel.cancel();
        let error =
            Document::parse_with_cancel(&ctx, "{ a } { b }", &cancel).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Cancelled);
        // a fresh token parses normally
        let cancel = CancelToken::new();
        assert!(Document::parse_with_cancel(&ctx, "{ a }", &cancel).is_ok());
    }

    #[test]
    fn lookahead_ring_rewind() {
        let ctx = ASTContext::new();
        let source = ctx.alloc_str("query Name { field }");
        let mut parser_ctx = ParserContext::new(&ctx, source, None);
        assert_eq!(parser_ctx.next().value, "query");
        assert_eq!(parser_ctx.next().value, "Name");
        parser_ctx.rewind();
        assert_eq!(parser_ctx.peek().value, "Name");
        parser_ctx.rewind();
        assert_eq!(parser_ctx.next().value, "query");
        assert_eq!(parser_ctx.next().value, "Name");
        assert_eq!(parser_ctx.next().kind, TokenKind::BraceL);
    }
}
