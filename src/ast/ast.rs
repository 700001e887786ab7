pub use super::ast_conversion::*;
use crate::error::{Error, ErrorType, Result};
use bumpalo::collections::Vec;
use hashbrown::{hash_map::DefaultHashBuilder, HashMap};

/// A context for a GraphQL document which holds an arena allocator.
///
/// For the duration of parsing, storing, validating, traversing, and printing an AST it's
/// performant and convenient to allocate memory in one chunk for the AST's operations. This
/// context represents the lifetime of an AST and its derivatives: every node, name slice, and
/// interned type reference lives in its arena and is dropped with it all at once.
pub struct ASTContext {
    /// An arena allocator that holds the memory allocated for the AST Context's lifetime
    pub arena: bumpalo::Bump,
}

impl ASTContext {
    /// Create a new AST context with a fresh arena.
    pub fn new() -> Self {
        ASTContext {
            arena: bumpalo::Bump::new(),
        }
    }

    /// Put the value of `item` onto the arena and return a reference to it.
    #[inline]
    pub fn alloc<T>(&self, item: T) -> &T {
        self.arena.alloc(item)
    }

    /// Allocate an `&str` slice onto the arena and return a reference to it.
    #[inline]
    pub fn alloc_str(&self, str: &str) -> &str {
        self.arena.alloc_str(str)
    }

    /// Puts a `String` onto the arena and returns a reference to it to tie the `String`'s
    /// lifetime to this AST context without reallocating or copying it.
    #[inline]
    pub fn alloc_string(&self, str: String) -> &str {
        self.arena.alloc(str)
    }
}

impl Default for ASTContext {
    fn default() -> Self {
        Self::new()
    }
}

/// AST Node of a variable identifier value.
///
/// These are identifiers prefixed with a `$` sign, as used in variable definitions and in value
/// positions referring to them.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Variable<'a> {
    pub name: &'a str,
}

/// AST Node of an integer value.
///
/// The literal is parsed into a host integer at parse time; literals outside the 64-bit range are
/// rejected by the parser.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct IntValue {
    pub value: i64,
}

/// AST Node of a floating point value, parsed into a host double at parse time.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct FloatValue {
    pub value: f64,
}

/// AST Node of a string value.
///
/// `value` is the raw inner source slice: surrounding quotes are stripped but escape sequences
/// are kept undecoded, so printing a string value reproduces the input byte for byte.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct StringValue<'a> {
    pub value: &'a str,
}

/// AST Node of a boolean value.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct BooleanValue {
    pub value: bool,
}

/// AST Node of an enum value, typically written in all caps, e.g. `MOBILE_WEB`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct EnumValue<'a> {
    pub value: &'a str,
}

/// AST Node of possible input values.
///
/// Fields and directives accept input values as arguments; variable definitions accept them as
/// defaults. There is no list literal in this grammar.
#[derive(Debug, PartialEq, Clone)]
pub enum Value<'a> {
    Variable(Variable<'a>),
    Int(IntValue),
    Float(FloatValue),
    String(StringValue<'a>),
    Boolean(BooleanValue),
    Enum(EnumValue<'a>),
    Object(ObjectValue<'a>),
    Null,
}

/// AST Node for a field of an object value literal.
#[derive(Debug, PartialEq, Clone)]
pub struct ObjectField<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
}

/// AST Node for an object value literal, an ordered list of named fields.
#[derive(Debug, PartialEq, Clone)]
pub struct ObjectValue<'a> {
    pub children: Vec<'a, ObjectField<'a>>,
}

impl<'a> ObjectValue<'a> {
    /// Checks whether this object literal contains any fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// AST Node for an argument, which carries a name and a value.
#[derive(Debug, PartialEq, Clone)]
pub struct Argument<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
}

/// AST Node for a list of arguments passed to a field or directive.
#[derive(Debug, PartialEq, Clone)]
pub struct Arguments<'a> {
    pub children: Vec<'a, Argument<'a>>,
}

impl<'a> Arguments<'a> {
    /// Checks whether this list of arguments contains any values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// AST Node for a directive annotation, e.g. `@include(if: $flag)`.
#[derive(Debug, PartialEq, Clone)]
pub struct Directive<'a> {
    pub name: &'a str,
    pub arguments: Arguments<'a>,
}

/// AST Node for a list of directives annotating another node.
#[derive(Debug, PartialEq, Clone)]
pub struct Directives<'a> {
    pub children: Vec<'a, Directive<'a>>,
}

impl<'a> Directives<'a> {
    /// Checks whether this list of directives contains any values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// AST Node for a reference to a named type.
///
/// Nullable occurrences are interned per parse: all plain references to the same name within one
/// document are the same arena node. Applying `!` allocates a separate node instead, so `T` and
/// `T!` never alias each other's nullability.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct NamedType<'a> {
    pub name: &'a str,
    pub nullable: bool,
}

impl<'a> NamedType<'a> {
    /// Allocates a new nullable named type for programmatically built trees.
    pub fn new(ctx: &'a ASTContext, name: &str) -> &'a NamedType<'a> {
        ctx.alloc(NamedType {
            name: ctx.alloc_str(name),
            nullable: true,
        })
    }
}

/// AST Node for a list type wrapping an element type, e.g. `[Episode]`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ListType<'a> {
    pub of_type: Type<'a>,
    pub nullable: bool,
}

/// AST Node for a type reference, the recursive combination of named and list types.
///
/// Nullability lives on the referenced node; `!` in the source sets it to `false`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Type<'a> {
    Named(&'a NamedType<'a>),
    List(&'a ListType<'a>),
}

impl<'a> Type<'a> {
    /// Wraps a type into a nullable list type for programmatically built trees.
    pub fn list(ctx: &'a ASTContext, of_type: Type<'a>) -> Type<'a> {
        Type::List(ctx.alloc(ListType {
            of_type,
            nullable: true,
        }))
    }

    /// Whether this type reference may be `null`, i.e. carries no `!`.
    #[inline]
    pub fn is_nullable(&self) -> bool {
        match self {
            Type::Named(named) => named.nullable,
            Type::List(list) => list.nullable,
        }
    }

    /// Unwraps list types recursively and returns the named type contained innermost.
    pub fn innermost(&self) -> &'a NamedType<'a> {
        match self {
            Type::Named(named) => named,
            Type::List(list) => list.of_type.innermost(),
        }
    }
}

/// AST Node for a selection set, the `{ … }` block listing what to fetch on a parent.
#[derive(Debug, PartialEq, Clone)]
pub struct SelectionSet<'a> {
    pub selections: Vec<'a, Selection<'a>>,
}

impl<'a> SelectionSet<'a> {
    /// Checks whether this selection set contains any selections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// AST Node for a field selection, optionally aliased and parameterised.
#[derive(Debug, PartialEq, Clone)]
pub struct SelectionField<'a> {
    /// The alias under which the field's result is requested, when present.
    pub alias: Option<&'a str>,
    pub name: &'a str,
    /// Arguments passed to the field; empty when none were written.
    pub arguments: Arguments<'a>,
    /// Directives annotating this field; empty when none were written.
    pub directives: Directives<'a>,
    /// The nested selection set; empty for leaf fields.
    pub selection_set: SelectionSet<'a>,
}

impl<'a> SelectionField<'a> {
    /// Get the alias of the field if present, otherwise its name.
    #[inline]
    pub fn alias_or_name(&self) -> &'a str {
        self.alias.unwrap_or(self.name)
    }
}

/// AST Node for a fragment spread, `...Name`, referring to a fragment definition.
#[derive(Debug, PartialEq, Clone)]
pub struct FragmentSpread<'a> {
    pub name: &'a str,
    pub directives: Directives<'a>,
}

/// AST Node for an inline fragment with an optional type condition.
#[derive(Debug, PartialEq, Clone)]
pub struct InlineFragment<'a> {
    pub type_condition: Option<&'a NamedType<'a>>,
    pub directives: Directives<'a>,
    pub selection_set: SelectionSet<'a>,
}

/// AST Node of a selection as contained inside a selection set.
#[derive(Debug, PartialEq, Clone)]
pub enum Selection<'a> {
    Field(SelectionField<'a>),
    FragmentSpread(FragmentSpread<'a>),
    InlineFragment(InlineFragment<'a>),
}

impl<'a> Selection<'a> {
    /// Helper method to return the [`SelectionField`] if the selection is a field.
    #[inline]
    pub fn field(&'a self) -> Option<&'a SelectionField<'a>> {
        match self {
            Selection::Field(field) => Some(field),
            _ => None,
        }
    }

    /// Helper method to return the [`FragmentSpread`] if the selection is a spread.
    #[inline]
    pub fn fragment_spread(&'a self) -> Option<&'a FragmentSpread<'a>> {
        match self {
            Selection::FragmentSpread(spread) => Some(spread),
            _ => None,
        }
    }

    /// Helper method to return the [`InlineFragment`] if the selection is an inline fragment.
    #[inline]
    pub fn inline_fragment(&'a self) -> Option<&'a InlineFragment<'a>> {
        match self {
            Selection::InlineFragment(inline) => Some(inline),
            _ => None,
        }
    }
}

/// AST Node for a variable definition inside an operation's parameter list.
#[derive(Debug, PartialEq, Clone)]
pub struct VariableDefinition<'a> {
    pub variable: Variable<'a>,
    pub of_type: Type<'a>,
    /// The default applied when the variable is not passed; `None` when no `=` was written.
    pub default_value: Option<Value<'a>>,
}

/// AST Node for the list of variable definitions of an operation.
#[derive(Debug, PartialEq, Clone)]
pub struct VariableDefinitions<'a> {
    pub children: Vec<'a, VariableDefinition<'a>>,
}

impl<'a> VariableDefinitions<'a> {
    /// Checks whether the list of variable definitions is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// The kind of operation specified by an [`OperationDefinition`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// The source keyword for this operation kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

/// AST Node for an operation definition, the entry point of execution.
///
/// An anonymous `{ … }` document parses as a query operation without name, variables, or
/// directives.
#[derive(Debug, PartialEq, Clone)]
pub struct OperationDefinition<'a> {
    pub operation: OperationKind,
    pub name: Option<&'a str>,
    pub variable_definitions: VariableDefinitions<'a>,
    pub directives: Directives<'a>,
    pub selection_set: SelectionSet<'a>,
}

/// AST Node for a named fragment definition with a type condition.
///
/// The name is never the keyword `on`; the parser rejects that.
#[derive(Debug, PartialEq, Clone)]
pub struct FragmentDefinition<'a> {
    pub name: &'a str,
    pub type_condition: &'a NamedType<'a>,
    pub directives: Directives<'a>,
    pub selection_set: SelectionSet<'a>,
}

/// AST Node for an object type definition of the schema dialect.
#[derive(Debug, PartialEq, Clone)]
pub struct ObjectDefinition<'a> {
    pub name: &'a str,
    /// The implemented interface, when an `implements` clause is present.
    pub implements: Option<&'a NamedType<'a>>,
    pub fields: Vec<'a, ObjectFieldDefinition<'a>>,
}

impl<'a> ObjectDefinition<'a> {
    /// Creates an empty object definition for programmatically built schemas.
    pub fn new(ctx: &'a ASTContext, name: &str) -> Self {
        ObjectDefinition {
            name: ctx.alloc_str(name),
            implements: None,
            fields: Vec::new_in(&ctx.arena),
        }
    }
}

/// AST Node for a single field of an object type definition.
#[derive(Debug, PartialEq, Clone)]
pub struct ObjectFieldDefinition<'a> {
    pub name: &'a str,
    pub arguments: Vec<'a, ObjectFieldArgumentDefinition<'a>>,
    pub of_type: Type<'a>,
}

impl<'a> ObjectFieldDefinition<'a> {
    /// Creates a field definition without arguments for programmatically built schemas.
    pub fn new(ctx: &'a ASTContext, name: &str, of_type: Type<'a>) -> Self {
        ObjectFieldDefinition {
            name: ctx.alloc_str(name),
            arguments: Vec::new_in(&ctx.arena),
            of_type,
        }
    }
}

/// AST Node for one argument of an object field definition, e.g. `unit: LengthUnit = METER`.
#[derive(Debug, PartialEq, Clone)]
pub struct ObjectFieldArgumentDefinition<'a> {
    pub name: &'a str,
    pub of_type: Type<'a>,
    pub default_value: Option<Value<'a>>,
}

/// AST Node for an interface type definition.
#[derive(Debug, PartialEq, Clone)]
pub struct InterfaceDefinition<'a> {
    pub name: &'a str,
    pub fields: Vec<'a, InterfaceFieldDefinition<'a>>,
}

/// AST Node for a single field of an interface definition.
#[derive(Debug, PartialEq, Clone)]
pub struct InterfaceFieldDefinition<'a> {
    pub name: &'a str,
    pub of_type: Type<'a>,
}

/// AST Node for an enum type definition.
///
/// An enum must have at least one element by the time it is printed.
#[derive(Debug, PartialEq, Clone)]
pub struct EnumDefinition<'a> {
    pub name: &'a str,
    pub elements: Vec<'a, EnumElementDefinition<'a>>,
}

impl<'a> EnumDefinition<'a> {
    /// Creates an empty enum definition for programmatically built schemas.
    pub fn new(ctx: &'a ASTContext, name: &str) -> Self {
        EnumDefinition {
            name: ctx.alloc_str(name),
            elements: Vec::new_in(&ctx.arena),
        }
    }
}

/// AST Node for one element of an enum definition.
///
/// The literal value is only settable through constructors; the grammar and the printer work with
/// the element name alone.
#[derive(Debug, PartialEq, Clone)]
pub struct EnumElementDefinition<'a> {
    pub name: &'a str,
    pub value: Option<Value<'a>>,
}

impl<'a> EnumElementDefinition<'a> {
    /// Creates an element without a literal value.
    pub fn new(ctx: &'a ASTContext, name: &str) -> Self {
        EnumElementDefinition {
            name: ctx.alloc_str(name),
            value: None,
        }
    }
}

/// AST Node for a union type definition with at least one member type.
#[derive(Debug, PartialEq, Clone)]
pub struct UnionDefinition<'a> {
    pub name: &'a str,
    pub types: Vec<'a, Type<'a>>,
}

impl<'a> UnionDefinition<'a> {
    /// Creates a union without members for programmatically built schemas. A union must have
    /// gained at least one member by the time it is printed.
    pub fn new(ctx: &'a ASTContext, name: &str) -> Self {
        UnionDefinition {
            name: ctx.alloc_str(name),
            types: Vec::new_in(&ctx.arena),
        }
    }
}

/// AST Node for an input type definition.
#[derive(Debug, PartialEq, Clone)]
pub struct InputDefinition<'a> {
    pub name: &'a str,
    pub fields: Vec<'a, InputFieldDefinition<'a>>,
}

/// AST Node for a single field of an input definition.
#[derive(Debug, PartialEq, Clone)]
pub struct InputFieldDefinition<'a> {
    pub name: &'a str,
    pub of_type: Type<'a>,
}

/// AST Node describing a schema's operation roots and member types.
///
/// Inside a document this is the `schema { … }` block with its operation types resolved against
/// the object definitions parsed earlier in the same document. It can also serve as a standalone
/// traversal and format root for programmatically assembled schemas, in which case `types` lists
/// the member type definitions printed ahead of the query type.
#[derive(Debug, PartialEq, Clone)]
pub struct Schema<'a> {
    pub query: &'a ObjectDefinition<'a>,
    pub mutation: Option<&'a ObjectDefinition<'a>>,
    pub subscription: Option<&'a ObjectDefinition<'a>>,
    pub types: Vec<'a, Definition<'a>>,
}

impl<'a> Schema<'a> {
    /// Creates a schema root around a query type for programmatically built trees.
    pub fn new(ctx: &'a ASTContext, query: &'a ObjectDefinition<'a>) -> Self {
        Schema {
            query,
            mutation: None,
            subscription: None,
            types: Vec::new_in(&ctx.arena),
        }
    }

    /// Adds a member type definition; it is printed ahead of the query type.
    pub fn add_type(&mut self, definition: Definition<'a>) {
        self.types.push(definition);
    }
}

/// AST Node for a definition inside a document.
///
/// Every payload is an arena reference, which keeps the enum `Copy` and lets a [Schema] node
/// share the object definitions it resolves.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Definition<'a> {
    Operation(&'a OperationDefinition<'a>),
    Fragment(&'a FragmentDefinition<'a>),
    Object(&'a ObjectDefinition<'a>),
    Interface(&'a InterfaceDefinition<'a>),
    Union(&'a UnionDefinition<'a>),
    Enum(&'a EnumDefinition<'a>),
    Input(&'a InputDefinition<'a>),
    Schema(&'a Schema<'a>),
}

impl<'a> Definition<'a> {
    /// The definition's own name; `None` for anonymous operations and schema blocks.
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Definition::Operation(operation) => operation.name,
            Definition::Fragment(fragment) => Some(fragment.name),
            Definition::Object(object) => Some(object.name),
            Definition::Interface(interface) => Some(interface.name),
            Definition::Union(union) => Some(union.name),
            Definition::Enum(enum_def) => Some(enum_def.name),
            Definition::Input(input) => Some(input.name),
            Definition::Schema(_) => None,
        }
    }

    /// Helper method to return the [`OperationDefinition`] if this is an operation.
    #[inline]
    pub fn operation(&self) -> Option<&'a OperationDefinition<'a>> {
        match *self {
            Definition::Operation(operation) => Some(operation),
            _ => None,
        }
    }

    /// Helper method to return the [`FragmentDefinition`] if this is a fragment.
    #[inline]
    pub fn fragment(&self) -> Option<&'a FragmentDefinition<'a>> {
        match *self {
            Definition::Fragment(fragment) => Some(fragment),
            _ => None,
        }
    }
}

/// AST root node for a GraphQL document of either dialect.
#[derive(Debug, PartialEq, Clone)]
pub struct Document<'a> {
    pub definitions: Vec<'a, Definition<'a>>,
    /// A hint on how large the source text was from which this document was parsed, used to size
    /// the output buffer when printing.
    pub size_hint: usize,
}

impl<'a, 'b> Document<'a> {
    /// Checks whether this document contains any definitions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Returns a map keyed by fragment name of all fragment definitions in the document.
    ///
    /// This is useful for manually resolving fragment spreads to their definitions.
    pub fn fragments(
        &'a self,
        ctx: &'a ASTContext,
    ) -> HashMap<&'a str, &'a FragmentDefinition<'a>, DefaultHashBuilder, &'a bumpalo::Bump> {
        let mut map = HashMap::new_in(&ctx.arena);
        for definition in self.definitions.iter() {
            if let Definition::Fragment(fragment) = definition {
                map.insert(fragment.name, *fragment);
            }
        }
        map
    }

    /// Finds an operation definition by name, or the single operation contained in the document
    /// when `None` is passed.
    pub fn operation(&'a self, by_name: Option<&'b str>) -> Result<&'a OperationDefinition<'a>> {
        if let Some(by_name) = by_name {
            return self
                .definitions
                .iter()
                .find_map(|definition| match definition.operation() {
                    Some(operation) if operation.name == Some(by_name) => Some(operation),
                    _ => None,
                })
                .ok_or_else(|| {
                    Error::new(
                        format!("document has no operation named {by_name}"),
                        ErrorType::Semantic,
                    )
                });
        }
        let mut found = None;
        for definition in self.definitions.iter() {
            if let Some(operation) = definition.operation() {
                if found.is_some() {
                    return Err(Error::new(
                        "document contains multiple operations; an operation name is required",
                        ErrorType::Semantic,
                    ));
                }
                found = Some(operation);
            }
        }
        found.ok_or_else(|| Error::new("document contains no operations", ErrorType::Semantic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ParseNode;

    #[test]
    fn operation_lookup() {
        let ctx = ASTContext::new();
        let ast = Document::parse(&ctx, "query First { a } mutation Second { b }").unwrap();
        assert_eq!(ast.operation(Some("First")).unwrap().name, Some("First"));
        assert_eq!(
            ast.operation(Some("Second")).unwrap().operation,
            OperationKind::Mutation
        );
        assert_eq!(
            ast.operation(Some("Missing")).unwrap_err().message(),
            "document has no operation named Missing"
        );
        assert_eq!(
            ast.operation(None).unwrap_err().message(),
            "document contains multiple operations; an operation name is required"
        );
    }

    #[test]
    fn operation_lookup_single_and_none() {
        let ctx = ASTContext::new();
        let ast = Document::parse(&ctx, "{ hello }").unwrap();
        assert_eq!(ast.operation(None).unwrap().name, None);

        let ast = Document::parse(&ctx, "fragment Foo on Query { hello }").unwrap();
        assert_eq!(
            ast.operation(None).unwrap_err().message(),
            "document contains no operations"
        );
    }

    #[test]
    fn fragment_map() {
        let ctx = ASTContext::new();
        let ast = Document::parse(
            &ctx,
            "fragment A on Droid { a } { x } fragment B on Human { b }",
        )
        .unwrap();
        let fragments = ast.fragments(&ctx);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments["A"].type_condition.name, "Droid");
        assert_eq!(fragments["B"].type_condition.name, "Human");
    }

    #[test]
    fn selection_accessors() {
        let ctx = ASTContext::new();
        let ast = Document::parse(&ctx, "{ alias: me ...Frag ... on Droid { id } }").unwrap();
        let operation = ast.operation(None).unwrap();
        let selections = &operation.selection_set.selections;
        let field = selections[0].field().unwrap();
        assert_eq!(field.alias_or_name(), "alias");
        assert_eq!(field.name, "me");
        assert_eq!(selections[1].fragment_spread().unwrap().name, "Frag");
        let inline = selections[2].inline_fragment().unwrap();
        assert_eq!(inline.type_condition.unwrap().name, "Droid");
        assert!(selections[0].fragment_spread().is_none());
    }

    #[test]
    fn type_helpers() {
        let ctx = ASTContext::new();
        let named = NamedType::new(&ctx, "Episode");
        let list = Type::list(&ctx, Type::Named(named));
        assert!(list.is_nullable());
        assert_eq!(list.innermost().name, "Episode");
    }
}
