use crate::ast::*;
use crate::error::Result;

/// A traversal control signal returned from `enter_` callbacks.
///
/// `Prune` suppresses the current node's children only; the matching `leave_` callback still
/// fires. Real failures are returned as errors instead and abort the traversal.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum VisitFlow {
    /// Continue into the node's children as usual.
    Next,
    /// Skip the node's children; the node is still left.
    Prune,
}

/// The result of an `enter_` callback: a control signal or an aborting error.
pub type VisitResult = Result<VisitFlow>;

/// Trait for a visitor with callbacks that are invoked while an AST is traversed.
///
/// While the AST is traversed in depth-first order, callbacks prefixed with `enter_` are called
/// from top to bottom while the traversal is recursing, and callbacks prefixed with `leave_` are
/// called from bottom to top while the traversal is returning. Around each traversed list
/// (definitions, selections, directives, object fields, input fields) a pair of list callbacks is
/// invoked, omitted entirely when the list is empty.
///
/// All callbacks have default no-op implementations, so a visitor only implements the callbacks
/// it is interested in. A visitor may define a custom context structure that is threaded through
/// the traversal; by default the context is an empty unit `()`.
#[allow(unused_variables)]
pub trait Visitor<'a, Context = ()>: Sized {
    /// Called when a [Document] is visited, before any of its definitions.
    fn enter_document(&mut self, ctx: &mut Context, document: &'a Document<'a>) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after a [Document] and all its definitions were visited.
    fn leave_document(&mut self, ctx: &mut Context, document: &'a Document<'a>) -> Result<()> {
        Ok(())
    }

    /// Called when a [Schema] node is visited.
    ///
    /// For a schema traversed as the root, its member types and its query follow as one
    /// definition stream. For a `schema { … }` block inside a document nothing follows, since
    /// the referenced definitions are visited as definitions of the document.
    fn enter_schema(&mut self, ctx: &mut Context, schema: &'a Schema<'a>) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after a [Schema] node was visited.
    fn leave_schema(&mut self, ctx: &mut Context, schema: &'a Schema<'a>) -> Result<()> {
        Ok(())
    }

    /// Called before a non-empty list of definitions is traversed.
    fn enter_definition_list(&mut self, ctx: &mut Context) -> Result<()> {
        Ok(())
    }
    /// Called after a non-empty list of definitions was traversed.
    fn leave_definition_list(&mut self, ctx: &mut Context) -> Result<()> {
        Ok(())
    }

    /// Called when a [Definition] is visited, before its concrete kind is dispatched. When only
    /// one kind is of interest, implement the callback for that kind instead.
    fn enter_definition(&mut self, ctx: &mut Context, definition: Definition<'a>) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after a [Definition] and its children were visited.
    fn leave_definition(&mut self, ctx: &mut Context, definition: Definition<'a>) -> Result<()> {
        Ok(())
    }

    /// Called when an [`OperationDefinition`] is visited; its directives and selection set
    /// follow.
    fn enter_operation(
        &mut self,
        ctx: &mut Context,
        operation: &'a OperationDefinition<'a>,
    ) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after an [`OperationDefinition`] and its children were visited.
    fn leave_operation(
        &mut self,
        ctx: &mut Context,
        operation: &'a OperationDefinition<'a>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a [`FragmentDefinition`] is visited; its directives and selection set follow.
    fn enter_fragment(
        &mut self,
        ctx: &mut Context,
        fragment: &'a FragmentDefinition<'a>,
    ) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after a [`FragmentDefinition`] and its children were visited.
    fn leave_fragment(
        &mut self,
        ctx: &mut Context,
        fragment: &'a FragmentDefinition<'a>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called before a non-empty list of selections is traversed.
    fn enter_selection_list(&mut self, ctx: &mut Context) -> Result<()> {
        Ok(())
    }
    /// Called after a non-empty list of selections was traversed.
    fn leave_selection_list(&mut self, ctx: &mut Context) -> Result<()> {
        Ok(())
    }

    /// Called when a [Selection] is visited, before its concrete kind is dispatched.
    fn enter_selection(&mut self, ctx: &mut Context, selection: &'a Selection<'a>) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after a [Selection] and its children were visited.
    fn leave_selection(&mut self, ctx: &mut Context, selection: &'a Selection<'a>) -> Result<()> {
        Ok(())
    }

    /// Called when a [`SelectionField`] is visited; its directives and nested selection set
    /// follow. Arguments are not traversed.
    fn enter_selection_field(
        &mut self,
        ctx: &mut Context,
        field: &'a SelectionField<'a>,
    ) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after a [`SelectionField`] and its children were visited.
    fn leave_selection_field(
        &mut self,
        ctx: &mut Context,
        field: &'a SelectionField<'a>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a [`FragmentSpread`] is visited; its directives follow.
    fn enter_fragment_spread(
        &mut self,
        ctx: &mut Context,
        spread: &'a FragmentSpread<'a>,
    ) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after a [`FragmentSpread`] and its directives were visited.
    fn leave_fragment_spread(
        &mut self,
        ctx: &mut Context,
        spread: &'a FragmentSpread<'a>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an [`InlineFragment`] is visited; its directives and selection set follow.
    fn enter_inline_fragment(
        &mut self,
        ctx: &mut Context,
        inline: &'a InlineFragment<'a>,
    ) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after an [`InlineFragment`] and its children were visited.
    fn leave_inline_fragment(
        &mut self,
        ctx: &mut Context,
        inline: &'a InlineFragment<'a>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called before a non-empty list of directives is traversed.
    fn enter_directive_list(&mut self, ctx: &mut Context) -> Result<()> {
        Ok(())
    }
    /// Called after a non-empty list of directives was traversed.
    fn leave_directive_list(&mut self, ctx: &mut Context) -> Result<()> {
        Ok(())
    }

    /// Called when a [Directive] is visited. Its arguments are not traversed.
    fn enter_directive(&mut self, ctx: &mut Context, directive: &'a Directive<'a>) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after a [Directive] was visited.
    fn leave_directive(&mut self, ctx: &mut Context, directive: &'a Directive<'a>) -> Result<()> {
        Ok(())
    }

    /// Called when an [`ObjectDefinition`] is visited; its field list follows.
    fn enter_object_definition(
        &mut self,
        ctx: &mut Context,
        object: &'a ObjectDefinition<'a>,
    ) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after an [`ObjectDefinition`] and its fields were visited.
    fn leave_object_definition(
        &mut self,
        ctx: &mut Context,
        object: &'a ObjectDefinition<'a>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called before a non-empty list of object field definitions is traversed.
    fn enter_object_field_list(&mut self, ctx: &mut Context) -> Result<()> {
        Ok(())
    }
    /// Called after a non-empty list of object field definitions was traversed.
    fn leave_object_field_list(&mut self, ctx: &mut Context) -> Result<()> {
        Ok(())
    }

    /// Called when an [`ObjectFieldDefinition`] is visited. Argument definitions are not
    /// traversed.
    fn enter_object_field_definition(
        &mut self,
        ctx: &mut Context,
        field: &'a ObjectFieldDefinition<'a>,
    ) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after an [`ObjectFieldDefinition`] was visited.
    fn leave_object_field_definition(
        &mut self,
        ctx: &mut Context,
        field: &'a ObjectFieldDefinition<'a>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an [`InterfaceDefinition`] is visited; its fields follow without list
    /// callbacks.
    fn enter_interface_definition(
        &mut self,
        ctx: &mut Context,
        interface: &'a InterfaceDefinition<'a>,
    ) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after an [`InterfaceDefinition`] and its fields were visited.
    fn leave_interface_definition(
        &mut self,
        ctx: &mut Context,
        interface: &'a InterfaceDefinition<'a>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an [`InterfaceFieldDefinition`] is visited.
    fn enter_interface_field_definition(
        &mut self,
        ctx: &mut Context,
        field: &'a InterfaceFieldDefinition<'a>,
    ) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after an [`InterfaceFieldDefinition`] was visited.
    fn leave_interface_field_definition(
        &mut self,
        ctx: &mut Context,
        field: &'a InterfaceFieldDefinition<'a>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an [`EnumDefinition`] is visited. Elements are not traversed.
    fn enter_enum_definition(
        &mut self,
        ctx: &mut Context,
        enum_def: &'a EnumDefinition<'a>,
    ) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after an [`EnumDefinition`] was visited.
    fn leave_enum_definition(
        &mut self,
        ctx: &mut Context,
        enum_def: &'a EnumDefinition<'a>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a [`UnionDefinition`] is visited. Member types are not traversed.
    fn enter_union_definition(
        &mut self,
        ctx: &mut Context,
        union: &'a UnionDefinition<'a>,
    ) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after a [`UnionDefinition`] was visited.
    fn leave_union_definition(
        &mut self,
        ctx: &mut Context,
        union: &'a UnionDefinition<'a>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an [`InputDefinition`] is visited; its field list follows.
    fn enter_input_definition(
        &mut self,
        ctx: &mut Context,
        input: &'a InputDefinition<'a>,
    ) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after an [`InputDefinition`] and its fields were visited.
    fn leave_input_definition(
        &mut self,
        ctx: &mut Context,
        input: &'a InputDefinition<'a>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called before a non-empty list of input field definitions is traversed.
    fn enter_input_field_list(&mut self, ctx: &mut Context) -> Result<()> {
        Ok(())
    }
    /// Called after a non-empty list of input field definitions was traversed.
    fn leave_input_field_list(&mut self, ctx: &mut Context) -> Result<()> {
        Ok(())
    }

    /// Called when an [`InputFieldDefinition`] is visited.
    fn enter_input_field_definition(
        &mut self,
        ctx: &mut Context,
        field: &'a InputFieldDefinition<'a>,
    ) -> VisitResult {
        Ok(VisitFlow::Next)
    }
    /// Called after an [`InputFieldDefinition`] was visited.
    fn leave_input_field_definition(
        &mut self,
        ctx: &mut Context,
        field: &'a InputFieldDefinition<'a>,
    ) -> Result<()> {
        Ok(())
    }
}

/// Trait for AST roots that can be traversed with a [Visitor] in depth-first order.
pub trait VisitNode<'a> {
    /// Visit this tree recursively with the given visitor and context.
    fn visit<C, V: Visitor<'a, C>>(&'a self, ctx: &mut C, visitor: &mut V) -> Result<()>;
}

impl<'a> VisitNode<'a> for Document<'a> {
    fn visit<C, V: Visitor<'a, C>>(&'a self, ctx: &mut C, visitor: &mut V) -> Result<()> {
        walk_document(self, ctx, visitor)
    }
}

impl<'a> VisitNode<'a> for Schema<'a> {
    fn visit<C, V: Visitor<'a, C>>(&'a self, ctx: &mut C, visitor: &mut V) -> Result<()> {
        walk_schema_root(self, ctx, visitor)
    }
}

#[inline]
fn labeled<T>(result: Result<T>, label: &str) -> Result<T> {
    result.map_err(|error| error.with_label(label))
}

fn walk_document<'a, C, V: Visitor<'a, C>>(
    document: &'a Document<'a>,
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if let VisitFlow::Next = labeled(visitor.enter_document(ctx, document), "document")? {
        walk_definition_list(&document.definitions, ctx, visitor)?;
    }
    labeled(visitor.leave_document(ctx, document), "document")
}

/// A schema traversed as the root visits its member types followed by its query as a single
/// definition stream.
fn walk_schema_root<'a, C, V: Visitor<'a, C>>(
    schema: &'a Schema<'a>,
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if let VisitFlow::Next = labeled(visitor.enter_schema(ctx, schema), "schema")? {
        labeled(visitor.enter_definition_list(ctx), "definition list")?;
        for member in schema.types.iter() {
            walk_definition(*member, ctx, visitor)?;
        }
        walk_definition(Definition::Object(schema.query), ctx, visitor)?;
        labeled(visitor.leave_definition_list(ctx), "definition list")?;
    }
    labeled(visitor.leave_schema(ctx, schema), "schema")
}

fn walk_definition_list<'a, C, V: Visitor<'a, C>>(
    definitions: &'a [Definition<'a>],
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if definitions.is_empty() {
        return Ok(());
    }
    labeled(visitor.enter_definition_list(ctx), "definition list")?;
    for definition in definitions {
        walk_definition(*definition, ctx, visitor)?;
    }
    labeled(visitor.leave_definition_list(ctx), "definition list")
}

fn walk_definition<'a, C, V: Visitor<'a, C>>(
    definition: Definition<'a>,
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if let VisitFlow::Next = labeled(visitor.enter_definition(ctx, definition), "definition")? {
        match definition {
            Definition::Operation(operation) => walk_operation(operation, ctx, visitor)?,
            Definition::Fragment(fragment) => walk_fragment(fragment, ctx, visitor)?,
            Definition::Object(object) => walk_object_definition(object, ctx, visitor)?,
            Definition::Interface(interface) => {
                walk_interface_definition(interface, ctx, visitor)?
            }
            Definition::Union(union) => {
                labeled(visitor.enter_union_definition(ctx, union), "union definition")?;
                labeled(visitor.leave_union_definition(ctx, union), "union definition")?;
            }
            Definition::Enum(enum_def) => {
                labeled(visitor.enter_enum_definition(ctx, enum_def), "enum definition")?;
                labeled(visitor.leave_enum_definition(ctx, enum_def), "enum definition")?;
            }
            Definition::Input(input) => walk_input_definition(input, ctx, visitor)?,
            Definition::Schema(schema) => {
                // inside a document the referenced types are definitions of their own
                labeled(visitor.enter_schema(ctx, schema), "schema")?;
                labeled(visitor.leave_schema(ctx, schema), "schema")?;
            }
        }
    }
    labeled(visitor.leave_definition(ctx, definition), "definition")
}

fn walk_operation<'a, C, V: Visitor<'a, C>>(
    operation: &'a OperationDefinition<'a>,
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if let VisitFlow::Next = labeled(
        visitor.enter_operation(ctx, operation),
        "operation definition",
    )? {
        walk_directive_list(&operation.directives, ctx, visitor)?;
        walk_selection_list(&operation.selection_set, ctx, visitor)?;
    }
    labeled(
        visitor.leave_operation(ctx, operation),
        "operation definition",
    )
}

fn walk_fragment<'a, C, V: Visitor<'a, C>>(
    fragment: &'a FragmentDefinition<'a>,
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if let VisitFlow::Next = labeled(
        visitor.enter_fragment(ctx, fragment),
        "fragment definition",
    )? {
        walk_directive_list(&fragment.directives, ctx, visitor)?;
        walk_selection_list(&fragment.selection_set, ctx, visitor)?;
    }
    labeled(visitor.leave_fragment(ctx, fragment), "fragment definition")
}

fn walk_selection_list<'a, C, V: Visitor<'a, C>>(
    selection_set: &'a SelectionSet<'a>,
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if selection_set.is_empty() {
        return Ok(());
    }
    labeled(visitor.enter_selection_list(ctx), "selection list")?;
    for selection in selection_set.selections.iter() {
        walk_selection(selection, ctx, visitor)?;
    }
    labeled(visitor.leave_selection_list(ctx), "selection list")
}

fn walk_selection<'a, C, V: Visitor<'a, C>>(
    selection: &'a Selection<'a>,
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if let VisitFlow::Next = labeled(visitor.enter_selection(ctx, selection), "selection")? {
        match selection {
            Selection::Field(field) => walk_selection_field(field, ctx, visitor)?,
            Selection::FragmentSpread(spread) => walk_fragment_spread(spread, ctx, visitor)?,
            Selection::InlineFragment(inline) => walk_inline_fragment(inline, ctx, visitor)?,
        }
    }
    labeled(visitor.leave_selection(ctx, selection), "selection")
}

fn walk_selection_field<'a, C, V: Visitor<'a, C>>(
    field: &'a SelectionField<'a>,
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if let VisitFlow::Next = labeled(
        visitor.enter_selection_field(ctx, field),
        "selection field",
    )? {
        walk_directive_list(&field.directives, ctx, visitor)?;
        walk_selection_list(&field.selection_set, ctx, visitor)?;
    }
    labeled(visitor.leave_selection_field(ctx, field), "selection field")
}

fn walk_fragment_spread<'a, C, V: Visitor<'a, C>>(
    spread: &'a FragmentSpread<'a>,
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if let VisitFlow::Next = labeled(
        visitor.enter_fragment_spread(ctx, spread),
        "fragment spread",
    )? {
        walk_directive_list(&spread.directives, ctx, visitor)?;
    }
    labeled(visitor.leave_fragment_spread(ctx, spread), "fragment spread")
}

fn walk_inline_fragment<'a, C, V: Visitor<'a, C>>(
    inline: &'a InlineFragment<'a>,
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if let VisitFlow::Next = labeled(
        visitor.enter_inline_fragment(ctx, inline),
        "inline fragment",
    )? {
        walk_directive_list(&inline.directives, ctx, visitor)?;
        walk_selection_list(&inline.selection_set, ctx, visitor)?;
    }
    labeled(visitor.leave_inline_fragment(ctx, inline), "inline fragment")
}

fn walk_directive_list<'a, C, V: Visitor<'a, C>>(
    directives: &'a Directives<'a>,
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if directives.is_empty() {
        return Ok(());
    }
    labeled(visitor.enter_directive_list(ctx), "directive list")?;
    for directive in directives.children.iter() {
        labeled(visitor.enter_directive(ctx, directive), "directive")?;
        labeled(visitor.leave_directive(ctx, directive), "directive")?;
    }
    labeled(visitor.leave_directive_list(ctx), "directive list")
}

fn walk_object_definition<'a, C, V: Visitor<'a, C>>(
    object: &'a ObjectDefinition<'a>,
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if let VisitFlow::Next = labeled(
        visitor.enter_object_definition(ctx, object),
        "object definition",
    )? {
        if !object.fields.is_empty() {
            labeled(visitor.enter_object_field_list(ctx), "object field list")?;
            for field in object.fields.iter() {
                labeled(
                    visitor.enter_object_field_definition(ctx, field),
                    "object field definition",
                )?;
                labeled(
                    visitor.leave_object_field_definition(ctx, field),
                    "object field definition",
                )?;
            }
            labeled(visitor.leave_object_field_list(ctx), "object field list")?;
        }
    }
    labeled(
        visitor.leave_object_definition(ctx, object),
        "object definition",
    )
}

fn walk_interface_definition<'a, C, V: Visitor<'a, C>>(
    interface: &'a InterfaceDefinition<'a>,
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if let VisitFlow::Next = labeled(
        visitor.enter_interface_definition(ctx, interface),
        "interface definition",
    )? {
        for field in interface.fields.iter() {
            labeled(
                visitor.enter_interface_field_definition(ctx, field),
                "interface field definition",
            )?;
            labeled(
                visitor.leave_interface_field_definition(ctx, field),
                "interface field definition",
            )?;
        }
    }
    labeled(
        visitor.leave_interface_definition(ctx, interface),
        "interface definition",
    )
}

fn walk_input_definition<'a, C, V: Visitor<'a, C>>(
    input: &'a InputDefinition<'a>,
    ctx: &mut C,
    visitor: &mut V,
) -> Result<()> {
    if let VisitFlow::Next = labeled(
        visitor.enter_input_definition(ctx, input),
        "input definition",
    )? {
        if !input.fields.is_empty() {
            labeled(visitor.enter_input_field_list(ctx), "input field list")?;
            for field in input.fields.iter() {
                labeled(
                    visitor.enter_input_field_definition(ctx, field),
                    "input field definition",
                )?;
                labeled(
                    visitor.leave_input_field_definition(ctx, field),
                    "input field definition",
                )?;
            }
            labeled(visitor.leave_input_field_list(ctx), "input field list")?;
        }
    }
    labeled(visitor.leave_input_definition(ctx, input), "input definition")
}
