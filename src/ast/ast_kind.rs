use std::fmt;

/// An enum of identifiers for grammar productions.
///
/// When parsing, this enum names the production that encountered an error; its [`fmt::Display`]
/// form is the context label prefixed to error messages.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ASTKind {
    /// See: [crate::ast::Document]
    Document,
    /// See: [crate::ast::OperationDefinition]
    OperationDefinition,
    /// See: [crate::ast::FragmentDefinition]
    FragmentDefinition,
    /// A fragment name position, which must not hold the keyword `on`.
    FragmentName,
    /// An `on Type` condition on a fragment.
    TypeCondition,
    /// See: [crate::ast::VariableDefinitions]
    VariableDefinitions,
    /// See: [crate::ast::VariableDefinition]
    VariableDefinition,
    /// See: [crate::ast::Type]
    Type,
    /// See: `List` on [crate::ast::Type]
    ListType,
    /// See: [crate::ast::Value]
    Value,
    /// See: [crate::ast::Variable]
    Variable,
    /// See: [crate::ast::ObjectValue]
    ObjectValue,
    /// See: [crate::ast::ObjectField]
    ObjectField,
    /// See: [crate::ast::Arguments]
    Arguments,
    /// See: [crate::ast::Directive]
    Directive,
    /// See: [crate::ast::SelectionSet]
    SelectionSet,
    /// See: [crate::ast::Selection]
    Selection,
    /// See: [crate::ast::SelectionField]
    SelectionField,
    /// See: [crate::ast::FragmentSpread]
    FragmentSpread,
    /// See: [crate::ast::InlineFragment]
    InlineFragment,
    /// See: [crate::ast::ObjectDefinition]
    ObjectDefinition,
    /// See: [crate::ast::ObjectFieldDefinition]
    ObjectFieldDefinition,
    /// See: [crate::ast::ObjectFieldArgumentDefinition]
    ObjectFieldArguments,
    /// See: [crate::ast::InterfaceDefinition]
    InterfaceDefinition,
    /// See: [crate::ast::EnumDefinition]
    EnumDefinition,
    /// See: [crate::ast::UnionDefinition]
    UnionDefinition,
    /// See: [crate::ast::InputDefinition]
    InputDefinition,
    /// See: [crate::ast::Schema]
    Schema,
}

impl fmt::Display for ASTKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ASTKind::Document => "document",
            ASTKind::OperationDefinition => "operation definition",
            ASTKind::FragmentDefinition => "fragment definition",
            ASTKind::FragmentName => "fragment name",
            ASTKind::TypeCondition => "type condition",
            ASTKind::VariableDefinitions => "variable definitions",
            ASTKind::VariableDefinition => "variable definition",
            ASTKind::Type => "type",
            ASTKind::ListType => "list type",
            ASTKind::Value => "value",
            ASTKind::Variable => "variable",
            ASTKind::ObjectValue => "object value",
            ASTKind::ObjectField => "object field",
            ASTKind::Arguments => "arguments",
            ASTKind::Directive => "directive",
            ASTKind::SelectionSet => "selection set",
            ASTKind::Selection => "selection",
            ASTKind::SelectionField => "selection field",
            ASTKind::FragmentSpread => "fragment spread",
            ASTKind::InlineFragment => "inline fragment",
            ASTKind::ObjectDefinition => "object definition",
            ASTKind::ObjectFieldDefinition => "object field definition",
            ASTKind::ObjectFieldArguments => "object field arguments",
            ASTKind::InterfaceDefinition => "interface definition",
            ASTKind::EnumDefinition => "enum definition",
            ASTKind::UnionDefinition => "union definition",
            ASTKind::InputDefinition => "input definition",
            ASTKind::Schema => "schema",
        };
        f.write_str(label)
    }
}
