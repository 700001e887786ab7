use super::ast::*;
use bumpalo::collections::Vec;

/// Arena-aware counterpart to `Default` for nodes whose list containers live in the arena.
pub trait DefaultIn<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self;
}

impl<'a> DefaultIn<'a> for SelectionSet<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        SelectionSet {
            selections: Vec::new_in(arena),
        }
    }
}

impl<'a> DefaultIn<'a> for Arguments<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Arguments {
            children: Vec::new_in(arena),
        }
    }
}

impl<'a> DefaultIn<'a> for Directives<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Directives {
            children: Vec::new_in(arena),
        }
    }
}

impl<'a> DefaultIn<'a> for VariableDefinitions<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        VariableDefinitions {
            children: Vec::new_in(arena),
        }
    }
}

impl<'a> DefaultIn<'a> for ObjectValue<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        ObjectValue {
            children: Vec::new_in(arena),
        }
    }
}

impl<'a> DefaultIn<'a> for Document<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Document {
            definitions: Vec::new_in(arena),
            size_hint: 0,
        }
    }
}

impl<'a> From<Variable<'a>> for Value<'a> {
    #[inline]
    fn from(x: Variable<'a>) -> Self {
        Value::Variable(x)
    }
}

impl From<IntValue> for Value<'_> {
    #[inline]
    fn from(x: IntValue) -> Self {
        Value::Int(x)
    }
}

impl From<FloatValue> for Value<'_> {
    #[inline]
    fn from(x: FloatValue) -> Self {
        Value::Float(x)
    }
}

impl<'a> From<StringValue<'a>> for Value<'a> {
    #[inline]
    fn from(x: StringValue<'a>) -> Self {
        Value::String(x)
    }
}

impl From<BooleanValue> for Value<'_> {
    #[inline]
    fn from(x: BooleanValue) -> Self {
        Value::Boolean(x)
    }
}

impl<'a> From<EnumValue<'a>> for Value<'a> {
    #[inline]
    fn from(x: EnumValue<'a>) -> Self {
        Value::Enum(x)
    }
}

impl<'a> From<ObjectValue<'a>> for Value<'a> {
    #[inline]
    fn from(x: ObjectValue<'a>) -> Self {
        Value::Object(x)
    }
}

impl<'a> From<SelectionField<'a>> for Selection<'a> {
    #[inline]
    fn from(x: SelectionField<'a>) -> Self {
        Selection::Field(x)
    }
}

impl<'a> From<FragmentSpread<'a>> for Selection<'a> {
    #[inline]
    fn from(x: FragmentSpread<'a>) -> Self {
        Selection::FragmentSpread(x)
    }
}

impl<'a> From<InlineFragment<'a>> for Selection<'a> {
    #[inline]
    fn from(x: InlineFragment<'a>) -> Self {
        Selection::InlineFragment(x)
    }
}

impl<'a> From<&'a OperationDefinition<'a>> for Definition<'a> {
    #[inline]
    fn from(x: &'a OperationDefinition<'a>) -> Self {
        Definition::Operation(x)
    }
}

impl<'a> From<&'a FragmentDefinition<'a>> for Definition<'a> {
    #[inline]
    fn from(x: &'a FragmentDefinition<'a>) -> Self {
        Definition::Fragment(x)
    }
}

impl<'a> From<&'a ObjectDefinition<'a>> for Definition<'a> {
    #[inline]
    fn from(x: &'a ObjectDefinition<'a>) -> Self {
        Definition::Object(x)
    }
}

impl<'a> From<&'a InterfaceDefinition<'a>> for Definition<'a> {
    #[inline]
    fn from(x: &'a InterfaceDefinition<'a>) -> Self {
        Definition::Interface(x)
    }
}

impl<'a> From<&'a UnionDefinition<'a>> for Definition<'a> {
    #[inline]
    fn from(x: &'a UnionDefinition<'a>) -> Self {
        Definition::Union(x)
    }
}

impl<'a> From<&'a EnumDefinition<'a>> for Definition<'a> {
    #[inline]
    fn from(x: &'a EnumDefinition<'a>) -> Self {
        Definition::Enum(x)
    }
}

impl<'a> From<&'a InputDefinition<'a>> for Definition<'a> {
    #[inline]
    fn from(x: &'a InputDefinition<'a>) -> Self {
        Definition::Input(x)
    }
}

impl<'a> From<&'a Schema<'a>> for Definition<'a> {
    #[inline]
    fn from(x: &'a Schema<'a>) -> Self {
        Definition::Schema(x)
    }
}
