use super::ast::*;
use crate::error::{Error, ErrorType, Result};
use crate::visit::{VisitFlow, VisitNode, VisitResult, Visitor};
use std::io;

/// Emit canonical GraphQL text for a [Document] or [Schema] to a byte sink.
///
/// The printer is a visitor client: it walks the tree and accumulates text in a buffer that is
/// flushed to the sink once per top-level definition, so downstream sinks observe
/// definition-granular writes. Anonymous operations are canonicalised to an explicit `query`
/// prefix, empty selection sets elide their brace pair, and a [Schema] root prints its member
/// types, its query type, and a closing `schema { … }` block.
pub fn format<'a, N: VisitNode<'a>, W: io::Write>(node: &'a N, sink: &mut W) -> Result<()> {
    let mut printer = Printer::new(sink);
    node.visit(&mut (), &mut printer)
}

/// Trait for printing a traversal root to source text as a String allocated on the heap.
///
/// This is a convenience over [format] for when the output is not streamed anywhere.
pub trait PrintNode<'a>: VisitNode<'a> {
    /// Print this node to source text, returning an empty String when printing fails.
    fn print(&'a self) -> String
    where
        Self: Sized,
    {
        let mut out = std::vec::Vec::new();
        match format(self, &mut out) {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => String::new(),
        }
    }
}

impl<'a, T: VisitNode<'a>> PrintNode<'a> for T {}

/// The visitor client behind [format].
///
/// Keeps an indent buffer of two spaces per level, a counter stack that inserts separators only
/// between list elements, and a flag that pads the next opening brace with a space.
struct Printer<'s, W: io::Write> {
    sink: &'s mut W,
    buf: String,
    indent: String,
    counters: std::vec::Vec<usize>,
    pad_next: bool,
    printed_any: bool,
}

impl<'s, W: io::Write> Printer<'s, W> {
    fn new(sink: &'s mut W) -> Self {
        Printer {
            sink,
            buf: String::with_capacity(4096),
            indent: String::new(),
            counters: std::vec::Vec::new(),
            pad_next: false,
            printed_any: false,
        }
    }

    /// Hand the accumulated text to the sink. Called once per top-level definition.
    fn flush(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.sink.write_all(self.buf.as_bytes())?;
        self.buf.clear();
        self.printed_any = true;
        Ok(())
    }

    fn push_indent(&mut self) {
        self.indent.push_str("  ");
    }

    fn pop_indent(&mut self) {
        let len = self.indent.len();
        self.indent.truncate(len.saturating_sub(2));
    }

    fn newline_indent(&mut self) {
        self.buf.push('\n');
        self.buf.push_str(&self.indent);
    }

    /// Counts an element of the innermost list and returns whether it had predecessors.
    fn count_element(&mut self) -> bool {
        match self.counters.last_mut() {
            Some(count) => {
                *count += 1;
                *count > 1
            }
            None => false,
        }
    }

    fn write_type(&mut self, of_type: Type<'_>) {
        match of_type {
            Type::Named(named) => {
                self.buf.push_str(named.name);
                if !named.nullable {
                    self.buf.push('!');
                }
            }
            Type::List(list) => {
                self.buf.push('[');
                self.write_type(list.of_type);
                self.buf.push(']');
                if !list.nullable {
                    self.buf.push('!');
                }
            }
        }
    }

    /// Floats keep their canonical Display form, forced back into float syntax when it would
    /// otherwise re-lex as an integer. Non-finite values have no source form and are rejected.
    fn write_float(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::new(
                format!("float {value} is not finite"),
                ErrorType::Semantic,
            ));
        }
        let text = value.to_string();
        let integral = text.bytes().all(|b| b.is_ascii_digit() || b == b'-');
        self.buf.push_str(&text);
        if integral {
            self.buf.push_str(".0");
        }
        Ok(())
    }

    fn write_value(&mut self, value: &Value<'_>) -> Result<()> {
        match value {
            Value::Variable(variable) => {
                self.buf.push('$');
                self.buf.push_str(variable.name);
            }
            Value::Int(int) => {
                self.buf.push_str(&int.value.to_string());
            }
            Value::Float(float) => self.write_float(float.value)?,
            Value::String(string) => {
                self.buf.push('"');
                self.buf.push_str(string.value);
                self.buf.push('"');
            }
            Value::Boolean(boolean) => {
                self.buf.push_str(if boolean.value { "true" } else { "false" });
            }
            Value::Enum(enum_value) => self.buf.push_str(enum_value.value),
            Value::Null => self.buf.push_str("null"),
            Value::Object(object) => {
                if object.is_empty() {
                    self.buf.push_str("{}");
                    return Ok(());
                }
                self.buf.push('{');
                self.push_indent();
                for field in object.children.iter() {
                    self.newline_indent();
                    self.buf.push_str(field.name);
                    self.buf.push_str(": ");
                    self.write_value(&field.value)?;
                }
                self.pop_indent();
                self.newline_indent();
                self.buf.push('}');
            }
        }
        Ok(())
    }

    fn write_arguments(&mut self, arguments: &Arguments<'_>) -> Result<()> {
        if arguments.is_empty() {
            return Ok(());
        }
        self.buf.push('(');
        for (index, argument) in arguments.children.iter().enumerate() {
            if index > 0 {
                self.buf.push_str(", ");
            }
            self.buf.push_str(argument.name);
            self.buf.push_str(": ");
            self.write_value(&argument.value)?;
        }
        self.buf.push(')');
        Ok(())
    }

    fn write_variable_definitions(&mut self, definitions: &VariableDefinitions<'_>) -> Result<()> {
        if definitions.is_empty() {
            return Ok(());
        }
        self.buf.push('(');
        for (index, definition) in definitions.children.iter().enumerate() {
            if index > 0 {
                self.buf.push_str(", ");
            }
            self.buf.push('$');
            self.buf.push_str(definition.variable.name);
            self.buf.push_str(": ");
            self.write_type(definition.of_type);
            if let Some(default_value) = &definition.default_value {
                self.buf.push_str(" = ");
                self.write_value(default_value)?;
            }
        }
        self.buf.push(')');
        Ok(())
    }

    fn write_argument_definitions(
        &mut self,
        arguments: &[ObjectFieldArgumentDefinition<'_>],
    ) -> Result<()> {
        if arguments.is_empty() {
            return Ok(());
        }
        self.buf.push('(');
        for (index, argument) in arguments.iter().enumerate() {
            if index > 0 {
                self.buf.push_str(", ");
            }
            self.buf.push_str(argument.name);
            self.buf.push_str(": ");
            self.write_type(argument.of_type);
            if let Some(default_value) = &argument.default_value {
                self.buf.push_str(" = ");
                self.write_value(default_value)?;
            }
        }
        self.buf.push(')');
        Ok(())
    }
}

impl<'a, 's, W: io::Write> Visitor<'a, ()> for Printer<'s, W> {
    fn leave_document(&mut self, _: &mut (), _document: &'a Document<'a>) -> Result<()> {
        self.flush()
    }

    fn enter_definition_list(&mut self, _: &mut ()) -> Result<()> {
        self.counters.push(0);
        Ok(())
    }

    fn leave_definition_list(&mut self, _: &mut ()) -> Result<()> {
        self.counters.pop();
        Ok(())
    }

    fn enter_definition(&mut self, _: &mut (), _definition: Definition<'a>) -> VisitResult {
        if self.count_element() {
            self.buf.push_str("\n\n");
        }
        self.pad_next = false;
        Ok(VisitFlow::Next)
    }

    fn leave_definition(&mut self, _: &mut (), _definition: Definition<'a>) -> Result<()> {
        self.flush()
    }

    fn enter_operation(
        &mut self,
        _: &mut (),
        operation: &'a OperationDefinition<'a>,
    ) -> VisitResult {
        // anonymous operations canonicalise to an explicit keyword
        self.buf.push_str(operation.operation.as_str());
        if let Some(name) = operation.name {
            self.buf.push(' ');
            self.buf.push_str(name);
        }
        self.write_variable_definitions(&operation.variable_definitions)?;
        self.pad_next = true;
        Ok(VisitFlow::Next)
    }

    fn enter_fragment(
        &mut self,
        _: &mut (),
        fragment: &'a FragmentDefinition<'a>,
    ) -> VisitResult {
        self.buf.push_str("fragment ");
        self.buf.push_str(fragment.name);
        self.buf.push_str(" on ");
        self.buf.push_str(fragment.type_condition.name);
        self.pad_next = true;
        Ok(VisitFlow::Next)
    }

    fn enter_selection_list(&mut self, _: &mut ()) -> Result<()> {
        if self.pad_next {
            self.buf.push(' ');
            self.pad_next = false;
        }
        self.buf.push('{');
        self.push_indent();
        Ok(())
    }

    fn leave_selection_list(&mut self, _: &mut ()) -> Result<()> {
        self.pop_indent();
        self.newline_indent();
        self.buf.push('}');
        Ok(())
    }

    fn enter_selection(&mut self, _: &mut (), _selection: &'a Selection<'a>) -> VisitResult {
        self.newline_indent();
        Ok(VisitFlow::Next)
    }

    fn enter_selection_field(
        &mut self,
        _: &mut (),
        field: &'a SelectionField<'a>,
    ) -> VisitResult {
        if let Some(alias) = field.alias {
            self.buf.push_str(alias);
            self.buf.push_str(": ");
        }
        self.buf.push_str(field.name);
        self.write_arguments(&field.arguments)?;
        self.pad_next = true;
        Ok(VisitFlow::Next)
    }

    fn enter_fragment_spread(
        &mut self,
        _: &mut (),
        spread: &'a FragmentSpread<'a>,
    ) -> VisitResult {
        self.buf.push_str("...");
        self.buf.push_str(spread.name);
        Ok(VisitFlow::Next)
    }

    fn enter_inline_fragment(
        &mut self,
        _: &mut (),
        inline: &'a InlineFragment<'a>,
    ) -> VisitResult {
        self.buf.push_str("...");
        if let Some(type_condition) = inline.type_condition {
            self.buf.push_str(" on ");
            self.buf.push_str(type_condition.name);
        }
        self.pad_next = true;
        Ok(VisitFlow::Next)
    }

    fn enter_directive_list(&mut self, _: &mut ()) -> Result<()> {
        self.buf.push(' ');
        self.counters.push(0);
        Ok(())
    }

    fn leave_directive_list(&mut self, _: &mut ()) -> Result<()> {
        self.counters.pop();
        Ok(())
    }

    fn enter_directive(&mut self, _: &mut (), directive: &'a Directive<'a>) -> VisitResult {
        if self.count_element() {
            self.buf.push(' ');
        }
        self.buf.push('@');
        self.buf.push_str(directive.name);
        self.write_arguments(&directive.arguments)?;
        Ok(VisitFlow::Next)
    }

    fn enter_object_definition(
        &mut self,
        _: &mut (),
        object: &'a ObjectDefinition<'a>,
    ) -> VisitResult {
        self.buf.push_str("type ");
        self.buf.push_str(object.name);
        if let Some(implements) = object.implements {
            self.buf.push_str(" implements ");
            self.buf.push_str(implements.name);
        }
        self.buf.push_str(" {");
        self.push_indent();
        Ok(VisitFlow::Next)
    }

    fn leave_object_definition(
        &mut self,
        _: &mut (),
        _object: &'a ObjectDefinition<'a>,
    ) -> Result<()> {
        self.pop_indent();
        self.newline_indent();
        self.buf.push('}');
        Ok(())
    }

    fn enter_object_field_definition(
        &mut self,
        _: &mut (),
        field: &'a ObjectFieldDefinition<'a>,
    ) -> VisitResult {
        self.newline_indent();
        self.buf.push_str(field.name);
        self.write_argument_definitions(&field.arguments)?;
        self.buf.push_str(": ");
        self.write_type(field.of_type);
        Ok(VisitFlow::Next)
    }

    fn enter_interface_definition(
        &mut self,
        _: &mut (),
        interface: &'a InterfaceDefinition<'a>,
    ) -> VisitResult {
        self.buf.push_str("interface ");
        self.buf.push_str(interface.name);
        self.buf.push_str(" {");
        self.push_indent();
        Ok(VisitFlow::Next)
    }

    fn leave_interface_definition(
        &mut self,
        _: &mut (),
        _interface: &'a InterfaceDefinition<'a>,
    ) -> Result<()> {
        self.pop_indent();
        self.newline_indent();
        self.buf.push('}');
        Ok(())
    }

    fn enter_interface_field_definition(
        &mut self,
        _: &mut (),
        field: &'a InterfaceFieldDefinition<'a>,
    ) -> VisitResult {
        self.newline_indent();
        self.buf.push_str(field.name);
        self.buf.push_str(": ");
        self.write_type(field.of_type);
        Ok(VisitFlow::Next)
    }

    fn enter_enum_definition(
        &mut self,
        _: &mut (),
        enum_def: &'a EnumDefinition<'a>,
    ) -> VisitResult {
        if enum_def.elements.is_empty() {
            return Err(Error::new(
                format!("enum {} has no elements", enum_def.name),
                ErrorType::Semantic,
            ));
        }
        self.buf.push_str("enum ");
        self.buf.push_str(enum_def.name);
        self.buf.push_str(" {");
        self.push_indent();
        for element in enum_def.elements.iter() {
            self.newline_indent();
            self.buf.push_str(element.name);
        }
        self.pop_indent();
        self.newline_indent();
        self.buf.push('}');
        Ok(VisitFlow::Next)
    }

    fn enter_union_definition(
        &mut self,
        _: &mut (),
        union: &'a UnionDefinition<'a>,
    ) -> VisitResult {
        if union.types.is_empty() {
            return Err(Error::new(
                format!("union {} has no member types", union.name),
                ErrorType::Semantic,
            ));
        }
        self.buf.push_str("union ");
        self.buf.push_str(union.name);
        self.buf.push_str(" = ");
        for (index, member) in union.types.iter().enumerate() {
            if index > 0 {
                self.buf.push_str(" | ");
            }
            self.write_type(*member);
        }
        Ok(VisitFlow::Next)
    }

    fn enter_input_definition(
        &mut self,
        _: &mut (),
        input: &'a InputDefinition<'a>,
    ) -> VisitResult {
        self.buf.push_str("input ");
        self.buf.push_str(input.name);
        self.buf.push_str(" {");
        self.push_indent();
        Ok(VisitFlow::Next)
    }

    fn leave_input_definition(
        &mut self,
        _: &mut (),
        _input: &'a InputDefinition<'a>,
    ) -> Result<()> {
        self.pop_indent();
        self.newline_indent();
        self.buf.push('}');
        Ok(())
    }

    fn enter_input_field_definition(
        &mut self,
        _: &mut (),
        field: &'a InputFieldDefinition<'a>,
    ) -> VisitResult {
        self.newline_indent();
        self.buf.push_str(field.name);
        self.buf.push_str(": ");
        self.write_type(field.of_type);
        Ok(VisitFlow::Next)
    }

    fn leave_schema(&mut self, _: &mut (), schema: &'a Schema<'a>) -> Result<()> {
        // inside a document the separator was written when the definition was entered; as a
        // root the member definitions were already flushed and the block needs its own
        if self.buf.is_empty() && self.printed_any {
            self.buf.push_str("\n\n");
        }
        self.buf.push_str("schema {");
        self.push_indent();
        self.newline_indent();
        self.buf.push_str("query: ");
        self.buf.push_str(schema.query.name);
        if let Some(mutation) = schema.mutation {
            self.newline_indent();
            self.buf.push_str("mutation: ");
            self.buf.push_str(mutation.name);
        }
        if let Some(subscription) = schema.subscription {
            self.newline_indent();
            self.buf.push_str("subscription: ");
            self.buf.push_str(subscription.name);
        }
        if !schema.types.is_empty() {
            self.newline_indent();
            self.buf.push_str("types: [");
            let mut first = true;
            for member in schema.types.iter() {
                if let Some(name) = member.name() {
                    if !first {
                        self.buf.push_str(", ");
                    }
                    first = false;
                    self.buf.push_str(name);
                }
            }
            self.buf.push(']');
        }
        self.pop_indent();
        self.newline_indent();
        self.buf.push('}');
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ASTContext, ParseNode};
    use indoc::indoc;

    fn roundtrip(source: &str) -> String {
        let ctx = ASTContext::new();
        let once = Document::parse(&ctx, source).unwrap().print();
        let twice = Document::parse(&ctx, once.as_str()).unwrap().print();
        assert_eq!(once, twice, "printing must be a fixed point");
        once
    }

    #[test]
    fn anonymous_query_gets_explicit_keyword() {
        assert_eq!(
            roundtrip("{ me { name } }"),
            "query {\n  me {\n    name\n  }\n}"
        );
    }

    #[test]
    fn named_operation_with_variables() {
        let expected = indoc! {"
            query HeroNameAndFriends($episode: Episode) {
              hero(episode: $episode) {
                name
                friends {
                  name
                }
              }
            }"};
        assert_eq!(
            roundtrip(
                "query HeroNameAndFriends($episode: Episode) {
                  hero(episode: $episode) { name friends { name } }
                }"
            ),
            expected
        );
    }

    #[test]
    fn arguments_and_enum_values() {
        let expected = indoc! {r#"
            query {
              human(id: "1000") {
                name
                height(unit: FOOT)
              }
            }"#};
        assert_eq!(
            roundtrip(r#"{ human(id: "1000") { name height(unit: FOOT) } }"#),
            expected
        );
    }

    #[test]
    fn aliases_directives_and_defaults() {
        let expected = indoc! {"
            query Hero($episode: Episode = JEDI, $withFriends: Boolean!) {
              empireHero: hero(episode: EMPIRE) {
                friends @include(if: $withFriends) @uppercase {
                  name
                }
              }
            }"};
        assert_eq!(
            roundtrip(
                "query Hero($episode: Episode = JEDI $withFriends: Boolean!) {
                  empireHero: hero(episode: EMPIRE) {
                    friends @include(if: $withFriends) @uppercase { name }
                  }
                }"
            ),
            expected
        );
    }

    #[test]
    fn fragments_and_spreads() {
        let expected = indoc! {"
            query {
              leftComparison: hero(episode: EMPIRE) {
                ...comparisonFields
              }
            }

            fragment comparisonFields on Character {
              name
              appearsIn
              friends {
                name
              }
            }"};
        assert_eq!(
            roundtrip(
                "{ leftComparison: hero(episode: EMPIRE) { ...comparisonFields } }
                fragment comparisonFields on Character { name appearsIn friends { name } }"
            ),
            expected
        );
    }

    #[test]
    fn inline_fragments() {
        let expected = indoc! {"
            query HeroForEpisode($ep: Episode!) {
              hero(episode: $ep) {
                name
                ... on Droid {
                  primaryFunction
                }
                ... @skip(if: $ep) {
                  height
                }
              }
            }"};
        assert_eq!(
            roundtrip(
                "query HeroForEpisode($ep: Episode!) {
                  hero(episode: $ep) {
                    name
                    ... on Droid { primaryFunction }
                    ... @skip(if: $ep) { height }
                  }
                }"
            ),
            expected
        );
    }

    #[test]
    fn object_values_print_multiline() {
        let expected = indoc! {"
            query {
              nearestThing(location: {
                lon: 12.43
                lat: -53.211
              })
            }"};
        assert_eq!(
            roundtrip("{ nearestThing(location: { lon: 12.43, lat: -53.211 }) }"),
            expected
        );
    }

    #[test]
    fn floats_stay_floats() {
        let ctx = ASTContext::new();
        let printed = Document::parse(&ctx, "{ a(x: 1e+10, y: 2.0, z: 1.5e-3) }")
            .unwrap()
            .print();
        assert_eq!(printed, "query {\n  a(x: 10000000000.0, y: 2.0, z: 0.0015)\n}");
        // the canonical text re-lexes every literal as a float or int unchanged
        roundtrip(printed.as_str());
    }

    #[test]
    fn strings_keep_escapes() {
        assert_eq!(
            roundtrip(r#"{ a(x: "Hello\u0020World\n") }"#),
            "query {\n  a(x: \"Hello\\u0020World\\n\")\n}"
        );
    }

    #[test]
    fn empty_selection_sets_elide_braces() {
        assert_eq!(roundtrip("query Empty { }"), "query Empty");
    }

    #[test]
    fn reparsing_canonical_text_is_structurally_equal() {
        let ctx = ASTContext::new();
        let first = Document::parse(&ctx, r#"{ human(id: "1000") { name height(unit: FOOT) } }"#)
            .unwrap();
        let printed = first.print();
        let second = Document::parse(&ctx, printed.as_str()).unwrap();
        assert_eq!(first.definitions, second.definitions);
    }

    #[test]
    fn mutation_with_input_type() {
        let expected = indoc! {"
            input ReviewInput {
              stars: Int!
              commentary: String
            }

            mutation CreateReviewForEpisode($ep: Episode!, $review: ReviewInput!) {
              createReview(episode: $ep, review: $review) {
                stars
                commentary
              }
            }"};
        assert_eq!(
            roundtrip(
                "input ReviewInput { stars: Int! commentary: String }
                mutation CreateReviewForEpisode($ep: Episode!, $review: ReviewInput!) {
                  createReview(episode: $ep, review: $review) { stars commentary }
                }"
            ),
            expected
        );
    }

    #[test]
    fn schema_document_roundtrips() {
        let canonical = indoc! {"
            enum Episode {
              NEWHOPE
              EMPIRE
              JEDI
            }

            interface Character {
              id: String!
              name: String
            }

            type Human implements Character {
              id: String!
              name: String
              homePlanet: String
            }

            type Query {
              hero(episode: Episode): Character
            }

            schema {
              query: Query
            }"};
        assert_eq!(roundtrip(canonical), canonical);
    }

    #[test]
    fn field_argument_defaults() {
        let canonical = indoc! {"
            type Starship {
              id: ID!
              length(unit: LengthUnit = METER): Float
              coords: [[Float!]]!
            }"};
        assert_eq!(roundtrip(canonical), canonical);
    }

    #[test]
    fn unions_print_on_one_line() {
        assert_eq!(
            roundtrip("union SearchResult = Human | Droid | Starship"),
            "union SearchResult = Human | Droid | Starship"
        );
    }

    #[test]
    fn subscriptions_print_their_keyword() {
        assert_eq!(
            roundtrip("subscription OnReview { review }"),
            "subscription OnReview {\n  review\n}"
        );
    }

    #[test]
    fn schema_root_prints_types_then_query_then_block() {
        let ctx = ASTContext::new();
        let mut query = ObjectDefinition::new(&ctx, "Query");
        query.fields.push(ObjectFieldDefinition::new(
            &ctx,
            "hero",
            Type::Named(NamedType::new(&ctx, "Character")),
        ));
        let query = ctx.alloc(query);

        let mut episode = EnumDefinition::new(&ctx, "Episode");
        episode.elements.push(EnumElementDefinition::new(&ctx, "JEDI"));
        let episode = ctx.alloc(episode);

        let mut schema = Schema::new(&ctx, query);
        schema.add_type(Definition::Enum(episode));
        let schema = ctx.alloc(schema);

        let expected = indoc! {"
            enum Episode {
              JEDI
            }

            type Query {
              hero: Character
            }

            schema {
              query: Query
              types: [Episode]
            }"};
        assert_eq!(schema.print(), expected);
    }

    #[test]
    fn schema_block_with_all_roots() {
        let canonical = indoc! {"
            type Query {
              a: Int
            }

            type Mutation {
              b: Int
            }

            type Subscription {
              c: Int
            }

            schema {
              query: Query
              mutation: Mutation
              subscription: Subscription
            }"};
        assert_eq!(roundtrip(canonical), canonical);
    }

    #[test]
    fn empty_enum_is_a_print_error() {
        let ctx = ASTContext::new();
        let ast = Document::parse(&ctx, "enum Empty { }").unwrap();
        let mut out = std::vec::Vec::new();
        let error = format(ast, &mut out).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Semantic);
        assert_eq!(
            error.message(),
            "enum definition: enum Empty has no elements"
        );
    }

    #[test]
    fn empty_union_is_a_print_error() {
        let ctx = ASTContext::new();
        let mut document = Document::default_in(&ctx.arena);
        document
            .definitions
            .push(Definition::Union(ctx.alloc(UnionDefinition::new(&ctx, "Nothing"))));
        let document = ctx.alloc(document);
        let mut out = std::vec::Vec::new();
        let error = format(document, &mut out).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Semantic);
        assert!(error.message().contains("union Nothing has no member types"));
    }

    #[test]
    fn non_finite_floats_are_a_print_error() {
        let ctx = ASTContext::new();
        let mut arguments = Arguments::default_in(&ctx.arena);
        arguments.children.push(Argument {
            name: "x",
            value: Value::Float(FloatValue {
                value: f64::INFINITY,
            }),
        });
        let mut selection_set = SelectionSet::default_in(&ctx.arena);
        selection_set.selections.push(Selection::Field(SelectionField {
            alias: None,
            name: "a",
            arguments,
            directives: Directives::default_in(&ctx.arena),
            selection_set: SelectionSet::default_in(&ctx.arena),
        }));
        let operation = OperationDefinition {
            operation: OperationKind::Query,
            name: None,
            variable_definitions: VariableDefinitions::default_in(&ctx.arena),
            directives: Directives::default_in(&ctx.arena),
            selection_set,
        };
        let mut document = Document::default_in(&ctx.arena);
        document
            .definitions
            .push(Definition::Operation(ctx.alloc(operation)));
        let document = ctx.alloc(document);

        let mut out = std::vec::Vec::new();
        let error = format(document, &mut out).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Semantic);
        assert!(error.message().contains("float inf is not finite"));
    }

    #[test]
    fn sink_receives_one_write_per_definition() {
        struct CountingSink {
            writes: usize,
        }
        impl io::Write for CountingSink {
            fn write(&mut self, data: &[u8]) -> io::Result<usize> {
                self.writes += 1;
                Ok(data.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let ctx = ASTContext::new();
        let ast = Document::parse(
            &ctx,
            "{ a } fragment F on T { b } type X { c: Int } schema { query: X }",
        )
        .unwrap();
        let mut sink = CountingSink { writes: 0 };
        format(ast, &mut sink).unwrap();
        assert_eq!(sink.writes, 4);
    }

    #[test]
    fn sink_errors_surface_as_io_errors() {
        struct FailingSink;
        impl io::Write for FailingSink {
            fn write(&mut self, _data: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let ctx = ASTContext::new();
        let ast = Document::parse(&ctx, "{ a }").unwrap();
        let error = format(ast, &mut FailingSink).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Io);
        assert!(error.message().contains("sink closed"));
    }
}
