//! Document rewrites used by toolbar commands.

use std::collections::HashMap;

use graphql_parser::query::{
    Definition, Document, FragmentDefinition, InlineFragment, OperationDefinition, Selection,
    SelectionSet, parse_query,
};
use tracing::warn;

use ide_core::error::AppError;

type Fragments<'a, 'b> = HashMap<&'a str, &'b FragmentDefinition<'a, &'a str>>;

/// Reformats a document with the standard GraphQL printer.
pub fn prettify(document: &str) -> Result<String, AppError> {
    let parsed = parse_query::<&str>(document)
        .map_err(|e| AppError::parse(format!("Cannot prettify query: {e}")))?;
    Ok(parsed.to_string())
}

/// Inlines fragment spreads as inline fragments and drops fragment
/// definitions.
///
/// Fragments are looked up in the document first, then in `external`
/// (host-supplied fragment snippets). Spreads of unknown fragments, and
/// spreads that would recurse into themselves, are left as they are; the
/// definitions such a spread still needs are kept. A document without an
/// operation is returned unchanged.
pub fn merge_fragments<'a>(document: &'a str, external: &'a [String]) -> Result<String, AppError> {
    let parsed = parse_query::<&str>(document)
        .map_err(|e| AppError::parse(format!("Cannot merge fragments: {e}")))?;

    let external_docs: Vec<Document<'a, &'a str>> = external
        .iter()
        .filter_map(|snippet| match parse_query::<&str>(snippet) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(error = %e, "Skipping unparsable external fragment");
                None
            }
        })
        .collect();

    let mut fragments: Fragments<'a, '_> = HashMap::new();
    let mut order: Vec<&'a str> = Vec::new();
    let all_docs = external_docs.iter().chain(std::iter::once(&parsed));
    for definition in all_docs.flat_map(|d| &d.definitions) {
        if let Definition::Fragment(fragment) = definition
            && fragments.insert(fragment.name, fragment).is_none()
        {
            order.push(fragment.name);
        }
    }

    let mut merged = Document {
        definitions: Vec::new(),
    };
    let mut unresolved = Vec::new();
    for definition in &parsed.definitions {
        if let Definition::Operation(operation) = definition {
            let mut operation = operation.clone();
            let mut stack = Vec::new();
            inline_spreads(
                operation_selection_mut(&mut operation),
                &fragments,
                &mut stack,
                &mut unresolved,
            );
            merged.definitions.push(Definition::Operation(operation));
        }
    }

    if merged.definitions.is_empty() {
        return Ok(document.to_string());
    }

    let mut retained: Vec<&'a str> = Vec::new();
    while let Some(name) = unresolved.pop() {
        if retained.contains(&name) {
            continue;
        }
        let Some(definition) = fragments.get(name) else {
            continue;
        };
        retained.push(name);
        collect_spreads(&definition.selection_set, &mut unresolved);
    }
    for name in order.into_iter().filter(|name| retained.contains(name)) {
        if let Some(definition) = fragments.get(name) {
            merged
                .definitions
                .push(Definition::Fragment((*definition).clone()));
        }
    }

    Ok(merged.to_string())
}

fn operation_selection_mut<'a, 'b>(
    operation: &'b mut OperationDefinition<'a, &'a str>,
) -> &'b mut SelectionSet<'a, &'a str> {
    match operation {
        OperationDefinition::SelectionSet(set) => set,
        OperationDefinition::Query(query) => &mut query.selection_set,
        OperationDefinition::Mutation(mutation) => &mut mutation.selection_set,
        OperationDefinition::Subscription(subscription) => &mut subscription.selection_set,
    }
}

/// Replaces resolvable spreads in `set`. Spreads left in place because of
/// recursion are pushed onto `unresolved`.
fn inline_spreads<'a>(
    set: &mut SelectionSet<'a, &'a str>,
    fragments: &Fragments<'a, '_>,
    stack: &mut Vec<&'a str>,
    unresolved: &mut Vec<&'a str>,
) {
    for item in set.items.iter_mut() {
        let replacement = match item {
            Selection::Field(field) => {
                inline_spreads(&mut field.selection_set, fragments, stack, unresolved);
                None
            }
            Selection::InlineFragment(fragment) => {
                inline_spreads(&mut fragment.selection_set, fragments, stack, unresolved);
                None
            }
            Selection::FragmentSpread(spread) => {
                let name = spread.fragment_name;
                match fragments.get(name) {
                    Some(definition) if !stack.contains(&name) => {
                        let mut selection_set = definition.selection_set.clone();
                        stack.push(name);
                        inline_spreads(&mut selection_set, fragments, stack, unresolved);
                        stack.pop();
                        Some(Selection::InlineFragment(InlineFragment {
                            position: spread.position,
                            type_condition: Some(definition.type_condition.clone()),
                            directives: spread.directives.clone(),
                            selection_set,
                        }))
                    }
                    Some(_) => {
                        unresolved.push(name);
                        None
                    }
                    None => None,
                }
            }
        };

        if let Some(replacement) = replacement {
            *item = replacement;
        }
    }
}

fn collect_spreads<'a>(set: &SelectionSet<'a, &'a str>, names: &mut Vec<&'a str>) {
    for item in &set.items {
        match item {
            Selection::Field(field) => collect_spreads(&field.selection_set, names),
            Selection::InlineFragment(fragment) => collect_spreads(&fragment.selection_set, names),
            Selection::FragmentSpread(spread) => names.push(spread.fragment_name),
        }
    }
}
