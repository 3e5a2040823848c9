//! Introspection-class detection.
//!
//! An operation is introspection-class when any field selection anywhere in
//! the document, fragments included, is named `__schema` or `__typename`.

use graphql_parser::query::{Definition, OperationDefinition, Selection, SelectionSet, parse_query};
use tracing::warn;

use ide_core::error::AppError;

/// Field names that mark a document as introspection-class.
pub const INTROSPECTION_FIELDS: [&str; 2] = ["__schema", "__typename"];

/// Parses `document` and reports whether it is introspection-class.
pub fn is_introspection(document: &str) -> Result<bool, AppError> {
    let parsed = parse_query::<&str>(document)
        .map_err(|e| AppError::parse(format!("Error parsing GraphQL query: {e}")))?;

    Ok(parsed.definitions.iter().any(|definition| match definition {
        Definition::Operation(operation) => has_introspection_field(operation_selection(operation)),
        Definition::Fragment(fragment) => has_introspection_field(&fragment.selection_set),
    }))
}

/// Classifies `document`, treating unparsable documents as regular operations.
///
/// Parse failures are logged, never returned: the endpoint is the authority
/// on validity.
pub fn classify(document: &str) -> bool {
    match is_introspection(document) {
        Ok(found) => found,
        Err(e) => {
            warn!(error = %e, "Treating unparsable operation as non-introspection");
            false
        }
    }
}

fn operation_selection<'a, 'b>(
    operation: &'b OperationDefinition<'a, &'a str>,
) -> &'b SelectionSet<'a, &'a str> {
    match operation {
        OperationDefinition::SelectionSet(set) => set,
        OperationDefinition::Query(query) => &query.selection_set,
        OperationDefinition::Mutation(mutation) => &mutation.selection_set,
        OperationDefinition::Subscription(subscription) => &subscription.selection_set,
    }
}

fn has_introspection_field<'a>(set: &SelectionSet<'a, &'a str>) -> bool {
    set.items.iter().any(|selection| match selection {
        Selection::Field(field) => {
            INTROSPECTION_FIELDS.iter().any(|name| *name == field.name)
                || has_introspection_field(&field.selection_set)
        }
        Selection::InlineFragment(fragment) => has_introspection_field(&fragment.selection_set),
        Selection::FragmentSpread(_) => false,
    })
}
