use validator::{ValidationError, ValidationErrors};

/// Picks the single message reported for a failed validation.
///
/// Only one field is ever reported, even when several are invalid. The
/// validator keeps field errors in a hash map, so fields are ordered by
/// name to keep the choice stable across runs.
pub fn first_field_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<(String, &Vec<ValidationError>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|err| default_message(&field, err))
        })
        .unwrap_or_else(|| "Invalid request".to_string())
}

fn default_message(field: &str, err: &ValidationError) -> String {
    match &err.message {
        Some(message) => message.to_string(),
        None => format!("{field}: {}", err.code),
    }
}
