use validator::{Validate, ValidationErrors};

pub fn validate<T: Validate>(val: &T) -> Result<(), ValidationErrors> {
    val.validate()
}

/// Flattens field errors into one line in the order `fields` lists them,
/// using each rule's message when it has one.
pub fn summarize(errors: &ValidationErrors, fields: &[&str]) -> String {
    let field_errors = errors.field_errors();
    let mut keys: Vec<String> = field_errors.keys().map(|k| k.to_string()).collect();
    keys.sort_by_key(|k| fields.iter().position(|f| f == k).unwrap_or(usize::MAX));

    let messages: Vec<String> = keys
        .iter()
        .filter_map(|key| {
            field_errors
                .iter()
                .find(|(k, _)| k.to_string() == *key)
                .and_then(|(_, errs)| errs.first())
                .map(|err| {
                    err.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", key))
                })
        })
        .collect();

    messages.join("; ")
}
