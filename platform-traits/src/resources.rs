//! Localized resource strings.
//!
//! Only an English table ships today; every lookup resolves against it.

/// Locale every lookup currently resolves against.
pub const DEFAULT_LOCALE: &str = "en-US";

const EN_US: &[(&str, &str)] = &[
    ("Validate_NotNullError", "{0} cannot be null."),
    ("Validate_StringNotEmptyError", "{0} cannot be empty."),
    (
        "Validate_TypeCheckError",
        "Expected {0} to be of type {1} but found {2}.",
    ),
    ("Platform_LoginNotSupported", "Login is not supported on the {0} host."),
    (
        "Platform_RuntimeUnavailable",
        "No async runtime is available to run {0}.",
    ),
];

/// Look up a resource string by name.
pub fn resource_string(name: &str) -> Option<&'static str> {
    EN_US
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
}

/// Look up a resource string and substitute `{0}`, `{1}`, ... with `args`.
///
/// Unknown names fall back to the name itself so messages are never empty.
pub fn format_resource(name: &str, args: &[&str]) -> String {
    let template = resource_string(name).unwrap_or(name);
    let mut text = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after
            .find('}')
            .and_then(|close| Some((after[..close].parse::<usize>().ok()?, close)));

        match placeholder.and_then(|(index, close)| Some((*args.get(index)?, close))) {
            Some((arg, close)) => {
                text.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                text.push('{');
                rest = after;
            }
        }
    }
    text.push_str(rest);
    text
}
