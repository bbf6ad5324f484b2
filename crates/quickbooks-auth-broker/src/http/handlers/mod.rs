pub mod callback;
pub mod login;
pub mod status;
pub mod token;

/// Treats an empty query value the same as an absent one.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
