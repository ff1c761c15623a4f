use uuid::Uuid;

use crate::error::CatalogError;

pub type Id = Uuid;

pub fn generate_id() -> Id {
    Uuid::new_v4()
}

/// Parse an identifier taken from a request path.
///
/// Anything that is not a well-formed UUID is a cast failure, never a lookup miss.
pub fn parse_id(raw: &str) -> Result<Id, CatalogError> {
    Uuid::parse_str(raw.trim()).map_err(|_| CatalogError::Cast {
        value: raw.to_string(),
    })
}

/// Trim a submitted text field, mapping blank input to `None`.
pub(crate) fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
