//! URL template expansion.

use super::{TransportError, UriParams};

/// Replaces `{name}` placeholders in `template` with percent-encoded values.
///
/// A placeholder may carry a pattern suffix (`{id:\d+}`); only the part
/// before the colon is used as the variable name. Braces inside the
/// pattern nest. An unterminated `{` is kept literally.
pub fn expand_uri_template(template: &str, params: &UriParams) -> Result<String, TransportError> {
    let mut expanded = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = matching_brace(rest, open) else {
            break;
        };

        expanded.push_str(&rest[..open]);

        let placeholder = &rest[open + 1..close];
        let name = placeholder
            .split_once(':')
            .map_or(placeholder, |(name, _)| name)
            .trim();

        let value = params
            .get(name)
            .ok_or_else(|| TransportError::InvalidRequest {
                message: format!("Map has no value for '{}'", name),
            })?;
        expanded.push_str(&urlencoding::encode(value));

        rest = &rest[close + 1..];
    }

    expanded.push_str(rest);
    Ok(expanded)
}

/// Byte index of the `}` closing the `{` at `open`, counting nested braces
/// so that patterns such as `{id:\d{3}}` stay whole.
fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, ch) in text[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}
