//! HTTP Basic authentication.
//!
//! Encodes a username/password pair into the `Authorization: Basic ...`
//! credential, keeping the password out of `Debug` output.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};

/// Header carrying the encoded credential.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Authentication scheme prefix.
pub const BASIC_SCHEME: &str = "Basic";

/// Whitespace for blank checks. No-break spaces (U+00A0, U+2007, U+202F)
/// and NEL are content; the ASCII separators U+001C..=U+001F are not.
fn is_blank_char(ch: char) -> bool {
    match ch {
        '\u{1C}'..='\u{1F}' => true,
        '\u{85}' | '\u{A0}' | '\u{2007}' | '\u{202F}' => false,
        _ => ch.is_whitespace(),
    }
}

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    match value {
        Some(v) => v.chars().all(is_blank_char),
        None => true,
    }
}

/// Encodes `username:password` as standard Base64.
///
/// Returns `None` when either value is missing, empty or whitespace-only.
/// The pair is encoded as US-ASCII: characters outside ASCII become `?`.
pub fn encode_basic_auth(username: Option<&str>, password: Option<&str>) -> Option<String> {
    if is_blank(username) || is_blank(password) {
        return None;
    }
    let (username, password) = (username?, password?);

    let ascii: Vec<u8> = username
        .chars()
        .chain(std::iter::once(':'))
        .chain(password.chars())
        .map(|ch| if ch.is_ascii() { ch as u8 } else { b'?' })
        .collect();

    Some(BASE64.encode(ascii))
}

/// A username/password pair for Basic authentication.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password.
    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Encoded credential, `None` if either part is blank.
    pub fn encode(&self) -> Option<String> {
        encode_basic_auth(Some(&self.username), Some(self.password()))
    }

    /// Full `Authorization` header value, e.g. `Basic dXNlcjpwYXNz`.
    pub fn basic_auth_header(&self) -> Option<String> {
        self.encode()
            .map(|encoded| format!("{} {}", BASIC_SCHEME, encoded))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn decode(encoded: &str) -> (String, String) {
        let bytes = BASE64.decode(encoded).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let (user, pass) = text.split_once(':').unwrap();
        (user.to_string(), pass.to_string())
    }

    #[test]
    fn test_encode_known_value() {
        assert_eq!(
            encode_basic_auth(Some("Aladdin"), Some("open sesame")),
            Some("QWxhZGRpbjpvcGVuIHNlc2FtZQ==".to_string())
        );
    }

    #[test_case(None, Some("pw") ; "missing username")]
    #[test_case(Some("user"), None ; "missing password")]
    #[test_case(None, None ; "both missing")]
    #[test_case(Some(""), Some("pw") ; "empty username")]
    #[test_case(Some("user"), Some("") ; "empty password")]
    #[test_case(Some("   "), Some("pw") ; "whitespace username")]
    #[test_case(Some("user"), Some("\t\n") ; "whitespace password")]
    fn test_blank_credentials_yield_none(username: Option<&str>, password: Option<&str>) {
        assert_eq!(encode_basic_auth(username, password), None);
    }

    #[test_case("user", "pass")]
    #[test_case("admin", "p@ss:w0rd")]
    #[test_case(" padded ", " secret ")]
    #[test_case("a", "b")]
    fn test_decoding_recovers_pair(username: &str, password: &str) {
        let encoded = encode_basic_auth(Some(username), Some(password)).unwrap();
        assert_eq!(decode(&encoded), (username.to_string(), password.to_string()));
    }

    #[test_case("\u{A0}" ; "no-break space")]
    #[test_case("\u{202F}" ; "narrow no-break space")]
    #[test_case("\u{2007}" ; "figure space")]
    fn test_no_break_space_is_not_blank(password: &str) {
        let encoded = encode_basic_auth(Some("user"), Some(password)).unwrap();
        assert_eq!(decode(&encoded), ("user".to_string(), "?".to_string()));
    }

    #[test_case("\u{1F}" ; "unit separator")]
    #[test_case("\u{3000}" ; "ideographic space")]
    #[test_case(" \u{2003}\r" ; "mixed separators")]
    fn test_unicode_whitespace_is_blank(password: &str) {
        assert_eq!(encode_basic_auth(Some("user"), Some(password)), None);
    }

    #[test]
    fn test_non_ascii_becomes_question_mark() {
        let encoded = encode_basic_auth(Some("jos\u{e9}"), Some("pw")).unwrap();
        assert_eq!(decode(&encoded), ("jos?".to_string(), "pw".to_string()));
    }

    #[test]
    fn test_output_has_no_line_breaks() {
        let long = "x".repeat(200);
        let encoded = encode_basic_auth(Some(&long), Some(&long)).unwrap();
        assert!(!encoded.contains('\n'));
        assert!(!encoded.contains('-') && !encoded.contains('_'));
    }

    #[test]
    fn test_credentials_header() {
        let creds = Credentials::new("user", "pass");
        assert_eq!(
            creds.basic_auth_header(),
            Some("Basic dXNlcjpwYXNz".to_string())
        );
        assert_eq!(Credentials::new("user", " ").basic_auth_header(), None);
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("user", "hunter2");
        let debug_str = format!("{:?}", creds);

        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("hunter2"));
    }
}
