// ABOUTME: Link request resolution from the entry URL's query parameters.
// ABOUTME: Reads userId (required) and jwt (optional) exactly once per flow.

use url::Url;

use crate::error::LinkError;

/// The immutable inputs of one linking flow.
///
/// Resolved once at initialization and never re-evaluated, even if the
/// underlying parameters change afterwards.
#[derive(Debug, Clone)]
pub struct LinkRequest {
    /// Opaque external account identifier.
    pub user_id: String,
    /// Opaque bearer credential for the verifier. A missing token is passed
    /// through as-is; the verifier's own authorization failure surfaces it.
    pub auth_token: Option<String>,
}

impl LinkRequest {
    /// Resolve the request from an entry URL like
    /// `https://link.example.com/?userId=u1&jwt=eyJ...`.
    pub fn from_url(url: &Url) -> Result<Self, LinkError> {
        let mut user_id: Option<String> = None;
        let mut auth_token: Option<String> = None;

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "userId" => user_id = Some(value.into_owned()),
                "jwt" => auth_token = Some(value.into_owned()),
                _ => {}
            }
        }

        let user_id = user_id
            .filter(|id| !id.is_empty())
            .ok_or(LinkError::MissingUserId)?;

        Ok(Self {
            user_id,
            auth_token: auth_token.filter(|t| !t.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(url: &str) -> Result<LinkRequest, LinkError> {
        LinkRequest::from_url(&Url::parse(url).unwrap())
    }

    #[test]
    fn test_resolves_user_id_and_jwt() {
        let request = parse("https://link.example.com/?userId=u1&jwt=tok123").unwrap();
        assert_eq!(request.user_id, "u1");
        assert_eq!(request.auth_token.as_deref(), Some("tok123"));
    }

    #[test]
    fn test_missing_user_id_is_an_error() {
        let err = parse("https://link.example.com/?jwt=tok123").unwrap_err();
        assert_eq!(err.to_string(), "Missing userId in URL parameters");
    }

    #[test]
    fn test_empty_user_id_is_an_error() {
        let err = parse("https://link.example.com/?userId=&jwt=tok123").unwrap_err();
        assert!(matches!(err, LinkError::MissingUserId));
    }

    #[test]
    fn test_missing_jwt_is_accepted() {
        let request = parse("https://link.example.com/?userId=u1").unwrap();
        assert_eq!(request.user_id, "u1");
        assert!(request.auth_token.is_none());
    }

    #[test]
    fn test_unrelated_parameters_are_ignored() {
        let request = parse("https://link.example.com/?userId=u1&utm_source=mail").unwrap();
        assert_eq!(request.user_id, "u1");
    }

    #[test]
    fn test_query_encoding_is_decoded() {
        let request = parse("https://link.example.com/?userId=user%2042").unwrap();
        assert_eq!(request.user_id, "user 42");
    }
}
