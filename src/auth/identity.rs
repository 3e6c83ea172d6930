use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use tracing::warn;

use crate::api_error::ApiError;

/// Header carrying the already-authenticated player identifier, set by the
/// upstream auth gateway. This service performs no signature or credential
/// verification of its own.
pub const PLAYER_HEADER: &str = "X-Player-Address";

/// Authenticated player identity, lower-cased at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity(pub String);

impl PlayerIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for PlayerIdentity {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req
            .headers()
            .get(PLAYER_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_ascii_lowercase());

        match identity {
            Some(player) => ready(Ok(PlayerIdentity(player))),
            None => {
                warn!("Missing player identity header");
                ready(Err(ApiError::Unauthorized))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn extracts_and_lowercases_the_player_address() {
        let req = TestRequest::default()
            .insert_header((PLAYER_HEADER, "0xAbCdEf0123"))
            .to_http_request();
        let identity = PlayerIdentity::extract(&req).await.unwrap();
        assert_eq!(identity.as_str(), "0xabcdef0123");
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let result = PlayerIdentity::extract(&req).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[actix_web::test]
    async fn blank_header_is_unauthorized() {
        let req = TestRequest::default()
            .insert_header((PLAYER_HEADER, "   "))
            .to_http_request();
        let result = PlayerIdentity::extract(&req).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }
}
