//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};
use std::sync::Arc;
use uuid::Uuid;

use inkwell_core::ports::{AuthError, TokenClaims, TokenService};

use super::error::AppError;

/// Authenticated caller, built from a verified bearer token.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn create_blog(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}

impl Identity {
    fn authenticate(req: &HttpRequest) -> Result<Self, AppError> {
        let token_service = req
            .app_data::<web::Data<Arc<dyn TokenService>>>()
            .ok_or_else(|| AppError::Internal("TokenService not found in app data".to_string()))?;

        let auth_header = req
            .headers()
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingAuth)?;

        let token = auth_header
            .to_str()
            .ok()
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

        Ok(token_service.validate_token(token)?.into())
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::authenticate(req))
    }
}

/// Optional identity extractor - doesn't fail if not authenticated.
///
/// Lets a handler load the target resource before deciding that the caller
/// is anonymous.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    pub fn user_id(&self) -> Option<Uuid> {
        self.0.as_ref().map(|identity| identity.user_id)
    }
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(Identity::authenticate(req).ok())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use inkwell_infra::{JwtConfig, JwtTokenService};

    fn token_service() -> web::Data<Arc<dyn TokenService>> {
        web::Data::new(Arc::new(JwtTokenService::new(JwtConfig::default())) as Arc<dyn TokenService>)
    }

    #[actix_web::test]
    async fn test_valid_bearer_token() {
        let tokens = token_service();
        let user_id = Uuid::new_v4();
        let token = tokens.generate_token(user_id, "a@example.com").unwrap();

        let req = TestRequest::default()
            .app_data(tokens)
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_http_request();

        let identity = Identity::authenticate(&req).unwrap();
        assert_eq!(identity.user_id, user_id);
    }

    #[actix_web::test]
    async fn test_missing_header() {
        let req = TestRequest::default()
            .app_data(token_service())
            .to_http_request();

        match Identity::authenticate(&req) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Not authorized, no token"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[actix_web::test]
    async fn test_non_bearer_scheme() {
        let req = TestRequest::default()
            .app_data(token_service())
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();

        assert!(matches!(
            Identity::authenticate(&req),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[actix_web::test]
    async fn test_optional_identity_swallows_bad_token() {
        let req = TestRequest::default()
            .app_data(token_service())
            .insert_header((header::AUTHORIZATION, "Bearer garbage"))
            .to_http_request();

        let optional = OptionalIdentity::extract(&req).await.unwrap();
        assert_eq!(optional.user_id(), None);
    }
}
