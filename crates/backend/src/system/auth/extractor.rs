use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use contracts::system::auth::TokenClaims;

/// Identity of the caller on routes behind `require_auth`
#[derive(Debug, Clone)]
pub struct SignedInUser {
    pub user_id: String,
    pub username: String,
    pub is_admin: bool,
}

impl From<&TokenClaims> for SignedInUser {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            username: claims.username.clone(),
            is_admin: claims.is_admin,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SignedInUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Missing claims means the route was mounted outside the auth layer
        let claims = parts.extensions.get::<TokenClaims>().ok_or_else(|| {
            tracing::warn!("No token claims on {}", parts.uri.path());
            StatusCode::UNAUTHORIZED
        })?;
        Ok(SignedInUser::from(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_from_claims() {
        let claims = TokenClaims {
            sub: "u-7".into(),
            username: "ana".into(),
            is_admin: false,
            exp: 2,
            iat: 1,
        };
        let user = SignedInUser::from(&claims);
        assert_eq!(user.user_id, "u-7");
        assert_eq!(user.username, "ana");
        assert!(!user.is_admin);
    }
}
