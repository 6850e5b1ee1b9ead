use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::{Claims, RefreshClaims},
    errors::{AppError, AppResult},
    models::domain::user::User,
};

/// Access token plus the refresh token that can renew it.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_hours: i64,
    refresh_expiration_hours: i64,
}

impl JwtService {
    pub fn new(secret: &SecretString, expiration_hours: i64, refresh_expiration_hours: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
            expiration_hours,
            refresh_expiration_hours,
        }
    }

    pub fn create_token(&self, user: &User) -> AppResult<String> {
        let claims = Claims::new(user, self.expiration_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create JWT: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }

    pub fn create_refresh_token(&self, user_id: &str) -> AppResult<String> {
        let claims = RefreshClaims::new(user_id, self.refresh_expiration_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create refresh token: {}", e)))
    }

    pub fn issue_pair(&self, user: &User) -> AppResult<TokenPair> {
        Ok(TokenPair {
            token: self.create_token(user)?,
            refresh_token: self.create_refresh_token(&user.id)?,
        })
    }

    pub fn validate_refresh_token(&self, token: &str) -> AppResult<RefreshClaims> {
        let token_data = decode::<RefreshClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Refresh token has expired".to_string())
                }
                ErrorKind::InvalidToken => {
                    AppError::Unauthorized("Invalid refresh token format".to_string())
                }
                ErrorKind::InvalidSignature => {
                    AppError::Unauthorized("Refresh token signature is invalid".to_string())
                }
                _ => AppError::Unauthorized(format!("Refresh token validation failed: {}", e)),
            })?;

        // An access token must not be usable as a refresh token
        if token_data.claims.token_type != "refresh" {
            return Err(AppError::Unauthorized(
                "Token is not a refresh token".to_string(),
            ));
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, models::domain::UserRole};

    fn service() -> JwtService {
        let config = Config::test_config();
        JwtService::new(&config.jwt_secret, 1, 168)
    }

    #[test]
    fn test_jwt_create_and_validate() {
        let jwt_service = service();
        let user = User::test_user("johndoe").with_role(UserRole::Student);

        let token = jwt_service.create_token(&user).unwrap();
        assert!(!token.is_empty());

        let claims = jwt_service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "johndoe@example.com");
        assert_eq!(claims.role, Some(UserRole::Student));
    }

    #[test]
    fn test_jwt_invalid_token() {
        assert!(service().validate_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_issue_pair_round_trips_user_id() {
        let jwt_service = service();
        let user = User::test_user("pair");

        let pair = jwt_service.issue_pair(&user).unwrap();
        let refresh = jwt_service.validate_refresh_token(&pair.refresh_token).unwrap();
        assert_eq!(refresh.sub, user.id);
        assert_eq!(refresh.token_type, "refresh");
    }

    #[test]
    fn test_access_token_is_not_a_refresh_token() {
        let jwt_service = service();
        let token = jwt_service.create_token(&User::test_user("x")).unwrap();

        assert!(matches!(
            jwt_service.validate_refresh_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_refresh_token_invalid() {
        match service().validate_refresh_token("invalid.token.here") {
            Err(AppError::Unauthorized(msg)) => {
                assert!(msg.contains("refresh token") || msg.contains("Refresh token"));
            }
            _ => panic!("Expected Unauthorized error"),
        }
    }
}
