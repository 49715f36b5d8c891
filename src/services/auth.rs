// src/services/auth.rs
//
// Credential service for both principal kinds: staff users (email +
// bcrypt password) and portal clients (code + shared access key).
// Tokens are short-lived HS256 JWTs whose `value` claim is re-checked
// against current storage on validation, so rotating a client's access
// key invalidates every outstanding token for that client.

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepo, NewUser, UserRepo},
    models::{auth::Claims, auth::User, client::Client},
};

const TOKEN_TTL_HOURS: i64 = 1;

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepo>,
    client_repo: Arc<dyn ClientRepo>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        client_repo: Arc<dyn ClientRepo>,
        jwt_secret: String,
    ) -> Self {
        Self {
            user_repo,
            client_repo,
            jwt_secret,
        }
    }

    pub async fn register_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AppError> {
        // Hashing is CPU-bound, keep it off the async workers.
        let password_clone = password.to_owned();
        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("password hashing task failed: {e}"))??;

        let user = self
            .user_repo
            .create(NewUser {
                user_uuid: Uuid::new_v4(),
                password_hash,
                first_name: first_name.to_owned(),
                last_name: last_name.to_owned(),
                email: email.to_owned(),
            })
            .await?;

        let token = self.issue_token(&user.user_uuid.to_string(), &user.email)?;
        Ok((user, token))
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("password verification task failed: {e}"))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.issue_token(&user.user_uuid.to_string(), &user.email)?;
        Ok((user, token))
    }

    // The portal key is a shared secret, not a password: normalization
    // plus plain equality, with the same generic 401 on either failure.
    pub async fn client_login(
        &self,
        client_code: &str,
        access_key: &str,
    ) -> Result<(Client, String), AppError> {
        let code = client_code.trim().to_uppercase();
        let key = access_key.trim().to_uppercase();

        let client = self
            .client_repo
            .find_by_code(&code)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let stored_key = match client.access_key.as_deref() {
            Some(stored) if stored.to_uppercase() == key => stored.to_owned(),
            _ => return Err(AppError::InvalidCredentials),
        };

        let token = self.issue_token(&client.code, &stored_key)?;
        Ok((client, token))
    }

    pub async fn validate_user_token(&self, token: &str) -> Result<User, AppError> {
        let claims = self.decode_token(token)?;
        let user_uuid = Uuid::parse_str(&claims.id).map_err(|_| AppError::InvalidToken)?;
        let user = self
            .user_repo
            .find_by_uuid(user_uuid)
            .await?
            .ok_or(AppError::InvalidToken)?;
        if user.email != claims.value {
            return Err(AppError::InvalidToken);
        }
        Ok(user)
    }

    pub async fn validate_client_token(&self, token: &str) -> Result<Client, AppError> {
        let claims = self.decode_token(token)?;
        let client = self
            .client_repo
            .find_by_code(&claims.id)
            .await?
            .ok_or(AppError::InvalidToken)?;
        // A rotated access key orphans the token.
        if client.access_key.as_deref() != Some(claims.value.as_str()) {
            return Err(AppError::InvalidToken);
        }
        Ok(client)
    }

    fn issue_token(&self, id: &str, value: &str) -> Result<String, AppError> {
        let expires_at = Utc::now() + chrono::Duration::hours(TOKEN_TTL_HOURS);
        let claims = Claims {
            id: id.to_owned(),
            value: value.to_owned(),
            exp: expires_at.timestamp() as usize,
        };
        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;
        Ok(token_data.claims)
    }
}
