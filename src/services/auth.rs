// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::UserRepository,
    middleware::tenancy::TenantContext,
    models::{
        auth::{AuthResponse, Claims, NewUser, User},
        tenancy::TenantId,
    },
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self {
            user_repo,
            jwt_secret,
        }
    }

    pub async fn register_user(
        &self,
        tenant: &TenantContext,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AppError> {
        // Hashing em thread separada (bcrypt é caro de propósito)
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let new_user = self
            .user_repo
            .create_user(tenant.scoped(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: hashed_password,
            }))
            .await?;

        let token = self.create_token(&new_user)?;
        Ok(AuthResponse {
            token,
            user: new_user,
        })
    }

    pub async fn login_user(
        &self,
        tenant: &TenantContext,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AppError> {
        // A busca já é escopada: o mesmo e-mail pode existir em duas
        // comunidades como contas independentes.
        let user = self
            .user_repo
            .find_by_email(tenant.tenant_id(), email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&user)?;
        Ok(AuthResponse { token, user })
    }

    /// Valida o token E confere que ele foi emitido para o tenant da
    /// requisição atual. Token da comunidade A num pedido da B é rejeitado.
    pub async fn validate_token(
        &self,
        token: &str,
        expected_tenant: &TenantId,
    ) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        if &token_data.claims.tenant != expected_tenant {
            tracing::warn!(
                token_tenant = %token_data.claims.tenant,
                request_tenant = %expected_tenant,
                "Token usado fora da comunidade de origem"
            );
            return Err(AppError::InvalidToken);
        }

        self.user_repo
            .find_by_id(&token_data.claims.tenant, token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user.id,
            tenant: user.tenant_id.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
