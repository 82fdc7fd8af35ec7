use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use barberdesk_application::IdentityProvider;
use barberdesk_core::{AppError, AppResult, ExternalIdentity};

/// Key material used to verify provider-issued session tokens.
#[derive(Clone)]
pub enum JwtVerificationKey {
    /// Shared HMAC secret for HS256 tokens.
    Hs256Secret(String),
    /// PEM encoded RSA public key for RS256 tokens.
    Rs256PublicKeyPem(String),
}

/// Identity provider adapter verifying signed JWT session tokens.
#[derive(Clone)]
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, alias = "first_name")]
    given_name: Option<String>,
    #[serde(default, alias = "last_name")]
    family_name: Option<String>,
    #[serde(default, alias = "image_url")]
    picture: Option<String>,
}

impl JwtIdentityProvider {
    /// Creates a verifier for the given key, optionally pinning issuer and audience.
    pub fn new(
        key: JwtVerificationKey,
        issuer: Option<&str>,
        audience: Option<&str>,
    ) -> AppResult<Self> {
        let (decoding_key, algorithm) = match key {
            JwtVerificationKey::Hs256Secret(secret) => {
                if secret.trim().is_empty() {
                    return Err(AppError::Validation(
                        "HS256 identity secret must not be empty".to_owned(),
                    ));
                }
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
            JwtVerificationKey::Rs256PublicKeyPem(pem) => {
                let decoding_key = DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(|error| {
                    AppError::Validation(format!("invalid RS256 public key: {error}"))
                })?;
                (decoding_key, Algorithm::RS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            decoding_key,
            validation,
        })
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn verify_session_token(&self, token: &str) -> AppResult<Option<ExternalIdentity>> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }

        let claims = match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(error) => {
                tracing::debug!(error = %error, "rejected session token");
                return Ok(None);
            }
        };

        if claims.sub.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(
            ExternalIdentity::new(claims.sub)
                .with_email(claims.email)
                .with_names(claims.given_name, claims.family_name)
                .with_image_url(claims.picture),
        ))
    }
}
