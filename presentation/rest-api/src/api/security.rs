use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use once_cell::sync::Lazy;
use poem::Request;
use poem_openapi::SecurityScheme;
use serde::Deserialize;

use business::domain::shared::value_objects::UserId;

use crate::config::auth_config::AuthConfig;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct SupabaseClaims {
    sub: String,
    email: Option<String>,
    role: Option<String>,
    exp: u64,
}

struct SessionVerifier {
    key: DecodingKey,
    audience: String,
}

static VERIFIER: Lazy<Option<SessionVerifier>> = Lazy::new(|| {
    let config = AuthConfig::from_env();
    match config.jwt_secret {
        Some(secret) => Some(SessionVerifier {
            key: DecodingKey::from_secret(secret.as_bytes()),
            audience: config.audience,
        }),
        None => {
            tracing::error!("SUPABASE_JWT_SECRET is not set; every request will be rejected");
            None
        }
    }
});

fn extract_user_id(token: &str, key: &DecodingKey, audience: &str) -> Result<UserId, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[audience]);
    validation.validate_exp = true;

    let token_data = decode::<SupabaseClaims>(token, key, &validation)
        .map_err(|e| format!("auth.token_validation_failed: {e}"))?;

    let sub = token_data.claims.sub.trim();
    if sub.is_empty() {
        return Err("auth.missing_subject".to_string());
    }
    Ok(UserId::new(sub))
}

/// Supabase session (access token) authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    bearer_format = "JWT",
    checker = "supabase_bearer_checker"
)]
pub struct SupabaseBearer(pub UserId);

async fn supabase_bearer_checker(
    _req: &Request,
    bearer: poem_openapi::auth::Bearer,
) -> Option<UserId> {
    let verifier = VERIFIER.as_ref()?;

    match extract_user_id(&bearer.token, &verifier.key, &verifier.audience) {
        Ok(user_id) => Some(user_id),
        Err(e) => {
            tracing::warn!("Supabase auth failed: {e}");
            None
        }
    }
}
