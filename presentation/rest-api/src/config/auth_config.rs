/// Configuration for validating Supabase session tokens.
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub audience: String,
}

impl AuthConfig {
    /// Environment variables:
    /// - SUPABASE_JWT_SECRET: HS256 secret of the Supabase project
    /// - SUPABASE_JWT_AUDIENCE: expected `aud` claim (default: "authenticated")
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("SUPABASE_JWT_SECRET")
                .ok()
                .filter(|secret| !secret.trim().is_empty()),
            audience: std::env::var("SUPABASE_JWT_AUDIENCE")
                .unwrap_or_else(|_| "authenticated".to_string()),
        }
    }
}
