use std::env;

pub const AUTH_TOKEN_ENV: &str = "ZOHO_PEOPLE_API_AUTHTOKEN";

/// Reads the People API auth token from the environment.
pub fn load_auth_token() -> Result<String, String> {
    normalize_token(env::var(AUTH_TOKEN_ENV).ok().as_deref())
}

fn normalize_token(raw: Option<&str>) -> Result<String, String> {
    let Some(raw) = raw else {
        return Err(format!("{AUTH_TOKEN_ENV} is not set"));
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{AUTH_TOKEN_ENV} must not be empty"));
    }
    Ok(trimmed.to_string())
}
