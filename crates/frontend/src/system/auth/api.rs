use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use gloo_net::http::{Request, Response};
use serde::Serialize;

use crate::shared::api_utils::{api_url, authorized_get};

/// POST a JSON body to an auth endpoint without a bearer token
async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<Response, String> {
    Request::post(&api_url(path))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|_| "Servidor indisponível".to_string())
}

pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let response = post_json("/api/system/auth/login", &LoginRequest { username, password }).await?;

    match response.status() {
        200 => response
            .json::<LoginResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e)),
        401 => Err("Usuário ou senha inválidos".to_string()),
        status => Err(format!("Falha no login ({})", status)),
    }
}

/// New access token for a stored refresh token
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    let response = post_json("/api/system/auth/refresh", &RefreshRequest { refresh_token }).await?;
    if !response.ok() {
        return Err(format!("Refresh rejected ({})", response.status()));
    }
    response
        .json::<RefreshResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Revoke the refresh token on the server
pub async fn logout(refresh_token: String) -> Result<(), String> {
    let response = post_json("/api/system/auth/logout", &RefreshRequest { refresh_token }).await?;
    if response.ok() {
        Ok(())
    } else {
        Err(format!("Logout rejected ({})", response.status()))
    }
}

/// Session check
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, String> {
    authorized_get("/api/system/auth/me", access_token).await
}
