//! # Token codec
//!
//! Reads the claims of a compact JWT (`header.payload.signature`, base64url without
//! padding). The signature is not checked here: the gateway verifies it on every
//! request, and the client only needs the identity claims and the expiry.
//!
//! Both functions are pure. [`validate`] is the only expiry check in the client; there
//! is no clock-skew allowance and no refresh.

use api::User;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::SessionError;

/// Claims carried by a bearer token. `exp` and `iat` are epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub sub: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

impl TokenPayload {
    /// Identity described by the claims. `name` falls back to `username`.
    pub fn to_user(&self) -> User {
        User {
            user_id: self.sub.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            name: self.name.clone().or_else(|| self.username.clone()),
            company_name: self.company_name.clone(),
            industry_type: self.industry_type.clone(),
            picture: self.picture.clone(),
        }
    }
}

/// A raw token together with its decoded, unexpired claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub token: String,
    pub payload: TokenPayload,
}

impl VerifiedToken {
    pub fn user(&self) -> User {
        self.payload.to_user()
    }
}

/// Parse the claims of `token`.
pub fn decode(token: &str) -> Result<TokenPayload, SessionError> {
    let mut segments = token.trim().split('.');
    let (Some(header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(SessionError::InvalidToken(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let header: serde_json::Value = serde_json::from_slice(&decode_segment(header)?)
        .map_err(|e| SessionError::InvalidToken(format!("header: {e}")))?;
    if !header.is_object() {
        return Err(SessionError::InvalidToken(
            "header is not a JSON object".to_string(),
        ));
    }

    serde_json::from_slice(&decode_segment(payload)?)
        .map_err(|e| SessionError::InvalidToken(format!("claims: {e}")))
}

/// Fails with [`SessionError::ExpiredToken`] when `payload.exp < now`.
pub fn validate(payload: &TokenPayload, now: i64) -> Result<(), SessionError> {
    if payload.exp < now {
        return Err(SessionError::ExpiredToken {
            exp: payload.exp,
            now,
        });
    }
    Ok(())
}

/// [`decode`] then [`validate`].
pub fn verify(token: &str, now: i64) -> Result<VerifiedToken, SessionError> {
    let payload = decode(token)?;
    validate(&payload, now)?;
    Ok(VerifiedToken {
        token: token.trim().to_string(),
        payload,
    })
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, SessionError> {
    URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| SessionError::InvalidToken(format!("base64: {e}")))
}
