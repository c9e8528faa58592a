// ABOUTME: Caller identity extraction from the upstream auth gateway header
// ABOUTME: Authentication itself is an external collaborator; this only reads its verdict
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

//! Caller identity.
//!
//! Session issuance and token verification live in the excluded auth
//! subsystem. The gateway injects the authenticated user's id as a
//! header; handlers take an [`AuthedUser`] argument and never see
//! unauthenticated traffic.

use crate::errors::AppError;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

/// Header carrying the authenticated user id, set by the upstream gateway
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller
#[derive(Debug, Clone, Copy)]
pub struct AuthedUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(AppError::auth_required)?;

        let user_id = Uuid::parse_str(raw)
            .map_err(|_| AppError::auth_invalid("malformed user id header"))?;

        Ok(Self(user_id))
    }
}
