// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored user profile in Firestore.
///
/// The password hash is persisted with the record; API responses use a
/// separate DTO and never expose it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID (also used as document ID)
    pub id: Uuid,
    /// Login email, unique per account
    pub email: String,
    /// Display name
    pub name: String,
    /// Argon2 password hash
    pub password_hash: String,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}
