// ABOUTME: Signed-in user session shared by every store
// ABOUTME: Auth-state changes are broadcast to subscribers through a watch channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication Session
//!
//! Token issuance and refresh belong to the identity provider. This module
//! only tracks which user is signed in so stores can scope every path by uid.

use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Authenticated account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable user id used as the root path segment
    pub uid: String,
    /// Account email, overlaid onto the profile
    pub email: Option<String>,
}

impl AuthUser {
    /// Convenience constructor
    #[must_use]
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
        }
    }
}

/// Source of the currently signed-in user
pub trait AuthSession: Send + Sync {
    /// Signed-in user, if any
    fn current_user(&self) -> Option<AuthUser>;

    /// Signed-in user or `AuthRequired`
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when nobody is signed in
    fn require_user(&self) -> AppResult<AuthUser> {
        self.current_user().ok_or_else(AppError::auth_required)
    }
}

/// Cloneable handle over the signed-in user
#[derive(Debug, Clone)]
pub struct SessionHandle {
    sender: Arc<watch::Sender<Option<AuthUser>>>,
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHandle {
    /// Handle with nobody signed in
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Handle with `user` already signed in
    #[must_use]
    pub fn signed_in(user: AuthUser) -> Self {
        let handle = Self::new();
        handle.establish(user);
        handle
    }

    /// Record a sign-in and notify subscribers
    pub fn establish(&self, user: AuthUser) {
        AppLogger::log_auth_event(&user.uid, "sign_in");
        self.sender.send_replace(Some(user));
    }

    /// Record a sign-out and notify subscribers; returns the previous user
    pub fn sign_out(&self) -> Option<AuthUser> {
        let previous = self.sender.send_replace(None);
        if let Some(user) = &previous {
            AppLogger::log_auth_event(&user.uid, "sign_out");
        }
        previous
    }

    /// Receiver that observes every auth-state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.sender.subscribe()
    }
}

impl AuthSession for SessionHandle {
    fn current_user(&self) -> Option<AuthUser> {
        self.sender.borrow().clone()
    }
}
