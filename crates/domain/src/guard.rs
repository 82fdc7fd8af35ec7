//! Coarse authentication gate for protected screens.
//!
//! The guard only distinguishes "still resolving", "signed in" and "signed
//! out". Per-menu authorization is left to the permission resolver consumed by
//! the screen itself.

use serde::{Deserialize, Serialize};

use crate::MenuPath;

/// Lifecycle of one guarded page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    /// Identity resolution is still in flight.
    Unresolved,
    /// Resolution finished with a signed-in session.
    Authenticated,
    /// Resolution finished without a session.
    Unauthenticated,
}

/// Outcome reported by the identity provider adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityResolution {
    /// A session exists for the caller.
    SignedIn,
    /// No session exists for the caller.
    SignedOut,
}

impl IdentityResolution {
    /// Maps "identity or none" into a resolution.
    #[must_use]
    pub fn from_presence(has_identity: bool) -> Self {
        if has_identity {
            Self::SignedIn
        } else {
            Self::SignedOut
        }
    }
}

impl GuardState {
    /// Applies a resolution. Only `Unresolved` moves; resolved states are terminal.
    #[must_use]
    pub fn transition(self, resolution: IdentityResolution) -> Self {
        match (self, resolution) {
            (Self::Unresolved, IdentityResolution::SignedIn) => Self::Authenticated,
            (Self::Unresolved, IdentityResolution::SignedOut) => Self::Unauthenticated,
            (resolved, _) => resolved,
        }
    }
}

/// What the guarded page shows for its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView<'a> {
    /// Loading indicator; no navigation is issued.
    Placeholder,
    /// Navigate to the sign-in entry point and render nothing else.
    Redirect(&'a str),
    /// Render the protected children.
    Children,
}

/// Route guard instance bound to one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    state: GuardState,
    sign_in_path: MenuPath,
}

impl RouteGuard {
    /// Creates an unresolved guard redirecting to `sign_in_path`.
    #[must_use]
    pub fn new(sign_in_path: MenuPath) -> Self {
        Self {
            state: GuardState::Unresolved,
            sign_in_path,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Records the identity resolution outcome and returns the new state.
    pub fn resolve(&mut self, resolution: IdentityResolution) -> GuardState {
        self.state = self.state.transition(resolution);
        self.state
    }

    /// Returns the view for the current state.
    #[must_use]
    pub fn view(&self) -> GuardView<'_> {
        match self.state {
            GuardState::Unresolved => GuardView::Placeholder,
            GuardState::Unauthenticated => GuardView::Redirect(self.sign_in_path.as_str()),
            GuardState::Authenticated => GuardView::Children,
        }
    }
}
