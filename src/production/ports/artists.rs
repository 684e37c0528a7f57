//! Artist directory port used to validate reassignment targets.

use super::GatewayResult;
use crate::production::domain::ArtistId;
use async_trait::async_trait;

/// Minimal artist projection needed by the lifecycle manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistProfile {
    id: ArtistId,
    name: String,
}

impl ArtistProfile {
    /// Creates an artist profile.
    #[must_use]
    pub fn new(id: ArtistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the artist identifier.
    #[must_use]
    pub const fn id(&self) -> ArtistId {
        self.id
    }

    /// Returns the artist display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Artist lookup contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtistDirectory: Send + Sync {
    /// Resolves an artist by identifier.
    ///
    /// Returns `None` when no artist has that identifier.
    ///
    /// # Errors
    ///
    /// Returns a transport-level error when the lookup call fails.
    async fn find_artist(&self, id: ArtistId) -> GatewayResult<Option<ArtistProfile>>;
}
