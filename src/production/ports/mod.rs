//! Port contracts for the production bounded context.

pub mod artists;
pub mod completion;
pub mod gateway;

pub use artists::{ArtistDirectory, ArtistProfile};
pub use completion::{CompletionSink, TaskCompletion};
pub use gateway::{
    GatewayError, GatewayResult, NewRejectionRecord, RejectionDelta, TaskGateway, TaskPatch,
};

#[cfg(test)]
pub use artists::MockArtistDirectory;
#[cfg(test)]
pub use completion::MockCompletionSink;
#[cfg(test)]
pub use gateway::MockTaskGateway;
