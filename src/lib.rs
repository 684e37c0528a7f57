//! Atelier: production tracking for a small art and furniture workshop.
//!
//! This crate provides the client-side lifecycle manager for production
//! tasks: moving work through the ordered production stages, referring
//! defective output to rework departments, and reassigning artists, all as
//! a thin orchestration layer over the workshop's task-mutation backend.
//!
//! # Architecture
//!
//! Atelier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure stage/status types and transition planning with no
//!   infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the backend, the artist
//!   directory, and completion signaling
//! - **Adapters**: Concrete implementations of ports (HTTP backend,
//!   in-memory test double)
//!
//! # Modules
//!
//! - [`production`]: Stage advancement, rework referral, and artist
//!   reassignment

pub mod production;
