//! Orchestration services for the production bounded context.

mod lifecycle;

pub use lifecycle::{
    LifecycleError, LifecycleResult, PartialFailure, ProductionLifecycleService, ReworkReferral,
    ReworkResolution, TwoStepOperation,
};
