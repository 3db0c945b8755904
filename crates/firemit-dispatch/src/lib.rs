//! Episode dispatch for the fire mitigation deployment service.
//!
//! The [`Dispatcher`] bridges the HTTP layer and the environment: every
//! call to [`Dispatcher::run_once`] runs exactly one episode on an isolated
//! Tokio task, bounded by a timeout, and returns the
//! [`EpisodeResult`](firemit_types::EpisodeResult) the frontend renders.

pub mod dispatcher;
pub mod error;

pub use dispatcher::{Dispatcher, MAX_HYDRANTS, MAX_WILDFIRES, assemble};
pub use error::DispatchError;
