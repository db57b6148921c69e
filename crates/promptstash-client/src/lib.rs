//! Backend client for the Prompt Save desktop app.
//!
//! Three layers, composed bottom-up:
//!
//! 1. [`ApiClient`]: thin HTTP wrapper over the four REST endpoints.
//! 2. [`worker`]: a background loop that polls `/api/status`, executes UI
//!    commands against the API, and streams [`worker::AppEvent`]s back.
//! 3. [`state`]: a pure view-model that folds those events into what the
//!    UI should render. No I/O, so it is fully unit-testable.
//!
//! The UI owns a [`worker::WorkerHandle`] and talks to the backend only
//! through its channels.

pub mod api;
pub mod error;
pub mod state;
pub mod worker;


pub use api::ApiClient;
pub use error::ClientError;
