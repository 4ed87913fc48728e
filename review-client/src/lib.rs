//! Review Client - network side of the service-order review desk
//!
//! Talks to the review backend over HTTP and drives a
//! [`review_core::ReviewSession`] through the review workflow.
//!
//! # Example
//!
//! ```ignore
//! let config = ClientConfig::from_env()?;
//! let mut desk = ReviewDesk::new(config.build_http_client()?);
//!
//! desk.refresh_lists().await?;
//! desk.open(42).await?;
//! desk.edit(|s| s.set_maintenance_type("Corretiva"))?;
//! desk.approve().await?;
//! ```

pub mod api;
pub mod config;
pub mod desk;
pub mod error;
pub mod http;
pub mod logger;

pub use api::ReviewBackend;
pub use config::ClientConfig;
pub use desk::{InFlight, ReferenceData, ReviewDesk, TransitionOutcome};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
