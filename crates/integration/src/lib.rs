//! CleverTap destination for the analytics client.
//!
//! Two host-facing shims share one lifecycle adapter and one translation
//! path:
//!
//! - [`destination`]: plugin with typed identify/track/screen hooks,
//!   configured from the server config on the initial update
//! - [`factory`] / [`integration`]: singleton factory building an
//!   integration that receives raw host messages through `dump`
//! - [`lifecycle`]: credentials, region, log level and request execution

pub mod destination;
pub mod factory;
pub mod integration;
pub mod lifecycle;

pub use destination::{CleverTapDestination, DestinationPlugin, PushNotifications, UpdateType};
pub use factory::{CleverTapFactory, IntegrationFactory};
pub use integration::{CleverTapIntegration, Integration};
pub use lifecycle::LifecycleAdapter;
