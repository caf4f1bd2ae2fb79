//! Event-schema translation from host analytics calls to the engagement
//! platform's profile, event and charged-event shapes.
//!
//! Everything here is pure: each function takes a borrowed inbound value and
//! returns a freshly built outbound value. Executing the result against the
//! SDK is the integration crate's job.
//!
//! # Modules
//!
//! - [`sanitize`]: scalar-only filtering of property maps
//! - [`profile`]: identify traits to user-profile fields
//! - [`events`]: track and screen forwarding rules
//! - [`charge`]: "Order Completed" to charged event
//! - [`request`]: one entry point dispatching an inbound event to the above

pub mod charge;
pub mod events;
pub mod profile;
pub mod request;
pub mod sanitize;

pub use charge::{map_charged_event, ChargedEvent};
pub use profile::map_profile;
pub use request::{translate, SdkRequest, TraitFilter};
pub use sanitize::sanitize;
