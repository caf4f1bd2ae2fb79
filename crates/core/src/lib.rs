//! Shared types for the CleverTap destination: property values, host
//! messages, destination configuration, and the engagement SDK surface the
//! integration forwards into.

pub mod config;
pub mod error;
pub mod message;
pub mod sdk;
pub mod value;

pub use config::{DestinationConfig, HostConfig, HostLogLevel, Region, SdkLogLevel};
pub use error::{IntegrationError, IntegrationResult};
pub use message::{HostMessage, InboundEvent, MessageType};
pub use sdk::{EngagementSdk, RecordingSdk, SdkCall};
pub use value::{property_map, PropertyMap, PropertyValue};
