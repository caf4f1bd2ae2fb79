//! Destination-plugin shim: the host calls typed `identify`/`track`/`screen`
//! hooks and passes each message on to the next plugin.

use std::sync::Arc;

use clevertap_core::config::ServerConfig;
use clevertap_core::message::{IdentifyMessage, ScreenMessage, TrackMessage};
use clevertap_core::{
    DestinationConfig, EngagementSdk, HostConfig, InboundEvent, IntegrationResult, PropertyMap,
};
use tracing::{debug, warn};

use crate::lifecycle::LifecycleAdapter;

/// Plugin key, matched against destination display names in the server
/// config.
pub const DESTINATION_KEY: &str = "Clevertap";

/// Stage of the host's plugin chain a plugin runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginType {
    Destination,
}

/// Why the host is delivering a server config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateType {
    /// First config of the process.
    Initial,
    /// Later refresh.
    Refresh,
}

pub trait DestinationPlugin: Send + Sync {
    fn key(&self) -> &'static str;

    fn plugin_type(&self) -> PluginType;

    fn update(&mut self, server_config: &ServerConfig, update_type: UpdateType);

    /// Returning the message continues the plugin chain; `None` stops it.
    fn identify(&self, message: IdentifyMessage) -> Option<IdentifyMessage>;

    fn track(&self, message: TrackMessage) -> Option<TrackMessage>;

    fn screen(&self, message: ScreenMessage) -> Option<ScreenMessage>;

    fn reset(&self);

    fn flush(&self);
}

/// Push-notification callbacks forwarded by the host's app delegate.
pub trait PushNotifications {
    fn did_register_for_remote_notifications(&self, device_token: &[u8]);

    fn did_receive_remote_notification(&self, user_info: &PropertyMap);
}

pub struct CleverTapDestination {
    host: HostConfig,
    sdk: Arc<dyn EngagementSdk>,
    lifecycle: LifecycleAdapter,
}

impl CleverTapDestination {
    pub fn new(host: HostConfig, sdk: Arc<dyn EngagementSdk>) -> Self {
        Self {
            host,
            sdk,
            lifecycle: LifecycleAdapter::unconfigured(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.lifecycle.is_configured()
    }

    fn destination_config(server_config: &ServerConfig) -> IntegrationResult<DestinationConfig> {
        let destination = server_config.destination(DESTINATION_KEY)?;
        DestinationConfig::from_json(&destination.config)
    }

    fn forward(&self, event: InboundEvent) {
        self.lifecycle.forward(&event);
    }
}

impl DestinationPlugin for CleverTapDestination {
    fn key(&self) -> &'static str {
        DESTINATION_KEY
    }

    fn plugin_type(&self) -> PluginType {
        PluginType::Destination
    }

    /// Configure on the initial server config only. Once configured, the
    /// SDK credentials are fixed for the life of the plugin.
    fn update(&mut self, server_config: &ServerConfig, update_type: UpdateType) {
        if update_type != UpdateType::Initial || self.lifecycle.is_configured() {
            debug!(?update_type, "ignoring CleverTap server config update");
            return;
        }

        match Self::destination_config(server_config) {
            Ok(config) => {
                self.lifecycle = LifecycleAdapter::configure(&config, &self.host, self.sdk.clone());
            }
            Err(e) => {
                warn!(error = %e, "Failed to initialize CleverTap, integration disabled");
            }
        }
    }

    fn identify(&self, message: IdentifyMessage) -> Option<IdentifyMessage> {
        self.forward(InboundEvent::Identify(message.clone()));
        Some(message)
    }

    fn track(&self, message: TrackMessage) -> Option<TrackMessage> {
        self.forward(InboundEvent::Track(message.clone()));
        Some(message)
    }

    fn screen(&self, message: ScreenMessage) -> Option<ScreenMessage> {
        self.forward(InboundEvent::Screen(message.clone()));
        Some(message)
    }

    fn reset(&self) {
        debug!("CleverTap reset: no destination state to clear");
    }

    fn flush(&self) {}
}

impl PushNotifications for CleverTapDestination {
    fn did_register_for_remote_notifications(&self, device_token: &[u8]) {
        self.lifecycle.register_push_token(device_token);
    }

    fn did_receive_remote_notification(&self, user_info: &PropertyMap) {
        self.lifecycle.received_remote_notification(user_info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clevertap_core::sdk::recording_sdk;
    use clevertap_core::{property_map, RecordingSdk, SdkCall};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn server_config(config: serde_json::Value) -> ServerConfig {
        serde_json::from_value(json!({
            "destinations": [{"displayName": "CleverTap", "config": config}]
        }))
        .unwrap()
    }

    fn configured() -> (Arc<RecordingSdk>, CleverTapDestination) {
        let sdk = recording_sdk();
        let mut destination = CleverTapDestination::new(HostConfig::default(), sdk.clone());
        destination.update(
            &server_config(json!({"accountId": "ACC-1", "accountToken": "tok"})),
            UpdateType::Initial,
        );
        sdk.clear();
        (sdk, destination)
    }

    #[test]
    fn test_events_before_update_are_dropped() {
        let sdk = recording_sdk();
        let destination = CleverTapDestination::new(HostConfig::default(), sdk.clone());
        let message = TrackMessage {
            event: "Viewed".into(),
            properties: None,
        };

        assert_eq!(destination.track(message.clone()), Some(message));
        assert_eq!(sdk.count(), 0);
    }

    #[test]
    fn test_only_initial_update_configures() {
        let sdk = recording_sdk();
        let mut destination = CleverTapDestination::new(HostConfig::default(), sdk.clone());
        let config = server_config(json!({"accountId": "ACC-1", "accountToken": "tok"}));

        destination.update(&config, UpdateType::Refresh);
        assert!(!destination.is_configured());

        destination.update(&config, UpdateType::Initial);
        assert!(destination.is_configured());
        assert_eq!(sdk.count(), 3);

        destination.update(&config, UpdateType::Initial);
        assert_eq!(sdk.count(), 3);
    }

    #[test]
    fn test_missing_destination_entry_stays_unconfigured() {
        let sdk = recording_sdk();
        let mut destination = CleverTapDestination::new(HostConfig::default(), sdk.clone());
        destination.update(&ServerConfig::default(), UpdateType::Initial);
        assert!(!destination.is_configured());
        assert_eq!(sdk.count(), 0);
    }

    #[test]
    fn test_identify_returns_message_unchanged() {
        let (sdk, destination) = configured();
        let message = IdentifyMessage {
            user_id: Some("u-1".into()),
            traits: property_map(json!({"email": "a@b.co", "address": {"city": "Pune"}})),
        };

        assert_eq!(destination.identify(message.clone()), Some(message));
        assert_eq!(
            sdk.calls(),
            vec![SdkCall::OnUserLogin {
                profile: property_map(json!({
                    "Identity": "u-1",
                    "Email": "a@b.co",
                    "city": "Pune"
                }))
                .unwrap()
            }]
        );
    }

    #[test]
    fn test_screen_and_push() {
        let (sdk, destination) = configured();
        destination.screen(ScreenMessage {
            name: "Cart".into(),
            properties: None,
        });
        destination.did_register_for_remote_notifications(&[0x01]);

        assert_eq!(
            sdk.calls(),
            vec![
                SdkCall::RecordEvent {
                    name: "Screen Viewed: Cart".into(),
                    properties: None,
                },
                SdkCall::SetPushToken { token: "01".into() },
            ]
        );
    }

    #[test]
    fn test_plugin_identity() {
        let destination = CleverTapDestination::new(HostConfig::default(), recording_sdk());
        assert_eq!(destination.key(), "Clevertap");
        assert_eq!(destination.plugin_type(), PluginType::Destination);
    }
}
