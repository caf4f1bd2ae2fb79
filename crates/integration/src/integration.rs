//! Integration-factory shim: the host hands every message to `dump`, and
//! the integration dispatches on the message type.

use std::sync::Arc;

use clevertap_core::{DestinationConfig, EngagementSdk, HostConfig, HostMessage, PropertyMap};
use tracing::{debug, warn};

use crate::lifecycle::LifecycleAdapter;

/// Surface the host client drives on every factory-built integration.
pub trait Integration: Send + Sync {
    /// Process one host message.
    fn dump(&self, message: HostMessage);

    fn reset(&self);

    fn flush(&self);

    fn registered_for_remote_notifications(&self, _device_token: &[u8]) {}

    fn received_remote_notification(&self, _user_info: &PropertyMap) {}

    fn handle_action(&self, _identifier: &str, _user_info: &PropertyMap) {}
}

pub struct CleverTapIntegration {
    lifecycle: LifecycleAdapter,
}

impl CleverTapIntegration {
    /// Build from the host's raw destination config. A config that does not
    /// deserialize is treated like missing credentials.
    pub fn new(config: &serde_json::Value, host: &HostConfig, sdk: Arc<dyn EngagementSdk>) -> Self {
        let lifecycle = match DestinationConfig::from_json(config) {
            Ok(config) => LifecycleAdapter::configure(&config, host, sdk),
            Err(e) => {
                warn!(error = %e, "Failed to initialize CleverTap, integration disabled");
                LifecycleAdapter::unconfigured()
            }
        };
        Self { lifecycle }
    }

    pub fn is_configured(&self) -> bool {
        self.lifecycle.is_configured()
    }
}

impl Integration for CleverTapIntegration {
    fn dump(&self, message: HostMessage) {
        if message.kind().is_none() {
            debug!(
                message_type = %message.message_type,
                "CleverTap integration: message type not supported"
            );
            return;
        }
        if let Some(event) = message.into_event() {
            self.lifecycle.forward(&event);
        }
    }

    fn reset(&self) {
        debug!("CleverTap reset: no integration state to clear");
    }

    fn flush(&self) {}

    fn registered_for_remote_notifications(&self, device_token: &[u8]) {
        self.lifecycle.register_push_token(device_token);
    }

    fn received_remote_notification(&self, user_info: &PropertyMap) {
        self.lifecycle.received_remote_notification(user_info);
    }

    fn handle_action(&self, identifier: &str, user_info: &PropertyMap) {
        self.lifecycle.handle_notification_action(identifier, user_info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clevertap_core::sdk::recording_sdk;
    use clevertap_core::{property_map, SdkCall};
    use serde_json::json;

    fn configured() -> (Arc<clevertap_core::RecordingSdk>, CleverTapIntegration) {
        let sdk = recording_sdk();
        let integration = CleverTapIntegration::new(
            &json!({"accountId": "ACC-1", "accountToken": "tok", "region": "none"}),
            &HostConfig::default(),
            sdk.clone(),
        );
        sdk.clear();
        (sdk, integration)
    }

    #[test]
    fn test_dump_dispatches_by_type() {
        let (sdk, integration) = configured();
        let message: HostMessage = serde_json::from_value(json!({
            "type": "track",
            "event": "Product Viewed",
            "properties": {"sku": "S1"}
        }))
        .unwrap();

        integration.dump(message);

        assert_eq!(
            sdk.calls(),
            vec![SdkCall::RecordEvent {
                name: "Product Viewed".into(),
                properties: property_map(json!({"sku": "S1"})),
            }]
        );
    }

    #[test]
    fn test_unsupported_type_is_ignored() {
        let (sdk, integration) = configured();
        integration.dump(HostMessage {
            message_type: "group".into(),
            ..Default::default()
        });
        assert_eq!(sdk.count(), 0);
    }

    #[test]
    fn test_malformed_config_is_inert() {
        let sdk = recording_sdk();
        let integration = CleverTapIntegration::new(
            &json!(["not", "a", "map"]),
            &HostConfig::default(),
            sdk.clone(),
        );
        assert!(!integration.is_configured());
        integration.dump(HostMessage {
            message_type: "screen".into(),
            event: Some("Home".into()),
            ..Default::default()
        });
        assert_eq!(sdk.count(), 0);
    }

    #[test]
    fn test_mistyped_region_still_configures() {
        let sdk = recording_sdk();
        let integration = CleverTapIntegration::new(
            &json!({"accountId": "ACC-1", "accountToken": "tok", "region": 1}),
            &HostConfig::default(),
            sdk.clone(),
        );

        assert!(integration.is_configured());
        assert_eq!(
            sdk.calls()[0],
            SdkCall::SetCredentials {
                account_id: "ACC-1".into(),
                token: "tok".into(),
                region: None,
            }
        );
    }

    #[test]
    fn test_reset_and_flush_make_no_calls() {
        let (sdk, integration) = configured();
        integration.reset();
        integration.flush();
        assert_eq!(sdk.count(), 0);
    }
}
