//! Lifecycle adapter: one-time SDK configuration and execution of
//! translated requests.
//!
//! The adapter is either unconfigured (inert: every request is logged and
//! dropped) or configured with a live SDK handle. Configuration happens once;
//! reconfiguring means building a new adapter.

use std::sync::Arc;

use clevertap_core::config::Credentials;
use clevertap_core::{
    DestinationConfig, EngagementSdk, HostConfig, HostLogLevel, InboundEvent, PropertyMap,
    SdkLogLevel,
};
use clevertap_mapping::{translate, SdkRequest, TraitFilter};
use tracing::{debug, info, warn};

enum LifecycleState {
    Unconfigured,
    Configured {
        sdk: Arc<dyn EngagementSdk>,
        filter: TraitFilter,
    },
}

pub struct LifecycleAdapter {
    state: LifecycleState,
}

impl LifecycleAdapter {
    /// An adapter that never calls the SDK.
    pub fn unconfigured() -> Self {
        Self {
            state: LifecycleState::Unconfigured,
        }
    }

    /// Configure the SDK from destination settings.
    ///
    /// Missing credentials are logged once at warn level and leave the
    /// adapter unconfigured without touching the SDK. Otherwise the SDK
    /// receives, in order: credentials, the application-launch notification,
    /// and the debug level derived from the host's log level.
    pub fn configure(
        config: &DestinationConfig,
        host: &HostConfig,
        sdk: Arc<dyn EngagementSdk>,
    ) -> Self {
        let credentials = match config.credentials() {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!(error = %e, "Failed to initialize CleverTap, integration disabled");
                return Self::unconfigured();
            }
        };

        apply_credentials(sdk.as_ref(), &credentials);
        sdk.notify_application_launched();
        let level = sdk_log_level(host.log_level);
        sdk.set_debug_level(level);

        let filter = if config.legacy_trait_filter {
            TraitFilter::ScalarOnly
        } else {
            TraitFilter::Raw
        };

        info!(
            account_id = %credentials.account_id,
            region = credentials.region.as_deref().unwrap_or("default"),
            sdk_log_level = ?level,
            trait_filter = ?filter,
            "Initialized CleverTap SDK"
        );

        Self {
            state: LifecycleState::Configured { sdk, filter },
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.state, LifecycleState::Configured { .. })
    }

    /// Translate an inbound event and forward the result to the SDK.
    pub fn forward(&self, event: &InboundEvent) {
        let LifecycleState::Configured { sdk, filter } = &self.state else {
            debug!("CleverTap not configured, dropping event");
            return;
        };

        match translate(event, *filter) {
            Some(request) => {
                debug!(operation = request.operation(), "forwarding to CleverTap");
                execute(sdk.as_ref(), &request);
            }
            None => debug!("event produced no CleverTap call"),
        }
    }

    pub fn register_push_token(&self, device_token: &[u8]) {
        debug!("registering for remote notifications");
        self.forward(&InboundEvent::PushRegistration {
            device_token: device_token.to_vec(),
        });
    }

    pub fn received_remote_notification(&self, user_info: &PropertyMap) {
        debug!("received remote notification");
        self.forward(&InboundEvent::PushReceived {
            user_info: user_info.clone(),
        });
    }

    pub fn handle_notification_action(&self, identifier: &str, user_info: &PropertyMap) {
        debug!(identifier, "handling action with identifier");
        self.forward(&InboundEvent::PushReceived {
            user_info: user_info.clone(),
        });
    }
}

/// Map the host's log level onto the SDK's three levels.
pub fn sdk_log_level(host: HostLogLevel) -> SdkLogLevel {
    match host {
        HostLogLevel::Debug => SdkLogLevel::Debug,
        HostLogLevel::None => SdkLogLevel::Off,
        _ => SdkLogLevel::Info,
    }
}

fn apply_credentials(sdk: &dyn EngagementSdk, credentials: &Credentials) {
    sdk.set_credentials(
        &credentials.account_id,
        &credentials.account_token,
        credentials.region.as_deref(),
    );
}

fn execute(sdk: &dyn EngagementSdk, request: &SdkRequest) {
    match request {
        SdkRequest::UserLogin(profile) => sdk.on_user_login(profile),
        SdkRequest::RecordEvent { name, properties } => {
            sdk.record_event(name, properties.as_ref())
        }
        SdkRequest::RecordCharged(charge) => {
            sdk.record_charged_event(&charge.details, &charge.items)
        }
        SdkRequest::SetPushToken(token) => sdk.set_push_token(token),
        SdkRequest::HandleNotification(data) => sdk.handle_notification(data),
    }
}
