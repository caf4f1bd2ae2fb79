//! The engagement SDK surface the integration forwards into.
//!
//! The native SDK is a process-wide shared instance owned by the app. The
//! integration never reaches for it directly; it receives an
//! `Arc<dyn EngagementSdk>` at construction so hosts bind the real SDK and
//! tests bind a [`RecordingSdk`].

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::config::SdkLogLevel;
use crate::value::PropertyMap;

pub trait EngagementSdk: Send + Sync {
    /// Set account credentials. `region` is `None` for the default region.
    fn set_credentials(&self, account_id: &str, token: &str, region: Option<&str>);

    fn notify_application_launched(&self);

    fn set_debug_level(&self, level: SdkLogLevel);

    /// Log in (or update) the user profile.
    fn on_user_login(&self, profile: &PropertyMap);

    fn record_event(&self, name: &str, properties: Option<&PropertyMap>);

    fn record_charged_event(&self, details: &PropertyMap, items: &[PropertyMap]);

    fn set_push_token(&self, token: &[u8]);

    fn handle_notification(&self, data: &PropertyMap);
}

/// One recorded invocation of the SDK surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum SdkCall {
    SetCredentials {
        account_id: String,
        token: String,
        region: Option<String>,
    },
    NotifyApplicationLaunched,
    SetDebugLevel {
        level: SdkLogLevel,
    },
    OnUserLogin {
        profile: PropertyMap,
    },
    RecordEvent {
        name: String,
        properties: Option<PropertyMap>,
    },
    RecordChargedEvent {
        details: PropertyMap,
        items: Vec<PropertyMap>,
    },
    SetPushToken {
        /// Device token, hex encoded.
        token: String,
    },
    HandleNotification {
        data: PropertyMap,
    },
}

/// In-memory SDK that records every call, in order.
#[derive(Default)]
pub struct RecordingSdk {
    calls: Mutex<Vec<SdkCall>>,
}

impl RecordingSdk {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<SdkCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Drain recorded calls.
    pub fn take(&self) -> Vec<SdkCall> {
        std::mem::take(&mut *self.calls.lock())
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn push(&self, call: SdkCall) {
        self.calls.lock().push(call);
    }
}

impl EngagementSdk for RecordingSdk {
    fn set_credentials(&self, account_id: &str, token: &str, region: Option<&str>) {
        self.push(SdkCall::SetCredentials {
            account_id: account_id.to_string(),
            token: token.to_string(),
            region: region.map(String::from),
        });
    }

    fn notify_application_launched(&self) {
        self.push(SdkCall::NotifyApplicationLaunched);
    }

    fn set_debug_level(&self, level: SdkLogLevel) {
        self.push(SdkCall::SetDebugLevel { level });
    }

    fn on_user_login(&self, profile: &PropertyMap) {
        self.push(SdkCall::OnUserLogin {
            profile: profile.clone(),
        });
    }

    fn record_event(&self, name: &str, properties: Option<&PropertyMap>) {
        self.push(SdkCall::RecordEvent {
            name: name.to_string(),
            properties: properties.cloned(),
        });
    }

    fn record_charged_event(&self, details: &PropertyMap, items: &[PropertyMap]) {
        self.push(SdkCall::RecordChargedEvent {
            details: details.clone(),
            items: items.to_vec(),
        });
    }

    fn set_push_token(&self, token: &[u8]) {
        self.push(SdkCall::SetPushToken {
            token: hex::encode(token),
        });
    }

    fn handle_notification(&self, data: &PropertyMap) {
        self.push(SdkCall::HandleNotification { data: data.clone() });
    }
}

/// Convenience: a recording SDK for tests and dry runs.
pub fn recording_sdk() -> Arc<RecordingSdk> {
    Arc::new(RecordingSdk::new())
}
