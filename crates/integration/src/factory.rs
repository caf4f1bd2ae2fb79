//! Integration factory: the process-wide entry point the host registers to
//! build CleverTap integrations.

use std::sync::Arc;

use clevertap_core::{EngagementSdk, HostConfig};
use tracing::debug;

use crate::integration::{CleverTapIntegration, Integration};

/// Key the host uses to match this factory to its server-side destination.
pub const FACTORY_KEY: &str = "CleverTap";

pub trait IntegrationFactory: Send + Sync {
    fn key(&self) -> &'static str;

    fn initiate(
        &self,
        config: &serde_json::Value,
        host: &HostConfig,
        sdk: Arc<dyn EngagementSdk>,
    ) -> Box<dyn Integration>;
}

/// Stateless factory. Only the shared [`CleverTapFactory::instance`] exists.
#[derive(Debug)]
pub struct CleverTapFactory {
    _private: (),
}

static INSTANCE: CleverTapFactory = CleverTapFactory { _private: () };

impl CleverTapFactory {
    pub fn instance() -> &'static CleverTapFactory {
        &INSTANCE
    }
}

impl IntegrationFactory for CleverTapFactory {
    fn key(&self) -> &'static str {
        FACTORY_KEY
    }

    fn initiate(
        &self,
        config: &serde_json::Value,
        host: &HostConfig,
        sdk: Arc<dyn EngagementSdk>,
    ) -> Box<dyn Integration> {
        debug!(key = FACTORY_KEY, "Creating integration");
        Box::new(CleverTapIntegration::new(config, host, sdk))
    }
}
