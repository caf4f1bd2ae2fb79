//! Single entry point from an inbound event to the SDK request it produces.

use clevertap_core::message::IdentifyMessage;
use clevertap_core::{InboundEvent, PropertyMap};

use crate::charge::ChargedEvent;
use crate::events::{route_screen, route_track};
use crate::profile::map_profile;
use crate::sanitize::sanitize;

/// How identify traits are prepared before profile mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraitFilter {
    /// Map traits as received, flattening `address` and `company`.
    #[default]
    Raw,
    /// Drop every non-scalar trait first. Nested traits never reach the
    /// profile mapper.
    ScalarOnly,
}

/// An outbound call to the engagement SDK, fully translated.
#[derive(Debug, Clone, PartialEq)]
pub enum SdkRequest {
    UserLogin(PropertyMap),
    RecordEvent {
        name: String,
        properties: Option<PropertyMap>,
    },
    RecordCharged(ChargedEvent),
    SetPushToken(Vec<u8>),
    HandleNotification(PropertyMap),
}

impl SdkRequest {
    /// Operation name, used in log fields.
    pub fn operation(&self) -> &'static str {
        match self {
            SdkRequest::UserLogin(_) => "on_user_login",
            SdkRequest::RecordEvent { .. } => "record_event",
            SdkRequest::RecordCharged(_) => "record_charged_event",
            SdkRequest::SetPushToken(_) => "set_push_token",
            SdkRequest::HandleNotification(_) => "handle_notification",
        }
    }
}

/// Translate one inbound event. `None` means the event produces no SDK call.
pub fn translate(event: &InboundEvent, filter: TraitFilter) -> Option<SdkRequest> {
    match event {
        InboundEvent::Identify(identify) => Some(SdkRequest::UserLogin(identify_profile(
            identify, filter,
        ))),
        InboundEvent::Track(track) => route_track(track),
        InboundEvent::Screen(screen) => Some(route_screen(screen)),
        InboundEvent::PushRegistration { device_token } => {
            Some(SdkRequest::SetPushToken(device_token.clone()))
        }
        InboundEvent::PushReceived { user_info } => {
            Some(SdkRequest::HandleNotification(user_info.clone()))
        }
    }
}

fn identify_profile(identify: &IdentifyMessage, filter: TraitFilter) -> PropertyMap {
    let user_id = identify.user_id.as_deref();
    match filter {
        TraitFilter::Raw => {
            let traits = identify.traits.clone().unwrap_or_default();
            map_profile(user_id, &traits)
        }
        TraitFilter::ScalarOnly => map_profile(user_id, &sanitize(identify.traits.as_ref())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clevertap_core::message::TrackMessage;
    use clevertap_core::{property_map, PropertyValue};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn identify(traits: serde_json::Value) -> InboundEvent {
        InboundEvent::Identify(IdentifyMessage {
            user_id: Some("u-1".into()),
            traits: property_map(traits),
        })
    }

    #[test]
    fn test_identify_raw_flattens_company() {
        let event = identify(json!({"company": {"id": "42"}, "email": "a@b.co"}));
        assert_eq!(
            translate(&event, TraitFilter::Raw),
            Some(SdkRequest::UserLogin(
                property_map(json!({"Identity": "u-1", "Email": "a@b.co", "companyId": "42"}))
                    .unwrap()
            ))
        );
    }

    #[test]
    fn test_identify_scalar_only_drops_company() {
        let event = identify(json!({"company": {"id": "42"}, "email": "a@b.co"}));
        assert_eq!(
            translate(&event, TraitFilter::ScalarOnly),
            Some(SdkRequest::UserLogin(
                property_map(json!({"Identity": "u-1", "Email": "a@b.co"})).unwrap()
            ))
        );
    }

    #[test]
    fn test_identify_without_traits_still_logs_in() {
        let event = InboundEvent::Identify(IdentifyMessage {
            user_id: Some("u-2".into()),
            traits: None,
        });
        let Some(SdkRequest::UserLogin(profile)) = translate(&event, TraitFilter::Raw) else {
            panic!("expected a user login");
        };
        assert_eq!(profile.len(), 1);
        assert_eq!(profile["Identity"], PropertyValue::from("u-2"));
    }

    #[test]
    fn test_push_events_pass_through() {
        let token = InboundEvent::PushRegistration {
            device_token: vec![1, 2, 3],
        };
        assert_eq!(
            translate(&token, TraitFilter::Raw),
            Some(SdkRequest::SetPushToken(vec![1, 2, 3]))
        );

        let user_info = property_map(json!({"wzrk_id": "abc", "aps": {"alert": "hi"}})).unwrap();
        let received = InboundEvent::PushReceived {
            user_info: user_info.clone(),
        };
        assert_eq!(
            translate(&received, TraitFilter::Raw),
            Some(SdkRequest::HandleNotification(user_info))
        );
    }

    #[test]
    fn test_operation_names() {
        let track = InboundEvent::Track(TrackMessage {
            event: "Viewed".into(),
            properties: None,
        });
        assert_eq!(
            translate(&track, TraitFilter::Raw).map(|r| r.operation()),
            Some("record_event")
        );
    }
}
