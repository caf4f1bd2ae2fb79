//! Track and screen forwarding rules.

use clevertap_core::message::{ScreenMessage, TrackMessage};

use crate::charge::map_charged_event;
use crate::request::SdkRequest;

/// Track event name recorded as a charged event instead of a custom event.
pub const ORDER_COMPLETED: &str = "Order Completed";

pub fn screen_event_name(screen: &str) -> String {
    format!("Screen Viewed: {screen}")
}

/// Route a track call. "Order Completed" becomes a charged event, or
/// nothing at all when it carries no properties; every other event is
/// forwarded verbatim.
pub fn route_track(track: &TrackMessage) -> Option<SdkRequest> {
    if track.event == ORDER_COMPLETED {
        return track
            .properties
            .as_ref()
            .map(|props| SdkRequest::RecordCharged(map_charged_event(props)));
    }
    Some(SdkRequest::RecordEvent {
        name: track.event.clone(),
        properties: track.properties.clone(),
    })
}

pub fn route_screen(screen: &ScreenMessage) -> SdkRequest {
    SdkRequest::RecordEvent {
        name: screen_event_name(&screen.name),
        properties: screen.properties.clone(),
    }
}
