//! Host messages: the envelope the analytics client hands to its
//! integrations, and the typed inbound events derived from it.

use serde::{Deserialize, Serialize};

use crate::value::PropertyMap;

/// Message types the integration knows how to translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Identify,
    Track,
    Screen,
}

impl MessageType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "identify" => Some(MessageType::Identify),
            "track" => Some(MessageType::Track),
            "screen" => Some(MessageType::Screen),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Identify => "identify",
            MessageType::Track => "track",
            MessageType::Screen => "screen",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<PropertyMap>,
}

/// Wire envelope dispatched by the host client. Identify traits live under
/// `context.traits`; screen messages carry the screen name in `event`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymous_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertyMap>,
    #[serde(default)]
    pub context: MessageContext,
}

impl HostMessage {
    pub fn kind(&self) -> Option<MessageType> {
        MessageType::parse(&self.message_type)
    }

    /// Convert into a typed inbound event. Returns `None` for message types
    /// the integration does not handle.
    pub fn into_event(self) -> Option<InboundEvent> {
        let event = match self.kind()? {
            MessageType::Identify => InboundEvent::Identify(IdentifyMessage {
                user_id: self.user_id,
                traits: self.context.traits,
            }),
            MessageType::Track => InboundEvent::Track(TrackMessage {
                event: self.event.unwrap_or_default(),
                properties: self.properties,
            }),
            MessageType::Screen => InboundEvent::Screen(ScreenMessage {
                name: self.event.unwrap_or_default(),
                properties: self.properties,
            }),
        };
        Some(event)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyMessage {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub traits: Option<PropertyMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackMessage {
    pub event: String,
    #[serde(default)]
    pub properties: Option<PropertyMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenMessage {
    pub name: String,
    #[serde(default)]
    pub properties: Option<PropertyMap>,
}

/// Everything the integration can be asked to translate.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Identify(IdentifyMessage),
    Track(TrackMessage),
    Screen(ScreenMessage),
    PushRegistration { device_token: Vec<u8> },
    PushReceived { user_info: PropertyMap },
}
