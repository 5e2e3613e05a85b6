use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::RemoteError;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    pub name: String,
    pub link: String,
    pub media_type: MediaType,
    #[serde(default, deserialize_with = "null_as_false")]
    pub default_source: bool,
    /// Set by the server only.
    #[serde(
        default,
        deserialize_with = "null_as_false",
        skip_serializing_if = "is_false"
    )]
    pub currently_playing: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

// the server reports unset flags as null
fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl MediaSource {
    /// Builds a new, non-default source ready to be registered with the server.
    pub fn new<N: Into<String>, L: Into<String>>(
        name: N,
        link: L,
        media_type: MediaType,
    ) -> Result<Self, RemoteError> {
        let name = name.into();
        let link = link.into();
        if name.trim().is_empty() {
            return Err(RemoteError::InvalidMediaSource("name is empty".into()));
        }
        if link.trim().is_empty() {
            return Err(RemoteError::InvalidMediaSource("link is empty".into()));
        }
        Ok(MediaSource {
            name,
            link,
            media_type,
            default_source: false,
            currently_playing: false,
        })
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Stream,
    #[serde(alias = "Radio")]
    Radio,
    #[serde(alias = "YouTube")]
    YouTube,
}

impl MediaType {
    pub const ALL: [MediaType; 3] = [MediaType::Stream, MediaType::Radio, MediaType::YouTube];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Stream => "stream",
            MediaType::Radio => "radio",
            MediaType::YouTube => "youtube",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = RemoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MediaType::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| RemoteError::UnknownMediaType(s.to_string()))
    }
}
