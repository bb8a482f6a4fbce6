//! Group members.
//!
//! A [`Member`] is identified by a stable [`MemberId`] (the uid assigned by
//! the auth provider). Every monetary attribution in the engine is keyed by
//! that id, so historical events keep pointing at a uid even after the member
//! has left the group.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Stable member identity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Builds an id, rejecting empty or blank values.
    pub fn new(uid: impl Into<String>) -> ResultEngine<Self> {
        let uid = uid.into();
        if uid.trim().is_empty() {
            return Err(EngineError::InvalidMember(
                "member id must not be empty".to_string(),
            ));
        }
        Ok(Self(uid))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MemberId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub uid: MemberId,
    pub name: String,
    pub photo_url: Option<String>,
}

impl Member {
    pub fn new(uid: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            photo_url: None,
        }
    }

    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }
}
