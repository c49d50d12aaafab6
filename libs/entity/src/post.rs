use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, PartialEq, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// A post that has not been stored yet, with a freshly generated id.
    pub fn new(title: String, content: String) -> Self {
        Self {
            id: PostId::generate(),
            title,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Opaque post identifier, written as a hyphenated UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(Uuid);

impl PostId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for PostId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
