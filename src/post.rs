use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row id assigned by the store. Either a number or an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Number(i64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub text: String,
    pub source: String,
    pub category: String,
    pub created_at: DateTime<Utc>,

    #[serde(rename = "voteInteresting", default)]
    pub vote_interesting: u32,
    #[serde(rename = "voteMindblowing", default)]
    pub vote_mindblowing: u32,
    #[serde(rename = "voteFalse", default)]
    pub vote_false: u32,
}

/// One of the three independent vote counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VoteColumn {
    #[serde(rename = "voteInteresting")]
    Interesting,
    #[serde(rename = "voteMindblowing")]
    Mindblowing,
    #[serde(rename = "voteFalse")]
    False,
}

/// Fields the client provides on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub text: String,
    pub source: String,
    pub category: String,
}

/// Column -> new absolute value, sent as a partial row update.
pub type VoteChanges = BTreeMap<VoteColumn, u32>;

impl VoteColumn {
    pub const ALL: [VoteColumn; 3] = [Self::Interesting, Self::Mindblowing, Self::False];

    /// Column name on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interesting => "voteInteresting",
            Self::Mindblowing => "voteMindblowing",
            Self::False => "voteFalse",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Interesting => "Interesting",
            Self::Mindblowing => "Mindblowing",
            Self::False => "False",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Interesting => "👍",
            Self::Mindblowing => "🤯",
            Self::False => "⛔️",
        }
    }
}

impl Post {
    pub fn votes(&self, column: VoteColumn) -> u32 {
        match column {
            VoteColumn::Interesting => self.vote_interesting,
            VoteColumn::Mindblowing => self.vote_mindblowing,
            VoteColumn::False => self.vote_false,
        }
    }

    pub fn set_votes(&mut self, column: VoteColumn, value: u32) {
        match column {
            VoteColumn::Interesting => self.vote_interesting = value,
            VoteColumn::Mindblowing => self.vote_mindblowing = value,
            VoteColumn::False => self.vote_false = value,
        }
    }

    /// "False" votes strictly outnumber both other counters.
    pub fn is_disputed(&self) -> bool {
        self.vote_false > self.vote_interesting && self.vote_false > self.vote_mindblowing
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => v.fmt(f),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl fmt::Display for VoteColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
pub(crate) fn sample(id: i64, category: &str, votes: (u32, u32, u32)) -> Post {
    Post {
        id: PostId::Number(id),
        text: format!("post number {id}"),
        source: "https://example.com".to_owned(),
        category: category.to_owned(),
        created_at: DateTime::from_timestamp(1_700_000_000 + id, 0).unwrap(),
        vote_interesting: votes.0,
        vote_mindblowing: votes.1,
        vote_false: votes.2,
    }
}
