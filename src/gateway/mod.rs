use async_trait::async_trait;

use crate::{
    error::GatewayError,
    post::{NewPost, Post, PostId, VoteChanges, VoteColumn},
};

pub mod memory;
pub mod rest;

pub use memory::MemoryGateway;
pub use rest::RestGateway;

/// Row cap for every listing.
pub const FETCH_LIMIT: usize = 100;

/// A listing request. Sorting is always descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    /// `None` lists every category.
    pub category: Option<String>,
    /// `None` keeps the backend's default order.
    pub sort: Option<VoteColumn>,
    pub limit: usize,
}

/// The remote "posts" collection.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn fetch_posts(&self, query: &PostQuery) -> Result<Vec<Post>, GatewayError>;

    /// Creates a row. The backend assigns id, timestamp and zeroed counters.
    async fn insert_post(&self, post: &NewPost) -> Result<Post, GatewayError>;

    /// Writes the given columns and returns the full updated row.
    async fn update_votes(&self, id: &PostId, changes: &VoteChanges)
        -> Result<Post, GatewayError>;
}
