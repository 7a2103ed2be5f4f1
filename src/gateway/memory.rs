use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::{
    error::GatewayError,
    post::{NewPost, Post, PostId, VoteChanges},
};

use super::{Gateway, PostQuery};

/// In-process stand-in for the remote table.
///
/// Rows are kept in insertion order, which is also the "default" order when a
/// query has no sort.
#[derive(Default)]
pub struct MemoryGateway {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: Vec<Post>,
    next_id: i64,
    fail_next: Option<String>,
}

impl MemoryGateway {
    pub fn with_rows(rows: Vec<Post>) -> Self {
        let next_id = rows
            .iter()
            .filter_map(|p| match p.id {
                PostId::Number(v) => Some(v),
                PostId::String(_) => None,
            })
            .max()
            .unwrap_or_default();

        Self {
            inner: Mutex::new(Inner {
                rows,
                next_id,
                fail_next: None,
            }),
        }
    }

    /// A handful of posts for `--demo`.
    pub fn with_sample_posts() -> Self {
        let now = Utc::now();
        let seed = [
            (
                "React is being developed by Meta (formerly facebook)",
                "https://opensource.fb.com/",
                "technology",
                (24, 9, 4),
                Duration::days(2),
            ),
            (
                "Millennial dads spend 3 times as much time with their kids than their fathers spent with them",
                "https://www.mother.ly/parenting/millennial-dads-spend-more-time-with-their-kids",
                "society",
                (11, 2, 0),
                Duration::hours(7),
            ),
            (
                "Lisbon is the capital of Portugal",
                "https://en.wikipedia.org/wiki/Lisbon",
                "society",
                (8, 3, 1),
                Duration::days(45),
            ),
            (
                "Octopuses have three hearts and blue blood",
                "https://ocean.si.edu/ocean-life/invertebrates/octopuses",
                "science",
                (17, 21, 2),
                Duration::minutes(12),
            ),
            (
                "The Great Wall of China is visible from the Moon",
                "https://www.nasa.gov/",
                "history",
                (2, 1, 13),
                Duration::days(400),
            ),
        ];

        let rows = seed
            .into_iter()
            .zip(1..)
            .map(|((text, source, category, votes, age), id)| Post {
                id: PostId::Number(id),
                text: text.to_owned(),
                source: source.to_owned(),
                category: category.to_owned(),
                created_at: now - age,
                vote_interesting: votes.0,
                vote_mindblowing: votes.1,
                vote_false: votes.2,
            })
            .collect();

        Self::with_rows(rows)
    }

    /// Makes the next call fail with a server error.
    #[cfg(test)]
    pub fn fail_next(&self, message: &str) {
        self.lock().fail_next = Some(message.to_owned());
    }

    #[cfg(test)]
    pub fn rows(&self) -> Vec<Post> {
        self.lock().rows.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Inner {
    fn check(&mut self) -> Result<(), GatewayError> {
        match self.fail_next.take() {
            Some(message) => Err(GatewayError::Server {
                code: "500".to_owned(),
                message,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn fetch_posts(&self, query: &PostQuery) -> Result<Vec<Post>, GatewayError> {
        let mut inner = self.lock();
        inner.check()?;

        let mut posts: Vec<Post> = inner
            .rows
            .iter()
            .filter(|p| query.category.as_deref().map_or(true, |c| p.category == c))
            .cloned()
            .collect();
        if let Some(column) = query.sort {
            posts.sort_by(|a, b| b.votes(column).cmp(&a.votes(column)));
        }
        posts.truncate(query.limit);

        Ok(posts)
    }

    async fn insert_post(&self, post: &NewPost) -> Result<Post, GatewayError> {
        let mut inner = self.lock();
        inner.check()?;

        inner.next_id += 1;
        let row = Post {
            id: PostId::Number(inner.next_id),
            text: post.text.clone(),
            source: post.source.clone(),
            category: post.category.clone(),
            created_at: Utc::now(),
            vote_interesting: 0,
            vote_mindblowing: 0,
            vote_false: 0,
        };
        inner.rows.push(row.clone());

        Ok(row)
    }

    async fn update_votes(
        &self,
        id: &PostId,
        changes: &VoteChanges,
    ) -> Result<Post, GatewayError> {
        let mut inner = self.lock();
        inner.check()?;

        let row = inner
            .rows
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| GatewayError::NotFound(id.clone()))?;
        for (column, value) in changes {
            row.set_votes(*column, *value);
        }

        Ok(row.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gateway::FETCH_LIMIT,
        post::{sample, VoteColumn},
    };

    fn query(category: Option<&str>, sort: Option<VoteColumn>) -> PostQuery {
        PostQuery {
            category: category.map(str::to_owned),
            sort,
            limit: FETCH_LIMIT,
        }
    }

    #[tokio::test]
    async fn filters_and_sorts() {
        let gateway = MemoryGateway::with_rows(vec![
            sample(1, "science", (1, 0, 5)),
            sample(2, "news", (0, 0, 9)),
            sample(3, "science", (0, 0, 7)),
        ]);

        let posts = gateway
            .fetch_posts(&query(Some("science"), Some(VoteColumn::False)))
            .await
            .unwrap();
        let ids: Vec<_> = posts.iter().map(|p| p.id.clone()).collect();

        assert_eq!(ids, vec![PostId::Number(3), PostId::Number(1)]);
    }

    #[tokio::test]
    async fn respects_limit() {
        let rows = (1..=150).map(|i| sample(i, "news", (0, 0, 0))).collect();
        let gateway = MemoryGateway::with_rows(rows);

        let posts = gateway.fetch_posts(&query(None, None)).await.unwrap();
        assert_eq!(posts.len(), FETCH_LIMIT);
    }

    #[tokio::test]
    async fn insert_assigns_id_and_zeroes_votes() {
        let gateway = MemoryGateway::with_rows(vec![sample(7, "news", (1, 1, 1))]);
        let post = gateway
            .insert_post(&NewPost {
                text: "hello".to_owned(),
                source: "https://example.com".to_owned(),
                category: "news".to_owned(),
            })
            .await
            .unwrap();

        assert_eq!(post.id, PostId::Number(8));
        assert_eq!(
            (post.vote_interesting, post.vote_mindblowing, post.vote_false),
            (0, 0, 0)
        );
        assert_eq!(gateway.rows().len(), 2);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let gateway = MemoryGateway::default();
        let err = gateway
            .update_votes(&PostId::Number(1), &VoteChanges::new())
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::NotFound(PostId::Number(1))));
    }

    #[tokio::test]
    async fn injected_failure_is_one_shot() {
        let gateway = MemoryGateway::default();
        gateway.fail_next("boom");

        assert!(gateway.fetch_posts(&query(None, None)).await.is_err());
        assert!(gateway.fetch_posts(&query(None, None)).await.is_ok());
    }

    #[test]
    fn sample_posts_use_registered_categories() {
        let gateway = MemoryGateway::with_sample_posts();
        for post in gateway.rows() {
            assert!(crate::category::find(&post.category).is_some());
        }
    }
}
