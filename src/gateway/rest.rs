use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::{
    error::GatewayError,
    post::{NewPost, Post, PostId, VoteChanges, VoteColumn},
};

use super::{Gateway, PostQuery, FETCH_LIMIT};

/// Asks PostgREST for a single JSON object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// PostgREST client for one table.
pub struct RestGateway {
    base: String,
    key: String,
    table: String,
    client: Client,
}

pub struct SelectPosts<'a> {
    gateway: &'a RestGateway,
    category: Option<&'a str>,
    order: Option<VoteColumn>,
    limit: usize,
}

#[derive(Deserialize)]
struct RestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: String,
}

impl RestGateway {
    pub fn new(url: &str, key: String, table: String) -> Self {
        Self {
            base: url.trim_end_matches('/').to_owned(),
            key,
            table,
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base, self.table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", &self.key).bearer_auth(&self.key)
    }

    fn single_row(request: RequestBuilder) -> RequestBuilder {
        request
            .header("Prefer", "return=representation")
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT)
    }

    pub fn select(&self) -> SelectPosts<'_> {
        SelectPosts {
            gateway: self,
            category: None,
            order: None,
            limit: FETCH_LIMIT,
        }
    }

    pub async fn insert(&self, post: &NewPost) -> Result<Post, GatewayError> {
        let request = self.client.post(self.endpoint()).json(&[post]);
        let res = Self::single_row(self.authorized(request)).send().await?;

        read(res).await
    }

    pub async fn update(&self, id: &PostId, changes: &VoteChanges) -> Result<Post, GatewayError> {
        let request = self
            .client
            .patch(self.endpoint())
            .query(&[("id", format!("eq.{id}"))])
            .json(changes);
        let res = Self::single_row(self.authorized(request)).send().await?;

        read(res).await
    }
}

impl<'a> SelectPosts<'a> {
    pub fn category(mut self, category: Option<&'a str>) -> Self {
        self.category = category;
        self
    }

    pub fn order_desc(mut self, column: Option<VoteColumn>) -> Self {
        self.order = column;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("select", "*".to_owned())];
        if let Some(category) = self.category {
            pairs.push(("category", format!("eq.{category}")));
        }
        if let Some(column) = self.order {
            pairs.push(("order", format!("{column}.desc")));
        }
        pairs.push(("limit", self.limit.to_string()));

        pairs
    }

    pub async fn send(self) -> Result<Vec<Post>, GatewayError> {
        let request = self
            .gateway
            .client
            .get(self.gateway.endpoint())
            .query(&self.query_pairs());
        let res = self.gateway.authorized(request).send().await?;

        read(res).await
    }
}

async fn read<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, GatewayError> {
    let status = res.status();
    let body = res.text().await?;
    debug!(%status, bytes = body.len(), "backend responded");

    decode(status, &body)
}

fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, GatewayError> {
    if status.is_success() {
        return Ok(serde_json::from_str(body)?);
    }

    Err(match serde_json::from_str::<RestError>(body) {
        Ok(RestError { code, message }) => GatewayError::Server {
            code: code.unwrap_or_else(|| status.as_str().to_owned()),
            message,
        },
        Err(_) => GatewayError::Server {
            code: status.as_str().to_owned(),
            message: body.to_owned(),
        },
    })
}

#[async_trait]
impl Gateway for RestGateway {
    async fn fetch_posts(&self, query: &PostQuery) -> Result<Vec<Post>, GatewayError> {
        self.select()
            .category(query.category.as_deref())
            .order_desc(query.sort)
            .limit(query.limit)
            .send()
            .await
    }

    async fn insert_post(&self, post: &NewPost) -> Result<Post, GatewayError> {
        self.insert(post).await
    }

    async fn update_votes(
        &self,
        id: &PostId,
        changes: &VoteChanges,
    ) -> Result<Post, GatewayError> {
        self.update(id, changes).await
    }
}
