use std::sync::Arc;

use axum::Json;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::middleware::base_url::BaseUrl;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Link {
    #[serde(rename = "rel")]
    pub relation: String,

    #[serde(rename = "href")]
    pub hypertext_reference: String,

    /// http method, if other than GET.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// A resource together with links to related resources and actions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Response<T> {
    #[serde(flatten)]
    pub content: T,
    pub links: Vec<Link>,
}

impl<T> Response<T> {
    pub fn new(content: T) -> Self {
        Self {
            content,
            links: vec![],
        }
    }

    pub fn builder(content: T, base_url: Arc<BaseUrl>) -> ResponseBuilder<T> {
        ResponseBuilder::new(content, base_url)
    }

    pub fn json(self) -> Json<Self> {
        Json(self)
    }
}

pub struct ResponseBuilder<T> {
    pub response: Response<T>,
    pub base_url: Arc<BaseUrl>,
}

impl<T> ResponseBuilder<T> {
    pub fn new(content: T, base_url: Arc<BaseUrl>) -> Self {
        Self {
            response: Response::new(content),
            base_url,
        }
    }

    pub fn link<R, H>(self, relation: R, hypertext_reference: H) -> Self
    where
        R: Into<String>,
        H: Into<String>,
    {
        self.push(relation.into(), hypertext_reference.into(), None)
    }

    /// A link to an action taken with `method` rather than GET.
    pub fn action<R, H>(self, relation: R, method: &str, hypertext_reference: H) -> Self
    where
        R: Into<String>,
        H: Into<String>,
    {
        self.push(
            relation.into(),
            hypertext_reference.into(),
            Some(method.to_owned()),
        )
    }

    fn push(mut self, relation: String, path: String, method: Option<String>) -> Self {
        self.response.links.push(Link {
            relation,
            hypertext_reference: self.base_url.full_url(path),
            method,
        });
        self
    }

    pub fn build(self) -> Response<T> {
        self.response
    }
}
