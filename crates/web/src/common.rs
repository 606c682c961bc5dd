use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, OriginalUri, Request,
    },
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    routing::MethodFilter,
    Json,
};
use drawing::DrawingError;
use logistics::RequestError;
use model::ExampleData;
use schemars::{schema_for, schema_for_value, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::hateoas;

pub type RouteResult<O> = Result<O, RouteErrorResponse>;
pub type HateoasResult<O> = RouteResult<Json<hateoas::Response<O>>>;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// A `MethodFilter` that matches all http methods.
pub(crate) const METHOD_FILTER_ALL: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// starts at 1.
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VecResponse<T> {
    pub data: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> VecResponse<T> {
    pub fn non_paginated(data: Vec<T>) -> Self {
        Self {
            data,
            pagination: None,
        }
    }

    /// Cuts page `current_page` (1 based) out of `items`. Pages past the end
    /// are empty.
    pub fn paginated(items: Vec<T>, current_page: usize, page_size: usize) -> Self {
        let current_page = current_page.max(1);
        let page_size = page_size.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(page_size);
        let data = items
            .into_iter()
            .skip((current_page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();
        Self {
            data,
            pagination: Some(Pagination {
                current_page,
                total_pages,
                total_items,
                page_size,
            }),
        }
    }

    /// Paginates only if the client asked for a page or a page size.
    pub fn maybe_paginated(
        items: Vec<T>,
        page: Option<usize>,
        page_size: Option<usize>,
    ) -> Self {
        if page.is_none() && page_size.is_none() {
            Self::non_paginated(items)
        } else {
            Self::paginated(
                items,
                page.unwrap_or(1),
                page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            )
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> VecResponse<U> {
        VecResponse {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    pub fn hateoas(self) -> hateoas::Response<Self> {
        hateoas::Response::new(self)
    }

    pub fn json(self) -> Json<Self> {
        Json(self)
    }
}

// - Extractors answering malformed input with a `RouteErrorResponse` -

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(RouteErrorResponse))]
pub struct Query<T>(pub T);

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(RouteErrorResponse))]
pub struct JsonBody<T>(pub T);

// - Services returning commonly used responses -

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SchemaParams {
    #[serde(default = "Default::default")]
    example_data: bool,
}

pub(crate) async fn schema<T: ExampleData + JsonSchema + Serialize>(
    Query(params): Query<SchemaParams>,
) -> impl IntoResponse {
    if params.example_data {
        Json(schema_for_value!(T::example_data()))
    } else {
        Json(schema_for!(T))
    }
}

pub(crate) async fn route_not_found(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    RouteErrorResponse::not_found(req.method(), original_uri.path())
}

// - Commonly used responeses -

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteErrorResponse {
    #[serde(skip)]
    pub status_code: StatusCode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RouteErrorResponse {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            http_method: None,
            requested_uri: None,
            message: None,
        }
    }

    pub fn not_found(method: &Method, uri: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND)
            .with_method(method)
            .with_uri(uri)
            .with_default_message()
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST).with_message(message)
    }

    pub fn with_method(mut self, method: &Method) -> Self {
        self.http_method = Some(method.to_string());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.requested_uri = Some(uri.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_default_message(self) -> Self {
        let message = self
            .status_code
            .canonical_reason()
            .unwrap_or("unknown error");
        self.with_message(message)
    }

    /// Fills in method and uri of the request that failed.
    pub fn at(self, method: &Method, uri: &Uri) -> Self {
        self.with_method(method).with_uri(uri.path())
    }
}

impl From<RequestError> for RouteErrorResponse {
    fn from(value: RequestError) -> Self {
        match value {
            RequestError::NotFound => Self::new(StatusCode::NOT_FOUND)
                .with_message("The requested item does not exist."),
            other => {
                log::error!("logistics request failed: {}", other);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR).with_message(other.to_string())
            }
        }
    }
}

impl From<QueryRejection> for RouteErrorResponse {
    fn from(value: QueryRejection) -> Self {
        Self::new(value.status()).with_message(value.body_text())
    }
}

impl From<JsonRejection> for RouteErrorResponse {
    fn from(value: JsonRejection) -> Self {
        Self::new(value.status()).with_message(value.body_text())
    }
}

impl From<DrawingError> for RouteErrorResponse {
    fn from(value: DrawingError) -> Self {
        Self::bad_request(value.to_string())
    }
}

impl IntoResponse for RouteErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_one_based() {
        let response = VecResponse::paginated((1..=7).collect::<Vec<_>>(), 2, 3);
        assert_eq!(response.data, vec![4, 5, 6]);
        assert_eq!(
            response.pagination,
            Some(Pagination {
                current_page: 2,
                total_pages: 3,
                total_items: 7,
                page_size: 3,
            })
        );
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let response = VecResponse::paginated(vec![1, 2], 5, 10);
        assert!(response.data.is_empty());
        assert_eq!(response.pagination.unwrap().total_pages, 1);
    }

    #[test]
    fn pagination_only_on_request() {
        assert!(VecResponse::maybe_paginated(vec![1], None, None)
            .pagination
            .is_none());
        let response = VecResponse::maybe_paginated((0..30).collect::<Vec<_>>(), None, Some(0));
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.pagination.unwrap().page_size, 1);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = RouteErrorResponse::from(RequestError::NotFound);
        assert_eq!(response.status_code, StatusCode::NOT_FOUND);
    }

    #[test]
    fn drawing_errors_are_bad_requests() {
        let response = RouteErrorResponse::from(DrawingError::NotEnoughPoints {
            required: 3,
            actual: 1,
        });
        assert_eq!(response.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(&response).unwrap()["message"],
            "at least 3 points are required, got 1"
        );
    }
}
