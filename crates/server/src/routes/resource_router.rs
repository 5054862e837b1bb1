use axum::{
    Json, Router,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query},
    routing::{MethodRouter, get},
};
use serde_json::Value;

use crate::{
    error::AppError,
    response::{ApiResponse, ApiResult},
    services::{ListQuery, ResourceService, WriteMode},
};

const INVALID_PAYLOAD_MESSAGE: &str = "Invalid payload";
const INVALID_QUERY_MESSAGE: &str = "Invalid query";

/// List/create on `{base}` and retrieve/replace/patch/delete on `{base}/{id}`,
/// each reachable with and without the trailing slash.
#[derive(Clone)]
pub struct ResourceRouter<S: ResourceService> {
    service: S,
    base_path: String,
}

impl<S: ResourceService> ResourceRouter<S> {
    pub fn new(service: S, base_path: impl Into<String>) -> Self {
        Self {
            service,
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn router<T>(&self) -> Router<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let base = self.base_path.as_str();
        let id_path = format!("{base}/{{id}}");
        let collection = self.collection_routes();
        let member = self.member_routes();

        Router::new()
            .route(base, collection.clone())
            .route(&format!("{base}/"), collection)
            .route(&id_path, member.clone())
            .route(&format!("{id_path}/"), member)
    }

    fn collection_routes<T>(&self) -> MethodRouter<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        get({
            let service = self.service.clone();
            move |query: Result<Query<ListQuery>, QueryRejection>| async move {
                let Query(query) = query.map_err(|err| {
                    AppError::bad_request(format!("{INVALID_QUERY_MESSAGE}: {err}"))
                })?;
                let rows = service.list(query).await?;
                ApiResponse::ok(rows)
            }
        })
        .post({
            let service = self.service.clone();
            move |body: Result<Json<Value>, JsonRejection>| async move {
                let body = parse_body(body)?;
                let created = service.create_from(body).await?;
                ApiResponse::created(created)
            }
        })
    }

    fn member_routes<T>(&self) -> MethodRouter<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        get({
            let service = self.service.clone();
            move |id: Result<Path<i32>, PathRejection>| async move {
                let id = parse_id(id, &service)?;
                ApiResponse::ok(service.retrieve(id).await?)
            }
        })
        .put({
            let service = self.service.clone();
            move |id: Result<Path<i32>, PathRejection>,
                  body: Result<Json<Value>, JsonRejection>| async move {
                write(&service, id, body, WriteMode::Replace).await
            }
        })
        .patch({
            let service = self.service.clone();
            move |id: Result<Path<i32>, PathRejection>,
                  body: Result<Json<Value>, JsonRejection>| async move {
                write(&service, id, body, WriteMode::Patch).await
            }
        })
        .delete({
            let service = self.service.clone();
            move |id: Result<Path<i32>, PathRejection>| async move {
                let id = parse_id(id, &service)?;
                service.remove(id).await?;
                ApiResponse::no_content()
            }
        })
    }
}

async fn write<S: ResourceService>(
    service: &S,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
    mode: WriteMode,
) -> ApiResult<S::Output> {
    let id = parse_id(id, service)?;
    let body = parse_body(body)?;
    ApiResponse::ok(service.update_from(id, body, mode).await?)
}

/// Ids that do not parse as integers can never match a row.
fn parse_id<S: ResourceService>(
    id: Result<Path<i32>, PathRejection>,
    service: &S,
) -> Result<i32, AppError> {
    id.map(|Path(id)| id)
        .map_err(|_| AppError::not_found(service.errors().not_found))
}

fn parse_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(value)| value).map_err(|err| {
        AppError::bad_request(format!("{INVALID_PAYLOAD_MESSAGE}: {}", err.body_text()))
    })
}
