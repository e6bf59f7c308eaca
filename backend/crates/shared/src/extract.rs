//! Axum extractors that run [`Validate`] schemas before a handler sees
//! the input. All rejections are [`AppError`]s rendered as problem details.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::app_error::AppError;
use crate::id::Id;
use crate::validation::Validate;

/// JSON body validated against `T::schema()`.
#[derive(Debug, Clone)]
pub struct Valid<T>(pub T);

impl<S, T> FromRequest<S> for Valid<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request("El cuerpo de la solicitud no es JSON válido")
                    .with_source(rejection)
            })?;

        T::validate(value).map(Valid).map_err(AppError::from)
    }
}

/// JSON array body; every element is validated against `T::schema()`.
#[derive(Debug, Clone)]
pub struct ValidList<T>(pub Vec<T>);

impl<S, T> FromRequest<S> for ValidList<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request("El cuerpo de la solicitud no es JSON válido")
                    .with_source(rejection)
            })?;

        T::schema().parse_list(value).map(ValidList).map_err(AppError::from)
    }
}

/// Query string normalized with `Schema::coerce_text`, then validated.
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request("Parámetros de consulta inválidos").with_source(rejection)
            })?;

        let value = T::schema().coerce_text(pairs);
        T::validate(value).map(ValidQuery).map_err(AppError::from)
    }
}

/// `/{id}` path segment parsed as a typed UUID.
pub struct IdPath<T>(pub Id<T>);

impl<T> IdPath<T> {
    pub fn into_inner(self) -> Id<T> {
        self.0
    }
}

impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request("Identificador inválido").with_source(rejection)
            })?;

        raw.parse::<Id<T>>()
            .map(IdPath)
            .map_err(|e| {
                AppError::bad_request("El identificador debe ser un UUID válido").with_source(e)
            })
    }
}
