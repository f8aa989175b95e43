//! Custom Axum extractors.
//!
//! - `CorrelationId`: the request's correlation id
//! - `ClientIp`: client address from proxy headers or the connection
//! - `BearerToken`: the token from `Authorization: Bearer <token>`
//! - `AppJson`, `AppPath`, `AppMultipart`: axum's body and path extractors
//!   with their rejections turned into [`AppError`]

use crate::error::AppError;
use crate::middleware::CORRELATION_ID_HEADER;
use axum::{
    Json, async_trait,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Multipart, Path, Request},
    http::{HeaderMap, header, request::Parts},
};
use party_rsvp_auth::AuthError;
use serde::de::DeserializeOwned;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Prefers the id stored by the correlation middleware, then the
/// `X-Correlation-ID` header, and otherwise generates a UUID v4.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let correlation_id = parts
            .extensions
            .get::<Uuid>()
            .copied()
            .or_else(|| parse_correlation_header(&parts.headers))
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

pub(crate) fn parse_correlation_header(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
}

/// Client IP address.
///
/// # Priority
///
/// 1. `X-Forwarded-For` (first IP in the list)
/// 2. `X-Real-IP`
/// 3. Connection address, when the server was started with connect info
/// 4. `127.0.0.1`
#[derive(Debug, Clone, Copy)]
pub struct ClientIp(pub IpAddr);

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = extract_client_ip(&parts.headers, parts.extensions.get());

        Ok(Self(ip))
    }
}

fn extract_client_ip(headers: &HeaderMap, connect_info: Option<&ConnectInfo<SocketAddr>>) -> IpAddr {
    let header_ip = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
    };

    header_ip("X-Forwarded-For")
        .or_else(|| header_ip("X-Real-IP"))
        .or_else(|| connect_info.map(|ConnectInfo(addr)| addr.ip()))
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

/// Bearer token extracted from the `Authorization` header.
///
/// Rejects with 401 when the header is absent or not a bearer credential.
/// The token itself is not validated here.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::MalformedToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MalformedToken)?;

        Ok(Self(token.to_string()))
    }
}

/// JSON request body.
///
/// A body that is not JSON, or whose fields are missing or of the wrong
/// type, is answered with a 400 `VALIDATION_ERROR`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Path parameters; an unparsable segment is a 400 `VALIDATION_ERROR`.
#[derive(Debug, Clone, Copy)]
pub struct AppPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Multipart upload; a request that is not `multipart/form-data` is a 400.
pub struct AppMultipart(pub Multipart);

#[async_trait]
impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(Multipart::from_request(req, state).await?))
    }
}
