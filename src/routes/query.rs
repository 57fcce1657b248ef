//! Query-string access for the filter endpoints.
//!
//! Parameters are kept as raw pairs so multi-valued parameters survive, and
//! typed accessors reject malformed values with an error naming the
//! offending parameter. Unknown parameters are ignored by design.

use std::future::{Ready, ready};
use std::str::FromStr;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use chrono::{DateTime, NaiveDateTime};
use uuid::Uuid;

use crate::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::routes::error::ApiError;

/// Raw query parameters of one request, in wire order.
#[derive(Debug, Default, Clone)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// First value of a parameter; empty values count as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, v)| k == name && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    /// Every non-empty value of a repeated parameter.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, v)| k == name && !v.is_empty())
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn uuid(&self, name: &str) -> Result<Option<Uuid>, ApiError> {
        self.parse_with(name, |v| Uuid::parse_str(v).ok())
    }

    pub fn boolean(&self, name: &str) -> Result<Option<bool>, ApiError> {
        self.parse_with(name, |v| match v {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        })
    }

    /// Accepts RFC 3339 timestamps and the date-time form without an offset.
    pub fn datetime(&self, name: &str) -> Result<Option<NaiveDateTime>, ApiError> {
        self.parse_with(name, |v| {
            DateTime::parse_from_rfc3339(v)
                .map(|dt| dt.naive_utc())
                .ok()
                .or_else(|| NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S").ok())
        })
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>, ApiError> {
        self.parse_with(name, |v| v.parse().ok())
    }

    fn parse_with<T>(
        &self,
        name: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>, ApiError> {
        match self.get(name) {
            None => Ok(None),
            Some(raw) => parse(raw).map(Some).ok_or_else(|| ApiError::BadValue {
                parameter: name.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// `page`/`size` with defaults, capped at [`MAX_PAGE_SIZE`].
    pub fn page_request(&self) -> Result<PageRequest, ApiError> {
        let page = self.parse::<usize>("page")?.unwrap_or(0);
        let size = self
            .parse::<usize>("size")?
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        Ok(PageRequest { page, size })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page number.
    pub page: usize,
    pub size: usize,
}

impl FromRequest for QueryParams {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = serde_html_form::from_str::<Vec<(String, String)>>(req.query_string())
            .map(QueryParams)
            .map_err(|e| ApiError::BadRequest(format!("malformed query string: {e}")));
        ready(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors_reject_bad_values() {
        let params = QueryParams::from_pairs(&[("disabled", "maybe")]);
        let err = params.boolean("disabled").unwrap_err();
        assert!(matches!(err, ApiError::BadValue { parameter, .. } if parameter == "disabled"));
    }

    #[test]
    fn absent_and_empty_parameters_are_none() {
        let params = QueryParams::from_pairs(&[("text", "")]);
        assert!(params.get("text").is_none());
        assert!(params.uuid("ownerId").unwrap().is_none());
    }

    #[test]
    fn datetime_accepts_both_wire_forms() {
        let params = QueryParams::from_pairs(&[
            ("from", "2026-01-02T03:04:05Z"),
            ("till", "2026-01-02T03:04:05"),
        ]);
        assert!(params.datetime("from").unwrap().is_some());
        assert!(params.datetime("till").unwrap().is_some());
    }

    #[test]
    fn page_request_defaults_and_caps() {
        let params = QueryParams::from_pairs(&[]);
        let page = params.page_request().unwrap();
        assert_eq!(page.page, 0);
        assert_eq!(page.size, DEFAULT_PAGE_SIZE);

        let params = QueryParams::from_pairs(&[("page", "2"), ("size", "500")]);
        let page = params.page_request().unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.size, MAX_PAGE_SIZE);
    }

    #[test]
    fn repeated_parameters_keep_every_value() {
        let params = QueryParams::from_pairs(&[("states", "CREATED"), ("states", "EXECUTED")]);
        assert_eq!(params.get_all("states"), vec!["CREATED", "EXECUTED"]);
    }
}
