// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Request construction
//!
//! A [`Request`] collects the method, the path segments below the account,
//! query parameters, an optional JSON body and the status code that counts
//! as success. [`Request::path_and_query`] renders it against an account.

use crate::error::RequestError;
use cloudapi_api::Filter;
use http::{Method, StatusCode};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    expected: StatusCode,
}

impl Request {
    pub fn new<S: AsRef<str>>(method: Method, segments: &[S]) -> Self {
        let expected = match method {
            Method::DELETE => StatusCode::NO_CONTENT,
            _ => StatusCode::OK,
        };
        Self {
            method,
            segments: segments.iter().map(|s| s.as_ref().to_string()).collect(),
            query: Vec::new(),
            body: None,
            expected,
        }
    }

    pub fn get<S: AsRef<str>>(segments: &[S]) -> Self {
        Self::new(Method::GET, segments)
    }

    pub fn post<S: AsRef<str>>(segments: &[S]) -> Self {
        Self::new(Method::POST, segments)
    }

    pub fn put<S: AsRef<str>>(segments: &[S]) -> Self {
        Self::new(Method::PUT, segments)
    }

    pub fn delete<S: AsRef<str>>(segments: &[S]) -> Self {
        Self::new(Method::DELETE, segments)
    }

    /// Status code that marks the request as successful
    pub fn expect(mut self, status: StatusCode) -> Self {
        self.expected = status;
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append every filter entry, in order, as a query parameter
    pub fn filter(mut self, filter: Option<&Filter>) -> Self {
        if let Some(filter) = filter {
            self.query
                .extend(filter.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        }
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, RequestError> {
        self.body = Some(serde_json::to_vec(body).map_err(RequestError::Encode)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn expected(&self) -> StatusCode {
        self.expected
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub(crate) fn into_body(self) -> Option<Vec<u8>> {
        self.body
    }

    /// Render `/{account}/{segments...}?{query}`.
    ///
    /// Every segment and query value is percent-encoded. An empty segment
    /// means a caller passed a blank identifier and is rejected.
    pub fn path_and_query(&self, account: &str) -> Result<String, RequestError> {
        let mut path = String::new();
        for segment in std::iter::once(account).chain(self.segments.iter().map(String::as_str)) {
            if segment.is_empty() {
                return Err(RequestError::InvalidArgument(format!(
                    "empty path segment in /{}/{}",
                    account,
                    self.segments.join("/")
                )));
            }
            path.push('/');
            path.push_str(&urlencoding::encode(segment));
        }

        if !self.query.is_empty() {
            let query = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            path.push('?');
            path.push_str(&query);
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_and_escapes_segments() {
        let req = Request::get(&["machines", "a b/c", "metadata"]);
        assert_eq!(
            req.path_and_query("my").unwrap(),
            "/my/machines/a%20b%2Fc/metadata"
        );
    }

    #[test]
    fn empty_segment_is_rejected() {
        let req = Request::delete(&["keys", ""]);
        assert!(matches!(
            req.path_and_query("my"),
            Err(RequestError::InvalidArgument(_))
        ));
        assert!(Request::get(&["keys"]).path_and_query("").is_err());
    }

    #[test]
    fn action_precedes_filter_entries() {
        let filter = Filter::new().with("tags.role", "web server").with("state", "running");
        let req = Request::post(&["machines", "abc"])
            .query("action", "resize")
            .filter(Some(&filter));
        assert_eq!(
            req.path_and_query("my").unwrap(),
            "/my/machines/abc?action=resize&tags.role=web%20server&state=running"
        );
    }

    #[test]
    fn default_expectations() {
        assert_eq!(Request::get(&["keys"]).expected(), StatusCode::OK);
        assert_eq!(Request::delete(&["keys", "k"]).expected(), StatusCode::NO_CONTENT);
        let req = Request::post(&["keys"]).expect(StatusCode::CREATED);
        assert_eq!(req.expected(), StatusCode::CREATED);
        assert_eq!(*req.method(), Method::POST);
        assert!(req.body().is_none());
    }
}
