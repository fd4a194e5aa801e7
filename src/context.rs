//! The request-context boundary object.
//!
//! The staged pipeline owns request parsing; this crate only consumes the
//! result. [`RequestCtx`] carries the parsed facilities (path, headers,
//! query, cookies, JSON body), the request's key-value parameter store
//! that later stages draw named arguments from, the response content-type
//! slot, and the per-request instance map. It lives exactly as long as
//! one request and is never shared across requests.
//!
//! The `with_*` constructors cover the adapter (and test) side of the
//! boundary: a pipeline that has a raw query string or `Cookie:` header
//! can hand it over verbatim and the standard parsers are applied.

use std::collections::HashMap;

use cookie::Cookie;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use mime::Mime;
use serde_json::Value;
use url::form_urlencoded;

use crate::{
    coerce::{self, ParamType},
    instances::InstanceMap,
};

pub struct RequestCtx {
    method: Method,
    path: String,
    headers: HeaderMap,
    query: HashMap<String, String>,
    cookies: HashMap<String, String>,
    body: Option<Value>,
    params: HashMap<String, Value>,
    content_type: Option<Mime>,
    pub(crate) instances: InstanceMap,
}

impl RequestCtx {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            query: HashMap::new(),
            cookies: HashMap::new(),
            body: None,
            params: HashMap::new(),
            content_type: None,
            instances: InstanceMap::default(),
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Parses a raw query string (`page=1&tag=rust`) into the query map.
    pub fn with_query_string(mut self, raw: &str) -> Self {
        for (name, value) in form_urlencoded::parse(raw.as_bytes()).into_owned() {
            self.query.insert(name, value);
        }
        self
    }

    /// Invalid header names or values are dropped; the transport already
    /// rejected anything truly malformed.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name),
            HeaderValue::try_from(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Parses a raw `Cookie:` header value. Fragments that fail to parse
    /// are skipped.
    pub fn with_cookie_header(mut self, raw: &str) -> Self {
        for fragment in raw.split(';') {
            if let Ok(c) = Cookie::parse(fragment.trim().to_owned()) {
                self.cookies
                    .insert(c.name().to_owned(), c.value().to_owned());
            }
        }
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The parsed request body, if the pipeline parsed one.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Header lookup by case-insensitive name; values that are not valid
    /// UTF-8 count as absent.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Typed query accessor: validates and casts the named field, falling
    /// back to `default` when absent or invalid.
    pub fn query_value(&self, name: &str, ty: ParamType, default: &Value) -> Value {
        coerce::validate(self.query.get(name).map(String::as_str), ty, default)
    }

    /// Typed cookie accessor, same fallback policy as [`Self::query_value`].
    pub fn cookie_value(&self, name: &str, ty: ParamType, default: &Value) -> Value {
        coerce::validate(self.cookies.get(name).map(String::as_str), ty, default)
    }

    /// Stores a named value for later stages to consume as an argument.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: Value) {
        self.params.insert(name.into(), value);
    }

    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Resolves an argument name the way the pipeline's injection does:
    /// the parameter store first, `Null` otherwise.
    pub fn resolve(&self, name: &str) -> Value {
        self.params.get(name).cloned().unwrap_or(Value::Null)
    }

    /// Tags the response the pipeline will render with a mime type.
    pub fn set_content_type(&mut self, mime: Mime) {
        self.content_type = Some(mime);
    }

    pub fn content_type(&self) -> Option<&Mime> {
        self.content_type.as_ref()
    }

    /// Number of per-request handler instances constructed so far.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}
