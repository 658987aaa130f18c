// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::error::{error_identifier, Error, Result, ServiceErrorKind};
use bytes::Bytes;
use log::debug;
use quick_xml::de;
use serde::Deserialize;
use std::collections::HashMap;

/// ErrorRegistry maps error identifiers to specific [`ServiceErrorKind`]s.
///
/// The default registry knows every [`ServiceErrorKind::ALL`] under its own
/// identifier. Identifiers that are not registered resolve to
/// [`ServiceErrorKind::Unknown`].
#[derive(Debug, Clone)]
pub struct ErrorRegistry {
    kinds: HashMap<String, ServiceErrorKind>,
}

impl Default for ErrorRegistry {
    fn default() -> Self {
        let kinds = ServiceErrorKind::ALL
            .iter()
            .map(|kind| (kind.identifier().to_string(), *kind))
            .collect();

        Self { kinds }
    }
}

impl ErrorRegistry {
    /// Create a registry without any entries, every code maps to `Unknown`.
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Register `kind` under `identifier`.
    ///
    /// Dots in `identifier` are stripped, so `Sender.InvalidParameter` and
    /// `SenderInvalidParameter` register the same entry.
    pub fn register(mut self, identifier: &str, kind: ServiceErrorKind) -> Self {
        self.kinds.insert(error_identifier(identifier), kind);
        self
    }

    /// Look up the kind registered for `identifier`, falling back to `Unknown`.
    pub fn lookup(&self, identifier: &str) -> ServiceErrorKind {
        self.kinds
            .get(identifier)
            .copied()
            .unwrap_or(ServiceErrorKind::Unknown)
    }
}

/// Check a response for errors.
///
/// - 2xx: no error.
/// - 5xx: [`ErrorKind::ServerError`](crate::ErrorKind::ServerError) carrying the raw body, the body is not parsed.
/// - others: the body is parsed as an XML error document, see [`parse_error_response`].
pub fn check_error(resp: &http::Response<Bytes>, registry: &ErrorRegistry) -> Result<()> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }

    let body = String::from_utf8_lossy(resp.body()).to_string();
    if status.is_server_error() {
        debug!("service returned server error: {status}");
        return Err(Error::server_error(format!("service returned {status}"))
            .with_status(status)
            .with_body(body));
    }

    Err(parse_error_response(status, body, registry))
}

/// Parse an XML error document into an [`Error`].
///
/// Both shapes are accepted, `Error` directly under the root or wrapped in `Errors`:
///
/// ```xml
/// <ErrorResponse>
///   <Error><Type>Sender</Type><Code>Throttling</Code><Message>Rate exceeded</Message></Error>
///   <RequestId>...</RequestId>
/// </ErrorResponse>
/// ```
///
/// A body without an `Error` element carrying a `Code` turns into
/// [`ErrorKind::UnexpectedFormat`](crate::ErrorKind::UnexpectedFormat) with the raw body attached.
pub fn parse_error_response(
    status: http::StatusCode,
    body: String,
    registry: &ErrorRegistry,
) -> Error {
    let resp: ErrorResponse = match de::from_str(&body) {
        Ok(resp) => resp,
        Err(e) => {
            return Error::unexpected_format("failed to parse error response")
                .with_source(e)
                .with_status(status)
                .with_body(body);
        }
    };

    let request_id = resp.request_id();
    let detail = resp
        .error
        .or_else(|| resp.errors.and_then(|v| v.error.into_iter().next()));
    let Some((code, message)) = detail.and_then(|v| {
        let code = v.code?.trim().to_string();
        (!code.is_empty()).then(|| (code, v.message.unwrap_or_default()))
    }) else {
        return Error::unexpected_format("error response without Error/Code element")
            .with_status(status)
            .with_body(body);
    };

    let identifier = error_identifier(&code);
    let kind = registry.lookup(&identifier);
    debug!("service returned error {code} mapped to {kind}: {message}");

    let mut err = Error::service(kind, message)
        .with_status(status)
        .with_code(code);
    if let Some(request_id) = request_id {
        err = err.with_request_id(request_id);
    }
    err
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct ErrorResponse {
    #[serde(rename = "Error")]
    error: Option<ErrorDetail>,
    #[serde(rename = "Errors")]
    errors: Option<ErrorList>,
    #[serde(rename = "RequestId")]
    request_id: Option<String>,
    #[serde(rename = "RequestID")]
    request_id_upper: Option<String>,
}

impl ErrorResponse {
    fn request_id(&self) -> Option<String> {
        self.request_id
            .as_deref()
            .or(self.request_id_upper.as_deref())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct ErrorList {
    #[serde(rename = "Error")]
    error: Vec<ErrorDetail>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ErrorDetail {
    code: Option<String>,
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use http::StatusCode;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn response(status: StatusCode, body: &'static str) -> http::Response<Bytes> {
        http::Response::builder()
            .status(status)
            .body(Bytes::from_static(body.as_bytes()))
            .expect("response must be valid")
    }

    #[test_case(StatusCode::OK; "ok")]
    #[test_case(StatusCode::CREATED; "created")]
    #[test_case(StatusCode::NO_CONTENT; "no content")]
    fn test_check_error_success(status: StatusCode) {
        let resp = response(status, "<SendEmailResponse/>");
        assert!(check_error(&resp, &ErrorRegistry::default()).is_ok());
    }

    #[test]
    fn test_check_error_throttling() {
        let _ = env_logger::builder().is_test(true).try_init();

        let resp = response(
            StatusCode::BAD_REQUEST,
            "<Response><Errors><Error><Code>Throttling</Code><Message>Rate exceeded</Message></Error></Errors></Response>",
        );

        let err = check_error(&resp, &ErrorRegistry::default()).expect_err("must be error");
        assert_eq!(err.kind(), ErrorKind::Service(ServiceErrorKind::Throttling));
        assert_eq!(err.message(), "Rate exceeded");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.code(), Some("Throttling"));
    }

    #[test]
    fn test_check_error_dotted_code() {
        let resp = response(
            StatusCode::BAD_REQUEST,
            "<Response><Errors><Error><Code>Sender.InvalidParameter</Code><Message>bad</Message></Error></Errors></Response>",
        );

        let err = check_error(&resp, &ErrorRegistry::default()).expect_err("must be error");
        assert_eq!(err.identifier().as_deref(), Some("SenderInvalidParameter"));
        assert_eq!(err.code(), Some("Sender.InvalidParameter"));
        assert_eq!(err.kind(), ErrorKind::Service(ServiceErrorKind::Unknown));
        assert_eq!(err.message(), "bad");

        let registry = ErrorRegistry::default().register(
            "SenderInvalidParameter",
            ServiceErrorKind::InvalidParameterValue,
        );
        let err = check_error(&resp, &registry).expect_err("must be error");
        assert_eq!(
            err.kind(),
            ErrorKind::Service(ServiceErrorKind::InvalidParameterValue)
        );
    }

    #[test]
    fn test_check_error_error_response_shape() {
        let resp = response(
            StatusCode::BAD_REQUEST,
            r#"<ErrorResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <Error>
    <Type>Sender</Type>
    <Code>MessageRejected</Code>
    <Message>Email address is not verified.</Message>
  </Error>
  <RequestId>c6104cbe-af31-11e0-8154-cbc7ccf896c7</RequestId>
</ErrorResponse>"#,
        );

        let err = check_error(&resp, &ErrorRegistry::default()).expect_err("must be error");
        assert_eq!(
            err.kind(),
            ErrorKind::Service(ServiceErrorKind::MessageRejected)
        );
        assert_eq!(err.message(), "Email address is not verified.");
        assert_eq!(
            err.request_id(),
            Some("c6104cbe-af31-11e0-8154-cbc7ccf896c7")
        );
    }

    #[test]
    fn test_check_error_unknown_code() {
        let resp = response(
            StatusCode::FORBIDDEN,
            "<Response><Errors><Error><Code>SomethingNew</Code><Message>new</Message></Error></Errors><RequestID>abc</RequestID></Response>",
        );

        let err = check_error(&resp, &ErrorRegistry::default()).expect_err("must be error");
        assert_eq!(err.kind(), ErrorKind::Service(ServiceErrorKind::Unknown));
        assert_eq!(err.message(), "new");
        assert_eq!(err.request_id(), Some("abc"));
    }

    #[test]
    fn test_check_error_message_kept_verbatim() {
        let resp = response(
            StatusCode::BAD_REQUEST,
            "<ErrorResponse><Error><Code>Throttling</Code><Message><![CDATA[ Daily quota exceeded. ]]></Message></Error></ErrorResponse>",
        );

        let err = check_error(&resp, &ErrorRegistry::default()).expect_err("must be error");
        assert_eq!(err.kind(), ErrorKind::Service(ServiceErrorKind::Throttling));
        assert_eq!(err.message(), " Daily quota exceeded. ");
    }

    #[test_case("<html><body>Internal Server Error</body></html>"; "html")]
    #[test_case("<Response><Errors><Error><Code>Throttling</Code></Error></Errors></Response>"; "xml error")]
    #[test_case("not xml at all"; "plain text")]
    fn test_check_error_server_error(body: &'static str) {
        let resp = response(StatusCode::INTERNAL_SERVER_ERROR, body);

        let err = check_error(&resp, &ErrorRegistry::default()).expect_err("must be error");
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(err.body(), Some(body));
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test_case("<Response><Something>else</Something></Response>"; "missing error element")]
    #[test_case("<Response><Errors></Errors></Response>"; "empty errors")]
    #[test_case("<Response><Error><Message>no code</Message></Error></Response>"; "missing code")]
    #[test_case("Bad Request"; "plain text")]
    #[test_case(""; "empty body")]
    fn test_check_error_unexpected_format(body: &'static str) {
        let resp = response(StatusCode::BAD_REQUEST, body);

        let err = check_error(&resp, &ErrorRegistry::default()).expect_err("must be error");
        assert_eq!(err.kind(), ErrorKind::UnexpectedFormat);
        assert_eq!(err.body(), Some(body));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ErrorRegistry::default();
        assert_eq!(registry.lookup("Throttling"), ServiceErrorKind::Throttling);
        assert_eq!(
            registry.lookup("MessageRejected"),
            ServiceErrorKind::MessageRejected
        );
        assert_eq!(registry.lookup("NotAThing"), ServiceErrorKind::Unknown);

        let registry = ErrorRegistry::empty();
        assert_eq!(registry.lookup("Throttling"), ServiceErrorKind::Unknown);
    }
}
