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

use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// The error type returned by every SES operation.
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    code: Option<String>,
    body: Option<String>,
    request_id: Option<String>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Request cannot be built.
    RequestInvalid,

    /// The service answered with a 5xx status, the raw body is attached.
    ServerError,

    /// The response body doesn't have the expected shape, the raw body is attached.
    UnexpectedFormat,

    /// The service returned an error document with a code.
    Service(ServiceErrorKind),

    /// Unexpected errors (network, I/O, etc.)
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::ServerError => write!(f, "server error"),
            ErrorKind::UnexpectedFormat => write!(f, "unexpected response format"),
            ErrorKind::Service(kind) => write!(f, "service error {kind}"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

macro_rules! service_error_kinds {
    ($($(#[$doc:meta])* $variant:ident),* $(,)?) => {
        /// Specific error returned by the service, keyed by its dot-stripped code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum ServiceErrorKind {
            $($(#[$doc])* $variant,)*
            /// The code is not registered, the generic service error.
            Unknown,
        }

        impl ServiceErrorKind {
            /// Every registered kind, `Unknown` excluded.
            pub const ALL: &'static [ServiceErrorKind] = &[$(ServiceErrorKind::$variant,)*];

            /// Identifier used to look this kind up, `Throttling` for example.
            pub fn identifier(&self) -> &'static str {
                match self {
                    $(ServiceErrorKind::$variant => stringify!($variant),)*
                    ServiceErrorKind::Unknown => "Unknown",
                }
            }
        }
    };
}

service_error_kinds! {
    /// The account's ability to send email has been paused.
    AccountSendingPausedException,
    /// The resource already exists.
    AlreadyExists,
    /// The resource cannot be deleted.
    CannotDelete,
    /// The configuration set does not exist.
    ConfigurationSetDoesNotExist,
    /// Sending is paused for the configuration set.
    ConfigurationSetSendingPausedException,
    /// The request signature or credential is not authorized.
    AccessDenied,
    /// The request signature does not conform to the standard.
    IncompleteSignature,
    /// An unknown or internal failure occurred on the service side.
    InternalFailure,
    /// The action or operation is invalid.
    InvalidAction,
    /// The access key id does not exist.
    InvalidClientTokenId,
    /// Parameters that must not be used together were used together.
    InvalidParameterCombination,
    /// A parameter value is out of range or malformed.
    InvalidParameterValue,
    /// A limit on the account has been exceeded.
    LimitExceeded,
    /// The custom MAIL FROM domain is not verified.
    MailFromDomainNotVerifiedException,
    /// The message could not be sent, usually an unverified address.
    MessageRejected,
    /// A required parameter is missing.
    MissingParameter,
    /// The caller does not have permission to perform the action.
    NotAuthorized,
    /// The access key id needs a subscription for the service.
    OptInRequired,
    /// The request reached the service more than 15 minutes after the date stamp.
    RequestExpired,
    /// The request failed due to a temporary failure of the server.
    ServiceUnavailable,
    /// The computed signature does not match the one sent.
    SignatureDoesNotMatch,
    /// The template does not exist.
    TemplateDoesNotExist,
    /// The request was denied due to request throttling.
    Throttling,
    /// The input fails to satisfy the constraints of the service.
    ValidationError,
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            code: None,
            body: None,
            request_id: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the http status of the response.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach the raw error code returned by the service.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach the raw response body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attach the request id reported by the service.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the service error kind, `None` if this is not a service error.
    pub fn service_kind(&self) -> Option<ServiceErrorKind> {
        match self.kind {
            ErrorKind::Service(kind) => Some(kind),
            _ => None,
        }
    }

    /// Get the message, for service errors this is the `Message` sent by the service.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the http status of the response if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Get the raw error code, `Sender.InvalidParameter` for example.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Get the lookup identifier, the raw code with every `.` removed.
    pub fn identifier(&self) -> Option<String> {
        self.code.as_deref().map(error_identifier)
    }

    /// Get the raw response body for server errors and unexpected formats.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Get the request id reported by the service.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}

// Convenience constructors
impl Error {
    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a server error
    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServerError, message)
    }

    /// Create an unexpected format error
    pub fn unexpected_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedFormat, message)
    }

    /// Create a service error
    pub fn service(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Service(kind), message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

/// Strip every `.` from a service error code.
///
/// The service sometimes sends dotted sub codes like `Sender.InvalidParameter`,
/// the identifier used for lookups is `SenderInvalidParameter`.
pub fn error_identifier(code: &str) -> String {
    code.replace('.', "")
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<sesign_core::Error> for Error {
    fn from(err: sesign_core::Error) -> Self {
        let kind = match err.kind() {
            sesign_core::ErrorKind::ConfigInvalid => ErrorKind::ConfigInvalid,
            sesign_core::ErrorKind::RequestInvalid => ErrorKind::RequestInvalid,
            sesign_core::ErrorKind::Unexpected => ErrorKind::Unexpected,
        };

        let mut message = err.message().to_string();
        for ctx in err.context() {
            message.push_str(", ");
            message.push_str(ctx);
        }
        Self::new(kind, message).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
