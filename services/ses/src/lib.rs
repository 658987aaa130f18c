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

//! SES query protocol client.
//!
//! Requests are form encoded POSTs signed with `AWS3-HTTPS`: the signature is
//! the HMAC-SHA256 of the `Date` header only.
//!
//! ```no_run
//! use sesign_core::{Context, OsEnv};
//! use sesign_ses::{Client, Config, Email};
//!
//! # fn main() -> sesign_ses::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let config = Config::default().from_env(&ctx)?;
//! let client = Client::new(ctx, &config)?;
//!
//! let email = Email::new("sender@example.com", "Hello")
//!     .with_to("recipient@example.com")
//!     .with_text_body("Hello from sesign");
//! let resp = client.send_email(&email)?;
//! println!("message id: {}", resp.message_id);
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;
pub use constants::{API_VERSION, DEFAULT_HOST, USER_AGENT};

mod config;
pub use config::{Config, Connection};

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{authorization_header, sign, RequestSigner};

mod error;
pub use error::{error_identifier, Error, ErrorKind, Result, ServiceErrorKind};

mod error_mapping;
pub use error_mapping::{check_error, parse_error_response, ErrorRegistry};

mod response;
pub use response::{
    ParseResponse, ParsedResponse, RawResponse, ResponseMetadata, ResponseRegistry,
    SendDataPoint, SendEmailResponse, SendQuota, SendStatistics, VerifiedEmailAddresses,
};

mod email;
pub use email::{Email, RawEmail};

mod client;
pub use client::Client;
