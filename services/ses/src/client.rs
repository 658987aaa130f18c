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

use crate::config::{Config, Connection};
use crate::email::{Email, RawEmail};
use crate::error::{Error, Result};
use crate::error_mapping::{check_error, ErrorRegistry};
use crate::response::*;
use crate::sign_request::RequestSigner;
use log::{debug, warn};
use sesign_core::time::DateTime;
use sesign_core::utils::Redact;
use sesign_core::Context;
use std::collections::HashMap;

/// Client dispatches signed actions to the service.
///
/// The client holds no mutable state, it can be shared between threads and
/// every call is independent.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    conn: Connection,
    signer: RequestSigner,
    errors: ErrorRegistry,
    parsers: ResponseRegistry,
}

impl Client {
    /// Create a new client, `config` is validated once here.
    ///
    /// If `proxy_server` is configured, every request goes through it. The
    /// [`HttpSend`](sesign_core::HttpSend) of `ctx` must support proxies,
    /// `ConfigInvalid` is returned otherwise.
    pub fn new(ctx: Context, config: &Config) -> Result<Self> {
        let conn = config.build()?;
        let ctx = match conn.proxy_server() {
            Some(proxy) => {
                debug!("ses client routes requests through proxy {}", Redact::from(proxy));
                ctx.with_proxy(proxy)?
            }
            None => ctx,
        };
        debug!("ses client created for endpoint {}", conn.endpoint());

        Ok(Self {
            ctx,
            conn,
            signer: RequestSigner::new(),
            errors: ErrorRegistry::default(),
            parsers: ResponseRegistry::default(),
        })
    }

    /// Replace the registry used to map error codes.
    pub fn with_error_registry(mut self, errors: ErrorRegistry) -> Self {
        self.errors = errors;
        self
    }

    /// Replace the registry used to parse responses.
    pub fn with_response_registry(mut self, parsers: ResponseRegistry) -> Self {
        self.parsers = parsers;
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.signer = self.signer.with_time(time);
        self
    }

    /// The validated connection this client sends requests to.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Execute `action` with `params`.
    ///
    /// Empty parameters are dropped, the request is signed and sent, error
    /// responses are mapped to [`Error`] and successful ones are handed to the
    /// parser registered for `<action>Response`.
    pub fn execute(
        &self,
        action: &str,
        params: HashMap<String, Option<String>>,
    ) -> Result<ParsedResponse> {
        if action.is_empty() {
            return Err(Error::request_invalid("action must not be empty"));
        }

        let req = self.signer.sign_request(&self.conn, action, params)?;
        debug!("sending {action} to {}", self.conn.endpoint());

        let resp = self.ctx.http_send(req)?;
        debug!("{action} returned {}", resp.status());

        if let Err(err) = check_error(&resp, &self.errors) {
            warn!("{action} failed: {err}");
            return Err(err);
        }
        self.parsers.parse(action, &resp)
    }

    /// Send a formatted email.
    pub fn send_email(&self, email: &Email) -> Result<SendEmailResponse> {
        match self.execute("SendEmail", email.to_params()?)? {
            ParsedResponse::SendEmail(v) => Ok(v),
            other => Err(mismatch("SendEmail", &other)),
        }
    }

    /// Send a raw MIME message.
    pub fn send_raw_email(&self, email: &RawEmail) -> Result<SendEmailResponse> {
        match self.execute("SendRawEmail", email.to_params()?)? {
            ParsedResponse::SendRawEmail(v) => Ok(v),
            other => Err(mismatch("SendRawEmail", &other)),
        }
    }

    /// Get the sending limits of the account.
    pub fn get_send_quota(&self) -> Result<SendQuota> {
        match self.execute("GetSendQuota", HashMap::new())? {
            ParsedResponse::GetSendQuota(v) => Ok(v),
            other => Err(mismatch("GetSendQuota", &other)),
        }
    }

    /// Get the sending statistics of the last two weeks.
    pub fn get_send_statistics(&self) -> Result<SendStatistics> {
        match self.execute("GetSendStatistics", HashMap::new())? {
            ParsedResponse::GetSendStatistics(v) => Ok(v),
            other => Err(mismatch("GetSendStatistics", &other)),
        }
    }

    /// List the email addresses verified for sending.
    pub fn list_verified_email_addresses(&self) -> Result<VerifiedEmailAddresses> {
        match self.execute("ListVerifiedEmailAddresses", HashMap::new())? {
            ParsedResponse::ListVerifiedEmailAddresses(v) => Ok(v),
            other => Err(mismatch("ListVerifiedEmailAddresses", &other)),
        }
    }

    /// Ask the service to send a verification email to `address`.
    pub fn verify_email_address(&self, address: &str) -> Result<ResponseMetadata> {
        match self.execute("VerifyEmailAddress", email_address_param(address)?)? {
            ParsedResponse::VerifyEmailAddress(v) => Ok(v),
            other => Err(mismatch("VerifyEmailAddress", &other)),
        }
    }

    /// Remove `address` from the verified addresses.
    pub fn delete_verified_email_address(&self, address: &str) -> Result<ResponseMetadata> {
        match self.execute("DeleteVerifiedEmailAddress", email_address_param(address)?)? {
            ParsedResponse::DeleteVerifiedEmailAddress(v) => Ok(v),
            other => Err(mismatch("DeleteVerifiedEmailAddress", &other)),
        }
    }
}

fn email_address_param(address: &str) -> Result<HashMap<String, Option<String>>> {
    if address.is_empty() {
        return Err(Error::request_invalid("email address is required"));
    }
    Ok(HashMap::from([(
        "EmailAddress".to_string(),
        Some(address.to_string()),
    )]))
}

fn mismatch(action: &str, parsed: &ParsedResponse) -> Error {
    Error::unexpected(format!(
        "parser registered for {action}Response returned unexpected response: {parsed:?}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    fn test_config() -> Config {
        Config {
            access_key_id: Some("AKIDEXAMPLE".to_string()),
            secret_access_key: Some("secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_validates_config() {
        let err = Client::new(Context::new(), &Config::default()).expect_err("must be invalid");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_execute_without_http_send() -> anyhow::Result<()> {
        let client = Client::new(Context::new(), &test_config())?;
        assert_eq!(client.connection().host(), "email.us-east-1.amazonaws.com");

        let err = client
            .execute("GetSendQuota", HashMap::new())
            .expect_err("noop http send must fail");
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        Ok(())
    }

    #[test]
    fn test_new_with_proxy_keeps_noop_http_send() -> anyhow::Result<()> {
        let config = Config {
            proxy_server: Some("http://127.0.0.1:3128".to_string()),
            ..test_config()
        };
        let client = Client::new(Context::new(), &config)?;
        assert_eq!(
            client.connection().proxy_server(),
            Some("http://127.0.0.1:3128")
        );

        let err = client
            .execute("GetSendQuota", HashMap::new())
            .expect_err("noop http send must fail");
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        Ok(())
    }

    #[test]
    fn test_execute_empty_action() -> anyhow::Result<()> {
        let client = Client::new(Context::new(), &test_config())?;
        let err = client
            .execute("", HashMap::new())
            .expect_err("empty action must fail");
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        Ok(())
    }

    #[test]
    fn test_verify_email_address_empty() -> anyhow::Result<()> {
        let client = Client::new(Context::new(), &test_config())?;
        let err = client
            .verify_email_address("")
            .expect_err("empty address must fail");
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        Ok(())
    }
}
