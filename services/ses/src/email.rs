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

use crate::error::{Error, Result};
use sesign_core::hash::base64_encode;
use std::collections::HashMap;

/// Email describes a formatted message sent through `SendEmail`.
///
/// ```
/// use sesign_ses::Email;
///
/// let email = Email::new("sender@example.com", "Hello")
///     .with_to("recipient@example.com")
///     .with_text_body("Hello from sesign");
/// let params = email.to_params().unwrap();
/// assert_eq!(
///     params["Destination.ToAddresses.member.1"].as_deref(),
///     Some("recipient@example.com")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Email {
    source: String,
    to: Vec<String>,
    cc: Vec<String>,
    bcc: Vec<String>,
    reply_to: Vec<String>,
    return_path: Option<String>,
    subject: String,
    text_body: Option<String>,
    html_body: Option<String>,
    charset: Option<String>,
}

impl Email {
    /// Create a new email sent from `source` with `subject`.
    pub fn new(source: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            subject: subject.into(),
            ..Default::default()
        }
    }

    /// Add a `To` recipient.
    pub fn with_to(mut self, address: impl Into<String>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Add a `Cc` recipient.
    pub fn with_cc(mut self, address: impl Into<String>) -> Self {
        self.cc.push(address.into());
        self
    }

    /// Add a `Bcc` recipient.
    pub fn with_bcc(mut self, address: impl Into<String>) -> Self {
        self.bcc.push(address.into());
        self
    }

    /// Add a reply-to address.
    pub fn with_reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to.push(address.into());
        self
    }

    /// Set the address bounces and complaints are forwarded to.
    pub fn with_return_path(mut self, address: impl Into<String>) -> Self {
        self.return_path = Some(address.into());
        self
    }

    /// Set the plain text body.
    pub fn with_text_body(mut self, body: impl Into<String>) -> Self {
        self.text_body = Some(body.into());
        self
    }

    /// Set the html body.
    pub fn with_html_body(mut self, body: impl Into<String>) -> Self {
        self.html_body = Some(body.into());
        self
    }

    /// Set the charset of subject and bodies, `UTF-8` for example.
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Build the `SendEmail` parameters.
    ///
    /// Returns [`ErrorKind::RequestInvalid`](crate::ErrorKind::RequestInvalid)
    /// if the email has no source, no recipient or no body.
    pub fn to_params(&self) -> Result<HashMap<String, Option<String>>> {
        if self.source.is_empty() {
            return Err(Error::request_invalid("email source is required"));
        }
        if self.to.is_empty() && self.cc.is_empty() && self.bcc.is_empty() {
            return Err(Error::request_invalid(
                "email must have at least one destination",
            ));
        }
        if self.text_body.is_none() && self.html_body.is_none() {
            return Err(Error::request_invalid(
                "email must have a text or html body",
            ));
        }

        let mut params = HashMap::new();
        params.insert("Source".to_string(), Some(self.source.clone()));
        insert_members(&mut params, "Destination.ToAddresses", &self.to);
        insert_members(&mut params, "Destination.CcAddresses", &self.cc);
        insert_members(&mut params, "Destination.BccAddresses", &self.bcc);
        insert_members(&mut params, "ReplyToAddresses", &self.reply_to);
        params.insert("ReturnPath".to_string(), self.return_path.clone());

        params.insert(
            "Message.Subject.Data".to_string(),
            Some(self.subject.clone()),
        );
        params.insert("Message.Subject.Charset".to_string(), self.charset.clone());
        if let Some(body) = &self.text_body {
            params.insert("Message.Body.Text.Data".to_string(), Some(body.clone()));
            params.insert("Message.Body.Text.Charset".to_string(), self.charset.clone());
        }
        if let Some(body) = &self.html_body {
            params.insert("Message.Body.Html.Data".to_string(), Some(body.clone()));
            params.insert("Message.Body.Html.Charset".to_string(), self.charset.clone());
        }

        Ok(params)
    }
}

/// RawEmail carries a complete MIME message sent through `SendRawEmail`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEmail {
    data: Vec<u8>,
    source: Option<String>,
    destinations: Vec<String>,
}

impl RawEmail {
    /// Create a raw email from the MIME message, headers included.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    /// Set the sender, overriding the `From` header of the message.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add a destination, overriding the recipients of the message headers.
    pub fn with_destination(mut self, address: impl Into<String>) -> Self {
        self.destinations.push(address.into());
        self
    }

    /// Build the `SendRawEmail` parameters, the message is base64 encoded.
    pub fn to_params(&self) -> Result<HashMap<String, Option<String>>> {
        if self.data.is_empty() {
            return Err(Error::request_invalid("raw email data is required"));
        }

        let mut params = HashMap::new();
        params.insert(
            "RawMessage.Data".to_string(),
            Some(base64_encode(&self.data)),
        );
        params.insert("Source".to_string(), self.source.clone());
        insert_members(&mut params, "Destinations", &self.destinations);

        Ok(params)
    }
}

/// Insert `values` as `<prefix>.member.1`, `<prefix>.member.2`...
fn insert_members(params: &mut HashMap<String, Option<String>>, prefix: &str, values: &[String]) {
    for (idx, value) in values.iter().enumerate() {
        params.insert(format!("{prefix}.member.{}", idx + 1), Some(value.clone()));
    }
}
