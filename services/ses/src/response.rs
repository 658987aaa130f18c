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

use crate::constants::X_AMZN_REQUESTID;
use crate::error::{Error, Result};
use bytes::Bytes;
use http::StatusCode;
use log::debug;
use quick_xml::de;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sesign_core::time::{parse_rfc3339, DateTime};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// ParseResponse turns a successful response into a [`ParsedResponse`].
///
/// Parsers are registered in a [`ResponseRegistry`] under `<Action>Response`.
pub trait ParseResponse: Debug + Send + Sync + 'static {
    /// Parse the response of a successful request.
    fn parse_response(&self, resp: &http::Response<Bytes>) -> Result<ParsedResponse>;
}

/// Result of a dispatched action.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    /// Result of `SendEmail`.
    SendEmail(SendEmailResponse),
    /// Result of `SendRawEmail`.
    SendRawEmail(SendEmailResponse),
    /// Result of `GetSendQuota`.
    GetSendQuota(SendQuota),
    /// Result of `GetSendStatistics`.
    GetSendStatistics(SendStatistics),
    /// Result of `ListVerifiedEmailAddresses`.
    ListVerifiedEmailAddresses(VerifiedEmailAddresses),
    /// Result of `VerifyEmailAddress`.
    VerifyEmailAddress(ResponseMetadata),
    /// Result of `DeleteVerifiedEmailAddress`.
    DeleteVerifiedEmailAddress(ResponseMetadata),
    /// Response of an action without registered parser.
    Raw(RawResponse),
}

impl ParsedResponse {
    /// Request id assigned by the service, `None` for raw responses.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            ParsedResponse::SendEmail(v) | ParsedResponse::SendRawEmail(v) => v.request_id.as_deref(),
            ParsedResponse::GetSendQuota(v) => v.request_id.as_deref(),
            ParsedResponse::GetSendStatistics(v) => v.request_id.as_deref(),
            ParsedResponse::ListVerifiedEmailAddresses(v) => v.request_id.as_deref(),
            ParsedResponse::VerifyEmailAddress(v) | ParsedResponse::DeleteVerifiedEmailAddress(v) => {
                v.request_id.as_deref()
            }
            ParsedResponse::Raw(_) => None,
        }
    }

    fn request_id_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            ParsedResponse::SendEmail(v) | ParsedResponse::SendRawEmail(v) => Some(&mut v.request_id),
            ParsedResponse::GetSendQuota(v) => Some(&mut v.request_id),
            ParsedResponse::GetSendStatistics(v) => Some(&mut v.request_id),
            ParsedResponse::ListVerifiedEmailAddresses(v) => Some(&mut v.request_id),
            ParsedResponse::VerifyEmailAddress(v) | ParsedResponse::DeleteVerifiedEmailAddress(v) => {
                Some(&mut v.request_id)
            }
            ParsedResponse::Raw(_) => None,
        }
    }
}

/// Response kept as is because no parser is registered for its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Action the request was sent for.
    pub action: String,
    /// Http status of the response.
    pub status: StatusCode,
    /// Response body, lossy decoded as utf-8.
    pub body: String,
}

/// Metadata every response carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
    /// Request id assigned by the service.
    pub request_id: Option<String>,
}

/// Message accepted by `SendEmail` or `SendRawEmail`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendEmailResponse {
    /// Id of the queued message.
    pub message_id: String,
    /// Request id assigned by the service.
    pub request_id: Option<String>,
}

/// Sending limits of the account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendQuota {
    /// Max messages that can be sent in 24 hours.
    pub max_24_hour_send: f64,
    /// Max messages that can be accepted per second.
    pub max_send_rate: f64,
    /// Messages sent during the previous 24 hours.
    pub sent_last_24_hours: f64,
    /// Request id assigned by the service.
    pub request_id: Option<String>,
}

/// Sending statistics of the last two weeks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendStatistics {
    /// One data point per 15 minutes interval.
    pub data_points: Vec<SendDataPoint>,
    /// Request id assigned by the service.
    pub request_id: Option<String>,
}

/// Sending activity during a 15 minutes interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendDataPoint {
    /// Start of the interval.
    pub timestamp: DateTime,
    /// Messages the service tried to deliver.
    pub delivery_attempts: u64,
    /// Messages that bounced.
    pub bounces: u64,
    /// Messages marked as spam by the recipient.
    pub complaints: u64,
    /// Messages rejected by the service.
    pub rejects: u64,
}

/// Email addresses verified for sending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifiedEmailAddresses {
    /// Verified addresses.
    pub addresses: Vec<String>,
    /// Request id assigned by the service.
    pub request_id: Option<String>,
}

/// ResponseRegistry maps `<Action>Response` keys to [`ParseResponse`] implementations.
///
/// The default registry knows every action [`Client`](crate::Client) exposes a
/// method for.
#[derive(Debug, Clone)]
pub struct ResponseRegistry {
    parsers: HashMap<String, Arc<dyn ParseResponse>>,
}

impl Default for ResponseRegistry {
    fn default() -> Self {
        let builtin = [
            XmlParser::new("SendEmail", parse_send_email),
            XmlParser::new("SendRawEmail", parse_send_raw_email),
            XmlParser::new("GetSendQuota", parse_get_send_quota),
            XmlParser::new("GetSendStatistics", parse_get_send_statistics),
            XmlParser::new(
                "ListVerifiedEmailAddresses",
                parse_list_verified_email_addresses,
            ),
            XmlParser::new("VerifyEmailAddress", parse_verify_email_address),
            XmlParser::new(
                "DeleteVerifiedEmailAddress",
                parse_delete_verified_email_address,
            ),
        ];

        builtin
            .into_iter()
            .fold(Self::empty(), |registry, parser| {
                let key = response_key(parser.action);
                registry.register(&key, parser)
            })
    }
}

impl ResponseRegistry {
    /// Create a registry without any parser, every action falls back to [`ParsedResponse::Raw`].
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Register `parser` under `key`, `SendEmailResponse` for example.
    ///
    /// Registering an existing key replaces its parser.
    pub fn register(mut self, key: &str, parser: impl ParseResponse) -> Self {
        self.parsers.insert(key.to_string(), Arc::new(parser));
        self
    }

    /// Check if a parser is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.parsers.contains_key(key)
    }

    /// Parse the response of `action` with the parser registered for `<action>Response`.
    pub fn parse(&self, action: &str, resp: &http::Response<Bytes>) -> Result<ParsedResponse> {
        let key = response_key(action);
        match self.parsers.get(&key) {
            Some(parser) => parser.parse_response(resp),
            None => {
                debug!("no parser registered for {key}, returning raw response");
                Ok(ParsedResponse::Raw(RawResponse {
                    action: action.to_string(),
                    status: resp.status(),
                    body: String::from_utf8_lossy(resp.body()).to_string(),
                }))
            }
        }
    }
}

fn response_key(action: &str) -> String {
    format!("{action}Response")
}

/// Parser for the xml documents of the built-in actions.
#[derive(Clone, Copy)]
struct XmlParser {
    action: &'static str,
    parse: fn(&str) -> Result<ParsedResponse>,
}

impl Debug for XmlParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmlParser")
            .field("action", &self.action)
            .finish()
    }
}

impl XmlParser {
    fn new(action: &'static str, parse: fn(&str) -> Result<ParsedResponse>) -> Self {
        Self { action, parse }
    }
}

impl ParseResponse for XmlParser {
    fn parse_response(&self, resp: &http::Response<Bytes>) -> Result<ParsedResponse> {
        let body = String::from_utf8_lossy(resp.body());
        let parsed = (self.parse)(&body).map_err(|err| err.with_status(resp.status()))?;

        // Fall back to the request id header if the body doesn't carry one.
        let header_request_id = resp
            .headers()
            .get(X_AMZN_REQUESTID)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let mut parsed = parsed;
        if let Some(request_id) = parsed.request_id_mut() {
            if request_id.is_none() {
                *request_id = header_request_id;
            }
        }
        Ok(parsed)
    }
}

fn from_xml<T: DeserializeOwned>(body: &str) -> Result<T> {
    de::from_str(body).map_err(|e| {
        Error::unexpected_format("failed to parse response")
            .with_source(e)
            .with_body(body)
    })
}

fn parse_send_email(body: &str) -> Result<ParsedResponse> {
    let resp: SendEmailWire = from_xml(body)?;
    Ok(ParsedResponse::SendEmail(resp.into_response(body)?))
}

fn parse_send_raw_email(body: &str) -> Result<ParsedResponse> {
    let resp: SendEmailWire = from_xml(body)?;
    Ok(ParsedResponse::SendRawEmail(resp.into_response(body)?))
}

fn parse_get_send_quota(body: &str) -> Result<ParsedResponse> {
    let resp: GetSendQuotaWire = from_xml(body)?;
    let result = resp.result.ok_or_else(|| missing(body, "GetSendQuotaResult"))?;

    Ok(ParsedResponse::GetSendQuota(SendQuota {
        max_24_hour_send: result.max_24_hour_send,
        max_send_rate: result.max_send_rate,
        sent_last_24_hours: result.sent_last_24_hours,
        request_id: request_id(resp.metadata.as_ref()),
    }))
}

fn parse_get_send_statistics(body: &str) -> Result<ParsedResponse> {
    let resp: GetSendStatisticsWire = from_xml(body)?;
    let result = resp
        .result
        .ok_or_else(|| missing(body, "GetSendStatisticsResult"))?;

    let data_points = result
        .data_points
        .member
        .into_iter()
        .map(|v| {
            let timestamp = parse_rfc3339(v.timestamp.trim()).map_err(|e| {
                Error::unexpected_format(format!("invalid data point timestamp: {}", v.timestamp))
                    .with_source(e)
                    .with_body(body)
            })?;
            Ok(SendDataPoint {
                timestamp,
                delivery_attempts: v.delivery_attempts,
                bounces: v.bounces,
                complaints: v.complaints,
                rejects: v.rejects,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ParsedResponse::GetSendStatistics(SendStatistics {
        data_points,
        request_id: request_id(resp.metadata.as_ref()),
    }))
}

fn parse_list_verified_email_addresses(body: &str) -> Result<ParsedResponse> {
    let resp: ListVerifiedEmailAddressesWire = from_xml(body)?;
    let result = resp
        .result
        .ok_or_else(|| missing(body, "ListVerifiedEmailAddressesResult"))?;

    Ok(ParsedResponse::ListVerifiedEmailAddresses(
        VerifiedEmailAddresses {
            addresses: result
                .addresses
                .member
                .into_iter()
                .map(|v| v.trim().to_string())
                .collect(),
            request_id: request_id(resp.metadata.as_ref()),
        },
    ))
}

fn parse_verify_email_address(body: &str) -> Result<ParsedResponse> {
    let resp: MetadataOnlyWire = from_xml(body)?;
    Ok(ParsedResponse::VerifyEmailAddress(ResponseMetadata {
        request_id: request_id(resp.metadata.as_ref()),
    }))
}

fn parse_delete_verified_email_address(body: &str) -> Result<ParsedResponse> {
    let resp: MetadataOnlyWire = from_xml(body)?;
    Ok(ParsedResponse::DeleteVerifiedEmailAddress(ResponseMetadata {
        request_id: request_id(resp.metadata.as_ref()),
    }))
}

fn missing(body: &str, element: &str) -> Error {
    Error::unexpected_format(format!("response without {element} element")).with_body(body)
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct ResponseMetadataWire {
    #[serde(rename = "RequestId")]
    request_id: Option<String>,
}

fn request_id(metadata: Option<&ResponseMetadataWire>) -> Option<String> {
    metadata
        .and_then(|v| v.request_id.as_deref())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct MemberList<T> {
    member: Vec<T>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct MetadataOnlyWire {
    #[serde(rename = "ResponseMetadata")]
    metadata: Option<ResponseMetadataWire>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct SendEmailWire {
    #[serde(alias = "SendEmailResult", alias = "SendRawEmailResult")]
    result: Option<SendEmailResultWire>,
    #[serde(rename = "ResponseMetadata")]
    metadata: Option<ResponseMetadataWire>,
}

impl SendEmailWire {
    fn into_response(self, body: &str) -> Result<SendEmailResponse> {
        let message_id = self
            .result
            .and_then(|v| v.message_id)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| missing(body, "MessageId"))?;
        let request_id = request_id(self.metadata.as_ref());

        Ok(SendEmailResponse {
            message_id,
            request_id,
        })
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct SendEmailResultWire {
    #[serde(rename = "MessageId")]
    message_id: Option<String>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct GetSendQuotaWire {
    #[serde(rename = "GetSendQuotaResult")]
    result: Option<SendQuotaWire>,
    #[serde(rename = "ResponseMetadata")]
    metadata: Option<ResponseMetadataWire>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct SendQuotaWire {
    #[serde(rename = "Max24HourSend")]
    max_24_hour_send: f64,
    #[serde(rename = "MaxSendRate")]
    max_send_rate: f64,
    #[serde(rename = "SentLast24Hours")]
    sent_last_24_hours: f64,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct GetSendStatisticsWire {
    #[serde(rename = "GetSendStatisticsResult")]
    result: Option<SendStatisticsWire>,
    #[serde(rename = "ResponseMetadata")]
    metadata: Option<ResponseMetadataWire>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct SendStatisticsWire {
    #[serde(rename = "SendDataPoints")]
    data_points: MemberList<SendDataPointWire>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct SendDataPointWire {
    timestamp: String,
    delivery_attempts: u64,
    bounces: u64,
    complaints: u64,
    rejects: u64,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct ListVerifiedEmailAddressesWire {
    #[serde(rename = "ListVerifiedEmailAddressesResult")]
    result: Option<VerifiedEmailAddressesWire>,
    #[serde(rename = "ResponseMetadata")]
    metadata: Option<ResponseMetadataWire>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct VerifiedEmailAddressesWire {
    #[serde(rename = "VerifiedEmailAddresses")]
    addresses: MemberList<String>,
}
