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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// API version every request is pinned to.
pub const API_VERSION: &str = "2010-12-01";
/// Endpoint used when no server is configured.
pub const DEFAULT_HOST: &str = "email.us-east-1.amazonaws.com";
/// Signature algorithm name, used both as parameter and in the authorization header.
pub const SIGNATURE_METHOD: &str = "HmacSHA256";
/// Signature version parameter value.
pub const SIGNATURE_VERSION: &str = "2";
/// Content type of every request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("sesign/", env!("CARGO_PKG_VERSION"));

// Headers used in ses requests.
pub const X_AMZN_AUTHORIZATION: &str = "x-amzn-authorization";
pub const X_AMZN_REQUESTID: &str = "x-amzn-requestid";

// Protocol parameters injected into every request.
pub const PARAM_ACTION: &str = "Action";
pub const PARAM_SIGNATURE_VERSION: &str = "SignatureVersion";
pub const PARAM_SIGNATURE_METHOD: &str = "SignatureMethod";
pub const PARAM_ACCESS_KEY_ID: &str = "AWSAccessKeyId";
pub const PARAM_VERSION: &str = "Version";
pub const PARAM_TIMESTAMP: &str = "Timestamp";

// Env values used by config.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const SES_SERVER: &str = "SES_SERVER";
pub const SES_PORT: &str = "SES_PORT";
pub const SES_USE_SSL: &str = "SES_USE_SSL";
pub const SES_PROXY_SERVER: &str = "SES_PROXY_SERVER";
pub const SES_PATH: &str = "SES_PATH";

/// AsciiSet used to encode query keys, query values and the signature.
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static SES_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
