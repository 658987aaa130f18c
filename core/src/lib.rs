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

//! Core components for signing and dispatching SES requests.
//!
//! This crate provides the foundational types shared by the sesign crates.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending and environment access
//! - **Hash**: HMAC and base64 helpers used to compute request signatures
//! - **Time**: The timestamp formats the service expects
//!
//! ## Example
//!
//! ```no_run
//! use sesign_core::{Context, OsEnv};
//! use sesign_core::hash::base64_hmac_sha256;
//!
//! let ctx = Context::new().with_env(OsEnv);
//! let secret = ctx.env_var("AWS_SECRET_ACCESS_KEY").unwrap_or_default();
//!
//! let signature = base64_hmac_sha256(secret.as_bytes(), b"Tue, 02 Jan 2024 03:04:05 GMT");
//! println!("{signature}");
//! ```
//!
//! ## Traits
//!
//! - [`HttpSend`]: For sending HTTP requests, one blocking round-trip per call
//! - [`Env`]: For environment variable access
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time formatting utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result};
