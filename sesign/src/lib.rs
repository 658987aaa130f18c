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

//! Signing and dispatching Amazon SES query API requests without effort.
//!
//! ```no_run
//! use sesign::ses::{Config, Email};
//!
//! # fn main() -> sesign::ses::Result<()> {
//! let client = sesign::default_client(Config::default())?;
//! let email = Email::new("sender@example.com", "Hello")
//!     .with_to("recipient@example.com")
//!     .with_text_body("Hello from sesign");
//! client.send_email(&email)?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub use sesign_core::*;

/// SES client, signer and error mapping.
pub mod ses {
    pub use sesign_ses::*;
}

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{default_client, default_context};
