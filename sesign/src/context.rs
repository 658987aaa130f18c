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

use log::debug;
use sesign_core::{Context, OsEnv};
use sesign_http_send_reqwest::ReqwestHttpSend;
use sesign_ses::{Client, Config, Result};

/// Create a context reading the OS env and sending with a blocking reqwest client.
pub fn default_context() -> Context {
    Context::new()
        .with_env(OsEnv)
        .with_http_send(ReqwestHttpSend::default())
}

/// Create a client from `config` completed with the OS env.
///
/// Requests are routed through `proxy_server` when one is configured.
pub fn default_client(config: Config) -> Result<Client> {
    let ctx = default_context();
    let config = config.from_env(&ctx)?;
    debug!("default client loaded config: {config:?}");

    Client::new(ctx, &config)
}
