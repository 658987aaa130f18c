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

use anyhow::Result;
use reqwest::blocking::Client;
use reqwest::Proxy;
use sesign_core::{Context, OsEnv};
use sesign_http_send_reqwest::ReqwestHttpSend;
use sesign_ses::Config;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::init();

    // Credentials, endpoint and proxy come from AWS_ACCESS_KEY_ID,
    // AWS_SECRET_ACCESS_KEY, SES_SERVER, SES_PROXY_SERVER...
    let ctx = Context::new().with_env(OsEnv);
    let config = Config::default().from_env(&ctx)?;

    let builder = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10);
    let http_send = match config.proxy_server.as_deref() {
        Some(proxy) => {
            ReqwestHttpSend::new_proxied(builder.proxy(Proxy::all(proxy)?).build()?, proxy)
        }
        None => ReqwestHttpSend::new(builder.build()?),
    };

    let client = sesign_ses::Client::new(ctx.with_http_send(http_send), &config)?;
    let quota = client.get_send_quota()?;
    println!(
        "max send rate: {}/s, sent {} of {} in the last 24 hours",
        quota.max_send_rate, quota.sent_last_24_hours, quota.max_24_hour_send
    );

    Ok(())
}
