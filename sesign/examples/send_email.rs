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
use sesign::ses::{Config, Email};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    // Credentials and endpoint are read from AWS_ACCESS_KEY_ID,
    // AWS_SECRET_ACCESS_KEY, SES_SERVER...
    let client = sesign::default_client(Config::default())?;

    let quota = client.get_send_quota()?;
    println!(
        "sent {} of {} messages in the last 24 hours",
        quota.sent_last_24_hours, quota.max_24_hour_send
    );

    let (Ok(from), Ok(to)) = (env::var("SESIGN_EXAMPLE_FROM"), env::var("SESIGN_EXAMPLE_TO"))
    else {
        println!("SESIGN_EXAMPLE_FROM or SESIGN_EXAMPLE_TO is not set, skip sending");
        return Ok(());
    };

    let email = Email::new(from, "Hello from sesign")
        .with_to(to)
        .with_text_body("This message was signed and sent by sesign.")
        .with_charset("UTF-8");
    let resp = client.send_email(&email)?;
    println!("message id: {}", resp.message_id);

    Ok(())
}
