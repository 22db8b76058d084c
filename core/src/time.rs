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

//! Time related utils.

use crate::{Error, Result};
use chrono::{NaiveDateTime, Utc};

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// HTTP date format used by Azure Storage: "Sun, 06 Nov 1994 08:49:37 GMT"
pub const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Current time as unix seconds.
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// Format time into http date: `Sun, 06 Nov 1994 08:49:37 GMT`
///
/// ## Note
///
/// HTTP date is slightly different from RFC2822.
///
/// - Timezone is fixed to GMT.
/// - Day must be 2 digit.
pub fn format_http_date(t: DateTime) -> String {
    t.format(HTTP_DATE).to_string()
}

/// Parse http date like `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn parse_http_date(s: &str) -> Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, HTTP_DATE).map_err(|e| {
        Error::unexpected(format!("invalid http date {s:?}")).with_source(anyhow::Error::from(e))
    })?;
    Ok(t.and_utc())
}
