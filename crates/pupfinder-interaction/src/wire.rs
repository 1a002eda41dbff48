//! Request/response bodies that only exist on the wire.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MatchResponse {
    #[serde(rename = "match")]
    pub matched: String,
}
