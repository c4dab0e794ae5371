//! # securticket-client
//!
//! Typed HTTP client for the SecurTicket REST API.
//!
//! [`http::ApiClient::dispatch`] is the core contract: it attaches the
//! stored access token as a bearer credential and recovers from a rejected
//! credential exactly once per request by exchanging the refresh token for
//! a new access token and replaying the original request. The transport
//! sits behind [`http::HttpTransport`] so tests drive the retry logic with
//! a scripted fake instead of a live server.
//!
//! Endpoint wrappers live in [`endpoints`] and return discriminated
//! response types; [`login::LoginFlow`] combines the login endpoint with
//! the lockout gate and the ephemeral attempts-remaining warning.

pub mod endpoints;
pub mod http;
pub mod login;
pub mod response;

pub use http::{ApiClient, ApiRequest, ApiResponse, HttpTransport, Method, ReqwestTransport};
pub use login::{LoginFlow, LoginResult};
pub use response::ApiFailure;
