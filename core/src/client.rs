//! Stateless request builder and response parser for the board API.
//!
//! # Design
//! `BoardClient` holds only its configuration and carries no mutable state
//! between calls. Each endpoint is split into a `build_*` method that produces
//! a `RequestDescriptor` and a `parse_*` method that consumes an
//! `HttpResponse`. [`BoardService`](crate::BoardService) drives the network
//! round-trip between the two; hosts that do their own I/O can call them
//! directly.

use crate::config::{ClientConfig, PasswordAuth};
use crate::credential::Credential;
use crate::decode::decode_response;
use crate::error::ConfigError;
use crate::http::{HttpMethod, HttpResponse, RequestBuilder, RequestDescriptor};
use crate::outcome::Outcome;
use crate::types::{ChangePassword, PasswordChanged, PostSummary, SearchHit, SearchQuery};

pub const POST_LIST_PATH: &str = "/post-list";
pub const SEARCH_PATH: &str = "/search";
pub const PASSWORD_PATH: &str = "/password";

#[derive(Debug, Clone)]
pub struct BoardClient {
    config: ClientConfig,
}

impl BoardClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether the password endpoint needs the stored access token.
    pub fn password_needs_token(&self) -> bool {
        self.config.password_auth == PasswordAuth::AccessToken
    }

    pub fn build_post_list(&self, credential: Option<&Credential>) -> Result<RequestDescriptor, ConfigError> {
        RequestBuilder::new(HttpMethod::Get, self.config.community_base(), POST_LIST_PATH)
            .bearer(credential)
            .build()
    }

    pub fn build_search(
        &self,
        query: &SearchQuery,
        credential: Option<&Credential>,
    ) -> Result<RequestDescriptor, ConfigError> {
        RequestBuilder::new(HttpMethod::Get, self.config.community_base(), SEARCH_PATH)
            .query("keyword", &query.keyword)
            .query("menu", query.menu.as_deref().unwrap_or(""))
            .query("boardName", query.board_name.as_deref().unwrap_or(""))
            .bearer(credential)
            .build()
    }

    /// Under [`PasswordAuth::LiteralBearer`] the credential is ignored and the
    /// header value is the bare word `Bearer`.
    pub fn build_change_password(
        &self,
        input: &ChangePassword,
        credential: Option<&Credential>,
    ) -> Result<RequestDescriptor, ConfigError> {
        let builder = RequestBuilder::new(HttpMethod::Post, self.config.user_base(), PASSWORD_PATH).json_body(input);
        let builder = match self.config.password_auth {
            PasswordAuth::LiteralBearer => builder.literal_authorization("Bearer"),
            PasswordAuth::AccessToken => builder.bearer(credential),
        };
        builder.build()
    }

    pub fn parse_post_list(&self, response: &HttpResponse) -> Outcome<Vec<PostSummary>> {
        decode_response(response)
    }

    pub fn parse_search(&self, response: &HttpResponse) -> Outcome<Vec<SearchHit>> {
        decode_response(response)
    }

    pub fn parse_change_password(&self, response: &HttpResponse) -> Outcome<PasswordChanged> {
        decode_response(response)
    }
}
