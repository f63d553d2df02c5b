//! `users.*` methods

use super::Api;
use crate::error::{Error, Result};
use crate::models::{truthy, Channels, Params, User, UserRef, Users};

pub struct UserApi {
    api: Api,
}

impl UserApi {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn list(&self, filters: Params) -> Result<Users> {
        let resp = self.api.api_call("users.list", filters).await?;
        Users::from_values(&self.api, resp.require_array("members")?)
    }

    /// Channels `user` belongs to.
    ///
    /// Only the first page is supported: a response carrying a
    /// `response_metadata.next_cursor` fails with
    /// [`Error::PaginationUnsupported`].
    pub async fn conversations<'a>(&self, user: impl Into<UserRef<'a>>) -> Result<Channels> {
        let params = Params::new().with("user", user.into().id());
        let resp = self.api.api_call("users.conversations", params).await?;

        if let Some(metadata) = resp.nested("response_metadata") {
            if metadata.get("next_cursor").is_some_and(truthy) {
                return Err(Error::PaginationUnsupported {
                    metadata: metadata.into_value(),
                });
            }
        }
        Channels::from_values(&self.api, resp.require_array("channels")?)
    }

    pub async fn by_name(&self, name: &str) -> Result<User> {
        self.list(Params::new()).await?.by_name(name).cloned()
    }

    pub async fn by_id(&self, id: &str) -> Result<User> {
        self.list(Params::new()).await?.by_id(id).cloned()
    }
}
