//! `emoji.list`

use super::Api;
use crate::error::Result;
use crate::models::{Emojies, Params};

pub struct EmojiApi {
    api: Api,
}

impl EmojiApi {
    pub(crate) fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Emojies> {
        let resp = self.api.api_call("emoji.list", Params::new()).await?;
        Emojies::from_record(&resp.require_nested("emoji")?)
    }
}
