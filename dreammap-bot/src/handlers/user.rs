//! Registers the sender on every message before any other handler runs.

use std::sync::Arc;

use async_trait::async_trait;
use dreammap_core::{Handler, Message, Result};
use storage::DreamRepository;
use tracing::{debug, instrument};

use super::{message_language, storage_err};

/// Creates or refreshes the users row (username, language) for the sender.
pub struct UserHandler {
    repo: Arc<DreamRepository>,
}

impl UserHandler {
    pub fn new(repo: Arc<DreamRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl Handler for UserHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let lang = message_language(message);
        let user_id = self
            .repo
            .get_or_create_user(message.user.id, message.user.username.as_deref(), lang.code())
            .await
            .map_err(storage_err)?;
        debug!(internal_id = user_id, lang = lang.code(), "step: user registered");
        Ok(true)
    }
}
