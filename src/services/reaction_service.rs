use tracing::info;

use crate::notion::{payloads, properties::multi_select, NotionClient, NotionError, SelectOption};

/// Multi-select property holding the names of users who liked a row.
pub const LIKE_PROPERTY: &str = "like";

/// Remove `user` when present, otherwise append `{name: user}`. Membership is
/// exact name equality; the order of the remaining entries is kept.
pub fn toggle(likes: Vec<SelectOption>, user: &str) -> Vec<SelectOption> {
    if likes.iter().any(|like| like.name == user) {
        likes.into_iter().filter(|like| like.name != user).collect()
    } else {
        let mut likes = likes;
        likes.push(SelectOption::named(user));
        likes
    }
}

pub struct ReactionService {
    notion: NotionClient,
}

impl ReactionService {
    pub fn new(notion: NotionClient) -> Self {
        Self { notion }
    }

    /// Read-modify-write of the row's like set. Two toggles racing on the same
    /// row can lose one of them: the last write replaces the whole list.
    pub async fn toggle_like(&self, row_id: &str, user: &str) -> Result<Vec<SelectOption>, NotionError> {
        let row = self.notion.retrieve_page(row_id).await?;
        let likes = toggle(multi_select(&row, LIKE_PROPERTY), user);

        self.notion
            .update_page(row_id, &payloads::like_update(&likes))
            .await?;

        info!(row_id = %row_id, user = %user, likes = likes.len(), "like toggled");
        Ok(likes)
    }
}
