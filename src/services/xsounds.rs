//! Sound effects.

use crate::db::{Database, DbError, XSound};

/// Looks up sound effects and their tags.
pub struct XSoundsService {
    db: Database,
}

impl XSoundsService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<XSound>, DbError> {
        self.db.xsounds().find_by_name(name).await
    }

    pub async fn get_sound_tags(&self, name: &str) -> Result<Vec<String>, DbError> {
        self.db.xsounds().tags_for(name).await
    }
}
