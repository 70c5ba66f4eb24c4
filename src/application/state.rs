use std::sync::Arc;

use crate::db::DbConn;
use crate::services::completion::CompletionService;
use crate::services::views::ViewRenderer;

/// Shared view registry
pub type SharedViews = Arc<ViewRenderer>;

/// Application state containing all shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
    pub views: SharedViews,
    pub completion: CompletionService,
}

impl AppState {
    pub fn new(db: DbConn, views: SharedViews) -> Self {
        let completion = CompletionService::new(db.clone());
        Self {
            db,
            views,
            completion,
        }
    }
}
