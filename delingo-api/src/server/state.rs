// App state for Axum server
use std::sync::Arc;

use delingo_ledger::VoteLedger;
use delingo_repository::ForumRepository;

use crate::config::Dependencies;
use crate::server::auth::TokenVerifier;

#[derive(Clone)]
pub struct AppState {
    pub forum: Arc<dyn ForumRepository>,
    pub ledger: VoteLedger,
    pub tokens: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(dependencies: Dependencies, tokens: TokenVerifier) -> Self {
        Self {
            forum: dependencies.forum_repository,
            ledger: dependencies.vote_ledger,
            tokens: Arc::new(tokens),
        }
    }
}
