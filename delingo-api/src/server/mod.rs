// Server module - HTTP server setup and routing
pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use self::handlers::{comments, posts, search, threads, votes};
use self::state::AppState;
use crate::errors::StartupError;

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState, cors: CorsLayer) -> Router {
    let forum = Router::new()
        .route("/thread", post(threads::create_thread))
        .route("/threads", get(threads::list_threads))
        .route(
            "/thread/:id",
            get(threads::get_thread)
                .put(threads::update_thread)
                .delete(threads::delete_thread),
        )
        .route("/post", post(posts::create_post))
        .route(
            "/post/:id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/:thread_id", get(posts::list_posts))
        // POST takes the post id, the other methods take the comment id
        .route(
            "/comment/:id",
            post(comments::create_comment)
                .get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route("/comments/:post_id", get(comments::list_comments))
        .route(
            "/vote/thread/:thread_id",
            post(votes::vote_on_thread).get(votes::my_thread_vote),
        )
        .route(
            "/vote/post/:post_id",
            post(votes::vote_on_post).get(votes::my_post_vote),
        )
        .route("/votes/user/:user_id", get(votes::user_votes))
        .route("/votes/thread/:thread_id", get(votes::thread_tally))
        .route("/votes/post/:post_id", get(votes::post_tally))
        .route("/search", get(search::search_forum));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/forum", forum)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server on the specified address until ctrl-c is received
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), StartupError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}
