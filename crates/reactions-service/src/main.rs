//! Reactions probe
//!
//! Loads the votes and reactions of a topic from the configured server and
//! logs the counts per post.
//!
//! Run with:
//! ```bash
//! cargo run -p reactions-service --bin reactions-probe -- \
//!     "https://forum.example.com/index.php?showtopic=42" 101 102
//! ```
//!
//! Configuration is loaded from `REACTIONS_*` environment variables.
//! `REACTIONS_USER_ID` marks the viewer's own choices and `REACTIONS_TOKEN`
//! is sent as the bearer token.

use std::env;
use std::sync::Arc;

use anyhow::{bail, Context};
use reactions_client::StaticTokenAuthenticator;
use reactions_common::{try_init_tracing, ReactionsConfig};
use reactions_core::UserInfo;
use reactions_service::{ReactionsPage, StaticPage};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Probe failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);
    let Some(url) = args.next() else {
        bail!("usage: reactions-probe <topic-url> <post-id>...");
    };

    let config = ReactionsConfig::from_env().context("Failed to load configuration")?;
    info!(server = %config.server, votes = ?config.votes, reactions = config.reactions, "Configuration loaded");

    let mut page = StaticPage::new(url.clone());
    for post_id in args {
        page = page.with_post(format!("post_{post_id}"));
    }
    if let Some(user_id) = env::var("REACTIONS_USER_ID")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
    {
        page = page.with_viewer(UserInfo::new(user_id));
    }

    let authenticator = match env::var("REACTIONS_TOKEN") {
        Ok(token) => StaticTokenAuthenticator::new(token),
        Err(_) => StaticTokenAuthenticator::anonymous(),
    };

    let Some(reactions_page) = ReactionsPage::builder(config)
        .authenticator(Arc::new(authenticator))
        .initialize(&page)
        .await?
    else {
        bail!("not a topic page: {url}");
    };

    for post_id in reactions_page.registry().post_ids() {
        let Some(view) = reactions_page.post(&post_id) else {
            continue;
        };
        let reactions = view
            .compact()
            .options
            .iter()
            .map(|option| format!("{}={}", option.kind, option.state.count))
            .collect::<Vec<_>>()
            .join(" ");

        info!(
            post_id = %post_id,
            likes = view.upvote.map_or(0, |b| b.count),
            dislikes = view.downvote.map_or(0, |b| b.count),
            own_vote = ?view.active_vote(),
            reactions = %reactions,
            "Post"
        );
    }

    Ok(())
}
