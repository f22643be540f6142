use serde::{Deserialize, Serialize};

use crate::seed::SessionSeed;
use crate::shuffle::shuffle_posts_for_user;

const EXPLORE_SCOPE: &str = "explore";

/// Which feed list is being rendered. Each tab gets its own order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedTab {
    #[default]
    Home,
    Explore,
}

impl FeedTab {
    pub fn seed_for(self, session: &SessionSeed) -> SessionSeed {
        match self {
            FeedTab::Home => session.clone(),
            FeedTab::Explore => session.scoped(EXPLORE_SCOPE),
        }
    }
}

/// Posts in the order this session shows them on `tab`.
pub fn order_feed<T: Clone>(posts: &[T], session: &SessionSeed, tab: FeedTab) -> Vec<T> {
    shuffle_posts_for_user(posts, tab.seed_for(session).as_str())
}
