use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use textenger_chat::message::LoadedMessage;
use textenger_chat::scroll::ScrollTarget;
use textenger_chat::tracker::LastSeenTracker;
use textenger_chat::view::ConversationView;
use textenger_core::conversation_ids;
use textenger_core::models::conversation::ConversationKind;
use textenger_core::models::message_id::MessageId;
use textenger_feed::feed::{FeedTab, order_feed};
use textenger_feed::session::SessionSeeds;
use textenger_storage::file::FileStore;
use textenger_storage::kv::KeyValueStore;
use textenger_storage::memory::MemoryStore;

use crate::config::{self, TextengerConfig};

#[derive(Debug, Parser)]
#[command(name = "textenger")]
#[command(about = "Textenger feed ordering and last-seen tooling", long_about = None)]
pub struct Cli {
    /// Path to config.json. Defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print posts in the order this session shows them
    Feed {
        /// Reuse a seed instead of drawing a new session
        #[arg(long)]
        seed: Option<String>,
        #[arg(long, value_enum, default_value_t = TabArg::Home)]
        tab: TabArg,
        posts: Vec<String>,
    },
    /// Inspect and edit stored last-seen positions
    LastSeen {
        #[command(subcommand)]
        action: LastSeenAction,
    },
    /// Show where a conversation would resume. Messages accept ranges like `1..10`
    Resolve {
        conversation_id: String,
        /// Inferred from the `room_`/`dm_` prefix when omitted
        #[arg(long)]
        kind: Option<ConversationKind>,
        #[arg(long, value_delimiter = ',', required = true)]
        messages: Vec<String>,
    },
    /// Walk through leaving a room and coming back, on a scratch store
    Demo {
        #[arg(default_value = "1")]
        room: String,
    },
    /// Show or reset the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum LastSeenAction {
    Get {
        conversation_id: String,
    },
    Set {
        conversation_id: String,
        message_id: String,
        #[arg(long)]
        user: Option<String>,
    },
    Remove {
        conversation_id: String,
    },
    /// Remove every stored position, as logout does
    Clear,
    List,
    IsNew {
        conversation_id: String,
        message_id: String,
        /// Message send time in Unix milliseconds
        #[arg(long)]
        timestamp: Option<i64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    Show,
    Path,
    Reset,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TabArg {
    Home,
    Explore,
}

impl From<TabArg> for FeedTab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Home => FeedTab::Home,
            TabArg::Explore => FeedTab::Explore,
        }
    }
}

pub fn run(cli: Cli, out: &mut impl Write) -> eyre::Result<()> {
    let explicit_config = cli.config;
    let config_path = || match &explicit_config {
        Some(path) => Ok(path.clone()),
        None => config::default_config_path(),
    };

    match cli.command {
        Commands::Config { action } => run_config(action, &config_path()?, out),
        Commands::Feed { seed, tab, posts } => run_feed(seed, tab.into(), &posts, out),
        Commands::Demo { room } => {
            let config = config::load_or_init(&config_path()?)?;
            run_demo(&config, &room, out)
        }
        Commands::LastSeen { action } => {
            let config = config::load_or_init(&config_path()?)?;
            let mut tracker = open_tracker(&config)?;
            run_last_seen(action, &mut tracker, out)
        }
        Commands::Resolve {
            conversation_id,
            kind,
            messages,
        } => {
            let config = config::load_or_init(&config_path()?)?;
            let tracker = open_tracker(&config)?;
            let kind = kind.unwrap_or_else(|| infer_kind(&conversation_id));
            let messages = parse_messages(&messages)?;

            let mut view = ConversationView::open(&conversation_id, kind, config.scroll_config());
            match view.on_messages_loaded(&tracker, &messages, jiff::Timestamp::now()) {
                Some(target) => writeln!(out, "{}", describe_target(&target))?,
                None => writeln!(out, "no messages to resolve against")?,
            }
            Ok(())
        }
    }
}

fn open_tracker(config: &TextengerConfig) -> eyre::Result<LastSeenTracker<FileStore>> {
    let root = config.store_root()?;
    tracing::debug!(root = %root.display(), "opening durable store");
    Ok(LastSeenTracker::open(FileStore::new(root)))
}

fn run_config(action: ConfigAction, path: &std::path::Path, out: &mut impl Write) -> eyre::Result<()> {
    match action {
        ConfigAction::Path => writeln!(out, "{}", path.display())?,
        ConfigAction::Show => {
            let config = config::load_or_init(path)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
        }
        ConfigAction::Reset => {
            config::delete_config(path)?;
            config::save_config(path, &TextengerConfig::default())?;
            writeln!(out, "config reset at {}", path.display())?;
        }
    }
    Ok(())
}

fn run_feed(
    seed: Option<String>,
    tab: FeedTab,
    posts: &[String],
    out: &mut impl Write,
) -> eyre::Result<()> {
    // A CLI process is one session, so session storage is in-memory.
    let seeds = SessionSeeds::new(MemoryStore::new());
    if let Some(seed) = &seed {
        seeds
            .store()
            .set(textenger_core::storage_keys::SESSION_SEED, seed)
            .map_err(|e| eyre::eyre!("failed to seed session: {e}"))?;
    }
    let session = seeds.get_or_create_session_seed();
    let info = seeds.session_info();

    writeln!(out, "seed:    {session}")?;
    if let Some(started) = info.session_start_time {
        writeln!(out, "started: {started}")?;
    }
    for (position, post) in order_feed(posts, &session, tab).iter().enumerate() {
        writeln!(out, "{:>3}. {post}", position + 1)?;
    }
    Ok(())
}

fn run_last_seen<S: KeyValueStore>(
    action: LastSeenAction,
    tracker: &mut LastSeenTracker<S>,
    out: &mut impl Write,
) -> eyre::Result<()> {
    match action {
        LastSeenAction::Get { conversation_id } => {
            match tracker.get_last_seen_position(&conversation_id) {
                Some(position) => writeln!(out, "{}", serde_json::to_string_pretty(position)?)?,
                None => writeln!(out, "no last seen position for {conversation_id}")?,
            }
        }
        LastSeenAction::Set {
            conversation_id,
            message_id,
            user,
        } => {
            let message_id = parse_message_id(&message_id);
            tracker.update_last_seen_position(&conversation_id, message_id.clone(), user.as_deref());
            writeln!(out, "{conversation_id}: last seen {message_id}")?;
        }
        LastSeenAction::Remove { conversation_id } => {
            tracker.remove_last_seen_position(&conversation_id);
            writeln!(out, "{conversation_id}: position reset")?;
        }
        LastSeenAction::Clear => {
            tracker.clear_all_positions();
            writeln!(out, "all positions cleared")?;
        }
        LastSeenAction::List => {
            writeln!(
                out,
                "{}",
                serde_json::to_string_pretty(&tracker.get_all_positions())?
            )?;
        }
        LastSeenAction::IsNew {
            conversation_id,
            message_id,
            timestamp,
        } => {
            let message_id = parse_message_id(&message_id);
            let is_new = tracker.is_message_new(&conversation_id, &message_id, timestamp);
            writeln!(out, "{is_new}")?;
        }
    }
    Ok(())
}

/// Replays the "left at message 3" walkthrough on an in-memory store so it
/// never touches real reading positions.
pub fn run_demo(config: &TextengerConfig, room: &str, out: &mut impl Write) -> eyre::Result<()> {
    let room_id = conversation_ids::room(room);
    let mut tracker = LastSeenTracker::open(MemoryStore::new());
    let history: Vec<LoadedMessage> = (1..=10).map(LoadedMessage::new).collect();
    let pruned: Vec<LoadedMessage> = (50..=60).map(LoadedMessage::new).collect();
    let scroll = config.scroll_config();
    let now = jiff::Timestamp::now();

    let mut open = |label: &str,
                    tracker: &LastSeenTracker<MemoryStore>,
                    kind: ConversationKind,
                    messages: &[LoadedMessage]|
     -> eyre::Result<()> {
        let mut view = ConversationView::open(&room_id, kind, scroll);
        let line = match view.on_messages_loaded(tracker, messages, now) {
            Some(target) => describe_target(&target),
            None => "unresolved".to_string(),
        };
        writeln!(out, "{label:<34} {line}")?;
        Ok(())
    };

    open("first visit", &tracker, ConversationKind::Room, &history)?;

    tracker.update_last_seen_position(&room_id, 3, None);
    open("left at message 3, came back", &tracker, ConversationKind::Room, &history)?;
    open("history pruned to 50..60", &tracker, ConversationKind::Room, &pruned)?;
    open("same thread as a direct message", &tracker, ConversationKind::Dm, &history)?;

    tracker.remove_last_seen_position(&room_id);
    open("position reset", &tracker, ConversationKind::Room, &history)?;
    Ok(())
}

pub fn describe_target(target: &ScrollTarget) -> String {
    match target {
        ScrollTarget::Bottom {
            index,
            message_id,
            reason,
        } => format!("bottom: message {message_id} (index {index}, {reason:?})"),
        ScrollTarget::Message {
            index,
            message_id,
            padding_px,
        } => format!("resume: message {message_id} (index {index}, {padding_px}px padding)"),
    }
}

fn infer_kind(conversation_id: &str) -> ConversationKind {
    conversation_ids::parse(conversation_id)
        .map(|(kind, _)| kind)
        .unwrap_or_default()
}

fn parse_message_id(raw: &str) -> MessageId {
    match raw.parse() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

const MAX_RANGE_LEN: u64 = 100_000;

/// Expand `1..10` (inclusive) and plain ids into a message list. Items that
/// contain `..` but are not numeric ranges are taken as text ids.
pub fn parse_messages(raw: &[String]) -> eyre::Result<Vec<LoadedMessage>> {
    let mut messages = Vec::new();
    for item in raw.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        let Some((start, end)) = parse_range(item) else {
            messages.push(LoadedMessage::new(parse_message_id(item)));
            continue;
        };
        if end < start {
            return Err(eyre::eyre!("empty range: {item}"));
        }
        if end.abs_diff(start) >= MAX_RANGE_LEN {
            return Err(eyre::eyre!("range too long: {item} (at most {MAX_RANGE_LEN} messages)"));
        }
        messages.extend((start..=end).map(LoadedMessage::new));
    }
    Ok(messages)
}

fn parse_range(item: &str) -> Option<(i64, i64)> {
    let (start, end) = item.split_once("..")?;
    let start = start.parse().ok()?;
    let end = end.trim_start_matches('=').parse().ok()?;
    Some((start, end))
}
