use clap::Subcommand;
use reward_client::{ClientResult, Notifier};
use std::path::PathBuf;

use crate::console::ConsoleNotifier;

pub mod categories;
pub mod content;
pub mod rewards;
pub mod watch;

/// Report a failed list load the same way mutations report theirs
pub fn loaded<T>(result: ClientResult<T>) -> ClientResult<T> {
    result.inspect_err(|e| ConsoleNotifier.error(&e.toast_message()))
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List categories
    List,

    /// Create a category
    Create {
        /// Category name
        name: String,
    },

    /// Delete a category (rewards in it are kept)
    Delete {
        /// Category id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum RewardAction {
    /// List reward sessions with their state
    List,

    /// Create a reward session
    Create {
        /// Session title
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Banner image URL
        #[arg(long, default_value = "", conflicts_with = "banner_file")]
        banner_url: String,

        /// Upload this image as the banner
        #[arg(long)]
        banner_file: Option<PathBuf>,

        #[arg(long, default_value = "")]
        button_text: String,

        #[arg(long, default_value = "")]
        button_link: String,

        /// Category id
        #[arg(short, long)]
        category: Option<String>,

        /// Participant as NAME:MOBILE, repeat for each
        #[arg(short, long = "participant", value_name = "NAME:MOBILE")]
        participants: Vec<String>,
    },

    /// Choose the outcome of a session
    Rig {
        /// Session id
        id: String,

        /// "random" or the participant number shown by `rewards list`
        target: String,
    },

    /// Spin the wheel
    Run {
        /// Session id
        id: String,
    },

    /// Discard the outcome and return to a fresh session
    Reset {
        /// Session id
        id: String,
    },

    /// Delete a session
    Delete {
        /// Session id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ContentAction {
    /// List items
    List {
        /// Only items whose title or body contains this text
        #[arg(short, long, default_value = "")]
        query: String,

        /// Hide items that are not visible on the site
        #[arg(long)]
        visible_only: bool,
    },

    /// Create an item
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        body: Option<String>,

        #[arg(long)]
        image_url: Option<String>,

        #[arg(long)]
        link: Option<String>,
    },

    /// Show or hide an item
    Visibility {
        /// Item id
        id: String,
    },

    /// Add a like
    Like {
        /// Item id
        id: String,
    },

    /// Add a share
    Share {
        /// Item id
        id: String,
    },

    /// Delete an item
    Delete {
        /// Item id
        id: String,
    },
}
