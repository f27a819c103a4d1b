use clap::Parser;

use crate::dom::Animation;
use crate::pages::{PageKind, VisibilityPolicy};

#[derive(Parser, Clone, Debug)]
#[command(version, about = "Blockchain explorer live-update client")]
pub struct LiveOptions {
    /// Base WebSocket URL of the broadcast service, e.g. ws://localhost:8000
    #[arg(short = 's', long, env = "EXPLORER_LIVE_SERVER_URL")]
    pub server_url: String,

    /// The page whose stream to subscribe to
    #[arg(short = 'p', long, value_enum, env = "EXPLORER_LIVE_PAGE")]
    pub page: PageKind,

    /// Address or block hash shown on the page (address and block pages only)
    #[arg(short = 'k', long, env = "EXPLORER_LIVE_KEY")]
    pub key: Option<String>,

    /// Host name sent in the handshake
    #[arg(long, default_value = "", env = "EXPLORER_LIVE_HOST")]
    pub host: String,

    /// Transition used for row updates and panel toggles: none, slide[:speed], fade[:speed]
    #[arg(long, default_value = "fade:fast", env = "EXPLORER_LIVE_ANIMATION")]
    pub animation: Animation,

    /// When informational counters are shown
    #[arg(
        long,
        value_enum,
        default_value = "show-when-positive",
        env = "EXPLORER_LIVE_INFO_VISIBILITY"
    )]
    pub info_visibility: VisibilityPolicy,

    /// Ids of informational counters present on the page
    #[arg(long, value_delimiter = ',', env = "EXPLORER_LIVE_INFO_IDS")]
    pub info_ids: Vec<String>,
}
