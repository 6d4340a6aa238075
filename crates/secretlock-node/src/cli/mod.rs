mod commands;
mod config_cmd;
mod deploy;
mod keys;
mod lock;
mod utils;

pub use commands::{Cli, Commands};
pub use config_cmd::handle_config;
pub use deploy::handle_deploy;
pub use keys::{commitment, keygen, show_address, sign};
pub use lock::{is_authorized, is_used, set_signer, show_events, show_owner, verify};
pub use utils::{init_logging, load_config};
