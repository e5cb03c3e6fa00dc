mod artifacts;
mod clear_cache;
mod common;
mod config;
mod env_vars;
mod projects;
mod recent_builds;
mod retry;
mod show;
mod ssh_keys;
mod test_metadata;
mod trigger;

pub use self::artifacts::list_artifacts;
pub use self::clear_cache::clear_cache;
pub use self::config::config;
pub use self::env_vars::{add_env_var, delete_env_var, list_env_vars};
pub use self::projects::projects;
pub use self::recent_builds::recent_builds;
pub use self::retry::{cancel_build, retry_build};
pub use self::show::show;
pub use self::ssh_keys::add_ssh_key;
pub use self::test_metadata::test_metadata;
pub use self::trigger::trigger;
