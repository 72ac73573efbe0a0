//! Deployment state and revision resolution

pub mod fleet;
pub mod hooks;
pub mod resolver;
pub mod state;

/// Application package of game servers
pub const SPORTBUKKIT_PACKAGE: &str = "SportBukkit";

/// Application package of proxy servers
pub const BUNGEECORD_PACKAGE: &str = "BungeeCord";

/// Package containing the plugin bundle
pub const PLUGINS_PACKAGE: &str = "Plugins";
