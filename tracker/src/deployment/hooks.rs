//! Lifecycle hooks for deployment state

use tracing::debug;

use crate::deployment::state::HasDeployment;
use crate::lifecycle::{Lifecycle, LifecycleEvent};

/// Register the deployment hooks on a server lifecycle
///
/// Plugin versions are cleared before startup is processed, so a startup
/// report that leaves them out does not keep the previous run's versions.
pub fn register_hooks<T>(lifecycle: &mut Lifecycle<T>)
where
    T: HasDeployment + 'static,
{
    lifecycle.before_event(LifecycleEvent::Startup, |server: &mut T| {
        debug!("Clearing plugin versions of server {}", server.server_id());
        server.deployment_mut().reset_plugin_versions();
        true
    });
}
