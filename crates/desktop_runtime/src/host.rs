//! Host-side runtime helpers for executing reducer effects.
//!
//! [`DesktopHostContext`] owns the injected [`HostServices`] bundle and the [`DesktopConfig`].
//! Effects that talk to an asynchronous collaborator report back by dispatching a follow-up
//! [`DesktopAction`]; nothing here mutates desktop state directly.

mod boot;
mod collaborator_effects;
mod persistence_effects;

use std::{future::Future, rc::Rc};

use leptos::{logging, spawn_local, Callback};
use platform_host::{HostServices, PrefsStore};

use crate::{
    config::DesktopConfig,
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

#[derive(Clone)]
/// Host service bundle and configuration for desktop runtime side effects.
pub struct DesktopHostContext {
    services: HostServices,
    config: DesktopConfig,
}

impl DesktopHostContext {
    pub fn new(services: HostServices, config: DesktopConfig) -> Self {
        Self { services, config }
    }

    pub fn services(&self) -> &HostServices {
        &self.services
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    /// Returns the configured preference store.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.services.prefs.clone()
    }

    /// Loads persisted state once the provider is mounted and hydrates the reducer with it.
    pub fn install_boot_hydration(&self, dispatch: Callback<DesktopAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistDesktop => {
                persistence_effects::persist_desktop(self.clone(), runtime)
            }
            RuntimeEffect::PersistProfile => {
                persistence_effects::persist_profile(self.clone(), runtime)
            }
            RuntimeEffect::ClearPersistedData => {
                persistence_effects::clear_persisted_data(self.clone())
            }
            RuntimeEffect::ResolveFavicon { item_id, url } => spawn_follow_up(
                runtime,
                collaborator_effects::resolve_favicon(self.clone(), item_id, url),
            ),
            RuntimeEffect::OpenExternalUrl(url) => {
                let host = self.clone();
                spawn_local(async move {
                    if let Err(err) = host.services.external_urls.open_url(&url).await {
                        logging::warn!("open external url `{url}` failed: {err}");
                    }
                });
            }
            RuntimeEffect::ReadClipboard => spawn_follow_up(
                runtime,
                collaborator_effects::read_clipboard(self.clone()),
            ),
            RuntimeEffect::PickFile(target) => spawn_follow_up(
                runtime,
                collaborator_effects::import_file(self.clone(), target),
            ),
        }
    }
}

/// Runs `task` on the local executor and dispatches the action it yields, if any.
fn spawn_follow_up<F>(runtime: DesktopRuntimeContext, task: F)
where
    F: Future<Output = Option<DesktopAction>> + 'static,
{
    spawn_local(async move {
        if let Some(action) = task.await {
            runtime.dispatch_action(action);
        }
    });
}
