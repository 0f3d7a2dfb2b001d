use leptos::{logging, spawn_local, SignalGetUntracked};

use crate::{host::DesktopHostContext, persistence, runtime_context::DesktopRuntimeContext};

pub(super) fn persist_desktop(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let state = runtime.state.get_untracked();
    spawn_local(async move {
        if let Err(err) = persistence::persist_desktop_state(&*host.prefs_store(), &state).await {
            logging::warn!("persist desktop state failed: {err}");
        }
    });
}

pub(super) fn persist_profile(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let profile = runtime.state.get_untracked().profile;
    spawn_local(async move {
        if let Err(err) = persistence::persist_user_profile(&*host.prefs_store(), &profile).await {
            logging::warn!("persist user profile failed: {err}");
        }
    });
}

pub(super) fn clear_persisted_data(host: DesktopHostContext) {
    spawn_local(async move {
        if let Err(err) = persistence::clear_persisted_data(&*host.prefs_store()).await {
            logging::warn!("clear persisted data failed: {err}");
        }
    });
}
