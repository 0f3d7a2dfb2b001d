use leptos::{create_effect, spawn_local, Callable, Callback};

use crate::{host::DesktopHostContext, persistence, reducer::DesktopAction};

/// Loads the stored desktop once on mount and hands it to the reducer.
///
/// The provider starts with `boot_pending` set, so actions dispatched before this lands keep
/// their state changes but emit no persist effects.
pub(super) fn install_boot_hydration(host: DesktopHostContext, dispatch: Callback<DesktopAction>) {
    create_effect(move |_| {
        let host = host.clone();
        spawn_local(async move {
            let state = persistence::load_desktop_state(&*host.prefs_store()).await;
            dispatch.call(DesktopAction::HydrateSnapshot {
                snapshot: state.snapshot(),
                profile: state.profile,
            });
        });
    });
}
