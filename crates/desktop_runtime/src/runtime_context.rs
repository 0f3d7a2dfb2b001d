//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, and host
//! bootstrap wiring. Rendering lives with whichever shell consumes [`use_desktop_runtime`].
#![allow(clippy::clone_on_copy)]

use leptos::*;
use platform_host::HostServices;
use platform_host_web::build_host_services;

use crate::{
    config::DesktopConfig,
    effect_executor,
    host::DesktopHostContext,
    model::{DesktopItem, DesktopState, ShellUiState},
    persistence::{summarize_data, DataSummary},
    reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect},
    tree,
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<DesktopHostContext>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Transient shell state (drafts, notices).
    pub ui: RwSignal<ShellUiState>,
    /// Queue of runtime effects emitted by the reducer and drained by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Most-used items across the whole tree, tracked against the state signal.
    pub fn frequent_items(&self) -> Vec<DesktopItem> {
        let limit = self.host.with_value(|host| host.config().frequent_items_limit);
        self.state.with(|state| {
            tree::most_used(&state.forest, limit)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Summary shown before clearing all data.
    pub fn data_summary(&self) -> DataSummary {
        let config = self.host.with_value(|host| host.config().clone());
        self.state.with(|state| summarize_data(state, &config))
    }
}

fn install_runtime_orchestration(runtime: DesktopRuntimeContext) {
    runtime
        .host
        .get_value()
        .install_boot_hydration(runtime.dispatch);
    effect_executor::install(runtime);
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots persisted state.
pub fn DesktopProvider(
    /// Injected host bundle; the browser adapters are used when omitted.
    #[prop(optional)]
    host_services: Option<HostServices>,
    /// Desktop configuration; defaults apply when omitted.
    #[prop(optional)]
    config: Option<DesktopConfig>,
    children: Children,
) -> impl IntoView {
    let host = store_value(DesktopHostContext::new(
        host_services.unwrap_or_else(build_host_services),
        config.unwrap_or_default(),
    ));
    let state = create_rw_signal(DesktopState::default());
    let ui = create_rw_signal(ShellUiState {
        boot_pending: true,
        ..ShellUiState::default()
    });
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut shell_ui = ui.get_untracked();
        let previous_desktop = desktop.clone();
        let previous_ui = shell_ui.clone();

        match reduce_desktop(&mut desktop, &mut shell_ui, action) {
            Ok(new_effects) => {
                if desktop != previous_desktop {
                    state.set(desktop);
                }
                if shell_ui != previous_ui {
                    ui.set(shell_ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(ReducerError::Input(err)) => {
                ui.update(|shell_ui| shell_ui.notice = Some(err.to_string()));
            }
            Err(err) => logging::warn!("desktop reducer error: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        state,
        ui,
        effects,
        dispatch,
    };

    provide_context(runtime.clone());

    install_runtime_orchestration(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    expect_context::<DesktopRuntimeContext>()
}
