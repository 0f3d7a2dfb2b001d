pub mod config;
pub mod effect_executor;
pub mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod tree;
pub mod window_manager;

pub use config::DesktopConfig;
pub use host::DesktopHostContext;
pub use model::*;
pub use persistence::{
    clear_persisted_data, load_desktop_state, persist_desktop_state, persist_user_profile,
    summarize_data, DataSummary,
};
pub use reducer::{reduce_desktop, DesktopAction, InputError, ReducerError, RuntimeEffect};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
pub use tree::TreeError;
pub use window_manager::ViewError;
