//! Effects that round-trip through an asynchronous host collaborator.
//!
//! Each task resolves to the follow-up action to feed back into the reducer. Collaborator
//! failures never escape: they become a fallback value or a user-visible notice.

use leptos::logging;
use platform_host::{validate_clipboard_url, validate_import};

use crate::{
    host::DesktopHostContext,
    model::{ImportTarget, ItemId},
    reducer::DesktopAction,
};

pub(super) async fn resolve_favicon(
    host: DesktopHostContext,
    item_id: ItemId,
    url: String,
) -> Option<DesktopAction> {
    let icon = host.services().favicons.resolve(&url).await;
    Some(DesktopAction::ApplyResolvedIcon { item_id, icon })
}

pub(super) async fn read_clipboard(host: DesktopHostContext) -> Option<DesktopAction> {
    let action = match host.services().clipboard.read_text().await {
        Ok(text) => match validate_clipboard_url(&text) {
            Ok(url) => DesktopAction::ClipboardUrlAccepted { url },
            Err(message) => DesktopAction::ShowNotice { message },
        },
        Err(err) => {
            logging::warn!("clipboard read failed: {err}");
            DesktopAction::ShowNotice {
                message: "The clipboard could not be read.".to_string(),
            }
        }
    };
    Some(action)
}

pub(super) async fn import_file(
    host: DesktopHostContext,
    target: ImportTarget,
) -> Option<DesktopAction> {
    let kind = target.kind();
    let accept = host.config().import_accept();
    let file = match host.services().file_import.pick_file(&accept).await {
        Ok(file) => file,
        Err(err) => {
            logging::warn!("{} import failed: {err}", kind.label());
            return Some(DesktopAction::ShowNotice {
                message: format!("The {} could not be imported.", kind.label()),
            });
        }
    };
    let action = match validate_import(kind, &file, &host.config().import_limits) {
        Ok(()) => DesktopAction::ApplyImportedFile { target, file },
        Err(message) => DesktopAction::ShowNotice { message },
    };
    Some(action)
}
