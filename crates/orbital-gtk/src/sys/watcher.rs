use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use orbital::config::get_config_path;
use std::path::Path;
use std::time::Duration;

/// Editors tend to save in several steps; bursts closer than this become one reload.
const SETTLE_TIME: Duration = Duration::from_millis(150);

type WatchResult = notify::Result<Event>;

fn is_config_event(event: &Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

fn watch_dir(dir: &Path) -> notify::Result<(RecommendedWatcher, Receiver<WatchResult>)> {
    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok((watcher, bridge_rx))
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent() else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    // the watcher stops when dropped
    let (_watcher, events) = match watch_dir(config_dir) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to watch config directory: {}", e);
            return;
        }
    };

    while let Ok(res) = events.recv().await {
        match res {
            Ok(event) if is_config_event(&event, &config_path) => {
                while let Ok(Ok(_)) = tokio::time::timeout(SETTLE_TIME, events.recv()).await {}
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
