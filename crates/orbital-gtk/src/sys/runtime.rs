use crate::events::AppEvent;
use crate::sys::{server, watcher};
use async_channel::Sender;
use std::io;
use std::thread::{self, JoinHandle};
use tokio::runtime::Builder;

/// Runs the control socket and the config watcher on their own thread.
///
/// The runtime is built up front so a failure reaches the caller instead of
/// dying silently on the service thread.
pub fn start_background_services(tx: Sender<AppEvent>) -> io::Result<JoinHandle<()>> {
    let rt = Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("orbital-io")
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("orbital-services".into())
        .spawn(move || {
            rt.block_on(async {
                tokio::join!(
                    server::run_server(tx.clone()),
                    watcher::run_async_watcher(tx),
                );
            });
            log::warn!("Background services stopped");
        })
}
