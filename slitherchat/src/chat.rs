use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::ChatEvent;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::ChatConfig;
use crate::simulation::SpawnSender;

// How often the sleeping thread checks whether it should stop
const STOP_POLL: Duration = Duration::from_millis(50);

/// Prefix keeping simulated users apart from real chat identities.
pub const SIMULATED_IDENTITY_PREFIX: &str = "sim:";

/// Background producer of chat events picked from a fixed roster of usernames.
pub struct SimulatedChat {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SimulatedChat {
    pub fn start(config: &ChatConfig, sender: SpawnSender, seed: Option<u64>) -> Result<Self> {
        if config.usernames.is_empty() {
            anyhow::bail!("simulated chat needs at least one username");
        }

        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let usernames = config.usernames.clone();
        let messages = config.messages.clone();
        let min_ms = config.min_interval_ms;
        let max_ms = config.max_interval_ms;
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let handle = thread::Builder::new()
            .name("simulated-chat".to_string())
            .spawn(move || {
                while flag.load(Ordering::Relaxed) {
                    let wait = Duration::from_millis(rng.random_range(min_ms..=max_ms));
                    if !sleep_while(&flag, wait) {
                        break;
                    }
                    let username = &usernames[rng.random_range(0..usernames.len())];
                    let mut event = ChatEvent::new(
                        format!("{SIMULATED_IDENTITY_PREFIX}{username}"),
                        username.as_str(),
                    );
                    if !messages.is_empty() {
                        let text = &messages[rng.random_range(0..messages.len())];
                        event = event.with_message(text.as_str());
                    }
                    if !sender.send(event) {
                        tracing::debug!("Spawn queue closed, simulated chat exiting");
                        break;
                    }
                    tracing::debug!(%username, "Simulated chat message");
                }
            })
            .context("failed to spawn simulated chat thread")?;

        tracing::info!(users = config.usernames.len(), "Simulated chat started");
        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Simulated chat thread panicked");
            } else {
                tracing::info!("Simulated chat stopped");
            }
        }
    }
}

impl Drop for SimulatedChat {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sleeps in short slices. Returns false if the flag was cleared meanwhile.
fn sleep_while(flag: &AtomicBool, total: Duration) -> bool {
    let mut remaining = total;
    while !remaining.is_zero() {
        if !flag.load(Ordering::Relaxed) {
            return false;
        }
        let slice = remaining.min(STOP_POLL);
        thread::sleep(slice);
        remaining -= slice;
    }
    flag.load(Ordering::Relaxed)
}
