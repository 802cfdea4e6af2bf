//! Rave mode: a cancellable background task rotating the displayed status
//! every few seconds, optionally broadcasting each pick to a channel.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::models::{AnnoyTarget, Quote};
use crate::selection;
use crate::service::QuoteError;
use crate::store::QuoteStore;

/// Fixed rotation period while rave mode is running.
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(5);

/// Where status updates and channel broadcasts land. Implemented over the
/// live gateway in `discord::sink`; mocked in tests.
#[async_trait]
pub trait PresenceSink: Send + Sync {
    /// Display a quote's status line as the bot presence.
    async fn set_quote_status(&self, text: &str) -> Result<(), String>;
    /// Display the fixed placeholder presence.
    async fn set_fallback_status(&self) -> Result<(), String>;
    /// Post a message to the broadcast channel chosen at rave start.
    async fn send_channel_message(&self, channel_id: u64, text: &str) -> Result<(), String>;
}

enum RaveState {
    Idle,
    Running {
        annoy: AnnoyTarget,
        token: CancellationToken,
    },
}

/// Process-wide singleton. At most one rotation task runs at a time; the
/// toggle always observes and flips the current state under the lock.
pub struct RaveController {
    store: Arc<QuoteStore>,
    state: Mutex<RaveState>,
    interval: Duration,
}

impl RaveController {
    pub fn new(store: Arc<QuoteStore>) -> Self {
        Self::with_interval(store, ROTATION_INTERVAL)
    }

    /// Tests shrink the interval instead of sleeping real seconds.
    pub fn with_interval(store: Arc<QuoteStore>, interval: Duration) -> Self {
        Self {
            store,
            state: Mutex::new(RaveState::Idle),
            interval,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(&*self.state.lock(), RaveState::Running { .. })
    }

    pub fn annoy_target(&self) -> AnnoyTarget {
        match &*self.state.lock() {
            RaveState::Running { annoy, .. } => *annoy,
            RaveState::Idle => AnnoyTarget::None,
        }
    }

    /// Flips rave mode. Owner only. Returns true when this call activated
    /// it, false when it stopped a running rotation.
    ///
    /// Stopping cancels the rotation task (at most one in-flight cycle may
    /// still race the cancellation), clears the annoy target and reapplies
    /// the ordinary daily status.
    pub async fn toggle(
        &self,
        actor_is_owner: bool,
        annoy_raw: Option<&str>,
        channel: Option<u64>,
        sink: Arc<dyn PresenceSink>,
    ) -> Result<bool, QuoteError> {
        if !actor_is_owner {
            return Err(QuoteError::Forbidden);
        }

        // Observe and flip in one critical section so two racing toggles
        // can never both start a rotation task. The guard is confined to
        // this block so it is provably released before any `.await`.
        let was_running = {
            let mut state = self.state.lock();
            match std::mem::replace(&mut *state, RaveState::Idle) {
                RaveState::Running { token, .. } => {
                    token.cancel();
                    log::info!("Rave mode deactivated");
                    true
                }
                RaveState::Idle => {
                    let annoy = match annoy_raw {
                        None => AnnoyTarget::None,
                        Some(raw) => AnnoyTarget::parse(raw)
                            .ok_or_else(|| QuoteError::InvalidAnnoy(raw.to_string()))?,
                    };
                    if self.store.load().is_empty() {
                        return Err(QuoteError::NoQuotes);
                    }

                    let token = CancellationToken::new();
                    *state = RaveState::Running {
                        annoy,
                        token: token.clone(),
                    };

                    log::info!("Rave mode activated (annoy: {:?}, channel: {:?})", annoy, channel);
                    tokio::spawn(rotation_loop(
                        self.store.clone(),
                        sink.clone(),
                        annoy,
                        channel,
                        self.interval,
                        token,
                    ));
                    false
                }
            }
        };

        if was_running {
            apply_daily_status(&self.store, sink.as_ref()).await;
            Ok(false)
        } else {
            Ok(true)
        }
    }
}

/// The message posted for one rotation cycle.
fn broadcast_body(annoy: AnnoyTarget, quote: &Quote) -> String {
    format!("{}\"{}\" (#{})", annoy.mention_prefix(), quote.text, quote.id)
}

async fn rotation_loop(
    store: Arc<QuoteStore>,
    sink: Arc<dyn PresenceSink>,
    annoy: AnnoyTarget,
    channel: Option<u64>,
    period: Duration,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(period);
    let mut cursor: usize = 0;

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                log::info!("Rave rotation cancelled");
                return;
            }
            _ = ticker.tick() => {
                let quotes = store.load();
                if quotes.is_empty() {
                    // Everything was deleted mid-rave; keep spinning quietly.
                    continue;
                }
                // Rotate over status-eligible quotes, or all of them when
                // none fit the limit.
                let eligible = selection::eligible_indices(&quotes);
                let pool: Vec<usize> = if eligible.is_empty() {
                    (0..quotes.len()).collect()
                } else {
                    eligible
                };
                let quote = &quotes[pool[cursor % pool.len()]];
                cursor = cursor.wrapping_add(1);

                let status = selection::status_candidate(quote);
                if let Err(e) = sink.set_quote_status(&status).await {
                    log::warn!("Rave: failed to update status: {}", e);
                }
                if let Some(channel_id) = channel {
                    let body = broadcast_body(annoy, quote);
                    if let Err(e) = sink.send_channel_message(channel_id, &body).await {
                        log::warn!("Rave: failed to send to channel {}: {}", channel_id, e);
                    }
                }
            }
        }
    }
}

/// Computes today's status quote and applies it, falling back to the
/// placeholder when nothing fits the limit. Used at startup and when rave
/// mode stops.
pub async fn apply_daily_status(store: &QuoteStore, sink: &dyn PresenceSink) {
    let quotes = store.load();
    let eligible = selection::eligible_indices(&quotes);
    if eligible.is_empty() {
        if let Err(e) = sink.set_fallback_status().await {
            log::warn!("Failed to set fallback status: {}", e);
        }
        return;
    }
    let index = eligible[selection::daily_index(&selection::today_key(), eligible.len())];
    let status = selection::status_candidate(&quotes[index]);
    if let Err(e) = sink.set_quote_status(&status).await {
        log::warn!("Failed to set daily status: {}", e);
    }
}
