//! Event loop that owns a [`WidgetState`] and carries out its effects.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::{
    config::Timings,
    provider::WeatherProvider,
    widget::{Action, Effect, WidgetState},
};

/// Something that can show the widget, e.g. a terminal.
pub trait Surface {
    fn present(&mut self, state: &WidgetState);
}

impl<F> Surface for F
where
    F: FnMut(&WidgetState),
{
    fn present(&mut self, state: &WidgetState) {
        self(state)
    }
}

#[derive(Debug)]
pub struct Runtime {
    provider: Arc<dyn WeatherProvider>,
    timings: Timings,
    done_tx: mpsc::UnboundedSender<Action>,
    done_rx: mpsc::UnboundedReceiver<Action>,
    pending: usize,
}

impl Runtime {
    pub fn new(provider: Arc<dyn WeatherProvider>, timings: Timings) -> Self {
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        Self {
            provider,
            timings,
            done_tx,
            done_rx,
            pending: 0,
        }
    }

    /// Drive `state` until `input` is closed and every spawned fetch and
    /// timer has reported back. `surface` is refreshed after each action.
    pub async fn run(
        mut self,
        mut state: WidgetState,
        mut input: mpsc::Receiver<Action>,
        surface: &mut dyn Surface,
    ) -> WidgetState {
        let effects = state.start();
        self.spawn_all(effects);
        surface.present(&state);

        let mut input_open = true;

        loop {
            if !input_open && self.pending == 0 {
                break;
            }

            let action = tokio::select! {
                Some(action) = self.done_rx.recv(), if self.pending > 0 => {
                    self.pending -= 1;
                    action
                }
                next = input.recv(), if input_open => match next {
                    Some(action) => action,
                    None => {
                        debug!(pending = self.pending, "input closed, draining");
                        input_open = false;
                        continue;
                    }
                },
            };

            trace!(?action, "applying action");
            let effects = state.update(action);
            self.spawn_all(effects);
            surface.present(&state);
        }

        state
    }

    fn spawn_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.spawn(effect);
        }
    }

    fn spawn(&mut self, effect: Effect) {
        let tx = self.done_tx.clone();
        self.pending += 1;

        match effect {
            Effect::Fetch { seq, place } => {
                let provider = Arc::clone(&self.provider);
                let settle_delay = self.timings.settle_delay();
                debug!(seq, %place, "fetching");

                tokio::spawn(async move {
                    let result = provider.current_weather(&place).await;
                    if result.is_ok() {
                        tokio::time::sleep(settle_delay).await;
                    }
                    let _ = tx.send(Action::FetchSettled { seq, result });
                });
            }
            Effect::ResetShake { generation } => {
                let after = self.timings.shake();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = tx.send(Action::ShakeElapsed { generation });
                });
            }
            Effect::DismissError { generation } => {
                let after = self.timings.error_dismiss();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = tx.send(Action::ErrorDismissed { generation });
                });
            }
        }
    }
}
