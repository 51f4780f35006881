//! Widget state and the transitions that drive it.
//!
//! `WidgetState::update` is pure: it mutates the state and returns the
//! [`Effect`]s the runtime must carry out (fetches and timers). Every effect
//! posts exactly one [`Action`] back when it completes.

use tracing::debug;

use crate::{error::FetchError, model::WeatherReading};

/// Events fed into the widget, from the user or from finished effects.
#[derive(Debug)]
pub enum Action {
    /// The text in the search field changed.
    DraftChanged(String),
    /// The search form was submitted.
    Submit,
    /// A fetch started by [`Effect::Fetch`] has settled.
    FetchSettled {
        seq: u64,
        result: Result<WeatherReading, FetchError>,
    },
    /// The shake timer started by [`Effect::ResetShake`] fired.
    ShakeElapsed { generation: u64 },
    /// The banner timer started by [`Effect::DismissError`] fired.
    ErrorDismissed { generation: u64 },
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Look up current weather for `place`; settle with token `seq`.
    Fetch { seq: u64, place: String },
    /// Clear the shake flag after the shake window.
    ResetShake { generation: u64 },
    /// Clear the error banner after the dismiss delay.
    DismissError { generation: u64 },
}

/// Which of the three mutually exclusive card states to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    /// Nothing has loaded yet.
    Bootstrapping,
    /// A reading exists but a newer fetch is in flight.
    Loading,
    Populated(&'a WeatherReading),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState {
    place: String,
    draft: String,
    reading: Option<WeatherReading>,
    loading: bool,
    error: Option<FetchError>,
    shake: bool,
    latest_seq: u64,
    shake_generation: u64,
    error_generation: u64,
}

impl WidgetState {
    pub fn new(initial_place: impl Into<String>) -> Self {
        Self {
            place: initial_place.into(),
            draft: String::new(),
            reading: None,
            loading: false,
            error: None,
            shake: false,
            latest_seq: 0,
            shake_generation: 0,
            error_generation: 0,
        }
    }

    /// Kick off the initial lookup for the starting place.
    pub fn start(&mut self) -> Vec<Effect> {
        vec![self.begin_fetch()]
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::DraftChanged(text) => {
                self.draft = text;
                Vec::new()
            }
            Action::Submit => self.submit(),
            Action::FetchSettled { seq, result } => self.settle(seq, result),
            Action::ShakeElapsed { generation } => {
                if generation == self.shake_generation {
                    self.shake = false;
                }
                Vec::new()
            }
            Action::ErrorDismissed { generation } => {
                if generation == self.error_generation {
                    self.error = None;
                }
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        let draft = std::mem::take(&mut self.draft);

        if draft.is_empty() {
            self.shake = true;
            self.shake_generation += 1;
            return vec![Effect::ResetShake {
                generation: self.shake_generation,
            }];
        }

        if draft == self.place {
            debug!(place = %draft, "place unchanged, not refetching");
            return Vec::new();
        }

        self.place = draft;
        vec![self.begin_fetch()]
    }

    fn begin_fetch(&mut self) -> Effect {
        self.loading = true;
        self.latest_seq += 1;
        Effect::Fetch {
            seq: self.latest_seq,
            place: self.place.clone(),
        }
    }

    fn settle(&mut self, seq: u64, result: Result<WeatherReading, FetchError>) -> Vec<Effect> {
        if seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, "discarding superseded fetch result");
            return Vec::new();
        }

        self.loading = false;
        match result {
            Ok(reading) => {
                self.reading = Some(reading);
                Vec::new()
            }
            Err(err) => {
                self.error = Some(err);
                self.error_generation += 1;
                vec![Effect::DismissError {
                    generation: self.error_generation,
                }]
            }
        }
    }

    pub fn view(&self) -> View<'_> {
        match &self.reading {
            None => View::Bootstrapping,
            Some(_) if self.loading => View::Loading,
            Some(reading) => View::Populated(reading),
        }
    }

    /// The place currently looked up (PlaceQuery).
    pub fn place(&self) -> &str {
        &self.place
    }

    /// Text currently in the search field.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        self.reading.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn is_shaking(&self) -> bool {
        self.shake
    }
}
