use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Uninitialized,
    ConfigValidated,
    PathBuilt,
    LanesDerived,
    ChunksStreamed,
    Ready,
    Error,
}

// Tracks timing data for session stages
#[derive(Debug, Clone)]
pub struct GenerationTiming {
    pub start_time: Instant,
    pub config_validated_time: Option<Instant>,
    pub path_built_time: Option<Instant>,
    pub lanes_derived_time: Option<Instant>,
    pub chunks_streamed_time: Option<Instant>,
    pub ready_time: Option<Instant>,
    pub current_state: GenerationState,
}

impl Default for GenerationTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationTiming {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            config_validated_time: None,
            path_built_time: None,
            lanes_derived_time: None,
            chunks_streamed_time: None,
            ready_time: None,
            current_state: GenerationState::Uninitialized,
        }
    }

    pub fn update_state(&mut self, state: GenerationState) {
        self.current_state = state;
        let now = Instant::now();

        match state {
            GenerationState::ConfigValidated => {
                self.config_validated_time = Some(now);
                log::info!(
                    "GenerationTiming: Config validated in {}ms",
                    self.since(self.start_time, now)
                );
            }
            GenerationState::PathBuilt => {
                self.path_built_time = Some(now);
                let previous = self.config_validated_time.unwrap_or(self.start_time);
                log::info!("GenerationTiming: World path built in {}ms", self.since(previous, now));
            }
            GenerationState::LanesDerived => {
                self.lanes_derived_time = Some(now);
                let previous = self.path_built_time.unwrap_or(self.start_time);
                log::info!("GenerationTiming: Lanes derived in {}ms", self.since(previous, now));
            }
            GenerationState::ChunksStreamed => {
                self.chunks_streamed_time = Some(now);
                let previous = self.lanes_derived_time.unwrap_or(self.start_time);
                log::info!(
                    "GenerationTiming: Initial chunks streamed in {}ms",
                    self.since(previous, now)
                );
            }
            GenerationState::Ready => {
                self.ready_time = Some(now);
                let total = self.since(self.start_time, now);
                log::info!("GenerationTiming: Full generation completed in {}ms", total);

                if let Some(breakdown) = self.breakdown() {
                    log::info!("GenerationTiming: Detailed timing breakdown:");
                    for (stage, duration) in breakdown {
                        let millis = duration.as_millis();
                        log::info!(
                            "GenerationTiming: - {}: {}ms ({}%)",
                            stage,
                            millis,
                            millis * 100 / total.max(1)
                        );
                    }
                }
            }
            GenerationState::Error => {
                log::error!(
                    "GenerationTiming: Generation failed after {}ms",
                    self.since(self.start_time, now)
                );
            }
            GenerationState::Uninitialized => {}
        }
    }

    /// Per-stage durations, available once every stage has been reached.
    pub fn breakdown(&self) -> Option<[(&'static str, Duration); 4]> {
        let config = self.config_validated_time?;
        let path = self.path_built_time?;
        let lanes = self.lanes_derived_time?;
        let chunks = self.chunks_streamed_time?;
        Some([
            ("Config validation", config.duration_since(self.start_time)),
            ("Path building", path.duration_since(config)),
            ("Lane derivation", lanes.duration_since(path)),
            ("Chunk streaming", chunks.duration_since(lanes)),
        ])
    }

    pub fn total(&self) -> Option<Duration> {
        self.ready_time.map(|ready| ready.duration_since(self.start_time))
    }

    fn since(&self, earlier: Instant, now: Instant) -> u128 {
        now.duration_since(earlier).as_millis()
    }
}
