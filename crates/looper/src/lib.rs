pub use crate::error::LooperError;
use analyzers::{Analyzer, create_sequence};
use configuration::{Component, ErrorPolicy, LooperSettings, Settings};
use event_store::EventStore;
use events::Event;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

pub mod error;

/// Per-component event counts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentSummary {
    pub name: String,
    pub events_read: u64,
    pub events_processed: u64,
    pub events_failed: u64,
}

/// Per-analyzer call counts and time spent, accumulated over the whole run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalyzerStats {
    pub name: String,
    pub calls: u64,
    pub failures: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSummary {
    pub components: Vec<ComponentSummary>,
    pub analyzers: Vec<AnalyzerStats>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn events_processed(&self) -> u64 {
        self.components.iter().map(|c| c.events_processed).sum()
    }

    pub fn events_failed(&self) -> u64 {
        self.components.iter().map(|c| c.events_failed).sum()
    }
}

/// An analyzer together with its bookkeeping.
struct Slot {
    analyzer: Box<dyn Analyzer>,
    stats: AnalyzerStats,
}

/// The event loop: for each component, for each event, run the sequence in order.
pub struct Looper {
    settings: LooperSettings,
    components: Vec<Component>,
    slots: Vec<Slot>,
    show_progress: bool,
}

impl Looper {
    pub fn new(settings: LooperSettings, components: Vec<Component>, sequence: Vec<Box<dyn Analyzer>>) -> Self {
        let slots = sequence
            .into_iter()
            .map(|analyzer| Slot {
                stats: AnalyzerStats {
                    name: analyzer.name().to_string(),
                    ..Default::default()
                },
                analyzer,
            })
            .collect();
        Self {
            settings,
            components,
            slots,
            show_progress: true,
        }
    }

    /// Builds the analyzer sequence from the settings and wires up a looper.
    ///
    /// Every configuration error (e.g. an unknown resonance pdgid) surfaces here,
    /// before any file is opened.
    pub fn from_settings(settings: &Settings) -> Result<Self, LooperError> {
        let sequence = create_sequence(&settings.sequence, &settings.context())?;
        Ok(Self::new(
            settings.looper.clone(),
            settings.components.clone(),
            sequence,
        ))
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Runs the whole loop and returns the bookkeeping.
    ///
    /// `looper.max_events` bounds the number of events read across all components;
    /// `looper.first_event` records are skipped at the start of each component.
    pub fn run(&mut self) -> Result<RunSummary, LooperError> {
        let start = Instant::now();
        let mut summary = RunSummary::default();
        let mut remaining = self.settings.max_events;

        let components = self.components.clone();
        for component in &components {
            if remaining == Some(0) {
                break;
            }
            let component_summary = self.run_component(component, &mut remaining)?;
            tracing::info!(
                component = %component.name,
                processed = component_summary.events_processed,
                failed = component_summary.events_failed,
                "Component done"
            );
            summary.components.push(component_summary);
        }

        summary.analyzers = self.slots.iter().map(|s| s.stats.clone()).collect();
        summary.elapsed = start.elapsed();
        Ok(summary)
    }

    fn run_component(
        &mut self,
        component: &Component,
        remaining: &mut Option<u64>,
    ) -> Result<ComponentSummary, LooperError> {
        let store = EventStore::open(&component.files)?;
        let first_event = self.settings.first_event;
        let progress_bar = self.progress_bar(component, *remaining)?;

        let mut summary = ComponentSummary {
            name: component.name.clone(),
            ..Default::default()
        };

        for slot in &mut self.slots {
            slot.analyzer.begin_loop(&component.name);
        }

        for (iev, record) in store.enumerate() {
            if *remaining == Some(0) {
                break;
            }
            // Skipped records are still parsed so that a broken file always aborts.
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    progress_bar.abandon();
                    return Err(e.into());
                }
            };
            if (iev as u64) < first_event {
                continue;
            }

            let mut event = Event::new(iev as u64, record);
            summary.events_read += 1;
            if let Some(n) = remaining.as_mut() {
                *n -= 1;
            }

            match self.process_event(&mut event, &component.name) {
                Ok(()) => summary.events_processed += 1,
                Err(e) => match self.settings.on_error {
                    ErrorPolicy::Abort => {
                        progress_bar.abandon();
                        return Err(e);
                    }
                    ErrorPolicy::SkipEvent => {
                        tracing::warn!("Skipping event: {}", e);
                        summary.events_failed += 1;
                    }
                },
            }
            progress_bar.inc(1);
        }

        for slot in &mut self.slots {
            slot.analyzer.end_loop();
        }
        progress_bar.finish_and_clear();

        Ok(summary)
    }

    /// Runs the sequence on one event, stopping at the first failing analyzer.
    fn process_event(&mut self, event: &mut Event, component: &str) -> Result<(), LooperError> {
        for slot in &mut self.slots {
            // Per-analyzer `log_level` directives match on this span's name and field.
            let span = tracing::info_span!("analyzer", name = slot.stats.name.as_str());
            let _entered = span.enter();

            let start = Instant::now();
            let result = slot.analyzer.process(event);
            slot.stats.elapsed += start.elapsed();
            slot.stats.calls += 1;

            if let Err(source) = result {
                slot.stats.failures += 1;
                return Err(LooperError::Analyzer {
                    analyzer: slot.stats.name.clone(),
                    component: component.to_string(),
                    iev: event.iev(),
                    source,
                });
            }
        }
        Ok(())
    }

    fn progress_bar(&self, component: &Component, remaining: Option<u64>) -> Result<ProgressBar, LooperError> {
        if !self.show_progress {
            return Ok(ProgressBar::hidden());
        }
        let available = EventStore::count_events(&component.files)?.saturating_sub(self.settings.first_event);
        let len = remaining.map_or(available, |r| r.min(available));

        let progress_bar = ProgressBar::new(len);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] {msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                .progress_chars("=>-"),
        );
        progress_bar.set_message(component.name.clone());
        Ok(progress_bar)
    }
}
