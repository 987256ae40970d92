//! Engine context: owns the profile registry and scroll state, and advances
//! every tracked element once per `tick`.
//!
//! Each tick is split into a pure step ([`Engine::compute_frame`]) that only
//! reads layout, and a thin write step ([`Engine::apply`]) that pushes the
//! results into a [`StyleSink`].

use serde::Serialize;
use tracing::{debug, error, info, trace};

use crate::config::{EngineConfig, EngineSettings, ScrollBasis};
use crate::geometry::{round_to, Offset2D};
use crate::host::{BackgroundStyle, Document, Layout, StyleSink};
use crate::metric::{clamp_progress, ScrollMetric};
use crate::profile::{ElementProfile, ProfileRegistry};
use crate::resolver::TargetResolver;
use crate::smoother::Smoother;

/// Background scroll distance, in pixels, at factor 1 and full progress
const BACKGROUND_TRAVEL_PX: f64 = 1000.0;

/// Process-wide scroll state for one engine instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollState {
    /// Clamped progress of the most recently processed element
    pub progress: f64,
    pub basis: ScrollBasis,
    pub precision: u32,
}

/// Computed output for one element in one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementUpdate<N> {
    pub element: N,
    /// Clamped scroll progress used for this element
    pub progress: f64,
    pub target: Offset2D,
    /// Eased translation to apply
    pub current: Offset2D,
    pub background: Option<BackgroundStyle>,
}

/// Output of one tick, in registry order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame<N> {
    /// 1-based frame counter
    pub index: u64,
    pub updates: Vec<ElementUpdate<N>>,
}

#[derive(Debug, Clone)]
pub struct Engine<N> {
    registry: ProfileRegistry<N>,
    state: ScrollState,
    metric: ScrollMetric,
    resolver: TargetResolver,
    smoother: Smoother,
    frames: u64,
}

impl<N: Clone + PartialEq + std::fmt::Debug> Engine<N> {
    /// Validate `config` and discover every marked element in `document`.
    ///
    /// An unsupported scroll basis aborts initialization: the diagnostic is
    /// logged and returned, and no engine exists to tick.
    pub fn init<D>(config: &EngineConfig, document: &D) -> crate::Result<Self>
    where
        D: Document<Node = N>,
    {
        let settings = config.validate().inspect_err(|e| error!("{}", e))?;
        Ok(Self::with_settings(settings, document))
    }

    /// Build from already validated settings
    pub fn with_settings<D>(settings: EngineSettings, document: &D) -> Self
    where
        D: Document<Node = N>,
    {
        let registry = ProfileRegistry::discover(document);
        info!(
            "Parallax engine initialized: basis={}, precision={}, elements={}",
            settings.basis,
            settings.precision,
            registry.len()
        );

        Self {
            registry,
            state: ScrollState {
                progress: 0.0,
                basis: settings.basis,
                precision: settings.precision,
            },
            metric: ScrollMetric::new(settings.basis),
            resolver: TargetResolver,
            smoother: Smoother,
            frames: 0,
        }
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn profiles(&self) -> &[ElementProfile<N>] {
        self.registry.as_slice()
    }

    pub fn profile_for(&self, element: &N) -> Option<&ElementProfile<N>> {
        self.registry.find(element)
    }

    /// Number of frames computed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Measure, resolve and ease every profile without touching the sink
    pub fn compute_frame<L>(&mut self, layout: &L) -> Frame<N>
    where
        L: Layout<Node = N>,
    {
        self.frames += 1;
        let precision = self.state.precision;
        let mut updates = Vec::with_capacity(self.registry.len());
        let mut last_progress = None;

        for profile in self.registry.iter_mut() {
            let progress = clamp_progress(self.metric.measure_for(layout, &profile.container));

            let element_size = layout.bounds(&profile.element).size();
            let container_size = layout.bounds(&profile.container).size();
            let base = profile.sizing_basis.base_size(element_size, container_size);

            let target = self.resolver.resolve(profile, progress, base);
            profile.target = target;

            let current = self.smoother.advance(profile.current, target, precision);
            profile.current = Some(current);

            let background = profile
                .background_factor
                .map(|factor| background_style(factor, progress, precision));

            trace!(
                element = ?profile.element,
                progress,
                target_x = target.x,
                target_y = target.y,
                x = current.x,
                y = current.y,
                "Element updated"
            );

            last_progress = Some(progress);
            updates.push(ElementUpdate {
                element: profile.element.clone(),
                progress,
                target,
                current,
                background,
            });
        }

        self.state.progress =
            last_progress.unwrap_or_else(|| clamp_progress(self.metric.measure_page(layout)));

        Frame {
            index: self.frames,
            updates,
        }
    }

    /// Write a computed frame to the sink
    pub fn apply<S>(frame: &Frame<N>, sink: &mut S)
    where
        S: StyleSink<Node = N>,
    {
        for update in &frame.updates {
            sink.set_translation(&update.element, update.current);
            if let Some(background) = update.background {
                sink.set_background(&update.element, background);
            }
        }
    }

    /// Compute and apply one frame
    pub fn tick<H>(&mut self, host: &mut H) -> Frame<N>
    where
        H: StyleSink<Node = N>,
    {
        let frame = self.compute_frame(&*host);
        Self::apply(&frame, host);
        frame
    }

    /// Current scroll progress of the page, or of the tracked element
    /// matching `selector`.
    ///
    /// Without a selector the raw page progress is returned (unclamped, zero
    /// for a document that cannot scroll). With one, `None` means the
    /// selector matched nothing or matched an untracked element.
    pub fn scroll_percent<D>(&self, document: &D, selector: Option<&str>) -> Option<f64>
    where
        D: Document<Node = N>,
    {
        let Some(selector) = selector else {
            return Some(self.metric.measure_page(document));
        };

        let Some(element) = document.query_selector(selector) else {
            debug!(selector, "Selector matched nothing");
            return None;
        };

        let Some(profile) = self.registry.find(&element) else {
            debug!(selector, "Selector matched an untracked element");
            return None;
        };

        Some(clamp_progress(self.metric.measure_for(document, &profile.container)))
    }
}

/// Background position/size for a parallax factor at `progress`
pub fn background_style(factor: f64, progress: f64, precision: u32) -> BackgroundStyle {
    BackgroundStyle {
        offset_y: round_to(factor * progress * BACKGROUND_TRAVEL_PX, precision),
        size_vh: factor * 100.0,
    }
}
