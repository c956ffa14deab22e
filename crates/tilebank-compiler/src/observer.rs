//! Progress and warning reporting.

/// Coarse-grained compile stages, reported in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Flags,
    Strings,
    Images,
    UiImages,
    Sprites,
    Scenes,
    Events,
    Music,
    Complete,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Self::Flags => "Preparing flags...",
            Self::Strings => "Preparing strings...",
            Self::Images => "Preparing images...",
            Self::UiImages => "Preparing ui...",
            Self::Sprites => "Preparing sprites...",
            Self::Scenes => "Preparing scenes...",
            Self::Events => "Preparing events...",
            Self::Music => "Preparing music...",
            Self::Complete => "Preparation complete",
        }
    }
}

/// Receives stage changes and recoverable warnings during a compile.
///
/// Stages are reported between steps, never in the middle of one.
pub trait Observer {
    fn progress(&mut self, _stage: Stage) {}

    fn warning(&mut self, _message: &str) {}
}

/// Ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Forwards stages to `log::info!` and warnings to `log::warn!`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn progress(&mut self, stage: Stage) {
        log::info!("{}", stage.label());
    }

    fn warning(&mut self, message: &str) {
        log::warn!("{message}");
    }
}

/// Adapts a pair of closures into an [`Observer`].
pub struct Callbacks<P, W> {
    progress: P,
    warnings: W,
}

impl<P, W> Callbacks<P, W>
where
    P: FnMut(Stage),
    W: FnMut(&str),
{
    pub fn new(progress: P, warnings: W) -> Self {
        Self { progress, warnings }
    }
}

impl<P, W> Observer for Callbacks<P, W>
where
    P: FnMut(Stage),
    W: FnMut(&str),
{
    fn progress(&mut self, stage: Stage) {
        (self.progress)(stage);
    }

    fn warning(&mut self, message: &str) {
        (self.warnings)(message);
    }
}
