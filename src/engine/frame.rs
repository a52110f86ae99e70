//! Repaint loop bookkeeping.
//!
//! The loop re-arms itself every tick by requesting the next frame before
//! returning. Suspending cancels the pending request; resuming issues exactly
//! one fresh request, never a second concurrent chain.

/// Something that can invoke the frame callback once before the next repaint
/// (`requestAnimationFrame` in the browser).
pub trait FrameScheduler {
    type Handle;

    /// Ask for one callback. `None` when the request could not be made.
    fn request(&mut self) -> Option<Self::Handle>;

    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Suspended,
}

#[derive(Debug)]
pub struct FrameLoop<H> {
    state: LoopState,
    pending: Option<H>,
}

impl<H> Default for FrameLoop<H> {
    fn default() -> Self {
        Self { state: LoopState::Suspended, pending: None }
    }
}

impl<H> FrameLoop<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Suspended -> Running with one fresh request. No-op while running.
    pub fn resume<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler<Handle = H>,
    {
        if self.is_running() {
            return;
        }
        self.state = LoopState::Running;
        self.pending = scheduler.request();
        log::info!("frame loop resumed");
    }

    /// Running -> Suspended; drops the pending request.
    pub fn suspend<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler<Handle = H>,
    {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }
        if self.is_running() {
            self.state = LoopState::Suspended;
            log::info!("frame loop suspended");
        }
    }

    /// Called when a scheduled callback fires. Returns whether the frame
    /// should be stepped; a tick arriving while suspended is stale.
    pub fn begin_tick(&mut self) -> bool {
        self.pending = None;
        self.is_running()
    }

    /// Request the next tick after a stepped frame.
    pub fn rearm<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler<Handle = H>,
    {
        if self.is_running() && self.pending.is_none() {
            self.pending = scheduler.request();
        }
    }
}
