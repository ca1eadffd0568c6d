//! Booking flow controller.
//!
//! Ties the resolver, renderer, navigator and progress indicator to a
//! navigation primitive. The current step is never stored: every call
//! re-derives it from the primitive's location.

use crate::booking::location::BookingPaths;
use crate::booking::navigator::{
    Navigate, NavigationError, NavigationRequest, StepAction, StepNavigator, Transition,
};
use crate::booking::progress::Progress;
use crate::booking::renderer::{StepComponent, StepRenderer};
use crate::booking::resolver::{Resolution, StepResolver};
use crate::booking::step::BookingStep;

/// What the host should draw for the current location
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPass {
    /// Flow is unmounted or the location is outside the flow
    Inactive,
    /// The location was corrected; nothing is rendered this pass
    Redirected(NavigationRequest),
    /// A validated step with its component and progress trail
    Step {
        step: BookingStep,
        component: StepComponent,
        progress: Progress,
    },
}

impl RenderPass {
    pub fn step(&self) -> Option<BookingStep> {
        match self {
            RenderPass::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Mount-scoped booking wizard controller
pub struct BookingFlow<N> {
    navigator: N,
    resolver: StepResolver,
    mounted: bool,
}

impl<N: Navigate> BookingFlow<N> {
    pub fn new(navigator: N, paths: BookingPaths) -> Self {
        Self {
            navigator,
            resolver: StepResolver::new(paths),
            mounted: false,
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn paths(&self) -> &BookingPaths {
        self.resolver.paths()
    }

    pub fn mount(&mut self) {
        if !self.mounted {
            tracing::debug!("booking flow mounted");
            self.mounted = true;
        }
    }

    /// End the flow's lifetime. An unmounted flow issues no navigation.
    pub fn unmount(&mut self) {
        if self.mounted {
            tracing::debug!("booking flow unmounted");
            self.mounted = false;
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether the primitive's location is inside the flow
    pub fn in_flow(&self) -> bool {
        self.paths().contains(&self.navigator.location())
    }

    /// Resolve the current location without side effects
    pub fn resolution(&self) -> Option<Resolution> {
        let location = self.navigator.location();
        if !self.paths().contains(&location) {
            return None;
        }
        Some(self.resolver.resolve_location(&location))
    }

    /// Validated current step, if the location holds one
    pub fn current_step(&self) -> Option<BookingStep> {
        self.resolution().and_then(|r| r.step())
    }

    /// Resolve the current location and decide what to render.
    ///
    /// An invalid step is corrected with a replace navigation before this
    /// returns, so the renderer never sees it.
    pub fn sync(&mut self) -> Result<RenderPass, NavigationError> {
        if !self.mounted {
            return Ok(RenderPass::Inactive);
        }
        let resolution = match self.resolution() {
            Some(resolution) => resolution,
            None => return Ok(RenderPass::Inactive),
        };

        match resolution {
            Resolution::Redirect(request) => {
                self.navigator.navigate(&request)?;
                Ok(RenderPass::Redirected(request))
            }
            Resolution::Step(step) => Ok(RenderPass::Step {
                step,
                component: StepRenderer::render(step),
                progress: Progress::of(step),
            }),
        }
    }

    /// Push the flow's entry path
    pub fn enter(&mut self) -> Result<(), NavigationError> {
        let request = NavigationRequest::push(self.paths().entry());
        self.navigator.navigate(&request)?;
        self.mount();
        Ok(())
    }

    /// Leave the flow by pushing the exit path. Used once the confirmation
    /// step has submitted.
    pub fn exit(&mut self) -> Result<Transition, NavigationError> {
        if !self.mounted {
            return Ok(Transition::Stay);
        }
        let request = NavigationRequest::push(self.paths().exit());
        self.navigator.navigate(&request)?;
        Ok(Transition::Exit)
    }

    pub fn advance(&mut self) -> Result<Transition, NavigationError> {
        self.act(StepAction::Advance)
    }

    pub fn retreat(&mut self) -> Result<Transition, NavigationError> {
        self.act(StepAction::Retreat)
    }

    /// Apply a navigator action to the freshly resolved step. Does nothing
    /// while unmounted or while the location still awaits correction.
    pub fn act(&mut self, action: StepAction) -> Result<Transition, NavigationError> {
        if !self.mounted {
            return Ok(Transition::Stay);
        }
        let Some(step) = self.current_step() else {
            return Ok(Transition::Stay);
        };

        let transition = StepNavigator::new(step).apply(action);
        if let Some(request) = transition.request(self.paths()) {
            tracing::debug!(from = step.number(), ?action, to = %request.location, "step transition");
            self.navigator.navigate(&request)?;
        }
        Ok(transition)
    }
}
