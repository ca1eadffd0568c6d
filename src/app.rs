use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use std::time::Duration;

use crate::booking::{BookingFlow, BookingPaths, Location, MemoryHistory, RenderPass};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::notifications::ToastQueue;
use crate::ui::{
    install_panic_hook, render_home, render_toasts, StepOutcome, TerminalSession, WizardScreen,
};

/// Terminal host for the booking flow.
///
/// Owns the in-memory history the flow navigates. The flow is mounted while
/// the history's location is inside it and unmounted as soon as it leaves.
pub struct App {
    config: Config,
    catalog: Catalog,
    flow: BookingFlow<MemoryHistory>,
    wizard: WizardScreen,
    toasts: ToastQueue,
    /// Result of the latest sync
    pass: RenderPass,
    should_quit: bool,
}

impl App {
    /// Create the app, optionally starting at a deep-linked location
    pub fn new(config: Config, catalog: Catalog, start: Option<&str>) -> Self {
        let paths = BookingPaths::from_config(&config.booking);
        let mut history = MemoryHistory::new(paths.exit().to_string());
        if let Some(start) = start {
            history.push(start);
        }

        let toasts = ToastQueue::from_config(&config.notifications);
        Self {
            config,
            catalog,
            flow: BookingFlow::new(history, paths),
            wizard: WizardScreen::new(),
            toasts,
            pass: RenderPass::Inactive,
            should_quit: false,
        }
    }

    pub fn location(&self) -> Location {
        self.flow.navigator().current().clone()
    }

    pub fn pass(&self) -> &RenderPass {
        &self.pass
    }

    pub fn flow(&self) -> &BookingFlow<MemoryHistory> {
        &self.flow
    }

    pub fn wizard(&self) -> &WizardScreen {
        &self.wizard
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let mut session = TerminalSession::start()?;
        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        while !self.should_quit {
            self.toasts.prune();
            self.sync()?;

            // A corrected location draws nothing; the next pass renders it
            if matches!(self.pass, RenderPass::Redirected(_)) {
                continue;
            }

            session.terminal().draw(|f| self.draw(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Update the flow's mount state from the location, then resolve it
    pub fn sync(&mut self) -> Result<()> {
        if self.flow.in_flow() {
            self.flow.mount();
        } else {
            self.flow.unmount();
        }
        self.pass = self.flow.sync()?;
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        match &self.pass {
            RenderPass::Step {
                component,
                progress,
                ..
            } => {
                self.wizard
                    .render(frame, *component, progress, &self.catalog);
            }
            _ => render_home(
                frame,
                self.flow.navigator().current(),
                self.wizard.last_confirmation.as_ref(),
            ),
        }
        render_toasts(frame, &self.toasts);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        // Host history, independent of the flow
        if key.modifiers.contains(KeyModifiers::ALT) {
            match key.code {
                KeyCode::Left => {
                    self.flow.navigator_mut().back();
                }
                KeyCode::Right => {
                    self.flow.navigator_mut().forward();
                }
                _ => {}
            }
            return Ok(());
        }

        let RenderPass::Step { component, .. } = self.pass else {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Enter => {
                    self.flow.enter()?;
                }
                _ => {}
            }
            return Ok(());
        };

        match key.code {
            KeyCode::Esc => {
                self.flow.retreat()?;
            }
            KeyCode::Enter => {
                match self
                    .wizard
                    .confirm(component, &self.catalog, &mut self.toasts)
                {
                    StepOutcome::Advance => {
                        self.flow.advance()?;
                    }
                    StepOutcome::Submitted(_) => {
                        self.flow.exit()?;
                    }
                    StepOutcome::Stay => {}
                }
            }
            KeyCode::Char('q') if !self.wizard.captures_text(component) => {
                self.should_quit = true;
            }
            code => self.wizard.handle_key(component, code, &self.catalog),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BookingStep, NavigationMode};
    use crate::catalog::tests::sample_catalog;
    use crate::notifications::ToastLevel;

    fn app_at(start: Option<&str>) -> App {
        let mut app = App::new(Config::default(), sample_catalog(), start);
        app.sync().unwrap();
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
        app.sync().unwrap();
    }

    fn press_alt(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::ALT)).unwrap();
        app.sync().unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_starts_on_home() {
        let app = app_at(None);
        assert_eq!(app.location().as_str(), "/");
        assert_eq!(app.pass(), &RenderPass::Inactive);
        assert!(!app.flow().is_mounted());
    }

    #[test]
    fn test_deep_link_to_invalid_step_is_corrected() {
        let mut app = app_at(Some("/booking/abc"));
        let RenderPass::Redirected(request) = app.pass().clone() else {
            panic!("expected a redirect pass");
        };
        assert_eq!(request.mode, NavigationMode::Replace);
        assert_eq!(app.location().as_str(), "/booking/1");
        assert_eq!(app.flow().navigator().len(), 2);

        app.sync().unwrap();
        assert_eq!(app.pass().step(), Some(BookingStep::ServiceSchedule));
        assert!(app.toasts().is_empty());
    }

    #[test]
    fn test_enter_flow_and_leave_with_escape() {
        let mut app = app_at(None);
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.location().as_str(), "/booking");
        assert_eq!(app.pass().step(), Some(BookingStep::ServiceSchedule));
        assert!(app.flow().is_mounted());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.location().as_str(), "/");
        assert_eq!(app.pass(), &RenderPass::Inactive);
        assert!(!app.flow().is_mounted());
    }

    #[test]
    fn test_incomplete_step_stays_and_toasts() {
        let mut app = app_at(Some("/booking/2"));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.location().as_str(), "/booking/2");
        assert_eq!(app.toasts().latest().unwrap().level, ToastLevel::Error);
    }

    #[test]
    fn test_history_back_and_forward() {
        let mut app = app_at(Some("/booking/2"));
        press_alt(&mut app, KeyCode::Left);
        assert_eq!(app.location().as_str(), "/");
        assert!(!app.flow().is_mounted());

        press_alt(&mut app, KeyCode::Right);
        assert_eq!(app.location().as_str(), "/booking/2");
        assert_eq!(app.pass().step(), Some(BookingStep::PatientInformation));
    }

    #[test]
    fn test_q_types_into_patient_form() {
        let mut app = app_at(Some("/booking/2"));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());
        assert_eq!(app.wizard().draft.patient.full_name, "q");
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = app_at(Some("/booking/2"));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_full_booking_by_keyboard() {
        let mut app = app_at(None);
        press(&mut app, KeyCode::Enter);

        // Service, doctor, slot
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.location().as_str(), "/booking/2");

        type_text(&mut app, "Maya Lindqvist");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "+46 70 123 45 67");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "1988-03-14");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.location().as_str(), "/booking/3");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.location().as_str(), "/");
        assert_eq!(app.pass(), &RenderPass::Inactive);
        assert!(app.wizard().last_confirmation.is_some());
        assert_eq!(app.toasts().latest().unwrap().level, ToastLevel::Success);

        // Every wizard transition was a push
        let entries: Vec<_> = app
            .flow()
            .navigator()
            .entries()
            .iter()
            .map(|l| l.as_str().to_string())
            .collect();
        assert_eq!(
            entries,
            vec!["/", "/booking", "/booking/2", "/booking/3", "/"]
        );
    }
}
