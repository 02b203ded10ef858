use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::ModifiersState;
use winit::window::Window;

use keychord::keymap::{raw_event_from_winit, StatusIndicator};
use keychord::{InputHandler, KeyOutcome, Settings};

use super::commands::editor_commands;

const WINDOW_TITLE: &str = "keychord";

/// How often deferred command completions are checked while idle
const COMPLETION_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub struct App {
    handler: InputHandler,
    indicator: StatusIndicator,
    window: Option<Rc<Window>>,
    modifiers: ModifiersState,
}

impl App {
    pub fn new(settings: &Settings) -> Result<Self> {
        let indicator = StatusIndicator::new();
        let mut handler =
            InputHandler::from_settings(settings, indicator.clone(), editor_commands())?;
        handler.start();

        Ok(Self {
            handler,
            indicator,
            window: None,
            modifiers: ModifiersState::empty(),
        })
    }

    /// Show the pending chord in the title bar
    fn refresh_title(&self) {
        let Some(window) = &self.window else { return };
        match self.indicator.text() {
            Some(pending) => window.set_title(&format!("{} - {}", WINDOW_TITLE, pending)),
            None => window.set_title(WINDOW_TITLE),
        }
    }

    fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let raw =
                    raw_event_from_winit(&event.logical_key, event.physical_key, self.modifiers);
                let outcome = self.handler.handle_key_down(&raw, Instant::now());

                match &outcome {
                    KeyOutcome::Executed { command, invoked } => {
                        tracing::info!("{} -> {} (invoked: {})", raw.key, command, invoked)
                    }
                    KeyOutcome::Faulted => {
                        tracing::warn!("Key {:?} hit a pipeline fault", raw.key)
                    }
                    _ => {}
                }

                self.refresh_title();
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(480, 120));

        match event_loop.create_window(window_attributes) {
            Ok(window) => self.window = Some(Rc::new(window)),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let is_ours = self
            .window
            .as_ref()
            .is_some_and(|window| window.id() == window_id);
        if !is_ours {
            return;
        }

        if matches!(event, WindowEvent::CloseRequested) {
            self.handler.stop();
            event_loop.exit();
            return;
        }

        self.handle_event(&event);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if self.handler.tick(now) {
            self.refresh_title();
        }

        let wake_at = match self.handler.next_deadline() {
            Some(deadline) => deadline.min(now + COMPLETION_POLL_INTERVAL),
            None => now + COMPLETION_POLL_INTERVAL,
        };
        event_loop.set_control_flow(ControlFlow::WaitUntil(wake_at));
    }
}
