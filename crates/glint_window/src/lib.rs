//! winit event-loop runner. The windowing layer knows nothing about the
//! scene or the GPU; it hands window lifecycle events to a [`WindowApp`].

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

/// What the application must provide to be driven by the window runner.
pub trait WindowApp {
    /// Called once, when the OS window exists. GPU setup happens here.
    fn init(&mut self, window: Arc<Window>);

    /// Raw physical-key event, delivered synchronously between frames.
    fn on_key(&mut self, key: KeyCode, pressed: bool);

    /// The client area changed size.
    fn on_resized(&mut self, width: u32, height: u32);

    /// One frame. Returning false stops the event loop.
    fn redraw(&mut self) -> bool;
}

// The State Machine that holds the app while waiting for the OS
struct GlintRunner<A: WindowApp> {
    app: A,
    title: String,
    window: Option<Arc<Window>>,
}

impl<A: WindowApp> ApplicationHandler for GlintRunner<A> {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_none() {
            let window = Arc::new(
                event_loop
                    .create_window(Window::default_attributes().with_title(&self.title))
                    .expect("failed to create the main window"),
            );
            self.app.init(window.clone());
            self.window = Some(window);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                self.app.on_key(code, state == ElementState::Pressed);
            }
            WindowEvent::Resized(size) => {
                self.app.on_resized(size.width, size.height);
            }
            WindowEvent::CloseRequested => {
                log::info!("close requested, stopping");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if !self.app.redraw() {
                    event_loop.exit();
                    return;
                }
                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }
}

pub fn run_window_app<A: WindowApp>(title: &str, app: A) {
    let event_loop = EventLoop::new().expect("failed to create the event loop");

    // ControlFlow::Poll continuously runs the event loop, even if the OS
    // hasn't dispatched any events. One redraw per display refresh.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut runner = GlintRunner {
        app,
        title: title.to_owned(),
        window: None,
    };

    event_loop
        .run_app(&mut runner)
        .expect("event loop terminated abnormally");
}
