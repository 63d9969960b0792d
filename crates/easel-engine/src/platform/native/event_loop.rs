use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::thread;

use anyhow::{anyhow, Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use winit::window::{Window, WindowId};

use crate::coords::Geometry;
use crate::input::{HeldSet, InputEvent, MouseButton, GLOBAL_KEYS};

use super::translate::{held_change, translate_window_event, HeldChange};

/// The process-wide platform thread. winit allows one event loop per process.
static PLATFORM: OnceLock<std::result::Result<Platform, String>> = OnceLock::new();

/// Starts the platform thread if it is not running yet.
///
/// The thread lives until the process exits, even after every window is gone:
/// winit cannot build a second event loop once the first has run.
pub(crate) fn platform() -> Result<&'static Platform> {
    PLATFORM
        .get_or_init(Platform::start)
        .as_ref()
        .map_err(|e| anyhow!("{e}"))
        .context("failed to start the platform event loop")
}

/// Native window parameters.
#[derive(Debug, Clone)]
pub(crate) struct WindowRequest {
    pub title: String,
    pub size: Geometry,
}

pub(crate) enum PlatformCommand {
    CreateWindow {
        request: WindowRequest,
        reply: Sender<std::result::Result<WindowLink, String>>,
    },
    /// Stop routing events to the window. Carries the platform's last
    /// reference so the window is destroyed on the thread that owns it.
    ForgetWindow { id: WindowId, window: Arc<Window> },
}

/// Handle to the platform thread.
pub(crate) struct Platform {
    proxy: Mutex<EventLoopProxy<PlatformCommand>>,
}

impl Platform {
    fn start() -> std::result::Result<Self, String> {
        let (ready_tx, ready_rx) = mpsc::channel();

        thread::Builder::new()
            .name("easel-platform".to_string())
            .spawn(move || run_event_loop(ready_tx))
            .map_err(|e| format!("failed to spawn the platform thread: {e}"))?;

        let proxy = ready_rx
            .recv()
            .map_err(|_| "platform thread exited during startup".to_string())??;

        log::debug!("platform event loop started");
        Ok(Self { proxy: Mutex::new(proxy) })
    }

    fn proxy(&self) -> EventLoopProxy<PlatformCommand> {
        self.proxy.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Creates a native window on the platform thread and waits for it.
    pub(crate) fn create_window(&self, request: WindowRequest) -> Result<WindowLink> {
        let (reply, response) = mpsc::channel();
        self.proxy()
            .send_event(PlatformCommand::CreateWindow { request, reply })
            .map_err(|_| anyhow!("the platform event loop is no longer running"))?;

        response
            .recv()
            .map_err(|_| anyhow!("the platform event loop dropped the window request"))?
            .map_err(|e| anyhow!("{e}"))
    }
}

/// A renderer's connection to its native window.
///
/// Dropping the link unregisters the window from the platform thread.
pub(crate) struct WindowLink {
    window: Arc<Window>,
    events: Receiver<InputEvent>,
    buttons: Arc<HeldSet<MouseButton>>,
    proxy: EventLoopProxy<PlatformCommand>,
}

impl WindowLink {
    #[inline]
    pub(crate) fn window(&self) -> &Arc<Window> {
        &self.window
    }

    #[inline]
    pub(crate) fn events(&self) -> &Receiver<InputEvent> {
        &self.events
    }

    #[inline]
    pub(crate) fn button_down(&self, button: MouseButton) -> bool {
        self.buttons.is_down(button)
    }
}

impl Drop for WindowLink {
    fn drop(&mut self) {
        let id = self.window.id();
        let window = Arc::clone(&self.window);
        if self.proxy.send_event(PlatformCommand::ForgetWindow { id, window }).is_err() {
            log::debug!("platform event loop gone; releasing window {id:?} locally");
        }
    }
}

// ── platform thread ───────────────────────────────────────────────────────

type Ready = Sender<std::result::Result<EventLoopProxy<PlatformCommand>, String>>;

fn run_event_loop(ready: Ready) {
    let event_loop = match build_event_loop() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };

    event_loop.set_control_flow(ControlFlow::Wait);
    let proxy = event_loop.create_proxy();
    let mut handler = PlatformHandler { windows: HashMap::new(), proxy: proxy.clone() };

    if ready.send(Ok(proxy)).is_err() {
        return;
    }

    if let Err(e) = event_loop.run_app(&mut handler) {
        log::error!("platform event loop terminated with error: {e}");
    }
}

fn build_event_loop() -> std::result::Result<EventLoop<PlatformCommand>, String> {
    let mut builder = EventLoop::<PlatformCommand>::with_user_event();
    allow_any_thread(&mut builder)?;
    builder.build().map_err(|e| format!("failed to create the event loop: {e}"))
}

#[cfg(any(
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd"
))]
fn allow_any_thread(builder: &mut EventLoopBuilder<PlatformCommand>) -> std::result::Result<(), String> {
    // Sets the flag shared by the X11 and Wayland backends.
    winit::platform::x11::EventLoopBuilderExtX11::with_any_thread(builder, true);
    Ok(())
}

#[cfg(windows)]
fn allow_any_thread(builder: &mut EventLoopBuilder<PlatformCommand>) -> std::result::Result<(), String> {
    winit::platform::windows::EventLoopBuilderExtWindows::with_any_thread(builder, true);
    Ok(())
}

#[cfg(not(any(
    windows,
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd"
)))]
fn allow_any_thread(_builder: &mut EventLoopBuilder<PlatformCommand>) -> std::result::Result<(), String> {
    Err("this platform only runs its event loop on the main thread".to_string())
}

/// Per-window routing state kept on the platform thread.
struct WindowRoute {
    events: Sender<InputEvent>,
    buttons: Arc<HeldSet<MouseButton>>,
    size: Geometry,
}

struct PlatformHandler {
    windows: HashMap<WindowId, WindowRoute>,
    proxy: EventLoopProxy<PlatformCommand>,
}

impl PlatformHandler {
    fn create_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        request: WindowRequest,
    ) -> std::result::Result<WindowLink, String> {
        let WindowRequest { title, size } = request;
        let attrs = Window::default_attributes()
            .with_title(title.as_str())
            .with_inner_size(PhysicalSize::new(size.width, size.height))
            .with_resizable(false);

        let window = event_loop.create_window(attrs).map_err(|e| e.to_string())?;
        let window = Arc::new(window);

        let (tx, rx) = mpsc::channel();
        let buttons = Arc::new(HeldSet::default());
        self.windows.insert(
            window.id(),
            WindowRoute { events: tx, buttons: Arc::clone(&buttons), size },
        );

        log::info!("created window \"{title}\" ({size})");
        Ok(WindowLink { window, events: rx, buttons, proxy: self.proxy.clone() })
    }
}

impl ApplicationHandler<PlatformCommand> for PlatformHandler {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn user_event(&mut self, event_loop: &ActiveEventLoop, command: PlatformCommand) {
        match command {
            PlatformCommand::CreateWindow { request, reply } => {
                let result = self.create_window(event_loop, request);
                // The requester may have given up; its window link then drops and is forgotten.
                let _ = reply.send(result);
            }
            PlatformCommand::ForgetWindow { id, window } => {
                self.windows.remove(&id);
                drop(window);
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(route) = self.windows.get(&window_id) else {
            return;
        };

        match held_change(&event) {
            Some(HeldChange::Button(button, down)) => route.buttons.set(button, down),
            Some(HeldChange::Key(key, down)) => GLOBAL_KEYS.set(key, down),
            Some(HeldChange::ReleaseAll) => {
                route.buttons.clear();
                GLOBAL_KEYS.clear();
            }
            None => {}
        }

        if let Some(ev) = translate_window_event(&event, route.size) {
            if route.events.send(ev).is_err() {
                self.windows.remove(&window_id);
            }
        }
    }
}
