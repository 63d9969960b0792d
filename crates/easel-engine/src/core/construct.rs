use std::thread;

use anyhow::{anyhow, Context, Result};

use crate::device::GpuInit;
use crate::platform::Backend;
use crate::window::{Renderer, WindowConfig};

use super::app::{run_app, App};

type WindowTask = Box<dyn FnOnce() -> Result<()> + Send + 'static>;

/// Runs several windows at once, one thread per window.
///
/// Every renderer is built and polled inside its own thread; windows share no
/// state. [`WindowSet::run`] returns once all windows have closed.
#[derive(Default)]
pub struct WindowSet {
    windows: Vec<(String, WindowTask)>,
}

impl WindowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a native window driven by the app that `make_app` builds.
    pub fn add_window<A, F>(&mut self, config: WindowConfig, make_app: F) -> &mut Self
    where
        A: App + 'static,
        F: FnOnce() -> A + Send + 'static,
    {
        let name = config.title.clone();
        self.add_with(name, move || {
            let renderer = Renderer::from_config(config, GpuInit::default())?;
            Ok((renderer, make_app()))
        })
    }

    /// Adds a window whose renderer and app are built by `build` on the
    /// window's thread.
    pub fn add_with<B, A, F>(&mut self, name: impl Into<String>, build: F) -> &mut Self
    where
        B: Backend + 'static,
        A: App<B> + 'static,
        F: FnOnce() -> Result<(Renderer<B>, A)> + Send + 'static,
    {
        let task: WindowTask = Box::new(move || {
            let (mut renderer, mut app) = build()?;
            run_app(&mut renderer, &mut app);
            Ok(())
        });
        self.windows.push((name.into(), task));
        self
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Starts every window and waits for all of them.
    ///
    /// Returns the first failure (construction error or panic); later ones
    /// are logged.
    pub fn run(self) -> Result<()> {
        let mut threads = Vec::with_capacity(self.windows.len());
        let mut first_error = None;

        for (name, task) in self.windows {
            let spawned = thread::Builder::new()
                .name(format!("easel-window-{name}"))
                .spawn(task)
                .with_context(|| format!("failed to spawn thread for window \"{name}\""));
            match spawned {
                Ok(handle) => threads.push((name, handle)),
                Err(e) => record(&mut first_error, e),
            }
        }
        log::debug!("{} window thread(s) running", threads.len());

        for (name, handle) in threads {
            let result = match handle.join() {
                Ok(result) => result.with_context(|| format!("window \"{name}\" failed")),
                Err(_) => Err(anyhow!("window thread \"{name}\" panicked")),
            };
            if let Err(e) = result {
                record(&mut first_error, e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Keeps the first error, logs the rest.
fn record(first: &mut Option<anyhow::Error>, e: anyhow::Error) {
    if first.is_none() {
        *first = Some(e);
    } else {
        log::error!("{e:#}");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::core::AppControl;
    use crate::platform::{HeadlessBackend, HeadlessConfig, HeadlessProbe};

    fn counting_window(
        set: &mut WindowSet,
        name: &str,
        frames: usize,
        probe: &HeadlessProbe,
        total: &Arc<AtomicUsize>,
    ) {
        let config = WindowConfig::new(name, 32, 32);
        let headless = HeadlessConfig { probe: Some(probe.clone()), ..HeadlessConfig::default() };
        let total = Arc::clone(total);
        set.add_with(name, move || {
            let (renderer, _handle) = Renderer::headless(config, headless)?;
            let mut left = frames;
            let app = move |r: &mut Renderer<HeadlessBackend>| {
                r.swap_buffers();
                total.fetch_add(1, Ordering::SeqCst);
                left -= 1;
                if left == 0 {
                    AppControl::Exit
                } else {
                    AppControl::Continue
                }
            };
            Ok((renderer, app))
        });
    }

    #[test]
    fn runs_every_window_to_completion() {
        let probe = HeadlessProbe::new();
        let total = Arc::new(AtomicUsize::new(0));
        let mut set = WindowSet::new();
        counting_window(&mut set, "one", 3, &probe, &total);
        counting_window(&mut set, "two", 5, &probe, &total);
        assert_eq!(set.len(), 2);

        set.run().unwrap();
        assert_eq!(total.load(Ordering::SeqCst), 8);
        assert_eq!((probe.live_windows(), probe.live_contexts()), (0, 0));
    }

    #[test]
    fn empty_set_is_ok() {
        assert!(WindowSet::new().is_empty());
        WindowSet::new().run().unwrap();
    }

    #[test]
    fn construction_failure_is_reported_after_join() {
        let probe = HeadlessProbe::new();
        let total = Arc::new(AtomicUsize::new(0));
        let mut set = WindowSet::new();
        counting_window(&mut set, "ok", 2, &probe, &total);

        let failing = HeadlessConfig { fail_context: true, probe: Some(probe.clone()), ..HeadlessConfig::default() };
        set.add_with("broken", move || {
            let (renderer, _handle) = Renderer::headless(WindowConfig::new("broken", 8, 8), failing)?;
            Ok((renderer, |_: &mut Renderer<HeadlessBackend>| AppControl::Exit))
        });

        let err = set.run().unwrap_err();
        assert!(format!("{err:#}").contains("failed to create graphics context"));
        assert_eq!(total.load(Ordering::SeqCst), 2);
        assert_eq!(probe.live_windows(), 0);
    }

    #[test]
    fn panicking_window_becomes_an_error() {
        let mut set = WindowSet::new();
        set.add_with("panics", || {
            let (renderer, _handle) = Renderer::headless(WindowConfig::new("panics", 8, 8), HeadlessConfig::default())?;
            Ok((renderer, |_: &mut Renderer<HeadlessBackend>| -> AppControl { panic!("boom") }))
        });

        let err = set.run().unwrap_err();
        assert!(err.to_string().contains("panicked"));
    }
}
