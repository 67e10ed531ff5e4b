use std::{
    io, process,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use anyhow::Context;

use crate::log::{notice, warning};

type Waker = Box<dyn Fn() + Send>;

// Exit status for a process killed by SIGINT.
const FORCED_EXIT_CODE: i32 = 130;

#[derive(Clone, Default)]
pub struct StopFlag {
    raised: Arc<AtomicBool>,
    waker: Arc<Mutex<Option<Waker>>>,
}

impl StopFlag {
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Relaxed);

        if let Ok(waker) = self.waker.lock() {
            if let Some(wake) = waker.as_ref() {
                wake();
            }
        }
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Relaxed)
    }

    pub fn set_waker<F>(&self, wake: F)
    where
        F: Fn() + Send + 'static,
    {
        if let Ok(mut waker) = self.waker.lock() {
            *waker = Some(Box::new(wake));
        }
    }
}

/// Raises `stop` on the first SIGINT or SIGTERM and exits on the second.
pub fn listen_for_signals(stop: StopFlag) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Building signal runtime")?;

    thread::Builder::new()
        .name("signals".to_owned())
        .spawn(move || {
            if let Err(e) = runtime.block_on(relay_signals(stop)) {
                warning!("Couldn't listen for signals: {e}");
            }
        })
        .context("Spawning signal thread")?;

    Ok(())
}

async fn relay_signals(stop: StopFlag) -> io::Result<()> {
    let mut signals = Signals::new()?;

    let signal_name = signals.recv().await?;
    notice!("Received {signal_name}, stopping after the current tick");
    stop.raise();

    let signal_name = signals.recv().await?;
    warning!("Received {signal_name} again, exiting immediately");
    process::exit(FORCED_EXIT_CODE);
}

#[cfg(unix)]
struct Signals {
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Signals {
    fn new() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn recv(&mut self) -> io::Result<&'static str> {
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.map(|()| "SIGINT"),
            _ = self.terminate.recv() => Ok("SIGTERM"),
        }
    }
}

#[cfg(not(unix))]
struct Signals;

#[cfg(not(unix))]
impl Signals {
    fn new() -> io::Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) -> io::Result<&'static str> {
        tokio::signal::ctrl_c().await.map(|()| "Ctrl-C")
    }
}
