//! POSIX signal wiring for the activity and shutdown controls
//!
//! SIGUSR1 backgrounds the assistant (suspend), SIGUSR2 foregrounds it
//! (resume), SIGINT/SIGTERM request shutdown. Each signal becomes a
//! control event on the session bus.

use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

use crate::application::session::{ControlEvent, SessionBus};

/// Spawn the signal listeners. Returns an error only if a handler cannot
/// be registered.
pub fn spawn_handlers(bus: &SessionBus) -> Result<(), std::io::Error> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let bus_int = bus.clone();
    tokio::spawn(async move {
        sigint.recv().await;
        info!("received SIGINT, shutting down");
        bus_int.control(ControlEvent::Shutdown);
    });

    let mut sigterm = signal(SignalKind::terminate())?;
    let bus_term = bus.clone();
    tokio::spawn(async move {
        sigterm.recv().await;
        info!("received SIGTERM, shutting down");
        bus_term.control(ControlEvent::Shutdown);
    });

    let mut sigusr1 = signal(SignalKind::user_defined1())?;
    let bus_suspend = bus.clone();
    tokio::spawn(async move {
        while sigusr1.recv().await.is_some() {
            info!("received SIGUSR1, suspending");
            bus_suspend.control(ControlEvent::Suspend);
        }
    });

    let mut sigusr2 = signal(SignalKind::user_defined2())?;
    let bus_resume = bus.clone();
    tokio::spawn(async move {
        while sigusr2.recv().await.is_some() {
            info!("received SIGUSR2, resuming");
            bus_resume.control(ControlEvent::Resume);
        }
    });

    Ok(())
}
