//! Process lifecycle: signal-driven shutdown.
//!
//! Shutdown is a single-consumer event. Exactly one termination signal
//! is awaited and classified, after which the process exits; there is no
//! signal loop and no debouncing. The recognized set is fixed at
//! subscription time, so no other signal can ever wake the supervisor.

/// A recognized termination signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGHUP.
    Hangup,
    /// SIGINT.
    Interrupt,
    /// SIGTERM.
    Terminate,
    /// SIGQUIT.
    Quit,
}

impl ShutdownSignal {
    /// The conventional name of the signal.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hangup => "SIGHUP",
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
            Self::Quit => "SIGQUIT",
        }
    }

    /// Exit code for a shutdown triggered by this signal.
    ///
    /// An orchestrated stop (SIGTERM) is a clean exit; any other
    /// recognized signal is reported as a failure.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Terminate => 0,
            Self::Hangup | Self::Interrupt | Self::Quit => 1,
        }
    }
}

/// Wait for the first recognized termination signal.
///
/// Installs handlers for SIGHUP, SIGINT, SIGTERM and SIGQUIT and
/// resolves once any one of them is delivered.
///
/// # Panics
///
/// Panics if a signal handler cannot be installed.
#[cfg(unix)]
pub async fn wait_for_shutdown() -> ShutdownSignal {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup()).expect("failed to install SIGHUP handler");
    let mut interrupt = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
    let mut terminate = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    let mut quit = signal(SignalKind::quit()).expect("failed to install SIGQUIT handler");

    tokio::select! {
        _ = hangup.recv() => ShutdownSignal::Hangup,
        _ = interrupt.recv() => ShutdownSignal::Interrupt,
        _ = terminate.recv() => ShutdownSignal::Terminate,
        _ = quit.recv() => ShutdownSignal::Quit,
    }
}

/// Wait for the first termination signal.
///
/// On non-unix platforms only Ctrl+C is available; it classifies as an
/// interrupt.
///
/// # Panics
///
/// Panics if the Ctrl+C handler cannot be installed.
#[cfg(not(unix))]
pub async fn wait_for_shutdown() -> ShutdownSignal {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    ShutdownSignal::Interrupt
}
