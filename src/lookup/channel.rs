use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::error::LookupError;

/// Generation ticket for one lookup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Orders the requests made by one lookup widget.
///
/// Every request takes a ticket when it starts. When a response arrives it is
/// kept only if no newer ticket has been issued on the same channel since.
#[derive(Debug)]
pub struct LookupChannel {
    name: &'static str,
    generation: AtomicU64,
}

impl LookupChannel {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            generation: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Pass `result` through if `ticket` is still the newest, else discard it.
    pub fn accept<T>(
        &self,
        ticket: RequestTicket,
        result: Result<T, LookupError>,
    ) -> Result<T, LookupError> {
        if self.is_current(ticket) {
            return result;
        }
        warn!(
            channel = self.name,
            ticket = ticket.0,
            latest = self.generation.load(Ordering::SeqCst),
            "discarding stale lookup response"
        );
        Err(LookupError::Superseded)
    }

    pub async fn run<T, F>(&self, request: F) -> Result<T, LookupError>
    where
        F: Future<Output = Result<T, LookupError>>,
    {
        let ticket = self.issue();
        let result = request.await;
        self.accept(ticket, result)
    }
}
