use std::sync::atomic::{AtomicUsize, Ordering};

const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/112.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/112.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/112.0.0.0 Safari/537.36",
];

/// Rotates through a fixed set of browser user agents for outbound portal
/// calls. Cosmetic variety only, not a security control.
#[derive(Debug, Default)]
pub struct UserAgentPool {
    next: AtomicUsize,
}

impl UserAgentPool {
    pub fn new() -> Self {
        Self {
            next: AtomicUsize::new(0),
        }
    }

    pub fn next_agent(&self) -> &'static str {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        USER_AGENTS[index % USER_AGENTS.len()]
    }
}
