//! # Rate Limiting Middleware
//!
//! A fixed-window request counter keyed by client IP, used to throttle the
//! public slot endpoint.
//!
//! The counters live in process memory: they reset when the server restarts
//! and are not shared between instances running behind a load balancer.
//!
//! Clients are keyed by socket peer address. The `X-Forwarded-For` header is
//! only honored when the limiter is told it sits behind a trusted proxy, as
//! any caller can set it. At most `max_clients` addresses are tracked; once
//! full, expired entries are swept and unknown addresses are refused until
//! room frees up.

use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use slotbook_core::errors::BookingError;
use tracing::warn;

use crate::{middleware::error_handling::AppError, ApiState};

/// Default bound on tracked client addresses.
pub const DEFAULT_MAX_CLIENTS: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct ClientWindow {
    started: Instant,
    count: u32,
}

#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    max_clients: usize,
    trust_forwarded_for: bool,
    clients: Mutex<HashMap<IpAddr, ClientWindow>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            max_clients: DEFAULT_MAX_CLIENTS,
            trust_forwarded_for: false,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_max_clients(mut self, max_clients: usize) -> Self {
        self.max_clients = max_clients.max(1);
        self
    }

    /// Keys clients on the first `X-Forwarded-For` hop when present.
    pub fn trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    pub fn trusts_forwarded_for(&self) -> bool {
        self.trust_forwarded_for
    }

    /// Records one request from `ip`.
    ///
    /// Returns `Err` with a retry delay once the client has used up its
    /// allowance, or when `ip` is new and the client table is full.
    pub fn check(&self, ip: IpAddr) -> Result<(), Duration> {
        self.check_at(ip, Instant::now())
    }

    pub fn check_at(&self, ip: IpAddr, now: Instant) -> Result<(), Duration> {
        // Counters stay consistent even if a holder panicked.
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);

        if clients.len() >= self.max_clients && !clients.contains_key(&ip) {
            let window = self.window;
            clients.retain(|_, entry| now.saturating_duration_since(entry.started) < window);

            if clients.len() >= self.max_clients {
                // Refused until the oldest tracked window expires
                let retry_after = clients
                    .values()
                    .map(|entry| {
                        window.saturating_sub(now.saturating_duration_since(entry.started))
                    })
                    .min()
                    .unwrap_or(window);
                return Err(retry_after);
            }
        }

        let entry = clients.entry(ip).or_insert(ClientWindow {
            started: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.window {
            *entry = ClientWindow {
                started: now,
                count: 0,
            };
        }

        if entry.count >= self.max_requests {
            return Err(self.window.saturating_sub(now.saturating_duration_since(entry.started)));
        }

        entry.count += 1;
        Ok(())
    }

    pub fn tracked_clients(&self) -> usize {
        self.clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Client address: the first `X-Forwarded-For` hop when `trust_forwarded_for`
/// is set, otherwise (or when absent) the socket peer.
pub fn client_ip(request: &Request, trust_forwarded_for: bool) -> IpAddr {
    let forwarded = trust_forwarded_for
        .then(|| {
            request
                .headers()
                .get("x-forwarded-for")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.split(',').next())
                .and_then(|first| first.trim().parse::<IpAddr>().ok())
        })
        .flatten();

    forwarded
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip())
        })
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

pub async fn rate_limit(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request, state.rate_limiter.trusts_forwarded_for());

    if let Err(retry_after) = state.rate_limiter.check(ip) {
        warn!("Rate limit exceeded for {}", ip);
        return Err(AppError(BookingError::RateLimited(format!(
            "Retry in {} seconds",
            retry_after.as_secs().max(1)
        ))));
    }

    Ok(next.run(request).await)
}
