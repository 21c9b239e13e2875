//! Fixed-window, per-client-IP rate limiting.

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::api::ErrorResponse;
use crate::state::AppState;

const WINDOW: Duration = Duration::from_secs(1);
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);
const ENTRY_TTL: Duration = Duration::from_secs(300);

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
    burst_used: u32,
    last_seen: Instant,
}

impl Window {
    fn new(now: Instant) -> Self {
        Self {
            started: now,
            count: 0,
            burst_used: 0,
            last_seen: now,
        }
    }

    fn reset(&mut self, now: Instant) {
        self.started = now;
        self.count = 0;
        self.burst_used = 0;
    }
}

#[derive(Debug)]
struct Clients {
    per_ip: HashMap<IpAddr, Window>,
    last_cleanup: Instant,
}

impl Clients {
    fn cleanup(&mut self, now: Instant) {
        if now.duration_since(self.last_cleanup) < CLEANUP_INTERVAL {
            return;
        }
        self.last_cleanup = now;
        let cutoff = now.checked_sub(ENTRY_TTL).unwrap_or(now);
        self.per_ip.retain(|_, window| window.last_seen >= cutoff);
    }
}

/// Counts requests per client IP in one-second windows.
#[derive(Debug)]
pub struct RateLimiter {
    inner: Mutex<Clients>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Clients {
                per_ip: HashMap::new(),
                last_cleanup: Instant::now(),
            }),
        }
    }

    /// Record one request from `client` and report whether it may proceed.
    pub fn allow(&self, now: Instant, client: IpAddr, rps: u32, burst: u32) -> bool {
        let Ok(mut clients) = self.inner.lock() else {
            tracing::error!("rate limiter lock poisoned, denying request");
            return false;
        };

        clients.cleanup(now);
        let window = clients
            .per_ip
            .entry(client)
            .or_insert_with(|| Window::new(now));
        window.last_seen = now;

        if now.duration_since(window.started) >= WINDOW {
            window.reset(now);
        }

        if window.count < rps {
            window.count += 1;
            true
        } else if window.burst_used < burst {
            window.burst_used += 1;
            true
        } else {
            false
        }
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.inner.lock().map(|c| c.per_ip.len()).unwrap_or(0)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let limits = &state.rate_limit;
    if !limits.enabled {
        return next.run(req).await;
    }

    let client_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    let rps = limits.requests_per_second.max(1);
    let burst = limits.burst;

    if !state
        .rate_limiter
        .allow(Instant::now(), client_ip, rps, burst)
    {
        tracing::debug!(%client_ip, rps, burst, "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse {
                error: "rate limit exceeded".into(),
            }),
        )
            .into_response();
    }

    next.run(req).await
}
