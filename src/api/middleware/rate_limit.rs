//! Per-route, per-client rate limiting on top of `governor`.
//!
//! Every [`RateLimitPolicy`] owns one keyed GCRA limiter. A quota of `max`
//! requests per `window` becomes a burst of `max` that refills one request
//! every `window / max`.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use governor::{
    DefaultKeyedRateLimiter, Quota, RateLimiter,
    clock::{Clock, DefaultClock},
};
use tracing::warn;

use crate::error::AppError;

const HOUR: Duration = Duration::from_secs(60 * 60);
const DAY: Duration = Duration::from_secs(24 * 60 * 60);
const MONTH: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// `max` requests per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteQuota {
    pub max: u32,
    pub window: Duration,
}

impl RouteQuota {
    pub const fn per_hour(max: u32) -> Self {
        Self { max, window: HOUR }
    }

    pub const fn per_day(max: u32) -> Self {
        Self { max, window: DAY }
    }

    pub const fn per_month(max: u32) -> Self {
        Self { max, window: MONTH }
    }

    fn to_governor(self) -> Quota {
        let burst = NonZeroU32::new(self.max).unwrap_or(NonZeroU32::MIN);
        let period = self.window / burst.get();

        Quota::with_period(period)
            .map(|quota| quota.allow_burst(burst))
            .unwrap_or_else(|| Quota::per_second(burst))
    }
}

/// Route categories that carry a quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitPolicy {
    CreateCustomer,
    ListCustomers,
    UpdateCustomer,
    DeleteCustomer,
    CreateMechanic,
    UpdateMechanic,
    DeleteMechanic,
    CreateInventory,
    UpdateInventory,
    DeleteInventory,
    CreateServiceTicket,
}

impl RateLimitPolicy {
    pub const ALL: [RateLimitPolicy; 11] = [
        Self::CreateCustomer,
        Self::ListCustomers,
        Self::UpdateCustomer,
        Self::DeleteCustomer,
        Self::CreateMechanic,
        Self::UpdateMechanic,
        Self::DeleteMechanic,
        Self::CreateInventory,
        Self::UpdateInventory,
        Self::DeleteInventory,
        Self::CreateServiceTicket,
    ];

    pub fn quota(self) -> RouteQuota {
        match self {
            Self::CreateCustomer | Self::DeleteCustomer => RouteQuota::per_day(5),
            Self::ListCustomers => RouteQuota::per_hour(3),
            Self::UpdateCustomer => RouteQuota::per_month(5),
            Self::CreateMechanic
            | Self::DeleteMechanic
            | Self::CreateInventory
            | Self::DeleteInventory => RouteQuota::per_day(10),
            Self::UpdateMechanic | Self::UpdateInventory => RouteQuota::per_month(10),
            Self::CreateServiceTicket => RouteQuota::per_day(20),
        }
    }

    /// Label used in logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            Self::CreateCustomer => "create_customer",
            Self::ListCustomers => "list_customers",
            Self::UpdateCustomer => "update_customer",
            Self::DeleteCustomer => "delete_customer",
            Self::CreateMechanic => "create_mechanic",
            Self::UpdateMechanic => "update_mechanic",
            Self::DeleteMechanic => "delete_mechanic",
            Self::CreateInventory => "create_inventory",
            Self::UpdateInventory => "update_inventory",
            Self::DeleteInventory => "delete_inventory",
            Self::CreateServiceTicket => "create_service_ticket",
        }
    }
}

/// All route limiters of one server.
pub struct RateLimits {
    limiters: HashMap<RateLimitPolicy, DefaultKeyedRateLimiter<IpAddr>>,
    enabled: bool,
    behind_proxy: bool,
}

impl RateLimits {
    /// Builds one limiter per policy.
    ///
    /// # Arguments
    ///
    /// - `enabled` - when `false`, every check passes
    /// - `behind_proxy` - when `true`, client IPs are read from
    ///   `X-Forwarded-For` / `X-Real-IP`; enable only behind a trusted proxy
    pub fn new(enabled: bool, behind_proxy: bool) -> Self {
        let limiters = RateLimitPolicy::ALL
            .into_iter()
            .map(|policy| (policy, RateLimiter::keyed(policy.quota().to_governor())))
            .collect();

        Self {
            limiters,
            enabled,
            behind_proxy,
        }
    }

    pub fn disabled() -> Self {
        Self::new(false, false)
    }

    /// Consumes one request from the client's bucket for `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RateLimited`] with the seconds until the next
    /// request would be allowed.
    pub fn check(&self, policy: RateLimitPolicy, client: IpAddr) -> Result<(), AppError> {
        if !self.enabled {
            return Ok(());
        }

        let Some(limiter) = self.limiters.get(&policy) else {
            return Ok(());
        };

        limiter.check_key(&client).map_err(|not_until| {
            let wait = not_until.wait_time_from(DefaultClock::default().now());
            let retry_after_secs = wait.as_secs().max(1);

            warn!(route = policy.name(), %client, retry_after_secs, "Rate limit exceeded");
            metrics::counter!("rate_limit_rejections_total", "route" => policy.name())
                .increment(1);

            let quota = policy.quota();
            AppError::rate_limited(
                format!(
                    "Rate limit exceeded: {} per {}",
                    quota.max,
                    describe_window(quota.window)
                ),
                retry_after_secs,
            )
        })
    }

    /// Resolves the key for a request.
    ///
    /// Falls back to the unspecified address when neither proxy headers nor
    /// the peer address are available, so all such requests share a bucket.
    pub fn client_ip(&self, headers: &HeaderMap, peer: Option<SocketAddr>) -> IpAddr {
        if self.behind_proxy
            && let Some(ip) = forwarded_ip(headers)
        {
            return ip;
        }

        peer.map(|addr| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }
}

/// First address of `X-Forwarded-For`, else `X-Real-IP`.
fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse().ok())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
        })
}

fn describe_window(window: Duration) -> &'static str {
    match window {
        w if w == HOUR => "hour",
        w if w == DAY => "day",
        w if w == MONTH => "month",
        _ => "window",
    }
}

/// State of one route's rate-limit layer.
#[derive(Clone)]
pub struct PolicyState {
    limits: Arc<RateLimits>,
    policy: RateLimitPolicy,
}

/// Checks the route's quota before the request reaches the handler.
///
/// Requests exceeding the limit receive `429 Too Many Requests` with a
/// `Retry-After` header.
pub async fn layer(
    State(st): State<PolicyState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = st.limits.client_ip(req.headers(), peer);

    st.limits.check(st.policy, client)?;

    Ok(next.run(req).await)
}

/// Wraps a method route with the quota of `policy`.
///
/// # Example
///
/// ```rust,ignore
/// let route = limit(post(create_customer_handler), &limits, RateLimitPolicy::CreateCustomer);
/// ```
pub fn limit<S>(
    route: MethodRouter<S>,
    limits: &Arc<RateLimits>,
    policy: RateLimitPolicy,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(middleware::from_fn_with_state(
        PolicyState {
            limits: limits.clone(),
            policy,
        },
        layer,
    ))
}
