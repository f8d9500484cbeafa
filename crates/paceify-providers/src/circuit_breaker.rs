// ABOUTME: Circuit breaker guarding external music catalog calls
// ABOUTME: Fails fast after consecutive transient failures, tries recovery after a cooldown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::atomic::{AtomicU32, AtomicU64, AtomicU8, Ordering};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::errors::provider::{ProviderError, ProviderResult};

/// Circuit breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Calls pass through; failures are counted
    Closed,
    /// Calls are rejected until the cooldown elapses
    Open,
    /// Cooldown elapsed; calls are probing for recovery
    HalfOpen,
}

impl CircuitState {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Closed,
            1 => Self::Open,
            _ => Self::HalfOpen,
        }
    }

    const fn as_u8(self) -> u8 {
        match self {
            Self::Closed => 0,
            Self::Open => 1,
            Self::HalfOpen => 2,
        }
    }
}

/// Thresholds for opening and closing the circuit
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive transient failures that open the circuit
    pub failure_threshold: u32,
    /// Time the circuit stays open before a trial call is allowed
    pub cooldown: Duration,
    /// Successful trial calls required to close the circuit again
    pub success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            cooldown: Duration::from_secs(30),
            success_threshold: 1,
        }
    }
}

impl CircuitBreakerConfig {
    /// Create a configuration
    #[must_use]
    pub const fn new(failure_threshold: u32, cooldown: Duration, success_threshold: u32) -> Self {
        Self {
            failure_threshold,
            cooldown,
            success_threshold,
        }
    }
}

/// Lock-free circuit breaker for one catalog
///
/// Only transient failures (see [`ProviderError::is_retryable`]) count toward
/// opening the circuit, so an expired user token never trips it.
pub struct CircuitBreaker {
    catalog: &'static str,
    state: AtomicU8,
    failures: AtomicU32,
    trial_successes: AtomicU32,
    opened_at_ms: AtomicU64,
    config: CircuitBreakerConfig,
    epoch: Instant,
}

impl CircuitBreaker {
    /// Create a breaker with default thresholds
    #[must_use]
    pub fn new(catalog: &'static str) -> Self {
        Self::with_config(catalog, CircuitBreakerConfig::default())
    }

    /// Create a breaker with custom thresholds
    #[must_use]
    pub fn with_config(catalog: &'static str, config: CircuitBreakerConfig) -> Self {
        Self {
            catalog,
            state: AtomicU8::new(CircuitState::Closed.as_u8()),
            failures: AtomicU32::new(0),
            trial_successes: AtomicU32::new(0),
            opened_at_ms: AtomicU64::new(0),
            config,
            epoch: Instant::now(),
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> CircuitState {
        CircuitState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Consecutive transient failures seen while closed
    #[must_use]
    pub fn failure_count(&self) -> u32 {
        self.failures.load(Ordering::SeqCst)
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn cooldown_ms(&self) -> u64 {
        self.config.cooldown.as_millis() as u64
    }

    fn open(&self) {
        self.state.store(CircuitState::Open.as_u8(), Ordering::SeqCst);
        self.opened_at_ms.store(self.now_ms(), Ordering::SeqCst);
        self.trial_successes.store(0, Ordering::SeqCst);
    }

    /// Admit a call or reject it with `CircuitBreakerOpen`
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::CircuitBreakerOpen` while the circuit is open
    /// and the cooldown has not elapsed.
    pub fn check(&self) -> ProviderResult<()> {
        match self.state() {
            CircuitState::Closed | CircuitState::HalfOpen => Ok(()),
            CircuitState::Open => {
                let elapsed = self
                    .now_ms()
                    .saturating_sub(self.opened_at_ms.load(Ordering::SeqCst));
                let cooled_down = elapsed >= self.cooldown_ms();
                if cooled_down
                    && self
                        .state
                        .compare_exchange(
                            CircuitState::Open.as_u8(),
                            CircuitState::HalfOpen.as_u8(),
                            Ordering::SeqCst,
                            Ordering::SeqCst,
                        )
                        .is_ok()
                {
                    info!(catalog = self.catalog, "Circuit half-open, probing catalog");
                    return Ok(());
                }
                Err(self.open_error())
            }
        }
    }

    fn open_error(&self) -> ProviderError {
        let elapsed = self
            .now_ms()
            .saturating_sub(self.opened_at_ms.load(Ordering::SeqCst));
        let remaining_ms = self.cooldown_ms().saturating_sub(elapsed);
        ProviderError::CircuitBreakerOpen {
            provider: self.catalog.to_owned(),
            retry_after_secs: remaining_ms.div_ceil(1000).max(1),
        }
    }

    /// Record the outcome of an admitted call
    pub fn record<T>(&self, result: &ProviderResult<T>) {
        match result {
            Ok(_) => self.record_success(),
            Err(error) if error.is_retryable() => self.record_failure(),
            // Non-transient errors still end a half-open trial
            Err(_) => {
                if self.state() == CircuitState::HalfOpen {
                    self.record_success();
                }
            }
        }
    }

    /// Record a successful call
    pub fn record_success(&self) {
        match self.state() {
            CircuitState::Closed => self.failures.store(0, Ordering::SeqCst),
            CircuitState::HalfOpen => {
                let successes = self.trial_successes.fetch_add(1, Ordering::SeqCst) + 1;
                if successes >= self.config.success_threshold {
                    self.reset();
                    info!(catalog = self.catalog, "Circuit closed, catalog recovered");
                }
            }
            CircuitState::Open => {}
        }
    }

    /// Record a transient failure
    pub fn record_failure(&self) {
        match self.state() {
            CircuitState::Closed => {
                let failures = self.failures.fetch_add(1, Ordering::SeqCst) + 1;
                if failures >= self.config.failure_threshold {
                    self.open();
                    warn!(
                        catalog = self.catalog,
                        failures,
                        cooldown_secs = self.config.cooldown.as_secs(),
                        "Circuit opened, catalog failing"
                    );
                }
            }
            CircuitState::HalfOpen => {
                self.open();
                warn!(catalog = self.catalog, "Circuit re-opened, trial call failed");
            }
            CircuitState::Open => self.opened_at_ms.store(self.now_ms(), Ordering::SeqCst),
        }
    }

    /// Force the circuit closed
    pub fn reset(&self) {
        self.state.store(CircuitState::Closed.as_u8(), Ordering::SeqCst);
        self.failures.store(0, Ordering::SeqCst);
        self.trial_successes.store(0, Ordering::SeqCst);
    }
}
