// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Bounded retry loop with exponential backoff.
//!
//! Each attempt reports an explicit [`Attempt`] outcome: `Retryable` sleeps
//! and tries again, `Fatal` stops immediately, `Success` returns. The only
//! thing the driver asks of a retryable error is an optional server-supplied
//! wait ([`RetryableError::retry_after`]), which stretches the next backoff.
//! Attempts run strictly one after another and an in-flight attempt is never
//! cancelled; the optional deadline is only consulted before sleeping.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

/// Outcome of a single attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt<T, E> {
	Success(T),
	Retryable(E),
	Fatal(E),
}

/// Classification hook for error types that know whether they are transient.
pub trait RetryableError {
	fn is_retryable(&self) -> bool;

	/// Minimum wait the remote side asked for, e.g. a `Retry-After` header.
	fn retry_after(&self) -> Option<Duration> {
		None
	}
}

impl<T, E: RetryableError> From<Result<T, E>> for Attempt<T, E> {
	fn from(result: Result<T, E>) -> Self {
		match result {
			Ok(value) => Attempt::Success(value),
			Err(err) if err.is_retryable() => Attempt::Retryable(err),
			Err(err) => Attempt::Fatal(err),
		}
	}
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
	/// Total attempts, the first one included. Values below 1 act as 1.
	pub max_attempts: u32,
	pub base_delay: Duration,
	pub max_delay: Duration,
	pub backoff_factor: f64,
	pub jitter: bool,
	/// Upper bound on wall time spent in the loop. Checked before each sleep.
	pub deadline: Option<Duration>,
}

impl Default for RetryConfig {
	fn default() -> Self {
		Self {
			max_attempts: 3,
			base_delay: Duration::from_millis(500),
			max_delay: Duration::from_secs(30),
			backoff_factor: 2.0,
			jitter: false,
			deadline: Some(Duration::from_secs(150)),
		}
	}
}

/// Why the loop gave up.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryError<E> {
	/// Every attempt failed with a retryable error.
	Exhausted { attempts: u32, last_error: E },
	/// An attempt reported a non-retryable failure.
	Fatal { attempts: u32, error: E },
	/// The next backoff would have crossed the configured deadline.
	DeadlineExceeded { attempts: u32, last_error: E },
}

impl<E> RetryError<E> {
	pub fn attempts(&self) -> u32 {
		match self {
			RetryError::Exhausted { attempts, .. }
			| RetryError::Fatal { attempts, .. }
			| RetryError::DeadlineExceeded { attempts, .. } => *attempts,
		}
	}

	pub fn into_inner(self) -> E {
		match self {
			RetryError::Exhausted { last_error, .. } => last_error,
			RetryError::Fatal { error, .. } => error,
			RetryError::DeadlineExceeded { last_error, .. } => last_error,
		}
	}
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RetryError::Exhausted {
				attempts,
				last_error,
			} => write!(f, "gave up after {attempts} attempts: {last_error}"),
			RetryError::Fatal { attempts, error } => {
				write!(f, "non-retryable failure on attempt {attempts}: {error}")
			}
			RetryError::DeadlineExceeded {
				attempts,
				last_error,
			} => write!(
				f,
				"retry deadline reached after {attempts} attempts: {last_error}"
			),
		}
	}
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for RetryError<E> {}

/// Delay before the attempt following failure number `attempt + 1`.
///
/// With the defaults this is `0.5 * 2^attempt` seconds.
pub(crate) fn calculate_delay(cfg: &RetryConfig, attempt: u32) -> Duration {
	let exponential_delay = cfg.base_delay.as_secs_f64() * cfg.backoff_factor.powi(attempt as i32);
	let capped_delay = exponential_delay.min(cfg.max_delay.as_secs_f64());

	let final_delay = if cfg.jitter {
		let jitter_factor = 0.5 + fastrand::f64();
		capped_delay * jitter_factor
	} else {
		capped_delay
	};

	Duration::from_secs_f64(final_delay)
}

/// Backoff delay, raised to the server's hint when it asks for longer.
/// The hint is still capped by `max_delay`.
pub(crate) fn next_delay(cfg: &RetryConfig, attempt: u32, hint: Option<Duration>) -> Duration {
	let backoff = calculate_delay(cfg, attempt);
	match hint {
		Some(hint) => backoff.max(hint.min(cfg.max_delay)),
		None => backoff,
	}
}

/// Run `f` until it succeeds, fails fatally, or the budget is spent.
///
/// `f` receives the zero-based attempt index.
pub async fn retry<F, Fut, T, E>(cfg: &RetryConfig, mut f: F) -> Result<T, RetryError<E>>
where
	F: FnMut(u32) -> Fut,
	Fut: Future<Output = Attempt<T, E>>,
	E: RetryableError + fmt::Debug,
{
	let max_attempts = cfg.max_attempts.max(1);
	let started = Instant::now();
	let mut attempt = 0;

	loop {
		let outcome = f(attempt).await;
		attempt += 1;

		match outcome {
			Attempt::Success(value) => {
				if attempt > 1 {
					debug!(attempts = attempt, "succeeded after retrying");
				}
				return Ok(value);
			}
			Attempt::Fatal(error) => {
				warn!(
						error = ?error,
						attempt = attempt,
						"non-retryable error encountered"
				);
				return Err(RetryError::Fatal {
					attempts: attempt,
					error,
				});
			}
			Attempt::Retryable(error) => {
				if attempt >= max_attempts {
					warn!(
							error = ?error,
							attempt = attempt,
							max_attempts = max_attempts,
							"max retry attempts exhausted"
					);
					return Err(RetryError::Exhausted {
						attempts: attempt,
						last_error: error,
					});
				}

				let delay = next_delay(cfg, attempt - 1, error.retry_after());
				if let Some(deadline) = cfg.deadline {
					if started.elapsed() + delay >= deadline {
						warn!(
								error = ?error,
								attempt = attempt,
								deadline_ms = deadline.as_millis(),
								"retry deadline reached"
						);
						return Err(RetryError::DeadlineExceeded {
							attempts: attempt,
							last_error: error,
						});
					}
				}

				warn!(
						error = ?error,
						attempt = attempt,
						max_attempts = max_attempts,
						delay_ms = delay.as_millis(),
						"retrying after error"
				);

				tokio::time::sleep(delay).await;
			}
		}
	}
}
