// Copyright 2025 Irreducible Inc.

use std::{
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
	time::{Duration, Instant},
};

/// A shared flag that asks a long-running search to stop, optionally raised by a deadline.
///
/// Clones share the same flag, so one clone may be handed to another thread to cancel the
/// search that polls the original.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
	flag: Arc<AtomicBool>,
	deadline: Option<Instant>,
}

impl CancelToken {
	pub fn new() -> Self {
		Self::default()
	}

	/// A token that reports cancellation once `timeout` has elapsed.
	pub fn with_deadline(timeout: Duration) -> Self {
		Self {
			flag: Arc::default(),
			deadline: Instant::now().checked_add(timeout),
		}
	}

	pub fn cancel(&self) {
		self.flag.store(true, Ordering::Release);
	}

	pub fn is_cancelled(&self) -> bool {
		self.flag.load(Ordering::Acquire)
			|| self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cancel_is_shared_between_clones() {
		let token = CancelToken::new();
		let other = token.clone();
		assert!(!token.is_cancelled());
		other.cancel();
		assert!(token.is_cancelled());
	}

	#[test]
	fn deadline_expires() {
		assert!(CancelToken::with_deadline(Duration::ZERO).is_cancelled());
		assert!(!CancelToken::with_deadline(Duration::from_secs(3600)).is_cancelled());
	}
}
