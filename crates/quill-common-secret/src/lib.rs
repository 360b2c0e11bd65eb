// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret wrapper for credentials such as the completion API key.
//!
//! A [`Secret`] prints as `[REDACTED]` through `Debug`, `Display` and serde,
//! is zeroized on drop, and only hands out its value through
//! [`Secret::expose`].
//!
//! ```
//! use quill_common_secret::SecretString;
//!
//! let key = SecretString::new("sk-live".to_string());
//! assert_eq!(format!("{key}"), "[REDACTED]");
//! assert_eq!(key.expose(), "sk-live");
//! ```

mod env;

pub use env::{load_secret_env, SecretEnvError};

use std::fmt;
use zeroize::Zeroize;

/// Placeholder written wherever a secret would otherwise be printed.
pub const REDACTED: &str = "[REDACTED]";

/// A value that must never reach logs or serialized output.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

/// Secret strings are by far the common case (API keys, tokens).
pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Access the wrapped value. Call sites opt in explicitly.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl SecretString {
	/// True when the wrapped string is empty or whitespace only.
	pub fn is_blank(&self) -> bool {
		self.inner.trim().is_empty()
	}
}

impl<T> Clone for Secret<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Secret").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> PartialEq for Secret<T>
where
	T: Zeroize + PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T> Eq for Secret<T> where T: Zeroize + Eq {}

#[cfg(feature = "serde")]
mod serde_impl {
	use super::{Secret, REDACTED};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};
	use zeroize::Zeroize;

	impl<T> Serialize for Secret<T>
	where
		T: Zeroize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			serializer.serialize_str(REDACTED)
		}
	}

	impl<'de, T> Deserialize<'de> for Secret<T>
	where
		T: Deserialize<'de> + Zeroize,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			T::deserialize(deserializer).map(Secret::new)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn debug_and_display_are_redacted() {
		let key = SecretString::new("sk-deepseek-123".to_string());
		assert_eq!(format!("{key:?}"), "Secret(\"[REDACTED]\")");
		assert_eq!(format!("{key}"), REDACTED);
	}

	#[test]
	fn option_of_secret_is_redacted() {
		let key = Some(SecretString::new("sk-deepseek-123".to_string()));
		let debug = format!("{key:?}");
		assert!(debug.contains(REDACTED));
		assert!(!debug.contains("sk-deepseek-123"));
	}

	#[test]
	fn blank_detection() {
		assert!(SecretString::new("  ".to_string()).is_blank());
		assert!(!SecretString::new("k".to_string()).is_blank());
	}

	#[cfg(feature = "serde")]
	#[test]
	fn serde_redacts_on_the_way_out_only() {
		let key: SecretString = serde_json::from_str(r#""sk-abc""#).unwrap();
		assert_eq!(key.expose(), "sk-abc");
		assert_eq!(serde_json::to_string(&key).unwrap(), r#""[REDACTED]""#);
	}

	proptest! {
		#[test]
		fn display_never_leaks(inner in "[a-zA-Z0-9_-]{4,40}") {
			prop_assume!(!inner.contains("REDACTED"));
			let key = SecretString::new(inner.clone());
			let shown = format!("{key}");
			let debugged = format!("{key:?}");
			prop_assert!(!shown.contains(&inner));
			prop_assert!(!debugged.contains(&inner));
		}
	}
}
