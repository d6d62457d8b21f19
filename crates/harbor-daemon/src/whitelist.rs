// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Whitelist tables for buildpack classification and service filtering.
//!
//! Both tables are immutable, injectable configuration: the defaults
//! hold the production mappings, and tests substitute alternates without
//! touching process-wide state.

use std::collections::{HashMap, HashSet};

/// Label for a buildpack name not present in the whitelist.
pub const CUSTOM_BUILDPACK: &str = "custom";

/// Label for an empty buildpack request.
pub const UNSPECIFIED_BUILDPACK: &str = "unspecified";

/// Maps requested buildpack names to the normalized labels reported in
/// telemetry.
#[derive(Debug, Clone)]
pub struct BuildpackWhitelist {
	labels: HashMap<String, String>,
}

impl BuildpackWhitelist {
	/// Creates a whitelist from explicit name→label pairs.
	pub fn new<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			labels: pairs
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}

	/// Classifies a requested buildpack name.
	///
	/// The empty string classifies as `unspecified`; any name absent
	/// from the table classifies as `custom`, so arbitrary user-supplied
	/// buildpack names never reach the telemetry backend.
	pub fn classify<'a>(&'a self, requested: &str) -> &'a str {
		if requested.is_empty() {
			return UNSPECIFIED_BUILDPACK;
		}
		self.labels
			.get(requested)
			.map(String::as_str)
			.unwrap_or(CUSTOM_BUILDPACK)
	}
}

impl Default for BuildpackWhitelist {
	fn default() -> Self {
		Self::new([
			("staticfile_buildpack", "staticfile"),
			("java_buildpack", "java"),
			("ruby_buildpack", "ruby"),
			("nodejs_buildpack", "nodejs"),
			("go_buildpack", "go"),
			("python_buildpack", "python"),
			("php_buildpack", "php"),
			("dotnet_core_buildpack", "dotnet-core"),
			("binary_buildpack", "binary"),
		])
	}
}

/// Service labels that may be reported in telemetry.
///
/// Labels outside the set suppress the emission entirely: service names
/// can identify third-party brokers, so only known platform services are
/// ever reported.
#[derive(Debug, Clone)]
pub struct ServiceWhitelist {
	labels: HashSet<String>,
}

impl ServiceWhitelist {
	/// Creates a whitelist from explicit labels.
	pub fn new<I, S>(labels: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			labels: labels.into_iter().map(Into::into).collect(),
		}
	}

	/// Returns true if the label may be reported.
	pub fn is_whitelisted(&self, label: &str) -> bool {
		self.labels.contains(label)
	}
}

impl Default for ServiceWhitelist {
	fn default() -> Self {
		Self::new([
			"p-mysql",
			"p.mysql",
			"p-redis",
			"p.redis",
			"p-rabbitmq",
			"p.rabbitmq",
			"p-config-server",
			"p-service-registry",
			"p-circuit-breaker-dashboard",
			"apm",
		])
	}
}

/// The pair of tables handed to handlers through the dispatch context.
#[derive(Debug, Clone, Default)]
pub struct Whitelists {
	pub buildpacks: BuildpackWhitelist,
	pub services: ServiceWhitelist,
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_known_buildpacks_classify_to_labels() {
		let whitelist = BuildpackWhitelist::default();
		assert_eq!(whitelist.classify("go_buildpack"), "go");
		assert_eq!(whitelist.classify("ruby_buildpack"), "ruby");
		assert_eq!(whitelist.classify("java_buildpack"), "java");
	}

	#[test]
	fn test_empty_buildpack_is_unspecified() {
		let whitelist = BuildpackWhitelist::default();
		assert_eq!(whitelist.classify(""), UNSPECIFIED_BUILDPACK);
	}

	#[test]
	fn test_unknown_buildpack_is_custom() {
		let whitelist = BuildpackWhitelist::default();
		assert_eq!(
			whitelist.classify("https://example.com/my-buildpack.git"),
			CUSTOM_BUILDPACK
		);
	}

	#[test]
	fn test_injected_table_overrides_defaults() {
		let whitelist = BuildpackWhitelist::new([("go_buildpack", "golang")]);
		assert_eq!(whitelist.classify("go_buildpack"), "golang");
		assert_eq!(whitelist.classify("ruby_buildpack"), CUSTOM_BUILDPACK);
	}

	#[test]
	fn test_service_membership_is_binary() {
		let whitelist = ServiceWhitelist::default();
		assert!(whitelist.is_whitelisted("p-mysql"));
		assert!(!whitelist.is_whitelisted("acme-third-party-db"));
	}

	proptest! {
		#[test]
		fn classification_is_total(name in "[a-zA-Z0-9_:/.-]{0,40}") {
			let whitelist = BuildpackWhitelist::default();
			let label = whitelist.classify(&name);
			if name.is_empty() {
				prop_assert_eq!(label, UNSPECIFIED_BUILDPACK);
			} else {
				prop_assert!(!label.is_empty());
			}
		}

		#[test]
		fn unknown_services_never_whitelisted(label in "zz[a-z0-9-]{1,20}") {
			let whitelist = ServiceWhitelist::default();
			prop_assert!(!whitelist.is_whitelisted(&label));
		}
	}
}
