//! Test utilities for property-based testing
//!
//! This module provides generators and in-memory collaborators shared by
//! the unit tests.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    const CANONICAL: [&str; 3] = ["always", "never", "if-not-present"];

    /// Generate one of the canonical pull policy strings
    pub fn valid_policy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("always".to_string()),
            Just("never".to_string()),
            Just("if-not-present".to_string()),
        ]
    }

    /// Generate any string that is not a canonical pull policy, including ""
    pub fn invalid_policy_string() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("Always".to_string()),
            Just("never ".to_string()),
            Just("ifnotpresent".to_string()),
            ".{0,24}",
        ]
        .prop_filter("Must not be a canonical policy", |s| {
            !CANONICAL.contains(&s.as_str())
        })
    }

    /// Generate a package name such as `registry.example.com/team/bp:1.2`
    pub fn package_name() -> impl Strategy<Value = String> {
        ("[a-z][a-z0-9-]{0,15}", "[a-z][a-z0-9-]{0,15}", 0u32..20)
            .prop_map(|(team, bp, minor)| format!("registry.example.com/{team}/{bp}:0.{minor}"))
    }
}

#[cfg(test)]
pub mod fakes {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use tokio_util::sync::CancellationToken;

    use crate::core::buildpack_package::{PackageOptions, Packager};
    use crate::core::global_config::{ConfigStore, GlobalConfig};
    use crate::core::package_config::{PackageConfigReader, PackageDefinition};
    use crate::error::{ConfigStoreError, PackageConfigError, PackagerError};

    /// Config store holding the persisted config in memory
    #[derive(Default)]
    pub struct MemoryConfigStore {
        pub stored: Mutex<GlobalConfig>,
        pub writes: Mutex<usize>,
        pub fail_writes: bool,
    }

    impl MemoryConfigStore {
        pub fn with_policy(policy: &str) -> Self {
            Self {
                stored: Mutex::new(GlobalConfig {
                    pull_policy: Some(policy.to_string()),
                    ..GlobalConfig::default()
                }),
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }

        pub fn stored_policy(&self) -> Option<String> {
            self.stored.lock().unwrap().pull_policy.clone()
        }

        pub fn write_count(&self) -> usize {
            *self.writes.lock().unwrap()
        }
    }

    impl ConfigStore for MemoryConfigStore {
        fn load(&self) -> Result<GlobalConfig, ConfigStoreError> {
            Ok(self.stored.lock().unwrap().clone())
        }

        fn write(&self, config: &GlobalConfig) -> Result<(), ConfigStoreError> {
            if self.fail_writes {
                return Err(ConfigStoreError::WriteError {
                    path: PathBuf::from("memory"),
                    error: "disk full".to_string(),
                });
            }
            *self.stored.lock().unwrap() = config.clone();
            *self.writes.lock().unwrap() += 1;
            Ok(())
        }
    }

    /// Package config reader serving canned definitions
    #[derive(Default)]
    pub struct FakeReader {
        pub definitions: HashMap<PathBuf, PackageDefinition>,
        pub reads: Mutex<Vec<PathBuf>>,
    }

    impl FakeReader {
        pub fn with(path: &str, definition: PackageDefinition) -> Self {
            let mut definitions = HashMap::new();
            definitions.insert(PathBuf::from(path), definition);
            Self {
                definitions,
                ..Self::default()
            }
        }

        pub fn read_count(&self) -> usize {
            self.reads.lock().unwrap().len()
        }
    }

    impl PackageConfigReader for FakeReader {
        fn read(&self, path: &Path) -> Result<PackageDefinition, PackageConfigError> {
            self.reads.lock().unwrap().push(path.to_path_buf());
            self.definitions
                .get(path)
                .cloned()
                .ok_or_else(|| PackageConfigError::ReadError {
                    error: "No such file or directory".to_string(),
                })
        }
    }

    /// Packager recording every request it receives
    #[derive(Default)]
    pub struct RecordingPackager {
        pub calls: Mutex<Vec<PackageOptions>>,
        pub tokens: Mutex<Vec<CancellationToken>>,
        pub fail_with: Option<String>,
    }

    impl RecordingPackager {
        pub fn failing(status: &str) -> Self {
            Self {
                fail_with: Some(status.to_string()),
                ..Self::default()
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn last_call(&self) -> Option<PackageOptions> {
            self.calls.lock().unwrap().last().cloned()
        }

        /// Token handed to the most recent call
        pub fn last_token(&self) -> Option<CancellationToken> {
            self.tokens.lock().unwrap().last().cloned()
        }
    }

    impl Packager for RecordingPackager {
        async fn package(
            &self,
            cancel: &CancellationToken,
            options: &PackageOptions,
        ) -> Result<(), PackagerError> {
            self.calls.lock().unwrap().push(options.clone());
            self.tokens.lock().unwrap().push(cancel.clone());
            match &self.fail_with {
                Some(status) => Err(PackagerError::Failed {
                    program: "fake".to_string(),
                    status: status.clone(),
                }),
                None => Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_invalid_policy_generator(value in invalid_policy_string()) {
            prop_assert!(!["always", "never", "if-not-present"].contains(&value.as_str()));
        }

        #[test]
        fn test_package_name_generator(name in package_name()) {
            prop_assert!(name.starts_with("registry.example.com/"));
            prop_assert!(name.contains(':'));
        }
    }
}
