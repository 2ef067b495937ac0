mod error;
pub use self::error::Error;

use config::{Config, Environment, File};
use std::{env, path::Path};
use tracing::trace;

use crate::err_context::ErrorContextExt;

/// Environment variable selecting the configuration profile. It takes precedence over
/// the profile given as argument (usually coming from the command line).
pub const PROFILE_ENV_VAR: &str = "ANALYZER_PROFILE";

static DEFAULT_ENV_NAME: &str = "default";
static LOCAL_ENV_NAME: &str = "local";

/// Merge the configuration found under `root_dir`.
///
/// For each of the `sub_dirs`, we read, in order, the `default` file (mandatory), the
/// profile file and the `local` file (both optional). Then environment variables with the
/// given prefix (eg `ANALYZER__APPLICATION__PORT`), and finally the `overrides`, each of
/// them a TOML assignment `key=value`.
pub fn merge_configuration<
    'a,
    R: Into<Option<&'a str>> + Clone,
    P: Into<Option<&'a str>>,
    D: AsRef<str>,
>(
    root_dir: &Path,
    sub_dirs: &[D],
    profile: R,
    prefix: P,
    overrides: Vec<String>,
) -> Result<Config, Error> {
    if !root_dir.is_dir() {
        return Err(Error::Directory {
            context: "not found".to_string(),
            path: root_dir.to_path_buf(),
        });
    }

    let profile = env::var(PROFILE_ENV_VAR)
        .ok()
        .or_else(|| profile.into().map(String::from));

    let mut builder = sub_dirs
        .iter()
        .fold(Config::builder(), |mut builder, sub_dir| {
            let dir_path = root_dir.join(sub_dir.as_ref());

            let default_path = dir_path.join(DEFAULT_ENV_NAME);
            trace!(
                "Reading default configuration from: {}",
                default_path.display()
            );
            builder = builder.add_source(File::from(default_path));

            if let Some(profile) = profile.as_deref() {
                let profile_path = dir_path.join(profile);
                trace!(
                    "Reading profile configuration from: {}",
                    profile_path.display()
                );
                builder = builder.add_source(File::from(profile_path).required(false));
            }

            // Not checked in, holds secrets and developer tweaks.
            let local_path = dir_path.join(LOCAL_ENV_NAME);
            trace!("Reading local configuration from: {}", local_path.display());
            builder.add_source(File::from(local_path).required(false))
        });

    if let Some(prefix) = prefix.into() {
        let prefix = Environment::with_prefix(prefix)
            .prefix_separator("__")
            .separator("__");
        builder = builder.add_source(prefix)
    }

    if !overrides.is_empty() {
        builder = builder.add_source(config_from_args(overrides)?)
    }

    builder
        .build()
        .context("Could not merge configuration")
        .map_err(|err| err.into())
}

// Create a new configuration source from a list of assignments key=value
fn config_from_args(args: impl IntoIterator<Item = String>) -> Result<Config, Error> {
    let builder = args.into_iter().fold(Config::builder(), |builder, arg| {
        builder.add_source(File::from_str(&arg, config::FileFormat::Toml))
    });
    builder
        .build()
        .context("Could not build configuration from args")
        .map_err(|err| err.into())
}
