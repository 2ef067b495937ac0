pub mod cli;
mod error;

pub use self::error::Error;
pub use cli::{Command, Opts, API_KEY_ENV_VAR, ENV_PREFIX, PORT_ENV_VAR};
