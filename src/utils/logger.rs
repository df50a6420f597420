// src/utils/logger.rs

use env_logger::{Builder, Env};
use log::Level;
use std::io::Write;

/// Console logger for the command-line tools.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug output and the
/// default is info. Lines look like `🔵  Loaded 4 atoms from POSCAR`.
pub fn init(verbose: bool) {
  let default = if verbose { "debug" } else { "info" };
  let mut builder = Builder::from_env(Env::default().default_filter_or(default));
  builder.format(|buf, record| writeln!(buf, "{}  {}", icon(record.level()), record.args()));
  // A second init (tests, embedding) keeps the first logger.
  let _ = builder.try_init();
}

fn icon(level: Level) -> &'static str {
  match level {
    Level::Error => "🔴",
    Level::Warn => "🟠",
    Level::Info => "🔵",
    Level::Debug => "⚪",
    Level::Trace => "▫️",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_icons() {
    assert_eq!(icon(Level::Error), "🔴");
    assert_eq!(icon(Level::Debug), "⚪");
  }

  #[test]
  fn test_init_twice_is_harmless() {
    init(false);
    init(true);
    log::debug!("logger initialised twice");
  }
}
