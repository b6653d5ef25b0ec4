/// The runner command used when `AUTORUN_COMMAND` is unset or blank.
pub const DEFAULT_COMMAND: &str = "cargo test";

/// The log filter used when `AUTORUN_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq)]
/// Settings read from the environment.
pub struct Config {
    /// The runner program, followed by any leading arguments it needs
    /// before the forwarded ones. Never empty.
    command: Vec<String>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            command: split_command(DEFAULT_COMMAND),
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl Config {
    #[must_use]
    /// Reads `AUTORUN_COMMAND` and `AUTORUN_LOG` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a `Config` from any key lookup, falling back to the defaults
    /// for missing values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let command = lookup("AUTORUN_COMMAND")
            .map(|value| split_command(&value))
            .filter(|command| !command.is_empty())
            .unwrap_or_else(|| split_command(DEFAULT_COMMAND));
        let log_filter = lookup("AUTORUN_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into());
        Config {
            command,
            log_filter,
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.command[0]
    }

    #[must_use]
    pub fn leading_args(&self) -> &[String] {
        &self.command[1..]
    }
}

fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn from_lookup_fn_uses_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_in(&[]));

        assert_eq!(Config::default(), config);
        assert_eq!("cargo", config.program());
        assert_eq!(["test".to_string()], config.leading_args());
        assert_eq!("warn", config.log_filter);
    }

    #[test]
    fn from_lookup_fn_splits_command_on_whitespace() {
        struct Case {
            value: &'static str,
            want: Vec<&'static str>,
        }
        let cases = Vec::from([
            Case {
                value: "cargo nextest run",
                want: vec!["cargo", "nextest", "run"],
            },
            Case {
                value: "  ./run-tests\t--quiet ",
                want: vec!["./run-tests", "--quiet"],
            },
            Case {
                value: "true",
                want: vec!["true"],
            },
            Case {
                value: "   ",
                want: vec!["cargo", "test"],
            },
            Case {
                value: "",
                want: vec!["cargo", "test"],
            },
        ]);
        for case in cases {
            let config = Config::from_lookup(lookup_in(&[("AUTORUN_COMMAND", case.value)]));
            assert_eq!(case.want, config.command, "AUTORUN_COMMAND={:?}", case.value);
        }
    }

    #[test]
    fn from_lookup_fn_reads_log_filter() {
        let config = Config::from_lookup(lookup_in(&[("AUTORUN_LOG", "cargo_autorun=debug")]));

        assert_eq!("cargo_autorun=debug", config.log_filter);
        assert_eq!(Config::default().command, config.command);
    }
}
