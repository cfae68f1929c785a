use scope_visdom::{VisdomSettings, DEFAULT_PORT};

/// Builds Visdom connection settings from environment variables.
///
/// Recognised variables, all optional:
/// `SPIRALSCOPE_VISDOM_SERVER` (default `localhost`),
/// `SPIRALSCOPE_VISDOM_PORT` (default `8097`),
/// `SPIRALSCOPE_VISDOM_ENV` (default `main`),
/// `SPIRALSCOPE_VISDOM_TITLE_SUFFIX` (default empty).
pub fn settings_from_env() -> VisdomSettings {
    let server = std::env::var("SPIRALSCOPE_VISDOM_SERVER")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "localhost".to_string());

    let port = std::env::var("SPIRALSCOPE_VISDOM_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    let env = std::env::var("SPIRALSCOPE_VISDOM_ENV")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "main".to_string());

    let title_suffix = std::env::var("SPIRALSCOPE_VISDOM_TITLE_SUFFIX").unwrap_or_default();

    VisdomSettings::new(server, port)
        .with_env(env)
        .with_title_suffix(title_suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
    use std::sync::{Mutex, OnceLock};

    fn with_env(vars: &[(&str, Option<&str>)], test: impl FnOnce()) {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        let _lock = GUARD.get_or_init(|| Mutex::new(())).lock().unwrap();

        let snapshot: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(key, value)| {
                let previous = std::env::var(key).ok();
                match value {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
                ((*key).to_string(), previous)
            })
            .collect();

        let result = catch_unwind(AssertUnwindSafe(test));

        for (key, value) in snapshot {
            match value {
                Some(val) => std::env::set_var(&key, val),
                None => std::env::remove_var(&key),
            }
        }

        if let Err(err) = result {
            resume_unwind(err);
        }
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        with_env(
            &[
                ("SPIRALSCOPE_VISDOM_SERVER", None),
                ("SPIRALSCOPE_VISDOM_PORT", None),
                ("SPIRALSCOPE_VISDOM_ENV", None),
                ("SPIRALSCOPE_VISDOM_TITLE_SUFFIX", None),
            ],
            || {
                let settings = settings_from_env();
                assert_eq!(settings.server, "localhost");
                assert_eq!(settings.port, 8097);
                assert_eq!(settings.env, "main");
                assert_eq!(settings.title_suffix, "");
            },
        );
    }

    #[test]
    fn explicit_values_override_defaults() {
        with_env(
            &[
                ("SPIRALSCOPE_VISDOM_SERVER", Some("viz.internal")),
                ("SPIRALSCOPE_VISDOM_PORT", Some("9000")),
                ("SPIRALSCOPE_VISDOM_ENV", Some("sweep-7")),
                ("SPIRALSCOPE_VISDOM_TITLE_SUFFIX", Some("-warm")),
            ],
            || {
                let settings = settings_from_env();
                assert_eq!(settings.server, "viz.internal");
                assert_eq!(settings.port, 9000);
                assert_eq!(settings.env, "sweep-7");
                assert_eq!(settings.title_suffix, "-warm");
            },
        );
    }

    #[test]
    fn unparseable_ports_fall_back_to_the_default() {
        with_env(&[("SPIRALSCOPE_VISDOM_PORT", Some("visdom"))], || {
            assert_eq!(settings_from_env().port, 8097);
        });
    }
}
