use lather_config::LatherConfig;

/// Warn about env vars that look like config but did not land anywhere.
pub fn warn_unconfigured(config: &LatherConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &LatherConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.vision.is_configured()
        && env_keys
            .iter()
            .any(|key| key.starts_with("LATHER_VISION") && !key.starts_with("LATHER_VISION__"))
    {
        warnings.push(
            "vision API key is unset while LATHER_VISION* env vars exist. Use double underscores (example: LATHER_VISION__API_KEY)."
                .to_string(),
        );
    }

    if env_keys.iter().any(|key| key == "LATHER_API_KEY") {
        warnings.push("LATHER_API_KEY is not read. Did you mean LATHER_VISION__API_KEY?".to_string());
    }

    warnings
}

#[cfg(test)]
mod tests {
    use lather_config::LatherConfig;

    use super::collect_unconfigured_warnings;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn warns_for_single_underscore_vision_key() {
        let warnings = collect_unconfigured_warnings(
            &LatherConfig::default(),
            env(&[("LATHER_VISION_API_KEY", "sk-test")]),
        );
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("LATHER_VISION__API_KEY"));
    }

    #[test]
    fn warns_for_flat_api_key() {
        let warnings =
            collect_unconfigured_warnings(&LatherConfig::default(), env(&[("LATHER_API_KEY", "x")]));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn quiet_when_configured() {
        let mut config = LatherConfig::default();
        config.vision.api_key = "sk-test".into();
        let warnings = collect_unconfigured_warnings(
            &config,
            env(&[("LATHER_VISION__API_KEY", "sk-test"), ("HOME", "/root")]),
        );
        assert!(warnings.is_empty());
    }
}
