// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置设置测试模块
///
/// 测试配置文件与环境变量的叠加顺序

#[cfg(test)]
mod tests {
    use rivalwatch::config::settings::Settings;
    use std::time::Duration;

    #[test]
    fn test_environment_overrides_defaults() {
        std::env::set_var("RIVALWATCH__SERVER__PORT", "6100");
        std::env::set_var("RIVALWATCH__SCAN__EVENT_DELAY_MS", "0");
        std::env::set_var("RIVALWATCH__LLM__API_KEY", "env-key");

        let settings = Settings::new().unwrap();

        std::env::remove_var("RIVALWATCH__SERVER__PORT");
        std::env::remove_var("RIVALWATCH__SCAN__EVENT_DELAY_MS");
        std::env::remove_var("RIVALWATCH__LLM__API_KEY");

        assert_eq!(settings.server.port, 6100);
        assert_eq!(settings.scan.event_delay(), Duration::ZERO);
        assert_eq!(settings.llm.api_key.as_deref(), Some("env-key"));
        assert_eq!(settings.scan.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(
            settings.llm.api_base_url,
            "https://api.intelligence.io.solutions/api/v1"
        );
    }
}
