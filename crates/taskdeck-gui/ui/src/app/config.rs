use taskdeck_core::Config;

const APP_CONFIG_TOML: &str =
  include_str!("../../assets/taskdeck.toml");

pub fn load_app_config() -> Config {
  match Config::from_toml_str(
    APP_CONFIG_TOML
  ) {
    | Ok(config) => {
      tracing::info!(
        tasks_key = %config.storage.tasks_key,
        default_sort = %config.view.default_sort,
        timezone = ?config.view.timezone,
        "loaded app config"
      );
      config
    }
    | Err(error) => {
      tracing::error!(error = %format!("{error:#}"), "failed parsing app config; using defaults");
      Config::default()
    }
  }
}
