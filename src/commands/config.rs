use crate::config::Config;
use crate::error::Result;

/// Print the active configuration and where it lives
pub fn cmd_config_show() -> Result<()> {
    let path = Config::config_path()?;
    let config = Config::load()?;

    println!("config file: {}", path.display());
    println!("api.base_url: {}", config.api.base_url);
    println!(
        "api.token: {}",
        if config.api.token.is_some() {
            "(set)"
        } else {
            "(not set)"
        }
    );
    Ok(())
}

/// Set a configuration value and persist it
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    println!("{} updated", key);
    Ok(())
}
