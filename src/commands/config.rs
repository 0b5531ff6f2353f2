use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::DaycalConfig;

pub fn run(cfg: &DaycalConfig) -> Result<()> {
    let config_path = DaycalConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", cfg.data_path().display());
    println!("  Events:  {}", cfg.events_path().display());
    println!();
    println!("{}", "Settings".bold());
    for line in cfg.to_toml()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
