use anyhow::Result;
use eventcal_core::config::EventcalConfig;

pub fn run(config: &EventcalConfig) -> Result<()> {
    println!("# {}", EventcalConfig::config_path()?.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
