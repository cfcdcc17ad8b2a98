use crate::config::Config;

pub fn cmd_init_config() -> anyhow::Result<()> {
    let path = Config::default_config_path();

    if Config::create_default_if_missing(&path)? {
        println!("Created default config at {}", path.display());
        println!("Set the [appwrite] ids or APPWRITE_* variables before recording searches.");
    } else {
        println!("Config already exists at {}", path.display());
    }

    Ok(())
}
