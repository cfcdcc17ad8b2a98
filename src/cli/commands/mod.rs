mod init_config;
mod record;
mod serve;
mod trending;

pub use init_config::cmd_init_config;
pub use record::cmd_record;
pub use serve::cmd_serve;
pub use trending::cmd_trending;
