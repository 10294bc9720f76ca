use std::path::PathBuf;

/// `plexmuse [ENV_FILE]`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = std::env::args_os().nth(1).map(PathBuf::from);
    plexmuse_lib::run(env_file).await
}
