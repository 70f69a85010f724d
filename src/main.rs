//! Plinth — mint 3D objects on-chain and browse them. Runs the object_viewer app.

use object_viewer::config::ViewerConfig;
use object_viewer::sdk::ViewerBuilder;

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = ViewerConfig::from_env()?;

    ViewerBuilder::new().config(config).build().run();
    Ok(())
}
