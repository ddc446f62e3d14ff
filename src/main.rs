use anyhow::Context;
use dragcube::{app::DragCubeApp, config::SceneConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = DragCubeApp::new(SceneConfig::default()).context("failed to start dragcube")?;
    app.run().context("dragcube stopped with an error")
}
