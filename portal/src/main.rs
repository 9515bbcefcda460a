use hearth_portal::{app, PortalConfig};

fn main() {
    env_logger::init();
    let config = PortalConfig::from_env();
    log::info!("starting portal with {config:?}");
    trillium_smol::run(app(config));
}
