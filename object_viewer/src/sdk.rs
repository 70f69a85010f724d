//! SDK entry points and builder for composing the viewer app.

use bevy::prelude::*;

use crate::camera::orbit_camera_plugin;
use crate::config::ViewerConfig;
use crate::data::evm::EvmObjectLedger;
use crate::data::wallet::LocalWallet;
use crate::data::SessionWorker;
use crate::render::{ObjectRenderer, RendererResource};
use crate::scene::{grid_plugin, mount_scene, scene_plugin};
use crate::session::Session;
use crate::ui::{panel_plugin, session_plugin, SessionView};

/// Builder for constructing the viewer app with customizable plugins.
pub struct ViewerBuilder {
    config: Option<ViewerConfig>,
    renderer: Option<Box<dyn ObjectRenderer>>,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_orbit_camera: bool,
    enable_panel: bool,
}

impl Default for ViewerBuilder {
    fn default() -> Self {
        Self {
            config: None,
            renderer: None,
            window_title: "Metaverse NFT Viewer".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb_u8(0x1e, 0x1e, 0x1e),
            enable_orbit_camera: true,
            enable_panel: true,
        }
    }
}

impl ViewerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit configuration instead of the defaults.
    pub fn config(mut self, config: ViewerConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    /// Provide a custom object renderer implementation.
    pub fn renderer(mut self, renderer: impl ObjectRenderer) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_orbit_camera(mut self) -> Self {
        self.enable_orbit_camera = false;
        self
    }

    pub fn disable_panel(mut self) -> Self {
        self.enable_panel = false;
        self
    }

    /// Build the Bevy app: spawn the session worker, register the scene
    /// lifecycle, and mount the scene on startup.
    pub fn build(self) -> App {
        let config = self.config.unwrap_or_default();
        let chain = config.ledger.chain;
        let wallet = LocalWallet::from_key(config.wallet_key.as_deref(), chain);
        let session = Session::<LocalWallet, EvmObjectLedger>::new(wallet, config.ledger);
        let channel = SessionWorker::spawn(session);
        let renderer = self
            .renderer
            .map(RendererResource)
            .unwrap_or_default();

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(channel)
        .insert_resource(SessionView::new(chain))
        .insert_resource(config.layout)
        .insert_resource(renderer)
        .add_plugins((scene_plugin, grid_plugin, session_plugin))
        .add_systems(Startup, mount_scene);

        if self.enable_orbit_camera {
            app.add_plugins(orbit_camera_plugin);
        }
        if self.enable_panel {
            app.add_plugins(panel_plugin);
        }

        app
    }
}
