use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use winit::{keyboard::KeyCode, window::Window};

use glint_assets::{AssetMessage, FontLoader, FontSource};
use glint_renderer::Renderer;
use glint_scene::SceneState;
use glint_window::{WindowApp, run_window_app};

/// The same typeface the scene has always used.
const FONT_URL: &str = "https://threejs.org/examples/fonts/helvetiker_regular.typeface.json";

struct GlintApp {
    scene: SceneState,
    renderer: Option<Renderer>,
    asset_events: UnboundedReceiver<AssetMessage>,
    // Keeps the IO workers alive for the lifetime of the window.
    _io_runtime: tokio::runtime::Runtime,
}

impl GlintApp {
    /// The one-shot asset channel, drained at the frame boundary. At most
    /// one message ever arrives.
    fn drain_asset_events(&mut self) {
        while let Ok(message) = self.asset_events.try_recv() {
            match message {
                AssetMessage::FontLoaded(font) => match self.scene.on_font_loaded(&font) {
                    Ok(()) => {
                        if let Some(renderer) = &mut self.renderer {
                            renderer.upload_glyphs(&self.scene.glyphs);
                        }
                    }
                    Err(err) => log::warn!("glyphs unavailable: {err}"),
                },
                AssetMessage::FontFailed(err) => {
                    // Recoverable by design: the cube keeps rendering, the
                    // text meshes just never appear.
                    log::warn!("font fetch failed, rendering without glyphs: {err}");
                }
            }
        }
    }
}

impl WindowApp for GlintApp {
    fn init(&mut self, window: Arc<Window>) {
        let size = window.inner_size();
        self.scene.camera.set_viewport(size.width, size.height);
        // Startup failure here means no GPU at all; nothing to recover to.
        let renderer = Renderer::new(window).expect("failed to initialize the renderer");
        self.renderer = Some(renderer);
    }

    fn on_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed && self.scene.handle_key(key) {
            log::trace!("queued movement for {key:?}");
        }
    }

    fn on_resized(&mut self, width: u32, height: u32) {
        self.scene.camera.set_viewport(width, height);
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
    }

    fn redraw(&mut self) -> bool {
        self.drain_asset_events();
        self.scene.frame_start();

        let Some(renderer) = &mut self.renderer else {
            return true;
        };
        match renderer.render(&self.scene) {
            Ok(()) => true,
            Err(err) => {
                log::error!("fatal render error: {err}");
                false
            }
        }
    }
}

fn main() {
    env_logger::init();

    // Dedicated multi-threaded runtime for IO, separate from the frame loop.
    let io_runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("glint-io")
        .build()
        .expect("failed to build the IO runtime");

    let (sender, receiver) = unbounded_channel();
    let loader = FontLoader::new(sender, io_runtime.handle().clone());
    loader.load(FontSource::Url(FONT_URL.to_owned()));

    let app = GlintApp {
        scene: SceneState::new(),
        renderer: None,
        asset_events: receiver,
        _io_runtime: io_runtime,
    };

    run_window_app("Glint", app);
}
