use anyhow::Context;
use fablemap::{
    input::MapEventKind,
    prelude::HashMap,
    ui::{details_panel, toolbar, MapView},
    MapBuilder, MapViewer, Scene,
};
use std::path::{Path, PathBuf};

/// Standalone fantasy-map viewer.
///
/// Usage: `fablemap-app [scene.json]`. Without a scene file the built-in
/// markers are shown over `./map.jpg`.
fn main() -> anyhow::Result<()> {
    fablemap::init_logging();

    let scene_path = std::env::args().nth(1).map(PathBuf::from);
    let scene = match &scene_path {
        Some(path) => Scene::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Scene::default(),
    };
    let base_dir = scene_path
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let viewer = MapBuilder::new()
        .with_scene(scene.clone())
        .build()
        .context("building viewer")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Fablemap - Fantasy Map Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "fablemap-app",
        options,
        Box::new(move |cc| Box::new(FablemapApp::new(cc, viewer, &scene, &base_dir))),
    )
    .map_err(|e| anyhow::anyhow!("viewer exited with error: {e}"))?;

    Ok(())
}

/// The main application struct
struct FablemapApp {
    viewer: MapViewer,
    background: Option<egui::TextureHandle>,
    marker_images: HashMap<String, egui::TextureHandle>,
    marker_image_ids: HashMap<String, egui::TextureId>,
}

impl FablemapApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        mut viewer: MapViewer,
        scene: &Scene,
        base_dir: &Path,
    ) -> Self {
        let background = load_texture(&cc.egui_ctx, base_dir, &scene.background);

        let mut marker_images: HashMap<String, egui::TextureHandle> = HashMap::default();
        for marker in &scene.markers {
            if marker.image_url.is_empty() || marker_images.contains_key(&marker.image_url) {
                continue;
            }
            if let Some(texture) = load_texture(&cc.egui_ctx, base_dir, &marker.image_url) {
                marker_images.insert(marker.image_url.clone(), texture);
            }
        }
        let marker_image_ids = marker_images
            .iter()
            .map(|(reference, texture)| (reference.clone(), texture.id()))
            .collect();

        viewer.on(MapEventKind::MarkerMoved, |event| log::trace!("{event:?}"));
        viewer.on(MapEventKind::SelectionChanged, |event| log::info!("{event:?}"));
        viewer.on(MapEventKind::EditModeChanged, |event| log::info!("{event:?}"));
        viewer.on(MapEventKind::PositionsCommitted, |event| log::info!("{event:?}"));

        Self {
            viewer,
            background,
            marker_images,
            marker_image_ids,
        }
    }
}

impl eframe::App for FablemapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.heading("Fablemap");
                ui.separator();
                toolbar(ui, &mut self.viewer);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} markers", self.viewer.markers().len()));
                    if !self.marker_images.is_empty() {
                        ui.separator();
                        ui.label(format!("{} images", self.marker_images.len()));
                    }
                });
            });
        });

        if self.viewer.selected().is_some() {
            egui::SidePanel::right("details_panel")
                .resizable(true)
                .default_width(280.0)
                .show(ctx, |ui| {
                    details_panel(ui, &mut self.viewer);
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let mut view = MapView::new(&mut self.viewer).images(&self.marker_image_ids);
                if let Some(texture) = &self.background {
                    view = view.background(texture.id());
                }
                ui.add(view);
            });

        self.viewer.process_events();
    }
}

/// Loads an image file into an egui texture; failures are logged and skipped.
fn load_texture(ctx: &egui::Context, base_dir: &Path, reference: &str) -> Option<egui::TextureHandle> {
    let path = base_dir.join(reference);
    match decode_image(&path) {
        Ok(image) => Some(ctx.load_texture(reference, image, egui::TextureOptions::LINEAR)),
        Err(e) => {
            log::warn!("could not load image {}: {e:#}", path.display());
            None
        }
    }
}

fn decode_image(path: &Path) -> anyhow::Result<egui::ColorImage> {
    let image = image::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        image.as_flat_samples().as_slice(),
    ))
}
