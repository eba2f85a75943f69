//! Application controller
//!
//! `AppState` owns everything that exists once the manifest is loaded. Each
//! user or runtime event maps to one method here: the method updates state,
//! repaints the surface if needed, and hands back an [`Effect`] describing
//! async work for the UI runtime to start.

use image::RgbaImage;
use std::path::PathBuf;
use std::sync::Arc;

use super::manifest::Manifest;
use super::selection::Selection;
use super::tint::{Readouts, TintParams};
use crate::config::Config;
use crate::sprite::{LoadError, LoadOutcome, LoadRequest, SpriteLoader};
use crate::ui::canvas::Surface;

/// Async work requested by a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Read and decode a sprite, then report back with the request id
    Load(LoadRequest),
}

#[derive(Debug)]
pub struct AppState {
    config: Config,
    manifest: Manifest,
    selection: Selection,
    tint: TintParams,
    readouts: Readouts,
    loader: SpriteLoader,
    surface: Surface,
}

impl AppState {
    /// Build the state from a freshly loaded manifest and run the initial
    /// thumbnail build (which requests the default sprite)
    pub fn new(manifest: Manifest, config: Config) -> (Self, Effect) {
        let selection = Selection::new(&manifest);
        let surface = Surface::new(config.canvas_width, config.canvas_height);
        let tint = TintParams::default();
        let mut readouts = Readouts::default();
        readouts.refresh(&tint);

        let mut state = Self {
            config,
            manifest,
            selection,
            tint,
            readouts,
            loader: SpriteLoader::new(),
            surface,
        };
        let effect = state.rebuild_thumbnails();
        (state, effect)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn tint(&self) -> &TintParams {
        &self.tint
    }

    pub fn readouts(&self) -> &Readouts {
        &self.readouts
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Absolute (asset-root based) path for a relative sprite path
    pub fn resolve(&self, relative: &std::path::Path) -> PathBuf {
        self.config.resolve(relative)
    }

    pub fn select_category(&mut self, category: &str) -> Effect {
        if !self.selection.set_category(&self.manifest, category) {
            return Effect::None;
        }
        self.rebuild_thumbnails()
    }

    pub fn select_subcategory(&mut self, subcategory: &str) -> Effect {
        if !self.selection.set_subcategory(&self.manifest, subcategory) {
            return Effect::None;
        }
        self.rebuild_thumbnails()
    }

    pub fn click_thumbnail(&mut self, index: usize) -> Effect {
        match self.selection.select(index) {
            Some(path) => Effect::Load(self.loader.begin(path)),
            None => Effect::None,
        }
    }

    pub fn set_hue(&mut self, hue: u16) {
        self.tint.set_hue(hue);
        self.redraw();
    }

    pub fn set_saturation(&mut self, saturation: u8) {
        self.tint.set_saturation(saturation);
        self.redraw();
    }

    pub fn set_value(&mut self, value: u8) {
        self.tint.set_value(value);
        self.redraw();
    }

    /// A sprite decode finished (or failed)
    pub fn sprite_loaded(&mut self, id: u64, result: Result<RgbaImage, Arc<LoadError>>) -> LoadOutcome {
        let outcome = self.loader.complete(id, result);
        match outcome {
            LoadOutcome::Loaded => self.redraw(),
            LoadOutcome::Failed => self.surface.clear(),
            LoadOutcome::Stale => {}
        }
        outcome
    }

    fn rebuild_thumbnails(&mut self) -> Effect {
        match self.selection.rebuild(&self.manifest) {
            Some(path) => Effect::Load(self.loader.begin(path)),
            None => {
                self.loader.cancel();
                self.surface.clear();
                Effect::None
            }
        }
    }

    fn redraw(&mut self) {
        self.surface
            .redraw(self.loader.image(), &self.tint, &mut self.readouts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const MANIFEST: &str = r#"{
        "Hats": ["a.png", "b.png"],
        "Clothing": {"Shirts": ["x.png"]},
        "Eyes": []
    }"#;

    fn state() -> (AppState, Effect) {
        let manifest = Manifest::from_json(MANIFEST).unwrap();
        AppState::new(manifest, Config::default().with_asset_root("/assets"))
    }

    fn request(effect: Effect) -> LoadRequest {
        match effect {
            Effect::Load(request) => request,
            Effect::None => panic!("expected a load request"),
        }
    }

    fn opaque() -> RgbaImage {
        RgbaImage::from_pixel(4, 4, Rgba([200, 10, 10, 255]))
    }

    fn is_blank(state: &AppState) -> bool {
        state.surface().frame().pixels().all(|p| p.0[3] == 0)
    }

    #[test]
    fn test_startup_loads_first_sprite() {
        let (state, effect) = state();
        let request = request(effect);
        assert_eq!(request.path, PathBuf::from("sprites/Hats/a.png"));
        assert_eq!(state.resolve(&request.path), PathBuf::from("/assets/sprites/Hats/a.png"));
        assert_eq!(state.selection().highlighted(), Some(0));
    }

    #[test]
    fn test_loaded_sprite_is_drawn_with_tint() {
        let (mut state, effect) = state();
        let request = request(effect);
        assert_eq!(state.sprite_loaded(request.id, Ok(opaque())), LoadOutcome::Loaded);

        // Default tint is white
        assert!(state.surface().frame().pixels().all(|p| p.0[..3] == [255, 255, 255] && p.0[3] > 0));

        state.set_value(0);
        assert!(state.surface().frame().pixels().all(|p| p.0[..3] == [0, 0, 0] && p.0[3] > 0));
        assert_eq!(state.readouts().value, "0");
    }

    #[test]
    fn test_empty_category_clears_surface() {
        let (mut state, effect) = state();
        state.sprite_loaded(request(effect).id, Ok(opaque()));
        assert!(!is_blank(&state));

        assert_eq!(state.select_category("Eyes"), Effect::None);
        assert!(state.selection().thumbnails().is_empty());
        assert!(is_blank(&state));
    }

    #[test]
    fn test_stale_load_does_not_paint() {
        let (mut state, first) = state();
        let first = request(first);
        let second = request(state.click_thumbnail(1));

        assert_eq!(state.sprite_loaded(first.id, Ok(opaque())), LoadOutcome::Stale);
        assert!(is_blank(&state));

        assert_eq!(state.sprite_loaded(second.id, Ok(opaque())), LoadOutcome::Loaded);
        assert!(!is_blank(&state));
    }

    #[test]
    fn test_late_load_after_empty_rebuild_is_ignored() {
        let (mut state, effect) = state();
        let pending = request(effect);
        state.select_category("Eyes");
        assert_eq!(state.sprite_loaded(pending.id, Ok(opaque())), LoadOutcome::Stale);
        assert!(is_blank(&state));
    }

    #[test]
    fn test_failed_load_clears_and_stays_interactive() {
        let (mut state, effect) = state();
        let first = request(effect);
        state.sprite_loaded(first.id, Ok(opaque()));

        let broken = request(state.click_thumbnail(1));
        let error = Arc::new(LoadError::Join("boom".to_string()));
        assert_eq!(state.sprite_loaded(broken.id, Err(error)), LoadOutcome::Failed);
        assert!(is_blank(&state));

        // Sliders keep working without painting anything
        state.set_hue(90);
        assert!(is_blank(&state));

        // Another selection can be retried right away
        let retry = request(state.click_thumbnail(0));
        assert_eq!(state.sprite_loaded(retry.id, Ok(opaque())), LoadOutcome::Loaded);
        assert!(!is_blank(&state));

        let effect = state.select_category("Clothing");
        assert_eq!(request(effect).path, PathBuf::from("sprites/Clothing/Shirts/x.png"));
    }

    #[test]
    fn test_subcategory_control_visibility() {
        let (mut state, _) = state();
        state.select_category("Clothing");
        assert!(state.selection().subcategory_visible(state.manifest()));

        let effect = state.select_category("Hats");
        assert!(!state.selection().subcategory_visible(state.manifest()));
        assert_eq!(request(effect).path, PathBuf::from("sprites/Hats/a.png"));
    }

    #[test]
    fn test_empty_manifest_is_wired_but_blank() {
        let manifest = Manifest::from_json("{}").unwrap();
        let (mut state, effect) = AppState::new(manifest, Config::default());
        assert_eq!(effect, Effect::None);
        assert!(is_blank(&state));

        state.set_hue(200);
        assert!(is_blank(&state));
        assert_eq!(state.select_category("Hats"), Effect::None);
    }

    #[test]
    fn test_unknown_events_do_nothing() {
        let (mut state, _) = state();
        assert_eq!(state.select_category("Wings"), Effect::None);
        assert_eq!(state.select_subcategory("Shirts"), Effect::None);
        assert_eq!(state.click_thumbnail(9), Effect::None);
    }
}
