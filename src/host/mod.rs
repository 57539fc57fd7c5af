//! Desktop host: a Bevy window that shows blank pages and feeds the editor.
//!
//! ## Module Structure
//!
//! - [`view`] - page layout, scrolling and the `DocumentHost` implementation
//! - [`pages`] - rasterizing dirty pages into sprite textures
//! - [`input`] - mouse, touch and wheel input
//! - [`shortcuts`] - keyboard shortcuts
//! - [`toolbar`] - egui tool and settings bars
//! - [`overlay`] - text box, context menu and page text
//! - [`cursor`] - cursor icons
//! - [`clipboard`] - system clipboard images

pub mod clipboard;
mod cursor;
mod input;
mod overlay;
mod pages;
mod shortcuts;
mod toolbar;
pub mod view;

pub use view::PageView;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::{AppConfig, ConfigLoaded};
use crate::editor::{DocumentEditor, DocumentHost, EditContext, ToolSettings};
use crate::session::{FileId, SessionManager};

/// The document shown in the window
#[derive(Resource)]
pub struct ActiveDocument {
    pub editor: DocumentEditor,
}

/// Everything a system needs to run an editor operation
#[derive(SystemParam)]
pub struct EditorParams<'w> {
    pub sessions: ResMut<'w, SessionManager>,
    pub document: ResMut<'w, ActiveDocument>,
    pub view: ResMut<'w, PageView>,
}

impl EditorParams<'_> {
    /// Run `f` with the document's edit context. `None` if the document has
    /// no history session.
    pub fn edit<R>(
        &mut self,
        f: impl FnOnce(&mut DocumentEditor, &mut EditContext<'_>) -> R,
    ) -> Option<R> {
        let file_id = self.document.editor.file_id();
        let view: &mut PageView = &mut self.view;
        let Some(mut ctx) = self.sessions.edit_context(file_id, view) else {
            warn!("No history session for document {}", file_id);
            return None;
        };
        Some(f(&mut self.document.editor, &mut ctx))
    }
}

/// Convert a Bevy color for egui
pub(crate) fn egui_color(color: Color) -> bevy_egui::egui::Color32 {
    let [r, g, b, a] = color.to_srgba().to_u8_array();
    bevy_egui::egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Open a blank document and spawn its pages
fn setup_workspace(
    mut commands: Commands,
    config: Res<AppConfig>,
    mut images: ResMut<Assets<Image>>,
) {
    commands.spawn(Camera2d);

    let file_id = FileId::new();
    let mut sessions = SessionManager::with_max_history(config.data.editor.max_history);
    sessions.start_session(file_id);

    let editor = DocumentEditor::new(file_id, config.data.editor)
        .with_settings(ToolSettings::from_config(&config.data));
    let view = PageView::default();

    for page in 1..=view.page_count() {
        let texture = images.add(pages::page_texture(&view.blank_page()));
        commands.spawn((
            Sprite {
                image: texture,
                custom_size: Some(view.page_size()),
                ..default()
            },
            Transform::default(),
            pages::PageSprite { page },
        ));
    }

    info!(
        "Opened blank document {} with {} pages",
        file_id,
        view.page_count()
    );
    commands.insert_resource(sessions);
    commands.insert_resource(ActiveDocument { editor });
    commands.insert_resource(view);
}

pub struct AnnotationPlugin;

impl Plugin for AnnotationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<overlay::TextInputState>()
            .add_systems(Startup, setup_workspace.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    input::handle_scroll,
                    input::handle_mouse_input,
                    input::handle_touch_input,
                    shortcuts::handle_shortcuts,
                    pages::poll_images,
                    pages::redraw_dirty_pages,
                    pages::sync_page_sprites,
                )
                    .chain(),
            )
            .add_systems(Update, cursor::update_cursor_icon)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Panels first so the viewport is known before overlays
                    toolbar::toolbar_ui,
                    toolbar::tool_settings_ui,
                    toolbar::update_viewport,
                    overlay::page_text_ui,
                    overlay::text_input_ui,
                    overlay::context_menu_ui,
                    overlay::config_reset_notification_ui,
                )
                    .chain(),
            );
    }
}
