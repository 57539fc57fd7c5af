//! Page sprites and their annotation textures.

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::window::PrimaryWindow;
use image::RgbaImage;

use super::EditorParams;
use crate::annotation::PageNumber;
use crate::editor::DocumentHost;
use crate::render::RasterCanvas;

/// Tint of a page that was deleted but is still laid out
const DELETED_PAGE_TINT: Color = Color::srgb(0.55, 0.55, 0.55);

#[derive(Component)]
pub struct PageSprite {
    pub page: PageNumber,
}

/// GPU texture for a composed page bitmap
pub fn page_texture(pixels: &RgbaImage) -> Image {
    Image::new(
        Extent3d {
            width: pixels.width(),
            height: pixels.height(),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        pixels.as_raw().clone(),
        TextureFormat::Rgba8UnormSrgb,
        default(),
    )
}

/// Client (top-left origin, y down) to world (centered, y up)
pub fn client_to_world(client: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(
        client.x - window_size.x / 2.0,
        window_size.y / 2.0 - client.y,
    )
}

pub fn poll_images(mut params: EditorParams) {
    if !params.document.editor.images().has_pending() {
        return;
    }
    params.edit(|editor, ctx| editor.poll_images(ctx));
}

/// Re-render every page that asked for it since the last frame
pub fn redraw_dirty_pages(
    mut params: EditorParams,
    sprites: Query<(&PageSprite, &Sprite)>,
    mut images: ResMut<Assets<Image>>,
) {
    let dirty = params.view.take_dirty();
    if dirty.is_empty() {
        return;
    }
    let size = params.view.page_size();

    for page in dirty {
        let mut canvas = match RasterCanvas::new(size.x as u32, size.y as u32) {
            Ok(canvas) => canvas,
            Err(e) => {
                warn!("Cannot redraw page {}: {}", page, e);
                continue;
            }
        };
        params.document.editor.render_page(page, &mut canvas);
        let texts = canvas.texts().to_vec();
        let layer = canvas.into_image();

        let mut composed = params.view.blank_page();
        image::imageops::overlay(&mut composed, &layer, 0, 0);
        match sprites.iter().find(|(sprite, _)| sprite.page == page) {
            Some((_, sprite)) => {
                if let Some(texture) = images.get_mut(&sprite.image) {
                    *texture = page_texture(&composed);
                }
            }
            None => debug!("No sprite for page {}", page),
        }
        params.view.set_layer(page, layer, texts);
    }
}

/// Place page sprites where the layout puts them
pub fn sync_page_sprites(
    params: EditorParams,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut sprites: Query<(&PageSprite, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let window_size = window.size();
    let viewport = params.view.viewport();

    for (page_sprite, mut sprite, mut transform, mut visibility) in sprites.iter_mut() {
        let Some(rect) = params.view.page_rect(page_sprite.page) else {
            *visibility = Visibility::Hidden;
            continue;
        };

        let center = client_to_world(rect.center(), window_size);
        transform.translation = center.extend(0.0);
        sprite.custom_size = Some(rect.size());
        sprite.color = if params.document.editor.is_page_deleted(page_sprite.page) {
            DELETED_PAGE_TINT
        } else {
            Color::WHITE
        };

        let new_visibility = if rect.intersect(viewport).is_empty() {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
        if *visibility != new_visibility {
            *visibility = new_visibility;
        }
    }
}
