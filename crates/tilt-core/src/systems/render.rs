use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from the scene's entities.
/// Entities without a sprite (or marked inactive) are skipped — a missing
/// texture degrades to "not drawn", never to an error.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let sprite = match &entity.sprite {
            Some(s) => s,
            None => continue,
        };

        buffer.push(RenderInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            rotation: entity.rotation,
            scale: entity.scale.x,
            sprite_col: sprite.col,
            sprite_row: sprite.row,
            cell_span: sprite.cell_span,
            alpha: sprite.alpha,
        });
    }
}
