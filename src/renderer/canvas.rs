//! Canvas 2D backend (browser only)

use std::collections::HashMap;
use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlImageElement};

use super::{Color, DrawCommand, Rect, SpriteId, Surface};

/// Executes draw commands on a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    document: Document,
    images: HashMap<SpriteId, Option<HtmlImageElement>>,
    font_family: &'static str,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, document: Document, font_family: &'static str) -> Self {
        ctx.set_line_width(2.0);
        ctx.set_stroke_style_str(Color::White.as_css());
        Self {
            ctx,
            document,
            images: HashMap::new(),
            font_family,
        }
    }

    pub fn clear(&self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    /// Look up (and cache) the `<img>` element for a sprite
    fn image(&mut self, sprite: SpriteId) -> Option<HtmlImageElement> {
        let document = &self.document;
        self.images
            .entry(sprite)
            .or_insert_with(|| {
                let image = document
                    .get_element_by_id(sprite.element_id())
                    .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
                if image.is_none() {
                    log::warn!("Sprite image #{} not found", sprite.element_id());
                }
                image
            })
            .clone()
    }

    fn blit(&mut self, sprite: SpriteId, src: Option<Rect>, dest: Rect, rotation: f32) {
        let Some(image) = self.image(sprite) else {
            return;
        };
        let ctx = &self.ctx;
        let center = dest.center();
        ctx.save();
        let _ = ctx.translate(center.x as f64, center.y as f64);
        if rotation != 0.0 {
            let _ = ctx.rotate(rotation as f64);
        }
        let (dx, dy) = (-(dest.size.x as f64) / 2.0, -(dest.size.y as f64) / 2.0);
        let (dw, dh) = (dest.size.x as f64, dest.size.y as f64);
        let result = match src {
            Some(src) => ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                &image,
                src.pos.x as f64,
                src.pos.y as f64,
                src.size.x as f64,
                src.size.y as f64,
                dx,
                dy,
                dw,
                dh,
            ),
            None => ctx.draw_image_with_html_image_element_and_dw_and_dh(&image, dx, dy, dw, dh),
        };
        if let Err(e) = result {
            log::warn!("drawImage failed for {:?}: {:?}", sprite, e);
        }
        ctx.restore();
    }
}

impl Surface for CanvasSurface {
    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Sprite {
                sprite,
                src,
                dest,
                rotation,
            } => self.blit(sprite, src, dest, rotation),
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                let ctx = &self.ctx;
                ctx.save();
                ctx.begin_path();
                let _ = ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
                ctx.set_fill_style_str(color.as_css());
                ctx.fill();
                ctx.restore();
            }
            DrawCommand::StrokeCircle { center, radius } => {
                let ctx = &self.ctx;
                ctx.begin_path();
                let _ = ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
                ctx.stroke();
            }
            DrawCommand::FillRect { rect, color } => {
                let ctx = &self.ctx;
                ctx.save();
                ctx.set_fill_style_str(color.as_css());
                ctx.fill_rect(
                    rect.pos.x as f64,
                    rect.pos.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
                ctx.restore();
            }
            DrawCommand::Text {
                text,
                pos,
                align,
                size,
                color,
            } => {
                let ctx = &self.ctx;
                ctx.save();
                ctx.set_font(&format!("{}px {}", size.round(), self.font_family));
                ctx.set_text_align(align.as_css());
                ctx.set_fill_style_str(color.as_css());
                let _ = ctx.fill_text(&text, pos.x as f64, pos.y as f64);
                ctx.restore();
            }
        }
    }
}
