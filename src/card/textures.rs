//! Card and sticker textures
//!
//! Artwork is loaded from `assets/` through the asset server when the file
//! exists. Missing files are replaced with generated placeholder images so
//! the card is always fully drawn.

use std::collections::HashMap;
use std::f32::consts::PI;
use std::path::Path;

use bevy::asset::RenderAssetUsages;
use bevy::log::{info, warn};
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::card::types::{StickerId, STICKER_CATALOG};

/// Root folder the asset server reads from.
pub const ASSET_ROOT: &str = "assets";

pub const LOGO_PATH: &str = "logo.png";
pub const TYB_LOGO_PATH: &str = "tyb-logo.png";

/// Image handles used by both card views.
#[derive(Resource, Debug, Clone, Default)]
pub struct CardTextures {
    pub stickers: HashMap<StickerId, Handle<Image>>,
    pub logo: Handle<Image>,
    pub tyb_logo: Handle<Image>,
    /// White rounded rectangle tinted with the card color.
    pub card_face: Handle<Image>,
    /// Soft rounded rectangle used as the flat card's drop shadow.
    pub shadow: Handle<Image>,
}

impl CardTextures {
    pub fn sticker(&self, id: StickerId) -> Handle<Image> {
        self.stickers.get(&id).cloned().unwrap_or_default()
    }
}

/// RGBA8 pixel buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Shade every pixel from its normalized center (`[-1, 1]`, +Y up).
    pub fn shade(mut self, f: impl Fn(Vec2) -> [u8; 4]) -> Self {
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Vec2::new(
                    (x as f32 + 0.5) / self.width as f32 * 2.0 - 1.0,
                    1.0 - (y as f32 + 0.5) / self.height as f32 * 2.0,
                );
                let idx = ((y * self.width + x) * 4) as usize;
                self.pixels[idx..idx + 4].copy_from_slice(&f(p));
            }
        }
        self
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    pub fn into_image(self) -> Image {
        Image::new(
            Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            self.pixels,
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        )
    }
}

fn to_rgba8(color: Color, coverage: f32) -> [u8; 4] {
    let c = color.to_srgba();
    let a = (c.alpha * coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
    [
        (c.red * 255.0).round() as u8,
        (c.green * 255.0).round() as u8,
        (c.blue * 255.0).round() as u8,
        a,
    ]
}

/// Signed distance to a centered rounded box (negative inside).
fn rounded_box_distance(p: Vec2, half: Vec2, radius: f32) -> f32 {
    let q = p.abs() - half + Vec2::splat(radius);
    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - radius
}

/// Anti-aliased coverage from a signed distance, `edge` wide.
fn coverage(distance: f32, edge: f32) -> f32 {
    (0.5 - distance / edge).clamp(0.0, 1.0)
}

/// Distance field of the placeholder shape for sticker `n`.
fn sticker_shape_distance(n: u8, p: Vec2, aspect: f32) -> f32 {
    let r = p.length();
    let theta = p.y.atan2(p.x);
    match n % 7 {
        1 => r - 0.9,
        2 => r - 0.72 * (1.0 + 0.25 * (5.0 * theta + PI / 2.0).cos()),
        3 => p.x.abs() + p.y.abs() - 0.95,
        4 => (r - 0.65).abs() - 0.25,
        5 => rounded_box_distance(p, Vec2::new(0.92, 0.92 / aspect.max(1.0) * 1.3), 0.35),
        6 => rounded_box_distance(p, Vec2::splat(0.8), 0.25),
        _ => r - 0.85 * (1.0 + 0.08 * (6.0 * theta).cos()),
    }
}

fn sticker_color(n: u8) -> Color {
    Color::hsl((n as f32 * 51.0) % 360.0, 0.75, 0.58)
}

/// Placeholder art for a sticker: a colored shape with a white rim.
pub fn generate_sticker_canvas(id: StickerId, pixel_size: Vec2) -> Canvas {
    let width = (pixel_size.x * 2.0).max(8.0) as u32;
    let height = (pixel_size.y * 2.0).max(8.0) as u32;
    let aspect = width as f32 / height as f32;
    let fill = sticker_color(id.0);
    let edge = 2.0 / width.min(height) as f32 * 1.5;

    Canvas::new(width, height).shade(|p| {
        let d = sticker_shape_distance(id.0, p, aspect);
        if d <= -0.1 {
            to_rgba8(fill, 1.0)
        } else {
            to_rgba8(Color::WHITE, coverage(d, edge))
        }
    })
}

/// Placeholder for the brand logo: a dark rounded tile with a light disc.
pub fn generate_logo_canvas(size: u32) -> Canvas {
    let edge = 3.0 / size as f32;
    let tile = Color::srgb(0.12, 0.13, 0.16);
    let disc = Color::srgb(0.96, 0.98, 0.78);
    Canvas::new(size, size).shade(|p| {
        let d_tile = rounded_box_distance(p, Vec2::splat(1.0), 0.2);
        let d_disc = p.length() - 0.45;
        if d_disc < 0.0 {
            to_rgba8(disc, coverage(d_disc, edge).max(coverage(d_tile, edge)))
        } else {
            to_rgba8(tile, coverage(d_tile, edge))
        }
    })
}

/// Placeholder for the TYB wordmark: three dark bars on a transparent 2:1 tile.
pub fn generate_tyb_logo_canvas(width: u32) -> Canvas {
    let height = (width / 2).max(1);
    let edge = 3.0 / height as f32;
    let ink = Color::srgb(0.1, 0.1, 0.1);
    Canvas::new(width, height).shade(|p| {
        let d = [-0.6, 0.0, 0.6]
            .iter()
            .map(|cx| rounded_box_distance(p - Vec2::new(*cx, 0.0), Vec2::new(0.22, 0.7), 0.1))
            .fold(f32::MAX, f32::min);
        to_rgba8(ink, coverage(d, edge))
    })
}

/// White rounded rectangle with `radius` in pixels.
pub fn generate_card_face_canvas(width: u32, height: u32, radius: f32) -> Canvas {
    let size = Vec2::new(width as f32, height as f32);
    Canvas::new(width, height).shade(|p| {
        let pixel = p * size / 2.0;
        let d = rounded_box_distance(pixel, size / 2.0, radius);
        to_rgba8(Color::WHITE, coverage(d, 1.5))
    })
}

/// Blurred rounded rectangle; alpha falls off smoothly outside the card edge.
pub fn generate_shadow_canvas(width: u32, height: u32, softness: f32) -> Canvas {
    let aspect = width as f32 / height.max(1) as f32;
    Canvas::new(width, height).shade(|p| {
        let scaled = Vec2::new(p.x * aspect, p.y);
        let half = Vec2::new(aspect, 1.0) * (1.0 - softness);
        let d = rounded_box_distance(scaled, half, 0.1);
        let t = (1.0 - d / softness.max(1e-3)).clamp(0.0, 1.0);
        // Smoothstep falloff.
        let alpha = t * t * (3.0 - 2.0 * t);
        to_rgba8(Color::BLACK, alpha)
    })
}

fn asset_exists(relative: &str) -> bool {
    Path::new(ASSET_ROOT).join(relative).exists()
}

fn load_or_generate(
    asset_server: &AssetServer,
    images: &mut Assets<Image>,
    relative: &'static str,
    generate: impl FnOnce() -> Canvas,
) -> Handle<Image> {
    if asset_exists(relative) {
        asset_server.load(relative)
    } else {
        warn!("{} not found under {}; using generated art", relative, ASSET_ROOT);
        images.add(generate().into_image())
    }
}

/// Startup system: resolve every texture the card needs.
pub fn load_card_textures(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut images: ResMut<Assets<Image>>,
) {
    let mut stickers = HashMap::new();
    for info in STICKER_CATALOG.iter() {
        let handle = load_or_generate(&asset_server, &mut images, info.asset_path, || {
            generate_sticker_canvas(info.id, info.pixel_size)
        });
        stickers.insert(info.id, handle);
    }

    let logo = load_or_generate(&asset_server, &mut images, LOGO_PATH, || {
        generate_logo_canvas(128)
    });
    let tyb_logo = load_or_generate(&asset_server, &mut images, TYB_LOGO_PATH, || {
        generate_tyb_logo_canvas(160)
    });
    let card_face = images.add(generate_card_face_canvas(500, 315, 16.0).into_image());
    let shadow = images.add(generate_shadow_canvas(256, 162, 0.25).into_image());

    info!("Resolved {} sticker textures", stickers.len());
    commands.insert_resource(CardTextures {
        stickers,
        logo,
        tyb_logo,
        card_face,
        shadow,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_dimensions() {
        let canvas = generate_sticker_canvas(StickerId(5), Vec2::new(90.0, 60.0));
        assert_eq!(canvas.width, 180);
        assert_eq!(canvas.height, 120);
        assert_eq!(canvas.pixels.len(), 180 * 120 * 4);
    }

    #[test]
    fn test_sticker_center_is_opaque_and_corner_clear() {
        for info in STICKER_CATALOG.iter() {
            let canvas = generate_sticker_canvas(info.id, info.pixel_size);
            let corner = canvas.pixel(0, 0);
            assert_eq!(corner[3], 0, "{} corner should be transparent", info.id);
            if info.id.0 != 4 {
                let center = canvas.pixel(canvas.width / 2, canvas.height / 2);
                assert_eq!(center[3], 255, "{} center should be opaque", info.id);
            }
        }
    }

    #[test]
    fn test_shadow_fades_to_edges() {
        let canvas = generate_shadow_canvas(64, 40, 0.25);
        assert_eq!(canvas.pixel(32, 20)[3], 255);
        assert!(canvas.pixel(0, 0)[3] < 40);
    }

    #[test]
    fn test_card_face_corners_are_cut() {
        let canvas = generate_card_face_canvas(100, 60, 10.0);
        assert_eq!(canvas.pixel(0, 0)[3], 0);
        assert_eq!(canvas.pixel(50, 2)[3], 255);
        assert_eq!(canvas.pixel(50, 30), [255, 255, 255, 255]);
    }

    #[test]
    fn test_rounded_box_distance_signs() {
        let half = Vec2::new(1.0, 0.5);
        assert!(rounded_box_distance(Vec2::ZERO, half, 0.1) < 0.0);
        assert!(rounded_box_distance(Vec2::new(2.0, 0.0), half, 0.1) > 0.0);
        assert!((rounded_box_distance(Vec2::new(1.5, 0.0), half, 0.1) - 0.5).abs() < 1e-5);
    }
}
