//! Render sink boundary
//!
//! The engine paints through the minimal `DrawSurface` capability below and
//! never reads back from it. Any 2D drawing facility can satisfy the trait;
//! the simulation has no dependency on a concrete graphics API.

use glam::Vec2;

use crate::consts::GROUND_HEIGHT;
use crate::engine::AvatarImage;
use crate::sim::state::{COIN_GLYPH, FALLBACK_PLAYER_GLYPH};
use crate::sim::{GameState, Rect, Viewport};

/// RGBA color, 0-1 per channel
pub type Color = [f32; 4];

/// sRGB byte triple to a Color
pub fn srgb(r: u8, g: u8, b: u8) -> Color {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        1.0,
    ]
}

/// Frame colors used by the painter
#[derive(Debug, Clone)]
pub struct Palette {
    pub sky: Color,
    pub sun: Color,
    pub dirt: Color,
    pub grass: Color,
    pub ink: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            sky: srgb(0x87, 0xce, 0xeb),
            sun: srgb(0xff, 0xd7, 0x00),
            dirt: srgb(0x5c, 0x40, 0x33),
            grass: srgb(0x4a, 0xde, 0x80),
            ink: srgb(0x00, 0x00, 0x00),
        }
    }
}

/// Minimal drawing capability the engine paints through every tick
pub trait DrawSurface {
    /// Current surface dimensions. Queried each frame; the engine never
    /// caches them across host resizes.
    fn size(&self) -> Viewport;
    /// Fill the whole surface.
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: &Rect, color: Color);
    /// Draw the avatar clipped to the circle inscribed in `rect`. Return
    /// false if this surface cannot draw images; the caller falls back to
    /// a glyph.
    fn draw_avatar(&mut self, image: AvatarImage, rect: &Rect) -> bool;
    /// Draw a single glyph centered in `rect`.
    fn draw_glyph(&mut self, glyph: char, rect: &Rect);
    /// Draw a text run anchored at `pos`.
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color);
}

/// Paint one frame of the session.
///
/// Draw order: sky, sun, ground band with grass lip, player, obstacles,
/// coins, score readout.
pub fn paint(
    state: &GameState,
    avatar: Option<AvatarImage>,
    currency_symbol: &str,
    palette: &Palette,
    surface: &mut dyn DrawSurface,
) {
    let view = surface.size();

    surface.clear(palette.sky);

    let sun = Rect::new(view.width - 80.0, 20.0, 60.0, 60.0);
    surface.fill_rect(&sun, palette.sun);

    let ground = Rect::new(0.0, view.ground_top(), view.width, GROUND_HEIGHT);
    surface.fill_rect(&ground, palette.dirt);
    let lip = Rect::new(0.0, view.ground_top(), view.width, 10.0);
    surface.fill_rect(&lip, palette.grass);

    let player = &state.player.rect;
    let avatar_drawn = avatar.is_some_and(|image| surface.draw_avatar(image, player));
    if !avatar_drawn {
        surface.draw_glyph(FALLBACK_PLAYER_GLYPH, player);
    }

    for obstacle in &state.obstacles {
        surface.draw_glyph(obstacle.glyph, &obstacle.rect);
    }
    for coin in &state.coins {
        surface.draw_glyph(COIN_GLYPH, &coin.rect);
    }

    surface.draw_text(
        &format!("{} {}", currency_symbol, state.score),
        Vec2::new(20.0, 40.0),
        palette.ink,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use crate::sim::state::{Coin, Lane, Obstacle};

    /// Surface that records draw calls as readable op strings
    struct RecordingSurface {
        view: Viewport,
        supports_images: bool,
        ops: Vec<String>,
    }

    impl RecordingSurface {
        fn new(supports_images: bool) -> Self {
            Self {
                view: Viewport::new(800.0, 600.0),
                supports_images,
                ops: Vec::new(),
            }
        }
    }

    impl DrawSurface for RecordingSurface {
        fn size(&self) -> Viewport {
            self.view
        }
        fn clear(&mut self, _color: Color) {
            self.ops.push("clear".into());
        }
        fn fill_rect(&mut self, _rect: &Rect, _color: Color) {
            self.ops.push("rect".into());
        }
        fn draw_avatar(&mut self, image: AvatarImage, _rect: &Rect) -> bool {
            if self.supports_images {
                self.ops.push(format!("avatar:{}", image.0));
            }
            self.supports_images
        }
        fn draw_glyph(&mut self, glyph: char, _rect: &Rect) {
            self.ops.push(format!("glyph:{glyph}"));
        }
        fn draw_text(&mut self, text: &str, _pos: Vec2, _color: Color) {
            self.ops.push(format!("text:{text}"));
        }
    }

    fn sample_state() -> GameState {
        let mut state = GameState::new(8, Viewport::new(800.0, 600.0));
        state.phase = GamePhase::Playing;
        state.score = 30;
        state.obstacles.push(Obstacle {
            rect: Rect::new(400.0, 460.0, 40.0, 40.0),
            lane: Lane::Ground,
            glyph: '🧱',
        });
        state.coins.push(Coin {
            rect: Rect::new(500.0, 420.0, 30.0, 30.0),
            collected: false,
        });
        state
    }

    #[test]
    fn frame_starts_with_a_clear() {
        let mut surface = RecordingSurface::new(false);
        paint(&sample_state(), None, "$", &Palette::default(), &mut surface);
        assert_eq!(surface.ops[0], "clear");
    }

    #[test]
    fn missing_avatar_falls_back_to_glyph() {
        let mut surface = RecordingSurface::new(true);
        paint(&sample_state(), None, "$", &Palette::default(), &mut surface);
        assert!(surface.ops.contains(&format!("glyph:{FALLBACK_PLAYER_GLYPH}")));
    }

    #[test]
    fn unsupported_image_surface_falls_back_to_glyph() {
        let mut surface = RecordingSurface::new(false);
        let avatar = Some(AvatarImage(7));
        paint(&sample_state(), avatar, "$", &Palette::default(), &mut surface);
        assert!(surface.ops.contains(&format!("glyph:{FALLBACK_PLAYER_GLYPH}")));
    }

    #[test]
    fn avatar_replaces_the_player_glyph() {
        let mut surface = RecordingSurface::new(true);
        let avatar = Some(AvatarImage(7));
        paint(&sample_state(), avatar, "$", &Palette::default(), &mut surface);
        assert!(surface.ops.contains(&"avatar:7".to_string()));
        assert!(!surface.ops.contains(&format!("glyph:{FALLBACK_PLAYER_GLYPH}")));
    }

    #[test]
    fn entities_and_score_are_drawn() {
        let mut surface = RecordingSurface::new(false);
        paint(&sample_state(), None, "¥", &Palette::default(), &mut surface);
        assert!(surface.ops.contains(&"glyph:🧱".to_string()));
        assert!(surface.ops.contains(&format!("glyph:{COIN_GLYPH}")));
        assert!(surface.ops.contains(&"text:¥ 30".to_string()));
    }
}
