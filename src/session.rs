//! Session setup
//!
//! Sizes the field from the display area and the base image's aspect ratio,
//! carves the block field from the mask, and owns the per-frame entry point.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PADDLE_MARGIN;
use crate::error::SetupError;
use crate::platform::MaskSampler;
use crate::scheduler::{FixedStepScheduler, Renderer};
use crate::settings::Settings;
use crate::sim::{BlockField, Character, Field, GameState, InputState, generate_blocks};

/// Drawable area offered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayArea {
    pub width: u32,
    pub height: u32,
}

impl DisplayArea {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Image and field geometry, fixed for the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldLayout {
    /// Size the image (and mask) is drawn at
    pub image_width: u32,
    pub image_height: u32,
    pub field: Field,
}

impl FieldLayout {
    /// Fit the image into the display keeping its aspect ratio, then reserve
    /// `PADDLE_MARGIN` below it for the paddle.
    pub fn fit(display: DisplayArea, base_image: (u32, u32)) -> Result<Self, SetupError> {
        let (base_w, base_h) = base_image;
        if base_w == 0 || base_h == 0 {
            return Err(SetupError::DegenerateImage {
                width: base_w,
                height: base_h,
            });
        }
        if display.width == 0 || display.height == 0 {
            return Err(SetupError::DegenerateDisplay {
                width: display.width,
                height: display.height,
            });
        }

        let degenerate = || SetupError::DegenerateImage {
            width: base_w,
            height: base_h,
        };
        let mut image_height = display.height;
        let mut image_width = u32::try_from(image_height as u64 * base_w as u64 / base_h as u64)
            .map_err(|_| degenerate())?;
        if display.width < image_width {
            image_width = display.width;
            image_height = u32::try_from(image_width as u64 * base_h as u64 / base_w as u64)
                .map_err(|_| degenerate())?;
        }
        if image_width == 0 || image_height == 0 {
            return Err(SetupError::DegenerateDisplay {
                width: display.width,
                height: display.height,
            });
        }

        Ok(Self {
            image_width,
            image_height,
            field: Field::new(image_width as f32, image_height as f32 + PADDLE_MARGIN),
        })
    }

    /// Left edge of the image (and block field) within the field
    pub fn image_x(&self) -> f32 {
        self.field.width / 2.0 - self.image_width as f32 / 2.0
    }
}

/// One game session: state, input snapshot and scheduler
#[derive(Debug, Clone)]
pub struct Session {
    pub layout: FieldLayout,
    pub state: GameState,
    pub input: InputState,
    pub scheduler: FixedStepScheduler,
}

impl Session {
    /// Set up a session. `display` is `None` when the host has no surface,
    /// in which case nothing is constructed.
    pub fn start(
        display: Option<DisplayArea>,
        base_image: (u32, u32),
        sampler: &dyn MaskSampler,
        settings: &Settings,
        now: f64,
    ) -> Result<Self, SetupError> {
        let display = display.ok_or(SetupError::MissingSurface)?;
        settings.validate()?;
        let layout = FieldLayout::fit(display, base_image)?;

        let mask = sampler.sample(layout.image_width, layout.image_height);
        let blocks = generate_blocks(&mask, Vec2::new(layout.image_x(), 0.0));

        let character = Character::new(
            layout.image_x(),
            layout.image_width as f32,
            layout.image_height as f32,
        );
        let state = GameState::new(
            layout.field,
            BlockField::new(blocks),
            character,
            settings.animation(),
        );
        let scheduler = FixedStepScheduler::with_tick_length(now, settings.tick_length_ms)
            .with_catch_up_cap(settings.max_catch_up_ticks);

        log::info!(
            "Session started: stage {}, field {}x{}, {} blocks",
            settings.stage.as_str(),
            layout.field.width,
            layout.field.height,
            state.blocks.total()
        );

        Ok(Self {
            layout,
            state,
            input: InputState::new(layout.field.width / 2.0),
            scheduler,
        })
    }

    /// Per-frame entry point: simulate owed ticks, render once
    pub fn frame<R: Renderer + ?Sized>(&mut self, now: f64, renderer: &mut R) -> u32 {
        self.scheduler
            .frame(now, &mut self.state, &mut self.input, renderer)
    }

    pub fn is_over(&self) -> bool {
        self.state.scene.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{AlphaMask, Scene};

    struct SolidMask;

    impl MaskSampler for SolidMask {
        fn sample(&self, width: u32, height: u32) -> AlphaMask {
            AlphaMask::from_rgba(width, height, vec![255; (width * height * 4) as usize])
                .unwrap_or_default()
        }

        fn natural_size(&self) -> Option<(u32, u32)> {
            None
        }
    }

    struct BrokenMask;

    impl MaskSampler for BrokenMask {
        fn sample(&self, _width: u32, _height: u32) -> AlphaMask {
            AlphaMask::empty()
        }

        fn natural_size(&self) -> Option<(u32, u32)> {
            None
        }
    }

    #[test]
    fn test_fit_tall_display() {
        // Height-limited: 600 tall, 2:3 image → 400 wide
        let layout = FieldLayout::fit(DisplayArea::new(1000, 600), (200, 300)).unwrap();
        assert_eq!((layout.image_width, layout.image_height), (400, 600));
        assert_eq!(layout.field, Field::new(400.0, 700.0));
        assert_eq!(layout.image_x(), 0.0);
    }

    #[test]
    fn test_fit_narrow_display() {
        // Width-limited: 300 wide, 1:1 image at 800 tall would be 800 wide
        let layout = FieldLayout::fit(DisplayArea::new(300, 800), (500, 500)).unwrap();
        assert_eq!((layout.image_width, layout.image_height), (300, 300));
        assert_eq!(layout.field.height, 400.0);
    }

    #[test]
    fn test_fit_rejects_degenerate_sizes() {
        assert!(matches!(
            FieldLayout::fit(DisplayArea::new(300, 300), (0, 10)),
            Err(SetupError::DegenerateImage { .. })
        ));
        assert!(matches!(
            FieldLayout::fit(DisplayArea::new(0, 300), (10, 10)),
            Err(SetupError::DegenerateDisplay { .. })
        ));
    }

    #[test]
    fn test_fit_rejects_overflowing_aspect() {
        // 1 px tall, u32::MAX wide: scaled width doesn't fit in u32
        let result = FieldLayout::fit(DisplayArea::new(u32::MAX, 1000), (u32::MAX, 1));
        assert!(matches!(result, Err(SetupError::DegenerateImage { .. })));
    }

    #[test]
    fn test_start_rejects_invalid_settings() {
        let display = Some(DisplayArea::new(400, 400));
        for settings in [
            Settings {
                tick_length_ms: 0.0,
                ..Settings::default()
            },
            Settings {
                tick_length_ms: f64::NAN,
                ..Settings::default()
            },
            Settings {
                max_catch_up_ticks: Some(0),
                ..Settings::default()
            },
        ] {
            let result = Session::start(display, (100, 100), &SolidMask, &settings, 0.0);
            assert!(matches!(result, Err(SetupError::InvalidSettings { .. })));
        }
    }

    #[test]
    fn test_catch_up_cap_of_one_still_launches() {
        let settings = Settings {
            max_catch_up_ticks: Some(1),
            ..Settings::default()
        };
        let mut session = Session::start(
            Some(DisplayArea::new(400, 400)),
            (100, 100),
            &SolidMask,
            &settings,
            0.0,
        )
        .unwrap();
        session.input.click();
        session.frame(1000.0, &mut |_: &GameState| {});
        assert_eq!(session.state.time_ticks, 1);
        assert_eq!(session.state.scene, Scene::Game);
    }

    #[test]
    fn test_start_builds_full_field() {
        let session = Session::start(
            Some(DisplayArea::new(1000, 300)),
            (100, 100),
            &SolidMask,
            &Settings::default(),
            0.0,
        )
        .unwrap();
        // 300x300 image, 30px cells → 10x10
        assert_eq!(session.state.blocks.total(), 100);
        assert_eq!(session.state.scene, Scene::Start);
        assert_eq!(session.state.paddle.x, 100.0);
        assert_eq!(session.state.paddle.y, 350.0);
        assert!(session.state.animation);
    }

    #[test]
    fn test_start_without_surface_fails() {
        let result = Session::start(None, (100, 100), &SolidMask, &Settings::default(), 0.0);
        assert!(matches!(result, Err(SetupError::MissingSurface)));
    }

    #[test]
    fn test_broken_sampler_gives_empty_field() {
        let mut session = Session::start(
            Some(DisplayArea::new(400, 400)),
            (100, 100),
            &BrokenMask,
            &Settings::default(),
            0.0,
        )
        .unwrap();
        assert_eq!(session.state.blocks.total(), 0);

        session.input.click();
        session.frame(40.0, &mut |_: &GameState| {});
        assert_eq!(session.state.scene, Scene::Clear);
        assert!(session.is_over());
    }
}
