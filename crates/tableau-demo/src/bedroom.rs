//! The bedroom scene: a dresser with brass-handled drawers and a lamp, a
//! made bed with two pillows, and a round rug on a wood floor.

use std::path::{Path, PathBuf};

use glam::{vec3, vec4};
use tableau_core::{PrimitiveKind, Transform};
use tableau_renderer::lighting::{LightingConfig, PointLight};
use tableau_renderer::scene::{Frame, ScenePrep, SceneScript, StageError};

/// Scene script reproducing the bedroom layout.
pub struct BedroomScene {
    texture_dir: PathBuf,
}

impl BedroomScene {
    pub fn new(texture_dir: impl Into<PathBuf>) -> Self {
        Self {
            texture_dir: texture_dir.into(),
        }
    }

    fn texture(&self, name: &str) -> PathBuf {
        self.texture_dir.join(name)
    }

    fn lighting() -> LightingConfig {
        LightingConfig {
            view_position: vec3(4.0, 1.0, 4.0),
            lights: vec![
                // Cool accent light by the lamp on the dresser.
                PointLight {
                    position: vec3(-1.0, 4.5, -4.0),
                    ambient: vec3(0.1, 0.1, 0.3),
                    diffuse: vec3(0.2, 0.2, 0.8),
                    specular: vec3(0.3, 0.3, 0.3),
                },
                // Warm fill from far outside the room.
                PointLight {
                    position: vec3(-77.0, 10.0, -27.0),
                    ambient: vec3(0.1, 0.1, 0.08),
                    diffuse: vec3(0.5, 0.5, 0.4),
                    specular: vec3(0.3, 0.3, 0.3),
                },
            ],
        }
    }
}

impl SceneScript for BedroomScene {
    fn prepare(&mut self, scene: &mut ScenePrep<'_>) -> Result<(), StageError> {
        scene.configure_lighting(&Self::lighting());
        scene.define_materials_from_ron(include_str!("../assets/materials.ron"))?;

        for kind in PrimitiveKind::ALL {
            scene.load_mesh(kind)?;
        }

        scene.load_texture(self.texture("oakd.png"), "oakd")?;
        scene.load_texture(self.texture("oakl.png"), "oakl")?;
        scene.load_texture(self.texture("brass.png"), "brass")?;
        scene.load_texture(self.texture("carpet.png"), "carpet")?;
        scene.load_texture(self.texture("sheet.png"), "sheet")?;
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame<'_>) {
        // Floor
        frame.transform(&Transform::scaled_at(
            vec3(20.0, 1.0, 10.0),
            vec3(0.0, 0.0, 0.0),
        ));
        frame.color(vec4(0.9, 0.85, 0.75, 1.0));
        frame.material("plane");
        frame.draw(PrimitiveKind::Plane);

        // Dresser body
        frame.transform(&Transform::scaled_at(
            vec3(4.0, 3.0, 1.5),
            vec3(0.0, 1.5, -4.0),
        ));
        frame.texture("oakd");
        frame.material("box");
        frame.draw(PrimitiveKind::Box);

        // Drawer handles, three rows of two
        let rows = 3;
        let cols = 2;
        let start = vec3(-1.2, 2.5, 0.0);
        let spacing = vec3(2.4, -1.0, 0.0);

        frame.texture("brass");
        frame.material("sphere");
        for row in 0..rows {
            for col in 0..cols {
                let position = vec3(
                    start.x + col as f32 * spacing.x,
                    start.y + row as f32 * spacing.y,
                    -3.2,
                );
                frame.transform(&Transform::scaled_at(vec3(0.1, 0.1, 0.1), position));
                frame.draw(PrimitiveKind::Sphere);
            }
        }

        // Drawer fronts, slightly behind the handles
        frame.texture("oakl");
        frame.material("box");
        for row in 0..rows {
            for col in 0..cols {
                let position = vec3(
                    start.x + col as f32 * spacing.x,
                    start.y + row as f32 * spacing.y,
                    -3.25,
                );
                frame.transform(&Transform::scaled_at(vec3(1.4, 0.5, 0.25), position));
                frame.draw(PrimitiveKind::Box);
            }
        }

        // Lamp base
        frame.transform(&Transform::scaled_at(
            vec3(0.4, 0.2, 0.4),
            vec3(-1.0, 3.1, -4.0),
        ));
        frame.color(vec4(0.2, 0.2, 0.2, 1.0));
        frame.material("lampBase");
        frame.draw(PrimitiveKind::Box);

        // Lamp stem
        frame.transform(&Transform::scaled_at(
            vec3(0.05, 1.0, 0.05),
            vec3(-1.0, 3.2, -4.0),
        ));
        frame.color(vec4(0.2, 0.2, 0.2, 1.0));
        frame.material("lampBase");
        frame.draw(PrimitiveKind::Cylinder);

        // Lamp shade
        frame.transform(&Transform::scaled_at(
            vec3(0.6, 0.5, 0.6),
            vec3(-1.0, 3.9, -4.0),
        ));
        frame.color(vec4(0.95, 0.95, 0.9, 1.0));
        frame.material("lampShade");
        frame.draw(PrimitiveKind::Cone);

        // Bed
        frame.transform(&Transform::scaled_at(
            vec3(4.0, 1.8, 7.0),
            vec3(6.0, 0.4, -2.0),
        ));
        frame.texture("sheet");
        frame.material("bed");
        frame.draw(PrimitiveKind::Box);

        // Pillows
        frame.color(vec4(1.0, 1.0, 1.0, 1.0));
        frame.material("pillow");
        for x in [5.2, 6.8] {
            frame.transform(&Transform::scaled_at(
                vec3(1.3, 0.2, 0.8),
                vec3(x, 1.3, -4.5),
            ));
            frame.draw(PrimitiveKind::Box);
        }

        // Rug: a wide, flat cylinder just above the floor
        frame.transform(&Transform::scaled_at(
            vec3(6.0, 0.05, 6.0),
            vec3(2.0, 0.025, -1.0),
        ));
        frame.texture("carpet");
        frame.material("rug");
        frame.draw(PrimitiveKind::Cylinder);
    }
}

/// Writes the generated placeholder textures the scene registers.
///
/// Real art assets live outside the repo; these keep the demo
/// self-contained while still exercising the decode/flip/upload path with
/// both 3- and 4-channel files.
pub fn write_placeholder_textures(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;

    write_wood(&dir.join("oakd.png"), [94, 62, 34], 14)?;
    write_wood(&dir.join("oakl.png"), [168, 126, 80], 18)?;
    write_solid(&dir.join("brass.png"), [205, 170, 90])?;
    write_checker(&dir.join("carpet.png"), [150, 40, 40], [110, 30, 30])?;
    write_solid(&dir.join("sheet.png"), [205, 215, 235])?;
    Ok(())
}

/// Vertical wood-grain stripes, written as 3-channel RGB.
fn write_wood(path: &Path, base: [u8; 3], variance: u8) -> anyhow::Result<()> {
    let size = 64u32;
    let image = image::RgbImage::from_fn(size, size, |x, _y| {
        let wave = ((x * 7) % 16) as i16 - 8;
        let shade = |channel: u8| {
            (channel as i16 + wave * variance as i16 / 8).clamp(0, 255) as u8
        };
        image::Rgb([shade(base[0]), shade(base[1]), shade(base[2])])
    });
    image.save(path)?;
    Ok(())
}

fn write_solid(path: &Path, color: [u8; 3]) -> anyhow::Result<()> {
    let pixel = image::Rgba([color[0], color[1], color[2], 255]);
    image::RgbaImage::from_pixel(64, 64, pixel).save(path)?;
    Ok(())
}

fn write_checker(path: &Path, a: [u8; 3], b: [u8; 3]) -> anyhow::Result<()> {
    let image = image::RgbImage::from_fn(64, 64, |x, y| {
        let even = ((x / 8) + (y / 8)) % 2 == 0;
        image::Rgb(if even { a } else { b })
    });
    image.save(path)?;
    Ok(())
}
