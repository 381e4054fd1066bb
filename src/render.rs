//! Scene composer: draws the assembled snapshot to a PNG with plotters.
//!
//! World coordinates are AU in the heliocentric-ecliptic plane with a
//! fixed 16:9 window; the vertical extent follows the requested image
//! aspect so one AU measures the same number of pixels on both axes.

use std::fs;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use rand::Rng;
use thiserror::Error;

use crate::snapshot::Snapshot;

/// Default output width in pixels.
pub const DEFAULT_WIDTH: u32 = 1920;
/// Default output height in pixels.
pub const DEFAULT_HEIGHT: u32 = 1080;

/// Half-width of the world window (AU).
const X_LIMIT_AU: f64 = 16.0;
/// Number of background stars scattered over the frame.
const STAR_COUNT: usize = 800;
/// Half-diagonal of the spacecraft diamond marker (AU).
const DIAMOND_HALF_AU: f64 = 0.18;
/// Vertical spacing between status overlay lines (AU).
const STATUS_LINE_STEP_AU: f64 = 0.32;

const SPACE_BLACK: RGBColor = RGBColor(5, 5, 8);

/// Errors surfaced while writing the output image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid marker color `{0}` in catalog")]
    BadColor(String),
    #[error("drawing failed: {0}")]
    Draw(String),
}

/// Render the snapshot to a PNG at `path`.
pub fn render_png(
    snapshot: &Snapshot,
    path: &Path,
    width: u32,
    height: u32,
) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let path_str = path
        .to_str()
        .ok_or_else(|| RenderError::Draw("output path is not valid UTF-8".to_string()))?;

    // Validate catalog colors before touching the backend.
    let planet_colors = snapshot
        .planets
        .iter()
        .map(|planet| parse_hex_color(&planet.entry.color))
        .collect::<Result<Vec<_>, _>>()?;

    let root = BitMapBackend::new(path_str, (width, height)).into_drawing_area();
    draw(&root, snapshot, &planet_colors, width, height)
        .map_err(|err| RenderError::Draw(err.to_string()))?;
    root.present()
        .map_err(|err| RenderError::Draw(err.to_string()))?;
    Ok(())
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    snapshot: &Snapshot,
    planet_colors: &[RGBColor],
    width: u32,
    height: u32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&SPACE_BLACK)?;

    let y_limit = X_LIMIT_AU * height as f64 / width as f64;
    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 30.0, FontStyle::Normal);
    let label_font = FontDesc::new(font_family, 18.0, FontStyle::Normal);
    let status_font = FontDesc::new(FontFamily::Monospace, 16.0, FontStyle::Normal);

    let title = format!("{} Mission Status", snapshot.spacecraft.entry.name);
    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .caption(title, caption_font.color(&WHITE))
        .build_cartesian_2d(-X_LIMIT_AU..X_LIMIT_AU, -y_limit..y_limit)?;

    let mut rng = rand::thread_rng();
    chart.draw_series((0..STAR_COUNT).map(|_| {
        let x = rng.gen_range(-X_LIMIT_AU..X_LIMIT_AU);
        let y = rng.gen_range(-y_limit..y_limit);
        let area = rng.gen_range(0.1_f64..3.0);
        let radius = area.sqrt().round().max(1.0) as i32;
        Circle::new((x, y), radius, WHITE.mix(0.6).filled())
    }))?;

    for planet in &snapshot.planets {
        chart.draw_series(LineSeries::new(
            planet.orbit.iter().map(|p| (p.x, p.y)),
            WHITE.mix(0.2).stroke_width(1),
        ))?;
    }

    chart
        .draw_series(std::iter::once(Circle::new(
            (0.0, 0.0),
            marker_radius(200),
            YELLOW.filled(),
        )))?
        .label("Sun")
        .legend(|(x, y)| Circle::new((x, y), 5, YELLOW.filled()));

    for (planet, color) in snapshot.planets.iter().zip(planet_colors) {
        let color = *color;
        chart
            .draw_series(std::iter::once(Circle::new(
                (planet.position.x, planet.position.y),
                marker_radius(planet.entry.marker_size),
                color.filled(),
            )))?
            .label(planet.display_name.clone())
            .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
    }

    let craft = &snapshot.spacecraft;
    chart.draw_series(DashedLineSeries::new(
        craft.tail.iter().map(|p| (p.x, p.y)),
        6,
        4,
        CYAN.mix(0.6).stroke_width(1),
    ))?;

    let (cx, cy) = (craft.position.x, craft.position.y);
    let diamond = vec![
        (cx, cy + DIAMOND_HALF_AU),
        (cx + DIAMOND_HALF_AU, cy),
        (cx, cy - DIAMOND_HALF_AU),
        (cx - DIAMOND_HALF_AU, cy),
        (cx, cy + DIAMOND_HALF_AU),
    ];
    chart
        .draw_series(std::iter::once(Polygon::new(diamond.clone(), RED.filled())))?
        .label(craft.display_name.clone())
        .legend(|(x, y)| Circle::new((x, y), 5, RED.filled()));
    chart.draw_series(std::iter::once(PathElement::new(
        diamond,
        CYAN.stroke_width(1),
    )))?;
    chart.draw_series(std::iter::once(Text::new(
        craft.entry.name.clone(),
        (cx + 0.2, cy + 0.2),
        FontDesc::new(font_family, 13.0, FontStyle::Bold).color(&CYAN),
    )))?;

    let status_x = -X_LIMIT_AU + 0.5;
    let status_top = -y_limit + STATUS_LINE_STEP_AU * (snapshot.telemetry.len() as f64 + 1.0);
    for (i, line) in snapshot.telemetry.iter().enumerate() {
        let y = status_top - STATUS_LINE_STEP_AU * i as f64;
        chart.draw_series(std::iter::once(Text::new(
            line.clone(),
            (status_x, y),
            status_font.clone().color(&CYAN.mix(0.8)),
        )))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .border_style(TRANSPARENT)
        .label_font(label_font.color(&WHITE))
        .draw()?;

    Ok(())
}

/// Marker pixel radius from a matplotlib-style scatter area.
fn marker_radius(area: u32) -> i32 {
    (area as f64).sqrt().round() as i32
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn parse_hex_color(hex: &str) -> Result<RGBColor, RenderError> {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(RenderError::BadColor(hex.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| RenderError::BadColor(hex.to_string()))
    };
    Ok(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
