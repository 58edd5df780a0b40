//! ASCII banner with a sky-to-sunset gradient (WAYFARER).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Sky Blue (#38b6ff).
const SKY_BLUE: (u8, u8, u8) = (0x38, 0xb6, 0xff);
/// Sunset Orange (#ff914d).
const SUNSET_ORANGE: (u8, u8, u8) = (0xff, 0x91, 0x4d);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "WAYFARER" in figlet ASCII with a gradient from
/// Sky Blue to Sunset Orange, then the version line.
pub fn print_welcome() {
    let mut out = stdout();
    let Ok(font) = FIGfont::standard() else {
        let _ = writeln!(out, "WAYFARER v{}", env!("CARGO_PKG_VERSION"));
        return;
    };
    let Some(figure) = font.convert("WAYFARER") else {
        let _ = writeln!(out, "WAYFARER v{}", env!("CARGO_PKG_VERSION"));
        return;
    };
    let art = figure.to_string();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(SKY_BLUE, SUNSET_ORANGE, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: SUNSET_ORANGE.0,
        g: SUNSET_ORANGE.1,
        b: SUNSET_ORANGE.2,
    }));
    let _ = out.execute(Print(format!("v{} - your terminal travel companion\r\n", version)));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
