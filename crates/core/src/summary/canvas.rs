//! PNG rendering for the store summary artifact.
//!
//! The canvas is a fixed 800x600 white bitmap drawn with the classic 8x8
//! bitmap font, so rendering needs no font files and produces identical
//! bytes for identical snapshots.

use chrono::{DateTime, Utc};
use image::{ImageFormat, Rgb, RgbImage};
use rust_decimal::Decimal;
use std::io::Cursor;

use crate::constants::{SUMMARY_HEIGHT, SUMMARY_WIDTH};
use crate::countries::Country;
use crate::errors::ArtifactError;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Everything the renderer needs, captured at one point in time.
#[derive(Debug, Clone)]
pub struct SummarySnapshot {
    pub total_count: i64,
    pub generated_at: DateTime<Utc>,
    /// Highest-GDP countries, best first. Entries without a GDP estimate
    /// never appear here.
    pub top_by_gdp: Vec<Country>,
}

/// Render the snapshot into encoded PNG bytes.
pub fn render(snapshot: &SummarySnapshot) -> Result<Vec<u8>, ArtifactError> {
    let mut img = RgbImage::from_pixel(SUMMARY_WIDTH, SUMMARY_HEIGHT, WHITE);

    let mut y = 50;
    draw_text(&mut img, 50, y, 3, "Country Data Summary");
    y += 45;

    draw_text(
        &mut img,
        50,
        y,
        2,
        &format!("Total Countries: {}", snapshot.total_count),
    );
    y += 30;

    draw_text(
        &mut img,
        50,
        y,
        2,
        &format!(
            "Last Refresh: {}",
            snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    );
    y += 50;

    draw_text(&mut img, 50, y, 3, "Top 5 Countries by GDP:");
    y += 40;

    if snapshot.top_by_gdp.is_empty() {
        draw_text(&mut img, 70, y, 2, "No countries with estimated GDP yet.");
    } else {
        for (rank, country) in snapshot.top_by_gdp.iter().enumerate() {
            // Keep the list clear of the bottom edge.
            if y > SUMMARY_HEIGHT - 30 {
                break;
            }
            let gdp = country.estimated_gdp.unwrap_or(Decimal::ZERO);
            let line = format!("{}. {}: {}", rank + 1, country.name, format_amount(gdp));
            draw_text(&mut img, 70, y, 2, &line);
            y += 25;
        }
    }

    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| ArtifactError::RenderFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Draw `text` with its top-left corner at `(x, y)`, each glyph pixel
/// scaled to a `scale` x `scale` block. Glyphs outside the ASCII range
/// render as blanks; pixels outside the canvas are clipped.
fn draw_text(img: &mut RgbImage, x: u32, y: u32, scale: u32, text: &str) {
    let mut cursor_x = x;
    for ch in text.chars() {
        let glyph = font8x8::legacy::BASIC_LEGACY
            .get(ch as usize)
            .copied()
            .unwrap_or([0u8; 8]);
        for (row_idx, row) in glyph.iter().enumerate() {
            for col_idx in 0..8u32 {
                if (row >> col_idx) & 1 == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = cursor_x + col_idx * scale + dx;
                        let py = y + row_idx as u32 * scale + dy;
                        if px < SUMMARY_WIDTH && py < SUMMARY_HEIGHT {
                            img.put_pixel(px, py, BLACK);
                        }
                    }
                }
            }
        }
        cursor_x += 8 * scale;
    }
}

/// Human-readable amount: thousands separators and two decimal places.
fn format_amount(value: Decimal) -> String {
    let rendered = format!("{:.2}", value.round_dp(2));
    let (integral, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));
    let (sign, digits) = match integral.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integral),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn country(name: &str, gdp: Decimal) -> Country {
        Country {
            name: name.to_string(),
            capital: None,
            region: None,
            population: 1,
            currency_code: None,
            exchange_rate: None,
            estimated_gdp: Some(gdp),
            flag_url: None,
            last_refreshed_at: Utc::now(),
        }
    }

    fn snapshot() -> SummarySnapshot {
        SummarySnapshot {
            total_count: 3,
            generated_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            top_by_gdp: vec![
                country("Wakanda", dec!(900000.5)),
                country("Latveria", dec!(120000)),
            ],
        }
    }

    #[test]
    fn render_produces_png_bytes() {
        let bytes = render(&snapshot()).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn render_is_deterministic_for_a_fixed_snapshot() {
        let first = render(&snapshot()).unwrap();
        let second = render(&snapshot()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn render_handles_an_empty_store() {
        let empty = SummarySnapshot {
            total_count: 0,
            generated_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            top_by_gdp: Vec::new(),
        };
        let bytes = render(&empty).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn amounts_are_grouped_with_two_decimals() {
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(1234.5)), "1,234.50");
        assert_eq!(format_amount(dec!(987654321)), "987,654,321.00");
        assert_eq!(format_amount(dec!(-12345.678)), "-12,345.68");
    }
}
