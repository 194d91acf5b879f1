use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;
use crate::analysis::error::AnalysisError;
/// Rendering options for the comparison figure.
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub palette: Vec<RGBColor>,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            background: WHITE,
            palette: vec![BLUE, RED, GREEN, MAGENTA, CYAN, BLACK],
        }
    }
}
/// Overlay one line series per capture (last activation window, milliamps)
/// and encode the figure as PNG bytes.
pub fn render_comparison_png(
    series: &[(String, Vec<f64>)],
    style: PlotStyle,
) -> Result<Vec<u8>, AnalysisError> {
    if series.is_empty() {
        return Err(AnalysisError::Plot("no series to plot".into()));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let x_max = series
            .iter()
            .map(|(_, values)| values.len())
            .max()
            .unwrap_or(1) as f64;
        let y_max = series
            .iter()
            .flat_map(|(_, values)| values.iter().copied())
            .fold(0.0f64, f64::max);
        let y_top = if y_max <= 0.0 { 1.0 } else { y_max * 1.05 };
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 45)
            .build_cartesian_2d(0f64..x_max.max(1.0), 0f64..y_top)?;
        chart
            .configure_mesh()
            .x_desc("Time [ms]")
            .y_desc("Current [mA]")
            .light_line_style(&BLACK.mix(0.1))
            .draw()?;
        for (idx, (label, values)) in series.iter().enumerate() {
            let color = style.palette[idx % style.palette.len()];
            let points = values.iter().enumerate().map(|(i, v)| (i as f64, *v));
            chart
                .draw_series(LineSeries::new(points, &color))?
                .label(label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }
        chart
            .configure_series_labels()
            .border_style(&BLACK.mix(0.4))
            .background_style(&style.background.mix(0.8))
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, AnalysisError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| AnalysisError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn comparison_plot_returns_png_bytes() {
        let series = vec![
            ("Run 1\nElectric charge: 0.0012mAh".to_owned(), vec![0.0, 5.0, 120.0, 5.0, 0.0]),
            ("Run 2\nElectric charge: 0.0010mAh".to_owned(), vec![0.0, 4.0, 100.0, 4.0]),
        ];
        let png = render_comparison_png(&series, PlotStyle::default()).unwrap();
        assert!(!png.is_empty());
        // PNG magic bytes.
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    }
    #[test]
    fn empty_series_is_rejected() {
        assert!(matches!(
            render_comparison_png(&[], PlotStyle::default()),
            Err(AnalysisError::Plot(_))
        ));
    }
}
