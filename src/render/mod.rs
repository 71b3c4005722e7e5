pub mod glyph;
pub mod layout;
pub mod png;

pub use png::{encode_png, save_png};

use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{PunchError, Result};
use crate::model::{AuthorSection, RenderModel};
use crate::util::day_name;
use glyph::{Face, HAlign, VAlign};
use layout::CANVAS_WIDTH;

const DOT_COLOR: RGBColor = RGBColor(60, 60, 60);
const GRID_COLOR: RGBColor = RGBColor(211, 211, 211);
const LABEL_COLOR: RGBColor = RGBColor(105, 105, 105);

const TITLE_FACE: Face = Face {
    size: 16,
    bold: true,
    color: LABEL_COLOR,
};
const LABEL_FACE: Face = Face {
    size: 12,
    bold: false,
    color: LABEL_COLOR,
};

fn draw_error<E: std::fmt::Display>(err: E) -> PunchError {
    PunchError::Render(err.to_string())
}

/// Renders one punch card section per author, stacked top to bottom.
///
/// The canvas is exactly `820 x 475 * authors`; an empty model yields an
/// image with no rows.
pub fn render(model: &RenderModel) -> Result<RgbImage> {
    let height = layout::canvas_height(model.len());
    if height == 0 {
        tracing::debug!("nothing to render");
        return Ok(RgbImage::new(CANVAS_WIDTH, 0));
    }

    let mut buffer = vec![0u8; CANVAS_WIDTH as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (CANVAS_WIDTH, height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let mut y_offset = 0;
        for section in model.sections() {
            draw_section(&root, &mut y_offset, section, model.max_count())?;
        }
        debug_assert_eq!(y_offset as u32, height);

        root.present().map_err(draw_error)?;
    }

    tracing::info!(
        authors = model.len(),
        width = CANVAS_WIDTH,
        height,
        "rendered punch card"
    );
    RgbImage::from_raw(CANVAS_WIDTH, height, buffer)
        .ok_or_else(|| PunchError::Render("pixel buffer does not match canvas size".to_string()))
}

fn draw_section<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    y_offset: &mut i32,
    section: &AuthorSection,
    max_count: u32,
) -> Result<()> {
    let section_top = *y_offset;
    TITLE_FACE.draw(
        area,
        &section.identity.name,
        (0, *y_offset),
        HAlign::Left,
        VAlign::Top,
    )?;
    *y_offset += layout::HEADER_HEIGHT as i32;

    for day in layout::days() {
        draw_day_row(area, *y_offset, day)?;
        *y_offset += layout::ROW_HEIGHT as i32;
    }

    for (slot, count) in section.table.iter() {
        let Some(diameter) = layout::dot_diameter(count, max_count) else {
            continue;
        };
        let center = (
            layout::column_x(slot.hour()),
            layout::row_y(section_top, slot.day()),
        );
        area.draw(&Circle::new(center, layout::dot_radius(diameter), DOT_COLOR.filled()))
            .map_err(draw_error)?;
    }

    for hour in layout::hours() {
        LABEL_FACE.draw(
            area,
            &hour.to_string(),
            (layout::column_x(hour), *y_offset + layout::HOUR_LABEL_OFFSET),
            HAlign::Center,
            VAlign::Bottom,
        )?;
    }
    *y_offset += layout::TRAILER_GAP as i32;

    Ok(())
}

fn draw_day_row<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, row_top: i32, day: u8) -> Result<()> {
    LABEL_FACE.draw(area, day_name(day), (0, row_top), HAlign::Left, VAlign::Center)?;

    let baseline = row_top + layout::BASELINE_OFFSET;
    area.draw(&PathElement::new(
        vec![(0, baseline), (CANVAS_WIDTH as i32, baseline)],
        GRID_COLOR.stroke_width(1),
    ))
    .map_err(draw_error)?;

    for hour in layout::hours() {
        let x = layout::column_x(hour);
        area.draw(&PathElement::new(
            vec![(x, layout::tick_top(row_top, hour)), (x, baseline)],
            GRID_COLOR.stroke_width(1),
        ))
        .map_err(draw_error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CommitRecord;
    use crate::punch::aggregate;
    use chrono::DateTime;
    use image::Rgb;
    use pretty_assertions::assert_eq;

    const WHITE_PX: Rgb<u8> = Rgb([255, 255, 255]);
    const DOT_PX: Rgb<u8> = Rgb([60, 60, 60]);

    fn commit(email: &str, name: &str, ts: &str) -> CommitRecord {
        CommitRecord::new(email, name, DateTime::parse_from_rfc3339(ts).unwrap())
    }

    fn scenario_model() -> RenderModel {
        aggregate(vec![
            commit("alice@x.com", "Alice", "2024-01-07T09:05:00+00:00"),
            commit("alice@x.com", "Alice", "2024-01-07T09:45:00+00:00"),
            commit("bob@y.com", "Bob", "2024-01-08T14:10:00+00:00"),
        ])
        .into_render_model()
    }

    #[test]
    fn empty_model_renders_zero_rows() {
        let image = render(&RenderModel::default()).unwrap();
        assert_eq!(image.dimensions(), (820, 0));
    }

    #[test]
    fn height_grows_per_author() {
        let image = render(&scenario_model()).unwrap();
        assert_eq!(image.dimensions(), (820, 950));

        let one = aggregate(vec![commit("a@x.com", "A", "2024-01-07T09:05:00+00:00")])
            .into_render_model();
        assert_eq!(render(&one).unwrap().dimensions(), (820, 475));
    }

    #[test]
    fn dots_are_centered_on_their_slot() {
        let image = render(&scenario_model()).unwrap();

        // alice: Sunday 09:00 in the first section
        assert_eq!(*image.get_pixel(370, 40), DOT_PX);
        // bob: Monday 14:00 in the second section
        assert_eq!(*image.get_pixel(520, 575), DOT_PX);
    }

    #[test]
    fn dot_size_follows_count() {
        let image = render(&scenario_model()).unwrap();

        // alice's dot (32 px) reaches 12 px right of centre, bob's (17.5 px) does not
        assert_eq!(*image.get_pixel(382, 40), DOT_PX);
        assert_eq!(*image.get_pixel(532, 575), WHITE_PX);
    }

    #[test]
    fn empty_cells_stay_blank() {
        let image = render(&scenario_model()).unwrap();

        assert_eq!(*image.get_pixel(115, 60), WHITE_PX);
        // bob has no commit on Sunday 09:00
        assert_eq!(*image.get_pixel(370, 515), WHITE_PX);
    }

    #[test]
    fn baselines_are_drawn() {
        let image = render(&scenario_model()).unwrap();
        assert_ne!(*image.get_pixel(400, 80), WHITE_PX);
        assert_ne!(*image.get_pixel(400, 475 + 40 + 6 * 60 + 40), WHITE_PX);
    }

    #[test]
    fn odd_hour_ticks_reach_higher() {
        let image = render(&scenario_model()).unwrap();

        // Sunday row of the first section: ticks span 60..80 on odd hours, 65..80 on even
        assert_ne!(*image.get_pixel(130, 62), WHITE_PX);
        assert_eq!(*image.get_pixel(100, 62), WHITE_PX);
        assert_ne!(*image.get_pixel(100, 70), WHITE_PX);
        assert_eq!(*image.get_pixel(130, 58), WHITE_PX);
    }

    #[test]
    fn zero_max_draws_no_dots() {
        let sections = scenario_model().sections().to_vec();
        let model = RenderModel::new(sections, 0);
        let image = render(&model).unwrap();

        assert_eq!(*image.get_pixel(370, 40), WHITE_PX);
        assert_eq!(*image.get_pixel(520, 575), WHITE_PX);
    }
}
