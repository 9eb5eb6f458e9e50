//! Small TrueType fonts synthesized with write-fonts for tests.
//!
//! Each font has `.notdef` plus one empty glyph per character, mapped in
//! order, with the tables HarfBuzz needs to subset it.

use std::collections::HashMap;

use read_fonts::{FontRef, TableProvider, types::GlyphId};
use write_fonts::{
    FontBuilder,
    tables::{
        cmap::Cmap,
        glyf::{Bbox, GlyfLocaBuilder, Glyph, SimpleGlyph},
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        maxp::Maxp,
        os2::Os2,
        post::Post,
    },
};

/// Create a minimal TrueType font with one glyph per character plus `.notdef`.
pub fn make_test_font(characters: &str) -> Vec<u8> {
    let num_glyphs = characters.chars().count() as u16 + 1;
    let (x_min, y_min, x_max, y_max) = (0, 0, 500, 700);

    let mut glyf_builder = GlyfLocaBuilder::new();
    for _ in 0..num_glyphs {
        let simple = SimpleGlyph {
            bbox: Bbox { x_min, y_min, x_max, y_max },
            contours: vec![],
            instructions: vec![],
        };
        let _ = glyf_builder.add_glyph(&Glyph::Simple(simple));
    }
    let (glyf, loca, loca_format) = glyf_builder.build();

    let mappings: Vec<(char, GlyphId)> = characters
        .chars()
        .enumerate()
        .map(|(i, ch)| (ch, GlyphId::new(i as u32 + 1)))
        .collect();
    let cmap = Cmap::from_mappings(mappings).expect("cmap from mappings");

    let head = Head {
        font_revision: font_types::Fixed::from_f64(1.0),
        checksum_adjustment: 0,
        magic_number: 0x5F0F3CF5,
        flags: write_fonts::tables::head::Flags::empty(),
        units_per_em: 1000,
        created: font_types::LongDateTime::new(0),
        modified: font_types::LongDateTime::new(0),
        x_min,
        y_min,
        x_max,
        y_max,
        mac_style: write_fonts::tables::head::MacStyle::empty(),
        lowest_rec_ppem: 8,
        font_direction_hint: 2,
        index_to_loc_format: match loca_format {
            write_fonts::tables::loca::LocaFormat::Short => 0,
            write_fonts::tables::loca::LocaFormat::Long => 1,
        },
    };

    let hhea = Hhea {
        ascender: font_types::FWord::new(700),
        descender: font_types::FWord::new(-200),
        line_gap: font_types::FWord::new(0),
        advance_width_max: font_types::UfWord::new(500),
        min_left_side_bearing: font_types::FWord::new(0),
        min_right_side_bearing: font_types::FWord::new(0),
        x_max_extent: font_types::FWord::new(500),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: num_glyphs,
    };

    let hmtx = Hmtx {
        h_metrics: (0..num_glyphs).map(|_| LongMetric { advance: 500, side_bearing: 0 }).collect(),
        left_side_bearings: vec![],
    };

    let maxp = Maxp {
        num_glyphs,
        max_points: Some(0),
        max_contours: Some(0),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(1),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
    };

    let post = Post {
        version: font_types::Version16Dot16::VERSION_3_0,
        italic_angle: font_types::Fixed::from_f64(0.0),
        underline_position: font_types::FWord::new(-100),
        underline_thickness: font_types::FWord::new(50),
        is_fixed_pitch: 0,
        min_mem_type42: 0,
        max_mem_type42: 0,
        min_mem_type1: 0,
        max_mem_type1: 0,
        num_glyphs: Some(num_glyphs),
        glyph_name_index: None,
        string_data: None,
    };

    let mut builder = FontBuilder::new();
    builder.add_table(&head).unwrap();
    builder.add_table(&hhea).unwrap();
    builder.add_table(&hmtx).unwrap();
    builder.add_table(&maxp).unwrap();
    builder.add_table(&cmap).unwrap();
    builder.add_table(&post).unwrap();
    builder.add_table(&glyf).unwrap();
    builder.add_table(&loca).unwrap();
    builder.add_table(&make_os2()).unwrap();
    builder.build()
}

fn make_os2() -> Os2 {
    Os2 {
        x_avg_char_width: 500,
        us_weight_class: 400,
        us_width_class: 5,
        fs_type: 0,
        y_subscript_x_size: 650,
        y_subscript_y_size: 600,
        y_subscript_x_offset: 0,
        y_subscript_y_offset: 75,
        y_superscript_x_size: 650,
        y_superscript_y_size: 600,
        y_superscript_x_offset: 0,
        y_superscript_y_offset: 350,
        y_strikeout_size: 50,
        y_strikeout_position: 300,
        s_family_class: 0,
        panose_10: [0; 10],
        ul_unicode_range_1: 0,
        ul_unicode_range_2: 0,
        ul_unicode_range_3: 0,
        ul_unicode_range_4: 0,
        ach_vend_id: font_types::Tag::new(b"NONE"),
        fs_selection: write_fonts::tables::os2::SelectionFlags::REGULAR,
        us_first_char_index: 0x20,
        us_last_char_index: 0x7E,
        s_typo_ascender: 700,
        s_typo_descender: -200,
        s_typo_line_gap: 0,
        us_win_ascent: 900,
        us_win_descent: 200,
        ul_code_page_range_1: Some(0),
        ul_code_page_range_2: Some(0),
        sx_height: Some(500),
        s_cap_height: Some(700),
        us_default_char: Some(0),
        us_break_char: Some(0x20),
        us_max_context: Some(0),
        us_lower_optical_point_size: None,
        us_upper_optical_point_size: None,
    }
}

/// Reports, per candidate character, whether the font's cmap maps it.
pub fn mapped_characters(data: &[u8], candidates: &str) -> HashMap<char, bool> {
    let font = FontRef::new(data).expect("parse subset font");
    let cmap = font.cmap().expect("cmap");
    candidates.chars().map(|ch| (ch, cmap.map_codepoint(ch).is_some())).collect()
}
