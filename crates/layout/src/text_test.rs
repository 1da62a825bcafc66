#![cfg(test)]

use crate::test_utils::{RecordingSurface, bold_italic_rules, create_test_engine, init_logging};
use crate::{LayoutConfig, LayoutEngine, LayoutError};
use ficopdf_style::{MarkupSyntax, StyleRule, StyleRuleTable};
use ficopdf_traits::SurfaceError;
use ficopdf_types::{LayoutCursor, PageGeometry};

// The default recording page is 200x200 with 10pt margins: 18 characters
// per line and 18 lines of 10pt per page.

#[test]
fn test_text_wrapping() {
    init_logging();
    let engine = create_test_engine();
    let mut surface = RecordingSurface::new();

    let cursor = engine.render_text(&mut surface, "aaaa bbbb cccc dddd").unwrap();

    assert_eq!(
        surface.texts(),
        vec![
            (1, 10.0, 10.0, "aaaa bbbb cccc", "normal"),
            (1, 10.0, 20.0, "dddd", "normal"),
        ]
    );
    assert_eq!(cursor, LayoutCursor::new(10.0, 30.0));
}

#[test]
fn test_styles_share_one_visual_line() {
    let engine = create_test_engine();
    let mut surface = RecordingSurface::new();

    engine.render_text(&mut surface, "plain **bold** plain").unwrap();

    assert_eq!(
        surface.texts(),
        vec![
            (1, 10.0, 10.0, "plain", "normal"),
            (1, 70.0, 10.0, "bold", "bold"),
            (1, 120.0, 10.0, "plain", "normal"),
        ]
    );
}

#[test]
fn test_no_space_inserted_where_source_had_none() {
    let engine = create_test_engine();
    let mut surface = RecordingSurface::new();

    engine.render_text(&mut surface, "un**bold**ed").unwrap();

    let xs: Vec<f32> = surface.texts().iter().map(|t| t.1).collect();
    assert_eq!(xs, vec![10.0, 30.0, 70.0]);
}

#[test]
fn test_toggle_pair_without_text_is_invisible() {
    let engine = create_test_engine();
    let mut surface = RecordingSurface::new();

    engine.render_text(&mut surface, "a****b").unwrap();

    assert_eq!(surface.texts(), vec![(1, 10.0, 10.0, "ab", "normal")]);
}

#[test]
fn test_escaped_delimiter_is_drawn_literally() {
    let engine = create_test_engine();
    let mut surface = RecordingSurface::new();

    engine.render_text(&mut surface, r"\**not bold").unwrap();

    assert_eq!(surface.texts(), vec![(1, 10.0, 10.0, "**not bold", "normal")]);
}

#[test]
fn test_overlong_word_is_split_by_character() {
    let engine = create_test_engine();
    let mut surface = RecordingSurface::new();
    let word = "x".repeat(40);

    engine.render_text(&mut surface, &word).unwrap();

    let texts = surface.texts();
    assert_eq!(texts.len(), 3);
    assert_eq!(texts[0].3.len(), 18);
    assert_eq!(texts[1].3.len(), 18);
    assert_eq!(texts[2].3.len(), 4);
    assert_eq!(surface.drawn_text(), word);
}

#[test]
fn test_overlong_word_fills_the_rest_of_the_line_first() {
    let engine = create_test_engine();
    let mut surface = RecordingSurface::new();

    engine.render_text(&mut surface, &format!("ab {}", "y".repeat(20))).unwrap();

    let texts = surface.texts();
    assert_eq!(texts[0].3, format!("ab {}", "y".repeat(15)));
    assert_eq!(texts[1], (1, 10.0, 20.0, "yyyyy", "normal"));
}

#[test]
fn test_multibyte_word_split_never_breaks_a_character() {
    let engine = create_test_engine();
    let mut surface = RecordingSurface::new();
    let word = "é".repeat(20);

    engine.render_text(&mut surface, &word).unwrap();

    let texts = surface.texts();
    assert_eq!(texts[0].3.chars().count(), 18);
    assert_eq!(texts[1].3, "éé");
}

#[test]
fn test_empty_source_lines_keep_their_space() {
    let engine = create_test_engine();
    let mut surface = RecordingSurface::new();

    let cursor = engine.render_text(&mut surface, "a\n\nb\n").unwrap();

    let ys: Vec<f32> = surface.texts().iter().map(|t| t.2).collect();
    assert_eq!(ys, vec![10.0, 30.0]);
    assert_eq!(cursor.y, 40.0);
}

#[test]
fn test_crlf_line_endings() {
    let engine = create_test_engine();
    let mut surface = RecordingSurface::new();

    engine.render_text(&mut surface, "one\r\ntwo").unwrap();

    assert_eq!(surface.drawn_text(), "onetwo");
}

#[test]
fn test_page_break_before_overflow() {
    let engine = create_test_engine();
    let mut surface = RecordingSurface::new();
    let text = vec!["line"; 40].join("\n");

    let cursor = engine.render_text(&mut surface, &text).unwrap();

    assert_eq!(surface.page_count(), 3);
    let texts = surface.texts();
    let first_page: Vec<_> = texts.iter().filter(|t| t.0 == 1).collect();
    assert_eq!(first_page.len(), 18);
    assert_eq!(first_page.last().map(|t| t.2), Some(180.0));

    let second_page_first = texts.iter().find(|t| t.0 == 2).unwrap();
    assert_eq!(second_page_first.2, 10.0);

    for t in &texts {
        assert!(t.2 + 10.0 <= surface.geometry.bottom_limit());
    }
    assert_eq!(cursor.y, 50.0);
}

#[test]
fn test_long_input_terminates_with_bounded_pages() {
    let engine = create_test_engine();
    let mut surface = RecordingSurface::new();
    let text = "z".repeat(10_000);

    engine.render_text(&mut surface, &text).unwrap();

    let chars_per_page = 18 * 18;
    assert!(surface.page_count() <= text.len() / chars_per_page + 2);
    assert_eq!(surface.drawn_text().len(), 10_000);
}

#[test]
fn test_tag_syntax_scenario() {
    let config = LayoutConfig {
        markup: MarkupSyntax::Tags,
        line_height: 10.0,
        ..LayoutConfig::default()
    };
    let engine = LayoutEngine::new(config, bold_italic_rules()).unwrap();
    let mut surface = RecordingSurface::new();

    engine.render_text(&mut surface, "A<bold>B</bold>C<br>D").unwrap();

    assert_eq!(
        surface.texts(),
        vec![
            (1, 10.0, 10.0, "A", "normal"),
            (1, 20.0, 10.0, "B", "bold"),
            (1, 30.0, 10.0, "C", "normal"),
            (1, 10.0, 20.0, "D", "normal"),
        ]
    );
}

#[test]
fn test_unregistered_rule_font_falls_back_to_default() {
    init_logging();
    let rules = StyleRuleTable::new(vec![StyleRule::new("fancy", "~", "fancy")]).unwrap();
    let config = LayoutConfig {
        line_height: 10.0,
        ..LayoutConfig::default()
    };
    let engine = LayoutEngine::new(config, rules).unwrap();
    let mut surface = RecordingSurface::new();

    engine.render_text(&mut surface, "~styled~ text").unwrap();

    assert_eq!(surface.texts(), vec![(1, 10.0, 10.0, "styled text", "normal")]);
}

#[test]
fn test_missing_default_font_aborts() {
    let engine = create_test_engine();
    let mut surface = RecordingSurface::new().with_fonts(&["bold"]);

    let err = engine.render_text(&mut surface, "text").unwrap_err();

    assert_eq!(err, LayoutError::Surface(SurfaceError::UnknownFont("normal".into())));
}

#[test]
fn test_surface_errors_propagate() {
    let engine = create_test_engine();
    let mut surface = RecordingSurface::new().failing();

    let err = engine.render_text(&mut surface, "text").unwrap_err();

    assert!(matches!(err, LayoutError::Surface(SurfaceError::Backend(_))));
}

#[test]
fn test_degenerate_geometry_is_rejected() {
    let engine = create_test_engine();

    let mut narrow = RecordingSurface::new()
        .with_geometry(PageGeometry::new(20.0, 200.0).with_margins(10.0, 10.0, 10.0, 10.0));
    assert!(matches!(
        engine.render_text(&mut narrow, "x"),
        Err(LayoutError::InvalidGeometry(_))
    ));

    let mut short = RecordingSurface::new()
        .with_geometry(PageGeometry::new(200.0, 25.0).with_margins(10.0, 10.0, 10.0, 10.0));
    assert!(matches!(
        engine.render_text(&mut short, "x"),
        Err(LayoutError::InvalidGeometry(_))
    ));
    assert!(short.commands.is_empty());
}

#[test]
fn test_wrap_text_measures_without_drawing() {
    let engine = create_test_engine();
    let surface = RecordingSurface::new();

    let lines = engine.wrap_text(&surface, "aaa bbb ccc", 70.0).unwrap();

    let texts: Vec<String> = lines.iter().map(|l| l.text()).collect();
    assert_eq!(texts, vec!["aaa bbb", "ccc"]);
    assert_eq!(lines[0].width, 70.0);
    assert!(surface.commands.is_empty());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = LayoutConfig {
        font_size: 0.0,
        ..LayoutConfig::default()
    };
    assert!(matches!(
        LayoutEngine::new(config, bold_italic_rules()),
        Err(LayoutError::InvalidConfig(_))
    ));
}
