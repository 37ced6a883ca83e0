use pyxl_compiler::{
    compile_program, split_sections, CompileOptions, ErrorCode, ModeSource, ProgramSource,
    ScalarExpander, SectionKind,
};
use rustc_hash::FxHashMap;

const PLAY: &str = "Play
════════════════
let score = 0

enter(level)
────────────────
score = level

frame
────────────────
score += 1
debug_print(score)

pop_mode from Pause
────────────────
score = 0
";

fn game() -> (ProgramSource, FxHashMap<String, String>) {
    let program = ProgramSource {
        scripts: vec!["quad://game/util.pyxl".to_string()],
        modes: vec![ModeSource::new("Play", "quad://game/Play.pyxl")],
        start_mode: "Play".to_string(),
        base_url: "quad://game/".to_string(),
        y_up: false,
    };
    let mut files = FxHashMap::default();
    files.insert(
        "quad://game/util.pyxl".to_string(),
        "def twice(x): 2x".to_string(),
    );
    files.insert("quad://game/Play.pyxl".to_string(), PLAY.to_string());
    (program, files)
}

#[test]
fn mode_sections_in_order() {
    let kinds: Vec<SectionKind> = split_sections(PLAY, false)
        .unwrap()
        .into_iter()
        .map(|section| section.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Init,
            SectionKind::Enter,
            SectionKind::Frame,
            SectionKind::PopModeFrom("Pause".to_string()),
        ]
    );
}

#[test]
fn program_assembles_scripts_and_modes() {
    let (program, files) = game();
    let js = compile_program(&program, &files, CompileOptions::default(), &ScalarExpander).unwrap();
    assert!(js.starts_with("'use strict';\n"));
    assert!(js.contains("/*ට\"quad://game/util.pyxl\"*/"));
    assert!(js.contains("const twice = (function(x) {"));
    assert!(js.contains("const Play = (function() {"));
    assert!(js.contains("function $enter(level) {"));
    assert!(js.contains("function $pop_modeFromPause() {"));
    assert!(js.contains("$pop_modeFromPause:$pop_modeFromPause"));
    assert!(js.contains("set_mode(Play);"));
    assert!(js.find("twice").unwrap() < js.find("const Play").unwrap());
}

#[test]
fn source_location_names_file_and_line() {
    let (program, files) = game();
    let js = compile_program(&program, &files, CompileOptions::default(), &ScalarExpander).unwrap();
    assert!(!js.contains("SOURCE_LOCATION"));
    assert!(js.contains("filename: \"Play.pyxl\", line_number: 12}"));
}

#[test]
fn mode_errors_report_file_lines() {
    let (program, mut files) = game();
    files.insert(
        "quad://game/Play.pyxl".to_string(),
        "frame\n─────────\nx = 1\nfor i = 3:\n    f(i)\n".to_string(),
    );
    let err = compile_program(&program, &files, CompileOptions::default(), &ScalarExpander)
        .unwrap_err();
    assert_eq!(err.url, "quad://game/Play.pyxl");
    assert_eq!(err.error.code, ErrorCode::E2001);
    assert_eq!(err.error.line, 3);
}

#[test]
fn missing_file_reported() {
    let (program, mut files) = game();
    files.remove("quad://game/util.pyxl");
    let err = compile_program(&program, &files, CompileOptions::default(), &ScalarExpander)
        .unwrap_err();
    assert_eq!(err.error.code, ErrorCode::E4007);
}
