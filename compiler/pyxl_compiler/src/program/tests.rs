use super::*;
use crate::expand::ScalarExpander;
use pretty_assertions::assert_eq;

fn files(entries: &[(&str, &str)]) -> FxHashMap<String, String> {
    entries
        .iter()
        .map(|&(url, src)| (url.to_string(), src.to_string()))
        .collect()
}

fn game() -> ProgramSource {
    ProgramSource {
        scripts: vec!["game/util.pyxl".to_string()],
        modes: vec![ModeSource::new("Play", "game/Play.pyxl")],
        start_mode: "Play".to_string(),
        base_url: "game/".to_string(),
        y_up: false,
    }
}

// === Directives ===

#[test]
fn directive_with_offset() {
    assert_eq!(
        parse_line_directive("/*ට\"https://x.org/a.pyxl\":12*/"),
        Some(LineDirective {
            url: "https://x.org/a.pyxl".to_string(),
            line: 12
        })
    );
}

#[test]
fn directive_without_offset() {
    let directive = parse_line_directive("  /*ට\"game/util.pyxl\"*/").unwrap();
    assert_eq!(directive.url, "game/util.pyxl");
    assert_eq!(directive.line, 0);
    assert_eq!(parse_line_directive("/* plain comment */"), None);
}

#[test]
fn os_scripts_detected() {
    assert!(is_os_script("quad://console/os/_SystemMenu.pyxl"));
    assert!(!is_os_script("quad://console/os/lib/x.pyxl"));
    assert!(!is_os_script("game/os.pyxl"));
}

// === Modes ===

#[test]
fn mode_wraps_sections() {
    let mut ctx = CompileContext::new(CompileOptions::default());
    let src = "Play\n=====\nlet t = 0\nenter(level)\n-----\nt = level\nframe\n-----\nt += 1\n";
    let js = compile_mode(&ModeSource::new("Play", "Play.pyxl"), src, &mut ctx, &ScalarExpander)
        .unwrap();
    assert!(js.starts_with("// Play.pyxl\n"));
    assert!(js.contains("const Play = (function() {"));
    assert!(js.contains("/*ට\"Play.pyxl\":2*/\nlet t = 0;"));
    assert!(js.contains("function $enter(level) {\n/*ට\"Play.pyxl\":5*/\nt = level;"));
    assert!(js.contains("/*ට\"Play.pyxl\":8*/\nt += 1;"));
    assert!(js.contains("$name:'Play'"));
}

#[test]
fn scripts_are_not_frame_wrapped() {
    let mut ctx = CompileContext::new(CompileOptions::default());
    let script = compile_script("util.pyxl", "t = 1", &mut ctx, &ScalarExpander).unwrap();
    assert_eq!(script, "/*ට\"util.pyxl\"*/\nt = 1;");
    let mode = compile_mode(&ModeSource::new("Play", "Play.pyxl"), "t = 1\n", &mut ctx, &ScalarExpander)
        .unwrap();
    assert!(mode.contains("const $frame = (function quadplay_main_loop() {"));
    assert!(mode.contains("/*ට\"Play.pyxl\":0*/\nt = 1;"));
}

#[test]
fn pop_mode_section_bound() {
    let mut ctx = CompileContext::new(CompileOptions::default());
    let src = "pop_mode from Pause\n-----\nresume()\n";
    let js = compile_mode(&ModeSource::new("Play", "Play.pyxl"), src, &mut ctx, &ScalarExpander)
        .unwrap();
    assert!(js.contains("function $pop_modeFromPause() {"));
    assert!(js.contains(", $pop_modeFromPause:$pop_modeFromPause"));
}

#[test]
fn mode_error_shifted_to_file_line() {
    let mut ctx = CompileContext::new(CompileOptions::default());
    let src = "frame\n-----\nx = 1\ny = 2 === 3\n";
    let err = compile_mode(&ModeSource::new("Play", "Play.pyxl"), src, &mut ctx, &ScalarExpander)
        .unwrap_err();
    assert_eq!(err.url, "Play.pyxl");
    assert_eq!(err.error.line, 3);
}

#[test]
fn privileged_mode_compiles_internal() {
    let mut ctx = CompileContext::new(CompileOptions::default());
    let mode = ModeSource::new("_Pause", "_Pause.pyxl");
    assert!(compile_mode(&mode, "$x = 1\n", &mut ctx, &ScalarExpander).is_ok());
    let mode = ModeSource::new("Pause", "Pause.pyxl");
    let err = compile_mode(&mode, "$x = 1\n", &mut ctx, &ScalarExpander).unwrap_err();
    assert_eq!(err.error.code, ErrorCode::E0006);
    assert!(!ctx.options().internal_mode);
}

// === Programs ===

#[test]
fn program_assembles_scripts_and_modes() {
    let files = files(&[
        ("game/util.pyxl", "def twice(x): 2 x"),
        ("game/Play.pyxl", "frame\n-----\ndraw()"),
    ]);
    let js = compile_program(&game(), &files, CompileOptions::default(), &ScalarExpander).unwrap();
    assert!(js.starts_with("'use strict';\nconst $Object = {}.constructor;"));
    assert!(js.contains("/*ට\"game/util.pyxl\"*/\nconst twice = (function(x) {"));
    assert!(js.contains("const Play = (function() {"));
    assert!(js.contains("set_mode(Play);"));
    assert!(js.ends_with("$gameMode.$frame();\n};\n"));
}

#[test]
fn missing_file_reported() {
    let files = files(&[("game/util.pyxl", "x = 1")]);
    let err = compile_program(&game(), &files, CompileOptions::default(), &ScalarExpander)
        .unwrap_err();
    assert_eq!(err.url, "game/Play.pyxl");
    assert_eq!(err.error.code, ErrorCode::E4007);
}

#[test]
fn source_location_resolved_outside_strings() {
    let files = files(&[
        ("game/util.pyxl", "x = 1"),
        ("game/Play.pyxl", "frame\n-----\nwhere(SOURCE_LOCATION, \"SOURCE_LOCATION\")"),
    ]);
    let js = compile_program(&game(), &files, CompileOptions::default(), &ScalarExpander).unwrap();
    assert!(js.contains(
        "where(($Object.freeze({url: \"game/Play.pyxl\", filename: \"Play.pyxl\", line_number: 3})), \"SOURCE_LOCATION\");"
    ));
}
