use treesnap_core::identifier::Id;
use treesnap_parser::{
    error::ErrorCode, parse, parse_focus_gui, parse_focus_tree, parse_localisation,
    parse_sprite_catalog,
};

#[test]
fn test_focus_file_end_to_end() {
    let source = "\u{feff}# Poland\nfocus_tree = {\n\tid = poland_focus\n\tfocus = {\n\t\tid = POL_start\n\t\tx = 4\n\t\ty = 0\n\t}\n\tfocus = {\n\t\tid = POL_next\n\t\tprerequisite = { focus = POL_start }\n\t\trelative_position_id = POL_start\n\t\tx = -1\n\t\ty = 1\n\t}\n";

    let tree = parse_focus_tree(source).expect("unterminated tree should still parse");
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.focuses()[1].relative_to(), Some(Id::new("POL_start")));
    assert_eq!(tree.focuses()[1].position().x(), -1);
}

#[test]
fn test_lexer_errors_are_collected() {
    let err = parse("a = ¬\nb = ¬").unwrap_err();
    assert_eq!(err.diagnostics().len(), 2);
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E002));
}

#[test]
fn test_gui_and_catalog_files() {
    let gui = parse_focus_gui(
        "guiTypes = { positionType = { name = \"focus_spacing\" position = { x = 96 y = 130 } } }",
    )
    .unwrap();
    assert_eq!(gui.spacing.focus.x(), 96);

    let catalog = parse_sprite_catalog(
        "spriteTypes = { spriteType = { name = \"GFX_goal_unknown\" texturefile = \"gfx/goal_unknown.dds\" } }",
    )
    .unwrap();
    assert!(catalog.sprite(Id::new("GFX_goal_unknown")).is_some());
}

#[test]
fn test_localisation_file() {
    let table = parse_localisation("l_english:\n POL_start:0 \"Start\"\n", "l_english").unwrap();
    assert_eq!(table.resolve("l_english", Id::new("POL_start")), "Start");
}
