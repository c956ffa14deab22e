use std::path::Path;

use indoc::indoc;

use super::{SpriteKind, precompile_sprites, resolve_player_sprite};
use crate::Error;
use crate::test_utils::{FakeRasterizer, project};

const SHEETS: &str = indoc! {r#"
    {
      "spriteSheets": [
        { "id": "npc", "name": "NPC", "filename": "npc.png" },
        { "id": "unused", "name": "Unused", "filename": "unused.png" },
        { "id": "hero", "name": "Hero", "filename": "hero.png" },
        { "id": "sign", "name": "Sign", "filename": "sign.png" }
      ],
      "scenes": [
        {
          "id": "s1",
          "actors": [
            { "id": "a1", "spriteSheetId": "sign" },
            { "id": "a2", "spriteSheetId": "npc" },
            { "id": "a3", "spriteSheetId": "npc" }
          ]
        }
      ]
    }
"#};

fn rasterizer() -> FakeRasterizer {
    FakeRasterizer::new()
        .with_sprite("npc.png", 3)
        .with_sprite("hero.png", 6)
        .with_sprite("sign.png", 1)
}

#[test]
fn kind_from_frames() {
    assert_eq!(SpriteKind::from_frames(6), SpriteKind::AnimatedActor);
    assert_eq!(SpriteKind::from_frames(3), SpriteKind::Actor);
    assert_eq!(SpriteKind::from_frames(4), SpriteKind::Static);
    assert_eq!(SpriteKind::AnimatedActor.code(), 2);
    assert_eq!(SpriteKind::Static.code(), 0);
}

#[test]
fn worn_and_player_sheets_are_pooled() {
    let project = project(SHEETS);

    let sprites = precompile_sprites(
        &project.sprite_sheets,
        &project.scenes,
        Some("hero"),
        &rasterizer(),
        Path::new("."),
    )
    .unwrap();

    let ids: Vec<&str> = sprites.keys().map(String::as_str).collect();
    assert_eq!(ids, ["npc", "hero", "sign"]);
    let npc = sprites.get("npc").unwrap();
    assert_eq!((npc.frames, npc.kind), (3, SpriteKind::Actor));
    assert_eq!(npc.data.len(), 3 * 64);
}

#[test]
fn player_falls_back_to_first_animated_sheet() {
    let project = project(SHEETS);
    let rasterizer = rasterizer().with_sprite("sign.png", 6);
    let sprites = precompile_sprites(
        &project.sprite_sheets,
        &project.scenes,
        None,
        &rasterizer,
        Path::new("."),
    )
    .unwrap();

    assert_eq!(resolve_player_sprite(&sprites, Some("missing")).unwrap(), 1);
    assert_eq!(resolve_player_sprite(&sprites, Some("npc")).unwrap(), 0);
}

#[test]
fn no_player_sprite() {
    let project = project(SHEETS);
    let sprites = precompile_sprites(
        &project.sprite_sheets,
        &project.scenes,
        None,
        &rasterizer(),
        Path::new("."),
    )
    .unwrap();

    let err = resolve_player_sprite(&sprites, None).unwrap_err();

    assert!(matches!(err, Error::NoPlayerSprite));
}

#[test]
fn many_sheets_keep_catalog_order() {
    let sheets: Vec<String> = (0..40)
        .map(|i| format!(r#"{{ "id": "s{i}", "filename": "s{i}.png" }}"#))
        .collect();
    let actors: Vec<String> = (0..40)
        .rev()
        .map(|i| format!(r#"{{ "id": "a{i}", "spriteSheetId": "s{i}" }}"#))
        .collect();
    let json = format!(
        r#"{{ "spriteSheets": [{}], "scenes": [{{ "id": "x", "actors": [{}] }}] }}"#,
        sheets.join(","),
        actors.join(",")
    );
    let project = project(&json);
    let mut rasterizer = FakeRasterizer::new();
    for i in 0..40 {
        rasterizer = rasterizer.with_sprite(&format!("s{i}.png"), i % 7);
    }

    let sprites = precompile_sprites(
        &project.sprite_sheets,
        &project.scenes,
        None,
        &rasterizer,
        Path::new("."),
    )
    .unwrap();

    let frames: Vec<usize> = sprites.values().map(|s| s.frames).collect();
    let expected: Vec<usize> = (0..40).map(|i| i % 7).collect();
    assert_eq!(frames, expected);
}
