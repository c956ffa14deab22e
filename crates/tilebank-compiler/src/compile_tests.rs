use std::cell::RefCell;

use indoc::indoc;
use tilebank_core::{Command, Project, Script};

use crate::test_utils::{
    FakeRasterizer, RecordingObserver, fixed_blob, project, sized_by_context, solid_image,
};
use crate::{
    Callbacks, CommandStreamCompiler, Config, Error, EventCompileError, EventContext,
    NoopObserver, Output, RetryPlacement, Stage, compile,
};

const ONE_SCENE: &str = indoc! {r#"
    {
      "settings": { "startSceneId": "s1", "playerSpriteSheetId": "hero" },
      "images": [{ "id": "bg", "filename": "bg.png" }],
      "spriteSheets": [{ "id": "hero", "filename": "hero.png" }],
      "scenes": [{ "id": "s1", "name": "Start", "imageId": "bg" }]
    }
"#};

fn rasterizer() -> FakeRasterizer {
    FakeRasterizer::new()
        .with_image("bg.png", solid_image(1, 1, 0))
        .with_sprite("hero.png", 6)
}

fn build(project: &Project, config: &Config) -> Result<Output, Error> {
    compile(project, &rasterizer(), &fixed_blob(2), config, &mut NoopObserver)
}

fn names(output: &Output) -> Vec<&str> {
    output.files.keys().map(String::as_str).collect()
}

#[test]
fn minimal_project() {
    let project = project(ONE_SCENE);

    let output = build(&project, &Config::new()).unwrap();

    assert_eq!(
        names(&output),
        ["data_ptrs.h", "data_ptrs.c", "banks.h", "strings_17.c", "bank_18.c"]
    );
    let summary = &output.summary;
    assert_eq!(summary.strings, 1);
    assert_eq!(summary.flags, 0);
    assert_eq!(summary.string_banks, [17]);
    assert_eq!(summary.data_banks, [(18, 530)]);
    assert!(output.files["strings_17.c"].contains("\"NOSTRINGS\""));
    assert!(output.files["data_ptrs.h"].contains("extern unsigned char script_flags[1];"));

    // Scene record: image 0, no sprites, actors or triggers, one collision
    // byte, event pointer 18:0000.
    assert!(output.files["bank_18.c"].ends_with(indoc! {"
        0x00,0x00,0x00,0x00,0x00,0x01,0x00,0x12,
        0x00,0x00
        };
    "}));
}

#[test]
fn stages_are_reported_in_order() {
    let project = project(ONE_SCENE);
    let mut observer = RecordingObserver::default();

    compile(&project, &rasterizer(), &fixed_blob(2), &Config::new(), &mut observer).unwrap();

    assert_eq!(
        observer.stages,
        [
            Stage::Flags,
            Stage::Strings,
            Stage::Images,
            Stage::UiImages,
            Stage::Sprites,
            Stage::Scenes,
            Stage::Events,
            Stage::Music,
            Stage::Complete,
        ]
    );
}

#[test]
fn shared_text_shares_string_index() {
    let project = project(indoc! {r#"
        {
          "settings": { "playerSpriteSheetId": "hero" },
          "images": [{ "id": "bg", "filename": "bg.png" }],
          "spriteSheets": [{ "id": "hero", "filename": "hero.png" }],
          "scenes": [
            { "id": "s1", "imageId": "bg", "script": [{ "command": "EVENT_TEXT", "args": { "text": "Hello" } }] },
            { "id": "s2", "imageId": "bg", "script": [{ "command": "EVENT_TEXT", "args": { "text": "Hello" } }] }
          ]
        }
    "#});
    let seen = RefCell::new(Vec::new());
    let compiler = |script: &Script, context: &EventContext<'_>| {
        for command in script.commands() {
            if let Command::Text { text } = command {
                seen.borrow_mut().push(context.strings.index_of(text.as_str()));
            }
        }
        Ok::<_, EventCompileError>(vec![0])
    };

    let output = compile(&project, &rasterizer(), &compiler, &Config::new(), &mut NoopObserver)
        .unwrap();

    assert_eq!(output.summary.strings, 1);
    assert_eq!(seen.into_inner(), [Some(0), Some(0)]);
}

#[test]
fn oversized_event_blob_aborts() {
    let project = project(ONE_SCENE);

    let err = compile(
        &project,
        &rasterizer(),
        &fixed_blob(16385),
        &Config::new(),
        &mut NoopObserver,
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "script of scene 's1' needs 16385 bytes but a bank holds only 16384"
    );
}

#[test]
fn unknown_start_scene_falls_back_to_first() {
    let project = project(&ONE_SCENE.replace(r#""startSceneId": "s1""#, r#""startSceneId": "gone""#));

    let output = build(&project, &Config::new()).unwrap();

    assert!(output.files["data_ptrs.h"].contains("#define START_SCENE_INDEX 0x0000"));
}

#[test]
fn start_scene_is_looked_up_by_id() {
    let project = project(indoc! {r#"
        {
          "settings": { "startSceneId": "s2", "startX": 5, "startDirection": "right", "playerSpriteSheetId": "hero" },
          "images": [{ "id": "bg", "filename": "bg.png" }],
          "spriteSheets": [{ "id": "hero", "filename": "hero.png" }],
          "scenes": [{ "id": "s1", "imageId": "bg" }, { "id": "s2", "imageId": "bg" }]
        }
    "#});

    let output = build(&project, &Config::new()).unwrap();

    let header = &output.files["data_ptrs.h"];
    assert!(header.contains("#define START_SCENE_INDEX 0x0001"));
    assert!(header.contains("#define START_SCENE_X 0x05"));
    assert!(header.contains("#define START_SCENE_DIR_X 1\n#define START_SCENE_DIR_Y 0"));
    assert!(header.contains("#define START_PLAYER_SPRITE 0"));
}

#[test]
fn no_scenes() {
    let project = project(r#"{ "scenes": [] }"#);

    let err = build(&project, &Config::new()).unwrap_err();

    assert!(matches!(err, Error::NoScenes));
}

#[test]
fn invalid_config_is_rejected_first() {
    let project = project(r#"{ "scenes": [] }"#);

    let err = build(&project, &Config::new().strings_per_bank(0)).unwrap_err();

    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn strings_spill_into_more_banks() {
    let texts: Vec<String> = (0..5)
        .map(|i| format!(r#"{{ "command": "EVENT_TEXT", "args": {{ "text": "line {i}" }} }}"#))
        .collect();
    let json = ONE_SCENE.replace(
        r#""imageId": "bg" }"#,
        &format!(r#""imageId": "bg", "script": [{}] }}"#, texts.join(",")),
    );
    let project = project(&json);

    let output = build(&project, &Config::new().strings_per_bank(2)).unwrap();

    assert_eq!(output.summary.string_banks, [17, 18, 19]);
    assert_eq!(output.summary.data_banks[0].0, 20);
    assert!(output.files["strings_19.c"].contains("\"LINE 4\""));
    assert!(output.files["data_ptrs.c"].contains("0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,&bank_20_data"));
}

#[test]
fn music_banks_follow_data_banks() {
    let project = project(indoc! {r#"
        {
          "settings": { "playerSpriteSheetId": "hero" },
          "images": [{ "id": "bg", "filename": "bg.png" }],
          "spriteSheets": [{ "id": "hero", "filename": "hero.png" }],
          "music": [{ "id": "a", "name": "A", "filename": "a.mod" }, { "id": "b", "name": "B", "filename": "b.mod" }],
          "scenes": [
            {
              "id": "s1",
              "imageId": "bg",
              "script": [
                { "command": "EVENT_MUSIC_PLAY", "args": { "musicId": "b" } },
                { "command": "EVENT_MUSIC_PLAY", "args": { "musicId": "a" } }
              ]
            }
          ]
        }
    "#});

    let output = build(&project, &Config::new().music_bank_slots(1)).unwrap();

    let tracks: Vec<(&str, usize)> = output
        .music
        .iter()
        .map(|t| (t.data_name.as_str(), t.bank))
        .collect();
    assert_eq!(tracks, [("music_track_0", 19), ("music_track_1", 19)]);
    assert!(output.files["data_ptrs.c"].contains("music_track_0_Data, music_track_1_Data"));
}

#[test]
fn retry_policy_changes_placement() {
    let project = project(ONE_SCENE);
    let compiler = sized_by_context(16000, 10);

    let reduced = compile(
        &project,
        &rasterizer(),
        &compiler,
        &Config::new(),
        &mut NoopObserver,
    )
    .unwrap();
    let original = compile(
        &project,
        &rasterizer(),
        &compiler,
        &Config::new().retry_placement(RetryPlacement::Original),
        &mut NoopObserver,
    )
    .unwrap();

    // The first blob fits the empty bank, so both policies place it in full.
    assert_eq!(reduced.summary.data_banks, original.summary.data_banks);
    assert_eq!(reduced.summary.data_banks[0], (18, 16000 + 17 + 4 + 48 + 64));
}

#[test]
fn retry_places_reduced_blob_for_later_scripts() {
    let project = project(&ONE_SCENE.replace(
        r#""imageId": "bg" }"#,
        r#""imageId": "bg", "actors": [{ "id": "a1", "spriteSheetId": "hero" }] }"#,
    ));
    let compiler = sized_by_context(9000, 10);

    let reduced = compile(&project, &rasterizer(), &compiler, &Config::new(), &mut NoopObserver)
        .unwrap();
    let original = compile(
        &project,
        &rasterizer(),
        &compiler,
        &Config::new().retry_placement(RetryPlacement::Original),
        &mut NoopObserver,
    )
    .unwrap();

    assert_eq!(
        reduced.summary.data_banks[0],
        (18, 9010 + 17 + 4 + 48 + 64 + 385 + 20)
    );
    assert_eq!(original.summary.data_banks[0], (18, 9000));
    assert_eq!(original.summary.data_banks.len(), 2);
}

#[test]
fn template_warnings_reach_callbacks() {
    let project_dir = tempfile::tempdir().unwrap();
    let templates = tempfile::tempdir().unwrap();
    for file in ["ui.png", "ascii.png", "frame.png", "emotes.png"] {
        let path = templates.path().join("assets/ui").join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"png").unwrap();
    }
    let config = Config::new()
        .project_root(project_dir.path())
        .template_root(templates.path());
    let project = project(ONE_SCENE);
    let mut warnings = Vec::new();
    let mut observer = Callbacks::new(|_| {}, |message: &str| warnings.push(message.to_string()));

    compile(&project, &rasterizer(), &fixed_blob(2), &config, &mut observer).unwrap();

    assert_eq!(warnings.len(), 4);
    assert_eq!(
        warnings[1],
        "assets/ui/ascii.png was missing, copying default file to project assets"
    );
    assert!(project_dir.path().join("assets/ui/emotes.png").exists());
}

#[test]
fn dropped_actor_warning_reaches_callbacks() {
    let project = project(&ONE_SCENE.replace(
        r#""imageId": "bg" }"#,
        r#""imageId": "bg", "actors": [{ "id": "a1", "spriteSheetId": "ghost" }] }"#,
    ));
    let mut warnings = Vec::new();
    let mut observer = Callbacks::new(|_| {}, |message: &str| warnings.push(message.to_string()));

    compile(&project, &rasterizer(), &fixed_blob(2), &Config::new(), &mut observer).unwrap();

    assert_eq!(
        warnings,
        ["scene 'Start': dropping actor 'a1' with unknown sprite sheet"]
    );
}

#[test]
fn command_stream_compiler_end_to_end() {
    let project = project(indoc! {r#"
        {
          "settings": { "playerSpriteSheetId": "hero" },
          "images": [{ "id": "bg", "filename": "bg.png" }],
          "spriteSheets": [{ "id": "hero", "filename": "hero.png" }],
          "scenes": [
            {
              "id": "s1",
              "imageId": "bg",
              "script": [
                { "command": "EVENT_SET_TRUE", "args": { "flag": "met" } },
                { "command": "EVENT_TEXT", "args": { "text": "Welcome" } },
                { "command": "EVENT_END" }
              ]
            }
          ]
        }
    "#});

    let output = compile(
        &project,
        &rasterizer(),
        &CommandStreamCompiler,
        &Config::new(),
        &mut NoopObserver,
    )
    .unwrap();

    assert_eq!(output.summary.flags, 1);
    assert!(output.files["data_ptrs.h"].contains("script_flags[2]"));
    // flags, image table (bg), empty music table, then SET_FLAG 0, TEXT 0, END
    assert!(output.files["bank_18.c"].starts_with(indoc! {"
        #pragma bank=18

        const unsigned char bank_18_data[] = {
        0x03,0x01,0x00,0x00,0x01,0x01,0x00,0x02,0x00,0x00,0x01,0x00,0x00,0x00,"}));
}

#[test]
fn overlong_text_warns() {
    let long = "a".repeat(40);
    let project = project(&ONE_SCENE.replace(
        r#""imageId": "bg" }"#,
        &format!(r#""imageId": "bg", "script": [{{ "command": "EVENT_TEXT", "args": {{ "text": "{long}" }} }}] }}"#),
    ));
    let mut observer = RecordingObserver::default();

    let output = compile(&project, &rasterizer(), &fixed_blob(2), &Config::new(), &mut observer)
        .unwrap();

    assert_eq!(observer.warnings.len(), 1);
    assert!(observer.warnings[0].contains("longer than 37 bytes"));
    assert!(output.files["strings_17.c"].contains(&format!("\"{}\"", "A".repeat(37))));
}
